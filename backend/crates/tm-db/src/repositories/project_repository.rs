//! Project records, stored as canonical JSON documents.
//!
//! Every read goes through `Project::try_from(ProjectDocument)`, so legacy
//! shapes are normalized on the way in and written back canonical on the
//! next update.
//!
//! ## Versions
//!
//! `version` is an optimistic concurrency token. `update` only succeeds when
//! the stored version still equals the one the caller read; otherwise it
//! returns `DbError::WriteConflict` and nothing is written. `modify` wraps
//! that in a bounded re-fetch loop.
//!
//! ## Custom id counters
//!
//! Sequences are per prefix (`DES-ID-2507`). A counter is consumed even if
//! the project insert that follows fails, so gaps are possible. Ids are
//! unique, not dense.

use crate::{DbError, OwnerSubscription, ProjectChange, ProjectFeed, Result as DbErrorResult};

use tm_core::{CustomId, Installment, PaymentTranche, Project, ProjectDocument};

use error_location::ErrorLocation;

use std::panic::Location;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use log::{debug, warn};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

pub const DEFAULT_WRITE_RETRY_ATTEMPTS: u32 = 3;

const SELECT_DOCUMENT: &str = "SELECT id, document, version FROM projects";

/// Result of trying to claim a tranche slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrancheReservation {
    /// The tranche did not exist and is now stored, without an invoice.
    Reserved { project: Project, tranche: PaymentTranche },
    /// Someone else got there first; this is their tranche.
    Existing { project: Project, tranche: PaymentTranche },
}

impl TrancheReservation {
    pub fn project(&self) -> &Project {
        match self {
            Self::Reserved { project, .. } | Self::Existing { project, .. } => project,
        }
    }

    pub fn tranche(&self) -> &PaymentTranche {
        match self {
            Self::Reserved { tranche, .. } | Self::Existing { tranche, .. } => tranche,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProjectRepository {
    pool: SqlitePool,
    feed: ProjectFeed,
    write_retry_attempts: u32,
}

impl ProjectRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_feed(pool, ProjectFeed::default())
    }

    pub fn with_feed(pool: SqlitePool, feed: ProjectFeed) -> Self {
        Self {
            pool,
            feed,
            write_retry_attempts: DEFAULT_WRITE_RETRY_ATTEMPTS,
        }
    }

    pub fn with_write_retry_attempts(mut self, attempts: u32) -> Self {
        self.write_retry_attempts = attempts.max(1);
        self
    }

    pub fn feed(&self) -> &ProjectFeed {
        &self.feed
    }

    pub fn subscribe_owner(&self, owner_id: impl Into<String>) -> OwnerSubscription {
        self.feed.subscribe_owner(self.clone(), owner_id)
    }

    // =========================================================================
    // Writes
    // =========================================================================

    pub async fn create(&self, project: &Project) -> DbErrorResult<()> {
        let document = encode(project)?;

        let mut tx = self.pool.begin().await?;
        let inserted = sqlx::query(
            r#"
                INSERT INTO projects (id, custom_id, owner_id, created_at, updated_at, version, document)
                VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(project.id.to_string())
        .bind(project.custom_id.to_string())
        .bind(&project.owner_id)
        .bind(project.created_at.timestamp_millis())
        .bind(project.updated_at.timestamp_millis())
        .bind(project.version)
        .bind(document)
        .execute(&mut *tx)
        .await;

        if let Err(e) = inserted {
            return Err(duplicate_or(e, project));
        }

        index_invoices(&mut tx, project).await?;
        tx.commit().await?;

        debug!("Created project {} ({})", project.custom_id, project.id);
        self.feed.publish(ProjectChange::from(project));
        Ok(())
    }

    /// Store `project` if the stored version still equals `expected_version`.
    /// Returns the project as stored, with its version bumped.
    pub async fn update(&self, project: &Project, expected_version: i32) -> DbErrorResult<Project> {
        let mut stored = project.clone();
        stored.version = expected_version + 1;
        let document = encode(&stored)?;

        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(
            r#"
                UPDATE projects
                SET document = ?, version = ?, updated_at = ?
                WHERE id = ? AND version = ?
            "#,
        )
        .bind(document)
        .bind(stored.version)
        .bind(stored.updated_at.timestamp_millis())
        .bind(stored.id.to_string())
        .bind(expected_version)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            let exists = sqlx::query("SELECT 1 FROM projects WHERE id = ?")
                .bind(stored.id.to_string())
                .fetch_optional(&mut *tx)
                .await?
                .is_some();

            return Err(if exists {
                DbError::WriteConflict {
                    project_id: stored.id,
                    expected_version,
                    location: ErrorLocation::from(Location::caller()),
                }
            } else {
                DbError::not_found(stored.id)
            });
        }

        index_invoices(&mut tx, &stored).await?;
        tx.commit().await?;

        self.feed.publish(ProjectChange::from(&stored));
        Ok(stored)
    }

    /// Read, apply `change`, write back; on a version conflict re-read and
    /// apply again, up to the configured number of attempts.
    ///
    /// A change that leaves the project untouched is not written.
    pub async fn modify<T, E, F>(&self, id: Uuid, mut change: F) -> Result<(Project, T), E>
    where
        F: FnMut(&mut Project) -> Result<T, E>,
        E: From<DbError>,
    {
        let mut attempt = 1;
        loop {
            let current = self
                .find_by_id(id)
                .await?
                .ok_or_else(|| DbError::not_found(id))?;

            let mut next = current.clone();
            let output = change(&mut next)?;
            if next == current {
                return Ok((current, output));
            }

            match self.update(&next, current.version).await {
                Ok(stored) => return Ok((stored, output)),
                Err(e) if e.is_write_conflict() && attempt < self.write_retry_attempts => {
                    warn!(
                        "Write conflict on project {} (attempt {}/{}), retrying",
                        id, attempt, self.write_retry_attempts
                    );
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Claim the slot for `installment` unless a tranche for it already
    /// exists. Two concurrent callers cannot both get `Reserved`: the loser's
    /// versioned write conflicts, it re-reads and sees the winner's tranche.
    pub async fn reserve_tranche(
        &self,
        project_id: Uuid,
        installment: &Installment,
        amount: i64,
        now: DateTime<Utc>,
    ) -> DbErrorResult<TrancheReservation> {
        let (project, existing) = self
            .modify(project_id, |project| -> DbErrorResult<Option<PaymentTranche>> {
                if let Some(existing) = project.tranche(installment) {
                    return Ok(Some(existing.clone()));
                }
                project
                    .payments
                    .push(PaymentTranche::reserved(installment.clone(), amount, now));
                project.updated_at = now;
                Ok(None)
            })
            .await?;

        Ok(match existing {
            Some(tranche) => TrancheReservation::Existing { project, tranche },
            None => {
                let tranche = project
                    .tranche(installment)
                    .cloned()
                    .ok_or_else(|| DbError::Initialization {
                        message: format!("Reserved tranche {} missing after write", installment),
                        location: ErrorLocation::from(Location::caller()),
                    })?;
                TrancheReservation::Reserved { project, tranche }
            }
        })
    }

    /// Store the gateway invoice on the reserved tranche.
    pub async fn attach_invoice(
        &self,
        project_id: Uuid,
        installment: &Installment,
        invoice_id: &str,
        invoice_url: &str,
        now: DateTime<Utc>,
    ) -> DbErrorResult<Project> {
        let (project, ()) = self
            .modify(project_id, |project| -> DbErrorResult<()> {
                if project.tranche(installment).is_none() {
                    project
                        .payments
                        .push(PaymentTranche::reserved(installment.clone(), 0, now));
                }
                let tranche = project
                    .tranche_mut(installment)
                    .ok_or_else(|| DbError::not_found(installment))?;
                tranche.invoice_id = Some(invoice_id.to_string());
                tranche.invoice_url = Some(invoice_url.to_string());
                project.updated_at = now;
                Ok(())
            })
            .await?;

        Ok(project)
    }

    /// Mark the tranche behind `invoice_id` paid. `None` when no project
    /// carries the invoice; the installment is `None` when it was already
    /// paid.
    pub async fn mark_invoice_paid(
        &self,
        invoice_id: &str,
        now: DateTime<Utc>,
    ) -> DbErrorResult<Option<(Project, Option<Installment>)>> {
        let Some(project) = self.find_by_invoice_id(invoice_id).await? else {
            return Ok(None);
        };

        let (project, installment) = self
            .modify(project.id, |project| -> DbErrorResult<Option<Installment>> {
                Ok(project.mark_invoice_paid(invoice_id, now))
            })
            .await?;

        Ok(Some((project, installment)))
    }

    /// Next id in the `{TYPE}-{COUNTRY}-{YYMM}` sequence.
    pub async fn next_custom_id(
        &self,
        project_type: &str,
        country: &str,
        created_at: DateTime<Utc>,
    ) -> DbErrorResult<CustomId> {
        let prefix = CustomId::prefix_for(project_type, country, created_at)?;

        let mut tx = self.pool.begin().await?;
        sqlx::query(
            r#"
                INSERT INTO custom_id_counters (prefix, next_value) VALUES (?, 1)
                ON CONFLICT(prefix) DO UPDATE SET next_value = next_value + 1
            "#,
        )
        .bind(&prefix)
        .execute(&mut *tx)
        .await?;

        let sequence: i64 =
            sqlx::query_scalar("SELECT next_value FROM custom_id_counters WHERE prefix = ?")
                .bind(&prefix)
                .fetch_one(&mut *tx)
                .await?;
        tx.commit().await?;

        let sequence = u32::try_from(sequence).map_err(|_| DbError::Initialization {
            message: format!("Custom id counter for {} out of range: {}", prefix, sequence),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(CustomId::new(project_type, country, created_at, sequence)?)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub async fn find_by_id(&self, id: Uuid) -> DbErrorResult<Option<Project>> {
        let row = sqlx::query(&format!("{SELECT_DOCUMENT} WHERE id = ?"))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(decode).transpose()
    }

    pub async fn find_by_custom_id(&self, custom_id: &str) -> DbErrorResult<Option<Project>> {
        // Malformed ids cannot be stored, so there is nothing to look up.
        if CustomId::from_str(custom_id).is_err() {
            return Ok(None);
        }

        let row = sqlx::query(&format!("{SELECT_DOCUMENT} WHERE custom_id = ?"))
            .bind(custom_id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(decode).transpose()
    }

    pub async fn find_by_invoice_id(&self, invoice_id: &str) -> DbErrorResult<Option<Project>> {
        let row = sqlx::query(
            r#"
                SELECT p.document, p.version
                FROM projects p
                JOIN project_invoices i ON i.project_id = p.id
                WHERE i.invoice_id = ?
            "#,
        )
        .bind(invoice_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(decode).transpose()
    }

    /// The owner's projects, newest first. A record that no longer decodes
    /// is logged and left out rather than failing the whole list.
    pub async fn list_by_owner(&self, owner_id: &str) -> DbErrorResult<Vec<Project>> {
        let rows = sqlx::query(&format!(
            "{SELECT_DOCUMENT} WHERE owner_id = ? ORDER BY created_at DESC, custom_id DESC"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .filter_map(|row| match decode(row) {
                Ok(project) => Some(project),
                Err(e) => {
                    let id: String = row.try_get("id").unwrap_or_default();
                    warn!("Skipping undecodable project {} of owner {}: {}", id, owner_id, e);
                    None
                }
            })
            .collect())
    }
}

fn encode(project: &Project) -> DbErrorResult<String> {
    Ok(serde_json::to_string(&ProjectDocument::from(project))?)
}

/// The `version` column is authoritative over the copy inside the document.
fn decode(row: &SqliteRow) -> DbErrorResult<Project> {
    let document: String = row.try_get("document")?;
    let version: i32 = row.try_get("version")?;

    let document: ProjectDocument = serde_json::from_str(&document)?;
    let mut project = Project::try_from(document)?;
    project.version = version;
    Ok(project)
}

async fn index_invoices(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    project: &Project,
) -> DbErrorResult<()> {
    let project_id = project.id.to_string();
    for tranche in &project.payments {
        let Some(invoice_id) = tranche.pollable_invoice_id() else {
            continue;
        };
        sqlx::query(
            r#"
                INSERT INTO project_invoices (invoice_id, project_id, installment)
                VALUES (?, ?, ?)
                ON CONFLICT(invoice_id) DO UPDATE
                SET project_id = excluded.project_id, installment = excluded.installment
            "#,
        )
        .bind(invoice_id)
        .bind(&project_id)
        .bind(tranche.installment.title())
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

#[track_caller]
fn duplicate_or(error: sqlx::Error, project: &Project) -> DbError {
    let unique_violation = error
        .as_database_error()
        .is_some_and(|e| e.is_unique_violation());

    if !unique_violation {
        return DbError::from(error);
    }

    let message = error.to_string();
    if message.contains("custom_id") {
        DbError::Duplicate {
            field: "custom_id",
            value: project.custom_id.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    } else {
        DbError::Duplicate {
            field: "id",
            value: project.id.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
