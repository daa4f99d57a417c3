#![allow(dead_code)]

//! Test infrastructure for tm-server API tests

use tm_config::Config;
use tm_core::{
    BidAmount, Clock, CustomId, FixedClock, ModerationStatus, PaymentStatus, ProcurementMethod,
    Project, Proposal, ProposalStatus,
};
use tm_db::{ProjectRepository, run_migrations};
use tm_gateway::{CreateInvoice, GatewayError, GatewayResult, Invoice, PaymentGateway};
use tm_server::{AppState, USER_ID_HEADER, build_router};

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{DateTime, TimeZone, Utc};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower::ServiceExt;

pub const OWNER: &str = "owner-1";
pub const VENDOR: &str = "vendor-1";
pub const OTHER_VENDOR: &str = "vendor-2";
pub const CALLBACK_TOKEN: &str = "test-callback-token";

pub fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

// =============================================================================
// Fake gateway
// =============================================================================

/// Issues `inv-1`, `inv-2`, ... and reports whatever status a test set.
#[derive(Default)]
pub struct FakeGateway {
    created: Mutex<Vec<CreateInvoice>>,
    statuses: Mutex<HashMap<String, PaymentStatus>>,
    checks: AtomicUsize,
    fail_create: AtomicBool,
    fail_check: AtomicBool,
}

impl FakeGateway {
    pub fn set_status(&self, invoice_id: &str, status: PaymentStatus) {
        self.statuses
            .lock()
            .unwrap()
            .insert(invoice_id.to_string(), status);
    }

    pub fn fail_create(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    pub fn fail_check(&self, fail: bool) {
        self.fail_check.store(fail, Ordering::SeqCst);
    }

    pub fn created(&self) -> Vec<CreateInvoice> {
        self.created.lock().unwrap().clone()
    }

    pub fn check_count(&self) -> usize {
        self.checks.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    async fn create_invoice(&self, request: &CreateInvoice) -> GatewayResult<Invoice> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(GatewayError::api(503, "SERVER_ERROR", "gateway down"));
        }
        let mut created = self.created.lock().unwrap();
        created.push(request.clone());
        let id = format!("inv-{}", created.len());
        Ok(Invoice {
            invoice_url: format!("https://pay.test/{id}"),
            id,
            status: PaymentStatus::Pending,
        })
    }

    async fn check_status(&self, invoice_id: &str) -> GatewayResult<PaymentStatus> {
        self.checks.fetch_add(1, Ordering::SeqCst);
        if self.fail_check.load(Ordering::SeqCst) {
            return Err(GatewayError::unavailable("gateway down"));
        }
        Ok(self
            .statuses
            .lock()
            .unwrap()
            .get(invoice_id)
            .copied()
            .unwrap_or_default())
    }
}

// =============================================================================
// App
// =============================================================================

/// Create a test pool with in-memory SQLite. One connection: each
/// in-memory connection would be a separate database.
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to create test database");

    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

pub struct TestApp {
    pub state: AppState,
    pub gateway: Arc<FakeGateway>,
    pub clock: Arc<FixedClock>,
}

/// App at 2025-01-10 with a fake gateway and a callback token set.
pub async fn create_test_app() -> TestApp {
    let pool = create_test_pool().await;
    let repo = ProjectRepository::new(pool.clone());
    let gateway = Arc::new(FakeGateway::default());
    let clock = Arc::new(FixedClock::new(at(2025, 1, 10)));

    let mut config = Config::default();
    config.gateway.callback_token = Some(CALLBACK_TOKEN.to_string());

    let state = AppState::new(pool, repo, gateway.clone(), clock.clone(), config);
    TestApp {
        state,
        gateway,
        clock,
    }
}

impl TestApp {
    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    pub fn repo(&self) -> &ProjectRepository {
        &self.state.repo
    }

    pub async fn seed(&self, project: &Project) {
        self.state
            .repo
            .create(project)
            .await
            .expect("Failed to seed project");
    }

    pub async fn stored(&self, project: &Project) -> Project {
        self.state
            .repo
            .find_by_id(project.id)
            .await
            .unwrap()
            .expect("project should exist")
    }

    /// Send one request, return status and JSON body (Null when empty).
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}

// =============================================================================
// Requests
// =============================================================================

pub fn get(uri: &str, user: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(user) = user {
        builder = builder.header(USER_ID_HEADER, user);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn json_request(method: &str, uri: &str, user: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(user) = user {
        builder = builder.header(USER_ID_HEADER, user);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

// =============================================================================
// Projects
// =============================================================================

/// Approved tender created 2025-01-01 with a two week tender window.
pub fn tender_project(owner_id: &str, sequence: u32) -> Project {
    let created_at = at(2025, 1, 1);
    let custom_id = CustomId::new("Design", "ID", created_at, sequence).unwrap();
    let mut project = Project::new(
        owner_id.to_string(),
        format!("Renovation {sequence}"),
        "Design".to_string(),
        ProcurementMethod::Tender,
        custom_id,
        created_at,
    );
    project.moderation_status = Some(ModerationStatus::Approved);
    project.status = None;
    project.tender_duration = Some("2 Minggu".to_string());
    project
}

/// Tender with `VENDOR`'s bid of `bid` accepted.
pub fn awarded_project(owner_id: &str, bid: i64, phases: Option<u32>) -> Project {
    let mut project = tender_project(owner_id, 1);
    let mut proposal = Proposal::new(VENDOR.to_string(), BidAmount::Fixed(bid), at(2025, 1, 2));
    proposal.status = ProposalStatus::Accepted;
    project.proposals.push(proposal);
    project.selected_vendor_id = Some(VENDOR.to_string());
    project.project_phases = phases;
    project
}
