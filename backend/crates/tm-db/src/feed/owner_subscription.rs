use crate::{ProjectChange, ProjectRepository, Result as DbErrorResult};

use tm_core::Project;

use log::warn;
use tokio::sync::broadcast::Receiver;
use tokio::sync::broadcast::error::RecvError;

/// Live query over one owner's projects, newest first.
///
/// The first call to [`OwnerSubscription::next`] yields the current list;
/// every later call waits for a write touching that owner and yields the
/// re-read list. A lagging subscriber re-reads immediately rather than
/// replaying missed changes.
pub struct OwnerSubscription {
    owner_id: String,
    receiver: Receiver<ProjectChange>,
    repo: ProjectRepository,
    primed: bool,
}

impl OwnerSubscription {
    pub(crate) fn new(owner_id: String, receiver: Receiver<ProjectChange>, repo: ProjectRepository) -> Self {
        Self {
            owner_id,
            receiver,
            repo,
            primed: false,
        }
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    /// Next snapshot, or `None` once the feed is closed.
    pub async fn next(&mut self) -> Option<DbErrorResult<Vec<Project>>> {
        if self.primed {
            self.wait_for_owner_change().await?;
        } else {
            self.primed = true;
        }

        Some(self.repo.list_by_owner(&self.owner_id).await)
    }

    async fn wait_for_owner_change(&mut self) -> Option<()> {
        loop {
            match self.receiver.recv().await {
                Ok(change) if change.owner_id == self.owner_id => return Some(()),
                Ok(_) => continue,
                Err(RecvError::Lagged(skipped)) => {
                    warn!(
                        "Subscription for owner {} lagged by {} change(s), re-reading",
                        self.owner_id, skipped
                    );
                    return Some(());
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}
