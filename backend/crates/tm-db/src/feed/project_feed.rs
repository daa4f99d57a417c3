use crate::OwnerSubscription;
use crate::ProjectRepository;

use tm_core::Project;

use log::trace;
use tokio::sync::broadcast;
use uuid::Uuid;

pub const DEFAULT_FEED_CAPACITY: usize = 256;

/// A committed write to a project record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectChange {
    pub project_id: Uuid,
    pub owner_id: String,
    pub version: i32,
}

impl From<&Project> for ProjectChange {
    fn from(project: &Project) -> Self {
        Self {
            project_id: project.id,
            owner_id: project.owner_id.clone(),
            version: project.version,
        }
    }
}

/// Fan-out of committed project writes to live subscribers.
#[derive(Debug, Clone)]
pub struct ProjectFeed {
    sender: broadcast::Sender<ProjectChange>,
}

impl ProjectFeed {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn publish(&self, change: ProjectChange) {
        // No receivers is the normal idle state.
        let receivers = self.sender.send(change).unwrap_or(0);
        trace!("Project change delivered to {} subscriber(s)", receivers);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ProjectChange> {
        self.sender.subscribe()
    }

    /// Live view of one owner's project list, re-read on each change.
    pub fn subscribe_owner(
        &self,
        repo: ProjectRepository,
        owner_id: impl Into<String>,
    ) -> OwnerSubscription {
        OwnerSubscription::new(owner_id.into(), self.subscribe(), repo)
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ProjectFeed {
    fn default() -> Self {
        Self::new(DEFAULT_FEED_CAPACITY)
    }
}
