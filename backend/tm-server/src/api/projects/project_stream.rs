//! Live project list over server-sent events.

use crate::{AppState, ProjectDto, ProjectListResponse, UserId};

use tm_core::Clock;
use tm_db::OwnerSubscription;

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::{self, Stream};
use log::{debug, warn};

pub const PROJECTS_EVENT: &str = "projects";

/// GET /api/v1/projects/stream
///
/// Emits the caller's full project list (newest first, statuses resolved)
/// once on connect and again after every write to one of their projects.
/// Read-only: derived fields are not written back from here.
pub async fn stream_projects(
    State(state): State<AppState>,
    UserId(owner_id): UserId,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    debug!("Project stream opened for {}", owner_id);
    let subscription = state.repo.subscribe_owner(owner_id);
    let clock = Arc::clone(&state.clock);

    let events = stream::unfold((subscription, clock), |(mut subscription, clock)| async move {
        let event = next_event(&mut subscription, clock.as_ref()).await?;
        Some((Ok(event), (subscription, clock)))
    });

    Sse::new(events).keep_alive(KeepAlive::new().interval(state.config.server.sse_keep_alive()))
}

/// `None` ends the stream once the feed closes.
async fn next_event(subscription: &mut OwnerSubscription, clock: &dyn Clock) -> Option<Event> {
    loop {
        let projects = match subscription.next().await? {
            Ok(projects) => projects,
            Err(e) => {
                warn!(
                    "Project stream for {} could not read projects: {}",
                    subscription.owner_id(),
                    e
                );
                continue;
            }
        };

        let now = clock.now();
        let list = ProjectListResponse {
            projects: projects
                .into_iter()
                .map(|p| ProjectDto::from_project(p, now))
                .collect(),
        };

        match Event::default().event(PROJECTS_EVENT).json_data(&list) {
            Ok(event) => return Some(event),
            Err(e) => warn!("Could not encode project stream event: {}", e),
        }
    }
}
