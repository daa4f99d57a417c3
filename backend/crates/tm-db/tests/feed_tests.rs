mod common;

use common::{at, create_test_pool, create_test_project};

use tm_db::{ProjectChange, ProjectFeed, ProjectRepository};

use std::time::Duration;

use googletest::prelude::*;
use tokio::time::timeout;

const WAIT: Duration = Duration::from_secs(2);

#[tokio::test]
async fn given_subscription_when_first_polled_then_current_list() {
    // Given
    let repo = ProjectRepository::new(create_test_pool().await);
    repo.create(&create_test_project("owner-1", 1, at(2025, 7, 1)))
        .await
        .unwrap();

    // When
    let mut subscription = repo.subscribe_owner("owner-1");
    let snapshot = timeout(WAIT, subscription.next()).await.unwrap();

    // Then
    let projects = snapshot.unwrap().unwrap();
    assert_that!(projects.len(), eq(1));
}

#[tokio::test]
async fn given_subscription_when_owner_project_created_then_new_snapshot() {
    // Given
    let repo = ProjectRepository::new(create_test_pool().await);
    let mut subscription = repo.subscribe_owner("owner-1");
    let initial = subscription.next().await.unwrap().unwrap();
    assert_that!(initial.len(), eq(0));

    // When: a foreign write, then one for our owner
    repo.create(&create_test_project("owner-2", 1, at(2025, 7, 1)))
        .await
        .unwrap();
    let ours = create_test_project("owner-1", 2, at(2025, 7, 2));
    repo.create(&ours).await.unwrap();

    // Then
    let snapshot = timeout(WAIT, subscription.next()).await.unwrap();
    let projects = snapshot.unwrap().unwrap();
    assert_that!(projects.len(), eq(1));
    assert_that!(projects[0].id, eq(ours.id));
}

#[tokio::test]
async fn given_update_when_committed_then_change_published_with_version() {
    // Given
    let repo = ProjectRepository::new(create_test_pool().await);
    let project = create_test_project("owner-1", 1, at(2025, 7, 1));
    repo.create(&project).await.unwrap();
    let mut receiver = repo.feed().subscribe();

    // When
    repo.update(&project, 1).await.unwrap();

    // Then
    let change = timeout(WAIT, receiver.recv()).await.unwrap().unwrap();
    assert_that!(
        change,
        eq(&ProjectChange {
            project_id: project.id,
            owner_id: "owner-1".to_string(),
            version: 2,
        })
    );
}

#[tokio::test]
async fn given_no_subscribers_when_publishing_then_nothing_happens() {
    let feed = ProjectFeed::new(4);

    feed.publish(ProjectChange {
        project_id: uuid::Uuid::new_v4(),
        owner_id: "nobody".to_string(),
        version: 1,
    });

    assert_that!(feed.subscriber_count(), eq(0));
}
