//! Controller scenarios: session lifecycle, drag-and-drop, tag creation, and
//! connectivity status.

use std::sync::atomic::Ordering;

use kb::controller::{BoardController, Connectivity};
use kb::task::Column;

mod support;

use support::FakeRemote;

#[tokio::test]
async fn refresh_loads_tasks_and_reports_healthy() {
    let remote = FakeRemote::new();
    remote.seed_task(1, "Seeded", Column::Todo).await;
    remote.seed_tag(10, "Bug").await;
    let mut controller = BoardController::new(remote);

    controller.refresh().await;

    assert_eq!(controller.connectivity(), Connectivity::Healthy);
    assert_eq!(controller.view().column(Column::Todo).len(), 1);
    assert_eq!(controller.tags().tags().len(), 1);
}

#[tokio::test]
async fn failed_sync_flips_connectivity_without_losing_state() {
    let remote = FakeRemote::new();
    remote.seed_task(1, "Seeded", Column::Todo).await;
    let mut controller = BoardController::new(remote.clone());
    controller.refresh().await;

    remote.fail_list.store(true, Ordering::Relaxed);
    controller.refresh().await;

    assert_eq!(controller.connectivity(), Connectivity::Disconnected);
    assert_eq!(controller.view().column(Column::Todo).len(), 1);
}

#[tokio::test]
async fn health_probe_tracks_the_endpoint() {
    let remote = FakeRemote::new();
    let mut controller = BoardController::new(remote.clone());

    controller.check_health().await;
    assert_eq!(controller.connectivity(), Connectivity::Healthy);

    remote.healthy.store(false, Ordering::Relaxed);
    controller.check_health().await;
    assert_eq!(controller.connectivity(), Connectivity::Disconnected);
}

#[tokio::test]
async fn create_scenario_appears_in_todo() {
    let remote = FakeRemote::new();
    let mut controller = BoardController::new(remote);
    controller.refresh().await;

    controller.open_create();
    controller.session_mut().unwrap().name = "Test Item".to_string();
    assert!(controller.submit_session().await);

    assert!(controller.session().is_none(), "session closes on success");
    let todo = controller.view().column(Column::Todo).to_vec();
    assert_eq!(todo.len(), 1);
    assert_eq!(todo[0].name, "Test Item");
    assert!(todo[0].tags.is_empty());
}

#[tokio::test]
async fn whitespace_name_never_reaches_the_store() {
    let remote = FakeRemote::new();
    let mut controller = BoardController::new(remote.clone());
    controller.refresh().await;

    controller.open_create();
    controller.session_mut().unwrap().name = "   ".to_string();
    assert!(!controller.submit_session().await);

    assert_eq!(remote.create_calls.load(Ordering::Relaxed), 0);
    let session = controller.session().expect("session stays open");
    assert!(session.error().is_some());
}

#[tokio::test]
async fn failed_save_keeps_the_dialog_open_with_the_message() {
    let remote = FakeRemote::new();
    remote.seed_task(1, "Original", Column::Todo).await;
    let mut controller = BoardController::new(remote.clone());
    controller.refresh().await;

    remote.fail_update.store(true, Ordering::Relaxed);
    controller.open_detail(1);
    controller.session_mut().unwrap().name = "Edited".to_string();
    assert!(!controller.submit_session().await);

    let session = controller.session().expect("session stays open for retry");
    assert!(session.error().unwrap().contains("update failed"));
    assert!(!session.saving());
    // Rolled back.
    assert_eq!(controller.store().get(1).unwrap().name, "Original");
}

#[tokio::test]
async fn cancel_then_reopen_starts_from_the_source_task() {
    let remote = FakeRemote::new();
    remote.seed_task(1, "Original", Column::Todo).await;
    let mut controller = BoardController::new(remote);
    controller.refresh().await;

    controller.open_detail(1);
    let session = controller.session_mut().unwrap();
    session.name = "Scratch edits".to_string();
    session.toggle_tag(42);
    controller.cancel_session();

    controller.open_detail(1);
    let session = controller.session().unwrap();
    assert_eq!(session.name, "Original");
    assert!(session.selected_tag_ids().is_empty());
}

#[tokio::test]
async fn drop_moves_the_task_and_repeat_drop_is_silent() {
    let remote = FakeRemote::new();
    remote.seed_task(1, "Mover", Column::Todo).await;
    let mut controller = BoardController::new(remote.clone());
    controller.refresh().await;

    controller.begin_drag(1);
    assert!(controller.drop_on(Column::Done).await.expect("drop"));
    assert_eq!(controller.view().column(Column::Done).len(), 1);
    assert_eq!(remote.update_calls.load(Ordering::Relaxed), 1);

    controller.begin_drag(1);
    assert!(!controller.drop_on(Column::Done).await.expect("re-drop"));
    assert_eq!(remote.update_calls.load(Ordering::Relaxed), 1, "no remote call on no-op drop");
}

#[tokio::test]
async fn drop_without_grab_does_nothing() {
    let remote = FakeRemote::new();
    remote.seed_task(1, "Still", Column::Todo).await;
    let mut controller = BoardController::new(remote.clone());
    controller.refresh().await;

    assert!(!controller.drop_on(Column::Done).await.expect("drop"));
    assert_eq!(controller.view().column(Column::Todo).len(), 1);
}

#[tokio::test]
async fn in_session_tag_creation_auto_selects() {
    let remote = FakeRemote::new();
    let mut controller = BoardController::new(remote);
    controller.refresh().await;

    controller.open_create();
    let tag = controller
        .create_tag_in_session("Urgent", "#EF4444")
        .await
        .expect("create tag");

    assert_eq!(controller.tags().get(tag.id).unwrap().name, "Urgent");
    let session = controller.session().unwrap();
    assert_eq!(session.selected_tag_ids(), &[tag.id]);
}

#[tokio::test]
async fn rejected_tag_creation_lands_in_the_session_banner() {
    let remote = FakeRemote::new();
    remote.fail_create_tag.store(true, Ordering::Relaxed);
    let mut controller = BoardController::new(remote);
    controller.refresh().await;

    controller.open_create();
    let result = controller.create_tag_in_session("Dup", "#000000").await;

    assert!(result.is_err());
    let session = controller.session().unwrap();
    assert!(session.error().unwrap().contains("already exists"));
    assert!(session.selected_tag_ids().is_empty());
    assert!(controller.tags().tags().is_empty());
}

#[tokio::test]
async fn empty_tag_name_is_rejected_before_any_remote_call() {
    let remote = FakeRemote::new();
    let mut controller = BoardController::new(remote.clone());
    controller.refresh().await;

    controller.open_create();
    let result = controller.create_tag_in_session("   ", "#000000").await;

    assert!(result.is_err());
    assert!(remote.tags.lock().await.is_empty());
}

#[tokio::test]
async fn optimistic_edits_land_in_drafts_only_until_submit() {
    let remote = FakeRemote::new();
    remote.seed_task(1, "Original", Column::Todo).await;
    let mut controller = BoardController::new(remote);
    controller.refresh().await;

    controller.open_detail(1);
    controller.session_mut().unwrap().name = "Edited".to_string();

    // The canonical task is untouched while the draft is open.
    assert_eq!(controller.store().get(1).unwrap().name, "Original");
}
