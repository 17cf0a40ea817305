use tracker_core::model::{TopicId, UnitId};
use tracker_core::progress::ProgressSnapshot;

use super::test_harness::{
    ViewKind, offline_services, setup_view_harness, setup_view_harness_with_notes,
    setup_view_harness_with_services, test_services,
};

fn unit(raw: &str) -> UnitId {
    UnitId::new(raw).unwrap()
}

fn topic(raw: &str) -> TopicId {
    TopicId::new(raw).unwrap()
}

#[tokio::test(flavor = "current_thread")]
async fn checklist_renders_empty_progress() {
    let mut harness = setup_view_harness(ViewKind::Checklist).await;
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Data Mining"), "missing title in {html}");
    assert!(
        html.contains(r#"<span id="totalTopics">24</span>"#),
        "missing total in {html}"
    );
    assert!(
        html.contains(r#"<span id="completedTopics">0</span>"#),
        "missing completed count in {html}"
    );
    assert!(
        html.contains("start your Data Mining journey!"),
        "missing message in {html}"
    );
    assert!(!html.contains("Notes (PDF)"), "dead notes link in {html}");
    assert!(!html.contains("modal-backdrop"), "reset dialog shown early in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn checklist_reflects_saved_progress() {
    let services = test_services().await;
    let tracker = services.tracker();
    for t in ["topic1", "topic2"] {
        tracker
            .toggle_topic(&unit("unit3"), &topic(t), true)
            .await
            .expect("toggle");
    }

    let mut harness = setup_view_harness_with_services(ViewKind::Checklist, services);
    harness.rebuild();
    let html = harness.render();

    assert!(
        html.contains(r#"<span id="completedTopics">2</span>"#),
        "missing completed count in {html}"
    );
    assert!(html.contains("width: 8%"), "missing bar width in {html}");
    assert!(html.contains(">50%<"), "missing unit percentage in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn checklist_links_notes_that_exist() {
    let notes = tempfile::tempdir().unwrap();
    std::fs::create_dir(notes.path().join("pdfs")).unwrap();
    std::fs::write(notes.path().join("pdfs").join("unit4.pdf"), b"%PDF-1.4").unwrap();

    let mut harness = setup_view_harness_with_notes(
        ViewKind::Checklist,
        test_services().await,
        notes.path().to_path_buf(),
    );
    harness.rebuild();
    let html = harness.render();

    assert_eq!(html.matches("Notes (PDF)").count(), 1, "{html}");
    assert!(html.contains("/pdfs/unit4.pdf"), "missing notes href in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn checklist_warns_when_storage_is_unreachable() {
    let mut harness =
        setup_view_harness_with_services(ViewKind::Checklist, offline_services().await);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("notice--warning"), "missing warning in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn history_lists_recorded_sessions() {
    let services = test_services().await;
    services
        .study_sessions()
        .record_session(ProgressSnapshot::new(6, 24))
        .await;

    let mut harness = setup_view_harness_with_services(ViewKind::History, services);
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("2023-11-14 22:13 UTC"), "missing timestamp in {html}");
    assert!(html.contains("6 / 24"), "missing counts in {html}");
    assert!(html.contains("25%"), "missing percentage in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn history_without_sessions_says_so() {
    let mut harness = setup_view_harness(ViewKind::History).await;
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(
        html.contains("No study sessions recorded yet."),
        "missing empty message in {html}"
    );
}
