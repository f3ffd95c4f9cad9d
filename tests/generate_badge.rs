use std::path::PathBuf;
use std::sync::Arc;

use image::DynamicImage;

use recruit_badge::{
    BadgeComposer, BadgeSession, Error, FontOptions, GenerationState, build_payload,
    decode_recruiter_id, download_filename, scan_badge,
};

fn session() -> BadgeSession {
    let composer = BadgeComposer::from_font_options(&FontOptions::default()).expect("load fonts");
    BadgeSession::new(Arc::new(composer))
}

fn scratch_dir(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("recruit-badge-it-{tag}-{}", std::process::id()))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn asha_rao_end_to_end() {
    let mut session = session();
    let state = session.generate("Asha Rao", " REC123 ").await;

    let badge = state.badge().expect("badge rendered");
    assert_eq!(badge.dimensions(), (340, 420));
    assert_eq!(badge.payload().recruiter_id, "rec123");
    assert_eq!(
        badge.payload().url,
        "https://www.freshersworld.com/ceat-apprentice-da-test?recruiter_id=cmVjMTIz"
    );

    let dir = scratch_dir("asha");
    let path = session.download(&dir).await.expect("export badge");
    assert_eq!(
        path.file_name().and_then(|n| n.to_str()),
        Some("CEAT_DA_QR_Asha_Rao.png")
    );

    let written = image::open(&path).expect("read exported png");
    assert_eq!((written.width(), written.height()), (340, 420));

    let (text, recruiter_id) = scan_badge(&written).expect("scan exported badge");
    assert_eq!(text, build_payload(" REC123 ").url);
    assert_eq!(recruiter_id.as_deref(), Some("rec123"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn empty_name_produces_nothing() {
    let mut session = session();
    let state = session.generate("", "rec123").await;

    assert!(matches!(state, GenerationState::ValidationFailed(_)));
    assert_eq!(
        state.error_message(),
        Some("Both name and recruiter ID are required.")
    );
    assert!(!session.can_download());
    assert!(matches!(
        session.download(&scratch_dir("empty")).await,
        Err(Error::NothingToExport)
    ));
}

#[tokio::test]
async fn whitespace_recruiter_id_is_rejected() {
    let mut session = session();
    let state = session.generate("Jane Doe", " \t ").await;
    assert_eq!(state.label(), "validation_failed");
}

#[tokio::test]
async fn repeated_generation_gives_identical_output() {
    let mut session = session();
    let first = session
        .generate("Jane Doe", "Rec-77")
        .await
        .badge()
        .cloned()
        .expect("first badge");
    let second = session
        .generate("Jane Doe", "Rec-77")
        .await
        .badge()
        .cloned()
        .expect("second badge");

    assert_eq!(first.payload().url, second.payload().url);
    assert_eq!(first.image().as_raw(), second.image().as_raw());
}

#[tokio::test]
async fn names_with_path_separators_are_not_exported() {
    let mut session = session();
    session.generate("../escape", "rec1").await;
    assert!(session.can_download());

    let err = session.download(&scratch_dir("escape")).await.unwrap_err();
    assert!(matches!(err, Error::Export(_)));
}

#[test]
fn payload_round_trip_and_filename() {
    for raw in ["REC123", "  Mixed Case  ", "id+with/symbols=", "12345"] {
        let payload = build_payload(raw);
        assert_eq!(
            decode_recruiter_id(&payload.url).unwrap(),
            raw.trim().to_lowercase()
        );
    }
    assert_eq!(download_filename("Jane Doe"), "CEAT_DA_QR_Jane_Doe.png");
}

#[test]
fn scanning_a_blank_image_fails() {
    let blank = DynamicImage::new_rgba8(340, 420);
    assert!(scan_badge(&blank).is_err());
}
