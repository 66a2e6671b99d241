use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use template_reconciler::{EditorSession, EmailTemplate, PreviewDebouncer, TemplateError};

fn sample_template() -> EmailTemplate {
    EmailTemplate {
        id: 42,
        user_id: 1,
        nom: "Bienvenue".to_string(),
        sujet: "Bienvenue chez nous".to_string(),
        html_content: "<div class=\"hero\">Bonjour</div>".to_string(),
        css_content: ".hero{color:white}".to_string(),
        full_html: None,
        is_active: true,
        created_at: "2024-05-01T08:00:00".to_string(),
        updated_at: "2024-05-01T08:00:00".to_string(),
        version_count: 1,
    }
}

// --- EditorSession ---

#[test]
fn test_new_session_is_not_edit_mode() {
    let session = EditorSession::new();
    assert!(!session.is_edit_mode());
    assert_eq!(session.template_id(), None);
    assert_eq!(session.buffer(), "");
    assert!(!session.can_save());
}

#[test]
fn test_load_merges_stored_fields_into_buffer() {
    let mut session = EditorSession::new();
    session.load(&sample_template());

    assert!(session.is_edit_mode());
    assert_eq!(session.template_id(), Some(42));
    assert_eq!(session.nom, "Bienvenue");
    // the buffer is a single self-contained document
    assert!(session.buffer().contains("<style>"));
    assert!(session.buffer().contains(".hero{color:white}"));
    assert!(session.buffer().contains("<div class=\"hero\">Bonjour</div>"));
    // and the extracted representation already reflects it
    assert_eq!(session.extracted().css_content, ".hero{color:white}");
}

#[test]
fn test_apply_edit_resyncs_extraction_and_preview() {
    let mut session = EditorSession::new();
    session.apply_edit("<style>p{margin:0}</style><p>one</p>");

    assert_eq!(session.extracted().css_content, "p{margin:0}");
    assert_eq!(session.preview_html(), session.buffer());

    session.apply_edit("<p>two</p>");
    assert_eq!(session.extracted().css_content, "");
    assert_eq!(session.preview_html(), "<p>two</p>");
}

#[test]
fn test_stats_reflect_buffer_and_extraction() {
    let mut session = EditorSession::new();
    session.apply_edit("<style>a{}</style>");
    let stats = session.stats();
    assert_eq!(stats.total_chars, session.buffer().chars().count());
    assert_eq!(stats.html_chars, stats.total_chars);
    assert_eq!(stats.css_chars, 3);
}

#[test]
fn test_can_save_requires_all_fields() {
    let mut session = EditorSession::new();
    session.apply_edit("<p>x</p>");
    assert!(!session.can_save());

    session.nom = "n".to_string();
    session.sujet = "  ".to_string();
    assert!(!session.can_save());

    session.sujet = "s".to_string();
    assert!(session.can_save());
}

#[test]
fn test_create_payload_splits_latest_buffer() {
    let mut session = EditorSession::new();
    session.nom = "Nom".to_string();
    session.sujet = "Sujet".to_string();
    session.apply_edit("<style>h1{font-size:2em}</style><h1>Titre</h1>");

    let payload = session.create_payload().unwrap();
    assert_eq!(payload.nom, "Nom");
    assert_eq!(payload.sujet, "Sujet");
    assert_eq!(
        payload.html_content,
        "<style>h1{font-size:2em}</style><h1>Titre</h1>"
    );
    assert_eq!(payload.css_content.as_deref(), Some("h1{font-size:2em}"));
}

#[test]
fn test_payloads_refuse_incomplete_sessions() {
    let session = EditorSession::new();
    assert!(matches!(
        session.create_payload(),
        Err(TemplateError::MissingFields)
    ));
    assert!(matches!(
        session.update_payload(None),
        Err(TemplateError::MissingFields)
    ));
}

#[test]
fn test_update_payload_carries_change_description() {
    let mut session = EditorSession::new();
    session.load(&sample_template());

    let payload = session
        .update_payload(Some("tweaked hero color".to_string()))
        .unwrap();
    assert_eq!(payload.nom.as_deref(), Some("Bienvenue"));
    assert_eq!(payload.change_description.as_deref(), Some("tweaked hero color"));
    assert_eq!(payload.css_content.as_deref(), Some(".hero{color:white}"));
}

#[test]
fn test_session_validate_matches_buffer_state() {
    let mut session = EditorSession::new();
    assert!(!session.validate().is_valid);

    session.apply_edit("<p>contenu</p>");
    let report = session.validate();
    assert!(report.is_valid);
    assert!(report.warning_count >= 1);
}

// --- PreviewDebouncer ---

#[tokio::test]
async fn test_debounced_refresh_fires_after_delay() {
    let fired = Arc::new(AtomicUsize::new(0));
    let mut debouncer = PreviewDebouncer::new(Duration::from_millis(20));

    let counter = fired.clone();
    debouncer.schedule(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    assert!(debouncer.is_pending());
    assert_eq!(fired.load(Ordering::SeqCst), 0);

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert!(!debouncer.is_pending());
}

#[tokio::test]
async fn test_rescheduling_cancels_pending_refresh() {
    let last_seen = Arc::new(AtomicUsize::new(0));
    let fires = Arc::new(AtomicUsize::new(0));
    let mut debouncer = PreviewDebouncer::new(Duration::from_millis(60));

    for edit in 1..=3 {
        let last = last_seen.clone();
        let count = fires.clone();
        debouncer.schedule(move || {
            last.store(edit, Ordering::SeqCst);
            count.fetch_add(1, Ordering::SeqCst);
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    tokio::time::sleep(Duration::from_millis(250)).await;
    // only the last edit's refresh ran
    assert_eq!(fires.load(Ordering::SeqCst), 1);
    assert_eq!(last_seen.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_cancel_prevents_refresh() {
    let fired = Arc::new(AtomicUsize::new(0));
    let mut debouncer = PreviewDebouncer::new(Duration::from_millis(20));

    let counter = fired.clone();
    debouncer.schedule(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    debouncer.cancel();
    assert!(!debouncer.is_pending());

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(fired.load(Ordering::SeqCst), 0);
}
