//! # Template Source Reconciler
//!
//! Core of an email-template management client: converts between the
//! backend's split storage representation (separate `html_content` and
//! `css_content` fields) and the single self-contained HTML document the
//! editor and live preview work on, in both directions.
//!
//! ## Features
//! - Deterministic merge of stored markup + stylesheet into one document
//! - Split of an edited document back into the stored representation
//! - Client-side validation pre-check (before a template has a backend id)
//! - Editor-session state with debounced preview refresh
//! - Serde types for the backend's template JSON contract
//!
//! ## Example — round trip
//! ```
//! use template_reconciler::{merge_template, split_document};
//!
//! let document = merge_template("<div>Hi</div>", "div{color:red}");
//! assert!(document.contains("<!DOCTYPE html>"));
//!
//! let stored = split_document(&document);
//! assert_eq!(stored.css_content, "div{color:red}");
//! ```
//!
//! ## Example — editor flow
//! ```
//! use template_reconciler::EditorSession;
//!
//! let mut session = EditorSession::new();
//! session.nom = "Welcome".to_string();
//! session.sujet = "Hello!".to_string();
//! session.apply_edit("<p>Bonjour</p>");
//!
//! let report = session.validate();
//! assert!(report.is_valid);
//! let payload = session.create_payload().unwrap();
//! assert_eq!(payload.html_content, "<p>Bonjour</p>");
//! ```

pub mod editor;
pub mod error;
pub mod reconciler;
pub mod template;
pub mod validator;

// --- Core types ---
pub use editor::{EditorSession, EditorStats, PreviewDebouncer, DEFAULT_PREVIEW_DEBOUNCE};
pub use error::{TemplateError, TemplateResult};
pub use template::{
    EmailTemplate, StoredTemplate, TemplateCreateRequest, TemplateUpdateRequest,
};
pub use validator::{IssueKind, ValidationIssue, ValidationReport};

/// Reconstruct a single editable document from the stored representation
pub fn merge_template(html_content: &str, css_content: &str) -> String {
    reconciler::merge(html_content, css_content)
}

/// Split an editable document back into the stored representation
pub fn split_document(document: &str) -> StoredTemplate {
    reconciler::split(document)
}

/// Run the client-side validation pre-check on a document
pub fn validate_document(document: &str) -> ValidationReport {
    validator::validate_document(document)
}
