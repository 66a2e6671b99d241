//! Editor-session state and preview debouncing.
//!
//! [`EditorSession`] is the explicit form of the state the editor component
//! keeps while a template is open: name, subject, the unified buffer, the
//! extracted stored representation and the cached preview document. All of
//! its operations are synchronous, pure state transitions.
//!
//! [`PreviewDebouncer`] is the one concurrency-adjacent piece: it coalesces
//! content-changed events so the preview is not re-extracted on every
//! keystroke. Scheduling replaces any pending refresh; last edit wins.

use crate::error::{TemplateError, TemplateResult};
use crate::reconciler::{merge, split};
use crate::template::{
    EmailTemplate, StoredTemplate, TemplateCreateRequest, TemplateUpdateRequest,
};
use crate::validator::{validate_document, ValidationReport};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Delay applied before a debounced preview refresh fires
pub const DEFAULT_PREVIEW_DEBOUNCE: Duration = Duration::from_millis(300);

/// Character counts displayed alongside the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorStats {
    pub total_chars: usize,
    pub html_chars: usize,
    pub css_chars: usize,
}

/// State owned by the editor while a template is being created or modified
#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    template_id: Option<i64>,
    pub nom: String,
    pub sujet: String,
    buffer: String,
    extracted: StoredTemplate,
    preview_html: String,
}

impl EditorSession {
    /// An empty session for a not-yet-persisted template
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a persisted template into the session. The stored representation
    /// is merged into a single editable document.
    pub fn load(&mut self, template: &EmailTemplate) {
        self.template_id = Some(template.id);
        self.nom = template.nom.clone();
        self.sujet = template.sujet.clone();
        self.buffer = merge(&template.html_content, &template.css_content);
        self.resync();
    }

    /// Backend id, once the template has been persisted
    pub fn template_id(&self) -> Option<i64> {
        self.template_id
    }

    pub fn is_edit_mode(&self) -> bool {
        self.template_id.is_some()
    }

    /// The unified document currently in the editor
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Replace the buffer with new editor content and resynchronize the
    /// extracted representation and the preview
    pub fn apply_edit(&mut self, content: impl Into<String>) {
        self.buffer = content.into();
        self.resync();
    }

    fn resync(&mut self) {
        self.extracted = split(&self.buffer);
        self.preview_html = self.buffer.clone();
    }

    /// Document handed to the preview surface (rendered as inert markup,
    /// never executed as trusted script)
    pub fn preview_html(&self) -> &str {
        &self.preview_html
    }

    /// The stored representation extracted from the current buffer
    pub fn extracted(&self) -> &StoredTemplate {
        &self.extracted
    }

    pub fn stats(&self) -> EditorStats {
        EditorStats {
            total_chars: self.buffer.chars().count(),
            html_chars: self.extracted.html_content.chars().count(),
            css_chars: self.extracted.css_content.chars().count(),
        }
    }

    /// Name, subject and content must all be non-blank before saving
    pub fn can_save(&self) -> bool {
        !self.nom.trim().is_empty()
            && !self.sujet.trim().is_empty()
            && !self.buffer.trim().is_empty()
    }

    /// Client-side pre-check of the current buffer. Only meaningful while
    /// the template has no backend id; afterwards the backend validates.
    pub fn validate(&self) -> ValidationReport {
        validate_document(&self.buffer)
    }

    /// Build the create payload, splitting the buffer one final time so the
    /// payload always reflects the latest edit
    pub fn create_payload(&self) -> TemplateResult<TemplateCreateRequest> {
        if !self.can_save() {
            return Err(TemplateError::MissingFields);
        }
        let stored = split(&self.buffer);
        Ok(TemplateCreateRequest {
            nom: self.nom.clone(),
            sujet: self.sujet.clone(),
            html_content: stored.html_content,
            css_content: Some(stored.css_content),
            category: None,
            tags: None,
        })
    }

    /// Build the update payload for an already-persisted template
    pub fn update_payload(
        &self,
        change_description: Option<String>,
    ) -> TemplateResult<TemplateUpdateRequest> {
        if !self.can_save() {
            return Err(TemplateError::MissingFields);
        }
        let stored = split(&self.buffer);
        Ok(TemplateUpdateRequest {
            nom: Some(self.nom.clone()),
            sujet: Some(self.sujet.clone()),
            html_content: Some(stored.html_content),
            css_content: Some(stored.css_content),
            change_description,
        })
    }
}

/// Coalesces editor-changed events with a fixed delay before triggering a
/// preview refresh. Each new schedule aborts the pending one, so only the
/// last edit's refresh runs.
#[derive(Debug)]
pub struct PreviewDebouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl PreviewDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedule `refresh` to run after the debounce delay, replacing any
    /// refresh still pending
    pub fn schedule<F>(&mut self, refresh: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            refresh();
        }));
    }

    /// Abort the pending refresh, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}

impl Default for PreviewDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_PREVIEW_DEBOUNCE)
    }
}

impl Drop for PreviewDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
