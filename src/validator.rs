//! Client-side pre-check of an editable document.
//!
//! This runs before a template has a persisted id; once saved, the backend
//! performs the deeper structural and CSS validation. The report shape
//! mirrors the backend's `validation` JSON object so both sources render
//! through the same UI surface.

use crate::error::{TemplateError, TemplateResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Which side of the template an issue concerns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    Html,
    Css,
}

/// A single validation error or warning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub message: String,
}

impl ValidationIssue {
    fn html(message: impl Into<String>) -> Self {
        Self {
            kind: IssueKind::Html,
            message: message.into(),
        }
    }
}

/// Outcome of validating a document — errors gate the save action,
/// warnings are informational
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub html_valid: bool,
    pub css_valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    pub error_count: usize,
    pub warning_count: usize,
}

impl ValidationReport {
    fn from_issues(errors: Vec<ValidationIssue>, warnings: Vec<ValidationIssue>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            html_valid: errors.is_empty(),
            // CSS is only checked server-side
            css_valid: true,
            error_count: errors.len(),
            warning_count: warnings.len(),
            errors,
            warnings,
        }
    }

    /// Converts the report into a `Result`, for callers that treat a failed
    /// pre-check as a hard stop
    pub fn ensure_valid(self) -> TemplateResult<Self> {
        if self.is_valid {
            Ok(self)
        } else {
            Err(TemplateError::ValidationFailed {
                error_count: self.error_count,
            })
        }
    }
}

fn script_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<script").unwrap())
}

fn document_shell_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<!DOCTYPE|<html").unwrap())
}

/// Validate an editable document.
///
/// Three rules, nothing more: content must be non-blank, `<script>` is
/// categorically disallowed in email templates, and a missing document
/// shell (`<!DOCTYPE` / `<html>`) is flagged as a warning. Never fails.
pub fn validate_document(document: &str) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if document.trim().is_empty() {
        errors.push(ValidationIssue::html("Content is required"));
    }

    if script_tag_regex().is_match(document) {
        errors.push(ValidationIssue::html(
            "<script> tags are not allowed in email templates",
        ));
    }

    if !document_shell_regex().is_match(document) {
        warnings.push(ValidationIssue::html(
            "Incomplete HTML document structure detected",
        ));
    }

    ValidationReport::from_issues(errors, warnings)
}
