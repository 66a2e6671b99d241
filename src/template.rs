use serde::{Deserialize, Serialize};

/// The persisted, split representation of a template: markup and stylesheet
/// stored as separate fields, matching the backend's `html_content` /
/// `css_content` columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredTemplate {
    pub html_content: String,
    pub css_content: String,
}

impl StoredTemplate {
    pub fn new(html_content: impl Into<String>, css_content: impl Into<String>) -> Self {
        Self {
            html_content: html_content.into(),
            css_content: css_content.into(),
        }
    }

    /// Returns true if both fields are empty or whitespace-only
    pub fn is_blank(&self) -> bool {
        self.html_content.trim().is_empty() && self.css_content.trim().is_empty()
    }
}

/// A template resource as returned by the backend API
///
/// The field names are the backend's fixed JSON schema (`nom` and `sujet`
/// are the template name and email subject).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailTemplate {
    pub id: i64,
    pub user_id: i64,
    pub nom: String,
    pub sujet: String,
    pub html_content: String,
    /// May be absent for templates saved before the split representation
    #[serde(default)]
    pub css_content: String,
    /// Server-side merged document, when the backend has computed one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_html: Option<String>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub version_count: u32,
}

impl EmailTemplate {
    /// The stored representation carried by this resource
    pub fn stored(&self) -> StoredTemplate {
        StoredTemplate::new(self.html_content.clone(), self.css_content.clone())
    }
}

/// Payload for the template-create endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateCreateRequest {
    pub nom: String,
    pub sujet: String,
    pub html_content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Payload for the template-update endpoint — every field optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sujet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_description: Option<String>,
}
