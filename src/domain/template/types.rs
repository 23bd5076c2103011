//! Template types and error definitions

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use super::content::TemplateContent;
use super::substitution::Variables;

/// Template-specific error type
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid template ID: {0}")]
    InvalidId(String),

    #[error("Invalid template: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Variable substitution failed: {0}")]
    SubstitutionFailed(String),
}

/// Result type for template operations
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Which renderer a template is built for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    /// Fixed skeleton filled from the 12 standard fields
    Standard,
    /// Author-ordered list of typed sections
    #[default]
    Custom,
}

impl LayoutKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutKind::Standard => "standard",
            LayoutKind::Custom => "custom",
        }
    }
}

/// Kind of content block inside a custom template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Header,
    Body,
    Footer,
    Cta,
    Spacer,
    Hero,
    Intro,
}

/// A typed block of content; ordering inside a template is significant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(rename = "type")]
    pub section_type: SectionType,

    /// Content with optional {{variable}} placeholders
    #[serde(default)]
    pub content: String,

    /// Inline styles applied to the section container
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<BTreeMap<String, String>>,
}

impl Section {
    pub fn new(section_type: SectionType, content: impl Into<String>) -> Self {
        Self {
            section_type,
            content: content.into(),
            styles: None,
        }
    }
}

/// An email template definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    /// Unique template identifier (alphanumeric, dash, underscore)
    pub id: String,

    /// Human-readable template name
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub layout: LayoutKind,

    /// Content resolved when the template was loaded
    #[serde(default)]
    pub content: TemplateContent,

    /// Placeholder names used by the template (derived, read-only)
    #[serde(default)]
    pub variables: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_line: Option<String>,

    /// Call-to-action label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_link: Option<String>,

    /// Owning company; None together with `is_global` means shared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,

    #[serde(default)]
    pub is_global: bool,

    #[serde(default = "default_true")]
    pub is_active: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,

    /// Creation timestamp
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

impl Template {
    /// Validate the identifier format
    pub fn validate_id(&self) -> TemplateResult<()> {
        if self.id.is_empty() || self.id.len() > 64 {
            return Err(TemplateError::InvalidId(
                "ID must be 1-64 characters".to_string(),
            ));
        }

        if !self
            .id
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
        {
            return Err(TemplateError::InvalidId(
                "ID must contain only alphanumeric, dash, or underscore".to_string(),
            ));
        }

        Ok(())
    }

    /// Authored sections (custom layout only)
    pub fn sections(&self) -> &[Section] {
        self.content.sections()
    }

    /// Recompute the derived variable list from subject, content and sections
    pub fn refresh_variables(&mut self) {
        self.variables = self.content.variables(self.subject_line.as_deref());
    }
}

/// Stored content as sent by clients: a JSON object, a JSON-encoded string,
/// raw HTML, or plain text.
pub type RawContent = serde_json::Value;

/// Request to create a new template
#[derive(Debug, Deserialize)]
pub struct CreateTemplateRequest {
    /// Unique template identifier (generated when absent)
    pub id: Option<String>,

    #[serde(default)]
    pub name: String,

    pub description: Option<String>,

    #[serde(default)]
    pub layout: LayoutKind,

    #[serde(default)]
    pub sections: Vec<Section>,

    /// Loosely-typed stored content, resolved into `TemplateContent`
    pub content: Option<RawContent>,

    pub subject_line: Option<String>,

    pub cta: Option<String>,

    pub cta_link: Option<String>,

    pub company_id: Option<String>,

    #[serde(default)]
    pub is_global: bool,

    pub created_by: Option<String>,
}

impl From<CreateTemplateRequest> for Template {
    fn from(req: CreateTemplateRequest) -> Self {
        let now = Utc::now();
        let id = req.id.unwrap_or_else(|| {
            format!("{}-{}", req.layout.as_str(), uuid::Uuid::new_v4().simple())
        });
        let content = TemplateContent::load(req.layout, req.content.as_ref(), &req.sections);

        let mut template = Template {
            id,
            name: req.name,
            description: req.description,
            layout: req.layout,
            content,
            variables: Vec::new(),
            subject_line: req.subject_line,
            cta: req.cta,
            cta_link: req.cta_link,
            company_id: req.company_id,
            is_global: req.is_global,
            is_active: true,
            created_by: req.created_by,
            created_at: now,
            updated_at: now,
        };
        template.refresh_variables();
        template
    }
}

/// Request to update an existing template
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTemplateRequest {
    pub name: Option<String>,

    /// Description (optional, use null to clear)
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,

    pub layout: Option<LayoutKind>,

    pub sections: Option<Vec<Section>>,

    pub content: Option<RawContent>,

    /// Subject line (optional, use null to clear)
    #[serde(default, deserialize_with = "nullable")]
    pub subject_line: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable")]
    pub cta: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable")]
    pub cta_link: Option<Option<String>>,

    pub is_global: Option<bool>,
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent field (`None`)
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Query filter for listing templates
#[derive(Debug, Default, Deserialize)]
pub struct TemplateFilter {
    /// Restrict to this company's templates plus global ones
    pub company_id: Option<String>,

    pub layout: Option<LayoutKind>,
}

/// Response for listing templates
#[derive(Debug, Serialize)]
pub struct TemplateListResponse {
    pub templates: Vec<Template>,

    pub total: usize,
}

/// Result of rendering a template with sample data
#[derive(Debug, Clone, Serialize)]
pub struct TemplatePreview {
    pub success: bool,
    pub subject: String,
    pub content: String,
    pub variables_used: Vec<String>,
    pub sample_data: Variables,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(id: &str) -> CreateTemplateRequest {
        CreateTemplateRequest {
            id: Some(id.to_string()),
            name: "Welcome".to_string(),
            description: None,
            layout: LayoutKind::Custom,
            sections: vec![Section::new(SectionType::Body, "Hi {{contact_name}}")],
            content: None,
            subject_line: Some("Hello {{company_name}}".to_string()),
            cta: None,
            cta_link: None,
            company_id: None,
            is_global: false,
            created_by: None,
        }
    }

    #[test]
    fn test_validate_id() {
        let template: Template = request("welcome_1").into();
        assert!(template.validate_id().is_ok());

        let template: Template = request("bad id!").into();
        assert!(matches!(
            template.validate_id(),
            Err(TemplateError::InvalidId(_))
        ));

        let template: Template = request(&"x".repeat(65)).into();
        assert!(template.validate_id().is_err());
    }

    #[test]
    fn test_generated_id_uses_layout_prefix() {
        let mut req = request("ignored");
        req.id = None;
        req.layout = LayoutKind::Standard;
        let template: Template = req.into();
        assert!(template.id.starts_with("standard-"));
        assert!(template.validate_id().is_ok());
    }

    #[test]
    fn test_variables_derived_from_subject_and_sections() {
        let template: Template = request("derived").into();
        assert_eq!(template.variables, vec!["company_name", "contact_name"]);
    }

    #[test]
    fn test_section_serde_uses_type_key() {
        let section: Section =
            serde_json::from_value(json!({"type": "cta", "content": "Book now"})).unwrap();
        assert_eq!(section.section_type, SectionType::Cta);
        assert!(section.styles.is_none());

        let value = serde_json::to_value(&section).unwrap();
        assert_eq!(value["type"], "cta");
    }

    #[test]
    fn test_update_request_null_clears() {
        let req: UpdateTemplateRequest =
            serde_json::from_value(json!({"subject_line": null, "cta": "Go"})).unwrap();
        assert_eq!(req.subject_line, Some(None));
        assert_eq!(req.cta, Some(Some("Go".to_string())));
        assert!(req.cta_link.is_none());
        assert!(req.description.is_none());
    }
}
