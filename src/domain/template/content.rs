//! Template content resolved once at load time.
//!
//! Clients send stored content in several shapes (a JSON object of standard
//! fields, the same object JSON-encoded in a string, a complete HTML
//! document, or a plain body fragment). It is classified here, when a
//! template is created or updated, so rendering never has to probe it.

use serde::{Deserialize, Serialize};

use super::standard_layout::{StandardLayoutVariables, STANDARD_LAYOUT_VARIABLES};
use super::substitution::collect_variables;
use super::types::{LayoutKind, RawContent, Section};
use crate::metrics::RenderMetrics;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TemplateContent {
    /// Parsed standard layout fields
    Standard(StandardLayoutVariables),
    /// A complete HTML document, used verbatim
    RawHtml(String),
    /// Authored sections of a custom template
    Sections(Vec<Section>),
    /// A body fragment to wrap in the fallback document
    Fragment(String),
}

impl Default for TemplateContent {
    fn default() -> Self {
        TemplateContent::Sections(Vec::new())
    }
}

/// Whether `content` is already a full document
pub fn is_complete_document(content: &str) -> bool {
    let content = content.trim_start();
    content.starts_with("<!DOCTYPE") || content.starts_with("<html")
}

impl TemplateContent {
    /// Classify loosely-typed stored content.
    ///
    /// Standard-layout content that cannot be parsed degrades to a
    /// `Fragment` instead of failing.
    pub fn load(layout: LayoutKind, raw: Option<&RawContent>, sections: &[Section]) -> Self {
        if let Some(serde_json::Value::String(text)) = raw {
            if is_complete_document(text) {
                return TemplateContent::RawHtml(text.clone());
            }
        }

        match layout {
            LayoutKind::Standard => Self::load_standard(raw),
            LayoutKind::Custom => Self::load_custom(raw, sections),
        }
    }

    fn load_standard(raw: Option<&RawContent>) -> Self {
        let (parsed, text) = match raw {
            None | Some(serde_json::Value::Null) => {
                return TemplateContent::Standard(StandardLayoutVariables::default())
            }
            Some(serde_json::Value::String(text)) if text.trim().is_empty() => {
                return TemplateContent::Standard(StandardLayoutVariables::default())
            }
            Some(serde_json::Value::String(text)) => (
                serde_json::from_str::<serde_json::Value>(text).map_err(|e| e.to_string()),
                text.clone(),
            ),
            Some(value) => (Ok(value.clone()), value.to_string()),
        };

        let fields = parsed.and_then(|value| match value {
            serde_json::Value::Object(map) => Ok(StandardLayoutVariables::from_json_object(&map)),
            _ => Err("expected an object of standard layout fields".to_string()),
        });

        match fields {
            Ok(fields) => TemplateContent::Standard(fields),
            Err(reason) => {
                tracing::warn!(
                    error = %reason,
                    "Standard layout content is not parseable, falling back to body fragment"
                );
                RenderMetrics::record_fallback();
                TemplateContent::Fragment(text)
            }
        }
    }

    fn load_custom(raw: Option<&RawContent>, sections: &[Section]) -> Self {
        if !sections.is_empty() {
            return TemplateContent::Sections(sections.to_vec());
        }

        match raw {
            Some(serde_json::Value::String(text)) if !text.trim().is_empty() => {
                TemplateContent::Fragment(text.clone())
            }
            Some(value @ serde_json::Value::Array(_)) => {
                match serde_json::from_value::<Vec<Section>>(value.clone()) {
                    Ok(sections) => TemplateContent::Sections(sections),
                    Err(error) => {
                        tracing::warn!(error = %error, "Section list is not parseable");
                        RenderMetrics::record_fallback();
                        TemplateContent::Fragment(value.to_string())
                    }
                }
            }
            _ => TemplateContent::Sections(Vec::new()),
        }
    }

    /// Authored sections, empty for non-section content
    pub fn sections(&self) -> &[Section] {
        match self {
            TemplateContent::Sections(sections) => sections,
            _ => &[],
        }
    }

    /// The content in the loose shape `load` accepts
    pub fn to_raw(&self) -> Option<RawContent> {
        match self {
            TemplateContent::Standard(fields) => serde_json::to_value(fields).ok(),
            TemplateContent::RawHtml(text) | TemplateContent::Fragment(text) => {
                Some(serde_json::Value::String(text.clone()))
            }
            TemplateContent::Sections(_) => None,
        }
    }

    /// Placeholder names used by the subject and the content, in order of
    /// first appearance
    pub fn variables(&self, subject: Option<&str>) -> Vec<String> {
        let mut names = Vec::new();
        if let Some(subject) = subject {
            collect_variables(&mut names, subject);
        }

        match self {
            TemplateContent::Standard(fields) => {
                for name in STANDARD_LAYOUT_VARIABLES {
                    if !names.iter().any(|n| n == name) {
                        names.push(name.to_string());
                    }
                }
                for name in STANDARD_LAYOUT_VARIABLES {
                    if let Some(value) = fields.get(name) {
                        collect_variables(&mut names, value);
                    }
                }
            }
            TemplateContent::RawHtml(text) | TemplateContent::Fragment(text) => {
                collect_variables(&mut names, text);
            }
            TemplateContent::Sections(sections) => {
                for section in sections {
                    collect_variables(&mut names, &section.content);
                }
            }
        }

        names
    }
}
