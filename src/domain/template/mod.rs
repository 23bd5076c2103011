//! Campaign email template system.
//!
//! This module provides:
//! - Template definitions in two layouts: a fixed standard skeleton and
//!   author-ordered custom sections
//! - Single-pass {{variable}} substitution
//! - Structural validation with configurable strictness
//! - In-memory template storage with CRUD, duplicate and preview
//!
//! # Example
//!
//! ```ignore
//! let store = TemplateStore::new();
//!
//! store.create(CreateTemplateRequest {
//!     id: Some("welcome".to_string()),
//!     name: "Welcome".to_string(),
//!     layout: LayoutKind::Custom,
//!     sections: vec![
//!         Section::new(SectionType::Header, "Hi {{contact_name}}"),
//!         Section::new(SectionType::Body, "<p>Welcome aboard.</p>"),
//!         Section::new(SectionType::Footer, "Thanks"),
//!     ],
//!     ..
//! }.into())?;
//!
//! let rendered = store.render("welcome", &RuntimeValues::with_personalization(vars))?;
//! ```

mod catalog;
mod content;
mod sections;
mod standard_layout;
mod store;
mod substitution;
mod types;
mod validation;

pub use catalog::{
    available_variables, builtin_templates, sample_data, VariableInfo, VARIABLE_CATALOG,
};
pub use content::{is_complete_document, TemplateContent};
pub use sections::{compose_sections, render_section, wrap_fragment};
pub use standard_layout::{
    EmptyValuePolicy, StandardLayoutRenderer, StandardLayoutVariables, STANDARD_LAYOUT_SKELETON,
    STANDARD_LAYOUT_VARIABLES,
};
pub use store::{create_template_store, TemplateStore};
pub use substitution::{extract_variables, substitute_variables, variables_from_json, Variables};
pub use types::{
    CreateTemplateRequest, LayoutKind, RawContent, Section, SectionType, Template, TemplateError,
    TemplateFilter, TemplateListResponse, TemplatePreview, TemplateResult, UpdateTemplateRequest,
};
pub use validation::{
    Severity, ShapeBody, TemplateShape, TemplateValidator, ValidationIssue, ValidationReport,
    ValidationStrictness, BODY_REQUIRED, FOOTER_RECOMMENDED, HEADER_RECOMMENDED, NAME_REQUIRED,
    SECTIONS_REQUIRED,
};
