//! Structural validation of templates.
//!
//! Validation never fails: it returns every finding and leaves it to the
//! caller to decide whether an invalid template blocks an action.

use serde::{Deserialize, Serialize};

use super::content::TemplateContent;
use super::types::{LayoutKind, Section, SectionType, Template};

pub const NAME_REQUIRED: &str = "Template name is required";
pub const SECTIONS_REQUIRED: &str = "Custom template must have at least one section";
pub const HEADER_RECOMMENDED: &str = "Custom template should have a header section";
pub const BODY_REQUIRED: &str = "Custom template must have a body section";
pub const FOOTER_RECOMMENDED: &str = "Custom template should have a footer section";

/// Whether advisory findings make a template invalid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStrictness {
    /// Any finding, advisory or not, invalidates the template
    #[default]
    Strict,
    /// Only hard errors invalidate the template
    Lenient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Advisory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub message: String,
}

/// Outcome of validating a template
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    /// Every violated rule, advisories included
    pub errors: Vec<String>,
    #[serde(skip)]
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    fn from_issues(issues: Vec<ValidationIssue>, strictness: ValidationStrictness) -> Self {
        let is_valid = match strictness {
            ValidationStrictness::Strict => issues.is_empty(),
            ValidationStrictness::Lenient => {
                !issues.iter().any(|i| i.severity == Severity::Error)
            }
        };
        let errors = issues.iter().map(|i| i.message.clone()).collect();

        Self {
            is_valid,
            errors,
            issues,
        }
    }

    pub fn advisories(&self) -> impl Iterator<Item = &str> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Advisory)
            .map(|i| i.message.as_str())
    }
}

/// The body a template carries, as far as validation is concerned
#[derive(Debug, Clone, Copy)]
pub enum ShapeBody<'a> {
    /// Authored sections, checked section by section
    Sections(&'a [Section]),
    /// A complete document or a body fragment; it is its own body
    Document(&'a str),
}

/// The parts of a template that validation looks at
#[derive(Debug, Clone, Copy)]
pub struct TemplateShape<'a> {
    pub name: &'a str,
    pub layout: LayoutKind,
    pub body: ShapeBody<'a>,
}

impl<'a> From<&'a Template> for TemplateShape<'a> {
    fn from(template: &'a Template) -> Self {
        let body = match &template.content {
            TemplateContent::RawHtml(text) | TemplateContent::Fragment(text) => {
                ShapeBody::Document(text)
            }
            content => ShapeBody::Sections(content.sections()),
        };

        Self {
            name: &template.name,
            layout: template.layout,
            body,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateValidator {
    strictness: ValidationStrictness,
}

impl TemplateValidator {
    pub fn new(strictness: ValidationStrictness) -> Self {
        Self { strictness }
    }

    pub fn strictness(&self) -> ValidationStrictness {
        self.strictness
    }

    pub fn validate<'a>(&self, template: impl Into<TemplateShape<'a>>) -> ValidationReport {
        let shape = template.into();
        let mut issues = Vec::new();

        if shape.name.trim().is_empty() {
            issues.push(error(NAME_REQUIRED));
        }

        // Standard layout has no section structure to check
        if shape.layout == LayoutKind::Custom {
            match shape.body {
                ShapeBody::Sections(sections) => check_sections(sections, &mut issues),
                ShapeBody::Document(text) if text.trim().is_empty() => {
                    issues.push(error(BODY_REQUIRED));
                }
                ShapeBody::Document(_) => {}
            }
        }

        ValidationReport::from_issues(issues, self.strictness)
    }
}

fn check_sections(sections: &[Section], issues: &mut Vec<ValidationIssue>) {
    if sections.is_empty() {
        issues.push(error(SECTIONS_REQUIRED));
    }

    let has = |kind: SectionType| sections.iter().any(|s| s.section_type == kind);

    if !has(SectionType::Header) {
        issues.push(advisory(HEADER_RECOMMENDED));
    }
    if !has(SectionType::Body) {
        issues.push(error(BODY_REQUIRED));
    }
    if !has(SectionType::Footer) {
        issues.push(advisory(FOOTER_RECOMMENDED));
    }
}

fn error(message: &str) -> ValidationIssue {
    ValidationIssue {
        severity: Severity::Error,
        message: message.to_string(),
    }
}

fn advisory(message: &str) -> ValidationIssue {
    ValidationIssue {
        severity: Severity::Advisory,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape<'a>(name: &'a str, layout: LayoutKind, sections: &'a [Section]) -> TemplateShape<'a> {
        TemplateShape {
            name,
            layout,
            body: ShapeBody::Sections(sections),
        }
    }

    fn custom_document(text: &str) -> TemplateShape<'_> {
        TemplateShape {
            name: "Promo",
            layout: LayoutKind::Custom,
            body: ShapeBody::Document(text),
        }
    }

    #[test]
    fn test_empty_custom_template() {
        let report = TemplateValidator::default().validate(shape("", LayoutKind::Custom, &[]));

        assert!(!report.is_valid);
        assert!(report.errors.len() >= 2);
        assert!(report.errors.contains(&NAME_REQUIRED.to_string()));
        assert!(report.errors.contains(&SECTIONS_REQUIRED.to_string()));
        assert!(report.errors.contains(&BODY_REQUIRED.to_string()));
    }

    #[test]
    fn test_whitespace_name_rejected() {
        let sections = [Section::new(SectionType::Body, "x")];
        let report = TemplateValidator::new(ValidationStrictness::Lenient)
            .validate(shape("   ", LayoutKind::Custom, &sections));
        assert!(!report.is_valid);
        assert_eq!(report.errors[0], NAME_REQUIRED);
    }

    #[test]
    fn test_missing_body_invalid_in_both_modes() {
        let sections = [
            Section::new(SectionType::Header, "h"),
            Section::new(SectionType::Footer, "f"),
        ];
        for strictness in [ValidationStrictness::Strict, ValidationStrictness::Lenient] {
            let report = TemplateValidator::new(strictness)
                .validate(shape("Promo", LayoutKind::Custom, &sections));
            assert!(!report.is_valid);
            assert_eq!(report.errors, vec![BODY_REQUIRED.to_string()]);
        }
    }

    #[test]
    fn test_advisories_depend_on_strictness() {
        let sections = [Section::new(SectionType::Body, "b")];

        let strict = TemplateValidator::new(ValidationStrictness::Strict)
            .validate(shape("Promo", LayoutKind::Custom, &sections));
        assert!(!strict.is_valid);
        assert_eq!(strict.errors.len(), 2);

        let lenient = TemplateValidator::new(ValidationStrictness::Lenient)
            .validate(shape("Promo", LayoutKind::Custom, &sections));
        assert!(lenient.is_valid);
        assert_eq!(
            lenient.advisories().collect::<Vec<_>>(),
            vec![HEADER_RECOMMENDED, FOOTER_RECOMMENDED]
        );
    }

    #[test]
    fn test_complete_custom_template_valid() {
        let sections = [
            Section::new(SectionType::Header, "h"),
            Section::new(SectionType::Body, "b"),
            Section::new(SectionType::Footer, "f"),
        ];
        let report =
            TemplateValidator::default().validate(shape("Promo", LayoutKind::Custom, &sections));
        assert!(report.is_valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_custom_document_is_its_own_body() {
        let documents = [
            "<!DOCTYPE html><html><body>Hi</body></html>",
            "<p>Dear {{contact_name}}</p>",
        ];
        for text in documents {
            let report = TemplateValidator::default().validate(custom_document(text));
            assert!(report.is_valid, "{} rejected: {:?}", text, report.errors);
        }

        let report = TemplateValidator::new(ValidationStrictness::Lenient)
            .validate(custom_document("   "));
        assert!(!report.is_valid);
        assert_eq!(report.errors, vec![BODY_REQUIRED.to_string()]);
    }

    #[test]
    fn test_standard_layout_skips_section_checks() {
        let report =
            TemplateValidator::default().validate(shape("Promo", LayoutKind::Standard, &[]));
        assert!(report.is_valid);
    }
}
