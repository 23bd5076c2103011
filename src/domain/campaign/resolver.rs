//! Campaign content resolution: picks the renderer for a template's content
//! and assembles the outbound subject and HTML body.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::domain::template::{
    compose_sections, substitute_variables, wrap_fragment, StandardLayoutRenderer,
    StandardLayoutVariables, Template, TemplateContent, Variables, STANDARD_LAYOUT_VARIABLES,
};
use crate::metrics::RenderMetrics;

/// CTA label used when neither the campaign nor the template sets one
pub const DEFAULT_CTA: &str = "Schedule Demo";

/// CTA link used when neither the campaign nor the template sets one
pub const DEFAULT_CTA_LINK: &str = "https://calendly.com/soar-ai/demo";

/// Values known at send or preview time
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeValues {
    /// Personalization bag derived from a lead/contact record
    #[serde(default)]
    pub personalization: Variables,

    /// Campaign-level subject override
    #[serde(default)]
    pub subject: Option<String>,

    /// Campaign-level CTA label override
    #[serde(default)]
    pub cta: Option<String>,

    /// Campaign-level CTA link override
    #[serde(default)]
    pub cta_link: Option<String>,
}

impl RuntimeValues {
    pub fn with_personalization(personalization: Variables) -> Self {
        Self {
            personalization,
            ..Default::default()
        }
    }
}

/// Final outbound content; not persisted here
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedEmail {
    pub subject_line: String,
    pub html_body: String,
}

#[derive(Debug, Clone, Default)]
pub struct CampaignContentResolver {
    standard: StandardLayoutRenderer,
}

impl CampaignContentResolver {
    pub fn new(standard: StandardLayoutRenderer) -> Self {
        Self { standard }
    }

    pub fn standard_renderer(&self) -> &StandardLayoutRenderer {
        &self.standard
    }

    /// Render `template` for one recipient
    pub fn resolve(&self, template: &Template, runtime: &RuntimeValues) -> RenderedEmail {
        let started = Instant::now();
        let variables = &runtime.personalization;

        let subject_template = first_non_empty(&[
            runtime.subject.as_deref(),
            template.subject_line.as_deref(),
        ])
        .map(str::to_string)
        .unwrap_or_else(|| format!("Partnership Opportunity - {}", template.name));
        let subject = substitute_variables(&subject_template, variables);

        let cta = first_non_empty(&[runtime.cta.as_deref(), template.cta.as_deref()])
            .unwrap_or(DEFAULT_CTA);
        let cta_link = first_non_empty(&[runtime.cta_link.as_deref(), template.cta_link.as_deref()])
            .unwrap_or(DEFAULT_CTA_LINK);

        let (kind, html_body) = match &template.content {
            TemplateContent::Standard(fields) => (
                "standard",
                self.render_standard(fields, variables, &subject, cta, cta_link),
            ),
            TemplateContent::Sections(sections) => {
                let scoped = with_cta_placeholders(variables, cta, cta_link);
                ("sections", compose_sections(sections, &scoped, cta_link))
            }
            TemplateContent::RawHtml(html) => ("raw_html", html.clone()),
            TemplateContent::Fragment(text) => {
                let scoped = with_cta_placeholders(variables, cta, cta_link);
                let content = substitute_variables(text, &scoped);
                ("fragment", wrap_fragment(&content, cta, cta_link, &subject))
            }
        };

        RenderMetrics::record_render(kind, started.elapsed());
        tracing::debug!(
            template_id = %template.id,
            kind = kind,
            bytes = html_body.len(),
            "Template rendered"
        );

        RenderedEmail {
            subject_line: subject,
            html_body,
        }
    }

    /// Stored fields win, then campaign subject/CTA, then personalization
    /// keys named like a standard field; the rest keeps its default.
    fn render_standard(
        &self,
        stored: &StandardLayoutVariables,
        variables: &Variables,
        subject: &str,
        cta: &str,
        cta_link: &str,
    ) -> String {
        let mut fields = stored.map_values(|value| substitute_variables(value, variables));

        fields.set_if_absent("subject", subject);
        fields.set_if_absent("cta_text", cta);
        fields.set_if_absent("cta_url", cta_link);

        for name in STANDARD_LAYOUT_VARIABLES {
            if let Some(value) = variables.get(name) {
                fields.set_if_absent(name, value.clone());
            }
        }

        self.standard.render(&fields)
    }
}

/// Authored sections may reference the resolved CTA as `{{cta_text}}` and
/// `{{cta_link}}`; recipient values of the same name take precedence.
fn with_cta_placeholders(variables: &Variables, cta: &str, cta_link: &str) -> Variables {
    let mut scoped = variables.clone();
    scoped
        .entry("cta_text".to_string())
        .or_insert_with(|| cta.to_string());
    scoped
        .entry("cta_link".to_string())
        .or_insert_with(|| cta_link.to_string());
    scoped
}

fn first_non_empty<'a>(candidates: &[Option<&'a str>]) -> Option<&'a str> {
    candidates
        .iter()
        .flatten()
        .copied()
        .find(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::template::{
        CreateTemplateRequest, EmptyValuePolicy, LayoutKind, Section, SectionType,
    };
    use serde_json::json;

    fn template(
        layout: LayoutKind,
        content: Option<serde_json::Value>,
        sections: Vec<Section>,
    ) -> Template {
        CreateTemplateRequest {
            id: Some("t1".to_string()),
            name: "Welcome".to_string(),
            description: None,
            layout,
            sections,
            content,
            subject_line: Some("Hello {{company_name}}".to_string()),
            cta: None,
            cta_link: None,
            company_id: None,
            is_global: false,
            created_by: None,
        }
        .into()
    }

    fn resolver() -> CampaignContentResolver {
        CampaignContentResolver::new(StandardLayoutRenderer::with_year(
            EmptyValuePolicy::Override,
            2025,
        ))
    }

    fn runtime(pairs: &[(&str, &str)]) -> RuntimeValues {
        RuntimeValues::with_personalization(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_standard_layout_uses_campaign_values() {
        let template = template(
            LayoutKind::Standard,
            Some(json!({"main_heading": "Welcome {{contact_name}}!"})),
            vec![],
        );
        let rendered = resolver().resolve(&template, &runtime(&[("contact_name", "Sam")]));

        assert_eq!(rendered.subject_line, "Hello {{company_name}}");
        assert!(rendered.html_body.contains("Welcome Sam!"));
        assert!(rendered.html_body.contains(DEFAULT_CTA));
        assert!(rendered.html_body.contains(DEFAULT_CTA_LINK));
        assert!(rendered.html_body.contains("123 Business Ave, City, State 12345"));
    }

    #[test]
    fn test_standard_layout_maps_personalization_fields() {
        let template = template(LayoutKind::Standard, None, vec![]);
        let rendered = resolver().resolve(&template, &runtime(&[("company_name", "Acme Corp")]));

        assert_eq!(rendered.subject_line, "Hello Acme Corp");
        assert!(rendered.html_body.contains("Acme Corp &bull;"));
    }

    #[test]
    fn test_sections_use_resolved_cta_link() {
        let template = template(
            LayoutKind::Custom,
            None,
            vec![
                Section::new(SectionType::Body, "Hi {{contact_name}}"),
                Section::new(SectionType::Cta, "Book"),
            ],
        );
        let mut values = runtime(&[("contact_name", "Sam")]);
        values.cta_link = Some("https://book.test".to_string());

        let rendered = resolver().resolve(&template, &values);
        assert!(rendered.html_body.contains(r#"<div class="email-body">Hi Sam</div>"#));
        assert!(rendered.html_body.contains(r#"href="https://book.test""#));
    }

    #[test]
    fn test_sections_can_reference_cta_placeholders() {
        let template = template(
            LayoutKind::Custom,
            None,
            vec![
                Section::new(SectionType::Body, "b"),
                Section::new(
                    SectionType::Cta,
                    r#"<a href="{{cta_link}}" class="cta-button">{{cta_text}}</a>"#,
                ),
            ],
        );
        let rendered = resolver().resolve(&template, &RuntimeValues::default());
        assert!(rendered.html_body.contains(&format!(
            r#"<div class="email-cta"><a href="{}" class="cta-button">{}</a></div>"#,
            DEFAULT_CTA_LINK, DEFAULT_CTA
        )));
    }

    #[test]
    fn test_raw_html_verbatim() {
        let html = "<!DOCTYPE html><html><body>{{contact_name}}</body></html>";
        let template = template(LayoutKind::Custom, Some(json!(html)), vec![]);
        let rendered = resolver().resolve(&template, &runtime(&[("contact_name", "Sam")]));
        assert_eq!(rendered.html_body, html);
    }

    #[test]
    fn test_malformed_standard_falls_back_to_wrapped_fragment() {
        let template = template(
            LayoutKind::Standard,
            Some(json!("Hi {{contact_name}}, plain text")),
            vec![],
        );
        let rendered = resolver().resolve(&template, &runtime(&[("contact_name", "Sam")]));

        assert!(rendered.html_body.starts_with("<!DOCTYPE html>"));
        assert!(rendered.html_body.contains("<div>Hi Sam, plain text</div>"));
        assert!(rendered.html_body.contains(DEFAULT_CTA));
    }

    #[test]
    fn test_subject_fallback_and_override() {
        let mut template = template(LayoutKind::Custom, Some(json!("body")), vec![]);
        template.subject_line = None;
        let rendered = resolver().resolve(&template, &RuntimeValues::default());
        assert_eq!(rendered.subject_line, "Partnership Opportunity - Welcome");

        let values = RuntimeValues {
            subject: Some("Special offer".to_string()),
            ..Default::default()
        };
        let rendered = resolver().resolve(&template, &values);
        assert_eq!(rendered.subject_line, "Special offer");
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let template = template(LayoutKind::Standard, None, vec![]);
        let values = runtime(&[("contact_name", "Sam")]);
        let resolver = resolver();
        assert_eq!(resolver.resolve(&template, &values), resolver.resolve(&template, &values));
    }
}
