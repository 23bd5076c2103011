//! Built-in reference data: preview sample values, the personalization
//! variable catalog, and starter templates.

use serde::Serialize;
use serde_json::json;

use super::substitution::Variables;
use super::types::{CreateTemplateRequest, LayoutKind, Section, SectionType};

/// Personalization variables available to template authors
pub const VARIABLE_CATALOG: [(&str, &str); 14] = [
    ("company_name", "Company name"),
    ("contact_name", "Contact person full name"),
    ("job_title", "Contact job title"),
    ("industry", "Company industry"),
    ("employees", "Number of employees"),
    ("travel_budget", "Annual travel budget"),
    ("annual_revenue", "Company annual revenue"),
    ("location", "Company location"),
    ("phone", "Contact phone number"),
    ("email", "Contact email address"),
    ("website", "Company website"),
    ("sender_name", "Sender full name"),
    ("sender_title", "Sender job title"),
    ("sender_company", "Sender company name"),
];

const SAMPLE_DATA: [(&str, &str); 14] = [
    ("company_name", "Acme Corporation"),
    ("contact_name", "John Smith"),
    ("job_title", "Travel Manager"),
    ("industry", "Technology"),
    ("employees", "500"),
    ("travel_budget", "$250,000"),
    ("annual_revenue", "$50M"),
    ("location", "San Francisco, CA"),
    ("phone", "+1 (555) 123-4567"),
    ("email", "john.smith@acme.com"),
    ("website", "www.acme.com"),
    ("sender_name", "Sarah Johnson"),
    ("sender_title", "Sales Representative"),
    ("sender_company", "SOAR-AI"),
];

#[derive(Debug, Clone, Serialize)]
pub struct VariableInfo {
    pub name: &'static str,
    pub description: &'static str,
}

pub fn available_variables() -> Vec<VariableInfo> {
    VARIABLE_CATALOG
        .iter()
        .map(|&(name, description)| VariableInfo { name, description })
        .collect()
}

/// Default preview values with `overrides` merged on top
pub fn sample_data(overrides: &Variables) -> Variables {
    let mut data: Variables = SAMPLE_DATA
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    data.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
    data
}

/// Starter templates seeded into a fresh store
pub fn builtin_templates() -> Vec<CreateTemplateRequest> {
    vec![
        CreateTemplateRequest {
            id: Some("corporate-welcome-standard".to_string()),
            name: "Corporate Welcome (Standard Layout)".to_string(),
            description: Some(
                "Professional welcome template with standardized sections including header, body, and footer"
                    .to_string(),
            ),
            layout: LayoutKind::Standard,
            sections: Vec::new(),
            content: Some(json!({
                "main_heading": "Welcome, {{contact_name}}!",
                "intro_paragraph": "We're excited to help {{company_name}} transform your corporate travel experience.",
            })),
            subject_line: Some(
                "Welcome to the future of corporate travel - {{company_name}}".to_string(),
            ),
            cta: Some("Schedule Demo".to_string()),
            cta_link: None,
            company_id: None,
            is_global: true,
            created_by: None,
        },
        CreateTemplateRequest {
            id: Some("cost-savings-standard".to_string()),
            name: "Cost Savings (Standard Layout)".to_string(),
            description: Some(
                "Highlight cost savings and ROI with professional layout including header, personalized content, and clear call-to-action"
                    .to_string(),
            ),
            layout: LayoutKind::Standard,
            sections: Vec::new(),
            content: Some(json!({
                "main_heading": "Cut travel costs by 35%",
                "body_content": "<p>Companies like {{company_name}} in the {{industry}} sector are saving an average of 35% on travel costs.</p><p>Current estimated budget: {{travel_budget}}</p>",
            })),
            subject_line: Some(
                "{{company_name}}: Cut travel costs by 35% with SOAR-AI".to_string(),
            ),
            cta: Some("See Your Savings".to_string()),
            cta_link: None,
            company_id: None,
            is_global: true,
            created_by: None,
        },
        CreateTemplateRequest {
            id: Some("corporate-welcome".to_string()),
            name: "Corporate Welcome Template".to_string(),
            description: Some("Standard welcome template for new corporate clients".to_string()),
            layout: LayoutKind::Custom,
            sections: vec![
                Section::new(SectionType::Header, "Welcome to SOAR-AI!"),
                Section::new(
                    SectionType::Body,
                    "<p>Dear {{contact_name}},</p>\
                     <p>Welcome to SOAR-AI! We're excited to help {{company_name}} transform your corporate travel experience.</p>\
                     <p>Based on your {{industry}} background and {{employees}} team size, we've identified several opportunities to optimize your travel operations:</p>\
                     <ul><li>Reduce travel costs by up to 35%</li><li>Streamline booking and approval processes</li><li>Access our global partner network</li><li>AI-powered travel recommendations</li></ul>\
                     <p>Ready to see how we can help? Let's schedule a 15-minute discovery call.</p>",
                ),
                Section::new(
                    SectionType::Cta,
                    r#"<a href="{{cta_link}}" class="cta-button">Schedule Discovery Call</a>"#,
                ),
                Section::new(
                    SectionType::Footer,
                    "<p>Best regards,<br>The SOAR-AI Team</p>",
                ),
            ],
            content: None,
            subject_line: Some("Welcome to SOAR-AI, {{company_name}}".to_string()),
            cta: None,
            cta_link: None,
            company_id: None,
            is_global: true,
            created_by: None,
        },
    ]
}
