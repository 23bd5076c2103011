//! Standard layout: a fixed email skeleton filled from 12 named fields.

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use super::substitution::{json_to_text, substitute_variables, Variables};

/// Field names of the standard layout, in canonical order
pub const STANDARD_LAYOUT_VARIABLES: [&str; 12] = [
    "subject",
    "preheader",
    "logo_url",
    "company_name",
    "main_heading",
    "intro_paragraph",
    "body_content",
    "cta_url",
    "cta_text",
    "company_address",
    "unsubscribe_url",
    "year",
];

pub const STANDARD_LAYOUT_SKELETON: &str = r#"<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml" lang="en">
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{subject}}</title>
    <style>
      body { margin:0; padding:0; -webkit-text-size-adjust:100%; -ms-text-size-adjust:100%; }
      table { border-spacing:0; }
      img { border:0; display:block; }
      a { color:inherit; text-decoration:none; }
      .wrapper { width:100%; background-color:#f5f7fb; padding:20px 0; }
      .content { max-width:600px; margin:0 auto; background:#ffffff; border-radius:6px; overflow:hidden; }
      .header { padding:20px; text-align:center; }
      .logo { max-width:160px; height:auto; }
      .preheader { display:none !important; visibility:hidden; opacity:0; color:transparent; height:0; width:0; }
      .main { padding:24px; font-family:Arial, 'Helvetica Neue', Helvetica, sans-serif; color:#333333; font-size:16px; line-height:24px; }
      .h1 { font-size:22px; margin:0 0 10px 0; color:#111827; }
      .p { margin:0 0 16px 0; }
      .cta { text-align:center; margin:24px 0; }
      .button { display:inline-block; padding:12px 20px; border-radius:6px; background:#ff7a00; color:#ffffff; font-weight:600; }
      .footer { padding:16px 20px; font-size:12px; color:#8b94a6; text-align:center; }
      @media screen and (max-width:480px) {
        .content { width:100% !important; border-radius:0; }
        .main { padding:16px; }
        .h1 { font-size:20px; }
      }
    </style>
  </head>
  <body>
    <div class="preheader">{{preheader}}</div>
    <table class="wrapper" width="100%" cellpadding="0" cellspacing="0" role="presentation">
      <tr>
        <td align="center">
          <table class="content" width="600" cellpadding="0" cellspacing="0" role="presentation">
            <tr>
              <td class="header">
                <img src="{{logo_url}}" alt="Logo" class="logo" width="160" />
              </td>
            </tr>
            <tr>
              <td class="main">
                <h1 class="h1">{{main_heading}}</h1>
                <p class="p">{{intro_paragraph}}</p>
                <div>{{body_content}}</div>
                <div class="cta">
                  <a href="{{cta_url}}" class="button" target="_blank">{{cta_text}}</a>
                </div>
              </td>
            </tr>
            <tr>
              <td class="footer">
                <p style="margin:0 0 8px 0;">{{company_name}} &bull; {{company_address}}</p>
                <p style="margin:0 0 8px 0;"><a href="{{unsubscribe_url}}">Unsubscribe</a></p>
                <p style="margin:0;">&copy; {{year}}. All rights reserved.</p>
              </td>
            </tr>
          </table>
        </td>
      </tr>
    </table>
  </body>
</html>"#;

/// Caller-supplied standard layout fields; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StandardLayoutVariables {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preheader: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_heading: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intro_paragraph: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unsubscribe_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
}

impl StandardLayoutVariables {
    fn slot(&self, name: &str) -> Option<&Option<String>> {
        Some(match name {
            "subject" => &self.subject,
            "preheader" => &self.preheader,
            "logo_url" => &self.logo_url,
            "company_name" => &self.company_name,
            "main_heading" => &self.main_heading,
            "intro_paragraph" => &self.intro_paragraph,
            "body_content" => &self.body_content,
            "cta_url" => &self.cta_url,
            "cta_text" => &self.cta_text,
            "company_address" => &self.company_address,
            "unsubscribe_url" => &self.unsubscribe_url,
            "year" => &self.year,
            _ => return None,
        })
    }

    fn slot_mut(&mut self, name: &str) -> Option<&mut Option<String>> {
        Some(match name {
            "subject" => &mut self.subject,
            "preheader" => &mut self.preheader,
            "logo_url" => &mut self.logo_url,
            "company_name" => &mut self.company_name,
            "main_heading" => &mut self.main_heading,
            "intro_paragraph" => &mut self.intro_paragraph,
            "body_content" => &mut self.body_content,
            "cta_url" => &mut self.cta_url,
            "cta_text" => &mut self.cta_text,
            "company_address" => &mut self.company_address,
            "unsubscribe_url" => &mut self.unsubscribe_url,
            "year" => &mut self.year,
            _ => return None,
        })
    }

    /// Value of a standard field, None for unset fields and unknown names
    pub fn get(&self, name: &str) -> Option<&str> {
        self.slot(name).and_then(|v| v.as_deref())
    }

    /// Set a standard field; returns false when `name` is not one of the 12
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.slot_mut(name) {
            Some(slot) => {
                *slot = Some(value.into());
                true
            }
            None => false,
        }
    }

    /// Fill fields that are still unset; already-set fields are kept
    pub fn set_if_absent(&mut self, name: &str, value: impl Into<String>) {
        if let Some(slot) = self.slot_mut(name) {
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
    }

    /// Map a flat key/value bag onto the 12-field shape, ignoring other keys
    pub fn from_variables(variables: &Variables) -> Self {
        let mut fields = Self::default();
        for (key, value) in variables {
            fields.set(key, value.clone());
        }
        fields
    }

    /// Fill fields from a JSON object. Scalars are stringified, nulls leave
    /// the field unset and other keys are ignored.
    pub fn from_json_object(map: &serde_json::Map<String, serde_json::Value>) -> Self {
        let mut fields = Self::default();
        for (key, value) in map {
            if !value.is_null() {
                fields.set(key, json_to_text(value));
            }
        }
        fields
    }

    /// Apply `f` to every set field
    pub fn map_values(&self, mut f: impl FnMut(&str) -> String) -> Self {
        let mut mapped = self.clone();
        for name in STANDARD_LAYOUT_VARIABLES {
            if let Some(Some(value)) = mapped.slot_mut(name) {
                let next = f(value.as_str());
                *value = next;
            }
        }
        mapped
    }
}

/// How an empty caller value is treated when merging over defaults
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyValuePolicy {
    /// An empty string is a real value and replaces the default
    #[default]
    Override,
    /// An empty string counts as absent and the default is used
    UseDefault,
}

/// Hardcoded fallback for each standard field
fn default_value(name: &str, year: i32) -> String {
    match name {
        "subject" => "SOAR-AI Email".to_string(),
        "preheader" => "Your corporate travel solution".to_string(),
        "logo_url" => "https://via.placeholder.com/160x60/2563eb/ffffff?text=SOAR-AI".to_string(),
        "company_name" => "SOAR-AI".to_string(),
        "main_heading" => "Welcome to SOAR-AI".to_string(),
        "intro_paragraph" => {
            "We're excited to help transform your corporate travel experience.".to_string()
        }
        "body_content" => "<p>Your content goes here...</p>".to_string(),
        "cta_url" | "unsubscribe_url" => "#".to_string(),
        "cta_text" => "Get Started".to_string(),
        "company_address" => "123 Business Ave, City, State 12345".to_string(),
        "year" => year.to_string(),
        _ => String::new(),
    }
}

/// Renders the standard skeleton. Pure: the only captured state is the
/// default year, fixed when the renderer is built.
#[derive(Debug, Clone)]
pub struct StandardLayoutRenderer {
    defaults: Variables,
    empty_values: EmptyValuePolicy,
}

impl Default for StandardLayoutRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl StandardLayoutRenderer {
    pub fn new() -> Self {
        Self::with_policy(EmptyValuePolicy::default())
    }

    pub fn with_policy(empty_values: EmptyValuePolicy) -> Self {
        Self::with_year(empty_values, Utc::now().year())
    }

    /// Build a renderer whose default `year` is fixed
    pub fn with_year(empty_values: EmptyValuePolicy, year: i32) -> Self {
        let defaults = STANDARD_LAYOUT_VARIABLES
            .iter()
            .map(|name| (name.to_string(), default_value(name, year)))
            .collect();

        Self {
            defaults,
            empty_values,
        }
    }

    pub fn empty_value_policy(&self) -> EmptyValuePolicy {
        self.empty_values
    }

    /// Hardcoded default for a standard field
    pub fn default_for(&self, name: &str) -> Option<&str> {
        self.defaults.get(name).map(String::as_str)
    }

    /// Merge caller values over the defaults; always yields all 12 fields
    pub fn resolve(&self, variables: &StandardLayoutVariables) -> Variables {
        self.defaults
            .iter()
            .map(|(name, default)| {
                let value = match variables.get(name) {
                    Some("") if self.empty_values == EmptyValuePolicy::UseDefault => {
                        default.clone()
                    }
                    Some(value) => value.to_string(),
                    None => default.clone(),
                };
                (name.clone(), value)
            })
            .collect()
    }

    /// Render the skeleton. `body_content` is inserted verbatim and is
    /// expected to be HTML already.
    pub fn render(&self, variables: &StandardLayoutVariables) -> String {
        substitute_variables(STANDARD_LAYOUT_SKELETON, &self.resolve(variables))
    }
}
