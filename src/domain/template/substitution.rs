//! Variable substitution engine for templates

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::types::{TemplateError, TemplateResult};

/// Variable name to replacement value. Ordered so every call iterates the
/// same way.
pub type Variables = BTreeMap<String, String>;

lazy_static! {
    /// Any `{{name}}` where the name contains no braces
    static ref PLACEHOLDER: Regex = Regex::new(r"\{\{([^{}]+)\}\}").unwrap();

    /// Word-character placeholders, used for variable discovery
    static ref IDENTIFIER: Regex = Regex::new(r"\{\{(\w+)\}\}").unwrap();
}

/// Replace every `{{key}}` in `template` whose key is present in `variables`.
///
/// The input is scanned once, left to right. Unknown placeholders are kept
/// literally and substituted values are never scanned again, so a value that
/// itself contains `{{other}}` is emitted as-is.
pub fn substitute_variables(template: &str, variables: &Variables) -> String {
    if variables.is_empty() || !template.contains("{{") {
        return template.to_string();
    }

    PLACEHOLDER
        .replace_all(template, |caps: &Captures| match variables.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Convert a JSON object into a variable map
pub fn variables_from_json(variables: &serde_json::Value) -> TemplateResult<Variables> {
    let map = match variables {
        serde_json::Value::Object(map) => map,
        serde_json::Value::Null => return Ok(Variables::new()),
        _ => {
            return Err(TemplateError::SubstitutionFailed(
                "Variables must be an object".to_string(),
            ))
        }
    };

    Ok(map
        .iter()
        .map(|(key, value)| (key.clone(), json_to_text(value)))
        .collect())
}

pub(crate) fn json_to_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Null => String::new(),
        // For arrays and objects, use JSON representation
        _ => value.to_string(),
    }
}

/// List placeholder names in order of first appearance, without duplicates
pub fn extract_variables(content: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in IDENTIFIER.captures_iter(content) {
        let name = &caps[1];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Extend `names` with the placeholders of `content` not already present
pub(crate) fn collect_variables(names: &mut Vec<String>, content: &str) {
    for name in extract_variables(content) {
        if !names.contains(&name) {
            names.push(name);
        }
    }
}
