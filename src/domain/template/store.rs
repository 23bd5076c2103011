//! Template storage with CRUD operations

use std::sync::Arc;

use chrono::Utc;
use dashmap::{mapref::entry::Entry, DashMap};

use super::catalog::{builtin_templates, sample_data};
use super::content::TemplateContent;
use super::substitution::{substitute_variables, Variables};
use super::types::{
    Template, TemplateError, TemplateFilter, TemplatePreview, TemplateResult,
    UpdateTemplateRequest,
};
use super::validation::{TemplateValidator, ValidationReport};
use crate::domain::campaign::{CampaignContentResolver, RenderedEmail, RuntimeValues};
use crate::metrics::RenderMetrics;

/// In-memory template storage
pub struct TemplateStore {
    templates: DashMap<String, Template>,
    validator: TemplateValidator,
    resolver: CampaignContentResolver,
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateStore {
    /// Create a new template store with strict validation and default rendering
    pub fn new() -> Self {
        Self::with_options(TemplateValidator::default(), CampaignContentResolver::default())
    }

    pub fn with_options(validator: TemplateValidator, resolver: CampaignContentResolver) -> Self {
        Self {
            templates: DashMap::new(),
            validator,
            resolver,
        }
    }

    pub fn resolver(&self) -> &CampaignContentResolver {
        &self.resolver
    }

    /// Create a new template. The ID of a deleted template can be reused.
    pub fn create(&self, template: Template) -> TemplateResult<Template> {
        template.validate_id()?;
        self.ensure_valid(&template)?;

        match self.templates.entry(template.id.clone()) {
            Entry::Occupied(entry) if entry.get().is_active => {
                return Err(TemplateError::AlreadyExists(template.id));
            }
            Entry::Occupied(mut entry) => {
                entry.insert(template.clone());
            }
            Entry::Vacant(entry) => {
                entry.insert(template.clone());
            }
        }

        tracing::info!(
            template_id = %template.id,
            layout = template.layout.as_str(),
            "Template created"
        );

        Ok(template)
    }

    /// Get an active template by ID
    pub fn get(&self, id: &str) -> TemplateResult<Template> {
        self.templates
            .get(id)
            .filter(|t| t.is_active)
            .map(|t| t.clone())
            .ok_or_else(|| TemplateError::NotFound(id.to_string()))
    }

    /// List active templates, newest first
    pub fn list(&self, filter: &TemplateFilter) -> Vec<Template> {
        let mut templates: Vec<Template> = self
            .templates
            .iter()
            .map(|entry| entry.value().clone())
            .filter(|t| t.is_active)
            .filter(|t| match &filter.company_id {
                Some(company) => t.is_global || t.company_id.as_deref() == Some(company),
                None => true,
            })
            .filter(|t| filter.layout.map_or(true, |layout| t.layout == layout))
            .collect();

        templates.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        templates
    }

    /// Update an existing template
    pub fn update(&self, id: &str, updates: UpdateTemplateRequest) -> TemplateResult<Template> {
        // Held until the write so a concurrent delete cannot be undone
        let mut entry = self
            .templates
            .get_mut(id)
            .filter(|t| t.is_active)
            .ok_or_else(|| TemplateError::NotFound(id.to_string()))?;
        let mut template = entry.value().clone();

        if let Some(name) = updates.name {
            template.name = name;
        }

        if let Some(description) = updates.description {
            template.description = description;
        }

        if let Some(subject_line) = updates.subject_line {
            template.subject_line = subject_line;
        }

        if let Some(cta) = updates.cta {
            template.cta = cta;
        }

        if let Some(cta_link) = updates.cta_link {
            template.cta_link = cta_link;
        }

        if let Some(is_global) = updates.is_global {
            template.is_global = is_global;
        }

        let reload =
            updates.layout.is_some() || updates.sections.is_some() || updates.content.is_some();
        if reload {
            let layout = updates.layout.unwrap_or(template.layout);
            // New raw content replaces the previous sections unless sections are sent too
            let sections = match (updates.sections, &updates.content) {
                (Some(sections), _) => sections,
                (None, Some(_)) => Vec::new(),
                (None, None) => template.sections().to_vec(),
            };
            let raw = updates.content.or_else(|| template.content.to_raw());

            template.layout = layout;
            template.content = TemplateContent::load(layout, raw.as_ref(), &sections);
        }

        template.refresh_variables();
        template.updated_at = Utc::now();
        self.ensure_valid(&template)?;

        *entry = template.clone();

        Ok(template)
    }

    /// Deactivate a template; it disappears from reads but is kept
    pub fn delete(&self, id: &str) -> TemplateResult<()> {
        let mut entry = self
            .templates
            .get_mut(id)
            .filter(|t| t.is_active)
            .ok_or_else(|| TemplateError::NotFound(id.to_string()))?;

        entry.is_active = false;
        entry.updated_at = Utc::now();
        Ok(())
    }

    /// Copy a template under a fresh ID; copies are never global
    pub fn duplicate(&self, id: &str, created_by: Option<String>) -> TemplateResult<Template> {
        let source = self.get(id)?;
        let now = Utc::now();

        let copy = Template {
            id: format!("{}-{}", source.layout.as_str(), uuid::Uuid::new_v4().simple()),
            name: format!("{} (Copy)", source.name),
            is_global: false,
            is_active: true,
            created_by,
            created_at: now,
            updated_at: now,
            ..source
        };

        self.templates.insert(copy.id.clone(), copy.clone());
        Ok(copy)
    }

    /// Check if an active template exists
    pub fn exists(&self, id: &str) -> bool {
        self.templates.get(id).is_some_and(|t| t.is_active)
    }

    /// Get the number of active templates
    pub fn count(&self) -> usize {
        self.templates.iter().filter(|t| t.is_active).count()
    }

    /// Validate without storing
    pub fn validate(&self, template: &Template) -> ValidationReport {
        self.validator.validate(template)
    }

    /// Render a stored template for one recipient
    pub fn render(&self, id: &str, runtime: &RuntimeValues) -> TemplateResult<RenderedEmail> {
        let template = self.get(id)?;
        Ok(self.resolver.resolve(&template, runtime))
    }

    /// Render a stored template with the preview sample bag
    pub fn preview(&self, id: &str, overrides: &Variables) -> TemplateResult<TemplatePreview> {
        let template = self.get(id)?;
        let sample = sample_data(overrides);
        let rendered = self
            .resolver
            .resolve(&template, &RuntimeValues::with_personalization(sample.clone()));

        // Complete documents are sent verbatim but previewed filled in
        let content = match &template.content {
            TemplateContent::RawHtml(html) => substitute_variables(html, &sample),
            _ => rendered.html_body,
        };

        Ok(TemplatePreview {
            success: true,
            subject: rendered.subject_line,
            content,
            variables_used: template.variables,
            sample_data: sample,
        })
    }

    /// Load the starter templates, skipping any already present
    pub fn seed_builtin(&self) -> TemplateResult<usize> {
        let mut seeded = 0;
        for request in builtin_templates() {
            match self.create(request.into()) {
                Ok(_) => seeded += 1,
                Err(TemplateError::AlreadyExists(_)) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(seeded)
    }

    fn ensure_valid(&self, template: &Template) -> TemplateResult<()> {
        let report = self.validator.validate(template);
        if report.is_valid {
            return Ok(());
        }

        RenderMetrics::record_validation_failure();
        tracing::debug!(
            template_id = %template.id,
            errors = ?report.errors,
            "Template rejected by validation"
        );
        Err(TemplateError::Validation(report.errors))
    }
}

/// Create an Arc-wrapped template store
pub fn create_template_store() -> Arc<TemplateStore> {
    Arc::new(TemplateStore::new())
}
