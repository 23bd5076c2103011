use std::sync::Arc;
use std::time::Instant;

use crate::config::Settings;
use crate::domain::campaign::CampaignContentResolver;
use crate::domain::preferences::{
    MemoryPreferenceStore, PreferenceStore, ScreenCatalog, ScreenVisibilityService,
};
use crate::domain::template::{
    StandardLayoutRenderer, TemplateResult, TemplateStore, TemplateValidator,
};

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub template_store: Arc<TemplateStore>,
    pub screens: Arc<ScreenVisibilityService>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(settings: Settings) -> TemplateResult<Self> {
        Self::with_preference_store(settings, Arc::new(MemoryPreferenceStore::new()))
    }

    pub fn with_preference_store(
        settings: Settings,
        preferences: Arc<dyn PreferenceStore>,
    ) -> TemplateResult<Self> {
        let validator = TemplateValidator::new(settings.validation.strictness);
        let resolver = CampaignContentResolver::new(StandardLayoutRenderer::with_policy(
            settings.rendering.empty_value_policy,
        ));
        let template_store = Arc::new(TemplateStore::with_options(validator, resolver));

        if settings.templates.seed_builtin {
            let seeded = template_store.seed_builtin()?;
            tracing::info!(count = seeded, "Built-in templates loaded");
        }

        let screens = Arc::new(ScreenVisibilityService::new(
            ScreenCatalog::default(),
            preferences,
        ));

        Ok(Self {
            settings: Arc::new(settings),
            template_store,
            screens,
            start_time: Instant::now(),
        })
    }
}
