//! Screen catalog and visibility toggles for the admin console navigation.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::store::PreferenceStore;

/// Preference key the visibility map is stored under
pub const SCREEN_VISIBILITY_KEY: &str = "soar-ai-screen-visibility";

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("Unknown screen: {0}")]
    UnknownScreen(String),

    #[error("Screen cannot be disabled: {0}")]
    Locked(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type PreferenceResult<T> = Result<T, PreferenceError>;

/// Screen id -> visible
pub type VisibilityState = BTreeMap<String, bool>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenKind {
    Single,
    Group,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Screen {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ScreenKind,
    pub category: String,
    pub default_enabled: bool,
    pub can_disable: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Screen>,
}

impl Screen {
    pub fn single(
        id: &str,
        name: &str,
        description: &str,
        category: &str,
        can_disable: bool,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            kind: ScreenKind::Single,
            category: category.to_string(),
            default_enabled: true,
            can_disable,
            children: Vec::new(),
        }
    }

    pub fn group(
        id: &str,
        name: &str,
        description: &str,
        category: &str,
        children: Vec<Screen>,
    ) -> Self {
        Self {
            kind: ScreenKind::Group,
            children,
            ..Self::single(id, name, description, category, true)
        }
    }

    fn descendants(&self) -> impl Iterator<Item = &Screen> {
        let mut stack: Vec<&Screen> = self.children.iter().collect();
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(next.children.iter());
            Some(next)
        })
    }
}

/// The screens the console can show
#[derive(Debug, Clone)]
pub struct ScreenCatalog {
    screens: Vec<Screen>,
}

impl Default for ScreenCatalog {
    fn default() -> Self {
        Self::new(vec![
            Screen::single(
                "dashboard",
                "Dashboard",
                "System overview and key metrics",
                "Core",
                false,
            ),
            Screen::single(
                "coinhub",
                "COINHUB",
                "Corporate Intelligent Hub - Main vendor management module",
                "Primary Module",
                true,
            ),
            Screen::single(
                "contraq",
                "CONTRAQ",
                "Corporate Oversight for Negotiated Tracking, Renewals, Analytics & Quality",
                "Primary Module",
                true,
            ),
            Screen::single(
                "convoy",
                "CONVOY",
                "CONnecting Voices Of Your passengers - Customer Support System",
                "Primary Module",
                true,
            ),
            Screen::single(
                "offer-management",
                "Offer Management",
                "Comprehensive offer and order management system for airlines",
                "Primary Module",
                true,
            ),
            Screen::single(
                "settings",
                "Settings",
                "System administration and configuration",
                "Administration",
                false,
            ),
            Screen::single(
                "cocast",
                "COCAST",
                "Corporate Cost Analytics and Spending Trends",
                "Primary Module",
                true,
            ),
        ])
    }
}

impl ScreenCatalog {
    pub fn new(screens: Vec<Screen>) -> Self {
        Self { screens }
    }

    pub fn screens(&self) -> &[Screen] {
        &self.screens
    }

    /// Every screen, parents before their children
    pub fn iter(&self) -> impl Iterator<Item = &Screen> {
        self.screens
            .iter()
            .flat_map(|s| std::iter::once(s).chain(s.descendants()))
    }

    pub fn find(&self, id: &str) -> Option<&Screen> {
        self.iter().find(|s| s.id == id)
    }

    pub fn defaults(&self) -> VisibilityState {
        self.iter()
            .map(|s| (s.id.clone(), s.default_enabled))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VisibilitySnapshot {
    pub screens: Vec<Screen>,
    pub visibility: VisibilityState,
    pub enabled_count: usize,
    pub total_count: usize,
}

/// Reads and mutates screen visibility; every change is persisted
pub struct ScreenVisibilityService {
    catalog: ScreenCatalog,
    store: Arc<dyn PreferenceStore>,
    write_lock: Mutex<()>,
}

impl ScreenVisibilityService {
    pub fn new(catalog: ScreenCatalog, store: Arc<dyn PreferenceStore>) -> Self {
        Self {
            catalog,
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub fn catalog(&self) -> &ScreenCatalog {
        &self.catalog
    }

    /// Current visibility; catalog defaults fill anything not stored
    pub fn load(&self) -> VisibilityState {
        let mut state = self.catalog.defaults();

        let Some(raw) = self.store.get(SCREEN_VISIBILITY_KEY) else {
            return state;
        };

        match serde_json::from_str::<VisibilityState>(&raw) {
            Ok(stored) => {
                for (id, enabled) in stored {
                    if let Some(screen) = self.catalog.find(&id) {
                        state.insert(id, enabled || !screen.can_disable);
                    }
                }
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Stored screen visibility is unreadable, using defaults"
                );
            }
        }

        state
    }

    /// Show or hide one screen; hiding a group hides its children too
    pub fn toggle(&self, id: &str, enabled: bool) -> PreferenceResult<VisibilityState> {
        let screen = self
            .catalog
            .find(id)
            .ok_or_else(|| PreferenceError::UnknownScreen(id.to_string()))?;

        if !enabled && !screen.can_disable {
            return Err(PreferenceError::Locked(id.to_string()));
        }

        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut state = self.load();
        state.insert(screen.id.clone(), enabled);
        if !enabled {
            for child in screen.descendants() {
                state.insert(child.id.clone(), false);
            }
        }

        self.persist(&state)?;
        tracing::info!(screen_id = %id, enabled, "Screen visibility changed");
        Ok(state)
    }

    /// Set every screen that can be disabled; locked screens are untouched
    pub fn bulk_toggle(&self, enabled: bool) -> PreferenceResult<VisibilityState> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut state = self.load();
        for screen in self.catalog.iter().filter(|s| s.can_disable) {
            state.insert(screen.id.clone(), enabled);
        }

        self.persist(&state)?;
        Ok(state)
    }

    pub fn reset(&self) -> PreferenceResult<VisibilityState> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let state = self.catalog.defaults();
        self.persist(&state)?;
        Ok(state)
    }

    pub fn enabled_count(&self) -> usize {
        self.load().values().filter(|enabled| **enabled).count()
    }

    pub fn total_count(&self) -> usize {
        self.catalog.iter().count()
    }

    pub fn snapshot(&self) -> VisibilitySnapshot {
        let visibility = self.load();
        VisibilitySnapshot {
            screens: self.catalog.screens().to_vec(),
            enabled_count: visibility.values().filter(|enabled| **enabled).count(),
            total_count: visibility.len(),
            visibility,
        }
    }

    fn persist(&self, state: &VisibilityState) -> PreferenceResult<()> {
        let raw = serde_json::to_string(state)?;
        self.store.set(SCREEN_VISIBILITY_KEY, raw);
        Ok(())
    }
}
