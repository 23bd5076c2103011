//! Console preferences.
//!
//! Screen visibility is held by an explicit `ScreenVisibilityService` and
//! persisted through a `PreferenceStore` port.

mod screens;
mod store;

pub use screens::{
    PreferenceError, PreferenceResult, Screen, ScreenCatalog, ScreenKind, ScreenVisibilityService,
    VisibilitySnapshot, VisibilityState, SCREEN_VISIBILITY_KEY,
};
pub use store::{MemoryPreferenceStore, PreferenceStore};
