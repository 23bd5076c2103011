//! Domain layer modules
//!
//! This module contains business domain logic:
//! - `template`: Email templates, rendering and validation
//! - `campaign`: Per-recipient content resolution
//! - `preferences`: Console screen visibility

pub mod campaign;
pub mod preferences;
pub mod template;
