//! Campaign content resolution.
//!
//! Turns a selected template plus runtime values (lead personalization and
//! campaign-level overrides) into the subject and HTML body handed to the
//! outbound transport or a preview surface.

mod resolver;

pub use resolver::{
    CampaignContentResolver, RenderedEmail, RuntimeValues, DEFAULT_CTA, DEFAULT_CTA_LINK,
};
