//! Core configuration for ludo-runtime-core.

use serde::{Deserialize, Serialize};

/// Runtime sizing hints and feature flags.
/// Keep this minimal; expand as needed without breaking API.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Maximum runtime events retained per tick before further ones are dropped.
    pub max_events_per_tick: usize,

    /// Capacity hint for a scene's model list.
    pub initial_model_capacity: usize,

    pub features: Features,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Features {
    /// When set, a missing view, unknown model type, or animation whose
    /// target model is absent fails scene activation instead of degrading
    /// (empty view, generic model, skipped animation).
    pub strict_views: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_events_per_tick: 256,
            initial_model_capacity: 16,
            features: Features::default(),
        }
    }
}
