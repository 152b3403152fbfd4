//! Per-tick runtime events surfaced to the host.
//!
//! Cleared at the top of every window update; recovered fallbacks and
//! lifecycle changes land here so hosts can observe them without the runtime
//! taking a rendering or logging dependency beyond the `log` facade.

use serde::{Deserialize, Serialize};

/// Discrete semantic signals emitted while stepping.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[non_exhaustive]
pub enum RuntimeEvent {
    SceneActivated {
        scene: String,
    },
    SceneActivationFailed {
        scene: String,
        reason: String,
    },
    TransitionRequested {
        from: String,
        to: String,
    },
    AnimationCompleted {
        model: String,
    },
    /// A view failed to resolve and the empty view was substituted.
    ViewFallback {
        view: String,
    },
    /// A model type failed to resolve and the generic type was substituted.
    ModelTypeFallback {
        requested: String,
    },
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub events: Vec<RuntimeEvent>,
    #[serde(skip)]
    limit: usize,
}

impl Outputs {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            events: Vec::new(),
            limit,
        }
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Append an event; silently dropped past the per-tick limit.
    pub fn push(&mut self, event: RuntimeEvent) {
        if self.limit == 0 || self.events.len() < self.limit {
            self.events.push(event);
        }
    }
}
