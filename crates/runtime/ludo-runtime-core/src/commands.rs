//! Commands returned by handlers and animation completions.
//!
//! Handlers never mutate scene topology directly; they return command values
//! which the owning scene queues and applies only after the current update
//! pass fully completes. Commands produced while applying commands are held
//! for the next frame.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use ludo_api_core::Value;

use crate::animation::AnimationSpec;

/// Deferred request to replace the active scene, executed by the window at
/// the update boundary.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct TransitionRequest {
    pub scene: String,
    /// Free-form options handed to the next scene's activation.
    #[serde(default)]
    pub options: Vec<(String, Value)>,
}

impl TransitionRequest {
    pub fn to(scene: impl Into<String>) -> Self {
        Self {
            scene: scene.into(),
            options: Vec::new(),
        }
    }

    pub fn option(mut self, key: impl Into<String>, value: Value) -> Self {
        self.options.push((key.into(), value));
        self
    }
}

#[derive(Clone)]
pub enum SceneCommand {
    /// Replace the active scene after this frame's updates complete.
    Transition(TransitionRequest),

    /// Start an animation; it begins ticking on the next frame.
    StartAnimation(Arc<AnimationSpec>),

    /// Write one attribute on the named model.
    SetAttribute {
        model: String,
        key: String,
        value: Value,
    },

    /// Dispatch a notification to the named model's handler next frame.
    Notify { event: String, model: String },
}

impl core::fmt::Debug for SceneCommand {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SceneCommand::Transition(req) => f.debug_tuple("Transition").field(req).finish(),
            SceneCommand::StartAnimation(spec) => {
                f.debug_tuple("StartAnimation").field(&spec.target).finish()
            }
            SceneCommand::SetAttribute { model, key, value } => f
                .debug_struct("SetAttribute")
                .field("model", model)
                .field("key", key)
                .field("value", value)
                .finish(),
            SceneCommand::Notify { event, model } => f
                .debug_struct("Notify")
                .field("event", event)
                .field("model", model)
                .finish(),
        }
    }
}
