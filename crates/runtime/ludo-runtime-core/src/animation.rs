//! Declarative attribute animations.
//!
//! An `AnimationSpec` is the class-level declaration, shared across scene
//! activations via `Arc`. Execution state (phase, elapsed ticks, captured
//! start values) lives in `AnimationInstance`, one per active scene, never
//! shared. Completion runs exactly once; the commands it returns are queued
//! by the owning scene and applied after the full tick pass, so an animation
//! started from a completion begins ticking on the next frame.

use std::sync::Arc;

use log::warn;

use ludo_api_core::Value;

use crate::commands::SceneCommand;
use crate::interp::{lerp_value, Easing};
use crate::model::{normalize_key, ModelSet};
use crate::outputs::{Outputs, RuntimeEvent};
use crate::scene::HandlerCtx;

/// Completion hook; returns commands for the scene to queue.
pub type Completion = Arc<dyn Fn(&mut HandlerCtx) -> Vec<SceneCommand> + Send + Sync>;

pub struct AnimationSpec {
    /// Target model, resolved by name against the scene's models at start.
    pub target: String,
    /// Attribute name -> target value, applied concurrently.
    pub targets: Vec<(String, Value)>,
    /// Duration in ticks. Zero or negative completes on the first tick.
    pub duration: f32,
    pub easing: Easing,
    pub on_complete: Option<Completion>,
}

impl AnimationSpec {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            targets: Vec::new(),
            duration: 0.0,
            easing: Easing::default(),
            on_complete: None,
        }
    }

    pub fn attr(mut self, key: impl Into<String>, value: Value) -> Self {
        self.targets.push((normalize_key(&key.into()), value));
        self
    }

    pub fn duration(mut self, ticks: f32) -> Self {
        self.duration = ticks;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn on_complete(
        mut self,
        hook: impl Fn(&mut HandlerCtx) -> Vec<SceneCommand> + Send + Sync + 'static,
    ) -> Self {
        self.on_complete = Some(Arc::new(hook));
        self
    }
}

impl core::fmt::Debug for AnimationSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AnimationSpec")
            .field("target", &self.target)
            .field("targets", &self.targets)
            .field("duration", &self.duration)
            .field("easing", &self.easing)
            .field("on_complete", &self.on_complete.as_ref().map(|_| "<hook>"))
            .finish()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Phase {
    Pending,
    Running { elapsed: f32 },
    Completed,
}

/// Per-scene execution state for one declared animation.
#[derive(Debug)]
pub struct AnimationInstance {
    spec: Arc<AnimationSpec>,
    phase: Phase,
    /// Start values captured at start(), parallel to spec.targets.
    starts: Vec<Value>,
}

impl AnimationInstance {
    pub fn new(spec: Arc<AnimationSpec>) -> Self {
        Self {
            spec,
            phase: Phase::Pending,
            starts: Vec::new(),
        }
    }

    pub fn spec(&self) -> &AnimationSpec {
        &self.spec
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.phase, Phase::Completed)
    }

    /// Pending -> Running: capture the starting value of every targeted
    /// attribute. An attribute the model has not loaded starts at the target
    /// (snaps). A target model missing from the scene completes the
    /// animation immediately without running its hook.
    pub fn start(&mut self, models: &ModelSet) {
        if !matches!(self.phase, Phase::Pending) {
            return;
        }
        let Some(model) = models.get(&self.spec.target) else {
            warn!(
                "animation target '{}' not found in scene; skipping",
                self.spec.target
            );
            self.phase = Phase::Completed;
            return;
        };
        self.starts = self
            .spec
            .targets
            .iter()
            .map(|(attr, target)| model.get(attr).cloned().unwrap_or_else(|| target.clone()))
            .collect();
        self.phase = Phase::Running { elapsed: 0.0 };
    }

    /// Advance by `dt` ticks while running. Interpolated values are written
    /// straight onto the target model; completion transitions Running ->
    /// Completed exactly once. Re-ticking after completion is a no-op, and
    /// the final value depends only on total elapsed time, not on tick
    /// granularity.
    pub fn tick(
        &mut self,
        dt: f32,
        models: &mut ModelSet,
        commands: &mut Vec<SceneCommand>,
        outputs: &mut Outputs,
    ) {
        let elapsed = match self.phase {
            Phase::Running { elapsed } => elapsed + dt,
            _ => return,
        };
        self.phase = Phase::Running { elapsed };

        let fraction = if self.spec.duration <= 0.0 {
            1.0
        } else {
            (elapsed / self.spec.duration).clamp(0.0, 1.0)
        };
        let eased = self.spec.easing.apply(fraction);

        if let Some(model) = models.get_mut(&self.spec.target) {
            for ((attr, target), start) in self.spec.targets.iter().zip(&self.starts) {
                model.set_value(attr, lerp_value(start, target, eased));
            }
        }

        if fraction >= 1.0 {
            self.phase = Phase::Completed;
            outputs.push(RuntimeEvent::AnimationCompleted {
                model: self.spec.target.clone(),
            });
            if let Some(hook) = &self.spec.on_complete {
                let mut ctx = HandlerCtx { models };
                commands.extend(hook(&mut ctx));
            }
        }
    }
}
