//! The window: single active-scene holder and host callback forwarder.
//!
//! Owns the registries and the view source, forwards update/draw/button
//! callbacks verbatim to the active scene (no scene means every callback is
//! a no-op), and executes a scene's transition request only after its update
//! returns. Replacing a scene abandons the previous one's per-instance state;
//! there is no teardown hook in this core.

use log::{debug, warn};

use crate::commands::TransitionRequest;
use crate::config::Config;
use crate::errors::SceneError;
use crate::events::ButtonId;
use crate::model::Model;
use crate::outputs::{Outputs, RuntimeEvent};
use crate::registry::ModelRegistry;
use crate::scene::{Scene, SceneRegistry};
use crate::view::ViewSource;

use ludo_api_core::Value;

/// Host rendering seam. The runtime decides draw order; the host issues the
/// primitive draw calls.
pub trait Canvas {
    fn draw_model(&mut self, model: &Model);
}

pub struct Window {
    cfg: Config,
    models: ModelRegistry,
    scenes: SceneRegistry,
    views: Box<dyn ViewSource>,
    scene: Option<Scene>,
    outputs: Outputs,
}

impl Window {
    pub fn new(
        cfg: Config,
        models: ModelRegistry,
        scenes: SceneRegistry,
        views: Box<dyn ViewSource>,
    ) -> Self {
        let outputs = Outputs::with_limit(cfg.max_events_per_tick);
        Self {
            cfg,
            models,
            scenes,
            views,
            scene: None,
            outputs,
        }
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn scene_mut(&mut self) -> Option<&mut Scene> {
        self.scene.as_mut()
    }

    /// Events accumulated since the last update began (includes activation
    /// events from `set_scene` calls made between frames).
    pub fn outputs(&self) -> &Outputs {
        &self.outputs
    }

    /// Activate the named scene with no options.
    pub fn set_scene(&mut self, name: &str) -> Result<(), SceneError> {
        self.set_scene_with(name, Vec::new())
    }

    /// Activate the named scene. On failure the prior scene (if any) stays
    /// active and keeps receiving frame callbacks; every failure, including
    /// an unregistered name, lands in outputs as `SceneActivationFailed`.
    pub fn set_scene_with(
        &mut self,
        name: &str,
        options: Vec<(String, Value)>,
    ) -> Result<(), SceneError> {
        let activated = match self.scenes.get(name) {
            Some(def) => Scene::activate(
                def,
                options,
                &self.models,
                self.views.as_ref(),
                &self.cfg,
                &mut self.outputs,
            ),
            None => Err(SceneError::NoSuchScene(name.to_string())),
        };
        match activated {
            Ok(scene) => {
                debug!("scene '{name}' activated");
                self.outputs.push(RuntimeEvent::SceneActivated {
                    scene: name.to_string(),
                });
                self.scene = Some(scene);
                Ok(())
            }
            Err(err) => {
                warn!("scene '{name}' failed to activate: {err}");
                self.outputs.push(RuntimeEvent::SceneActivationFailed {
                    scene: name.to_string(),
                    reason: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Host frame tick. Applies a transition requested during the scene's
    /// update after that update has fully returned, so no model is updated
    /// against a half-replaced scene; the following draw sees the new
    /// scene's models.
    pub fn update(&mut self, dt: f32) -> &Outputs {
        self.outputs.clear();
        let request: Option<TransitionRequest> = match self.scene.as_mut() {
            Some(scene) => scene.update(dt, &mut self.outputs),
            None => None,
        };
        if let Some(req) = request {
            let from = self
                .scene
                .as_ref()
                .map(|s| s.name().to_string())
                .unwrap_or_default();
            self.outputs.push(RuntimeEvent::TransitionRequested {
                from,
                to: req.scene.clone(),
            });
            // Failure retains the prior scene and is reported in outputs
            // as SceneActivationFailed by set_scene_with.
            let _ = self.set_scene_with(&req.scene, req.options);
        }
        &self.outputs
    }

    /// Host draw callback; no-op without an active scene.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        if let Some(scene) = &self.scene {
            scene.draw(canvas);
        }
    }

    pub fn button_down(&mut self, id: ButtonId) {
        if let Some(scene) = self.scene.as_mut() {
            scene.on_button_down(id);
        }
    }

    pub fn button_up(&mut self, id: ButtonId) {
        if let Some(scene) = self.scene.as_mut() {
            scene.on_button_up(id);
        }
    }

    /// Forward a notification to the active scene; no-op without one.
    pub fn notify(&mut self, event: &str, model: &str) {
        if let Some(scene) = self.scene.as_mut() {
            scene.notify(event, model);
        }
    }
}
