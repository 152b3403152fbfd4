//! Scenes: one screen/state of the application.
//!
//! `SceneDef` is the class-level declaration (view name, animations in
//! declaration order, handler registrations), shared across activations via
//! `Arc`. `Scene` is one activation: its models, event manager, animation
//! instances, and pending command queue are per-instance and discarded on
//! replacement.
//!
//! Frame order is fixed: held-button dispatch, then animation ticks, then
//! model updates, then deferred command application. A transition requested
//! anywhere in the pass takes effect only after the pass completes.

use std::sync::Arc;

use hashbrown::HashMap;
use log::warn;

use ludo_api_core::Value;

use crate::animation::{AnimationInstance, AnimationSpec};
use crate::commands::{SceneCommand, TransitionRequest};
use crate::config::Config;
use crate::errors::SceneError;
use crate::events::{ButtonId, ButtonPhase, EventManager};
use crate::model::{Model, ModelSet};
use crate::outputs::{Outputs, RuntimeEvent};
use crate::registry::ModelRegistry;
use crate::view::{View, ViewSource};
use crate::window::Canvas;

/// Mutable scene state handed to handlers and completion hooks.
pub struct HandlerCtx<'a> {
    pub models: &'a mut ModelSet,
}

pub type Handler = Arc<dyn Fn(&mut HandlerCtx) -> Vec<SceneCommand> + Send + Sync>;
pub type NotifyHandler = Arc<dyn Fn(&mut Model) -> Vec<SceneCommand> + Send + Sync>;

/// Class-level scene declaration. Shared, immutable after registration.
pub struct SceneDef {
    name: String,
    view: String,
    animations: Vec<Arc<AnimationSpec>>,
    buttons: Vec<((ButtonId, ButtonPhase), Handler)>,
    notifications: Vec<((String, String), NotifyHandler)>,
}

impl SceneDef {
    /// The view name defaults to the scene name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            view: name.clone(),
            name,
            animations: Vec::new(),
            buttons: Vec::new(),
            notifications: Vec::new(),
        }
    }

    pub fn with_view(mut self, view: impl Into<String>) -> Self {
        self.view = view.into();
        self
    }

    /// Declare an animation; declaration order is start order.
    pub fn animation(mut self, spec: AnimationSpec) -> Self {
        self.animations.push(Arc::new(spec));
        self
    }

    pub fn on_button(
        mut self,
        id: ButtonId,
        phase: ButtonPhase,
        hook: impl Fn(&mut HandlerCtx) -> Vec<SceneCommand> + Send + Sync + 'static,
    ) -> Self {
        self.buttons.push(((id, phase), Arc::new(hook)));
        self
    }

    pub fn on_notify(
        mut self,
        model: impl Into<String>,
        event: impl Into<String>,
        hook: impl Fn(&mut Model) -> Vec<SceneCommand> + Send + Sync + 'static,
    ) -> Self {
        self.notifications
            .push(((model.into(), event.into()), Arc::new(hook)));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn view_name(&self) -> &str {
        &self.view
    }
}

/// Explicit scene registry, populated before the first activation.
#[derive(Default)]
pub struct SceneRegistry {
    defs: HashMap<String, Arc<SceneDef>>,
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, def: SceneDef) {
        self.defs.insert(def.name.clone(), Arc::new(def));
    }

    pub fn get(&self, name: &str) -> Option<Arc<SceneDef>> {
        self.defs.get(name).cloned()
    }
}

/// One activation of a scene class.
pub struct Scene {
    def: Arc<SceneDef>,
    options: Vec<(String, Value)>,
    models: ModelSet,
    events: EventManager,
    animations: Vec<AnimationInstance>,
    buttons: HashMap<(ButtonId, ButtonPhase), Handler>,
    notifications: HashMap<(String, String), NotifyHandler>,
    pending: Vec<SceneCommand>,
}

impl Scene {
    /// Build a scene from its declaration: resolve the view (empty-view
    /// fallback unless strict), instantiate models in view order (generic
    /// fallback for unknown types unless strict), start every declared
    /// animation, and bind handlers. Any error here leaves the previous
    /// scene in place; a partially initialized scene never receives frame
    /// callbacks.
    pub(crate) fn activate(
        def: Arc<SceneDef>,
        options: Vec<(String, Value)>,
        registry: &ModelRegistry,
        views: &dyn ViewSource,
        cfg: &Config,
        outputs: &mut Outputs,
    ) -> Result<Self, SceneError> {
        let view = match views.resolve(&def.view) {
            Some(v) => v,
            None if cfg.features.strict_views => {
                return Err(SceneError::MissingView(def.view.clone()))
            }
            None => {
                warn!("view '{}' not found; using empty view", def.view);
                outputs.push(RuntimeEvent::ViewFallback {
                    view: def.view.clone(),
                });
                View::empty()
            }
        };

        let mut models = ModelSet::with_capacity(cfg.initial_model_capacity.max(view.entries.len()));
        for entry in &view.entries {
            let (ty, fell_back) = registry.resolve(&entry.model_type);
            if fell_back {
                if cfg.features.strict_views {
                    return Err(SceneError::UnknownModelType(entry.model_type.clone()));
                }
                warn!(
                    "unknown model type '{}'; using generic model",
                    entry.model_type
                );
                outputs.push(RuntimeEvent::ModelTypeFallback {
                    requested: entry.model_type.clone(),
                });
            }
            let mut model = ty.instantiate();
            model.load(&entry.attributes)?;
            models.push(model);
        }

        let mut animations: Vec<AnimationInstance> = def
            .animations
            .iter()
            .map(|spec| AnimationInstance::new(spec.clone()))
            .collect();
        for anim in &mut animations {
            if cfg.features.strict_views && models.get(&anim.spec().target).is_none() {
                return Err(SceneError::UnknownTargetModel {
                    target: anim.spec().target.clone(),
                });
            }
            anim.start(&models);
        }

        let buttons = def.buttons.iter().cloned().collect();
        let notifications = def.notifications.iter().cloned().collect();

        Ok(Self {
            def,
            options,
            models,
            events: EventManager::new(),
            animations,
            buttons,
            notifications,
            pending: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.def.name
    }

    /// Options carried by the transition that activated this scene.
    pub fn options(&self) -> &[(String, Value)] {
        &self.options
    }

    pub fn models(&self) -> &ModelSet {
        &self.models
    }

    pub fn models_mut(&mut self) -> &mut ModelSet {
        &mut self.models
    }

    pub fn event_manager(&self) -> &EventManager {
        &self.events
    }

    pub fn animations(&self) -> &[AnimationInstance] {
        &self.animations
    }

    /// Host press callback: track the hold and fire the one-shot Pressed
    /// handler. Commands queue until the next update boundary.
    pub fn on_button_down(&mut self, id: ButtonId) {
        self.events.button_down(id);
        self.dispatch_button(id, ButtonPhase::Pressed);
    }

    /// Host release callback; a release without a prior press is a no-op.
    pub fn on_button_up(&mut self, id: ButtonId) {
        self.events.button_up(id);
        self.dispatch_button(id, ButtonPhase::Released);
    }

    fn dispatch_button(&mut self, id: ButtonId, phase: ButtonPhase) {
        if let Some(hook) = self.buttons.get(&(id, phase)).cloned() {
            let mut ctx = HandlerCtx {
                models: &mut self.models,
            };
            let commands = hook(&mut ctx);
            self.pending.extend(commands);
        }
    }

    /// Dispatch Held for every currently-held button, in ascending id order.
    pub fn trigger_held_buttons(&mut self) {
        for id in self.events.held_buttons() {
            self.dispatch_button(id, ButtonPhase::Held);
        }
    }

    /// Dispatch a notification to the handler registered for (model, event);
    /// absent handler or absent model is a silent no-op.
    pub fn notify(&mut self, event: &str, model: &str) {
        let key = (model.to_string(), event.to_string());
        if let Some(hook) = self.notifications.get(&key).cloned() {
            if let Some(m) = self.models.get_mut(model) {
                let commands = hook(m);
                self.pending.extend(commands);
            }
        }
    }

    /// One frame: held dispatch, animation ticks, model updates, then the
    /// deferred command queue. A requested transition is returned to the
    /// window rather than applied here.
    pub fn update(&mut self, dt: f32, outputs: &mut Outputs) -> Option<TransitionRequest> {
        self.trigger_held_buttons();

        let mut commands = Vec::new();
        for anim in &mut self.animations {
            anim.tick(dt, &mut self.models, &mut commands, outputs);
        }
        self.pending.extend(commands);

        let mut model_commands = Vec::new();
        for model in self.models.iter_mut() {
            let behavior = model.behavior();
            model_commands.extend(behavior.update(model, dt));
        }
        self.pending.extend(model_commands);

        self.apply_pending()
    }

    /// Apply the queued commands from this pass. Commands produced while
    /// applying (e.g. by a notification handler) wait for the next frame.
    /// The last transition request in the queue wins.
    fn apply_pending(&mut self) -> Option<TransitionRequest> {
        let commands = std::mem::take(&mut self.pending);
        let mut transition = None;
        for command in commands {
            match command {
                SceneCommand::Transition(req) => transition = Some(req),
                SceneCommand::StartAnimation(spec) => {
                    let mut inst = AnimationInstance::new(spec);
                    inst.start(&self.models);
                    self.animations.push(inst);
                }
                SceneCommand::SetAttribute { model, key, value } => {
                    if let Some(m) = self.models.get_mut(&model) {
                        m.set_value(&key, value);
                    }
                }
                SceneCommand::Notify { event, model } => self.notify(&event, &model),
            }
        }
        transition
    }

    /// Draw every model in view/insertion order; later models occlude
    /// earlier ones, so ordering is part of the contract.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        for model in self.models.iter() {
            model.behavior().draw(model, canvas);
        }
    }
}
