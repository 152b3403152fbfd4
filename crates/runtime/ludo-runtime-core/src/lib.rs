//! Ludo Runtime Core (host-agnostic)
//!
//! A frame-driven scene/model/animation runtime: a window forwards host
//! callbacks to one active scene; the scene drives held-button dispatch,
//! attribute animations, and per-model updates; models store typed attributes
//! resolved through per-type coercion schemas. Rendering, audio, and asset
//! loading belong to the host.

pub mod animation;
pub mod commands;
pub mod config;
pub mod errors;
pub mod events;
pub mod interp;
pub mod model;
pub mod outputs;
pub mod registry;
pub mod scene;
pub mod view;
pub mod window;

// Re-exports for consumers (host adapters)
pub use animation::{AnimationInstance, AnimationSpec, Phase};
pub use commands::{SceneCommand, TransitionRequest};
pub use config::{Config, Features};
pub use errors::SceneError;
pub use events::{ButtonId, ButtonPhase, EventManager};
pub use interp::Easing;
pub use model::{AttributeSchema, GenericBehavior, Model, ModelBehavior, ModelSet};
pub use outputs::{Outputs, RuntimeEvent};
pub use registry::{ModelRegistry, ModelType};
pub use scene::{HandlerCtx, Scene, SceneDef, SceneRegistry};
pub use view::{parse_view_json, MapViewSource, NullViewSource, View, ViewEntry, ViewSource};
pub use window::{Canvas, Window};

pub use ludo_api_core::{Rgba, Scale, Value, ValueKind};
