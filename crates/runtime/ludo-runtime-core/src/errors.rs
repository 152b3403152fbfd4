//! Error taxonomy for scene construction and activation.
//!
//! `MissingView`, `UnknownModelType`, and `UnknownTargetModel` are
//! recoverable by default (empty view, generic model, skipped animation)
//! and only surface as errors under `Features::strict_views`. Coercion failures surface when the failing
//! property is mandatory for its model type. An unregistered handler is not
//! an error anywhere in the runtime; dispatch is a silent no-op.

use ludo_api_core::CoercionError;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SceneError {
    #[error("view not found: {0}")]
    MissingView(String),

    #[error("view parse error: {0}")]
    ViewParse(String),

    #[error("unknown model type: {0}")]
    UnknownModelType(String),

    #[error("no scene registered under '{0}'")]
    NoSuchScene(String),

    #[error("animation targets unknown model '{target}'")]
    UnknownTargetModel { target: String },

    #[error(transparent)]
    Coercion(#[from] CoercionError),
}
