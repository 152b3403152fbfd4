//! Value: runtime attribute values stored on models.
//! All numeric components use f32.

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::scale::Scale;

/// Coarse kind enum for rule dispatch and quick pattern matching.
/// Coercion rules are keyed by the raw input's kind (see coercion.rs).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Float,
    Bool,
    Text,
    Color,
    Scale,
}

impl ValueKind {
    /// Closed set of kinds, in declaration order.
    pub const ALL: [ValueKind; 5] = [
        ValueKind::Float,
        ValueKind::Bool,
        ValueKind::Text,
        ValueKind::Color,
        ValueKind::Scale,
    ];
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum Value {
    /// Scalar float
    Float(f32),

    /// Boolean (step-only for interpolation)
    Bool(bool),

    /// Text / string; step-only for interpolation
    Text(String),

    /// RGBA color (channels 0-255, alpha 0.0-1.0)
    Color(Rgba),

    /// Per-axis scale factors
    Scale(Scale),
}

impl Value {
    /// Return the coarse kind of this value.
    #[inline]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Float(_) => ValueKind::Float,
            Value::Bool(_) => ValueKind::Bool,
            Value::Text(_) => ValueKind::Text,
            Value::Color(_) => ValueKind::Color,
            Value::Scale(_) => ValueKind::Scale,
        }
    }

    /// Convenience constructors
    pub fn f(v: f32) -> Self {
        Value::Float(v)
    }

    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    pub fn color(r: f32, g: f32, b: f32, a: f32) -> Self {
        Value::Color(Rgba::new(r, g, b, a))
    }

    pub fn scale(x_factor: f32, y_factor: f32) -> Self {
        Value::Scale(Scale::new(x_factor, y_factor))
    }

    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric component view used for component-wise interpolation.
    /// `Bool` and `Text` declare no components and interpolate step-wise.
    pub fn components(&self) -> Option<Vec<f32>> {
        match self {
            Value::Float(f) => Some(vec![*f]),
            Value::Color(c) => Some(vec![c.r, c.g, c.b, c.a]),
            Value::Scale(s) => Some(vec![s.x_factor, s.y_factor]),
            Value::Bool(_) | Value::Text(_) => None,
        }
    }

    /// Rebuild a value of `kind` from interpolated components.
    /// Returns None for step-only kinds or a component-count mismatch.
    pub fn from_components(kind: ValueKind, parts: &[f32]) -> Option<Value> {
        match (kind, parts) {
            (ValueKind::Float, [f]) => Some(Value::Float(*f)),
            (ValueKind::Color, [r, g, b, a]) => Some(Value::Color(Rgba::new(*r, *g, *b, *a))),
            (ValueKind::Scale, [x, y]) => Some(Value::Scale(Scale::new(*x, *y))),
            _ => None,
        }
    }
}
