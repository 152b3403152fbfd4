//! Interpolation helpers: component-wise lerp plus easing curves.
//! Easing maps the clamped elapsed fraction; every curve is exact at the
//! endpoints so a completed animation lands on the declared target.

use serde::{Deserialize, Serialize};

use ludo_api_core::Value;

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Map a clamped fraction in [0,1]; apply(0) == 0 and apply(1) == 1.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            // smoothstep
            Easing::EaseInOut => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// Interpolate between two values of the same kind.
/// Component-declaring kinds (Float, Color, Scale) lerp component-wise;
/// everything else snaps to the target once the fraction reaches 1.
pub fn lerp_value(start: &Value, target: &Value, t: f32) -> Value {
    if t >= 1.0 {
        return target.clone();
    }
    if start.kind() == target.kind() {
        if let (Some(a), Some(b)) = (start.components(), target.components()) {
            let parts: Vec<f32> = a
                .iter()
                .zip(b.iter())
                .map(|(x, y)| lerp_f32(*x, *y, t))
                .collect();
            if let Some(v) = Value::from_components(start.kind(), &parts) {
                return v;
            }
        }
    }
    start.clone()
}
