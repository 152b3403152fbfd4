//! RGBA color with the canonical `rgba(r,g,b,a)` text form used by export.
//!
//! Channels are 0-255 (kept as f32 so the animation engine can lerp them),
//! alpha is 0.0-1.0. The textual form prints channels as rounded integers and
//! alpha as a float; an integral alpha prints without a decimal point
//! (`rgba(255,0,0,1)`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid rgba literal: '{text}'")]
pub struct ParseColorError {
    pub text: String,
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque white.
    pub const WHITE: Rgba = Rgba {
        r: 255.0,
        g: 255.0,
        b: 255.0,
        a: 1.0,
    };
}

impl Default for Rgba {
    fn default() -> Self {
        Rgba::WHITE
    }
}

fn fmt_alpha(a: f32) -> String {
    if a.fract() == 0.0 {
        format!("{}", a as i32)
    } else {
        format!("{a}")
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({},{},{},{})",
            self.r.round() as i64,
            self.g.round() as i64,
            self.b.round() as i64,
            fmt_alpha(self.a)
        )
    }
}

impl FromStr for Rgba {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError {
            text: s.to_string(),
        };
        let inner = s
            .trim()
            .strip_prefix("rgba(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(err)?;
        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(err());
        }
        let mut nums = [0.0f32; 4];
        for (slot, part) in nums.iter_mut().zip(&parts) {
            *slot = part.parse::<f32>().map_err(|_| err())?;
        }
        Ok(Rgba::new(nums[0], nums[1], nums[2], nums[3]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_text_round_trips() {
        let c = Rgba::new(255.0, 128.0, 0.0, 0.5);
        let text = c.to_string();
        assert_eq!(text, "rgba(255,128,0,0.5)");
        assert_eq!(text.parse::<Rgba>().unwrap(), c);
    }

    #[test]
    fn integral_alpha_prints_without_point() {
        assert_eq!(Rgba::WHITE.to_string(), "rgba(255,255,255,1)");
    }

    #[test]
    fn garbage_is_rejected() {
        assert!("rgb(1,2,3)".parse::<Rgba>().is_err());
        assert!("rgba(1,2,3)".parse::<Rgba>().is_err());
        assert!("rgba(1,2,3,x)".parse::<Rgba>().is_err());
    }
}
