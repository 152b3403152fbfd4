//! Per-axis scale factors with the `"x,y"` text form accepted by views.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid scale literal: '{text}' (expected \"x,y\")")]
pub struct ParseScaleError {
    pub text: String,
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Scale {
    pub x_factor: f32,
    pub y_factor: f32,
}

impl Scale {
    pub fn new(x_factor: f32, y_factor: f32) -> Self {
        Self { x_factor, y_factor }
    }
}

impl Default for Scale {
    fn default() -> Self {
        Scale::new(1.0, 1.0)
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x_factor, self.y_factor)
    }
}

impl FromStr for Scale {
    type Err = ParseScaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseScaleError {
            text: s.to_string(),
        };
        let (x, y) = s.trim().split_once(',').ok_or_else(err)?;
        Ok(Scale::new(
            x.trim().parse::<f32>().map_err(|_| err())?,
            y.trim().parse::<f32>().map_err(|_| err())?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_components_as_floats() {
        assert_eq!("2.0,3.5".parse::<Scale>().unwrap(), Scale::new(2.0, 3.5));
        assert_eq!(" 1 , 2 ".parse::<Scale>().unwrap(), Scale::new(1.0, 2.0));
    }

    #[test]
    fn default_is_unit() {
        assert_eq!(Scale::default(), Scale::new(1.0, 1.0));
    }

    #[test]
    fn missing_component_is_rejected() {
        assert!("2.0".parse::<Scale>().is_err());
        assert!("a,b".parse::<Scale>().is_err());
    }
}
