//! Typed property coercion: how raw view input becomes a stored value.
//!
//! A `PropertyDef` carries an ordered list of `(kind, transform)` rules plus an
//! optional default. Resolution tests rules in declaration order against the
//! raw input's runtime kind; the first match wins. An absent input, or an
//! input whose kind matches no rule, falls back to the default. With no
//! default declared, resolution fails with a `CoercionError` naming the
//! unmatched kind rather than producing a null value.

use std::str::FromStr;

use thiserror::Error;

use crate::color::Rgba;
use crate::scale::Scale;
use crate::value::{Value, ValueKind};

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum CoercionError {
    #[error("property '{property}': no coercion rule matches input kind {kind:?} and no default is declared")]
    NoMatchingRule { property: String, kind: ValueKind },

    #[error("property '{property}': input is absent and no default is declared")]
    MissingInput { property: String },

    #[error("property '{property}': invalid {kind:?} literal '{text}'")]
    InvalidLiteral {
        property: String,
        kind: ValueKind,
        text: String,
    },
}

/// Transform applied when a rule matches. Receives the property name for
/// error context and the raw input value.
pub type CoerceFn = fn(&str, &Value) -> Result<Value, CoercionError>;

/// One `(kind, transform)` pair in a property's ordered rule list.
#[derive(Copy, Clone, Debug)]
pub struct CoercionRule {
    pub kind: ValueKind,
    pub apply: CoerceFn,
}

/// A typed property definition: derived sub-property names, ordered coercion
/// rules, and an optional default value (the catch-all rule).
#[derive(Clone, Debug)]
pub struct PropertyDef {
    name: String,
    components: Vec<String>,
    rules: Vec<CoercionRule>,
    default: Option<Value>,
}

impl PropertyDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            components: Vec::new(),
            rules: Vec::new(),
            default: None,
        }
    }

    /// Declare derived sub-property names owned by this property
    /// (e.g. scale owns `x_factor` and `y_factor`).
    pub fn with_components(mut self, names: &[&str]) -> Self {
        self.components = names.iter().map(|n| (*n).to_string()).collect();
        self
    }

    /// Append a rule; declaration order is evaluation order.
    pub fn rule(mut self, kind: ValueKind, apply: CoerceFn) -> Self {
        self.rules.push(CoercionRule { kind, apply });
        self
    }

    /// Declare the default value constructed by the catch-all rule.
    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn components(&self) -> &[String] {
        &self.components
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Resolve raw input into the property's typed value.
    /// `None` means "no input"; rule matching is deterministic and total
    /// whenever a default is declared.
    pub fn resolve(&self, raw: Option<&Value>) -> Result<Value, CoercionError> {
        match raw {
            None => self
                .default
                .clone()
                .ok_or_else(|| CoercionError::MissingInput {
                    property: self.name.clone(),
                }),
            Some(input) => {
                for rule in &self.rules {
                    if rule.kind == input.kind() {
                        return (rule.apply)(&self.name, input);
                    }
                }
                self.default
                    .clone()
                    .ok_or_else(|| CoercionError::NoMatchingRule {
                        property: self.name.clone(),
                        kind: input.kind(),
                    })
            }
        }
    }
}

fn identity(_property: &str, input: &Value) -> Result<Value, CoercionError> {
    Ok(input.clone())
}

fn parse_scale_text(property: &str, input: &Value) -> Result<Value, CoercionError> {
    let text = input.as_text().unwrap_or_default();
    Scale::from_str(text)
        .map(Value::Scale)
        .map_err(|_| CoercionError::InvalidLiteral {
            property: property.to_string(),
            kind: ValueKind::Scale,
            text: text.to_string(),
        })
}

fn parse_color_text(property: &str, input: &Value) -> Result<Value, CoercionError> {
    let text = input.as_text().unwrap_or_default();
    Rgba::from_str(text)
        .map(Value::Color)
        .map_err(|_| CoercionError::InvalidLiteral {
            property: property.to_string(),
            kind: ValueKind::Color,
            text: text.to_string(),
        })
}

/// Built-in `scale` property: absent input yields the default (unit scale
/// unless overridden), an existing Scale passes through unchanged, a string
/// of form `"x,y"` parses both components as floats.
pub fn scale_property(name: impl Into<String>) -> PropertyDef {
    PropertyDef::new(name)
        .with_components(&["x_factor", "y_factor"])
        .rule(ValueKind::Scale, identity)
        .rule(ValueKind::Text, parse_scale_text)
        .with_default(Value::Scale(Scale::default()))
}

/// Built-in `color` property: pass-through for Color, `rgba(...)` parse for
/// strings, opaque white default.
pub fn color_property(name: impl Into<String>) -> PropertyDef {
    PropertyDef::new(name)
        .rule(ValueKind::Color, identity)
        .rule(ValueKind::Text, parse_color_text)
        .with_default(Value::Color(Rgba::default()))
}

/// Untyped pass-through property: every kind maps to itself. Used for
/// attributes a model type declares no rules for.
pub fn passthrough_property(name: impl Into<String>) -> PropertyDef {
    let mut def = PropertyDef::new(name);
    for kind in ValueKind::ALL {
        def = def.rule(kind, identity);
    }
    def
}
