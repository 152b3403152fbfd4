//! View descriptions: the ordered (model type, attributes) pairs a scene's
//! models are built from, plus the host seam that supplies them.
//!
//! Raw view JSON keeps attributes as `[key, value]` pairs because entry and
//! attribute order are significant (draw order, export order). Raw values are
//! untagged scalars; typed coercion happens later against the model schema.

use serde::{Deserialize, Serialize};

use hashbrown::HashMap;

use ludo_api_core::Value;

use crate::errors::SceneError;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ViewEntry {
    pub model_type: String,
    /// Attribute pairs in declaration order.
    pub attributes: Vec<(String, Value)>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct View {
    pub name: String,
    pub entries: Vec<ViewEntry>,
}

impl View {
    /// The always-resolvable fallback: zero models.
    pub fn empty() -> Self {
        Self::default()
    }
}

#[derive(Deserialize)]
struct RawView {
    name: String,
    #[serde(default)]
    models: Vec<RawEntry>,
}

#[derive(Deserialize)]
struct RawEntry {
    #[serde(rename = "type")]
    ty: String,
    #[serde(default)]
    attributes: Vec<(String, RawValue)>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Bool(bool),
    Number(f64),
    String(String),
}

fn to_core_value(raw: &RawValue) -> Value {
    match raw {
        RawValue::Bool(b) => Value::Bool(*b),
        RawValue::Number(n) => Value::Float(*n as f32),
        RawValue::String(s) => Value::Text(s.clone()),
    }
}

/// Parse view JSON of the form
/// `{ "name": ..., "models": [ { "type": ..., "attributes": [[k, v], ...] } ] }`.
pub fn parse_view_json(s: &str) -> Result<View, SceneError> {
    let raw: RawView =
        serde_json::from_str(s).map_err(|e| SceneError::ViewParse(e.to_string()))?;
    let entries = raw
        .models
        .into_iter()
        .map(|m| ViewEntry {
            model_type: m.ty,
            attributes: m
                .attributes
                .iter()
                .map(|(k, v)| (k.clone(), to_core_value(v)))
                .collect(),
        })
        .collect();
    Ok(View {
        name: raw.name,
        entries,
    })
}

/// Host seam supplying views by name. A `None` result degrades to the empty
/// view unless strict mode makes it fatal.
pub trait ViewSource {
    fn resolve(&self, name: &str) -> Option<View>;
}

/// In-memory view source for embedding and tests.
#[derive(Debug, Default)]
pub struct MapViewSource {
    views: HashMap<String, View>,
}

impl MapViewSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, view: View) {
        self.views.insert(name.into(), view);
    }
}

impl ViewSource for MapViewSource {
    fn resolve(&self, name: &str) -> Option<View> {
        self.views.get(name).cloned()
    }
}

/// Resolves nothing; every scene built from it gets zero models.
#[derive(Debug, Default)]
pub struct NullViewSource;

impl ViewSource for NullViewSource {
    fn resolve(&self, _name: &str) -> Option<View> {
        None
    }
}
