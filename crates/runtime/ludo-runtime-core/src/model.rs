//! Models: attribute-bagged game objects with typed, coercion-backed storage.
//!
//! The schema (which attributes carry which coercion rules) is per model
//! type, built once at registration; value storage is per instance. Loaded
//! keys are remembered in insertion order because export order is part of the
//! contract. Keys outside the schema go through an untyped pass-through
//! property, preserving the dynamic attribute bag without order-dependent
//! accessor sets.

use std::sync::Arc;

use hashbrown::{HashMap, HashSet};
use log::warn;

use ludo_api_core::{passthrough_property, CoercionError, PropertyDef, Value};

use crate::commands::SceneCommand;
use crate::window::Canvas;

/// Reserved key carrying a model's display name; excluded from export.
pub const NAME_KEY: &str = "name";

/// Normalize an attribute or type key to snake_case: hyphens become
/// underscores, ASCII uppercase folds down.
pub fn normalize_key(raw: &str) -> String {
    raw.trim().replace('-', "_").to_ascii_lowercase()
}

/// Per-type attribute schema: normalized attribute name -> property def.
/// Shared by every instance of the type via `Arc`.
#[derive(Clone, Debug, Default)]
pub struct AttributeSchema {
    props: HashMap<String, Arc<PropertyDef>>,
    mandatory: HashSet<String>,
}

impl AttributeSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a property under its own (normalized) name.
    pub fn property(mut self, def: PropertyDef) -> Self {
        self.props
            .insert(normalize_key(def.name()), Arc::new(def));
        self
    }

    /// Mark an attribute mandatory: a coercion failure or unresolvable
    /// absence aborts the owning model's construction.
    pub fn mandatory(mut self, name: &str) -> Self {
        self.mandatory.insert(normalize_key(name));
        self
    }

    pub fn get(&self, key: &str) -> Option<&Arc<PropertyDef>> {
        self.props.get(key)
    }

    pub fn is_mandatory(&self, key: &str) -> bool {
        self.mandatory.contains(key)
    }

    pub fn mandatory_keys(&self) -> impl Iterator<Item = &String> {
        self.mandatory.iter()
    }
}

/// Per-frame behavior attached to a model type. The generic fallback keeps
/// both hooks as no-op/whole-model draws so unknown view entries still
/// participate in update and draw.
pub trait ModelBehavior: Send + Sync {
    fn update(&self, model: &mut Model, dt: f32) -> Vec<SceneCommand> {
        let _ = (model, dt);
        Vec::new()
    }

    fn draw(&self, model: &Model, canvas: &mut dyn Canvas) {
        canvas.draw_model(model);
    }
}

#[derive(Debug, Default)]
pub struct GenericBehavior;

impl ModelBehavior for GenericBehavior {}

/// One in-memory game object: a type name, the shared schema, and a
/// per-instance attribute map plus the insertion-ordered loaded-key list.
pub struct Model {
    type_name: String,
    schema: Arc<AttributeSchema>,
    behavior: Arc<dyn ModelBehavior>,
    loaded: Vec<String>,
    values: HashMap<String, Value>,
}

impl Model {
    pub fn new(
        type_name: impl Into<String>,
        schema: Arc<AttributeSchema>,
        behavior: Arc<dyn ModelBehavior>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            schema,
            behavior,
            loaded: Vec::new(),
            values: HashMap::new(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Display name: the `name` attribute when loaded, else the type name.
    pub fn name(&self) -> &str {
        self.values
            .get(NAME_KEY)
            .and_then(Value::as_text)
            .unwrap_or(&self.type_name)
    }

    pub fn behavior(&self) -> Arc<dyn ModelBehavior> {
        self.behavior.clone()
    }

    /// Load an attribute mapping. Keys are normalized; values run through
    /// the type's coercion schema (pass-through when undeclared). A failing
    /// mandatory property aborts the load; a failing optional one is skipped
    /// with a warning. After the mapping is applied, mandatory attributes
    /// that never appeared are resolved from their defaults.
    pub fn load(&mut self, options: &[(String, Value)]) -> Result<(), CoercionError> {
        for (raw_key, raw_value) in options {
            let key = normalize_key(raw_key);
            let resolved = match self.schema.get(&key) {
                Some(def) => def.resolve(Some(raw_value)),
                None => passthrough_property(key.as_str()).resolve(Some(raw_value)),
            };
            match resolved {
                Ok(value) => self.set_value(&key, value),
                Err(err) if self.schema.is_mandatory(&key) => return Err(err),
                Err(err) => {
                    warn!("model '{}': skipping attribute '{key}': {err}", self.name());
                }
            }
        }
        let missing: Vec<String> = self
            .schema
            .mandatory_keys()
            .filter(|k| !self.values.contains_key(*k))
            .cloned()
            .collect();
        for key in missing {
            let value = match self.schema.get(&key) {
                Some(def) => def.resolve(None)?,
                None => {
                    return Err(CoercionError::MissingInput {
                        property: key.clone(),
                    })
                }
            };
            self.set_value(&key, value);
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(&normalize_key(key))
    }

    /// Store an already-typed value, recording the key on first write.
    /// A key already in the loaded sequence keeps its position.
    pub fn set_value(&mut self, key: &str, value: Value) {
        let key = normalize_key(key);
        if !self.values.contains_key(&key) {
            self.loaded.push(key.clone());
        }
        self.values.insert(key, value);
    }

    /// Loaded keys in insertion order.
    pub fn loaded_keys(&self) -> &[String] {
        &self.loaded
    }

    /// Loaded keys with their current values, in insertion order. Used to
    /// transfer state between model instances of a compatible shape.
    pub fn save(&self) -> Vec<(String, Value)> {
        self.loaded
            .iter()
            .filter_map(|k| self.values.get(k).map(|v| (k.clone(), v.clone())))
            .collect()
    }

    /// Like `save`, but the reserved `name` key is excluded and colors are
    /// stringified to the canonical `rgba(r,g,b,a)` form. Returns the model
    /// name alongside the mapping; `export` then `load` reconstructs an
    /// equivalent model.
    pub fn export(&self) -> (String, Vec<(String, Value)>) {
        let attrs = self
            .loaded
            .iter()
            .filter(|k| k.as_str() != NAME_KEY)
            .filter_map(|k| self.values.get(k).map(|v| (k, v)))
            .map(|(k, v)| {
                let out = match v {
                    Value::Color(c) => Value::Text(c.to_string()),
                    other => other.clone(),
                };
                (k.clone(), out)
            })
            .collect();
        (self.name().to_string(), attrs)
    }
}

impl core::fmt::Debug for Model {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Model")
            .field("type_name", &self.type_name)
            .field("name", &self.name())
            .field("loaded", &self.loaded)
            .finish_non_exhaustive()
    }
}

/// Scene-owned model collection. Vec keeps declaration/insertion order,
/// which is also draw order.
#[derive(Debug, Default)]
pub struct ModelSet {
    items: Vec<Model>,
}

impl ModelSet {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, model: Model) {
        self.items.push(model);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// First model whose display name matches.
    pub fn get(&self, name: &str) -> Option<&Model> {
        self.items.iter().find(|m| m.name() == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Model> {
        self.items.iter_mut().find(|m| m.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Model> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Model> {
        self.items.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_normalize_to_snake_case() {
        assert_eq!(normalize_key("Background-Color"), "background_color");
        assert_eq!(normalize_key(" x "), "x");
    }
}
