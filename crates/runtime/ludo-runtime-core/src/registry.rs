//! Explicit model-type registry.
//!
//! Constructed at startup, populated before the first scene activation, and
//! read-only afterwards. Unresolved type names fall back to a generic model
//! type so malformed view entries degrade instead of crashing scene load.

use std::sync::Arc;

use hashbrown::HashMap;

use crate::model::{normalize_key, AttributeSchema, GenericBehavior, Model, ModelBehavior};

/// One registered model type: a normalized name, its attribute schema, and
/// its per-frame behavior.
#[derive(Clone)]
pub struct ModelType {
    name: String,
    schema: Arc<AttributeSchema>,
    behavior: Arc<dyn ModelBehavior>,
}

impl ModelType {
    pub fn new(name: impl Into<String>, schema: AttributeSchema) -> Self {
        Self {
            name: normalize_key(&name.into()),
            schema: Arc::new(schema),
            behavior: Arc::new(GenericBehavior),
        }
    }

    pub fn with_behavior(mut self, behavior: impl ModelBehavior + 'static) -> Self {
        self.behavior = Arc::new(behavior);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Build a fresh instance sharing this type's schema and behavior.
    pub fn instantiate(&self) -> Model {
        Model::new(&self.name, self.schema.clone(), self.behavior.clone())
    }
}

impl core::fmt::Debug for ModelType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ModelType")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct ModelRegistry {
    types: HashMap<String, ModelType>,
    generic: ModelType,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self {
            types: HashMap::new(),
            generic: ModelType::new("model", AttributeSchema::new()),
        }
    }

    pub fn register(&mut self, ty: ModelType) {
        self.types.insert(ty.name().to_string(), ty);
    }

    /// Resolve a (raw) type name. The second element reports whether the
    /// generic fallback was substituted.
    pub fn resolve(&self, raw_name: &str) -> (&ModelType, bool) {
        match self.types.get(&normalize_key(raw_name)) {
            Some(ty) => (ty, false),
            None => (&self.generic, true),
        }
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}
