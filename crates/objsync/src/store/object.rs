// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Generic objects and the object store.

use crate::schema::{ObjectSchema, SchemaRegistry};
use crate::store::Value;
use std::collections::BTreeMap;

/// Dynamic key→value state for one object name.
///
/// Created from its schema with per-kind defaults; ad hoc keys can appear
/// only through direct field writes.
#[derive(Debug, Clone, Default)]
pub struct GenericObject {
    values: BTreeMap<String, Value>,
}

impl GenericObject {
    /// Create an object initialized with schema-declared defaults.
    pub fn from_schema(schema: &ObjectSchema) -> Self {
        let values = schema
            .fields
            .iter()
            .map(|f| (f.name.clone(), Value::default_for(f.kind)))
            .collect();
        Self { values }
    }

    /// Current value of a field, if set.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Whether a field is present.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Delta-merge a single field: overwrite by key, never clear others.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    /// All current field values, in key order.
    pub fn values(&self) -> &BTreeMap<String, Value> {
        &self.values
    }

    /// Number of fields currently present.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the object holds no fields.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// All instantiated generic objects, keyed by object name.
///
/// Objects are created lazily on first need and live until the process ends.
#[derive(Debug, Default)]
pub struct ObjectStore {
    objects: BTreeMap<String, GenericObject>,
}

impl ObjectStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an object has been instantiated under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.objects.contains_key(name)
    }

    /// Borrow an instantiated object.
    pub fn get(&self, name: &str) -> Option<&GenericObject> {
        self.objects.get(name)
    }

    /// Mutably borrow an instantiated object.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut GenericObject> {
        self.objects.get_mut(name)
    }

    /// Existing object, else create-and-initialize from the registered
    /// schema.
    ///
    /// Unknown names yield `None`; no unstructured fallback object is ever
    /// fabricated. Callers must handle absence explicitly.
    pub fn ensure(&mut self, name: &str, registry: &SchemaRegistry) -> Option<&mut GenericObject> {
        if self.objects.contains_key(name) {
            return self.objects.get_mut(name);
        }
        let schema = registry.get(name)?;
        let object = GenericObject::from_schema(schema);
        Some(self.objects.entry(name.to_string()).or_insert(object))
    }
}
