// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Bounded schema registry.

use crate::config::MAX_SCHEMAS;
use crate::schema::ObjectSchema;
use std::sync::Arc;

/// Fixed-capacity table of registered object schemas.
///
/// Sized for static-memory targets: no growth beyond [`MAX_SCHEMAS`], linear
/// lookup, last writer wins on re-registration. There is no removal; schemas
/// are additive for the process lifetime.
#[derive(Debug)]
pub struct SchemaRegistry {
    entries: Vec<Arc<ObjectSchema>>,
}

impl SchemaRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(MAX_SCHEMAS),
        }
    }

    /// Insert or replace a schema by object name.
    ///
    /// Once the table is full, new names are silently dropped.
    pub fn register(&mut self, schema: Arc<ObjectSchema>) {
        if let Some(slot) = self.entries.iter_mut().find(|e| e.name == schema.name) {
            *slot = schema;
            return;
        }
        if self.entries.len() < MAX_SCHEMAS {
            self.entries.push(schema);
        } else {
            log::debug!("[SchemaRegistry] table full, dropping '{}'", schema.name);
        }
    }

    /// Whether a schema is registered under `name`.
    pub fn exists(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    /// Look up a schema by object name.
    pub fn get(&self, name: &str) -> Option<&Arc<ObjectSchema>> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Number of registered schemas.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
