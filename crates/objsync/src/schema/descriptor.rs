// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema descriptors.

use crate::schema::{FieldKind, FieldLocator};

/// Descriptor for one schema field. Immutable once registered.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    /// Field name (key in the generic store and on the wire).
    pub name: String,
    /// Declared kind.
    pub kind: FieldKind,
    /// Native-memory locator, if the field is bound.
    pub locator: FieldLocator,
}

impl FieldDescriptor {
    /// Create a field descriptor with no native backing.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            locator: FieldLocator::unbound(),
        }
    }

    /// Attach a locator.
    pub fn with_locator(mut self, locator: FieldLocator) -> Self {
        self.locator = locator;
        self
    }
}

/// Immutable descriptor for one named object: ordered field list plus the
/// capability flags the protocol handler consults.
#[derive(Debug, Clone)]
pub struct ObjectSchema {
    /// Object name (unique registry key).
    pub name: String,
    /// Ordered field descriptors.
    pub fields: Vec<FieldDescriptor>,
    /// Clients may subscribe and receive periodic updates.
    pub subscribable: bool,
    /// `set` requests are rejected with `read_only`.
    pub read_only: bool,
    /// Object appears in discovery.
    pub discoverable: bool,
}

impl ObjectSchema {
    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Number of declared fields.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}
