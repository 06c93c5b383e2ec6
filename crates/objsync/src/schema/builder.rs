// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builder API for ObjectSchema.

use crate::schema::{FieldAddr, FieldDescriptor, FieldKind, FieldLocator, ObjectSchema};

/// Builder for creating [`ObjectSchema`] instances.
///
/// Flags default to `subscribable = true`, `read_only = false`,
/// `discoverable = true`.
#[derive(Debug)]
pub struct SchemaBuilder {
    name: String,
    fields: Vec<FieldDescriptor>,
    subscribable: bool,
    read_only: bool,
    discoverable: bool,
}

impl SchemaBuilder {
    /// Create a new builder for an object schema.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            subscribable: true,
            read_only: false,
            discoverable: true,
        }
    }

    /// Add a field with no native backing.
    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(FieldDescriptor::new(name, kind));
        self
    }

    /// Add a boolean field.
    pub fn bool_field(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::Boolean)
    }

    /// Add a number field.
    pub fn number_field(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::Number)
    }

    /// Add a string field.
    pub fn string_field(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::Text)
    }

    /// Add a field bound to an absolute native address.
    ///
    /// The declared kind comes from the address tag.
    pub fn field_at(mut self, name: impl Into<String>, addr: FieldAddr) -> Self {
        self.fields.push(
            FieldDescriptor::new(name, addr.kind()).with_locator(FieldLocator::address(addr)),
        );
        self
    }

    /// Add a field bound at a byte offset from the binding's base pointer.
    pub fn field_at_offset(
        mut self,
        name: impl Into<String>,
        kind: FieldKind,
        offset: usize,
    ) -> Self {
        self.fields
            .push(FieldDescriptor::new(name, kind).with_locator(FieldLocator::at_offset(offset)));
        self
    }

    /// Whether clients may subscribe to the object.
    pub fn subscribable(mut self, subscribable: bool) -> Self {
        self.subscribable = subscribable;
        self
    }

    /// Whether `set` requests are rejected.
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Whether the object appears in discovery.
    pub fn discoverable(mut self, discoverable: bool) -> Self {
        self.discoverable = discoverable;
        self
    }

    /// Build the schema.
    pub fn build(self) -> ObjectSchema {
        ObjectSchema {
            name: self.name,
            fields: self.fields,
            subscribable: self.subscribable,
            read_only: self.read_only,
            discoverable: self.discoverable,
        }
    }
}
