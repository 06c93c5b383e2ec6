// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Object schemas: field descriptors, native-memory locators and the
//! bounded registry.
//!
//! A schema is the immutable description of one named object: an ordered
//! field list plus the capability flags the protocol handler consults
//! (`subscribable`, `read_only`, `discoverable`). Schemas are registered
//! once per name for the process lifetime; re-registration replaces the
//! descriptor wholesale.
//!
//! # Example
//!
//! ```rust
//! use objsync::schema::{FieldKind, SchemaBuilder};
//!
//! let schema = SchemaBuilder::new("laser")
//!     .bool_field("enabled")
//!     .number_field("power")
//!     .string_field("mode")
//!     .build();
//!
//! assert_eq!(schema.fields.len(), 3);
//! assert_eq!(schema.field("power").unwrap().kind, FieldKind::Number);
//! ```

mod builder;
mod descriptor;
mod field;
mod registry;

pub use builder::SchemaBuilder;
pub use descriptor::{FieldDescriptor, ObjectSchema};
pub use field::{FieldAddr, FieldKind, FieldLocator};
pub use registry::SchemaRegistry;
