// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # objsync - schema-driven object synchronization for device control links
//!
//! Exposes a fixed set of named, schema-described objects (device subsystems
//! such as a laser or a plasma unit) to an external controller over a
//! line-oriented JSON channel, while the device's own control code binds the
//! same fields directly to native memory.
//!
//! ## Quick Start
//!
//! ```rust
//! use objsync::{CollectSink, Runtime, SchemaBuilder};
//! use std::sync::Arc;
//!
//! let mut runtime = Runtime::new();
//! runtime.register_schema(Arc::new(
//!     SchemaBuilder::new("laser")
//!         .bool_field("enabled")
//!         .number_field("power")
//!         .string_field("mode")
//!         .build(),
//! ));
//!
//! let mut sink = CollectSink::new();
//! runtime
//!     .process_line(r#"{"type":"subscribe","id":"s1","path":"laser"}"#, &mut sink)
//!     .unwrap();
//! // subscribe.response followed by the immediate state document
//! assert_eq!(sink.messages().len(), 2);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +--------------------------------------------------------------------+
//! |                         Control channel                            |
//! |     line framer -> Runtime::process_line -> MessageSink            |
//! +--------------------------------------------------------------------+
//! |                          Runtime core                              |
//! |  SchemaRegistry | ObjectStore | BindingTable | subscriber set      |
//! +--------------------------------------------------------------------+
//! |                         Device control code                        |
//! |   native structs <-> push_to_store / pull_from_store / tick        |
//! +--------------------------------------------------------------------+
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Runtime`] | Owns all state and drives the request/response protocol |
//! | [`SchemaBuilder`] | Fluent construction of object schemas |
//! | [`FieldAddr`] | Kind-tagged pointer to one native field |
//! | [`MessageSink`] | Destination for outbound documents, one per call |
//! | [`LineFramer`] | Byte-stream to line framing with partial-buffer timeout |
//!
//! Single-threaded by design: every entry point is a synchronous call on one
//! logical thread of control, and types holding native addresses are
//! deliberately neither `Send` nor `Sync`.

/// Typed binding table (object name -> native base pointer).
pub mod binding;
/// Runtime constants (registry capacity, tick interval, framer limits).
pub mod config;
/// Byte-stream to line framing.
pub mod framing;
/// Inbound and outbound protocol documents.
pub mod protocol;
/// The runtime: request dispatch, binding sync, broadcast tick.
pub mod runtime;
/// Object schemas, field locators and the bounded registry.
pub mod schema;
/// Outbound message sinks.
pub mod sink;
/// Generic schema-backed object store.
pub mod store;

pub use binding::BindingTable;
pub use framing::LineFramer;
pub use protocol::{FieldInfo, Message, Request, RequestError, SchemaInfo, StateMeta};
pub use runtime::Runtime;
pub use schema::{
    FieldAddr, FieldDescriptor, FieldKind, FieldLocator, ObjectSchema, SchemaBuilder,
    SchemaRegistry,
};
pub use sink::{CollectSink, LineSink, MessageSink};
pub use store::{GenericObject, ObjectStore, Value};
