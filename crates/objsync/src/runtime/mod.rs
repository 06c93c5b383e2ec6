// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The object-synchronization runtime.
//!
//! Owns the schema registry, the generic object store, the typed binding
//! table and the subscriber set, and drives the request/response protocol
//! over any [`MessageSink`]. All entry points are synchronous and run to
//! completion; the driving loop (line input, tick cadence) lives outside.

mod tick;

use crate::binding::BindingTable;
use crate::config::{DEFAULT_MAX_ACTIVE_SUBSCRIPTIONS, DELETED_SENTINEL};
use crate::protocol::{FieldInfo, Message, Request, RequestError, SchemaInfo, StateMeta};
use crate::schema::{ObjectSchema, SchemaRegistry};
use crate::sink::MessageSink;
use crate::store::{ObjectStore, Value};
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeSet;
use std::io;
use std::ptr::NonNull;
use std::sync::Arc;

/// Single-threaded object-synchronization runtime.
///
/// Shared state is accessed by one logical caller at a time; the runtime
/// performs no internal threading, blocking or suspension.
pub struct Runtime {
    registry: SchemaRegistry,
    store: ObjectStore,
    bindings: BindingTable,
    subscribers: BTreeSet<String>,
    max_active_subscriptions: usize,
    last_send_ms: u64,
}

impl Runtime {
    /// Create a runtime with no schemas, objects or bindings.
    pub fn new() -> Self {
        Self {
            registry: SchemaRegistry::new(),
            store: ObjectStore::new(),
            bindings: BindingTable::new(),
            subscribers: BTreeSet::new(),
            max_active_subscriptions: DEFAULT_MAX_ACTIVE_SUBSCRIPTIONS,
            last_send_ms: 0,
        }
    }

    /// Register an object schema. Replaces any schema with the same name.
    pub fn register_schema(&mut self, schema: Arc<ObjectSchema>) {
        self.registry.register(schema);
    }

    /// Look up a registered schema.
    pub fn schema(&self, name: &str) -> Option<&Arc<ObjectSchema>> {
        self.registry.get(name)
    }

    /// Register a native instance for `name` so binding sync can read and
    /// write its fields.
    ///
    /// # Safety
    ///
    /// See [`BindingTable::register`]: `base` and the schema's locators must
    /// point into a live instance at a stable address, exclusively
    /// accessible to the runtime during synchronizing calls. Layout
    /// agreement is not checked.
    pub unsafe fn register_binding(&mut self, name: impl Into<String>, base: NonNull<u8>) {
        let name = name.into();
        log::debug!("[Runtime] typed binding registered for '{name}'");
        self.bindings.register(name, base);
    }

    /// Whether `name` is currently subscribed.
    pub fn is_subscribed(&self, name: &str) -> bool {
        self.subscribers.contains(name)
    }

    /// Subscriber presence for `name` (0 or 1; subscription is a set).
    pub fn subscriber_count(&self, name: &str) -> u32 {
        u32::from(self.subscribers.contains(name))
    }

    /// Cap on subscribed objects visited per broadcast pass.
    pub fn set_max_active_subscriptions(&mut self, n: usize) {
        self.max_active_subscriptions = n;
    }

    /// Borrow the generic object store.
    pub fn store(&self) -> &ObjectStore {
        &self.store
    }

    /// Decode and dispatch one inbound line.
    ///
    /// Malformed documents are dropped without a response.
    pub fn process_line(&mut self, line: &str, sink: &mut dyn MessageSink) -> io::Result<()> {
        let Some(request) = Request::parse(line) else {
            log::debug!("[Runtime] dropping undecodable line ({} bytes)", line.len());
            return Ok(());
        };
        self.dispatch(request, sink)
    }

    fn dispatch(&mut self, request: Request, sink: &mut dyn MessageSink) -> io::Result<()> {
        match request {
            Request::Discover { id, path } => {
                self.handle_discover(id, path.unwrap_or_default(), sink)
            }
            Request::Get { id, path } => self.handle_get(id, path.unwrap_or_default(), sink),
            Request::Subscribe { id, path } => {
                self.handle_subscribe(id, path.unwrap_or_default(), sink)
            }
            Request::Unsubscribe { id, path } => {
                self.handle_unsubscribe(id, path.unwrap_or_default(), sink)
            }
            Request::Set { id, path, changes } => {
                self.handle_set(id, path.unwrap_or_default(), changes, sink)
            }
            Request::Delete { id, path, field } => {
                self.handle_delete(id, path.unwrap_or_default(), field, sink)
            }
        }
    }

    // ------------------------------------------------------------------
    // Request handlers
    // ------------------------------------------------------------------

    fn handle_discover(
        &mut self,
        id: Option<String>,
        path: String,
        sink: &mut dyn MessageSink,
    ) -> io::Result<()> {
        let schema = self
            .registry
            .get(&path)
            .filter(|s| s.discoverable)
            .map(|s| SchemaInfo {
                name: path.clone(),
                subscriber_count: self.subscriber_count(&path),
                subscribed: self.subscribers.contains(&path),
                subscribable: s.subscribable,
                read_only: s.read_only,
                discoverable: s.discoverable,
                fields: s
                    .fields
                    .iter()
                    .map(|f| FieldInfo {
                        name: f.name.clone(),
                        kind: f.kind,
                    })
                    .collect(),
            });
        sink.send(&Message::DiscoverResponse {
            id,
            found: schema.is_some(),
            schema,
        })
    }

    fn handle_get(
        &mut self,
        id: Option<String>,
        path: String,
        sink: &mut dyn MessageSink,
    ) -> io::Result<()> {
        sink.send(&self.state_message(id, &path))
    }

    fn handle_subscribe(
        &mut self,
        id: Option<String>,
        path: String,
        sink: &mut dyn MessageSink,
    ) -> io::Result<()> {
        // error precedence: not_found, then not_discoverable, then
        // not_subscribable
        let Some(schema) = self.registry.get(&path).cloned() else {
            return sink.send(&subscribe_error(id, path, RequestError::NotFound));
        };
        if !schema.discoverable {
            return sink.send(&subscribe_error(id, path, RequestError::NotDiscoverable));
        }
        if !schema.subscribable {
            return sink.send(&subscribe_error(id, path, RequestError::NotSubscribable));
        }

        // lazy-init from schema defaults
        let _ = self.store.ensure(&path, &self.registry);
        if self.subscribers.insert(path.clone()) {
            log::debug!("[Runtime] '{path}' subscribed");
        }

        let count = self.subscriber_count(&path);
        sink.send(&Message::SubscribeResponse {
            id,
            path: path.clone(),
            subscriber_count: Some(count),
            subscribed: Some(count > 0),
            error: None,
        })?;
        // immediate state for convenience, same shape as `get`
        sink.send(&self.state_message(Some(format!("get-{path}")), &path))
    }

    fn handle_unsubscribe(
        &mut self,
        id: Option<String>,
        path: String,
        sink: &mut dyn MessageSink,
    ) -> io::Result<()> {
        self.subscribers.remove(&path);
        let count = self.subscriber_count(&path);
        sink.send(&Message::UnsubscribeResponse {
            id,
            path,
            subscriber_count: count,
            subscribed: count > 0,
            removed: true,
        })
    }

    fn handle_set(
        &mut self,
        id: Option<String>,
        path: String,
        changes: Map<String, JsonValue>,
        sink: &mut dyn MessageSink,
    ) -> io::Result<()> {
        if let Some(schema) = self.registry.get(&path) {
            if schema.read_only {
                return sink.send(&Message::SetResponse {
                    id,
                    path,
                    error: Some(RequestError::ReadOnly),
                });
            }
        }
        let Some(object) = self.store.ensure(&path, &self.registry) else {
            return sink.send(&Message::SetResponse {
                id,
                path,
                error: Some(RequestError::NotFound),
            });
        };

        // delta-merge; only representable values reach the store
        let mut changed: Vec<String> = Vec::with_capacity(changes.len());
        for (key, raw) in &changes {
            if let Some(value) = Value::from_json(raw) {
                object.set(key.clone(), value);
            }
            changed.push(key.clone());
        }
        self.pull_from_store(&path, &changed);

        if self.should_broadcast(&path) {
            sink.send(&Message::Update {
                path: path.clone(),
                changes,
            })?;
        }
        sink.send(&Message::SetResponse {
            id,
            path,
            error: None,
        })
    }

    fn handle_delete(
        &mut self,
        _id: Option<String>,
        path: String,
        field: Option<String>,
        sink: &mut dyn MessageSink,
    ) -> io::Result<()> {
        // missing field or never-created object: deliberate silent no-op
        let Some(field) = field else {
            return Ok(());
        };
        let Some(object) = self.store.get_mut(&path) else {
            return Ok(());
        };

        // sentinel is always text, even for boolean and number fields
        object.set(field.clone(), Value::Text(DELETED_SENTINEL.to_string()));

        if self.should_broadcast(&path) {
            let mut changes = Map::new();
            changes.insert(field, JsonValue::String(DELETED_SENTINEL.to_string()));
            sink.send(&Message::Update {
                path: path.clone(),
                changes,
            })?;
        }

        // full snapshot so clients can rebuild their cached view
        let value = self.store.get(&path).map(|o| o.values().clone());
        sink.send(&Message::State {
            id: None,
            path,
            value,
            meta: None,
            error: None,
        })
    }

    // ------------------------------------------------------------------
    // Typed binding synchronization
    // ------------------------------------------------------------------

    /// Copy every bound schema field from the registered native instance
    /// into the store, then broadcast the full field set under the usual
    /// subscriber gating.
    ///
    /// No-op unless both a binding and a schema are registered for `name`.
    pub fn push_to_store(&mut self, name: &str, sink: &mut dyn MessageSink) -> io::Result<()> {
        let Some(base) = self.bindings.get(name) else {
            return Ok(());
        };
        let Some(schema) = self.registry.get(name).cloned() else {
            return Ok(());
        };
        let Some(object) = self.store.ensure(name, &self.registry) else {
            return Ok(());
        };

        for f in &schema.fields {
            let Some(addr) = f.locator.resolve(Some(base), f.kind) else {
                continue;
            };
            // SAFETY: the binding registered for `name` asserts that the
            // schema's locators point into its live instance.
            let value = unsafe { addr.read() };
            object.set(f.name.clone(), value);
        }

        if !self.should_broadcast(name) {
            return Ok(());
        }
        let Some(object) = self.store.get(name) else {
            return Ok(());
        };
        let mut changes = Map::new();
        for f in &schema.fields {
            if let Some(v) = object.get(&f.name) {
                changes.insert(f.name.clone(), JsonValue::from(v));
            }
        }
        sink.send(&Message::Update {
            path: name.to_string(),
            changes,
        })
    }

    /// Copy the named store fields into the registered native instance,
    /// coercing each to its declared kind.
    ///
    /// Fields without a resolvable locator are never touched. Invoked
    /// automatically after every successful `set`.
    pub fn pull_from_store(&mut self, name: &str, changed: &[String]) {
        let Some(base) = self.bindings.get(name) else {
            return;
        };
        let Some(schema) = self.registry.get(name) else {
            return;
        };
        let Some(object) = self.store.get(name) else {
            return;
        };
        for f in &schema.fields {
            if !changed.iter().any(|c| c == &f.name) {
                continue;
            }
            let Some(addr) = f.locator.resolve(Some(base), f.kind) else {
                continue;
            };
            let Some(value) = object.get(&f.name) else {
                continue;
            };
            // SAFETY: covered by the binding registration contract for
            // `name`.
            unsafe { addr.write(value) };
        }
    }

    /// Set one numeric field, broadcast the delta under the usual gating,
    /// and pull the change into any registered binding.
    ///
    /// Silently does nothing for names with neither a schema nor a prior
    /// object.
    pub fn set_numeric_field(
        &mut self,
        path: &str,
        field: &str,
        value: f64,
        sink: &mut dyn MessageSink,
    ) -> io::Result<()> {
        let Some(object) = self.store.ensure(path, &self.registry) else {
            return Ok(());
        };
        object.set(field.to_string(), Value::Number(value));

        if self.should_broadcast(path) {
            let mut changes = Map::new();
            changes.insert(field.to_string(), JsonValue::from(value));
            sink.send(&Message::Update {
                path: path.to_string(),
                changes,
            })?;
        }
        self.pull_from_store(path, &[field.to_string()]);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Shared helpers
    // ------------------------------------------------------------------

    /// An update is broadcast only when the object has a subscriber and its
    /// schema, if any, allows subscriptions.
    fn should_broadcast(&self, path: &str) -> bool {
        if !self.subscribers.contains(path) {
            return false;
        }
        self.registry.get(path).map_or(true, |s| s.subscribable)
    }

    /// Build the `state` document for `path`: one value per schema field
    /// (stored value or kind default), raw stored keys for schema-less
    /// objects, `not_found` for objects never instantiated.
    fn state_message(&self, id: Option<String>, path: &str) -> Message {
        let Some(object) = self.store.get(path) else {
            return Message::State {
                id,
                path: path.to_string(),
                value: None,
                meta: None,
                error: Some(RequestError::NotFound),
            };
        };
        let schema = self.registry.get(path);
        let value = match schema {
            Some(s) => s
                .fields
                .iter()
                .map(|f| {
                    let v = object
                        .get(&f.name)
                        .cloned()
                        .unwrap_or_else(|| Value::default_for(f.kind));
                    (f.name.clone(), v)
                })
                .collect(),
            None => object.values().clone(),
        };
        let meta = StateMeta {
            subscriber_count: self.subscriber_count(path),
            subscribed: self.subscribers.contains(path),
            subscribable: schema.map(|s| s.subscribable),
            read_only: schema.map(|s| s.read_only),
            discoverable: schema.map(|s| s.discoverable),
        };
        Message::State {
            id,
            path: path.to_string(),
            value: Some(value),
            meta: Some(meta),
            error: None,
        }
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

fn subscribe_error(id: Option<String>, path: String, error: RequestError) -> Message {
    Message::SubscribeResponse {
        id,
        path,
        subscriber_count: None,
        subscribed: None,
        error: Some(error),
    }
}
