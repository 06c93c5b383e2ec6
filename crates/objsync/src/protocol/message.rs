// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Outbound protocol documents.

use crate::schema::FieldKind;
use crate::store::Value;
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;
use std::fmt;

/// Protocol-level failure, reported inside a response document.
///
/// Never thrown or fatal: errors are values on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestError {
    /// Unknown object or path.
    NotFound,
    /// Subscribe attempted on a non-discoverable object.
    NotDiscoverable,
    /// Subscribe attempted on a non-subscribable object.
    NotSubscribable,
    /// Write attempted on a read-only object.
    ReadOnly,
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NotFound => "not_found",
            Self::NotDiscoverable => "not_discoverable",
            Self::NotSubscribable => "not_subscribable",
            Self::ReadOnly => "read_only",
        };
        f.write_str(s)
    }
}

/// Field entry in a discovery response.
#[derive(Debug, Clone, Serialize)]
pub struct FieldInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
}

/// Schema block in a discovery response.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaInfo {
    pub name: String,
    pub subscriber_count: u32,
    pub subscribed: bool,
    pub subscribable: bool,
    #[serde(rename = "readOnly")]
    pub read_only: bool,
    pub discoverable: bool,
    pub fields: Vec<FieldInfo>,
}

/// Subscription metadata attached to state responses.
///
/// The capability flags are present only when a schema is registered.
#[derive(Debug, Clone, Serialize)]
pub struct StateMeta {
    pub subscriber_count: u32,
    pub subscribed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscribable: Option<bool>,
    #[serde(rename = "readOnly", skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discoverable: Option<bool>,
}

/// One outbound document. Exactly one JSON object per line on the wire.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum Message {
    /// Response to `discover`.
    #[serde(rename = "discover.response")]
    DiscoverResponse {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        found: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        schema: Option<SchemaInfo>,
    },

    /// Full object state, for `get`, the subscribe follow-up and the
    /// post-`delete` snapshot.
    #[serde(rename = "state")]
    State {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        path: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<BTreeMap<String, Value>>,
        #[serde(rename = "_meta", skip_serializing_if = "Option::is_none")]
        meta: Option<StateMeta>,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<RequestError>,
    },

    /// Response to `subscribe`. Subscription metadata is present on
    /// success, `error` on failure.
    #[serde(rename = "subscribe.response")]
    SubscribeResponse {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        path: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        subscriber_count: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        subscribed: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<RequestError>,
    },

    /// Response to `unsubscribe`. Always succeeds; `removed` hints that the
    /// client may drop its cached view.
    #[serde(rename = "unsubscribe.response")]
    UnsubscribeResponse {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        path: String,
        subscriber_count: u32,
        subscribed: bool,
        removed: bool,
    },

    /// Acknowledgment of `set`.
    #[serde(rename = "set.response")]
    SetResponse {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        path: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<RequestError>,
    },

    /// Update-delta: changed field values for one object. Clients merge
    /// these into their cached view.
    #[serde(rename = "update")]
    Update {
        path: String,
        changes: Map<String, JsonValue>,
    },
}
