// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Inbound request documents.

use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

/// One decoded request line.
///
/// `id` is an opaque token echoed back verbatim; `path` names the target
/// object. Unknown kinds and malformed documents fail deserialization and
/// are dropped by the caller without a response.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Request {
    /// Query whether an object exists and is discoverable.
    Discover {
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        path: Option<String>,
    },

    /// Read the current state of an already-instantiated object.
    Get {
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        path: Option<String>,
    },

    /// Subscribe the object to the periodic broadcast stream.
    Subscribe {
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        path: Option<String>,
    },

    /// Remove the object from the broadcast stream. Always succeeds.
    Unsubscribe {
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        path: Option<String>,
    },

    /// Merge field changes into the object's state.
    Set {
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        path: Option<String>,
        changes: Map<String, JsonValue>,
    },

    /// Mark one field deleted.
    Delete {
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        path: Option<String>,
        #[serde(default)]
        field: Option<String>,
    },
}

impl Request {
    /// Parse one inbound line. `None` is the silent-drop path.
    pub fn parse(line: &str) -> Option<Self> {
        serde_json::from_str(line).ok()
    }
}
