// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Runtime field values.

use crate::schema::FieldKind;
use serde::{Deserialize, Serialize};

/// A field value as held in the generic store and carried on the wire.
///
/// Only the three wire kinds exist: booleans, double-precision numbers and
/// text. Integers widen to `f64` on ingest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Value {
    /// Default value for a declared field kind: `false` / `0.0` / `""`.
    pub fn default_for(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Boolean => Self::Bool(false),
            FieldKind::Number => Self::Number(0.0),
            FieldKind::Text => Self::Text(String::new()),
        }
    }

    /// Kind of this value.
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Bool(_) => FieldKind::Boolean,
            Self::Number(_) => FieldKind::Number,
            Self::Text(_) => FieldKind::Text,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Convert a raw wire value, if it is representable in the store.
    ///
    /// Booleans, numbers and strings map directly; null, arrays and objects
    /// have no store representation and yield `None`.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Bool(b) => Some(Self::Bool(*b)),
            serde_json::Value::Number(n) => n.as_f64().map(Self::Number),
            serde_json::Value::String(s) => Some(Self::Text(s.clone())),
            _ => None,
        }
    }

    /// Coerce a raw wire value to a declared kind.
    ///
    /// Matching kinds pass through (integers widen to `f64`); anything else
    /// yields the kind default. Applied uniformly to `set`, binding sync and
    /// schema-default initialization.
    pub fn coerce(kind: FieldKind, value: &serde_json::Value) -> Self {
        match kind {
            FieldKind::Boolean => Self::Bool(value.as_bool().unwrap_or(false)),
            FieldKind::Number => Self::Number(value.as_f64().unwrap_or(0.0)),
            FieldKind::Text => Self::Text(value.as_str().unwrap_or("").to_string()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&Value> for serde_json::Value {
    fn from(v: &Value) -> Self {
        match v {
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => serde_json::Value::from(*n),
            Value::Text(t) => serde_json::Value::String(t.clone()),
        }
    }
}
