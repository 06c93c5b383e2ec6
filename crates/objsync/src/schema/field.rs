// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field kinds and native-memory locators.

use crate::store::Value;
use serde::{Deserialize, Serialize};
use std::ptr::NonNull;

/// Declared kind of a schema field.
///
/// Wire names follow the protocol: `boolean`, `number`, `string`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    #[serde(rename = "boolean")]
    Boolean,
    #[serde(rename = "number")]
    Number,
    #[serde(rename = "string")]
    Text,
}

impl FieldKind {
    /// Wire name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::Text => "string",
        }
    }
}

/// Direct pointer to one native field, tagged by kind.
///
/// The tag fixes how the pointee is read and written, so a locator can never
/// reinterpret memory under the wrong kind once the address is built.
#[derive(Debug, Clone, Copy)]
pub enum FieldAddr {
    Bool(*mut bool),
    Number(*mut f64),
    Text(*mut String),
}

impl FieldAddr {
    /// Kind implied by the pointer tag.
    pub fn kind(self) -> FieldKind {
        match self {
            Self::Bool(_) => FieldKind::Boolean,
            Self::Number(_) => FieldKind::Number,
            Self::Text(_) => FieldKind::Text,
        }
    }

    /// Read the native field into a store value.
    ///
    /// # Safety
    ///
    /// The pointer must be valid for reads and no mutable reference to the
    /// pointee may be live. Guaranteed by the binding registration contract
    /// (`BindingTable::register`).
    pub(crate) unsafe fn read(self) -> Value {
        match self {
            Self::Bool(p) => Value::Bool(*p),
            Self::Number(p) => Value::Number(*p),
            Self::Text(p) => Value::Text((*p).clone()),
        }
    }

    /// Write a store value into the native field, coercing mismatched kinds
    /// to the kind default.
    ///
    /// # Safety
    ///
    /// The pointer must be valid for writes and no other reference to the
    /// pointee may be live. Guaranteed by the binding registration contract
    /// (`BindingTable::register`).
    pub(crate) unsafe fn write(self, value: &Value) {
        match self {
            Self::Bool(p) => *p = value.as_bool().unwrap_or(false),
            Self::Number(p) => *p = value.as_number().unwrap_or(0.0),
            Self::Text(p) => *p = value.as_text().unwrap_or("").to_string(),
        }
    }
}

/// Where a field lives in native memory, if anywhere.
///
/// A locator carries an absolute address, a byte offset from the object's
/// registered base pointer, or neither. The address always overrides the
/// offset. Offset 0 means "no offset": a field that really sits at the start
/// of its struct must use an address locator.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldLocator {
    /// Absolute address of the field inside a native instance.
    pub addr: Option<FieldAddr>,
    /// Byte offset from the binding's base pointer (0 = unused).
    pub offset: usize,
}

impl FieldLocator {
    /// Locator for a field with no native backing.
    pub const fn unbound() -> Self {
        Self {
            addr: None,
            offset: 0,
        }
    }

    /// Locator using an absolute field address.
    pub const fn address(addr: FieldAddr) -> Self {
        Self {
            addr: Some(addr),
            offset: 0,
        }
    }

    /// Locator using a byte offset from the binding's base pointer.
    pub const fn at_offset(offset: usize) -> Self {
        Self {
            addr: None,
            offset,
        }
    }

    /// Whether binding sync may touch this field at all.
    pub fn is_bound(&self) -> bool {
        self.addr.is_some() || self.offset != 0
    }

    /// Resolve to a concrete accessor: address first, then base + offset.
    pub(crate) fn resolve(&self, base: Option<NonNull<u8>>, kind: FieldKind) -> Option<FieldAddr> {
        if let Some(addr) = self.addr {
            return Some(addr);
        }
        if self.offset == 0 {
            return None;
        }
        let p = base?.as_ptr().wrapping_add(self.offset);
        Some(match kind {
            FieldKind::Boolean => FieldAddr::Bool(p.cast()),
            FieldKind::Number => FieldAddr::Number(p.cast()),
            FieldKind::Text => FieldAddr::Text(p.cast()),
        })
    }
}
