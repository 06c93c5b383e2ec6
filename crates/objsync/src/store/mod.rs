// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Generic schema-backed object store.
//!
//! Runtime state for each touched object lives here as a dynamic key→value
//! document. Objects are created lazily from their schema (subscribe, set or
//! a binding push) and persist until the process ends; there is no deletion
//! API. All mutation is delta-merge by key - a write never clears keys it
//! does not name.

mod object;
mod value;

pub use object::{GenericObject, ObjectStore};
pub use value::Value;
