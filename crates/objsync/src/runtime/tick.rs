// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Subscription broadcaster.

use crate::config::TICK_MIN_INTERVAL_MS;
use crate::protocol::Message;
use crate::runtime::Runtime;
use crate::sink::MessageSink;
use crate::store::Value;
use serde_json::{Map, Value as JsonValue};
use std::io;

impl Runtime {
    /// Broadcast pass over subscribed objects.
    ///
    /// `now_ms` is a caller-supplied monotonic clock reading. At most one
    /// pass per [`TICK_MIN_INTERVAL_MS`]; at most `max_active_subscriptions`
    /// objects visited per pass, in subscriber-set order. Names with no
    /// store entry or a `subscribable = false` schema are skipped. Each
    /// eligible object gets one update-delta carrying every schema field
    /// (stored value or kind default).
    pub fn tick(&mut self, now_ms: u64, sink: &mut dyn MessageSink) -> io::Result<()> {
        if now_ms.saturating_sub(self.last_send_ms) <= TICK_MIN_INTERVAL_MS {
            return Ok(());
        }
        self.last_send_ms = now_ms;

        let mut sent = 0usize;
        // TODO: rotate the start point; fixed order plus a small cap can
        // starve names late in the set.
        for name in &self.subscribers {
            if sent >= self.max_active_subscriptions {
                break;
            }
            let Some(object) = self.store.get(name) else {
                continue;
            };
            let schema = self.registry.get(name);
            if let Some(s) = schema {
                if !s.subscribable {
                    continue;
                }
            }

            let mut changes = Map::new();
            match schema {
                Some(s) => {
                    for f in &s.fields {
                        let v = object
                            .get(&f.name)
                            .cloned()
                            .unwrap_or_else(|| Value::default_for(f.kind));
                        changes.insert(f.name.clone(), JsonValue::from(&v));
                    }
                }
                None => {
                    for (key, v) in object.values() {
                        changes.insert(key.clone(), JsonValue::from(v));
                    }
                }
            }

            sink.send(&Message::Update {
                path: name.clone(),
                changes,
            })?;
            sent += 1;
        }
        Ok(())
    }
}
