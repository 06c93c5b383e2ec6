// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Outbound message sinks.
//!
//! A sink consumes one fully-built document per call. Handlers never share a
//! scratch buffer: they hand finished [`Message`] values to the sink, so one
//! document is always serialized completely before the next one starts.

use crate::protocol::Message;
use std::io::{self, Write};

/// Destination for outbound protocol documents.
pub trait MessageSink {
    /// Emit one complete outbound document.
    fn send(&mut self, message: &Message) -> io::Result<()>;
}

/// Writes one JSON document per line, flushing after each.
///
/// This is the wire framing for serial-style transports: newline-delimited
/// JSON, flushed eagerly so a slow cadence never batches documents.
#[derive(Debug)]
pub struct LineSink<W: Write> {
    writer: W,
}

impl<W: Write> LineSink<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Unwrap the inner writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> MessageSink for LineSink<W> {
    fn send(&mut self, message: &Message) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, message).map_err(io::Error::from)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}

/// Collects messages in memory.
///
/// Used by tests and by hosts that deliver documents out-of-band.
#[derive(Debug, Default)]
pub struct CollectSink {
    messages: Vec<Message>,
}

impl CollectSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages collected so far, in emission order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Drain the collected messages.
    pub fn take(&mut self) -> Vec<Message> {
        std::mem::take(&mut self.messages)
    }
}

impl MessageSink for CollectSink {
    fn send(&mut self, message: &Message) -> io::Result<()> {
        self.messages.push(message.clone());
        Ok(())
    }
}
