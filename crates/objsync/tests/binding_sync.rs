// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Typed binding integration tests
//!
//! Exercises field-level sync between native structs and the generic store
//! through address and offset locators, in both directions.

use objsync::{
    CollectSink, FieldAddr, FieldDescriptor, FieldKind, FieldLocator, ObjectSchema, Runtime,
    SchemaBuilder,
};
use serde_json::json;
use std::mem::offset_of;
use std::ptr::NonNull;
use std::sync::Arc;

/// Native laser subsystem state, bound by absolute field addresses.
#[derive(Debug, Default)]
struct LaserState {
    enabled: bool,
    power: f64,
    mode: String,
}

/// Native pump state, bound by byte offsets from the instance base.
///
/// `active` sits at offset 0, which the locator treats as "unused", so it
/// has to be bound by address instead.
#[repr(C)]
#[derive(Debug, Default)]
struct PumpState {
    active: bool,
    pressure: f64,
    label: String,
}

fn docs(sink: &mut CollectSink) -> Vec<serde_json::Value> {
    sink.take()
        .iter()
        .map(|m| serde_json::to_value(m).expect("serialize"))
        .collect()
}

fn laser_runtime(laser: &mut LaserState) -> Runtime {
    let mut runtime = Runtime::new();
    runtime.register_schema(Arc::new(
        SchemaBuilder::new("laser")
            .field_at("enabled", FieldAddr::Bool(&mut laser.enabled))
            .field_at("power", FieldAddr::Number(&mut laser.power))
            .field_at("mode", FieldAddr::Text(&mut laser.mode))
            .build(),
    ));
    // SAFETY: `laser` outlives the runtime in every test below and is not
    // moved while registered; the schema's addresses point into it.
    unsafe {
        runtime.register_binding("laser", NonNull::from(&mut *laser).cast());
    }
    runtime
}

#[test]
fn test_push_then_get_round_trips_native_values() {
    let mut laser = Box::new(LaserState::default());
    laser.enabled = true;
    laser.power = 33.25;
    laser.mode = "burst".to_string();
    let mut runtime = laser_runtime(&mut laser);

    let mut sink = CollectSink::new();
    runtime.push_to_store("laser", &mut sink).expect("push");
    runtime
        .process_line(r#"{"type":"get","id":"g1","path":"laser"}"#, &mut sink)
        .expect("get");

    let out = docs(&mut sink);
    // no subscriber: the push itself stays silent
    assert_eq!(out.len(), 1);
    assert_eq!(out[0]["type"], "state");
    assert_eq!(out[0]["value"]["enabled"], true);
    let power = out[0]["value"]["power"].as_f64().expect("number");
    assert!((power - 33.25).abs() < 1e-9);
    assert_eq!(out[0]["value"]["mode"], "burst");
}

#[test]
fn test_push_broadcasts_full_field_set_to_subscriber() {
    let mut laser = Box::new(LaserState::default());
    let mut runtime = laser_runtime(&mut laser);
    let mut sink = CollectSink::new();
    runtime
        .process_line(r#"{"type":"subscribe","path":"laser"}"#, &mut sink)
        .expect("subscribe");
    sink.take();

    laser.power = 18.0;
    runtime.push_to_store("laser", &mut sink).expect("push");

    let out = docs(&mut sink);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0]["type"], "update");
    assert_eq!(
        out[0]["changes"],
        json!({"enabled": false, "power": 18.0, "mode": ""})
    );
}

#[test]
fn test_set_pulls_coerced_values_into_native_memory() {
    let mut laser = Box::new(LaserState::default());
    let mut runtime = laser_runtime(&mut laser);
    let mut sink = CollectSink::new();

    runtime
        .process_line(
            r#"{"type":"set","path":"laser","changes":{"enabled":true,"power":12.5,"mode":"cw"}}"#,
            &mut sink,
        )
        .expect("set");

    assert!(laser.enabled);
    assert!((laser.power - 12.5).abs() < 1e-9);
    assert_eq!(laser.mode, "cw");
}

#[test]
fn test_set_integer_widens_into_native_f64() {
    let mut laser = Box::new(LaserState::default());
    let mut runtime = laser_runtime(&mut laser);
    let mut sink = CollectSink::new();

    runtime
        .process_line(r#"{"type":"set","path":"laser","changes":{"power":42}}"#, &mut sink)
        .expect("set");
    assert!((laser.power - 42.0).abs() < 1e-9);
}

#[test]
fn test_set_wrong_kind_writes_native_default() {
    let mut laser = Box::new(LaserState::default());
    laser.power = 7.0;
    let mut runtime = laser_runtime(&mut laser);
    let mut sink = CollectSink::new();

    // text into a number field: stored as text, pulled as the kind default
    runtime
        .process_line(
            r#"{"type":"set","path":"laser","changes":{"power":"hot"}}"#,
            &mut sink,
        )
        .expect("set");
    assert_eq!(laser.power, 0.0);
}

#[test]
fn test_set_sync_survives_unsubscribe() {
    let mut laser = Box::new(LaserState::default());
    let mut runtime = laser_runtime(&mut laser);
    let mut sink = CollectSink::new();
    runtime
        .process_line(r#"{"type":"subscribe","path":"laser"}"#, &mut sink)
        .expect("subscribe");
    runtime
        .process_line(r#"{"type":"unsubscribe","path":"laser"}"#, &mut sink)
        .expect("unsubscribe");
    sink.take();

    runtime
        .process_line(r#"{"type":"set","path":"laser","changes":{"power":3.5}}"#, &mut sink)
        .expect("set");

    let out = docs(&mut sink);
    assert_eq!(out.len(), 1, "ack only, no update");
    assert_eq!(out[0]["type"], "set.response");
    assert!((laser.power - 3.5).abs() < 1e-9, "binding still synced");
}

#[test]
fn test_offset_locators_resolve_against_registered_base() {
    let mut pump = Box::new(PumpState::default());
    let mut runtime = Runtime::new();
    runtime.register_schema(Arc::new(
        SchemaBuilder::new("pump")
            .field_at("active", FieldAddr::Bool(&mut pump.active))
            .field_at_offset("pressure", FieldKind::Number, offset_of!(PumpState, pressure))
            .field_at_offset("label", FieldKind::Text, offset_of!(PumpState, label))
            .build(),
    ));
    // SAFETY: `pump` is boxed, not moved while registered, and outlives the
    // runtime; offsets above come from the same struct definition.
    unsafe {
        runtime.register_binding("pump", NonNull::from(&mut *pump).cast());
    }

    let mut sink = CollectSink::new();
    runtime
        .process_line(
            r#"{"type":"set","path":"pump","changes":{"active":true,"pressure":2.25,"label":"main"}}"#,
            &mut sink,
        )
        .expect("set");
    assert!(pump.active);
    assert!((pump.pressure - 2.25).abs() < 1e-9);
    assert_eq!(pump.label, "main");

    pump.pressure = 9.75;
    runtime.push_to_store("pump", &mut sink).expect("push");
    sink.take();
    runtime
        .process_line(r#"{"type":"get","path":"pump"}"#, &mut sink)
        .expect("get");
    let out = docs(&mut sink);
    let pressure = out[0]["value"]["pressure"].as_f64().expect("number");
    assert!((pressure - 9.75).abs() < 1e-9);
}

#[test]
fn test_address_overrides_offset_when_both_present() {
    let mut laser = Box::new(LaserState::default());
    let mut decoy = Box::new(PumpState::default());
    let mut runtime = Runtime::new();
    // descriptor carries both an address (into `laser`) and an offset that
    // would land in `decoy`; the address must win
    runtime.register_schema(Arc::new(ObjectSchema {
        name: "laser".to_string(),
        fields: vec![
            FieldDescriptor::new("power", FieldKind::Number).with_locator(FieldLocator {
                addr: Some(FieldAddr::Number(&mut laser.power)),
                offset: offset_of!(PumpState, pressure),
            }),
        ],
        subscribable: true,
        read_only: false,
        discoverable: true,
    }));
    // SAFETY: both boxes outlive the runtime and stay in place.
    unsafe {
        runtime.register_binding("laser", NonNull::from(&mut *decoy).cast());
    }

    let mut sink = CollectSink::new();
    runtime
        .process_line(r#"{"type":"set","path":"laser","changes":{"power":5.5}}"#, &mut sink)
        .expect("set");

    assert!((laser.power - 5.5).abs() < 1e-9, "address target written");
    assert_eq!(decoy.pressure, 0.0, "offset base untouched");
}

#[test]
fn test_unbound_fields_never_touch_native_memory() {
    let mut laser = Box::new(LaserState::default());
    let mut runtime = Runtime::new();
    runtime.register_schema(Arc::new(
        SchemaBuilder::new("laser")
            .field_at("power", FieldAddr::Number(&mut laser.power))
            .string_field("note")
            .build(),
    ));
    // SAFETY: `laser` outlives the runtime and stays in place.
    unsafe {
        runtime.register_binding("laser", NonNull::from(&mut *laser).cast());
    }

    let mut sink = CollectSink::new();
    runtime
        .process_line(
            r#"{"type":"set","path":"laser","changes":{"note":"store only","power":1.0}}"#,
            &mut sink,
        )
        .expect("set");
    sink.take();

    // the unbound field lives in the store, not in the struct
    runtime
        .process_line(r#"{"type":"get","path":"laser"}"#, &mut sink)
        .expect("get");
    let out = docs(&mut sink);
    assert_eq!(out[0]["value"]["note"], "store only");
    assert!((laser.power - 1.0).abs() < 1e-9);
}

#[test]
fn test_set_numeric_field_updates_store_and_binding() {
    let mut laser = Box::new(LaserState::default());
    let mut runtime = laser_runtime(&mut laser);
    let mut sink = CollectSink::new();
    runtime
        .process_line(r#"{"type":"subscribe","path":"laser"}"#, &mut sink)
        .expect("subscribe");
    sink.take();

    runtime
        .set_numeric_field("laser", "power", 21.0, &mut sink)
        .expect("set_numeric_field");

    let out = docs(&mut sink);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0]["type"], "update");
    assert_eq!(out[0]["changes"], json!({"power": 21.0}));
    assert!((laser.power - 21.0).abs() < 1e-9);
}
