// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! objsync-sim - simulated objsync device on stdin/stdout.
//!
//! Registers the builtin `laser` and `plasma` objects, reads request lines
//! from stdin and writes protocol documents to stdout. Once per interval a
//! random sensor value is written into the native structs and pushed through
//! the typed bindings, so subscribers see live updates - the same
//! struct-first workflow device firmware uses.
//!
//! ```text
//! $ printf '{"type":"subscribe","id":"s1","path":"laser"}\n' | objsync-sim
//! ```

use clap::Parser;
use objsync::{FieldAddr, LineFramer, LineSink, Runtime, SchemaBuilder};
use std::io::Read;
use std::ptr::NonNull;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Native laser subsystem state.
#[derive(Debug, Default)]
struct LaserState {
    enabled: bool,
    power: f64,
    mode: String,
}

/// Native plasma subsystem state.
#[derive(Debug, Default)]
struct PlasmaState {
    temperature: f64,
    active: bool,
    profile: String,
}

/// Simulated objsync device on stdin/stdout
#[derive(Parser, Debug)]
#[command(name = "objsync-sim")]
#[command(about = "Simulated objsync device speaking newline-delimited JSON")]
struct Args {
    /// Interval between simulated sensor samples, in milliseconds
    #[arg(long, default_value = "1000")]
    sensor_interval_ms: u64,

    /// Maximum subscribed objects broadcast per tick
    #[arg(long, default_value = "5")]
    max_active: usize,

    /// Disable the random sensor generator
    #[arg(long)]
    no_sensor: bool,
}

fn register_builtins(runtime: &mut Runtime, laser: &mut LaserState, plasma: &mut PlasmaState) {
    runtime.register_schema(Arc::new(
        SchemaBuilder::new("laser")
            .field_at("enabled", FieldAddr::Bool(&mut laser.enabled))
            .field_at("power", FieldAddr::Number(&mut laser.power))
            .field_at("mode", FieldAddr::Text(&mut laser.mode))
            .build(),
    ));
    runtime.register_schema(Arc::new(
        SchemaBuilder::new("plasma")
            .field_at("temperature", FieldAddr::Number(&mut plasma.temperature))
            .field_at("active", FieldAddr::Bool(&mut plasma.active))
            .field_at("profile", FieldAddr::Text(&mut plasma.profile))
            .build(),
    ));
    // SAFETY: both instances are boxed by main, stay at stable addresses for
    // the whole process and are only touched between runtime calls.
    unsafe {
        runtime.register_binding("laser", NonNull::from(&mut *laser).cast());
        runtime.register_binding("plasma", NonNull::from(&mut *plasma).cast());
    }
}

/// Reader thread: forwards raw stdin chunks so the main loop never blocks
/// on input while tick and sensor cadences are due.
fn spawn_stdin_reader() -> mpsc::Receiver<Vec<u8>> {
    let (tx, rx) = mpsc::channel::<Vec<u8>>();
    thread::spawn(move || {
        let mut stdin = std::io::stdin().lock();
        let mut chunk = [0u8; 256];
        loop {
            match stdin.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => {
                    if tx.send(chunk[..n].to_vec()).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("stdin read failed: {e}");
                    break;
                }
            }
        }
    });
    rx
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut laser = Box::new(LaserState::default());
    let mut plasma = Box::new(PlasmaState::default());
    let mut runtime = Runtime::new();
    runtime.set_max_active_subscriptions(args.max_active);
    register_builtins(&mut runtime, &mut laser, &mut plasma);

    let started = Instant::now();
    let now_ms = move || started.elapsed().as_millis() as u64;

    let rx = spawn_stdin_reader();
    let mut framer = LineFramer::new();
    let mut sink = LineSink::new(std::io::stdout());
    let mut last_sample_ms = 0u64;

    info!("objsync-sim ready (laser, plasma)");
    loop {
        match rx.recv_timeout(Duration::from_millis(50)) {
            Ok(bytes) => {
                for line in framer.push_bytes(&bytes, now_ms()) {
                    debug!("rx: {line}");
                    runtime.process_line(&line, &mut sink)?;
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                info!("stdin closed, exiting");
                return Ok(());
            }
        }
        framer.poll_timeout(now_ms());

        if !args.no_sensor {
            let now = now_ms();
            if now.saturating_sub(last_sample_ms) >= args.sensor_interval_ms {
                last_sample_ms = now;
                // struct-first workflow: write the native fields, then
                // publish through the bindings
                let sample = 10.0 + fastrand::f64() * 30.0;
                laser.power = sample;
                plasma.temperature = sample;
                runtime.push_to_store("laser", &mut sink)?;
                runtime.push_to_store("plasma", &mut sink)?;
            }
        }

        runtime.tick(now_ms(), &mut sink)?;
    }
}
