//! `velogate-cli` – VeloGate Command Line Interface
//!
//! This binary is the bench console for the VeloGate safety supervisor.  It:
//!
//! 1. Loads `~/.velogate/config.toml`, writing the defaults there on first
//!    run.
//! 2. Starts the supervisor thread against a trace-logging command sink,
//!    plus a synthetic open-space scan feed when `[scan] simulate` is set.
//! 3. Drops the user into an **interactive teleop REPL** (`w`/`s`/`a`/`d`
//!    motion keys, speed ramping, `help`, `quit`).
//! 4. Intercepts **Ctrl-C** so the supervisor always shuts down through its
//!    final all-stop.

mod config;
mod repl;

use colored::Colorize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

use velogate_hal::{CommandSink, ScanBuffer};
use velogate_runtime::{CommandInterface, SharedTeleopState, Supervisor};
use velogate_types::{GateError, RangeScan, ScanLayout, VelocityCommand};

/// Log-only sink for bench runs: every published command goes to tracing,
/// changes of command additionally at info level.
struct TraceSink {
    last: Option<VelocityCommand>,
}

impl TraceSink {
    fn new() -> Self {
        Self { last: None }
    }
}

impl CommandSink for TraceSink {
    fn id(&self) -> &str {
        "trace"
    }

    fn publish(&mut self, cmd: VelocityCommand) -> Result<(), GateError> {
        if self.last != Some(cmd) {
            info!(linear = cmd.linear, angular = cmd.angular, "command changed");
            self.last = Some(cmd);
        } else {
            debug!(linear = cmd.linear, angular = cmd.angular, "command");
        }
        Ok(())
    }
}

fn main() {
    // ── Structured logging ────────────────────────────────────────────────
    // Initialise tracing-subscriber using RUST_LOG (defaults to "info").
    // Set VELOGATE_LOG_FORMAT=json to emit newline-delimited JSON logs
    // suitable for log aggregators.  The REPL's user-facing output still
    // uses println! for UX consistency.
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    if std::env::var("VELOGATE_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .compact()
            .init();
    }

    print_banner();

    // ── Configuration ─────────────────────────────────────────────────────
    let cfg = match config::load() {
        Ok(Some(cfg)) => {
            println!(
                "  Config loaded from {}",
                config::config_path().display().to_string().bold()
            );
            cfg
        }
        Ok(None) => {
            let cfg = config::Config::default();
            match config::save(&cfg) {
                Ok(()) => println!(
                    "  No config found; defaults written to {}",
                    config::config_path().display().to_string().bold()
                ),
                Err(e) => println!("{}: {}", "Could not write default config".red(), e),
            }
            cfg
        }
        Err(e) => {
            println!("{}: {}", "Config error".red(), e);
            println!("  Using default configuration.");
            config::Config::default()
        }
    };

    // ── Shared shutdown flag / Ctrl-C handler ─────────────────────────────
    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_clone = shutdown.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        println!();
        println!("{}", "⚠  Ctrl-C received – stopping the gate …".yellow().bold());
        shutdown_clone.store(true, Ordering::SeqCst);
    }) {
        warn!(error = %e, "Failed to install Ctrl-C handler; use `quit` to exit cleanly");
    }

    // ── Supervisor wiring ─────────────────────────────────────────────────
    let safety = Arc::new(cfg.safety_config());
    let state = SharedTeleopState::new();
    let scans = ScanBuffer::new();
    let operator = CommandInterface::new(state.clone(), Arc::clone(&safety));

    let mut supervisor = match Supervisor::start(
        safety,
        cfg.supervisor_config(),
        state,
        scans.clone(),
        cfg.scan_layout(),
        Box::new(TraceSink::new()),
    ) {
        Ok(supervisor) => supervisor,
        Err(e) => {
            println!("{}: {}", "Failed to start the supervisor".red(), e);
            std::process::exit(1);
        }
    };

    let feed = if cfg.scan.simulate {
        println!("  {}", "Synthetic open-space scan feed active.".dimmed());
        Some(spawn_scan_feed(
            scans,
            cfg.scan_layout(),
            Duration::from_millis(cfg.period_ms),
            shutdown.clone(),
        ))
    } else {
        println!(
            "  {}",
            "No scan feed configured; linear motion will stay vetoed.".yellow()
        );
        None
    };

    println!();
    println!("  Type {} for the key map.\n", "help".bold().cyan());

    // ── Interactive REPL ──────────────────────────────────────────────────
    repl::run(&operator, shutdown.clone());

    // ── Shutdown ──────────────────────────────────────────────────────────
    shutdown.store(true, Ordering::SeqCst);
    supervisor.stop();
    if let Some(feed) = feed
        && feed.join().is_err()
    {
        warn!("scan feed thread panicked");
    }
    println!("{}", "  ✓ Gate stopped; final all-stop published.".green());
}

/// Publish synthetic open-space sweeps until shutdown.
fn spawn_scan_feed(
    scans: ScanBuffer,
    layout: ScanLayout,
    period: Duration,
    shutdown: Arc<AtomicBool>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        while !shutdown.load(Ordering::SeqCst) {
            scans.publish(RangeScan::new(layout, vec![10.0; layout.count]));
            thread::sleep(period);
        }
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Banner
// ─────────────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("{}", r#" _   __     __      ______      __     "#.bold().cyan());
    println!("{}", r#"| | / /__  / /___  / ___/ /____/ /____ "#.bold().cyan());
    println!("{}", r#"| |/ / -_)/ / _ \/ (_ / __/ _  / -_)   "#.bold().cyan());
    println!("{}", r#"|___/\__//_/\___/\___/\__/\_,_/\__/    "#.bold().cyan());
    println!();
    println!(
        "  {} {}",
        "VeloGate".bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
    println!("  Safe Teleoperation Velocity Supervisor");
    println!();
}
