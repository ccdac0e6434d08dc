//! `velogate-runtime` – Supervisor & Operator Wiring
//!
//! Brings the pure kernel to life: one thread that re-evaluates safety and
//! publishes a gated command every tick, and the operator-side handle that
//! feeds it intents.
//!
//! # Modules
//!
//! - [`shared`] – [`SharedTeleopState`][shared::SharedTeleopState]:
//!   the mutex-guarded state both sides touch (velocity machine plus the
//!   watchdog timestamp).
//! - [`commands`] – [`CommandInterface`][commands::CommandInterface]:
//!   the operator-facing handle. Every accepted intent refreshes the
//!   watchdog.
//! - [`supervisor`] – [`Supervisor`][supervisor::Supervisor]:
//!   the periodic gate loop with explicit start/stop lifecycle. Publishes
//!   every tick and emits a final all-stop on shutdown.

pub mod commands;
pub mod shared;
pub mod supervisor;

pub use commands::CommandInterface;
pub use shared::{SharedTeleopState, TeleopState};
pub use supervisor::{Supervisor, SupervisorConfig};
