//! `velogate-kernel` – Safety & Decision Core
//!
//! The pure decision logic of VeloGate. It holds no threads, no clocks it
//! did not receive from the caller, and no transport handles; it enforces
//! the velocity and proximity rules the supervisor consults every tick.
//!
//! # Modules
//!
//! - [`config`] – [`SafetyConfig`][config::SafetyConfig]:
//!   the immutable parameter block (speed caps, increments, watchdog window,
//!   safety distance, front/rear arcs), validated once at construction.
//! - [`velocity`] – [`VelocityState`][velocity::VelocityState]:
//!   the operator-facing velocity state machine: bounded incremental speed
//!   ramping and magnitude-preserving direction reversal.
//! - [`arcs`] – [`ScanArc`][arcs::ScanArc]:
//!   resolves a configured angular sector into scan index ranges for a given
//!   sensor layout, including sectors that wrap across the sweep boundary.
//! - [`proximity`] – [`ProximityGuard`][proximity::ProximityGuard]:
//!   the pure obstacle check consulted before any linear motion is emitted.
//!   Fails closed when scan data is missing.
//! - [`throttle`] – [`WarnThrottle`][throttle::WarnThrottle]:
//!   a timestamp-gated filter that limits operator advisories to one per
//!   interval.

pub mod arcs;
pub mod config;
pub mod proximity;
pub mod throttle;
pub mod velocity;

pub use arcs::ScanArc;
pub use config::SafetyConfig;
pub use proximity::{ProximityGuard, SafetyVerdict};
pub use throttle::WarnThrottle;
pub use velocity::VelocityState;
