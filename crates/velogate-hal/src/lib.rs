//! `velogate-hal` – Transport Abstraction Layer
//!
//! The thin boundary between the supervisor and the outside world. Two
//! directions, two seams:
//!
//! - [`sink`] – [`CommandSink`][sink::CommandSink]: the outbound trait the
//!   supervisor publishes velocity commands through, once per tick.
//! - [`scan`] – [`ScanBuffer`][scan::ScanBuffer]: the inbound latest-value
//!   cell range sweeps arrive through. Readers never block writers.
//! - [`sim`] – [`SimSink`][sim::SimSink] and [`FaultySink`][sim::FaultySink]:
//!   in-process test doubles for the outbound seam.

pub mod scan;
pub mod sim;
pub mod sink;

pub use scan::ScanBuffer;
pub use sim::{FaultySink, SimSink};
pub use sink::CommandSink;
