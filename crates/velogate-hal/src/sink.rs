//! [`CommandSink`] – the outbound seam of the gate.
//!
//! Whatever actually moves the robot sits behind this trait: a serial
//! driver, a message-bus publisher, a network socket. The supervisor owns
//! its sink exclusively and calls it from its own thread, so implementors
//! need `Send` but not `Sync`.

use velogate_types::{GateError, VelocityCommand};

/// Receives the gated velocity command, once per supervisor tick.
pub trait CommandSink: Send {
    /// Stable identifier used in logs and error reports.
    fn id(&self) -> &str;

    /// Deliver one command. A returned error marks the gate unhealthy but
    /// never stops the supervisor loop.
    fn publish(&mut self, cmd: VelocityCommand) -> Result<(), GateError>;
}
