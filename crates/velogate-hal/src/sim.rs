//! [`SimSink`] and [`FaultySink`] – in-process doubles for the outbound seam.
//!
//! `SimSink` records everything it is told so tests can assert on the exact
//! command sequence the supervisor emitted. `FaultySink` refuses every
//! publish, for exercising the unhealthy path.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::trace;
use velogate_types::{GateError, VelocityCommand};

use crate::sink::CommandSink;

/// Shared view into the commands a [`SimSink`] has received.
pub type CommandLog = Arc<Mutex<Vec<VelocityCommand>>>;

/// Records every published command.
#[derive(Debug)]
pub struct SimSink {
    id: String,
    log: CommandLog,
}

impl SimSink {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle for inspecting the recorded commands after the supervisor has
    /// taken ownership of the sink.
    pub fn log(&self) -> CommandLog {
        Arc::clone(&self.log)
    }
}

impl CommandSink for SimSink {
    fn id(&self) -> &str {
        &self.id
    }

    fn publish(&mut self, cmd: VelocityCommand) -> Result<(), GateError> {
        trace!(sink = %self.id, linear = cmd.linear, angular = cmd.angular, "sim publish");
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(cmd);
        Ok(())
    }
}

/// Fails every publish with a sink error.
#[derive(Debug)]
pub struct FaultySink {
    id: String,
}

impl FaultySink {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl CommandSink for FaultySink {
    fn id(&self) -> &str {
        &self.id
    }

    fn publish(&mut self, _cmd: VelocityCommand) -> Result<(), GateError> {
        Err(GateError::Sink {
            sink: self.id.clone(),
            details: "simulated transport failure".to_string(),
        })
    }
}
