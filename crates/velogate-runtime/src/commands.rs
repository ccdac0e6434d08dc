//! [`CommandInterface`] – the operator-facing side of the gate.
//!
//! Every accepted intent does two things atomically: applies the velocity
//! transition and stamps the watchdog clock. There is no way to refresh the
//! watchdog without commanding, and no way to command without refreshing it.

use std::sync::Arc;
use std::time::Instant;

use tracing::debug;
use velogate_kernel::SafetyConfig;
use velogate_types::{TargetSpeed, TeleopIntent};

use crate::shared::SharedTeleopState;

/// Cheap-to-clone handle operators drive the gate through.
#[derive(Debug, Clone)]
pub struct CommandInterface {
    state: SharedTeleopState,
    config: Arc<SafetyConfig>,
}

impl CommandInterface {
    pub fn new(state: SharedTeleopState, config: Arc<SafetyConfig>) -> Self {
        Self { state, config }
    }

    /// Apply one intent and refresh the watchdog.
    pub fn apply(&self, intent: TeleopIntent) {
        let mut state = self.state.lock();
        state.velocity.apply(intent, &self.config);
        state.last_command = Some(Instant::now());
        debug!(?intent, "operator intent accepted");
    }

    pub fn move_forward(&self) {
        self.apply(TeleopIntent::MoveForward);
    }

    pub fn move_backward(&self) {
        self.apply(TeleopIntent::MoveBackward);
    }

    pub fn rotate_clockwise(&self) {
        self.apply(TeleopIntent::RotateClockwise);
    }

    pub fn rotate_counter_clockwise(&self) {
        self.apply(TeleopIntent::RotateCounterClockwise);
    }

    pub fn stop(&self) {
        self.apply(TeleopIntent::Stop);
    }

    pub fn increase_linear_speed(&self) {
        self.apply(TeleopIntent::IncreaseLinearSpeed);
    }

    pub fn decrease_linear_speed(&self) {
        self.apply(TeleopIntent::DecreaseLinearSpeed);
    }

    pub fn increase_angular_speed(&self) {
        self.apply(TeleopIntent::IncreaseAngularSpeed);
    }

    pub fn decrease_angular_speed(&self) {
        self.apply(TeleopIntent::DecreaseAngularSpeed);
    }

    /// Current speed targets, for display.
    pub fn target_speed(&self) -> TargetSpeed {
        self.state.lock().velocity.target()
    }
}
