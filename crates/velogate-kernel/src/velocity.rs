//! [`VelocityState`] – the operator-facing velocity state machine.
//!
//! Tracks two things: the speed *targets* the operator has ramped up or down
//! (always in `[0, max]`), and the signed velocities currently requested
//! (direction applied, at most one axis active at a time). The supervisor
//! may zero the signed velocities at any tick; the targets survive so the
//! operator's chosen speed is not lost to a passing obstacle.

use velogate_types::{TargetSpeed, TeleopIntent, VelocityCommand};

use crate::config::SafetyConfig;

/// Mutable velocity state shared between the command interface and the
/// supervisor loop. All methods are pure state transitions; callers provide
/// the synchronisation.
#[derive(Debug, Clone, Default)]
pub struct VelocityState {
    target: TargetSpeed,
    linear_vel: f32,
    angular_vel: f32,
}

impl VelocityState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The operator's current speed targets.
    pub fn target(&self) -> TargetSpeed {
        self.target
    }

    /// Signed linear velocity currently requested (m/s).
    pub fn linear_vel(&self) -> f32 {
        self.linear_vel
    }

    /// Signed angular velocity currently requested (rad/s).
    pub fn angular_vel(&self) -> f32 {
        self.angular_vel
    }

    /// The command this state would emit, before any safety gating.
    pub fn command(&self) -> VelocityCommand {
        VelocityCommand::new(self.linear_vel, self.angular_vel)
    }

    /// Dispatch a discrete operator intent.
    pub fn apply(&mut self, intent: TeleopIntent, config: &SafetyConfig) {
        match intent {
            TeleopIntent::MoveForward => self.move_forward(),
            TeleopIntent::MoveBackward => self.move_backward(),
            TeleopIntent::RotateClockwise => self.rotate_clockwise(),
            TeleopIntent::RotateCounterClockwise => self.rotate_counter_clockwise(),
            TeleopIntent::Stop => self.stop(),
            TeleopIntent::IncreaseLinearSpeed => self.increase_linear_speed(config),
            TeleopIntent::DecreaseLinearSpeed => self.decrease_linear_speed(config),
            TeleopIntent::IncreaseAngularSpeed => self.increase_angular_speed(config),
            TeleopIntent::DecreaseAngularSpeed => self.decrease_angular_speed(config),
        }
    }

    /// Drive forward at the linear target. Rotation stops: the platform does
    /// not arc.
    pub fn move_forward(&mut self) {
        self.linear_vel = self.target.linear;
        self.angular_vel = 0.0;
    }

    /// Drive backward at the linear target. Rotation stops.
    pub fn move_backward(&mut self) {
        self.linear_vel = -self.target.linear;
        self.angular_vel = 0.0;
    }

    /// Rotate in place clockwise at the angular target. Translation stops.
    pub fn rotate_clockwise(&mut self) {
        self.angular_vel = self.target.angular;
        self.linear_vel = 0.0;
    }

    /// Rotate in place counter-clockwise at the angular target.
    pub fn rotate_counter_clockwise(&mut self) {
        self.angular_vel = -self.target.angular;
        self.linear_vel = 0.0;
    }

    /// Operator-requested stop. Zeroes the signed velocities and both speed
    /// targets; the operator ramps up again from rest.
    pub fn stop(&mut self) {
        self.target = TargetSpeed::default();
        self.linear_vel = 0.0;
        self.angular_vel = 0.0;
    }

    /// Raise the linear target one increment, capped at the configured
    /// maximum. Takes effect on the next motion intent.
    pub fn increase_linear_speed(&mut self, config: &SafetyConfig) {
        self.target.linear =
            (self.target.linear + config.linear_vel_increment).min(config.max_linear_vel);
    }

    /// Lower the linear target one increment, floored at zero.
    pub fn decrease_linear_speed(&mut self, config: &SafetyConfig) {
        self.target.linear = (self.target.linear - config.linear_vel_increment).max(0.0);
    }

    /// Raise the angular target one increment, capped at the configured
    /// maximum.
    pub fn increase_angular_speed(&mut self, config: &SafetyConfig) {
        self.target.angular =
            (self.target.angular + config.angular_vel_increment).min(config.max_angular_vel);
    }

    /// Lower the angular target one increment, floored at zero.
    pub fn decrease_angular_speed(&mut self, config: &SafetyConfig) {
        self.target.angular = (self.target.angular - config.angular_vel_increment).max(0.0);
    }

    /// Watchdog action: zero both signed velocities, keep targets.
    pub fn halt(&mut self) {
        self.linear_vel = 0.0;
        self.angular_vel = 0.0;
    }

    /// Obstacle action: zero linear motion only. Rotation in place stays
    /// available so the operator can turn away from the obstacle.
    pub fn veto_linear(&mut self) {
        self.linear_vel = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramped(linear_steps: u32, angular_steps: u32, config: &SafetyConfig) -> VelocityState {
        let mut state = VelocityState::new();
        for _ in 0..linear_steps {
            state.increase_linear_speed(config);
        }
        for _ in 0..angular_steps {
            state.increase_angular_speed(config);
        }
        state
    }

    #[test]
    fn fresh_state_is_stationary() {
        let state = VelocityState::new();
        assert!(state.command().is_zero());
        assert_eq!(state.target(), TargetSpeed::default());
    }

    #[test]
    fn forward_uses_linear_target_and_stops_rotation() {
        let config = SafetyConfig::default();
        let mut state = ramped(4, 4, &config);
        state.rotate_clockwise();
        state.move_forward();
        assert!((state.linear_vel() - 0.2).abs() < 1e-6);
        assert_eq!(state.angular_vel(), 0.0);
    }

    #[test]
    fn backward_negates_the_target() {
        let config = SafetyConfig::default();
        let mut state = ramped(2, 0, &config);
        state.move_backward();
        assert!((state.linear_vel() + 0.1).abs() < 1e-6);
    }

    #[test]
    fn reversal_preserves_the_speed_magnitude() {
        let config = SafetyConfig::default();
        // Six increments of 0.05 ramp the target to 0.3.
        let mut state = ramped(6, 0, &config);
        state.move_backward();
        assert!((state.linear_vel() + 0.3).abs() < 1e-6);
        state.move_forward();
        assert!((state.linear_vel() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn rotation_stops_translation() {
        let config = SafetyConfig::default();
        let mut state = ramped(2, 3, &config);
        state.move_forward();
        state.rotate_counter_clockwise();
        assert_eq!(state.linear_vel(), 0.0);
        assert!((state.angular_vel() + 0.15).abs() < 1e-6);
    }

    #[test]
    fn linear_target_saturates_at_cap() {
        let config = SafetyConfig::default();
        // 0.05 per step against a 1.0 cap: 25 steps overshoot.
        let state = ramped(25, 0, &config);
        assert!((state.target().linear - config.max_linear_vel).abs() < 1e-6);
    }

    #[test]
    fn angular_target_saturates_at_cap_without_touching_linear() {
        let config = SafetyConfig::default();
        let state = ramped(0, 25, &config);
        assert!((state.target().angular - config.max_angular_vel).abs() < 1e-6);
        assert_eq!(state.target().linear, 0.0);
    }

    #[test]
    fn decrease_floors_at_zero() {
        let config = SafetyConfig::default();
        let mut state = ramped(1, 1, &config);
        for _ in 0..5 {
            state.decrease_linear_speed(&config);
            state.decrease_angular_speed(&config);
        }
        assert_eq!(state.target().linear, 0.0);
        assert_eq!(state.target().angular, 0.0);
    }

    #[test]
    fn ramping_mid_motion_waits_for_the_next_motion_intent() {
        let config = SafetyConfig::default();
        let mut state = ramped(2, 0, &config);
        state.move_backward();
        state.increase_linear_speed(&config);
        // The active velocity keeps the old magnitude until re-commanded.
        assert!((state.linear_vel() + 0.1).abs() < 1e-6);
        state.move_backward();
        assert!((state.linear_vel() + 0.15).abs() < 1e-6);
    }

    #[test]
    fn halt_zeroes_velocities_but_keeps_targets() {
        let config = SafetyConfig::default();
        let mut state = ramped(3, 2, &config);
        state.move_forward();
        state.halt();
        assert!(state.command().is_zero());
        assert!((state.target().linear - 0.15).abs() < 1e-6);
        assert!((state.target().angular - 0.1).abs() < 1e-6);
    }

    #[test]
    fn veto_keeps_rotation_available() {
        let config = SafetyConfig::default();
        let mut state = ramped(2, 2, &config);
        state.rotate_clockwise();
        state.veto_linear();
        assert_eq!(state.linear_vel(), 0.0);
        assert!((state.angular_vel() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn apply_dispatches_every_intent() {
        let config = SafetyConfig::default();
        let mut state = VelocityState::new();
        state.apply(TeleopIntent::IncreaseLinearSpeed, &config);
        state.apply(TeleopIntent::MoveForward, &config);
        assert!(state.linear_vel() > 0.0);
        state.apply(TeleopIntent::Stop, &config);
        assert!(state.command().is_zero());
    }

    #[test]
    fn stop_resets_the_targets_as_well() {
        let config = SafetyConfig::default();
        let mut state = ramped(3, 3, &config);
        state.move_forward();
        state.stop();
        assert!(state.command().is_zero());
        assert_eq!(state.target(), TargetSpeed::default());
    }
}
