//! [`SafetyConfig`] – the immutable parameter block of the gate.
//!
//! Every limit the supervisor enforces lives here: the watchdog window,
//! the velocity caps and ramp increments, the minimum obstacle distance,
//! and the angular sectors checked before forward and backward motion.
//! Constructed once, validated once, then shared read-only.

use std::time::Duration;

use velogate_types::GateError;

use crate::arcs::ScanArc;

/// Fifteen degrees, the default half-width of both travel-direction arcs.
const DEFAULT_ARC_HALF_WIDTH_RAD: f32 = 0.261_799_4;

/// Safety and ramping parameters, fixed for the lifetime of a supervisor.
#[derive(Debug, Clone, PartialEq)]
pub struct SafetyConfig {
    /// Oldest operator command the watchdog still considers live.
    pub max_cmd_vel_age: Duration,
    /// Upper bound on the linear speed target (m/s).
    pub max_linear_vel: f32,
    /// Upper bound on the angular speed target (rad/s).
    pub max_angular_vel: f32,
    /// Step applied per linear speed adjustment (m/s).
    pub linear_vel_increment: f32,
    /// Step applied per angular speed adjustment (rad/s).
    pub angular_vel_increment: f32,
    /// Readings closer than this veto linear motion (m).
    pub min_safety_distance: f32,
    /// Sector inspected before forward motion.
    pub front_arc: ScanArc,
    /// Sector inspected before backward motion.
    pub rear_arc: ScanArc,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            max_cmd_vel_age: Duration::from_secs(1),
            max_linear_vel: 1.0,
            max_angular_vel: 1.0,
            linear_vel_increment: 0.05,
            angular_vel_increment: 0.05,
            min_safety_distance: 0.5,
            front_arc: ScanArc::new(0.0, DEFAULT_ARC_HALF_WIDTH_RAD),
            rear_arc: ScanArc::new(std::f32::consts::PI, DEFAULT_ARC_HALF_WIDTH_RAD),
        }
    }
}

impl SafetyConfig {
    /// Reject parameter blocks a supervisor must not run with.
    pub fn validate(&self) -> Result<(), GateError> {
        if self.max_cmd_vel_age.is_zero() {
            return Err(GateError::Config(
                "max_cmd_vel_age must be positive".to_string(),
            ));
        }
        if !(self.max_linear_vel > 0.0) || !(self.max_angular_vel > 0.0) {
            return Err(GateError::Config(
                "velocity caps must be positive".to_string(),
            ));
        }
        if !(self.linear_vel_increment > 0.0) || !(self.angular_vel_increment > 0.0) {
            return Err(GateError::Config(
                "velocity increments must be positive".to_string(),
            ));
        }
        if !(self.min_safety_distance > 0.0) {
            return Err(GateError::Config(
                "min_safety_distance must be positive".to_string(),
            ));
        }
        if !(self.front_arc.half_width_rad > 0.0) || !(self.rear_arc.half_width_rad > 0.0) {
            return Err(GateError::Config(
                "arc half-widths must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(SafetyConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_watchdog_window_is_rejected() {
        let config = SafetyConfig {
            max_cmd_vel_age: Duration::ZERO,
            ..SafetyConfig::default()
        };
        assert!(matches!(config.validate(), Err(GateError::Config(_))));
    }

    #[test]
    fn non_positive_caps_are_rejected() {
        let config = SafetyConfig {
            max_linear_vel: 0.0,
            ..SafetyConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SafetyConfig {
            max_angular_vel: -1.0,
            ..SafetyConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn nan_safety_distance_is_rejected() {
        let config = SafetyConfig {
            min_safety_distance: f32::NAN,
            ..SafetyConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_width_arc_is_rejected() {
        let config = SafetyConfig {
            front_arc: ScanArc::new(0.0, 0.0),
            ..SafetyConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
