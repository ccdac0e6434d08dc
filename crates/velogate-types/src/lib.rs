use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The velocity pair emitted to the drive actuator, published once per
/// supervisor tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VelocityCommand {
    /// Signed linear velocity along the robot's forward axis (m/s).
    pub linear: f32,
    /// Signed angular velocity about the robot's vertical axis (rad/s).
    pub angular: f32,
}

impl VelocityCommand {
    /// The all-stop command. Published when the operator goes stale, when an
    /// obstacle vetoes motion, and exactly once on supervisor shutdown.
    pub const ZERO: VelocityCommand = VelocityCommand {
        linear: 0.0,
        angular: 0.0,
    };

    pub fn new(linear: f32, angular: f32) -> Self {
        Self { linear, angular }
    }

    /// `true` when both components are exactly zero.
    pub fn is_zero(&self) -> bool {
        self.linear == 0.0 && self.angular == 0.0
    }
}

/// The operator's desired speed magnitudes, before direction and before any
/// safety gating. Both components stay within `[0, max]` at all times;
/// direction is carried separately by the signed velocities.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TargetSpeed {
    /// Linear speed magnitude (m/s), never negative.
    pub linear: f32,
    /// Angular speed magnitude (rad/s), never negative.
    pub angular: f32,
}

/// Fixed angular layout of a range sensor: where the first beam points, how
/// far apart consecutive beams are, and how many beams a full sweep carries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanLayout {
    /// Angle of beam index 0, in radians.
    pub angle_min_rad: f32,
    /// Angular step between consecutive beams, in radians.
    pub angle_increment_rad: f32,
    /// Number of beams per sweep.
    pub count: usize,
}

impl ScanLayout {
    /// Angle of beam `index` in radians (not normalised).
    pub fn angle_of(&self, index: usize) -> f32 {
        self.angle_min_rad + index as f32 * self.angle_increment_rad
    }
}

/// One immutable sweep of distance measurements. Each new reading replaces
/// the previous snapshot wholesale; nothing ever mutates a scan in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeScan {
    pub layout: ScanLayout,
    /// Measured distances in metres, one per beam. Non-finite or
    /// non-positive entries are "no return" sentinels.
    pub ranges: Vec<f32>,
}

impl RangeScan {
    pub fn new(layout: ScanLayout, ranges: Vec<f32>) -> Self {
        Self { layout, ranges }
    }

    /// `true` when the sweep carries no readings at all.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// `true` when `range` is a real measurement rather than a "no return"
    /// sentinel. Lidar drivers report misses as 0.0, NaN, or infinity; none
    /// of those may trip the obstacle gate.
    pub fn is_valid_return(range: f32) -> bool {
        range.is_finite() && range > 0.0
    }
}

/// Discrete operator intents accepted by the command interface.
///
/// The wire form is tagged so embedding applications can route intents from
/// a joystick bridge or network console as JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent")]
pub enum TeleopIntent {
    MoveForward,
    MoveBackward,
    RotateClockwise,
    RotateCounterClockwise,
    Stop,
    IncreaseLinearSpeed,
    DecreaseLinearSpeed,
    IncreaseAngularSpeed,
    DecreaseAngularSpeed,
}

/// Errors surfaced by the gate to its embedding application.
///
/// Staleness, obstacle proximity, and missing scan data are *safety states*,
/// not errors: they zero velocities locally and never appear here.
#[derive(Error, Debug)]
pub enum GateError {
    #[error("command sink '{sink}' failed: {details}")]
    Sink { sink: String, details: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to spawn supervisor thread: {0}")]
    Spawn(String),
}
