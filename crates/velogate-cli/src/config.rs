//! Configuration Vault – reads/writes `~/.velogate/config.toml`.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use velogate_kernel::{SafetyConfig, ScanArc};
use velogate_runtime::SupervisorConfig;
use velogate_types::ScanLayout;

/// Persisted configuration stored in `~/.velogate/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Supervisor tick period in milliseconds.
    #[serde(default = "default_period_ms")]
    pub period_ms: u64,

    #[serde(default)]
    pub safety: SafetySection,

    #[serde(default)]
    pub scan: ScanSection,
}

/// `[safety]` – watchdog, speed, and proximity parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetySection {
    /// Oldest operator command still considered live, in seconds.
    #[serde(default = "default_max_cmd_vel_age_s")]
    pub max_cmd_vel_age_s: f32,
    #[serde(default = "default_max_vel")]
    pub max_linear_vel: f32,
    #[serde(default = "default_max_vel")]
    pub max_angular_vel: f32,
    #[serde(default = "default_increment")]
    pub linear_vel_increment: f32,
    #[serde(default = "default_increment")]
    pub angular_vel_increment: f32,
    #[serde(default = "default_min_safety_distance")]
    pub min_safety_distance: f32,
    /// Centre of the forward-looking sector, radians.
    #[serde(default)]
    pub front_arc_center_rad: f32,
    #[serde(default = "default_arc_half_width")]
    pub front_arc_half_width_rad: f32,
    /// Centre of the rear-looking sector, radians.
    #[serde(default = "default_rear_center")]
    pub rear_arc_center_rad: f32,
    #[serde(default = "default_arc_half_width")]
    pub rear_arc_half_width_rad: f32,
}

/// `[scan]` – the range sensor's angular layout, plus the built-in
/// all-clear scan feed for bench runs without a sensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanSection {
    #[serde(default = "default_angle_min")]
    pub angle_min_rad: f32,
    #[serde(default = "default_angle_increment")]
    pub angle_increment_rad: f32,
    #[serde(default = "default_beam_count")]
    pub count: usize,
    /// When `true` the CLI publishes synthetic open-space scans itself.
    #[serde(default = "default_simulate")]
    pub simulate: bool,
}

fn default_period_ms() -> u64 {
    100
}
fn default_max_cmd_vel_age_s() -> f32 {
    1.0
}
fn default_max_vel() -> f32 {
    1.0
}
fn default_increment() -> f32 {
    0.05
}
fn default_min_safety_distance() -> f32 {
    0.5
}
fn default_arc_half_width() -> f32 {
    0.261_799_4
}
fn default_rear_center() -> f32 {
    PI
}
fn default_angle_min() -> f32 {
    -PI
}
fn default_angle_increment() -> f32 {
    0.049474
}
fn default_beam_count() -> usize {
    128
}
fn default_simulate() -> bool {
    true
}

impl Default for SafetySection {
    fn default() -> Self {
        Self {
            max_cmd_vel_age_s: default_max_cmd_vel_age_s(),
            max_linear_vel: default_max_vel(),
            max_angular_vel: default_max_vel(),
            linear_vel_increment: default_increment(),
            angular_vel_increment: default_increment(),
            min_safety_distance: default_min_safety_distance(),
            front_arc_center_rad: 0.0,
            front_arc_half_width_rad: default_arc_half_width(),
            rear_arc_center_rad: default_rear_center(),
            rear_arc_half_width_rad: default_arc_half_width(),
        }
    }
}

impl Default for ScanSection {
    fn default() -> Self {
        Self {
            angle_min_rad: default_angle_min(),
            angle_increment_rad: default_angle_increment(),
            count: default_beam_count(),
            simulate: default_simulate(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            period_ms: default_period_ms(),
            safety: SafetySection::default(),
            scan: ScanSection::default(),
        }
    }
}

impl Config {
    pub fn safety_config(&self) -> SafetyConfig {
        SafetyConfig {
            // A negative, non-finite, or overflowing age collapses to zero,
            // which `SafetyConfig::validate` rejects.
            max_cmd_vel_age: Duration::try_from_secs_f32(self.safety.max_cmd_vel_age_s)
                .unwrap_or(Duration::ZERO),
            max_linear_vel: self.safety.max_linear_vel,
            max_angular_vel: self.safety.max_angular_vel,
            linear_vel_increment: self.safety.linear_vel_increment,
            angular_vel_increment: self.safety.angular_vel_increment,
            min_safety_distance: self.safety.min_safety_distance,
            front_arc: ScanArc::new(
                self.safety.front_arc_center_rad,
                self.safety.front_arc_half_width_rad,
            ),
            rear_arc: ScanArc::new(
                self.safety.rear_arc_center_rad,
                self.safety.rear_arc_half_width_rad,
            ),
        }
    }

    pub fn supervisor_config(&self) -> SupervisorConfig {
        SupervisorConfig {
            period: Duration::from_millis(self.period_ms),
        }
    }

    pub fn scan_layout(&self) -> ScanLayout {
        ScanLayout {
            angle_min_rad: self.scan.angle_min_rad,
            angle_increment_rad: self.scan.angle_increment_rad,
            count: self.scan.count,
        }
    }
}

/// Return the path to `~/.velogate/config.toml`.
pub fn config_path() -> PathBuf {
    config_path_for_home(
        &std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .unwrap_or_else(|_| ".".to_string()),
    )
}

/// Build the config path relative to the given home directory.
/// Extracted for testability without mutating environment variables.
pub(crate) fn config_path_for_home(home: &str) -> PathBuf {
    PathBuf::from(home).join(".velogate").join("config.toml")
}

/// Load the config from disk.  Returns `None` if the file does not exist.
pub fn load() -> Result<Option<Config>, String> {
    load_from(&config_path())
}

/// Load the config from a specific path.
pub(crate) fn load_from(path: &PathBuf) -> Result<Option<Config>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config at {}: {}", path.display(), e))?;
    let mut cfg: Config =
        toml::from_str(&raw).map_err(|e| format!("Failed to parse config: {}", e))?;
    apply_env_overrides(&mut cfg);
    Ok(Some(cfg))
}

/// Apply `VELOGATE_*` environment variable overrides to `cfg`.
///
/// Supported variables:
///
/// | Variable | Config field |
/// |---|---|
/// | `VELOGATE_PERIOD_MS` | `period_ms` |
/// | `VELOGATE_MIN_SAFETY_DISTANCE` | `safety.min_safety_distance` |
pub fn apply_env_overrides(cfg: &mut Config) {
    if let Ok(v) = std::env::var("VELOGATE_PERIOD_MS")
        && let Ok(period) = v.parse::<u64>()
    {
        cfg.period_ms = period;
    }
    if let Ok(v) = std::env::var("VELOGATE_MIN_SAFETY_DISTANCE")
        && let Ok(distance) = v.parse::<f32>()
    {
        cfg.safety.min_safety_distance = distance;
    }
}

/// Save the config to disk, creating `~/.velogate/` if necessary.
pub fn save(cfg: &Config) -> Result<(), String> {
    save_to(cfg, &config_path())
}

/// Save the config to a specific path.
pub(crate) fn save_to(cfg: &Config, path: &PathBuf) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create config directory: {}", e))?;
    }
    let raw =
        toml::to_string_pretty(cfg).map_err(|e| format!("Failed to serialize config: {}", e))?;
    fs::write(path, raw)
        .map_err(|e| format!("Failed to write config at {}: {}", path.display(), e))?;
    Ok(())
}
