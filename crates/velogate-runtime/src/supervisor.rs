//! [`Supervisor`] – the periodic safety gate.
//!
//! One dedicated thread re-derives the outgoing command from scratch every
//! tick: a stale operator zeroes everything, a fresh one is gated against
//! the latest range sweep, and whatever survives is published. The loop
//! publishes *every* tick, safe or not, so the drive base downstream always
//! holds a current command.
//!
//! Lifecycle is explicit: [`Supervisor::start`] validates and spawns,
//! [`Supervisor::stop`] signals and joins. Every exit path, panic excluded,
//! ends with a final all-stop on the sink.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};
use velogate_hal::{CommandSink, ScanBuffer};
use velogate_kernel::{ProximityGuard, SafetyConfig, SafetyVerdict, WarnThrottle};
use velogate_types::{GateError, ScanLayout, VelocityCommand};

use crate::shared::SharedTeleopState;

/// Operator advisories are limited to one per second.
const ADVISORY_INTERVAL: Duration = Duration::from_secs(1);

/// Timing parameters of the supervisor loop.
#[derive(Debug, Clone, PartialEq)]
pub struct SupervisorConfig {
    /// Tick period of the gate loop.
    pub period: Duration,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        // 10 Hz.
        Self {
            period: Duration::from_millis(100),
        }
    }
}

impl SupervisorConfig {
    pub fn validate(&self) -> Result<(), GateError> {
        if self.period.is_zero() {
            return Err(GateError::Config("tick period must be positive".to_string()));
        }
        Ok(())
    }
}

/// Handle to the running gate thread.
#[derive(Debug)]
pub struct Supervisor {
    shutdown: Arc<AtomicBool>,
    healthy: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl Supervisor {
    /// Validate the configuration and spawn the gate thread.
    ///
    /// The supervisor takes exclusive ownership of the sink; the shared
    /// state and scan buffer stay with the caller so operators and sensor
    /// feeds can keep writing to them.
    pub fn start(
        safety: Arc<SafetyConfig>,
        config: SupervisorConfig,
        state: SharedTeleopState,
        scans: ScanBuffer,
        layout: ScanLayout,
        sink: Box<dyn CommandSink>,
    ) -> Result<Self, GateError> {
        safety.validate()?;
        config.validate()?;

        let shutdown = Arc::new(AtomicBool::new(false));
        let healthy = Arc::new(AtomicBool::new(true));
        let guard = ProximityGuard::new(&safety, &layout);

        let thread = {
            let shutdown = Arc::clone(&shutdown);
            let healthy = Arc::clone(&healthy);
            thread::Builder::new()
                .name("velogate-supervisor".to_string())
                .spawn(move || {
                    run_loop(safety, config, state, scans, guard, sink, shutdown, healthy);
                })
                .map_err(|e| GateError::Spawn(e.to_string()))?
        };

        Ok(Self {
            shutdown,
            healthy,
            thread: Some(thread),
        })
    }

    /// `false` once any publish has failed. The loop keeps ticking either
    /// way; the embedder decides whether to tear down.
    pub fn is_healthy(&self) -> bool {
        self.healthy.load(Ordering::SeqCst)
    }

    /// Signal the gate thread and wait for it to finish its final all-stop.
    /// Safe to call more than once.
    pub fn stop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                error!("supervisor thread panicked");
            }
        }
    }
}

impl Drop for Supervisor {
    fn drop(&mut self) {
        self.stop();
    }
}

#[allow(clippy::too_many_arguments)]
fn run_loop(
    safety: Arc<SafetyConfig>,
    config: SupervisorConfig,
    state: SharedTeleopState,
    scans: ScanBuffer,
    guard: ProximityGuard,
    mut sink: Box<dyn CommandSink>,
    shutdown: Arc<AtomicBool>,
    healthy: Arc<AtomicBool>,
) {
    info!(sink = sink.id(), period_ms = config.period.as_millis() as u64, "supervisor started");
    let mut advisories = WarnThrottle::new(ADVISORY_INTERVAL);

    while !shutdown.load(Ordering::SeqCst) {
        let tick_start = Instant::now();
        let cmd = evaluate_tick(&safety, &state, &scans, &guard, &mut advisories, tick_start);

        if let Err(e) = sink.publish(cmd) {
            if healthy.swap(false, Ordering::SeqCst) {
                error!(error = %e, "command publish failed; gate marked unhealthy");
            }
        }

        if let Some(remaining) = config.period.checked_sub(tick_start.elapsed()) {
            thread::sleep(remaining);
        }
    }

    // Final all-stop on every shutdown path.
    if let Err(e) = sink.publish(VelocityCommand::ZERO) {
        healthy.store(false, Ordering::SeqCst);
        error!(error = %e, "final all-stop publish failed");
    }
    info!(sink = sink.id(), "supervisor stopped");
}

/// Derive this tick's command. Holds the state lock for the whole decision
/// so the watchdog check and the velocity it gates cannot tear.
fn evaluate_tick(
    safety: &SafetyConfig,
    state: &SharedTeleopState,
    scans: &ScanBuffer,
    guard: &ProximityGuard,
    advisories: &mut WarnThrottle,
    now: Instant,
) -> VelocityCommand {
    let mut state = state.lock();

    let fresh = state
        .last_command
        .is_some_and(|at| now.duration_since(at) <= safety.max_cmd_vel_age);
    if !fresh {
        state.velocity.halt();
        return VelocityCommand::ZERO;
    }

    let verdict = match scans.latest() {
        Some(scan) => guard.check(&scan, state.velocity.linear_vel()),
        None => SafetyVerdict::NoData,
    };
    match verdict {
        SafetyVerdict::Clear => {}
        SafetyVerdict::Blocked { index, range_m } => {
            state.velocity.veto_linear();
            if advisories.admit() {
                warn!(index, range_m, "obstacle inside safety distance; linear motion vetoed");
            }
        }
        SafetyVerdict::NoData => {
            state.velocity.veto_linear();
            if advisories.admit() {
                warn!("no usable scan data; linear motion vetoed");
            }
        }
    }

    let cmd = state.velocity.command();
    debug!(linear = cmd.linear, angular = cmd.angular, "tick");
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;
    use std::sync::Arc;

    use velogate_hal::{FaultySink, SimSink};
    use velogate_kernel::SafetyConfig;
    use velogate_types::RangeScan;

    use crate::commands::CommandInterface;

    fn layout() -> ScanLayout {
        ScanLayout {
            angle_min_rad: -PI,
            angle_increment_rad: 2.0 * PI / 127.0,
            count: 128,
        }
    }

    fn clear_scan() -> RangeScan {
        RangeScan::new(layout(), vec![5.0; 128])
    }

    fn fast_config() -> SupervisorConfig {
        SupervisorConfig {
            period: Duration::from_millis(5),
        }
    }

    struct Rig {
        supervisor: Supervisor,
        operator: CommandInterface,
        scans: ScanBuffer,
        log: velogate_hal::sim::CommandLog,
    }

    fn start_rig(safety: SafetyConfig) -> Rig {
        let safety = Arc::new(safety);
        let state = SharedTeleopState::new();
        let scans = ScanBuffer::new();
        let sink = SimSink::new("test");
        let log = sink.log();
        let operator = CommandInterface::new(state.clone(), Arc::clone(&safety));
        let supervisor = Supervisor::start(
            safety,
            fast_config(),
            state,
            scans.clone(),
            layout(),
            Box::new(sink),
        )
        .unwrap();
        Rig {
            supervisor,
            operator,
            scans,
            log,
        }
    }

    fn settle() {
        thread::sleep(Duration::from_millis(40));
    }

    #[test]
    fn silent_operator_yields_only_zero_commands() {
        let mut rig = start_rig(SafetyConfig::default());
        settle();
        rig.supervisor.stop();
        let log = rig.log.lock().unwrap();
        assert!(!log.is_empty());
        assert!(log.iter().all(|cmd| cmd.is_zero()));
    }

    #[test]
    fn fresh_command_with_clear_scan_passes_through() {
        let mut rig = start_rig(SafetyConfig::default());
        rig.scans.publish(clear_scan());
        rig.operator.increase_linear_speed();
        rig.operator.move_forward();
        settle();
        rig.supervisor.stop();
        let log = rig.log.lock().unwrap();
        assert!(log.iter().any(|cmd| cmd.linear > 0.0));
    }

    #[test]
    fn obstacle_ahead_vetoes_forward_motion() {
        let mut rig = start_rig(SafetyConfig::default());
        let mut scan = clear_scan();
        scan.ranges[64] = 0.2;
        rig.scans.publish(scan);
        rig.operator.increase_linear_speed();
        rig.operator.move_forward();
        settle();
        rig.supervisor.stop();
        let log = rig.log.lock().unwrap();
        assert!(log.iter().all(|cmd| cmd.linear == 0.0));
    }

    #[test]
    fn missing_scan_fails_closed_for_linear_motion() {
        let mut rig = start_rig(SafetyConfig::default());
        rig.operator.increase_linear_speed();
        rig.operator.move_forward();
        settle();
        rig.supervisor.stop();
        let log = rig.log.lock().unwrap();
        assert!(log.iter().all(|cmd| cmd.linear == 0.0));
    }

    #[test]
    fn rotation_survives_an_obstacle_veto() {
        let mut rig = start_rig(SafetyConfig::default());
        let mut scan = clear_scan();
        scan.ranges[64] = 0.2;
        rig.scans.publish(scan);
        rig.operator.increase_angular_speed();
        rig.operator.rotate_clockwise();
        settle();
        rig.supervisor.stop();
        let log = rig.log.lock().unwrap();
        assert!(log.iter().any(|cmd| cmd.angular > 0.0));
    }

    #[test]
    fn stale_operator_is_halted_after_the_window() {
        let safety = SafetyConfig {
            max_cmd_vel_age: Duration::from_millis(30),
            ..SafetyConfig::default()
        };
        let mut rig = start_rig(safety);
        rig.scans.publish(clear_scan());
        rig.operator.increase_linear_speed();
        rig.operator.move_forward();
        thread::sleep(Duration::from_millis(100));
        rig.supervisor.stop();
        let log = rig.log.lock().unwrap();
        // Motion passed through while fresh, then the watchdog cut it.
        assert!(log.iter().any(|cmd| cmd.linear > 0.0));
        assert!(log.last().is_some_and(|cmd| cmd.is_zero()));
        let last_moving = log.iter().rposition(|cmd| cmd.linear > 0.0).unwrap();
        assert!(log[last_moving + 1..].iter().all(|cmd| cmd.is_zero()));
    }

    #[test]
    fn shutdown_ends_with_an_all_stop() {
        let mut rig = start_rig(SafetyConfig::default());
        rig.scans.publish(clear_scan());
        rig.operator.increase_linear_speed();
        rig.operator.move_forward();
        settle();
        rig.supervisor.stop();
        let log = rig.log.lock().unwrap();
        assert!(log.last().is_some_and(|cmd| cmd.is_zero()));
    }

    #[test]
    fn stop_is_idempotent_and_drop_is_safe() {
        let mut rig = start_rig(SafetyConfig::default());
        rig.supervisor.stop();
        rig.supervisor.stop();
        drop(rig.supervisor);
    }

    #[test]
    fn failing_sink_marks_the_gate_unhealthy_but_keeps_it_running() {
        let state = SharedTeleopState::new();
        let mut supervisor = Supervisor::start(
            Arc::new(SafetyConfig::default()),
            fast_config(),
            state,
            ScanBuffer::new(),
            layout(),
            Box::new(FaultySink::new("broken")),
        )
        .unwrap();
        settle();
        assert!(!supervisor.is_healthy());
        // The loop is still alive and joinable.
        supervisor.stop();
    }

    #[test]
    fn invalid_configuration_is_rejected_before_spawning() {
        let safety = SafetyConfig {
            min_safety_distance: -1.0,
            ..SafetyConfig::default()
        };
        let result = Supervisor::start(
            Arc::new(safety),
            fast_config(),
            SharedTeleopState::new(),
            ScanBuffer::new(),
            layout(),
            Box::new(SimSink::new("test")),
        );
        assert!(matches!(result, Err(GateError::Config(_))));

        let result = Supervisor::start(
            Arc::new(SafetyConfig::default()),
            SupervisorConfig {
                period: Duration::ZERO,
            },
            SharedTeleopState::new(),
            ScanBuffer::new(),
            layout(),
            Box::new(SimSink::new("test")),
        );
        assert!(matches!(result, Err(GateError::Config(_))));
    }
}
