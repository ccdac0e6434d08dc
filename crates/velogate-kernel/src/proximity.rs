//! [`ProximityGuard`] – the obstacle check consulted before linear motion.
//!
//! A guard is built once per supervisor from a [`SafetyConfig`] and the
//! sensor's [`ScanLayout`]; arc resolution happens at construction, never
//! per tick. The check itself is pure: scan in, verdict out.
//!
//! The guard fails closed. No scan, an empty scan, or a scan too short for
//! the resolved arcs all produce [`SafetyVerdict::NoData`], which the
//! supervisor treats exactly like an obstacle.

use std::ops::Range;

use velogate_types::{RangeScan, ScanLayout};

use crate::arcs::ScanArc;
use crate::config::SafetyConfig;

/// Outcome of one proximity check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SafetyVerdict {
    /// Every valid reading in the inspected sector is at or beyond the
    /// safety distance.
    Clear,
    /// At least one reading is inside the safety distance.
    Blocked {
        /// Index of the offending beam.
        index: usize,
        /// Its measured distance in metres.
        range_m: f32,
    },
    /// The scan is missing, empty, or shorter than the sensor layout
    /// promises. Treated as unsafe.
    NoData,
}

impl SafetyVerdict {
    pub fn is_safe(&self) -> bool {
        matches!(self, SafetyVerdict::Clear)
    }
}

/// Pre-resolved proximity checker for one sensor layout.
#[derive(Debug, Clone)]
pub struct ProximityGuard {
    min_safety_distance: f32,
    front: Vec<Range<usize>>,
    rear: Vec<Range<usize>>,
}

impl ProximityGuard {
    pub fn new(config: &SafetyConfig, layout: &ScanLayout) -> Self {
        Self {
            min_safety_distance: config.min_safety_distance,
            front: config.front_arc.resolve(layout),
            rear: config.rear_arc.resolve(layout),
        }
    }

    /// Check `scan` against the sector matching the sign of
    /// `linear_direction`. Forward and stationary use the front arc,
    /// backward the rear.
    pub fn check(&self, scan: &RangeScan, linear_direction: f32) -> SafetyVerdict {
        let sector = if linear_direction < 0.0 {
            &self.rear
        } else {
            &self.front
        };
        self.check_sector(scan, sector)
    }

    fn check_sector(&self, scan: &RangeScan, sector: &[Range<usize>]) -> SafetyVerdict {
        if scan.is_empty() {
            return SafetyVerdict::NoData;
        }
        // A truncated sweep means the layout the arcs were resolved against
        // does not match what the sensor delivered.
        if sector.iter().any(|r| r.end > scan.ranges.len()) {
            return SafetyVerdict::NoData;
        }
        for range in sector {
            for index in range.clone() {
                let reading = scan.ranges[index];
                if !RangeScan::is_valid_return(reading) {
                    continue;
                }
                if reading < self.min_safety_distance {
                    return SafetyVerdict::Blocked {
                        index,
                        range_m: reading,
                    };
                }
            }
        }
        SafetyVerdict::Clear
    }

    /// Resolved front sector, for diagnostics.
    pub fn front_ranges(&self) -> &[Range<usize>] {
        &self.front
    }

    /// Resolved rear sector, for diagnostics.
    pub fn rear_ranges(&self) -> &[Range<usize>] {
        &self.rear
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn layout() -> ScanLayout {
        ScanLayout {
            angle_min_rad: -PI,
            angle_increment_rad: 2.0 * PI / 127.0,
            count: 128,
        }
    }

    fn guard() -> ProximityGuard {
        ProximityGuard::new(&SafetyConfig::default(), &layout())
    }

    fn clear_scan() -> RangeScan {
        RangeScan::new(layout(), vec![5.0; 128])
    }

    #[test]
    fn open_space_is_clear_both_ways() {
        let guard = guard();
        let scan = clear_scan();
        assert_eq!(guard.check(&scan, 0.5), SafetyVerdict::Clear);
        assert_eq!(guard.check(&scan, -0.5), SafetyVerdict::Clear);
    }

    #[test]
    fn obstacle_ahead_blocks_forward_but_not_backward() {
        let guard = guard();
        let mut scan = clear_scan();
        // Mid-sweep beams face forward on this layout.
        scan.ranges[64] = 0.3;
        match guard.check(&scan, 0.5) {
            SafetyVerdict::Blocked { index, range_m } => {
                assert_eq!(index, 64);
                assert!((range_m - 0.3).abs() < 1e-6);
            }
            other => panic!("expected Blocked, got {other:?}"),
        }
        assert_eq!(guard.check(&scan, -0.5), SafetyVerdict::Clear);
    }

    #[test]
    fn obstacle_behind_blocks_backward_only() {
        let guard = guard();
        let mut scan = clear_scan();
        // First beams face backward on this layout.
        scan.ranges[1] = 0.2;
        assert!(!guard.check(&scan, -0.5).is_safe());
        assert!(guard.check(&scan, 0.5).is_safe());
    }

    #[test]
    fn stationary_checks_the_front_sector() {
        let guard = guard();
        let mut scan = clear_scan();
        scan.ranges[64] = 0.1;
        assert!(!guard.check(&scan, 0.0).is_safe());
    }

    #[test]
    fn no_return_sentinels_never_block() {
        let guard = guard();
        let mut scan = clear_scan();
        scan.ranges[64] = 0.0;
        scan.ranges[63] = f32::NAN;
        scan.ranges[65] = f32::INFINITY;
        assert_eq!(guard.check(&scan, 0.5), SafetyVerdict::Clear);
    }

    #[test]
    fn empty_scan_is_no_data() {
        let guard = guard();
        let scan = RangeScan::new(layout(), vec![]);
        assert_eq!(guard.check(&scan, 0.5), SafetyVerdict::NoData);
        assert!(!SafetyVerdict::NoData.is_safe());
    }

    #[test]
    fn truncated_scan_is_no_data() {
        let guard = guard();
        // 40 readings cannot cover the front sector near index 64.
        let scan = RangeScan::new(layout(), vec![5.0; 40]);
        assert_eq!(guard.check(&scan, 0.5), SafetyVerdict::NoData);
    }

    #[test]
    fn reading_exactly_at_the_threshold_is_clear() {
        let guard = guard();
        let mut scan = clear_scan();
        scan.ranges[64] = 0.5;
        assert_eq!(guard.check(&scan, 0.5), SafetyVerdict::Clear);
    }
}
