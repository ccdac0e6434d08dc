//! [`ScanArc`] – angular sector to scan-index resolution.
//!
//! The proximity gate inspects only the beams that point along the direction
//! of travel. Which indices those are depends entirely on the sensor's
//! angular layout: a sweep that starts at −180° puts "straight ahead" in the
//! middle of the array, while a sweep that starts at 0° splits it across
//! both ends. [`ScanArc::resolve`] turns a configured sector into the
//! concrete index ranges for a given [`ScanLayout`], so different sensor
//! models are handled by configuration rather than by alternate code paths.

use std::f32::consts::PI;
use std::ops::Range;

use velogate_types::ScanLayout;

/// An angular sector of the scan, expressed in the robot frame.
///
/// `center_rad` follows the usual convention: 0 is straight ahead, ±π is
/// straight behind. A rear arc is simply `center_rad = π` and may resolve to
/// two index ranges when it wraps across the start/end of the sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanArc {
    /// Centre of the sector in radians.
    pub center_rad: f32,
    /// Half-width of the sector in radians; the sector spans
    /// `[center - half_width, center + half_width]`.
    pub half_width_rad: f32,
}

impl ScanArc {
    pub const fn new(center_rad: f32, half_width_rad: f32) -> Self {
        Self {
            center_rad,
            half_width_rad,
        }
    }

    /// Resolve this sector into contiguous index ranges for `layout`.
    ///
    /// Walks every beam once, keeping those whose (normalised) angular
    /// distance to the sector centre is within the half-width, then
    /// compresses the kept indices into contiguous ranges. Runs at
    /// configuration time, never per tick.
    ///
    /// Returns an empty vector for a zero-beam layout.
    pub fn resolve(&self, layout: &ScanLayout) -> Vec<Range<usize>> {
        let mut ranges: Vec<Range<usize>> = Vec::new();
        for index in 0..layout.count {
            let offset = wrap_angle(layout.angle_of(index) - self.center_rad);
            if offset.abs() <= self.half_width_rad {
                match ranges.last_mut() {
                    Some(last) if last.end == index => last.end = index + 1,
                    _ => ranges.push(index..index + 1),
                }
            }
        }
        ranges
    }
}

/// Normalise `angle` into `(-π, π]`.
fn wrap_angle(angle: f32) -> f32 {
    let mut a = angle % (2.0 * PI);
    if a > PI {
        a -= 2.0 * PI;
    } else if a <= -PI {
        a += 2.0 * PI;
    }
    a
}
