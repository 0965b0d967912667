//! Height-banded projection of a point cloud into angular range bins.

use crate::config::ScanConfig;
use crate::types::{BoundingBoxStats, PointCloudFrame};

/// Per-frame point accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProjectionStats {
    /// Points written into (or compared against) a bin
    pub accepted: usize,
    /// Points with a NaN coordinate
    pub rejected_nan: usize,
    /// Points whose height fell outside the band
    pub rejected_height: usize,
    /// Points whose bearing fell outside the scan
    pub rejected_angle: usize,
}

impl ProjectionStats {
    /// Total points seen.
    pub fn total(&self) -> usize {
        self.accepted + self.rejected_nan + self.rejected_height + self.rejected_angle
    }
}

/// Result of projecting one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    /// Nearest range per bin, sentinel where nothing landed
    pub ranges: Vec<f32>,
    /// Raw x/y extent of the frame
    pub bounds: BoundingBoxStats,
    pub stats: ProjectionStats,
}

/// Project a cloud into a planar range array.
///
/// Single pass over the points. For each point, in order:
///
/// 1. fold raw `x`, `y` into the bounding box
/// 2. drop it if any coordinate is NaN
/// 3. drop it if `y` is outside the height band
/// 4. bearing = `atan2(x, z)`; drop it outside `[angle_min, angle_max]`
/// 5. keep `sqrt(x² + z²)` if it beats the range already in its bin
///
/// Bins nobody reached keep `range_max + 1.0`.
pub fn project(cloud: &PointCloudFrame, config: &ScanConfig) -> Projection {
    let geometry = &config.geometry;
    let band = &config.band;

    let mut ranges = vec![geometry.sentinel(); geometry.bin_count()];
    let mut bounds = BoundingBoxStats::default();
    let mut stats = ProjectionStats::default();

    for point in cloud.iter() {
        let (x, y, z) = (point.x, point.y, point.z);

        bounds.include(x, y);

        if point.has_nan() {
            log::trace!("rejected for nan in point({}, {}, {})", x, y, z);
            stats.rejected_nan += 1;
            continue;
        }

        if !band.contains(y) {
            log::trace!(
                "rejected for height {} not in range ({}, {})",
                y,
                band.min_height,
                band.max_height
            );
            stats.rejected_height += 1;
            continue;
        }

        let angle = (x as f64).atan2(z as f64);
        let Some(index) = geometry.bin_index(angle) else {
            log::trace!(
                "rejected for angle {} not in range ({}, {})",
                angle,
                geometry.angle_min,
                geometry.angle_max
            );
            stats.rejected_angle += 1;
            continue;
        };

        let range = (x as f64).hypot(z as f64) as f32;
        let slot = &mut ranges[index];
        if range < *slot {
            *slot = range;
        }
        stats.accepted += 1;
    }

    log::debug!(
        "X: {} {}, Y: {} {} ({} accepted, {} nan, {} height, {} angle)",
        bounds.min_x,
        bounds.max_x,
        bounds.min_y,
        bounds.max_y,
        stats.accepted,
        stats.rejected_nan,
        stats.rejected_height,
        stats.rejected_angle
    );

    Projection {
        ranges,
        bounds,
        stats,
    }
}
