//! Debug line geometry for a projected range array.

use crate::config::{ScanConfig, SentinelPolicy};
use crate::types::{ColorRGBA, MarkerGeometry, Point3D};

/// Build one vertical post per bin at the bin's range.
///
/// Each post runs from `min_height` to `max_height` at
/// `(rng·sin(a), ·, rng·cos(a))` where `a` is the bin's start bearing.
/// Color ramps from red (near) to green (at `range_max`). Segments come out
/// in increasing bin order; with [`SentinelPolicy::EmitAll`] segment `i`
/// belongs to bin `i`.
pub fn visualize(ranges: &[f32], config: &ScanConfig) -> MarkerGeometry {
    let geometry = &config.geometry;
    let min_height = config.band.min_height as f32;
    let max_height = config.band.max_height as f32;
    let sentinel = geometry.sentinel();

    let mut marker = MarkerGeometry::with_capacity(ranges.len());

    for (i, &rng) in ranges.iter().enumerate() {
        if config.sentinel_policy == SentinelPolicy::AcceptedOnly && rng >= sentinel {
            continue;
        }

        let (sin_a, cos_a) = geometry.bin_angle(i).sin_cos();
        let x = rng * sin_a;
        let z = rng * cos_a;

        marker.push_segment(
            Point3D::new(x, min_height, z),
            Point3D::new(x, max_height, z),
            ColorRGBA::ramp(rng / geometry.range_max),
        );
    }

    marker
}
