//! Planar scan output types.

use super::cloud::FrameHeader;
use crate::config::ScanGeometry;
use serde::{Deserialize, Serialize};

/// Simulated planar laser scan produced from one point cloud frame.
///
/// Field layout mirrors a conventional 2D LiDAR scan so that planar
/// consumers can use it unchanged. Bins without an accepted point hold
/// [`ScanGeometry::sentinel`] (`range_max + 1.0`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaserScan {
    /// Input stamp, output frame id
    pub header: FrameHeader,
    /// Start angle in radians
    pub angle_min: f32,
    /// End angle in radians
    pub angle_max: f32,
    /// Angular width of one bin in radians
    pub angle_increment: f32,
    /// Time between measurements in seconds
    pub time_increment: f32,
    /// Time between scans in seconds
    pub scan_time: f32,
    /// Minimum valid range in meters
    pub range_min: f32,
    /// Maximum valid range in meters
    pub range_max: f32,
    /// One range per angular bin, in meters
    pub ranges: Vec<f32>,
}

impl LaserScan {
    /// Assemble a scan record from a range array and the geometry it was binned with.
    pub fn from_ranges(header: FrameHeader, geometry: &ScanGeometry, ranges: Vec<f32>) -> Self {
        Self {
            header,
            angle_min: geometry.angle_min,
            angle_max: geometry.angle_max,
            angle_increment: geometry.angle_increment,
            time_increment: geometry.time_increment,
            scan_time: geometry.scan_time,
            range_min: geometry.range_min,
            range_max: geometry.range_max,
            ranges,
        }
    }

    /// Number of angular bins.
    #[inline]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Check if scan has no bins.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Start angle of bin `index`.
    #[inline]
    pub fn angle_at(&self, index: usize) -> f32 {
        self.angle_min + index as f32 * self.angle_increment
    }

    /// True if the bin received no accepted point.
    #[inline]
    pub fn is_no_return(&self, range: f32) -> bool {
        range > self.range_max
    }

    /// Count bins holding an actual return.
    pub fn return_count(&self) -> usize {
        self.ranges
            .iter()
            .filter(|&&r| !self.is_no_return(r))
            .count()
    }
}

/// Running min/max of raw x and y coordinates over one frame.
///
/// Accumulated before any point is rejected, so it spans out-of-band
/// points too. NaN coordinates never win a comparison and are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBoxStats {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl BoundingBoxStats {
    /// Seed values meaning "no data".
    pub const EMPTY: Self = Self {
        min_x: f32::INFINITY,
        max_x: f32::NEG_INFINITY,
        min_y: f32::INFINITY,
        max_y: f32::NEG_INFINITY,
    };

    /// Fold one raw coordinate pair into the box.
    #[inline]
    pub fn include(&mut self, x: f32, y: f32) {
        if x < self.min_x {
            self.min_x = x;
        }
        if x > self.max_x {
            self.max_x = x;
        }
        if y < self.min_y {
            self.min_y = y;
        }
        if y > self.max_y {
            self.max_y = y;
        }
    }

    /// True while no finite coordinate has been seen.
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x && self.min_y > self.max_y
    }
}

impl Default for BoundingBoxStats {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_starts_empty() {
        let bounds = BoundingBoxStats::default();
        assert!(bounds.is_empty());
        assert_eq!(bounds, BoundingBoxStats::EMPTY);
    }

    #[test]
    fn test_bounding_box_include() {
        let mut bounds = BoundingBoxStats::default();
        bounds.include(1.0, -2.0);
        bounds.include(-3.0, 4.0);

        assert!(!bounds.is_empty());
        assert_eq!(bounds.min_x, -3.0);
        assert_eq!(bounds.max_x, 1.0);
        assert_eq!(bounds.min_y, -2.0);
        assert_eq!(bounds.max_y, 4.0);
    }

    #[test]
    fn test_bounding_box_ignores_nan() {
        let mut bounds = BoundingBoxStats::default();
        bounds.include(f32::NAN, f32::NAN);
        assert!(bounds.is_empty());

        bounds.include(0.5, 0.5);
        bounds.include(f32::NAN, 2.0);
        assert_eq!(bounds.min_x, 0.5);
        assert_eq!(bounds.max_x, 0.5);
        assert_eq!(bounds.max_y, 2.0);
    }

    #[test]
    fn test_scan_from_ranges_copies_geometry() {
        let geometry = ScanGeometry::default();
        let ranges = vec![geometry.sentinel(); geometry.bin_count()];
        let scan = LaserScan::from_ranges(FrameHeader::new(7, "out"), &geometry, ranges);

        assert_eq!(scan.len(), geometry.bin_count());
        assert_eq!(scan.range_max, 10.0);
        assert_eq!(scan.header.stamp_us, 7);
        assert_eq!(scan.return_count(), 0);
    }
}
