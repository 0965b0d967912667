//! Point cloud input types.

use serde::{Deserialize, Deserializer, Serialize};

/// A 3D point in the sensor's local frame.
///
/// Axis convention follows depth cameras: `z` points forward, `x` is
/// lateral and `y` is the height axis. Any coordinate may be NaN for
/// pixels without a depth return. JSON has no NaN literal, so NaN is
/// written as `null` and `null` reads back as NaN.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3D {
    #[serde(deserialize_with = "nan_from_null")]
    pub x: f32,
    #[serde(deserialize_with = "nan_from_null")]
    pub y: f32,
    #[serde(deserialize_with = "nan_from_null")]
    pub z: f32,
}

fn nan_from_null<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f32>::deserialize(deserializer)?.unwrap_or(f32::NAN))
}

impl Point3D {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// True if any coordinate is NaN.
    #[inline]
    pub fn has_nan(&self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }
}

/// Frame metadata carried from the capture source to every output record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameHeader {
    /// Capture timestamp in microseconds since epoch
    pub stamp_us: u64,
    /// Coordinate frame identifier
    pub frame_id: String,
}

impl FrameHeader {
    /// Create a new header.
    pub fn new(stamp_us: u64, frame_id: impl Into<String>) -> Self {
        Self {
            stamp_us,
            frame_id: frame_id.into(),
        }
    }

    /// Same timestamp, different frame.
    pub fn with_frame_id(&self, frame_id: &str) -> Self {
        Self {
            stamp_us: self.stamp_us,
            frame_id: frame_id.to_string(),
        }
    }
}

/// One point cloud frame as delivered by the capture source.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PointCloudFrame {
    pub header: FrameHeader,
    pub points: Vec<Point3D>,
}

impl PointCloudFrame {
    /// Create a frame from a header and points.
    pub fn new(header: FrameHeader, points: Vec<Point3D>) -> Self {
        Self { header, points }
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the frame has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over points in delivery order.
    pub fn iter(&self) -> impl Iterator<Item = &Point3D> + '_ {
        self.points.iter()
    }
}

impl FromIterator<Point3D> for PointCloudFrame {
    fn from_iter<I: IntoIterator<Item = Point3D>>(iter: I) -> Self {
        Self {
            header: FrameHeader::default(),
            points: iter.into_iter().collect(),
        }
    }
}
