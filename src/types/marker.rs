//! Debug visualization types.

use super::cloud::{FrameHeader, Point3D};
use serde::{Deserialize, Serialize};

/// Marker namespace for scan debug geometry.
pub const MARKER_NAMESPACE: &str = "points_and_lines";

/// Line width of scan debug segments in meters.
pub const MARKER_LINE_WIDTH: f32 = 0.1;

/// RGBA color, each channel nominally in 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ColorRGBA {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ColorRGBA {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Red-to-green ramp: green grows with `ratio`, red shrinks.
    ///
    /// Not clamped; a sentinel range gives green above 1.0.
    #[inline]
    pub fn ramp(ratio: f32) -> Self {
        Self::new(1.0 - ratio, ratio, 0.0, 1.0)
    }
}

/// Line-list geometry, two points and two colors per segment.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MarkerGeometry {
    pub points: Vec<Point3D>,
    pub colors: Vec<ColorRGBA>,
}

impl MarkerGeometry {
    pub fn with_capacity(segments: usize) -> Self {
        Self {
            points: Vec::with_capacity(segments * 2),
            colors: Vec::with_capacity(segments * 2),
        }
    }

    /// Append a segment with one color shared by both endpoints.
    pub fn push_segment(&mut self, start: Point3D, end: Point3D, color: ColorRGBA) {
        self.points.push(start);
        self.points.push(end);
        self.colors.push(color);
        self.colors.push(color);
    }

    /// Number of segments.
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.points.len() / 2
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over `(start, end, color)` per segment.
    pub fn segments(&self) -> impl Iterator<Item = (Point3D, Point3D, ColorRGBA)> + '_ {
        self.points
            .chunks_exact(2)
            .zip(self.colors.chunks_exact(2))
            .map(|(p, c)| (p[0], p[1], c[0]))
    }
}

/// Marker primitive type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    LineList,
}

/// Marker action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerAction {
    Add,
}

/// Orientation quaternion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Quaternion {
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };
}

/// Visualization record published alongside each scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub header: FrameHeader,
    pub ns: String,
    pub id: i32,
    pub kind: MarkerKind,
    pub action: MarkerAction,
    pub orientation: Quaternion,
    pub line_width: f32,
    /// Marker-level color; per-point colors take precedence
    pub color: ColorRGBA,
    pub points: Vec<Point3D>,
    pub colors: Vec<ColorRGBA>,
}

impl Marker {
    /// Wrap scan debug geometry in a line-list marker.
    pub fn line_list(header: FrameHeader, geometry: MarkerGeometry) -> Self {
        Self {
            header,
            ns: MARKER_NAMESPACE.to_string(),
            id: 0,
            kind: MarkerKind::LineList,
            action: MarkerAction::Add,
            orientation: Quaternion::IDENTITY,
            line_width: MARKER_LINE_WIDTH,
            color: ColorRGBA::new(0.0, 0.0, 0.0, 1.0),
            points: geometry.points,
            colors: geometry.colors,
        }
    }
}
