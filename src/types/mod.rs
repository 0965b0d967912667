//! Data types flowing through the projection pipeline.
//!
//! - [`PointCloudFrame`]: input cloud with its [`FrameHeader`]
//! - [`LaserScan`]: planar scan output
//! - [`Marker`]: debug line-list output built from [`MarkerGeometry`]

mod cloud;
mod marker;
mod scan;

pub use cloud::{FrameHeader, Point3D, PointCloudFrame};
pub use marker::{
    ColorRGBA, MARKER_LINE_WIDTH, MARKER_NAMESPACE, Marker, MarkerAction, MarkerGeometry,
    MarkerKind, Quaternion,
};
pub use scan::{BoundingBoxStats, LaserScan};
