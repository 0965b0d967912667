//! RekhaScan - planar laser scans from depth-camera point clouds
//!
//! Projects each point cloud frame onto a fixed-resolution angular range
//! array, keeping only points inside a horizontal height band and the
//! nearest return per bearing. A companion line-list marker shows the
//! result for debugging.
//!
//! ## Layout
//!
//! ```text
//! types/       Point3D, PointCloudFrame, LaserScan, Marker
//! config       ScanGeometry, HeightBand, ScanConfig, TOML loading
//! shared       SharedConfig: atomic snapshot/swap of the live config
//! projection/  project() and visualize()
//! pipeline     CloudToScan: one snapshot per frame → scan + marker
//! streaming/   JSON-lines host adapter and channel-driven node
//! ```

pub mod config;
pub mod error;
pub mod pipeline;
pub mod projection;
pub mod shared;
pub mod streaming;
pub mod types;

// Re-export commonly used types
pub use config::{Config, HeightBand, HeightBandUpdate, ScanConfig, ScanGeometry, SentinelPolicy};
pub use error::{Error, Result};
pub use pipeline::{CloudToScan, ScanOutput};
pub use projection::{Projection, ProjectionStats, project, visualize};
pub use shared::SharedConfig;
pub use types::{BoundingBoxStats, FrameHeader, LaserScan, Marker, Point3D, PointCloudFrame};
