//! Cloud-to-scan projection.
//!
//! # Pipeline
//!
//! ```text
//! PointCloudFrame → project → ranges → visualize → MarkerGeometry
//!                      │
//!                      └→ BoundingBoxStats, ProjectionStats
//! ```
//!
//! Both stages are pure functions of their input and one [`ScanConfig`]
//! snapshot.
//!
//! # Example
//!
//! ```
//! use rekha_scan::config::ScanConfig;
//! use rekha_scan::projection::{project, visualize};
//! use rekha_scan::types::{Point3D, PointCloudFrame};
//!
//! let config = ScanConfig::default();
//! let cloud: PointCloudFrame = vec![Point3D::new(0.0, 0.12, 1.0)].into_iter().collect();
//!
//! let projection = project(&cloud, &config);
//! let marker = visualize(&projection.ranges, &config);
//!
//! assert_eq!(marker.segment_count(), projection.ranges.len());
//! ```
//!
//! [`ScanConfig`]: crate::config::ScanConfig

mod projector;
mod visualizer;

pub use projector::{Projection, ProjectionStats, project};
pub use visualizer::visualize;
