//! Per-frame processing: snapshot, project, visualize, assemble records.

use crate::config::ScanConfig;
use crate::projection::{ProjectionStats, project, visualize};
use crate::shared::SharedConfig;
use crate::types::{BoundingBoxStats, LaserScan, Marker, PointCloudFrame};
use std::sync::Arc;

/// Everything produced from one cloud frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutput {
    pub scan: LaserScan,
    pub marker: Marker,
    pub bounds: BoundingBoxStats,
    pub stats: ProjectionStats,
}

/// Converts cloud frames to scan and marker records against live configuration.
#[derive(Debug, Clone)]
pub struct CloudToScan {
    config: Arc<SharedConfig>,
}

impl CloudToScan {
    pub fn new(config: Arc<SharedConfig>) -> Self {
        Self { config }
    }

    /// Handle for pushing height band updates from another thread.
    pub fn config(&self) -> &Arc<SharedConfig> {
        &self.config
    }

    /// Process one frame against a single configuration snapshot.
    pub fn process(&self, frame: &PointCloudFrame) -> ScanOutput {
        let snapshot = self.config.snapshot();
        Self::process_with(frame, &snapshot)
    }

    /// Process one frame against an explicit configuration.
    pub fn process_with(frame: &PointCloudFrame, config: &ScanConfig) -> ScanOutput {
        let projection = project(frame, config);
        let geometry = visualize(&projection.ranges, config);

        let header = frame.header.with_frame_id(&config.output_frame_id);
        let marker = Marker::line_list(header.clone(), geometry);
        let scan = LaserScan::from_ranges(header, &config.geometry, projection.ranges);

        ScanOutput {
            scan,
            marker,
            bounds: projection.bounds,
            stats: projection.stats,
        }
    }
}
