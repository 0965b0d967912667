//! Message types exchanged with the host.
//!
//! - Inbound: point cloud frames and height band updates
//! - Outbound: planar scans and debug markers

use crate::config::HeightBandUpdate;
use crate::types::{LaserScan, Marker, PointCloudFrame};
use serde::{Deserialize, Serialize};

/// Messages delivered to the node
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Inbound {
    /// Point cloud frame to project
    Cloud(PointCloudFrame),
    /// Height band reconfiguration, applied from the next frame on
    Reconfigure(HeightBandUpdate),
}

/// Records produced by the node, two per processed frame
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Outbound {
    /// Simulated planar laser scan
    Scan(LaserScan),
    /// Line-list debug marker
    Marker(Marker),
}
