//! Configuration for RekhaScan
//!
//! Startup parameters come from an optional TOML file; every field has a
//! default so an empty file (or no file) yields the stock depth-camera
//! setup. Only the height band can change after startup, through
//! [`HeightBandUpdate`].
//!
//! ## Example TOML
//!
//! ```toml
//! [scan]
//! min_height = 0.10
//! max_height = 0.15
//! output_frame_id = "/openi_depth_frame"
//! sentinel_policy = "emit_all"
//!
//! [geometry]
//! angle_increment = 0.008726646   # 0.5 deg bins
//! range_max = 10.0
//!
//! [logging]
//! level = "info"
//!
//! [node]
//! queue_size = 10
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fs;
use std::path::Path;

/// Top-level application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanSection,
    #[serde(default)]
    pub geometry: ScanGeometry,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub node: NodeConfig,
}

/// Height band, output frame and visualization policy
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScanSection {
    /// Lower bound of the accepted height band in meters (default: 0.10)
    #[serde(default = "default_min_height")]
    pub min_height: f64,

    /// Upper bound of the accepted height band in meters (default: 0.15)
    #[serde(default = "default_max_height")]
    pub max_height: f64,

    /// Frame id stamped on scan and marker output
    #[serde(default = "default_output_frame_id")]
    pub output_frame_id: String,

    /// Whether empty bins are drawn in the debug marker
    #[serde(default)]
    pub sentinel_policy: SentinelPolicy,
}

impl Default for ScanSection {
    fn default() -> Self {
        Self {
            min_height: default_min_height(),
            max_height: default_max_height(),
            output_frame_id: default_output_frame_id(),
            sentinel_policy: SentinelPolicy::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Host node settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NodeConfig {
    /// Frames buffered between reader and projector before the reader blocks
    #[serde(default = "default_queue_size")]
    pub queue_size: usize,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            queue_size: default_queue_size(),
        }
    }
}

fn default_min_height() -> f64 {
    0.10
}
fn default_max_height() -> f64 {
    0.15
}
fn default_output_frame_id() -> String {
    "/openi_depth_frame".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_queue_size() -> usize {
    10
}

fn default_angle_min() -> f32 {
    (-PI / 6.0) as f32
}
fn default_angle_max() -> f32 {
    (PI / 6.0) as f32
}
fn default_angle_increment() -> f32 {
    (PI / 180.0 / 2.0) as f32
}
fn default_time_increment() -> f32 {
    0.0
}
fn default_scan_time() -> f32 {
    (1.0 / 30.0) as f32
}
fn default_range_min() -> f32 {
    0.1
}
fn default_range_max() -> f32 {
    10.0
}

/// Upper bound on bins per scan. A full turn at 0.001 degree resolution
/// needs 360 000.
pub const MAX_BINS: usize = 1 << 20;

/// Angular and range layout of the simulated scan.
///
/// Fixed for the lifetime of the process. The bin count is derived from the
/// angular span and never depends on the input cloud.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ScanGeometry {
    /// First bin start in radians (default: -π/6)
    #[serde(default = "default_angle_min")]
    pub angle_min: f32,
    /// Last accepted bearing in radians (default: π/6)
    #[serde(default = "default_angle_max")]
    pub angle_max: f32,
    /// Bin width in radians (default: π/360)
    #[serde(default = "default_angle_increment")]
    pub angle_increment: f32,
    /// Seconds between measurements (default: 0.0)
    #[serde(default = "default_time_increment")]
    pub time_increment: f32,
    /// Seconds between scans (default: 1/30)
    #[serde(default = "default_scan_time")]
    pub scan_time: f32,
    /// Minimum reported range in meters (default: 0.1)
    #[serde(default = "default_range_min")]
    pub range_min: f32,
    /// Maximum reported range in meters (default: 10.0)
    #[serde(default = "default_range_max")]
    pub range_max: f32,
}

impl Default for ScanGeometry {
    fn default() -> Self {
        Self {
            angle_min: default_angle_min(),
            angle_max: default_angle_max(),
            angle_increment: default_angle_increment(),
            time_increment: default_time_increment(),
            scan_time: default_scan_time(),
            range_min: default_range_min(),
            range_max: default_range_max(),
        }
    }
}

impl ScanGeometry {
    /// Number of angular bins: `ceil((angle_max - angle_min) / angle_increment)`.
    ///
    /// Evaluated in `f32` on the scan record's own fields, so consumers that
    /// recompute the count from a published [`LaserScan`] agree with it.
    ///
    /// [`LaserScan`]: crate::types::LaserScan
    #[inline]
    pub fn bin_count(&self) -> usize {
        self.bin_span().ceil() as usize
    }

    /// Span over increment before rounding up.
    #[inline]
    fn bin_span(&self) -> f32 {
        (self.angle_max - self.angle_min) / self.angle_increment
    }

    /// Range stored in bins that received no accepted point.
    #[inline]
    pub fn sentinel(&self) -> f32 {
        self.range_max + 1.0
    }

    /// True if `angle` lies in the closed interval `[angle_min, angle_max]`.
    #[inline]
    pub fn contains_angle(&self, angle: f64) -> bool {
        angle >= self.angle_min as f64 && angle <= self.angle_max as f64
    }

    /// Bin holding `angle`, or `None` outside `[angle_min, angle_max]`.
    ///
    /// The index truncates toward the lower bin. When the span is an exact
    /// multiple of the increment, `angle_max` itself lands one past the end
    /// and is folded into the last bin.
    #[inline]
    pub fn bin_index(&self, angle: f64) -> Option<usize> {
        if !self.contains_angle(angle) {
            return None;
        }
        let index = ((angle - self.angle_min as f64) / self.angle_increment as f64) as usize;
        Some(index.min(self.bin_count().saturating_sub(1)))
    }

    /// Start bearing of bin `index` in radians.
    #[inline]
    pub fn bin_angle(&self, index: usize) -> f32 {
        self.angle_min + index as f32 * self.angle_increment
    }

    /// Reject layouts the projector cannot bin.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("angle_min", self.angle_min),
            ("angle_max", self.angle_max),
            ("angle_increment", self.angle_increment),
            ("time_increment", self.time_increment),
            ("scan_time", self.scan_time),
            ("range_min", self.range_min),
            ("range_max", self.range_max),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(Error::InvalidConfig(format!(
                "{} must be finite, got {}",
                name, value
            )));
        }
        if self.angle_increment <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "angle_increment must be positive, got {}",
                self.angle_increment
            )));
        }
        if self.angle_max <= self.angle_min {
            return Err(Error::InvalidConfig(format!(
                "angle_max ({}) must exceed angle_min ({})",
                self.angle_max, self.angle_min
            )));
        }
        let span = self.bin_span();
        if !span.is_finite() || span.ceil() < 1.0 || span.ceil() > MAX_BINS as f32 {
            return Err(Error::InvalidConfig(format!(
                "angular span over angle_increment gives {} bins, expected 1..={}",
                span.ceil(),
                MAX_BINS
            )));
        }
        if self.range_min < 0.0 || self.range_max <= self.range_min {
            return Err(Error::InvalidConfig(format!(
                "range limits must satisfy 0 <= range_min < range_max, got [{}, {}]",
                self.range_min, self.range_max
            )));
        }
        if self.time_increment < 0.0 || self.scan_time < 0.0 {
            return Err(Error::InvalidConfig(
                "time_increment and scan_time must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Closed vertical interval of accepted point heights (the `y` axis).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct HeightBand {
    pub min_height: f64,
    pub max_height: f64,
}

impl HeightBand {
    pub fn new(min_height: f64, max_height: f64) -> Self {
        Self {
            min_height,
            max_height,
        }
    }

    /// True if `y` lies in `[min_height, max_height]`.
    #[inline]
    pub fn contains(&self, y: f32) -> bool {
        let y = y as f64;
        y >= self.min_height && y <= self.max_height
    }

    pub fn validate(&self) -> Result<()> {
        if !self.min_height.is_finite() || !self.max_height.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "height band must be finite, got [{}, {}]",
                self.min_height, self.max_height
            )));
        }
        if self.min_height > self.max_height {
            return Err(Error::InvalidConfig(format!(
                "min_height ({}) exceeds max_height ({})",
                self.min_height, self.max_height
            )));
        }
        Ok(())
    }
}

impl Default for HeightBand {
    fn default() -> Self {
        Self::new(default_min_height(), default_max_height())
    }
}

/// Runtime reconfiguration of the height band.
///
/// Fields left as `None` keep their current value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct HeightBandUpdate {
    #[serde(default)]
    pub min_height: Option<f64>,
    #[serde(default)]
    pub max_height: Option<f64>,
}

impl HeightBandUpdate {
    /// Update replacing both bounds.
    pub fn new(min_height: f64, max_height: f64) -> Self {
        Self {
            min_height: Some(min_height),
            max_height: Some(max_height),
        }
    }
}

/// How the debug marker treats bins that hold the sentinel range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SentinelPolicy {
    /// Draw every bin, empty ones as a post at `range_max + 1`
    #[default]
    EmitAll,
    /// Draw only bins that received a point
    AcceptedOnly,
}

/// Immutable configuration snapshot consumed by one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanConfig {
    pub geometry: ScanGeometry,
    pub band: HeightBand,
    pub output_frame_id: String,
    pub sentinel_policy: SentinelPolicy,
}

impl ScanConfig {
    /// Build a validated snapshot.
    pub fn new(geometry: ScanGeometry, band: HeightBand, output_frame_id: &str) -> Result<Self> {
        let config = Self {
            geometry,
            band,
            output_frame_id: output_frame_id.to_string(),
            sentinel_policy: SentinelPolicy::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_sentinel_policy(mut self, policy: SentinelPolicy) -> Self {
        self.sentinel_policy = policy;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.geometry.validate()?;
        self.band.validate()
    }

    /// New snapshot with only the height band replaced.
    pub fn apply_update(&self, update: HeightBandUpdate) -> Result<Self> {
        let band = HeightBand::new(
            update.min_height.unwrap_or(self.band.min_height),
            update.max_height.unwrap_or(self.band.max_height),
        );
        band.validate()?;
        Ok(Self {
            band,
            ..self.clone()
        })
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            geometry: ScanGeometry::default(),
            band: HeightBand::default(),
            output_frame_id: default_output_frame_id(),
            sentinel_policy: SentinelPolicy::default(),
        }
    }
}

impl Config {
    /// Load and validate configuration from a TOML file
    ///
    /// # Example
    /// ```no_run
    /// use rekha_scan::config::Config;
    ///
    /// let config = Config::load("rekha.toml")?;
    /// # Ok::<(), rekha_scan::Error>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from TOML text
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.scan_config()?;
        if config.node.queue_size == 0 {
            return Err(Error::InvalidConfig(
                "node.queue_size must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }

    /// Initial runtime snapshot
    pub fn scan_config(&self) -> Result<ScanConfig> {
        let band = HeightBand::new(self.scan.min_height, self.scan.max_height);
        Ok(
            ScanConfig::new(self.geometry, band, &self.scan.output_frame_id)?
                .with_sentinel_policy(self.scan.sentinel_policy),
        )
    }
}
