//! Live configuration shared between the reconfigure channel and frame processing.
//!
//! The configuration is an immutable [`ScanConfig`] behind an `Arc`. Writers
//! build a new value and swap the pointer; each frame clones the pointer once
//! and keeps using that snapshot, so filtering and marker placement within a
//! frame always see the same height band.

use crate::config::{HeightBandUpdate, ScanConfig};
use crate::error::Result;
use parking_lot::RwLock;
use std::sync::Arc;

/// Thread-safe handle to the active configuration.
#[derive(Debug)]
pub struct SharedConfig {
    current: RwLock<Arc<ScanConfig>>,
}

impl SharedConfig {
    /// Wrap an already validated configuration.
    pub fn new(config: ScanConfig) -> Self {
        Self {
            current: RwLock::new(Arc::new(config)),
        }
    }

    /// Configuration to use for one whole frame.
    #[inline]
    pub fn snapshot(&self) -> Arc<ScanConfig> {
        Arc::clone(&self.current.read())
    }

    /// Replace the height band.
    ///
    /// An invalid update leaves the active configuration untouched and
    /// returns the validation error.
    pub fn apply_update(&self, update: HeightBandUpdate) -> Result<Arc<ScanConfig>> {
        let mut guard = self.current.write();
        let next = match guard.apply_update(update) {
            Ok(next) => Arc::new(next),
            Err(e) => {
                log::warn!("Rejected height band update {:?}: {}", update, e);
                return Err(e);
            }
        };
        log::info!(
            "Height band now [{:.3}, {:.3}]",
            next.band.min_height,
            next.band.max_height
        );
        *guard = Arc::clone(&next);
        Ok(next)
    }
}

impl Default for SharedConfig {
    fn default() -> Self {
        Self::new(ScanConfig::default())
    }
}
