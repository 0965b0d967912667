//! Channel-driven scan node.
//!
//! The host owns the event loop. Frames flow through a bounded channel into
//! [`ScanNode::run`], which processes each one to completion and emits a
//! marker and a scan. Height band updates bypass the frame queue and go
//! straight to the shared configuration, so they take effect on the next
//! frame to start processing.
//!
//! ```text
//! reader ──Inbound──▶ InboundRouter ──PointCloudFrame──▶ ScanNode ──Outbound──▶ writer
//!                          │                               ▲
//!                          └──HeightBandUpdate──▶ SharedConfig (snapshot per frame)
//! ```

use crate::error::{Error, Result};
use crate::pipeline::CloudToScan;
use crate::shared::SharedConfig;
use crate::streaming::messages::{Inbound, Outbound};
use crate::types::PointCloudFrame;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, bounded};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// How often the node checks the running flag while idle.
const IDLE_POLL: Duration = Duration::from_millis(100);

/// Create the bounded frame queue between router and node.
pub fn frame_channel(capacity: usize) -> (Sender<PointCloudFrame>, Receiver<PointCloudFrame>) {
    bounded(capacity.max(1))
}

/// Splits inbound messages between the frame queue and the configuration.
pub struct InboundRouter {
    frames: Sender<PointCloudFrame>,
    config: Arc<SharedConfig>,
}

impl InboundRouter {
    pub fn new(frames: Sender<PointCloudFrame>, config: Arc<SharedConfig>) -> Self {
        Self { frames, config }
    }

    /// Route one message. Blocks while the frame queue is full.
    ///
    /// A rejected height band update is logged and swallowed; only a closed
    /// frame queue is an error.
    pub fn route(&self, msg: Inbound) -> Result<()> {
        match msg {
            Inbound::Cloud(frame) => self
                .frames
                .send(frame)
                .map_err(|_| Error::ChannelClosed("frame queue")),
            Inbound::Reconfigure(update) => {
                if let Err(e) = self.config.apply_update(update) {
                    log::debug!("Reconfigure dropped, band unchanged: {}", e);
                }
                Ok(())
            }
        }
    }
}

/// Processes frames until the queue closes or `running` is cleared.
pub struct ScanNode {
    pipeline: CloudToScan,
    running: Arc<AtomicBool>,
    frames_processed: u64,
}

impl ScanNode {
    pub fn new(config: Arc<SharedConfig>, running: Arc<AtomicBool>) -> Self {
        Self {
            pipeline: CloudToScan::new(config),
            running,
            frames_processed: 0,
        }
    }

    /// Frames handled so far.
    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }

    /// Main loop; returns the number of frames processed.
    pub fn run(&mut self, frames: Receiver<PointCloudFrame>, out: Sender<Outbound>) -> Result<u64> {
        log::info!("Scan node started");

        while self.running.load(Ordering::Relaxed) {
            let frame = match frames.recv_timeout(IDLE_POLL) {
                Ok(frame) => frame,
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    log::debug!("Frame queue closed");
                    break;
                }
            };

            self.handle(&frame, &out)?;
        }

        log::info!("Scan node stopped after {} frames", self.frames_processed);
        Ok(self.frames_processed)
    }

    fn handle(&mut self, frame: &PointCloudFrame, out: &Sender<Outbound>) -> Result<()> {
        log::debug!("Got cloud ({} points)", frame.len());
        let output = self.pipeline.process(frame);

        out.send(Outbound::Marker(output.marker))
            .map_err(|_| Error::ChannelClosed("output"))?;
        out.send(Outbound::Scan(output.scan))
            .map_err(|_| Error::ChannelClosed("output"))?;

        self.frames_processed += 1;
        Ok(())
    }
}
