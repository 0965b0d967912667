//! RekhaScan - point cloud to laser scan daemon
//!
//! Reads JSON-lines [`Inbound`] messages on stdin and writes [`Outbound`]
//! marker and scan records on stdout, one line each. Logs go to stderr.
//!
//! ```bash
//! rekha-scan --config rekha.toml < clouds.jsonl > scans.jsonl
//! ```

use rekha_scan::config::Config;
use rekha_scan::error::{Error, Result};
use rekha_scan::shared::SharedConfig;
use rekha_scan::streaming::{InboundRouter, JsonLines, Outbound, ScanNode, frame_channel};
use std::env;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

/// Config file picked up from the working directory when no path is given.
const DEFAULT_CONFIG_PATH: &str = "rekha.toml";

/// Parse config path from command line arguments.
///
/// Supports:
/// - `rekha-scan <path>` (positional)
/// - `rekha-scan --config <path>` / `-c <path>`
fn parse_config_path() -> Option<String> {
    let args: Vec<String> = env::args().collect();

    for i in 1..args.len() {
        if (args[i] == "--config" || args[i] == "-c") && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
    }

    if args.len() > 1 && !args[1].starts_with('-') {
        return Some(args[1].clone());
    }

    None
}

fn load_config() -> Result<(Config, String)> {
    match parse_config_path() {
        Some(path) => Ok((Config::load(&path)?, path)),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => Ok((
            Config::load(DEFAULT_CONFIG_PATH)?,
            DEFAULT_CONFIG_PATH.to_string(),
        )),
        None => Ok((Config::default(), "built-in defaults".to_string())),
    }
}

fn main() -> Result<()> {
    let (config, source) = load_config()?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    log::info!("RekhaScan v{} starting...", env!("CARGO_PKG_VERSION"));
    log::info!("Using config: {}", source);

    let scan_config = config.scan_config()?;
    log::info!(
        "Scan: {} bins over [{:.4}, {:.4}] rad, band [{:.3}, {:.3}] m, frame {}",
        scan_config.geometry.bin_count(),
        scan_config.geometry.angle_min,
        scan_config.geometry.angle_max,
        scan_config.band.min_height,
        scan_config.band.max_height,
        scan_config.output_frame_id
    );

    let shared = Arc::new(SharedConfig::new(scan_config));

    // Set up shutdown signal handler
    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        log::info!("Received shutdown signal");
        r.store(false, Ordering::Relaxed);
    })
    .map_err(|e| Error::Other(format!("Error setting Ctrl-C handler: {}", e)))?;

    let (frame_tx, frame_rx) = frame_channel(config.node.queue_size);
    let (out_tx, out_rx) = crossbeam_channel::bounded::<Outbound>(config.node.queue_size * 2);

    let node_handle = {
        let shared = Arc::clone(&shared);
        let running = Arc::clone(&running);
        thread::Builder::new()
            .name("scan-node".to_string())
            .spawn(move || ScanNode::new(shared, running).run(frame_rx, out_tx))?
    };

    let writer_handle = thread::Builder::new()
        .name("scan-writer".to_string())
        .spawn(move || -> Result<()> {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            for msg in out_rx {
                JsonLines.write(&mut writer, &msg)?;
                writer.flush()?;
            }
            Ok(())
        })?;

    // The reader may sit in a blocking stdin read after a signal, so it is
    // never joined. Dropping the router at EOF closes the frame queue.
    let router = InboundRouter::new(frame_tx, shared);
    thread::Builder::new()
        .name("scan-reader".to_string())
        .spawn(move || {
            let stdin = io::stdin();
            for msg in JsonLines.read(stdin.lock()) {
                match msg {
                    Ok(msg) => {
                        if let Err(e) = router.route(msg) {
                            log::debug!("Input stopped: {}", e);
                            break;
                        }
                    }
                    Err(Error::Io(e)) => {
                        log::error!("stdin read failed: {}", e);
                        break;
                    }
                    Err(e) => log::warn!("Skipping malformed line: {}", e),
                }
            }
            log::info!("Input closed, shutting down...");
        })?;

    let processed = node_handle
        .join()
        .map_err(|_| Error::ThreadPanicked("scan-node"))??;
    writer_handle
        .join()
        .map_err(|_| Error::ThreadPanicked("scan-writer"))??;

    log::info!("RekhaScan stopped after {} frames", processed);
    Ok(())
}
