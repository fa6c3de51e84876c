//! Download progress reporting.
//!
//! The downloader reports bytes transferred through [`ProgressHandler`];
//! [`TracingProgress`] turns that into log lines, front ends can draw bars.

use std::cell::Cell;
use std::time::Instant;

/// Receives progress events for one download at a time.
pub trait ProgressHandler {
    /// Called once before the transfer starts.
    fn on_download_start(&self, name: &str, url: &str);

    /// Called periodically with the bytes received so far.
    fn on_download_progress(&self, downloaded: u64, total: Option<u64>);

    /// Called after the transfer finished successfully.
    fn on_download_complete(&self, downloaded: u64);
}

/// Snapshot of a running download.
#[derive(Debug, Clone)]
pub struct ProgressStats {
    pub bytes_done: u64,
    pub total_bytes: Option<u64>,
    pub elapsed_secs: f64,
}

impl ProgressStats {
    /// Download rate in bytes per second (0 if elapsed is 0).
    pub fn bytes_per_sec(&self) -> f64 {
        if self.elapsed_secs <= 0.0 {
            return 0.0;
        }
        self.bytes_done as f64 / self.elapsed_secs
    }

    /// Fraction complete in [0.0, 1.0], if the total is known.
    pub fn fraction(&self) -> Option<f64> {
        match self.total_bytes {
            Some(0) => Some(1.0),
            Some(total) => Some((self.bytes_done as f64 / total as f64).min(1.0)),
            None => None,
        }
    }
}

/// Logs start, every completed tenth (or every 16 MiB when the size is unknown), and completion.
pub struct TracingProgress {
    started: Cell<Option<Instant>>,
    last_step: Cell<u64>,
}

const UNKNOWN_SIZE_STEP: u64 = 16 * 1024 * 1024;

impl Default for TracingProgress {
    fn default() -> Self {
        Self {
            started: Cell::new(None),
            last_step: Cell::new(0),
        }
    }
}

impl TracingProgress {
    fn stats(&self, downloaded: u64, total: Option<u64>) -> ProgressStats {
        let elapsed_secs = self
            .started
            .get()
            .map(|s| s.elapsed().as_secs_f64())
            .unwrap_or(0.0);
        ProgressStats {
            bytes_done: downloaded,
            total_bytes: total,
            elapsed_secs,
        }
    }
}

impl ProgressHandler for TracingProgress {
    fn on_download_start(&self, name: &str, url: &str) {
        self.started.set(Some(Instant::now()));
        self.last_step.set(0);
        tracing::info!("downloading {} from {}", name, url);
    }

    fn on_download_progress(&self, downloaded: u64, total: Option<u64>) {
        let stats = self.stats(downloaded, total);
        let step = match stats.fraction() {
            Some(f) => (f * 10.0) as u64,
            None => downloaded / UNKNOWN_SIZE_STEP,
        };
        if step > self.last_step.get() {
            self.last_step.set(step);
            tracing::debug!(
                bytes = downloaded,
                total = ?total,
                rate = stats.bytes_per_sec() as u64,
                "download progress"
            );
        }
    }

    fn on_download_complete(&self, downloaded: u64) {
        let stats = self.stats(downloaded, Some(downloaded));
        tracing::info!(
            "downloaded {} bytes in {:.1}s",
            downloaded,
            stats.elapsed_secs
        );
    }
}
