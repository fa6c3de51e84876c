//! Terminal progress bar for downloads.

use depfetch_core::ProgressHandler;
use indicatif::{ProgressBar, ProgressStyle};
use std::cell::RefCell;

/// Draws an indicatif bar on stderr; hidden automatically when stderr is not a terminal.
pub struct BarProgress {
    bar: RefCell<Option<ProgressBar>>,
}

impl BarProgress {
    pub fn new() -> Self {
        Self {
            bar: RefCell::new(None),
        }
    }
}

fn bytes_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{prefix:20!} [{elapsed_precise}] [{bar:40}] {bytes:>10}/{total_bytes:<10} {bytes_per_sec}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("━━╾─")
}

impl ProgressHandler for BarProgress {
    fn on_download_start(&self, name: &str, url: &str) {
        tracing::info!("downloading {} from {}", name, url);
        let bar = ProgressBar::new(0)
            .with_style(bytes_style())
            .with_prefix(name.to_string());
        *self.bar.borrow_mut() = Some(bar);
    }

    fn on_download_progress(&self, downloaded: u64, total: Option<u64>) {
        if let Some(bar) = self.bar.borrow().as_ref() {
            if let Some(total) = total {
                bar.set_length(total);
            }
            bar.set_position(downloaded);
        }
    }

    fn on_download_complete(&self, downloaded: u64) {
        if let Some(bar) = self.bar.borrow_mut().take() {
            bar.set_length(downloaded);
            bar.finish_and_clear();
        }
        tracing::info!("downloaded {} bytes", downloaded);
    }
}
