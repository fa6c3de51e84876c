//! `depfetch fetch <url> <outdir>`

use anyhow::{Context, Result};
use depfetch_core::config::DepfetchConfig;
use depfetch_core::{FetchOptions, FetchOutcome, FetcherBuilder};
use std::path::Path;

use crate::cli::progress::BarProgress;

pub fn run_fetch(
    cfg: &DepfetchConfig,
    url: &str,
    outdir: &Path,
    strip: usize,
    force: bool,
    sha256: Option<String>,
    args: Vec<String>,
) -> Result<()> {
    let fetcher = FetcherBuilder::from_config(cfg)?
        .progress_handler(BarProgress::new())
        .build();

    let options = FetchOptions {
        strip,
        force,
        args,
        sha256,
    };
    let outcome = fetcher
        .fetch(url, outdir, &options)
        .with_context(|| format!("failed to fetch {url}"))?;

    match outcome {
        FetchOutcome::AlreadyPopulated => {
            println!("{} already populated, use --force to refetch", outdir.display());
        }
        FetchOutcome::Installed { kind, cache_hit, .. } => {
            let origin = if cache_hit { " (cached)" } else { "" };
            println!("Installed {kind} from {url}{origin} into {}", outdir.display());
        }
    }
    Ok(())
}
