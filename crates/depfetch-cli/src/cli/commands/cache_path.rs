//! `depfetch cache-path <url>`

use anyhow::Result;
use depfetch_core::config::DepfetchConfig;
use depfetch_core::Fetcher;

pub fn run_cache_path(cfg: &DepfetchConfig, url: &str) -> Result<()> {
    let fetcher = Fetcher::from_config(cfg)?;
    let path = fetcher.cache_path(url);
    let state = if path.is_file() { "cached" } else { "missing" };
    println!("{}\t{}", path.display(), state);
    Ok(())
}
