//! CLI for depfetch.

mod commands;
mod progress;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use depfetch_core::config;
use depfetch_core::logging::{self, LogTarget};
use std::path::PathBuf;

use commands::{run_cache_path, run_checksum, run_fetch};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "depfetch")]
#[command(about = "Download, cache and unpack CI dependencies", long_about = None)]
pub struct Cli {
    /// Base directory for cached archives (overrides the config file).
    #[arg(long, global = true, env = "DEPFETCH_CACHE_HOME", value_name = "DIR")]
    pub cache_home: Option<PathBuf>,

    /// Append logs to this file instead of stderr.
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch an archive and unpack it (or run it) into OUTDIR.
    Fetch {
        /// URL of the zip, tar.gz, shell installer, or executable.
        url: String,

        /// Destination directory.
        outdir: PathBuf,

        /// Drop this many leading path components from archive entries.
        #[arg(long, default_value = "0", value_name = "N")]
        strip: usize,

        /// Clear and repopulate OUTDIR even if it already has contents.
        #[arg(long)]
        force: bool,

        /// Expected SHA-256 of the archive (hex).
        #[arg(long, value_name = "HEX")]
        sha256: Option<String>,

        /// Arguments forwarded to shell installers and executables.
        #[arg(last = true, value_name = "ARGS")]
        args: Vec<String>,
    },

    /// Print the cache entry path for a URL.
    CachePath {
        url: String,
    },

    /// Compute SHA-256 of a file (e.g. a cached archive).
    Checksum {
        /// Path to the file.
        path: PathBuf,
    },
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        let target = match &cli.log_file {
            Some(path) => LogTarget::File(path.clone()),
            None => LogTarget::Stderr,
        };
        logging::init_logging(target);

        let mut cfg = config::load_or_init().context("failed to load config")?;
        if let Some(dir) = cli.cache_home {
            cfg.cache_home = Some(dir);
        }
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Fetch {
                url,
                outdir,
                strip,
                force,
                sha256,
                args,
            } => run_fetch(&cfg, &url, &outdir, strip, force, sha256, args)?,
            CliCommand::CachePath { url } => run_cache_path(&cfg, &url)?,
            CliCommand::Checksum { path } => run_checksum(&path)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
