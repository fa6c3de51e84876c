//! The dependency fetcher: cache lookup, download, and dispatch by archive kind.

use crate::archive_kind::ArchiveKind;
use crate::cache::DepCache;
use crate::checksum;
use crate::config::DepfetchConfig;
use crate::download::{self, DownloadOptions};
use crate::error::{FetchError, Result};
use crate::extract;
use crate::installer;
use crate::mirror;
use crate::progress::{ProgressHandler, TracingProgress};
use crate::url_model::{archive_name, escape_url};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Per-call options for [`Fetcher::fetch`].
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Leading path components dropped from every archive entry.
    pub strip: usize,
    /// Clear and repopulate `outdir` even if it already has contents.
    pub force: bool,
    /// Extra arguments for shell installers and executables.
    pub args: Vec<String>,
    /// Expected SHA-256 (hex) of the archive.
    pub sha256: Option<String>,
}

/// What a fetch did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// `outdir` already had contents and `force` was not set; nothing was touched.
    AlreadyPopulated,
    Installed {
        kind: ArchiveKind,
        /// True if the archive was already in the local cache.
        cache_hit: bool,
        /// URL the archive was downloaded from (a mirror or the original), `None` on a cache hit.
        source: Option<String>,
    },
}

/// Builder for a [`Fetcher`].
pub struct FetcherBuilder {
    cache_home: PathBuf,
    mirrors: Vec<String>,
    probe_timeout: Duration,
    connect_timeout: Duration,
    shell: String,
    tar_program: String,
    progress: Option<Box<dyn ProgressHandler>>,
}

impl FetcherBuilder {
    fn new(cache_home: PathBuf) -> Self {
        let defaults = DepfetchConfig::default();
        Self {
            cache_home,
            mirrors: defaults.mirrors.clone(),
            probe_timeout: defaults.probe_timeout(),
            connect_timeout: defaults.connect_timeout(),
            shell: defaults.shell,
            tar_program: defaults.tar_program,
            progress: None,
        }
    }

    /// Builder preloaded with everything in `cfg`, resolving the default cache home.
    pub fn from_config(cfg: &DepfetchConfig) -> Result<Self> {
        let cache_home = cfg
            .resolve_cache_home()
            .map_err(|e| FetchError::Config(format!("{e:#}")))?;
        Ok(Self::new(cache_home)
            .mirrors(cfg.mirrors.iter().cloned())
            .probe_timeout(cfg.probe_timeout())
            .connect_timeout(cfg.connect_timeout())
            .shell(cfg.shell.clone())
            .tar_program(cfg.tar_program.clone()))
    }

    /// Replace the mirror templates (`{escaped}` and `{name}` are substituted).
    pub fn mirrors<I, S>(mut self, mirrors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mirrors = mirrors.into_iter().map(Into::into).collect();
        self
    }

    pub fn probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }

    pub fn tar_program(mut self, tar: impl Into<String>) -> Self {
        self.tar_program = tar.into();
        self
    }

    pub fn progress_handler<H: ProgressHandler + 'static>(mut self, handler: H) -> Self {
        self.progress = Some(Box::new(handler));
        self
    }

    pub fn build(self) -> Fetcher {
        Fetcher {
            cache: DepCache::new(&self.cache_home),
            mirrors: self.mirrors,
            probe_timeout: self.probe_timeout,
            download: DownloadOptions {
                connect_timeout: self.connect_timeout,
            },
            shell: self.shell,
            tar_program: self.tar_program,
            progress: self
                .progress
                .unwrap_or_else(|| Box::new(TracingProgress::default())),
        }
    }
}

/// Downloads archives into a local cache and unpacks them into target directories.
pub struct Fetcher {
    cache: DepCache,
    mirrors: Vec<String>,
    probe_timeout: Duration,
    download: DownloadOptions,
    shell: String,
    tar_program: String,
    progress: Box<dyn ProgressHandler>,
}

impl Fetcher {
    /// Start building a fetcher whose cache lives under `cache_home/deps`.
    pub fn builder(cache_home: impl Into<PathBuf>) -> FetcherBuilder {
        FetcherBuilder::new(cache_home.into())
    }

    /// Build a fetcher from loaded configuration.
    pub fn from_config(cfg: &DepfetchConfig) -> Result<Self> {
        Ok(FetcherBuilder::from_config(cfg)?.build())
    }

    pub fn cache(&self) -> &DepCache {
        &self.cache
    }

    /// Path of the cache entry for `url`.
    pub fn cache_path(&self, url: &str) -> PathBuf {
        self.cache.entry_path(&escape_url(url))
    }

    /// Ensure the unpacked contents of the archive at `url` exist under `outdir`.
    pub fn fetch(&self, url: &str, outdir: &Path, options: &FetchOptions) -> Result<FetchOutcome> {
        if !options.force && is_populated(outdir) {
            tracing::debug!("{} already populated, skipping {}", outdir.display(), url);
            return Ok(FetchOutcome::AlreadyPopulated);
        }

        let _ = fs::remove_dir_all(outdir);

        let name = archive_name(url)?;
        let key = escape_url(url);
        let cached = self.cache.entry_path(&key);

        let cache_hit = self.cache.contains(&key);
        let source = if cache_hit {
            tracing::debug!("cache hit for {} at {}", url, cached.display());
            None
        } else {
            let chosen = mirror::select_mirror(&self.mirrors, &key, &name, self.probe_timeout)
                .unwrap_or_else(|| url.to_string());
            let mut writer = self.cache.begin_write(&key)?;
            download::download_to(&chosen, &name, &mut writer, self.download, &*self.progress)?;
            writer.commit()?;
            Some(chosen)
        };

        if let Some(expected) = &options.sha256 {
            if let Some(actual) = checksum::verify_sha256(&cached, expected)? {
                self.cache.remove(&key)?;
                return Err(FetchError::ChecksumMismatch {
                    url: url.to_string(),
                    expected: expected.clone(),
                    actual,
                });
            }
        }

        fs::create_dir_all(outdir).map_err(FetchError::io(outdir))?;

        let kind = ArchiveKind::from_file_name(&name);
        tracing::info!("installing {} ({}) into {}", name, kind, outdir.display());
        match kind {
            ArchiveKind::Zip => extract::extract_zip(&cached, outdir, options.strip)?,
            ArchiveKind::TarGz => {
                extract::extract_tar_gz(&self.tar_program, &cached, outdir, options.strip)?
            }
            ArchiveKind::Shell => installer::run_shell(&self.shell, &cached, &options.args)?,
            ArchiveKind::Executable => installer::run_executable(&cached, &options.args)?,
            ArchiveKind::Unknown => return Err(FetchError::UnknownFileType(name)),
        }

        Ok(FetchOutcome::Installed {
            kind,
            cache_hit,
            source,
        })
    }
}

/// True if `dir` exists and has at least one entry.
fn is_populated(dir: &Path) -> bool {
    fs::read_dir(dir)
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false)
}
