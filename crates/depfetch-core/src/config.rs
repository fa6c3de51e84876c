use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Near caches of the CI farm, probed in order before the canonical URL.
pub const DEFAULT_MIRRORS: &[&str] = &[
    "http://botmaster.tgr:9000/misc/depcache/{escaped}/{name}",
    "https://taichi-bots.oss-cn-beijing.aliyuncs.com/depcache/{escaped}/{name}",
];

/// Global configuration loaded from `~/.config/depfetch/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DepfetchConfig {
    /// Base directory for cached downloads. Defaults to `$XDG_CACHE_HOME/depfetch`.
    pub cache_home: Option<PathBuf>,
    /// Mirror URL templates; `{escaped}` is the cache key and `{name}` the archive file name.
    pub mirrors: Vec<String>,
    /// Timeout for each mirror HEAD probe, in milliseconds.
    pub probe_timeout_ms: u64,
    /// Connect timeout for the main download, in seconds. The transfer itself is unbounded.
    pub connect_timeout_secs: u64,
    /// Interpreter used for `.sh` installers.
    pub shell: String,
    /// External tar utility used for `.tar.gz` / `.tgz` archives.
    pub tar_program: String,
}

impl Default for DepfetchConfig {
    fn default() -> Self {
        Self {
            cache_home: None,
            mirrors: DEFAULT_MIRRORS.iter().map(|m| m.to_string()).collect(),
            probe_timeout_ms: 1000,
            connect_timeout_secs: 30,
            shell: "bash".to_string(),
            tar_program: "tar".to_string(),
        }
    }
}

impl DepfetchConfig {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// The configured cache home, or `$XDG_CACHE_HOME/depfetch` when unset.
    pub fn resolve_cache_home(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.cache_home {
            return Ok(dir.clone());
        }
        default_cache_home()
    }
}

pub fn default_cache_home() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("depfetch")?;
    // get_cache_home() already ends in the "depfetch" prefix.
    Ok(xdg_dirs.get_cache_home())
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("depfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<DepfetchConfig> {
    load_or_init_at(&config_path()?)
}

/// Like [`load_or_init`] but against an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<DepfetchConfig> {
    if !path.exists() {
        let default_cfg = DepfetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: DepfetchConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
