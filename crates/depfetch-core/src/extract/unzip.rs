//! In-process zip extraction with path-traversal checks and strip-components.

use crate::error::{FetchError, Result};
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use zip::ZipArchive;

/// Relative destination of a zip entry after dropping `strip` leading components.
///
/// Returns `None` for entries that must not be written: absolute names, names
/// with a `..` segment, and names that become empty after stripping.
pub fn entry_destination(name: &str, strip: usize) -> Option<PathBuf> {
    if name.starts_with('/') || name.starts_with('\\') || Path::new(name).is_absolute() {
        return None;
    }
    if name.split(['/', '\\']).any(|segment| segment == "..") {
        return None;
    }
    let rel: PathBuf = name
        .split('/')
        .skip(strip)
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect();
    if rel.as_os_str().is_empty() {
        return None;
    }
    Some(rel)
}

/// Unpack the zip at `archive_path` into `extract_dir`, dropping the first
/// `strip` path components of every entry.
///
/// Existing files are overwritten. A failure part-way leaves whatever was
/// already written in place.
pub fn extract_zip(archive_path: &Path, extract_dir: &Path, strip: usize) -> Result<()> {
    let file = File::open(archive_path).map_err(FetchError::io(archive_path))?;
    let mut archive =
        ZipArchive::new(BufReader::new(file)).map_err(|e| FetchError::InvalidArchive {
            path: archive_path.to_path_buf(),
            reason: e.to_string(),
        })?;

    fs::create_dir_all(extract_dir).map_err(FetchError::io(extract_dir))?;
    let root = dunce::canonicalize(extract_dir).map_err(FetchError::io(extract_dir))?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let name = entry.name().to_string();

        let Some(rel) = entry_destination(&name, strip) else {
            tracing::debug!("skipping zip entry {:?}", name);
            continue;
        };
        let target = root.join(rel);

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(FetchError::io(parent))?;
        }
        if name.ends_with('/') {
            continue;
        }

        let mut out = File::create(&target).map_err(FetchError::io(&target))?;
        io::copy(&mut entry, &mut out).map_err(FetchError::io(&target))?;

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode().map(|m| m & 0o7777).filter(|m| *m != 0) {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&target, fs::Permissions::from_mode(mode))
                .map_err(FetchError::io(&target))?;
        }
    }

    Ok(())
}
