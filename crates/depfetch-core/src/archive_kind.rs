//! Archive classification by file name.

use std::fmt;

/// How a downloaded archive is turned into the contents of the target directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    /// `.zip`, unpacked in-process.
    Zip,
    /// `.tar.gz` / `.tgz`, unpacked by the external tar utility.
    TarGz,
    /// `.sh`, run through the shell interpreter.
    Shell,
    /// `.exe` or a name without any extension, run directly.
    Executable,
    Unknown,
}

impl ArchiveKind {
    pub fn from_file_name(name: &str) -> Self {
        if name.ends_with(".zip") {
            ArchiveKind::Zip
        } else if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            ArchiveKind::TarGz
        } else if name.ends_with(".sh") {
            ArchiveKind::Shell
        } else if name.ends_with(".exe") || !name.contains('.') {
            ArchiveKind::Executable
        } else {
            ArchiveKind::Unknown
        }
    }
}

impl fmt::Display for ArchiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ArchiveKind::Zip => "zip",
            ArchiveKind::TarGz => "tar.gz",
            ArchiveKind::Shell => "shell installer",
            ArchiveKind::Executable => "executable",
            ArchiveKind::Unknown => "unknown",
        };
        f.write_str(s)
    }
}
