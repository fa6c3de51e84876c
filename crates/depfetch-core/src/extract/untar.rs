//! `.tar.gz` / `.tgz` extraction through the external tar utility.

use crate::error::Result;
use crate::installer::run_command;
use std::path::Path;
use std::process::Command;

/// Runs `tar -xzf <archive> -C <outdir> --strip-components=<strip>`.
pub fn extract_tar_gz(tar_program: &str, archive: &Path, outdir: &Path, strip: usize) -> Result<()> {
    tracing::debug!(
        "extracting {} into {} (strip {})",
        archive.display(),
        outdir.display(),
        strip
    );
    let mut cmd = Command::new(tar_program);
    cmd.arg("-xzf")
        .arg(archive)
        .arg("-C")
        .arg(outdir)
        .arg(format!("--strip-components={strip}"));
    run_command(&mut cmd, tar_program)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use flate2::write::GzEncoder;
    use flate2::Compression;

    fn write_tar_gz(path: &Path, files: &[(&str, &[u8])]) {
        let file = std::fs::File::create(path).unwrap();
        let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));
        for (name, data) in files {
            let mut header = tar::Header::new_gnu();
            header.set_size(data.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder.append_data(&mut header, name, *data).unwrap();
        }
        builder.into_inner().unwrap().finish().unwrap();
    }

    #[test]
    fn extracts_with_strip_components() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("pkg.tar.gz");
        write_tar_gz(
            &archive,
            &[("pkg-1.0/include/a.h", b"int a;"), ("pkg-1.0/README", b"hi")],
        );
        let out = dir.path().join("out");
        std::fs::create_dir_all(&out).unwrap();

        extract_tar_gz("tar", &archive, &out, 1).unwrap();
        assert_eq!(std::fs::read(out.join("include/a.h")).unwrap(), b"int a;");
        assert_eq!(std::fs::read(out.join("README")).unwrap(), b"hi");
        assert!(!out.join("pkg-1.0").exists());
    }

    #[test]
    fn corrupt_archive_is_command_error() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("bad.tgz");
        std::fs::write(&archive, b"not gzip").unwrap();
        let err = extract_tar_gz("tar", &archive, dir.path(), 0).unwrap_err();
        assert!(matches!(err, FetchError::Command { .. }), "{err}");
    }
}
