//! Running downloaded shell installers and executables.

use crate::error::{FetchError, Result};
use std::path::Path;
use std::process::Command;

/// Run `cmd` to completion with inherited stdio; a non-zero exit is an error.
pub(crate) fn run_command(cmd: &mut Command, program: &str) -> Result<()> {
    tracing::debug!("running {:?}", cmd);
    let status = cmd.status().map_err(FetchError::io(program))?;
    if !status.success() {
        return Err(FetchError::Command {
            program: program.to_string(),
            status,
        });
    }
    Ok(())
}

/// Run `script` through the `shell` interpreter with `args`.
pub fn run_shell(shell: &str, script: &Path, args: &[String]) -> Result<()> {
    let mut cmd = Command::new(shell);
    cmd.arg(script).args(args);
    run_command(&mut cmd, shell)
}

/// Mark `path` executable (0755) and run it directly with `args`.
pub fn run_executable(path: &Path, args: &[String]) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
            .map_err(FetchError::io(path))?;
    }
    let mut cmd = Command::new(path);
    cmd.args(args);
    run_command(&mut cmd, &path.display().to_string())
}
