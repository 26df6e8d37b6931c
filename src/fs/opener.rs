use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{AppError, Result};

/// Asks the operating system to show a directory in its file manager.
pub trait Opener {
    fn open(&self, path: &Path) -> Result<()>;
}

/// Opener that launches the platform's native file manager.
#[derive(Debug, Clone, Copy)]
pub struct SystemOpener {
    os: &'static str,
}

impl Default for SystemOpener {
    fn default() -> Self {
        Self {
            os: std::env::consts::OS,
        }
    }
}

impl SystemOpener {
    #[cfg(test)]
    pub fn for_os(os: &'static str) -> Self {
        Self { os }
    }
}

impl Opener for SystemOpener {
    /// Spawns the launcher detached from the terminal and never waits on it.
    fn open(&self, path: &Path) -> Result<()> {
        let mut cmd = launch_command(self.os, path)?;
        let program = cmd.get_program().to_string_lossy().to_string();
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        match cmd.spawn() {
            Ok(child) => {
                tracing::info!(program = %program, pid = child.id(), path = %path.display(), "launched file manager");
                Ok(())
            }
            Err(source) => {
                tracing::warn!(program = %program, error = %source, "file manager launch failed");
                Err(AppError::LaunchFailed { program, source })
            }
        }
    }
}

/// Build the command that opens `path` on the operating system named `os`
/// (as reported by `std::env::consts::OS`).
pub fn launch_command(os: &str, path: &Path) -> Result<Command> {
    let cmd = match os {
        "linux" | "freebsd" | "openbsd" | "netbsd" | "dragonfly" => {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(path);
            cmd
        }
        "macos" => {
            let mut cmd = Command::new("open");
            cmd.arg(path);
            cmd
        }
        "windows" => {
            let mut cmd = Command::new("cmd");
            cmd.args(["/c", "start", ""]).arg(path);
            cmd
        }
        other => return Err(AppError::UnsupportedPlatform(other.to_string())),
    };
    Ok(cmd)
}
