//! Seam between the library and external programs.
//!
//! Only the shorewall executable is ever run. Going through
//! [`CommandExecutor`] lets unit tests swap in a mock and check the exact
//! invocation without shorewall installed.

use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

#[cfg(test)]
use mockall::automock;

/// Captured result of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was killed by a signal.
    pub code: Option<i32>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs a program to completion.
///
/// `Err` means the process never started. A non-zero exit is a normal
/// `Ok` result; callers inspect [`CommandOutput::code`].
#[cfg_attr(test, automock)]
pub trait CommandExecutor: Send + Sync {
    // `&[String]` rather than `&[&str]`: automock cannot name the inner lifetime.
    fn execute(&self, program: &Path, args: &[String]) -> io::Result<CommandOutput>;
}

/// Spawns real processes with stdin closed.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealCommandExecutor;

impl RealCommandExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl CommandExecutor for RealCommandExecutor {
    fn execute(&self, program: &Path, args: &[String]) -> io::Result<CommandOutput> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            code: output.status.code(),
        })
    }
}
