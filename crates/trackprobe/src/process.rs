//! Synchronous external process execution
//!
//! Runs a child process to completion with stdin detached and both output
//! streams captured as text. The child is given explicit argument vectors
//! rather than a shell string, so paths containing spaces or shell
//! metacharacters pass through verbatim.

use std::ffi::OsStr;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

/// Captured result of one child process invocation.
///
/// A plain immutable snapshot taken after the child has exited. The exit
/// code is `None` when the process was terminated by a signal.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    /// Rendered command line, for diagnostics
    pub command: String,
    /// Exit code, if the process exited normally
    pub exit_code: Option<i32>,
    /// Captured standard output (lossy UTF-8)
    pub stdout: String,
    /// Captured standard error (lossy UTF-8)
    pub stderr: String,
}

impl ProcessOutput {
    /// True when the process exited with code zero.
    pub fn ok(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Render a program and its arguments as a display string.
pub fn render_command(program: &Path, args: &[&OsStr]) -> String {
    let mut rendered = program.display().to_string();
    for arg in args {
        rendered.push(' ');
        rendered.push_str(&arg.to_string_lossy());
    }
    rendered
}

/// Run a command to completion, capturing stdout and stderr.
///
/// stdin is fed from the null device so the child never blocks waiting on
/// the caller's terminal. Blocks until the child exits; a non-zero exit is
/// reported through [`ProcessOutput`], not as an error. The `Err` case is
/// reserved for failure to spawn the process at all.
pub fn run(program: &Path, args: &[&OsStr]) -> io::Result<ProcessOutput> {
    let command = render_command(program, args);
    log::debug!("running: {}", command);

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()?;

    log::debug!("exit status: {:?}", output.status.code());

    Ok(ProcessOutput {
        command,
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}
