// src/process.rs

//! External tool invocation
//!
//! Every external process the pipeline runs goes through [`ToolCommand`]: a
//! blocking call that captures output and returns a structured result. The
//! core deliberately has no deadline or cancellation; if one is ever added it
//! belongs inside [`ToolCommand::run`], not at the call sites.

use crate::error::Result;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::{debug, warn};

/// Captured result of one external tool run
#[derive(Debug)]
pub struct ToolOutput {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Exit code, or -1 when the process was terminated by a signal
    pub fn code(&self) -> i32 {
        self.status.code().unwrap_or(-1)
    }

    /// Last stderr line, the usual place external tools put their diagnosis
    pub fn last_stderr_line(&self) -> &str {
        self.stderr.lines().last().unwrap_or("").trim()
    }
}

/// Builder for one blocking external tool invocation
pub struct ToolCommand {
    label: &'static str,
    program: PathBuf,
    args: Vec<OsString>,
    cwd: Option<PathBuf>,
}

impl ToolCommand {
    pub fn new(label: &'static str, program: impl Into<PathBuf>) -> Self {
        Self {
            label,
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Run the tool to completion, blocking until it exits
    ///
    /// stdin is nulled so a tool waiting for terminal input can never hang
    /// the run. Child output is captured and relayed line-by-line into the
    /// log, stdout at debug and stderr at warn.
    pub fn run(self) -> Result<ToolOutput> {
        debug!(
            "Running {}: {} {:?}",
            self.label,
            self.program.display(),
            self.args
        );

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(cwd) = &self.cwd {
            command.current_dir(cwd);
        }

        let output = command.output()?;
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        for line in stdout.lines() {
            debug!("[{}] {}", self.label, line);
        }
        for line in stderr.lines() {
            warn!("[{}] {}", self.label, line);
        }

        Ok(ToolOutput {
            status: output.status,
            stdout,
            stderr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_captures_output_and_status() {
        let output = ToolCommand::new("test", "sh")
            .arg("-c")
            .arg("echo out; echo err >&2")
            .run()
            .unwrap();

        assert!(output.success());
        assert_eq!(output.stdout.trim(), "out");
        assert_eq!(output.last_stderr_line(), "err");
    }

    #[test]
    fn test_run_reports_nonzero_exit() {
        let output = ToolCommand::new("test", "sh")
            .arg("-c")
            .arg("exit 3")
            .run()
            .unwrap();

        assert!(!output.success());
        assert_eq!(output.code(), 3);
    }

    #[test]
    fn test_run_respects_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        let output = ToolCommand::new("test", "sh")
            .arg("-c")
            .arg("pwd")
            .current_dir(dir.path())
            .run()
            .unwrap();

        let reported = std::fs::canonicalize(output.stdout.trim()).unwrap();
        let expected = std::fs::canonicalize(dir.path()).unwrap();
        assert_eq!(reported, expected);
    }
}
