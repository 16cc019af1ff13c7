//! Bounded external command execution
//!
//! Every external tool the engines talk to (git, `bd`, tracker CLIs) runs
//! through [`run_with_timeout`], so no probe or recovery action can block
//! indefinitely. A timeout is reported in the outcome, not as an error.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use wait_timeout::ChildExt;

/// Timeout for collecting output from child process pipes
const OUTPUT_COLLECTION_TIMEOUT: Duration = Duration::from_secs(2);

/// Maximum captured output per stream (1MB). Probes only inspect short output.
const MAX_OUTPUT_SIZE: usize = 1024 * 1024;

/// Result of running an external command under a deadline.
#[derive(Debug, Clone)]
pub struct CommandOutcome {
    pub success: bool,
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub timed_out: bool,
}

impl CommandOutcome {
    /// Short human-readable failure description.
    pub fn failure_summary(&self, timeout: Duration) -> String {
        if self.timed_out {
            return format!("timed out after {}s", timeout.as_secs());
        }
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            return stderr.to_string();
        }
        match self.exit_code {
            Some(code) => format!("exited with status {code}"),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Run `program args...` and wait at most `timeout` for it to exit.
///
/// Returns `Err` only when the process cannot be spawned (e.g. the binary is
/// not installed). Callers in the degradation engine translate that into an
/// unhealthy status.
pub fn run_with_timeout(
    program: &str,
    args: &[&str],
    working_dir: Option<&Path>,
    timeout: Duration,
) -> Result<CommandOutcome> {
    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(dir) = working_dir {
        cmd.current_dir(dir);
    }

    let command_line = format!("{program} {}", args.join(" "));
    let mut child = cmd
        .spawn()
        .with_context(|| format!("Failed to spawn command: {command_line}"))?;

    // Drain pipes while waiting, otherwise a chatty child can block on write.
    let stdout_rx = drain(child.stdout.take());
    let stderr_rx = drain(child.stderr.take());

    let wait_result = child
        .wait_timeout(timeout)
        .with_context(|| format!("Failed to wait for command: {command_line}"))?;

    let (success, exit_code, timed_out) = match wait_result {
        Some(status) => (status.success(), status.code(), false),
        None => {
            kill_child_process(&mut child);
            (false, None, true)
        }
    };

    let stdout = stdout_rx
        .recv_timeout(OUTPUT_COLLECTION_TIMEOUT)
        .unwrap_or_default();
    let stderr = stderr_rx
        .recv_timeout(OUTPUT_COLLECTION_TIMEOUT)
        .unwrap_or_default();

    Ok(CommandOutcome {
        success,
        exit_code,
        stdout,
        stderr,
        timed_out,
    })
}

fn drain<R: Read + Send + 'static>(stream: Option<R>) -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    match stream {
        Some(stream) => {
            thread::spawn(move || {
                let _ = tx.send(read_stream_to_string(stream));
            });
        }
        None => {
            let _ = tx.send(String::new());
        }
    }
    rx
}

/// Read a stream to string, capping the retained size at MAX_OUTPUT_SIZE.
fn read_stream_to_string<R: Read>(mut stream: R) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 8192];

    loop {
        match stream.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => {
                let remaining = MAX_OUTPUT_SIZE.saturating_sub(buf.len());
                buf.extend_from_slice(&chunk[..n.min(remaining)]);
            }
            Err(_) => break,
        }
    }

    String::from_utf8_lossy(&buf).to_string()
}

fn kill_child_process(child: &mut Child) {
    // The process may have exited between the timeout and the kill.
    let _ = child.kill();
    let _ = child.wait();
}
