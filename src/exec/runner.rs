// src/exec/runner.rs

//! Run one shell command and stream its output to the console.

use std::fmt;
use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::console::{ColorCode, Console, NEWLINE};
use crate::errors::{RebuildwatchError, Result};

/// Prefix of every line captured from a command's stdout or stderr.
pub const OUTPUT_PREFIX: &str = ">>> ";

/// Which pipe a drain task reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

impl fmt::Display for OutputStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputStream::Stdout => f.write_str("stdout"),
            OutputStream::Stderr => f.write_str("stderr"),
        }
    }
}

/// Run `command_line` through the platform shell and block until it is done.
///
/// Output protocol on the console, all in `color`:
/// - `$ <command_line>` before spawning,
/// - `>>> <line>` for every line on stdout or stderr (the line keeps its own
///   terminator; nothing is appended),
/// - `X <command_line>` once the process has exited *and* both pipes have
///   been drained to end-of-stream.
///
/// stdout and stderr are read by two independent tasks so a chatty stream can
/// never stall the child while we wait on the other one. Lines keep their
/// order within one stream; the two streams interleave freely.
///
/// The exit status is only logged. A failing command looks exactly like a
/// successful one to the caller. The only error is failing to start it.
pub async fn run_command(console: &Console, command_line: &str, color: ColorCode) -> Result<()> {
    console.line(&format!("$ {command_line}"), color)?;
    info!(cmd = %command_line, color = %color, "starting command");

    let mut cmd = shell_command(command_line);
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = cmd.spawn().map_err(|source| RebuildwatchError::Spawn {
        cmd: command_line.to_string(),
        source,
    })?;

    let stdout_drain = child
        .stdout
        .take()
        .map(|pipe| spawn_drain(pipe, OutputStream::Stdout, console.clone(), color));
    let stderr_drain = child
        .stderr
        .take()
        .map(|pipe| spawn_drain(pipe, OutputStream::Stderr, console.clone(), color));

    let status = child.wait().await;
    if status.is_err() {
        // Without a reaped child the pipes may never close; make sure they do.
        let _ = child.start_kill();
    }

    // Both drains are awaited even if one of them failed.
    let (stdout_lines, stderr_lines) = tokio::join!(
        join_drain(stdout_drain, OutputStream::Stdout),
        join_drain(stderr_drain, OutputStream::Stderr),
    );

    match status {
        Ok(status) => debug!(
            cmd = %command_line,
            exit_code = status.code().unwrap_or(-1),
            success = status.success(),
            stdout_lines,
            stderr_lines,
            "command finished"
        ),
        Err(err) => warn!(
            cmd = %command_line,
            error = %err,
            "failed to wait for command; output may be incomplete"
        ),
    }

    console.emit(&format!("X {command_line}"), color, NEWLINE)?;
    Ok(())
}

/// Build a shell command appropriate for the platform.
fn shell_command(command_line: &str) -> Command {
    if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(command_line);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(command_line);
        c
    }
}

fn spawn_drain<R>(
    pipe: R,
    stream: OutputStream,
    console: Console,
    color: ColorCode,
) -> JoinHandle<usize>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(drain_lines(pipe, stream, console, color))
}

/// Forward `pipe` to the console line by line until end-of-stream.
///
/// Returns the number of lines forwarded. Invalid UTF-8 is replaced rather
/// than dropped. A read error ends the drain early (and is logged).
pub async fn drain_lines<R>(pipe: R, stream: OutputStream, console: Console, color: ColorCode) -> usize
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(pipe);
    let mut buf = Vec::new();
    let mut forwarded = 0;

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                if let Err(err) = console.emit(&format!("{OUTPUT_PREFIX}{line}"), color, "") {
                    // Keep reading so the child never blocks on a full pipe.
                    warn!(%stream, error = %err, "failed to write command output to console");
                }
                forwarded += 1;
            }
            Err(err) => {
                warn!(%stream, error = %err, "error reading command output");
                break;
            }
        }
    }

    debug!(%stream, lines = forwarded, "output drain reached end of stream");
    forwarded
}

async fn join_drain(handle: Option<JoinHandle<usize>>, stream: OutputStream) -> usize {
    let Some(handle) = handle else {
        return 0;
    };
    match handle.await {
        Ok(lines) => lines,
        Err(err) => {
            warn!(%stream, error = %err, "output drain task failed");
            0
        }
    }
}
