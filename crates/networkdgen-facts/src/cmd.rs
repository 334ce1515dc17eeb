//! cmd.rs
//!
//! Streamed runner for the external query commands.  The child's stderr is
//! relayed to the parent's stderr as it arrives so the operator sees errors
//! live; stdout is captured and handed back to the caller for decoding.

use std::{
    ffi::OsStr,
    io::{self, Read, Write},
    process::{Command, Stdio},
    thread,
};
use thiserror::Error;

/// Chunk size used while draining the child's pipes
const CHUNK_SIZE: usize = 8192;

/// Represents an Error that can occur when running a query command
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("expected stdout/stderr to be piped but no pipe was found")]
    PipeNotPresent,

    /// Input/Output error when launching the command or draining its pipes
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("stderr relay thread panicked")]
    RelayPanicked,
}

/// Executes a command with pipe buffering disabled, capturing stdout and
/// relaying stderr
///
/// The command is wrapped in `stdbuf -oL -e0` so the child's stdout stays
/// line-buffered and its stderr unbuffered; otherwise error output can sit
/// in a full pipe buffer until the child exits.  A worker thread drains
/// stderr straight through to this process's stderr while the calling
/// thread accumulates stdout; both streams are read until EOF before the
/// child is reaped.
///
/// A non-zero exit status is logged but is not an error here: the captured
/// stdout bytes are returned either way and the decoder decides whether
/// they are usable.
///
/// # Arguments
/// * `args` - Command and arguments to execute
///
/// # Errors
/// * `CommandError::Io` - If launching/forking the command or a pipe read fails
/// * `CommandError::PipeNotPresent` - If a handle to stdout/stderr could not be created
pub fn run_streamed<I, S>(args: I) -> Result<Vec<u8>, CommandError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = Command::new("stdbuf");
    cmd.args(&["-oL", "-e0"]);
    cmd.args(args);
    tracing::debug!("command: {:?}", cmd);

    let mut child = cmd.stdout(Stdio::piped()).stderr(Stdio::piped()).spawn()?;

    let mut stdout = child.stdout.take().ok_or(CommandError::PipeNotPresent)?;
    let mut stderr = child.stderr.take().ok_or(CommandError::PipeNotPresent)?;

    // one sink per stream
    let relay = thread::spawn(move || -> io::Result<()> {
        let mut chunk = [0u8; CHUNK_SIZE];
        let mut sink = io::stderr();
        loop {
            let n = stderr.read(&mut chunk)?;
            if n == 0 {
                // EOF
                break;
            }
            sink.write_all(&chunk[..n])?;
            sink.flush()?;
        }
        Ok(())
    });

    let mut captured = Vec::new();
    stdout.read_to_end(&mut captured)?;

    relay.join().map_err(|_| CommandError::RelayPanicked)??;

    let status = child.wait()?;
    if !status.success() {
        tracing::warn!(?status, "query command exited with non-zero status");
    }

    Ok(captured)
}

#[cfg(test)]
mod tests {
    use super::run_streamed;

    #[test]
    fn captures_stdout() {
        let out = run_streamed(&["echo", "hello"]).unwrap();
        assert_eq!(out, b"hello\n");
    }

    #[test]
    fn non_zero_exit_still_returns_captured_output() {
        let out = run_streamed(&["sh", "-c", "echo partial; exit 3"]).unwrap();
        assert_eq!(out, b"partial\n");
    }

    #[test]
    fn missing_child_binary_is_tolerated() {
        // stdbuf spawns, fails to exec the child and exits non-zero with
        // nothing on stdout
        let out = run_streamed(&["/nonexistent-networkdgen-binary"]).unwrap();
        assert_eq!(out, b"");
    }
}
