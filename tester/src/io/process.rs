//! Helpers for running the runner tool with live, unbuffered output.

use std::io::{Read, Write};
use std::process::{Command, ExitStatus, Stdio};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, error, instrument, warn};
use wait_timeout::ChildExt;

/// Final state of a streamed child process.
#[derive(Debug)]
pub struct StreamOutcome {
    pub status: ExitStatus,
    pub timed_out: bool,
}

impl StreamOutcome {
    /// Exit code, or `fallback` when the process ended without one (signal, kill).
    pub fn code_or(&self, fallback: i32) -> i32 {
        self.status.code().unwrap_or(fallback)
    }
}

/// Run a command, forwarding its stdout and stderr to `sink` as chunks arrive.
///
/// Both pipes are drained concurrently so the child never blocks on a full
/// pipe. Nothing is retained after forwarding. With `timeout` unset the call
/// waits for the child indefinitely.
#[instrument(skip_all, fields(timeout = ?timeout))]
pub fn run_streaming<W>(
    mut cmd: Command,
    timeout: Option<Duration>,
    sink: W,
) -> Result<StreamOutcome>
where
    W: Write + Send + 'static,
{
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped()).stderr(Stdio::piped());

    debug!("spawning child process");
    let mut child = match cmd.spawn() {
        Ok(c) => c,
        Err(e) => {
            error!(err = %e, "failed to spawn command");
            return Err(e).context("spawn command");
        }
    };

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| anyhow!("stdout was not piped"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| anyhow!("stderr was not piped"))?;

    let sink = Arc::new(Mutex::new(sink));
    let stdout_sink = Arc::clone(&sink);
    let stdout_handle = thread::spawn(move || forward_stream(stdout, &stdout_sink));
    let stderr_handle = thread::spawn(move || forward_stream(stderr, &sink));

    let mut timed_out = false;
    let status = match timeout {
        None => child.wait().context("wait for command")?,
        Some(limit) => match child.wait_timeout(limit).context("wait for command")? {
            Some(status) => status,
            None => {
                warn!(timeout_secs = limit.as_secs(), "command timed out, killing");
                timed_out = true;
                child.kill().context("kill command")?;
                child.wait().context("wait command after kill")?
            }
        },
    };

    join_forwarder(stdout_handle).context("join stdout")?;
    join_forwarder(stderr_handle).context("join stderr")?;

    debug!(exit_code = ?status.code(), timed_out, "command finished");
    Ok(StreamOutcome { status, timed_out })
}

fn join_forwarder(handle: thread::JoinHandle<Result<()>>) -> Result<()> {
    match handle.join() {
        Ok(result) => result,
        Err(_) => Err(anyhow!("output forwarder thread panicked")),
    }
}

fn forward_stream<R: Read, W: Write>(mut reader: R, sink: &Mutex<W>) -> Result<()> {
    let mut chunk = [0u8; 8192];
    loop {
        let n = reader.read(&mut chunk).context("read output")?;
        if n == 0 {
            break;
        }
        let mut writer = sink
            .lock()
            .map_err(|_| anyhow!("output sink lock poisoned"))?;
        let forwarded = writer.write_all(&chunk[..n]);
        if let Err(e) = forwarded.and_then(|()| writer.flush()) {
            // Keep draining so the child cannot stall on a full pipe.
            warn!(err = %e, "failed to forward output");
        }
    }
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().expect("lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn sh(script: &str) -> Command {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(script);
        cmd
    }

    #[test]
    fn forwards_both_streams_and_keeps_exit_code() {
        let buf = SharedBuf::default();
        let outcome =
            run_streaming(sh("echo out; echo err >&2; exit 4"), None, buf.clone()).expect("run");

        assert_eq!(outcome.code_or(1), 4);
        assert!(!outcome.timed_out);
        let text = String::from_utf8(buf.0.lock().expect("lock").clone()).expect("utf8");
        assert!(text.contains("out"));
        assert!(text.contains("err"));
    }

    #[test]
    fn timeout_kills_child() {
        let outcome = run_streaming(
            sh("exec sleep 5"),
            Some(Duration::from_millis(100)),
            std::io::sink(),
        )
        .expect("run");
        assert!(outcome.timed_out);
        assert_eq!(outcome.code_or(1), 1);
    }

    #[test]
    fn spawn_failure_is_an_error() {
        let result = run_streaming(
            Command::new("/definitely/not/a/runner"),
            None,
            std::io::sink(),
        );
        assert!(result.is_err());
    }
}
