//! External command execution with a deadline.

use std::io::Read;
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, trace, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Captured result of a finished command.
#[derive(Debug)]
pub struct Finished {
    pub status: ExitStatus,
    pub stdout: String,
}

/// Run `command` and wait at most `timeout` for it to exit.
///
/// Stdin is closed and stderr discarded. Returns `None` when the command
/// cannot be spawned, cannot be waited on, or is still running at the
/// deadline, in which case it is killed.
pub fn run_with_deadline(command: &mut Command, timeout: Duration) -> Option<Finished> {
    let program = command.get_program().to_string_lossy().into_owned();
    trace!(%program, ?timeout, "spawning");

    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| debug!(%program, error = %e, "spawn failed"))
        .ok()?;

    // A full stdout pipe would stall the child, so drain it while polling.
    let mut pipe = child.stdout.take()?;
    let reader = thread::spawn(move || {
        let mut buf = Vec::new();
        pipe.read_to_end(&mut buf).map(|_| buf)
    });

    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) if Instant::now() < deadline => thread::sleep(POLL_INTERVAL),
            Ok(None) => {
                warn!(%program, "timed out, killing");
                let _ = child.kill();
                let _ = child.wait();
                return None;
            }
            Err(e) => {
                debug!(%program, error = %e, "wait failed");
                return None;
            }
        }
    };

    let bytes = reader.join().ok()?.ok()?;
    Some(Finished {
        status,
        stdout: String::from_utf8_lossy(&bytes).into_owned(),
    })
}
