use std::io;
use std::io::{Read, Write};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;

pub const DEFAULT_CAPTURE_TIMEOUT: Duration = Duration::from_secs(10);

const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub status_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.status_code == 0
    }
}

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("{program} did not finish within {timeout:?}; process was killed")]
    Timeout { program: String, timeout: Duration },
    #[error("i/o error while running {program}: {source}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },
}

pub trait ProcessRunner {
    fn run_captured(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<ProcessOutput, ProcessError>;

    fn run_with_input(
        &self,
        program: &str,
        args: &[&str],
        stdin_data: &[u8],
        timeout: Duration,
    ) -> Result<ProcessOutput, ProcessError>;

    fn run_streamed(&self, program: &str, args: &[&str]) -> Result<i32, ProcessError>;

    fn spawn_detached(&self, program: &str, args: &[&str]) -> Result<u32, ProcessError>;
}

#[derive(Debug, Default)]
pub struct SystemProcessRunner;

impl SystemProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemProcessRunner {
    fn run_captured(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<ProcessOutput, ProcessError> {
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| spawn_error(program, source))?;

        wait_with_timeout(program, child, timeout)
    }

    fn run_with_input(
        &self,
        program: &str,
        args: &[&str],
        stdin_data: &[u8],
        timeout: Duration,
    ) -> Result<ProcessOutput, ProcessError> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| spawn_error(program, source))?;

        if let Some(mut stdin) = child.stdin.take() {
            let data = stdin_data.to_vec();
            thread::spawn(move || {
                let _ = stdin.write_all(&data);
            });
        }

        wait_with_timeout(program, child, timeout)
    }

    fn run_streamed(&self, program: &str, args: &[&str]) -> Result<i32, ProcessError> {
        let status = Command::new(program)
            .args(args)
            .status()
            .map_err(|source| spawn_error(program, source))?;

        Ok(status.code().unwrap_or(-1))
    }

    fn spawn_detached(&self, program: &str, args: &[&str]) -> Result<u32, ProcessError> {
        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        configure_new_session(&mut command);

        let child = command
            .spawn()
            .map_err(|source| spawn_error(program, source))?;

        Ok(child.id())
    }
}

#[cfg(unix)]
fn configure_new_session(command: &mut Command) {
    use std::os::unix::process::CommandExt;
    command.process_group(0);
}

#[cfg(windows)]
fn configure_new_session(command: &mut Command) {
    use std::os::windows::process::CommandExt;
    const DETACHED_PROCESS: u32 = 0x0000_0008;
    const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
    command.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
}

fn wait_with_timeout(
    program: &str,
    mut child: Child,
    timeout: Duration,
) -> Result<ProcessOutput, ProcessError> {
    let stdout_reader = child.stdout.take().map(drain_pipe);
    let stderr_reader = child.stderr.take().map(drain_pipe);

    let deadline = Instant::now() + timeout;

    let status = loop {
        match child.try_wait().map_err(|source| io_error(program, source))? {
            Some(status) => break status,
            None => {
                if Instant::now() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(ProcessError::Timeout {
                        program: program.to_string(),
                        timeout,
                    });
                }
                thread::sleep(WAIT_POLL_INTERVAL);
            }
        }
    };

    let stdout = join_pipe(program, stdout_reader)?;
    let stderr = join_pipe(program, stderr_reader)?;

    Ok(ProcessOutput {
        status_code: status.code().unwrap_or(-1),
        stdout,
        stderr,
    })
}

fn drain_pipe<R: Read + Send + 'static>(mut pipe: R) -> thread::JoinHandle<io::Result<String>> {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        pipe.read_to_end(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    })
}

fn join_pipe(
    program: &str,
    reader: Option<thread::JoinHandle<io::Result<String>>>,
) -> Result<String, ProcessError> {
    let Some(handle) = reader else {
        return Ok(String::new());
    };

    match handle.join() {
        Ok(result) => result.map_err(|source| io_error(program, source)),
        Err(_) => Err(io_error(
            program,
            io::Error::other("output reader thread panicked"),
        )),
    }
}

fn spawn_error(program: &str, source: io::Error) -> ProcessError {
    ProcessError::Spawn {
        program: program.to_string(),
        source,
    }
}

fn io_error(program: &str, source: io::Error) -> ProcessError {
    ProcessError::Io {
        program: program.to_string(),
        source,
    }
}
