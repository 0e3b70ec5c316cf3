use std::collections::VecDeque;
use std::io;
use std::sync::Mutex;
use std::time::Duration;

use crate::process::{ProcessError, ProcessOutput, ProcessRunner};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallMode {
    Captured,
    Streamed,
    Detached,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub program: String,
    pub args: Vec<String>,
    pub stdin: Option<Vec<u8>>,
    pub mode: CallMode,
}

#[derive(Default)]
pub struct RecordingRunner {
    outputs: Mutex<VecDeque<Result<ProcessOutput, ProcessError>>>,
    streamed_statuses: Mutex<VecDeque<Result<i32, ProcessError>>>,
    detached_pids: Mutex<VecDeque<Result<u32, ProcessError>>>,
    calls: Mutex<Vec<Call>>,
}

impl RecordingRunner {
    pub fn new(
        outputs: Vec<Result<ProcessOutput, ProcessError>>,
        streamed_statuses: Vec<Result<i32, ProcessError>>,
        detached_pids: Vec<Result<u32, ProcessError>>,
    ) -> Self {
        Self {
            outputs: Mutex::new(outputs.into()),
            streamed_statuses: Mutex::new(streamed_statuses.into()),
            detached_pids: Mutex::new(detached_pids.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn from_outputs(outputs: Vec<Result<ProcessOutput, ProcessError>>) -> Self {
        Self::new(outputs, Vec::new(), Vec::new())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record(&self, program: &str, args: &[&str], stdin: Option<&[u8]>, mode: CallMode) {
        self.calls.lock().expect("calls lock").push(Call {
            program: program.to_string(),
            args: args.iter().map(|value| (*value).to_string()).collect(),
            stdin: stdin.map(<[u8]>::to_vec),
            mode,
        });
    }
}

impl ProcessRunner for RecordingRunner {
    fn run_captured(
        &self,
        program: &str,
        args: &[&str],
        _timeout: Duration,
    ) -> Result<ProcessOutput, ProcessError> {
        self.record(program, args, None, CallMode::Captured);
        self.outputs
            .lock()
            .expect("outputs lock")
            .pop_front()
            .unwrap_or_else(|| Err(missing_script(program)))
    }

    fn run_with_input(
        &self,
        program: &str,
        args: &[&str],
        stdin_data: &[u8],
        _timeout: Duration,
    ) -> Result<ProcessOutput, ProcessError> {
        self.record(program, args, Some(stdin_data), CallMode::Captured);
        self.outputs
            .lock()
            .expect("outputs lock")
            .pop_front()
            .unwrap_or_else(|| Err(missing_script(program)))
    }

    fn run_streamed(&self, program: &str, args: &[&str]) -> Result<i32, ProcessError> {
        self.record(program, args, None, CallMode::Streamed);
        self.streamed_statuses
            .lock()
            .expect("streamed lock")
            .pop_front()
            .unwrap_or_else(|| Err(missing_script(program)))
    }

    fn spawn_detached(&self, program: &str, args: &[&str]) -> Result<u32, ProcessError> {
        self.record(program, args, None, CallMode::Detached);
        self.detached_pids
            .lock()
            .expect("detached lock")
            .pop_front()
            .unwrap_or_else(|| Err(missing_script(program)))
    }
}

pub fn output(stdout: &str, stderr: &str, status_code: i32) -> Result<ProcessOutput, ProcessError> {
    Ok(ProcessOutput {
        status_code,
        stdout: stdout.to_string(),
        stderr: stderr.to_string(),
    })
}

fn missing_script(program: &str) -> ProcessError {
    ProcessError::Spawn {
        program: program.to_string(),
        source: io::Error::other("no scripted result for this call"),
    }
}
