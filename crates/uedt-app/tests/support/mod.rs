#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use uedt_core::process::{ProcessError, ProcessOutput, ProcessRunner};
use uedt_core::registry_lookup::{RegistryError, RegistryLookup};

pub const ENGINE_ROOT: &str = "C:/Engines/UE_5.4";
pub const ENGINE_KEY: &str = "HKLM:SOFTWARE/EpicGames/Unreal Engine/5.4/InstalledDirectory";

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
    pub mode: CallMode,
}

#[derive(Default)]
pub struct ScriptedRunner {
    captured: Mutex<VecDeque<Result<ProcessOutput, ProcessError>>>,
    streamed: Mutex<VecDeque<Result<i32, ProcessError>>>,
    detached: Mutex<VecDeque<Result<u32, ProcessError>>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedRunner {
    pub fn new(
        captured: Vec<Result<ProcessOutput, ProcessError>>,
        streamed: Vec<Result<i32, ProcessError>>,
        detached: Vec<Result<u32, ProcessError>>,
    ) -> Self {
        Self {
            captured: Mutex::new(captured.into()),
            streamed: Mutex::new(streamed.into()),
            detached: Mutex::new(detached.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record(&self, program: &str, args: &[&str], mode: CallMode) {
        self.calls.lock().expect("calls lock").push(Call {
            program: program.to_string(),
            args: args.iter().map(|value| (*value).to_string()).collect(),
            mode,
        });
    }
}

impl ProcessRunner for ScriptedRunner {
    fn run_captured(
        &self,
        program: &str,
        args: &[&str],
        _timeout: Duration,
    ) -> Result<ProcessOutput, ProcessError> {
        self.record(program, args, CallMode::Captured);
        self.captured
            .lock()
            .expect("captured lock")
            .pop_front()
            .unwrap_or_else(|| Err(missing(program)))
    }

    fn run_with_input(
        &self,
        program: &str,
        args: &[&str],
        _stdin_data: &[u8],
        _timeout: Duration,
    ) -> Result<ProcessOutput, ProcessError> {
        self.record(program, args, CallMode::Captured);
        self.captured
            .lock()
            .expect("captured lock")
            .pop_front()
            .unwrap_or_else(|| Err(missing(program)))
    }

    fn run_streamed(&self, program: &str, args: &[&str]) -> Result<i32, ProcessError> {
        self.record(program, args, CallMode::Streamed);
        self.streamed
            .lock()
            .expect("streamed lock")
            .pop_front()
            .unwrap_or_else(|| Err(missing(program)))
    }

    fn spawn_detached(&self, program: &str, args: &[&str]) -> Result<u32, ProcessError> {
        self.record(program, args, CallMode::Detached);
        self.detached
            .lock()
            .expect("detached lock")
            .pop_front()
            .unwrap_or_else(|| Err(missing(program)))
    }
}

pub fn scripted_output(stdout: &str, status_code: i32) -> Result<ProcessOutput, ProcessError> {
    Ok(ProcessOutput {
        status_code,
        stdout: stdout.to_string(),
        stderr: String::new(),
    })
}

fn missing(program: &str) -> ProcessError {
    ProcessError::Spawn {
        program: program.to_string(),
        source: std::io::Error::other("no scripted result for this call"),
    }
}

#[derive(Default)]
pub struct FixedLookup {
    values: HashMap<String, Vec<String>>,
}

impl FixedLookup {
    pub fn with_engine() -> Self {
        let mut values = HashMap::new();
        values.insert(ENGINE_KEY.to_string(), vec![ENGINE_ROOT.to_string()]);
        Self { values }
    }

    pub fn insert(&mut self, key: &str, entry: Vec<String>) {
        self.values.insert(key.to_string(), entry);
    }
}

impl RegistryLookup for FixedLookup {
    fn read_values(&self, key_path: &str) -> Result<Vec<String>, RegistryError> {
        self.values
            .get(key_path)
            .cloned()
            .ok_or(RegistryError::ValueNotFound {
                key: key_path.to_string(),
            })
    }
}

pub fn write_sample_project(dir: &Path) {
    fs::write(
        dir.join("Sample.uproject"),
        "{\"EngineAssociation\": \"5.4\"}",
    )
    .expect("write uproject");
}
