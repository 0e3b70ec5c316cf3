use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::config::PerforceConfig;
use crate::process::{DEFAULT_CAPTURE_TIMEOUT, ProcessError, ProcessOutput, ProcessRunner};

pub const P4_PROGRAM: &str = "p4";

pub const NO_CHANGELIST: i64 = -1;

#[derive(Debug, Error)]
pub enum PerforceError {
    #[error("unexpected response from perforce: {0}")]
    Protocol(String),
    #[error("failed to run perforce command: {0}")]
    Execute(#[from] ProcessError),
}

pub fn create_changelist(
    config: &PerforceConfig,
    description: &str,
    runner: &dyn ProcessRunner,
) -> Result<i64, PerforceError> {
    let mut form_args = connection_args(config);
    form_args.extend([
        "--field".to_string(),
        format!("Description={description}"),
        "--field".to_string(),
        "Files=".to_string(),
        "change".to_string(),
        "-o".to_string(),
    ]);

    let Some(form) = run_p4(runner, &form_args)? else {
        return Ok(NO_CHANGELIST);
    };
    if !form.success() {
        return Err(PerforceError::Protocol(format!(
            "changelist form generation failed (exit {}): {}",
            form.status_code,
            form.stderr.trim()
        )));
    }

    let mut submit_args = connection_args(config);
    submit_args.extend(["change".to_string(), "-i".to_string()]);

    let Some(response) = run_p4_with_input(runner, &submit_args, form.stdout.as_bytes())? else {
        return Ok(NO_CHANGELIST);
    };
    if !response.success() {
        return Err(PerforceError::Protocol(format!(
            "changelist form submission failed (exit {}): {}",
            response.status_code,
            response.stderr.trim()
        )));
    }

    parse_changelist_number(&response.stdout)
}

pub fn checkout_files(
    config: &PerforceConfig,
    changelist: i64,
    paths: &[PathBuf],
    runner: &dyn ProcessRunner,
) -> Result<bool, PerforceError> {
    let existing = existing_files(paths);
    if existing.is_empty() {
        return Ok(true);
    }

    let args = scoped_file_args(config, "edit", changelist, &existing);
    let Some(output) = run_p4(runner, &args)? else {
        return Ok(false);
    };

    if !output.success() {
        tracing::warn!(
            status = output.status_code,
            stderr = %output.stderr.trim(),
            "perforce edit failed"
        );
        return Ok(false);
    }

    if output.stdout.contains("reopen") {
        return reopen_files(config, changelist, paths, runner);
    }

    Ok(true)
}

pub fn reopen_files(
    config: &PerforceConfig,
    changelist: i64,
    paths: &[PathBuf],
    runner: &dyn ProcessRunner,
) -> Result<bool, PerforceError> {
    let existing = existing_files(paths);
    if existing.is_empty() {
        return Ok(true);
    }

    let args = scoped_file_args(config, "reopen", changelist, &existing);
    let Some(output) = run_p4(runner, &args)? else {
        return Ok(false);
    };

    ensure_zero_return(&output, "reopen")?;
    Ok(true)
}

pub fn revert_files(
    config: &PerforceConfig,
    paths: &[PathBuf],
    runner: &dyn ProcessRunner,
) -> Result<bool, PerforceError> {
    let existing = existing_files(paths);
    if existing.is_empty() {
        return Ok(true);
    }

    let mut args = connection_args(config);
    args.extend(["revert".to_string(), "-a".to_string()]);
    args.extend(path_args(&existing));

    let Some(output) = run_p4(runner, &args)? else {
        return Ok(false);
    };
    ensure_zero_return(&output, "revert")?;
    Ok(true)
}

pub fn submit_changelist(
    config: &PerforceConfig,
    changelist: i64,
    runner: &dyn ProcessRunner,
) -> Result<bool, PerforceError> {
    if changelist == NO_CHANGELIST {
        return Ok(true);
    }

    let mut args = connection_args(config);
    args.extend([
        "submit".to_string(),
        "-c".to_string(),
        changelist.to_string(),
    ]);

    let Some(output) = run_p4(runner, &args)? else {
        return Ok(false);
    };
    ensure_zero_return(&output, "submit")?;
    Ok(true)
}

pub fn connection_args(config: &PerforceConfig) -> Vec<String> {
    vec![
        "-p".to_string(),
        format!("{}:{}", config.server_address, config.server_port),
        "-u".to_string(),
        config.user.clone(),
        "-P".to_string(),
        config.ticket.clone(),
        "-c".to_string(),
        config.workspace.clone(),
    ]
}

fn scoped_file_args(
    config: &PerforceConfig,
    verb: &str,
    changelist: i64,
    files: &[PathBuf],
) -> Vec<String> {
    let mut args = connection_args(config);
    args.push(verb.to_string());
    if changelist != NO_CHANGELIST {
        args.extend(["-c".to_string(), changelist.to_string()]);
    }
    args.extend(path_args(files));
    args
}

fn path_args(files: &[PathBuf]) -> Vec<String> {
    files
        .iter()
        .map(|path| path.to_string_lossy().into_owned())
        .collect()
}

fn existing_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    paths
        .iter()
        .filter(|path| Path::is_file(path))
        .cloned()
        .collect()
}

fn ensure_zero_return(output: &ProcessOutput, verb: &str) -> Result<(), PerforceError> {
    if output.success() {
        return Ok(());
    }

    Err(PerforceError::Protocol(format!(
        "perforce {verb} returned {}: {}",
        output.status_code,
        output.stderr.trim()
    )))
}

fn parse_changelist_number(stdout: &str) -> Result<i64, PerforceError> {
    static CHANGE_PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern =
        CHANGE_PATTERN.get_or_init(|| Regex::new(r"^Change (\d+)").expect("valid change pattern"));

    let captures = pattern.captures(stdout).ok_or_else(|| {
        PerforceError::Protocol(format!(
            "changelist creation response did not start with 'Change <number>': {}",
            stdout.trim()
        ))
    })?;

    let number: i64 = captures[1]
        .parse()
        .map_err(|_| PerforceError::Protocol(format!("changelist number out of range: {stdout}")))?;

    if number <= 0 {
        return Err(PerforceError::Protocol(format!(
            "changelist number must be positive, got {number}"
        )));
    }

    Ok(number)
}

fn run_p4(
    runner: &dyn ProcessRunner,
    args: &[String],
) -> Result<Option<ProcessOutput>, PerforceError> {
    let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
    tolerate_timeout(runner.run_captured(P4_PROGRAM, &arg_refs, DEFAULT_CAPTURE_TIMEOUT))
}

fn run_p4_with_input(
    runner: &dyn ProcessRunner,
    args: &[String],
    stdin_data: &[u8],
) -> Result<Option<ProcessOutput>, PerforceError> {
    let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
    tolerate_timeout(runner.run_with_input(
        P4_PROGRAM,
        &arg_refs,
        stdin_data,
        DEFAULT_CAPTURE_TIMEOUT,
    ))
}

fn tolerate_timeout(
    result: Result<ProcessOutput, ProcessError>,
) -> Result<Option<ProcessOutput>, PerforceError> {
    match result {
        Ok(output) => Ok(Some(output)),
        Err(error @ ProcessError::Timeout { .. }) => {
            tracing::error!(%error, "perforce command timed out");
            Ok(None)
        }
        Err(error) => Err(error.into()),
    }
}
