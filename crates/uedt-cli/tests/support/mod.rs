#![allow(dead_code)]

use std::fs;
use std::path::Path;

use assert_cmd::Command;

pub fn uedt_command() -> Command {
    Command::cargo_bin("uedt").expect("uedt binary")
}

pub fn uedt_in_project(dir: &Path) -> Command {
    let mut command = uedt_command();
    command.current_dir(dir);
    command
}

pub fn write_sample_project(dir: &Path) {
    fs::write(
        dir.join("Sample.uproject"),
        "{\"EngineAssociation\": \"5.4\"}",
    )
    .expect("write uproject");
}
