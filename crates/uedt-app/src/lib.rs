mod build;
mod changelist;
mod clean;
mod compile;
mod cook;
mod gauntlet;
mod insights;
mod launch;
mod lighting;
mod permissions;
mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use uedt_core::config::{PerforceConfig, UedtConfig};
use uedt_core::process::ProcessRunner;
use uedt_core::project::{Engine, Project};
use uedt_core::registry_lookup::RegistryLookup;

pub use launch::INSIGHTS_WARMUP;

pub struct App<'a> {
    pub runner: &'a dyn ProcessRunner,
    pub lookup: &'a dyn RegistryLookup,
    pub config: UedtConfig,
    pub project: Project,
}

impl<'a> App<'a> {
    pub fn new(
        runner: &'a dyn ProcessRunner,
        lookup: &'a dyn RegistryLookup,
        config: UedtConfig,
        project: Project,
    ) -> Self {
        Self {
            runner,
            lookup,
            config,
            project,
        }
    }

    pub(crate) fn engine(&self) -> Result<Engine> {
        Engine::locate(&self.project, self.lookup)
            .context("failed to locate the engine associated with this project")
    }

    pub(crate) fn perforce(&self) -> Result<&PerforceConfig> {
        self.config
            .perforce
            .as_ref()
            .context("missing [perforce] section in uedt.toml")
    }

    pub(crate) fn uproject_arg(&self) -> String {
        self.project.descriptor_path().to_string_lossy().into_owned()
    }

    pub(crate) fn stream(&self, program: &Path, args: &[String]) -> Result<()> {
        let program = program.to_string_lossy();
        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();

        let status = self
            .runner
            .run_streamed(&program, &arg_refs)
            .with_context(|| format!("failed to run {program}"))?;

        if status != 0 {
            tracing::warn!(status, program = %program, "command exited with non-zero status");
        }

        Ok(())
    }
}
