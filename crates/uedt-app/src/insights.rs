use anyhow::{Context, Result};
use tracing::info;
use uedt_core::procs::is_process_running;
use uedt_core::project::Engine;

use crate::App;

pub(crate) const INSIGHTS_IMAGE: &str = "UnrealInsights.exe";

impl App<'_> {
    pub fn ui(&self) -> Result<()> {
        let engine = self.engine()?;
        self.launch_insights_if_absent(&engine)?;
        Ok(())
    }

    pub(crate) fn launch_insights_if_absent(&self, engine: &Engine) -> Result<bool> {
        if is_process_running(INSIGHTS_IMAGE, self.runner) {
            info!("Unreal Insights process detected, skipping launch");
            return Ok(false);
        }

        let insights = engine.insights_path();
        self.runner
            .spawn_detached(&insights.to_string_lossy(), &[])
            .context("failed to launch Unreal Insights")?;

        info!("launching Unreal Insights");
        Ok(true)
    }
}
