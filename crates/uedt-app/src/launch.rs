use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;
use uedt_core::launch_mode::LaunchMode;

use crate::App;

pub const INSIGHTS_WARMUP: Duration = Duration::from_secs(1);

impl App<'_> {
    pub fn launch(&self, mode: Option<&str>, strict: bool) -> Result<()> {
        let engine = self.engine()?;

        let mut args = vec![
            self.uproject_arg(),
            "-game".to_string(),
            "-log".to_string(),
        ];

        if let Some(raw) = mode.filter(|value| !value.is_empty()) {
            let parsed = if strict {
                LaunchMode::parse_strict(raw)?
            } else {
                LaunchMode::parse(raw)
            };

            if parsed.contains(LaunchMode::TRACE)
                && self.launch_insights_if_absent(&engine)?
            {
                thread::sleep(INSIGHTS_WARMUP);
            }

            args.extend(parsed.expand());
        }

        info!("launching {}", self.project.name());

        let editor = engine.editor_path();
        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        self.runner
            .spawn_detached(&editor.to_string_lossy(), &arg_refs)
            .context("failed to launch the editor")?;

        Ok(())
    }
}
