use anyhow::Result;
use tracing::{error, info};

use crate::App;

impl App<'_> {
    pub fn gauntlet(&self, target: Option<&str>) -> Result<()> {
        let Some(target) = target.filter(|value| !value.is_empty()) else {
            error!("cannot run gauntlet: no --target provided");
            return Ok(());
        };

        let engine = self.engine()?;
        let uat = engine.uat_path();

        let stage_args = vec![
            "BuildCookRun".to_string(),
            format!("-project={}", self.uproject_arg()),
            "-platform=Win64".to_string(),
            "-configuration=Development".to_string(),
            "-build".to_string(),
            "-cook".to_string(),
            "-pak".to_string(),
            "-stage".to_string(),
        ];
        self.stream(&uat, &stage_args)?;

        info!(target, "starting gauntlet test");

        let test_args = vec![
            "RunUnreal".to_string(),
            format!("-project={}", self.uproject_arg()),
            "-platform=Win64".to_string(),
            "-configuration=Development".to_string(),
            "-build=local".to_string(),
            format!("-test={target}"),
        ];
        self.stream(&uat, &test_args)
    }
}
