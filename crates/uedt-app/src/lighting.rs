use anyhow::Result;
use tracing::info;

use crate::App;

impl App<'_> {
    pub fn rebuild_lighting(&self) -> Result<()> {
        info!("rebuild lighting started");

        let engine = self.engine()?;

        let mut args = vec![
            self.uproject_arg(),
            "-run=resavepackages".to_string(),
            "-buildlighting".to_string(),
            "-quality=Production".to_string(),
            "-allowcommandletrendering".to_string(),
        ];

        if !self.config.maps.is_empty() {
            args.push(format!("-map={}", self.config.maps.join("+")));
        }

        self.stream(&engine.editor_cmd_path(), &args)
    }
}
