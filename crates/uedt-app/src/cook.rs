use anyhow::Result;

use crate::App;

impl App<'_> {
    pub fn cook(&self) -> Result<()> {
        let engine = self.engine()?;

        let args = vec![
            self.uproject_arg(),
            "-run=cook".to_string(),
            "-targetplatform=Win64".to_string(),
            "-cookonthefly".to_string(),
            "-iterate".to_string(),
        ];

        self.stream(&engine.editor_path(), &args)
    }
}
