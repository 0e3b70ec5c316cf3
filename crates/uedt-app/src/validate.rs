use anyhow::Result;

use crate::App;

impl App<'_> {
    pub fn validate(&self) -> Result<()> {
        let engine = self.engine()?;

        let args = vec![self.uproject_arg(), "-run=DataValidation".to_string()];

        self.stream(&engine.editor_cmd_path(), &args)
    }
}
