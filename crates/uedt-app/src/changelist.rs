use anyhow::Result;
use tracing::{error, info};
use uedt_core::perforce;

use crate::App;

impl App<'_> {
    pub fn show_changelist(&self) -> Result<()> {
        let perforce = self.perforce()?;

        let Some(depot_path) = perforce.depot_path.as_deref() else {
            error!("no perforce.depot_path configured in uedt.toml");
            return Ok(());
        };

        let args = vec![
            "changes".to_string(),
            "-m".to_string(),
            "1".to_string(),
            "-s".to_string(),
            "submitted".to_string(),
            depot_path.to_string(),
        ];

        self.stream(std::path::Path::new(perforce::P4_PROGRAM), &args)
    }

    pub fn vcs_roundtrip(&self) -> Result<()> {
        let perforce = self.perforce()?.clone();
        let files = vec![self.project.descriptor_path().to_path_buf()];

        let changelist = perforce::create_changelist(&perforce, "Test", self.runner)?;
        info!(changelist, "created changelist");

        perforce::checkout_files(&perforce, changelist, &files, self.runner)?;
        perforce::revert_files(&perforce, &files, self.runner)?;

        info!(changelist, "round trip complete; changelist left unsubmitted");
        Ok(())
    }
}
