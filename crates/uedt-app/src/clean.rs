use anyhow::Result;
use tracing::{debug, info, warn};
use uedt_core::cleanup;

use crate::App;

impl App<'_> {
    pub fn clean(&self) -> Result<()> {
        let report = cleanup::clean_project(self.project.root());

        for removed in &report.removed {
            debug!(path = %removed.display(), "removed");
        }

        for failure in &report.failed {
            warn!(path = %failure.path.display(), reason = %failure.reason, "cannot remove");
        }

        info!(
            removed = report.removed.len(),
            failed = report.failed.len(),
            "clean up ended"
        );
        Ok(())
    }
}
