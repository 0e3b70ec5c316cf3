use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{error, info, warn};

use crate::App;

const WRITABLE_EXTENSIONS: &[&str] = &["dll", "pdb", "modules", "target", "uproject"];

impl App<'_> {
    pub fn fix_binary_permissions(&self) -> Result<()> {
        let mut fixed = 0usize;
        let mut failures = Vec::new();

        for file in files_with_extensions(self.project.root(), WRITABLE_EXTENSIONS) {
            let read_only = fs::metadata(&file)
                .map(|metadata| metadata.permissions().readonly())
                .unwrap_or(false);
            if !read_only {
                continue;
            }

            match make_user_writable(&file) {
                Ok(()) => fixed += 1,
                Err(source) => failures.push((file, source)),
            }
        }

        if failures.is_empty() {
            info!(fixed, "permissions fixed successfully");
        } else {
            for (path, source) in &failures {
                warn!(path = %path.display(), %source, "cannot fix permissions");
            }
            error!(
                "unable to fix all permissions; check file ownership or rerun with elevated rights"
            );
        }

        Ok(())
    }
}

fn make_user_writable(path: &Path) -> io::Result<()> {
    let metadata = fs::metadata(path)?;
    let mut permissions = metadata.permissions();

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        permissions.set_mode(permissions.mode() | 0o200);
    }

    #[cfg(not(unix))]
    permissions.set_readonly(false);

    fs::set_permissions(path, permissions)
}

fn files_with_extensions(root: &Path, extensions: &[&str]) -> Vec<PathBuf> {
    let mut found = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(current) = pending.pop() {
        let Ok(entries) = fs::read_dir(&current) else {
            continue;
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                pending.push(path);
            } else if path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| extensions.contains(&ext))
            {
                found.push(path);
            }
        }
    }

    found
}
