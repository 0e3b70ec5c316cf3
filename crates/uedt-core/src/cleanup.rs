use std::fs;
use std::path::{Path, PathBuf};

pub const CLEAN_DIRS: &[&str] = &[
    "Binaries",
    "Intermediate",
    "Saved/Autosaves",
    "Saved/Backup",
    "Saved/Diff",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanFailure {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleanReport {
    pub removed: Vec<PathBuf>,
    pub failed: Vec<CleanFailure>,
}

impl CleanReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

pub fn clean_project(root: &Path) -> CleanReport {
    let mut report = CleanReport::default();

    for dir in clean_targets(root) {
        remove_dir(&dir, &mut report);
    }

    for solution in solution_files(root) {
        match fs::remove_file(&solution) {
            Ok(()) => report.removed.push(solution),
            Err(error) => report.failed.push(CleanFailure {
                path: solution,
                reason: error.to_string(),
            }),
        }
    }

    report
}

pub fn clean_targets(root: &Path) -> Vec<PathBuf> {
    let mut targets: Vec<PathBuf> = CLEAN_DIRS.iter().map(|dir| root.join(dir)).collect();

    let plugins_dir = root.join("Plugins");
    if let Ok(entries) = fs::read_dir(&plugins_dir) {
        for entry in entries.flatten() {
            let plugin = entry.path();
            if plugin.is_dir() {
                targets.extend(CLEAN_DIRS.iter().map(|dir| plugin.join(dir)));
            }
        }
    }

    targets.retain(|path| path.exists());
    targets
}

fn solution_files(root: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(root) else {
        return Vec::new();
    };

    entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "sln"))
        .collect()
}

fn remove_dir(path: &Path, report: &mut CleanReport) {
    match fs::remove_dir_all(path) {
        Ok(()) => report.removed.push(path.to_path_buf()),
        Err(error) => report.failed.push(CleanFailure {
            path: path.to_path_buf(),
            reason: error.to_string(),
        }),
    }
}
