use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::registry_lookup::{RegistryError, RegistryLookup};

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("no .uproject file found under {0}")]
    MissingDescriptor(PathBuf),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("engine '{association}' is not registered on this machine")]
    EngineNotRegistered { association: String },
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    root: PathBuf,
    descriptor_path: PathBuf,
    name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectDescriptor {
    #[serde(rename = "EngineAssociation")]
    pub engine_association: String,
}

impl Project {
    pub fn locate(dir: &Path) -> Result<Self, ProjectError> {
        let descriptor_path = find_uproject(dir)
            .ok_or_else(|| ProjectError::MissingDescriptor(dir.to_path_buf()))?;

        let name = descriptor_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            root: dir.to_path_buf(),
            descriptor_path,
            name,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn descriptor_path(&self) -> &Path {
        &self.descriptor_path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn descriptor(&self) -> Result<ProjectDescriptor, ProjectError> {
        let raw = fs::read_to_string(&self.descriptor_path).map_err(|source| {
            ProjectError::Read {
                path: self.descriptor_path.clone(),
                source,
            }
        })?;

        serde_json::from_str(&raw).map_err(|source| ProjectError::Parse {
            path: self.descriptor_path.clone(),
            source,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Engine {
    root: PathBuf,
}

impl Engine {
    pub fn locate(project: &Project, lookup: &dyn RegistryLookup) -> Result<Self, ProjectError> {
        let descriptor = project.descriptor()?;
        let association = descriptor.engine_association;

        let key = if association.starts_with('{') {
            format!("HKCU:Software/Epic Games/Unreal Engine/Builds/{association}")
        } else {
            format!("HKLM:SOFTWARE/EpicGames/Unreal Engine/{association}/InstalledDirectory")
        };

        let values = lookup.read_values(&key)?;
        let root = values
            .first()
            .map(PathBuf::from)
            .ok_or(ProjectError::EngineNotRegistered { association })?;

        Ok(Self { root })
    }

    pub fn from_root(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn binaries_dir(&self) -> PathBuf {
        self.root.join("Engine").join("Binaries").join("Win64")
    }

    pub fn uat_path(&self) -> PathBuf {
        self.root
            .join("Engine")
            .join("Build")
            .join("BatchFiles")
            .join("RunUAT.bat")
    }

    pub fn build_script_path(&self) -> PathBuf {
        self.root
            .join("Engine")
            .join("Build")
            .join("BatchFiles")
            .join("Build.bat")
    }

    pub fn editor_path(&self) -> PathBuf {
        self.binaries_dir().join("UnrealEditor.exe")
    }

    pub fn editor_cmd_path(&self) -> PathBuf {
        self.binaries_dir().join("UnrealEditor-Cmd.exe")
    }

    pub fn insights_path(&self) -> PathBuf {
        self.binaries_dir().join("UnrealInsights.exe")
    }
}

fn find_uproject(dir: &Path) -> Option<PathBuf> {
    let mut pending = vec![dir.to_path_buf()];

    while let Some(current) = pending.pop() {
        let Ok(entries) = fs::read_dir(&current) else {
            continue;
        };

        let mut subdirs = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "uproject") {
                return Some(path);
            }
            if path.is_dir() {
                subdirs.push(path);
            }
        }

        pending.extend(subdirs);
    }

    None
}
