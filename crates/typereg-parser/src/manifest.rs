//! The subset of `Cargo.toml` needed to locate crate roots and workspace members

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::ParserError;

pub const MANIFEST_FILE: &str = "Cargo.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    pub package: Option<PackageSection>,
    pub lib: Option<LibSection>,
    pub workspace: Option<WorkspaceSection>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PackageSection {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LibSection {
    pub name: Option<String>,
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkspaceSection {
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Manifest {
    /// Read `Cargo.toml` from a package directory
    pub fn read(dir: &Path) -> Result<Self, ParserError> {
        let path = dir.join(MANIFEST_FILE);
        let content = fs::read_to_string(&path).map_err(|e| ParserError::io(&path, e))?;
        Self::parse(&content).map_err(|source| ParserError::Manifest { path, source })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Name the package's library is imported by (`my-crate` becomes `my_crate`)
    pub fn crate_name(&self) -> Option<String> {
        let lib_name = self.lib.as_ref().and_then(|lib| lib.name.clone());
        lib_name.or_else(|| {
            self.package
                .as_ref()
                .map(|package| package.name.replace('-', "_"))
        })
    }

    /// Root source file of the package: `[lib] path`, `src/lib.rs`, then `src/main.rs`
    pub fn crate_root(&self, dir: &Path) -> Option<PathBuf> {
        if let Some(path) = self.lib.as_ref().and_then(|lib| lib.path.as_ref()) {
            return Some(dir.join(path));
        }

        ["src/lib.rs", "src/main.rs"]
            .iter()
            .map(|candidate| dir.join(candidate))
            .find(|candidate| candidate.is_file())
    }

    pub fn is_package(&self) -> bool {
        self.package.is_some()
    }
}
