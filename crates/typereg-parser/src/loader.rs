//! Package specifier resolution and module tree loading
//!
//! A package specifier is one of:
//! - a directory holding a package `Cargo.toml`,
//! - a directory holding a virtual workspace `Cargo.toml` (every member is
//!   loaded, `members` globs expanded and `exclude` honoured),
//! - `dir/...`, every package found recursively under `dir`.
//!
//! Each package contributes one compilation unit per file-backed module,
//! starting from its crate root and following `mod name;` declarations.
//! Problems are collected across the whole load and reported together.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};
use typereg_core::{CompilationUnit, SourceFile};
use walkdir::WalkDir;

use crate::comments::extract_comments;
use crate::manifest::{Manifest, MANIFEST_FILE};
use crate::symbols::{summarize, ModuleDecl};
use crate::ParserError;

/// Suffix selecting every package below a directory
pub const RECURSIVE_SUFFIX: &str = "...";

/// Loads compilation units for a package specifier
#[derive(Debug, Default, Clone)]
pub struct UnitLoader;

impl UnitLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load every unit named by `spec`.
    ///
    /// Fails with [`ParserError::Load`] carrying every diagnostic collected
    /// if anything could not be read, parsed or located.
    #[instrument(skip(self), level = "debug")]
    pub fn load(&self, spec: &str) -> Result<Vec<CompilationUnit>, ParserError> {
        let mut load = Load::default();

        let packages = load.package_dirs(spec);
        for dir in &packages {
            load.load_package(dir);
        }

        if !load.diagnostics.is_empty() {
            return Err(ParserError::Load {
                spec: spec.to_string(),
                diagnostics: load.diagnostics,
            });
        }

        info!(
            "Loaded {} unit(s) from {} package(s)",
            load.units.len(),
            packages.len()
        );
        Ok(load.units)
    }
}

/// State of a single load
#[derive(Default)]
struct Load {
    units: Vec<CompilationUnit>,
    diagnostics: Vec<String>,
    visited: HashSet<PathBuf>,
    /// File each unit id was first loaded from
    owners: HashMap<String, PathBuf>,
}

impl Load {
    fn report(&mut self, diagnostic: impl ToString) {
        let diagnostic = diagnostic.to_string();
        warn!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    fn package_dirs(&mut self, spec: &str) -> Vec<PathBuf> {
        if let Some(root) = spec.strip_suffix(RECURSIVE_SUFFIX) {
            let root = root.trim_end_matches(['/', '\\']);
            let root = if root.is_empty() { "." } else { root };
            return self.find_packages(Path::new(root));
        }

        let dir = PathBuf::from(spec);
        let manifest = match Manifest::read(&dir) {
            Ok(manifest) => manifest,
            Err(e) => {
                self.report(e);
                return Vec::new();
            }
        };

        if manifest.is_package() {
            return vec![dir];
        }

        match manifest.workspace {
            Some(workspace) => self.workspace_members(&dir, &workspace.members, &workspace.exclude),
            None => {
                self.report(format!(
                    "{}: neither a package nor a workspace",
                    dir.join(MANIFEST_FILE).display()
                ));
                Vec::new()
            }
        }
    }

    fn find_packages(&mut self, root: &Path) -> Vec<PathBuf> {
        let mut packages = Vec::new();

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_skipped_dir(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    self.report(e);
                    continue;
                }
            };

            if !entry.file_type().is_file() || entry.file_name() != MANIFEST_FILE {
                continue;
            }

            let Some(dir) = entry.path().parent() else {
                continue;
            };
            match Manifest::read(dir) {
                Ok(manifest) if manifest.is_package() => packages.push(dir.to_path_buf()),
                Ok(_) => debug!("skipping virtual manifest in {}", dir.display()),
                Err(e) => self.report(e),
            }
        }

        if packages.is_empty() && self.diagnostics.is_empty() {
            self.report(format!("no packages found under {}", root.display()));
        }
        packages
    }

    fn workspace_members(
        &mut self,
        dir: &Path,
        members: &[String],
        exclude: &[String],
    ) -> Vec<PathBuf> {
        let excluded: HashSet<PathBuf> = exclude.iter().map(|e| dir.join(e)).collect();
        let mut packages = Vec::new();

        for pattern in members {
            let pattern_path = dir.join(pattern);
            let paths = match glob::glob(&pattern_path.to_string_lossy()) {
                Ok(paths) => paths,
                Err(e) => {
                    self.report(format!("invalid workspace member pattern {:?}: {}", pattern, e));
                    continue;
                }
            };

            for path in paths {
                match path {
                    Ok(path) if path.join(MANIFEST_FILE).is_file() => {
                        if !excluded.contains(&path) {
                            packages.push(path);
                        }
                    }
                    Ok(_) => {}
                    Err(e) => self.report(e),
                }
            }
        }

        packages.sort();
        packages.dedup();
        if packages.is_empty() {
            self.report(format!("workspace {} has no members", dir.display()));
        }
        packages
    }

    fn load_package(&mut self, dir: &Path) {
        let manifest = match Manifest::read(dir) {
            Ok(manifest) => manifest,
            Err(e) => {
                self.report(e);
                return;
            }
        };

        let Some(crate_name) = manifest.crate_name() else {
            self.report(format!("{}: no [package] section", dir.display()));
            return;
        };
        let Some(root) = manifest.crate_root(dir) else {
            self.report(format!(
                "{}: no crate root (expected src/lib.rs or src/main.rs)",
                dir.display()
            ));
            return;
        };

        debug!("Loading crate {} from {}", crate_name, root.display());
        let children_dir = parent_dir(&root);
        self.load_module(crate_name, root, children_dir);
    }

    /// Load one module file and, recursively, the files of its `mod` items.
    ///
    /// `children_dir` is where `mod name;` inside this file looks for
    /// `name.rs` and `name/mod.rs`.
    fn load_module(&mut self, id: String, path: PathBuf, children_dir: PathBuf) {
        if !self.visited.insert(path.clone()) {
            return;
        }
        if let Some(first) = self.owners.get(&id) {
            let diagnostic = format!(
                "unit `{}` provided by both {} and {}",
                id,
                first.display(),
                path.display()
            );
            self.report(diagnostic);
            return;
        }
        self.owners.insert(id.clone(), path.clone());

        let source = match fs::read_to_string(&path) {
            Ok(source) => source,
            Err(e) => {
                self.report(ParserError::io(&path, e));
                return;
            }
        };

        let syntax = match syn::parse_file(&source) {
            Ok(syntax) => syntax,
            Err(e) => {
                let start = e.span().start();
                self.report(ParserError::Parse {
                    path,
                    line: start.line,
                    column: start.column + 1,
                    message: e.to_string(),
                });
                return;
            }
        };

        let summary = summarize(&syntax);
        let mut unit = CompilationUnit::new(id.clone());
        unit.files.push(SourceFile {
            path: path.clone(),
            comments: extract_comments(&source),
        });
        for (name, symbol) in summary.symbols {
            unit.symbols.insert(name, symbol);
        }
        unit.imports = summary.imports;

        debug!(
            "{}: {} symbol(s), {} comment group(s) in {}",
            id,
            unit.symbols.len(),
            unit.files[0].comments.len(),
            path.display()
        );
        self.units.push(unit);

        for module in summary.modules.into_iter().filter(|m| !m.inline) {
            match module_file(&path, &children_dir, &module) {
                Some((file, grandchildren_dir)) => {
                    self.load_module(format!("{}::{}", id, module.name), file, grandchildren_dir)
                }
                None => self.report(format!(
                    "{}: file not found for module `{}`",
                    path.display(),
                    module.name
                )),
            }
        }
    }
}

/// Locate the file backing `mod name;` and the directory its own children live in
fn module_file(
    parent_file: &Path,
    children_dir: &Path,
    module: &ModuleDecl,
) -> Option<(PathBuf, PathBuf)> {
    if let Some(path_attr) = &module.path_attr {
        let file = parent_dir(parent_file).join(path_attr);
        let dir = parent_dir(&file);
        return file.is_file().then_some((file, dir));
    }

    let stem = module.name.strip_prefix("r#").unwrap_or(&module.name);
    let flat = children_dir.join(format!("{}.rs", stem));
    let nested = children_dir.join(stem).join("mod.rs");
    let dir = children_dir.join(stem);

    if flat.is_file() {
        Some((flat, dir))
    } else if nested.is_file() {
        Some((nested, dir))
    } else {
        None
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn is_skipped_dir(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.') || name == "target")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_module_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/shapes.rs"), "").unwrap();

        let module = ModuleDecl {
            name: "shapes".to_string(),
            path_attr: None,
            inline: false,
        };
        let (file, children) =
            module_file(&dir.path().join("src/lib.rs"), &dir.path().join("src"), &module).unwrap();

        assert_eq!(file, dir.path().join("src/shapes.rs"));
        assert_eq!(children, dir.path().join("src/shapes"));
    }

    #[test]
    fn test_path_attribute_is_relative_to_parent_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src/impl")).unwrap();
        fs::write(dir.path().join("src/impl/colors.rs"), "").unwrap();

        let module = ModuleDecl {
            name: "colors".to_string(),
            path_attr: Some("impl/colors.rs".to_string()),
            inline: false,
        };
        let (file, children) =
            module_file(&dir.path().join("src/lib.rs"), &dir.path().join("src"), &module).unwrap();

        assert_eq!(file, dir.path().join("src/impl/colors.rs"));
        assert_eq!(children, dir.path().join("src/impl"));
    }

    #[test]
    fn test_raw_identifier_module_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/async.rs"), "").unwrap();

        let module = ModuleDecl {
            name: "r#async".to_string(),
            path_attr: None,
            inline: false,
        };
        let (file, children) =
            module_file(&dir.path().join("src/lib.rs"), &dir.path().join("src"), &module).unwrap();

        assert_eq!(file, dir.path().join("src/async.rs"));
        assert_eq!(children, dir.path().join("src/async"));
    }

    #[test]
    fn test_missing_module_file() {
        let dir = tempfile::tempdir().unwrap();
        let module = ModuleDecl {
            name: "ghost".to_string(),
            path_attr: None,
            inline: false,
        };

        assert!(module_file(&dir.path().join("lib.rs"), dir.path(), &module).is_none());
    }
}
