//! Library interface for the typereg generator
//!
//! [`generate`] runs the whole pipeline for one package specifier: load the
//! units, scan and resolve their markers, assign import aliases, render the
//! registration file and write it. The file is only written once every
//! earlier step has succeeded.

use std::fs;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{info, instrument};
use typereg_codegen::rust::RustCodegen;
use typereg_codegen::{AliasTable, Codegen, CodegenError};
use typereg_core::{discover_types, CoreError, DiscoveredType};
use typereg_parser::{ParserError, UnitLoader};

pub use typereg_codegen::GeneratorConfig;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Load(#[from] ParserError),

    #[error(transparent)]
    Resolve(#[from] CoreError),

    #[error(transparent)]
    Codegen(#[from] CodegenError),

    #[error("failed to write file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Rendered registration source and what went into it
#[derive(Debug, Clone)]
pub struct Rendered {
    pub units: usize,
    pub types: Vec<DiscoveredType>,
    pub code: String,
}

/// Outcome of a successful [`generate`]
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub units: usize,
    pub types: Vec<DiscoveredType>,
    pub output_path: PathBuf,
}

/// Load, scan, resolve and render without touching the filesystem
#[instrument(skip(config), level = "debug")]
pub fn render(spec: &str, config: &GeneratorConfig) -> Result<Rendered, GenerateError> {
    let units = UnitLoader::new().load(spec)?;
    let types = discover_types(&units, &config.marker_prefix)?;
    for ty in &types {
        info!("discovered {} in {} ({})", ty.type_name, ty.owner, ty.ident_form);
    }

    let aliases = AliasTable::build(&types, &config.registry_alias)?;
    let code = RustCodegen::new()
        .with_config(config.clone())
        .generate(&aliases, &types)?;

    Ok(Rendered {
        units: units.len(),
        types,
        code,
    })
}

/// Run the pipeline and overwrite `config.output_path` with the result
#[instrument(skip(config), fields(output = %config.output_path.display()))]
pub fn generate(spec: &str, config: &GeneratorConfig) -> Result<GenerateReport, GenerateError> {
    let rendered = render(spec, config)?;

    fs::write(&config.output_path, &rendered.code).map_err(|source| GenerateError::Write {
        path: config.output_path.clone(),
        source,
    })?;
    info!("wrote file {}", config.output_path.display());

    Ok(GenerateReport {
        units: rendered.units,
        types: rendered.types,
        output_path: config.output_path.clone(),
    })
}
