//! Loading of Cargo packages into compilation units
//!
//! The [`UnitLoader`] turns a package specifier into one
//! [`CompilationUnit`](typereg_core::CompilationUnit) per file-backed module,
//! each carrying the comments and top-level symbols of its source.

pub mod comments;
pub mod error;
pub mod loader;
pub mod manifest;
pub mod symbols;

pub use error::ParserError;
pub use loader::UnitLoader;
