//! Core model and resolution pipeline for typereg
//!
//! A [`CompilationUnit`] is one loaded Rust module: its source files, the
//! comment groups found in them and its top-level symbol table. The
//! [`scanner`] pulls `//+discovery:Name` markers out of the comments, the
//! [`resolver`] checks each marked name against the symbol table, and
//! [`naming`] derives the import alias used for a unit in generated code.

pub mod discovery;
pub mod error;
pub mod naming;
pub mod resolver;
pub mod scanner;
pub mod unit;

pub use discovery::{discover_types, DiscoveredType, MarkerRecord};
pub use error::CoreError;
pub use naming::unit_alias;
pub use scanner::DEFAULT_MARKER_PREFIX;
pub use unit::{
    Comment, CommentGroup, CompilationUnit, DeclKind, SourceFile, Symbol, SymbolTable,
};
