use thiserror::Error;
use typereg_core::CoreError;

#[derive(Error, Debug)]
pub enum CodegenError {
    #[error("unit id {id:?} is not a valid Rust path: {reason}")]
    InvalidUnitPath { id: String, reason: String },

    #[error("{what} {value:?} is not a valid Rust identifier")]
    InvalidIdent { what: &'static str, value: String },

    #[error("invalid registry crate path {0:?}")]
    InvalidRegistryCrate(String),

    #[error("no alias assigned to unit {0:?}")]
    MissingAlias(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Code generation error: {0}")]
    Generation(String),
}
