use thiserror::Error;

use crate::unit::DeclKind;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("object {name:?} not found in {unit}: no top-level item with that name")]
    NameNotFound { unit: String, name: String },

    #[error("{kind} {name:?} in {unit} is not a type declaration and cannot be registered")]
    UnsupportedKind {
        unit: String,
        name: String,
        kind: DeclKind,
    },

    #[error("units {first:?} and {second:?} both map to import alias {alias:?}")]
    AliasCollision {
        alias: String,
        first: String,
        second: String,
    },
}
