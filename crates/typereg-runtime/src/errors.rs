//! Error types for typereg-runtime.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// `register` was called after the registry had been read
    #[error("registry is frozen; cannot register {type_name:?} from {owner:?}")]
    Frozen { owner: String, type_name: String },
}
