//! typereg Runtime Library
//!
//! This crate provides the registry that typereg-generated code populates:
//!
//! - **`register`**: records `(owner, type name, instance)` while the process
//!   starts up
//! - **`registry`**: freezes the table on first use and returns it read-only
//! - **`RegistryBuilder`**: an explicit, non-global table for tests and
//!   embedders that manage their own lifecycle
//!
//! # Example
//!
//! ```rust,ignore
//! // discovery_generated.rs, produced by `typereg my-plugins`
//! include!(concat!(env!("OUT_DIR"), "/discovery_generated.rs"));
//!
//! fn main() -> Result<(), typereg_runtime::RegistryError> {
//!     register_for_discovery()?;
//!
//!     let registry = typereg_runtime::registry();
//!     for entry in registry.by_owner("my_plugins::audio") {
//!         println!("{}", entry.type_name());
//!     }
//!     Ok(())
//! }
//! ```

mod errors;
mod registry;

pub use errors::RegistryError;
pub use registry::{register, registry, Registration, Registry, RegistryBuilder};
