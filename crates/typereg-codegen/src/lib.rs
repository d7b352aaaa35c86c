//! Code generation for discovered-type registration

pub mod aliases;
pub mod config;
pub mod error;
pub mod rust;

use typereg_core::DiscoveredType;

pub use aliases::AliasTable;
pub use config::GeneratorConfig;
pub use error::CodegenError;

/// Common trait for registration file generators
pub trait Codegen {
    fn generate(
        &self,
        aliases: &AliasTable,
        types: &[DiscoveredType],
    ) -> Result<String, CodegenError>;
}
