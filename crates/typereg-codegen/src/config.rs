use std::path::PathBuf;

use typereg_core::DEFAULT_MARKER_PREFIX;

/// Configuration for registration file generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Comment prefix introducing a marker (e.g. `//+discovery:`)
    pub marker_prefix: String,
    /// Path of the crate providing `register` and `RegistryError`
    pub registry_crate: String,
    /// Local name the registry crate is imported under
    pub registry_alias: String,
    /// Name of the generated registration function
    pub function_name: String,
    /// Destination of the generated file, overwritten on every run
    pub output_path: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            marker_prefix: DEFAULT_MARKER_PREFIX.to_string(),
            registry_crate: "typereg_runtime".to_string(),
            registry_alias: "discovery".to_string(),
            function_name: "register_for_discovery".to_string(),
            output_path: PathBuf::from("discovery_generated.rs"),
        }
    }
}

impl GeneratorConfig {
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn with_registry_crate(mut self, path: impl Into<String>) -> Self {
        self.registry_crate = path.into();
        self
    }
}
