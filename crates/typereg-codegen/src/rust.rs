//! Rust registration file generator
//!
//! Produces a file of the form:
//!
//! ```rust,ignore
//! // Code generated by typereg. DO NOT EDIT.
//!
//! use typereg_runtime as discovery;
//! use widgets::shapes as widgets_shapes;
//! pub fn register_for_discovery() -> Result<(), discovery::RegistryError> {
//!     discovery::register("widgets::shapes", "Circle", Box::new(<widgets_shapes::Circle>::default()))?;
//!     Ok(())
//! }
//! ```
//!
//! The instance is built through the qualified-self form so that a generic
//! type's declared parameter defaults apply.

use proc_macro2::TokenStream;
use quote::quote;
use syn::Ident;
use tracing::{debug, instrument};
use typereg_core::DiscoveredType;

use crate::{AliasTable, Codegen, CodegenError, GeneratorConfig};

pub const GENERATED_HEADER: &str = "// Code generated by typereg. DO NOT EDIT.\n";

/// Rust code generator
#[derive(Debug, Clone, Default)]
pub struct RustCodegen {
    config: GeneratorConfig,
}

impl RustCodegen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    fn import(&self, unit: &str, alias: &str) -> Result<TokenStream, CodegenError> {
        let path = unit_path(unit)?;
        let alias = ident("unit alias", alias)?;
        Ok(quote! { use #path as #alias; })
    }

    fn registration(
        &self,
        registry: &Ident,
        aliases: &AliasTable,
        ty: &DiscoveredType,
    ) -> Result<TokenStream, CodegenError> {
        let alias = aliases
            .get(&ty.owner)
            .ok_or_else(|| CodegenError::MissingAlias(ty.owner.clone()))?;
        let alias = ident("unit alias", alias)?;
        let type_ident = ident("type name", &ty.type_name)?;
        let owner = &ty.owner;
        let type_name = &ty.type_name;

        Ok(quote! {
            #registry::register(#owner, #type_name, Box::new(<#alias::#type_ident>::default()))?;
        })
    }
}

impl Codegen for RustCodegen {
    #[instrument(skip_all, fields(units = aliases.len(), types = types.len()), level = "debug")]
    fn generate(
        &self,
        aliases: &AliasTable,
        types: &[DiscoveredType],
    ) -> Result<String, CodegenError> {
        let registry_crate: syn::Path = syn::parse_str(&self.config.registry_crate)
            .map_err(|_| CodegenError::InvalidRegistryCrate(self.config.registry_crate.clone()))?;
        let registry = ident("registry alias", &self.config.registry_alias)?;
        let function = ident("function name", &self.config.function_name)?;

        let imports = aliases
            .iter()
            .map(|(unit, alias)| self.import(unit, alias))
            .collect::<Result<Vec<_>, _>>()?;

        let statements = types
            .iter()
            .map(|ty| self.registration(&registry, aliases, ty))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "Rendering {} import(s) and {} registration(s)",
            imports.len(),
            statements.len()
        );

        let tokens = quote! {
            use #registry_crate as #registry;
            #(#imports)*

            pub fn #function() -> Result<(), #registry::RegistryError> {
                #(#statements)*
                Ok(())
            }
        };

        let file: syn::File =
            syn::parse2(tokens).map_err(|e| CodegenError::Generation(e.to_string()))?;

        Ok(format!("{}\n{}", GENERATED_HEADER, prettyplease::unparse(&file)))
    }
}

fn ident(what: &'static str, value: &str) -> Result<Ident, CodegenError> {
    syn::parse_str::<Ident>(value).map_err(|_| CodegenError::InvalidIdent {
        what,
        value: value.to_string(),
    })
}

fn unit_path(id: &str) -> Result<syn::Path, CodegenError> {
    syn::parse_str::<syn::Path>(id).map_err(|e| CodegenError::InvalidUnitPath {
        id: id.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn discovered(owner: &str, name: &str) -> DiscoveredType {
        DiscoveredType {
            owner: owner.to_string(),
            type_name: name.to_string(),
            ident_form: name.to_string(),
        }
    }

    fn render(types: &[DiscoveredType]) -> Result<String, CodegenError> {
        let aliases = AliasTable::build(types, "discovery")?;
        RustCodegen::new().generate(&aliases, types)
    }

    fn function_body_len(code: &str) -> usize {
        let file = syn::parse_file(code).unwrap();
        file.items
            .iter()
            .find_map(|item| match item {
                syn::Item::Fn(f) => Some(f.block.stmts.len()),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn test_empty_output_is_valid() {
        let code = render(&[]).unwrap();

        assert!(code.starts_with(GENERATED_HEADER));
        assert!(code.contains("use typereg_runtime as discovery;"));
        assert!(code.contains("pub fn register_for_discovery()"));
        assert_eq!(function_body_len(&code), 1);
        assert_eq!(code.matches("discovery::register(").count(), 0);
    }

    #[test]
    fn test_single_registration() {
        let code = render(&[discovered("example_com::module", "Widget")]).unwrap();

        assert!(code.contains("use example_com::module as example_com_module;"));
        assert!(code.contains("\"example_com::module\""));
        assert!(code.contains("\"Widget\""));
        assert!(code.contains("<example_com_module::Widget>::default()"));
        assert_eq!(code.matches("discovery::register(").count(), 1);
        assert_eq!(function_body_len(&code), 2);
    }

    #[test]
    fn test_two_units() {
        let code = render(&[
            discovered("audio", "Mixer"),
            discovered("widgets::shapes", "Circle"),
        ])
        .unwrap();

        let file = syn::parse_file(&code).unwrap();
        let uses = file
            .items
            .iter()
            .filter(|item| matches!(item, syn::Item::Use(_)))
            .count();
        assert_eq!(uses, 3);

        assert!(code.contains("<audio::Mixer>::default()"));
        assert!(code.contains("<widgets_shapes::Circle>::default()"));
        assert!(!code.contains("<audio::Circle>"));
        assert!(!code.contains("<widgets_shapes::Mixer>"));
    }

    #[test]
    fn test_output_is_deterministic() {
        let types = vec![discovered("b", "Two"), discovered("a", "One")];
        assert_eq!(render(&types).unwrap(), render(&types).unwrap());
    }

    #[test]
    fn test_invalid_unit_path() {
        let err = render(&[discovered("example.com/mod", "Widget")]).unwrap_err();
        assert!(matches!(err, CodegenError::InvalidUnitPath { .. }), "{err}");
    }

    #[test]
    fn test_custom_registry_and_function() {
        let config = GeneratorConfig {
            registry_alias: "registry".to_string(),
            function_name: "install".to_string(),
            ..GeneratorConfig::default()
        }
        .with_registry_crate("my_app::plugins::registry");

        let types = vec![discovered("widgets", "Widget")];
        let aliases = AliasTable::build(&types, &config.registry_alias).unwrap();
        let code = RustCodegen::new()
            .with_config(config)
            .generate(&aliases, &types)
            .unwrap();

        assert!(code.contains("use my_app::plugins::registry as registry;"));
        assert!(code.contains("pub fn install()"));
        assert!(code.contains("registry::register("));
    }

    #[test]
    fn test_invalid_function_name() {
        let config = GeneratorConfig {
            function_name: "fn".to_string(),
            ..GeneratorConfig::default()
        };

        let err = RustCodegen::new()
            .with_config(config)
            .generate(&AliasTable::default(), &[])
            .unwrap_err();
        assert!(matches!(err, CodegenError::InvalidIdent { what: "function name", .. }));
    }
}
