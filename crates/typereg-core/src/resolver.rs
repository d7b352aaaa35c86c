//! Resolution of marker names against a unit's top-level symbols

use std::collections::BTreeSet;

use tracing::debug;

use crate::discovery::{DiscoveredType, MarkerRecord};
use crate::error::CoreError;
use crate::unit::CompilationUnit;

/// Resolve each marker of `unit` to a discovered type.
///
/// Only top-level items are visible. A name that is missing, or that names
/// anything other than a struct, enum, union or type alias, is an error.
pub fn resolve_markers(
    unit: &CompilationUnit,
    markers: &BTreeSet<MarkerRecord>,
) -> Result<Vec<DiscoveredType>, CoreError> {
    let mut discovered = Vec::with_capacity(markers.len());

    for marker in markers {
        let symbol = unit
            .symbols
            .lookup(&marker.type_name)
            .ok_or_else(|| CoreError::NameNotFound {
                unit: unit.id.clone(),
                name: marker.type_name.clone(),
            })?;

        if !symbol.kind.is_named_type() {
            return Err(CoreError::UnsupportedKind {
                unit: unit.id.clone(),
                name: marker.type_name.clone(),
                kind: symbol.kind,
            });
        }

        debug!("{}: {} resolves to {}", unit.id, marker.type_name, symbol.kind);
        discovered.push(DiscoveredType {
            owner: unit.id.clone(),
            type_name: marker.type_name.clone(),
            ident_form: symbol.ident_form.clone(),
        });
    }

    Ok(discovered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::{DeclKind, Symbol};

    fn markers(unit: &str, names: &[&str]) -> BTreeSet<MarkerRecord> {
        names.iter().map(|n| MarkerRecord::new(unit, *n)).collect()
    }

    #[test]
    fn test_resolves_type_declarations() {
        let unit = CompilationUnit::new("example_com::module")
            .with_symbol("Widget", DeclKind::Struct)
            .with_symbol("Mode", DeclKind::Enum)
            .with_symbol("Handle", DeclKind::TypeAlias);

        let found =
            resolve_markers(&unit, &markers(&unit.id, &["Widget", "Mode", "Handle"])).unwrap();

        assert_eq!(found.len(), 3);
        assert!(found.iter().all(|t| t.owner == "example_com::module"));
    }

    #[test]
    fn test_missing_name_fails() {
        let unit = CompilationUnit::new("widgets").with_symbol("Widget", DeclKind::Struct);

        let err = resolve_markers(&unit, &markers("widgets", &["Gadget"])).unwrap_err();
        assert_eq!(
            err,
            CoreError::NameNotFound {
                unit: "widgets".to_string(),
                name: "Gadget".to_string(),
            }
        );
    }

    #[test]
    fn test_function_is_rejected() {
        let unit = CompilationUnit::new("widgets").with_symbol("build", DeclKind::Function);

        let err = resolve_markers(&unit, &markers("widgets", &["build"])).unwrap_err();
        assert_eq!(
            err,
            CoreError::UnsupportedKind {
                unit: "widgets".to_string(),
                name: "build".to_string(),
                kind: DeclKind::Function,
            }
        );
        assert!(err.to_string().contains("function \"build\""));
    }

    #[test]
    fn test_imports_and_traits_are_rejected() {
        let unit = CompilationUnit::new("widgets")
            .with_symbol("HashMap", DeclKind::Import)
            .with_symbol("Render", DeclKind::Trait);

        for name in ["HashMap", "Render"] {
            let err = resolve_markers(&unit, &markers("widgets", &[name])).unwrap_err();
            assert!(matches!(err, CoreError::UnsupportedKind { .. }), "{name}: {err}");
        }
    }

    #[test]
    fn test_generic_ident_form_is_preserved() {
        let mut unit = CompilationUnit::new("widgets");
        unit.symbols
            .insert("Slot", Symbol::new(DeclKind::Struct, "Slot < T = u8 >"));

        let found = resolve_markers(&unit, &markers("widgets", &["Slot"])).unwrap();
        assert_eq!(found[0].type_name, "Slot");
        assert_eq!(found[0].ident_form, "Slot < T = u8 >");
    }

    #[test]
    fn test_no_markers_yield_nothing() {
        let unit = CompilationUnit::new("widgets");
        assert!(resolve_markers(&unit, &BTreeSet::new()).unwrap().is_empty());
    }
}
