//! Import aliases for units that contribute discovered types
//!
//! Every owning unit is imported once under the alias derived by
//! [`unit_alias`]. Two units whose ids flatten to the same alias would bind
//! the same name twice, so the table refuses them instead of letting one
//! silently replace the other. The alias the registry crate is imported
//! under is reserved the same way.

use std::collections::BTreeMap;

use tracing::debug;
use typereg_core::{unit_alias, CoreError, DiscoveredType};

/// One alias per owning unit, keyed and iterated by unit id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    by_unit: BTreeMap<String, String>,
}

impl AliasTable {
    /// Build the table for the owners of `types`.
    ///
    /// `reserved` is an alias already taken in the generated file.
    pub fn build(types: &[DiscoveredType], reserved: &str) -> Result<Self, CoreError> {
        let mut by_unit = BTreeMap::new();
        let mut by_alias: BTreeMap<String, String> = BTreeMap::new();

        for ty in types {
            if by_unit.contains_key(&ty.owner) {
                continue;
            }

            let alias = unit_alias(&ty.owner);
            if alias == reserved {
                return Err(CoreError::AliasCollision {
                    alias,
                    first: reserved.to_string(),
                    second: ty.owner.clone(),
                });
            }
            if let Some(first) = by_alias.get(&alias) {
                return Err(CoreError::AliasCollision {
                    alias,
                    first: first.clone(),
                    second: ty.owner.clone(),
                });
            }

            debug!("{} imported as {}", ty.owner, alias);
            by_alias.insert(alias.clone(), ty.owner.clone());
            by_unit.insert(ty.owner.clone(), alias);
        }

        Ok(Self { by_unit })
    }

    pub fn get(&self, unit: &str) -> Option<&str> {
        self.by_unit.get(unit).map(String::as_str)
    }

    /// `(unit id, alias)` pairs ordered by unit id
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.by_unit.iter().map(|(u, a)| (u.as_str(), a.as_str()))
    }

    pub fn len(&self) -> usize {
        self.by_unit.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_unit.is_empty()
    }
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

    #[test]
    fn test_one_alias_per_unit() {
        let types = vec![
            discovered("widgets::shapes", "Circle"),
            discovered("widgets::shapes", "Square"),
            discovered("audio", "Mixer"),
        ];

        let table = AliasTable::build(&types, "discovery").unwrap();

        assert_eq!(
            table.iter().collect::<Vec<_>>(),
            vec![("audio", "audio"), ("widgets::shapes", "widgets_shapes")]
        );
    }

    #[test]
    fn test_collision_is_an_error() {
        let types = vec![discovered("a::b_c", "One"), discovered("a_b::c", "Two")];

        let err = AliasTable::build(&types, "discovery").unwrap_err();
        assert_eq!(
            err,
            CoreError::AliasCollision {
                alias: "a_b_c".to_string(),
                first: "a::b_c".to_string(),
                second: "a_b::c".to_string(),
            }
        );
    }

    #[test]
    fn test_reserved_alias_is_an_error() {
        let types = vec![discovered("discovery", "Widget")];

        let err = AliasTable::build(&types, "discovery").unwrap_err();
        assert!(matches!(err, CoreError::AliasCollision { .. }));
    }

    #[test]
    fn test_empty() {
        let table = AliasTable::build(&[], "discovery").unwrap();
        assert!(table.is_empty());
        assert_eq!(table.get("anything"), None);
    }
}
