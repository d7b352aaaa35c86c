//! Import alias derivation for compilation units
//!
//! Generated code refers to each unit through a `use ... as alias;` binding.
//! The alias is the unit id with its separators flattened to underscores.
//! This is purely textual: ids that differ only in their separators map to
//! the same alias, and detecting that is left to whoever builds the alias
//! table.

/// Characters (besides `::`) replaced by `_` when deriving an alias
const SEPARATORS: [char; 4] = ['/', '\\', '.', '-'];

/// Derive the import alias for a unit id
///
/// # Examples
/// ```
/// use typereg_core::naming::unit_alias;
/// assert_eq!(unit_alias("github.com/example/pkg"), "github_com_example_pkg");
/// assert_eq!(unit_alias("widgets::shapes"), "widgets_shapes");
/// assert_eq!(unit_alias("my-plugin"), "my_plugin");
/// ```
pub fn unit_alias(id: &str) -> String {
    id.replace("::", "_").replace(SEPARATORS, "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_path_like_id() {
        assert_eq!(unit_alias("github.com/example/pkg"), "github_com_example_pkg");
        assert_eq!(unit_alias("example.com/mod"), "example_com_mod");
    }

    #[test]
    fn test_rust_module_path() {
        assert_eq!(unit_alias("widgets"), "widgets");
        assert_eq!(unit_alias("widgets::shapes::round"), "widgets_shapes_round");
    }

    #[test]
    fn test_distinct_ids_can_collide() {
        assert_eq!(unit_alias("a::b_c"), unit_alias("a_b::c"));
    }

    proptest! {
        #[test]
        fn prop_alias_has_no_separators(id in "[a-z_:./-]{0,40}") {
            let alias = unit_alias(&id);
            prop_assert!(!alias.contains("::"));
            prop_assert!(!alias.contains(SEPARATORS));
        }

        #[test]
        fn prop_alias_is_idempotent(id in "[a-zA-Z0-9_:./-]{0,40}") {
            let alias = unit_alias(&id);
            prop_assert_eq!(unit_alias(&alias), alias);
        }
    }
}
