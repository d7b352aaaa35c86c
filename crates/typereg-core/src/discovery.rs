//! Discovered types and the scan-then-resolve pass over loaded units

use tracing::{debug, info, instrument};

use crate::error::CoreError;
use crate::resolver::resolve_markers;
use crate::scanner::scan_markers;
use crate::unit::CompilationUnit;

/// A marker found in a unit's comments
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerRecord {
    /// Id of the unit the marker was found in
    pub unit: String,
    /// The name following the marker prefix
    pub type_name: String,
}

impl MarkerRecord {
    pub fn new(unit: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            unit: unit.into(),
            type_name: type_name.into(),
        }
    }
}

/// A marked name that resolved to a named-type declaration
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DiscoveredType {
    /// Id of the unit declaring the type
    pub owner: String,
    /// Name as written in the marker
    pub type_name: String,
    /// Declared identifier including generic parameters
    pub ident_form: String,
}

/// Scan and resolve every unit, returning the discovered types sorted by
/// owner and then type name.
///
/// Fails on the first marker that does not resolve; nothing is returned for
/// the units that did resolve.
#[instrument(skip(units), fields(units = units.len()), level = "debug")]
pub fn discover_types(
    units: &[CompilationUnit],
    marker_prefix: &str,
) -> Result<Vec<DiscoveredType>, CoreError> {
    let mut discovered = Vec::new();

    for unit in units {
        let markers = scan_markers(unit, marker_prefix);
        debug!(
            "{}: {} marker(s) over {} symbol(s)",
            unit.id,
            markers.len(),
            unit.symbols.len()
        );

        discovered.extend(resolve_markers(unit, &markers)?);
    }

    discovered.sort();
    info!("Discovered {} type(s)", discovered.len());
    Ok(discovered)
}
