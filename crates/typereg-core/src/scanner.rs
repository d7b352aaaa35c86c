//! Marker extraction from comment text
//!
//! A marker is a line comment whose text starts with the marker prefix and
//! continues, without a separator, with the bare name of a type declared at
//! the top level of the same unit:
//!
//! ```text
//! //+discovery:Widget
//! pub struct Widget { .. }
//! ```
//!
//! The marker does not have to sit next to the declaration it names.

use std::collections::BTreeSet;

use tracing::trace;

use crate::discovery::MarkerRecord;
use crate::unit::CompilationUnit;

pub const DEFAULT_MARKER_PREFIX: &str = "//+discovery:";

/// Collect the set of markers found anywhere in the unit's comments.
///
/// Repeated markers for the same name collapse into one record.
pub fn scan_markers(unit: &CompilationUnit, prefix: &str) -> BTreeSet<MarkerRecord> {
    let mut markers = BTreeSet::new();

    for comment in unit.comments() {
        if let Some(rest) = comment.text.strip_prefix(prefix) {
            let type_name = rest.trim_end();
            trace!(unit = %unit.id, line = comment.line, "marker for {:?}", type_name);
            markers.insert(MarkerRecord::new(&unit.id, type_name));
        }
    }

    markers
}
