//! Cell highlight map for styled report writers.

use std::collections::BTreeMap;

use svy_model::{HighlightCategory, HighlightMarker};

/// Collapse highlight markers into a per-cell category map.
///
/// Markers arrive in evaluation order; when several checks mark the same
/// cell the last writer wins, matching rule-table ordering semantics.
pub fn highlight_map(
    highlights: &[HighlightMarker],
) -> BTreeMap<(usize, String), HighlightCategory> {
    let mut map = BTreeMap::new();
    for marker in highlights {
        map.insert((marker.row, marker.column.clone()), marker.category);
    }
    map
}
