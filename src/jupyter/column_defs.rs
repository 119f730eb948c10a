//! Per-column type metadata for the DataTables constructor

use serde_json::{json, Value as JsonValue};

use crate::core::table::Table;

/// Leading columns occupied by the row index in the rendered table
pub const INDEX_COLUMNS: usize = 1;

/// Column definitions for `table`.
///
/// Starts from the `columnDefs` already present in `options`. Every table
/// column gets a definition targeting its rendered position with its dtype
/// as `type`; an existing definition with the same numeric target is
/// updated in place, otherwise a new one is appended.
pub fn column_defs(table: &Table, options: &JsonValue) -> Vec<JsonValue> {
    let mut defs: Vec<JsonValue> = options
        .get("columnDefs")
        .and_then(JsonValue::as_array)
        .cloned()
        .unwrap_or_default();

    for (i, column) in table.columns().iter().enumerate() {
        let target = (i + INDEX_COLUMNS) as u64;
        let dtype = column.column_type().dtype();

        let existing = defs.iter_mut().find(|def| {
            def.get("targets").and_then(JsonValue::as_u64) == Some(target)
        });

        match existing.and_then(JsonValue::as_object_mut) {
            Some(def) => {
                def.insert("type".to_string(), json!(dtype));
                def.insert("targets".to_string(), json!(target));
            }
            None => defs.push(json!({ "type": dtype, "targets": target })),
        }
    }

    defs
}
