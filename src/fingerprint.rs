//! Content fingerprints for realized samples
//!
//! A fingerprint is the SHA-256 digest of the table's canonical JSON, used
//! as a cache and element key by the rendering layer. It is not a security
//! primitive.

use serde::ser::{Serialize, SerializeSeq, Serializer};
use sha2::{Digest, Sha256};

use crate::core::error::Result;
use crate::core::table::Table;

/// Canonical "split" layout: column names, row labels, row-major data
#[derive(serde::Serialize)]
struct SplitView<'a> {
    columns: Vec<&'a str>,
    index: &'a [usize],
    data: Rows<'a>,
}

struct Rows<'a>(&'a Table);

struct Row<'a> {
    table: &'a Table,
    row: usize,
}

impl Serialize for Rows<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.row_count()))?;
        for row in 0..self.0.row_count() {
            seq.serialize_element(&Row {
                table: self.0,
                row,
            })?;
        }
        seq.end()
    }
}

impl Serialize for Row<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let columns = self.table.columns();
        let mut seq = serializer.serialize_seq(Some(columns.len()))?;
        for column in columns {
            seq.serialize_element(&column.values()[self.row])?;
        }
        seq.end()
    }
}

/// Canonical, order-preserving JSON text of a table:
/// `{"columns":[...],"index":[...],"data":[[...],...]}`
pub fn canonical_json(table: &Table) -> Result<String> {
    let view = SplitView {
        columns: table.column_names(),
        index: table.row_labels(),
        data: Rows(table),
    };
    Ok(serde_json::to_string(&view)?)
}

/// Lowercase hex SHA-256 of the table's canonical JSON
pub fn fingerprint(table: &Table) -> Result<String> {
    let json = canonical_json(table)?;
    let digest = Sha256::digest(json.as_bytes());
    Ok(format!("{:x}", digest))
}

/// Fingerprint of the rows at `rows`, in the given order
pub fn fingerprint_rows(table: &Table, rows: &[usize]) -> Result<String> {
    fingerprint(&table.take_rows(rows)?)
}
