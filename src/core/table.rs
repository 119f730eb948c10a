//! Tabular data consumed by the preview sampler
//!
//! A [`Table`] is an ordered set of equally long, typed columns. Every row
//! keeps the label it had in the source table, so a realized sample can
//! still be ordered and identified by original position.

use std::collections::HashSet;

use crate::core::column::{Column, ColumnType};
use crate::core::data_value::{OrderKey, Value};
use crate::core::error::{Error, Result};

/// Read-only view the sampler needs from a table
pub trait TableSource {
    /// Number of rows
    fn row_count(&self) -> usize;

    /// Number of columns
    fn column_count(&self) -> usize;

    /// Declared type of the column at `col`
    fn column_type(&self, col: usize) -> ColumnType;

    /// Ranking key of a cell, `None` when the cell cannot be ranked
    fn order_key(&self, col: usize, row: usize) -> Option<OrderKey>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    row_labels: Vec<usize>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from columns, labelling rows `0..n`
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let mut table = Self::new();
        for column in columns {
            table.add_column(column)?;
        }
        Ok(table)
    }

    /// Appends a column. The first column fixes the row count.
    pub fn add_column(&mut self, column: Column) -> Result<()> {
        if self.columns.iter().any(|c| c.name() == column.name()) {
            return Err(Error::DuplicateColumnName(column.name().to_string()));
        }

        if self.columns.is_empty() {
            self.row_labels = (0..column.len()).collect();
        } else if column.len() != self.row_labels.len() {
            return Err(Error::InconsistentRowCount {
                expected: self.row_labels.len(),
                found: column.len(),
            });
        }

        self.columns.push(column);
        Ok(())
    }

    pub fn row_count(&self) -> usize {
        self.row_labels.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.name() == name)
    }

    fn column_position(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c.name() == name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
    }

    /// Original row labels, in current row order
    pub fn row_labels(&self) -> &[usize] {
        &self.row_labels
    }

    /// Cells of one row, in column order
    pub fn row(&self, row: usize) -> Option<Vec<&Value>> {
        if row >= self.row_count() {
            return None;
        }
        self.columns.iter().map(|c| c.get(row)).collect()
    }

    /// New table holding the rows at `rows`, in the given order.
    ///
    /// Row labels travel with their rows.
    pub fn take_rows(&self, rows: &[usize]) -> Result<Self> {
        let size = self.row_count();
        let row_labels = rows
            .iter()
            .map(|&row| {
                self.row_labels
                    .get(row)
                    .copied()
                    .ok_or(Error::IndexOutOfBounds { index: row, size })
            })
            .collect::<Result<Vec<_>>>()?;

        let columns = self
            .columns
            .iter()
            .map(|c| c.take(rows))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            columns,
            row_labels,
        })
    }

    /// Rows reordered by ascending original label
    pub fn sort_by_index(&self) -> Result<Self> {
        let mut order: Vec<usize> = (0..self.row_count()).collect();
        order.sort_by_key(|&row| self.row_labels[row]);
        self.take_rows(&order)
    }

    /// Rows stably reordered by the given columns, ascending, nulls last
    pub fn sort_by_columns<S: AsRef<str>>(&self, by: &[S]) -> Result<Self> {
        let keys = by
            .iter()
            .map(|name| self.column_position(name.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let mut seen = HashSet::new();
        if let Some(dup) = by
            .iter()
            .find(|name| !seen.insert(AsRef::<str>::as_ref(*name)))
        {
            return Err(Error::InvalidValue(format!(
                "sort column listed twice: {}",
                AsRef::<str>::as_ref(dup)
            )));
        }

        let mut order: Vec<usize> = (0..self.row_count()).collect();
        order.sort_by(|&a, &b| {
            keys.iter()
                .map(|&col| {
                    let column = &self.columns[col];
                    column.values()[a].compare(&column.values()[b])
                })
                .find(|ordering| ordering.is_ne())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        self.take_rows(&order)
    }
}

impl TableSource for Table {
    fn row_count(&self) -> usize {
        Table::row_count(self)
    }

    fn column_count(&self) -> usize {
        Table::column_count(self)
    }

    fn column_type(&self, col: usize) -> ColumnType {
        self.columns[col].column_type()
    }

    fn order_key(&self, col: usize, row: usize) -> Option<OrderKey> {
        self.columns.get(col).and_then(|c| c.order_key(row))
    }
}
