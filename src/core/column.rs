use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::data_value::{OrderKey, Value};
use crate::core::error::{Error, Result};

/// Enum to identify column types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    Int64,
    Float64,
    Boolean,
    DateTime,
    Category,
    String,
}

impl ColumnType {
    /// The dtype name reported to the front-end (pandas spelling)
    pub fn dtype(&self) -> &'static str {
        match self {
            ColumnType::Int64 => "int64",
            ColumnType::Float64 => "float64",
            ColumnType::Boolean => "bool",
            ColumnType::DateTime => "datetime64[ns]",
            ColumnType::Category => "category",
            ColumnType::String => "object",
        }
    }

    /// Whether cells of this type have a meaningful numeric order.
    ///
    /// Only orderable columns contribute extremes to a preview sample;
    /// string and category columns are skipped.
    pub fn is_orderable(&self) -> bool {
        matches!(
            self,
            ColumnType::Int64 | ColumnType::Float64 | ColumnType::Boolean | ColumnType::DateTime
        )
    }

    /// Whether a cell value can be stored in a column of this type
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) => true,
            (ColumnType::Int64, Value::Int64(_)) => true,
            (ColumnType::Float64, Value::Float64(_)) => true,
            (ColumnType::Boolean, Value::Boolean(_)) => true,
            (ColumnType::DateTime, Value::DateTime(_)) => true,
            (ColumnType::Category, Value::String(_)) => true,
            (ColumnType::String, Value::String(_)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dtype())
    }
}

/// A named, typed column of nullable cells
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    column_type: ColumnType,
    values: Vec<Value>,
}

impl Column {
    /// Creates a column, checking every cell against the declared type
    pub fn new(name: impl Into<String>, column_type: ColumnType, values: Vec<Value>) -> Result<Self> {
        let name = name.into();
        if let Some(bad) = values.iter().find(|v| !column_type.accepts(v)) {
            return Err(Error::ColumnTypeMismatch {
                name,
                expected: column_type,
                found: bad.type_name(),
            });
        }

        Ok(Self {
            name,
            column_type,
            values,
        })
    }

    pub fn int64(name: impl Into<String>, values: Vec<i64>) -> Self {
        Self::from_values(name, ColumnType::Int64, values.into_iter().map(Value::Int64))
    }

    pub fn float64(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self::from_values(name, ColumnType::Float64, values.into_iter().map(Value::Float64))
    }

    pub fn boolean(name: impl Into<String>, values: Vec<bool>) -> Self {
        Self::from_values(name, ColumnType::Boolean, values.into_iter().map(Value::Boolean))
    }

    pub fn datetime(name: impl Into<String>, values: Vec<chrono::NaiveDateTime>) -> Self {
        Self::from_values(name, ColumnType::DateTime, values.into_iter().map(Value::DateTime))
    }

    pub fn string<S: Into<String>>(name: impl Into<String>, values: Vec<S>) -> Self {
        Self::from_values(
            name,
            ColumnType::String,
            values.into_iter().map(|s| Value::String(s.into())),
        )
    }

    pub fn category<S: Into<String>>(name: impl Into<String>, values: Vec<S>) -> Self {
        Self::from_values(
            name,
            ColumnType::Category,
            values.into_iter().map(|s| Value::String(s.into())),
        )
    }

    fn from_values(
        name: impl Into<String>,
        column_type: ColumnType,
        values: impl Iterator<Item = Value>,
    ) -> Self {
        Self {
            name: name.into(),
            column_type,
            values: values.collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn get(&self, row: usize) -> Option<&Value> {
        self.values.get(row)
    }

    /// Replaces a single cell, keeping the column type invariant
    pub fn set(&mut self, row: usize, value: Value) -> Result<()> {
        if !self.column_type.accepts(&value) {
            return Err(Error::ColumnTypeMismatch {
                name: self.name.clone(),
                expected: self.column_type,
                found: value.type_name(),
            });
        }
        let size = self.values.len();
        let slot = self
            .values
            .get_mut(row)
            .ok_or(Error::IndexOutOfBounds { index: row, size })?;
        *slot = value;
        Ok(())
    }

    /// Ranking key of a cell; `None` for nulls, NaN and unorderable types
    pub fn order_key(&self, row: usize) -> Option<OrderKey> {
        if !self.column_type.is_orderable() {
            return None;
        }
        self.values.get(row).and_then(Value::as_order_key)
    }

    /// New column holding the cells at `rows`, in the given order
    pub(crate) fn take(&self, rows: &[usize]) -> Result<Self> {
        let size = self.values.len();
        let values = rows
            .iter()
            .map(|&row| {
                self.values
                    .get(row)
                    .cloned()
                    .ok_or(Error::IndexOutOfBounds { index: row, size })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: self.name.clone(),
            column_type: self.column_type,
            values,
        })
    }
}
