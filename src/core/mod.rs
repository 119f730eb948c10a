// Core data structures and traits
pub mod column;
pub mod data_value;
pub mod error;
pub mod table;

// Re-exports for convenience
pub use column::{Column, ColumnType};
pub use data_value::{OrderKey, Value};
pub use error::{Error, Result};
pub use table::{Table, TableSource};
