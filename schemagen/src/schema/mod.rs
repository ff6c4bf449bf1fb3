//! Schema model: tables and columns as read from the database
//!
//! The model carries no generation logic. Rendering treats it as read-only
//! input; generated annotations are returned alongside, never written back.

mod column;
mod source;
mod table;

pub use column::Column;
pub use source::{ColumnDefinition, SchemaDocument, TableDefinition};
pub use table::{Table, TableSchema};
