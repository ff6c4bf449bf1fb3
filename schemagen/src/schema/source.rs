//! Schema documents: table metadata exported by an introspection tool
//!
//! A document lists tables and their columns in JSON or TOML:
//!
//! ```toml
//! [[tables]]
//! name = "users"
//! schema = "public"
//! comment = "Registered users"
//!
//! [[tables.columns]]
//! name = "id"
//! sql_type = "bigint"
//! nullable = false
//! primary = true
//! auto_increment = true
//!
//! [[tables.columns]]
//! name = "email"
//! sql_type = "varchar(255)"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Column, Table, TableSchema};
use crate::config::TablesConfig;
use crate::error::{Error, Result};
use crate::naming::Naming;
use crate::types::{JavaType, TypeMapper};

const fn default_true() -> bool {
    true
}

/// Column entry of a schema document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    /// Physical column name
    pub name: String,
    /// Field name override, derived from `name` when absent
    #[serde(default)]
    pub field_name: Option<String>,
    /// Native SQL type, mapped with [`TypeMapper::from_sql_type`]
    #[serde(default)]
    pub sql_type: Option<String>,
    /// Explicit Java type, wins over `sql_type`
    #[serde(default)]
    pub java_type: Option<JavaType>,
    /// Whether the column accepts NULL
    #[serde(default = "default_true")]
    pub nullable: bool,
    /// Part of the primary key
    #[serde(default)]
    pub primary: bool,
    /// Populated by an auto-increment counter
    #[serde(default)]
    pub auto_increment: bool,
    /// Populated from a database sequence
    #[serde(default)]
    pub sequence: bool,
    /// Reserved-word flag, detected from the name when absent
    #[serde(default)]
    pub reserved: Option<bool>,
    /// Included in generation
    #[serde(default = "default_true")]
    pub selected: bool,
    /// Column comment
    #[serde(default)]
    pub comment: Option<String>,
}

/// Table entry of a schema document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDefinition {
    /// Physical table name
    pub name: String,
    /// Table comment
    #[serde(default)]
    pub comment: Option<String>,
    /// Catalog (database) name
    #[serde(default)]
    pub catalog: Option<String>,
    /// Schema name
    #[serde(default)]
    pub schema: Option<String>,
    /// Entity name override
    #[serde(default)]
    pub entity_name: Option<String>,
    /// Repository name override
    #[serde(default)]
    pub repository_name: Option<String>,
    /// Service name override
    #[serde(default)]
    pub service_name: Option<String>,
    /// Controller name override
    #[serde(default)]
    pub controller_name: Option<String>,
    /// Included in generation
    #[serde(default = "default_true")]
    pub selected: bool,
    /// Columns in database order
    #[serde(default)]
    pub columns: Vec<ColumnDefinition>,
}

/// A whole schema export
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// Tables in listing order
    #[serde(default)]
    pub tables: Vec<TableDefinition>,
}

impl SchemaDocument {
    /// Load a document, choosing the format by file extension
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The extension is not `json` or `toml`
    /// - The content does not match the document shape
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => Self::from_json_str(&text),
            Some("toml") => Self::from_toml_str(&text),
            _ => Err(Error::Schema(format!(
                "Unsupported schema file: {}. Expected a .json or .toml file",
                path.display()
            ))),
        }
    }

    /// Parse a JSON document
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid document.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parse a TOML document
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Convert every table into a generation unit
    ///
    /// Entity, repository and field names are derived with [`Naming`] unless
    /// the document overrides them.
    ///
    /// # Errors
    ///
    /// Returns an error if a column has neither `sql_type` nor `java_type`.
    pub fn into_tables(self, tables_config: &TablesConfig) -> Result<Vec<Table>> {
        self.tables
            .into_iter()
            .enumerate()
            .map(|(sequence, definition)| definition.into_table(sequence, tables_config))
            .collect()
    }
}

impl TableDefinition {
    fn into_table(self, sequence: usize, tables_config: &TablesConfig) -> Result<Table> {
        let entity_name = self
            .entity_name
            .unwrap_or_else(|| Naming::entity_name(&self.name, &tables_config.remove_table_prefix));
        let repository_name = self
            .repository_name
            .unwrap_or_else(|| Naming::repository_name(&entity_name));

        let columns = self
            .columns
            .into_iter()
            .map(|column| column.into_column(&self.name, tables_config))
            .collect::<Result<Vec<_>>>()?;

        let schema = TableSchema {
            table_name: self.name,
            table_comment: self.comment,
            table_catalog: self.catalog,
            table_schema: self.schema,
        };

        let mut table =
            Table::from(schema, entity_name, repository_name, self.selected).with_columns(columns);
        table.sequence = sequence;
        if let Some(name) = self.service_name {
            table = table.with_service_name(name);
        }
        if let Some(name) = self.controller_name {
            table = table.with_controller_name(name);
        }
        Ok(table)
    }
}

impl ColumnDefinition {
    fn into_column(self, table_name: &str, tables_config: &TablesConfig) -> Result<Column> {
        let java_type = match (self.java_type, self.sql_type.as_deref()) {
            (Some(java_type), _) => java_type,
            (None, Some(sql_type)) => TypeMapper::from_sql_type(sql_type),
            (None, None) => {
                return Err(Error::Schema(format!(
                    "Column '{table_name}.{}' needs a sql_type or a java_type",
                    self.name
                )));
            }
        };

        let field_name = self
            .field_name
            .unwrap_or_else(|| Naming::field_name(&self.name, &tables_config.remove_field_prefix));
        let reserved_word = self
            .reserved
            .unwrap_or_else(|| Naming::is_reserved_word(&self.name));

        Ok(Column {
            field_name,
            column_name: self.name,
            java_data_type: java_type,
            sql_type: self.sql_type,
            comment: self.comment,
            nullable: self.nullable,
            primary: self.primary,
            auto_increment: self.auto_increment,
            sequence: self.sequence,
            reserved_word,
            selected: self.selected,
        })
    }
}
