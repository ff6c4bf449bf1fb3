//! Tables as generation units

use serde::{Deserialize, Serialize};

use super::column::Column;
use crate::types::JavaType;

/// Raw table metadata read from the database
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Physical table name
    pub table_name: String,
    /// Table comment
    #[serde(default)]
    pub table_comment: Option<String>,
    /// Catalog (database) name
    #[serde(default)]
    pub table_catalog: Option<String>,
    /// Schema name
    #[serde(default)]
    pub table_schema: Option<String>,
}

impl TableSchema {
    /// Schema entry with only a table name
    #[must_use]
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            ..Self::default()
        }
    }

    /// Attach a comment
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.table_comment = Some(comment.into());
        self
    }

    /// Attach a catalog name
    #[must_use]
    pub fn with_catalog(mut self, catalog: impl Into<String>) -> Self {
        self.table_catalog = Some(catalog.into());
        self
    }

    /// Attach a schema name
    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.table_schema = Some(schema.into());
        self
    }
}

/// A table selected for generation
///
/// `columns` is always a subset of `all_columns`; both keep database order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    #[serde(skip)]
    raw_table_schema: TableSchema,
    /// Whether the table is selected for generation
    pub selected: bool,
    /// Ordinal of the table in the source listing
    pub sequence: usize,
    /// Physical table name
    pub table_name: String,
    /// Table comment
    pub table_comment: Option<String>,
    /// Catalog (database) name
    pub table_catalog: Option<String>,
    /// Schema name
    pub table_schema: Option<String>,
    /// Entity class name
    pub entity_name: String,
    /// Repository interface name
    pub repository_name: String,
    /// Package override for this table's sources
    pub package_name: Option<String>,
    primary_key_type: Option<JavaType>,
    primary_key_count: usize,
    columns: Vec<Column>,
    all_columns: Vec<Column>,
    #[serde(skip)]
    service_name: Option<String>,
    #[serde(skip)]
    controller_name: Option<String>,
}

impl Table {
    /// Build a generation unit from raw schema metadata
    ///
    /// Copies name, comment, catalog and schema from `schema`. Columns are
    /// attached afterwards with [`Table::with_columns`].
    #[must_use]
    pub fn from(
        schema: TableSchema,
        entity_name: impl Into<String>,
        repository_name: impl Into<String>,
        selected: bool,
    ) -> Self {
        Self {
            selected,
            sequence: 0,
            table_name: schema.table_name.clone(),
            table_comment: schema.table_comment.clone(),
            table_catalog: schema.table_catalog.clone(),
            table_schema: schema.table_schema.clone(),
            raw_table_schema: schema,
            entity_name: entity_name.into(),
            repository_name: repository_name.into(),
            package_name: None,
            primary_key_type: None,
            primary_key_count: 0,
            columns: Vec::new(),
            all_columns: Vec::new(),
            service_name: None,
            controller_name: None,
        }
    }

    /// Attach columns
    ///
    /// Keeps every column in `all_columns`, the selected ones in `columns`,
    /// and recomputes the primary-key count and type from the selection.
    #[must_use]
    pub fn with_columns(mut self, all_columns: Vec<Column>) -> Self {
        self.columns = all_columns
            .iter()
            .filter(|column| column.selected)
            .cloned()
            .collect();
        self.all_columns = all_columns;
        self.primary_key_count = self.primary_columns().count();
        self.primary_key_type = self
            .primary_column()
            .map(|column| column.java_data_type.clone());
        self
    }

    /// Override the derived service name
    #[must_use]
    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }

    /// Override the derived controller name
    #[must_use]
    pub fn with_controller_name(mut self, name: impl Into<String>) -> Self {
        self.controller_name = Some(name.into());
        self
    }

    /// Metadata the table was built from
    #[must_use]
    pub const fn raw_table_schema(&self) -> &TableSchema {
        &self.raw_table_schema
    }

    /// Selected columns
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Every column, selected or not
    #[must_use]
    pub fn all_columns(&self) -> &[Column] {
        &self.all_columns
    }

    /// Number of primary-key columns
    #[must_use]
    pub const fn primary_key_count(&self) -> usize {
        self.primary_key_count
    }

    /// Java type of the (first) primary-key column
    #[must_use]
    pub const fn primary_key_type(&self) -> Option<&JavaType> {
        self.primary_key_type.as_ref()
    }

    /// Increment the primary-key counter
    ///
    /// No upper bound check; introspection code calling this is trusted.
    pub const fn inc_primary_key_count(&mut self) {
        self.primary_key_count += 1;
    }

    /// First selected column flagged primary
    ///
    /// Composite keys are not rejected: the first primary column in list
    /// order is returned. Use [`Table::primary_columns`] to see all of them.
    #[must_use]
    pub fn primary_column(&self) -> Option<&Column> {
        self.primary_columns().next()
    }

    /// Every selected primary column, in order
    pub fn primary_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|column| column.primary)
    }

    /// Table comment as written, if present and not blank
    #[must_use]
    pub fn documented_comment(&self) -> Option<&str> {
        self.table_comment
            .as_deref()
            .filter(|comment| !comment.trim().is_empty())
    }

    /// Whether more than one selected column is flagged primary
    #[must_use]
    pub fn has_composite_primary_key(&self) -> bool {
        self.primary_columns().nth(1).is_some()
    }

    /// Case-insensitive lookup by field name, first match wins
    #[must_use]
    pub fn find_column(&self, field_name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| {
            column
                .field_name
                .chars()
                .flat_map(char::to_lowercase)
                .eq(field_name.chars().flat_map(char::to_lowercase))
        })
    }

    /// Column whose field name is `version`, if any
    #[must_use]
    pub fn guess_version_column(&self) -> Option<&Column> {
        self.find_column("version")
    }

    /// Service name, `<Entity>Service` unless overridden
    #[must_use]
    pub fn service_name(&self) -> String {
        self.service_name
            .clone()
            .unwrap_or_else(|| format!("{}Service", self.entity_name))
    }

    /// Controller name, `<Entity>Controller` unless overridden
    #[must_use]
    pub fn controller_name(&self) -> String {
        self.controller_name
            .clone()
            .unwrap_or_else(|| format!("{}Controller", self.entity_name))
    }

    /// Join column names with `delimiter`, wrapping reserved words on both sides
    ///
    /// # Examples
    ///
    /// ```
    /// # use schemagen::schema::{Column, Table, TableSchema};
    /// # use schemagen::types::JavaType;
    /// let text = JavaType::class("java.lang.String");
    /// let columns = vec![
    ///     Column::new("id", "id", text.clone()),
    ///     Column::new("order", "order", text).reserved(),
    /// ];
    /// let table = Table::from(TableSchema::new("t"), "T", "TRepository", true);
    /// assert_eq!(table.column_name_joining(&columns, ", ", "`"), "id, `order`");
    /// ```
    #[must_use]
    pub fn column_name_joining(
        &self,
        columns: &[Column],
        delimiter: &str,
        reserved_word_wrapper: &str,
    ) -> String {
        columns
            .iter()
            .map(|column| column.quoted_name(reserved_word_wrapper))
            .collect::<Vec<_>>()
            .join(delimiter)
    }

    /// [`Table::column_name_joining`] with an empty wrapper
    #[must_use]
    pub fn column_name_joining_plain(&self, columns: &[Column], delimiter: &str) -> String {
        self.column_name_joining(columns, delimiter, "")
    }
}
