//! Binding context shared by every template

use serde::Serialize;

use crate::annotation::{class_annotations, column_annotations, render_all};
use crate::config::{GeneratorConfig, TablesConfig};
use crate::imports::ImportSet;
use crate::schema::{Column, Table};
use crate::template::TemplateId;
use crate::types::{JavaType, TypeMapper};

/// Key type used when a table has no primary column
const UNKNOWN_KEY_TYPE: &str = "Object";

/// Javadoc body lines for `comment`, each prefixed with `indent` and ` * `
///
/// `*/` is written as `*&#47;` so the comment cannot close the block early.
fn javadoc(comment: &str, indent: &str) -> String {
    comment
        .replace("*/", "*&#47;")
        .lines()
        .map(str::trim_end)
        .map(|line| {
            if line.is_empty() {
                format!("{indent} *")
            } else {
                format!("{indent} * {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `table` key: the table plus its derived class names
#[derive(Debug, Clone, Serialize)]
pub struct TableBinding<'a> {
    #[serde(flatten)]
    table: &'a Table,
    /// Service class name
    pub service_name: String,
    /// Controller class name
    pub controller_name: String,
}

impl<'a> TableBinding<'a> {
    fn new(table: &'a Table) -> Self {
        Self {
            table,
            service_name: table.service_name(),
            controller_name: table.controller_name(),
        }
    }

    /// The bound table
    #[must_use]
    pub const fn table(&self) -> &'a Table {
        self.table
    }
}

/// One selected column as seen by templates
#[derive(Debug, Clone, Serialize)]
pub struct ColumnBinding<'a> {
    #[serde(flatten)]
    column: &'a Column,
    /// Type as written in the field declaration
    pub java_type: String,
    /// Javadoc body lines of a non-blank comment, already indented
    pub javadoc: Option<String>,
    /// Rendered annotations, shortest first
    pub annotations: Vec<String>,
}

impl<'a> ColumnBinding<'a> {
    fn new(column: &'a Column, tables_config: &TablesConfig, imports: &mut ImportSet) -> Self {
        imports.insert_type(&column.java_data_type);
        let annotations = column_annotations(column, tables_config, imports);

        Self {
            column,
            java_type: column.java_data_type.simple_name(),
            javadoc: column
                .documented_comment()
                .map(|comment| javadoc(comment, tables_config.indent.unit())),
            annotations: render_all(&annotations),
        }
    }

    /// The bound column
    #[must_use]
    pub const fn column(&self) -> &'a Column {
        self.column
    }
}

/// Everything a template can reference
///
/// Built fresh for every render from read-only inputs; see the module table
/// in [`crate::render`] for the key list.
#[derive(Debug, Clone, Serialize)]
pub struct EntityContext<'a> {
    /// Whole generator configuration
    pub config: &'a GeneratorConfig,
    /// Table-level options
    pub tables_config: &'a TablesConfig,
    /// The table being rendered
    pub table: TableBinding<'a>,
    /// Always `""`
    pub empty: &'static str,
    /// One indentation level
    pub indent: &'static str,
    /// Javadoc body lines of a non-blank table comment
    pub table_javadoc: Option<String>,
    /// Entity package
    pub package: &'a str,
    /// Sorted imports of the entity source
    pub imports: ImportSet,
    /// Entity class name
    pub simple_name: &'a str,
    /// Superclass simple name, `""` when none
    pub parent_class: String,
    /// Implemented interface simple names, sorted
    pub implements: Vec<String>,
    /// Class annotations, shortest first
    pub annotations: Vec<String>,
    /// Selected columns in table order
    pub columns: Vec<ColumnBinding<'a>>,
    /// Present when the entity is serializable
    pub serial_version_uid: Option<&'static str>,
    /// Lombok generates accessors
    pub use_lombok: bool,
    /// Swagger annotations are emitted
    pub use_swagger_ui_comment: bool,
    /// First primary column
    pub primary_key: Option<ColumnBinding<'a>>,
    /// Boxed simple name of the key type, usable as a generic argument
    pub primary_key_type: String,
    /// Import needed for the key type in non-entity sources
    pub primary_key_import: Option<String>,
    /// More than one primary column
    pub composite_primary_key: bool,
    /// Repository package
    pub repository_package: &'a str,
    /// Service package
    pub service_package: &'a str,
    /// Controller package
    pub controller_package: &'a str,
}

impl<'a> EntityContext<'a> {
    /// Assemble the context for `table`
    ///
    /// Neither `config` nor `table` is modified, so building twice gives
    /// equal contexts.
    #[must_use]
    pub fn build(config: &'a GeneratorConfig, table: &'a Table) -> Self {
        let tables_config = &config.tables_config;
        let mut imports = ImportSet::new();

        let class = class_annotations(table, tables_config, &mut imports);
        let columns: Vec<_> = table
            .columns()
            .iter()
            .map(|column| ColumnBinding::new(column, tables_config, &mut imports))
            .collect();
        let primary_key = columns
            .iter()
            .find(|binding| binding.column.primary)
            .cloned();

        let key_type = table.primary_key_type().map(JavaType::boxed);
        let primary_key_type = key_type
            .as_ref()
            .map_or_else(|| UNKNOWN_KEY_TYPE.to_string(), JavaType::simple_name);
        let primary_key_import = key_type
            .as_ref()
            .and_then(TypeMapper::import_for)
            .map(str::to_string);

        Self {
            config,
            tables_config,
            table: TableBinding::new(table),
            empty: "",
            indent: tables_config.indent.unit(),
            table_javadoc: table
                .documented_comment()
                .map(|comment| javadoc(comment, "")),
            package: table
                .package_name
                .as_deref()
                .unwrap_or_else(|| tables_config.package_name(TemplateId::Entity)),
            imports,
            simple_name: &table.entity_name,
            parent_class: class.parent_class.unwrap_or_default(),
            implements: class.implements.into_iter().collect(),
            annotations: render_all(&class.annotations),
            columns,
            serial_version_uid: class.serial_version_uid,
            use_lombok: tables_config.use_lombok,
            use_swagger_ui_comment: tables_config.use_swagger_ui_comment,
            primary_key,
            primary_key_type,
            primary_key_import,
            composite_primary_key: table.has_composite_primary_key(),
            repository_package: tables_config.package_name(TemplateId::Repository),
            service_package: tables_config.package_name(TemplateId::Service),
            controller_package: tables_config.package_name(TemplateId::Controller),
        }
    }

    /// Package of the source generated for `artifact`
    #[must_use]
    pub const fn package_for(&self, artifact: TemplateId) -> &'a str {
        match artifact {
            TemplateId::Entity => self.package,
            TemplateId::Repository => self.repository_package,
            TemplateId::Service => self.service_package,
            TemplateId::Controller => self.controller_package,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::TableSchema;

    fn orders() -> Table {
        Table::from(TableSchema::new("orders"), "Order", "OrderRepository", true).with_columns(vec![
            Column::new("id", "id", JavaType::parse("long").unwrap())
                .primary_key()
                .auto_incremented(),
            Column::new("placedAt", "placed_at", JavaType::class("java.time.Instant"))
                .with_comment("When the order was placed"),
            Column::new("total", "total", JavaType::class("java.math.BigDecimal")).unselected(),
        ])
    }

    #[test]
    fn test_context_keys() {
        let config = GeneratorConfig::default();
        let table = orders();
        let context = EntityContext::build(&config, &table);

        assert_eq!(context.package, "com.example.entity");
        assert_eq!(context.simple_name, "Order");
        assert_eq!(context.indent, "    ");
        assert_eq!(context.parent_class, "");
        assert_eq!(context.columns.len(), 2);
        assert_eq!(context.primary_key_type, "Long");
        assert!(context.primary_key_import.is_none());
        assert!(!context.composite_primary_key);
        assert_eq!(context.primary_key.as_ref().unwrap().column().field_name, "id");
        assert_eq!(context.table.service_name, "OrderService");
        assert_eq!(
            context.columns[1].javadoc.as_deref(),
            Some("     * When the order was placed")
        );
        assert!(context.table_javadoc.is_none());
    }

    #[test]
    fn test_imports_cover_selected_columns_only() {
        let config = GeneratorConfig::default();
        let table = orders();
        let context = EntityContext::build(&config, &table);

        assert!(context.imports.contains("java.time.Instant"));
        assert!(!context.imports.contains("java.math.BigDecimal"));
        assert!(context.imports.contains("lombok.Data"));
        assert!(context.imports.contains("javax.persistence.GenerationType"));
    }

    #[test]
    fn test_table_package_override() {
        let config = GeneratorConfig::default();
        let mut table = orders();
        table.package_name = Some("com.acme.billing".to_string());
        let context = EntityContext::build(&config, &table);
        assert_eq!(context.package_for(TemplateId::Entity), "com.acme.billing");
        assert_eq!(
            context.package_for(TemplateId::Repository),
            "com.example.repository"
        );
    }

    #[test]
    fn test_missing_primary_key() {
        let config = GeneratorConfig::default();
        let table = Table::from(TableSchema::new("log"), "Log", "LogRepository", true)
            .with_columns(vec![Column::new("line", "line", JavaType::class("java.lang.String"))]);
        let context = EntityContext::build(&config, &table);
        assert!(context.primary_key.is_none());
        assert_eq!(context.primary_key_type, "Object");
    }

    #[test]
    fn test_serialized_shape() {
        let config = GeneratorConfig::default();
        let table = orders();
        let value = serde_json::to_value(EntityContext::build(&config, &table)).unwrap();

        assert_eq!(value["table"]["table_name"], "orders");
        assert_eq!(value["table"]["controller_name"], "OrderController");
        assert_eq!(value["columns"][0]["field_name"], "id");
        assert_eq!(value["columns"][0]["java_type"], "long");
        assert_eq!(value["empty"], "");
        assert!(value["imports"].is_array());
        assert!(value["serial_version_uid"].is_null());
    }

    #[test]
    fn test_javadoc_cannot_close_early() {
        assert_eq!(javadoc("ends */ here", ""), " * ends *&#47; here");
        assert_eq!(javadoc("a*/b*/", "  "), "   * a*&#47;b*&#47;");
    }

    #[test]
    fn test_javadoc_prefixes_every_line() {
        assert_eq!(
            javadoc("price in cents\r\n\nsecond line  ", "    "),
            "     * price in cents\n     *\n     * second line"
        );
    }

    #[test]
    fn test_blank_comments_have_no_javadoc() {
        let config = GeneratorConfig::default();
        let table = Table::from(
            TableSchema::new("orders").with_comment("   "),
            "Order",
            "OrderRepository",
            true,
        )
        .with_columns(vec![
            Column::new("id", "id", JavaType::class("java.lang.Long"))
                .primary_key()
                .with_comment("\t \n"),
        ]);
        let context = EntityContext::build(&config, &table);

        assert!(context.table_javadoc.is_none());
        assert!(context.columns[0].javadoc.is_none());
    }

    #[test]
    fn test_table_javadoc() {
        let config = GeneratorConfig::default();
        let table = Table::from(
            TableSchema::new("orders").with_comment("Customer orders\nsee */ billing"),
            "Order",
            "OrderRepository",
            true,
        );
        let context = EntityContext::build(&config, &table);
        assert_eq!(
            context.table_javadoc.as_deref(),
            Some(" * Customer orders\n * see *&#47; billing")
        );
    }
}
