//! Column and class annotation assembly
//!
//! Pure functions: they read the schema model and configuration, record the
//! imports they need, and return fresh annotation lists. Nothing is written
//! back into the `Table` or its columns, so assembling twice yields the same
//! result.

use std::collections::BTreeSet;

use super::{dedup_rendered, sort_by_length, Annotation};
use crate::config::TablesConfig;
use crate::imports::ImportSet;
use crate::schema::{Column, Table};

/// Placeholder for the sequence generator name, left for manual follow-up
pub const GENERATOR_NAME_PLACEHOLDER: &str = "TODO: set the generator name";

/// Placeholder for the database sequence name, left for manual follow-up
pub const SEQUENCE_NAME_PLACEHOLDER: &str = "TODO: set the sequence name";

/// `serialVersionUID` emitted for serializable entities
pub const SERIAL_VERSION_UID: &str = "1";

const SERIALIZABLE: &str = "java.io.Serializable";
const LOMBOK_DATA: &str = "lombok.Data";
const LOMBOK_ACCESSORS: &str = "lombok.experimental.Accessors";
const LOMBOK_EQUALS_AND_HASH_CODE: &str = "lombok.EqualsAndHashCode";
const SWAGGER_API_MODEL: &str = "io.swagger.annotations.ApiModel";
const SWAGGER_API_MODEL_PROPERTY: &str = "io.swagger.annotations.ApiModelProperty";

/// Class-level output of the assembly
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassAnnotations {
    /// Deduplicated, length-sorted class annotations
    pub annotations: Vec<Annotation>,
    /// Simple names of implemented interfaces, sorted
    pub implements: BTreeSet<String>,
    /// Simple name of the superclass, if configured
    pub parent_class: Option<String>,
    /// `serialVersionUID` value when the entity is serializable
    pub serial_version_uid: Option<&'static str>,
}

/// Annotations for one column, sorted by rendered length
///
/// In assembly order:
/// 1. `@Id` for primary-key columns
/// 2. `@GeneratedValue` for auto-increment (`IDENTITY`) or sequence
///    (`SEQUENCE`, plus `@SequenceGenerator` with placeholder names) columns
/// 3. `@Column(name = ...)`, with `nullable = false` only for NOT NULL columns
/// 4. `@ApiModelProperty` when Swagger comments are enabled and the column
///    has a non-blank comment
pub fn column_annotations(
    column: &Column,
    tables_config: &TablesConfig,
    imports: &mut ImportSet,
) -> Vec<Annotation> {
    let namespace = tables_config.persistence_namespace;
    let mut annotations = Vec::new();

    if column.primary {
        annotations.push(Annotation::new(namespace.qualify("Id")));
    }

    if column.auto_increment || column.sequence {
        imports.insert(namespace.qualify("GenerationType"));
        let generated = Annotation::new(namespace.qualify("GeneratedValue"));

        if column.sequence {
            annotations.push(
                Annotation::new(namespace.qualify("SequenceGenerator"))
                    .with_str("name", GENERATOR_NAME_PLACEHOLDER)
                    .with_str("sequenceName", SEQUENCE_NAME_PLACEHOLDER),
            );
            annotations.push(
                generated
                    .with_literal("strategy", "GenerationType.SEQUENCE")
                    .with_str("generator", GENERATOR_NAME_PLACEHOLDER),
            );
        } else {
            annotations.push(generated.with_literal("strategy", "GenerationType.IDENTITY"));
        }
    }

    let mut mapping =
        Annotation::new(namespace.qualify("Column")).with_str("name", column.column_name.as_str());
    if !column.nullable {
        mapping = mapping.with_bool("nullable", false);
    }
    annotations.push(mapping);

    if tables_config.use_swagger_ui_comment {
        if let Some(comment) = column.documented_comment() {
            annotations.push(Annotation::new(SWAGGER_API_MODEL_PROPERTY).with_str("value", comment));
        }
    }

    finish(annotations, imports)
}

/// Class annotations, implemented interfaces and superclass for a table
///
/// The annotation set is deduplicated by rendered text and sorted by length,
/// ties broken by the text itself.
pub fn class_annotations(
    table: &Table,
    tables_config: &TablesConfig,
    imports: &mut ImportSet,
) -> ClassAnnotations {
    let namespace = tables_config.persistence_namespace;
    let mut class = ClassAnnotations::default();
    let mut annotations = Vec::new();

    if tables_config.serializable {
        imports.insert(SERIALIZABLE);
        class.implements.insert(simple_name(SERIALIZABLE).to_string());
        class.serial_version_uid = Some(SERIAL_VERSION_UID);
    }

    for interface in &tables_config.implement_interfaces {
        let interface = interface.trim();
        if interface.is_empty() {
            continue;
        }
        imports.insert(interface);
        class.implements.insert(simple_name(interface).to_string());
    }

    if let Some(superclass) = tables_config.superclass() {
        imports.insert(superclass);
        class.parent_class = Some(simple_name(superclass).to_string());
    }

    if tables_config.use_lombok {
        annotations.push(Annotation::new(LOMBOK_DATA));

        if tables_config.use_fluid_programming_style {
            annotations.push(Annotation::new(LOMBOK_ACCESSORS).with_bool("chain", true));
        }

        if class.parent_class.is_some() {
            annotations.push(Annotation::new(LOMBOK_EQUALS_AND_HASH_CODE).with_bool("callSuper", true));
        }
    }

    if tables_config.use_swagger_ui_comment {
        if let Some(comment) = table.documented_comment() {
            annotations.push(Annotation::new(SWAGGER_API_MODEL).with_str("value", comment));
        }
    }

    annotations.push(Annotation::new(namespace.qualify("Entity")));
    annotations.push(
        Annotation::new(namespace.qualify("Table"))
            .with_str("name", physical_table_name(table, tables_config)),
    );

    // Set semantics: order of assembly must not leak into the output.
    annotations.sort_by_cached_key(ToString::to_string);
    class.annotations = finish(annotations, imports);
    class
}

/// Table name for `@Table(name = ...)`
///
/// With schema qualification enabled: `schema.table`, else `catalog.table`
/// when the schema is blank, else the bare table name.
#[must_use]
pub fn physical_table_name(table: &Table, tables_config: &TablesConfig) -> String {
    if tables_config.add_schema_name_to_table_name {
        let qualifier = non_blank(table.table_schema.as_deref())
            .or_else(|| non_blank(table.table_catalog.as_deref()));
        if let Some(qualifier) = qualifier {
            return format!("{qualifier}.{}", table.table_name);
        }
    }
    table.table_name.clone()
}

/// Record annotation imports, drop duplicates, sort by length
fn finish(annotations: Vec<Annotation>, imports: &mut ImportSet) -> Vec<Annotation> {
    let mut annotations = dedup_rendered(annotations);
    for annotation in &annotations {
        imports.insert(annotation.name());
    }
    sort_by_length(&mut annotations);
    annotations
}

fn simple_name(qualified_name: &str) -> &str {
    qualified_name
        .rsplit_once('.')
        .map_or(qualified_name, |(_, simple)| simple)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::render_all;
    use crate::config::PersistenceNamespace;
    use crate::schema::TableSchema;
    use crate::types::JavaType;
    use proptest::prelude::*;

    fn long_type() -> JavaType {
        JavaType::class("java.lang.Long")
    }

    fn plain_config() -> TablesConfig {
        TablesConfig {
            use_lombok: false,
            ..TablesConfig::default()
        }
    }

    fn orders(schema: Option<&str>, catalog: Option<&str>) -> Table {
        let mut raw = TableSchema::new("orders");
        raw.table_schema = schema.map(str::to_string);
        raw.table_catalog = catalog.map(str::to_string);
        Table::from(raw, "Order", "OrderRepository", true)
    }

    #[test]
    fn test_auto_increment_primary_key() {
        let mut imports = ImportSet::new();
        let column = Column::new("id", "id", long_type())
            .primary_key()
            .auto_incremented()
            .not_null();

        let annotations = render_all(&column_annotations(&column, &plain_config(), &mut imports));
        assert_eq!(
            annotations,
            vec![
                "@Id",
                "@Column(name = \"id\", nullable = false)",
                "@GeneratedValue(strategy = GenerationType.IDENTITY)",
            ]
        );
        for name in ["Id", "Column", "GeneratedValue", "GenerationType"] {
            assert!(imports.contains(&format!("javax.persistence.{name}")), "{name}");
        }
        assert!(!imports.contains("javax.persistence.SequenceGenerator"));
    }

    #[test]
    fn test_sequence_column_gets_placeholders() {
        let mut imports = ImportSet::new();
        let column = Column::new("id", "id", long_type())
            .primary_key()
            .sequence_backed()
            .auto_incremented();

        let annotations = column_annotations(&column, &plain_config(), &mut imports);
        let generated = annotations
            .iter()
            .find(|a| a.simple_name() == "GeneratedValue")
            .unwrap();
        assert_eq!(
            generated.to_string(),
            format!(
                "@GeneratedValue(strategy = GenerationType.SEQUENCE, generator = \"{GENERATOR_NAME_PLACEHOLDER}\")"
            )
        );

        let generator = annotations
            .iter()
            .find(|a| a.simple_name() == "SequenceGenerator")
            .unwrap();
        assert!(generator.to_string().contains("TODO"));
        assert!(generator.param("sequenceName").is_some());
        assert!(imports.contains("javax.persistence.SequenceGenerator"));
    }

    #[test]
    fn test_nullable_flag_only_when_not_null() {
        let mut imports = ImportSet::new();
        let nullable = Column::new("email", "email", JavaType::class("java.lang.String"));
        assert_eq!(
            render_all(&column_annotations(&nullable, &plain_config(), &mut imports)),
            vec!["@Column(name = \"email\")"]
        );

        let required = nullable.not_null();
        assert_eq!(
            render_all(&column_annotations(&required, &plain_config(), &mut imports)),
            vec!["@Column(name = \"email\", nullable = false)"]
        );
    }

    #[test]
    fn test_swagger_property_requires_flag_and_comment() {
        let column = Column::new("email", "email", JavaType::class("java.lang.String"))
            .with_comment("Login email");

        let mut imports = ImportSet::new();
        let annotations = column_annotations(&column, &plain_config(), &mut imports);
        assert_eq!(annotations.len(), 1);

        let config = TablesConfig {
            use_swagger_ui_comment: true,
            ..plain_config()
        };
        let annotations = render_all(&column_annotations(&column, &config, &mut imports));
        assert_eq!(
            annotations,
            vec!["@Column(name = \"email\")", "@ApiModelProperty(\"Login email\")"]
        );
        assert!(imports.contains("io.swagger.annotations.ApiModelProperty"));

        let blank = column.with_comment("   ");
        assert_eq!(column_annotations(&blank, &config, &mut imports).len(), 1);
    }

    #[test]
    fn test_swagger_comments_keep_surrounding_whitespace() {
        let config = TablesConfig {
            use_swagger_ui_comment: true,
            ..plain_config()
        };
        let mut imports = ImportSet::new();

        let column = Column::new("email", "email", JavaType::class("java.lang.String"))
            .with_comment(" Login email ");
        assert!(render_all(&column_annotations(&column, &config, &mut imports))
            .contains(&"@ApiModelProperty(\" Login email \")".to_string()));

        let table = Table::from(
            TableSchema::new("orders").with_comment("Customer orders "),
            "Order",
            "OrderRepository",
            true,
        );
        let class = class_annotations(&table, &config, &mut imports);
        assert!(render_all(&class.annotations).contains(&"@ApiModel(\"Customer orders \")".to_string()));
    }

    #[test]
    fn test_column_assembly_is_repeatable() {
        let column = Column::new("id", "id", long_type()).primary_key().auto_incremented();
        let mut imports = ImportSet::new();
        let first = column_annotations(&column, &plain_config(), &mut imports);
        let second = column_annotations(&column, &plain_config(), &mut imports);
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn test_jakarta_namespace() {
        let config = TablesConfig {
            persistence_namespace: PersistenceNamespace::Jakarta,
            ..plain_config()
        };
        let mut imports = ImportSet::new();
        let column = Column::new("id", "id", long_type()).primary_key();
        column_annotations(&column, &config, &mut imports);
        assert!(imports.contains("jakarta.persistence.Id"));
        assert!(!imports.contains("javax.persistence.Id"));
    }

    #[test]
    fn test_class_annotations_minimal() {
        let mut imports = ImportSet::new();
        let class = class_annotations(&orders(None, None), &plain_config(), &mut imports);
        assert_eq!(
            render_all(&class.annotations),
            vec!["@Entity", "@Table(name = \"orders\")"]
        );
        assert!(class.implements.is_empty());
        assert!(class.parent_class.is_none());
        assert!(class.serial_version_uid.is_none());
        assert!(imports.contains("javax.persistence.Entity"));
        assert!(imports.contains("javax.persistence.Table"));
    }

    #[test]
    fn test_class_annotations_lombok_full() {
        let config = TablesConfig {
            use_lombok: true,
            use_fluid_programming_style: true,
            extends_entity_name: Some("com.acme.domain.BaseEntity".to_string()),
            serializable: true,
            ..TablesConfig::default()
        };
        let mut imports = ImportSet::new();
        let class = class_annotations(&orders(None, None), &config, &mut imports);

        assert_eq!(
            render_all(&class.annotations),
            vec![
                "@Data",
                "@Entity",
                "@Table(name = \"orders\")",
                "@Accessors(chain = true)",
                "@EqualsAndHashCode(callSuper = true)",
            ]
        );
        assert_eq!(class.parent_class.as_deref(), Some("BaseEntity"));
        assert_eq!(class.serial_version_uid, Some("1"));
        assert!(class.implements.contains("Serializable"));
        for name in [
            "lombok.Data",
            "lombok.experimental.Accessors",
            "lombok.EqualsAndHashCode",
            "java.io.Serializable",
            "com.acme.domain.BaseEntity",
        ] {
            assert!(imports.contains(name), "{name}");
        }
    }

    #[test]
    fn test_equals_and_hash_code_needs_lombok() {
        let config = TablesConfig {
            use_lombok: false,
            extends_entity_name: Some("BaseEntity".to_string()),
            ..TablesConfig::default()
        };
        let mut imports = ImportSet::new();
        let class = class_annotations(&orders(None, None), &config, &mut imports);
        assert_eq!(class.annotations.len(), 2);
        assert_eq!(class.parent_class.as_deref(), Some("BaseEntity"));
        // default package superclass, nothing to import
        assert!(!imports.contains("BaseEntity"));
    }

    #[test]
    fn test_interfaces_are_imported_and_deduplicated() {
        let config = TablesConfig {
            serializable: true,
            implement_interfaces: vec![
                "java.io.Serializable".to_string(),
                "java.lang.Cloneable".to_string(),
                " ".to_string(),
            ],
            ..plain_config()
        };
        let mut imports = ImportSet::new();
        let class = class_annotations(&orders(None, None), &config, &mut imports);
        assert_eq!(
            class.implements.iter().collect::<Vec<_>>(),
            vec!["Cloneable", "Serializable"]
        );
        assert!(!imports.contains("java.lang.Cloneable"));
    }

    #[test]
    fn test_swagger_api_model_uses_table_comment() {
        let config = TablesConfig {
            use_swagger_ui_comment: true,
            ..plain_config()
        };
        let mut imports = ImportSet::new();

        let table = Table::from(
            TableSchema::new("orders").with_comment("Customer orders"),
            "Order",
            "OrderRepository",
            true,
        );
        let class = class_annotations(&table, &config, &mut imports);
        assert!(render_all(&class.annotations).contains(&"@ApiModel(\"Customer orders\")".to_string()));

        let mut imports = ImportSet::new();
        let class = class_annotations(&orders(None, None), &config, &mut imports);
        assert_eq!(class.annotations.len(), 2);
        assert!(!imports.contains("io.swagger.annotations.ApiModel"));
    }

    #[test]
    fn test_schema_qualified_table_name() {
        let config = TablesConfig {
            add_schema_name_to_table_name: true,
            ..plain_config()
        };
        assert_eq!(
            physical_table_name(&orders(Some("public"), Some("mydb")), &config),
            "public.orders"
        );
        assert_eq!(
            physical_table_name(&orders(Some("  "), Some("mydb")), &config),
            "mydb.orders"
        );
        assert_eq!(physical_table_name(&orders(None, None), &config), "orders");
        assert_eq!(
            physical_table_name(&orders(Some("public"), None), &plain_config()),
            "orders"
        );
    }

    #[test]
    fn test_class_annotations_sorted_by_length() {
        let config = TablesConfig {
            use_lombok: true,
            use_fluid_programming_style: true,
            use_swagger_ui_comment: true,
            add_schema_name_to_table_name: true,
            ..TablesConfig::default()
        };
        let table = Table::from(
            TableSchema::new("orders").with_schema("sales").with_comment("x"),
            "Order",
            "OrderRepository",
            true,
        );
        let mut imports = ImportSet::new();
        let class = class_annotations(&table, &config, &mut imports);
        let lengths: Vec<_> = class.annotations.iter().map(Annotation::rendered_len).collect();
        assert!(lengths.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    proptest! {
        #[test]
        fn prop_column_annotations_sorted_by_length(
            primary in any::<bool>(),
            auto_increment in any::<bool>(),
            sequence in any::<bool>(),
            nullable in any::<bool>(),
            swagger in any::<bool>(),
            comment in proptest::option::of("[a-z ]{0,40}"),
        ) {
            let mut column = Column::new("id", "id", long_type());
            column.primary = primary;
            column.auto_increment = auto_increment;
            column.sequence = sequence;
            column.nullable = nullable;
            column.comment = comment;
            let config = TablesConfig {
                use_swagger_ui_comment: swagger,
                ..plain_config()
            };

            let mut imports = ImportSet::new();
            let annotations = column_annotations(&column, &config, &mut imports);
            let lengths: Vec<_> = annotations.iter().map(Annotation::rendered_len).collect();
            prop_assert!(lengths.windows(2).all(|pair| pair[0] <= pair[1]), "{:?}", render_all(&annotations));

            let expected = usize::from(primary)
                + usize::from(sequence) * 2
                + usize::from(auto_increment && !sequence)
                + 1
                + usize::from(swagger && column.documented_comment().is_some());
            prop_assert_eq!(annotations.len(), expected);
        }
    }
}
