//! Table column metadata

use serde::{Deserialize, Serialize};

use crate::types::JavaType;

/// One table column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Java field name (`userId`)
    pub field_name: String,
    /// Physical column name (`user_id`)
    pub column_name: String,
    /// Java type the column maps to
    pub java_data_type: JavaType,
    /// Native SQL type as reported by the database
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql_type: Option<String>,
    /// Column comment
    #[serde(default)]
    pub comment: Option<String>,
    /// Whether the column accepts NULL
    pub nullable: bool,
    /// Part of the primary key
    pub primary: bool,
    /// Populated by an auto-increment counter
    pub auto_increment: bool,
    /// Populated from a database sequence
    pub sequence: bool,
    /// Name collides with a keyword and must be escaped in SQL
    pub reserved_word: bool,
    /// Included in generation
    pub selected: bool,
}

impl Column {
    /// Nullable, selected column with no key flags
    #[must_use]
    pub fn new(
        field_name: impl Into<String>,
        column_name: impl Into<String>,
        java_data_type: JavaType,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            column_name: column_name.into(),
            java_data_type,
            sql_type: None,
            comment: None,
            nullable: true,
            primary: false,
            auto_increment: false,
            sequence: false,
            reserved_word: false,
            selected: true,
        }
    }

    /// Mark as part of the primary key
    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.primary = true;
        self
    }

    /// Mark as auto-increment
    #[must_use]
    pub const fn auto_incremented(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    /// Mark as sequence-backed
    #[must_use]
    pub const fn sequence_backed(mut self) -> Self {
        self.sequence = true;
        self
    }

    /// Mark as NOT NULL
    #[must_use]
    pub const fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Mark as a reserved word
    #[must_use]
    pub const fn reserved(mut self) -> Self {
        self.reserved_word = true;
        self
    }

    /// Exclude from generation
    #[must_use]
    pub const fn unselected(mut self) -> Self {
        self.selected = false;
        self
    }

    /// Attach a comment
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Attach the native SQL type
    #[must_use]
    pub fn with_sql_type(mut self, sql_type: impl Into<String>) -> Self {
        self.sql_type = Some(sql_type.into());
        self
    }

    /// Comment as written, if present and not blank
    #[must_use]
    pub fn documented_comment(&self) -> Option<&str> {
        self.comment
            .as_deref()
            .filter(|comment| !comment.trim().is_empty())
    }

    /// Column name, wrapped on both sides when it is a reserved word
    #[must_use]
    pub fn quoted_name(&self, reserved_word_wrapper: &str) -> String {
        if self.reserved_word {
            format!(
                "{reserved_word_wrapper}{}{reserved_word_wrapper}",
                self.column_name
            )
        } else {
            self.column_name.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string_type() -> JavaType {
        JavaType::class("java.lang.String")
    }

    #[test]
    fn test_new_defaults() {
        let column = Column::new("email", "email", string_type());
        assert!(column.nullable);
        assert!(column.selected);
        assert!(!column.primary);
        assert!(!column.auto_increment);
        assert!(!column.sequence);
        assert!(!column.reserved_word);
    }

    #[test]
    fn test_builder_flags() {
        let column = Column::new("id", "id", JavaType::class("java.lang.Long"))
            .primary_key()
            .sequence_backed()
            .not_null()
            .with_sql_type("bigint");
        assert!(column.primary);
        assert!(column.sequence);
        assert!(!column.nullable);
        assert_eq!(column.sql_type.as_deref(), Some("bigint"));
    }

    #[test]
    fn test_documented_comment_skips_blank() {
        let column = Column::new("name", "name", string_type()).with_comment("  ");
        assert_eq!(column.documented_comment(), None);

        let column = column.with_comment(" Display name ");
        assert_eq!(column.documented_comment(), Some(" Display name "));
    }

    #[test]
    fn test_quoted_name() {
        let order = Column::new("order", "order", string_type()).reserved();
        assert_eq!(order.quoted_name("`"), "`order`");
        assert_eq!(order.quoted_name(""), "order");

        let plain = Column::new("total", "total", string_type());
        assert_eq!(plain.quoted_name("`"), "total");
    }
}
