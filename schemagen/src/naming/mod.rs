//! Naming conventions for generated Java sources
//!
//! Derives class and field names from physical table and column names, and
//! flags column names that collide with SQL keywords.

use inflector::Inflector;

/// SQL keywords that need quoting when used as column names
const RESERVED_WORDS: &[&str] = &[
    "ADD", "ALL", "ALTER", "AND", "ANY", "AS", "ASC", "BETWEEN", "BY", "CASE", "CHECK",
    "COLUMN", "CONSTRAINT", "CREATE", "CROSS", "CURRENT", "DATABASE", "DEFAULT", "DELETE",
    "DESC", "DISTINCT", "DROP", "ELSE", "END", "EXISTS", "FOR", "FOREIGN", "FROM", "FULL",
    "GROUP", "HAVING", "IN", "INDEX", "INNER", "INSERT", "INTERVAL", "INTO", "IS", "JOIN",
    "KEY", "KEYS", "LEFT", "LIKE", "LIMIT", "NOT", "NULL", "OFFSET", "ON", "OR", "ORDER",
    "OUTER", "PRIMARY", "RANGE", "REFERENCES", "RIGHT", "ROW", "ROWS", "SELECT", "SET",
    "TABLE", "THEN", "TO", "UNION", "UNIQUE", "UPDATE", "USER", "USING", "VALUES", "WHEN",
    "WHERE", "WITH",
];

/// Naming helpers
pub struct Naming;

impl Naming {
    /// Entity class name for a table
    ///
    /// Strips `prefix` (case-insensitive) and converts to `PascalCase`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use schemagen::naming::Naming;
    /// assert_eq!(Naming::entity_name("t_user_profile", "t_"), "UserProfile");
    /// assert_eq!(Naming::entity_name("orders", ""), "Orders");
    /// ```
    #[must_use]
    pub fn entity_name(table_name: &str, prefix: &str) -> String {
        strip_prefix_ignore_case(table_name, prefix).to_pascal_case()
    }

    /// Field name for a column
    ///
    /// Strips `prefix` (case-insensitive) and converts to camelCase.
    ///
    /// # Examples
    ///
    /// ```
    /// # use schemagen::naming::Naming;
    /// assert_eq!(Naming::field_name("f_created_at", "f_"), "createdAt");
    /// assert_eq!(Naming::field_name("email", ""), "email");
    /// ```
    #[must_use]
    pub fn field_name(column_name: &str, prefix: &str) -> String {
        strip_prefix_ignore_case(column_name, prefix).to_camel_case()
    }

    /// Repository name for an entity
    #[must_use]
    pub fn repository_name(entity_name: &str) -> String {
        format!("{entity_name}Repository")
    }

    /// Whether a column name collides with a SQL keyword
    ///
    /// # Examples
    ///
    /// ```
    /// # use schemagen::naming::Naming;
    /// assert!(Naming::is_reserved_word("order"));
    /// assert!(!Naming::is_reserved_word("email"));
    /// ```
    #[must_use]
    pub fn is_reserved_word(name: &str) -> bool {
        let upper = name.to_ascii_uppercase();
        RESERVED_WORDS.contains(&upper.as_str())
    }
}

/// Strip `prefix` when present, unless nothing would remain
fn strip_prefix_ignore_case<'a>(name: &'a str, prefix: &str) -> &'a str {
    if prefix.is_empty() || name.len() <= prefix.len() {
        return name;
    }
    match name.get(..prefix.len()) {
        Some(head) if head.eq_ignore_ascii_case(prefix) => &name[prefix.len()..],
        _ => name,
    }
}
