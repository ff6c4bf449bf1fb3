//! Structured annotations for generated sources
//!
//! An [`Annotation`] is a fully-qualified name plus ordered key/value
//! parameters. Assembly code builds values of this type and never formats
//! text itself; the `Display` impl is the only renderer.
//!
//! ```text
//! Annotation::new("javax.persistence.Id")                 → @Id
//! .with_str("name", "email")                              → @Column(name = "email")
//! .with_literal("strategy", "GenerationType.IDENTITY")    → strategy = GenerationType.IDENTITY
//! .with_bool("nullable", false)                           → nullable = false
//! single `value` parameter                                → @ApiModel("Users")
//! ```

mod builder;

use std::collections::HashSet;
use std::fmt;

pub use builder::{
    class_annotations, column_annotations, physical_table_name, ClassAnnotations,
    GENERATOR_NAME_PLACEHOLDER, SEQUENCE_NAME_PLACEHOLDER, SERIAL_VERSION_UID,
};

/// Value of one annotation parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnnotationValue {
    /// String literal, quoted and escaped on render
    Str(String),
    /// Source expression rendered verbatim (`GenerationType.SEQUENCE`)
    Literal(String),
    /// Boolean literal
    Bool(bool),
}

impl AnnotationValue {
    /// Whether the value renders verbatim
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        !matches!(self, Self::Str(_))
    }
}

impl fmt::Display for AnnotationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(value) => write!(f, "\"{}\"", escape_java_string(value)),
            Self::Literal(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
        }
    }
}

impl From<bool> for AnnotationValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for AnnotationValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for AnnotationValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

/// One generated annotation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Annotation {
    name: String,
    params: Vec<(String, AnnotationValue)>,
}

impl Annotation {
    /// Annotation without parameters
    #[must_use]
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self {
            name: qualified_name.into(),
            params: Vec::new(),
        }
    }

    /// Append a parameter
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AnnotationValue>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Append a quoted string parameter
    #[must_use]
    pub fn with_str(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.with(key, AnnotationValue::Str(value.into()))
    }

    /// Append a verbatim source expression parameter
    #[must_use]
    pub fn with_literal(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.with(key, AnnotationValue::Literal(value.into()))
    }

    /// Append a boolean parameter
    #[must_use]
    pub fn with_bool(self, key: impl Into<String>, value: bool) -> Self {
        self.with(key, AnnotationValue::Bool(value))
    }

    /// Fully-qualified annotation type
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name as written after `@`
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.name
            .rsplit_once('.')
            .map_or(self.name.as_str(), |(_, simple)| simple)
    }

    /// Parameters in insertion order
    #[must_use]
    pub fn params(&self) -> &[(String, AnnotationValue)] {
        &self.params
    }

    /// First parameter with the given key
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&AnnotationValue> {
        self.params
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    /// Length of the rendered text in characters
    #[must_use]
    pub fn rendered_len(&self) -> usize {
        self.to_string().chars().count()
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.simple_name())?;
        match self.params.as_slice() {
            [] => Ok(()),
            [(key, value)] if key == "value" => write!(f, "({value})"),
            params => {
                write!(f, "(")?;
                for (idx, (key, value)) in params.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key} = {value}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Drop annotations whose rendered text was already seen, keeping the first
#[must_use]
pub fn dedup_rendered(annotations: Vec<Annotation>) -> Vec<Annotation> {
    let mut seen = HashSet::new();
    annotations
        .into_iter()
        .filter(|annotation| seen.insert(annotation.to_string()))
        .collect()
}

/// Stable sort by ascending rendered length
pub fn sort_by_length(annotations: &mut [Annotation]) {
    annotations.sort_by_cached_key(Annotation::rendered_len);
}

/// Render annotations to their text form, preserving order
#[must_use]
pub fn render_all(annotations: &[Annotation]) -> Vec<String> {
    annotations.iter().map(ToString::to_string).collect()
}

/// Escape text for use inside a Java string literal
#[must_use]
pub fn escape_java_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_marker() {
        let id = Annotation::new("javax.persistence.Id");
        assert_eq!(id.to_string(), "@Id");
        assert_eq!(id.simple_name(), "Id");
        assert_eq!(id.name(), "javax.persistence.Id");
    }

    #[test]
    fn test_render_params_in_order() {
        let column = Annotation::new("javax.persistence.Column")
            .with_str("name", "user_id")
            .with_bool("nullable", false);
        assert_eq!(column.to_string(), "@Column(name = \"user_id\", nullable = false)");
        assert_eq!(column.param("nullable"), Some(&AnnotationValue::Bool(false)));
        assert_eq!(column.param("length"), None);
    }

    #[test]
    fn test_render_literal() {
        let generated = Annotation::new("javax.persistence.GeneratedValue")
            .with_literal("strategy", "GenerationType.IDENTITY");
        assert_eq!(
            generated.to_string(),
            "@GeneratedValue(strategy = GenerationType.IDENTITY)"
        );
        assert!(generated.params()[0].1.is_literal());
    }

    #[test]
    fn test_render_single_value_shorthand() {
        let model = Annotation::new("io.swagger.annotations.ApiModel").with_str("value", "Users");
        assert_eq!(model.to_string(), "@ApiModel(\"Users\")");

        let two = Annotation::new("io.swagger.annotations.ApiModel")
            .with_str("value", "Users")
            .with_str("description", "All users");
        assert_eq!(
            two.to_string(),
            "@ApiModel(value = \"Users\", description = \"All users\")"
        );
    }

    #[test]
    fn test_escape_string_values() {
        let model = Annotation::new("io.swagger.annotations.ApiModel")
            .with_str("value", "say \"hi\"\nC:\\tmp");
        assert_eq!(model.to_string(), r#"@ApiModel("say \"hi\"\nC:\\tmp")"#);
    }

    #[test]
    fn test_sort_by_length_is_stable() {
        let mut annotations = vec![
            Annotation::new("a.Column").with_str("name", "x"),
            Annotation::new("a.Bb"),
            Annotation::new("a.Id"),
            Annotation::new("a.Entity"),
        ];
        sort_by_length(&mut annotations);
        assert_eq!(
            render_all(&annotations),
            vec!["@Bb", "@Id", "@Entity", "@Column(name = \"x\")"]
        );
    }

    #[test]
    fn test_dedup_keeps_first() {
        let annotations = dedup_rendered(vec![
            Annotation::new("javax.persistence.Id"),
            Annotation::new("org.example.Id"),
            Annotation::new("javax.persistence.Entity"),
        ]);
        // same rendered text, different packages: text wins
        assert_eq!(annotations.len(), 2);
        assert_eq!(annotations[0].name(), "javax.persistence.Id");
    }
}
