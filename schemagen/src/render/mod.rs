//! Template rendering
//!
//! [`SourceRenderer`] binds a [`Table`] and a [`GeneratorConfig`] into an
//! [`EntityContext`] and evaluates a Handlebars template against it. HTML
//! escaping is disabled since the output is Java source.
//!
//! # Context Keys
//!
//! | key | content |
//! | --- | --- |
//! | `config`, `tables_config` | configuration snapshot |
//! | `table` | table fields plus `service_name`, `controller_name` |
//! | `empty`, `indent` | `""` and one indentation unit |
//! | `table_javadoc` | Javadoc body lines of a non-blank table comment |
//! | `package`, `simple_name` | entity package and class name |
//! | `imports` | sorted imports of the entity |
//! | `parent_class`, `implements` | superclass and interface simple names |
//! | `annotations` | class annotations, shortest first |
//! | `columns` | selected columns with `java_type`, `javadoc` and `annotations` |
//! | `serial_version_uid`, `use_lombok`, `use_swagger_ui_comment` | flags |
//! | `primary_key`, `primary_key_type`, `primary_key_import`, `composite_primary_key` | key info |
//! | `repository_package`, `service_package`, `controller_package` | other artifact packages |
//!
//! Helpers: `upper_first`, `lower_first`, `camel_case`, `pascal_case`,
//! `snake_case`, `join`.

mod context;

use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;

use handlebars::Handlebars;
use serde::Serialize;

pub use context::{ColumnBinding, EntityContext, TableBinding};

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::schema::Table;
use crate::template::{helpers, TemplateId, TemplateProvider};

/// Where the template text comes from
#[derive(Debug, Clone, Copy)]
enum TemplateSource<'t> {
    Id(TemplateId),
    Inline(&'t str),
}

impl fmt::Display for TemplateSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Inline(_) => f.write_str("inline"),
        }
    }
}

/// A rendered source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedSource {
    /// Artifact kind
    pub artifact: TemplateId,
    /// File name (`User.java`)
    pub file_name: String,
    /// Java package of the source
    pub package: String,
    /// Rendered text
    pub content: String,
}

impl GeneratedSource {
    /// Path relative to a source root, one directory per package segment
    ///
    /// # Examples
    ///
    /// ```
    /// # use schemagen::render::GeneratedSource;
    /// # use schemagen::template::TemplateId;
    /// let source = GeneratedSource {
    ///     artifact: TemplateId::Entity,
    ///     file_name: "User.java".to_string(),
    ///     package: "com.acme.domain".to_string(),
    ///     content: String::new(),
    /// };
    /// assert_eq!(
    ///     source.relative_path(),
    ///     std::path::PathBuf::from("com/acme/domain/User.java")
    /// );
    /// ```
    #[must_use]
    pub fn relative_path(&self) -> PathBuf {
        self.package
            .split('.')
            .filter(|segment| !segment.is_empty())
            .chain(std::iter::once(self.file_name.as_str()))
            .collect()
    }
}

/// Renders tables through templates from a [`TemplateProvider`]
pub struct SourceRenderer<P> {
    provider: P,
    handlebars: Handlebars<'static>,
}

impl<P: fmt::Debug> fmt::Debug for SourceRenderer<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceRenderer")
            .field("provider", &self.provider)
            .finish_non_exhaustive()
    }
}

impl<P: TemplateProvider> SourceRenderer<P> {
    /// Create a renderer loading templates from `provider`
    #[must_use]
    pub fn new(provider: P) -> Self {
        let mut handlebars = Handlebars::new();

        // Disable HTML escaping since we're generating code
        handlebars.register_escape_fn(handlebars::no_escape);
        helpers::register(&mut handlebars);

        Self {
            provider,
            handlebars,
        }
    }

    /// The injected template provider
    #[must_use]
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Render the entity source for `table`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The provider has no entity template
    /// - The template is malformed or fails to evaluate
    pub fn render(&self, config: &GeneratorConfig, table: &Table) -> Result<String> {
        self.render_template(config, table, TemplateId::Entity)
    }

    /// Render the `id` template for `table`
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails or the template fails to
    /// evaluate.
    pub fn render_template(
        &self,
        config: &GeneratorConfig,
        table: &Table,
        id: TemplateId,
    ) -> Result<String> {
        self.render_source(config, table, TemplateSource::Id(id))
    }

    /// Render caller-supplied template text for `table`
    ///
    /// The provider is not consulted.
    ///
    /// # Errors
    ///
    /// Returns an error if the template is malformed or fails to evaluate.
    pub fn render_inline(
        &self,
        config: &GeneratorConfig,
        table: &Table,
        template: &str,
    ) -> Result<String> {
        self.render_source(config, table, TemplateSource::Inline(template))
    }

    /// Render several artifacts for `table` from one context
    ///
    /// # Errors
    ///
    /// Returns the first provider or template error; nothing is returned for
    /// the artifacts rendered before it.
    pub fn render_artifacts(
        &self,
        config: &GeneratorConfig,
        table: &Table,
        ids: &[TemplateId],
    ) -> Result<Vec<GeneratedSource>> {
        let context = self.context(config, table);

        ids.iter()
            .map(|&id| -> Result<GeneratedSource> {
                let template = self.provider.load_template(id)?;
                let content = self.evaluate(&template, &context, TemplateSource::Id(id))?;
                Ok(GeneratedSource {
                    artifact: id,
                    file_name: format!("{}.java", id.class_name(table)),
                    package: context.package_for(id).to_string(),
                    content,
                })
            })
            .collect()
    }

    fn render_source(
        &self,
        config: &GeneratorConfig,
        table: &Table,
        source: TemplateSource<'_>,
    ) -> Result<String> {
        let context = self.context(config, table);

        let template = match source {
            TemplateSource::Id(id) => Cow::Owned(self.provider.load_template(id)?),
            TemplateSource::Inline(text) => Cow::Borrowed(text),
        };

        self.evaluate(&template, &context, source)
    }

    fn context<'a>(&self, config: &'a GeneratorConfig, table: &'a Table) -> EntityContext<'a> {
        if table.has_composite_primary_key() {
            tracing::warn!(
                table = %table.table_name,
                keys = table.primary_columns().count(),
                "composite primary key, using the first key column"
            );
        }
        EntityContext::build(config, table)
    }

    fn evaluate(
        &self,
        template: &str,
        context: &EntityContext<'_>,
        source: TemplateSource<'_>,
    ) -> Result<String> {
        tracing::debug!(
            table = %context.table.table().table_name,
            template = %source,
            columns = context.columns.len(),
            "rendering source"
        );
        Ok(self.handlebars.render_template(template, context)?)
    }
}
