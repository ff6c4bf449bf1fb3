//! schemagen: schema-to-source code generation for JPA projects
//!
//! Reads relational table metadata (tables, columns, SQL types, keys) and binds
//! it to Handlebars templates that produce Java entity classes, repositories,
//! services and controllers.
//!
//! # Pipeline
//!
//! 1. **Schema model** ([`schema`]): `TableSchema`, `Table` and `Column`, built
//!    by an introspection collaborator or loaded from a [`schema::SchemaDocument`]
//! 2. **Type mapping** ([`types`]): SQL types to Java types, import requirements
//! 3. **Annotations** ([`annotation`]): per-column and per-class JPA, Lombok and
//!    Swagger annotations assembled from configuration flags
//! 4. **Imports** ([`imports`]): the sorted, deduplicated import list
//! 5. **Rendering** ([`render`]): one binding context, evaluated against a
//!    template from a [`template::TemplateProvider`] or an inline string
//!
//! # Quick Start
//!
//! ```rust
//! use schemagen::prelude::*;
//!
//! # fn main() -> schemagen::Result<()> {
//! let schema = TableSchema::new("users");
//! let table = Table::from(schema, "User", "UserRepository", true).with_columns(vec![
//!     Column::new("id", "id", JavaType::parse("java.lang.Long")?)
//!         .primary_key()
//!         .auto_incremented()
//!         .not_null(),
//!     Column::new("email", "email", JavaType::parse("java.lang.String")?),
//! ]);
//!
//! let renderer = SourceRenderer::new(BuiltinTemplates);
//! let source = renderer.render(&GeneratorConfig::default(), &table)?;
//! assert!(source.contains("@Table(name = \"users\")"));
//! # Ok(())
//! # }
//! ```

pub mod annotation;
pub mod config;
pub mod error;
pub mod imports;
pub mod naming;
pub mod observability;
pub mod render;
pub mod schema;
pub mod template;
pub mod types;

pub use error::{Error, Result};

pub mod prelude {
    //! Convenience re-exports for common types
    //!
    //! ```rust
    //! use schemagen::prelude::*;
    //! ```

    pub use crate::annotation::{Annotation, AnnotationValue};
    pub use crate::config::{GeneratorConfig, Indent, PersistenceNamespace, TablesConfig};
    pub use crate::error::{Error, Result};
    pub use crate::imports::ImportSet;
    pub use crate::render::{EntityContext, GeneratedSource, SourceRenderer};
    pub use crate::schema::{Column, SchemaDocument, Table, TableSchema};
    pub use crate::template::{BuiltinTemplates, DirectoryTemplates, TemplateId, TemplateProvider};
    pub use crate::types::{JavaType, PrimitiveType, TypeMapper};
}
