//! Template store
//!
//! Templates are Handlebars text addressed by a [`TemplateId`]. A
//! [`TemplateProvider`] supplies the text; the renderer never reads files
//! itself.
//!
//! Two providers ship with the crate:
//!
//! - [`BuiltinTemplates`]: defaults embedded at compile time
//! - [`DirectoryTemplates`]: `<id>.java.hbs` files from a directory, falling
//!   back to the embedded defaults for files that are absent

pub mod helpers;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::schema::Table;

/// Extension of template files on disk
pub const TEMPLATE_EXTENSION: &str = "java.hbs";

const ENTITY_TEMPLATE: &str = include_str!("defaults/entity.java.hbs");
const REPOSITORY_TEMPLATE: &str = include_str!("defaults/repository.java.hbs");
const SERVICE_TEMPLATE: &str = include_str!("defaults/service.java.hbs");
const CONTROLLER_TEMPLATE: &str = include_str!("defaults/controller.java.hbs");

/// Kind of generated source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateId {
    /// JPA entity class
    Entity,
    /// Spring Data repository interface
    Repository,
    /// Service class wrapping the repository
    Service,
    /// REST controller wrapping the service
    Controller,
}

impl TemplateId {
    /// Every artifact, in generation order
    pub const ALL: [Self; 4] = [
        Self::Entity,
        Self::Repository,
        Self::Service,
        Self::Controller,
    ];

    /// Identifier used in file names and on the command line
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Entity => "entity",
            Self::Repository => "repository",
            Self::Service => "service",
            Self::Controller => "controller",
        }
    }

    /// Template file name (`entity.java.hbs`)
    #[must_use]
    pub fn file_name(self) -> String {
        format!("{}.{TEMPLATE_EXTENSION}", self.as_str())
    }

    /// Name of the class this artifact generates for `table`
    #[must_use]
    pub fn class_name(self, table: &Table) -> String {
        match self {
            Self::Entity => table.entity_name.clone(),
            Self::Repository => table.repository_name.clone(),
            Self::Service => table.service_name(),
            Self::Controller => table.controller_name(),
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::TemplateNotFound {
                id: s.to_string(),
                path: None,
            })
    }
}

/// Source of template text
///
/// Invoked lazily by the renderer, only after the binding context is built.
pub trait TemplateProvider {
    /// Template text for `id`
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateNotFound`] when no text exists for `id`, or an
    /// IO error when it exists but cannot be read.
    fn load_template(&self, id: TemplateId) -> Result<String>;
}

impl<P: TemplateProvider + ?Sized> TemplateProvider for &P {
    fn load_template(&self, id: TemplateId) -> Result<String> {
        (**self).load_template(id)
    }
}

impl<P: TemplateProvider + ?Sized> TemplateProvider for Box<P> {
    fn load_template(&self, id: TemplateId) -> Result<String> {
        (**self).load_template(id)
    }
}

/// Templates embedded in the binary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuiltinTemplates;

impl BuiltinTemplates {
    /// Embedded text for `id`
    #[must_use]
    pub const fn text(id: TemplateId) -> &'static str {
        match id {
            TemplateId::Entity => ENTITY_TEMPLATE,
            TemplateId::Repository => REPOSITORY_TEMPLATE,
            TemplateId::Service => SERVICE_TEMPLATE,
            TemplateId::Controller => CONTROLLER_TEMPLATE,
        }
    }
}

impl TemplateProvider for BuiltinTemplates {
    fn load_template(&self, id: TemplateId) -> Result<String> {
        Ok(Self::text(id).to_string())
    }
}

/// Templates read from `<root>/<id>.java.hbs`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryTemplates {
    root: PathBuf,
    fallback: bool,
}

impl DirectoryTemplates {
    /// Provider rooted at `root`, falling back to the embedded defaults
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            fallback: true,
        }
    }

    /// Fail with [`Error::TemplateNotFound`] instead of falling back
    #[must_use]
    pub const fn without_fallback(mut self) -> Self {
        self.fallback = false;
        self
    }

    /// Template directory
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where the template for `id` is looked up
    #[must_use]
    pub fn path_for(&self, id: TemplateId) -> PathBuf {
        self.root.join(id.file_name())
    }

    /// Whether a customized template exists for `id`
    #[must_use]
    pub fn is_customized(&self, id: TemplateId) -> bool {
        self.path_for(id).is_file()
    }

    /// Write the embedded defaults into the directory
    ///
    /// Existing files are kept unless `overwrite` is set. Returns the paths
    /// that were written.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or a file cannot
    /// be written.
    pub fn export_defaults(&self, overwrite: bool) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(&self.root)?;

        let mut written = Vec::new();
        for id in TemplateId::ALL {
            let path = self.path_for(id);
            if path.exists() && !overwrite {
                tracing::debug!(path = %path.display(), "keeping existing template");
                continue;
            }
            std::fs::write(&path, BuiltinTemplates::text(id))?;
            written.push(path);
        }
        Ok(written)
    }
}

impl TemplateProvider for DirectoryTemplates {
    fn load_template(&self, id: TemplateId) -> Result<String> {
        let path = self.path_for(id);
        if path.is_file() {
            tracing::debug!(template = %id, path = %path.display(), "loading custom template");
            return Ok(std::fs::read_to_string(&path)?);
        }

        if self.fallback {
            tracing::debug!(template = %id, "no custom template, using built-in");
            return BuiltinTemplates.load_template(id);
        }

        Err(Error::TemplateNotFound {
            id: id.to_string(),
            path: Some(path),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_id_parse() {
        assert_eq!("entity".parse::<TemplateId>().unwrap(), TemplateId::Entity);
        assert_eq!(" Controller ".parse::<TemplateId>().unwrap(), TemplateId::Controller);
        assert!(matches!(
            "mapper".parse::<TemplateId>(),
            Err(Error::TemplateNotFound { path: None, .. })
        ));
    }

    #[test]
    fn test_template_file_names() {
        assert_eq!(TemplateId::Entity.file_name(), "entity.java.hbs");
        assert_eq!(TemplateId::Service.to_string(), "service");
    }

    #[test]
    fn test_builtin_templates_present() {
        for id in TemplateId::ALL {
            let text = BuiltinTemplates.load_template(id).unwrap();
            assert!(text.starts_with("package "), "{id}");
        }
    }

    #[test]
    fn test_directory_prefers_custom_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("entity.java.hbs"), "custom {{simple_name}}").unwrap();

        let templates = DirectoryTemplates::new(dir.path());
        assert!(templates.is_customized(TemplateId::Entity));
        assert_eq!(
            templates.load_template(TemplateId::Entity).unwrap(),
            "custom {{simple_name}}"
        );
        assert_eq!(
            templates.load_template(TemplateId::Repository).unwrap(),
            BuiltinTemplates::text(TemplateId::Repository)
        );
    }

    #[test]
    fn test_directory_without_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let templates = DirectoryTemplates::new(dir.path()).without_fallback();

        let err = templates.load_template(TemplateId::Service).unwrap_err();
        match err {
            Error::TemplateNotFound { id, path } => {
                assert_eq!(id, "service");
                assert_eq!(path, Some(dir.path().join("service.java.hbs")));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_export_defaults_keeps_existing() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("templates");
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("entity.java.hbs"), "mine").unwrap();

        let templates = DirectoryTemplates::new(&root);
        let written = templates.export_defaults(false).unwrap();
        assert_eq!(written.len(), 3);
        assert_eq!(std::fs::read_to_string(root.join("entity.java.hbs")).unwrap(), "mine");

        let written = templates.export_defaults(true).unwrap();
        assert_eq!(written.len(), 4);
        assert_eq!(
            std::fs::read_to_string(root.join("entity.java.hbs")).unwrap(),
            BuiltinTemplates::text(TemplateId::Entity)
        );
    }

    #[test]
    fn test_provider_through_box() {
        let provider: Box<dyn TemplateProvider> = Box::new(BuiltinTemplates);
        assert!(provider.load_template(TemplateId::Entity).is_ok());
    }
}
