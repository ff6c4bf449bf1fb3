//! Configuration management for schemagen
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `SCHEMAGEN_` prefix, `__` for nesting)
//! 2. The config file (`./schemagen.toml` or an explicit path)
//! 3. Hardcoded defaults (fallback)
//!
//! A loaded [`GeneratorConfig`] is a read-only snapshot for the duration of a
//! render pass.
//!
//! # Example Configuration
//!
//! ```toml
//! # schemagen.toml
//! output_dir = "./generated"
//!
//! [tables_config]
//! entity_package_name = "com.acme.shop.domain"
//! repository_package_name = "com.acme.shop.repository"
//! indent = "two_spaces"
//! use_lombok = true
//! use_fluid_programming_style = true
//! extends_entity_name = "com.acme.shop.domain.BaseEntity"
//! implement_interfaces = ["java.io.Closeable"]
//! add_schema_name_to_table_name = true
//! persistence_namespace = "jakarta"
//! remove_table_prefix = "t_"
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use schemagen::config::GeneratorConfig;
//!
//! # fn example() -> schemagen::Result<()> {
//! let config = GeneratorConfig::load(None)?;
//! let package = &config.tables_config.entity_package_name;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::template::TemplateId;

/// Config file looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "schemagen.toml";

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "SCHEMAGEN_";

/// Indentation unit used by generated sources
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indent {
    /// Two spaces
    #[serde(alias = "2")]
    TwoSpaces,
    /// Four spaces
    #[default]
    #[serde(alias = "4")]
    FourSpaces,
    /// One tab character
    #[serde(alias = "\t")]
    Tab,
}

impl Indent {
    /// The literal text of one indentation level
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::TwoSpaces => "  ",
            Self::FourSpaces => "    ",
            Self::Tab => "\t",
        }
    }
}

impl FromStr for Indent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "2" | "two_spaces" | "2 spaces" => Ok(Self::TwoSpaces),
            "4" | "four_spaces" | "4 spaces" => Ok(Self::FourSpaces),
            "tab" | "\\t" => Ok(Self::Tab),
            other => Err(Error::InvalidConfig(format!(
                "Unknown indent '{other}'. Expected one of: two_spaces, four_spaces, tab"
            ))),
        }
    }
}

impl fmt::Display for Indent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TwoSpaces => write!(f, "two_spaces"),
            Self::FourSpaces => write!(f, "four_spaces"),
            Self::Tab => write!(f, "tab"),
        }
    }
}

/// Root package of the persistence annotations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersistenceNamespace {
    /// `javax.persistence` (JPA 2.x)
    #[default]
    Javax,
    /// `jakarta.persistence` (Jakarta Persistence 3.x)
    Jakarta,
}

impl PersistenceNamespace {
    /// Package that holds `Entity`, `Table`, `Column`, ...
    #[must_use]
    pub const fn package(self) -> &'static str {
        match self {
            Self::Javax => "javax.persistence",
            Self::Jakarta => "jakarta.persistence",
        }
    }

    /// Fully-qualified name of a persistence type
    #[must_use]
    pub fn qualify(self, simple_name: &str) -> String {
        format!("{}.{simple_name}", self.package())
    }
}

/// Table-level render options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TablesConfig {
    /// Package of generated entity classes
    pub entity_package_name: String,

    /// Package of generated repositories
    pub repository_package_name: String,

    /// Package of generated services
    pub service_package_name: String,

    /// Package of generated controllers
    pub controller_package_name: String,

    /// Indentation unit
    pub indent: Indent,

    /// Implement `java.io.Serializable` and emit a `serialVersionUID`
    pub serializable: bool,

    /// Generate Lombok accessors instead of explicit getters/setters
    pub use_lombok: bool,

    /// Chained (fluent) Lombok accessors, only meaningful with `use_lombok`
    pub use_fluid_programming_style: bool,

    /// Superclass of generated entities, simple or fully-qualified
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extends_entity_name: Option<String>,

    /// Fully-qualified interfaces every entity implements
    pub implement_interfaces: Vec<String>,

    /// Emit Swagger `@ApiModel`/`@ApiModelProperty` from table and column comments
    pub use_swagger_ui_comment: bool,

    /// Qualify `@Table(name)` with the schema (or catalog) name
    pub add_schema_name_to_table_name: bool,

    /// `javax` or `jakarta` persistence annotations
    pub persistence_namespace: PersistenceNamespace,

    /// Prefix stripped from table names before deriving entity names
    pub remove_table_prefix: String,

    /// Prefix stripped from column names before deriving field names
    pub remove_field_prefix: String,
}

impl Default for TablesConfig {
    fn default() -> Self {
        Self {
            entity_package_name: "com.example.entity".to_string(),
            repository_package_name: "com.example.repository".to_string(),
            service_package_name: "com.example.service".to_string(),
            controller_package_name: "com.example.controller".to_string(),
            indent: Indent::default(),
            serializable: false,
            use_lombok: true,
            use_fluid_programming_style: false,
            extends_entity_name: None,
            implement_interfaces: Vec::new(),
            use_swagger_ui_comment: false,
            add_schema_name_to_table_name: false,
            persistence_namespace: PersistenceNamespace::default(),
            remove_table_prefix: String::new(),
            remove_field_prefix: String::new(),
        }
    }
}

impl TablesConfig {
    /// Configured superclass, ignoring a blank value
    #[must_use]
    pub fn superclass(&self) -> Option<&str> {
        self.extends_entity_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Package that generated sources of `artifact` are placed in
    #[must_use]
    pub fn package_name(&self, artifact: TemplateId) -> &str {
        match artifact {
            TemplateId::Entity => &self.entity_package_name,
            TemplateId::Repository => &self.repository_package_name,
            TemplateId::Service => &self.service_package_name,
            TemplateId::Controller => &self.controller_package_name,
        }
    }
}

/// Complete generator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Table-level render options
    pub tables_config: TablesConfig,

    /// Root directory generated files are written under
    pub output_dir: PathBuf,

    /// Directory with customized `<id>.java.hbs` templates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            tables_config: TablesConfig::default(),
            output_dir: PathBuf::from("./generated"),
            template_dir: None,
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from defaults, a config file and the environment
    ///
    /// Without an explicit `path`, `./schemagen.toml` is used when present.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An explicit `path` does not exist
    /// - The file or an environment override does not match the config shape
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) if !path.exists() => {
                return Err(Error::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("Config file not found: {}", path.display()),
                )));
            }
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        tracing::debug!(path = %file.display(), "loading generator config");

        Self::from_figment(
            Self::base_figment()
                .merge(Toml::file(file))
                .merge(Env::prefixed(ENV_PREFIX).split("__")),
        )
    }

    /// Parse configuration from TOML text layered over the defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this shape.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Self::from_figment(Self::base_figment().merge(Toml::string(text)))
    }

    fn base_figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
    }

    fn from_figment(figment: Figment) -> Result<Self> {
        Ok(figment.extract()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("./generated"));
        assert!(config.template_dir.is_none());
        assert!(config.tables_config.use_lombok);
        assert!(!config.tables_config.serializable);
        assert_eq!(config.tables_config.indent, Indent::FourSpaces);
        assert_eq!(
            config.tables_config.persistence_namespace,
            PersistenceNamespace::Javax
        );
    }

    #[test]
    fn test_from_toml_overrides_defaults() {
        let config = GeneratorConfig::from_toml_str(
            r#"
            output_dir = "out"

            [tables_config]
            entity_package_name = "com.acme.domain"
            indent = "tab"
            use_lombok = false
            implement_interfaces = ["java.lang.Cloneable"]
            persistence_namespace = "jakarta"
            "#,
        )
        .unwrap();

        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.tables_config.entity_package_name, "com.acme.domain");
        assert_eq!(config.tables_config.indent, Indent::Tab);
        assert!(!config.tables_config.use_lombok);
        assert_eq!(
            config.tables_config.implement_interfaces,
            vec!["java.lang.Cloneable"]
        );
        // untouched keys keep their defaults
        assert_eq!(
            config.tables_config.repository_package_name,
            "com.example.repository"
        );
        assert_eq!(
            config.tables_config.persistence_namespace.package(),
            "jakarta.persistence"
        );
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = GeneratorConfig::from_toml_str("[tables_config]\nuse_lombok = \"maybe\"");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[tables_config]\nadd_schema_name_to_table_name = true\nindent = \"two_spaces\"\n",
        )
        .unwrap();

        let config = GeneratorConfig::load(Some(&path)).unwrap();
        assert!(config.tables_config.add_schema_name_to_table_name);
        assert_eq!(config.tables_config.indent.unit(), "  ");
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let result = GeneratorConfig::load(Some(Path::new("/definitely/not/here.toml")));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_indent_parsing() {
        assert_eq!("2".parse::<Indent>().unwrap(), Indent::TwoSpaces);
        assert_eq!("Four_Spaces".parse::<Indent>().unwrap(), Indent::FourSpaces);
        assert_eq!("tab".parse::<Indent>().unwrap().unit(), "\t");
        assert!(matches!(
            "three".parse::<Indent>(),
            Err(Error::InvalidConfig(message)) if message.contains("three")
        ));
    }

    #[test]
    fn test_superclass_ignores_blank() {
        let mut tables = TablesConfig::default();
        assert_eq!(tables.superclass(), None);

        tables.extends_entity_name = Some("   ".to_string());
        assert_eq!(tables.superclass(), None);

        tables.extends_entity_name = Some("com.acme.BaseEntity".to_string());
        assert_eq!(tables.superclass(), Some("com.acme.BaseEntity"));
    }

    #[test]
    fn test_package_per_artifact() {
        let tables = TablesConfig::default();
        assert_eq!(tables.package_name(TemplateId::Entity), "com.example.entity");
        assert_eq!(tables.package_name(TemplateId::Controller), "com.example.controller");
    }
}
