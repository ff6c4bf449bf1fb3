//! Template management commands
//!
//! - `list` - Show the templates and whether a directory customizes them
//! - `export` - Write the built-in templates into a directory for editing
//! - `diff` - Show how customized templates differ from the built-ins

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use console::{style, Emoji};
use schemagen::template::{BuiltinTemplates, DirectoryTemplates, TemplateId};

use super::print_diff;

static CHECK: Emoji<'_, '_> = Emoji("✓ ", "");
static FOLDER: Emoji<'_, '_> = Emoji("📁 ", "");
static FILE: Emoji<'_, '_> = Emoji("📄 ", "");
static CUSTOM: Emoji<'_, '_> = Emoji("✨ ", "");
static DEFAULT: Emoji<'_, '_> = Emoji("  ", "");

/// Template management subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum TemplatesCommand {
    /// List all templates and their status
    List {
        /// Directory of customized templates
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Write the built-in templates into a directory
    Export {
        /// Target directory
        dir: PathBuf,
        /// Overwrite templates that already exist
        #[arg(long)]
        force: bool,
    },
    /// Show diff between customized and built-in templates
    Diff {
        /// Directory of customized templates
        dir: PathBuf,
        /// Only this template (entity, repository, service, controller)
        #[arg(long, value_parser = parse_template)]
        template: Option<TemplateId>,
    },
}

fn parse_template(value: &str) -> std::result::Result<TemplateId, String> {
    value.parse().map_err(|_| {
        format!("unknown template '{value}', expected one of: entity, repository, service, controller")
    })
}

impl TemplatesCommand {
    /// Execute the templates command
    ///
    /// # Errors
    ///
    /// Returns error if template operation fails.
    pub fn execute(self) -> Result<()> {
        match self {
            Self::List { dir } => {
                list_templates(dir.as_deref());
                Ok(())
            }
            Self::Export { dir, force } => export_templates(&dir, force),
            Self::Diff { dir, template } => diff_templates(&dir, template),
        }
    }
}

/// List templates and their customization status
fn list_templates(dir: Option<&Path>) {
    println!("{FOLDER}Source Templates");
    println!();

    let templates = dir.map(DirectoryTemplates::new);
    if let Some(templates) = &templates {
        println!("  Directory: {}", style(templates.root().display()).cyan());
        println!();
    }

    let mut total_customized = 0;
    for id in TemplateId::ALL {
        let customized = templates
            .as_ref()
            .is_some_and(|templates| templates.is_customized(id));
        if customized {
            println!("  {CUSTOM}{}", style(id.file_name()).yellow());
            total_customized += 1;
        } else {
            println!("  {DEFAULT}{}", style(id.file_name()).dim());
        }
    }

    println!();
    println!(
        "  {} customized, {} built-in",
        style(total_customized).yellow(),
        style(TemplateId::ALL.len() - total_customized).dim()
    );
}

/// Write the built-in templates to `dir`
fn export_templates(dir: &Path, force: bool) -> Result<()> {
    let written = DirectoryTemplates::new(dir)
        .export_defaults(force)
        .with_context(|| format!("Failed to export templates to {}", dir.display()))?;

    for path in &written {
        println!("  {CHECK}{}", style(path.display()).green());
    }

    let skipped = TemplateId::ALL.len() - written.len();
    if skipped > 0 {
        println!(
            "  {} existing templates kept (use {} to overwrite)",
            skipped,
            style("--force").yellow()
        );
    }

    println!();
    println!("To render with your templates:");
    println!(
        "  {} {}",
        style("schemagen generate --schema <file> --templates").cyan(),
        style(dir.display()).yellow()
    );

    Ok(())
}

/// Show diffs for customized templates in `dir`
fn diff_templates(dir: &Path, only: Option<TemplateId>) -> Result<()> {
    let templates = DirectoryTemplates::new(dir);
    let ids: Vec<_> = only.map_or_else(|| TemplateId::ALL.to_vec(), |id| vec![id]);

    let mut found_any = false;
    for id in ids {
        if !templates.is_customized(id) {
            if only.is_some() {
                anyhow::bail!("Template '{id}' is not customized in {}", dir.display());
            }
            continue;
        }
        found_any = true;

        let path = templates.path_for(id);
        let custom = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read template: {}", path.display()))?;

        println!("{FILE}{}", style(id.file_name()).bold());
        println!();
        if custom == BuiltinTemplates::text(id) {
            println!("  {}", style("identical to built-in").dim());
            println!();
        } else {
            print_diff(BuiltinTemplates::text(id), &custom);
        }
    }

    if !found_any {
        println!("No customized templates found.");
    }

    Ok(())
}
