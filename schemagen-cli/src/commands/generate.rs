//! Source generation from a schema document
//!
//! # Example
//!
//! ```bash
//! schemagen generate --schema schema.toml \
//!   --config schemagen.toml \
//!   --output src/main/java \
//!   --artifact entity --artifact repository
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use schemagen::prelude::*;

use super::print_diff;

/// A rendered source and where it belongs
#[derive(Debug, Clone)]
pub struct PlannedFile {
    /// Destination path under the output directory
    pub path: PathBuf,
    /// Rendered source
    pub source: GeneratedSource,
}

/// Render Java sources for every selected table
#[derive(Debug, Clone, Args)]
pub struct GenerateCommand {
    /// Schema document (`.json` or `.toml`)
    #[arg(short, long)]
    pub schema: PathBuf,

    /// Config file (defaults to ./schemagen.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output root, overrides `output_dir` from the config
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory of customized `<artifact>.java.hbs` templates
    #[arg(long)]
    pub templates: Option<PathBuf>,

    /// Artifacts to generate (entity, repository, service, controller); all when omitted
    #[arg(short, long = "artifact", value_parser = parse_artifact)]
    pub artifacts: Vec<TemplateId>,

    /// Show what would change without writing files
    #[arg(long)]
    pub dry_run: bool,
}

fn parse_artifact(value: &str) -> std::result::Result<TemplateId, String> {
    value.parse().map_err(|_| {
        format!("unknown artifact '{value}', expected one of: entity, repository, service, controller")
    })
}

impl GenerateCommand {
    /// Command for `schema` with every other option at its default
    #[must_use]
    pub const fn new(schema: PathBuf) -> Self {
        Self {
            schema,
            config: None,
            output: None,
            templates: None,
            artifacts: Vec::new(),
            dry_run: false,
        }
    }

    /// Render every requested artifact without touching the output directory
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config or schema document cannot be loaded
    /// - A template cannot be loaded or fails to render
    pub fn plan(&self) -> Result<Vec<PlannedFile>> {
        let config = GeneratorConfig::load(self.config.as_deref())
            .context("Failed to load generator config")?;
        let output_dir = self.output.clone().unwrap_or_else(|| config.output_dir.clone());

        let tables = SchemaDocument::from_path(&self.schema)
            .with_context(|| format!("Failed to read schema: {}", self.schema.display()))?
            .into_tables(&config.tables_config)
            .context("Failed to convert schema document")?;

        let template_dir = self.templates.as_ref().or(config.template_dir.as_ref());
        let provider: Box<dyn TemplateProvider> = match template_dir {
            Some(dir) => Box::new(DirectoryTemplates::new(dir)),
            None => Box::new(BuiltinTemplates),
        };
        let renderer = SourceRenderer::new(provider);

        let artifacts = if self.artifacts.is_empty() {
            TemplateId::ALL.to_vec()
        } else {
            self.artifacts.clone()
        };

        let selected: Vec<_> = tables.iter().filter(|table| table.selected).collect();

        let mut planned = Vec::new();
        for table in &selected {
            let sources = renderer
                .render_artifacts(&config, table, &artifacts)
                .with_context(|| format!("Failed to render table: {}", table.table_name))?;

            planned.extend(sources.into_iter().map(|source| PlannedFile {
                path: output_dir.join(source.relative_path()),
                source,
            }));
        }

        tracing::info!(
            tables = selected.len(),
            skipped = tables.len() - selected.len(),
            files = planned.len(),
            output = %output_dir.display(),
            "rendered sources"
        );
        Ok(planned)
    }

    /// Render and write (or, with `--dry-run`, diff) every source
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails or a file cannot be written.
    pub fn execute(&self) -> Result<()> {
        println!(
            "\n{} {} {}",
            style("Generating sources from").cyan().bold(),
            style(self.schema.display()).green().bold(),
            style("...").cyan().bold()
        );

        let files = self.plan()?;

        if self.dry_run {
            for file in &files {
                preview(file)?;
            }
            println!(
                "\n{} {} files would be written",
                style("Dry run:").yellow().bold(),
                files.len()
            );
            return Ok(());
        }

        println!(
            "\n{} {} files:",
            style("Generated").green().bold(),
            files.len()
        );

        for file in &files {
            write_file(&file.path, &file.source.content)?;
            println!(
                "  {} {} ({})",
                style("✓").green(),
                style(file.path.display()).dim(),
                style(file.source.artifact).dim()
            );
        }

        println!("\n{}", style("Next steps:").cyan().bold());
        println!(
            "  1. Fill in the {} placeholders of sequence-backed keys",
            style("TODO").yellow()
        );
        println!(
            "  2. Compile the project: {}",
            style("mvn compile").yellow()
        );

        Ok(())
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))
}

fn preview(file: &PlannedFile) -> Result<()> {
    if !file.path.exists() {
        println!("  {} {}", style("new").green(), file.path.display());
        return Ok(());
    }

    let existing = fs::read_to_string(&file.path)
        .with_context(|| format!("Failed to read file: {}", file.path.display()))?;
    if existing == file.source.content {
        println!("  {} {}", style("unchanged").dim(), file.path.display());
        return Ok(());
    }

    println!("  {} {}", style("changed").yellow(), style(file.path.display()).bold());
    println!();
    print_diff(&existing, &file.source.content);
    Ok(())
}
