//! Manifest command implementation.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum, ValueHint};
use longecho_core::{
    find_manifest, load_manifest_data, save_manifest, validate_manifest_data, ComplianceChecker,
    Manifest, ManifestError, ManifestFormat,
};
use tracing::info;

use crate::cli::{CommandContext, OutputFormat};
use crate::commands::require_dir;
use crate::error::CliError;
use crate::output::Output;

/// Create or validate archive manifests
#[derive(Debug, Parser)]
pub struct ManifestCommands {
    #[command(subcommand)]
    pub command: ManifestCommand,
}

#[derive(Debug, Subcommand)]
pub enum ManifestCommand {
    /// Write a minimal manifest into a directory
    Init(InitArgs),

    /// Validate a manifest file, or the manifest found in a directory
    Validate(ValidateArgs),
}

/// Manifest file encoding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ManifestEncoding {
    #[default]
    Json,
    Yaml,
}

impl From<ManifestEncoding> for ManifestFormat {
    fn from(encoding: ManifestEncoding) -> Self {
        match encoding {
            ManifestEncoding::Json => ManifestFormat::Json,
            ManifestEncoding::Yaml => ManifestFormat::Yaml,
        }
    }
}

#[derive(Debug, Parser)]
pub struct InitArgs {
    /// Directory to write the manifest into
    #[arg(value_hint = ValueHint::DirPath)]
    pub path: PathBuf,

    /// Archive name (defaults to the README title or directory name)
    #[arg(long)]
    pub name: Option<String>,

    /// Archive description (defaults to the README summary)
    #[arg(long)]
    pub description: Option<String>,

    /// Manifest encoding
    #[arg(long, value_enum, default_value = "json")]
    pub manifest_format: ManifestEncoding,

    /// Overwrite an existing manifest
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Parser)]
pub struct ValidateArgs {
    /// Manifest file or directory containing one
    #[arg(value_hint = ValueHint::AnyPath)]
    pub path: PathBuf,
}

impl ManifestCommands {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        match &self.command {
            ManifestCommand::Init(args) => args.execute(ctx),
            ManifestCommand::Validate(args) => args.execute(ctx),
        }
    }
}

impl InitArgs {
    fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        require_dir(&self.path)?;

        if let Some(existing) = find_manifest(&self.path) {
            if !self.force {
                return Err(CliError::Validation {
                    message: format!(
                        "manifest already exists: {} (use --force to overwrite)",
                        existing.display()
                    ),
                    errors: Vec::new(),
                });
            }
        }

        let manifest = self.build_manifest(ctx);
        let written = save_manifest(&manifest, &self.path, self.manifest_format.into())?;
        info!(path = %written.display(), "manifest written");

        let out = Output::new(ctx);
        match out.format() {
            OutputFormat::Json => out.json(&serde_json::json!({
                "path": written,
                "manifest": manifest,
            })),
            _ => out.line(format!("{} Created {}", out.icons().check(), written.display())),
        }
    }

    /// Flags first, then what the directory's README says, then its name.
    fn build_manifest(&self, ctx: &CommandContext) -> Manifest {
        let source = ComplianceChecker::new(&ctx.policy)
            .check(&self.path)
            .into_source();

        let name = self
            .name
            .clone()
            .or_else(|| source.as_ref().map(|s| s.name.clone()))
            .unwrap_or_else(|| dir_name(&self.path));
        let description = self
            .description
            .clone()
            .or_else(|| source.map(|s| s.description))
            .unwrap_or_default();

        Manifest::minimal(name, description)
    }
}

fn dir_name(path: &Path) -> String {
    let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl ValidateArgs {
    fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let file = self.manifest_file()?;
        let errors = match load_manifest_data(&file) {
            Ok(data) => validate_manifest_data(&data),
            Err(e @ (ManifestError::Json { .. } | ManifestError::Yaml { .. })) => {
                vec![e.to_string()]
            }
            Err(e) => return Err(e.into()),
        };

        let out = Output::new(ctx);
        let icons = out.icons();
        match out.format() {
            OutputFormat::Json => out.json(&serde_json::json!({
                "path": file,
                "valid": errors.is_empty(),
                "errors": errors,
            }))?,
            _ if errors.is_empty() => {
                out.line(format!("{} Valid manifest: {}", icons.check(), file.display()))?
            }
            _ => {
                out.line(format!("{} Invalid manifest: {}", icons.cross(), file.display()))?;
                for error in &errors {
                    out.line(format!("  {} {error}", icons.bullet()))?;
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(CliError::Validation {
                message: format!("invalid manifest at {}", file.display()),
                errors,
            })
        }
    }

    fn manifest_file(&self) -> Result<PathBuf, CliError> {
        if self.path.is_file() {
            return Ok(self.path.clone());
        }
        require_dir(&self.path)?;
        find_manifest(&self.path).ok_or_else(|| CliError::NotFound {
            message: format!("no manifest found in {}", self.path.display()),
            path: self.path.clone(),
        })
    }
}
