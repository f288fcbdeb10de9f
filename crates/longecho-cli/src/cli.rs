//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};
use longecho_common_config::{ConfigLoader, LongechoConfig};
use longecho_core::CompliancePolicy;
use tracing::debug;

use crate::commands::{
    ArchiveCommand, BuildCommand, CheckCommand, DiscoverCommand, FormatsCommand, InfoCommand,
    ManifestCommands, SearchCommand,
};
use crate::error::CliError;

/// longecho - ECHO compliance checking and discovery
///
/// Checks that archive directories carry a README and durable data, finds
/// them across a tree, manages their manifests and renders archives into
/// static sites.
#[derive(Debug, Parser)]
#[command(
    name = "longecho",
    author,
    version,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase verbosity level"
    )]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(
        short,
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Suppress non-error output"
    )]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(
        short,
        long,
        global = true,
        env = "LONGECHO_CONFIG",
        value_hint = ValueHint::FilePath,
        help = "Path to configuration file"
    )]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        global = true,
        default_value = "text",
        value_enum,
        help = "Output format (text, json, table)"
    )]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Table,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check if a directory is ECHO-compliant
    Check(CheckCommand),

    /// Find ECHO-compliant directories under a root path
    Discover(DiscoverCommand),

    /// Search ECHO sources by README content
    Search(SearchCommand),

    /// Show detailed information about an ECHO source
    Info(InfoCommand),

    /// List recognized durable formats
    Formats(FormatsCommand),

    /// Summarize an archive and its sub-sources
    Archive(ArchiveCommand),

    /// Create or validate archive manifests
    Manifest(ManifestCommands),

    /// Build a static HTML site for an archive
    Build(BuildCommand),
}

impl Cli {
    /// Load configuration from `--config` or `.longecho/config.yaml` in the
    /// current directory.
    pub fn load_config(&self) -> Result<LongechoConfig, CliError> {
        let loader = match &self.config {
            Some(path) => ConfigLoader::from_file(path),
            None => ConfigLoader::default(),
        };
        debug!(path = %loader.path().display(), "loading configuration");
        Ok(loader.load()?)
    }

    /// Execute the selected command
    pub fn execute(self, config: LongechoConfig) -> Result<(), CliError> {
        let ctx = CommandContext::new(config, self.format, self.quiet);

        match self.command {
            Command::Check(cmd) => cmd.execute(&ctx),
            Command::Discover(cmd) => cmd.execute(&ctx),
            Command::Search(cmd) => cmd.execute(&ctx),
            Command::Info(cmd) => cmd.execute(&ctx),
            Command::Formats(cmd) => cmd.execute(&ctx),
            Command::Archive(cmd) => cmd.execute(&ctx),
            Command::Manifest(cmd) => cmd.execute(&ctx),
            Command::Build(cmd) => cmd.execute(&ctx),
        }
    }
}

/// Context passed to all commands
#[derive(Debug)]
pub struct CommandContext {
    pub config: LongechoConfig,
    pub policy: CompliancePolicy,
    pub format: OutputFormat,
    pub quiet: bool,
}

impl CommandContext {
    pub fn new(config: LongechoConfig, format: OutputFormat, quiet: bool) -> Self {
        Self {
            policy: policy_from_config(&config),
            config,
            format,
            quiet,
        }
    }

    /// Discovery depth: the flag wins over the config file.
    pub fn max_depth(&self, flag: Option<usize>) -> Option<usize> {
        flag.or(self.config.discovery.max_depth)
    }
}

/// Extend the built-in policy with configured additions.
pub fn policy_from_config(config: &LongechoConfig) -> CompliancePolicy {
    let settings = &config.policy;
    let mut policy = CompliancePolicy::default();

    for ext in &settings.extra_durable_extensions {
        policy = policy.with_durable_extension(ext);
    }
    for name in &settings.extra_skip_directories {
        policy = policy.with_skip_directory(name.as_str());
    }
    for name in &settings.extra_excluded_files {
        policy = policy.with_excluded_file(name.as_str());
    }
    if let Some(depth) = settings.format_scan_depth {
        policy = policy.with_format_scan_depth(depth);
    }
    if let Some(length) = settings.summary_max_length {
        policy = policy.with_summary_max_length(length);
    }
    policy
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_policy_from_config() {
        let mut config = LongechoConfig::default();
        config.policy.extra_durable_extensions = vec!["parquet".into()];
        config.policy.extra_skip_directories = vec!["target".into()];
        config.policy.format_scan_depth = Some(4);

        let policy = policy_from_config(&config);
        assert!(policy.is_durable(".parquet"));
        assert!(policy.is_durable(".json"));
        assert!(policy.should_skip_directory("target"));
        assert_eq!(policy.format_scan_depth(), 4);
        assert_eq!(policy.summary_max_length(), 500);
    }

    #[test]
    fn test_default_config_is_builtin_policy() {
        let policy = policy_from_config(&LongechoConfig::default());
        assert_eq!(&policy, CompliancePolicy::builtin());
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::parse_from(["longecho", "--format", "json", "-vv", "formats"]);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::Formats(_)));
    }
}
