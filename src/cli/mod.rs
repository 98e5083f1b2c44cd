//! Command-line interface for `yconf`.
//!
//! This module provides the CLI parsing and command routing using clap.

pub mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use yconf_lib::OutputFormat;

use crate::config::CliOverrides;
use crate::logging;

/// `yconf` - manage local YAML/JSON configuration.
#[derive(Parser, Debug)]
#[command(name = "yconf")]
#[command(
    author,
    version,
    about = "Manage local YAML/JSON configuration",
    long_about = "Manage one YAML (or JSON) configuration file per application. \
        Values are never set individually: edit the file with `edit` or replace \
        it with `write`, and read it back with `query` using jq-style selectors.",
    after_help = "Files live at <dir>/<id>/config.yaml with 0700/0600 permissions."
)]
pub struct Cli {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit logs as JSON on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Which store to operate on and how to render queries.
#[derive(Args, Debug, Clone, Default)]
pub struct StoreArgs {
    /// Configuration id (default: executable name)
    #[arg(long, global = true, env = "YCONF_ID")]
    pub id: Option<String>,

    /// Base directory (default: user config dir)
    #[arg(long, global = true, env = "YCONF_DIR")]
    pub dir: Option<String>,

    /// Config file name within the store directory
    #[arg(long, global = true, env = "YCONF_FILE")]
    pub file_name: Option<String>,

    /// Query output format: json or yaml
    #[arg(long, global = true, env = "YCONF_FORMAT", default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Evaluate queries with the external jq binary
    #[arg(long, global = true)]
    pub jq: bool,
}

impl From<&StoreArgs> for CliOverrides {
    fn from(args: &StoreArgs) -> Self {
        Self {
            id: args.id.clone(),
            dir: args.dir.clone(),
            file_name: args.file_name.clone(),
            format: args.format,
            jq: args.jq,
        }
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// (Re)initialize the configuration, destroying current content
    #[command(alias = "i")]
    Init(InitArgs),

    /// Print the full path to the configuration file
    #[command(alias = "f")]
    File,

    /// Print the configuration directory
    Dir,

    /// Print the contents of the configuration file
    #[command(alias = "d")]
    Data,

    /// Open the configuration in $VISUAL, $EDITOR, vi, vim, or nano
    #[command(alias = "e")]
    Edit,

    /// Query configuration data with a jq-style selector
    #[command(alias = "q")]
    Query(QueryArgs),

    /// Replace the whole configuration with YAML from a file or stdin
    Write(WriteArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug, Default)]
pub struct InitArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Selector such as `.`, `.name`, or `.server.port`
    pub selector: String,
}

#[derive(Args, Debug, Default)]
pub struct WriteArgs {
    /// YAML file to read (default: stdin)
    pub path: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Run the CLI.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet, cli.log_json)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    let overrides = CliOverrides::from(&cli.store);
    tracing::debug!("Running {} with {overrides:?}", cli.command.name());

    match cli.command {
        Commands::Completions(args) => commands::completions::execute(args.shell),
        Commands::Init(args) => commands::init::execute(&args, &overrides)?,
        Commands::File => commands::file::execute(&overrides),
        Commands::Dir => commands::file::execute_dir(&overrides),
        Commands::Data => commands::data::execute(&overrides)?,
        Commands::Edit => commands::edit::execute(&overrides)?,
        Commands::Query(args) => commands::query::execute(&args, &overrides)?,
        Commands::Write(args) => commands::write::execute(&args, &overrides)?,
    }

    Ok(())
}

impl Commands {
    const fn name(&self) -> &'static str {
        match self {
            Self::Init(_) => "init",
            Self::File => "file",
            Self::Dir => "dir",
            Self::Data => "data",
            Self::Edit => "edit",
            Self::Query(_) => "query",
            Self::Write(_) => "write",
            Self::Completions(_) => "completions",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_aliases_parse() {
        let cli = Cli::try_parse_from(["yconf", "q", ".name"]).unwrap();
        assert!(matches!(cli.command, Commands::Query(ref q) if q.selector == ".name"));

        let cli = Cli::try_parse_from(["yconf", "i", "--yes"]).unwrap();
        assert!(matches!(cli.command, Commands::Init(InitArgs { yes: true })));

        let cli = Cli::try_parse_from(["yconf", "f"]).unwrap();
        assert_eq!(cli.command.name(), "file");
    }

    #[test]
    fn test_global_store_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "yconf", "data", "--id", "tool", "--dir", "/tmp/cfg", "--format", "yml",
        ])
        .unwrap();
        let overrides = CliOverrides::from(&cli.store);
        assert_eq!(overrides.id.as_deref(), Some("tool"));
        assert_eq!(overrides.dir.as_deref(), Some("/tmp/cfg"));
        assert_eq!(overrides.format, OutputFormat::Yaml);
    }

    #[test]
    fn test_format_flag() {
        let cli = Cli::try_parse_from(["yconf", "query", "."]).unwrap();
        assert_eq!(cli.store.format, OutputFormat::Json);
        assert!(Cli::try_parse_from(["yconf", "query", ".", "--format", "toml"]).is_err());
    }

    #[test]
    fn test_query_requires_selector() {
        assert!(Cli::try_parse_from(["yconf", "query"]).is_err());
    }
}
