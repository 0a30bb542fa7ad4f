use clap::{Args, Parser, Subcommand, ValueEnum};

/// Shared output mode across all commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

/// Top-level CLI parser for the `plift` binary.
#[derive(Debug, Parser)]
#[command(name = "plift", version, about = "Planlift - project plan migration")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Migrate one project into the target platform
    Import(ImportArgs),
    /// Fetch and validate a source export without touching the target
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Project reference in the source system, or a path to a JSON export
    pub source: String,

    /// Existing destination workspace id (default: a workspace named after
    /// the project)
    #[arg(long)]
    pub destination: Option<u64>,

    /// Rehearse the full run against an in-memory target; the platform sees
    /// no traffic
    #[arg(long)]
    pub dry_run: bool,

    /// Clear placeholder rows from pre-structured template sheets before
    /// populating them
    #[arg(long)]
    pub clear_placeholders: bool,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Project reference in the source system, or a path to a JSON export
    pub source: String,
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["plift", "--format", "json", "--quiet", "validate", "p1"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Validate(_)));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["plift", "import", "p1", "--dry-run", "--format", "json"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Json);
        let Commands::Import(args) = cli.command else {
            panic!("expected import");
        };
        assert!(args.dry_run);
        assert_eq!(args.source, "p1");
        assert_eq!(args.destination, None);
    }

    #[test]
    fn destination_takes_a_workspace_id() {
        let cli = Cli::try_parse_from(["plift", "import", "p1", "--destination", "4242"])
            .expect("cli should parse");
        let Commands::Import(args) = cli.command else {
            panic!("expected import");
        };
        assert_eq!(args.destination, Some(4242));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["plift", "--format", "xml", "validate", "p1"]);
        assert!(parsed.is_err());
    }
}
