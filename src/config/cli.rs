use crate::domain::model::ExportFormat;
use crate::utils::logger::LogFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "badminton-split")]
#[command(about = "Split badminton court and shuttlecock costs and export shareable summaries")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the export directory from the config file
    #[arg(long, global = true)]
    pub output_path: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, value_enum, default_value = "compact", global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Split the cost of a session and export the summary
    Calculate(ExportArgs),
    /// Create a play invitation and export it
    Invite(ExportArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Input file (.toml or .json)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Formats to export, comma separated
    #[arg(long, value_enum, value_delimiter = ',', default_values_t = ExportFormat::ALL.to_vec())]
    pub format: Vec<ExportFormat>,

    /// Also copy the summary text for sharing
    #[arg(long)]
    pub share: bool,
}

impl ExportArgs {
    /// Requested formats in the order given, each at most once.
    pub fn formats(&self) -> Vec<ExportFormat> {
        let mut formats = Vec::with_capacity(self.format.len());
        for format in &self.format {
            if !formats.contains(format) {
                formats.push(*format);
            }
        }
        formats
    }
}

impl Command {
    pub fn export_args(&self) -> &ExportArgs {
        match self {
            Command::Calculate(args) | Command::Invite(args) => args,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_calculate_defaults_to_all_formats() {
        let cli =
            CliConfig::parse_from(["badminton-split", "calculate", "--input", "session.toml"]);

        assert!(matches!(cli.command, Command::Calculate(_)));
        let args = cli.command.export_args();
        assert_eq!(args.input, PathBuf::from("session.toml"));
        assert_eq!(args.format, ExportFormat::ALL.to_vec());
        assert!(!args.share);
        assert_eq!(cli.log_format, LogFormat::Compact);
    }

    #[test]
    fn test_parse_invite_with_formats_and_globals() {
        let cli = CliConfig::parse_from([
            "badminton-split",
            "invite",
            "-i",
            "invite.json",
            "--format",
            "txt,png",
            "--share",
            "--output-path",
            "./out",
            "--log-format",
            "json",
            "-v",
        ]);

        let args = cli.command.export_args();
        assert_eq!(args.format, vec![ExportFormat::Txt, ExportFormat::Png]);
        assert!(args.share);
        assert_eq!(cli.output_path.as_deref(), Some("./out"));
        assert_eq!(cli.log_format, LogFormat::Json);
        assert!(cli.verbose);
    }

    #[test]
    fn test_repeated_formats_are_exported_once() {
        let cli = CliConfig::parse_from([
            "badminton-split",
            "calculate",
            "--input",
            "session.toml",
            "--format",
            "txt,pdf,txt,pdf",
        ]);

        assert_eq!(
            cli.command.export_args().formats(),
            vec![ExportFormat::Txt, ExportFormat::Pdf]
        );
    }
}
