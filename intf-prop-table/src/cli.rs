use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "intf-prop-table")]
#[command(about = "Extract per-interface property tables from device configurations")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Parse one config and print its interface property table.
    Table(TableArgs),
    /// Show the parsed structure of a single config file.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
pub struct TableArgs {
    /// Config file to parse.
    pub file: PathBuf,
    /// Config syntax (cisco-like, junos-like).
    #[arg(short, long, value_enum, default_value_t = SyntaxArg::Ios)]
    pub syntax: SyntaxArg,
    /// Output data as CSV to stdout.
    #[arg(long)]
    pub csv: bool,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Suppress progress messages on stderr.
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Config file to inspect.
    pub file: PathBuf,
    /// Config syntax (cisco-like, junos-like).
    #[arg(short, long, value_enum, default_value_t = SyntaxArg::Ios)]
    pub syntax: SyntaxArg,
    /// Maximum depth to render.
    #[arg(long, default_value_t = 3)]
    pub depth: usize,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum SyntaxArg {
    Ios,
    Junos,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
