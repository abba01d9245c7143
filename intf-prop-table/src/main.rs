use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use conf_tree_core::{parse_file, Syntax};
use intf_prop_table::inspect::render_tree;
use intf_prop_table::render::{render_csv, render_table, TableReport};
use intf_prop_table::table::parse_config;

mod cli;

use cli::{Cli, Command, InspectArgs, OutputFormat, SyntaxArg, TableArgs};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Table(args) => run_table(args),
        Command::Inspect(args) => run_inspect(args),
    }
}

fn run_table(args: TableArgs) -> Result<()> {
    let text = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    if !args.quiet {
        eprintln!("{}", format!("# Parse config = {}", args.file.display()).cyan());
    }

    let table = parse_config(&text, syntax_of(args.syntax))
        .with_context(|| format!("failed to parse {}", args.file.display()))?;
    if !args.quiet {
        eprintln!("{}", format!("# Hostname = {}", table.hostname()).cyan());
    }

    if args.csv {
        print!("{}", render_csv(&table.rows())?);
        return Ok(());
    }
    match args.format {
        OutputFormat::Text => println!("{}", render_table(&table.rows())),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&TableReport::new(&table))?
        ),
    }

    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    let tree = parse_file(&args.file, syntax_of(args.syntax))
        .with_context(|| format!("failed to parse {}", args.file.display()))?;

    match args.format {
        OutputFormat::Text => print!("{}", render_tree(&tree, args.depth)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&tree)?),
    }

    Ok(())
}

fn syntax_of(arg: SyntaxArg) -> Syntax {
    match arg {
        SyntaxArg::Ios => Syntax::Ios,
        SyntaxArg::Junos => Syntax::Junos,
    }
}
