//! datview CLI - paint DAT table columns in the terminal
//!
//! Tables come from a JSON fixture of pre-decoded values (see
//! [`Fixture`](crate::dat::Fixture)).

use std::{ops::Range, path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};

mod paint;
mod terminal;

pub use terminal::TerminalSurface;

/// datview - render DAT table content
#[derive(Parser)]
#[command(name = "datview")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Paint one column for a window of rows
    Paint(PaintArgs),
    /// List the columns of a table
    Columns {
        /// Path to fixture file
        fixture: PathBuf,
        /// Table name
        #[arg(short, long)]
        table: String,
    },
}

/// Arguments of `datview paint`
#[derive(clap::Args, Debug)]
pub(crate) struct PaintArgs {
    /// Path to fixture file
    pub fixture: PathBuf,
    /// Table name
    #[arg(short, long)]
    pub table: String,
    /// Column name
    #[arg(short, long)]
    pub column: String,
    /// Show values through a referenced column, as TABLE:COLUMN
    #[arg(short, long, value_parser = parse_reference)]
    pub reference: Option<(String, String)>,
    /// First row to paint
    #[arg(long, default_value = "0")]
    pub offset: usize,
    /// Number of rows to paint
    #[arg(long, default_value = "20")]
    pub height: usize,
    /// Use the high-contrast palette
    #[arg(long)]
    pub high_contrast: bool,
    /// Render config JSON file
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Hex dump bytes BEGIN..END of the column instead of its values
    #[arg(long, value_parser = parse_byte_range, conflicts_with_all = ["raw_array", "reference"])]
    pub bytes: Option<Range<usize>>,
    /// Hex dump the variable data of an array column
    #[arg(long, conflicts_with = "reference")]
    pub raw_array: bool,
    /// Disable colors
    #[arg(long)]
    pub plain: bool,
}

fn parse_reference(s: &str) -> Result<(String, String), String> {
    match s.split_once(':') {
        Some((table, column)) if !table.is_empty() && !column.is_empty() => {
            Ok((table.to_string(), column.to_string()))
        }
        _ => Err(format!("expected TABLE:COLUMN, got '{s}'")),
    }
}

fn parse_byte_range(s: &str) -> Result<Range<usize>, String> {
    let (begin, end) = s
        .split_once("..")
        .ok_or_else(|| format!("expected BEGIN..END, got '{s}'"))?;
    let begin: usize = begin
        .trim()
        .parse()
        .map_err(|e| format!("invalid begin '{begin}': {e}"))?;
    let end: usize = end
        .trim()
        .parse()
        .map_err(|e| format!("invalid end '{end}': {e}"))?;
    if begin > end {
        return Err(format!("range start {begin} is past end {end}"));
    }
    Ok(begin..end)
}

/// Parse arguments and run the selected command
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Paint(args) => paint::cmd_paint(&args),
        Commands::Columns { fixture, table } => paint::cmd_columns(&fixture, &table),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn f_parse_reference() {
        assert_eq!(
            parse_reference("Words:Text").unwrap(),
            ("Words".to_string(), "Text".to_string())
        );
        assert!(parse_reference("Words").is_err());
        assert!(parse_reference(":Text").is_err());
        assert!(parse_reference("Words:").is_err());
    }

    #[test]
    fn f_parse_byte_range() {
        assert_eq!(parse_byte_range("0..4").unwrap(), 0..4);
        assert_eq!(parse_byte_range("2..2").unwrap(), 2..2);
        assert!(parse_byte_range("4..2").is_err());
        assert!(parse_byte_range("4").is_err());
        assert!(parse_byte_range("a..2").is_err());
    }

    #[test]
    fn f_cli_parses_paint() {
        let cli = Cli::try_parse_from([
            "datview",
            "paint",
            "fixture.json",
            "--table",
            "Mods",
            "--column",
            "Word",
            "--reference",
            "Words:Text",
            "--offset",
            "5",
        ])
        .unwrap();
        let Commands::Paint(args) = cli.command else {
            panic!("expected paint");
        };
        assert_eq!(args.offset, 5);
        assert_eq!(args.height, 20);
        assert_eq!(args.reference, Some(("Words".into(), "Text".into())));
    }

    #[test]
    fn f_cli_bytes_conflicts_with_reference() {
        let parsed = Cli::try_parse_from([
            "datview",
            "paint",
            "fixture.json",
            "-t",
            "Mods",
            "-c",
            "Word",
            "--bytes",
            "0..4",
            "-r",
            "Words:Text",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn f_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
