//! cardclean CLI - Clean a business-card CSV export
//!
//! ```bash
//! cardclean                          # Prompt for the file name
//! cardclean cards                    # Clean cards.csv into "Clean cards.csv"
//! cardclean cards --no-index         # Omit the leading row-index column
//! cardclean inspect cards            # Dump the loaded table as JSON
//! ```

use cardclean::logs::{log_error, LOGGER};
use cardclean::{clean_file, input_path, parse_file, CleanOptions};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "cardclean")]
#[command(about = "Deduplicate, normalize and relabel business-card CSV files", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    clean: CleanArgs,
}

#[derive(Args)]
struct CleanArgs {
    /// Input file name without the .csv extension (prompted if omitted).
    /// `inspect` always selects the subcommand; to clean `inspect.csv`,
    /// omit NAME and type it at the prompt.
    name: Option<String>,

    /// Directory for the cleaned file (default: next to the input)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Do not write the leading row-index column
    #[arg(long)]
    no_index: bool,

    /// CSV delimiter (auto-detect if not specified)
    #[arg(short, long)]
    delimiter: Option<char>,

    /// Suppress progress output
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a CSV file and print the raw table as JSON
    Inspect {
        /// Input file name without the .csv extension
        name: String,

        /// CSV delimiter (auto-detect if not specified)
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Inspect {
            name,
            delimiter,
            output,
        }) => cmd_inspect(&name, delimiter, output.as_deref()),

        None => cmd_clean(cli.clean),
    };

    if let Err(e) = result {
        log_error(format!("Error: {}", e));
        std::process::exit(1);
    }
}

fn cmd_clean(args: CleanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let options = merge_options(CleanOptions::from_env(), &args);
    LOGGER.set_quiet(options.quiet);

    let name = match args.name {
        Some(name) => name,
        None => prompt_filename()?,
    };

    let summary = clean_file(&input_path(&name), &options)?;

    if !options.quiet {
        eprintln!(
            "\n✨ Done! {} of {} rows written",
            summary.report.rows_written, summary.report.rows_read
        );
    }
    Ok(())
}

fn cmd_inspect(
    name: &str,
    delimiter: Option<char>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = parse_file(input_path(name), delimiter)?;
    let row_count = result.table.len();

    let report = json!({
        "encoding": result.encoding,
        "delimiter": result.delimiter.to_string(),
        "headers": result.table.headers,
        "rowCount": row_count,
        "rows": result.table.rows,
    });

    let json = serde_json::to_string_pretty(&report)?;
    write_output(&json, output)?;
    Ok(())
}

/// Apply command-line flags on top of environment defaults.
fn merge_options(mut options: CleanOptions, args: &CleanArgs) -> CleanOptions {
    if let Some(dir) = &args.output_dir {
        options.output_dir = Some(dir.clone());
    }
    if args.no_index {
        options.write_index = false;
    }
    if args.delimiter.is_some() {
        options.delimiter = args.delimiter;
    }
    if args.quiet {
        options.quiet = true;
    }
    options
}

fn prompt_filename() -> Result<String, Box<dyn std::error::Error>> {
    print!("Enter the filename that needs cleaning: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;

    let name = line.trim();
    if name.is_empty() {
        return Err("No filename entered".into());
    }
    Ok(name.to_string())
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
