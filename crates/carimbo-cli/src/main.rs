mod commands;
mod output;

use carimbo_core::extraction::pdftotext::DEFAULT_TIMEOUT;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "carimbo",
    version,
    about = "Screen engineering-drawing PDFs for filename, sheet number, signatory and project stamps"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Screen PDF files (or directories of PDFs) and report what each one contains
    Screen {
        /// PDF files or directories containing PDFs
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Custom reference JSON (engineers, project codes, default keywords)
        #[arg(short, long, value_name = "FILE")]
        reference: Option<PathBuf>,

        /// Extra keyword to search for (repeatable)
        #[arg(short, long = "keyword", value_name = "TEXT")]
        keyword: Vec<String>,

        /// File with extra keywords, one per line
        #[arg(long, value_name = "FILE")]
        keywords_file: Option<PathBuf>,

        /// Do not search for the reference's default keywords
        #[arg(long)]
        no_default_keywords: bool,

        /// Skip the filename-in-text check
        #[arg(long)]
        skip_filename_check: bool,

        /// Skip the sheet-number-in-text check
        #[arg(long)]
        skip_sheet_check: bool,

        /// Skip the project-description-in-text check
        #[arg(long)]
        skip_project_check: bool,

        /// Pause between documents, in milliseconds
        #[arg(long, default_value_t = 0, value_name = "MS")]
        pause_ms: u64,

        /// Give up on a document after this many seconds in pdftotext (0: no limit)
        #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs(), value_name = "SECS")]
        timeout_secs: u64,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Also write the results to an xlsx workbook
        #[arg(long, value_name = "FILE")]
        xlsx: Option<PathBuf>,
    },
    /// Show what would be derived from filenames, without opening any PDF
    Inspect {
        /// Filenames to analyze
        #[arg(required = true)]
        names: Vec<String>,

        /// Custom reference JSON used to resolve project codes
        #[arg(short, long, value_name = "FILE")]
        reference: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Inspect and validate reference data
    Reference {
        #[command(subcommand)]
        action: ReferenceAction,
    },
}

#[derive(Subcommand)]
enum ReferenceAction {
    /// List engineers, project codes and default keywords
    Show {
        /// Custom reference JSON (default: built-in)
        #[arg(short, long, value_name = "FILE")]
        reference: Option<PathBuf>,
    },
    /// Print the JSON schema with field descriptions and example
    Schema,
    /// Validate a custom reference file
    Validate {
        /// Path to reference JSON file
        file: PathBuf,
    },
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Screen {
            inputs,
            reference,
            keyword,
            keywords_file,
            no_default_keywords,
            skip_filename_check,
            skip_sheet_check,
            skip_project_check,
            pause_ms,
            timeout_secs,
            output,
            xlsx,
        } => commands::screen::run(commands::screen::ScreenArgs {
            inputs,
            reference,
            keywords: keyword,
            keywords_file,
            use_default_keywords: !no_default_keywords,
            check_filename: !skip_filename_check,
            check_sheet_number: !skip_sheet_check,
            check_project_description: !skip_project_check,
            pause_ms,
            timeout_secs,
            output_format: output,
            xlsx,
        }),
        Commands::Inspect {
            names,
            reference,
            output,
        } => commands::inspect::run(&names, reference.as_deref(), &output),
        Commands::Reference { action } => match action {
            ReferenceAction::Show { reference } => commands::reference::show(reference.as_deref()),
            ReferenceAction::Schema => commands::reference::schema(),
            ReferenceAction::Validate { file } => commands::reference::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
