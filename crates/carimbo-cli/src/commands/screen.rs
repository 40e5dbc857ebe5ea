use carimbo_core::error::CarimboError;
use carimbo_core::export;
use carimbo_core::extraction::pdftotext::PdftotextExtractor;
use carimbo_core::keywords::parse_keyword_lines;
use carimbo_core::screening::batch::{BatchDocument, BatchOptions, ProgressEvent};
use carimbo_core::screening::stats;
use carimbo_core::ScreenOptions;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

use crate::output;

pub struct ScreenArgs {
    pub inputs: Vec<PathBuf>,
    pub reference: Option<PathBuf>,
    pub keywords: Vec<String>,
    pub keywords_file: Option<PathBuf>,
    pub use_default_keywords: bool,
    pub check_filename: bool,
    pub check_sheet_number: bool,
    pub check_project_description: bool,
    pub pause_ms: u64,
    /// Per-document pdftotext limit; zero disables it.
    pub timeout_secs: u64,
    pub output_format: String,
    pub xlsx: Option<PathBuf>,
}

pub fn run(args: ScreenArgs) -> Result<(), CarimboError> {
    let reference = super::load_reference_or_default(args.reference.as_deref())?;

    // Supplemental keywords: reference defaults, then the file, then -k flags.
    let mut supplemental: Vec<String> = Vec::new();
    if args.use_default_keywords {
        supplemental.extend(reference.default_keywords.iter().cloned());
    }
    if let Some(path) = &args.keywords_file {
        let text = std::fs::read_to_string(path)?;
        supplemental.extend(parse_keyword_lines(&text));
    }
    supplemental.extend(args.keywords.iter().cloned());

    let documents = queue_documents(collect_pdf_paths(&args.inputs)?);

    if !PdftotextExtractor::is_available() {
        return Err(CarimboError::PdftotextNotFound);
    }
    let extractor = match args.timeout_secs {
        0 => PdftotextExtractor::new(),
        secs => PdftotextExtractor::with_timeout(Duration::from_secs(secs)),
    };

    let options = ScreenOptions {
        check_filename: args.check_filename,
        check_sheet_number: args.check_sheet_number,
        check_project_description: args.check_project_description,
    };
    let batch_options = BatchOptions {
        pause: Duration::from_millis(args.pause_ms),
        cancel: None,
    };

    let mut progress = |e: &ProgressEvent| {
        eprintln!(
            "[{}/{}] {:>3.0}% Processando: {}",
            e.index + 1,
            e.total,
            e.percent(),
            e.name
        );
    };

    let batch = carimbo_core::screen_batch(
        &documents,
        &extractor,
        &reference,
        &supplemental,
        options,
        &batch_options,
        &mut progress,
    )?;
    let statistics = stats::compute(&batch, &reference.registry);

    match args.output_format.as_str() {
        "json" => output::json::print_screening(&batch, &statistics)?,
        _ => output::table::print_screening(&batch, &statistics),
    }

    // Results are already on stdout, so a failed export loses nothing.
    if let Some(path) = &args.xlsx {
        if !export::try_export(&batch, path) {
            return Err(CarimboError::Export(format!(
                "workbook not written to {}",
                path.display()
            )));
        }
        eprintln!("Workbook written to {}", path.display());
    }

    Ok(())
}

/// One batch document per path, read lazily so an unreadable file only fails
/// its own result.
fn queue_documents(paths: Vec<PathBuf>) -> Vec<BatchDocument> {
    let mut seen = HashSet::new();
    paths
        .into_iter()
        .map(|path| {
            let document = BatchDocument::from_path(&path);
            if !seen.insert(document.name.clone()) {
                warn!(document = %document.name, path = %path.display(), "filename already queued, its result will be replaced");
            }
            document
        })
        .collect()
}

/// Expand the inputs into PDF file paths. Directories contribute their
/// `.pdf` entries in name order; other files are skipped with a warning.
fn collect_pdf_paths(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, CarimboError> {
    let mut paths = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let mut entries: Vec<PathBuf> = std::fs::read_dir(input)?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| p.is_file() && is_pdf(p))
                .collect();
            entries.sort();
            paths.extend(entries);
        } else if is_pdf(input) {
            paths.push(input.clone());
        } else {
            warn!(path = %input.display(), "not a PDF file, skipped");
        }
    }

    if paths.is_empty() {
        return Err(CarimboError::InvalidInput(
            "select at least one PDF file".into(),
        ));
    }

    Ok(paths)
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}
