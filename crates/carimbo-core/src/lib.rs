pub mod error;
pub mod export;
pub mod extraction;
pub mod keywords;
pub mod parsing;
pub mod reference;
pub mod screening;

use error::CarimboError;
use extraction::PdfExtractor;
use keywords::KeywordIndex;
use reference::ReferenceData;
use screening::batch::{BatchDocument, BatchOptions, ProgressObserver};
use screening::engine::DocumentMatcher;
use screening::outcome::{BatchResult, DocumentResult};
use serde::{Deserialize, Serialize};

/// Which text checks run for each document. A disabled check always reports
/// `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenOptions {
    pub check_filename: bool,
    pub check_sheet_number: bool,
    pub check_project_description: bool,
}

impl Default for ScreenOptions {
    fn default() -> Self {
        ScreenOptions {
            check_filename: true,
            check_sheet_number: true,
            check_project_description: true,
        }
    }
}

/// Main API entry point: screen one PDF against a set of reference tables.
///
/// `supplemental` keywords are searched after the registry's names and
/// identifiers.
pub fn screen_pdf<S: AsRef<str>>(
    pdf_bytes: &[u8],
    name: &str,
    extractor: &dyn PdfExtractor,
    reference: &ReferenceData,
    supplemental: &[S],
    options: ScreenOptions,
) -> Result<DocumentResult, CarimboError> {
    let keywords = KeywordIndex::new(&reference.registry, supplemental);
    let matcher = DocumentMatcher::new(extractor, &keywords, &reference.projects, options);
    matcher.match_document(pdf_bytes, name)
}

/// Screen a batch of PDFs, isolating per-document failures.
///
/// Fails only when `documents` is empty.
pub fn screen_batch<S: AsRef<str>>(
    documents: &[BatchDocument],
    extractor: &dyn PdfExtractor,
    reference: &ReferenceData,
    supplemental: &[S],
    options: ScreenOptions,
    batch_options: &BatchOptions,
    observer: &mut dyn ProgressObserver,
) -> Result<BatchResult, CarimboError> {
    let keywords = KeywordIndex::new(&reference.registry, supplemental);
    let matcher = DocumentMatcher::new(extractor, &keywords, &reference.projects, options);
    screening::batch::run_batch(documents, &matcher, batch_options, observer)
}
