pub mod pdftotext;

use crate::error::CarimboError;

/// Text extracted from a single page of a PDF.
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    pub page_number: usize,
    /// Text items of the page in reading order.
    pub lines: Vec<String>,
}

impl PageContent {
    pub fn new(page_number: usize, lines: Vec<String>) -> Self {
        PageContent { page_number, lines }
    }

    /// Page text as one string: items joined with single spaces, newlines
    /// flattened to spaces.
    pub fn joined_text(&self) -> String {
        self.lines.join(" ").replace('\n', " ")
    }
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract text content from PDF bytes, returning one PageContent per page
    /// in document order.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, CarimboError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
