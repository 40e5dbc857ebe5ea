use crate::error::CarimboError;
use crate::extraction::{PageContent, PdfExtractor};
use crate::keywords::KeywordIndex;
use crate::parsing::filename::{self, FilenameFacts};
use crate::reference::{ProjectCodeMap, UNKNOWN_PROJECT};
use crate::screening::outcome::DocumentResult;
use crate::ScreenOptions;
use tracing::debug;

/// Screens single documents against one keyword index and project map.
pub struct DocumentMatcher<'a> {
    extractor: &'a dyn PdfExtractor,
    keywords: &'a KeywordIndex,
    projects: &'a ProjectCodeMap,
    options: ScreenOptions,
}

impl<'a> DocumentMatcher<'a> {
    pub fn new(
        extractor: &'a dyn PdfExtractor,
        keywords: &'a KeywordIndex,
        projects: &'a ProjectCodeMap,
        options: ScreenOptions,
    ) -> Self {
        DocumentMatcher {
            extractor,
            keywords,
            projects,
            options,
        }
    }

    pub fn options(&self) -> &ScreenOptions {
        &self.options
    }

    /// Extract the text of `pdf_bytes` and screen it.
    ///
    /// Fails only with [`CarimboError::DocumentRead`], when the extraction
    /// backend cannot read the document.
    pub fn match_document(&self, pdf_bytes: &[u8], name: &str) -> Result<DocumentResult, CarimboError> {
        let pages = self
            .extractor
            .extract_pages(pdf_bytes)
            .map_err(|e| into_read_error(name, e))?;
        debug!(
            document = name,
            backend = self.extractor.backend_name(),
            pages = pages.len(),
            "extracted text"
        );
        Ok(self.match_pages(&pages, name))
    }

    /// Screen already-extracted pages.
    pub fn match_pages(&self, pages: &[PageContent], name: &str) -> DocumentResult {
        let facts = filename::analyze(name);
        let project_description = self.projects.describe(facts.project_code.as_deref());

        let mut scan = PageScan::new(&facts, project_description, self.keywords, &self.options);
        for page in pages {
            scan.scan(&page.joined_text());
        }

        DocumentResult {
            found_keywords: scan.found_keywords,
            filename_found_in_text: scan.filename_found,
            sheet_number_found_in_text: scan.sheet_number_found,
            marked_signed_by_filename: facts.marked_signed,
            project_description_found_in_text: scan.project_found,
            project_code: facts.project_code,
            project_description: project_description.to_string(),
            sheet_number: facts.sheet_number,
            base_file_name: facts.base_name,
            processing_error: None,
        }
    }
}

fn into_read_error(name: &str, e: CarimboError) -> CarimboError {
    match e {
        CarimboError::DocumentRead { .. } => e,
        other => CarimboError::DocumentRead {
            name: name.to_string(),
            reason: other.to_string(),
        },
    }
}

/// Accumulates matches page by page. Every flag only ever goes from false to
/// true.
struct PageScan<'a> {
    base_name: Option<String>,
    sheet_variants: Vec<String>,
    project_description: Option<&'a str>,
    keywords: &'a [String],

    found_keywords: Vec<String>,
    filename_found: bool,
    sheet_number_found: bool,
    project_found: bool,
}

impl<'a> PageScan<'a> {
    fn new(
        facts: &FilenameFacts,
        project_description: &'a str,
        keywords: &'a KeywordIndex,
        options: &ScreenOptions,
    ) -> Self {
        let base_name = Some(facts.base_name.clone())
            .filter(|n| options.check_filename && !n.is_empty());

        let sheet_variants = match &facts.sheet_number {
            Some(sheet) if options.check_sheet_number => sheet_variants(sheet),
            _ => Vec::new(),
        };

        let project_description = Some(project_description).filter(|d| {
            options.check_project_description
                && facts.project_code.is_some()
                && *d != UNKNOWN_PROJECT
        });

        PageScan {
            base_name,
            sheet_variants,
            project_description,
            keywords: keywords.all_keywords(),
            found_keywords: Vec::new(),
            filename_found: false,
            sheet_number_found: false,
            project_found: false,
        }
    }

    fn scan(&mut self, text: &str) {
        if let Some(base_name) = &self.base_name {
            if text.contains(base_name.as_str()) {
                self.filename_found = true;
            }
        }

        if self.sheet_variants.iter().any(|v| text.contains(v.as_str())) {
            self.sheet_number_found = true;
        }

        if let Some(description) = self.project_description {
            if text.contains(description) {
                self.project_found = true;
            }
        }

        for keyword in self.keywords {
            if text.contains(keyword.as_str()) && !self.found_keywords.contains(keyword) {
                self.found_keywords.push(keyword.clone());
            }
        }
    }
}

/// The sheet number as extracted plus its `_` and `-` spellings. Only the
/// first space is replaced.
fn sheet_variants(sheet: &str) -> Vec<String> {
    vec![
        sheet.to_string(),
        sheet.replacen(' ', "_", 1),
        sheet.replacen(' ', "-", 1),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::schema::{EngineerEntry, ProjectEntry};
    use crate::reference::EngineerRegistry;

    struct NoExtractor;

    impl PdfExtractor for NoExtractor {
        fn extract_pages(&self, _pdf_bytes: &[u8]) -> Result<Vec<PageContent>, CarimboError> {
            Err(CarimboError::PdftotextFailed {
                code: 1,
                stderr: "Syntax Error: Couldn't find trailer dictionary".into(),
            })
        }

        fn backend_name(&self) -> &str {
            "none"
        }
    }

    fn keywords(supplemental: &[&str]) -> KeywordIndex {
        let registry = EngineerRegistry::new(vec![EngineerEntry {
            name: "FLAVIO SORDI".into(),
            identifiers: vec!["2201136580".into()],
        }]);
        KeywordIndex::new(&registry, supplemental)
    }

    fn projects() -> ProjectCodeMap {
        ProjectCodeMap::new(vec![ProjectEntry {
            code: "ECX".into(),
            description: "PROJETO ELÉTRICO DE CLIMATIZAÇÃO".into(),
        }])
    }

    fn page(number: usize, text: &str) -> PageContent {
        PageContent::new(number, vec![text.to_string()])
    }

    #[test]
    fn test_sheet_variants() {
        assert_eq!(sheet_variants("01 07"), vec!["01 07", "01_07", "01-07"]);
    }

    #[test]
    fn test_all_checks_hit() {
        let keywords = keywords(&["SEINF"]);
        let projects = projects();
        let matcher = DocumentMatcher::new(&NoExtractor, &keywords, &projects, ScreenOptions::default());
        let pages = vec![page(
            1,
            "PRJ-ECX-01_07 PROJETO ELÉTRICO DE CLIMATIZAÇÃO PRANCHA 01-07 FLAVIO SORDI SEINF",
        )];

        let result = matcher.match_pages(&pages, "PRJ-ECX-01_07_assinado.pdf");
        assert!(result.filename_found_in_text);
        assert!(result.sheet_number_found_in_text);
        assert!(result.project_description_found_in_text);
        assert!(result.marked_signed_by_filename);
        assert_eq!(result.found_keywords, vec!["FLAVIO SORDI", "SEINF"]);
        assert_eq!(result.project_code.as_deref(), Some("ECX"));
        assert_eq!(result.sheet_number.as_deref(), Some("01 07"));
        assert_eq!(result.base_file_name, "PRJ-ECX-01_07");
        assert_eq!(result.processing_error, None);
    }

    #[test]
    fn test_disabled_checks_force_false() {
        let keywords = keywords(&[]);
        let projects = projects();
        let options = ScreenOptions {
            check_filename: false,
            check_sheet_number: false,
            check_project_description: false,
        };
        let matcher = DocumentMatcher::new(&NoExtractor, &keywords, &projects, options);
        let pages = vec![page(1, "PRJ-ECX-01_07 01 07 PROJETO ELÉTRICO DE CLIMATIZAÇÃO")];

        let result = matcher.match_pages(&pages, "PRJ-ECX-01_07.pdf");
        assert!(!result.filename_found_in_text);
        assert!(!result.sheet_number_found_in_text);
        assert!(!result.project_description_found_in_text);
        // Facts derived from the filename are still reported.
        assert_eq!(result.sheet_number.as_deref(), Some("01 07"));
        assert_eq!(result.project_code.as_deref(), Some("ECX"));
    }

    #[test]
    fn test_unknown_project_is_never_searched() {
        let keywords = keywords(&[]);
        let projects = projects();
        let matcher = DocumentMatcher::new(&NoExtractor, &keywords, &projects, ScreenOptions::default());
        let pages = vec![page(1, "Desconhecido")];

        let result = matcher.match_pages(&pages, "PRJ-XYZ-01_07.pdf");
        assert_eq!(result.project_code.as_deref(), Some("XYZ"));
        assert_eq!(result.project_description, UNKNOWN_PROJECT);
        assert!(!result.project_description_found_in_text);
    }

    #[test]
    fn test_keywords_deduplicated_in_discovery_order() {
        let keywords = keywords(&["SEINF", "FLAVIO SORDI", "SEINF"]);
        let projects = projects();
        let matcher = DocumentMatcher::new(&NoExtractor, &keywords, &projects, ScreenOptions::default());
        let pages = vec![page(1, "SEINF"), page(2, "2201136580 FLAVIO SORDI SEINF")];

        let result = matcher.match_pages(&pages, "sem_prancha.pdf");
        assert_eq!(result.found_keywords, vec!["SEINF", "FLAVIO SORDI", "2201136580"]);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let keywords = keywords(&["SEINF"]);
        let projects = projects();
        let matcher = DocumentMatcher::new(&NoExtractor, &keywords, &projects, ScreenOptions::default());
        let pages = vec![page(1, "seinf flavio sordi prj-ecx-01_07")];

        let result = matcher.match_pages(&pages, "PRJ-ECX-01_07.pdf");
        assert!(result.found_keywords.is_empty());
        assert!(!result.filename_found_in_text);
    }

    #[test]
    fn test_flags_stay_true_across_pages() {
        let keywords = keywords(&[]);
        let projects = projects();
        let matcher = DocumentMatcher::new(&NoExtractor, &keywords, &projects, ScreenOptions::default());
        let pages = vec![
            page(1, "PRJ-ECX-01_07 01_07"),
            page(2, "nothing here"),
            page(3, ""),
        ];

        let result = matcher.match_pages(&pages, "PRJ-ECX-01_07.pdf");
        assert!(result.filename_found_in_text);
        assert!(result.sheet_number_found_in_text);
    }

    #[test]
    fn test_newlines_inside_items_become_spaces() {
        let keywords = keywords(&[]);
        let projects = projects();
        let matcher = DocumentMatcher::new(&NoExtractor, &keywords, &projects, ScreenOptions::default());
        let pages = vec![PageContent::new(1, vec!["FLAVIO\nSORDI".to_string()])];

        let result = matcher.match_pages(&pages, "x.pdf");
        assert_eq!(result.found_keywords, vec!["FLAVIO SORDI"]);
    }

    #[test]
    fn test_extraction_failure_is_document_read_error() {
        let keywords = keywords(&[]);
        let projects = projects();
        let matcher = DocumentMatcher::new(&NoExtractor, &keywords, &projects, ScreenOptions::default());

        let err = matcher.match_document(b"not a pdf", "broken.pdf").unwrap_err();
        match err {
            CarimboError::DocumentRead { name, reason } => {
                assert_eq!(name, "broken.pdf");
                assert!(reason.contains("trailer"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
