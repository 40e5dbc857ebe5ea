use crate::error::CarimboError;
use crate::parsing::filename::strip_extension;
use crate::reference::UNKNOWN_PROJECT;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Project description reported for documents that could not be read.
pub const PROCESSING_ERROR: &str = "Erro no processamento";

/// Screening result for a single document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentResult {
    /// Distinct keywords found in the text, in first-discovery order.
    pub found_keywords: Vec<String>,
    pub filename_found_in_text: bool,
    pub sheet_number_found_in_text: bool,
    pub marked_signed_by_filename: bool,
    pub project_description_found_in_text: bool,
    pub project_code: Option<String>,
    /// Description mapped from the project code, or "Desconhecido".
    pub project_description: String,
    pub sheet_number: Option<String>,
    /// Filename without extension and signed marker.
    pub base_file_name: String,
    /// Set only on degraded results produced for unreadable documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_error: Option<String>,
}

impl DocumentResult {
    /// Degraded result for a document whose screening failed.
    pub fn failed(name: &str, error: &CarimboError) -> Self {
        DocumentResult {
            found_keywords: Vec::new(),
            filename_found_in_text: false,
            sheet_number_found_in_text: false,
            marked_signed_by_filename: false,
            project_description_found_in_text: false,
            project_code: None,
            project_description: PROCESSING_ERROR.to_string(),
            sheet_number: None,
            base_file_name: strip_extension(name),
            processing_error: Some(error.to_string()),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.processing_error.is_some()
    }

    /// Whether the project code resolved to a registered description.
    pub fn has_known_project(&self) -> bool {
        self.project_code.is_some()
            && self.project_description != UNKNOWN_PROJECT
            && self.project_description != PROCESSING_ERROR
    }
}

/// Results of one batch run, keyed by the filename supplied for each document.
///
/// Iteration follows the order in which names were first inserted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchResult {
    pub documents: IndexMap<String, DocumentResult>,
    /// True when the run was stopped before every document was processed.
    #[serde(default)]
    pub cancelled: bool,
}

impl BatchResult {
    /// Store a result, returning the one it replaced when `name` was already
    /// present.
    pub fn insert(&mut self, name: impl Into<String>, result: DocumentResult) -> Option<DocumentResult> {
        self.documents.insert(name.into(), result)
    }

    pub fn get(&self, name: &str) -> Option<&DocumentResult> {
        self.documents.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DocumentResult)> {
        self.documents.iter().map(|(n, r)| (n.as_str(), r))
    }

    pub fn results(&self) -> impl Iterator<Item = &DocumentResult> {
        self.documents.values()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
