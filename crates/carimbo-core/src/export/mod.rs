pub mod xlsx;

use crate::screening::outcome::{BatchResult, DocumentResult};
use std::path::Path;
use tracing::error;

pub const YES: &str = "Sim";
pub const NO: &str = "Não";
pub const NOT_IDENTIFIED: &str = "Não identificado";
pub const NO_KEYWORDS: &str = "Nenhuma";

/// Column headers of the results table, in order.
pub const HEADERS: [&str; 9] = [
    "Código Projeto",
    "Descrição Projeto",
    "Palavras-chave encontradas",
    "Nome do Arquivo",
    "Número da Prancha",
    "Nome encontrado",
    "Prancha encontrada",
    "Arquivo assinado",
    "Projeto encontrado",
];

/// Indices into [`HEADERS`] of the yes/no columns that get coloured.
pub const CHECK_COLUMNS: [usize; 4] = [5, 6, 7, 8];

/// A batch projected onto rows of display strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Columns whose "Sim"/"Não" cells are coloured.
    pub styled_columns: Vec<usize>,
}

pub fn yes_no(value: bool) -> &'static str {
    if value {
        YES
    } else {
        NO
    }
}

/// Write the batch to an xlsx workbook at `path`, reporting failure as
/// `false`. The batch is left untouched, so the export can be retried.
pub fn try_export(batch: &BatchResult, path: &Path) -> bool {
    match xlsx::save_workbook(batch, path) {
        Ok(()) => true,
        Err(e) => {
            error!(path = %path.display(), error = %e, "workbook export failed");
            false
        }
    }
}

/// One row per document, in batch order.
pub fn project_rows(batch: &BatchResult) -> ExportTable {
    ExportTable {
        headers: HEADERS.iter().map(|h| h.to_string()).collect(),
        rows: batch.iter().map(|(name, r)| row(name, r)).collect(),
        styled_columns: CHECK_COLUMNS.to_vec(),
    }
}

fn row(name: &str, result: &DocumentResult) -> Vec<String> {
    let keywords = if result.found_keywords.is_empty() {
        NO_KEYWORDS.to_string()
    } else {
        result.found_keywords.join(", ")
    };

    vec![
        result
            .project_code
            .clone()
            .unwrap_or_else(|| NOT_IDENTIFIED.into()),
        result.project_description.clone(),
        keywords,
        name.to_string(),
        result
            .sheet_number
            .clone()
            .unwrap_or_else(|| NOT_IDENTIFIED.into()),
        yes_no(result.filename_found_in_text).into(),
        yes_no(result.sheet_number_found_in_text).into(),
        yes_no(result.marked_signed_by_filename).into(),
        yes_no(result.project_description_found_in_text).into(),
    ]
}
