use crate::reference::EngineerRegistry;
use crate::screening::outcome::BatchResult;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Document counts over a finished batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub filename_found: usize,
    pub sheet_number_found: usize,
    pub marked_signed: usize,
    pub project_description_found: usize,
    pub failed: usize,
}

/// Everything the aggregator derives from a batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchStatistics {
    pub summary: BatchSummary,
    pub by_signatory: IndexMap<String, usize>,
    pub by_project: IndexMap<String, usize>,
}

pub fn compute(batch: &BatchResult, registry: &EngineerRegistry) -> BatchStatistics {
    BatchStatistics {
        summary: summarize(batch),
        by_signatory: count_by_signatory(batch, registry),
        by_project: count_by_project(batch),
    }
}

pub fn summarize(batch: &BatchResult) -> BatchSummary {
    let mut summary = BatchSummary {
        total: batch.len(),
        ..Default::default()
    };
    for result in batch.results() {
        summary.filename_found += usize::from(result.filename_found_in_text);
        summary.sheet_number_found += usize::from(result.sheet_number_found_in_text);
        summary.marked_signed += usize::from(result.marked_signed_by_filename);
        summary.project_description_found +=
            usize::from(result.project_description_found_in_text);
        summary.failed += usize::from(result.is_failed());
    }
    summary
}

/// Count matches per signatory.
///
/// Every found keyword that names a signatory, or is one of their
/// identifiers, adds one. A document showing both an engineer's name and a
/// registration number therefore counts twice for that engineer.
pub fn count_by_signatory(batch: &BatchResult, registry: &EngineerRegistry) -> IndexMap<String, usize> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for result in batch.results() {
        for keyword in &result.found_keywords {
            for name in registry.signatories_for(keyword) {
                *counts.entry(name.to_string()).or_default() += 1;
            }
        }
    }
    counts
}

/// Count documents per project, keyed `"CODE - description"`. Documents
/// without a registered project are skipped.
pub fn count_by_project(batch: &BatchResult) -> IndexMap<String, usize> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for result in batch.results() {
        if !result.has_known_project() {
            continue;
        }
        if let Some(code) = &result.project_code {
            let key = format!("{} - {}", code, result.project_description);
            *counts.entry(key).or_default() += 1;
        }
    }
    counts
}
