use serde::{Deserialize, Serialize};

/// Reference tables for one screening context: who may sign, which project
/// codes exist, and the default stamp keywords.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    /// Registered engineers, in display and matching order.
    pub engineers: Vec<EngineerEntry>,
    /// Project-code dictionary. Codes must be unique.
    pub projects: Vec<ProjectEntry>,
    /// Keywords offered as the default supplemental list for a run.
    #[serde(default)]
    pub default_keywords: Vec<String>,
}

/// A signatory and the registration-number variants that identify them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineerEntry {
    pub name: String,
    pub identifiers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub code: String,
    pub description: String,
}
