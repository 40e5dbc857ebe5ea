pub mod builtin;
pub mod schema;

use crate::error::CarimboError;
use crate::screening::outcome::PROCESSING_ERROR;
use indexmap::IndexMap;
use schema::{EngineerEntry, ProjectEntry, ReferenceDef};
use std::collections::HashSet;
use std::path::Path;

/// Description reported for project codes missing from the dictionary.
pub const UNKNOWN_PROJECT: &str = "Desconhecido";

/// Registered signatories, in the order they were declared.
#[derive(Debug, Clone, Default)]
pub struct EngineerRegistry {
    entries: Vec<EngineerEntry>,
}

impl EngineerRegistry {
    pub fn new(entries: Vec<EngineerEntry>) -> Self {
        EngineerRegistry { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = &EngineerEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Signatories identified by `keyword`, either by name or by one of their
    /// registration numbers.
    pub fn signatories_for<'a>(&'a self, keyword: &'a str) -> impl Iterator<Item = &'a str> {
        self.entries
            .iter()
            .filter(move |e| e.name == keyword || e.identifiers.iter().any(|id| id == keyword))
            .map(|e| e.name.as_str())
    }
}

/// Project code -> description lookup.
#[derive(Debug, Clone, Default)]
pub struct ProjectCodeMap {
    codes: IndexMap<String, String>,
}

impl ProjectCodeMap {
    pub fn new(entries: impl IntoIterator<Item = ProjectEntry>) -> Self {
        ProjectCodeMap {
            codes: entries
                .into_iter()
                .map(|p| (p.code, p.description))
                .collect(),
        }
    }

    /// Description for `code`, or [`UNKNOWN_PROJECT`] when the code is absent
    /// or not registered.
    pub fn describe(&self, code: Option<&str>) -> &str {
        code.and_then(|c| self.codes.get(c))
            .map(|d| d.as_str())
            .unwrap_or(UNKNOWN_PROJECT)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.codes.iter().map(|(c, d)| (c.as_str(), d.as_str()))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// Validated, immutable reference tables for a screening run.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub name: String,
    pub description: Option<String>,
    pub version: String,
    pub registry: EngineerRegistry,
    pub projects: ProjectCodeMap,
    pub default_keywords: Vec<String>,
}

impl From<ReferenceDef> for ReferenceData {
    fn from(def: ReferenceDef) -> Self {
        ReferenceData {
            name: def.name,
            description: def.description,
            version: def.version,
            registry: EngineerRegistry::new(def.engineers),
            projects: ProjectCodeMap::new(def.projects),
            default_keywords: def.default_keywords,
        }
    }
}

/// Load reference data from a JSON file.
pub fn load_reference(path: &Path) -> Result<ReferenceData, CarimboError> {
    let content = std::fs::read_to_string(path).map_err(|e| CarimboError::ReferenceLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_reference(&content, path)
}

/// Parse reference data from a JSON string read from `source`.
pub fn parse_reference(json: &str, source: &Path) -> Result<ReferenceData, CarimboError> {
    let def: ReferenceDef = serde_json::from_str(json).map_err(|e| CarimboError::ReferenceLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_reference(&def)?;
    Ok(def.into())
}

/// Parse reference data from a JSON string (no file path context).
pub fn parse_reference_str(json: &str) -> Result<ReferenceData, CarimboError> {
    let def: ReferenceDef = serde_json::from_str(json)?;
    validate_reference(&def)?;
    Ok(def.into())
}

/// Validate that reference data is well-formed.
pub fn validate_reference(def: &ReferenceDef) -> Result<(), CarimboError> {
    let mut names = HashSet::new();
    for engineer in &def.engineers {
        if engineer.name.trim().is_empty() {
            return Err(CarimboError::ReferenceInvalid(
                "engineer name must not be empty".into(),
            ));
        }
        if !names.insert(engineer.name.as_str()) {
            return Err(CarimboError::ReferenceInvalid(format!(
                "engineer '{}' is declared more than once",
                engineer.name
            )));
        }
        if engineer.identifiers.is_empty() {
            return Err(CarimboError::ReferenceInvalid(format!(
                "engineer '{}' has no identifiers",
                engineer.name
            )));
        }
        if engineer.identifiers.iter().any(|id| id.trim().is_empty()) {
            return Err(CarimboError::ReferenceInvalid(format!(
                "engineer '{}' has an empty identifier",
                engineer.name
            )));
        }
    }

    let mut codes = HashSet::new();
    for project in &def.projects {
        // Filename extraction only ever yields upper-cased ASCII letters.
        if project.code.is_empty() || !project.code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(CarimboError::ReferenceInvalid(format!(
                "invalid project code '{}' (expected uppercase letters A-Z)",
                project.code
            )));
        }
        if !codes.insert(project.code.as_str()) {
            return Err(CarimboError::ReferenceInvalid(format!(
                "project code '{}' is declared more than once",
                project.code
            )));
        }
        let description = project.description.trim();
        if description.is_empty() {
            return Err(CarimboError::ReferenceInvalid(format!(
                "project code '{}' has an empty description",
                project.code
            )));
        }
        if description == UNKNOWN_PROJECT || description == PROCESSING_ERROR {
            return Err(CarimboError::ReferenceInvalid(format!(
                "project code '{}' uses the reserved description '{}'",
                project.code, description
            )));
        }
    }

    Ok(())
}
