use carimbo_core::error::CarimboError;
use carimbo_core::reference::{self, UNKNOWN_PROJECT};
use std::path::Path;

pub fn show(path: Option<&Path>) -> Result<(), CarimboError> {
    let data = super::load_reference_or_default(path)?;

    println!("{} (version {})\n", data.name, data.version);
    if let Some(ref desc) = data.description {
        println!("{}\n", desc);
    }

    println!("Engineers ({}):\n", data.registry.len());
    for engineer in data.registry.iter() {
        println!("  {}", engineer.name);
        println!("    {}", engineer.identifiers.join(", "));
    }
    println!();

    println!("Project codes ({}):\n", data.projects.len());
    let max_code_len = data.projects.iter().map(|(c, _)| c.len()).max().unwrap_or(4);
    for (code, description) in data.projects.iter() {
        println!("  {:<width$}  {}", code, description, width = max_code_len);
    }
    println!();

    if data.default_keywords.is_empty() {
        println!("No default keywords.");
    } else {
        println!("Default keywords ({}):\n", data.default_keywords.len());
        for keyword in &data.default_keywords {
            println!("  {}", keyword);
        }
    }
    println!();

    Ok(())
}

pub fn schema() -> Result<(), CarimboError> {
    print!(
        r#"Reference JSON Schema
=====================

A reference file lists who may sign the drawings, which project codes
exist, and which stamp keywords are searched for by default. When you run
`carimbo screen`, every engineer name and identifier is searched in each
document, followed by the default keywords and any you add with -k.

Top-level fields:
  name              (string, required)  Human-readable name of the reference set
  description       (string, optional)  What this reference set is for
  version           (string, required)  Version identifier (e.g., "2024.1")
  engineers         (array, required)   Registered signatories (see below),
                                        searched in this order
  projects          (array, required)   Project-code dictionary (see below)
  default_keywords  (array, optional)   Stamp keywords searched unless
                                        --no-default-keywords is given

Each entry in "engineers":
  name              (string, required)  Name exactly as printed on the stamp.
                                        Matching is case-sensitive.
  identifiers       (array, required)   Registration numbers, with and without
                                        punctuation (e.g., "092019291-2" and
                                        "0920192912"). At least one.

Each entry in "projects":
  code              (string, required)  Uppercase letters only. Extracted from
                                        filenames of the form PRJ-<CODE>-...
                                        Codes must be unique.
  description       (string, required)  Text expected in the drawing's title
                                        block. "{unknown}" is reserved.

Example:
{{
  "name": "My project",
  "version": "1.0",
  "engineers": [
    {{ "name": "FLAVIO SORDI", "identifiers": ["2201136580"] }}
  ],
  "projects": [
    {{ "code": "ECX", "description": "PROJETO ELÉTRICO DE CLIMATIZAÇÃO" }},
    {{ "code": "HID", "description": "PROJETO DE INSTALAÇÕES HIDRÁULICAS" }}
  ],
  "default_keywords": ["SEINF", "Boa Vista/RR"]
}}
"#,
        unknown = UNKNOWN_PROJECT
    );
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), CarimboError> {
    let data = reference::load_reference(file)?;

    println!("Reference '{}' (v{}) is valid.", data.name, data.version);
    println!("  Engineers: {}", data.registry.len());
    println!("  Project codes: {}", data.projects.len());
    println!("  Default keywords: {}", data.default_keywords.len());

    // Potential issues (warnings, not errors)
    let mut warnings = Vec::new();
    if data.registry.is_empty() {
        warnings.push("no engineers registered; no signatory will ever be found".to_string());
    }
    for keyword in &data.default_keywords {
        if keyword.trim().is_empty() {
            warnings.push("blank default keyword will be ignored".to_string());
        } else if keyword.trim() != keyword {
            warnings.push(format!(
                "default keyword '{}' has surrounding whitespace that will be trimmed",
                keyword
            ));
        }
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}
