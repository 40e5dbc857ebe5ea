use carimbo_core::error::CarimboError;
use carimbo_core::parsing::filename;
use std::path::Path;

use crate::output;

pub fn run(names: &[String], reference: Option<&Path>, output_format: &str) -> Result<(), CarimboError> {
    let reference = super::load_reference_or_default(reference)?;

    let inspected: Vec<output::InspectedName> = names
        .iter()
        .map(|name| {
            let facts = filename::analyze(name);
            let project_description = reference
                .projects
                .describe(facts.project_code.as_deref())
                .to_string();
            output::InspectedName {
                name: name.clone(),
                facts,
                project_description,
            }
        })
        .collect();

    match output_format {
        "json" => output::json::print_inspected(&inspected)?,
        _ => output::table::print_inspected(&inspected),
    }

    Ok(())
}
