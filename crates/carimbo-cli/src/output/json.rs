use carimbo_core::error::CarimboError;
use carimbo_core::screening::outcome::BatchResult;
use carimbo_core::screening::stats::BatchStatistics;
use serde_json::json;

use super::InspectedName;

pub fn print_screening(batch: &BatchResult, statistics: &BatchStatistics) -> Result<(), CarimboError> {
    let value = json!({
        "results": serde_json::to_value(batch)?,
        "statistics": serde_json::to_value(statistics)?,
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

pub fn print_inspected(inspected: &[InspectedName]) -> Result<(), CarimboError> {
    let mut items = Vec::with_capacity(inspected.len());
    for item in inspected {
        let mut value = serde_json::to_value(&item.facts)?;
        if let Some(obj) = value.as_object_mut() {
            obj.insert("name".into(), json!(item.name));
            obj.insert("project_description".into(), json!(item.project_description));
        }
        items.push(value);
    }
    println!("{}", serde_json::to_string_pretty(&items)?);
    Ok(())
}
