pub mod json;
pub mod table;

use carimbo_core::parsing::FilenameFacts;

/// A filename together with what `inspect` derived from it.
pub struct InspectedName {
    pub name: String,
    pub facts: FilenameFacts,
    pub project_description: String,
}
