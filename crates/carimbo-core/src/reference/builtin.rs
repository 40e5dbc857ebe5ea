use crate::error::CarimboError;
use crate::reference::{parse_reference_str, ReferenceData};

const DEFAULT_REFERENCE_JSON: &str = include_str!("../../../../reference/default.json");

/// Load the reference tables shipped with the binary.
pub fn load_default() -> Result<ReferenceData, CarimboError> {
    parse_reference_str(DEFAULT_REFERENCE_JSON)
}
