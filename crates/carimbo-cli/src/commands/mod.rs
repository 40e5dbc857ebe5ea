pub mod inspect;
pub mod reference;
pub mod screen;

use carimbo_core::error::CarimboError;
use carimbo_core::reference::{builtin, load_reference, ReferenceData};
use std::path::Path;

/// Load a custom reference file, or the built-in tables when none is given.
fn load_reference_or_default(path: Option<&Path>) -> Result<ReferenceData, CarimboError> {
    match path {
        Some(path) => load_reference(path),
        None => builtin::load_default(),
    }
}
