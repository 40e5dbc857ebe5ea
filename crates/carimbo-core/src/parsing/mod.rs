pub mod filename;

pub use filename::{analyze, FilenameFacts};
