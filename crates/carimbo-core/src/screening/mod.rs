pub mod batch;
pub mod engine;
pub mod outcome;
pub mod stats;

pub use batch::{run_batch, BatchDocument, BatchOptions, DocumentSource, ProgressEvent, ProgressObserver};
pub use engine::DocumentMatcher;
pub use outcome::{BatchResult, DocumentResult};
