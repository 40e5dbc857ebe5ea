use crate::error::CarimboError;
use crate::screening::engine::DocumentMatcher;
use crate::screening::outcome::{BatchResult, DocumentResult};
use serde::Serialize;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Pause that keeps an interactive host responsive between documents.
pub const INTERACTIVE_PAUSE: Duration = Duration::from_millis(100);

/// Where the bytes of a [`BatchDocument`] come from.
#[derive(Debug, Clone)]
pub enum DocumentSource {
    Bytes(Vec<u8>),
    /// Read when the document's turn comes, so a missing or unreadable file
    /// fails only that document.
    Path(PathBuf),
}

/// One input document: the name it was supplied under and its contents.
#[derive(Debug, Clone)]
pub struct BatchDocument {
    pub name: String,
    pub source: DocumentSource,
}

impl BatchDocument {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        BatchDocument {
            name: name.into(),
            source: DocumentSource::Bytes(bytes),
        }
    }

    /// A document read from `path` during the run, named after its file name.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        BatchDocument {
            name,
            source: DocumentSource::Path(path),
        }
    }

    /// The raw bytes. Read failures come back as
    /// [`CarimboError::DocumentRead`] naming the document.
    pub fn load(&self) -> Result<Cow<'_, [u8]>, CarimboError> {
        match &self.source {
            DocumentSource::Bytes(bytes) => Ok(Cow::Borrowed(bytes.as_slice())),
            DocumentSource::Path(path) => read_source(&self.name, path).map(Cow::Owned),
        }
    }
}

fn read_source(name: &str, path: &Path) -> Result<Vec<u8>, CarimboError> {
    std::fs::read(path).map_err(|e| CarimboError::DocumentRead {
        name: name.to_string(),
        reason: format!("{}: {}", path.display(), e),
    })
}

/// Emitted before document `index` (0-based) of `total` is processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressEvent {
    pub index: usize,
    pub total: usize,
    pub name: String,
}

impl ProgressEvent {
    /// Share of the batch reached once this document completes, in percent.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        (self.index + 1) as f64 / self.total as f64 * 100.0
    }
}

/// Receives progress events, strictly in input order.
pub trait ProgressObserver {
    fn on_progress(&mut self, event: &ProgressEvent);
}

impl<F: FnMut(&ProgressEvent)> ProgressObserver for F {
    fn on_progress(&mut self, event: &ProgressEvent) {
        self(event)
    }
}

impl ProgressObserver for Sender<ProgressEvent> {
    fn on_progress(&mut self, event: &ProgressEvent) {
        // A dropped receiver only means nobody is watching any more.
        let _ = self.send(event.clone());
    }
}

impl ProgressObserver for () {
    fn on_progress(&mut self, _event: &ProgressEvent) {}
}

#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Sleep inserted between two documents. Zero disables it.
    pub pause: Duration,
    /// Checked before each document; once set, the run stops and returns
    /// what it has.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl BatchOptions {
    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }
}

/// Screen every document in order, one at a time.
///
/// A document that cannot be read gets a degraded result carrying the error
/// message; the batch carries on. The only fatal condition is an empty input.
/// A later document with the same name replaces the earlier result.
pub fn run_batch(
    documents: &[BatchDocument],
    matcher: &DocumentMatcher<'_>,
    options: &BatchOptions,
    observer: &mut dyn ProgressObserver,
) -> Result<BatchResult, CarimboError> {
    if documents.is_empty() {
        return Err(CarimboError::InvalidInput(
            "no PDF documents to screen".into(),
        ));
    }

    let total = documents.len();
    let mut batch = BatchResult::default();

    for (index, document) in documents.iter().enumerate() {
        if options.is_cancelled() {
            warn!(processed = index, total, "batch cancelled");
            batch.cancelled = true;
            break;
        }

        observer.on_progress(&ProgressEvent {
            index,
            total,
            name: document.name.clone(),
        });

        let screened = document
            .load()
            .and_then(|bytes| matcher.match_document(&bytes, &document.name));
        let result = match screened {
            Ok(result) => {
                info!(
                    document = %document.name,
                    keywords = result.found_keywords.len(),
                    "document screened"
                );
                result
            }
            Err(e) => {
                warn!(document = %document.name, error = %e, "document failed");
                DocumentResult::failed(&document.name, &e)
            }
        };

        if batch.insert(document.name.clone(), result).is_some() {
            warn!(
                document = %document.name,
                "duplicate filename in batch, earlier result replaced"
            );
        }

        if !options.pause.is_zero() && index + 1 < total {
            std::thread::sleep(options.pause);
        }
    }

    Ok(batch)
}
