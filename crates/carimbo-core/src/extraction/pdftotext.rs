use crate::error::CarimboError;
use crate::extraction::{PageContent, PdfExtractor};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

/// Per-document limit used by the CLI unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// Runs in the default reading-order mode so words inside a text run stay
/// separated by a single space. Layout mode pads columns with runs of spaces,
/// which would break exact matching of multi-word keywords.
///
/// Output and diagnostics go to temp files rather than pipes, so a process
/// that runs past its timeout can be killed without anything blocking on a
/// full pipe.
pub struct PdftotextExtractor {
    timeout: Option<Duration>,
}

impl PdftotextExtractor {
    /// No time limit.
    pub fn new() -> Self {
        PdftotextExtractor { timeout: None }
    }

    /// Kill pdftotext and fail the document once `timeout` has elapsed.
    pub fn with_timeout(timeout: Duration) -> Self {
        PdftotextExtractor {
            timeout: Some(timeout),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, CarimboError> {
        let mut input = tempfile::NamedTempFile::new().map_err(extraction_error)?;
        input.write_all(pdf_bytes).map_err(extraction_error)?;
        let output = tempfile::NamedTempFile::new().map_err(extraction_error)?;
        let mut stderr = tempfile::tempfile().map_err(extraction_error)?;

        let mut child = Command::new("pdftotext")
            .arg("-enc")
            .arg("UTF-8")
            .arg(input.path())
            .arg(output.path())
            .stdout(Stdio::null())
            .stderr(Stdio::from(stderr.try_clone().map_err(extraction_error)?))
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    CarimboError::PdftotextNotFound
                } else {
                    CarimboError::Extraction(format!("pdftotext failed: {}", e))
                }
            })?;

        let status = wait_with_timeout(&mut child, self.timeout)?;
        if !status.success() {
            let code = status.code().unwrap_or(-1);
            let stderr = read_all(&mut stderr).trim().to_string();
            return Err(CarimboError::PdftotextFailed { code, stderr });
        }

        let text = std::fs::read(output.path()).map_err(extraction_error)?;
        Ok(split_pages(&String::from_utf8_lossy(&text)))
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

fn extraction_error(e: std::io::Error) -> CarimboError {
    CarimboError::Extraction(e.to_string())
}

fn read_all(file: &mut File) -> String {
    let mut buf = Vec::new();
    if file.seek(SeekFrom::Start(0)).is_ok() {
        let _ = file.read_to_end(&mut buf);
    }
    String::from_utf8_lossy(&buf).to_string()
}

/// Wait for `child`, killing it once `timeout` has elapsed.
fn wait_with_timeout(child: &mut Child, timeout: Option<Duration>) -> Result<ExitStatus, CarimboError> {
    let Some(timeout) = timeout else {
        return child.wait().map_err(extraction_error);
    };

    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait().map_err(extraction_error)? {
            return Ok(status);
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Err(CarimboError::Extraction(format!(
                "pdftotext timed out after {:.1}s",
                timeout.as_secs_f64()
            )));
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}

/// Split pdftotext output into pages.
///
/// pdftotext terminates every page with a form feed (`\x0c`), so the segment
/// after the last one is dropped when it is blank. Blank lines are not text
/// items and are skipped.
pub fn split_pages(text: &str) -> Vec<PageContent> {
    let mut segments: Vec<&str> = text.split('\x0c').collect();
    if segments.len() > 1 && segments.last().is_some_and(|s| s.trim().is_empty()) {
        segments.pop();
    }

    segments
        .into_iter()
        .enumerate()
        .map(|(i, page_text)| {
            let lines = page_text
                .lines()
                .map(|l| l.trim_end())
                .filter(|l| !l.is_empty())
                .map(|l| l.to_string())
                .collect();
            PageContent::new(i + 1, lines)
        })
        .collect()
}
