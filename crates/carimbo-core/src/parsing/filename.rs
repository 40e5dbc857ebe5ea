use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Marker that operators append to a drawing's filename once it is signed.
pub const SIGNED_MARKER: &str = "assinado";

static PDF_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.pdf$").expect("invalid extension regex"));

static SIGNED_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)_assinado").expect("invalid signed-suffix regex"));

static PROJECT_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)PRJ-([A-Z]+)-").expect("invalid project-code regex"));

/// Sheet-number rules, tried in this order. The last digit group must not run
/// into a further digit.
static SHEET_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"[_\-](\d{2})[_\-](\d{2})(?:\D|$)",
        r"[_\-](\d{2})[_\-](\d{3})(?:\D|$)",
        r"[_\-](\d{3})[_\-](\d{3})(?:\D|$)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("invalid sheet-number regex"))
    .collect()
});

/// Everything the screening engine derives from a filename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilenameFacts {
    /// Two digit groups joined by one space, e.g. "01 07".
    pub sheet_number: Option<String>,
    /// Upper-cased code from a `PRJ-<CODE>-` segment.
    pub project_code: Option<String>,
    pub marked_signed: bool,
    /// Filename without `.pdf` and without the `_assinado` suffix.
    pub base_name: String,
}

/// Derive all filename facts at once.
pub fn analyze(name: &str) -> FilenameFacts {
    FilenameFacts {
        sheet_number: extract_sheet_number(name),
        project_code: extract_project_code(name),
        marked_signed: is_marked_signed(name),
        base_name: base_name(name),
    }
}

/// Strip a trailing `.pdf` extension (any case).
pub fn strip_extension(name: &str) -> String {
    PDF_EXTENSION.replace(name, "").into_owned()
}

/// Filename with the extension and the first `_assinado` marker removed.
pub fn base_name(name: &str) -> String {
    let stem = strip_extension(name);
    SIGNED_SUFFIX.replace(&stem, "").into_owned()
}

/// Extract the sheet (plate) number encoded in a filename.
///
/// `PRJ-ECX-01_07_assinado.pdf` yields `"01 07"`; `X-01-071.pdf` yields
/// `"01 071"`.
pub fn extract_sheet_number(name: &str) -> Option<String> {
    let stem = base_name(name);
    SHEET_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(&stem)
            .map(|caps| format!("{} {}", &caps[1], &caps[2]))
    })
}

/// Extract the project code from a `PRJ-<CODE>-` segment.
pub fn extract_project_code(name: &str) -> Option<String> {
    PROJECT_CODE
        .captures(name)
        .map(|caps| caps[1].to_uppercase())
}

/// Whether the filename carries the signed marker, in any case and position.
pub fn is_marked_signed(name: &str) -> bool {
    name.to_lowercase().contains(SIGNED_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_number_two_two() {
        assert_eq!(
            extract_sheet_number("PRJ-ECX-01-07.pdf").as_deref(),
            Some("01 07")
        );
        assert_eq!(
            extract_sheet_number("PRJ-ECX-01_07_assinado.pdf").as_deref(),
            Some("01 07")
        );
    }

    #[test]
    fn test_sheet_number_two_three() {
        assert_eq!(
            extract_sheet_number("PRJ-ECX-01-071.pdf").as_deref(),
            Some("01 071")
        );
    }

    #[test]
    fn test_sheet_number_three_three() {
        assert_eq!(
            extract_sheet_number("PLANTA_101_205.PDF").as_deref(),
            Some("101 205")
        );
    }

    #[test]
    fn test_sheet_number_first_rule_wins() {
        // Both a 2/2 and a 3/3 group are present; the 2/2 rule is tried first.
        assert_eq!(
            extract_sheet_number("A_101_205-02-03.pdf").as_deref(),
            Some("02 03")
        );
    }

    #[test]
    fn test_sheet_number_absent() {
        assert_eq!(extract_sheet_number("memorial descritivo.pdf"), None);
        assert_eq!(extract_sheet_number("PRJ-ECX-1-7.pdf"), None);
    }

    #[test]
    fn test_sheet_number_ignores_signed_suffix_digits() {
        assert_eq!(
            extract_sheet_number("PRJ-SUB-03-12_ASSINADO.pdf").as_deref(),
            Some("03 12")
        );
    }

    #[test]
    fn test_project_code() {
        assert_eq!(
            extract_project_code("PRJ-ECX-01_07_assinado.pdf").as_deref(),
            Some("ECX")
        );
        assert_eq!(
            extract_project_code("prj-ilux-02-03.pdf").as_deref(),
            Some("ILUX")
        );
        assert_eq!(extract_project_code("ECX-01-07.pdf"), None);
        assert_eq!(extract_project_code("PRJ-01-07.pdf"), None);
    }

    #[test]
    fn test_marked_signed_any_case_any_position() {
        assert!(is_marked_signed("PRJ-ECX-01_07_assinado.pdf"));
        assert!(is_marked_signed("ASSINADO-PRJ-ECX-01_07.pdf"));
        assert!(is_marked_signed("prj-ecx-01_07 (Assinado).pdf"));
        assert!(!is_marked_signed("PRJ-ECX-01_07.pdf"));
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("PRJ-ECX-01_07_assinado.pdf"), "PRJ-ECX-01_07");
        assert_eq!(base_name("PRJ-ECX-01_07.PDF"), "PRJ-ECX-01_07");
        assert_eq!(base_name("notes.pdf.bak"), "notes.pdf.bak");
    }

    #[test]
    fn test_analyze_fields_are_independent() {
        let facts = analyze("memorial_03_04.pdf");
        assert_eq!(facts.sheet_number.as_deref(), Some("03 04"));
        assert_eq!(facts.project_code, None);
        assert!(!facts.marked_signed);

        let facts = analyze("PRJ-HID-planta.pdf");
        assert_eq!(facts.sheet_number, None);
        assert_eq!(facts.project_code.as_deref(), Some("HID"));
    }
}
