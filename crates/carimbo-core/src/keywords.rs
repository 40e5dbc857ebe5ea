use crate::reference::EngineerRegistry;

/// Keywords searched for in every document of a run.
///
/// The fixed part comes from the engineer registry (each name followed by its
/// identifiers). The supplemental part is supplied per run. Duplicates across
/// the two parts are kept here; the matcher deduplicates per document.
#[derive(Debug, Clone, Default)]
pub struct KeywordIndex {
    all: Vec<String>,
    fixed_len: usize,
}

impl KeywordIndex {
    pub fn new<S: AsRef<str>>(registry: &EngineerRegistry, supplemental: &[S]) -> Self {
        let mut all: Vec<String> = registry
            .iter()
            .flat_map(|e| std::iter::once(&e.name).chain(e.identifiers.iter()))
            .filter(|k| !k.trim().is_empty())
            .cloned()
            .collect();
        let fixed_len = all.len();

        all.extend(
            supplemental
                .iter()
                .map(|k| k.as_ref().trim())
                .filter(|k| !k.is_empty())
                .map(str::to_string),
        );

        KeywordIndex { all, fixed_len }
    }

    /// Fixed keywords followed by supplemental keywords.
    pub fn all_keywords(&self) -> &[String] {
        &self.all
    }

    pub fn fixed(&self) -> &[String] {
        &self.all[..self.fixed_len]
    }

    pub fn supplemental(&self) -> &[String] {
        &self.all[self.fixed_len..]
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

/// Parse a keyword list with one keyword per line.
pub fn parse_keyword_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::schema::EngineerEntry;

    fn registry() -> EngineerRegistry {
        EngineerRegistry::new(vec![
            EngineerEntry {
                name: "FLAVIO SORDI".into(),
                identifiers: vec!["2201136580".into()],
            },
            EngineerEntry {
                name: "SALOMÃO".into(),
                identifiers: vec!["0401863549".into(), "040186354-9".into()],
            },
        ])
    }

    #[test]
    fn test_fixed_then_supplemental_order() {
        let index = KeywordIndex::new(&registry(), &["SEINF", "Canarinho"]);
        assert_eq!(
            index.all_keywords(),
            &[
                "FLAVIO SORDI",
                "2201136580",
                "SALOMÃO",
                "0401863549",
                "040186354-9",
                "SEINF",
                "Canarinho"
            ]
        );
        assert_eq!(index.fixed().len(), 5);
        assert_eq!(index.supplemental(), &["SEINF", "Canarinho"]);
    }

    #[test]
    fn test_supplemental_trimmed_and_empties_dropped() {
        let index = KeywordIndex::new(&registry(), &["  SEINF ", "", "   ", "\tSETEMBRO"]);
        assert_eq!(index.supplemental(), &["SEINF", "SETEMBRO"]);
    }

    #[test]
    fn test_duplicates_across_sets_are_kept() {
        let index = KeywordIndex::new(&registry(), &["FLAVIO SORDI"]);
        let count = index
            .all_keywords()
            .iter()
            .filter(|k| *k == "FLAVIO SORDI")
            .count();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_empty_registry() {
        let index = KeywordIndex::new(&EngineerRegistry::default(), &Vec::<String>::new());
        assert!(index.is_empty());
        assert!(index.fixed().is_empty());
    }

    #[test]
    fn test_parse_keyword_lines() {
        let text = "SEINF\n\n  Canarinho  \r\nCEP: 69.306-700 - Boa Vista/RR\n";
        assert_eq!(
            parse_keyword_lines(text),
            vec!["SEINF", "Canarinho", "CEP: 69.306-700 - Boa Vista/RR"]
        );
    }
}
