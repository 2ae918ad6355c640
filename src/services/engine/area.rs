//! Area mapping: folder names to organizational-unit abbreviations.

/// A user-maintained `folder name -> abbreviation` table.
///
/// Entries keep insertion order so duplicate keys overwrite in place
/// ("last line wins") and value scans are deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AreaMapping {
    entries: Vec<(String, String)>,
}

impl AreaMapping {
    /// Parse line-oriented `key:value` text. Blank lines and lines
    /// without a `:` are ignored; keys are trimmed and lower-cased,
    /// values trimmed.
    pub fn parse(text: &str) -> Self {
        let mut entries: Vec<(String, String)> = Vec::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim().to_lowercase();
            let value = value.trim().to_string();
            match entries.iter_mut().find(|(k, _)| *k == key) {
                Some(entry) => entry.1 = value,
                None => entries.push((key, value)),
            }
        }
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an abbreviation by lower-cased folder name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Resolve a folder path to an abbreviation by walking its
    /// components from the file's immediate parent outward. The first
    /// component present as a key wins; no match yields `""`.
    pub fn resolve_path(&self, folder_path: &str) -> String {
        let normalized = folder_path.replace('\\', "/");
        normalized
            .split('/')
            .rev()
            .filter(|part| !part.is_empty())
            .find_map(|part| self.get(&part.to_lowercase()))
            .unwrap_or_default()
            .to_string()
    }

    /// Match a detected area token against keys and values,
    /// case-insensitively. Returns the mapped abbreviation.
    pub fn match_token(&self, token: &str) -> Option<&str> {
        let needle = token.trim().to_lowercase();
        self.entries
            .iter()
            .find(|(k, v)| *k == needle || v.to_lowercase() == needle)
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AreaMapping {
        AreaMapping::parse(
            "Gestión Humana:CP\nAdministración del personal:AP\nTesoreria:TR\nRegistros:RG",
        )
    }

    #[test]
    fn test_parse_trims_and_lowercases_keys() {
        let mapping = AreaMapping::parse("  Tesoreria : TR \n\nno-colon-line\n");
        assert_eq!(mapping.get("tesoreria"), Some("TR"));
        assert!(mapping.get("no-colon-line").is_none());
    }

    #[test]
    fn test_parse_last_line_wins() {
        let mapping = AreaMapping::parse("Tesoreria:TR\nTesoreria:TS");
        assert_eq!(mapping.get("tesoreria"), Some("TS"));
    }

    #[test]
    fn test_resolve_nearest_ancestor_wins() {
        let mapping = sample();
        assert_eq!(
            mapping.resolve_path("/docs/Tesoreria/Registros"),
            "RG".to_string()
        );
        assert_eq!(mapping.resolve_path("/docs/Tesoreria"), "TR".to_string());
    }

    #[test]
    fn test_resolve_multiword_accented_key() {
        let mapping = sample();
        assert_eq!(
            mapping.resolve_path("C:\\repo\\Gestión Humana\\2024"),
            "CP".to_string()
        );
        // Full-component match only, no substrings.
        assert_eq!(mapping.resolve_path("/repo/Gestión"), String::new());
    }

    #[test]
    fn test_resolve_no_match_is_empty() {
        assert_eq!(sample().resolve_path("/somewhere/else"), String::new());
    }

    #[test]
    fn test_match_token_by_key_or_value() {
        let mapping = sample();
        assert_eq!(mapping.match_token("tesoreria"), Some("TR"));
        assert_eq!(mapping.match_token("tr"), Some("TR"));
        assert_eq!(mapping.match_token("AP"), Some("AP"));
        assert_eq!(mapping.match_token("XX"), None);
    }
}
