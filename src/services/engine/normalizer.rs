//! Text normalization for document file names.
//! Maps arbitrary human-entered text to ASCII-safe underscore tokens.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

use super::numeric;

/// Glyphs with no useful decomposition, mapped by hand before the
/// decomposition pass.
const CHAR_MAP: &[(char, &str)] = &[
    ('¢', "o"),
    ('©', "c"),
    ('®', "r"),
    ('–', "-"),
    ('—', "-"),
    ('’', "'"),
    ('‘', "'"),
    ('“', "\""),
    ('”', "\""),
    ('ß', "ss"),
];

/// Compiled regex for characters outside the token alphabet.
static RE_NON_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_.\-]").expect("Invalid regex"));

/// Compiled regex for runs of underscores.
static RE_UNDERSCORE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_+").expect("Invalid regex"));

/// Sanitize text into an ASCII-only token.
///
/// Pipeline:
/// 1. Substitute glyphs from [`CHAR_MAP`]
/// 2. Canonical decomposition, dropping whatever stays non-ASCII
/// 3. Replace every char outside `[A-Za-z0-9_.-]` with `_`
/// 4. Collapse `_` runs, trim `_` and spaces from the edges
/// 5. Lower-case when `fold` is set
///
/// Pure and total: empty input yields empty output, no input fails.
pub fn ascii_clean(name: &str, fold: bool) -> String {
    if name.is_empty() {
        return String::new();
    }

    let mut substituted = String::with_capacity(name.len());
    for ch in name.chars() {
        match CHAR_MAP.iter().find(|(src, _)| *src == ch) {
            Some((_, replacement)) => substituted.push_str(replacement),
            None => substituted.push(ch),
        }
    }

    let ascii: String = substituted.nfkd().filter(char::is_ascii).collect();
    let replaced = RE_NON_TOKEN.replace_all(&ascii, "_");
    let collapsed = RE_UNDERSCORE_RUN.replace_all(&replaced, "_");
    let trimmed = collapsed.trim_matches([' ', '_']);

    if fold {
        trimmed.to_lowercase()
    } else {
        trimmed.to_string()
    }
}

/// Collapse underscore runs and trim `_`/space edges.
pub(crate) fn collapse_underscores(text: &str) -> String {
    RE_UNDERSCORE_RUN
        .replace_all(text, "_")
        .trim_matches([' ', '_'])
        .to_string()
}

/// Turn a raw name fragment into its canonical token plus an optional
/// leading numeric tag.
///
/// Accents are folded without forcing case, a leading numeric sequence
/// (`"24 y 25 …"`, `"8-21 …"`) is moved out as a tag, and the internal
/// `-`/`.` separators become underscores. The caller decides where the
/// tag goes.
pub fn process_name(name: &str) -> (String, Option<String>) {
    if name.is_empty() {
        return (String::new(), None);
    }

    let cleaned = ascii_clean(name, false);

    let (working, tag) = match numeric::extract_leading(&cleaned) {
        Some((tag, rest)) => (rest, Some(tag)),
        None => (cleaned, None),
    };

    let joined = working.replace('-', "_").replace('.', "_");
    (collapse_underscores(&joined), tag)
}

/// Lower-case a token and capitalize only its first `_`-delimited
/// segment: `"HOJA_DE_VIDA"` becomes `"Hoja_de_vida"`.
pub fn capitalize_first_segment(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }
    let lower = name.to_lowercase();
    let mut parts: Vec<String> = lower.split('_').map(str::to_string).collect();
    if let Some(first) = parts.first_mut() {
        let mut chars = first.chars();
        if let Some(c) = chars.next() {
            *first = c.to_uppercase().chain(chars).collect();
        }
    }
    parts.join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_clean_accents_and_glyphs() {
        assert_eq!(
            ascii_clean("Gestión Humana – ß©", false),
            "Gestion_Humana_-_ssc"
        );
        assert_eq!(ascii_clean("Año fiscal 2023.pdf", false), "Ano_fiscal_2023.pdf");
    }

    #[test]
    fn test_ascii_clean_identity_on_plain_tokens() {
        assert_eq!(ascii_clean("Informe_final.pdf", false), "Informe_final.pdf");
        assert_eq!(ascii_clean("Informe_Final", true), "informe_final");
    }

    #[test]
    fn test_ascii_clean_idempotent() {
        let once = ascii_clean("  Césped — áreas  ", false);
        assert_eq!(ascii_clean(&once, false), once);
    }

    #[test]
    fn test_ascii_clean_empty() {
        assert_eq!(ascii_clean("", false), "");
        assert_eq!(ascii_clean("", true), "");
    }

    #[test]
    fn test_process_name_plain() {
        assert_eq!(
            process_name("Informe Final"),
            ("Informe_Final".to_string(), None)
        );
    }

    #[test]
    fn test_process_name_moves_leading_sequence() {
        assert_eq!(
            process_name("24 y 25 Informe Final"),
            ("Informe_Final".to_string(), Some("24_25".to_string()))
        );
        assert_eq!(
            process_name("8-21 Plan"),
            ("Plan".to_string(), Some("8_21".to_string()))
        );
    }

    #[test]
    fn test_process_name_internal_separators() {
        assert_eq!(
            process_name("acta.comite-enero"),
            ("acta_comite_enero".to_string(), None)
        );
    }

    #[test]
    fn test_process_name_empty() {
        assert_eq!(process_name(""), (String::new(), None));
    }

    #[test]
    fn test_capitalize_first_segment_only() {
        assert_eq!(capitalize_first_segment("HOJA_DE_VIDA"), "Hoja_de_vida");
        assert_eq!(capitalize_first_segment("informe"), "Informe");
        assert_eq!(capitalize_first_segment(""), "");
    }
}
