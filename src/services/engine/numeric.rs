//! Leading numeric-sequence detection.
//!
//! Human-entered names often start with a case number or a year span:
//! `"24 y 25 Informe"`, `"8-21 Plan"`, `"24,25 Acta"`. The sequence is
//! pulled out and normalized to an underscore-joined tag (`24_25`) so it
//! can be re-attached as a suffix of the canonical name.

use regex::Regex;
use std::sync::LazyLock;

/// Digit groups chained by `- – . ,`, `y`, `and` or `&`, followed by a
/// non-empty remainder. Whitespace and underscores around a separator
/// belong to it (the normalizer turns spaces into underscores before
/// this runs on name fragments).
static RE_LEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*([0-9]+(?:[\s_]*(?:[-–.,]|y|and|&)[\s_]*[0-9]+)*)[-_.\s:]*(.+)$")
        .expect("Invalid regex")
});

/// Same grammar, but the remainder may be empty. Used when stripping a
/// numeric sequence out of a captured prefix field.
static RE_LEADING_LENIENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*([0-9]+(?:[\s_]*(?:[-–.,]|y|and|&)[\s_]*[0-9]+)*)[-_.\s:]*(.*)$")
        .expect("Invalid regex")
});

/// A separator token inside a numeric sequence, with its surrounding
/// whitespace/underscores.
static RE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[\s_]*(?:[-–.,]|y|and|&)[\s_]*").expect("Invalid regex"));

static RE_UNDERSCORE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_+").expect("Invalid regex"));

/// Normalize the separators of a raw numeric sequence to single
/// underscores: `"24 y 25"` becomes `"24_25"`.
fn normalize_separators(raw: &str) -> String {
    let replaced = RE_SEPARATOR.replace_all(raw, "_");
    RE_UNDERSCORE_RUN
        .replace_all(&replaced, "_")
        .trim_matches(['_', ' '])
        .to_string()
}

/// Detect a leading numeric sequence and split it off.
///
/// Returns `(tag, remainder)` or `None` when the text does not start
/// with digits. The run of separators between the sequence and the
/// remainder is consumed; the remainder must be non-empty.
pub fn extract_leading(text: &str) -> Option<(String, String)> {
    let caps = RE_LEADING.captures(text)?;
    let tag = normalize_separators(&caps[1]);
    if tag.is_empty() {
        return None;
    }
    Some((tag, caps[2].to_string()))
}

/// Like [`extract_leading`] but tolerates an empty remainder, which is
/// trimmed of surrounding whitespace.
pub fn extract_leading_lenient(text: &str) -> Option<(String, String)> {
    let caps = RE_LEADING_LENIENT.captures(text)?;
    let tag = normalize_separators(&caps[1]);
    if tag.is_empty() {
        return None;
    }
    Some((tag, caps[2].trim().to_string()))
}
