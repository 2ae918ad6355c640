//! Temp/junk file detection.

use regex::RegexSet;
use std::sync::LazyLock;

/// Backup/swap/system artifact shapes, matched case-insensitively.
const TEMP_PATTERNS: &[&str] = &[
    r"^~",
    r"\.tmp$",
    r"\.bak$",
    r"\.old$",
    r"^\._",
    r"\.swp$",
    r"^Thumbs\.db$",
    r"^\.DS_Store$",
    r"^~\$",
];

static TEMP_SET: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new(TEMP_PATTERNS.iter().map(|p| format!("(?i){p}"))).expect("Invalid regex")
});

/// Whether a filename looks like a transient artifact. Pure predicate;
/// the caller decides deletion.
pub fn is_temp_file(filename: &str) -> bool {
    TEMP_SET.is_match(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_junk_names() {
        assert!(is_temp_file("Thumbs.db"));
        assert!(is_temp_file(".DS_Store"));
        assert!(is_temp_file("~$report.xlsx"));
        assert!(is_temp_file("notes.bak"));
        assert!(is_temp_file("._resource"));
        assert!(is_temp_file("draft.swp"));
        assert!(is_temp_file("old_copy.OLD"));
        assert!(is_temp_file("export.TMP"));
    }

    #[test]
    fn test_regular_names_pass() {
        assert!(!is_temp_file("report.pdf"));
        assert!(!is_temp_file("backup_plan.docx"));
        assert!(!is_temp_file("tmp_notes.txt"));
    }
}
