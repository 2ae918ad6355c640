//! Persistent audit trail.
//!
//! Applied operations are appended to a delimited log file with a
//! header written once, so the history survives across sessions.

use chrono::Local;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::types::errors::{AppError, AppResult};

pub const LOG_COLUMNS: [&str; 5] = ["timestamp", "original_path", "action", "new_path", "note"];

/// One recorded operation.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEntry {
    pub timestamp: String,
    pub original_path: String,
    pub action: String,
    pub new_path: String,
    pub note: String,
}

impl AuditEntry {
    /// Build an entry stamped with the current local time.
    pub fn now(original_path: &str, action: &str, new_path: &str, note: &str) -> Self {
        Self {
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            original_path: original_path.to_string(),
            action: action.to_string(),
            new_path: new_path.to_string(),
            note: note.to_string(),
        }
    }
}

/// Append entries to the log at `path`, creating it (header included)
/// on first use. Paths are relativized at `anchor` when one is given.
pub fn append_entries(path: &Path, entries: &[AuditEntry], anchor: Option<&str>) -> AppResult<()> {
    if entries.is_empty() {
        return Ok(());
    }

    let write_header = !path.exists();
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| AppError::Audit(format!("cannot open {}: {e}", path.display())))?;

    if write_header {
        writeln!(file, "{}", LOG_COLUMNS.join(","))
            .map_err(|e| AppError::Audit(e.to_string()))?;
    }

    for entry in entries {
        let (original, new) = match anchor {
            Some(anchor) => (
                relativize(&entry.original_path, anchor),
                relativize(&entry.new_path, anchor),
            ),
            None => (entry.original_path.clone(), entry.new_path.clone()),
        };
        writeln!(
            file,
            "{},{},{},{},{}",
            csv_escape(&entry.timestamp),
            csv_escape(&original),
            csv_escape(&entry.action),
            csv_escape(&new),
            csv_escape(&entry.note),
        )
        .map_err(|e| AppError::Audit(e.to_string()))?;
    }

    Ok(())
}

/// Cut a path down to start at the anchor folder (case-insensitive),
/// e.g. `C:\repo\trunk\docs\a.pdf` with anchor `trunk` becomes
/// `trunk/docs/a.pdf`. Paths without the anchor pass through with
/// separators normalized.
pub fn relativize(path: &str, anchor: &str) -> String {
    if path.is_empty() {
        return String::new();
    }
    let normalized = path.replace('\\', "/");
    let inner = format!("/{}/", anchor.to_lowercase());
    if let Some(idx) = find_ci(&normalized, &inner) {
        return normalized[idx + 1..].to_string();
    }
    let leading = format!("{}/", anchor.to_lowercase());
    if let Some(idx) = find_ci(&normalized, &leading) {
        return normalized[idx..].to_string();
    }
    normalized
}

/// Render the last `show_parts` components of a path for display:
/// `…/Tesoreria/Registros/R.TR.x.pdf` → `Tesoreria / Registros / R.TR.x.pdf`.
pub fn shorten_path(path: &str, show_parts: usize) -> String {
    if path.is_empty() {
        return String::new();
    }
    let normalized = path.replace('\\', "/");
    let parts: Vec<&str> = normalized.split('/').filter(|p| !p.is_empty()).collect();
    if parts.is_empty() {
        return path.to_string();
    }
    let start = parts.len().saturating_sub(show_parts);
    parts[start..].join(" / ")
}

/// ASCII case-insensitive substring search on char boundaries.
fn find_ci(haystack: &str, needle: &str) -> Option<usize> {
    let n = needle.len();
    if n == 0 || haystack.len() < n {
        return None;
    }
    (0..=haystack.len() - n)
        .find(|&i| haystack.get(i..i + n).is_some_and(|s| s.eq_ignore_ascii_case(needle)))
}

fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn entry(action: &str, note: &str) -> AuditEntry {
        AuditEntry::now("/repo/trunk/docs/a.pdf", action, "/repo/trunk/docs/b.pdf", note)
    }

    #[test]
    fn test_append_writes_header_once() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("log.csv");

        append_entries(&log, &[entry("STANDARDIZED", "area:TR parent:T")], None).unwrap();
        append_entries(&log, &[entry("REPAIRED", "area: CP -> AP")], None).unwrap();

        let text = fs::read_to_string(&log).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], LOG_COLUMNS.join(","));
        assert!(lines[1].contains("STANDARDIZED"));
        assert!(lines[2].contains("REPAIRED"));
    }

    #[test]
    fn test_append_relativizes_at_anchor() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("log.csv");

        append_entries(&log, &[entry("DELETED", "")], Some("trunk")).unwrap();

        let text = fs::read_to_string(&log).unwrap();
        assert!(text.contains("trunk/docs/a.pdf"));
        assert!(!text.contains("/repo/trunk"));
    }

    #[test]
    fn test_append_empty_is_noop() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("log.csv");
        append_entries(&log, &[], None).unwrap();
        assert!(!log.exists());
    }

    #[test]
    fn test_relativize() {
        assert_eq!(
            relativize("C:\\repo\\Trunk\\docs\\a.pdf", "trunk"),
            "Trunk/docs/a.pdf"
        );
        assert_eq!(relativize("trunk/docs/a.pdf", "trunk"), "trunk/docs/a.pdf");
        assert_eq!(relativize("/other/docs/a.pdf", "trunk"), "/other/docs/a.pdf");
        assert_eq!(relativize("", "trunk"), "");
    }

    #[test]
    fn test_shorten_path_keeps_last_parts() {
        assert_eq!(
            shorten_path("C:/docs/Tesoreria/Registros/R.TR.x.pdf", 3),
            "Tesoreria / Registros / R.TR.x.pdf"
        );
        assert_eq!(shorten_path("a.pdf", 3), "a.pdf");
        assert_eq!(shorten_path("", 3), "");
    }

    #[test]
    fn test_csv_escape_quotes_commas() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
