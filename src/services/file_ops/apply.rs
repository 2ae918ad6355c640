//! Decision execution: the one place a `RenameDecision` touches disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::services::audit::AuditEntry;
use crate::services::scanner::walker::FileEntry;
use crate::types::decision::{RenameAction, RenameDecision};

/// Find a sibling name that does not exist yet by appending `_<n>`
/// before the extension: `informe.pdf`, `informe_1.pdf`, `informe_2.pdf`…
pub fn unique_path(directory: &Path, filename: &str) -> PathBuf {
    let (stem, ext) = split_extension(filename);
    let mut candidate = filename.to_string();
    let mut counter = 1;
    while directory.join(&candidate).exists() {
        candidate = format!("{stem}_{counter}{ext}");
        counter += 1;
    }
    directory.join(candidate)
}

/// Execute a decision against the filesystem and describe the outcome.
///
/// Returns `None` for no-ops. Filesystem faults are not dropped: they
/// come back as `ERROR_DELETE` / `ERROR_RENAME` entries carrying the
/// OS error text in the note.
pub fn apply_decision(entry: &FileEntry, decision: &RenameDecision) -> Option<AuditEntry> {
    let original = entry.path.to_string_lossy().to_string();

    match decision.action {
        RenameAction::NoChange => None,
        RenameAction::DeleteTemp => Some(match fs::remove_file(&entry.path) {
            Ok(()) => AuditEntry::now(&original, "DELETED", "", &decision.note),
            Err(e) => AuditEntry::now(&original, "ERROR_DELETE", "", &e.to_string()),
        }),
        RenameAction::CleanOnly | RenameAction::RepairFields | RenameAction::FullConstruct => {
            let new_name = decision.new_name.as_deref()?;
            if new_name == entry.name {
                return None;
            }
            let target = unique_path(&entry.folder, new_name);
            let label = decision
                .action
                .audit_label(false)
                .expect("rename actions always have a label");
            Some(match fs::rename(&entry.path, &target) {
                Ok(()) => AuditEntry::now(
                    &original,
                    label,
                    &target.to_string_lossy(),
                    &decision.note,
                ),
                Err(e) => AuditEntry::now(&original, "ERROR_RENAME", "", &e.to_string()),
            })
        }
    }
}

/// Split into stem and raw extension (dot included). Leading dots never
/// start an extension.
fn split_extension(filename: &str) -> (&str, &str) {
    let stripped = filename.trim_start_matches('.');
    let offset = filename.len() - stripped.len();
    match stripped.rfind('.') {
        Some(i) => filename.split_at(offset + i),
        None => (filename, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::decision::RenameDecision;
    use std::fs;
    use tempfile::TempDir;

    fn entry_for(dir: &Path, name: &str) -> FileEntry {
        FileEntry {
            path: dir.join(name),
            folder: dir.to_path_buf(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_unique_path_prefers_plain_name() {
        let dir = TempDir::new().unwrap();
        let target = unique_path(dir.path(), "informe.pdf");
        assert_eq!(target, dir.path().join("informe.pdf"));
    }

    #[test]
    fn test_unique_path_appends_counter() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("informe.pdf"), "x").unwrap();
        fs::write(dir.path().join("informe_1.pdf"), "x").unwrap();

        let target = unique_path(dir.path(), "informe.pdf");
        assert_eq!(target, dir.path().join("informe_2.pdf"));
    }

    #[test]
    fn test_apply_rename() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("informe final.pdf"), "x").unwrap();

        let entry = entry_for(dir.path(), "informe final.pdf");
        let decision = RenameDecision {
            action: RenameAction::FullConstruct,
            new_name: Some("T.TR.Informe_final.pdf".to_string()),
            note: "area:TR parent:T".to_string(),
        };

        let audit = apply_decision(&entry, &decision).expect("entry");
        assert_eq!(audit.action, "STANDARDIZED");
        assert!(!dir.path().join("informe final.pdf").exists());
        assert!(dir.path().join("T.TR.Informe_final.pdf").exists());
    }

    #[test]
    fn test_apply_rename_collision_gets_suffix() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("informe final.pdf"), "x").unwrap();
        fs::write(dir.path().join("T.TR.Informe_final.pdf"), "y").unwrap();

        let entry = entry_for(dir.path(), "informe final.pdf");
        let decision = RenameDecision {
            action: RenameAction::FullConstruct,
            new_name: Some("T.TR.Informe_final.pdf".to_string()),
            note: String::new(),
        };

        apply_decision(&entry, &decision).expect("entry");
        assert!(dir.path().join("T.TR.Informe_final_1.pdf").exists());
        // The pre-existing sibling is untouched.
        assert_eq!(
            fs::read_to_string(dir.path().join("T.TR.Informe_final.pdf")).unwrap(),
            "y"
        );
    }

    #[test]
    fn test_apply_delete() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Thumbs.db"), "x").unwrap();

        let entry = entry_for(dir.path(), "Thumbs.db");
        let decision = RenameDecision {
            action: RenameAction::DeleteTemp,
            new_name: None,
            note: "temporary file detected".to_string(),
        };

        let audit = apply_decision(&entry, &decision).expect("entry");
        assert_eq!(audit.action, "DELETED");
        assert!(!dir.path().join("Thumbs.db").exists());
    }

    #[test]
    fn test_apply_missing_file_reports_error() {
        let dir = TempDir::new().unwrap();
        let entry = entry_for(dir.path(), "desaparecido.pdf");
        let decision = RenameDecision {
            action: RenameAction::RepairFields,
            new_name: Some("T.TR.Desaparecido.pdf".to_string()),
            note: String::new(),
        };

        let audit = apply_decision(&entry, &decision).expect("entry");
        assert_eq!(audit.action, "ERROR_RENAME");
        assert!(!audit.note.is_empty());
    }

    #[test]
    fn test_apply_no_change_is_noop() {
        let dir = TempDir::new().unwrap();
        let entry = entry_for(dir.path(), "cualquiera.pdf");
        assert!(apply_decision(&entry, &RenameDecision::no_change()).is_none());
    }
}
