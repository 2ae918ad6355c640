use serde::Serialize;

/// What the engine wants done with a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RenameAction {
    /// File already conforms (or no enabled pass produced a change).
    NoChange,
    /// Cosmetic cleanup of the name portion only.
    CleanOnly,
    /// File matches the template but one or more fields drifted.
    RepairFields,
    /// File does not match the template; a conforming name was built.
    FullConstruct,
    /// File is a temp/junk artifact and deletion is enabled.
    DeleteTemp,
}

impl RenameAction {
    /// Label used in the audit log for this action. `None` for no-ops.
    pub fn audit_label(&self, preview: bool) -> Option<&'static str> {
        let label = match (self, preview) {
            (RenameAction::NoChange, _) => return None,
            (RenameAction::CleanOnly, false) => "CLEANED",
            (RenameAction::CleanOnly, true) => "CLEAN_PREVIEW",
            (RenameAction::RepairFields, false) => "REPAIRED",
            (RenameAction::RepairFields, true) => "REPAIR_PREVIEW",
            (RenameAction::FullConstruct, false) => "STANDARDIZED",
            (RenameAction::FullConstruct, true) => "STANDARDIZE_PREVIEW",
            (RenameAction::DeleteTemp, false) => "DELETED",
            (RenameAction::DeleteTemp, true) => "DELETE_PREVIEW",
        };
        Some(label)
    }
}

/// The engine's output for one filename. Immutable once produced; the
/// execution layer turns it into an actual rename/delete.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenameDecision {
    pub action: RenameAction,
    /// Proposed replacement filename (no directory part). `None` for
    /// `NoChange` and `DeleteTemp`.
    pub new_name: Option<String>,
    /// Human-readable description of which fields changed and why.
    pub note: String,
}

impl RenameDecision {
    pub fn no_change() -> Self {
        Self {
            action: RenameAction::NoChange,
            new_name: None,
            note: String::new(),
        }
    }
}
