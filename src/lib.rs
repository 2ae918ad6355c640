pub mod services;
pub mod types;

pub use services::engine::{evaluate, EngineConfig};
pub use types::decision::{RenameAction, RenameDecision};
