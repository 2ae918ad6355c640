//! Pure decision engine: filenames, folder paths and configuration in,
//! rename decisions out. Nothing in this tree touches the filesystem.

pub mod area;
pub mod builder;
pub mod normalizer;
pub mod numeric;
pub mod pattern;
pub mod temp;

pub use builder::{evaluate, EngineConfig};
