// EloDex Schema - Shared type definitions
// This crate contains the core enums and data structs that are shared between
// the elodex-core simulation crate and its hosting layer: stat vocabularies,
// the nature table, species static data, and capture device kinds.

// Re-export the main types
pub use balls::*;
pub use natures::*;
pub use species::*;
pub use stats::*;

pub mod balls;
pub mod natures;
pub mod species;
pub mod stats;
