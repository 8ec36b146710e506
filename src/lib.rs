//! Ladder MM Bot - Main Library
//!
//! Thin re-export of the workspace library for the binaries under
//! `src/bin/`.

// Re-export workspace libraries for convenience
pub use ladderbot;
