//! Application orchestration layer
//!
//! High-level functions that wire the configuration, the map controller, the
//! news feed and the TUI together without containing detailed logic.

/// Explorer startup with the configured backend and datasets
pub mod launch;

// Re-export commonly used functions for convenience
pub use launch::{build_state, launch_explorer};
