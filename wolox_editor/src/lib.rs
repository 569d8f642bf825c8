//! `wolox_editor`
//!
//! Editor-side systems:
//! - Editor state and the per-frame pipeline (physics step, overlays, toolbar)
//! - Frame pacing and FPS measurement
//! - Command-line parsing
//! - Debug frame trace (`--debug-output`)
//! - Macroquad window backend

pub mod backend;
pub mod cli;
pub mod editor;
pub mod pacer;
pub mod trace;

pub use editor::Editor;
