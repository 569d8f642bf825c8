//! Configuration system.
//!
//! Editor configuration is JSON; every field is optional and falls back to
//! the built-in default.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{math::Vec2, physics::PhysicsConfig, selection::GizmoMode};

/// Root configuration for the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(default = "default_window_title")]
    pub window_title: String,
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    #[serde(default = "default_window_height")]
    pub window_height: u32,
    /// TTF font for overlays; the backend's built-in font is used if it
    /// cannot be loaded.
    #[serde(default = "default_font_path")]
    pub font_path: String,
    #[serde(default = "default_font_size")]
    pub font_size: u16,
    /// Where "Add Entity" places new entities.
    #[serde(default = "default_new_entity_position")]
    pub new_entity_position: Vec2,
    /// Fixed sleep after each presented frame, in milliseconds.
    #[serde(default = "default_frame_delay_ms")]
    pub frame_delay_ms: u64,
    #[serde(default)]
    pub initial_gizmo_mode: GizmoMode,
    /// Draw the toolbar and gizmos. Defaults to on in debug builds only.
    #[serde(default = "default_editor_overlay")]
    pub editor_overlay: bool,
    #[serde(default)]
    pub physics: PhysicsConfig,
}

fn default_window_title() -> String {
    "wolox".to_string()
}

fn default_window_width() -> u32 {
    620
}

fn default_window_height() -> u32 {
    400
}

fn default_font_path() -> String {
    "assets/hack.ttf".to_string()
}

fn default_font_size() -> u16 {
    14
}

fn default_new_entity_position() -> Vec2 {
    Vec2::new(200.0, 250.0)
}

fn default_frame_delay_ms() -> u64 {
    10
}

fn default_editor_overlay() -> bool {
    cfg!(debug_assertions)
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
            window_width: default_window_width(),
            window_height: default_window_height(),
            font_path: default_font_path(),
            font_size: default_font_size(),
            new_entity_position: default_new_entity_position(),
            frame_delay_ms: default_frame_delay_ms(),
            initial_gizmo_mode: GizmoMode::default(),
            editor_overlay: default_editor_overlay(),
            physics: PhysicsConfig::default(),
        }
    }
}

impl EditorConfig {
    /// Parses config from JSON.
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    /// Reads and parses a JSON config file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("parse config {}", path.display()))
    }
}
