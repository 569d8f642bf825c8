//! Rendering abstraction.
//!
//! This crate intentionally does not depend on a graphics backend. The editor
//! binary implements [`RenderSurface`] on top of its window; tests use
//! [`RecordingSurface`] to inspect what a frame drew.

use std::collections::HashSet;

use crate::math::{Color, Rect, Vec2};

/// Immediate-mode drawing and widget surface for one frame.
pub trait RenderSurface {
    fn begin_frame(&mut self);
    fn draw_filled_rect(&mut self, rect: Rect, color: Color);
    fn draw_triangle(&mut self, points: [Vec2; 3], color: Color);
    fn draw_text(&mut self, pos: Vec2, color: Color, text: &str);
    /// Draws a push button and reports whether it was clicked this frame.
    fn button(&mut self, rect: Rect, label: &str) -> bool;
    /// Current drawable size in window coordinates.
    fn screen_size(&self) -> Vec2;
    fn end_frame(&mut self);
}

/// A no-op renderer.
#[derive(Default)]
pub struct NullRenderer;

impl RenderSurface for NullRenderer {
    fn begin_frame(&mut self) {}
    fn draw_filled_rect(&mut self, _rect: Rect, _color: Color) {}
    fn draw_triangle(&mut self, _points: [Vec2; 3], _color: Color) {}
    fn draw_text(&mut self, _pos: Vec2, _color: Color, _text: &str) {}
    fn button(&mut self, _rect: Rect, _label: &str) -> bool {
        false
    }
    fn screen_size(&self) -> Vec2 {
        Vec2::ZERO
    }
    fn end_frame(&mut self) {}
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FilledRect { rect: Rect, color: Color },
    Triangle { points: [Vec2; 3], color: Color },
    Text { pos: Vec2, color: Color, text: String },
    Button { rect: Rect, label: String },
}

/// Headless surface that records the current frame's draw calls.
///
/// Button clicks are scripted with [`RecordingSurface::click`]; a queued
/// click is consumed by the next frame that draws a button with that label.
#[derive(Debug)]
pub struct RecordingSurface {
    size: Vec2,
    commands: Vec<DrawCommand>,
    pending_clicks: HashSet<String>,
    frames_presented: u64,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            commands: Vec::new(),
            pending_clicks: HashSet::new(),
            frames_presented: 0,
        }
    }

    /// Queues a click on the button labelled `label`.
    pub fn click(&mut self, label: &str) {
        self.pending_clicks.insert(label.to_string());
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
    }

    /// Draw calls of the most recent frame.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn rects(&self) -> impl Iterator<Item = (&Rect, &Color)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FilledRect { rect, color } => Some((rect, color)),
            _ => None,
        })
    }

    pub fn triangles(&self) -> impl Iterator<Item = (&[Vec2; 3], &Color)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Triangle { points, color } => Some((points, color)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn buttons(&self) -> impl Iterator<Item = (&Rect, &str)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Button { rect, label } => Some((rect, label.as_str())),
            _ => None,
        })
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new(620.0, 400.0)
    }
}

impl RenderSurface for RecordingSurface {
    fn begin_frame(&mut self) {
        self.commands.clear();
    }

    fn draw_filled_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FilledRect { rect, color });
    }

    fn draw_triangle(&mut self, points: [Vec2; 3], color: Color) {
        self.commands.push(DrawCommand::Triangle { points, color });
    }

    fn draw_text(&mut self, pos: Vec2, color: Color, text: &str) {
        self.commands.push(DrawCommand::Text {
            pos,
            color,
            text: text.to_string(),
        });
    }

    fn button(&mut self, rect: Rect, label: &str) -> bool {
        self.commands.push(DrawCommand::Button {
            rect,
            label: label.to_string(),
        });
        self.pending_clicks.remove(label)
    }

    fn screen_size(&self) -> Vec2 {
        self.size
    }

    fn end_frame(&mut self) {
        self.frames_presented += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_one_frame_at_a_time() {
        let mut surface = RecordingSurface::default();
        surface.begin_frame();
        surface.draw_text(Vec2::ZERO, Color::RED, "hello");
        surface.end_frame();
        assert_eq!(surface.texts().collect::<Vec<_>>(), vec!["hello"]);

        surface.begin_frame();
        surface.end_frame();
        assert!(surface.commands().is_empty());
        assert_eq!(surface.frames_presented(), 2);
    }

    #[test]
    fn queued_click_fires_once() {
        let mut surface = RecordingSurface::default();
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        surface.click("Scale");
        assert!(!surface.button(rect, "Rotate"));
        assert!(surface.button(rect, "Scale"));
        assert!(!surface.button(rect, "Scale"));
    }
}
