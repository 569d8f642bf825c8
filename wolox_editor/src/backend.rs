//! Macroquad window backend.
//!
//! Input is polled from macroquad's per-frame state, which it fills by
//! draining the platform event queue before the frame starts, so polling
//! never blocks. Presenting is `next_frame().await`, owned by the binary.

use macroquad::prelude as mq;
use macroquad::ui::{root_ui, widgets};

use wolox_shared::{
    input::{InputSnapshot, InputSource, PointerButtons, PointerTracker},
    math::{Color, Rect, Vec2},
    render::RenderSurface,
};

fn to_mq(color: Color) -> mq::Color {
    mq::Color::from_rgba(color.r, color.g, color.b, color.a)
}

fn to_vec(v: Vec2) -> mq::Vec2 {
    mq::vec2(v.x, v.y)
}

/// Pointer and quit state from the macroquad window.
///
/// Call [`mq::prevent_quit`] once at startup so window close requests reach
/// [`mq::is_quit_requested`] instead of terminating the process.
#[derive(Debug, Default)]
pub struct MacroquadInput {
    tracker: PointerTracker,
}

impl MacroquadInput {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InputSource for MacroquadInput {
    fn poll(&mut self) -> InputSnapshot {
        let (mx, my) = mq::mouse_position();

        let mut buttons = PointerButtons::empty();
        buttons.set(PointerButtons::PRIMARY, mq::is_mouse_button_down(mq::MouseButton::Left));
        buttons.set(PointerButtons::MIDDLE, mq::is_mouse_button_down(mq::MouseButton::Middle));
        buttons.set(PointerButtons::SECONDARY, mq::is_mouse_button_down(mq::MouseButton::Right));

        let quit = mq::is_quit_requested() || mq::is_key_pressed(mq::KeyCode::Escape);

        self.tracker.snapshot((mx as i32, my as i32), buttons, quit)
    }
}

/// Draws through macroquad's immediate-mode API and root UI.
pub struct MacroquadSurface {
    font: Option<mq::Font>,
    font_size: u16,
}

impl MacroquadSurface {
    pub fn new(font: Option<mq::Font>, font_size: u16) -> Self {
        Self { font, font_size }
    }
}

impl RenderSurface for MacroquadSurface {
    fn begin_frame(&mut self) {
        mq::clear_background(mq::BLACK);
    }

    fn draw_filled_rect(&mut self, rect: Rect, color: Color) {
        mq::draw_rectangle(rect.x, rect.y, rect.w, rect.h, to_mq(color));
    }

    fn draw_triangle(&mut self, points: [Vec2; 3], color: Color) {
        mq::draw_triangle(
            to_vec(points[0]),
            to_vec(points[1]),
            to_vec(points[2]),
            to_mq(color),
        );
    }

    fn draw_text(&mut self, pos: Vec2, color: Color, text: &str) {
        // macroquad positions text by its baseline.
        let baseline = pos.y + self.font_size as f32;
        mq::draw_text_ex(
            text,
            pos.x + 4.0,
            baseline,
            mq::TextParams {
                font: self.font.as_ref(),
                font_size: self.font_size,
                color: to_mq(color),
                ..Default::default()
            },
        );
    }

    fn button(&mut self, rect: Rect, label: &str) -> bool {
        widgets::Button::new(label)
            .position(mq::vec2(rect.x, rect.y))
            .size(mq::vec2(rect.w, rect.h))
            .ui(&mut root_ui())
    }

    fn screen_size(&self) -> Vec2 {
        Vec2::new(mq::screen_width(), mq::screen_height())
    }

    // Presented by `next_frame().await` in the binary.
    fn end_frame(&mut self) {}
}
