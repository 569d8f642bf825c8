//! Per-frame input snapshots.
//!
//! A snapshot is captured exactly once per frame, before any consumer runs,
//! and fully replaces the previous one. Nothing is buffered across frames.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::math::Vec2;

bitflags::bitflags! {
    /// Pointer buttons held at poll time.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct PointerButtons: u8 {
        const PRIMARY = 1 << 0;
        const MIDDLE = 1 << 1;
        const SECONDARY = 1 << 2;
    }
}

impl Default for PointerButtons {
    fn default() -> Self {
        Self::empty()
    }
}

/// Pointer and window state at a moment in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InputSnapshot {
    /// Window coordinates, origin top-left.
    pub pointer_position: (i32, i32),
    /// Relative motion since the previous poll.
    pub pointer_delta: (i32, i32),
    pub buttons: PointerButtons,
    /// Window close or Escape observed while draining events.
    pub quit_requested: bool,
}

impl InputSnapshot {
    /// True only when the primary button is the sole button held.
    pub fn primary_button_down(&self) -> bool {
        self.buttons == PointerButtons::PRIMARY
    }

    pub fn pointer(&self) -> Vec2 {
        Vec2::from(self.pointer_position)
    }
}

/// Anything that can produce one snapshot per frame without blocking.
pub trait InputSource {
    fn poll(&mut self) -> InputSnapshot;
}

/// Derives relative pointer motion from consecutive absolute samples.
///
/// The delta is always measured against the previous poll, never against a
/// frame boundary, so the level-triggered gizmo drag applies each movement
/// exactly once.
#[derive(Debug, Default)]
pub struct PointerTracker {
    last: Option<(i32, i32)>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `position` and returns the motion since the previous call.
    /// The first sample yields a zero delta.
    pub fn sample(&mut self, position: (i32, i32)) -> (i32, i32) {
        let delta = match self.last {
            Some((lx, ly)) => (position.0 - lx, position.1 - ly),
            None => (0, 0),
        };
        self.last = Some(position);
        delta
    }

    /// Builds a full snapshot from an absolute sample.
    pub fn snapshot(
        &mut self,
        position: (i32, i32),
        buttons: PointerButtons,
        quit_requested: bool,
    ) -> InputSnapshot {
        InputSnapshot {
            pointer_position: position,
            pointer_delta: self.sample(position),
            buttons,
            quit_requested,
        }
    }
}

/// Replays pre-recorded snapshots. Once exhausted it reports a quit.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    frames: VecDeque<InputSnapshot>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = InputSnapshot>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> InputSnapshot {
        self.frames.pop_front().unwrap_or(InputSnapshot {
            quit_requested: true,
            ..InputSnapshot::default()
        })
    }
}
