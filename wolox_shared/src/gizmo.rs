//! Gizmo controller.
//!
//! Hit-tests the two axis handles of the selected entity against the frame's
//! input snapshot, moves the entity while a handle is dragged, and draws the
//! handles.
//!
//! Dragging is level-triggered: there is no drag-start or drag-end event and
//! no state carried between frames. Each frame the handle rectangles are
//! rebuilt at the entity's current position and a handle counts as dragged
//! iff the primary button is held and the pointer lies inside it. The pointer
//! delta in the snapshot is relative to the previous poll, so each pointer
//! movement is applied once.
//!
//! ```text
//!              ^  arrowhead (green)
//!             | |
//!             | |  vertical handle, 10 x 100
//!             | |
//!             |_|____________________ >  horizontal handle, 100 x 10 (red)
//!            (x,y)
//! ```

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::{
    ecs::{EntityId, Position, World},
    input::InputSnapshot,
    math::{Color, Rect, Vec2},
    render::RenderSurface,
    selection::{GizmoMode, Selection},
};

/// Length of a handle along its axis.
pub const HANDLE_LENGTH: f32 = 100.0;
/// Width of a handle across its axis.
pub const HANDLE_THICKNESS: f32 = 10.0;
/// Distance from the handle tip to the arrowhead point.
pub const ARROW_SIZE: f32 = 10.0;

pub const VERTICAL_COLOR: Color = Color::GREEN;
pub const HORIZONTAL_COLOR: Color = Color::RED;

/// One axis handle: its hit rectangle and arrowhead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub rect: Rect,
    pub arrow: [Vec2; 3],
    pub color: Color,
}

impl Handle {
    /// Handle pointing up, bottom-centre at `anchor`.
    pub fn vertical(anchor: Vec2) -> Self {
        let Vec2 { x, y } = anchor;
        let half = HANDLE_THICKNESS / 2.0;
        Self {
            rect: Rect::new(x - half, y - HANDLE_LENGTH, HANDLE_THICKNESS, HANDLE_LENGTH),
            arrow: [
                Vec2::new(x - ARROW_SIZE, y - HANDLE_LENGTH),
                Vec2::new(x, y - HANDLE_LENGTH - ARROW_SIZE),
                Vec2::new(x + ARROW_SIZE, y - HANDLE_LENGTH),
            ],
            color: VERTICAL_COLOR,
        }
    }

    /// Handle pointing right, left-centre at `anchor`.
    pub fn horizontal(anchor: Vec2) -> Self {
        let Vec2 { x, y } = anchor;
        let half = HANDLE_THICKNESS / 2.0;
        Self {
            rect: Rect::new(x, y - half, HANDLE_LENGTH, HANDLE_THICKNESS),
            arrow: [
                Vec2::new(x + HANDLE_LENGTH, y - ARROW_SIZE),
                Vec2::new(x + HANDLE_LENGTH + ARROW_SIZE, y),
                Vec2::new(x + HANDLE_LENGTH, y + ARROW_SIZE),
            ],
            color: HORIZONTAL_COLOR,
        }
    }

    /// Grabbed this frame: primary button held with the pointer inside.
    pub fn is_grabbed(&self, input: &InputSnapshot) -> bool {
        input.primary_button_down() && self.rect.contains(input.pointer())
    }

    fn draw(&self, surface: &mut dyn RenderSurface) {
        surface.draw_filled_rect(self.rect, self.color);
        surface.draw_triangle(self.arrow, self.color);
    }
}

/// Both handles anchored at an entity position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GizmoGeometry {
    pub vertical: Handle,
    pub horizontal: Handle,
}

impl GizmoGeometry {
    pub fn at(anchor: Vec2) -> Self {
        Self {
            vertical: Handle::vertical(anchor),
            horizontal: Handle::horizontal(anchor),
        }
    }

    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        self.vertical.draw(surface);
        self.horizontal.draw(surface);
    }
}

/// Drag state for one frame, recomputed from scratch every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GizmoState {
    #[default]
    Idle,
    VerticalDragging,
    HorizontalDragging,
    /// Pointer inside the overlap of both handles near the anchor: both axes
    /// move in the same frame.
    BothDragging,
}

impl GizmoState {
    /// Evaluates each handle independently against the snapshot.
    pub fn evaluate(geometry: &GizmoGeometry, input: &InputSnapshot) -> Self {
        match (
            geometry.vertical.is_grabbed(input),
            geometry.horizontal.is_grabbed(input),
        ) {
            (false, false) => GizmoState::Idle,
            (true, false) => GizmoState::VerticalDragging,
            (false, true) => GizmoState::HorizontalDragging,
            (true, true) => GizmoState::BothDragging,
        }
    }

    pub fn vertical_active(self) -> bool {
        matches!(self, GizmoState::VerticalDragging | GizmoState::BothDragging)
    }

    pub fn horizontal_active(self) -> bool {
        matches!(self, GizmoState::HorizontalDragging | GizmoState::BothDragging)
    }

    /// Applies the pointer delta along each active axis.
    pub fn apply(self, position: Position, pointer_delta: (i32, i32)) -> Position {
        let mut moved = position;
        if self.vertical_active() {
            moved.y += pointer_delta.1 as f32;
        }
        if self.horizontal_active() {
            moved.x += pointer_delta.0 as f32;
        }
        moved
    }
}

/// What the controller did this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GizmoOutcome {
    NoSelection,
    /// Selected entity has no Position; nothing was hit-tested or drawn.
    MissingPosition(EntityId),
    Drawn {
        entity: EntityId,
        mode: GizmoMode,
        state: GizmoState,
        /// Position after this frame's update.
        position: Position,
    },
}

impl GizmoOutcome {
    pub fn state(&self) -> GizmoState {
        match self {
            GizmoOutcome::Drawn { state, .. } => *state,
            _ => GizmoState::Idle,
        }
    }
}

/// Per-frame gizmo pass. Holds no state between frames.
#[derive(Debug, Default, Clone, Copy)]
pub struct GizmoController;

impl GizmoController {
    /// Runs one frame: hit-test, update the selected entity's Position when
    /// translating, and draw the handles for the active mode.
    pub fn tick(
        &self,
        world: &mut World,
        selection: &Selection,
        input: &InputSnapshot,
        surface: &mut dyn RenderSurface,
    ) -> GizmoOutcome {
        let Some(entity) = selection.selected() else {
            return GizmoOutcome::NoSelection;
        };

        let Some(position) = world.get_component::<Position>(entity).copied() else {
            warn!(%entity, "Selected entity doesn't have a Position component");
            return GizmoOutcome::MissingPosition(entity);
        };

        // Handles are drawn where the entity was at the start of the frame.
        let geometry = GizmoGeometry::at(Vec2::new(position.x, position.y));
        let mode = selection.gizmo_mode();

        let (state, position) = match mode {
            GizmoMode::Translate => {
                let state = GizmoState::evaluate(&geometry, input);
                let moved = state.apply(position, input.pointer_delta);
                if moved != position {
                    trace!(%entity, ?state, x = moved.x, y = moved.y, "Gizmo drag");
                    world.set_component(entity, moved);
                }
                (state, moved)
            }
            // Visual only.
            GizmoMode::Scale | GizmoMode::Rotate => (GizmoState::Idle, position),
        };

        geometry.draw(surface);

        GizmoOutcome::Drawn {
            entity,
            mode,
            state,
            position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PointerButtons;
    use crate::render::{NullRenderer, RecordingSurface};

    fn setup(at: Position) -> (World, Selection, EntityId) {
        let mut world = World::new();
        world.register_transform_components();
        let e = world.create_entity();
        world.set_component(e, at);
        let mut selection = Selection::default();
        selection.select(e);
        (world, selection, e)
    }

    fn held(pointer: (i32, i32), delta: (i32, i32)) -> InputSnapshot {
        InputSnapshot {
            pointer_position: pointer,
            pointer_delta: delta,
            buttons: PointerButtons::PRIMARY,
            quit_requested: false,
        }
    }

    #[test]
    fn geometry_matches_anchor() {
        let g = GizmoGeometry::at(Vec2::new(200.0, 250.0));
        assert_eq!(g.vertical.rect, Rect::new(195.0, 150.0, 10.0, 100.0));
        assert_eq!(g.horizontal.rect, Rect::new(200.0, 245.0, 100.0, 10.0));
        assert_eq!(g.vertical.arrow[1], Vec2::new(200.0, 140.0));
        assert_eq!(g.horizontal.arrow[1], Vec2::new(310.0, 250.0));
    }

    #[test]
    fn state_from_pointer_location() {
        let g = GizmoGeometry::at(Vec2::new(200.0, 250.0));
        assert_eq!(GizmoState::evaluate(&g, &held((200, 200), (0, 0))), GizmoState::VerticalDragging);
        assert_eq!(GizmoState::evaluate(&g, &held((250, 250), (0, 0))), GizmoState::HorizontalDragging);
        assert_eq!(GizmoState::evaluate(&g, &held((202, 247), (0, 0))), GizmoState::BothDragging);
        assert_eq!(GizmoState::evaluate(&g, &held((10, 10), (0, 0))), GizmoState::Idle);
    }

    #[test]
    fn vertical_drag_moves_only_y() {
        let (mut world, selection, e) = setup(Position::new(200.0, 250.0));
        let out = GizmoController.tick(&mut world, &selection, &held((200, 200), (7, -5)), &mut NullRenderer);
        assert_eq!(out.state(), GizmoState::VerticalDragging);
        assert_eq!(world.get_component::<Position>(e), Some(&Position::new(200.0, 245.0)));
    }

    #[test]
    fn horizontal_drag_moves_only_x() {
        let (mut world, selection, e) = setup(Position::new(200.0, 250.0));
        GizmoController.tick(&mut world, &selection, &held((260, 252), (12, 9)), &mut NullRenderer);
        assert_eq!(world.get_component::<Position>(e), Some(&Position::new(212.0, 250.0)));
    }

    #[test]
    fn overlap_moves_diagonally() {
        let (mut world, selection, e) = setup(Position::new(200.0, 250.0));
        let out = GizmoController.tick(&mut world, &selection, &held((201, 246), (3, 4)), &mut NullRenderer);
        assert_eq!(out.state(), GizmoState::BothDragging);
        assert_eq!(world.get_component::<Position>(e), Some(&Position::new(203.0, 254.0)));
    }

    #[test]
    fn released_button_never_moves() {
        let (mut world, selection, e) = setup(Position::new(200.0, 250.0));
        let mut input = held((200, 200), (4, 4));
        input.buttons = PointerButtons::empty();
        GizmoController.tick(&mut world, &selection, &input, &mut NullRenderer);
        input.buttons = PointerButtons::PRIMARY | PointerButtons::SECONDARY;
        GizmoController.tick(&mut world, &selection, &input, &mut NullRenderer);
        assert_eq!(world.get_component::<Position>(e), Some(&Position::new(200.0, 250.0)));
    }

    #[test]
    fn scale_and_rotate_draw_without_moving() {
        for mode in [GizmoMode::Scale, GizmoMode::Rotate] {
            let (mut world, mut selection, e) = setup(Position::new(200.0, 250.0));
            selection.set_gizmo_mode(mode);
            let mut surface = RecordingSurface::default();
            let out = GizmoController.tick(&mut world, &selection, &held((200, 200), (0, -5)), &mut surface);
            assert_eq!(out.state(), GizmoState::Idle);
            assert_eq!(world.get_component::<Position>(e), Some(&Position::new(200.0, 250.0)));
            assert_eq!(surface.rects().count(), 2);
            assert_eq!(surface.triangles().count(), 2);
        }
    }

    #[test]
    fn missing_position_is_a_no_op() {
        let mut world = World::new();
        world.register_transform_components();
        let e = world.create_entity();
        world.add_component::<crate::ecs::Scale>(e);
        let mut selection = Selection::default();
        selection.select(e);

        let mut surface = RecordingSurface::default();
        let out = GizmoController.tick(&mut world, &selection, &held((200, 200), (1, 1)), &mut surface);
        assert_eq!(out, GizmoOutcome::MissingPosition(e));
        assert!(surface.commands().is_empty());
        assert!(world.get_component::<Position>(e).is_none());
    }

    #[test]
    fn handles_drawn_at_frame_start_position() {
        let (mut world, selection, _) = setup(Position::new(200.0, 250.0));
        let mut surface = RecordingSurface::default();
        GizmoController.tick(&mut world, &selection, &held((200, 200), (0, -5)), &mut surface);
        let rects: Vec<_> = surface.rects().map(|(r, _)| *r).collect();
        assert_eq!(rects[0], Rect::new(195.0, 150.0, 10.0, 100.0));
    }
}
