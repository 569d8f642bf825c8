//! Headless fixtures and named editor scenarios.
//!
//! The scenarios are shared by the integration tests and the
//! `scenario_runner` binary.

use std::time::Duration;

use wolox_editor::{editor::Editor, pacer::FramePacer};
use wolox_shared::{
    config::EditorConfig,
    ecs::Position,
    gizmo::GizmoState,
    input::{InputSnapshot, PointerButtons},
    physics::NullPhysics,
    render::RecordingSurface,
};

/// Editor with the overlay forced on, no frame delay and no physics.
pub fn headless_editor() -> Editor {
    let config = EditorConfig {
        editor_overlay: true,
        frame_delay_ms: 0,
        ..EditorConfig::default()
    };
    Editor::new(config, Box::new(NullPhysics::default()))
}

pub fn zero_pacer() -> FramePacer {
    FramePacer::new(Duration::ZERO)
}

/// Primary button held at `pointer`, moved by `delta` since the last poll.
pub fn drag(pointer: (i32, i32), delta: (i32, i32)) -> InputSnapshot {
    InputSnapshot {
        pointer_position: pointer,
        pointer_delta: delta,
        buttons: PointerButtons::PRIMARY,
        quit_requested: false,
    }
}

/// Pointer at `pointer` with no buttons held.
pub fn hover(pointer: (i32, i32), delta: (i32, i32)) -> InputSnapshot {
    InputSnapshot {
        buttons: PointerButtons::empty(),
        ..drag(pointer, delta)
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

/// A named end-to-end check.
pub struct Scenario {
    pub id: &'static str,
    pub description: &'static str,
    pub run: fn() -> Result<(), String>,
}

fn expect_position(editor: &Editor, want: Position) -> Result<(), String> {
    match editor.selected_position() {
        Some(got) if got == want => Ok(()),
        other => Err(format!("expected position {want:?}, got {other:?}")),
    }
}

fn add_entity_via_toolbar() -> Result<(), String> {
    let mut editor = headless_editor();
    let mut surface = RecordingSurface::default();
    surface.click("Add Entity");
    editor.frame(&InputSnapshot::default(), &mut surface);

    let entity = editor
        .world()
        .entities()
        .next()
        .ok_or("no entity was created")?;
    if editor.selection().selected() != Some(entity) {
        return Err("new entity is not selected".into());
    }
    expect_position(&editor, Position::new(200.0, 250.0))
}

fn drag_vertical_handle() -> Result<(), String> {
    let mut editor = headless_editor();
    let mut surface = RecordingSurface::default();
    editor.add_entity();

    let report = editor.frame(&drag((200, 200), (0, -5)), &mut surface);
    if report.gizmo_state() != GizmoState::VerticalDragging {
        return Err(format!("unexpected gizmo state {:?}", report.gizmo_state()));
    }
    expect_position(&editor, Position::new(200.0, 245.0))
}

fn press_outside_handles() -> Result<(), String> {
    let mut editor = headless_editor();
    let mut surface = RecordingSurface::default();
    editor.add_entity();

    editor.frame(&drag((50, 50), (9, 9)), &mut surface);
    expect_position(&editor, Position::new(200.0, 250.0))
}

fn hover_does_not_drag() -> Result<(), String> {
    let mut editor = headless_editor();
    let mut surface = RecordingSurface::default();
    editor.add_entity();

    editor.frame(&hover((200, 200), (0, -5)), &mut surface);
    expect_position(&editor, Position::new(200.0, 250.0))
}

/// All built-in scenarios.
pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            id: "SCN-001",
            description: "Add Entity creates an entity at (200, 250) and selects it",
            run: add_entity_via_toolbar,
        },
        Scenario {
            id: "SCN-002",
            description: "Dragging the vertical handle by (0, -5) moves the entity to (200, 245)",
            run: drag_vertical_handle,
        },
        Scenario {
            id: "SCN-003",
            description: "Pressing outside both handles leaves the entity in place",
            run: press_outside_handles,
        },
        Scenario {
            id: "SCN-004",
            description: "Moving over a handle without a button held leaves the entity in place",
            run: hover_does_not_drag,
        },
    ]
}
