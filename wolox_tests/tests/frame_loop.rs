//! Full frame loop runs: scripted input, physics, toolbar and frame trace.

use wolox_editor::{
    editor::{finish_frame, run_frame, run_frames, Editor, ToolbarAction},
    trace::{read_trace, FrameTrace},
};
use wolox_shared::prelude::*;
use wolox_tests::{drag, headless_editor, init_tracing, zero_pacer};

#[test]
fn scripted_session_moves_entity_and_quits() -> anyhow::Result<()> {
    init_tracing();
    let mut editor = headless_editor();
    let mut surface = RecordingSurface::default();
    surface.click("Add Entity");

    let mut input = ScriptedInput::new([
        InputSnapshot::default(),
        drag((200, 200), (0, -5)),
        drag((200, 195), (0, -5)),
        InputSnapshot {
            quit_requested: true,
            ..InputSnapshot::default()
        },
        // Never reached.
        drag((200, 190), (0, -5)),
    ]);

    let frames = run_frames(&mut editor, &mut input, &mut surface, &mut zero_pacer(), None)?;

    assert_eq!(frames, 3);
    assert_eq!(input.remaining(), 1);
    assert_eq!(editor.selected_position(), Some(Position::new(200.0, 240.0)));
    Ok(())
}

#[test]
fn physics_steps_once_per_frame_with_fixed_timestep() -> anyhow::Result<()> {
    let config = EditorConfig {
        frame_delay_ms: 0,
        ..EditorConfig::default()
    };
    let mut editor = Editor::new(config, Box::new(RapierPhysics::default()));
    editor.populate_default_scene();
    let body = editor.scene_bodies()[0];

    let mut input = ScriptedInput::new(vec![InputSnapshot::default(); 30]);
    let mut surface = RecordingSurface::default();
    let frames = run_frames(&mut editor, &mut input, &mut surface, &mut zero_pacer(), None)?;
    assert_eq!(frames, 30);

    // 0.3 simulated seconds of free fall under gravity 9.
    let y = editor.physics().body_position(body).map(|p| p.y).unwrap_or_default();
    assert!(y > 0.1 && y < 1.0, "unexpected fall distance {y}");
    Ok(())
}

#[test]
fn debug_trace_records_every_frame() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let mut trace = FrameTrace::create(dir.path())?;

    let mut editor = headless_editor();
    let mut surface = RecordingSurface::default();
    surface.click("Add Entity");
    let mut input = ScriptedInput::new([
        InputSnapshot::default(),
        drag((250, 250), (4, 0)),
    ]);

    run_frames(
        &mut editor,
        &mut input,
        &mut surface,
        &mut zero_pacer(),
        Some(&mut trace),
    )?;
    let path = trace.finish()?;

    let records = read_trace(&path)?;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].actions, vec![ToolbarAction::AddEntity.label().to_string()]);
    assert_eq!(records[0].gizmo_state, GizmoState::Idle);
    assert_eq!(records[1].gizmo_state, GizmoState::HorizontalDragging);
    assert_eq!(records[1].position, Some(Position::new(204.0, 250.0)));
    assert_eq!(records[1].selected, Some(0));
    Ok(())
}

#[test]
fn mode_buttons_switch_gizmo_on_next_frame() -> anyhow::Result<()> {
    let mut editor = headless_editor();
    editor.add_entity();
    let mut surface = RecordingSurface::default();

    surface.click("Scale");
    let first = editor.frame(&drag((200, 200), (0, -5)), &mut surface);
    let second = editor.frame(&drag((200, 200), (0, -5)), &mut surface);

    // The click lands after this frame's gizmo pass.
    assert_eq!(first.gizmo_state(), GizmoState::VerticalDragging);
    assert_eq!(second.gizmo_state(), GizmoState::Idle);
    assert_eq!(editor.selected_position(), Some(Position::new(200.0, 245.0)));
    Ok(())
}

#[test]
fn stepwise_loop_matches_run_frames() -> anyhow::Result<()> {
    let script = || {
        ScriptedInput::new([
            InputSnapshot::default(),
            drag((200, 200), (0, -5)),
            drag((200, 195), (0, -5)),
        ])
    };

    let mut whole = headless_editor();
    whole.add_entity();
    let frames = run_frames(
        &mut whole,
        &mut script(),
        &mut RecordingSurface::default(),
        &mut zero_pacer(),
        None,
    )?;

    let mut stepped = headless_editor();
    stepped.add_entity();
    let mut input = script();
    let mut surface = RecordingSurface::default();
    let mut pacer = zero_pacer();
    let mut presented = 0;
    while run_frame(&mut stepped, &mut input, &mut surface, None)?.is_some() {
        presented += 1;
        finish_frame(&mut stepped, &mut pacer);
    }

    assert_eq!(presented, frames);
    assert_eq!(stepped.frames_run(), whole.frames_run());
    assert_eq!(stepped.selected_position(), whole.selected_position());
    assert_eq!(stepped.selected_position(), Some(Position::new(200.0, 240.0)));
    assert!(stepped.fps() > 0);
    Ok(())
}

#[test]
fn toolbar_follows_window_size() {
    let mut editor = headless_editor();
    let mut surface = RecordingSurface::default();
    surface.resize(800.0, 600.0);
    editor.frame(&InputSnapshot::default(), &mut surface);

    let buttons: Vec<_> = surface.buttons().map(|(rect, _)| *rect).collect();
    assert_eq!(buttons.len(), 4);
    assert_eq!(buttons[0], Rect::new(0.0, 550.0, 200.0, 50.0));
    assert_eq!(buttons[3].x, 600.0);
}
