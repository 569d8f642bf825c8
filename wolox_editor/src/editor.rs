//! Editor state and the per-frame pipeline.
//!
//! One [`Editor`] owns the entity store, the selection and the physics world
//! for the lifetime of the program. Each frame runs, in order:
//!
//! ```text
//!  poll input ─► step physics ─► game overlay ─► editor overlay ─► present
//!                                 (FPS text)     (gizmo, toolbar)
//!       ▲                                                            │
//!       └──────────── measure FPS ◄── fixed sleep ◄──────────────────┘
//! ```
//!
//! Input capture, presentation and pacing belong to the caller, so the same
//! pipeline drives the window and headless runs.

use anyhow::Context;
use serde::Serialize;
use tracing::{debug, info};

use wolox_shared::{
    config::EditorConfig,
    ecs::{EntityId, Position, World},
    gizmo::{GizmoController, GizmoOutcome, GizmoState},
    input::{InputSnapshot, InputSource},
    math::{Color, Rect, Vec2},
    physics::{BodyId, PhysicsBackend},
    render::RenderSurface,
    selection::{GizmoMode, Selection},
};

use crate::{pacer::FramePacer, trace::FrameTrace};

/// Height of the bottom toolbar strip.
pub const TOOLBAR_HEIGHT: f32 = 50.0;
/// Background box behind the FPS readout.
pub const FPS_BOX: Rect = Rect::new(0.0, 0.0, 99.0, 25.0);

/// Toolbar button order, left to right.
pub const TOOLBAR_BUTTONS: [ToolbarAction; 4] = [
    ToolbarAction::AddEntity,
    ToolbarAction::SetMode(GizmoMode::Translate),
    ToolbarAction::SetMode(GizmoMode::Scale),
    ToolbarAction::SetMode(GizmoMode::Rotate),
];

/// Something the user asked for through the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ToolbarAction {
    AddEntity,
    SetMode(GizmoMode),
}

impl ToolbarAction {
    pub fn label(self) -> &'static str {
        match self {
            ToolbarAction::AddEntity => "Add Entity",
            ToolbarAction::SetMode(mode) => mode.label(),
        }
    }
}

/// Summary of one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub frame: u64,
    /// FPS shown in this frame's overlay (measured at the end of the last one).
    pub fps: u32,
    pub gizmo: GizmoOutcome,
    pub actions: Vec<ToolbarAction>,
}

impl FrameReport {
    pub fn gizmo_state(&self) -> GizmoState {
        self.gizmo.state()
    }
}

/// Owned editor state.
pub struct Editor {
    config: EditorConfig,
    world: World,
    selection: Selection,
    physics: Box<dyn PhysicsBackend>,
    gizmo: GizmoController,
    fps: u32,
    frame: u64,
    scene_bodies: Vec<BodyId>,
}

impl Editor {
    pub fn new(config: EditorConfig, physics: Box<dyn PhysicsBackend>) -> Self {
        let mut world = World::new();
        world.register_transform_components();

        let selection = Selection::new(config.initial_gizmo_mode);

        info!(
            overlay = config.editor_overlay,
            mode = %config.initial_gizmo_mode,
            "Editor created"
        );

        Self {
            config,
            world,
            selection,
            physics,
            gizmo: GizmoController,
            fps: 0,
            frame: 0,
            scene_bodies: Vec::new(),
        }
    }

    /// Adds the startup scene: a static floor segment and one falling box.
    pub fn populate_default_scene(&mut self) {
        self.physics
            .add_static_segment(Vec2::new(0.0, 100.0), Vec2::new(320.0, 100.0), 1.0);
        let body = self.physics.add_dynamic_box(1.0, 30.0, 0.4, 0.0);
        self.scene_bodies.push(body);
        debug!(?body, "Default scene populated");
    }

    /// The "Add Entity" action: new entity at the configured position, selected.
    pub fn add_entity(&mut self) -> EntityId {
        let entity = self.world.create_entity();
        let at = self.config.new_entity_position;
        self.world.set_component(entity, Position::new(at.x, at.y));
        self.selection.select(entity);
        info!(%entity, x = at.x, y = at.y, "Entity added");
        entity
    }

    pub fn apply(&mut self, action: ToolbarAction) {
        match action {
            ToolbarAction::AddEntity => {
                self.add_entity();
            }
            ToolbarAction::SetMode(mode) => {
                debug!(%mode, "Gizmo mode changed");
                self.selection.set_gizmo_mode(mode);
            }
        }
    }

    /// Runs physics and draws one frame. Presenting is left to the caller.
    pub fn frame(&mut self, input: &InputSnapshot, surface: &mut dyn RenderSurface) -> FrameReport {
        self.physics.step(self.config.physics.timestep);

        surface.begin_frame();
        self.game_ui(surface);
        let (gizmo, actions) = if self.config.editor_overlay {
            self.editor_ui(input, surface)
        } else {
            (GizmoOutcome::NoSelection, Vec::new())
        };
        surface.end_frame();

        let report = FrameReport {
            frame: self.frame,
            fps: self.fps,
            gizmo,
            actions,
        };
        self.frame += 1;
        report
    }

    /// Stores the FPS to show in the next frame's overlay.
    pub fn set_fps(&mut self, fps: u32) {
        self.fps = fps;
    }

    fn game_ui(&self, surface: &mut dyn RenderSurface) {
        surface.draw_filled_rect(FPS_BOX, Color::BLACK);
        surface.draw_text(
            Vec2::new(FPS_BOX.x, FPS_BOX.y),
            Color::RED,
            &format!("FPS: {}", self.fps),
        );
    }

    /// Gizmo for the current selection, then the toolbar. Toolbar clicks take
    /// effect immediately but the gizmo reflects them from the next frame.
    fn editor_ui(
        &mut self,
        input: &InputSnapshot,
        surface: &mut dyn RenderSurface,
    ) -> (GizmoOutcome, Vec<ToolbarAction>) {
        let gizmo = self
            .gizmo
            .tick(&mut self.world, &self.selection, input, surface);

        let size = surface.screen_size();
        let width = size.x / TOOLBAR_BUTTONS.len() as f32;
        let top = size.y - TOOLBAR_HEIGHT;

        let mut actions = Vec::new();
        for (i, action) in TOOLBAR_BUTTONS.into_iter().enumerate() {
            let rect = Rect::new(i as f32 * width, top, width, TOOLBAR_HEIGHT);
            if surface.button(rect, action.label()) {
                actions.push(action);
            }
        }
        for action in &actions {
            self.apply(*action);
        }

        (gizmo, actions)
    }

    //--- Accessors --------------------------------------------------------

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    pub fn physics(&self) -> &dyn PhysicsBackend {
        self.physics.as_ref()
    }

    pub fn scene_bodies(&self) -> &[BodyId] {
        &self.scene_bodies
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn frames_run(&self) -> u64 {
        self.frame
    }

    pub fn selected_position(&self) -> Option<Position> {
        self.selection
            .selected()
            .and_then(|e| self.world.get_component::<Position>(e).copied())
    }
}

/// One loop iteration up to presentation: capture input, then run and trace
/// the frame. Returns `None` without running anything when a quit is polled.
pub fn run_frame(
    editor: &mut Editor,
    input: &mut dyn InputSource,
    surface: &mut dyn RenderSurface,
    trace: Option<&mut FrameTrace>,
) -> anyhow::Result<Option<FrameReport>> {
    let snapshot = input.poll();
    if snapshot.quit_requested {
        info!(frames = editor.frames_run(), "Quit requested");
        return Ok(None);
    }

    let report = editor.frame(&snapshot, surface);
    if let Some(trace) = trace {
        trace
            .record(&report, editor.selection())
            .context("write frame trace")?;
    }
    Ok(Some(report))
}

/// Post-present tail of an iteration: fixed sleep, then the FPS shown next
/// frame.
pub fn finish_frame(editor: &mut Editor, pacer: &mut FramePacer) {
    pacer.throttle();
    editor.set_fps(pacer.measure());
}

/// Runs the full loop against any input source and surface until a quit is
/// polled. `end_frame` on the surface is the present step. Returns the number
/// of frames run.
pub fn run_frames(
    editor: &mut Editor,
    input: &mut dyn InputSource,
    surface: &mut dyn RenderSurface,
    pacer: &mut FramePacer,
    mut trace: Option<&mut FrameTrace>,
) -> anyhow::Result<u64> {
    let mut frames = 0;
    while run_frame(editor, input, surface, trace.as_deref_mut())?.is_some() {
        finish_frame(editor, pacer);
        frames += 1;
    }
    Ok(frames)
}
