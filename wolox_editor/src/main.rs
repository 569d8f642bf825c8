//! Editor binary.
//!
//! Usage:
//!   cargo run -p wolox_editor -- [-x] [-y ARG] [--file wolox.json] [--debug-output[=DIR]]
//!
//! Opens the scene window with a falling box and an FPS readout. In debug
//! builds a toolbar at the bottom adds entities and switches the gizmo mode;
//! drag the green or red handle to move the selected entity. Escape or
//! closing the window quits.

use std::time::Duration;

use anyhow::Context;
use macroquad::prelude as mq;
use tracing::{error, info, warn};

use wolox_editor::{
    backend::{MacroquadInput, MacroquadSurface},
    cli::{self, CliCommand},
    editor::{finish_frame, run_frame, Editor},
    pacer::FramePacer,
    trace::FrameTrace,
};
use wolox_shared::{config::EditorConfig, physics::RapierPhysics};

fn window_conf(config: &EditorConfig) -> mq::Conf {
    mq::Conf {
        window_title: config.window_title.clone(),
        window_width: config.window_width as i32,
        window_height: config.window_height as i32,
        window_resizable: true,
        ..Default::default()
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = match cli::parse(std::env::args()) {
        CliCommand::Run(args) => args,
        CliCommand::Exit { code, output } => {
            println!("{output}");
            std::process::exit(code);
        }
    };
    for line in &args.diagnostics {
        println!("{line}");
    }

    let config = match &args.config_file {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };

    let trace = args
        .debug_output
        .as_deref()
        .map(FrameTrace::create)
        .transpose()
        .context("open debug output")?;

    info!(title = %config.window_title, overlay = config.editor_overlay, "Starting editor");

    macroquad::Window::from_config(window_conf(&config), async move {
        if let Err(e) = run(config, trace).await {
            error!(error = %e, "Editor failed");
            std::process::exit(1);
        }
    });

    Ok(())
}

async fn run(config: EditorConfig, mut trace: Option<FrameTrace>) -> anyhow::Result<()> {
    mq::prevent_quit();

    let font = match mq::load_ttf_font(&config.font_path).await {
        Ok(font) => Some(font),
        Err(e) => {
            warn!(path = %config.font_path, error = %e, "Font not loaded, using built-in font");
            None
        }
    };

    let mut surface = MacroquadSurface::new(font, config.font_size);
    let mut input = MacroquadInput::new();
    let mut pacer = FramePacer::new(Duration::from_millis(config.frame_delay_ms));

    let physics = RapierPhysics::new(config.physics);
    let mut editor = Editor::new(config, Box::new(physics));
    editor.populate_default_scene();

    while run_frame(&mut editor, &mut input, &mut surface, trace.as_mut())?.is_some() {
        mq::next_frame().await;
        finish_frame(&mut editor, &mut pacer);
    }

    if let Some(trace) = trace {
        trace.finish()?;
    }
    Ok(())
}
