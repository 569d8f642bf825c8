//! Debug frame trace.
//!
//! Enabled with `--debug-output [<dir>]`: one JSON object per line per frame,
//! written to `<dir>/frames-<UTC timestamp>.jsonl`.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use wolox_shared::{
    ecs::Position,
    gizmo::{GizmoOutcome, GizmoState},
    selection::{GizmoMode, Selection},
};

use crate::editor::{FrameReport, ToolbarAction};

/// Directory used when `--debug-output` is given without a value.
pub const DEFAULT_TRACE_DIR: &str = "debug_output";

/// One line of the trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    pub frame: u64,
    pub fps: u32,
    pub selected: Option<u64>,
    pub mode: GizmoMode,
    pub gizmo_state: GizmoState,
    pub position: Option<Position>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<String>,
}

impl FrameRecord {
    pub fn from_report(report: &FrameReport, selection: &Selection) -> Self {
        let position = match report.gizmo {
            GizmoOutcome::Drawn { position, .. } => Some(position),
            _ => None,
        };
        Self {
            frame: report.frame,
            fps: report.fps,
            selected: selection.selected().map(|e| e.0),
            mode: selection.gizmo_mode(),
            gizmo_state: report.gizmo_state(),
            position,
            actions: report
                .actions
                .iter()
                .map(|a: &ToolbarAction| a.label().to_string())
                .collect(),
        }
    }
}

/// Line-delimited JSON writer for frame records.
pub struct FrameTrace {
    path: PathBuf,
    writer: BufWriter<File>,
    records: u64,
}

impl FrameTrace {
    /// Creates `dir` if needed and opens a fresh timestamped trace file.
    pub fn create(dir: &Path) -> anyhow::Result<Self> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create debug output dir {}", dir.display()))?;

        let name = format!("frames-{}.jsonl", Utc::now().format("%Y%m%dT%H%M%S%.3fZ"));
        let path = dir.join(name);
        let file =
            File::create(&path).with_context(|| format!("create trace {}", path.display()))?;

        info!(path = %path.display(), "Writing frame trace");

        Ok(Self {
            path,
            writer: BufWriter::new(file),
            records: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> u64 {
        self.records
    }

    pub fn record(&mut self, report: &FrameReport, selection: &Selection) -> anyhow::Result<()> {
        let record = FrameRecord::from_report(report, selection);
        serde_json::to_writer(&mut self.writer, &record)?;
        self.writer.write_all(b"\n")?;
        self.records += 1;
        Ok(())
    }

    /// Flushes buffered records and returns the trace path.
    pub fn finish(mut self) -> anyhow::Result<PathBuf> {
        self.writer
            .flush()
            .with_context(|| format!("flush trace {}", self.path.display()))?;
        info!(path = %self.path.display(), records = self.records, "Frame trace closed");
        Ok(self.path)
    }
}

/// Parses every line of a trace file.
pub fn read_trace(path: &Path) -> anyhow::Result<Vec<FrameRecord>> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read trace {}", path.display()))?;
    text.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).context("parse trace line"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wolox_shared::ecs::EntityId;

    #[test]
    fn trace_roundtrips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut trace = FrameTrace::create(&dir.path().join("nested")).unwrap();

        let mut selection = Selection::default();
        selection.select(EntityId(0));
        let report = FrameReport {
            frame: 3,
            fps: 90,
            gizmo: GizmoOutcome::Drawn {
                entity: EntityId(0),
                mode: GizmoMode::Translate,
                state: GizmoState::VerticalDragging,
                position: Position::new(200.0, 245.0),
            },
            actions: vec![ToolbarAction::SetMode(GizmoMode::Rotate)],
        };
        trace.record(&report, &selection).unwrap();
        assert_eq!(trace.records(), 1);
        let path = trace.finish().unwrap();

        let records = read_trace(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].frame, 3);
        assert_eq!(records[0].selected, Some(0));
        assert_eq!(records[0].gizmo_state, GizmoState::VerticalDragging);
        assert_eq!(records[0].position, Some(Position::new(200.0, 245.0)));
        assert_eq!(records[0].actions, vec!["Rotate".to_string()]);
    }

    #[test]
    fn trace_file_name_is_timestamped() {
        let dir = tempfile::tempdir().unwrap();
        let trace = FrameTrace::create(dir.path()).unwrap();
        let name = trace.path().file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("frames-") && name.ends_with("Z.jsonl"), "{name}");
    }
}
