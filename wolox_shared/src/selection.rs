//! Selection state: at most one selected entity plus the active gizmo mode.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ecs::EntityId;

/// Which gizmo the editor draws for the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GizmoMode {
    #[default]
    Translate,
    Scale,
    Rotate,
}

impl GizmoMode {
    /// Toolbar label.
    pub fn label(self) -> &'static str {
        match self {
            GizmoMode::Translate => "Translate",
            GizmoMode::Scale => "Scale",
            GizmoMode::Rotate => "Rotate",
        }
    }
}

impl fmt::Display for GizmoMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Selected entity and gizmo mode.
///
/// Selecting does not validate the entity; the gizmo controller checks for a
/// Position component when it consumes the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    selected: Option<EntityId>,
    mode: GizmoMode,
}

impl Selection {
    pub fn new(mode: GizmoMode) -> Self {
        Self {
            selected: None,
            mode,
        }
    }

    pub fn select(&mut self, entity: EntityId) {
        self.selected = Some(entity);
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<EntityId> {
        self.selected
    }

    pub fn set_gizmo_mode(&mut self, mode: GizmoMode) {
        self.mode = mode;
    }

    pub fn gizmo_mode(&self) -> GizmoMode {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_replaces_previous() {
        let mut sel = Selection::default();
        assert_eq!(sel.selected(), None);
        sel.select(EntityId(1));
        sel.select(EntityId(7));
        assert_eq!(sel.selected(), Some(EntityId(7)));
        sel.clear();
        assert_eq!(sel.selected(), None);
    }

    #[test]
    fn mode_change_keeps_selection() {
        let mut sel = Selection::new(GizmoMode::Translate);
        sel.select(EntityId(3));
        sel.set_gizmo_mode(GizmoMode::Rotate);
        assert_eq!(sel.gizmo_mode(), GizmoMode::Rotate);
        assert_eq!(sel.selected(), Some(EntityId(3)));
    }
}
