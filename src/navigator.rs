//! Cursor over the defect registry for "focus" and "cycle" commands.
//!
//! The state machine is the pure [`transition`] function; [`Navigator`] wraps
//! it with the last-focused id and builds the [`FocusTarget`] the viewport
//! receives on each transition into `Focused`.

use serde::Serialize;

use crate::analysis::{Category, DefectId, DefectRegistry, GeometryRef, Severity};
use crate::geom::BBox;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "index")]
pub enum NavigatorState {
    /// Nothing focused since the registry was last built.
    #[default]
    Idle,
    /// Cursor at a valid registry index.
    Focused(usize),
}

/// User commands that move the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    Focus(DefectId),
    CycleNext,
}

/// Next cursor state. Unresolvable focus ids and cycling an empty registry
/// leave the state as it was.
#[must_use]
pub fn transition(
    state: NavigatorState,
    command: NavCommand,
    registry: &DefectRegistry,
) -> NavigatorState {
    match command {
        NavCommand::Focus(id) => registry
            .index_of(id)
            .map_or(state, NavigatorState::Focused),
        NavCommand::CycleNext if registry.is_empty() => state,
        NavCommand::CycleNext => match state {
            NavigatorState::Idle => NavigatorState::Focused(0),
            NavigatorState::Focused(i) => NavigatorState::Focused((i + 1) % registry.len()),
        },
    }
}

/// What a viewport or UI gets when a defect gains focus.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusTarget {
    pub defect_id: DefectId,
    pub index: usize,
    /// 1-based, for "k/n" progress labels.
    pub position: usize,
    pub total: usize,
    pub primary: GeometryRef,
    pub region: BBox,
    pub faces: Vec<usize>,
    pub description: String,
    pub severity: Severity,
    pub category: Category,
}

impl FocusTarget {
    /// `"Hole boundary: edge 3-7 has only one face (2/5)"` style label.
    #[must_use]
    pub fn progress_label(&self) -> String {
        format!("{} ({}/{})", self.description, self.position, self.total)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigator {
    state: NavigatorState,
    last_focused: Option<DefectId>,
}

impl Navigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> NavigatorState {
        self.state
    }

    #[must_use]
    pub fn last_focused(&self) -> Option<DefectId> {
        self.last_focused
    }

    /// Back to `Idle`; called whenever the registry is rebuilt.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn focus(&mut self, registry: &DefectRegistry, id: DefectId) -> Option<FocusTarget> {
        self.apply(registry, NavCommand::Focus(id))
    }

    pub fn cycle_next(&mut self, registry: &DefectRegistry) -> Option<FocusTarget> {
        self.apply(registry, NavCommand::CycleNext)
    }

    fn apply(&mut self, registry: &DefectRegistry, command: NavCommand) -> Option<FocusTarget> {
        let next = transition(self.state, command, registry);

        let focused = match (command, next) {
            (NavCommand::Focus(id), NavigatorState::Focused(index))
                if registry.index_of(id) == Some(index) =>
            {
                index
            }
            (NavCommand::CycleNext, NavigatorState::Focused(index)) if !registry.is_empty() => {
                index
            }
            _ => {
                log::warn!("navigator: {command:?} ignored, state stays {:?}", self.state);
                return None;
            }
        };

        let defect = registry.get(focused)?;
        self.state = next;
        self.last_focused = Some(defect.id);

        Some(FocusTarget {
            defect_id: defect.id,
            index: focused,
            position: focused + 1,
            total: registry.len(),
            primary: defect.primary,
            region: defect.region,
            faces: defect.faces.clone(),
            description: defect.description.clone(),
            severity: defect.severity,
            category: defect.category,
        })
    }
}
