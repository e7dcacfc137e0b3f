//! Expand/collapse state machine.
//!
//! Each panel is either collapsed (the initial state) or expanded. Toggle
//! controls are registered per sibling group; activating one collapses every
//! other panel of that group and then flips its own target. Groups never
//! reach into each other, so nested groups stay independent.
//!
//! There is one dispatcher per tree ([`AccordionState::activate`]) that
//! resolves a control id to its group, instead of a handler per control.

use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Expansion state of one panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelState {
    pub id: String,
    pub expanded: bool,
    pub group_id: String,
}

#[derive(Debug, Clone)]
struct Toggle {
    group_id: String,
    target: String,
}

/// Result of dispatching one activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    pub group_id: String,
    pub target: String,
    /// New state of the target, or `None` when the target could not be resolved.
    pub expanded: Option<bool>,
    /// Siblings that were open and got closed by this activation.
    pub collapsed: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AccordionState {
    panels: HashMap<String, PanelState>,
    toggles: HashMap<String, Toggle>,
    groups: HashMap<String, Vec<String>>,
}

impl AccordionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a panel in `group_id`, driven by the toggle `control_id`.
    pub fn add_panel(&mut self, group_id: &str, control_id: &str, panel_id: &str) {
        self.add_toggle(group_id, control_id, panel_id);
        self.panels.insert(
            panel_id.to_string(),
            PanelState {
                id: panel_id.to_string(),
                expanded: false,
                group_id: group_id.to_string(),
            },
        );
    }

    /// Register a toggle without a panel behind it.
    pub fn add_toggle(&mut self, group_id: &str, control_id: &str, target: &str) {
        self.groups
            .entry(group_id.to_string())
            .or_default()
            .push(control_id.to_string());
        self.toggles.insert(
            control_id.to_string(),
            Toggle {
                group_id: group_id.to_string(),
                target: target.to_string(),
            },
        );
    }

    /// Drop a panel while keeping its toggle registered.
    pub fn remove_panel(&mut self, panel_id: &str) -> Option<PanelState> {
        self.panels.remove(panel_id)
    }

    /// Dispatch an activation of `control_id`.
    ///
    /// Unknown controls are ignored and return `None`. When the control's
    /// target panel is missing its siblings are still collapsed.
    pub fn activate(&mut self, control_id: &str) -> Option<Activation> {
        let Some(toggle) = self.toggles.get(control_id).cloned() else {
            debug!(control = %control_id, "Activation of unknown control ignored");
            return None;
        };

        let mut collapsed = Vec::new();
        let siblings = self.groups.get(&toggle.group_id).cloned().unwrap_or_default();
        for other in siblings.iter().filter(|c| c.as_str() != control_id) {
            let Some(other_target) = self.toggles.get(other).map(|t| t.target.clone()) else {
                continue;
            };
            if other_target == toggle.target {
                continue;
            }
            if let Some(panel) = self.panels.get_mut(&other_target) {
                if panel.expanded {
                    collapsed.push(panel.id.clone());
                }
                panel.expanded = false;
            }
        }

        let expanded = match self.panels.get_mut(&toggle.target) {
            Some(panel) => {
                panel.expanded = !panel.expanded;
                Some(panel.expanded)
            }
            None => {
                warn!(control = %control_id, target = %toggle.target, "Toggle target missing; only siblings collapsed");
                None
            }
        };

        debug!(
            control = %control_id,
            group = %toggle.group_id,
            ?expanded,
            collapsed = collapsed.len(),
            "Panel activated"
        );

        Some(Activation {
            group_id: toggle.group_id,
            target: toggle.target,
            expanded,
            collapsed,
        })
    }

    pub fn panel(&self, panel_id: &str) -> Option<&PanelState> {
        self.panels.get(panel_id)
    }

    pub fn is_expanded(&self, panel_id: &str) -> bool {
        self.panels.get(panel_id).is_some_and(|p| p.expanded)
    }

    /// Panels of a group in registration order.
    pub fn group_panels(&self, group_id: &str) -> Vec<&PanelState> {
        self.groups
            .get(group_id)
            .into_iter()
            .flatten()
            .filter_map(|control| self.toggles.get(control))
            .filter_map(|toggle| self.panels.get(&toggle.target))
            .collect()
    }

    pub fn expanded_in_group(&self, group_id: &str) -> Vec<&str> {
        self.group_panels(group_id)
            .into_iter()
            .filter(|p| p.expanded)
            .map(|p| p.id.as_str())
            .collect()
    }

    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Snapshot of every panel, sorted by id for stable output.
    pub fn snapshot(&self) -> Vec<PanelState> {
        let mut panels: Vec<PanelState> = self.panels.values().cloned().collect();
        panels.sort_by(|a, b| a.id.cmp(&b.id));
        panels
    }

    pub fn clear(&mut self) {
        self.panels.clear();
        self.toggles.clear();
        self.groups.clear();
    }
}
