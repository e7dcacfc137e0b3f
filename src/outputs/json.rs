//! JSON output for other front ends.
//!
//! The document carries the structural tree as-is plus two flat tables: the
//! expansion state of every panel and the phase of every action control.
//!
//! # Output Structure
//!
//! ```text
//! {
//!   "tree":    { "type": "section", "kind": "root", "children": [...] },
//!   "panels":  [ { "id": "...", "expanded": false, "group_id": "..." } ],
//!   "actions": [ { "key": "article-42", "phase": "idle" } ]
//! }
//! ```

use super::View;
use crate::actions::{ActionKey, ActionPhase};
use crate::error::Result;
use crate::state::PanelState;
use crate::tree::Node;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct JsonView<'a> {
    pub tree: &'a Node,
    pub panels: Vec<PanelState>,
    pub actions: Vec<ActionEntry<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ActionEntry<'a> {
    pub key: &'a ActionKey,
    pub phase: ActionPhase,
}

impl<'a> From<View<'a>> for JsonView<'a> {
    fn from(view: View<'a>) -> Self {
        Self {
            tree: view.root,
            panels: view.state.snapshot(),
            actions: view
                .actions
                .entries()
                .into_iter()
                .map(|(key, phase)| ActionEntry { key, phase })
                .collect(),
        }
    }
}

pub fn to_json(view: View<'_>) -> Result<String> {
    Ok(serde_json::to_string_pretty(&JsonView::from(view))?)
}

/// Write the JSON rendering of `view` to `path`, creating parent directories.
pub async fn write_view(view: View<'_>, path: impl AsRef<Path>) -> Result<()> {
    super::write_rendered(path, &to_json(view)?).await
}
