//! Action affordances exposed for external wiring.
//!
//! The tree only renders the controls and flips them between an idle and a
//! loading presentation. Whatever an activation triggers (usually a request
//! to the generation service) is bound by the host through the stable
//! [`ActionKey`] string.

use crate::models::{ArticleId, GroupKind};
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Composite identifier of an action control.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActionKey {
    /// The generate/regenerate control for the whole article.
    Article { article_id: ArticleId },
    /// The per-entry control of a generated group, keyed by its position.
    Section {
        kind: GroupKind,
        article_id: ArticleId,
        index: usize,
    },
}

impl fmt::Display for ActionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKey::Article { article_id } => write!(f, "article-{article_id}"),
            ActionKey::Section {
                kind,
                article_id,
                index,
            } => write!(f, "{kind}-{article_id}-{index}"),
        }
    }
}

impl Serialize for ActionKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// What the control asks for, which decides its wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionMode {
    Generate,
    Regenerate,
    GenerateSection,
}

impl ActionMode {
    /// Mode of the article-level control.
    pub fn for_article(has_generated: bool) -> Self {
        if has_generated {
            ActionMode::Regenerate
        } else {
            ActionMode::Generate
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActionMode::Generate => "Generate Article",
            ActionMode::Regenerate => "Regenerate Article",
            ActionMode::GenerateSection => "Generate Sub-Articles",
        }
    }

    pub fn loading_label(&self) -> &'static str {
        match self {
            ActionMode::Generate | ActionMode::GenerateSection => "Generating...",
            ActionMode::Regenerate => "Regenerating...",
        }
    }
}

/// Visibility state of a control: exactly one of the idle button and the
/// loading indicator is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionPhase {
    #[default]
    Idle,
    Loading,
}

impl ActionPhase {
    pub fn idle_visible(&self) -> bool {
        matches!(self, ActionPhase::Idle)
    }

    pub fn loading_visible(&self) -> bool {
        matches!(self, ActionPhase::Loading)
    }
}

/// Phase of every action control rendered by one tree.
#[derive(Debug, Clone, Default)]
pub struct ActionRegistry {
    phases: HashMap<ActionKey, ActionPhase>,
}

impl ActionRegistry {
    pub fn register(&mut self, key: ActionKey) {
        self.phases.insert(key, ActionPhase::Idle);
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn phase(&self, key: &ActionKey) -> Option<ActionPhase> {
        self.phases.get(key).copied()
    }

    /// Look a control up by its rendered string id.
    pub fn find(&self, id: &str) -> Option<&ActionKey> {
        self.phases.keys().find(|k| k.to_string() == id)
    }

    /// Switch a control between idle and loading. Returns `false` for keys
    /// this tree never rendered.
    pub fn set_loading(&mut self, key: &ActionKey, loading: bool) -> bool {
        match self.phases.get_mut(key) {
            Some(phase) => {
                *phase = if loading {
                    ActionPhase::Loading
                } else {
                    ActionPhase::Idle
                };
                debug!(action = %key, ?phase, "Action phase changed");
                true
            }
            None => false,
        }
    }

    /// Every control with its phase, ordered by string id.
    pub fn entries(&self) -> Vec<(&ActionKey, ActionPhase)> {
        let mut entries: Vec<(&ActionKey, ActionPhase)> =
            self.phases.iter().map(|(k, p)| (k, *p)).collect();
        entries.sort_by_key(|(k, _)| k.to_string());
        entries
    }

    pub fn clear(&mut self) {
        self.phases.clear();
    }
}
