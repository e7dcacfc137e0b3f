//! Structural tree produced by a render pass.
//!
//! The tree says *what* is on screen, never *how* it looks: presentation
//! bindings in [`crate::outputs`] turn it into text, Markdown or JSON. Panel
//! expansion is not stored here; it lives in [`crate::state::AccordionState`]
//! and is looked up by panel id.

use crate::actions::ActionKey;
use crate::models::GroupKind;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Root,
    Primary,
    Generated,
    Actions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeKind {
    Publisher,
    Category,
    LastGenerated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextKind {
    Title,
    Description,
    Content,
}

/// What a sibling group holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupRole {
    /// Top-level primary/generated panels (nested layout only).
    Sections,
    /// The per-family panels inside the generated section (nested layout only).
    Generated,
    Subject,
    Taboola,
}

impl From<GroupKind> for GroupRole {
    fn from(kind: GroupKind) -> Self {
        match kind {
            GroupKind::Subject => GroupRole::Subject,
            GroupKind::Taboola => GroupRole::Taboola,
        }
    }
}

impl GroupRole {
    pub fn article_kind(&self) -> Option<GroupKind> {
        match self {
            GroupRole::Subject => Some(GroupKind::Subject),
            GroupRole::Taboola => Some(GroupKind::Taboola),
            _ => None,
        }
    }
}

/// Citation under a paragraph. `href` is only set for http(s) URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLink {
    pub text: String,
    pub href: Option<String>,
    pub tag: Option<String>,
}

/// One collapsible block. `id` is the body id the toggle targets;
/// `control_id` identifies the toggle itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub id: String,
    pub control_id: String,
    pub group_id: String,
    pub title: String,
    pub level: u8,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionControl {
    pub key: ActionKey,
    pub label: String,
    pub loading_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Section {
        kind: SectionKind,
        children: Vec<Node>,
    },
    Badge {
        kind: BadgeKind,
        text: String,
    },
    ParentLink {
        parent_id: String,
    },
    TextBlock {
        kind: TextKind,
        heading: String,
        text: String,
    },
    Notice {
        text: String,
    },
    Group {
        id: String,
        role: GroupRole,
        heading: Option<String>,
        children: Vec<Node>,
    },
    Panel(Panel),
    Paragraph {
        subheader: String,
        content: String,
        source: Option<SourceLink>,
    },
    ErrorNotice {
        message: String,
    },
    ActionControl(ActionControl),
}

impl Node {
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Section { children, .. } | Node::Group { children, .. } => children,
            Node::Panel(panel) => &panel.children,
            _ => &[],
        }
    }

    /// Every node in document order, starting with `self`.
    pub fn descendants(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        self.collect_into(&mut out);
        out
    }

    fn collect_into<'a>(&'a self, out: &mut Vec<&'a Node>) {
        out.push(self);
        for child in self.children() {
            child.collect_into(out);
        }
    }

    pub fn panels(&self) -> Vec<&Panel> {
        self.descendants()
            .into_iter()
            .filter_map(|n| match n {
                Node::Panel(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    pub fn action_controls(&self) -> Vec<&ActionControl> {
        self.descendants()
            .into_iter()
            .filter_map(|n| match n {
                Node::ActionControl(a) => Some(a),
                _ => None,
            })
            .collect()
    }

    /// Groups of generated sub-articles, in document order.
    pub fn article_groups(&self) -> Vec<&Node> {
        self.descendants()
            .into_iter()
            .filter(|n| matches!(n, Node::Group { role, .. } if role.article_kind().is_some()))
            .collect()
    }
}
