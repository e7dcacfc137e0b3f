//! Plain-text outline of a rendered accordion.
//!
//! Panels are prefixed with `▸` when collapsed and `▾` when expanded; only
//! expanded panels show their body. Action controls print whichever of the
//! idle label and the loading label is currently visible.

use super::View;
use crate::tree::{BadgeKind, Node};
use itertools::Itertools;

const INDENT: &str = "  ";

pub fn to_outline(view: View<'_>) -> String {
    let mut lines = Vec::new();
    write_node(view, view.root, 0, &mut lines);
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn write_node(view: View<'_>, node: &Node, depth: usize, lines: &mut Vec<String>) {
    let pad = INDENT.repeat(depth);
    match node {
        Node::Section { children, .. } => {
            for child in children {
                write_node(view, child, depth, lines);
            }
        }
        Node::Badge { kind, text } => {
            let label = match kind {
                BadgeKind::Publisher => "Publisher",
                BadgeKind::Category => "Category",
                BadgeKind::LastGenerated => "Generated",
            };
            lines.push(format!("{pad}[{label}] {text}"));
        }
        Node::ParentLink { parent_id } => lines.push(format!("{pad}Parent article #{parent_id}")),
        Node::TextBlock { heading, text, .. } => {
            lines.push(format!("{pad}{heading}:"));
            lines.push(indent_block(text, &format!("{pad}{INDENT}")));
        }
        Node::Notice { text } => lines.push(format!("{pad}{text}")),
        Node::Group {
            heading, children, ..
        } => {
            let child_depth = match heading {
                Some(heading) => {
                    lines.push(format!("{pad}{heading} ({})", children.len()));
                    depth + 1
                }
                None => depth,
            };
            for child in children {
                write_node(view, child, child_depth, lines);
            }
        }
        Node::Panel(panel) => {
            let expanded = view.is_expanded(&panel.id);
            let marker = if expanded { '▾' } else { '▸' };
            lines.push(format!("{pad}{marker} {}", panel.title));
            if expanded {
                for child in &panel.children {
                    write_node(view, child, depth + 1, lines);
                }
            }
        }
        Node::Paragraph {
            subheader,
            content,
            source,
        } => {
            let inner = format!("{pad}{INDENT}");
            lines.push(format!("{pad}{subheader}"));
            lines.push(indent_block(content, &inner));
            if let Some(source) = source {
                let tag = source
                    .tag
                    .as_deref()
                    .map(|t| format!(" ({t})"))
                    .unwrap_or_default();
                lines.push(format!("{inner}Source: {}{tag}", source.text));
            }
        }
        Node::ErrorNotice { message } => lines.push(format!("{pad}! {message}")),
        Node::ActionControl(action) => {
            let label = if view.phase(&action.key).loading_visible() {
                &action.loading_label
            } else {
                &action.label
            };
            lines.push(format!("{pad}[ {label} ] ({})", action.key));
        }
    }
}

fn indent_block(text: &str, pad: &str) -> String {
    text.lines().map(|l| format!("{pad}{l}")).join("\n")
}
