//! Markdown rendering of an accordion.
//!
//! Panels become HTML `<details>` blocks (with `open` when expanded), so the
//! output folds natively in mdBook and on GitHub. Every action control is
//! written as the idle button and the loading indicator, with `hidden` on
//! whichever one is not visible, keyed by `data-action` for external wiring.

use super::View;
use crate::tree::{BadgeKind, Node, TextKind};
use crate::utils::{escape_html, slugify_title};
use std::fmt::Write;

pub fn to_markdown(view: View<'_>) -> String {
    let mut md = String::new();
    write_node(view, view.root, &mut md);
    md
}

fn write_node(view: View<'_>, node: &Node, md: &mut String) {
    match node {
        Node::Section { children, .. } => {
            for child in children {
                write_node(view, child, md);
            }
        }
        Node::Badge { kind, text } => {
            let label = match kind {
                BadgeKind::Publisher => "publisher",
                BadgeKind::Category => "category",
                BadgeKind::LastGenerated => "generated",
            };
            let _ = writeln!(md, "<span class=\"badge badge-{label}\">{}</span>\n", escape_html(text));
        }
        Node::ParentLink { parent_id } => {
            let _ = writeln!(md, "Parent article: `#{}`\n", escape_html(parent_id));
        }
        Node::TextBlock {
            kind: TextKind::Title,
            text,
            ..
        } => {
            let _ = writeln!(md, "### {}\n", escape_html(text));
        }
        Node::TextBlock { heading, text, .. } => {
            let _ = writeln!(md, "**{}**\n\n{}\n", escape_html(heading), escape_html(text));
        }
        Node::Notice { text } => {
            let _ = writeln!(md, "_{}_\n", escape_html(text));
        }
        Node::Group {
            heading, children, ..
        } => {
            if let Some(heading) = heading {
                let _ = writeln!(
                    md,
                    "<a id=\"{}\"></a>\n\n#### {}\n",
                    slugify_title(heading),
                    escape_html(heading)
                );
            }
            for child in children {
                write_node(view, child, md);
            }
        }
        Node::Panel(panel) => {
            let open = if view.is_expanded(&panel.id) { " open" } else { "" };
            let _ = writeln!(
                md,
                "<details id=\"{}\" data-group=\"{}\"{open}>\n<summary id=\"{}\">{}</summary>\n",
                panel.id,
                panel.group_id,
                panel.control_id,
                escape_html(&panel.title)
            );
            for child in &panel.children {
                write_node(view, child, md);
            }
            let _ = writeln!(md, "</details>\n");
        }
        Node::Paragraph {
            subheader,
            content,
            source,
        } => {
            let _ = writeln!(md, "##### {}\n\n{}\n", escape_html(subheader), escape_html(content));
            if let Some(source) = source {
                match &source.href {
                    Some(href) => {
                        let _ = writeln!(
                            md,
                            "<small>Source: [{}]({})</small>\n",
                            escape_html(&source.text),
                            escape_html(href)
                        );
                    }
                    None => {
                        let _ = writeln!(md, "<small>Source: {}</small>\n", escape_html(&source.text));
                    }
                }
            }
        }
        Node::ErrorNotice { message } => {
            let _ = writeln!(md, "> **{}**\n", escape_html(message));
        }
        Node::ActionControl(action) => {
            let phase = view.phase(&action.key);
            let hidden = |visible: bool| if visible { "" } else { " hidden" };
            let _ = writeln!(
                md,
                "<button data-action=\"{key}\"{}>{}</button>\n<button data-action-loading=\"{key}\" disabled{}>{}</button>\n",
                hidden(phase.idle_visible()),
                escape_html(&action.label),
                hidden(phase.loading_visible()),
                escape_html(&action.loading_label),
                key = action.key,
            );
        }
    }
}
