//! The render pass: article data in, structural tree and fresh state out.
//!
//! Ids are drawn in document order: the primary article first, then each
//! generated group, then each sub-article of that group in input order.
//! Nothing here can fail; malformed paragraphs become inline notices and
//! absent optional fields simply leave their block out.

use crate::actions::{ActionKey, ActionMode, ActionRegistry};
use crate::config::{AccordionConfig, Layout};
use crate::ids::IdGenerator;
use crate::models::{ArticleData, GeneratedArticles, GroupKind, Paragraph, SubArticle};
use crate::state::AccordionState;
use crate::tree::{
    ActionControl, BadgeKind, GroupRole, Node, Panel, SectionKind, SourceLink, TextKind,
};
use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::{debug, instrument, warn};

/// Everything one render pass produces.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub root: Node,
    pub state: AccordionState,
    pub actions: ActionRegistry,
}

/// Render `article` with `config`, drawing ids from `ids`.
#[instrument(level = "debug", skip_all, fields(article_id = %article.id, layout = ?config.layout))]
pub fn render(article: &ArticleData, config: &AccordionConfig, ids: &mut IdGenerator) -> Rendered {
    let mut renderer = Renderer {
        article,
        config,
        ids,
        state: AccordionState::new(),
        actions: ActionRegistry::default(),
    };
    let root = renderer.root();
    debug!(
        panels = renderer.state.panel_count(),
        groups = renderer.state.group_count(),
        actions = renderer.actions.len(),
        "Rendered article tree"
    );
    Rendered {
        root,
        state: renderer.state,
        actions: renderer.actions,
    }
}

struct Renderer<'a> {
    article: &'a ArticleData,
    config: &'a AccordionConfig,
    ids: &'a mut IdGenerator,
    state: AccordionState,
    actions: ActionRegistry,
}

impl Renderer<'_> {
    fn root(&mut self) -> Node {
        let article = self.article;
        let mut children = self.badges();

        match self.config.layout {
            Layout::Flat => {
                children.push(Node::Section {
                    kind: SectionKind::Primary,
                    children: self.primary_blocks(),
                });
                if let Some(generated) = &article.generated_articles {
                    let groups = GroupKind::ALL
                        .iter()
                        .map(|&kind| self.flat_group(generated, kind))
                        .collect();
                    children.push(Node::Section {
                        kind: SectionKind::Generated,
                        children: groups,
                    });
                }
            }
            Layout::Nested => children.push(self.nested_sections()),
        }

        if !article.has_generated() {
            children.push(Node::Notice {
                text: self.config.no_generated_notice.clone(),
            });
        }

        children.push(Node::Section {
            kind: SectionKind::Actions,
            children: vec![self.article_action()],
        });

        Node::Section {
            kind: SectionKind::Root,
            children,
        }
    }

    fn badges(&self) -> Vec<Node> {
        let mut badges = Vec::new();
        if let Some(publisher) = self
            .article
            .news_publisher_name
            .as_deref()
            .filter(|s| !s.is_empty())
        {
            badges.push(Node::Badge {
                kind: BadgeKind::Publisher,
                text: publisher.to_string(),
            });
        }
        if let Some(category) = self.article.main_category() {
            badges.push(Node::Badge {
                kind: BadgeKind::Category,
                text: category.to_string(),
            });
        }
        if let Some(at) = self
            .article
            .last_generated_at
            .as_deref()
            .filter(|s| !s.is_empty())
        {
            badges.push(Node::Badge {
                kind: BadgeKind::LastGenerated,
                text: format!("Last generated {}", format_timestamp(at)),
            });
        }
        if let Some(parent) = &self.article.parent_id {
            badges.push(Node::ParentLink {
                parent_id: parent.to_string(),
            });
        }
        badges
    }

    fn primary_blocks(&self) -> Vec<Node> {
        let mut blocks = Vec::new();
        if !self.article.title.is_empty() {
            blocks.push(Node::TextBlock {
                kind: TextKind::Title,
                heading: "Title".to_string(),
                text: self.article.title.clone(),
            });
        }
        if let Some(description) = self.article.description_text() {
            blocks.push(Node::TextBlock {
                kind: TextKind::Description,
                heading: "Description".to_string(),
                text: description.to_string(),
            });
        }
        if let Some(content) = self.article.content_text() {
            blocks.push(Node::TextBlock {
                kind: TextKind::Content,
                heading: "Content".to_string(),
                text: content.to_string(),
            });
        }
        blocks
    }

    fn flat_group(&mut self, generated: &GeneratedArticles, kind: GroupKind) -> Node {
        let group_id = self.ids.next_id(&format!("{kind}-group"));
        let panels = self.article_panels(&group_id, generated.group(kind), kind, 1);
        Node::Group {
            id: group_id,
            role: kind.into(),
            heading: Some(self.config.heading(kind).to_string()),
            children: panels,
        }
    }

    fn nested_sections(&mut self) -> Node {
        let article = self.article;
        let group_id = self.ids.next_id("sections-group");
        let mut panels = Vec::new();

        let primary = self.primary_blocks();
        panels.push(self.panel(&group_id, "primary", "Primary Article", 1, |_| primary));

        if let Some(generated) = &article.generated_articles {
            panels.push(self.panel(&group_id, "generated", "Generated Articles", 1, |r| {
                let inner_id = r.ids.next_id("generated-group");
                let families = GroupKind::ALL
                    .iter()
                    .map(|&kind| {
                        let title = r.config.heading(kind).to_string();
                        r.panel(&inner_id, kind.as_str(), &title, 2, |r| {
                            let articles_id = r.ids.next_id(&format!("{kind}-group"));
                            let articles =
                                r.article_panels(&articles_id, generated.group(kind), kind, 3);
                            vec![Node::Group {
                                id: articles_id,
                                role: kind.into(),
                                heading: None,
                                children: articles,
                            }]
                        })
                    })
                    .collect();
                vec![Node::Group {
                    id: inner_id,
                    role: GroupRole::Generated,
                    heading: None,
                    children: families,
                }]
            }));
        }

        Node::Group {
            id: group_id,
            role: GroupRole::Sections,
            heading: None,
            children: panels,
        }
    }

    fn article_panels(
        &mut self,
        group_id: &str,
        articles: &[SubArticle],
        kind: GroupKind,
        level: u8,
    ) -> Vec<Node> {
        articles
            .iter()
            .enumerate()
            .map(|(index, article)| {
                self.panel(group_id, kind.as_str(), &article.title, level, |r| {
                    let mut body: Vec<Node> = article
                        .paragraphs
                        .iter()
                        .enumerate()
                        .map(|(i, para)| r.paragraph(para, i + 1, &article.title))
                        .collect();
                    if r.config.section_actions {
                        body.push(r.section_action(kind, index));
                    }
                    body
                })
            })
            .collect()
    }

    /// Allocate ids for a panel, register it with the state machine and
    /// build its body. The heading id is drawn before the body id, and both
    /// before anything the body itself allocates.
    fn panel<F>(&mut self, group_id: &str, prefix: &str, title: &str, level: u8, body: F) -> Node
    where
        F: FnOnce(&mut Self) -> Vec<Node>,
    {
        let control_id = self.ids.next_id(&format!("{prefix}-heading"));
        let id = self.ids.next_id(&format!("{prefix}-body"));
        self.state.add_panel(group_id, &control_id, &id);
        let children = body(self);
        Node::Panel(Panel {
            id,
            control_id,
            group_id: group_id.to_string(),
            title: title.to_string(),
            level,
            children,
        })
    }

    fn paragraph(&self, para: &Paragraph, n: usize, article_title: &str) -> Node {
        match para.parts() {
            Some((subheader, content)) => Node::Paragraph {
                subheader: subheader.to_string(),
                content: content.to_string(),
                source: if self.config.show_sources {
                    source_link(para)
                } else {
                    None
                },
            },
            None => {
                warn!(
                    article = %article_title,
                    paragraph = n,
                    has_subheader = para.subheader.as_deref().is_some_and(|s| !s.is_empty()),
                    has_content = para.content.as_deref().is_some_and(|s| !s.is_empty()),
                    "Malformed paragraph rendered as notice"
                );
                Node::ErrorNotice {
                    message: self.config.missing_paragraph.message(n),
                }
            }
        }
    }

    fn article_action(&mut self) -> Node {
        let key = ActionKey::Article {
            article_id: self.article.id.clone(),
        };
        self.action(key, ActionMode::for_article(self.article.has_generated()))
    }

    fn section_action(&mut self, kind: GroupKind, index: usize) -> Node {
        let key = ActionKey::Section {
            kind,
            article_id: self.article.id.clone(),
            index,
        };
        self.action(key, ActionMode::GenerateSection)
    }

    fn action(&mut self, key: ActionKey, mode: ActionMode) -> Node {
        self.actions.register(key.clone());
        Node::ActionControl(ActionControl {
            key,
            label: mode.label().to_string(),
            loading_label: mode.loading_label().to_string(),
        })
    }
}

fn source_link(para: &Paragraph) -> Option<SourceLink> {
    let text = para.source.as_deref().filter(|s| !s.is_empty())?;
    let href = url::Url::parse(text)
        .ok()
        .filter(|u| matches!(u.scheme(), "http" | "https"))
        .map(|_| text.to_string());
    Some(SourceLink {
        text: text.to_string(),
        href,
        tag: para.source_tag(),
    })
}

/// Normalize a generation timestamp for display. Unparseable values are shown as-is.
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Utc).format("%Y-%m-%d %H:%M UTC").to_string();
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return naive.format("%Y-%m-%d %H:%M").to_string();
        }
    }
    raw.to_string()
}
