//! The accordion tree component.
//!
//! An [`AccordionTree`] is built once per `(mount point, article)` pair. It
//! renders on construction, owns its id namespace and panel state, and is the
//! single dispatcher for toggle activations of everything it rendered.

use crate::actions::{ActionPhase, ActionRegistry};
use crate::config::AccordionConfig;
use crate::ids::IdGenerator;
use crate::models::ArticleData;
use crate::outputs::View;
use crate::page::Page;
use crate::render;
use crate::state::{AccordionState, Activation};
use crate::tree::Node;
use tracing::{debug, info, instrument, warn};

#[derive(Debug)]
pub struct AccordionTree {
    mount_id: String,
    article: ArticleData,
    config: AccordionConfig,
    ids: IdGenerator,
    root: Option<Node>,
    state: AccordionState,
    actions: ActionRegistry,
}

impl AccordionTree {
    /// Construct a tree and render it into `mount_id` on `page`.
    ///
    /// When the mount point does not exist the tree stays empty: no panels,
    /// no actions, and nothing is written to the page.
    pub fn mount(
        page: &mut Page,
        mount_id: &str,
        article: ArticleData,
        config: AccordionConfig,
    ) -> Self {
        Self::mount_with_ids(page, mount_id, article, config, IdGenerator::new())
    }

    /// Like [`AccordionTree::mount`] but with a caller-supplied id generator.
    pub fn mount_with_ids(
        page: &mut Page,
        mount_id: &str,
        article: ArticleData,
        config: AccordionConfig,
        ids: IdGenerator,
    ) -> Self {
        let mut tree = Self {
            mount_id: mount_id.to_string(),
            article,
            config,
            ids,
            root: None,
            state: AccordionState::new(),
            actions: ActionRegistry::default(),
        };
        tree.render(page);
        tree
    }

    /// Discard all panel and action state and rebuild from the article.
    ///
    /// Returns `false` when the mount point could not be resolved.
    #[instrument(level = "info", skip_all, fields(mount = %self.mount_id, article_id = %self.article.id))]
    pub fn render(&mut self, page: &mut Page) -> bool {
        self.root = None;
        self.state.clear();
        self.actions.clear();

        let Some(mount) = page.resolve_mut(&self.mount_id) else {
            warn!("Mount point not found; nothing rendered");
            return false;
        };

        let rendered = render::render(&self.article, &self.config, &mut self.ids);
        mount.replace(rendered.root.clone());
        info!(
            panels = rendered.state.panel_count(),
            ids_issued = self.ids.issued(),
            "Mounted article accordion"
        );

        self.root = Some(rendered.root);
        self.state = rendered.state;
        self.actions = rendered.actions;
        true
    }

    /// Dispatch a toggle activation by control id.
    pub fn activate(&mut self, control_id: &str) -> Option<Activation> {
        self.state.activate(control_id)
    }

    /// Activate the `n`th panel (1-based, document order).
    pub fn activate_nth(&mut self, n: usize) -> Option<Activation> {
        let control_id = self
            .root
            .as_ref()?
            .panels()
            .get(n.checked_sub(1)?)
            .map(|p| p.control_id.clone())?;
        debug!(n, control = %control_id, "Activating panel by position");
        self.activate(&control_id)
    }

    /// Flip an action control between idle and loading by its string id.
    pub fn set_loading(&mut self, action_id: &str, loading: bool) -> bool {
        let Some(key) = self.actions.find(action_id).cloned() else {
            warn!(action = %action_id, "Unknown action control");
            return false;
        };
        self.actions.set_loading(&key, loading)
    }

    pub fn action_phase(&self, action_id: &str) -> Option<ActionPhase> {
        self.actions
            .find(action_id)
            .and_then(|key| self.actions.phase(key))
    }

    pub fn is_expanded(&self, panel_id: &str) -> bool {
        self.state.is_expanded(panel_id)
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    pub fn state(&self) -> &AccordionState {
        &self.state
    }

    pub fn article(&self) -> &ArticleData {
        &self.article
    }

    pub fn mount_id(&self) -> &str {
        &self.mount_id
    }

    /// Everything a presentation binding needs, if anything was rendered.
    pub fn view(&self) -> Option<View<'_>> {
        Some(View {
            root: self.root.as_ref()?,
            state: &self.state,
            actions: &self.actions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Layout;
    use crate::tree::{BadgeKind, GroupRole, SectionKind, TextKind};
    use serde_json::json;
    use std::collections::HashSet;

    fn article(value: serde_json::Value) -> ArticleData {
        serde_json::from_value(value).unwrap()
    }

    fn scenario() -> ArticleData {
        article(json!({
            "id": 42,
            "title": "T",
            "content": "C",
            "generatedArticles": {
                "mainCategory": "Tech",
                "subjectArticles": [{"title": "S1", "paragraphs": [{"subheader": "H", "content": "P"}]}],
                "taboolaArticles": []
            }
        }))
    }

    fn wide() -> ArticleData {
        article(json!({
            "id": 7,
            "title": "Wide",
            "generated_articles": {
                "subject_articles": [
                    {"title": "A", "paragraphs": []},
                    {"title": "B", "paragraphs": []},
                    {"title": "C", "paragraphs": []}
                ],
                "taboola_articles": [
                    {"title": "X", "paragraphs": []},
                    {"title": "Y", "paragraphs": []}
                ]
            }
        }))
    }

    #[test]
    fn test_end_to_end_scenario() {
        let mut page = Page::with_mounts(["articles"]);
        let tree = AccordionTree::mount(&mut page, "articles", scenario(), AccordionConfig::default());
        let root = page.content("articles").expect("mounted content");
        assert_eq!(Some(root), tree.root());

        let primary: Vec<&Node> = root
            .descendants()
            .into_iter()
            .filter(|n| matches!(n, Node::Section { kind: SectionKind::Primary, .. }))
            .collect();
        assert_eq!(primary.len(), 1);
        assert!(primary[0].children().contains(&Node::TextBlock {
            kind: TextKind::Content,
            heading: "Content".to_string(),
            text: "C".to_string(),
        }));

        let categories: Vec<&Node> = root
            .descendants()
            .into_iter()
            .filter(|n| matches!(n, Node::Badge { kind: BadgeKind::Category, .. }))
            .collect();
        assert_eq!(
            categories,
            vec![&Node::Badge {
                kind: BadgeKind::Category,
                text: "Tech".to_string()
            }]
        );

        let groups = root.article_groups();
        assert_eq!(groups.len(), 2);
        match groups[0] {
            Node::Group {
                role: GroupRole::Subject,
                heading,
                children,
                ..
            } => {
                assert_eq!(heading.as_deref(), Some("Subject Articles"));
                assert_eq!(children.len(), 1);
                match &children[0] {
                    Node::Panel(panel) => {
                        assert_eq!(panel.title, "S1");
                        assert_eq!(panel.children.len(), 1);
                        assert!(matches!(panel.children[0], Node::Paragraph { .. }));
                    }
                    other => panic!("expected panel, got {other:?}"),
                }
            }
            other => panic!("expected subject group, got {other:?}"),
        }
        match groups[1] {
            Node::Group {
                role: GroupRole::Taboola,
                heading,
                children,
                ..
            } => {
                assert_eq!(heading.as_deref(), Some("Taboola Articles"));
                assert!(children.is_empty());
            }
            other => panic!("expected taboola group, got {other:?}"),
        }
    }

    #[test]
    fn test_single_open_invariant_through_tree() {
        let mut page = Page::with_mounts(["articles"]);
        let mut tree = AccordionTree::mount(&mut page, "articles", wide(), AccordionConfig::default());

        let subject_group = tree.root().unwrap().panels()[0].group_id.clone();
        for n in [1, 2, 3, 2] {
            tree.activate_nth(n).unwrap();
            assert_eq!(tree.state().expanded_in_group(&subject_group).len(), 1);
        }
        tree.activate_nth(2).unwrap();
        assert!(tree.state().expanded_in_group(&subject_group).is_empty());
    }

    #[test]
    fn test_sibling_groups_are_independent() {
        let mut page = Page::with_mounts(["articles"]);
        let mut tree = AccordionTree::mount(&mut page, "articles", wide(), AccordionConfig::default());
        let panels: Vec<String> = tree.root().unwrap().panels().iter().map(|p| p.id.clone()).collect();

        tree.activate_nth(1);
        tree.activate_nth(5);
        assert!(tree.is_expanded(&panels[0]));
        assert!(tree.is_expanded(&panels[4]));

        tree.activate_nth(4);
        assert!(tree.is_expanded(&panels[0]));
        assert!(!tree.is_expanded(&panels[4]));
        assert!(tree.is_expanded(&panels[3]));
    }

    #[test]
    fn test_nested_ancestor_and_descendant_groups_are_independent() {
        let config = AccordionConfig {
            layout: Layout::Nested,
            ..Default::default()
        };
        let mut page = Page::with_mounts(["articles"]);
        let mut tree = AccordionTree::mount(&mut page, "articles", wide(), config);
        let panels: Vec<(String, String)> = tree
            .root()
            .unwrap()
            .panels()
            .iter()
            .map(|p| (p.title.clone(), p.id.clone()))
            .collect();
        let id = |title: &str| {
            panels
                .iter()
                .find(|(t, _)| t == title)
                .map(|(_, id)| id.clone())
                .unwrap()
        };

        // Generated Articles > Subject Articles > B
        tree.activate_nth(2);
        tree.activate_nth(3);
        tree.activate_nth(5);
        assert!(tree.is_expanded(&id("Generated Articles")));
        assert!(tree.is_expanded(&id("Subject Articles")));
        assert!(tree.is_expanded(&id("B")));

        // Opening the primary panel collapses its sibling but nothing below it.
        tree.activate_nth(1);
        assert!(tree.is_expanded(&id("Primary Article")));
        assert!(!tree.is_expanded(&id("Generated Articles")));
        assert!(tree.is_expanded(&id("Subject Articles")));
        assert!(tree.is_expanded(&id("B")));

        // Opening a taboola family collapses the subject family, not its articles.
        let taboola = panels.iter().position(|(t, _)| t == "Taboola Articles").unwrap() + 1;
        tree.activate_nth(taboola);
        assert!(!tree.is_expanded(&id("Subject Articles")));
        assert!(tree.is_expanded(&id("B")));
        assert!(tree.is_expanded(&id("Primary Article")));
    }

    #[test]
    fn test_rerender_resets_state() {
        let config = AccordionConfig {
            section_actions: true,
            ..Default::default()
        };
        let mut page = Page::with_mounts(["articles"]);
        let mut tree = AccordionTree::mount(&mut page, "articles", wide(), config);
        tree.activate_nth(1);
        assert!(tree.set_loading("article-7", true));
        assert!(tree.set_loading("taboola-7-1", true));
        assert_eq!(tree.action_phase("taboola-7-1"), Some(ActionPhase::Loading));

        let before: HashSet<String> = tree.root().unwrap().panels().iter().map(|p| p.id.clone()).collect();
        assert!(tree.render(&mut page));
        let after: HashSet<String> = tree.root().unwrap().panels().iter().map(|p| p.id.clone()).collect();

        assert!(tree.state().snapshot().iter().all(|p| !p.expanded));
        assert_eq!(tree.action_phase("article-7"), Some(ActionPhase::Idle));
        assert_eq!(tree.action_phase("taboola-7-1"), Some(ActionPhase::Idle));
        assert!(before.is_disjoint(&after));
        assert_eq!(page.resolve("articles").unwrap().generation(), 2);
    }

    #[test]
    fn test_unresolved_mount_renders_nothing() {
        let mut page = Page::with_mounts(["articles"]);
        let mut tree = AccordionTree::mount(&mut page, "missing", scenario(), AccordionConfig::default());
        assert!(tree.root().is_none());
        assert!(tree.view().is_none());
        assert_eq!(tree.state().panel_count(), 0);
        assert!(tree.activate_nth(1).is_none());
        assert!(!tree.set_loading("article-42", true));
        assert!(page.content("articles").is_none());
    }

    #[test]
    fn test_two_trees_on_one_page_have_distinct_ids() {
        let mut page = Page::with_mounts(["left", "right"]);
        let left = AccordionTree::mount(&mut page, "left", wide(), AccordionConfig::default());
        let right = AccordionTree::mount(&mut page, "right", wide(), AccordionConfig::default());

        let mut seen = HashSet::new();
        for tree in [&left, &right] {
            for panel in tree.root().unwrap().panels() {
                assert!(seen.insert(panel.id.clone()));
                assert!(seen.insert(panel.control_id.clone()));
            }
        }
    }

    #[test]
    fn test_remounting_replaces_previous_tree() {
        let mut page = Page::with_mounts(["articles"]);
        AccordionTree::mount(&mut page, "articles", wide(), AccordionConfig::default());
        let tree = AccordionTree::mount(&mut page, "articles", scenario(), AccordionConfig::default());
        assert_eq!(page.content("articles"), tree.root());
        assert_eq!(tree.root().unwrap().panels().len(), 1);
    }

    #[test]
    fn test_activation_outside_range_is_noop() {
        let mut page = Page::with_mounts(["articles"]);
        let mut tree = AccordionTree::mount(&mut page, "articles", wide(), AccordionConfig::default());
        assert!(tree.activate_nth(0).is_none());
        assert!(tree.activate_nth(99).is_none());
        assert!(tree.activate("not-a-control").is_none());
    }
}
