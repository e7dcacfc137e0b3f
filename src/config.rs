//! Render configuration handed to each accordion tree at construction.
//!
//! There is no process-wide state: the page host loads an [`AccordionConfig`]
//! (usually from a YAML file) and passes it to every tree it mounts.
//!
//! # Example
//!
//! ```yaml
//! layout: nested
//! show_sources: false
//! section_actions: true
//! missing_paragraph: terse
//! ```

use crate::error::{Error, Result};
use crate::models::GroupKind;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// How the primary and generated sections are arranged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// Primary section always visible; each article group is one sibling group.
    #[default]
    Flat,
    /// Primary and generated sections are panels themselves, with the subject
    /// and taboola groups nested one level further down.
    Nested,
}

/// Wording used when a paragraph lacks its subheader or content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingParagraph {
    #[default]
    Explanatory,
    Terse,
}

impl MissingParagraph {
    /// Notice for the paragraph at 1-based position `n`.
    pub fn message(&self, n: usize) -> String {
        match self {
            MissingParagraph::Explanatory => format!(
                "Subheader {n} or Content {n} is missing. Please regenerate articles."
            ),
            MissingParagraph::Terse => format!("Paragraph {n} is missing"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AccordionConfig {
    pub layout: Layout,
    /// Render citation links under paragraphs that carry a source.
    pub show_sources: bool,
    /// Attach a "generate sub-articles" control to every group entry.
    pub section_actions: bool,
    pub missing_paragraph: MissingParagraph,
    pub subject_heading: String,
    pub taboola_heading: String,
    pub no_generated_notice: String,
}

impl Default for AccordionConfig {
    fn default() -> Self {
        Self {
            layout: Layout::Flat,
            show_sources: true,
            section_actions: false,
            missing_paragraph: MissingParagraph::Explanatory,
            subject_heading: "Subject Articles".to_string(),
            taboola_heading: "Taboola Articles".to_string(),
            no_generated_notice: "No Generated Articles".to_string(),
        }
    }
}

impl AccordionConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    /// Load a configuration file; missing keys fall back to their defaults.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path.as_ref()).await?;
        let config = Self::from_yaml(&raw)?;
        info!(layout = ?config.layout, section_actions = config.section_actions, "Loaded accordion config");
        Ok(config)
    }

    /// Group heading for a generated-article family.
    pub fn heading(&self, kind: GroupKind) -> &str {
        match kind {
            GroupKind::Subject => &self.subject_heading,
            GroupKind::Taboola => &self.taboola_heading,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AccordionConfig::default();
        assert_eq!(config.layout, Layout::Flat);
        assert!(config.show_sources);
        assert!(!config.section_actions);
        assert_eq!(config.heading(GroupKind::Subject), "Subject Articles");
        assert_eq!(config.heading(GroupKind::Taboola), "Taboola Articles");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = AccordionConfig::from_yaml("layout: nested\nsection_actions: true\n").unwrap();
        assert_eq!(config.layout, Layout::Nested);
        assert!(config.section_actions);
        assert!(config.show_sources);
        assert_eq!(config.missing_paragraph, MissingParagraph::Explanatory);
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        let err = AccordionConfig::from_yaml("layout: sideways\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_missing_paragraph_messages() {
        assert_eq!(
            MissingParagraph::Explanatory.message(2),
            "Subheader 2 or Content 2 is missing. Please regenerate articles."
        );
        assert_eq!(MissingParagraph::Terse.message(3), "Paragraph 3 is missing");
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("accordion.yaml");
        std::fs::write(&path, "show_sources: false\nmissing_paragraph: terse\n").unwrap();

        let config = AccordionConfig::load(&path).await.unwrap();
        assert!(!config.show_sources);
        assert_eq!(config.missing_paragraph, MissingParagraph::Terse);
    }
}
