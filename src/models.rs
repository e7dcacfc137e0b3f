//! Data models for article payloads handed to the accordion.
//!
//! This module defines the input side of the component:
//! - [`ArticleData`]: one article as returned by the generation service
//! - [`GeneratedArticles`]: the optional generation results for that article
//! - [`SubArticle`] and [`Paragraph`]: the generated sub-articles and their blocks
//! - [`GroupKind`]: the two fixed families of generated sub-articles
//!
//! The service emits snake_case keys; camelCase aliases are accepted as well so
//! payloads captured from other clients deserialize unchanged.

use crate::error::Result;
use crate::utils::truncate_for_log;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Opaque article identifier.
///
/// The service hands out numeric ids, but nothing in the component depends on
/// that, so string ids are carried verbatim too.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ArticleId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArticleId::Number(n) => write!(f, "{n}"),
            ArticleId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ArticleId {
    fn from(n: i64) -> Self {
        ArticleId::Number(n)
    }
}

impl From<&str> for ArticleId {
    fn from(s: &str) -> Self {
        ArticleId::Text(s.to_string())
    }
}

/// A primary article together with whatever the generation service produced for it.
///
/// # Fields
///
/// * `id` - Identifier used to key the action controls
/// * `title` - Headline of the primary article
/// * `description` / `content` - Body text; either may be absent or empty
/// * `news_publisher_name`, `last_generated_at`, `parent_id` - Display metadata
/// * `generated_articles` - `None` when no generation has run yet
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ArticleData {
    pub id: ArticleId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, alias = "newsPublisherName")]
    pub news_publisher_name: Option<String>,
    #[serde(default, alias = "lastGeneratedAt")]
    pub last_generated_at: Option<String>,
    #[serde(default, alias = "parentId")]
    pub parent_id: Option<ArticleId>,
    #[serde(default, alias = "generatedArticles")]
    pub generated_articles: Option<GeneratedArticles>,
}

impl Default for ArticleId {
    fn default() -> Self {
        ArticleId::Number(0)
    }
}

impl ArticleData {
    /// Parse an article payload as returned by the generation service.
    pub fn from_json(raw: &str) -> Result<Self> {
        match serde_json::from_str::<ArticleData>(raw) {
            Ok(article) => {
                debug!(id = %article.id, generated = article.has_generated(), "Parsed article payload");
                Ok(article)
            }
            Err(e) => {
                warn!(
                    error = %e,
                    payload_preview = %truncate_for_log(raw, 300),
                    "Article payload did not parse"
                );
                Err(e.into())
            }
        }
    }

    /// Description text, only when it carries something to show.
    pub fn description_text(&self) -> Option<&str> {
        non_empty(self.description.as_deref())
    }

    /// Content text, only when it carries something to show.
    pub fn content_text(&self) -> Option<&str> {
        non_empty(self.content.as_deref())
    }

    /// Category assigned by the generation run, if any.
    pub fn main_category(&self) -> Option<&str> {
        self.generated_articles
            .as_ref()
            .and_then(|g| non_empty(g.main_category.as_deref()))
    }

    pub fn has_generated(&self) -> bool {
        self.generated_articles.is_some()
    }
}

/// Output of one generation run for a primary article.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct GeneratedArticles {
    #[serde(default, alias = "mainCategory")]
    pub main_category: Option<String>,
    #[serde(default, alias = "subjectArticles", deserialize_with = "null_as_empty")]
    pub subject_articles: Vec<SubArticle>,
    #[serde(default, alias = "taboolaArticles", deserialize_with = "null_as_empty")]
    pub taboola_articles: Vec<SubArticle>,
}

impl GeneratedArticles {
    /// Sub-articles belonging to one group, in input order.
    pub fn group(&self, kind: GroupKind) -> &[SubArticle] {
        match kind {
            GroupKind::Subject => &self.subject_articles,
            GroupKind::Taboola => &self.taboola_articles,
        }
    }
}

/// A generated sub-article: a title and its ordered paragraphs.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SubArticle {
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub paragraphs: Vec<Paragraph>,
}

/// One paragraph of a generated sub-article.
///
/// A paragraph is only valid when both `subheader` and `content` are present
/// and non-empty; the generation service occasionally drops one of them or
/// emits a non-string value, which is read as absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Paragraph {
    #[serde(default, deserialize_with = "lenient_text")]
    pub subheader: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub source: Option<String>,
}

impl Paragraph {
    /// Returns `(subheader, content)` when the paragraph is renderable.
    pub fn parts(&self) -> Option<(&str, &str)> {
        let subheader = non_empty(self.subheader.as_deref())?;
        let content = non_empty(self.content.as_deref())?;
        Some((subheader, content))
    }

    /// Extract the publisher name from the source URL, skipping the public
    /// suffix. For example: "https://lite.cnn.com/article" -> "cnn",
    /// "https://www.bbc.co.uk/news" -> "bbc".
    pub fn source_tag(&self) -> Option<String> {
        let url = non_empty(self.source.as_deref())?;
        let parsed = url::Url::parse(url).ok()?;
        let Some(url::Host::Domain(host)) = parsed.host() else {
            return None;
        };
        host.rsplit('.')
            .skip(1)
            .find(|label| !SECOND_LEVEL_LABELS.contains(label))
            .filter(|label| label.len() >= 2)
            .map(str::to_string)
    }
}

/// Registry labels that sit between a country code and the publisher name.
const SECOND_LEVEL_LABELS: [&str; 7] = ["co", "com", "org", "gov", "net", "ac", "edu"];

/// The two fixed families of generated sub-articles, rendered in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    Subject,
    Taboola,
}

impl GroupKind {
    pub const ALL: [GroupKind; 2] = [GroupKind::Subject, GroupKind::Taboola];

    pub fn as_str(&self) -> &'static str {
        match self {
            GroupKind::Subject => "subject",
            GroupKind::Taboola => "taboola",
        }
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Null => None,
        other => {
            debug!(value = %truncate_for_log(&other.to_string(), 80), "Non-string paragraph field read as absent");
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_deserialization_snake_case() {
        let json = r#"{
            "id": 7,
            "title": "Budget vote",
            "content": "Lawmakers voted.",
            "news_publisher_name": "Daily",
            "generated_articles": {
                "main_category": "Politics",
                "subject_articles": [{"title": "S1", "paragraphs": []}],
                "taboola_articles": []
            }
        }"#;

        let article: ArticleData = serde_json::from_str(json).unwrap();
        assert_eq!(article.id, ArticleId::Number(7));
        assert_eq!(article.news_publisher_name.as_deref(), Some("Daily"));
        assert_eq!(article.main_category(), Some("Politics"));
        let generated = article.generated_articles.unwrap();
        assert_eq!(generated.group(GroupKind::Subject).len(), 1);
        assert!(generated.group(GroupKind::Taboola).is_empty());
    }

    #[test]
    fn test_article_deserialization_camel_case() {
        let json = r#"{
            "id": "abc",
            "title": "T",
            "parentId": 3,
            "lastGeneratedAt": "2025-05-06T14:30:00Z",
            "generatedArticles": {"mainCategory": "Tech", "subjectArticles": [], "taboolaArticles": null}
        }"#;

        let article: ArticleData = serde_json::from_str(json).unwrap();
        assert_eq!(article.id.to_string(), "abc");
        assert_eq!(article.parent_id, Some(ArticleId::Number(3)));
        assert_eq!(article.main_category(), Some("Tech"));
        assert!(article.generated_articles.unwrap().taboola_articles.is_empty());
    }

    #[test]
    fn test_from_json_errors() {
        use crate::error::Error;
        assert!(matches!(ArticleData::from_json(r#"{"id": 1, "title": "#), Err(Error::Truncated(_))));
        assert!(matches!(ArticleData::from_json(r#"{"title": "T"}"#), Err(Error::Json(_))));
        assert!(ArticleData::from_json(r#"{"id": 1}"#).is_ok());
    }

    #[test]
    fn test_null_generated_articles_is_absent() {
        let json = r#"{"id": 1, "title": "T", "content": "C", "generated_articles": null}"#;
        let article: ArticleData = serde_json::from_str(json).unwrap();
        assert!(!article.has_generated());
        assert_eq!(article.main_category(), None);
    }

    #[test]
    fn test_empty_description_is_not_shown() {
        let article = ArticleData {
            description: Some(String::new()),
            content: Some("Body".to_string()),
            ..Default::default()
        };
        assert_eq!(article.description_text(), None);
        assert_eq!(article.content_text(), Some("Body"));
    }

    #[test]
    fn test_paragraph_parts_requires_both_fields() {
        let full = Paragraph {
            subheader: Some("H".to_string()),
            content: Some("P".to_string()),
            source: None,
        };
        assert_eq!(full.parts(), Some(("H", "P")));

        let missing_content = Paragraph {
            subheader: Some("H".to_string()),
            ..Default::default()
        };
        assert_eq!(missing_content.parts(), None);

        let empty_subheader = Paragraph {
            subheader: Some(String::new()),
            content: Some("P".to_string()),
            source: None,
        };
        assert_eq!(empty_subheader.parts(), None);
    }

    #[test]
    fn test_non_string_paragraph_fields_degrade() {
        let json = r#"{
            "id": 11,
            "title": "T",
            "generated_articles": {
                "subject_articles": [{"title": "S", "paragraphs": [
                    {"subheader": "H1", "content": "P1"},
                    {"subheader": 5, "content": {"text": "P2"}, "source": ["x"]},
                    {"subheader": "H3", "content": "P3"}
                ]}],
                "taboola_articles": []
            }
        }"#;

        let article = ArticleData::from_json(json).unwrap();
        let paragraphs = &article.generated_articles.unwrap().subject_articles[0].paragraphs;
        assert_eq!(paragraphs.len(), 3);
        assert_eq!(paragraphs[0].parts(), Some(("H1", "P1")));
        assert_eq!(paragraphs[1], Paragraph::default());
        assert_eq!(paragraphs[1].parts(), None);
        assert_eq!(paragraphs[2].parts(), Some(("H3", "P3")));
    }

    #[test]
    fn test_source_tag() {
        let para = Paragraph {
            source: Some("https://lite.cnn.com/2025/05/06/article".to_string()),
            ..Default::default()
        };
        assert_eq!(para.source_tag(), Some("cnn".to_string()));

        let uk = Paragraph {
            source: Some("https://www.bbc.co.uk/news/x".to_string()),
            ..Default::default()
        };
        assert_eq!(uk.source_tag(), Some("bbc".to_string()));

        let au = Paragraph {
            source: Some("https://www.abc.net.au/news".to_string()),
            ..Default::default()
        };
        assert_eq!(au.source_tag(), Some("abc".to_string()));

        let ip = Paragraph {
            source: Some("http://127.0.0.1/x".to_string()),
            ..Default::default()
        };
        assert_eq!(ip.source_tag(), None);

        let bad = Paragraph {
            source: Some("not a url".to_string()),
            ..Default::default()
        };
        assert_eq!(bad.source_tag(), None);
    }

    #[test]
    fn test_article_id_display() {
        assert_eq!(ArticleId::from(42).to_string(), "42");
        assert_eq!(ArticleId::from("x-1").to_string(), "x-1");
    }
}
