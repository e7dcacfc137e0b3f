//! # Article Accordion
//!
//! A headless accordion component for generated news articles. Given one
//! primary article and the sub-articles a generation service produced for it,
//! an [`AccordionTree`] builds a collapsible tree of badges, text blocks,
//! grouped panels and action controls, and keeps the expansion state of every
//! panel so that at most one panel per sibling group is open at a time.
//!
//! ## Usage
//!
//! ```ignore
//! use article_accordion::{AccordionConfig, AccordionTree, ArticleData, Page};
//! use article_accordion::outputs::{present, Format};
//!
//! let article = ArticleData::from_json(&raw)?;
//! let mut page = Page::with_mounts(["articles"]);
//! let mut tree = AccordionTree::mount(&mut page, "articles", article, AccordionConfig::default());
//! tree.activate_nth(1);
//! if let Some(view) = tree.view() {
//!     println!("{}", present(view, Format::Outline)?);
//! }
//! ```
//!
//! ## Architecture
//!
//! 1. **Input**: [`models`] parses the article payload
//! 2. **Render**: [`render`] turns it into a [`tree::Node`] tree, allocating ids from [`ids`]
//! 3. **State**: [`state`] and [`actions`] track panel expansion and action phases
//! 4. **Mount**: [`accordion`] ties one tree to a mount point on a [`page::Page`]
//! 5. **Output**: [`outputs`] presents the tree as an outline, Markdown or JSON

pub mod accordion;
pub mod actions;
pub mod cli;
pub mod config;
pub mod error;
pub mod ids;
pub mod models;
pub mod outputs;
pub mod page;
pub mod render;
pub mod state;
pub mod tree;
pub mod utils;

pub use accordion::AccordionTree;
pub use config::AccordionConfig;
pub use error::{Error, Result};
pub use models::ArticleData;
pub use page::Page;
