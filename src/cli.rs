//! Command-line interface definitions for the article accordion host.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Config path and output format can also come from environment variables.

use crate::outputs::Format;
use clap::Parser;

/// Command-line arguments for the `article_accordion` binary.
///
/// The binary plays the part of the page host: it loads one article payload,
/// mounts an accordion for it, replays panel activations and loading flags,
/// and prints the result through one of the presentation bindings.
///
/// # Examples
///
/// ```sh
/// # Outline with every panel collapsed
/// article_accordion --input article.json
///
/// # Open the second panel, then render Markdown to a file
/// article_accordion -i article.json --activate 2 -f markdown -o out/article.md
///
/// # Read from stdin with a nested layout config
/// curl -s "$API/v1/articles/42" | article_accordion -i - -c accordion.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Article JSON file, or `-` for stdin
    #[arg(short, long)]
    pub input: String,

    /// Name of the mount point to render into
    #[arg(short, long, default_value = "articles")]
    pub mount: String,

    /// Presentation format
    #[arg(short, long, value_enum, env = "ACCORDION_FORMAT", default_value_t = Format::Outline)]
    pub format: Format,

    /// Activate the nth panel (1-based, document order); may be repeated
    #[arg(short, long = "activate", value_name = "N")]
    pub activations: Vec<usize>,

    /// Put an action control into its loading state, by id (e.g. `article-42`)
    #[arg(short, long = "loading", value_name = "ACTION_ID")]
    pub loading: Vec<String>,

    /// Optional path to an accordion config YAML file
    #[arg(short, long, env = "ACCORDION_CONFIG")]
    pub config: Option<String>,

    /// Write the rendering to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,
}
