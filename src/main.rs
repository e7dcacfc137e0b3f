//! # Article Accordion
//!
//! Command-line page host for the article accordion. It loads one article
//! payload, mounts an accordion for it on a single-mount page, replays panel
//! activations and loading flags, and prints the result.
//!
//! ## Usage
//!
//! ```sh
//! article_accordion -i article.json -a 1 -f markdown
//! ```

use article_accordion::cli::Cli;
use article_accordion::outputs::{Format, json, present, write_rendered};
use article_accordion::{AccordionConfig, AccordionTree, ArticleData, Page};
use clap::Parser;
use std::error::Error;
use tokio::io::AsyncReadExt;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    // Logs go to stderr so stdout carries only the rendering.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("article_accordion starting up");

    let args = Cli::parse();
    debug!(input = %args.input, mount = %args.mount, format = ?args.format, "Parsed CLI arguments");

    // ---- Config ----
    let config = match &args.config {
        Some(path) => AccordionConfig::load(path).await.map_err(|e| {
            error!(path = %path, error = %e, "Failed to load accordion config");
            e
        })?,
        None => AccordionConfig::default(),
    };

    // ---- Article payload ----
    let raw = read_input(&args.input).await?;
    let article = ArticleData::from_json(&raw)?;
    info!(id = %article.id, generated = article.has_generated(), "Loaded article");

    // ---- Mount ----
    let mut page = Page::with_mounts([args.mount.as_str()]);
    let mut tree = AccordionTree::mount(&mut page, &args.mount, article, config);

    for &n in &args.activations {
        match tree.activate_nth(n) {
            Some(activation) => debug!(
                n,
                target = %activation.target,
                expanded = ?activation.expanded,
                collapsed = activation.collapsed.len(),
                "Applied activation"
            ),
            None => warn!(n, "No panel at this position; activation ignored"),
        }
    }
    for action_id in &args.loading {
        if !tree.set_loading(action_id, true) {
            warn!(action = %action_id, "Loading flag not applied");
        }
    }

    // ---- Output ----
    let Some(view) = tree.view() else {
        error!(mount = %args.mount, "Nothing was rendered");
        return Err(format!("mount point '{}' did not resolve", args.mount).into());
    };

    match &args.output {
        Some(path) if args.format == Format::Json => json::write_view(view, path).await?,
        Some(path) => write_rendered(path, &present(view, args.format)?).await?,
        None => println!("{}", present(view, args.format)?),
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        panels = tree.state().panel_count(),
        "Execution complete"
    );

    Ok(())
}

/// Read the article payload from a file, or from stdin when `input` is `-`.
async fn read_input(input: &str) -> Result<String, Box<dyn Error>> {
    if input == "-" {
        let mut raw = String::new();
        tokio::io::stdin().read_to_string(&mut raw).await?;
        return Ok(raw);
    }
    match tokio::fs::read_to_string(input).await {
        Ok(raw) => Ok(raw),
        Err(e) => {
            error!(path = %input, error = %e, "Failed to read article payload");
            Err(Box::new(e))
        }
    }
}
