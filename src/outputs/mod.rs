//! Presentation bindings for a rendered accordion.
//!
//! Each submodule converts a [`View`] (the structural tree plus the panel and
//! action state of one tree instance) into a concrete format. Bindings only
//! read; every state change goes through [`crate::AccordionTree`].
//!
//! # Submodules
//!
//! - [`outline`]: indented plain text, collapsed panels hide their bodies
//! - [`markdown`]: Markdown with `<details>` blocks for mdBook or GitHub
//! - [`json`]: the tree and its state as JSON for other front ends

pub mod json;
pub mod markdown;
pub mod outline;

use crate::actions::{ActionKey, ActionPhase, ActionRegistry};
use crate::state::AccordionState;
use crate::tree::Node;
use clap::ValueEnum;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, instrument};

/// Borrowed snapshot of one rendered tree.
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    pub root: &'a Node,
    pub state: &'a AccordionState,
    pub actions: &'a ActionRegistry,
}

impl View<'_> {
    pub fn is_expanded(&self, panel_id: &str) -> bool {
        self.state.is_expanded(panel_id)
    }

    pub fn phase(&self, key: &ActionKey) -> ActionPhase {
        self.actions.phase(key).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    #[default]
    Outline,
    Markdown,
    Json,
}

/// Render `view` in the requested format.
pub fn present(view: View<'_>, format: Format) -> crate::error::Result<String> {
    Ok(match format {
        Format::Outline => outline::to_outline(view),
        Format::Markdown => markdown::to_markdown(view),
        Format::Json => json::to_json(view)?,
    })
}

/// Write a rendered document to `path`, creating parent directories.
#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
pub async fn write_rendered(path: impl AsRef<Path>, rendered: &str) -> crate::error::Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(parent).await {
            error!(dir = %parent.display(), error = %e, "Failed to create output dir");
            return Err(e.into());
        }
    }

    if let Err(e) = fs::write(path, rendered).await {
        error!(error = %e, "Failed to write rendered accordion");
        return Err(e.into());
    }
    info!(bytes = rendered.len(), "Wrote rendered accordion");
    Ok(())
}
