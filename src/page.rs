//! Headless stand-in for the host document.
//!
//! A [`Page`] is a set of named mount points. Trees replace the content of
//! the mount point they are constructed against; the page itself knows
//! nothing about articles.

use crate::tree::Node;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct MountPoint {
    content: Option<Node>,
    /// Number of times the content has been replaced.
    generation: u64,
}

impl MountPoint {
    pub fn content(&self) -> Option<&Node> {
        self.content.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Discard whatever was mounted here and put `node` in its place.
    pub fn replace(&mut self, node: Node) {
        self.content = Some(node);
        self.generation += 1;
    }

}

#[derive(Debug, Clone, Default)]
pub struct Page {
    mounts: HashMap<String, MountPoint>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// A page with one empty mount point per id.
    pub fn with_mounts<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut page = Self::new();
        for id in ids {
            page.add_mount(id);
        }
        page
    }

    pub fn add_mount(&mut self, id: impl Into<String>) {
        self.mounts.entry(id.into()).or_default();
    }

    pub fn resolve(&self, id: &str) -> Option<&MountPoint> {
        self.mounts.get(id)
    }

    pub fn resolve_mut(&mut self, id: &str) -> Option<&mut MountPoint> {
        self.mounts.get_mut(id)
    }

    pub fn content(&self, id: &str) -> Option<&Node> {
        self.resolve(id).and_then(MountPoint::content)
    }
}
