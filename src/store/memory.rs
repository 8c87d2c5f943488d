//! In-memory asset store.

use std::path::Path;

use anyhow::{bail, Result};
use indexmap::IndexMap;

use crate::models::{ClipRef, MenuPage, ToggleClip};
use crate::store::{clip_file_name, menu_file_name, AssetStore};

/// Keeps every persisted artifact in ordered maps keyed by location.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssetStore {
    /// Clips by location
    pub clips: IndexMap<String, ToggleClip>,
    /// Menu pages by location
    pub pages: IndexMap<String, MenuPage>,
    /// Number of times [`AssetStore::refresh`] was called
    pub refresh_count: usize,
    /// When set, every persist call fails (used to exercise error paths)
    pub read_only: bool,
}

impl MemoryAssetStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a clip by name, ignoring its folder.
    #[must_use]
    pub fn clip(&self, name: &str) -> Option<&ToggleClip> {
        self.clips.values().find(|c| c.name == name)
    }

    /// Looks up a page by name, ignoring its folder.
    #[must_use]
    pub fn page(&self, name: &str) -> Option<&MenuPage> {
        self.pages.values().find(|p| p.name == name)
    }
}

fn location(folder: &Path, file_name: &str) -> String {
    folder.join(file_name).to_string_lossy().into_owned()
}

impl AssetStore for MemoryAssetStore {
    fn persist_clip(&mut self, clip: &ToggleClip, folder: &Path) -> Result<ClipRef> {
        if self.read_only {
            bail!("Store is read-only, cannot persist clip {}", clip.name);
        }
        let location = location(folder, &clip_file_name(&clip.name)?);
        self.clips.insert(location.clone(), clip.clone());
        Ok(ClipRef {
            name: clip.name.clone(),
            location,
        })
    }

    fn persist_menu_page(&mut self, page: &MenuPage, folder: &Path) -> Result<()> {
        if self.read_only {
            bail!("Store is read-only, cannot persist menu page {}", page.name);
        }
        self.pages
            .insert(location(folder, &menu_file_name(&page.name)?), page.clone());
        Ok(())
    }

    fn refresh(&mut self) {
        self.refresh_count += 1;
    }
}
