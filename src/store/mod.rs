//! Asset persistence seam.
//!
//! Generation never writes files itself. Clips and menu pages are handed to
//! an [`AssetStore`], which decides where and how they live. Two stores are
//! provided: [`MemoryAssetStore`] for tests and embedding hosts, and
//! [`FsAssetStore`] which writes pretty-printed JSON documents.

pub mod fs;
pub mod memory;

use std::path::Path;

use anyhow::{bail, Result};

use crate::models::{is_valid_name, ClipRef, MenuPage, ToggleClip};

pub use fs::FsAssetStore;
pub use memory::MemoryAssetStore;

/// Destination for generated artifacts.
pub trait AssetStore {
    /// Persists a clip under `folder` and returns a reference to it.
    fn persist_clip(&mut self, clip: &ToggleClip, folder: &Path) -> Result<ClipRef>;

    /// Persists a menu page under `folder`, replacing any previous version.
    fn persist_menu_page(&mut self, page: &MenuPage, folder: &Path) -> Result<()>;

    /// Called once after every mutation of a run.
    ///
    /// The outcome is not observed by the generator.
    fn refresh(&mut self) {}
}

/// File name of a persisted clip.
///
/// # Errors
///
/// Fails if `clip_name` is not a single path component.
pub fn clip_file_name(clip_name: &str) -> Result<String> {
    asset_file_name(clip_name, "clip")
}

/// File name of a persisted menu page.
///
/// # Errors
///
/// Fails if `page_name` is not a single path component.
pub fn menu_file_name(page_name: &str) -> Result<String> {
    asset_file_name(page_name, "menu")
}

fn asset_file_name(name: &str, kind: &str) -> Result<String> {
    if !is_valid_name(name) {
        bail!("Invalid {kind} name '{name}': must be a single path component");
    }
    Ok(format!("{name}.{kind}.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names() {
        assert_eq!(clip_file_name("Hat_On").unwrap(), "Hat_On.clip.json");
        assert_eq!(menu_file_name("ToggleMenu_0").unwrap(), "ToggleMenu_0.menu.json");
    }

    #[test]
    fn test_file_names_reject_path_components() {
        for name in ["", ".", "..", "../x", "a/b", "a\\b"] {
            assert!(clip_file_name(name).is_err(), "clip name {name:?}");
            assert!(menu_file_name(name).is_err(), "menu name {name:?}");
        }
        let err = clip_file_name("../../escaped_On").unwrap_err();
        assert!(err.to_string().contains("single path component"));
    }
}
