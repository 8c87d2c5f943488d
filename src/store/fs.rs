//! Filesystem asset store writing JSON documents.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::models::{ClipRef, MenuPage, ToggleClip};
use crate::store::{clip_file_name, menu_file_name, AssetStore};

/// Writes artifacts as pretty JSON files, creating folders as needed.
///
/// Relative folders are resolved against `base_dir`.
#[derive(Debug, Clone, Default)]
pub struct FsAssetStore {
    base_dir: PathBuf,
    written: Vec<PathBuf>,
}

impl FsAssetStore {
    /// Creates a store rooted at `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            written: Vec::new(),
        }
    }

    /// Files written so far, in order.
    #[must_use]
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn write_json<T: Serialize>(&mut self, folder: &Path, file_name: &str, value: &T) -> Result<PathBuf> {
        let dir = self.base_dir.join(folder);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create folder {}", dir.display()))?;

        let path = dir.join(file_name);
        write_json_atomic(&path, value)?;
        debug!("Wrote {}", path.display());

        self.written.push(path.clone());
        Ok(path)
    }
}

/// Serializes `value` to `path` through a temp file + rename so the target
/// is never left half-written.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)
        .with_context(|| format!("Failed to serialize {}", path.display()))?;

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, content).with_context(|| format!("Failed to write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| {
        format!(
            "Failed to move {} into place at {}",
            tmp.display(),
            path.display()
        )
    })?;
    Ok(())
}

impl AssetStore for FsAssetStore {
    fn persist_clip(&mut self, clip: &ToggleClip, folder: &Path) -> Result<ClipRef> {
        let path = self.write_json(folder, &clip_file_name(&clip.name)?, clip)?;
        Ok(ClipRef {
            name: clip.name.clone(),
            location: path.to_string_lossy().into_owned(),
        })
    }

    fn persist_menu_page(&mut self, page: &MenuPage, folder: &Path) -> Result<()> {
        self.write_json(folder, &menu_file_name(&page.name)?, page)?;
        Ok(())
    }

    fn refresh(&mut self) {
        info!("Saved {} asset files", self.written.len());
    }
}
