use std::cell::RefCell;
use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use egui::load::{SizeHint, TexturePoll};
use egui::{TextureId, TextureOptions};

use crate::render::ImageProvider;

const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

/// Fixed pool of decorative card images, loaded lazily through egui's image
/// loaders. Cards pick a slot by hashing their id.
#[derive(Debug, Default)]
pub struct TexturePool {
    uris: Vec<String>,
    failed: RefCell<BTreeSet<usize>>,
}

impl TexturePool {
    /// Collect up to `limit` images from `dir`, in file-name order.
    pub fn from_dir(dir: &Path, limit: usize) -> Result<Self> {
        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("Failed to read image directory {}", dir.display()))?;
        let mut paths: Vec<_> = entries
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|p| {
                p.extension()
                    .and_then(|e| e.to_str())
                    .map(|e| IMAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
                    .unwrap_or(false)
            })
            .collect();
        paths.sort();
        paths.truncate(limit);

        log::info!("Image pool: {} images from {}", paths.len(), dir.display());
        Ok(Self {
            uris: paths
                .iter()
                .map(|p| format!("file://{}", p.display()))
                .collect(),
            failed: RefCell::default(),
        })
    }

    #[cfg(test)]
    pub fn uris(&self) -> &[String] {
        &self.uris
    }

    /// Provider view for one frame.
    pub fn bind<'a>(&'a self, ctx: &'a egui::Context) -> BoundPool<'a> {
        BoundPool { pool: self, ctx }
    }
}

pub struct BoundPool<'a> {
    pool: &'a TexturePool,
    ctx: &'a egui::Context,
}

impl ImageProvider for BoundPool<'_> {
    fn pool_size(&self) -> usize {
        self.pool.uris.len()
    }

    fn image(&self, index: usize) -> Option<TextureId> {
        let uri = self.pool.uris.get(index)?;
        match self
            .ctx
            .try_load_texture(uri, TextureOptions::LINEAR, SizeHint::default())
        {
            Ok(TexturePoll::Ready { texture }) => Some(texture.id),
            Ok(TexturePoll::Pending { .. }) => None,
            Err(e) => {
                if self.pool.failed.borrow_mut().insert(index) {
                    log::warn!("Could not load {}: {}", uri, e);
                }
                None
            }
        }
    }
}
