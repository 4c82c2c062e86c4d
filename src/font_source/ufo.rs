//! UFO file I/O and the norad side of the font contract

use super::{AnchorPoint, FontInfo, FontMetricsSnapshot, FontTarget, GlyphTarget};
use crate::core::errors::EngineError;
use crate::geometry::{contours_to_bezpaths, horizontal_crossings};
use anyhow::{Context, Result};
use norad::Font;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Load a UFO font file from disk
pub fn load_ufo_from_path(path: impl AsRef<Path>) -> Result<Font> {
    let path = path.as_ref();
    let font = Font::load(path).with_context(|| format!("failed to load UFO {}", path.display()))?;
    Ok(font)
}

/// A UFO source opened for anchor work
#[derive(Debug, Clone)]
pub struct UfoFont {
    font: Font,
    path: Option<PathBuf>,
    changed: bool,
}

impl UfoFont {
    /// Wrap an in-memory font that has no file on disk yet
    pub fn new(font: Font) -> Self {
        Self {
            font,
            path: None,
            changed: false,
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let font = load_ufo_from_path(path)?;
        debug!("Loaded {} from {:?}", FontInfo::from_norad_font(&font).get_display_name(), path);
        Ok(Self {
            font,
            path: Some(path.to_path_buf()),
            changed: false,
        })
    }

    /// Write the font back to the path it was loaded from
    pub fn save(&mut self) -> Result<()> {
        let path = self
            .path
            .clone()
            .context("font has no path; use save_as to choose one")?;
        self.save_as(path)
    }

    pub fn save_as(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.font
            .save(path)
            .with_context(|| format!("failed to save UFO {}", path.display()))?;
        self.path = Some(path.to_path_buf());
        self.changed = false;
        debug!("Saved {:?}", path);
        Ok(())
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn font_mut(&mut self) -> &mut Font {
        &mut self.font
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// File name without the `.ufo` extension
    pub fn file_stem(&self) -> Option<String> {
        self.path
            .as_ref()
            .and_then(|path| path.file_stem())
            .map(|stem| stem.to_string_lossy().into_owned())
    }

    pub fn info(&self) -> FontInfo {
        FontInfo::from_norad_font(&self.font)
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }
}

impl FontTarget for UfoFont {
    type Glyph = norad::Glyph;

    fn label(&self) -> String {
        self.info().get_display_name()
    }

    fn metrics(&self) -> FontMetricsSnapshot {
        self.info().metrics_snapshot()
    }

    fn glyph_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .font
            .default_layer()
            .iter()
            .map(|glyph| glyph.name().to_string())
            .collect();
        names.sort();
        names
    }

    fn glyph(&self, name: &str) -> Option<&norad::Glyph> {
        self.font.default_layer().get_glyph(name)
    }

    fn glyph_mut(&mut self, name: &str) -> Option<&mut norad::Glyph> {
        self.font.default_layer_mut().get_glyph_mut(name)
    }

    fn mark_changed(&mut self) {
        self.changed = true;
    }
}

impl GlyphTarget for norad::Glyph {
    fn glyph_name(&self) -> &str {
        self.name().as_str()
    }

    fn advance_width(&self) -> f64 {
        self.width
    }

    fn anchor_points(&self) -> Vec<AnchorPoint> {
        self.anchors
            .iter()
            .map(|anchor| {
                let name = anchor
                    .name
                    .as_ref()
                    .map(|name| name.to_string())
                    .unwrap_or_default();
                AnchorPoint::new(name, anchor.x, anchor.y)
            })
            .collect()
    }

    fn append_anchor(&mut self, anchor: AnchorPoint) -> Result<(), EngineError> {
        let name: norad::Name =
            anchor
                .name
                .parse()
                .map_err(|_| EngineError::InvalidAnchorName {
                    name: anchor.name.clone(),
                    glyph: self.glyph_name().to_string(),
                })?;
        self.anchors
            .push(norad::Anchor::new(anchor.x, anchor.y, Some(name), None, None));
        Ok(())
    }

    fn remove_anchor_at(&mut self, index: usize) {
        if index < self.anchors.len() {
            self.anchors.remove(index);
        }
    }

    fn horizontal_crossings(&self, y: f64, x_start: f64, x_end: f64) -> Vec<f64> {
        let paths = contours_to_bezpaths(&self.contours);
        horizontal_crossings(&paths, y, x_start, x_end)
    }
}
