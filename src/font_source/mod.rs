//! Font source access
//!
//! The anchor engine never reaches into `norad` directly. It talks to fonts
//! through [`FontTarget`] and [`GlyphTarget`], which cover exactly what anchor
//! placement needs from a host font: vertical metrics, glyph lookup, ordered
//! anchor lists with append/remove, and a horizontal outline intersection
//! query. [`UfoFont`] implements them for UFO sources.

pub mod metrics;
pub mod ufo;
pub mod unicode;

use crate::core::errors::EngineError;

// Explicit re-exports for public API
pub use metrics::{FontInfo, FontMetricsSnapshot};
pub use ufo::{load_ufo_from_path, UfoFont};
pub use unicode::{is_lowercase_letter, DefaultNameResolver, FontNameResolver, GlyphNameResolver};

/// A named, glyph-relative coordinate
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorPoint {
    /// Anchor name as stored on the glyph (mark-side names keep their `_`).
    /// Unnamed anchors are reported with an empty name.
    pub name: String,
    pub x: f64,
    pub y: f64,
}

impl AnchorPoint {
    pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
        }
    }
}

/// The per-glyph half of the host font contract
pub trait GlyphTarget {
    fn glyph_name(&self) -> &str;

    /// Advance width
    fn advance_width(&self) -> f64;

    /// Anchors in their stored order
    fn anchor_points(&self) -> Vec<AnchorPoint>;

    fn append_anchor(&mut self, anchor: AnchorPoint) -> Result<(), EngineError>;

    /// Remove the anchor at `index` in stored order. Out of range is a no-op.
    fn remove_anchor_at(&mut self, index: usize);

    /// X coordinates where the segment `(x_start, y)..(x_end, y)` crosses the
    /// glyph outline, sorted ascending.
    fn horizontal_crossings(&self, y: f64, x_start: f64, x_end: f64) -> Vec<f64>;

    fn has_anchor(&self, name: &str) -> bool {
        self.anchor_points().iter().any(|anchor| anchor.name == name)
    }

    /// Remove every anchor called `name`, returning how many were removed
    fn remove_anchors_named(&mut self, name: &str) -> usize {
        let doomed: Vec<usize> = self
            .anchor_points()
            .iter()
            .enumerate()
            .filter(|(_, anchor)| anchor.name == name)
            .map(|(index, _)| index)
            .collect();
        for &index in doomed.iter().rev() {
            self.remove_anchor_at(index);
        }
        doomed.len()
    }
}

/// The per-font half of the host font contract
pub trait FontTarget {
    type Glyph: GlyphTarget;

    /// Human readable name used in reports
    fn label(&self) -> String;

    fn metrics(&self) -> FontMetricsSnapshot;

    /// Glyph names in a stable order
    fn glyph_names(&self) -> Vec<String>;

    fn glyph(&self, name: &str) -> Option<&Self::Glyph>;

    fn glyph_mut(&mut self, name: &str) -> Option<&mut Self::Glyph>;

    /// Notify the host that the font was modified
    fn mark_changed(&mut self);

    fn contains_glyph(&self, name: &str) -> bool {
        self.glyph(name).is_some()
    }
}
