//! Horizontal anchor position from outline geometry
//!
//! A horizontal ray at the anchor's height is cast across the glyph. Plain
//! anchors land halfway between the outermost crossings. Directional anchors
//! hug an edge: base anchors the outer edge in their direction, mark anchors
//! the opposite one, so a mark's attachment meets its base.

use super::convention::is_mark_side;
use crate::font_source::GlyphTarget;

/// How far the ray extends past the glyph box on each side
pub const RAY_OVERSHOOT: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementOptions {
    /// Treat anchors containing "left" as directional.
    pub directional_left: bool,
}

impl Default for PlacementOptions {
    fn default() -> Self {
        Self {
            directional_left: true,
        }
    }
}

pub fn compute_x<G: GlyphTarget + ?Sized>(
    glyph: &G,
    y: f64,
    anchor_name: &str,
    options: &PlacementOptions,
) -> f64 {
    let width = glyph.advance_width();
    let xs = glyph.horizontal_crossings(y, -RAY_OVERSHOOT, width + RAY_OVERSHOOT);
    x_from_crossings(&xs, width, anchor_name, options)
}

/// Pick the anchor x from ray crossings; no crossings means mid-width
pub fn x_from_crossings(xs: &[f64], width: f64, anchor_name: &str, options: &PlacementOptions) -> f64 {
    let Some((min, max)) = extent(xs) else {
        return width / 2.0;
    };
    let mark_side = is_mark_side(anchor_name);

    if anchor_name.contains("right") {
        if mark_side {
            min
        } else {
            max
        }
    } else if options.directional_left && anchor_name.contains("left") {
        if mark_side {
            max
        } else {
            min
        }
    } else {
        ((min + max) / 2.0).trunc()
    }
}

fn extent(xs: &[f64]) -> Option<(f64, f64)> {
    let first = *xs.first()?;
    Some(
        xs.iter()
            .fold((first, first), |(min, max), &x| (min.min(x), max.max(x))),
    )
}
