//! Vertical metric guessing
//!
//! Picks which font metric an anchor should sit on from nothing but the
//! glyph and anchor names. First matching rule wins:
//!
//! 1. `bottom` / `ogonek` anchors sit on the baseline.
//! 2. `right` anchors sit on the ascender for lowercase, else cap height.
//! 3. `top` anchors: `.cap`/`.case` glyphs use cap height, lowercase
//!    ascender letters the ascender, other lowercase and combining marks the
//!    x-height, everything else cap height.
//! 4. Anything else: cap height.

use super::convention::is_known_mark;
use crate::font_source::{is_lowercase_letter, DefaultNameResolver, GlyphNameResolver};
use std::fmt;

const ASCENDERS: [&str; 6] = ["b", "d", "f", "h", "k", "l"];
const CAP_SUFFIXES: [&str; 2] = [".cap", ".case"];

/// Vertical metric an anchor is placed on
///
/// The discriminant is the slot in a font's metrics snapshot and the integer
/// stored in settings files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum YPos {
    Ascender = 0,
    CapHeight = 1,
    XHeight = 2,
    Baseline = 3,
    Descender = 4,
}

impl YPos {
    pub const ALL: [YPos; 5] = [
        YPos::Ascender,
        YPos::CapHeight,
        YPos::XHeight,
        YPos::Baseline,
        YPos::Descender,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            YPos::Ascender => "Ascender",
            YPos::CapHeight => "Cap-Height",
            YPos::XHeight => "X-Height",
            YPos::Baseline => "Baseline",
            YPos::Descender => "Descender",
        }
    }
}

impl fmt::Display for YPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether the glyph's base name (before the first `.`) is a lowercase letter
pub fn is_lowercase_glyph<R: GlyphNameResolver + ?Sized>(glyph_name: &str, resolver: &R) -> bool {
    let base_name = glyph_name.split('.').next().unwrap_or(glyph_name);
    resolver
        .resolve(base_name)
        .is_some_and(is_lowercase_letter)
}

pub fn classify(glyph_name: &str, anchor_name: &str) -> YPos {
    classify_with(glyph_name, anchor_name, &DefaultNameResolver)
}

pub fn classify_with<R: GlyphNameResolver + ?Sized>(
    glyph_name: &str,
    anchor_name: &str,
    resolver: &R,
) -> YPos {
    if anchor_name.contains("bottom") || anchor_name.contains("ogonek") {
        return YPos::Baseline;
    }

    let lowercase = is_lowercase_glyph(glyph_name, resolver);
    if anchor_name.contains("right") {
        return if lowercase {
            YPos::Ascender
        } else {
            YPos::CapHeight
        };
    }

    if anchor_name.contains("top") {
        if CAP_SUFFIXES.iter().any(|suffix| glyph_name.ends_with(suffix)) {
            return YPos::CapHeight;
        }
        if lowercase {
            return if ASCENDERS.contains(&glyph_name) {
                YPos::Ascender
            } else {
                YPos::XHeight
            };
        }
        if is_known_mark(glyph_name) || glyph_name.contains("cmb") {
            return YPos::XHeight;
        }
        return YPos::CapHeight;
    }

    YPos::CapHeight
}
