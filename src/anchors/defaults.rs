//! Built-in rule table
//!
//! Used on first run and whenever the persisted table is missing or corrupt.

use super::classifier::classify;
use super::convention::COMBINING_MARK_NAMES;
use super::rules::{AnchorRule, RuleTable};

pub const BASE_GLYPHS: [&str; 56] = [
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R", "S",
    "T", "U", "V", "W", "X", "Y", "Z", "AE", "OE", "a", "b", "c", "d", "e", "f", "g", "h", "i", "j",
    "k", "l", "m", "n", "o", "p", "q", "r", "s", "t", "u", "v", "w", "x", "y", "z", "dotlessi",
    "dotlessj",
];

/// Anchor names with the glyphs that get the anchor dropped by default
const ORGANIZED_GLYPHS: [(&str, &[&str]); 3] = [
    (
        "top",
        &[
            "a", "c", "e", "g", "h", "n", "o", "r", "s", "u", "w", "y", "z", "dotlessi",
            "dotlessj", "A", "C", "D", "E", "G", "H", "I", "J", "L", "N", "O", "R", "S", "T", "U",
            "W", "Y", "Z", "AE", "gravecmb", "circumflexcmb", "macroncmb", "dotaccentcmb",
            "dieresiscmb", "ringabovecmb", "hungarumlautcmb", "caroncmb",
        ],
    ),
    (
        "bottom",
        &[
            "C", "G", "K", "L", "N", "R", "S", "T", "c", "k", "l", "n", "r", "s", "t",
            "cedillacmb", "ogonekcmb",
        ],
    ),
    ("right", &["L", "d", "l", "t", "caronSlovak"]),
];

/// Every base and mark glyph under every built-in anchor name, enabled only
/// where the anchor is expected
pub fn default_table() -> RuleTable {
    let mut table = RuleTable::new();
    for (anchor_name, enabled) in ORGANIZED_GLYPHS {
        for glyph in BASE_GLYPHS.iter().chain(COMBINING_MARK_NAMES.iter()) {
            let mut rule = AnchorRule::new(*glyph, classify(glyph, anchor_name), 0);
            rule.drop = enabled.contains(glyph);
            table.push_rule(anchor_name, rule);
        }
    }
    table
}
