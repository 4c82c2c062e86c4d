//! Base/mark anchor naming
//!
//! A diacritic carries the same logical anchor as the base it attaches to,
//! rendered with a leading underscore. The role is a pure function of the
//! glyph name; the prefix only appears when a name is rendered.

/// Combining marks recognized by name alone
pub const COMBINING_MARK_NAMES: [&str; 11] = [
    "gravecmb",
    "circumflexcmb",
    "macroncmb",
    "dotaccentcmb",
    "dieresiscmb",
    "ringabovecmb",
    "hungarumlautcmb",
    "caroncmb",
    "cedillacmb",
    "ogonekcmb",
    "caronSlovak",
];

pub const MARK_PREFIX: char = '_';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorRole {
    Base,
    Mark,
}

impl AnchorRole {
    pub fn of_glyph(glyph_name: &str) -> Self {
        if is_known_mark(glyph_name) || glyph_name.contains("cmb") || glyph_name.contains("comb") {
            AnchorRole::Mark
        } else {
            AnchorRole::Base
        }
    }

    /// Role encoded in an already rendered anchor name
    pub fn of_anchor_name(anchor_name: &str) -> Self {
        if anchor_name.starts_with(MARK_PREFIX) {
            AnchorRole::Mark
        } else {
            AnchorRole::Base
        }
    }

    pub fn apply_to(self, anchor_name: &str) -> String {
        match self {
            AnchorRole::Base => anchor_name.to_string(),
            AnchorRole::Mark => format!("{MARK_PREFIX}{anchor_name}"),
        }
    }
}

pub fn is_known_mark(glyph_name: &str) -> bool {
    COMBINING_MARK_NAMES.contains(&glyph_name)
}

pub fn role(glyph_name: &str) -> AnchorRole {
    AnchorRole::of_glyph(glyph_name)
}

/// Name of `anchor_name` as it should appear on `glyph_name`
pub fn final_name(anchor_name: &str, glyph_name: &str) -> String {
    role(glyph_name).apply_to(anchor_name)
}

pub fn is_mark_side(anchor_name: &str) -> bool {
    AnchorRole::of_anchor_name(anchor_name) == AnchorRole::Mark
}

/// Logical anchor name with any leading underscores removed
pub fn strip_mark_prefix(anchor_name: &str) -> &str {
    anchor_name.trim_start_matches(MARK_PREFIX)
}
