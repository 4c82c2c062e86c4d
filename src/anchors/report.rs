//! Operation reports
//!
//! Reports keep insertion order so they read in the same order the work was
//! done. Rendering is for people, not for parsing.

use std::fmt;

const STAR_LENGTH: usize = 40;

/// Position of the group keyed by `anchor_name`, appending an empty one if needed
fn group_index<T>(groups: &mut Vec<(String, Vec<T>)>, anchor_name: &str) -> usize {
    match groups.iter().position(|(name, _)| name == anchor_name) {
        Some(index) => index,
        None => {
            groups.push((anchor_name.to_string(), Vec::new()));
            groups.len() - 1
        }
    }
}

/// Anchors dropped into one font
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DropReport {
    pub font_label: String,
    entries: Vec<(String, Vec<(String, f64)>)>,
}

impl DropReport {
    pub fn new(font_label: impl Into<String>) -> Self {
        Self {
            font_label: font_label.into(),
            entries: Vec::new(),
        }
    }

    pub fn record(&mut self, anchor_name: &str, glyph_name: &str, y: f64) {
        let index = group_index(&mut self.entries, anchor_name);
        self.entries[index].1.push((glyph_name.to_string(), y));
    }

    /// Anchor name → `(glyph, y)` in drop order
    pub fn entries(&self) -> &[(String, Vec<(String, f64)>)] {
        &self.entries
    }

    pub fn placements(&self, anchor_name: &str) -> Option<&[(String, f64)]> {
        self.entries
            .iter()
            .find(|(name, _)| name == anchor_name)
            .map(|(_, placements)| placements.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.iter().map(|(_, placements)| placements.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Anchors removed from one font, grouped by anchor name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontRemovals {
    pub font_label: String,
    entries: Vec<(String, Vec<String>)>,
}

impl FontRemovals {
    pub fn new(font_label: impl Into<String>) -> Self {
        Self {
            font_label: font_label.into(),
            entries: Vec::new(),
        }
    }

    pub fn record(&mut self, anchor_name: &str, glyph_name: &str) {
        let index = group_index(&mut self.entries, anchor_name);
        self.entries[index].1.push(glyph_name.to_string());
    }

    /// Anchor name → affected glyph names
    pub fn entries(&self) -> &[(String, Vec<String>)] {
        &self.entries
    }

    pub fn glyphs(&self, anchor_name: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(name, _)| name == anchor_name)
            .map(|(_, glyphs)| glyphs.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.iter().map(|(_, glyphs)| glyphs.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalKind {
    /// Anchors not in a keep list
    ByName,
    /// Later anchors repeating an earlier name
    Duplicates,
}

/// Font label → anchor name → glyph names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalReport {
    pub kind: RemovalKind,
    pub fonts: Vec<FontRemovals>,
}

impl RemovalReport {
    pub fn new(kind: RemovalKind) -> Self {
        Self {
            kind,
            fonts: Vec::new(),
        }
    }

    pub fn font(&self, font_label: &str) -> Option<&FontRemovals> {
        self.fonts.iter().find(|font| font.font_label == font_label)
    }

    pub fn total(&self) -> usize {
        self.fonts.iter().map(FontRemovals::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

fn banner_open(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f, "{}", "*".repeat(STAR_LENGTH))?;
    writeln!(f, "{title}")?;
    writeln!(f, "{}", "-".repeat(STAR_LENGTH))
}

fn banner_close(f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "{}", "*".repeat(STAR_LENGTH))
}

impl fmt::Display for DropReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.font_label)?;
        writeln!(f, "{}", "-".repeat(STAR_LENGTH))?;
        if self.is_empty() {
            return writeln!(f, "Didn't drop any new anchors.");
        }
        writeln!(f, "Dropped the following anchors:")?;
        for (anchor_name, placements) in &self.entries {
            let placed: Vec<String> = placements
                .iter()
                .map(|(glyph, y)| format!("{glyph} ({y})"))
                .collect();
            writeln!(f, "  {anchor_name}: {}", placed.join(", "))?;
        }
        Ok(())
    }
}

/// All per-font drop reports of one run under a single banner
pub struct DropSummary<'a>(pub &'a [DropReport]);

impl fmt::Display for DropSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        banner_open(f, "Anchor Dropper Report")?;
        for report in self.0 {
            writeln!(f, "{report}")?;
        }
        banner_close(f)
    }
}

impl fmt::Display for RemovalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = match self.kind {
            RemovalKind::ByName => "Anchor Dropper Anchor Removal Report",
            RemovalKind::Duplicates => "Anchor Dropper Duplicate Removal Report",
        };
        banner_open(f, title)?;
        if self.is_empty() {
            match self.kind {
                RemovalKind::ByName => writeln!(f, "Didn't remove any anchors.")?,
                RemovalKind::Duplicates => writeln!(f, "There were no duplicate anchors.")?,
            }
            return banner_close(f);
        }
        writeln!(f, "Removed the following anchors:")?;
        for font in self.fonts.iter().filter(|font| !font.is_empty()) {
            writeln!(f, "{}", font.font_label)?;
            for (anchor_name, glyphs) in font.entries() {
                writeln!(f, "  {anchor_name}: {}", glyphs.join(", "))?;
            }
        }
        banner_close(f)
    }
}
