//! Importing rule tables
//!
//! Settings files are JSON rule tables. Glyph construction files are reduced
//! to `(base, accent, anchor)` recipes and turned into rules with classified
//! default positions.

use super::classifier::classify_with;
use super::rules::{AnchorRule, RuleTable};
use crate::font_source::{DefaultNameResolver, GlyphNameResolver};
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

pub const SETTINGS_EXTENSION: &str = "anchorDropperSettings";
pub const CONSTRUCTION_EXTENSION: &str = "glyphConstruction";

/// File formats accepted by [`load_settings_file`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsFormat {
    /// `.anchorDropperSettings` or `.json`, parsed identically
    RuleTable,
    /// `.glyphConstruction`
    Construction,
}

impl SettingsFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            SETTINGS_EXTENSION | "json" => Some(Self::RuleTable),
            CONSTRUCTION_EXTENSION => Some(Self::Construction),
            _ => None,
        }
    }
}

/// A composite glyph recipe that names the anchor it is built on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructionRecipe {
    pub base_glyph: String,
    pub accent_glyph: String,
    pub anchor_name: String,
}

/// Anything that can yield construction recipes
pub trait ConstructionSource {
    fn recipes(&self) -> Vec<ConstructionRecipe>;
}

/// Construction statements (`Aacute = A + acute@top`) split on whitespace,
/// with glyph names at fixed token positions
#[derive(Debug, Clone, Copy)]
pub struct WhitespaceStatements<'a, S>(pub &'a [S]);

impl<S: AsRef<str>> ConstructionSource for WhitespaceStatements<'_, S> {
    fn recipes(&self) -> Vec<ConstructionRecipe> {
        self.0
            .iter()
            .filter_map(|statement| parse_statement(statement.as_ref()))
            .collect()
    }
}

/// Read a recipe out of one statement.
///
/// Token 2 is the base glyph and token 4 the accent glyph (cut at its `@`).
/// The anchor name follows the last `@` up to whitespace, commas stripped.
/// Statements without an anchor marker are not recipes.
pub fn parse_statement(statement: &str) -> Option<ConstructionRecipe> {
    if !statement.contains('@') {
        return None;
    }
    let tokens: Vec<&str> = statement.split_whitespace().collect();
    let base_glyph = *tokens.get(2)?;
    let accent_glyph = tokens.get(4)?.split('@').next()?;
    let anchor_name = statement
        .rsplit('@')
        .next()?
        .split_whitespace()
        .next()?
        .trim_matches(',');

    if base_glyph.is_empty() || accent_glyph.is_empty() || anchor_name.is_empty() {
        return None;
    }
    Some(ConstructionRecipe {
        base_glyph: base_glyph.to_string(),
        accent_glyph: accent_glyph.to_string(),
        anchor_name: anchor_name.to_string(),
    })
}

/// Split construction file text into statements, dropping comments and
/// blank lines
pub fn split_construction_text(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.split('#').next().unwrap_or_default().trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Build rules from construction statements with the default name resolver
pub fn from_construction_text<S: AsRef<str>>(statements: &[S]) -> RuleTable {
    from_recipes(&WhitespaceStatements(statements), &DefaultNameResolver)
}

/// Build rules from recipes: every distinct `(base, anchor)` pair in
/// first-seen order, then every distinct `(accent, anchor)` pair. Rules are
/// enabled, unadjusted and classified.
pub fn from_recipes<C, R>(source: &C, resolver: &R) -> RuleTable
where
    C: ConstructionSource + ?Sized,
    R: GlyphNameResolver + ?Sized,
{
    let mut bases: Vec<(String, String)> = Vec::new();
    let mut accents: Vec<(String, String)> = Vec::new();

    for recipe in source.recipes() {
        let base = (recipe.base_glyph, recipe.anchor_name.clone());
        if !bases.contains(&base) {
            bases.push(base);
        }
        let accent = (recipe.accent_glyph, recipe.anchor_name);
        if !accents.contains(&accent) {
            accents.push(accent);
        }
    }

    let mut table = RuleTable::new();
    for (glyph, anchor_name) in bases.into_iter().chain(accents) {
        let y_pos = classify_with(&glyph, &anchor_name, resolver);
        table.push_rule(&anchor_name, AnchorRule::new(glyph, y_pos, 0));
    }
    table
}

/// Load a rule table from a settings or construction file.
///
/// An empty result means there was nothing to import.
pub fn load_settings_file<R: GlyphNameResolver + ?Sized>(
    path: impl AsRef<Path>,
    resolver: &R,
) -> Result<RuleTable> {
    let path = path.as_ref();
    match SettingsFormat::from_path(path) {
        Some(SettingsFormat::RuleTable) => RuleTable::load(path),
        Some(SettingsFormat::Construction) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let statements = split_construction_text(&text);
            let table = from_recipes(&WhitespaceStatements(statements.as_slice()), resolver);
            debug!(
                "Imported {} rules from {} statements in {:?}",
                table.rule_count(),
                statements.len(),
                path
            );
            Ok(table)
        }
        None => bail!(
            "unsupported settings file {}: expected .{}, .json or .{}",
            path.display(),
            SETTINGS_EXTENSION,
            CONSTRUCTION_EXTENSION
        ),
    }
}
