//! Glyph name to Unicode resolution
//!
//! Only the y-position classifier needs this: it asks whether a glyph's base
//! name is a lowercase letter. Resolution failure is a normal outcome and
//! simply means "not lowercase".

use norad::Font;
use std::collections::HashMap;
use std::sync::OnceLock;
use unicode_general_category::{get_general_category, GeneralCategory};

/// Production name table, one `name;XXXX` entry per line
const GLYPH_NAME_TABLE: &str = include_str!("glyph_names.txt");

static PRODUCTION_NAMES: OnceLock<HashMap<&'static str, char>> = OnceLock::new();

fn production_names() -> &'static HashMap<&'static str, char> {
    PRODUCTION_NAMES.get_or_init(|| parse_name_table(GLYPH_NAME_TABLE))
}

/// Parse `name;XXXX` lines. Comments, blank lines and malformed entries are
/// skipped; the first entry for a name wins.
fn parse_name_table(text: &str) -> HashMap<&str, char> {
    let mut names = HashMap::new();
    for line in text.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((name, hex)) = line.split_once(';') else {
            continue;
        };
        if let Some(codepoint) = parse_hex_codepoint(hex.trim()) {
            names.entry(name.trim()).or_insert(codepoint);
        }
    }
    names
}

/// Resolves a glyph name (without suffix) to a code point
pub trait GlyphNameResolver {
    fn resolve(&self, base_name: &str) -> Option<char>;
}

/// Name-only resolution: single characters, `uniXXXX`, `uXXXX[XX]` and the
/// production names of Latin and Greek letters (`eacute`, `ohorn`,
/// `ecircumflexacute`, `dotlessi`, `alphatonos`, ...)
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNameResolver;

impl GlyphNameResolver for DefaultNameResolver {
    fn resolve(&self, base_name: &str) -> Option<char> {
        let mut chars = base_name.chars();
        if let (Some(only), None) = (chars.next(), chars.next()) {
            return Some(only);
        }

        if let Some(hex) = base_name.strip_prefix("uni") {
            if hex.len() == 4 {
                return parse_hex_codepoint(hex);
            }
        }
        if let Some(hex) = base_name.strip_prefix('u') {
            if (4..=6).contains(&hex.len()) {
                if let Some(codepoint) = parse_hex_codepoint(hex) {
                    return Some(codepoint);
                }
            }
        }

        production_names().get(base_name).copied()
    }
}

/// Prefers the code points a font assigns to its glyphs, falling back to
/// [`DefaultNameResolver`]
#[derive(Debug, Clone, Default)]
pub struct FontNameResolver {
    codepoints: HashMap<String, char>,
}

impl FontNameResolver {
    pub fn from_norad_font(font: &Font) -> Self {
        let codepoints = font
            .default_layer()
            .iter()
            .filter_map(|glyph| {
                glyph
                    .codepoints
                    .iter()
                    .next()
                    .map(|codepoint| (glyph.name().to_string(), codepoint))
            })
            .collect();
        Self { codepoints }
    }
}

impl GlyphNameResolver for FontNameResolver {
    fn resolve(&self, base_name: &str) -> Option<char> {
        self.codepoints
            .get(base_name)
            .copied()
            .or_else(|| DefaultNameResolver.resolve(base_name))
    }
}

/// True iff the code point's general category is Ll
pub fn is_lowercase_letter(codepoint: char) -> bool {
    get_general_category(codepoint) == GeneralCategory::LowercaseLetter
}

fn parse_hex_codepoint(hex: &str) -> Option<char> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
}
