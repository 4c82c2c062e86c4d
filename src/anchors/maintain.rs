//! Anchor cleanup across fonts

use super::convention::strip_mark_prefix;
use super::report::{FontRemovals, RemovalKind, RemovalReport};
use crate::core::errors::EngineError;
use crate::font_source::{FontTarget, GlyphTarget};
use std::collections::{BTreeSet, HashSet};
use tracing::info;

/// Remove every anchor whose name, ignoring the mark prefix, is not in
/// `keep`. An empty keep list removes all anchors.
pub fn remove_by_name<F, S>(fonts: &mut [F], keep: &[S]) -> Result<RemovalReport, EngineError>
where
    F: FontTarget,
    S: AsRef<str>,
{
    if fonts.is_empty() {
        return Err(EngineError::NoTarget);
    }
    let keep: HashSet<&str> = keep.iter().map(|name| strip_mark_prefix(name.as_ref())).collect();

    let report = sweep(fonts, RemovalKind::ByName, |anchor_names| {
        anchor_names
            .iter()
            .enumerate()
            .filter(|(_, name)| !keep.contains(strip_mark_prefix(name)))
            .map(|(index, _)| index)
            .collect()
    });
    info!("Removed {} anchors", report.total());
    Ok(report)
}

/// Remove later anchors that repeat the exact name of an earlier one in the
/// same glyph. Only names in `filter` (compared without the mark prefix) are
/// considered; an empty filter considers all.
pub fn remove_duplicates<F, S>(fonts: &mut [F], filter: &[S]) -> Result<RemovalReport, EngineError>
where
    F: FontTarget,
    S: AsRef<str>,
{
    if fonts.is_empty() {
        return Err(EngineError::NoTarget);
    }
    let filter: HashSet<&str> = filter
        .iter()
        .map(|name| strip_mark_prefix(name.as_ref()))
        .collect();

    let report = sweep(fonts, RemovalKind::Duplicates, |anchor_names| {
        let mut seen: HashSet<&str> = HashSet::new();
        anchor_names
            .iter()
            .enumerate()
            .filter(|(_, name)| filter.is_empty() || filter.contains(strip_mark_prefix(name)))
            .filter(|(_, name)| !seen.insert(name.as_str()))
            .map(|(index, _)| index)
            .collect()
    });
    info!("Removed {} duplicate anchors", report.total());
    Ok(report)
}

/// Every anchor name in the fonts, without the mark prefix, sorted
pub fn anchor_names<F: FontTarget>(fonts: &[F]) -> Vec<String> {
    let mut names = BTreeSet::new();
    for font in fonts {
        for glyph_name in font.glyph_names() {
            let Some(glyph) = font.glyph(&glyph_name) else {
                continue;
            };
            for anchor in glyph.anchor_points() {
                names.insert(strip_mark_prefix(&anchor.name).to_string());
            }
        }
    }
    names.into_iter().collect()
}

/// Run `select` over each glyph's anchor names and remove the ascending
/// indices it returns
fn sweep<F, P>(fonts: &mut [F], kind: RemovalKind, mut select: P) -> RemovalReport
where
    F: FontTarget,
    P: FnMut(&[String]) -> Vec<usize>,
{
    let mut report = RemovalReport::new(kind);
    for font in fonts.iter_mut() {
        let mut removals = FontRemovals::new(font.label());
        for glyph_name in font.glyph_names() {
            let Some(glyph) = font.glyph_mut(&glyph_name) else {
                continue;
            };
            let names: Vec<String> = glyph
                .anchor_points()
                .into_iter()
                .map(|anchor| anchor.name)
                .collect();
            let doomed = select(&names);
            for &index in doomed.iter().rev() {
                glyph.remove_anchor_at(index);
            }
            for &index in &doomed {
                removals.record(&names[index], &glyph_name);
            }
        }
        if !removals.is_empty() {
            font.mark_changed();
        }
        report.fonts.push(removals);
    }
    report
}
