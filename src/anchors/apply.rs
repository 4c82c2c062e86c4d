//! Dropping anchors into fonts from a rule table

use super::convention::final_name;
use super::report::DropReport;
use super::rules::RuleTable;
use super::solver::{compute_x, PlacementOptions};
use crate::core::errors::EngineError;
use crate::font_source::{AnchorPoint, FontTarget, GlyphTarget};
use tracing::{debug, info};

/// Apply every enabled rule to every font, one report per font in caller
/// order.
///
/// Existing anchors are left alone unless `overwrite` is set, in which case
/// all anchors with the final name are replaced by a single new one. Rules
/// naming glyphs a font lacks are skipped. A failed append stops the run;
/// anchors already placed stay.
pub fn apply<F: FontTarget>(
    fonts: &mut [F],
    table: &RuleTable,
    overwrite: bool,
    options: &PlacementOptions,
) -> Result<Vec<DropReport>, EngineError> {
    if fonts.is_empty() {
        return Err(EngineError::NoTarget);
    }

    let mut reports = Vec::with_capacity(fonts.len());
    for font in fonts.iter_mut() {
        let mut report = DropReport::new(font.label());
        let result = apply_to_font(font, table, overwrite, options, &mut report);
        font.mark_changed();
        result?;

        info!("Dropped {} anchors into {}", report.len(), report.font_label);
        reports.push(report);
    }
    Ok(reports)
}

fn apply_to_font<F: FontTarget>(
    font: &mut F,
    table: &RuleTable,
    overwrite: bool,
    options: &PlacementOptions,
    report: &mut DropReport,
) -> Result<(), EngineError> {
    let metrics = font.metrics();

    for (anchor_name, rules) in table.iter() {
        for rule in rules.iter().filter(|rule| rule.drop) {
            let Some(glyph) = font.glyph_mut(&rule.glyph) else {
                continue;
            };
            let y = metrics.get(rule.y_pos) + f64::from(rule.y_adjust);
            let name = final_name(anchor_name, &rule.glyph);

            if !overwrite && glyph.has_anchor(&name) {
                debug!("{} already has {}; skipping", rule.glyph, name);
                continue;
            }
            if overwrite {
                glyph.remove_anchors_named(&name);
            }
            let x = compute_x(&*glyph, y, &name, options);
            glyph.append_anchor(AnchorPoint::new(name.as_str(), x, y))?;
            report.record(&name, &rule.glyph, y);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchors::{AnchorRule, YPos};
    use crate::font_source::UfoFont;
    use norad::{Contour, ContourPoint, Font, Glyph, PointType};

    fn rectangle_glyph(name: &str) -> Glyph {
        let point = |x, y| ContourPoint::new(x, y, PointType::Line, false, None, None);
        let mut glyph = Glyph::new(name);
        glyph.width = 300.0;
        glyph.contours.push(Contour::new(
            vec![
                point(80.0, 0.0),
                point(220.0, 0.0),
                point(220.0, 600.0),
                point(80.0, 600.0),
            ],
            None,
        ));
        glyph
    }

    fn test_font() -> UfoFont {
        let mut font = Font::new();
        font.font_info.family_name = Some("Test".into());
        font.font_info.style_name = Some("Regular".into());
        font.font_info.x_height = Some(500.0);
        font.font_info.cap_height = Some(700.0);
        let layer = font.default_layer_mut();
        layer.insert_glyph(rectangle_glyph("a"));
        layer.insert_glyph(rectangle_glyph("gravecmb"));
        UfoFont::new(font)
    }

    fn top_table(y_adjust: i32) -> RuleTable {
        let mut table = RuleTable::new();
        table.push_rule("top", AnchorRule::new("a", YPos::XHeight, y_adjust));
        table.push_rule("top", AnchorRule::new("gravecmb", YPos::XHeight, 0));
        table.push_rule("top", AnchorRule::new("missing", YPos::XHeight, 0));
        table.push_rule("top", AnchorRule::new("a", YPos::CapHeight, 0).disabled());
        table
    }

    fn anchors_of(font: &UfoFont, glyph: &str) -> Vec<AnchorPoint> {
        font.glyph(glyph).expect("glyph").anchor_points()
    }

    #[test]
    fn no_fonts_is_no_target() {
        let mut fonts: Vec<UfoFont> = Vec::new();
        let result = apply(&mut fonts, &top_table(0), false, &PlacementOptions::default());
        assert!(matches!(result, Err(EngineError::NoTarget)));
    }

    #[test]
    fn drops_base_and_mark_anchors() {
        let mut fonts = vec![test_font()];
        let reports = apply(&mut fonts, &top_table(5), false, &PlacementOptions::default())
            .expect("apply");

        assert_eq!(anchors_of(&fonts[0], "a"), vec![AnchorPoint::new("top", 150.0, 505.0)]);
        assert_eq!(
            anchors_of(&fonts[0], "gravecmb"),
            vec![AnchorPoint::new("_top", 150.0, 500.0)]
        );
        assert!(fonts[0].is_changed());

        let report = &reports[0];
        assert_eq!(report.font_label, "Test Regular");
        assert_eq!(report.placements("top"), Some(&[("a".to_string(), 505.0)][..]));
        assert_eq!(
            report.placements("_top"),
            Some(&[("gravecmb".to_string(), 500.0)][..])
        );
    }

    #[test]
    fn second_run_without_overwrite_is_a_no_op() {
        let mut fonts = vec![test_font()];
        let options = PlacementOptions::default();
        apply(&mut fonts, &top_table(0), false, &options).expect("first");
        let reports = apply(&mut fonts, &top_table(0), false, &options).expect("second");

        assert!(reports[0].is_empty());
        assert_eq!(anchors_of(&fonts[0], "a").len(), 1);
    }

    #[test]
    fn overwrite_replaces_existing_anchor() {
        let mut fonts = vec![test_font()];
        let options = PlacementOptions::default();
        apply(&mut fonts, &top_table(0), false, &options).expect("first");
        let reports = apply(&mut fonts, &top_table(20), true, &options).expect("second");

        assert_eq!(anchors_of(&fonts[0], "a"), vec![AnchorPoint::new("top", 150.0, 520.0)]);
        assert_eq!(reports[0].len(), 2);
    }

    #[test]
    fn overwrite_collapses_duplicates() {
        let mut fonts = vec![test_font()];
        {
            let glyph = fonts[0].glyph_mut("a").expect("glyph");
            glyph.append_anchor(AnchorPoint::new("top", 0.0, 0.0)).expect("append");
            glyph.append_anchor(AnchorPoint::new("top", 1.0, 1.0)).expect("append");
        }
        apply(&mut fonts, &top_table(0), true, &PlacementOptions::default()).expect("apply");

        let tops: Vec<AnchorPoint> = anchors_of(&fonts[0], "a")
            .into_iter()
            .filter(|anchor| anchor.name == "top")
            .collect();
        assert_eq!(tops, vec![AnchorPoint::new("top", 150.0, 500.0)]);
    }

    #[test]
    fn each_font_gets_its_own_report() {
        let mut second = test_font();
        second.font_mut().font_info.style_name = Some("Bold".into());
        second.font_mut().font_info.x_height = Some(520.0);
        let mut fonts = vec![test_font(), second];

        let reports =
            apply(&mut fonts, &top_table(0), false, &PlacementOptions::default()).expect("apply");
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[1].font_label, "Test Bold");
        assert_eq!(reports[1].placements("top"), Some(&[("a".to_string(), 520.0)][..]));
    }

    #[test]
    fn empty_table_still_marks_font() {
        let mut fonts = vec![test_font()];
        let reports =
            apply(&mut fonts, &RuleTable::new(), false, &PlacementOptions::default()).expect("apply");
        assert!(reports[0].is_empty());
        assert!(fonts[0].is_changed());
    }
}
