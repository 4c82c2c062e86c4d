//! Font metrics and naming data
//!
//! Anchor placement reads a font's vertical metrics once per batch and
//! indexes them by [`YPos`]. Missing UFO values fall back to proportions of
//! the units-per-em.

use crate::anchors::YPos;
use norad::Font;

const DEFAULT_UNITS_PER_EM: f64 = 1000.0;

/// Font information
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontInfo {
    pub family_name: String,
    pub style_name: String,
    pub units_per_em: f64,
    pub ascender: Option<f64>,
    pub descender: Option<f64>,
    pub x_height: Option<f64>,
    pub cap_height: Option<f64>,
}

impl FontInfo {
    /// Extract font info from norad Font
    pub fn from_norad_font(font: &Font) -> Self {
        let units_per_em = font
            .font_info
            .units_per_em
            .map(|v| v.to_string().parse().unwrap_or(DEFAULT_UNITS_PER_EM))
            .unwrap_or(DEFAULT_UNITS_PER_EM);

        Self {
            family_name: Self::extract_string_field(&font.font_info, |info| &info.family_name),
            style_name: Self::extract_string_field(&font.font_info, |info| &info.style_name),
            units_per_em,
            ascender: font.font_info.ascender,
            descender: font.font_info.descender,
            x_height: font.font_info.x_height,
            cap_height: font.font_info.cap_height,
        }
    }

    fn extract_string_field<F>(font_info: &norad::FontInfo, getter: F) -> String
    where
        F: Fn(&norad::FontInfo) -> &Option<String>,
    {
        getter(font_info).as_ref().cloned().unwrap_or_default()
    }

    /// Get a display name combining family and style names
    pub fn get_display_name(&self) -> String {
        let parts: Vec<&str> = [&self.family_name, &self.style_name]
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| s.as_str())
            .collect();

        if parts.is_empty() {
            "Untitled Font".to_string()
        } else {
            parts.join(" ")
        }
    }

    pub fn ascender_or_default(&self) -> f64 {
        self.ascender.unwrap_or(self.units_per_em * 0.8)
    }

    pub fn descender_or_default(&self) -> f64 {
        self.descender.unwrap_or(-(self.units_per_em * 0.2))
    }

    pub fn x_height_or_default(&self) -> f64 {
        self.x_height.unwrap_or(self.units_per_em * 0.5)
    }

    pub fn cap_height_or_default(&self) -> f64 {
        self.cap_height.unwrap_or(self.units_per_em * 0.7)
    }

    pub fn metrics_snapshot(&self) -> FontMetricsSnapshot {
        FontMetricsSnapshot::new(
            self.ascender_or_default(),
            self.cap_height_or_default(),
            self.x_height_or_default(),
            self.descender_or_default(),
        )
    }
}

/// `[ascender, cap height, x-height, baseline, descender]`
///
/// The slot order matches the ordinal of [`YPos`]; the baseline slot is
/// always zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetricsSnapshot([f64; 5]);

impl FontMetricsSnapshot {
    pub fn new(ascender: f64, cap_height: f64, x_height: f64, descender: f64) -> Self {
        Self([ascender, cap_height, x_height, 0.0, descender])
    }

    pub fn get(&self, y_pos: YPos) -> f64 {
        self.0[y_pos.index()]
    }

    pub fn as_array(&self) -> [f64; 5] {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_indexes_by_y_pos() {
        let metrics = FontMetricsSnapshot::new(750.0, 700.0, 500.0, -250.0);
        assert_eq!(metrics.get(YPos::Ascender), 750.0);
        assert_eq!(metrics.get(YPos::CapHeight), 700.0);
        assert_eq!(metrics.get(YPos::XHeight), 500.0);
        assert_eq!(metrics.get(YPos::Baseline), 0.0);
        assert_eq!(metrics.get(YPos::Descender), -250.0);
    }

    #[test]
    fn missing_metrics_fall_back_to_upm_proportions() {
        let info = FontInfo {
            units_per_em: 1000.0,
            x_height: Some(480.0),
            ..Default::default()
        };
        let metrics = info.metrics_snapshot();
        assert_eq!(metrics.as_array(), [800.0, 700.0, 480.0, 0.0, -200.0]);
    }

    #[test]
    fn display_name_skips_empty_parts() {
        let info = FontInfo {
            family_name: "Dropper Grotesk".to_string(),
            ..Default::default()
        };
        assert_eq!(info.get_display_name(), "Dropper Grotesk");
        assert_eq!(FontInfo::default().get_display_name(), "Untitled Font");
    }

    #[test]
    fn reads_norad_font_info() {
        let mut font = Font::new();
        font.font_info.family_name = Some("Test".to_string());
        font.font_info.style_name = Some("Bold".to_string());
        font.font_info.cap_height = Some(710.0);
        let info = FontInfo::from_norad_font(&font);
        assert_eq!(info.get_display_name(), "Test Bold");
        assert_eq!(info.units_per_em, 1000.0);
        assert_eq!(info.metrics_snapshot().get(YPos::CapHeight), 710.0);
    }
}
