//! Anchor rule table
//!
//! An ordered mapping from anchor name to per-glyph placement rules. Order is
//! significant: it drives apply order, report order, and keeps base glyphs
//! ahead of their accents after a construction import. The JSON form is the
//! settings file format:
//!
//! ```json
//! { "top": [ { "drop_anchor": true, "glyph": "a", "y_pos": 2, "y_adjust": 0 } ] }
//! ```

use super::classifier::YPos;
use anyhow::{Context, Result};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// One placement rule for one glyph under one anchor name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RuleRecord", into = "RuleRecord")]
pub struct AnchorRule {
    pub drop: bool,
    pub glyph: String,
    pub y_pos: YPos,
    pub y_adjust: i32,
}

impl AnchorRule {
    pub fn new(glyph: impl Into<String>, y_pos: YPos, y_adjust: i32) -> Self {
        Self {
            drop: true,
            glyph: glyph.into(),
            y_pos,
            y_adjust,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.drop = false;
        self
    }
}

/// On-disk shape of a rule
#[derive(Serialize, Deserialize)]
struct RuleRecord {
    drop_anchor: bool,
    glyph: String,
    y_pos: usize,
    y_adjust: i32,
}

impl TryFrom<RuleRecord> for AnchorRule {
    type Error = String;

    fn try_from(record: RuleRecord) -> Result<Self, Self::Error> {
        let y_pos = YPos::from_index(record.y_pos)
            .ok_or_else(|| format!("y_pos must be between 0 and 4, got {}", record.y_pos))?;
        Ok(Self {
            drop: record.drop_anchor,
            glyph: record.glyph,
            y_pos,
            y_adjust: record.y_adjust,
        })
    }
}

impl From<AnchorRule> for RuleRecord {
    fn from(rule: AnchorRule) -> Self {
        Self {
            drop_anchor: rule.drop,
            glyph: rule.glyph,
            y_pos: rule.y_pos.index(),
            y_adjust: rule.y_adjust,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    /// Replace the existing table with the imported one
    Overwrite,
    /// Append imported rules that are not already present
    Additive,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleTable {
    entries: Vec<(String, Vec<AnchorRule>)>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// No anchor names at all
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of anchor names
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn rule_count(&self) -> usize {
        self.entries.iter().map(|(_, rules)| rules.len()).sum()
    }

    pub fn anchor_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[AnchorRule])> {
        self.entries
            .iter()
            .map(|(name, rules)| (name.as_str(), rules.as_slice()))
    }

    pub fn rules(&self, anchor_name: &str) -> Option<&[AnchorRule]> {
        self.position(anchor_name)
            .map(|index| self.entries[index].1.as_slice())
    }

    pub fn rules_mut(&mut self, anchor_name: &str) -> Option<&mut Vec<AnchorRule>> {
        self.position(anchor_name)
            .map(move |index| &mut self.entries[index].1)
    }

    /// Rules for `anchor_name`, adding an empty entry at the end if needed
    pub fn entry(&mut self, anchor_name: &str) -> &mut Vec<AnchorRule> {
        let index = match self.position(anchor_name) {
            Some(index) => index,
            None => {
                self.entries.push((anchor_name.to_string(), Vec::new()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[index].1
    }

    /// Add an anchor name with no rules. Returns false if it already exists.
    pub fn insert_anchor(&mut self, anchor_name: &str) -> bool {
        if self.position(anchor_name).is_some() {
            return false;
        }
        self.entries.push((anchor_name.to_string(), Vec::new()));
        true
    }

    pub fn remove_anchor(&mut self, anchor_name: &str) -> Option<Vec<AnchorRule>> {
        self.position(anchor_name)
            .map(|index| self.entries.remove(index).1)
    }

    pub fn push_rule(&mut self, anchor_name: &str, rule: AnchorRule) {
        self.entry(anchor_name).push(rule);
    }

    fn position(&self, anchor_name: &str) -> Option<usize> {
        self.entries.iter().position(|(name, _)| name == anchor_name)
    }

    /// Combine with an imported table
    pub fn merged_with(&self, imported: &RuleTable, mode: MergeMode) -> RuleTable {
        merge(self, imported, mode)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a settings file (`.anchorDropperSettings` or `.json`)
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read rule table {}", path.display()))?;
        let table = Self::from_json_str(&contents)
            .with_context(|| format!("failed to parse rule table {}", path.display()))?;
        debug!("Loaded {} anchor names from {:?}", table.len(), path);
        Ok(table)
    }

    /// Read a settings file, or `fallback` when it is missing or corrupt
    pub fn load_or(path: impl AsRef<Path>, fallback: impl FnOnce() -> RuleTable) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No rule table at {:?}; using defaults", path);
            return fallback();
        }
        match Self::load(path) {
            Ok(table) => table,
            Err(e) => {
                warn!("{:#}; using defaults", e);
                fallback()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_json_string()?)
            .with_context(|| format!("failed to write rule table {}", path.display()))?;
        debug!("Saved {} anchor names to {:?}", self.len(), path);
        Ok(())
    }
}

/// Combine an existing table with an imported one.
///
/// Additive mode skips rules that are identical in every field; rules that
/// differ in any field (e.g. only `y_adjust`) are appended.
pub fn merge(existing: &RuleTable, imported: &RuleTable, mode: MergeMode) -> RuleTable {
    match mode {
        MergeMode::Overwrite => imported.clone(),
        MergeMode::Additive => {
            let mut result = existing.clone();
            for (anchor_name, rules) in imported.iter() {
                let target = result.entry(anchor_name);
                for rule in rules {
                    if !target.contains(rule) {
                        target.push(rule.clone());
                    }
                }
            }
            result
        }
    }
}

impl Serialize for RuleTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (anchor_name, rules) in &self.entries {
            map.serialize_entry(anchor_name, rules)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RuleTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = RuleTable;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of anchor names to rule lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<RuleTable, A::Error> {
                let mut table = RuleTable::new();
                while let Some((anchor_name, rules)) =
                    access.next_entry::<String, Vec<AnchorRule>>()?
                {
                    // a repeated key replaces the earlier list in place
                    *table.entry(&anchor_name) = rules;
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: Vec<(&str, Vec<AnchorRule>)>) -> RuleTable {
        let mut table = RuleTable::new();
        for (name, rules) in entries {
            table.insert_anchor(name);
            for rule in rules {
                table.push_rule(name, rule);
            }
        }
        table
    }

    #[test]
    fn json_keeps_document_order() {
        let json = r#"{
            "top": [{"drop_anchor": true, "glyph": "a", "y_pos": 2, "y_adjust": 5}],
            "bottom": [],
            "right": [{"drop_anchor": false, "glyph": "d", "y_pos": 0, "y_adjust": -3}]
        }"#;
        let table = RuleTable::from_json_str(json).expect("valid json");
        let names: Vec<&str> = table.anchor_names().collect();
        assert_eq!(names, vec!["top", "bottom", "right"]);
        assert_eq!(
            table.rules("top").expect("top"),
            &[AnchorRule::new("a", YPos::XHeight, 5)]
        );
        assert_eq!(
            table.rules("right").expect("right"),
            &[AnchorRule::new("d", YPos::Ascender, -3).disabled()]
        );
    }

    #[test]
    fn json_output_uses_settings_field_names() {
        let table = table(vec![("top", vec![AnchorRule::new("a", YPos::XHeight, 0)])]);
        let json = table.to_json_string().expect("serialize");
        assert!(json.contains("\"drop_anchor\": true"));
        assert!(json.contains("\"y_pos\": 2"));
        let back = RuleTable::from_json_str(&json).expect("parse");
        assert_eq!(back, table);
    }

    #[test]
    fn out_of_range_y_pos_is_rejected() {
        let json = r#"{"top": [{"drop_anchor": true, "glyph": "a", "y_pos": 7, "y_adjust": 0}]}"#;
        assert!(RuleTable::from_json_str(json).is_err());
    }

    #[test]
    fn glyphs_may_repeat_within_an_anchor() {
        let mut table = RuleTable::new();
        table.push_rule("top", AnchorRule::new("a", YPos::XHeight, 0));
        table.push_rule("top", AnchorRule::new("a", YPos::XHeight, 10));
        assert_eq!(table.rule_count(), 2);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn editing_anchor_names() {
        let mut table = RuleTable::new();
        assert!(table.insert_anchor("top"));
        assert!(!table.insert_anchor("top"));
        assert!(table.insert_anchor("bottom"));
        table
            .rules_mut("bottom")
            .expect("bottom")
            .push(AnchorRule::new("c", YPos::Baseline, 0));
        assert_eq!(table.remove_anchor("top"), Some(Vec::new()));
        assert_eq!(table.anchor_names().collect::<Vec<_>>(), vec!["bottom"]);
        assert!(table.rules("top").is_none());
    }

    #[test]
    fn overwrite_merge_discards_existing() {
        let existing = table(vec![("top", vec![AnchorRule::new("a", YPos::XHeight, 0)])]);
        let imported = table(vec![("bottom", vec![AnchorRule::new("c", YPos::Baseline, 0)])]);
        assert_eq!(merge(&existing, &imported, MergeMode::Overwrite), imported);
    }

    #[test]
    fn additive_merge_skips_identical_rules_only() {
        let existing = table(vec![("top", vec![AnchorRule::new("a", YPos::XHeight, 0)])]);
        let imported = table(vec![
            (
                "top",
                vec![
                    AnchorRule::new("a", YPos::XHeight, 0),
                    AnchorRule::new("a", YPos::XHeight, 10),
                ],
            ),
            ("bottom", vec![AnchorRule::new("c", YPos::Baseline, 0)]),
        ]);

        let merged = existing.merged_with(&imported, MergeMode::Additive);
        assert_eq!(
            merged.rules("top").expect("top"),
            &[
                AnchorRule::new("a", YPos::XHeight, 0),
                AnchorRule::new("a", YPos::XHeight, 10),
            ]
        );
        assert_eq!(merged.anchor_names().collect::<Vec<_>>(), vec!["top", "bottom"]);

        // merging the same import again changes nothing
        assert_eq!(merged.merged_with(&imported, MergeMode::Additive), merged);
    }

    #[test]
    fn missing_file_falls_back() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("missing.json");
        let fallback = table(vec![("top", vec![])]);
        assert_eq!(RuleTable::load_or(&path, || fallback.clone()), fallback);
    }

    #[test]
    fn corrupt_file_falls_back() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("rules.json");
        fs::write(&path, "{ not json").expect("write");
        let loaded = RuleTable::load_or(&path, RuleTable::new);
        assert!(loaded.is_empty());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("rules.json");
        let original = table(vec![
            ("top", vec![AnchorRule::new("a", YPos::XHeight, 5)]),
            ("bottom", vec![AnchorRule::new("c", YPos::Baseline, 0).disabled()]),
        ]);
        original.save(&path).expect("save");
        assert_eq!(RuleTable::load(&path).expect("load"), original);
    }
}
