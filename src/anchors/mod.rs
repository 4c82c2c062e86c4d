//! Anchor placement engine
//!
//! This module contains the anchor logic, including:
//! - Base/mark naming and vertical position classification
//! - Horizontal position solving from outline crossings
//! - The ordered rule table, its defaults and imports
//! - Batch drop and cleanup operations with their reports

pub mod apply;
pub mod classifier;
pub mod convention;
pub mod defaults;
pub mod import;
pub mod maintain;
pub mod report;
pub mod rules;
pub mod solver;

// Re-export commonly used items
pub use apply::apply;
pub use classifier::{classify, classify_with, is_lowercase_glyph, YPos};
pub use convention::{final_name, role, strip_mark_prefix, AnchorRole, MARK_PREFIX};
pub use defaults::default_table;
pub use import::{
    from_construction_text, from_recipes, load_settings_file, ConstructionSource, WhitespaceStatements,
};
pub use maintain::{anchor_names, remove_by_name, remove_duplicates};
pub use report::{DropReport, DropSummary, RemovalKind, RemovalReport};
pub use rules::{merge, AnchorRule, MergeMode, RuleTable};
pub use solver::{compute_x, PlacementOptions};
