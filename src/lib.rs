//! Anchor Dropper
pub mod anchors;
pub mod core;
pub mod font_source;
pub mod geometry;
pub mod logging;
