//! Engine error types
//!
//! Every failure the anchor engine can report is local and recoverable. The
//! binary wraps these in `anyhow` at its boundary.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The operation was asked to run against an empty font selection.
    ///
    /// This is distinct from an operation that ran and touched nothing.
    #[error("no target font: open at least one UFO before running this operation")]
    NoTarget,

    /// The host font refused an anchor name.
    #[error("'{name}' is not a valid anchor name (glyph '{glyph}')")]
    InvalidAnchorName { name: String, glyph: String },
}
