//! Error types for highlight overlay computation

use thiserror::Error;

use crate::overlay::{HighlightRange, LayerKind};

/// Errors surfaced by the overlay pipeline and its inputs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HighlightError {
    /// Two ranges of the same layer overlap, so the layer would be
    /// activated twice at once.
    #[error("overlapping {layer} ranges {first} and {second}")]
    OverlappingRanges {
        layer: LayerKind,
        first: HighlightRange,
        second: HighlightRange,
    },

    /// A marker type string that does not name a known highlight category
    #[error("unknown marker type: {0}")]
    UnknownMarkerType(String),

    /// A fragment whose start is not before its end
    #[error("invalid fragment [{from}, {to})")]
    InvalidFragment { from: u32, to: u32 },

    /// A scenario document that could not be read or interpreted
    #[error("scenario: {0}")]
    Scenario(String),

    /// Configuration could not be written
    #[error("config: {0}")]
    Config(String),
}
