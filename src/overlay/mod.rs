//! Highlight overlay compositor
//!
//! Splits a text fragment into parts, each painted by its topmost
//! highlight layer and carrying the decorations of every layer active
//! over it. The pipeline runs once per fragment per paint pass:
//!
//! 1. [`compute_layers`] orders the layers present for the fragment
//! 2. [`compute_edges`] turns highlight ranges into sorted start/end edges
//! 3. [`compute_parts`] sweeps the edges into non-overlapping parts

pub mod edges;
pub mod layers;
pub mod parts;
pub mod range;
pub mod sources;

pub use edges::{compute_edges, edge_order, layer_ranges, EdgeKind, HighlightEdge, OverlapPolicy};
pub use layers::{compute_layers, paint_order, LayerKind, OverlayStacking, StackingOrder, Unordered};
pub use parts::{compute_parts, originating_parts, part_boundaries, HighlightDecoration, HighlightPart};
pub use range::{HighlightRange, LinearMapper, Offset, RangeMapper};
pub use sources::{CustomMarker, HighlightName, HighlightSources, MarkerType};

use serde::Serialize;

use crate::error::HighlightError;

/// Result of running the full overlay pipeline over one fragment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightOverlay {
    pub layers: Vec<LayerKind>,
    pub parts: Vec<HighlightPart>,
}

impl HighlightOverlay {
    pub fn compute(
        fragment: HighlightRange,
        sources: &HighlightSources,
        mapper: &dyn RangeMapper,
        registry: &dyn StackingOrder,
        policy: OverlapPolicy,
    ) -> Result<Self, HighlightError> {
        if fragment.from > fragment.to {
            return Err(HighlightError::InvalidFragment {
                from: fragment.from,
                to: fragment.to,
            });
        }
        let layers = compute_layers(sources, registry);
        let edges = compute_edges(fragment, sources, mapper, registry, policy)?;
        let parts = compute_parts(fragment, &layers, &edges);
        Ok(Self { layers, parts })
    }
}
