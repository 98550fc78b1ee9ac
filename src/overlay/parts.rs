//! Sweep of the edge list into non-overlapping painted parts

use serde::{Deserialize, Serialize};

use super::edges::{EdgeKind, HighlightEdge};
use super::layers::LayerKind;
use super::range::{HighlightRange, Offset};

/// A layer that paints its line decorations over `range`.
///
/// The range is the layer's full highlight range clamped to the fragment,
/// not the part it is attached to, so decoration phase stays continuous
/// across part boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightDecoration {
    pub layer: LayerKind,
    pub range: HighlightRange,
}

/// A maximal sub-range with a single topmost layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightPart {
    pub layer: LayerKind,
    pub range: HighlightRange,
    /// One entry per layer active over the part, in paint order
    pub decorations: Vec<HighlightDecoration>,
}

impl HighlightPart {
    fn originating(range: HighlightRange, fragment: HighlightRange) -> Self {
        Self {
            layer: LayerKind::Originating,
            range,
            decorations: vec![HighlightDecoration {
                layer: LayerKind::Originating,
                range: fragment,
            }],
        }
    }
}

/// Build the part covering `range` from the current active table
fn active_part(
    range: HighlightRange,
    fragment: HighlightRange,
    layers: &[LayerKind],
    active: &[Option<HighlightRange>],
) -> HighlightPart {
    let mut topmost = &LayerKind::Originating;
    let mut decorations = Vec::new();
    for (layer, slot) in layers.iter().zip(active) {
        if layer.is_originating() {
            decorations.push(HighlightDecoration {
                layer: LayerKind::Originating,
                range: fragment,
            });
        } else if let Some(active_range) = slot {
            topmost = layer;
            decorations.push(HighlightDecoration {
                layer: layer.clone(),
                range: active_range.clamp_to(&fragment),
            });
        }
    }
    HighlightPart {
        layer: topmost.clone(),
        range,
        decorations,
    }
}

/// Apply one edge to the active table, returning false if it conflicts
fn apply_edge(
    edge: &HighlightEdge,
    layers: &[LayerKind],
    active: &mut [Option<HighlightRange>],
) -> bool {
    // O(layers), layer counts are small
    let Some(index) = layers.iter().position(|layer| layer == &edge.layer) else {
        debug_assert!(false, "edge for layer {} missing from layer list", edge.layer);
        return false;
    };
    let slot = &mut active[index];
    match edge.kind {
        EdgeKind::Start => {
            debug_assert!(
                slot.is_none(),
                "{} started at {} while already active",
                edge.layer,
                edge.range
            );
            if slot.is_some() {
                return false;
            }
            *slot = Some(edge.range);
        }
        EdgeKind::End => {
            debug_assert!(
                *slot == Some(edge.range),
                "{} ended at {} without matching start",
                edge.layer,
                edge.range
            );
            if *slot != Some(edge.range) {
                return false;
            }
            *slot = None;
        }
    }
    true
}

/// Partition `fragment` into parts from sorted `layers` and `edges`.
///
/// Parts tile the fragment in order with no gaps or overlaps. Each part's
/// layer is the highest-priority active layer, or `Originating` when none
/// is active. Empty parts are never emitted.
///
/// An edge that would start an already active layer, or end a layer that
/// is not active with the same range, is a caller bug: it panics in debug
/// builds and is ignored in release builds.
pub fn compute_parts(
    fragment: HighlightRange,
    layers: &[LayerKind],
    edges: &[HighlightEdge],
) -> Vec<HighlightPart> {
    let mut parts = Vec::new();
    if fragment.is_empty() {
        return parts;
    }

    let Some(first) = edges.first() else {
        parts.push(HighlightPart::originating(fragment, fragment));
        return parts;
    };

    let mut active: Vec<Option<HighlightRange>> = vec![None; layers.len()];

    if fragment.from < first.offset() {
        let leading = HighlightRange::new(fragment.from, first.offset().min(fragment.to));
        parts.push(HighlightPart::originating(leading, fragment));
    }

    let mut previous: Option<Offset> = None;
    for edge in edges {
        if let Some(previous) = previous {
            let gap = HighlightRange::new(previous, edge.offset()).clamp_to(&fragment);
            if !gap.is_empty() {
                parts.push(active_part(gap, fragment, layers, &active));
            }
        }
        if !apply_edge(edge, layers, &mut active) {
            tracing::warn!(layer = %edge.layer, range = %edge.range, "ignoring conflicting edge");
        }
        previous = Some(edge.offset());
    }

    if let Some(last) = previous {
        if last < fragment.to {
            let trailing = HighlightRange::new(last.max(fragment.from), fragment.to);
            parts.push(HighlightPart::originating(trailing, fragment));
        }
    }

    tracing::trace!(
        fragment = %fragment,
        layers = layers.len(),
        edges = edges.len(),
        parts = parts.len(),
        "computed highlight parts"
    );
    parts
}

/// Parts whose topmost layer is the originating text
pub fn originating_parts(parts: &[HighlightPart]) -> impl Iterator<Item = &HighlightPart> {
    parts.iter().filter(|part| part.layer.is_originating())
}

/// Offsets at which parts begin and end: the first part's start followed
/// by every part's end
pub fn part_boundaries(parts: &[HighlightPart]) -> Vec<Offset> {
    let Some(first) = parts.first() else {
        return Vec::new();
    };
    std::iter::once(first.range.from)
        .chain(parts.iter().map(|part| part.range.to))
        .collect()
}
