//! Start/end transition events for every highlight range

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::layers::{paint_order, LayerKind, StackingOrder};
use super::range::{HighlightRange, Offset, RangeMapper};
use super::sources::HighlightSources;
use crate::error::HighlightError;

/// Whether an edge opens or closes a highlight range.
///
/// `End` sorts before `Start` so an outgoing range frees its layer slot
/// before an adjacent range of the same layer starts at the same offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeKind {
    End,
    Start,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightEdge {
    /// Full mapped range of the highlight, not clamped to the fragment
    pub range: HighlightRange,
    pub layer: LayerKind,
    pub kind: EdgeKind,
}

impl HighlightEdge {
    pub fn offset(&self) -> Offset {
        match self.kind {
            EdgeKind::Start => self.range.from,
            EdgeKind::End => self.range.to,
        }
    }
}

/// What to do when two ranges of one layer overlap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OverlapPolicy {
    /// Fail the computation with [`HighlightError::OverlappingRanges`]
    Reject,
    /// Drop every range that overlaps an earlier range of its layer
    #[default]
    DropHighlight,
    /// Skip validation; the partitioner asserts in debug builds and ignores
    /// conflicting edges otherwise
    Unchecked,
}

/// Edge order: offset, then `End` before `Start`, then layer paint order
pub fn edge_order(a: &HighlightEdge, b: &HighlightEdge, registry: &dyn StackingOrder) -> Ordering {
    a.offset()
        .cmp(&b.offset())
        .then_with(|| a.kind.cmp(&b.kind))
        .then_with(|| paint_order(&a.layer, &b.layer, registry))
}

/// Mapped, non-empty ranges of every highlight source in source order,
/// excluding ranges entirely outside `fragment`
fn collect_ranges(
    fragment: HighlightRange,
    sources: &HighlightSources,
    mapper: &dyn RangeMapper,
) -> Vec<(LayerKind, HighlightRange)> {
    let mut ranges = Vec::new();

    if let Some(selection) = sources.selection {
        ranges.push((LayerKind::Selection, selection));
    }
    for marker in &sources.custom {
        if let Some(range) = mapper.map(marker.range) {
            ranges.push((LayerKind::Custom(marker.name.clone()), range));
        }
    }
    let fixed = [
        (LayerKind::Grammar, &sources.grammar),
        (LayerKind::Spelling, &sources.spelling),
        (LayerKind::TargetText, &sources.target),
    ];
    for (layer, markers) in fixed {
        ranges.extend(
            HighlightSources::mapped(markers, mapper).map(|range| (layer.clone(), range)),
        );
    }

    ranges.retain(|(_, range)| !range.is_empty() && range.intersects(&fragment));
    ranges
}

/// Find ranges overlapping an earlier range of the same layer.
///
/// Within a layer, ranges are visited by ascending start, shorter first,
/// then input order. Returns the index of each conflicting range together
/// with the range it collides with.
fn find_overlaps(ranges: &[(LayerKind, HighlightRange)]) -> Vec<(usize, HighlightRange)> {
    let mut by_layer: Vec<(&LayerKind, Vec<usize>)> = Vec::new();
    for (index, (layer, _)) in ranges.iter().enumerate() {
        match by_layer.iter_mut().find(|(l, _)| *l == layer) {
            Some((_, indices)) => indices.push(index),
            None => by_layer.push((layer, vec![index])),
        }
    }

    let mut conflicts = Vec::new();
    for (_, mut indices) in by_layer {
        indices.sort_by_key(|&i| (ranges[i].1.from, ranges[i].1.to, i));
        let mut accepted: Option<HighlightRange> = None;
        for index in indices {
            let range = ranges[index].1;
            match accepted {
                Some(previous) if range.from < previous.to => conflicts.push((index, previous)),
                _ => accepted = Some(range),
            }
        }
    }
    conflicts.sort_by_key(|(index, _)| *index);
    conflicts
}

/// Build the sorted edge list for `fragment`.
///
/// Every selection and marker range that maps to a non-empty range touching
/// the fragment contributes one `Start` and one `End` edge carrying its
/// full mapped range.
pub fn compute_edges(
    fragment: HighlightRange,
    sources: &HighlightSources,
    mapper: &dyn RangeMapper,
    registry: &dyn StackingOrder,
    policy: OverlapPolicy,
) -> Result<Vec<HighlightEdge>, HighlightError> {
    let mut ranges = collect_ranges(fragment, sources, mapper);

    if policy != OverlapPolicy::Unchecked {
        let conflicts = find_overlaps(&ranges);
        if let Some((index, previous)) = conflicts.first() {
            if policy == OverlapPolicy::Reject {
                let (layer, range) = &ranges[*index];
                return Err(HighlightError::OverlappingRanges {
                    layer: layer.clone(),
                    first: *previous,
                    second: *range,
                });
            }
            for (index, previous) in conflicts.iter().rev() {
                let (layer, range) = ranges.remove(*index);
                tracing::warn!(
                    %layer,
                    %range,
                    overlaps = %previous,
                    "dropping highlight range that overlaps its own layer"
                );
            }
        }
    }

    let mut edges = Vec::with_capacity(ranges.len() * 2);
    for (layer, range) in ranges {
        edges.push(HighlightEdge {
            range,
            layer: layer.clone(),
            kind: EdgeKind::Start,
        });
        edges.push(HighlightEdge {
            range,
            layer,
            kind: EdgeKind::End,
        });
    }
    edges.sort_by(|a, b| edge_order(a, b, registry));
    Ok(edges)
}

/// Mapped, non-empty ranges painted by a single layer, in source order.
///
/// Custom layers only see markers carrying their own name. The
/// originating layer has no ranges of its own.
pub fn layer_ranges(
    layer: &LayerKind,
    sources: &HighlightSources,
    mapper: &dyn RangeMapper,
) -> Vec<HighlightRange> {
    match layer {
        LayerKind::Originating => Vec::new(),
        LayerKind::Custom(name) => sources
            .custom
            .iter()
            .filter(|marker| &marker.name == name)
            .filter_map(|marker| mapper.map(marker.range))
            .filter(|range| !range.is_empty())
            .collect(),
        LayerKind::Grammar => HighlightSources::mapped(&sources.grammar, mapper).collect(),
        LayerKind::Spelling => HighlightSources::mapped(&sources.spelling, mapper).collect(),
        LayerKind::TargetText => HighlightSources::mapped(&sources.target, mapper).collect(),
        LayerKind::Selection => sources
            .selection
            .into_iter()
            .filter(|range| !range.is_empty())
            .collect(),
    }
}
