//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use highlight_overlay::overlay::{
    HighlightOverlay, HighlightPart, HighlightRange, HighlightSources, LayerKind, LinearMapper,
    OverlapPolicy, StackingOrder, Unordered,
};

pub fn range(from: u32, to: u32) -> HighlightRange {
    HighlightRange::new(from, to)
}

/// Run the overlay with identity mapping and no custom ordering
pub fn run_overlay(fragment: HighlightRange, sources: &HighlightSources) -> HighlightOverlay {
    run_overlay_with(fragment, sources, &Unordered)
}

pub fn run_overlay_with(
    fragment: HighlightRange,
    sources: &HighlightSources,
    registry: &dyn StackingOrder,
) -> HighlightOverlay {
    HighlightOverlay::compute(
        fragment,
        sources,
        &LinearMapper::identity(fragment),
        registry,
        OverlapPolicy::Reject,
    )
    .unwrap()
}

/// (topmost layer, range) of each part
pub fn tops(parts: &[HighlightPart]) -> Vec<(LayerKind, HighlightRange)> {
    parts.iter().map(|p| (p.layer.clone(), p.range)).collect()
}

/// Assert parts are non-empty and tile `fragment` in order
pub fn assert_tiles(fragment: HighlightRange, parts: &[HighlightPart]) {
    if fragment.is_empty() {
        assert!(parts.is_empty(), "empty fragment produced {:?}", parts);
        return;
    }
    assert!(!parts.is_empty(), "no parts for {}", fragment);
    assert_eq!(parts[0].range.from, fragment.from, "first part start");
    assert_eq!(parts[parts.len() - 1].range.to, fragment.to, "last part end");
    for part in parts {
        assert!(!part.range.is_empty(), "empty part {}", part.range);
    }
    for pair in parts.windows(2) {
        assert_eq!(pair[0].range.to, pair[1].range.from, "gap or overlap between parts");
    }
}
