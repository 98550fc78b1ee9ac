//! Highlight layers and their paint order

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::sources::{HighlightName, HighlightSources};

/// A highlight category competing for paint priority.
///
/// Variant order is the fixed category priority, lowest first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayerKind {
    Originating,
    Custom(HighlightName),
    Grammar,
    Spelling,
    TargetText,
    Selection,
}

impl LayerKind {
    fn category_rank(&self) -> u8 {
        match self {
            LayerKind::Originating => 0,
            LayerKind::Custom(_) => 1,
            LayerKind::Grammar => 2,
            LayerKind::Spelling => 3,
            LayerKind::TargetText => 4,
            LayerKind::Selection => 5,
        }
    }

    pub fn is_originating(&self) -> bool {
        matches!(self, LayerKind::Originating)
    }

    /// Highlight pseudo-element that styles this layer
    pub fn pseudo_element(&self) -> Option<&'static str> {
        match self {
            LayerKind::Originating => None,
            LayerKind::Custom(_) => Some("::highlight"),
            LayerKind::Grammar => Some("::grammar-error"),
            LayerKind::Spelling => Some("::spelling-error"),
            LayerKind::TargetText => Some("::target-text"),
            LayerKind::Selection => Some("::selection"),
        }
    }

    /// Argument of the pseudo-element, only set for custom highlights
    pub fn pseudo_argument(&self) -> Option<&HighlightName> {
        match self {
            LayerKind::Custom(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerKind::Originating => f.write_str("originating"),
            LayerKind::Custom(name) => write!(f, "custom({})", name),
            LayerKind::Grammar => f.write_str("grammar"),
            LayerKind::Spelling => f.write_str("spelling"),
            LayerKind::TargetText => f.write_str("target-text"),
            LayerKind::Selection => f.write_str("selection"),
        }
    }
}

/// Relative stacking of two custom highlights
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayStacking {
    Below,
    Above,
    Equivalent,
}

/// Supplies the total order between custom highlight names.
///
/// Must be consistent for every call within one overlay computation.
pub trait StackingOrder {
    fn compare(&self, a: &HighlightName, b: &HighlightName) -> OverlayStacking;
}

impl<F> StackingOrder for F
where
    F: Fn(&HighlightName, &HighlightName) -> OverlayStacking,
{
    fn compare(&self, a: &HighlightName, b: &HighlightName) -> OverlayStacking {
        self(a, b)
    }
}

/// Treats every pair of custom highlights as equivalent, leaving
/// first-seen order in place
#[derive(Debug, Clone, Copy, Default)]
pub struct Unordered;

impl StackingOrder for Unordered {
    fn compare(&self, _a: &HighlightName, _b: &HighlightName) -> OverlayStacking {
        OverlayStacking::Equivalent
    }
}

/// Paint order between two layers: lower paints first, higher wins
pub fn paint_order(a: &LayerKind, b: &LayerKind, registry: &dyn StackingOrder) -> Ordering {
    match (a, b) {
        (LayerKind::Custom(a), LayerKind::Custom(b)) => match registry.compare(a, b) {
            OverlayStacking::Below => Ordering::Less,
            OverlayStacking::Above => Ordering::Greater,
            OverlayStacking::Equivalent => Ordering::Equal,
        },
        _ => a.category_rank().cmp(&b.category_rank()),
    }
}

/// Ordered set of layers present for a fragment, `Originating` first.
///
/// Layer presence follows the source collections, not whether any of their
/// ranges actually intersect the fragment.
pub fn compute_layers(sources: &HighlightSources, registry: &dyn StackingOrder) -> Vec<LayerKind> {
    let mut layers = vec![LayerKind::Originating];
    layers.extend(sources.custom_names().into_iter().map(LayerKind::Custom));
    if !sources.grammar.is_empty() {
        layers.push(LayerKind::Grammar);
    }
    if !sources.spelling.is_empty() {
        layers.push(LayerKind::Spelling);
    }
    if !sources.target.is_empty() {
        layers.push(LayerKind::TargetText);
    }
    if sources.selection.is_some() {
        layers.push(LayerKind::Selection);
    }

    // Stable, so equivalent custom highlights keep first-seen order
    layers.sort_by(|a, b| paint_order(a, b, registry));
    layers
}
