//! Painter instructions for each paint case
//!
//! The overlay case hands the painter the full list of parts. The fast
//! cases reduce to a few ranges the painter can draw in a single pass.

use serde::Serialize;

use crate::error::HighlightError;
use crate::overlay::{
    HighlightOverlay, HighlightPart, HighlightRange, HighlightSources, LayerKind, OverlapPolicy,
    RangeMapper, StackingOrder,
};
use crate::paint_case::{compute_paint_case, PaintCase, PaintContext};
use crate::style::HighlightStyles;

/// Everything known about one fragment at paint time
pub struct FragmentInput<'a> {
    pub fragment: HighlightRange,
    pub sources: &'a HighlightSources,
    pub mapper: &'a dyn RangeMapper,
    pub registry: &'a dyn StackingOrder,
    pub styles: &'a HighlightStyles,
    pub context: PaintContext,
    pub is_svg_text: bool,
}

/// A spelling or grammar decoration painted on the fast path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerDecoration {
    pub layer: LayerKind,
    pub range: HighlightRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "case", rename_all = "kebab-case")]
pub enum PaintPlan {
    /// Paint the fragment's text as-is
    PlainText { range: HighlightRange },
    /// Paint only the selected text
    SelectedTextOnly { selection: HighlightRange },
    /// Paint text proper over `unselected`, then the selection in one pass
    FastSelection {
        selection: HighlightRange,
        unselected: Vec<HighlightRange>,
    },
    /// Paint text, then each decoration in order (spelling on top of grammar)
    FastSpellingGrammar { decorations: Vec<MarkerDecoration> },
    /// Paint each part with its topmost layer and decorations
    Overlay {
        layers: Vec<LayerKind>,
        parts: Vec<HighlightPart>,
    },
}

impl PaintPlan {
    /// Classify the fragment and build the matching plan
    pub fn build(input: &FragmentInput<'_>, policy: OverlapPolicy) -> Result<Self, HighlightError> {
        let fragment = input.fragment;
        if fragment.from > fragment.to {
            return Err(HighlightError::InvalidFragment {
                from: fragment.from,
                to: fragment.to,
            });
        }

        let case = compute_paint_case(
            input.sources,
            input.styles,
            &input.context,
            input.is_svg_text,
        );
        tracing::debug!(?case, %fragment, "classified fragment");

        let plan = match case {
            PaintCase::NoHighlights => PaintPlan::PlainText { range: fragment },
            PaintCase::SelectionOnly => PaintPlan::SelectedTextOnly {
                selection: clamped_selection(input),
            },
            PaintCase::FastSelection => {
                let selection = clamped_selection(input);
                let unselected = [
                    HighlightRange::new(fragment.from, selection.from),
                    HighlightRange::new(selection.to, fragment.to),
                ]
                .into_iter()
                .filter(|range| !range.is_empty())
                .collect();
                PaintPlan::FastSelection {
                    selection,
                    unselected,
                }
            }
            PaintCase::FastSpellingGrammar => PaintPlan::FastSpellingGrammar {
                decorations: spelling_grammar_decorations(input),
            },
            PaintCase::Overlay => {
                let overlay = HighlightOverlay::compute(
                    fragment,
                    input.sources,
                    input.mapper,
                    input.registry,
                    policy,
                )?;
                PaintPlan::Overlay {
                    layers: overlay.layers,
                    parts: overlay.parts,
                }
            }
        };
        Ok(plan)
    }

    pub fn case(&self) -> PaintCase {
        match self {
            PaintPlan::PlainText { .. } => PaintCase::NoHighlights,
            PaintPlan::SelectedTextOnly { .. } => PaintCase::SelectionOnly,
            PaintPlan::FastSelection { .. } => PaintCase::FastSelection,
            PaintPlan::FastSpellingGrammar { .. } => PaintCase::FastSpellingGrammar,
            PaintPlan::Overlay { .. } => PaintCase::Overlay,
        }
    }
}

/// The selection clamped to the fragment; empty at the fragment start when
/// there is no selection
fn clamped_selection(input: &FragmentInput<'_>) -> HighlightRange {
    let fragment = input.fragment;
    match input.sources.selection {
        Some(selection) => selection.clamp_to(&fragment),
        None => HighlightRange::new(fragment.from, fragment.from),
    }
}

/// Grammar decorations first, then spelling, so spelling paints on top.
/// Nothing is decorated when printing.
fn spelling_grammar_decorations(input: &FragmentInput<'_>) -> Vec<MarkerDecoration> {
    if input.context.printing {
        return Vec::new();
    }
    let grammar = HighlightSources::mapped(&input.sources.grammar, input.mapper)
        .map(|range| (LayerKind::Grammar, range));
    let spelling = HighlightSources::mapped(&input.sources.spelling, input.mapper)
        .map(|range| (LayerKind::Spelling, range));
    grammar
        .chain(spelling)
        .map(|(layer, range)| MarkerDecoration { layer, range })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::{LinearMapper, Unordered};
    use crate::paint_case::PaintPhase;

    fn build(sources: &HighlightSources, context: PaintContext) -> PaintPlan {
        let fragment = HighlightRange::new(0, 10);
        let mapper = LinearMapper::identity(fragment);
        let styles = HighlightStyles::default();
        let input = FragmentInput {
            fragment,
            sources,
            mapper: &mapper,
            registry: &Unordered,
            styles: &styles,
            context,
            is_svg_text: false,
        };
        PaintPlan::build(&input, OverlapPolicy::Reject).unwrap()
    }

    #[test]
    fn test_plain_text() {
        let plan = build(&HighlightSources::new(), PaintContext::default());
        assert_eq!(
            plan,
            PaintPlan::PlainText {
                range: HighlightRange::new(0, 10)
            }
        );
        assert_eq!(plan.case(), PaintCase::NoHighlights);
    }

    #[test]
    fn test_fast_selection_splits_unselected() {
        let sources = HighlightSources::new().with_selection(HighlightRange::new(3, 20));
        let plan = build(&sources, PaintContext::default());
        assert_eq!(
            plan,
            PaintPlan::FastSelection {
                selection: HighlightRange::new(3, 10),
                unselected: vec![HighlightRange::new(0, 3)],
            }
        );
    }

    #[test]
    fn test_selected_text_only() {
        let sources = HighlightSources::new().with_selection(HighlightRange::new(2, 4));
        let context = PaintContext {
            phase: PaintPhase::SelectionDragImage,
            printing: false,
        };
        assert_eq!(
            build(&sources, context),
            PaintPlan::SelectedTextOnly {
                selection: HighlightRange::new(2, 4)
            }
        );
    }

    #[test]
    fn test_fast_spelling_grammar_order() {
        let sources = HighlightSources::new()
            .with_spelling(HighlightRange::new(0, 2))
            .with_grammar(HighlightRange::new(5, 9))
            .with_spelling(HighlightRange::new(6, 6));
        let plan = build(&sources, PaintContext::default());
        assert_eq!(
            plan,
            PaintPlan::FastSpellingGrammar {
                decorations: vec![
                    MarkerDecoration {
                        layer: LayerKind::Grammar,
                        range: HighlightRange::new(5, 9),
                    },
                    MarkerDecoration {
                        layer: LayerKind::Spelling,
                        range: HighlightRange::new(0, 2),
                    },
                ]
            }
        );
    }

    #[test]
    fn test_printing_suppresses_spelling_grammar() {
        let sources = HighlightSources::new().with_spelling(HighlightRange::new(0, 2));
        let context = PaintContext {
            phase: PaintPhase::Foreground,
            printing: true,
        };
        assert_eq!(
            build(&sources, context),
            PaintPlan::FastSpellingGrammar {
                decorations: vec![]
            }
        );
    }

    #[test]
    fn test_overlay_plan() {
        let sources = HighlightSources::new()
            .with_selection(HighlightRange::new(2, 8))
            .with_spelling(HighlightRange::new(2, 8));
        let plan = build(&sources, PaintContext::default());
        let PaintPlan::Overlay { layers, parts } = plan else {
            panic!("expected overlay plan");
        };
        assert_eq!(
            layers,
            vec![LayerKind::Originating, LayerKind::Spelling, LayerKind::Selection]
        );
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[1].layer, LayerKind::Selection);
    }

    #[test]
    fn test_inverted_fragment_rejected() {
        let fragment = HighlightRange::new(5, 2);
        let mapper = LinearMapper::identity(HighlightRange::new(0, 10));
        let sources = HighlightSources::new();
        let styles = HighlightStyles::default();
        let input = FragmentInput {
            fragment,
            sources: &sources,
            mapper: &mapper,
            registry: &Unordered,
            styles: &styles,
            context: PaintContext::default(),
            is_svg_text: false,
        };
        assert_eq!(
            PaintPlan::build(&input, OverlapPolicy::Reject),
            Err(HighlightError::InvalidFragment { from: 5, to: 2 })
        );
    }
}
