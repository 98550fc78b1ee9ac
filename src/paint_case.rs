//! Paint-path classification
//!
//! Decides whether a fragment needs the full highlight overlay or whether a
//! cheaper single-pass path paints the same result. The decision is a pure
//! function of which highlight sources are present and a handful of style
//! comparisons.

use serde::{Deserialize, Serialize};

use crate::overlay::HighlightSources;
use crate::style::{ColorProperty, EmphasisMark, HighlightStyle, HighlightStyles, TextDecorationLine, TextStyle};

/// Strategy the painter should use for a fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaintCase {
    /// Plain text, nothing highlighted
    NoHighlights,
    /// Only the selected text is painted (e.g. a drag image)
    SelectionOnly,
    /// Selection without any decorations in play
    FastSelection,
    /// Spelling/grammar markers whose styles only add their decoration
    FastSpellingGrammar,
    /// Everything else: run the full overlay
    Overlay,
}

/// Paint phase of the current pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaintPhase {
    #[default]
    Foreground,
    Background,
    SelectionDragImage,
    TextClip,
}

/// Per-pass painting context
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaintContext {
    #[serde(default)]
    pub phase: PaintPhase,
    #[serde(default)]
    pub printing: bool,
}

impl PaintContext {
    /// Highlight backgrounds are not painted when printing, clipping to
    /// text, or painting a drag image
    pub fn skip_backgrounds(&self) -> bool {
        self.printing
            || matches!(
                self.phase,
                PaintPhase::TextClip | PaintPhase::SelectionDragImage
            )
    }

    pub fn selected_text_only(&self) -> bool {
        self.phase == PaintPhase::SelectionDragImage
    }
}

/// The two marker categories with a fast decoration path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpellingGrammar {
    Spelling,
    Grammar,
}

impl SpellingGrammar {
    /// The synthetic decoration line the marker itself draws
    pub fn decoration_line(self) -> TextDecorationLine {
        match self {
            SpellingGrammar::Spelling => TextDecorationLine::SPELLING_ERROR,
            SpellingGrammar::Grammar => TextDecorationLine::GRAMMAR_ERROR,
        }
    }
}

/// True when a spelling or grammar pseudo style does more than draw its
/// own decoration line, so the fast path would paint the wrong result.
///
/// A missing pseudo style is trivial.
pub fn has_non_trivial_spelling_grammar_style(
    originating: &TextStyle,
    pseudo: Option<&HighlightStyle>,
    marker: SpellingGrammar,
    is_svg_text: bool,
) -> bool {
    let Some(pseudo) = pseudo else {
        return false;
    };

    let pseudo_color = pseudo.resolve_color(originating, ColorProperty::Color);
    if pseudo_color != originating.color {
        return true;
    }
    if pseudo.resolve_color(originating, ColorProperty::TextFillColor) != originating.fill_color {
        return true;
    }
    if pseudo.resolve_color(originating, ColorProperty::TextStrokeColor)
        != originating.stroke_color
    {
        return true;
    }
    if pseudo.resolve_stroke_width(originating) != originating.stroke_width {
        return true;
    }
    if !pseudo
        .resolve_color(originating, ColorProperty::BackgroundColor)
        .is_fully_transparent()
    {
        return true;
    }
    if !pseudo.text_shadow.is_empty() {
        return true;
    }

    // Decoration color may vary; any other line does not
    if pseudo.decoration_lines != marker.decoration_line() {
        return true;
    }

    // Originating decorations would be recolored by the pseudo
    if originating
        .applied_decorations
        .iter()
        .any(|decoration| decoration.color != pseudo_color)
    {
        return true;
    }

    // Emphasis color only matters when marks are drawn
    if originating.emphasis_mark != EmphasisMark::None
        && pseudo.resolve_color(originating, ColorProperty::TextEmphasisColor)
            != originating.emphasis_color
    {
        return true;
    }

    if is_svg_text {
        // currentColor is assumed to differ, even if it happens to match
        let fill = pseudo.resolve_fill_paint(originating);
        if fill.has_current_color() || fill != originating.fill_paint {
            return true;
        }
        let stroke = pseudo.resolve_stroke_paint(originating);
        if stroke.has_current_color() || stroke != originating.stroke_paint {
            return true;
        }
        if pseudo.resolve_svg_stroke_width(originating) != originating.svg_stroke_width {
            return true;
        }
    }

    false
}

/// Classify a fragment.
///
/// Precedence: an explicit selected-text-only pass wins, then any
/// target-text or custom highlight forces the overlay, then the
/// selection/spelling/grammar combinations are examined.
pub fn compute_paint_case(
    sources: &HighlightSources,
    styles: &HighlightStyles,
    context: &PaintContext,
    is_svg_text: bool,
) -> PaintCase {
    let has_selection = sources.selection.is_some();
    let has_spelling = !sources.spelling.is_empty();
    let has_grammar = !sources.grammar.is_empty();

    if has_selection && context.selected_text_only() {
        return PaintCase::SelectionOnly;
    }

    // May overshoot when every such marker lies outside the fragment
    if !sources.target.is_empty() || !sources.custom.is_empty() {
        return PaintCase::Overlay;
    }

    if has_selection && !has_spelling && !has_grammar {
        let selection_decorated = styles
            .selection
            .as_ref()
            .is_some_and(HighlightStyle::has_applied_decorations);
        return if !styles.originating.has_applied_decorations() && !selection_decorated {
            PaintCase::FastSelection
        } else {
            PaintCase::Overlay
        };
    }

    if has_spelling || has_grammar {
        if has_selection {
            return PaintCase::Overlay;
        }
        let spelling_ok = !has_spelling
            || !has_non_trivial_spelling_grammar_style(
                &styles.originating,
                styles.spelling.as_ref(),
                SpellingGrammar::Spelling,
                is_svg_text,
            );
        let grammar_ok = !has_grammar
            || !has_non_trivial_spelling_grammar_style(
                &styles.originating,
                styles.grammar.as_ref(),
                SpellingGrammar::Grammar,
                is_svg_text,
            );
        return if spelling_ok && grammar_ok {
            PaintCase::FastSpellingGrammar
        } else {
            PaintCase::Overlay
        };
    }

    debug_assert!(sources.is_empty());
    PaintCase::NoHighlights
}
