//! Resolved style values compared by the paint-path classifier
//!
//! These are snapshots of already-cascaded styles. The classifier only
//! compares them for equality; it never resolves the cascade itself.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// Create a new color from RGB values (alpha defaults to 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a new color from RGBA values
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to ARGB u32
    pub fn to_argb_u32(&self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Return a new color with the specified alpha value
    pub const fn with_alpha(&self, a: u8) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    pub fn is_fully_transparent(&self) -> bool {
        self.a == 0
    }

    /// Parse from "#RRGGBB" or "#RRGGBBAA" hex string
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.trim_start_matches('#');
        if !s.is_ascii() {
            return Err(format!("Invalid color format: {}", s));
        }
        let channel = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).map_err(|e| e.to_string());
        match s.len() {
            6 => Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Color::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => Err(format!("Invalid color format: {}", s)),
        }
    }

    /// Format as "#RRGGBB", or "#RRGGBBAA" when not opaque
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == "transparent" {
            return Ok(Color::TRANSPARENT);
        }
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

bitflags! {
    /// Set of text decoration lines in effect
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct TextDecorationLine: u8 {
        const UNDERLINE      = 0b0000_0001;
        const OVERLINE       = 0b0000_0010;
        const LINE_THROUGH   = 0b0000_0100;
        const SPELLING_ERROR = 0b0000_1000;
        const GRAMMAR_ERROR  = 0b0001_0000;
    }
}

/// A decoration propagated to the text from an ancestor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedTextDecoration {
    pub lines: TextDecorationLine,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextShadow {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub blur: f32,
    pub color: Color,
}

/// SVG `fill` / `stroke` paint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SvgPaint {
    #[default]
    None,
    CurrentColor,
    Color(Color),
}

impl SvgPaint {
    pub fn has_current_color(&self) -> bool {
        matches!(self, SvgPaint::CurrentColor)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmphasisMark {
    #[default]
    None,
    Dot,
    Circle,
    DoubleCircle,
    Triangle,
    Sesame,
}

/// Color-valued properties a highlight pseudo can override
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorProperty {
    Color,
    TextFillColor,
    TextStrokeColor,
    TextEmphasisColor,
    BackgroundColor,
}

/// Resolved style of the originating (unhighlighted) text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    pub color: Color,
    pub fill_color: Color,
    pub stroke_color: Color,
    pub stroke_width: f32,
    pub emphasis_mark: EmphasisMark,
    pub emphasis_color: Color,
    pub text_shadow: Vec<TextShadow>,
    pub applied_decorations: Vec<AppliedTextDecoration>,
    /// SVG text only
    pub fill_paint: SvgPaint,
    /// SVG text only
    pub stroke_paint: SvgPaint,
    /// SVG text only
    pub svg_stroke_width: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            fill_color: Color::BLACK,
            stroke_color: Color::BLACK,
            stroke_width: 0.0,
            emphasis_mark: EmphasisMark::None,
            emphasis_color: Color::BLACK,
            text_shadow: Vec::new(),
            applied_decorations: Vec::new(),
            fill_paint: SvgPaint::Color(Color::BLACK),
            stroke_paint: SvgPaint::None,
            svg_stroke_width: 1.0,
        }
    }
}

impl TextStyle {
    pub fn has_applied_decorations(&self) -> bool {
        !self.applied_decorations.is_empty()
    }

    pub fn color_of(&self, property: ColorProperty) -> Color {
        match property {
            ColorProperty::Color => self.color,
            ColorProperty::TextFillColor => self.fill_color,
            ColorProperty::TextStrokeColor => self.stroke_color,
            ColorProperty::TextEmphasisColor => self.emphasis_color,
            ColorProperty::BackgroundColor => Color::TRANSPARENT,
        }
    }
}

/// Resolved style of a highlight pseudo-element.
///
/// Unset color properties fall back to the originating text, except the
/// background which falls back to transparent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightStyle {
    pub color: Option<Color>,
    pub fill_color: Option<Color>,
    pub stroke_color: Option<Color>,
    pub stroke_width: Option<f32>,
    pub emphasis_color: Option<Color>,
    pub background_color: Option<Color>,
    pub text_shadow: Vec<TextShadow>,
    pub decoration_lines: TextDecorationLine,
    pub fill_paint: Option<SvgPaint>,
    pub stroke_paint: Option<SvgPaint>,
    pub svg_stroke_width: Option<f32>,
}

impl HighlightStyle {
    /// UA default `::spelling-error` style: only the spelling decoration
    pub fn spelling_error() -> Self {
        Self {
            decoration_lines: TextDecorationLine::SPELLING_ERROR,
            ..Self::default()
        }
    }

    /// UA default `::grammar-error` style: only the grammar decoration
    pub fn grammar_error() -> Self {
        Self {
            decoration_lines: TextDecorationLine::GRAMMAR_ERROR,
            ..Self::default()
        }
    }

    pub fn has_applied_decorations(&self) -> bool {
        !self.decoration_lines.is_empty()
    }

    pub fn resolve_color(&self, originating: &TextStyle, property: ColorProperty) -> Color {
        let own = match property {
            ColorProperty::Color => self.color,
            ColorProperty::TextFillColor => self.fill_color,
            ColorProperty::TextStrokeColor => self.stroke_color,
            ColorProperty::TextEmphasisColor => self.emphasis_color,
            ColorProperty::BackgroundColor => self.background_color,
        };
        own.unwrap_or_else(|| originating.color_of(property))
    }

    pub fn resolve_stroke_width(&self, originating: &TextStyle) -> f32 {
        self.stroke_width.unwrap_or(originating.stroke_width)
    }

    pub fn resolve_fill_paint(&self, originating: &TextStyle) -> SvgPaint {
        self.fill_paint.unwrap_or(originating.fill_paint)
    }

    pub fn resolve_stroke_paint(&self, originating: &TextStyle) -> SvgPaint {
        self.stroke_paint.unwrap_or(originating.stroke_paint)
    }

    pub fn resolve_svg_stroke_width(&self, originating: &TextStyle) -> f32 {
        self.svg_stroke_width.unwrap_or(originating.svg_stroke_width)
    }
}

/// The originating style plus every highlight pseudo style the classifier
/// consults. A missing pseudo style means the pseudo has no rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightStyles {
    pub originating: TextStyle,
    pub selection: Option<HighlightStyle>,
    pub spelling: Option<HighlightStyle>,
    pub grammar: Option<HighlightStyle>,
}
