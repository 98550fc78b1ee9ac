//! YAML scenario documents describing one fragment and its highlights
//!
//! ```yaml
//! name: selection over a spelling error
//! fragment: { from: 0, to: 10 }
//! selection: { from: 2, to: 8 }
//! markers:
//!   - { type: spelling, from: 2, to: 8 }
//!   - { type: custom, name: search, from: 0, to: 3 }
//! registry:
//!   - { name: search, priority: 1 }
//! ```
//!
//! Marker offsets are native offsets. When `native` is absent they map
//! one-to-one onto the fragment.

use serde::{Deserialize, Serialize};

use crate::error::HighlightError;
use crate::overlay::{HighlightRange, HighlightSources, LinearMapper, MarkerType, OverlapPolicy};
use crate::paint_case::{PaintCase, PaintContext};
use crate::plan::{FragmentInput, PaintPlan};
use crate::registry::HighlightRegistry;
use crate::style::HighlightStyles;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioMarker {
    #[serde(rename = "type")]
    pub kind: MarkerType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub from: u32,
    pub to: u32,
}

/// Native offset window of the fragment and the canonical offset it maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeWindow {
    pub from: u32,
    pub to: u32,
    /// Canonical offset of `from`; defaults to the fragment start
    #[serde(default)]
    pub content_from: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: Option<String>,
    pub fragment: HighlightRange,
    #[serde(default)]
    pub native: Option<NativeWindow>,
    #[serde(default)]
    pub selection: Option<HighlightRange>,
    #[serde(default)]
    pub markers: Vec<ScenarioMarker>,
    #[serde(default)]
    pub registry: HighlightRegistry,
    #[serde(default)]
    pub styles: HighlightStyles,
    #[serde(default)]
    pub context: PaintContext,
    #[serde(default)]
    pub svg: bool,
}

/// Outcome of running a scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub fragment: HighlightRange,
    pub case: PaintCase,
    pub plan: PaintPlan,
}

impl Scenario {
    pub fn from_yaml(content: &str) -> Result<Self, HighlightError> {
        serde_yaml::from_str(content).map_err(|e| HighlightError::Scenario(e.to_string()))
    }

    /// Highlight sources described by the scenario
    pub fn sources(&self) -> Result<HighlightSources, HighlightError> {
        let mut sources = HighlightSources {
            selection: self.selection,
            ..HighlightSources::default()
        };
        for marker in &self.markers {
            sources.add_marker(
                marker.kind,
                marker.name.as_deref(),
                HighlightRange::new(marker.from, marker.to),
            )?;
        }
        Ok(sources)
    }

    /// Range mapper for the native window, rejecting inverted windows and
    /// windows whose canonical offsets do not fit in an offset
    pub fn mapper(&self) -> Result<LinearMapper, HighlightError> {
        let Some(window) = self.native else {
            return Ok(LinearMapper::identity(self.fragment));
        };
        if window.from > window.to {
            return Err(HighlightError::Scenario(format!(
                "inverted native window [{}, {})",
                window.from, window.to
            )));
        }
        let content_from = window.content_from.unwrap_or(self.fragment.from);
        if content_from.checked_add(window.to - window.from).is_none() {
            return Err(HighlightError::Scenario(format!(
                "native window [{}, {}) overflows at content offset {}",
                window.from, window.to, content_from
            )));
        }
        Ok(LinearMapper::new(
            HighlightRange::new(window.from, window.to),
            content_from,
        ))
    }

    /// Classify the fragment and build its paint plan
    pub fn run(&self, policy: OverlapPolicy) -> Result<ScenarioReport, HighlightError> {
        let sources = self.sources()?;
        let mapper = self.mapper()?;
        let input = FragmentInput {
            fragment: self.fragment,
            sources: &sources,
            mapper: &mapper,
            registry: &self.registry,
            styles: &self.styles,
            context: self.context,
            is_svg_text: self.svg,
        };
        let plan = PaintPlan::build(&input, policy)?;
        Ok(ScenarioReport {
            name: self.name.clone(),
            fragment: self.fragment,
            case: plan.case(),
            plan,
        })
    }
}
