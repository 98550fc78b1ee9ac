//! Snapshot of the highlight sources that apply to one text fragment

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::range::{HighlightRange, RangeMapper};
use crate::error::HighlightError;

/// Name of a custom highlight, cheap to clone
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct HighlightName(Arc<str>);

impl HighlightName {
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for HighlightName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for HighlightName {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl From<HighlightName> for String {
    fn from(name: HighlightName) -> Self {
        name.0.to_string()
    }
}

impl fmt::Display for HighlightName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Marker categories that can highlight text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum MarkerType {
    Spelling,
    Grammar,
    TargetText,
    Custom,
}

impl MarkerType {
    pub fn as_str(self) -> &'static str {
        match self {
            MarkerType::Spelling => "spelling",
            MarkerType::Grammar => "grammar",
            MarkerType::TargetText => "target-text",
            MarkerType::Custom => "custom",
        }
    }
}

impl FromStr for MarkerType {
    type Err = HighlightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spelling" | "spelling-error" => Ok(MarkerType::Spelling),
            "grammar" | "grammar-error" => Ok(MarkerType::Grammar),
            "target-text" | "target" | "text-fragment" => Ok(MarkerType::TargetText),
            "custom" | "highlight" => Ok(MarkerType::Custom),
            other => Err(HighlightError::UnknownMarkerType(other.to_string())),
        }
    }
}

impl TryFrom<String> for MarkerType {
    type Error = HighlightError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MarkerType> for &'static str {
    fn from(kind: MarkerType) -> Self {
        kind.as_str()
    }
}

impl fmt::Display for MarkerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A custom highlight marker: a native range tagged with its highlight name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomMarker {
    pub name: HighlightName,
    pub range: HighlightRange,
}

/// Every highlight source for one fragment.
///
/// Marker ranges are in native offsets and go through a [`RangeMapper`]
/// before use. The selection is already in canonical offsets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightSources {
    pub selection: Option<HighlightRange>,
    pub custom: Vec<CustomMarker>,
    pub grammar: Vec<HighlightRange>,
    pub spelling: Vec<HighlightRange>,
    pub target: Vec<HighlightRange>,
}

impl HighlightSources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selection(mut self, range: HighlightRange) -> Self {
        self.selection = Some(range);
        self
    }

    pub fn with_spelling(mut self, range: HighlightRange) -> Self {
        self.spelling.push(range);
        self
    }

    pub fn with_grammar(mut self, range: HighlightRange) -> Self {
        self.grammar.push(range);
        self
    }

    pub fn with_target(mut self, range: HighlightRange) -> Self {
        self.target.push(range);
        self
    }

    pub fn with_custom(mut self, name: impl Into<HighlightName>, range: HighlightRange) -> Self {
        self.custom.push(CustomMarker {
            name: name.into(),
            range,
        });
        self
    }

    /// Add a marker by type. Custom markers require a name.
    pub fn add_marker(
        &mut self,
        kind: MarkerType,
        name: Option<&str>,
        range: HighlightRange,
    ) -> Result<(), HighlightError> {
        match kind {
            MarkerType::Spelling => self.spelling.push(range),
            MarkerType::Grammar => self.grammar.push(range),
            MarkerType::TargetText => self.target.push(range),
            MarkerType::Custom => {
                let name = name.ok_or_else(|| {
                    HighlightError::Scenario(format!("custom marker {} has no name", range))
                })?;
                self.custom.push(CustomMarker {
                    name: HighlightName::new(name),
                    range,
                });
            }
        }
        Ok(())
    }

    /// True when there is no selection and no marker of any kind
    pub fn is_empty(&self) -> bool {
        self.selection.is_none()
            && self.custom.is_empty()
            && self.grammar.is_empty()
            && self.spelling.is_empty()
            && self.target.is_empty()
    }

    /// Distinct custom highlight names in first-seen order
    pub fn custom_names(&self) -> Vec<HighlightName> {
        let mut names: Vec<HighlightName> = Vec::new();
        for marker in &self.custom {
            if !names.contains(&marker.name) {
                names.push(marker.name.clone());
            }
        }
        names
    }

    /// Marker ranges of a fixed category, mapped and with empty ranges dropped
    pub fn mapped<'a>(
        ranges: &'a [HighlightRange],
        mapper: &'a dyn RangeMapper,
    ) -> impl Iterator<Item = HighlightRange> + 'a {
        ranges
            .iter()
            .filter_map(move |native| mapper.map(*native))
            .filter(|range| !range.is_empty())
    }
}
