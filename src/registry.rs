//! Registry of named custom highlights
//!
//! Custom highlights stack by priority, and highlights with equal priority
//! stack by registration order (later registrations paint on top). The
//! registry is a snapshot handed to the overlay pipeline; it holds no
//! global state. Names missing from the registry stack below all
//! registered names.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::overlay::{HighlightName, OverlayStacking, StackingOrder};

/// A registered custom highlight
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredHighlight {
    pub name: HighlightName,
    #[serde(default)]
    pub priority: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighlightRegistry {
    entries: Vec<RegisteredHighlight>,
}

impl HighlightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a highlight, or update the priority of an existing one.
    ///
    /// Updating keeps the original registration position.
    pub fn register(&mut self, name: impl Into<HighlightName>, priority: i32) {
        let name = name.into();
        match self.entries.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => entry.priority = priority,
            None => self.entries.push(RegisteredHighlight { name, priority }),
        }
    }

    /// Builder form of [`register`](Self::register)
    pub fn with(mut self, name: impl Into<HighlightName>, priority: i32) -> Self {
        self.register(name, priority);
        self
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.name.as_str() != name);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, name: &HighlightName) -> Option<(usize, i32)> {
        self.entries
            .iter()
            .enumerate()
            .find(|(_, entry)| &entry.name == name)
            .map(|(index, entry)| (index, entry.priority))
    }
}

impl StackingOrder for HighlightRegistry {
    fn compare(&self, a: &HighlightName, b: &HighlightName) -> OverlayStacking {
        // Unregistered names stack below every registered one
        let key = |name: &HighlightName| {
            self.position(name)
                .map(|(index, priority)| (priority, index))
        };
        match key(a).cmp(&key(b)) {
            Ordering::Less => OverlayStacking::Below,
            Ordering::Greater => OverlayStacking::Above,
            Ordering::Equal => OverlayStacking::Equivalent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> HighlightName {
        HighlightName::new(s)
    }

    #[test]
    fn test_priority_wins() {
        let registry = HighlightRegistry::new().with("high", 5).with("low", 1);
        assert_eq!(
            registry.compare(&name("high"), &name("low")),
            OverlayStacking::Above
        );
        assert_eq!(
            registry.compare(&name("low"), &name("high")),
            OverlayStacking::Below
        );
    }

    #[test]
    fn test_equal_priority_later_registration_on_top() {
        let registry = HighlightRegistry::new().with("first", 0).with("second", 0);
        assert_eq!(
            registry.compare(&name("second"), &name("first")),
            OverlayStacking::Above
        );
        assert_eq!(
            registry.compare(&name("first"), &name("first")),
            OverlayStacking::Equivalent
        );
    }

    #[test]
    fn test_unknown_names_stack_below_registered() {
        let registry = HighlightRegistry::new().with("known", -3);
        assert_eq!(
            registry.compare(&name("known"), &name("unknown")),
            OverlayStacking::Above
        );
        assert_eq!(
            registry.compare(&name("other"), &name("unknown")),
            OverlayStacking::Equivalent
        );
    }

    #[test]
    fn test_reregister_keeps_position() {
        let mut registry = HighlightRegistry::new().with("a", 0).with("b", 0);
        registry.register("a", 0);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.compare(&name("a"), &name("b")), OverlayStacking::Below);
        assert!(registry.remove("a"));
        assert!(!registry.remove("a"));
    }
}
