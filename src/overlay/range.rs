//! Offsets, half-open ranges and the native-to-canonical range mapping

use std::fmt;

use serde::{Deserialize, Serialize};

/// Offset in a fragment's canonical text-content space
pub type Offset = u32;

/// Half-open `[from, to)` interval of offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct HighlightRange {
    pub from: Offset,
    pub to: Offset,
}

impl HighlightRange {
    pub const fn new(from: Offset, to: Offset) -> Self {
        Self { from, to }
    }

    /// True when the range covers no offsets (including inverted ranges)
    pub fn is_empty(&self) -> bool {
        self.from >= self.to
    }

    pub fn len(&self) -> u32 {
        self.to.saturating_sub(self.from)
    }

    /// Clamp both ends into `bounds`. The result may be empty.
    /// An inverted `bounds` gives an empty range.
    pub fn clamp_to(&self, bounds: &HighlightRange) -> HighlightRange {
        HighlightRange {
            from: self.from.max(bounds.from).min(bounds.to),
            to: self.to.max(bounds.from).min(bounds.to),
        }
    }

    /// True when the two ranges share at least one offset
    pub fn intersects(&self, other: &HighlightRange) -> bool {
        self.from < other.to && other.from < self.to
    }

    pub fn contains(&self, offset: Offset) -> bool {
        offset >= self.from && offset < self.to
    }
}

impl fmt::Display for HighlightRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.from, self.to)
    }
}

impl From<std::ops::Range<Offset>> for HighlightRange {
    fn from(range: std::ops::Range<Offset>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// Converts a highlight's native (e.g. DOM) offsets into canonical
/// content offsets for one fragment.
///
/// Returns `None` when the highlight does not touch the fragment. A mapped
/// range may be empty; callers drop those.
pub trait RangeMapper {
    fn map(&self, native: HighlightRange) -> Option<HighlightRange>;
}

impl<F> RangeMapper for F
where
    F: Fn(HighlightRange) -> Option<HighlightRange>,
{
    fn map(&self, native: HighlightRange) -> Option<HighlightRange> {
        self(native)
    }
}

/// Maps a native offset window one-to-one onto canonical offsets
/// starting at `content_from`, clamping to the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearMapper {
    /// Native offsets covered by the fragment
    pub native: HighlightRange,
    /// Canonical offset of `native.from`
    pub content_from: Offset,
}

impl LinearMapper {
    pub fn new(native: HighlightRange, content_from: Offset) -> Self {
        Self {
            native,
            content_from,
        }
    }

    /// Native and canonical offsets coincide over `fragment`
    pub fn identity(fragment: HighlightRange) -> Self {
        Self::new(fragment, fragment.from)
    }

    fn translate(&self, native: Offset) -> Option<Offset> {
        self.content_from.checked_add(native - self.native.from)
    }
}

impl RangeMapper for LinearMapper {
    /// `None` for an inverted window or when canonical offsets would
    /// overflow
    fn map(&self, native: HighlightRange) -> Option<HighlightRange> {
        if self.native.from > self.native.to {
            return None;
        }
        if native.to < self.native.from || native.from > self.native.to {
            return None;
        }
        let clamped = native.clamp_to(&self.native);
        if clamped.from > clamped.to {
            return None;
        }
        Some(HighlightRange::new(
            self.translate(clamped.from)?,
            self.translate(clamped.to)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_to_fragment() {
        let fragment = HighlightRange::new(5, 10);
        assert_eq!(
            HighlightRange::new(0, 7).clamp_to(&fragment),
            HighlightRange::new(5, 7)
        );
        assert_eq!(
            HighlightRange::new(8, 20).clamp_to(&fragment),
            HighlightRange::new(8, 10)
        );
        assert!(HighlightRange::new(0, 3).clamp_to(&fragment).is_empty());
    }

    #[test]
    fn test_intersects_is_exclusive_at_ends() {
        let a = HighlightRange::new(2, 5);
        assert!(a.intersects(&HighlightRange::new(4, 8)));
        assert!(!a.intersects(&HighlightRange::new(5, 8)));
        assert!(!a.intersects(&HighlightRange::new(0, 2)));
    }

    #[test]
    fn test_linear_mapper_shifts_and_clamps() {
        let mapper = LinearMapper::new(HighlightRange::new(10, 20), 100);
        assert_eq!(
            mapper.map(HighlightRange::new(12, 15)),
            Some(HighlightRange::new(102, 105))
        );
        assert_eq!(
            mapper.map(HighlightRange::new(5, 15)),
            Some(HighlightRange::new(100, 105))
        );
        assert_eq!(
            mapper.map(HighlightRange::new(18, 40)),
            Some(HighlightRange::new(108, 110))
        );
        assert_eq!(mapper.map(HighlightRange::new(0, 5)), None);
        assert_eq!(mapper.map(HighlightRange::new(25, 30)), None);
    }

    #[test]
    fn test_linear_mapper_touching_window_is_empty() {
        let mapper = LinearMapper::identity(HighlightRange::new(10, 20));
        let mapped = mapper.map(HighlightRange::new(5, 10)).unwrap();
        assert!(mapped.is_empty());
    }

    #[test]
    fn test_closure_mapper() {
        let mapper = |r: HighlightRange| Some(HighlightRange::new(r.from * 2, r.to * 2));
        assert_eq!(
            mapper.map(HighlightRange::new(1, 2)),
            Some(HighlightRange::new(2, 4))
        );
    }

    #[test]
    fn test_linear_mapper_inverted_window_maps_nothing() {
        let mapper = LinearMapper::new(HighlightRange::new(10, 5), 0);
        assert_eq!(mapper.map(HighlightRange::new(0, 20)), None);
        assert_eq!(mapper.map(HighlightRange::new(6, 8)), None);
    }

    #[test]
    fn test_linear_mapper_overflow_maps_nothing() {
        let mapper = LinearMapper::new(HighlightRange::new(0, 10), u32::MAX);
        assert_eq!(mapper.map(HighlightRange::new(2, 5)), None);
        // The window start itself still fits
        assert_eq!(
            mapper.map(HighlightRange::new(0, 0)),
            Some(HighlightRange::new(u32::MAX, u32::MAX))
        );
    }

    #[test]
    fn test_clamp_to_inverted_bounds_is_empty() {
        let clamped = HighlightRange::new(0, 20).clamp_to(&HighlightRange::new(10, 5));
        assert!(clamped.is_empty());
    }

    #[test]
    fn test_linear_mapper_is_idempotent() {
        let mapper = LinearMapper::new(HighlightRange::new(100, 140), 7);
        for native in [
            HighlightRange::new(90, 105),
            HighlightRange::new(110, 120),
            HighlightRange::new(130, 200),
            HighlightRange::new(140, 150),
        ] {
            assert_eq!(mapper.map(native), mapper.map(native), "{}", native);
        }
    }
}
