//! Highlight overlay - text fragment highlight compositing
//!
//! This crate decides how a run of text with overlapping highlights
//! (selection, custom highlights, spelling and grammar markers, target
//! text) should be painted, and partitions the fragment into parts that
//! each name the topmost highlight and the decorations to draw.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod error;
pub mod overlay;
pub mod paint_case;
pub mod plan;
pub mod registry;
pub mod scenario;
pub mod style;
pub mod tracing;

// Re-export commonly used types
pub use config::OverlayConfig;
pub use error::HighlightError;
pub use overlay::HighlightOverlay;
pub use paint_case::PaintCase;
pub use plan::PaintPlan;
pub use registry::HighlightRegistry;
pub use scenario::Scenario;
