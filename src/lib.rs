//! Velum: Selection Highlight Overlay Engine
//!
//! Velum tracks user-made text selections inside a document, converts each
//! selection into highlightable screen regions, and maintains them as
//! addressable, re-renderable overlay shapes with hit testing.
//!
//! # Architecture
//!
//! The core is three small pieces:
//! - the geometry transform (`rect_to_polygon`), turning one extracted
//!   rectangle plus padding and offset into a closed polygon;
//! - the `LineRegistry`, the insertion-ordered ID-keyed store of highlight
//!   records that owns ID allocation and hit testing;
//! - the renderer adapter (`render`), reconciling the registry's polygons
//!   onto an abstract `DrawableSink`.
//!
//! Everything that touches a real document or surface stays outside the
//! crate, behind traits: `RectSource` extracts rectangles for a selection
//! span, `DrawableSink` accepts shapes, and `PointerEvent` normalizes input
//! events to points.
//!
//! # Usage
//!
//! ```
//! use velum::{Overlay, OverlayOptions, Point, Rect, SelectionSpan, DrawableSink, ShapeStyle};
//!
//! struct Shapes(usize);
//! impl DrawableSink for Shapes {
//!     fn clear(&mut self) { self.0 = 0; }
//!     fn add_shape(&mut self, _polygon: &[Point], _style: ShapeStyle) { self.0 += 1; }
//! }
//!
//! // One rectangle per selection span, straight from anchor to focus.
//! let extract = |anchor: Point, focus: Point| {
//!     vec![Rect::new(anchor.x, anchor.y, focus.x, focus.y)]
//! };
//!
//! let mut overlay = Overlay::new(OverlayOptions::default(), extract);
//! let mut sink = Shapes(0);
//! let span = SelectionSpan::new(Point::new(10.0, 10.0), Point::new(50.0, 20.0));
//! overlay.highlight_line(span, None, (), Point::ORIGIN, &mut sink);
//! assert_eq!(sink.0, 1);
//! ```

// Core primitives
pub mod primitives;
pub mod length;
pub mod error;

// Selection → geometry translation
pub mod geometry;

// Line registry + hit testing
pub mod registry;

// Renderer adapter
pub mod render;

// Facade
pub mod overlay;

// Re-export core types
pub use error::OverlayError;
pub use geometry::{Polygon, rect_to_polygon};
pub use length::Length;
pub use overlay::{EventResult, Overlay, OverlayOptions, PointerEvent};
pub use primitives::{Color, Point, Rect};
pub use registry::{Hit, Line, LineId, LineRecord, LineRegistry, RectSource, SelectionSpan};
pub use render::{DrawableSink, ShapeStyle, render};
