//! Renderer adapter: registry → drawable sink reconciliation.
//!
//! The overlay never owns a rendering surface. It reconciles the registry's
//! current polygon set against an abstract [`DrawableSink`]: clear the stale
//! shapes, then emit one filled shape per non-empty polygon. Rendering is
//! explicit; nothing re-renders on registry mutation by itself.

use crate::primitives::{Color, Point};
use crate::registry::LineRegistry;

/// Fill style for emitted shapes.
///
/// Highlights are flat fills; `stroke_width` is always 0 for shapes emitted
/// by [`render`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeStyle {
    pub fill: Color,
    pub opacity: f32,
    pub stroke_width: f32,
}

/// An append/clear-capable drawing surface.
///
/// Implementations wrap whatever actually draws (an SVG layer, a canvas, a
/// GPU primitive batch). The overlay only needs full clearing and shape
/// appending.
pub trait DrawableSink {
    /// Remove every shape previously emitted to this sink.
    fn clear(&mut self);

    /// Append one filled polygon.
    fn add_shape(&mut self, polygon: &[Point], style: ShapeStyle);
}

/// Reconcile the registry's polygons onto the sink.
///
/// Clears the sink, then emits one shape per non-empty polygon in registry
/// iteration order. Never mutates the registry.
pub fn render<M>(registry: &LineRegistry<M>, style: ShapeStyle, sink: &mut impl DrawableSink) {
    sink.clear();
    let mut emitted = 0usize;
    for (_, record) in registry.iter() {
        for polygon in &record.polygons {
            if !polygon.is_empty() {
                sink.add_shape(polygon, style);
                emitted += 1;
            }
        }
    }
    tracing::trace!("rendered {emitted} shape(s) for {} line(s)", registry.len());
}
