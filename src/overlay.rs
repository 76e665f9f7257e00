//! Overlay facade.
//!
//! `Overlay` ties the pieces together: it owns the line registry, the
//! resolved style, the caller's rectangle source, and the optional hit
//! handler. Callers drive it with the `highlight*` family and feed pointer
//! events through [`Overlay::handle_tap`].
//!
//! # Rendering
//!
//! Methods that promise visibility (`highlight_line`, `highlight_lines`,
//! `cancel_highlight_line`) take the sink and render after mutating.
//! `highlight` mutates without rendering, for callers batching several
//! inserts before one explicit [`Overlay::render`].

use serde::{Deserialize, Serialize};

use crate::length::Length;
use crate::primitives::{Color, Point};
use crate::registry::{Hit, Line, LineId, LineRegistry, RectSource, SelectionSpan};
use crate::render::{self, DrawableSink, ShapeStyle};

/// User-facing overlay configuration.
///
/// `padding` may be in any supported unit; it is normalized to px once, when
/// the overlay is constructed (or reconfigured), using `font_size` as the
/// rem/em base. Offsets and extracted rectangles must already share the px
/// unit space; the overlay performs no unit-consistency check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayOptions {
    pub color: Color,
    pub opacity: f32,
    pub padding: Length,
    pub font_size: f32,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            color: Color::DEFAULT_HIGHLIGHT,
            opacity: 1.0,
            padding: Length::Rem(0.1),
            font_size: 16.0,
        }
    }
}

/// Result of handling a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored, propagate to the host.
    Ignored,

    /// Event was consumed, don't propagate.
    Captured,
}

impl EventResult {
    /// Check if the event was consumed.
    pub fn is_handled(&self) -> bool {
        matches!(self, EventResult::Captured)
    }
}

/// The event-normalization collaborator: any pointer-ish event that can
/// report its position in overlay-local coordinates.
///
/// Implemented for `Point` itself so callers with pre-normalized positions
/// can pass them directly.
pub trait PointerEvent {
    fn position(&self) -> Point;
}

impl PointerEvent for Point {
    fn position(&self) -> Point {
        *self
    }
}

type HitHandler<M> = Box<dyn FnMut(&LineId, &M, &SelectionSpan) -> EventResult>;

/// A set of selection highlights over one drawable surface.
///
/// Single-threaded and synchronous: every operation runs to completion on
/// the calling thread, and `&mut self` gives exclusive ownership of the
/// registry by construction.
pub struct Overlay<R, M> {
    registry: LineRegistry<M>,
    source: R,
    style: ShapeStyle,
    padding: f32,
    hit_handler: Option<HitHandler<M>>,
}

impl<R: RectSource, M> Overlay<R, M> {
    /// Create an overlay with the given options and rectangle source.
    pub fn new(options: OverlayOptions, source: R) -> Self {
        let (style, padding) = resolve(&options);
        Self {
            registry: LineRegistry::new(),
            source,
            style,
            padding,
            hit_handler: None,
        }
    }

    /// Replace the overlay's configuration.
    ///
    /// Affects subsequent derivations and renders only; existing records
    /// keep the padding they were derived with until re-upserted.
    pub fn set_options(&mut self, options: OverlayOptions) {
        let (style, padding) = resolve(&options);
        self.style = style;
        self.padding = padding;
    }

    /// Insert or replace one highlight without rendering.
    pub fn highlight(
        &mut self,
        span: SelectionSpan,
        id: Option<LineId>,
        metadata: M,
        offset: Point,
    ) -> LineId {
        self.registry
            .upsert(span, id, metadata, offset, self.padding, &self.source)
    }

    /// Insert or replace one highlight and render.
    pub fn highlight_line(
        &mut self,
        span: SelectionSpan,
        id: Option<LineId>,
        metadata: M,
        offset: Point,
        sink: &mut impl DrawableSink,
    ) -> LineId {
        let id = self.highlight(span, id, metadata, offset);
        self.render(sink);
        id
    }

    /// Replace every highlight with the given batch and render.
    pub fn highlight_lines(
        &mut self,
        lines: Vec<Line<M>>,
        offset: Point,
        sink: &mut impl DrawableSink,
    ) -> Vec<LineId> {
        let ids = self
            .registry
            .upsert_batch(lines, offset, self.padding, &self.source);
        self.render(sink);
        ids
    }

    /// Remove one highlight and render. Absent IDs are a no-op (the render
    /// still runs).
    pub fn cancel_highlight_line(&mut self, id: &LineId, sink: &mut impl DrawableSink) {
        self.registry.remove(id);
        self.render(sink);
    }

    /// Reconcile the current highlight set onto the sink.
    pub fn render(&self, sink: &mut impl DrawableSink) {
        render::render(&self.registry, self.style, sink);
    }

    /// Register the hit handler invoked by [`Overlay::handle_tap`].
    ///
    /// The handler receives the hit record's ID, metadata, and originating
    /// span, and decides whether the event is consumed.
    pub fn on_hit(&mut self, handler: impl FnMut(&LineId, &M, &SelectionSpan) -> EventResult + 'static) {
        self.hit_handler = Some(Box::new(handler));
    }

    /// Hit test without side effects.
    pub fn hit_test(&self, point: Point) -> Option<Hit<'_, M>> {
        self.registry.hit_test(point)
    }

    /// Route a pointer event through the hit tester.
    ///
    /// A miss returns `Ignored` so the host can propagate the event. A hit
    /// invokes the registered handler and returns its verdict; with no
    /// handler registered the tap still landed on a highlight, so it is
    /// reported `Captured`.
    pub fn handle_tap(&mut self, event: &impl PointerEvent) -> EventResult {
        let point = event.position();
        let Some(hit) = self.registry.hit_test(point) else {
            return EventResult::Ignored;
        };
        match self.hit_handler.as_mut() {
            Some(handler) => handler(hit.id, hit.metadata, hit.span),
            None => EventResult::Captured,
        }
    }

    /// Read access to the underlying registry.
    pub fn registry(&self) -> &LineRegistry<M> {
        &self.registry
    }
}

fn resolve(options: &OverlayOptions) -> (ShapeStyle, f32) {
    let style = ShapeStyle {
        fill: options.color,
        opacity: options.opacity,
        stroke_width: 0.0,
    };
    (style, options.padding.resolve(options.font_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Rect;
    use crate::render::test_sink::RecordingSink;

    fn span(x0: f32, y0: f32, x1: f32, y1: f32) -> SelectionSpan {
        SelectionSpan::new(Point::new(x0, y0), Point::new(x1, y1))
    }

    fn span_rect(anchor: Point, focus: Point) -> Vec<Rect> {
        vec![Rect::new(anchor.x, anchor.y, focus.x, focus.y)]
    }

    fn overlay() -> Overlay<fn(Point, Point) -> Vec<Rect>, &'static str> {
        Overlay::new(
            OverlayOptions {
                padding: Length::Px(0.0),
                ..Default::default()
            },
            span_rect,
        )
    }

    // =========================================================================
    // Options
    // =========================================================================

    #[test]
    fn default_options_match_legacy_defaults() {
        let options = OverlayOptions::default();
        assert_eq!(options.color, Color::DEFAULT_HIGHLIGHT);
        assert_eq!(options.opacity, 1.0);
        assert_eq!(options.padding, Length::Rem(0.1));
    }

    #[test]
    fn padding_is_normalized_at_construction() {
        let overlay: Overlay<_, ()> = Overlay::new(
            OverlayOptions {
                padding: Length::Rem(0.5),
                font_size: 16.0,
                ..Default::default()
            },
            span_rect,
        );
        assert_eq!(overlay.padding, 8.0);
    }

    #[test]
    fn options_deserialize_from_json() {
        let options: OverlayOptions = serde_json::from_str(
            r#"{
                "color": { "r": 1.0, "g": 0.0, "b": 0.0, "a": 1.0 },
                "opacity": 0.5,
                "padding": { "Rem": 0.25 }
            }"#,
        )
        .unwrap();
        assert_eq!(options.opacity, 0.5);
        assert_eq!(options.padding, Length::Rem(0.25));
        assert_eq!(options.font_size, 16.0); // defaulted
    }

    // =========================================================================
    // Highlight lifecycle
    // =========================================================================

    #[test]
    fn highlight_does_not_render() {
        let mut overlay = overlay();
        let mut sink = RecordingSink::default();
        overlay.highlight(span(0.0, 0.0, 10.0, 10.0), None, "m", Point::ORIGIN);
        assert_eq!(sink.clears, 0);
        assert!(sink.shapes.is_empty());

        overlay.render(&mut sink);
        assert_eq!(sink.shapes.len(), 1);
    }

    #[test]
    fn highlight_line_renders() {
        let mut overlay = overlay();
        let mut sink = RecordingSink::default();
        overlay.highlight_line(span(0.0, 0.0, 10.0, 10.0), None, "m", Point::ORIGIN, &mut sink);
        assert_eq!(sink.clears, 1);
        assert_eq!(sink.shapes.len(), 1);
    }

    #[test]
    fn cancel_absent_id_still_renders() {
        let mut overlay = overlay();
        let mut sink = RecordingSink::default();
        overlay.cancel_highlight_line(&"ghost".into(), &mut sink);
        assert_eq!(sink.clears, 1);
    }

    #[test]
    fn set_options_applies_to_subsequent_derivations() {
        let mut overlay = overlay();
        let id = overlay.highlight(span(10.0, 10.0, 50.0, 20.0), None, "m", Point::ORIGIN);
        let before = overlay.registry().get(&id).unwrap().polygons[0].clone();

        overlay.set_options(OverlayOptions {
            padding: Length::Px(4.0),
            ..Default::default()
        });
        // Existing record untouched until re-upserted.
        assert_eq!(overlay.registry().get(&id).unwrap().polygons[0], before);

        let id = overlay.highlight(span(10.0, 10.0, 50.0, 20.0), Some(id), "m", Point::ORIGIN);
        let after = &overlay.registry().get(&id).unwrap().polygons[0];
        assert_eq!(after[0], Point::new(6.0, 6.0));
    }

    // =========================================================================
    // Tap handling
    // =========================================================================

    #[test]
    fn tap_miss_is_ignored() {
        let mut overlay = overlay();
        overlay.highlight(span(10.0, 10.0, 50.0, 20.0), None, "m", Point::ORIGIN);
        let result = overlay.handle_tap(&Point::new(200.0, 200.0));
        assert_eq!(result, EventResult::Ignored);
        assert!(!result.is_handled());
    }

    #[test]
    fn tap_hit_without_handler_is_captured() {
        let mut overlay = overlay();
        overlay.highlight(span(10.0, 10.0, 50.0, 20.0), None, "m", Point::ORIGIN);
        assert_eq!(
            overlay.handle_tap(&Point::new(30.0, 15.0)),
            EventResult::Captured
        );
    }

    #[test]
    fn tap_hit_reports_id_metadata_span_to_handler() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let seen = Rc::new(RefCell::new(None));
        let seen_in_handler = Rc::clone(&seen);

        let mut overlay = overlay();
        overlay.on_hit(move |id, metadata, span| {
            *seen_in_handler.borrow_mut() = Some((id.clone(), *metadata, *span));
            EventResult::Captured
        });
        overlay.highlight(span(10.0, 10.0, 50.0, 20.0), Some("a".into()), "meta", Point::ORIGIN);

        assert_eq!(
            overlay.handle_tap(&Point::new(30.0, 15.0)),
            EventResult::Captured
        );
        let (id, metadata, hit_span) = seen.borrow().clone().unwrap();
        assert_eq!(id, LineId::Name("a".to_string()));
        assert_eq!(metadata, "meta");
        assert_eq!(hit_span, span(10.0, 10.0, 50.0, 20.0));
    }

    #[test]
    fn handler_verdict_is_returned() {
        let mut overlay = overlay();
        overlay.on_hit(|_, _, _| EventResult::Ignored);
        overlay.highlight(span(10.0, 10.0, 50.0, 20.0), None, "m", Point::ORIGIN);
        assert_eq!(
            overlay.handle_tap(&Point::new(30.0, 15.0)),
            EventResult::Ignored
        );
    }
}
