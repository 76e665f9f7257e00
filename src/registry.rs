//! Line registry: the ID-keyed store of highlight records.
//!
//! The registry owns ID allocation and CRUD for highlight entries, derives
//! each entry's rectangles (via the caller's [`RectSource`]) and polygons
//! (via [`rect_to_polygon`]) at insert time, and answers hit-test queries.
//!
//! Iteration order is insertion order, which makes both rendering and
//! hit-test scanning deterministic. Overwriting an existing ID keeps its
//! original position.

use std::fmt;

use indexmap::IndexMap;

use crate::geometry::{Polygon, rect_to_polygon};
use crate::primitives::{Point, Rect};

/// Key of a highlight entry.
///
/// Auto-allocated keys are `Index` values from a per-registry counter;
/// callers may supply their own `Index` or `Name` keys. Caller-supplied keys
/// are accepted as-is: a duplicate silently overwrites, and a caller `Index`
/// equal to a future auto-allocated value is not prevented. Callers who mix
/// the two should keep their own keys in the `Name` space.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LineId {
    Index(u64),
    Name(String),
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineId::Index(n) => write!(f, "{n}"),
            LineId::Name(s) => write!(f, "{s}"),
        }
    }
}

impl From<u64> for LineId {
    fn from(n: u64) -> Self {
        LineId::Index(n)
    }
}

impl From<&str> for LineId {
    fn from(s: &str) -> Self {
        LineId::Name(s.to_string())
    }
}

impl From<String> for LineId {
    fn from(s: String) -> Self {
        LineId::Name(s)
    }
}

/// A selection span in document coordinates.
///
/// Stored verbatim and handed back to hit handlers; the registry only
/// forwards the anchor and focus to the rectangle source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionSpan {
    pub anchor: Point,
    pub focus: Point,
}

impl SelectionSpan {
    pub const fn new(anchor: Point, focus: Point) -> Self {
        Self { anchor, focus }
    }
}

/// The text-geometry collaborator: maps a selection span to the visual
/// rectangles it covers.
///
/// The registry treats the returned rectangles as authoritative and
/// unvalidated. Implemented for plain closures so callers can pass a
/// `|anchor, focus| ...` directly.
pub trait RectSource {
    fn rects_for_span(&self, anchor: Point, focus: Point) -> Vec<Rect>;
}

impl<F> RectSource for F
where
    F: Fn(Point, Point) -> Vec<Rect>,
{
    fn rects_for_span(&self, anchor: Point, focus: Point) -> Vec<Rect> {
        self(anchor, focus)
    }
}

/// One highlight entry.
///
/// Mutated only by replacement: re-upserting an ID re-runs the whole
/// derivation. `polygons.len() == rects.len()` always; a zero-width rect
/// contributes an empty polygon.
#[derive(Debug, Clone)]
pub struct LineRecord<M> {
    pub span: SelectionSpan,
    pub rects: Vec<Rect>,
    pub polygons: Vec<Polygon>,
    pub metadata: M,
}

/// Input item for [`LineRegistry::upsert_batch`].
#[derive(Debug, Clone)]
pub struct Line<M> {
    pub span: SelectionSpan,
    pub id: Option<LineId>,
    pub metadata: M,
}

/// A successful hit-test result, borrowing from the registry.
#[derive(Debug)]
pub struct Hit<'a, M> {
    pub id: &'a LineId,
    pub metadata: &'a M,
    pub span: &'a SelectionSpan,
}

/// Insertion-ordered store of highlight records.
#[derive(Debug, Clone)]
pub struct LineRegistry<M> {
    lines: IndexMap<LineId, LineRecord<M>>,
    next_id: u64,
}

impl<M> Default for LineRegistry<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> LineRegistry<M> {
    pub fn new() -> Self {
        Self {
            lines: IndexMap::new(),
            next_id: 0,
        }
    }

    /// Allocate the next auto ID.
    ///
    /// Strictly increasing from 0 for the life of this registry; never
    /// reused, and never checked against caller-supplied IDs.
    pub fn allocate_id(&mut self) -> LineId {
        let id = LineId::Index(self.next_id);
        self.next_id += 1;
        id
    }

    /// Insert or replace one highlight entry.
    ///
    /// Allocates an ID when `id` is `None`. Rectangles come from `source`,
    /// polygons from [`rect_to_polygon`] with the given padding and offset.
    /// Returns the entry's ID.
    pub fn upsert(
        &mut self,
        span: SelectionSpan,
        id: Option<LineId>,
        metadata: M,
        offset: Point,
        padding: f32,
        source: &impl RectSource,
    ) -> LineId {
        let id = id.unwrap_or_else(|| self.allocate_id());
        let rects = source.rects_for_span(span.anchor, span.focus);
        let polygons = rects
            .iter()
            .map(|&rect| rect_to_polygon(rect, padding, offset))
            .collect();
        tracing::debug!("upsert line {id}: {} rect(s)", rects.len());
        self.lines.insert(
            id.clone(),
            LineRecord {
                span,
                rects,
                polygons,
                metadata,
            },
        );
        id
    }

    /// Replace the whole registry with a batch.
    ///
    /// Clears every prior record first, then upserts the batch in order.
    /// This is a full-replace operation, not an incremental merge. Returns
    /// the resulting IDs in batch order.
    pub fn upsert_batch(
        &mut self,
        lines: Vec<Line<M>>,
        offset: Point,
        padding: f32,
        source: &impl RectSource,
    ) -> Vec<LineId> {
        tracing::debug!(
            "replacing {} line(s) with batch of {}",
            self.lines.len(),
            lines.len()
        );
        self.lines.clear();
        lines
            .into_iter()
            .map(|line| self.upsert(line.span, line.id, line.metadata, offset, padding, source))
            .collect()
    }

    /// Delete a record. Absent IDs are a no-op.
    pub fn remove(&mut self, id: &LineId) {
        // shift_remove keeps the remaining entries in insertion order.
        if self.lines.shift_remove(id).is_some() {
            tracing::debug!("removed line {id}");
        }
    }

    pub fn get(&self, id: &LineId) -> Option<&LineRecord<M>> {
        self.lines.get(id)
    }

    /// All records, in insertion order. Rendering and hit testing both scan
    /// this same order.
    pub fn iter(&self) -> impl Iterator<Item = (&LineId, &LineRecord<M>)> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Hit test: overlay-local point → earliest-inserted containing record.
    ///
    /// Scans records in insertion order and each record's rects in source
    /// order; the first rect containing `point` (bounds inclusive) wins.
    /// Overlapping highlights therefore report the earliest-inserted one,
    /// not the one drawn on top.
    pub fn hit_test(&self, point: Point) -> Option<Hit<'_, M>> {
        for (id, record) in &self.lines {
            if record.rects.iter().any(|rect| rect.contains(point)) {
                return Some(Hit {
                    id,
                    metadata: &record.metadata,
                    span: &record.span,
                });
            }
        }
        None
    }
}
