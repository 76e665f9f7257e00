//! Rectangle → polygon transform.
//!
//! Converts one extracted selection rectangle into the closed polygon the
//! renderer fills. Padding grows the rect outward; the offset shifts the
//! result from document coordinates into the overlay's local space.

use crate::primitives::{Point, Rect};

/// A closed shape as an ordered point list.
///
/// Vertex order is part of the contract: top-left, top-right, bottom-right,
/// bottom-left. Downstream renderers rely on this winding.
pub type Polygon = Vec<Point>;

/// Convert a rectangle into its highlight polygon.
///
/// The rect is expanded outward by `padding` on all sides, then every vertex
/// is translated by `-offset`. Zero-width rects (collapsed selections) yield
/// an empty polygon: degenerate, never rendered, never hit.
///
/// Pure function; malformed rects are accepted as given.
pub fn rect_to_polygon(rect: Rect, padding: f32, offset: Point) -> Polygon {
    if rect.is_degenerate() {
        return Vec::new();
    }

    let r = rect.expand(padding);
    vec![
        Point::new(r.left - offset.x, r.top - offset.y),
        Point::new(r.right - offset.x, r.top - offset.y),
        Point::new(r.right - offset.x, r.bottom - offset.y),
        Point::new(r.left - offset.x, r.bottom - offset.y),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_points_in_winding_order() {
        let poly = rect_to_polygon(Rect::new(10.0, 10.0, 50.0, 20.0), 2.0, Point::ORIGIN);
        assert_eq!(
            poly,
            vec![
                Point::new(8.0, 8.0),
                Point::new(52.0, 8.0),
                Point::new(52.0, 22.0),
                Point::new(8.0, 22.0),
            ]
        );
    }

    #[test]
    fn offset_is_subtracted_after_padding() {
        let poly = rect_to_polygon(
            Rect::new(10.0, 10.0, 50.0, 20.0),
            0.0,
            Point::new(10.0, 10.0),
        );
        assert_eq!(poly[0], Point::new(0.0, 0.0));
        assert_eq!(poly[2], Point::new(40.0, 10.0));
    }

    #[test]
    fn zero_width_rect_yields_empty_polygon() {
        let poly = rect_to_polygon(Rect::new(30.0, 10.0, 30.0, 20.0), 2.0, Point::ORIGIN);
        assert!(poly.is_empty());
    }

    #[test]
    fn bounding_box_matches_expanded_rect() {
        let rect = Rect::new(-5.0, 3.0, 40.0, 17.0);
        let padding = 1.5;
        let poly = rect_to_polygon(rect, padding, Point::ORIGIN);
        assert_eq!(poly.len(), 4);

        let min_x = poly.iter().map(|p| p.x).fold(f32::INFINITY, f32::min);
        let max_x = poly.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max);
        let min_y = poly.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
        let max_y = poly.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);
        assert_eq!(min_x, rect.left - padding);
        assert_eq!(max_x, rect.right + padding);
        assert_eq!(min_y, rect.top - padding);
        assert_eq!(max_y, rect.bottom + padding);
    }
}
