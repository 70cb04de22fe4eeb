mod ops;

pub use ops::{GeoOps, PolygonOps};

use geo::CoordsIter;

/// Planar coordinate type.
pub type Coord = geo::Coord<f64>;

/// 2D point type.
pub type Point = geo::Point<f64>;

/// Polygon with one exterior ring and zero or more holes.
pub type Polygon = geo::Polygon<f64>;

/// Ordered collection of polygons. Zero polygons is a valid, empty geometry.
pub type MultiPolygon = geo::MultiPolygon<f64>;

/// Tagged union over every geometry kind a boundary feature may carry.
pub type Geometry = geo::Geometry<f64>;

/// Converts a geometry into the canonical multi-polygon form.
///
/// A `MultiPolygon` is returned unchanged and a `Polygon` is wrapped as a
/// one-element `MultiPolygon`. Every other kind (points, lines, rects,
/// collections) yields `None`.
#[must_use]
pub fn normalize(geometry: &Geometry) -> Option<MultiPolygon> {
    match geometry {
        Geometry::MultiPolygon(multi) => Some(multi.clone()),
        Geometry::Polygon(polygon) => Some(MultiPolygon::new(vec![polygon.clone()])),
        _ => None,
    }
}

/// Returns `true` if [`normalize`] accepts the geometry.
#[must_use]
pub fn is_polygonal(geometry: &Geometry) -> bool {
    matches!(geometry, Geometry::Polygon(_) | Geometry::MultiPolygon(_))
}

/// Multi-polygon with no constituent polygons.
#[must_use]
pub fn empty_multi_polygon() -> MultiPolygon {
    MultiPolygon::new(Vec::new())
}

/// Returns `true` if every coordinate of the multi-polygon is finite.
#[must_use]
pub fn has_finite_coords(multi: &MultiPolygon) -> bool {
    multi
        .coords_iter()
        .all(|c| c.x.is_finite() && c.y.is_finite())
}
