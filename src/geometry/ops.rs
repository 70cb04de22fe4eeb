use geo::{Area, BooleanOps, Centroid};

use super::{has_finite_coords, Geometry, MultiPolygon, Point};

/// Pairwise geometric primitives the editing operations are built on.
///
/// Every primitive answers `None` instead of failing: an empty overlap, a
/// fully consumed difference and a union that does not resolve to a proper
/// multi-polygon are all ordinary outcomes in interactive editing.
pub trait PolygonOps {
    /// Area shared by `a` and `b`, or `None` when they do not overlap.
    fn intersection(&self, a: &MultiPolygon, b: &MultiPolygon) -> Option<MultiPolygon>;

    /// Area of `a` outside `b`, or `None` when nothing of `a` remains.
    fn difference(&self, a: &MultiPolygon, b: &MultiPolygon) -> Option<MultiPolygon>;

    /// Combined area of `a` and `b`, or `None` when the union is degenerate.
    fn union(&self, a: &MultiPolygon, b: &MultiPolygon) -> Option<MultiPolygon>;

    /// Representative point used for spatial ordering.
    fn centroid(&self, geometry: &Geometry) -> Option<Point> {
        Centroid::centroid(geometry)
    }
}

impl<T: PolygonOps + ?Sized> PolygonOps for &T {
    fn intersection(&self, a: &MultiPolygon, b: &MultiPolygon) -> Option<MultiPolygon> {
        (**self).intersection(a, b)
    }

    fn difference(&self, a: &MultiPolygon, b: &MultiPolygon) -> Option<MultiPolygon> {
        (**self).difference(a, b)
    }

    fn union(&self, a: &MultiPolygon, b: &MultiPolygon) -> Option<MultiPolygon> {
        (**self).union(a, b)
    }

    fn centroid(&self, geometry: &Geometry) -> Option<Point> {
        (**self).centroid(geometry)
    }
}

/// [`PolygonOps`] backed by the `geo` crate's boolean operations.
///
/// Operands with non-finite coordinates are rejected up front so they never
/// reach the clipper.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoOps;

impl PolygonOps for GeoOps {
    fn intersection(&self, a: &MultiPolygon, b: &MultiPolygon) -> Option<MultiPolygon> {
        if !has_finite_coords(a) || !has_finite_coords(b) {
            return None;
        }
        non_empty(BooleanOps::intersection(a, b))
    }

    fn difference(&self, a: &MultiPolygon, b: &MultiPolygon) -> Option<MultiPolygon> {
        if !has_finite_coords(a) || !has_finite_coords(b) {
            return None;
        }
        non_empty(BooleanOps::difference(a, b))
    }

    fn union(&self, a: &MultiPolygon, b: &MultiPolygon) -> Option<MultiPolygon> {
        if !has_finite_coords(a) || !has_finite_coords(b) {
            return None;
        }
        let merged = BooleanOps::union(a, b);
        if !has_finite_coords(&merged) {
            return None;
        }
        // Two operands with area cannot union to nothing.
        if merged.0.is_empty() && (a.unsigned_area() > 0.0 || b.unsigned_area() > 0.0) {
            return None;
        }
        Some(merged)
    }
}

fn non_empty(multi: MultiPolygon) -> Option<MultiPolygon> {
    if multi.0.is_empty() {
        None
    } else {
        Some(multi)
    }
}
