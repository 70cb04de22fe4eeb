use std::cmp::Ordering;

use geo::Area;

use crate::feature::Feature;
use crate::geometry::{GeoOps, Geometry, MultiPolygon, Point, PolygonOps};

/// Left-to-right, then bottom-to-top comparison of two points.
///
/// Uses `f64::total_cmp`, so the order is total even for NaN.
#[must_use]
pub fn compare_left_to_right(a: &Point, b: &Point) -> Ordering {
    a.x()
        .total_cmp(&b.x())
        .then_with(|| a.y().total_cmp(&b.y()))
}

/// Orders features by centroid: ascending x, then ascending y.
///
/// Features without a finite centroid (empty or non-areal geometry) are
/// dropped. Coinciding centroids fall back to the id (no id, then numeric,
/// then text) and then the area, so input order never leaks into the result.
pub struct OrderLeftToRight<'a, O = GeoOps> {
    features: &'a [Feature],
    ops: O,
}

impl<'a> OrderLeftToRight<'a> {
    /// Creates a new `OrderLeftToRight` operation.
    #[must_use]
    pub fn new(features: &'a [Feature]) -> Self {
        Self {
            features,
            ops: GeoOps,
        }
    }
}

impl<'a, O: PolygonOps> OrderLeftToRight<'a, O> {
    /// Uses a different set of geometric primitives.
    #[must_use]
    pub fn with_ops<P: PolygonOps>(self, ops: P) -> OrderLeftToRight<'a, P> {
        OrderLeftToRight {
            features: self.features,
            ops,
        }
    }

    /// Executes the ordering, pairing each feature with its centroid.
    #[must_use]
    pub fn execute(&self) -> Vec<(&'a Feature, Point)> {
        let mut ordered: Vec<_> = self.with_centroids().collect();
        ordered.sort_by(compare_ranked);
        ordered
    }

    /// Returns the first feature of the ordering without sorting everything.
    #[must_use]
    pub fn leftmost(&self) -> Option<(&'a Feature, Point)> {
        self.with_centroids()
            .min_by(compare_ranked)
    }

    fn with_centroids(&self) -> impl Iterator<Item = (&'a Feature, Point)> + '_ {
        let features = self.features;
        features.iter().filter_map(move |feature| {
            finite_centroid(&self.ops, &feature.geometry).map(|c| (feature, c))
        })
    }
}

fn compare_ranked(a: &(&Feature, Point), b: &(&Feature, Point)) -> Ordering {
    let ((fa, ca), (fb, cb)) = (a, b);
    compare_left_to_right(ca, cb)
        .then_with(|| fa.id.cmp(&fb.id))
        .then_with(|| {
            fa.geometry
                .unsigned_area()
                .total_cmp(&fb.geometry.unsigned_area())
        })
}

/// Orders features left to right; see [`OrderLeftToRight`].
#[must_use]
pub fn order_left_to_right(features: &[Feature]) -> Vec<(&Feature, Point)> {
    OrderLeftToRight::new(features).execute()
}

/// First feature in left-to-right order, or `None` when no feature has a
/// centroid.
#[must_use]
pub fn leftmost_feature(features: &[Feature]) -> Option<(&Feature, Point)> {
    OrderLeftToRight::new(features).leftmost()
}

/// Reorders the polygons of a multi-polygon left to right.
///
/// Polygons without a centroid go last, in their original order.
pub(crate) fn order_parts<O: PolygonOps>(multi: MultiPolygon, ops: &O) -> MultiPolygon {
    let mut keyed: Vec<_> = multi
        .0
        .into_iter()
        .map(|polygon| {
            let centroid = finite_centroid(ops, &Geometry::Polygon(polygon.clone()));
            (centroid, polygon)
        })
        .collect();
    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => compare_left_to_right(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    MultiPolygon::new(keyed.into_iter().map(|(_, polygon)| polygon).collect())
}

fn finite_centroid<O: PolygonOps>(ops: &O, geometry: &Geometry) -> Option<Point> {
    ops.centroid(geometry)
        .filter(|c| c.x().is_finite() && c.y().is_finite())
}
