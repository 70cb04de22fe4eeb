use tracing::{debug, warn};

use crate::feature::Feature;
use crate::geometry::{GeoOps, MultiPolygon, PolygonOps};

/// Folds a collection of features into a single multi-polygon.
///
/// Non-polygonal features are skipped. When a pairwise union degenerates,
/// that operand is left out and the fold continues with the accumulator
/// unchanged.
pub struct UnionAll<'a, O = GeoOps> {
    features: &'a [Feature],
    ops: O,
}

impl<'a> UnionAll<'a> {
    /// Creates a new `UnionAll` operation.
    #[must_use]
    pub fn new(features: &'a [Feature]) -> Self {
        Self {
            features,
            ops: GeoOps,
        }
    }
}

impl<'a, O: PolygonOps> UnionAll<'a, O> {
    /// Uses a different set of geometric primitives.
    #[must_use]
    pub fn with_ops<P: PolygonOps>(self, ops: P) -> UnionAll<'a, P> {
        UnionAll {
            features: self.features,
            ops,
        }
    }

    /// Executes the fold. Returns `None` when no feature is polygonal.
    #[must_use]
    pub fn execute(&self) -> Option<MultiPolygon> {
        let mut parts = self.features.iter().filter_map(Feature::multi_polygon);
        let Some(first) = parts.next() else {
            debug!(features = self.features.len(), "nothing polygonal to union");
            return None;
        };

        let merged = parts.enumerate().fold(first, |acc, (step, next)| {
            match self.ops.union(&acc, &next) {
                Some(merged) => merged,
                None => {
                    warn!(step = step + 1, "degenerate union, operand left unmerged");
                    acc
                }
            }
        });
        Some(merged)
    }
}

/// Unions every feature; see [`UnionAll`].
#[must_use]
pub fn union_all(features: &[Feature]) -> Option<MultiPolygon> {
    UnionAll::new(features).execute()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::feature::{make_feature, Properties};
    use crate::geometry::{Geometry, Point, Polygon};
    use approx::assert_relative_eq;
    use geo::{Area, BoundingRect, LineString, Rect};

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon {
        Rect::new((x0, y0), (x1, y1)).to_polygon()
    }

    fn feature(polygon: Polygon) -> Feature {
        make_feature(&Geometry::Polygon(polygon), Properties::new(), None)
    }

    /// Reports a degenerate union whenever the incoming operand starts left
    /// of `min_x`.
    struct RejectLeftOf {
        min_x: f64,
    }

    impl PolygonOps for RejectLeftOf {
        fn intersection(&self, a: &MultiPolygon, b: &MultiPolygon) -> Option<MultiPolygon> {
            GeoOps.intersection(a, b)
        }

        fn difference(&self, a: &MultiPolygon, b: &MultiPolygon) -> Option<MultiPolygon> {
            GeoOps.difference(a, b)
        }

        fn union(&self, a: &MultiPolygon, b: &MultiPolygon) -> Option<MultiPolygon> {
            let rect = b.bounding_rect()?;
            if rect.min().x < self.min_x {
                return None;
            }
            GeoOps.union(a, b)
        }
    }

    #[test]
    fn empty_collection_is_none() {
        assert!(union_all(&[]).is_none());
    }

    #[test]
    fn non_polygonal_features_are_skipped() {
        let point = Feature {
            id: None,
            geometry: Geometry::Point(Point::new(0.0, 0.0)),
            properties: Properties::new(),
        };
        assert!(union_all(&[point.clone()]).is_none());

        let merged = union_all(&[point, feature(square(0.0, 0.0, 2.0, 2.0))]).unwrap();
        assert_relative_eq!(merged.unsigned_area(), 4.0, epsilon = 1e-9);
    }

    #[test]
    fn single_feature_is_returned_as_is() {
        let merged = union_all(&[feature(square(0.0, 0.0, 1.0, 1.0))]).unwrap();
        assert_eq!(merged, MultiPolygon::new(vec![square(0.0, 0.0, 1.0, 1.0)]));
    }

    #[test]
    fn adjacent_squares_merge_into_one_polygon() {
        let features = vec![
            feature(square(5.0, 5.0, 10.0, 10.0)),
            feature(square(10.0, 5.0, 15.0, 10.0)),
            feature(square(15.0, 5.0, 20.0, 10.0)),
        ];
        let merged = union_all(&features).unwrap();
        assert_eq!(merged.0.len(), 1);
        assert_relative_eq!(merged.unsigned_area(), 75.0, epsilon = 1e-9);
    }

    #[test]
    fn disjoint_squares_stay_separate() {
        let features = vec![
            feature(square(0.0, 0.0, 1.0, 1.0)),
            feature(square(5.0, 5.0, 6.0, 6.0)),
        ];
        let merged = union_all(&features).unwrap();
        assert_eq!(merged.0.len(), 2);
        assert_relative_eq!(merged.unsigned_area(), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn degenerate_union_keeps_accumulator() {
        let features = vec![
            feature(square(5.0, 5.0, 10.0, 10.0)),
            feature(square(0.0, 5.0, 5.0, 10.0)),
            feature(square(10.0, 5.0, 15.0, 10.0)),
        ];
        let merged = UnionAll::new(&features)
            .with_ops(RejectLeftOf { min_x: 5.0 })
            .execute()
            .unwrap();
        assert_relative_eq!(merged.unsigned_area(), 50.0, epsilon = 1e-9);
        let rect = merged.bounding_rect().unwrap();
        assert_relative_eq!(rect.min().x, 5.0, epsilon = 1e-9);
        assert_relative_eq!(rect.max().x, 15.0, epsilon = 1e-9);
    }

    #[test]
    fn non_finite_feature_does_not_abort_fold() {
        let broken = Polygon::new(
            LineString::from(vec![(0.0, 0.0), (f64::NAN, 1.0), (1.0, 1.0)]),
            vec![],
        );
        let features = vec![
            feature(square(0.0, 0.0, 2.0, 2.0)),
            feature(broken),
            feature(square(2.0, 0.0, 4.0, 2.0)),
        ];
        let merged = union_all(&features).unwrap();
        assert_relative_eq!(merged.unsigned_area(), 8.0, epsilon = 1e-9);
    }
}
