//! Boundary editing kernel for land-area polygons.
//!
//! Lets an interactive editor draw, split and merge site/zone boundaries:
//! geometry normalization, a feature factory, a left-to-right ordering,
//! union-reduce and the cut engine that carves an overlay out of existing
//! features.

pub mod error;
pub mod feature;
pub mod geometry;
pub mod operations;

pub use error::{BoundaryError, FormatError, Result};
pub use feature::{make_feature, Feature, FeatureCollection, FeatureId, Properties};
pub use geometry::{normalize, GeoOps, Geometry, MultiPolygon, Point, Polygon, PolygonOps};
pub use operations::{
    compare_left_to_right, cut, explode, leftmost_feature, merge, order_left_to_right, union_all,
    Cut, CutParams, Merge, OrderLeftToRight, PrimaryRemnant, UnionAll,
};
