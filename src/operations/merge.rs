use tracing::debug;

use super::order::OrderLeftToRight;
use super::union_all::UnionAll;
use crate::feature::Feature;
use crate::geometry::{GeoOps, PolygonOps};

/// Merges features into one, keeping the identity of the leftmost.
///
/// The merged geometry is the [`UnionAll`] of the inputs; id and properties
/// come from the feature [`OrderLeftToRight`] ranks first.
pub struct Merge<'a, O = GeoOps> {
    features: &'a [Feature],
    ops: O,
}

impl<'a> Merge<'a> {
    /// Creates a new `Merge` operation.
    #[must_use]
    pub fn new(features: &'a [Feature]) -> Self {
        Self {
            features,
            ops: GeoOps,
        }
    }
}

impl<'a, O: PolygonOps> Merge<'a, O> {
    /// Uses a different set of geometric primitives.
    #[must_use]
    pub fn with_ops<P: PolygonOps>(self, ops: P) -> Merge<'a, P> {
        Merge {
            features: self.features,
            ops,
        }
    }

    /// Executes the merge. Returns `None` when no feature is polygonal or
    /// none has a centroid.
    #[must_use]
    pub fn execute(&self) -> Option<Feature> {
        let merged = UnionAll::new(self.features)
            .with_ops(&self.ops)
            .execute()?;
        let Some((primary, _)) = OrderLeftToRight::new(self.features)
            .with_ops(&self.ops)
            .leftmost()
        else {
            debug!("no feature has a centroid to take identity from");
            return None;
        };
        debug!(id = ?primary.id, parts = merged.0.len(), "merged features");
        Some(Feature::from_parts(
            merged,
            primary.properties.clone(),
            primary.id.clone(),
        ))
    }
}

/// Merges features; see [`Merge`].
#[must_use]
pub fn merge(features: &[Feature]) -> Option<Feature> {
    Merge::new(features).execute()
}
