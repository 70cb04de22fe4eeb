mod cut;
mod explode;
mod merge;
mod order;
mod union_all;

pub use cut::{cut, Cut, CutParams, PrimaryRemnant, DEFAULT_FIXED_KEY};
pub use explode::explode;
pub use merge::{merge, Merge};
pub use order::{compare_left_to_right, leftmost_feature, order_left_to_right, OrderLeftToRight};
pub use union_all::{union_all, UnionAll};
