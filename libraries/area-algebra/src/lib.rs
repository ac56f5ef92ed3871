//! Area-algebra: Boolean Operations on Planar Areas for Rust
//!
//! An [`Area`] stores a region of the plane as a set of closed chains of y-monotonic curve pieces.
//! Regions are combined with [`Area::add`], [`Area::intersect`], [`Area::subtract`] and [`Area::exclusive_or`],
//! each of which runs a y-band sweep over the curves of both operands and keeps only the boundary of the result.
pub(crate) mod consts;
pub(crate) mod math;

mod area;
mod chain;
mod curve;
mod edge;
mod error;
#[cfg(feature = "kurbo")]
mod bez_path;
mod path;
mod shapes;
mod sweep;
mod transform;

pub use area::Area;
pub use chain::Chain;
pub use curve::{Curve, CurveHandles, Direction};
pub use error::AreaError;
pub use path::{FillRule, Path, PathIterator, PathSegment, PathSegments, TransformedPath};
pub use shapes::{CubicCurve, Ellipse, Line, Polygon, QuadCurve, Rect, RoundRect, Shape};
pub use transform::try_inverse;
