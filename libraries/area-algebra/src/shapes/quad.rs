use super::{Rect, Shape};
use crate::path::PathSegment;

use glam::DVec2;

/// A quadratic Bezier segment. As an outline it is closed by the chord from `end` back to `start`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuadCurve {
	pub start: DVec2,
	pub handle: DVec2,
	pub end: DVec2,
}

impl QuadCurve {
	pub fn new(start: DVec2, handle: DVec2, end: DVec2) -> Self {
		QuadCurve { start, handle, end }
	}
}

impl Shape for QuadCurve {
	fn segments(&self) -> impl Iterator<Item = PathSegment> + '_ {
		[PathSegment::MoveTo(self.start), PathSegment::QuadTo(self.handle, self.end)].into_iter()
	}

	/// Bounds of the control polygon.
	fn bounds(&self) -> Rect {
		Rect::bounding([self.start, self.handle, self.end])
	}
}
