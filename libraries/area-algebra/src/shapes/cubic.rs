use super::{Rect, Shape};
use crate::path::PathSegment;

use glam::DVec2;

/// A cubic Bezier segment. As an outline it is closed by the chord from `end` back to `start`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CubicCurve {
	pub start: DVec2,
	pub handle_start: DVec2,
	pub handle_end: DVec2,
	pub end: DVec2,
}

impl CubicCurve {
	pub fn new(start: DVec2, handle_start: DVec2, handle_end: DVec2, end: DVec2) -> Self {
		CubicCurve { start, handle_start, handle_end, end }
	}
}

impl Shape for CubicCurve {
	fn segments(&self) -> impl Iterator<Item = PathSegment> + '_ {
		[PathSegment::MoveTo(self.start), PathSegment::CubicTo(self.handle_start, self.handle_end, self.end)].into_iter()
	}

	/// Bounds of the control polygon.
	fn bounds(&self) -> Rect {
		Rect::bounding([self.start, self.handle_start, self.handle_end, self.end])
	}
}
