use super::{Rect, Shape};
use crate::path::PathSegment;

use glam::DVec2;

/// A straight line segment. It encloses no area on its own.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
	pub start: DVec2,
	pub end: DVec2,
}

impl Line {
	pub fn new(start: DVec2, end: DVec2) -> Self {
		Line { start, end }
	}
}

impl Shape for Line {
	fn segments(&self) -> impl Iterator<Item = PathSegment> + '_ {
		[PathSegment::MoveTo(self.start), PathSegment::LineTo(self.end)].into_iter()
	}

	fn bounds(&self) -> Rect {
		Rect::bounding([self.start, self.end])
	}
}
