use super::{Rect, Shape};
use crate::path::{FillRule, PathSegment};

use glam::DVec2;

/// A closed polygon through the given vertices.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon {
	pub points: Vec<DVec2>,
	pub fill_rule: FillRule,
}

impl Polygon {
	pub fn new(points: impl IntoIterator<Item = DVec2>) -> Self {
		Polygon {
			points: points.into_iter().collect(),
			fill_rule: FillRule::EvenOdd,
		}
	}

	#[must_use]
	pub fn with_fill_rule(mut self, fill_rule: FillRule) -> Self {
		self.fill_rule = fill_rule;
		self
	}
}

impl Default for Polygon {
	fn default() -> Self {
		Polygon::new([])
	}
}

impl Shape for Polygon {
	fn segments(&self) -> impl Iterator<Item = PathSegment> + '_ {
		let close = (!self.points.is_empty()).then_some(PathSegment::Close);
		self.points
			.iter()
			.enumerate()
			.map(|(index, &point)| if index == 0 { PathSegment::MoveTo(point) } else { PathSegment::LineTo(point) })
			.chain(close)
	}

	fn bounds(&self) -> Rect {
		Rect::bounding(self.points.iter().copied())
	}

	fn fill_rule(&self) -> FillRule {
		self.fill_rule
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn outline_moves_then_closes() {
		let triangle = Polygon::new([DVec2::new(0., 0.), DVec2::new(4., 0.), DVec2::new(2., 3.)]);
		let segments: Vec<_> = triangle.segments().collect();
		assert_eq!(segments.len(), 4);
		assert_eq!(segments[0], PathSegment::MoveTo(DVec2::ZERO));
		assert_eq!(segments[3], PathSegment::Close);
		assert_eq!(triangle.bounds(), Rect::new(0., 0., 4., 3.));
		assert_eq!(Polygon::default().segments().count(), 0);
	}
}
