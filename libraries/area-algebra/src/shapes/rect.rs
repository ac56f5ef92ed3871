use super::Shape;
use crate::path::PathSegment;

use glam::DVec2;

/// An axis-aligned rectangle with its top-left corner at `(x, y)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
}

impl Rect {
	pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
		Rect { x, y, width, height }
	}

	pub fn from_corners(min: DVec2, max: DVec2) -> Self {
		Rect::new(min.x, min.y, max.x - min.x, max.y - min.y)
	}

	/// Smallest rectangle containing every point, or an empty rectangle at the origin if there are none.
	pub fn bounding(points: impl IntoIterator<Item = DVec2>) -> Self {
		let mut points = points.into_iter();
		let Some(first) = points.next() else { return Rect::default() };
		let (min, max) = points.fold((first, first), |(min, max), point| (min.min(point), max.max(point)));
		Rect::from_corners(min, max)
	}

	pub fn min(&self) -> DVec2 {
		DVec2::new(self.x, self.y)
	}

	pub fn max(&self) -> DVec2 {
		DVec2::new(self.x + self.width, self.y + self.height)
	}

	/// A rectangle without positive area contains nothing.
	pub fn is_empty(&self) -> bool {
		self.width <= 0. || self.height <= 0.
	}

	/// Whether `point` lies inside, counting the top and left edges but not the bottom and right ones.
	pub fn contains(&self, point: DVec2) -> bool {
		let (min, max) = (self.min(), self.max());
		point.x >= min.x && point.y >= min.y && point.x < max.x && point.y < max.y
	}

	pub fn intersects(&self, other: &Rect) -> bool {
		!self.is_empty() && !other.is_empty() && self.x < other.max().x && other.x < self.max().x && self.y < other.max().y && other.y < self.max().y
	}

	/// Whether `other` lies entirely within this rectangle.
	pub fn contains_rect(&self, other: &Rect) -> bool {
		!self.is_empty() && !other.is_empty() && other.x >= self.x && other.y >= self.y && other.max().x <= self.max().x && other.max().y <= self.max().y
	}
}

impl Shape for Rect {
	/// Nothing is drawn for a negative width or height.
	fn segments(&self) -> impl Iterator<Item = PathSegment> + '_ {
		let count = if self.width < 0. || self.height < 0. { 0 } else { 6 };
		let (min, max) = (self.min(), self.max());
		[
			PathSegment::MoveTo(min),
			PathSegment::LineTo(DVec2::new(max.x, min.y)),
			PathSegment::LineTo(max),
			PathSegment::LineTo(DVec2::new(min.x, max.y)),
			PathSegment::LineTo(min),
			PathSegment::Close,
		]
		.into_iter()
		.take(count)
	}

	fn bounds(&self) -> Rect {
		*self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn outline_is_closed_loop() {
		let segments: Vec<_> = Rect::new(1., 2., 3., 4.).segments().collect();
		assert_eq!(segments.len(), 6);
		assert_eq!(segments[0], PathSegment::MoveTo(DVec2::new(1., 2.)));
		assert_eq!(segments[2], PathSegment::LineTo(DVec2::new(4., 6.)));
		assert_eq!(segments[5], PathSegment::Close);
	}

	#[test]
	fn negative_size_draws_nothing() {
		assert_eq!(Rect::new(0., 0., -1., 5.).segments().count(), 0);
		assert_eq!(Rect::new(0., 0., 0., 0.).segments().count(), 6);
	}

	#[test]
	fn containment_is_half_open() {
		let rect = Rect::new(0., 0., 10., 10.);
		assert!(rect.contains(DVec2::new(0., 0.)));
		assert!(!rect.contains(DVec2::new(10., 5.)));
		assert!(rect.intersects(&Rect::new(9., 9., 5., 5.)));
		assert!(!rect.intersects(&Rect::new(10., 0., 5., 5.)));
		assert!(rect.contains_rect(&Rect::new(2., 2., 8., 8.)));
		assert!(!rect.contains_rect(&Rect::new(2., 2., 9., 8.)));
	}

	#[test]
	fn bounding_points() {
		let rect = Rect::bounding([DVec2::new(3., -1.), DVec2::new(-2., 4.), DVec2::new(0., 0.)]);
		assert_eq!(rect, Rect::new(-2., -1., 5., 5.));
		assert_eq!(Rect::bounding([]), Rect::default());
	}
}
