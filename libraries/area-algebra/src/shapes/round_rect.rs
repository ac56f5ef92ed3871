use super::{Rect, Shape};
use crate::consts::ELLIPSE_CONTROL_RATIO;
use crate::path::PathSegment;

use glam::DVec2;

/// A rectangle whose corners are rounded by elliptical quarter arcs of the given diameters.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundRect {
	pub frame: Rect,
	pub arc_width: f64,
	pub arc_height: f64,
}

impl RoundRect {
	pub fn new(x: f64, y: f64, width: f64, height: f64, arc_width: f64, arc_height: f64) -> Self {
		RoundRect {
			frame: Rect::new(x, y, width, height),
			arc_width,
			arc_height,
		}
	}
}

/// `(frame fraction x, arc fraction x, frame fraction y, arc fraction y)` of an outline point.
type Anchor = (f64, f64, f64, f64);

impl Shape for RoundRect {
	/// Starts at the top of the left side and runs counterclockwise in y-down coordinates.
	/// Arc diameters are clamped to the frame, and nothing is drawn for a negative size.
	fn segments(&self) -> impl Iterator<Item = PathSegment> + '_ {
		let frame = self.frame;
		let arc_width = frame.width.min(self.arc_width.abs());
		let arc_height = frame.height.min(self.arc_height.abs());
		let count = if arc_width < 0. || arc_height < 0. { 0 } else { 10 };
		let point = move |(x, arc_x, y, arc_y): Anchor| DVec2::new(frame.x + x * frame.width + arc_x * arc_width, frame.y + y * frame.height + arc_y * arc_height);
		let corner = move |handle_start: Anchor, handle_end: Anchor, end: Anchor| PathSegment::CubicTo(point(handle_start), point(handle_end), point(end));

		// Handle offset from the arc's start, as a fraction of the arc diameter
		let near = (1. - ELLIPSE_CONTROL_RATIO) / 2.;
		[
			PathSegment::MoveTo(point((0., 0., 0., 0.5))),
			PathSegment::LineTo(point((0., 0., 1., -0.5))),
			corner((0., 0., 1., -near), (0., near, 1., 0.), (0., 0.5, 1., 0.)),
			PathSegment::LineTo(point((1., -0.5, 1., 0.))),
			corner((1., -near, 1., 0.), (1., 0., 1., -near), (1., 0., 1., -0.5)),
			PathSegment::LineTo(point((1., 0., 0., 0.5))),
			corner((1., 0., 0., near), (1., -near, 0., 0.), (1., -0.5, 0., 0.)),
			PathSegment::LineTo(point((0., 0.5, 0., 0.))),
			corner((0., near, 0., 0.), (0., 0., 0., near), (0., 0., 0., 0.5)),
			PathSegment::Close,
		]
		.into_iter()
		.take(count)
	}

	fn bounds(&self) -> Rect {
		self.frame
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn corners_meet_sides() {
		let round_rect = RoundRect::new(0., 0., 10., 6., 4., 2.);
		let ends: Vec<DVec2> = round_rect.segments().filter_map(|segment| segment.end_point()).collect();
		assert_eq!(
			ends,
			vec![
				DVec2::new(0., 1.),
				DVec2::new(0., 5.),
				DVec2::new(2., 6.),
				DVec2::new(8., 6.),
				DVec2::new(10., 5.),
				DVec2::new(10., 1.),
				DVec2::new(8., 0.),
				DVec2::new(2., 0.),
				DVec2::new(0., 1.),
			]
		);
	}

	#[test]
	fn arcs_are_clamped_to_frame() {
		let round_rect = RoundRect::new(0., 0., 4., 4., -10., 10.);
		let ends: Vec<DVec2> = round_rect.segments().filter_map(|segment| segment.end_point()).collect();
		// Diameters equal to the frame collapse the straight sides to points
		assert_eq!(ends[0], DVec2::new(0., 2.));
		assert_eq!(ends[1], DVec2::new(0., 2.));
		assert_eq!(ends[2], DVec2::new(2., 4.));
	}
}
