use super::{Rect, Shape, frame_point};
use crate::consts::ELLIPSE_CONTROL_RATIO;
use crate::path::PathSegment;

/// An ellipse inscribed in its frame, drawn as four cubic quarter arcs.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ellipse {
	pub frame: Rect,
}

impl Ellipse {
	pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
		Ellipse { frame: Rect::new(x, y, width, height) }
	}
}

impl Shape for Ellipse {
	/// Starts at the rightmost point and runs clockwise in y-down coordinates. Nothing is drawn for a negative size.
	fn segments(&self) -> impl Iterator<Item = PathSegment> + '_ {
		let near = 0.5 + ELLIPSE_CONTROL_RATIO * 0.5;
		let far = 0.5 - ELLIPSE_CONTROL_RATIO * 0.5;
		let arcs = [
			[(1., near), (near, 1.), (0.5, 1.)],
			[(far, 1.), (0., near), (0., 0.5)],
			[(0., far), (far, 0.), (0.5, 0.)],
			[(near, 0.), (1., far), (1., 0.5)],
		];
		let frame = self.frame;
		let count = if frame.width < 0. || frame.height < 0. { 0 } else { 6 };
		let arcs = arcs.into_iter().map(move |[handle_start, handle_end, end]| PathSegment::CubicTo(frame_point(&frame, handle_start), frame_point(&frame, handle_end), frame_point(&frame, end)));
		std::iter::once(PathSegment::MoveTo(frame_point(&frame, (1., 0.5))))
			.chain(arcs)
			.chain(std::iter::once(PathSegment::Close))
			.take(count)
	}

	fn bounds(&self) -> Rect {
		self.frame
	}
}
