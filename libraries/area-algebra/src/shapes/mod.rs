mod cubic;
mod ellipse;
mod line;
mod polygon;
mod quad;
mod rect;
mod round_rect;

pub use cubic::CubicCurve;
pub use ellipse::Ellipse;
pub use line::Line;
pub use polygon::Polygon;
pub use quad::QuadCurve;
pub use rect::Rect;
pub use round_rect::RoundRect;

use crate::path::{FillRule, Path, PathIterator, PathSegment, PathSegments, TransformedPath};

use glam::{DAffine2, DVec2};

/// A geometric outline that can be walked as a path.
pub trait Shape {
	/// Outline in the shape's own coordinates.
	fn segments(&self) -> impl Iterator<Item = PathSegment> + '_;

	/// Axis-aligned bounds of the outline.
	fn bounds(&self) -> Rect;

	fn fill_rule(&self) -> FillRule {
		FillRule::NonZero
	}

	/// Outline as a [`PathIterator`], optionally mapped through `transform`.
	fn path_iter(&self, transform: Option<DAffine2>) -> impl PathIterator + '_ {
		TransformedPath::new(PathSegments::new(self.segments(), self.fill_rule()), transform)
	}
}

impl Shape for Path {
	fn segments(&self) -> impl Iterator<Item = PathSegment> + '_ {
		Path::segments(self).iter().copied()
	}

	/// Bounds of every point in the path, control points included.
	fn bounds(&self) -> Rect {
		let points = Path::segments(self).iter().flat_map(|segment| match *segment {
			PathSegment::MoveTo(point) | PathSegment::LineTo(point) => [Some(point), None, None],
			PathSegment::QuadTo(handle, point) => [Some(handle), Some(point), None],
			PathSegment::CubicTo(handle_start, handle_end, point) => [Some(handle_start), Some(handle_end), Some(point)],
			PathSegment::Close => [None, None, None],
		});
		Rect::bounding(points.flatten())
	}

	fn fill_rule(&self) -> FillRule {
		Path::fill_rule(self)
	}
}

/// Map unit-square coordinates onto the frame `(x, y, width, height)`.
fn frame_point(frame: &Rect, unit: (f64, f64)) -> DVec2 {
	DVec2::new(frame.x + unit.0 * frame.width, frame.y + unit.1 * frame.height)
}
