use crate::area::Area;
use crate::error::AreaError;
use crate::path::{FillRule, PathSegment, PathSegments};

use glam::DVec2;
use kurbo::{BezPath, PathEl, Point};

fn to_point(point: DVec2) -> Point {
	Point::new(point.x, point.y)
}

fn to_dvec2(point: Point) -> DVec2 {
	DVec2::new(point.x, point.y)
}

impl From<&Area> for BezPath {
	fn from(area: &Area) -> Self {
		let mut path = BezPath::new();
		for segment in area.path_iter(None) {
			match segment {
				PathSegment::MoveTo(point) => path.move_to(to_point(point)),
				PathSegment::LineTo(point) => path.line_to(to_point(point)),
				PathSegment::QuadTo(handle, point) => path.quad_to(to_point(handle), to_point(point)),
				PathSegment::CubicTo(handle_start, handle_end, point) => path.curve_to(to_point(handle_start), to_point(handle_end), to_point(point)),
				PathSegment::Close => path.close_path(),
			}
		}
		path
	}
}

impl Area {
	/// The region enclosed by a kurbo path under `fill_rule`.
	pub fn from_bez_path(path: &BezPath, fill_rule: FillRule) -> Result<Self, AreaError> {
		let segments = path.elements().iter().map(|element| match *element {
			PathEl::MoveTo(point) => PathSegment::MoveTo(to_dvec2(point)),
			PathEl::LineTo(point) => PathSegment::LineTo(to_dvec2(point)),
			PathEl::QuadTo(handle, point) => PathSegment::QuadTo(to_dvec2(handle), to_dvec2(point)),
			PathEl::CurveTo(handle_start, handle_end, point) => PathSegment::CubicTo(to_dvec2(handle_start), to_dvec2(handle_end), to_dvec2(point)),
			PathEl::ClosePath => PathSegment::Close,
		});
		Area::from_path_iter(PathSegments::new(segments, fill_rule))
	}
}
