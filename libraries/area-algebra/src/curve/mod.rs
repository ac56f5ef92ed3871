mod compare;
mod decompose;
mod evaluate;

pub(crate) use decompose::{insert_cubic, insert_line, insert_quadratic};

use glam::DVec2;

/// Traversal direction of a curve piece relative to the path it was cut from.
/// `Increasing` pieces were traversed from top to bottom (ascending y).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
	Increasing,
	Decreasing,
}

impl Direction {
	/// Winding contribution of a piece crossed by a horizontal ray.
	pub fn sign(self) -> i32 {
		match self {
			Direction::Increasing => 1,
			Direction::Decreasing => -1,
		}
	}

	#[must_use]
	pub fn reversed(self) -> Self {
		match self {
			Direction::Increasing => Direction::Decreasing,
			Direction::Decreasing => Direction::Increasing,
		}
	}
}

/// Control handles of a curve piece, ordered from the top endpoint to the bottom one.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CurveHandles {
	Linear,
	Quadratic { handle: DVec2 },
	Cubic { handle_top: DVec2, handle_bottom: DVec2 },
}

/// A line, quadratic or cubic Bezier piece whose y coordinate never decreases from `top` to `bottom`.
///
/// The geometry is always stored top to bottom with `top.y < bottom.y` for pieces produced by decomposition;
/// the traversal direction of the source path is kept separately in [`Direction`].
/// Horizontal spans are never stored as curves, they are implied between consecutive pieces of a [`Chain`](crate::Chain).
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Curve {
	pub(crate) top: DVec2,
	pub(crate) bottom: DVec2,
	pub(crate) handles: CurveHandles,
	pub(crate) direction: Direction,
}

impl Curve {
	pub(crate) fn line(top: DVec2, bottom: DVec2, direction: Direction) -> Self {
		Curve {
			top,
			bottom,
			handles: CurveHandles::Linear,
			direction,
		}
	}

	/// Handle y is pulled into `[top.y, bottom.y]` so the piece stays monotonic after rounding.
	pub(crate) fn quadratic(top: DVec2, handle: DVec2, bottom: DVec2, direction: Direction) -> Self {
		let handle = DVec2::new(handle.x, handle.y.max(top.y).min(bottom.y));
		Curve {
			top,
			bottom,
			handles: CurveHandles::Quadratic { handle },
			direction,
		}
	}

	pub(crate) fn cubic(top: DVec2, handle_top: DVec2, handle_bottom: DVec2, bottom: DVec2, direction: Direction) -> Self {
		let handle_top = DVec2::new(handle_top.x, handle_top.y.max(top.y));
		let handle_bottom = DVec2::new(handle_bottom.x, handle_bottom.y.min(bottom.y));
		Curve {
			top,
			bottom,
			handles: CurveHandles::Cubic { handle_top, handle_bottom },
			direction,
		}
	}

	/// Polynomial degree of the piece: 1, 2 or 3.
	pub fn order(&self) -> usize {
		match self.handles {
			CurveHandles::Linear => 1,
			CurveHandles::Quadratic { .. } => 2,
			CurveHandles::Cubic { .. } => 3,
		}
	}

	pub fn direction(&self) -> Direction {
		self.direction
	}

	pub fn handles(&self) -> CurveHandles {
		self.handles
	}

	pub fn top(&self) -> DVec2 {
		self.top
	}

	pub fn bottom(&self) -> DVec2 {
		self.bottom
	}

	pub fn y_top(&self) -> f64 {
		self.top.y
	}

	pub fn y_bot(&self) -> f64 {
		self.bottom.y
	}

	pub fn x_top(&self) -> f64 {
		self.top.x
	}

	pub fn x_bot(&self) -> f64 {
		self.bottom.x
	}

	/// First point of the piece in traversal order.
	pub fn start(&self) -> DVec2 {
		match self.direction {
			Direction::Increasing => self.top,
			Direction::Decreasing => self.bottom,
		}
	}

	/// Last point of the piece in traversal order.
	pub fn end(&self) -> DVec2 {
		match self.direction {
			Direction::Increasing => self.bottom,
			Direction::Decreasing => self.top,
		}
	}

	/// Smallest x of the control polygon, which bounds the piece from the left.
	pub fn x_min(&self) -> f64 {
		self.control_points().fold(f64::INFINITY, |min, point| min.min(point.x))
	}

	/// Largest x of the control polygon, which bounds the piece from the right.
	pub fn x_max(&self) -> f64 {
		self.control_points().fold(f64::NEG_INFINITY, |max, point| max.max(point.x))
	}

	fn control_points(&self) -> impl Iterator<Item = DVec2> {
		let handles = match self.handles {
			CurveHandles::Linear => [None, None],
			CurveHandles::Quadratic { handle } => [Some(handle), None],
			CurveHandles::Cubic { handle_top, handle_bottom } => [Some(handle_top), Some(handle_bottom)],
		};
		[self.top, self.bottom].into_iter().chain(handles.into_iter().flatten())
	}

	/// Same geometry traversed in the given direction.
	#[must_use]
	pub fn with_direction(&self, direction: Direction) -> Self {
		Curve { direction, ..*self }
	}

	/// Same geometry traversed the other way.
	#[must_use]
	pub fn reversed(&self) -> Self {
		self.with_direction(self.direction.reversed())
	}
}

impl std::fmt::Display for Curve {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let direction = match self.direction {
			Direction::Increasing => "v",
			Direction::Decreasing => "^",
		};
		match self.handles {
			CurveHandles::Linear => write!(f, "Line{direction}[{} -> {}]", self.top, self.bottom),
			CurveHandles::Quadratic { handle } => write!(f, "Quad{direction}[{} -> {} -> {}]", self.top, handle, self.bottom),
			CurveHandles::Cubic { handle_top, handle_bottom } => write!(f, "Cubic{direction}[{} -> {} -> {} -> {}]", self.top, handle_top, handle_bottom, self.bottom),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn endpoints_follow_direction() {
		let line = Curve::line(DVec2::new(0., 0.), DVec2::new(2., 4.), Direction::Decreasing);
		assert_eq!(line.start(), DVec2::new(2., 4.));
		assert_eq!(line.end(), DVec2::new(0., 0.));
		assert_eq!(line.reversed().start(), DVec2::new(0., 0.));
		assert_eq!(line.reversed().reversed(), line);
	}

	#[test]
	fn constructors_clamp_handles() {
		let quad = Curve::quadratic(DVec2::new(0., 0.), DVec2::new(1., -1.), DVec2::new(2., 4.), Direction::Increasing);
		assert_eq!(quad.handles(), CurveHandles::Quadratic { handle: DVec2::new(1., 0.) });

		let cubic = Curve::cubic(DVec2::new(0., 0.), DVec2::new(1., -1.), DVec2::new(3., 5.), DVec2::new(2., 4.), Direction::Increasing);
		assert_eq!(
			cubic.handles(),
			CurveHandles::Cubic {
				handle_top: DVec2::new(1., 0.),
				handle_bottom: DVec2::new(3., 4.)
			}
		);
	}

	#[test]
	fn horizontal_extent_uses_control_polygon() {
		let cubic = Curve::cubic(DVec2::new(0., 0.), DVec2::new(-2., 1.), DVec2::new(5., 2.), DVec2::new(1., 3.), Direction::Increasing);
		assert_eq!(cubic.x_min(), -2.);
		assert_eq!(cubic.x_max(), 5.);
		assert_eq!(cubic.order(), 3);
	}
}
