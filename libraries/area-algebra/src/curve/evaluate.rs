use super::{Curve, CurveHandles, Direction};
use crate::consts::ROOT_REFINE_MARGIN;
use crate::math::{solve_quadratic, split_cubic, split_quadratic};
use crate::path::PathSegment;

use glam::DVec2;
use std::f64::consts::TAU;

impl Curve {
	/// Power basis coefficients `[c0, c1, c2, c3]` so that `point(t) = c0 + c1 t + c2 t^2 + c3 t^3`.
	pub(crate) fn polynomial(&self) -> [DVec2; 4] {
		let (p0, p3) = (self.top, self.bottom);
		match self.handles {
			CurveHandles::Linear => [p0, p3 - p0, DVec2::ZERO, DVec2::ZERO],
			CurveHandles::Quadratic { handle } => [p0, 2. * (handle - p0), p0 - 2. * handle + p3, DVec2::ZERO],
			CurveHandles::Cubic { handle_top, handle_bottom } => [p0, 3. * (handle_top - p0), 3. * (handle_bottom - 2. * handle_top + p0), p3 - 3. * (handle_bottom - handle_top) - p0],
		}
	}

	pub(crate) fn point_at(&self, t: f64) -> DVec2 {
		match self.handles {
			CurveHandles::Linear => self.top + t * (self.bottom - self.top),
			_ => {
				let [c0, c1, c2, c3] = self.polynomial();
				((c3 * t + c2) * t + c1) * t + c0
			}
		}
	}

	pub(crate) fn x_for_t(&self, t: f64) -> f64 {
		self.point_at(t).x
	}

	pub(crate) fn y_for_t(&self, t: f64) -> f64 {
		self.point_at(t).y
	}

	fn dy_for_t(&self, t: f64) -> f64 {
		let [_, c1, c2, c3] = self.polynomial();
		(3. * c3.y * t + 2. * c2.y) * t + c1.y
	}

	/// Parameter at which the piece reaches height `y`, clamped to the endpoints outside of the piece's y range.
	pub(crate) fn t_for_y(&self, y: f64) -> f64 {
		if y <= self.top.y {
			return 0.;
		}
		if y >= self.bottom.y {
			return 1.;
		}
		match self.handles {
			CurveHandles::Linear => (y - self.top.y) / (self.bottom.y - self.top.y),
			CurveHandles::Quadratic { .. } => {
				let [c0, c1, c2, _] = self.polynomial();
				quadratic_t_for_y(y, c0.y, c1.y, c2.y)
			}
			CurveHandles::Cubic { .. } => self.cubic_t_for_y(y),
		}
	}

	fn cubic_t_for_y(&self, y: f64) -> f64 {
		let [c0, c1, c2, c3] = self.polynomial();
		if c3.y == 0. {
			return quadratic_t_for_y(y, c0.y, c1.y, c2.y);
		}

		// Normalized cubic t^3 + a t^2 + b t + c = 0, solved with the trigonometric or Cardano form
		let a = c2.y / c3.y;
		let b = c1.y / c3.y;
		let c = (c0.y - y) / c3.y;
		let q = (a * a - 3. * b) / 9.;
		let r = (2. * a * a * a - 9. * a * b + 27. * c) / 54.;
		let r_squared = r * r;
		let q_cubed = q * q * q;
		let a_third = a / 3.;

		let t = if r_squared < q_cubed {
			let theta = (r / q_cubed.sqrt()).acos();
			let scale = -2. * q.sqrt();
			[theta, theta + TAU, theta - TAU]
				.into_iter()
				.map(|angle| self.refine_cubic_root(y, scale * (angle / 3.).cos() - a_third))
				.find(|&t| t >= 0.)
				.unwrap_or(-1.)
		} else {
			let mut big_a = (r.abs() + (r_squared - q_cubed).sqrt()).cbrt();
			if r >= 0. {
				big_a = -big_a;
			}
			let big_b = if big_a == 0. { 0. } else { q / big_a };
			self.refine_cubic_root(y, big_a + big_b - a_third)
		};
		if t >= 0. {
			return t;
		}

		// All analytic candidates failed, fall back to plain bisection over the whole piece
		let (mut t0, mut t1) = (0., 1.);
		loop {
			let t = (t0 + t1) / 2.;
			if t == t0 || t == t1 {
				return t;
			}
			let yt = self.y_for_t(t);
			if yt < y {
				t0 = t;
			} else if yt > y {
				t1 = t;
			} else {
				return t;
			}
		}
	}

	/// Polish an analytic root with Newton steps kept inside a shrinking bracket, falling back to bisection.
	/// Returns a negative value when the candidate is unusable.
	fn refine_cubic_root(&self, target: f64, mut t: f64) -> f64 {
		if !(-ROOT_REFINE_MARGIN..=1. + ROOT_REFINE_MARGIN).contains(&t) {
			return -1.;
		}
		let mut y = self.y_for_t(t);
		let (mut t0, mut t1) = if y < target { (t, 1.) } else { (0., t) };
		let mut use_slope = true;
		while y != target {
			if use_slope {
				let t2 = t + (target - y) / self.dy_for_t(t);
				if !t2.is_finite() || t2 == t || t2 <= t0 || t2 >= t1 {
					use_slope = false;
					continue;
				}
				t = t2;
			} else {
				let t2 = (t0 + t1) / 2.;
				if t2 == t0 || t2 == t1 {
					break;
				}
				t = t2;
			}
			y = self.y_for_t(t);
			if y < target {
				t0 = t;
			} else if y > target {
				t1 = t;
			} else {
				break;
			}
		}
		if t > 1. { -1. } else { t }
	}

	/// Move `t` forward by bisection until the piece is no longer above `y`.
	pub(crate) fn refine_t_for_y(&self, mut t0: f64, y: f64) -> f64 {
		let mut t1 = 1.;
		loop {
			let t = (t0 + t1) / 2.;
			if t == t0 || t == t1 {
				return t1;
			}
			let yt = self.y_for_t(t);
			if yt < y {
				t0 = t;
			} else if yt > y {
				t1 = t;
			} else {
				return t1;
			}
		}
	}

	/// The x coordinate of the piece at height `y`, clamped to its endpoints outside of its y range.
	pub fn x_at_y(&self, y: f64) -> f64 {
		if y <= self.top.y {
			return self.top.x;
		}
		if y >= self.bottom.y {
			return self.bottom.x;
		}
		match self.handles {
			CurveHandles::Linear => {
				if self.top.x == self.bottom.x {
					return self.top.x;
				}
				self.top.x + (y - self.top.y) * (self.bottom.x - self.top.x) / (self.bottom.y - self.top.y)
			}
			_ => self.x_for_t(self.t_for_y(y)),
		}
	}

	/// First parameter in `(t0, t1)` where the piece turns horizontally (dx/dt = 0), or `t1` if it never does.
	pub(crate) fn next_vertical(&self, t0: f64, t1: f64) -> f64 {
		let [_, c1, c2, c3] = self.polynomial();
		match self.handles {
			CurveHandles::Linear => t1,
			CurveHandles::Quadratic { .. } => {
				let t = -c1.x / (2. * c2.x);
				if t > t0 && t < t1 { t } else { t1 }
			}
			CurveHandles::Cubic { .. } => solve_quadratic(3. * c3.x, 2. * c2.x, c1.x).into_iter().flatten().fold(t1, |first, t| if t > t0 && t < first { t } else { first }),
		}
	}

	/// The part of the piece between heights `y_start` and `y_end`, traversed in `direction`.
	/// The new endpoints are placed exactly at the requested heights.
	pub fn sub_curve(&self, y_start: f64, y_end: f64, direction: Direction) -> Curve {
		if y_start <= self.top.y && y_end >= self.bottom.y {
			return self.with_direction(direction);
		}
		match self.handles {
			CurveHandles::Linear => {
				let x_start = self.x_at_y(y_start);
				let x_end = self.x_at_y(y_end);
				Curve::line(DVec2::new(x_start, y_start), DVec2::new(x_end, y_end), direction)
			}
			CurveHandles::Quadratic { handle } => {
				let (t0, t1) = self.parameter_span(y_start, y_end);
				let mut points = [self.top, handle, self.bottom];
				if t1 < 1. {
					points = split_quadratic(points, t1).0;
				}
				if t0 > 0. && t1 > 0. {
					points = split_quadratic(points, t0 / t1).1;
				}
				let [top, handle, bottom] = points;
				Curve::quadratic(DVec2::new(top.x, y_start), handle, DVec2::new(bottom.x, y_end), direction)
			}
			CurveHandles::Cubic { handle_top, handle_bottom } => {
				let (t0, t1) = self.parameter_span(y_start, y_end);
				let mut points = [self.top, handle_top, handle_bottom, self.bottom];
				if t1 < 1. {
					points = split_cubic(points, t1).0;
				}
				if t0 > 0. && t1 > 0. {
					points = split_cubic(points, t0 / t1).1;
				}
				let [top, handle_top, handle_bottom, bottom] = points;
				Curve::cubic(DVec2::new(top.x, y_start), handle_top, handle_bottom, DVec2::new(bottom.x, y_end), direction)
			}
		}
	}

	fn parameter_span(&self, y_start: f64, y_end: f64) -> (f64, f64) {
		let t0 = self.t_for_y(y_start);
		let t1 = self.t_for_y(y_end);
		if t0 > t1 { (t1, t0) } else { (t0, t1) }
	}

	/// Split the piece into an upper and a lower part at height `y`, or `None` if `y` is not strictly inside its y range.
	pub fn split_at_y(&self, y: f64) -> Option<(Curve, Curve)> {
		if y <= self.top.y || y >= self.bottom.y {
			return None;
		}
		Some((self.sub_curve(self.top.y, y, self.direction), self.sub_curve(y, self.bottom.y, self.direction)))
	}

	/// Number of times a ray cast from `point` towards positive x crosses the piece (0 or 1).
	/// The piece covers the half-open y range `[y_top, y_bot)` so shared endpoints are counted once.
	pub(crate) fn crossings_for(&self, point: DVec2) -> usize {
		if point.y >= self.top.y && point.y < self.bottom.y && point.x < self.x_max() && (point.x < self.x_min() || point.x < self.x_at_y(point.y)) {
			1
		} else {
			0
		}
	}

	/// Exact axis-aligned bounding box as `[min, max]`, including horizontal turning points inside the piece.
	pub fn bounding_box(&self) -> [DVec2; 2] {
		let mut min = self.top.min(self.bottom);
		let mut max = self.top.max(self.bottom);
		let [_, c1, c2, c3] = self.polynomial();
		let turning = match self.handles {
			CurveHandles::Linear => [None, None],
			CurveHandles::Quadratic { .. } => [(c2.x != 0.).then(|| -c1.x / (2. * c2.x)), None],
			CurveHandles::Cubic { .. } => solve_quadratic(3. * c3.x, 2. * c2.x, c1.x),
		};
		for t in turning.into_iter().flatten().filter(|&t| t > 0. && t < 1.) {
			let point = self.point_at(t);
			min = min.min(point);
			max = max.max(point);
		}
		[min, max]
	}

	/// The piece as a path segment continuing from [`Curve::start`].
	pub fn path_segment(&self) -> PathSegment {
		match (self.handles, self.direction) {
			(CurveHandles::Linear, _) => PathSegment::LineTo(self.end()),
			(CurveHandles::Quadratic { handle }, _) => PathSegment::QuadTo(handle, self.end()),
			(CurveHandles::Cubic { handle_top, handle_bottom }, Direction::Increasing) => PathSegment::CubicTo(handle_top, handle_bottom, self.bottom),
			(CurveHandles::Cubic { handle_top, handle_bottom }, Direction::Decreasing) => PathSegment::CubicTo(handle_bottom, handle_top, self.top),
		}
	}
}

/// Solve `c0 + c1 t + c2 t^2 = y` for the root in `[0, 1]` of a y-monotonic quadratic.
fn quadratic_t_for_y(y: f64, c0: f64, c1: f64, c2: f64) -> f64 {
	let c = c0 - y;
	if c2 != 0. {
		let discriminant = c1 * c1 - 4. * c2 * c;
		if discriminant >= 0. {
			let mut d = discriminant.sqrt();
			if c1 < 0. {
				d = -d;
			}
			let q = (c1 + d) / -2.;
			let root = q / c2;
			if (0. ..=1.).contains(&root) {
				return root;
			}
			if q != 0. {
				let root = c / q;
				if (0. ..=1.).contains(&root) {
					return root;
				}
			}
		}
	} else if c1 != 0. {
		let root = -c / c1;
		if (0. ..=1.).contains(&root) {
			return root;
		}
	}

	// Precision loss pushed the root outside of the piece, pick the end nearest to the target
	let c_end = c0 + c1 + c2 - y;
	if 0. < (c + c_end) / 2. { 0. } else { 1. }
}
