use super::{Curve, CurveHandles};
use crate::consts::{MAX_BUMP_RANGE_FRACTION, MAX_BUMP_RATIO, T_MIN, Y_MIN_ABSOLUTE, Y_SCALE_EPSILON};
use crate::error::AreaError;
use crate::math::{fairly_close, order_of};

use glam::DVec2;
use std::cmp::Ordering;

/// A parameter interval of a curve together with the points at both ends.
#[derive(Clone, Copy, Debug)]
struct Span {
	t0: f64,
	start: DVec2,
	t1: f64,
	end: DVec2,
}

impl Curve {
	/// Horizontal order of `self` relative to `that` within the shared band `y_range`.
	///
	/// `y_range[1]` is lowered to the first height at which the order may change (a crossing, the start of a
	/// coincident run, or the bottom of either curve), so the returned order holds for the whole narrowed band.
	/// `Equal` means both curves coincide through the narrowed band.
	pub fn ordered_compare_to(&self, that: &Curve, y_range: &mut [f64; 2]) -> Result<Ordering, AreaError> {
		if let (CurveHandles::Linear, CurveHandles::Linear) = (self.handles, that.handles) {
			return self.compare_lines(that, y_range);
		}

		let y0 = y_range[0];
		let y1 = y_range[1].min(self.bottom.y).min(that.bottom.y);
		if y1 <= y0 {
			return Err(AreaError::Backstepping { from: y0, to: y1 });
		}
		y_range[1] = y1;
		if let Some(ordering) = self.disjoint_order(that) {
			return Ok(ordering);
		}

		// Parameters of the band's top on each curve, nudged down so neither starts above it
		let mut s0 = self.t_for_y(y0);
		let mut ys0 = self.y_for_t(s0);
		if ys0 < y0 {
			s0 = self.refine_t_for_y(s0, y0);
			ys0 = self.y_for_t(s0);
		}
		let mut s1 = self.t_for_y(y1);
		if self.y_for_t(s1) < y0 {
			s1 = self.refine_t_for_y(s1, y0);
		}
		let mut t0 = that.t_for_y(y0);
		let mut yt0 = that.y_for_t(t0);
		if yt0 < y0 {
			t0 = that.refine_t_for_y(t0, y0);
			yt0 = that.y_for_t(t0);
		}
		let mut t1 = that.t_for_y(y1);
		if that.y_for_t(t1) < y0 {
			t1 = that.refine_t_for_y(t1, y0);
		}
		let mut xs0 = self.x_for_t(s0);
		let mut xt0 = that.x_for_t(t0);

		let scale = y0.abs().max(y1.abs());
		let y_min = (scale * Y_SCALE_EPSILON).max(Y_MIN_ABSOLUTE);
		if fairly_close(xs0, xt0) {
			if let Some(y) = self.coincident_until(that, y0, y1, y_min) {
				if y < y1 {
					y_range[1] = y;
				}
				return Ok(Ordering::Equal);
			}
		}

		while s0 < s1 && t0 < t1 {
			let sh = self.next_vertical(s0, s1);
			let self_turn = self.point_at(sh);
			let th = that.next_vertical(t0, t1);
			let that_turn = that.point_at(th);
			let self_span = Span {
				t0: s0,
				start: DVec2::new(xs0, ys0),
				t1: sh,
				end: self_turn,
			};
			let that_span = Span {
				t0,
				start: DVec2::new(xt0, yt0),
				t1: th,
				end: that_turn,
			};
			if self.find_intersect(that, y_range, self_span, that_span)? {
				break;
			}
			if self_turn.y < that_turn.y {
				if self_turn.y > y_range[0] {
					if self_turn.y < y_range[1] {
						y_range[1] = self_turn.y;
					}
					break;
				}
				s0 = sh;
				xs0 = self_turn.x;
				ys0 = self_turn.y;
			} else {
				if that_turn.y > y_range[0] {
					if that_turn.y < y_range[1] {
						y_range[1] = that_turn.y;
					}
					break;
				}
				t0 = th;
				xt0 = that_turn.x;
				yt0 = that_turn.y;
			}
		}

		let y_mid = (y_range[0] + y_range[1]) / 2.;
		Ok(order_of(self.x_at_y(y_mid), that.x_at_y(y_mid)))
	}

	/// Order decided by the horizontal extents alone, when they do not overlap.
	fn disjoint_order(&self, that: &Curve) -> Option<Ordering> {
		if self.x_max() <= that.x_min() {
			return Some(if self.x_min() == that.x_max() { Ordering::Equal } else { Ordering::Less });
		}
		if self.x_min() >= that.x_max() {
			return Some(Ordering::Greater);
		}
		None
	}

	/// Probe downward from `y0` with growing steps while both curves stay fairly close, then binary search the
	/// height where they separate. Returns that height if the curves coincide for any positive distance.
	fn coincident_until(&self, that: &Curve, y0: f64, y1: f64, y_min: f64) -> Option<f64> {
		let mut bump = y_min;
		let max_bump = (y_min * MAX_BUMP_RATIO).min((y1 - y0) * MAX_BUMP_RANGE_FRACTION);
		let mut y = y0 + bump;
		while y <= y1 {
			if fairly_close(self.x_at_y(y), that.x_at_y(y)) {
				bump *= 2.;
				if bump > max_bump {
					bump = max_bump;
				}
			} else {
				y -= bump;
				loop {
					bump /= 2.;
					let probe = y + bump;
					if probe <= y {
						break;
					}
					if fairly_close(self.x_at_y(probe), that.x_at_y(probe)) {
						y = probe;
					}
				}
				break;
			}
			let next = y + bump;
			if next <= y {
				break;
			}
			y = next;
		}
		(y > y0).then_some(y)
	}

	fn compare_lines(&self, that: &Curve, y_range: &mut [f64; 2]) -> Result<Ordering, AreaError> {
		if y_range[1] <= y_range[0] {
			return Err(AreaError::Backstepping { from: y_range[0], to: y_range[1] });
		}
		y_range[1] = y_range[1].min(self.bottom.y).min(that.bottom.y);
		if y_range[1] <= y_range[0] {
			return Err(AreaError::Backstepping { from: y_range[0], to: y_range[1] });
		}
		if let Some(ordering) = self.disjoint_order(that) {
			return Ok(ordering);
		}

		// Closed form height where the two infinite lines cross
		let delta_a = self.bottom - self.top;
		let delta_b = that.bottom - that.top;
		let denominator = delta_b.x * delta_a.y - delta_a.x * delta_b.y;
		let y = if denominator != 0. {
			let numerator = (self.top.x - that.top.x) * delta_a.y * delta_b.y - self.top.y * delta_a.x * delta_b.y + that.top.y * delta_b.x * delta_a.y;
			let y = numerator / denominator;
			if y <= y_range[0] {
				// Crossing above the band, compare at the bottom-most shared height
				self.bottom.y.min(that.bottom.y)
			} else {
				if y < y_range[1] {
					y_range[1] = y;
				}
				// Compare at the top-most shared height, which lies above the crossing
				self.top.y.max(that.top.y)
			}
		} else {
			self.top.y.max(that.top.y)
		};
		Ok(order_of(self.x_at_y(y), that.x_at_y(y)))
	}

	fn bisect(&self, span: Span) -> Result<(Span, Span), AreaError> {
		let t = (span.t0 + span.t1) / 2.;
		if t == span.t0 || t == span.t1 {
			return Err(AreaError::NoParametricProgress);
		}
		let mid = self.point_at(t);
		Ok((Span { t1: t, end: mid, ..span }, Span { t0: t, start: mid, ..span }))
	}

	/// Search two x-monotonic spans for a crossing strictly below `y_range[0]` by recursive bisection.
	/// Once both spans are shorter than [`T_MIN`] they are intersected as straight segments.
	/// A crossing found inside the band lowers `y_range[1]` to its height.
	fn find_intersect(&self, that: &Curve, y_range: &mut [f64; 2], s: Span, t: Span) -> Result<bool, AreaError> {
		if s.start.y > t.end.y || t.start.y > s.end.y {
			return Ok(false);
		}
		if s.start.x.min(s.end.x) > t.start.x.max(t.end.x) || s.start.x.max(s.end.x) < t.start.x.min(t.end.x) {
			return Ok(false);
		}

		let split_self = s.t1 - s.t0 > T_MIN;
		let split_that = t.t1 - t.t0 > T_MIN;
		match (split_self, split_that) {
			(true, true) => {
				let (s_top, s_bottom) = self.bisect(s)?;
				let (t_top, t_bottom) = that.bisect(t)?;
				let (ys, yt) = (s_top.end.y, t_top.end.y);
				if ys >= t.start.y && yt >= s.start.y && self.find_intersect(that, y_range, s_top, t_top)? {
					return Ok(true);
				}
				if ys >= yt && self.find_intersect(that, y_range, s_top, t_bottom)? {
					return Ok(true);
				}
				if yt >= ys && self.find_intersect(that, y_range, s_bottom, t_top)? {
					return Ok(true);
				}
				if s.end.y >= yt && t.end.y >= ys && self.find_intersect(that, y_range, s_bottom, t_bottom)? {
					return Ok(true);
				}
			}
			(true, false) => {
				let (s_top, s_bottom) = self.bisect(s)?;
				let ys = s_top.end.y;
				if ys >= t.start.y && self.find_intersect(that, y_range, s_top, t)? {
					return Ok(true);
				}
				if t.end.y >= ys && self.find_intersect(that, y_range, s_bottom, t)? {
					return Ok(true);
				}
			}
			(false, true) => {
				let (t_top, t_bottom) = that.bisect(t)?;
				let yt = t_top.end.y;
				if yt >= s.start.y && self.find_intersect(that, y_range, s, t_top)? {
					return Ok(true);
				}
				if s.end.y >= yt && self.find_intersect(that, y_range, s, t_bottom)? {
					return Ok(true);
				}
			}
			(false, false) => {
				let self_delta = s.end - s.start;
				let that_delta = t.end - t.start;
				let offset = t.start - s.start;
				let determinant = that_delta.x * self_delta.y - that_delta.y * self_delta.x;
				if determinant != 0. {
					let inverse = 1. / determinant;
					let s_param = (that_delta.x * offset.y - that_delta.y * offset.x) * inverse;
					let t_param = (self_delta.x * offset.y - self_delta.y * offset.x) * inverse;
					if (0. ..=1.).contains(&s_param) && (0. ..=1.).contains(&t_param) {
						let s_param = s.t0 + s_param * (s.t1 - s.t0);
						let t_param = t.t0 + t_param * (t.t1 - t.t0);
						if s_param < 0. || s_param > 1. || t_param < 0. || t_param > 1. {
							log::trace!("Intersection parameter outside of the curve: s = {s_param}, t = {t_param}");
						}
						let y = (self.y_for_t(s_param) + that.y_for_t(t_param)) / 2.;
						if y <= y_range[1] && y > y_range[0] {
							y_range[1] = y;
							return Ok(true);
						}
					}
				}
			}
		}
		Ok(false)
	}
}
