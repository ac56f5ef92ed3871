use super::{Curve, Direction};
use crate::math::{solve_quadratic, split_cubic, split_quadratic};

use glam::DVec2;

/// Append the line from `start` to `end` unless it is horizontal.
pub(crate) fn insert_line(curves: &mut Vec<Curve>, start: DVec2, end: DVec2) {
	if start.y < end.y {
		curves.push(Curve::line(start, end, Direction::Increasing));
	} else if start.y > end.y {
		curves.push(Curve::line(end, start, Direction::Decreasing));
	}
}

/// Append the y-monotonic pieces of a quadratic Bezier, splitting it at its vertical turning point.
pub(crate) fn insert_quadratic(curves: &mut Vec<Curve>, start: DVec2, handle: DVec2, end: DVec2) {
	if start.y > end.y {
		insert_monotonic_quadratics(curves, [end, handle, start], Direction::Decreasing);
	} else if start.y == end.y && start.y == handle.y {
		// Horizontal
	} else {
		insert_monotonic_quadratics(curves, [start, handle, end], Direction::Increasing);
	}
}

/// Append the y-monotonic pieces of a cubic Bezier, splitting it at up to two vertical turning points.
pub(crate) fn insert_cubic(curves: &mut Vec<Curve>, start: DVec2, handle_start: DVec2, handle_end: DVec2, end: DVec2) {
	if start.y > end.y {
		insert_monotonic_cubics(curves, [end, handle_end, handle_start, start], Direction::Decreasing);
	} else if start.y == end.y && start.y == handle_start.y && start.y == handle_end.y {
		// Horizontal
	} else {
		insert_monotonic_cubics(curves, [start, handle_start, handle_end, end], Direction::Increasing);
	}
}

/// `points` run top to bottom. Pieces are appended in the order the source path traverses them.
fn insert_monotonic_quadratics(curves: &mut Vec<Curve>, points: [DVec2; 3], direction: Direction) {
	let [y0, cy, y1] = points.map(|point| point.y);
	let split = if y0 <= cy && cy <= y1 {
		None
	} else {
		let denominator = (y0 - cy) + (y1 - cy);
		let t = (y0 - cy) / denominator;
		(denominator != 0. && t > 0. && t < 1.).then_some(t)
	};

	let mut pieces = match split {
		Some(t) => {
			let (first, second) = split_quadratic(points, t);
			vec![first, second]
		}
		None => vec![points],
	};
	if direction == Direction::Decreasing {
		pieces.reverse();
	}
	for [p0, p1, p2] in pieces {
		if p0.y > p2.y {
			curves.push(Curve::quadratic(p2, p1, p0, direction.reversed()));
		} else if p2.y > p0.y {
			curves.push(Curve::quadratic(p0, p1, p2, direction));
		}
	}
}

/// `points` run top to bottom. Pieces are appended in the order the source path traverses them.
fn insert_monotonic_cubics(curves: &mut Vec<Curve>, points: [DVec2; 4], direction: Direction) {
	let [y0, cy0, cy1, y1] = points.map(|point| point.y);
	let mut splits: Vec<f64> = if y0 <= cy0 && cy0 <= cy1 && cy1 <= y1 {
		Vec::new()
	} else {
		// Roots of dy/dt expressed in terms of the control polygon deltas
		let (d0, d1, d2) = (cy0 - y0, cy1 - cy0, y1 - cy1);
		solve_quadratic(d2 - 2. * d1 + d0, 2. * (d1 - d0), d0).into_iter().flatten().filter(|&t| t > 0. && t < 1.).collect()
	};
	splits.sort_by(f64::total_cmp);

	let mut pieces = Vec::with_capacity(3);
	let mut remainder = points;
	let mut consumed = 0.;
	for t in splits {
		let local = (t - consumed) / (1. - consumed);
		if local <= 0. || local >= 1. {
			continue;
		}
		let (first, second) = split_cubic(remainder, local);
		pieces.push(first);
		remainder = second;
		consumed = t;
	}
	pieces.push(remainder);

	if direction == Direction::Decreasing {
		pieces.reverse();
	}
	for [p0, p1, p2, p3] in pieces {
		if p0.y > p3.y {
			curves.push(Curve::cubic(p3, p2, p1, p0, direction.reversed()));
		} else if p3.y > p0.y {
			curves.push(Curve::cubic(p0, p1, p2, p3, direction));
		}
	}
}

impl Curve {
	/// The line from `start` to `end` as a curve piece, or `None` if it is horizontal.
	pub fn from_line(start: DVec2, end: DVec2) -> Option<Curve> {
		let mut curves = Vec::with_capacity(1);
		insert_line(&mut curves, start, end);
		curves.pop()
	}

	/// The y-monotonic pieces of a quadratic Bezier in path order. Horizontal pieces are omitted.
	pub fn from_quadratic(start: DVec2, handle: DVec2, end: DVec2) -> Vec<Curve> {
		let mut curves = Vec::with_capacity(2);
		insert_quadratic(&mut curves, start, handle, end);
		curves
	}

	/// The y-monotonic pieces of a cubic Bezier in path order. Horizontal pieces are omitted.
	pub fn from_cubic(start: DVec2, handle_start: DVec2, handle_end: DVec2, end: DVec2) -> Vec<Curve> {
		let mut curves = Vec::with_capacity(3);
		insert_cubic(&mut curves, start, handle_start, handle_end, end);
		curves
	}
}
