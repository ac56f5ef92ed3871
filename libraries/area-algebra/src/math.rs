use crate::consts::FAIRLY_CLOSE_RATIO;

use glam::DVec2;
use std::cmp::Ordering;

/// Find the real roots of `a * t^2 + b * t + c = 0` using the numerically stable form from Numerical Recipes 5.6.
/// A degenerate equation with `a == 0` is solved as linear, and a constant equation has no roots.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> [Option<f64>; 2] {
	if a == 0. {
		if b == 0. {
			return [None, None];
		}
		return [Some(-c / b), None];
	}
	let discriminant = b * b - 4. * a * c;
	if discriminant < 0. {
		return [None, None];
	}
	let mut d = discriminant.sqrt();
	if b < 0. {
		d = -d;
	}
	let q = (b + d) / -2.;
	[Some(q / a), (q != 0.).then(|| c / q)]
}

/// Whether `a` and `b` are equal up to a tiny fraction of their magnitude.
pub fn fairly_close(a: f64, b: f64) -> bool {
	(a - b).abs() < a.abs().max(b.abs()) * FAIRLY_CLOSE_RATIO
}

/// Strict ordering of two x coordinates, with anything incomparable treated as equal.
pub fn order_of(x1: f64, x2: f64) -> Ordering {
	x1.partial_cmp(&x2).unwrap_or(Ordering::Equal)
}

/// Split a quadratic Bezier given by its three control points at `t` using de Casteljau's algorithm.
pub fn split_quadratic([p0, p1, p2]: [DVec2; 3], t: f64) -> ([DVec2; 3], [DVec2; 3]) {
	let p01 = p0.lerp(p1, t);
	let p12 = p1.lerp(p2, t);
	let mid = p01.lerp(p12, t);
	([p0, p01, mid], [mid, p12, p2])
}

/// Split a cubic Bezier given by its four control points at `t` using de Casteljau's algorithm.
pub fn split_cubic([p0, p1, p2, p3]: [DVec2; 4], t: f64) -> ([DVec2; 4], [DVec2; 4]) {
	let p01 = p0.lerp(p1, t);
	let p12 = p1.lerp(p2, t);
	let p23 = p2.lerp(p3, t);
	let p012 = p01.lerp(p12, t);
	let p123 = p12.lerp(p23, t);
	let mid = p012.lerp(p123, t);
	([p0, p01, p012, mid], [mid, p123, p23, p3])
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn quadratic_roots() {
		let mut roots: Vec<f64> = solve_quadratic(1., -3., 2.).into_iter().flatten().collect();
		roots.sort_by(f64::total_cmp);
		assert_eq!(roots, vec![1., 2.]);
		assert_eq!(solve_quadratic(0., 2., -1.), [Some(0.5), None]);
		assert_eq!(solve_quadratic(0., 0., 1.), [None, None]);
		assert_eq!(solve_quadratic(1., 0., 1.), [None, None]);
	}

	#[test]
	fn closeness_is_relative() {
		assert!(fairly_close(1e6, 1e6 + 1e-5));
		assert!(!fairly_close(1., 1. + 1e-6));
		assert!(!fairly_close(0., 1e-300));
	}

	#[test]
	fn split_keeps_endpoints() {
		let (first, second) = split_cubic([DVec2::ZERO, DVec2::new(1., 2.), DVec2::new(3., 2.), DVec2::new(4., 0.)], 0.5);
		assert_eq!(first[0], DVec2::ZERO);
		assert_eq!(second[3], DVec2::new(4., 0.));
		assert_eq!(first[3], second[0]);
		assert_eq!(first[3], DVec2::new(2., 1.5));

		let (first, second) = split_quadratic([DVec2::ZERO, DVec2::new(1., 2.), DVec2::new(2., 0.)], 0.5);
		assert_eq!(first[2], DVec2::new(1., 1.));
		assert_eq!(second[2], DVec2::new(2., 0.));
	}
}
