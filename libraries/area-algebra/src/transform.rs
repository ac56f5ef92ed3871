use crate::error::AreaError;

use glam::DAffine2;

/// Inverse of `transform`, failing when its linear part collapses the plane.
pub fn try_inverse(transform: &DAffine2) -> Result<DAffine2, AreaError> {
	let determinant = transform.matrix2.determinant();
	if determinant == 0. || !determinant.is_finite() {
		return Err(AreaError::NonInvertibleTransform { determinant });
	}
	Ok(transform.inverse())
}

#[cfg(test)]
mod tests {
	use super::*;
	use glam::{DMat2, DVec2};

	#[test]
	fn inverse_round_trips() {
		let transform = DAffine2::from_scale_angle_translation(DVec2::new(2., 3.), 0.5, DVec2::new(-4., 7.));
		let inverse = try_inverse(&transform).unwrap();
		let point = DVec2::new(1.5, -2.);
		assert!((inverse.transform_point2(transform.transform_point2(point)) - point).length() < 1e-12);
	}

	#[test]
	fn singular_transform_is_rejected() {
		let flat = DAffine2::from_mat2(DMat2::from_cols(DVec2::new(1., 2.), DVec2::new(2., 4.)));
		assert_eq!(try_inverse(&flat), Err(AreaError::NonInvertibleTransform { determinant: 0. }));
		assert!(try_inverse(&DAffine2::from_scale(DVec2::new(f64::INFINITY, 1.))).is_err());
	}
}
