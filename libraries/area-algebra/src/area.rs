use crate::chain::Chain;
use crate::curve::{Curve, CurveHandles};
use crate::error::AreaError;
use crate::path::{FillRule, PathIterator, PathSegment, path_to_curves};
use crate::shapes::{Rect, Shape};
use crate::sweep::{Operator, calculate};
use crate::transform::try_inverse;

use glam::{DAffine2, DVec2};

/// A region of the plane bounded by closed loops of lines, quadratic and cubic Bezier curves.
///
/// The boundary is kept in a normalized form: every loop is closed, no two loops cross, and the interior is
/// everything with a non-zero winding number. Boolean operations replace the area with the result in place and
/// leave it untouched when they fail.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Area {
	chains: Vec<Chain>,
}

impl Area {
	/// An empty area.
	pub fn new() -> Self {
		Area::default()
	}

	/// The region enclosed by `shape` under its fill rule.
	pub fn from_shape(shape: &impl Shape) -> Result<Self, AreaError> {
		Area::from_path_iter(shape.path_iter(None))
	}

	/// The region enclosed by a path under its fill rule. Every subpath is implicitly closed.
	pub fn from_path_iter(path: impl PathIterator) -> Result<Self, AreaError> {
		let operator = match path.fill_rule() {
			FillRule::NonZero => Operator::NonZero,
			FillRule::EvenOdd => Operator::EvenOdd,
		};
		let curves = path_to_curves(path)?;
		let chains = calculate(&curves, &[], operator)?;
		Ok(Area { chains })
	}

	fn curves(&self) -> Vec<Curve> {
		self.chains.iter().flat_map(|chain| chain.curves().iter().copied()).collect()
	}

	fn combine(&mut self, other: &Area, operator: Operator) -> Result<(), AreaError> {
		self.chains = calculate(&self.curves(), &other.curves(), operator)?;
		Ok(())
	}

	/// Replace the area with its union with `other`.
	pub fn add(&mut self, other: &Area) -> Result<(), AreaError> {
		self.combine(other, Operator::Union)
	}

	/// Replace the area with the part it shares with `other`.
	pub fn intersect(&mut self, other: &Area) -> Result<(), AreaError> {
		self.combine(other, Operator::Intersection)
	}

	/// Remove the part covered by `other` from the area.
	pub fn subtract(&mut self, other: &Area) -> Result<(), AreaError> {
		self.combine(other, Operator::Difference)
	}

	/// Replace the area with the parts covered by exactly one of it and `other`.
	pub fn exclusive_or(&mut self, other: &Area) -> Result<(), AreaError> {
		self.combine(other, Operator::ExclusiveOr)
	}

	pub fn reset(&mut self) {
		self.chains.clear();
	}

	pub fn is_empty(&self) -> bool {
		self.chains.is_empty()
	}

	/// Closed boundary loops of the area.
	pub fn chains(&self) -> &[Chain] {
		&self.chains
	}

	/// Whether the boundary is made of straight lines only.
	pub fn is_polygonal(&self) -> bool {
		self.chains.iter().flat_map(Chain::curves).all(|curve| curve.handles() == CurveHandles::Linear)
	}

	/// Whether the area is empty or a single axis-aligned rectangle.
	pub fn is_rectangular(&self) -> bool {
		match self.chains.as_slice() {
			[] => true,
			[chain] => match chain.curves() {
				[left, right] => [left, right].iter().all(|curve| curve.handles() == CurveHandles::Linear && curve.x_top() == curve.x_bot()) && left.y_top() == right.y_top() && left.y_bot() == right.y_bot(),
				_ => false,
			},
			_ => false,
		}
	}

	/// Whether the area is empty or bounded by a single loop.
	pub fn is_singular(&self) -> bool {
		self.chains.len() <= 1
	}

	/// Tight bounds of the boundary, or an empty rectangle at the origin for an empty area.
	pub fn bounds(&self) -> Rect {
		Rect::bounding(self.chains.iter().flat_map(Chain::curves).flat_map(Curve::bounding_box))
	}

	/// Whether `point` lies inside the area. Points on the bottom or right of the boundary may be reported outside.
	pub fn contains(&self, point: DVec2) -> bool {
		if !self.bounds().contains(point) {
			return false;
		}
		let crossings: usize = self.chains.iter().flat_map(Chain::curves).map(|curve| curve.crossings_for(point)).sum();
		crossings % 2 == 1
	}

	/// Whether `point`, given in the space `local_to_world` maps the area into, lies inside the area.
	pub fn contains_transformed(&self, point: DVec2, local_to_world: &DAffine2) -> Result<bool, AreaError> {
		let world_to_local = try_inverse(local_to_world)?;
		Ok(self.contains(world_to_local.transform_point2(point)))
	}

	/// Whether the area and `rect` share any interior.
	pub fn intersects_rect(&self, rect: &Rect) -> Result<bool, AreaError> {
		if rect.is_empty() || !self.bounds().intersects(rect) {
			return Ok(false);
		}
		let mut overlap = Area::from_shape(rect)?;
		overlap.intersect(self)?;
		Ok(!overlap.is_empty())
	}

	/// Whether `rect` lies entirely inside the area.
	pub fn contains_rect(&self, rect: &Rect) -> Result<bool, AreaError> {
		if rect.is_empty() || !self.bounds().contains_rect(rect) {
			return Ok(false);
		}
		let mut uncovered = Area::from_shape(rect)?;
		uncovered.subtract(self)?;
		Ok(uncovered.is_empty())
	}

	/// Whether both areas cover exactly the same region, regardless of how their boundaries are split into curves.
	pub fn same_region(&self, other: &Area) -> Result<bool, AreaError> {
		if std::ptr::eq(self, other) {
			return Ok(true);
		}
		let mut difference = self.clone();
		difference.exclusive_or(other)?;
		Ok(difference.is_empty())
	}

	/// Map the area through `transform`, renormalizing the boundary afterwards.
	pub fn transform(&mut self, transform: DAffine2) -> Result<(), AreaError> {
		if transform == DAffine2::IDENTITY {
			return Ok(());
		}
		*self = self.transformed(transform)?;
		Ok(())
	}

	#[must_use = "transformed returns a new area and leaves this one unchanged"]
	pub fn transformed(&self, transform: DAffine2) -> Result<Area, AreaError> {
		Area::from_path_iter(self.path_iter(Some(transform)))
	}

	/// Boundary as path segments under the non-zero rule, optionally mapped through `transform`.
	pub fn path_iter(&self, transform: Option<DAffine2>) -> impl PathIterator + '_ {
		<Self as Shape>::path_iter(self, transform)
	}
}

impl Shape for Area {
	fn segments(&self) -> impl Iterator<Item = PathSegment> + '_ {
		self.chains.iter().flat_map(Chain::segments)
	}

	fn bounds(&self) -> Rect {
		Area::bounds(self)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::shapes::{Ellipse, Polygon};

	fn square(x: f64, y: f64, size: f64) -> Area {
		Area::from_shape(&Rect::new(x, y, size, size)).unwrap()
	}

	#[test]
	fn rectangle_area_properties() {
		let area = square(0., 0., 10.);
		assert!(!area.is_empty());
		assert!(area.is_rectangular());
		assert!(area.is_polygonal());
		assert!(area.is_singular());
		assert_eq!(area.bounds(), Rect::new(0., 0., 10., 10.));
		assert!(area.contains(DVec2::new(5., 5.)));
		assert!(area.contains(DVec2::new(0., 0.)));
		assert!(!area.contains(DVec2::new(10., 5.)));
		assert!(!area.contains(DVec2::new(-1., 5.)));
		assert!(Area::new().is_rectangular());
	}

	#[test]
	fn input_errors_are_reported() {
		let mut area = square(0., 0., 10.);
		let before = area.clone();
		let result = Area::from_path_iter(crate::path::PathSegments::new([PathSegment::LineTo(DVec2::ONE)], FillRule::NonZero));
		assert_eq!(result, Err(AreaError::MissingInitialMove));
		assert_eq!(area.contains_transformed(DVec2::ONE, &DAffine2::from_scale(DVec2::ZERO)), Err(AreaError::NonInvertibleTransform { determinant: 0. }));

		// Union with nothing reproduces the same normalized boundary
		area.add(&Area::new()).unwrap();
		assert_eq!(area, before);
	}

	#[test]
	fn failed_operation_keeps_previous_boundary() {
		let open_side = Curve::line(DVec2::new(0., 0.), DVec2::new(0., 10.), crate::curve::Direction::Increasing);
		let malformed = Area {
			chains: vec![Chain { start: open_side.start(), curves: vec![open_side] }],
		};
		let other = square(20., 0., 10.);

		let mut area = malformed.clone();
		let error = area.add(&other).unwrap_err();
		assert_eq!(error, AreaError::OddLinkCount(1));
		assert!(error.is_internal());
		assert_eq!(area, malformed);

		let error = area.subtract(&other).unwrap_err();
		assert!(error.is_internal());
		assert_eq!(area, malformed);
	}

	#[test]
	fn even_odd_star_has_hollow_center() {
		let points = (0..5).map(|i| {
			let angle = std::f64::consts::TAU * (i * 2) as f64 / 5.;
			DVec2::new(angle.sin(), -angle.cos()) * 10.
		});
		let star = Polygon::new(points);
		let hollow = Area::from_shape(&star).unwrap();
		assert!(!hollow.contains(DVec2::new(0., 0.)));
		assert!(hollow.contains(DVec2::new(0., -8.)));

		let filled = Area::from_shape(&star.clone().with_fill_rule(FillRule::NonZero)).unwrap();
		assert!(filled.contains(DVec2::new(0., 0.)));
		assert!(filled.is_singular());
	}

	#[test]
	fn ellipse_bounds_and_containment() {
		let circle = Area::from_shape(&Ellipse::new(0., 0., 10., 10.)).unwrap();
		assert!(!circle.is_polygonal());
		assert!(!circle.is_rectangular());
		let bounds = circle.bounds();
		assert!((bounds.x).abs() < 1e-9 && (bounds.y).abs() < 1e-9);
		assert!((bounds.width - 10.).abs() < 1e-9 && (bounds.height - 10.).abs() < 1e-9);
		assert!(circle.contains(DVec2::new(5., 5.)));
		assert!(!circle.contains(DVec2::new(0.5, 0.5)));
		assert!(circle.chains().iter().all(Chain::is_closed));
	}

	#[test]
	fn transform_maps_region() {
		let mut area = square(0., 0., 2.);
		area.transform(DAffine2::from_translation(DVec2::new(10., 0.)) * DAffine2::from_scale(DVec2::new(-1., 1.))).unwrap();
		assert_eq!(area.bounds(), Rect::new(8., 0., 2., 2.));
		assert!(area.contains(DVec2::new(9., 1.)));
		assert!(area.is_rectangular());

		let local = square(0., 0., 1.);
		let local_to_world = DAffine2::from_scale(DVec2::splat(4.));
		assert_eq!(local.contains_transformed(DVec2::new(3., 3.), &local_to_world), Ok(true));
		assert_eq!(local.contains_transformed(DVec2::new(5., 3.), &local_to_world), Ok(false));
	}

	#[test]
	fn rectangle_queries() {
		let area = square(0., 0., 10.);
		assert_eq!(area.intersects_rect(&Rect::new(8., 8., 5., 5.)), Ok(true));
		assert_eq!(area.intersects_rect(&Rect::new(10., 0., 5., 5.)), Ok(false));
		assert_eq!(area.intersects_rect(&Rect::new(2., 2., 0., 5.)), Ok(false));
		assert_eq!(area.contains_rect(&Rect::new(1., 1., 8., 8.)), Ok(true));
		assert_eq!(area.contains_rect(&Rect::new(1., 1., 9.5, 8.)), Ok(false));
	}

	#[test]
	fn path_iter_rebuilds_the_same_area() {
		let mut area = square(0., 0., 10.);
		area.subtract(&square(2., 2., 3.)).unwrap();
		let rebuilt = Area::from_path_iter(area.path_iter(None)).unwrap();
		assert_eq!(rebuilt.chains().len(), 2);
		assert_eq!(rebuilt.same_region(&area), Ok(true));
	}
}
