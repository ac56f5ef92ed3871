use crate::curve::{Curve, insert_cubic, insert_line, insert_quadratic};
use crate::error::AreaError;

use glam::{DAffine2, DVec2};

/// One drawing command of a path. Every command except [`PathSegment::MoveTo`] continues from the previous end point.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathSegment {
	MoveTo(DVec2),
	LineTo(DVec2),
	QuadTo(DVec2, DVec2),
	CubicTo(DVec2, DVec2, DVec2),
	/// Line back to the point of the last move.
	Close,
}

impl PathSegment {
	pub fn end_point(&self) -> Option<DVec2> {
		match *self {
			PathSegment::MoveTo(point) | PathSegment::LineTo(point) | PathSegment::QuadTo(_, point) | PathSegment::CubicTo(_, _, point) => Some(point),
			PathSegment::Close => None,
		}
	}

	#[must_use]
	pub fn map_points(self, f: impl Fn(DVec2) -> DVec2) -> Self {
		match self {
			PathSegment::MoveTo(point) => PathSegment::MoveTo(f(point)),
			PathSegment::LineTo(point) => PathSegment::LineTo(f(point)),
			PathSegment::QuadTo(handle, point) => PathSegment::QuadTo(f(handle), f(point)),
			PathSegment::CubicTo(handle_start, handle_end, point) => PathSegment::CubicTo(f(handle_start), f(handle_end), f(point)),
			PathSegment::Close => PathSegment::Close,
		}
	}

	pub fn is_finite(&self) -> bool {
		match *self {
			PathSegment::MoveTo(point) | PathSegment::LineTo(point) => point.is_finite(),
			PathSegment::QuadTo(handle, point) => handle.is_finite() && point.is_finite(),
			PathSegment::CubicTo(handle_start, handle_end, point) => handle_start.is_finite() && handle_end.is_finite() && point.is_finite(),
			PathSegment::Close => true,
		}
	}
}

/// Rule deciding which points are inside a self-overlapping path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FillRule {
	#[default]
	NonZero,
	EvenOdd,
}

/// A sequence of path segments together with the fill rule that interprets them.
pub trait PathIterator: Iterator<Item = PathSegment> {
	fn fill_rule(&self) -> FillRule;
}

/// Adapts any iterator of segments into a [`PathIterator`] with a fixed fill rule.
#[derive(Clone, Debug)]
pub struct PathSegments<I> {
	segments: I,
	fill_rule: FillRule,
}

impl<I: Iterator<Item = PathSegment>> PathSegments<I> {
	pub fn new(segments: impl IntoIterator<IntoIter = I>, fill_rule: FillRule) -> Self {
		PathSegments { segments: segments.into_iter(), fill_rule }
	}
}

impl<I: Iterator<Item = PathSegment>> Iterator for PathSegments<I> {
	type Item = PathSegment;

	fn next(&mut self) -> Option<PathSegment> {
		self.segments.next()
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		self.segments.size_hint()
	}
}

impl<I: Iterator<Item = PathSegment>> PathIterator for PathSegments<I> {
	fn fill_rule(&self) -> FillRule {
		self.fill_rule
	}
}

/// A [`PathIterator`] whose points are mapped through an optional affine transform.
#[derive(Clone, Debug)]
pub struct TransformedPath<I> {
	inner: I,
	transform: Option<DAffine2>,
}

impl<I: PathIterator> TransformedPath<I> {
	pub fn new(inner: I, transform: Option<DAffine2>) -> Self {
		TransformedPath { inner, transform }
	}
}

impl<I: PathIterator> Iterator for TransformedPath<I> {
	type Item = PathSegment;

	fn next(&mut self) -> Option<PathSegment> {
		let segment = self.inner.next()?;
		Some(match self.transform {
			Some(transform) => segment.map_points(|point| transform.transform_point2(point)),
			None => segment,
		})
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}
}

impl<I: PathIterator> PathIterator for TransformedPath<I> {
	fn fill_rule(&self) -> FillRule {
		self.inner.fill_rule()
	}
}

/// A general path built from segments, usable as a shape.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
	segments: Vec<PathSegment>,
	fill_rule: FillRule,
}

impl Path {
	pub fn new(fill_rule: FillRule) -> Self {
		Path { segments: Vec::new(), fill_rule }
	}

	/// Build a path from existing segments, rejecting anything drawn before the first move.
	pub fn from_segments(segments: impl IntoIterator<Item = PathSegment>, fill_rule: FillRule) -> Result<Self, AreaError> {
		let mut path = Path::new(fill_rule);
		for segment in segments {
			path.push(segment)?;
		}
		Ok(path)
	}

	pub fn push(&mut self, segment: PathSegment) -> Result<&mut Self, AreaError> {
		if !matches!(segment, PathSegment::MoveTo(_)) && self.segments.is_empty() {
			return Err(AreaError::MissingInitialMove);
		}
		self.segments.push(segment);
		Ok(self)
	}

	pub fn move_to(&mut self, point: DVec2) -> &mut Self {
		self.segments.push(PathSegment::MoveTo(point));
		self
	}

	pub fn line_to(&mut self, point: DVec2) -> Result<&mut Self, AreaError> {
		self.push(PathSegment::LineTo(point))
	}

	pub fn quad_to(&mut self, handle: DVec2, point: DVec2) -> Result<&mut Self, AreaError> {
		self.push(PathSegment::QuadTo(handle, point))
	}

	pub fn cubic_to(&mut self, handle_start: DVec2, handle_end: DVec2, point: DVec2) -> Result<&mut Self, AreaError> {
		self.push(PathSegment::CubicTo(handle_start, handle_end, point))
	}

	pub fn close(&mut self) -> Result<&mut Self, AreaError> {
		self.push(PathSegment::Close)
	}

	pub fn fill_rule(&self) -> FillRule {
		self.fill_rule
	}

	pub fn segments(&self) -> &[PathSegment] {
		&self.segments
	}
}

/// Break a path into y-monotonic curves, dropping horizontal pieces and closing every subpath implicitly.
pub(crate) fn path_to_curves(segments: impl Iterator<Item = PathSegment>) -> Result<Vec<Curve>, AreaError> {
	let mut curves = Vec::new();
	let mut subpath_start = None;
	let mut current = DVec2::ZERO;
	for segment in segments {
		if !segment.is_finite() {
			return Err(AreaError::NonFiniteCoordinate);
		}
		if let PathSegment::MoveTo(point) = segment {
			if let Some(start) = subpath_start {
				insert_line(&mut curves, current, start);
			}
			subpath_start = Some(point);
			current = point;
			continue;
		}

		let start = subpath_start.ok_or(AreaError::MissingInitialMove)?;
		match segment {
			PathSegment::LineTo(point) => insert_line(&mut curves, current, point),
			PathSegment::QuadTo(handle, point) => insert_quadratic(&mut curves, current, handle, point),
			PathSegment::CubicTo(handle_start, handle_end, point) => insert_cubic(&mut curves, current, handle_start, handle_end, point),
			PathSegment::Close | PathSegment::MoveTo(_) => insert_line(&mut curves, current, start),
		}
		current = segment.end_point().unwrap_or(start);
	}
	if let Some(start) = subpath_start {
		insert_line(&mut curves, current, start);
	}
	Ok(curves)
}
