use crate::curve::{Curve, Direction};
use crate::error::AreaError;

use std::cmp::Ordering;

/// Which operand of a boolean operation a curve came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CurveTag {
	Left,
	Right,
}

/// Role of a boundary piece in the result: it enters the result going right, exits it, or is not part of it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeTag {
	Enter,
	Exit,
	Ignore,
}

impl EdgeTag {
	/// Traversal direction of result boundary pieces carrying this tag.
	pub fn direction(self) -> Direction {
		match self {
			EdgeTag::Enter => Direction::Increasing,
			EdgeTag::Exit | EdgeTag::Ignore => Direction::Decreasing,
		}
	}
}

/// Result of the last comparison an edge initiated, valid for bands starting in `[valid_from, limit)`.
#[derive(Clone, Copy, Debug)]
struct ComparisonCache {
	other: usize,
	result: Ordering,
	valid_from: f64,
	limit: f64,
}

/// A curve taking part in a sweep, together with its per-sweep bookkeeping.
#[derive(Clone, Debug)]
pub struct Edge {
	pub curve: Curve,
	pub curve_tag: CurveTag,
	/// Tag of the last boundary piece recorded for this edge.
	edge_tag: EdgeTag,
	/// Height down to which the last recorded boundary piece reaches.
	active_y: f64,
	/// Non-zero id shared by the edges found to coincide in the current row.
	pub equivalence: usize,
	last_comparison: Option<ComparisonCache>,
}

impl Edge {
	pub fn new(curve: Curve, curve_tag: CurveTag) -> Self {
		Edge {
			curve,
			curve_tag,
			edge_tag: EdgeTag::Ignore,
			active_y: f64::NEG_INFINITY,
			equivalence: 0,
			last_comparison: None,
		}
	}

	/// Remember that this edge contributed a boundary piece with `edge_tag` reaching down to `y_end`.
	pub fn record(&mut self, y_end: f64, edge_tag: EdgeTag) {
		self.active_y = y_end;
		self.edge_tag = edge_tag;
	}

	/// Whether the last recorded piece has `edge_tag` and reaches down to at least `y`, so the edge can keep extending it.
	pub fn is_active_for(&self, y: f64, edge_tag: EdgeTag) -> bool {
		self.edge_tag == edge_tag && self.active_y >= y
	}
}

/// Order `edges[this]` against `edges[other]` within `y_range`, narrowing it like [`Curve::ordered_compare_to`].
///
/// The result is cached on `this` and reused, from either side of the pair, while later bands start inside the
/// range the cached order was proven for.
pub fn compare_edges(edges: &mut [Edge], this: usize, other: usize, y_range: &mut [f64; 2]) -> Result<Ordering, AreaError> {
	if let Some(cache) = edges[this].last_comparison {
		if cache.other == other && y_range[0] >= cache.valid_from && y_range[0] < cache.limit {
			y_range[1] = y_range[1].min(cache.limit);
			return Ok(cache.result);
		}
	}
	if let Some(cache) = edges[other].last_comparison {
		if cache.other == this && y_range[0] >= cache.valid_from && y_range[0] < cache.limit {
			y_range[1] = y_range[1].min(cache.limit);
			return Ok(cache.result.reverse());
		}
	}

	let valid_from = y_range[0];
	let result = edges[this].curve.ordered_compare_to(&edges[other].curve, y_range)?;
	edges[this].last_comparison = Some(ComparisonCache {
		other,
		result,
		valid_from,
		limit: y_range[1],
	});
	Ok(result)
}
