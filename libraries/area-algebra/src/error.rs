use thiserror::Error;

/// Failure of a path decomposition or of a boolean operation.
///
/// Operations on an [`Area`](crate::Area) that return an error leave the area unchanged.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum AreaError {
	#[error("Path segment appended before an initial move")]
	MissingInitialMove,
	#[error("Path contains a non-finite coordinate")]
	NonFiniteCoordinate,
	#[error("Transform is not invertible (determinant {determinant})")]
	NonInvertibleTransform { determinant: f64 },
	#[error("Sweep range backstepped from y = {from} to y = {to}")]
	Backstepping { from: f64, to: f64 },
	#[error("Curve bisection made no parametric progress")]
	NoParametricProgress,
	#[error("Chain end was linked more than once")]
	ChainEndRelinked,
	#[error("Attempted to link two chain ends of the same polarity")]
	SamePolarityLink,
	#[error("Chain end polarity does not match the boundary piece appended to it")]
	PolarityMismatch,
	#[error("Open chain end has no partner")]
	MissingPartner,
	#[error("Odd number of open chain ends ({0})")]
	OddChainCount(usize),
	#[error("Odd number of boundary pieces in a sweep row ({0})")]
	OddLinkCount(usize),
	#[error("Boundary piece [{y_top}, {y_bot}] lies outside of its curve [{curve_top}, {curve_bot}]")]
	CurveLinkOutOfRange { y_top: f64, y_bot: f64, curve_top: f64, curve_bot: f64 },
	#[error("Chain of boundary pieces does not terminate")]
	CyclicChain,
	#[error("Sweep finished with {0} unresolved chain ends")]
	UnresolvedChains(usize),
}

impl AreaError {
	/// Whether the error reports an inconsistency of the sweep itself rather than malformed input.
	pub fn is_internal(&self) -> bool {
		!matches!(self, AreaError::MissingInitialMove | AreaError::NonFiniteCoordinate | AreaError::NonInvertibleTransform { .. })
	}
}
