// Curve comparison
/// Parameter span below which intersection bisection stops and the remaining pieces are solved as straight lines.
pub const T_MIN: f64 = 1e-3;
/// Two x coordinates closer than this fraction of their magnitude are treated as the same position.
pub const FAIRLY_CLOSE_RATIO: f64 = 1e-10;
/// Smallest probe step, relative to the magnitude of the compared y range, used while two curves stay coincident.
pub const Y_SCALE_EPSILON: f64 = 1e-14;
/// Floor of the smallest probe step, for y ranges near zero.
pub const Y_MIN_ABSOLUTE: f64 = 1e-300;
/// Upper bound of a coincidence probe step as a multiple of the smallest step.
pub const MAX_BUMP_RATIO: f64 = 1e13;
/// Upper bound of a coincidence probe step as a fraction of the compared y range.
pub const MAX_BUMP_RANGE_FRACTION: f64 = 0.1;

// Cubic root refinement
/// Cubic roots found further than this outside of `[0, 1]` are rejected before refinement.
pub const ROOT_REFINE_MARGIN: f64 = 0.1;

// Shapes
/// Control handle distance, as a fraction of the radius, for a cubic approximating a quarter circle.
pub const ELLIPSE_CONTROL_RATIO: f64 = 0.5522847498307933;
