use area_algebra::{Area, AreaError, Chain, Ellipse, PathSegment};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_ellipse(rng: &mut StdRng) -> Area {
	let (x, y) = (rng.random_range(0. ..60.), rng.random_range(0. ..60.));
	let (width, height) = (rng.random_range(5. ..40.), rng.random_range(5. ..40.));
	Area::from_shape(&Ellipse::new(x, y, width, height)).unwrap()
}

/// Every line in the boundary output moves the pen somewhere new.
fn assert_no_zero_length_lines(area: &Area) {
	let mut pen = None;
	for segment in area.path_iter(None) {
		if let PathSegment::LineTo(point) = segment {
			assert_ne!(pen, Some(point), "zero length line in {area:?}");
		}
		if let Some(point) = segment.end_point() {
			pen = Some(point);
		}
	}
}

#[test]
fn curved_results_are_closed() {
	let _ = env_logger::builder().is_test(true).try_init();
	let mut rng = StdRng::seed_from_u64(0xe111);
	let operations: [fn(&mut Area, &Area) -> Result<(), AreaError>; 4] = [Area::add, Area::intersect, Area::subtract, Area::exclusive_or];

	for round in 0..300 {
		let (left, right) = (random_ellipse(&mut rng), random_ellipse(&mut rng));
		for (index, operation) in operations.iter().enumerate() {
			let mut result = left.clone();
			operation(&mut result, &right).unwrap();
			for chain in result.chains() {
				assert!(chain.is_closed(), "round {round}, operation {index}: {chain:?}");
				assert_eq!(chain.start(), chain.curves()[0].start());
			}
			assert_no_zero_length_lines(&result);
		}
	}
}

#[test]
fn intersection_of_skewed_ellipses_starts_on_its_boundary() {
	let _ = env_logger::builder().is_test(true).try_init();
	let mut lens = Area::from_shape(&Ellipse::new(50.0131, 26.1683, 17.0090, 31.2341)).unwrap();
	lens.intersect(&Area::from_shape(&Ellipse::new(24.2252, 45.9808, 37.1995, 29.5266)).unwrap()).unwrap();

	assert!(!lens.is_empty());
	assert!(lens.chains().iter().all(Chain::is_closed));
	let segments: Vec<_> = lens.path_iter(None).take(2).collect();
	assert!(matches!(segments[..], [PathSegment::MoveTo(_), PathSegment::CubicTo(..)]), "{segments:?}");
}
