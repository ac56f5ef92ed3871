use area_algebra::{Area, Chain, Rect};
use glam::DVec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const GRID: i32 = 12;

fn random_rects(rng: &mut StdRng, count: usize) -> Vec<Rect> {
	(0..count)
		.map(|_| {
			let (x, y) = (rng.random_range(0..GRID - 1), rng.random_range(0..GRID - 1));
			let (width, height) = (rng.random_range(1..=GRID - x), rng.random_range(1..=GRID - y));
			Rect::new(x as f64, y as f64, width as f64, height as f64)
		})
		.collect()
}

/// Cell centres never sit on a boundary, so containment is unambiguous there.
fn cell_centres() -> impl Iterator<Item = DVec2> {
	(0..GRID).flat_map(|x| (0..GRID).map(move |y| DVec2::new(x as f64 + 0.5, y as f64 + 0.5)))
}

#[test]
fn unions_cover_exactly_their_inputs() {
	let _ = env_logger::builder().is_test(true).try_init();
	let mut rng = StdRng::seed_from_u64(0x5eed);

	for round in 0..40 {
		let rects = random_rects(&mut rng, 6);
		let mut union = Area::new();
		for rect in &rects {
			union.add(&Area::from_shape(rect).unwrap()).unwrap();
		}

		assert!(union.is_polygonal());
		assert!(union.chains().iter().all(Chain::is_closed), "round {round}: {rects:?}");
		for centre in cell_centres() {
			let expected = rects.iter().any(|rect| rect.contains(centre));
			assert_eq!(union.contains(centre), expected, "round {round} at {centre}: {rects:?}");
		}
	}
}

#[test]
fn operations_agree_with_cell_membership() {
	let _ = env_logger::builder().is_test(true).try_init();
	let mut rng = StdRng::seed_from_u64(42);

	for round in 0..40 {
		let rects = random_rects(&mut rng, 4);
		let left = {
			let mut area = Area::from_shape(&rects[0]).unwrap();
			area.add(&Area::from_shape(&rects[1]).unwrap()).unwrap();
			area
		};
		let right = {
			let mut area = Area::from_shape(&rects[2]).unwrap();
			area.exclusive_or(&Area::from_shape(&rects[3]).unwrap()).unwrap();
			area
		};

		let in_left = |point: DVec2| rects[0].contains(point) || rects[1].contains(point);
		let in_right = |point: DVec2| rects[2].contains(point) != rects[3].contains(point);
		let cases: [(fn(&mut Area, &Area) -> Result<(), area_algebra::AreaError>, fn(bool, bool) -> bool); 4] = [
			(Area::add, |a, b| a || b),
			(Area::intersect, |a, b| a && b),
			(Area::subtract, |a, b| a && !b),
			(Area::exclusive_or, |a, b| a != b),
		];

		for (index, (operation, rule)) in cases.into_iter().enumerate() {
			let mut result = left.clone();
			operation(&mut result, &right).unwrap();
			assert!(result.chains().iter().all(Chain::is_closed));
			for centre in cell_centres() {
				assert_eq!(result.contains(centre), rule(in_left(centre), in_right(centre)), "round {round}, operation {index} at {centre}: {rects:?}");
			}
		}
	}
}
