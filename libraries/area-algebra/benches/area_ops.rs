use area_algebra::{Area, Ellipse, Polygon, Rect};
use criterion::{Criterion, criterion_group, criterion_main};
use glam::DVec2;
use std::hint::black_box;

pub fn criterion_benchmark(crit: &mut Criterion) {
	let (square, offset_square) = (rect(0., 0., 100., 100.), rect(50., 50., 100., 100.));
	let (circle, offset_circle) = (circle(0., 0., 80.), circle(60., 20., 80.));
	let star = Area::from_shape(&star(DVec2::new(50., 50.), 60., 12)).unwrap();

	crit.bench_function("union rects", |bench| bench.iter(|| combine(black_box(&square), black_box(&offset_square), Area::add)));
	crit.bench_function("intersect circles", |bench| bench.iter(|| combine(black_box(&circle), black_box(&offset_circle), Area::intersect)));
	crit.bench_function("subtract star from circle", |bench| bench.iter(|| combine(black_box(&circle), black_box(&star), Area::subtract)));
	crit.bench_function("xor circle with rect", |bench| bench.iter(|| combine(black_box(&offset_circle), black_box(&square), Area::exclusive_or)));
	crit.bench_function("normalize star", |bench| bench.iter(|| Area::from_shape(black_box(&star(DVec2::new(50., 50.), 60., 12)))));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

fn combine(a: &Area, b: &Area, operation: fn(&mut Area, &Area) -> Result<(), area_algebra::AreaError>) -> Area {
	let mut result = a.clone();
	operation(&mut result, b).unwrap();
	result
}

fn rect(x: f64, y: f64, width: f64, height: f64) -> Area {
	Area::from_shape(&Rect::new(x, y, width, height)).unwrap()
}

fn circle(x: f64, y: f64, diameter: f64) -> Area {
	Area::from_shape(&Ellipse::new(x, y, diameter, diameter)).unwrap()
}

/// A self-intersecting star drawn by joining every fifth vertex of a regular polygon.
fn star(center: DVec2, radius: f64, points: usize) -> Polygon {
	let vertex = |index: usize| center + radius * DVec2::from_angle(std::f64::consts::TAU * (index * 5 % points) as f64 / points as f64);
	Polygon::new((0..points).map(vertex))
}
