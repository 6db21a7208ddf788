use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use meridian_driver::{Color, InstanceAccessors, WebMercator, build, orientation_from_vertices};
use meridian_types::{Coordinate, GridPoint};

#[allow(clippy::cast_precision_loss)]
fn points(count: usize) -> Vec<GridPoint> {
    (0..count)
        .map(|i| GridPoint::new(-74.0 + (i % 100) as f64 * 0.01, 40.5 + (i / 100) as f64 * 0.01))
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_attributes");
    let accessors = InstanceAccessors::grid_points()
        .with_elevation(|p: &GridPoint| p.position.lat * 10.0)
        .with_color(|p: &GridPoint| if p.position.lon < -73.5 { Color::rgb(0, 90, 200) } else { Color::default() });

    for count in [1_000, 10_000, 100_000] {
        let data = points(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &data, |b, data| {
            b.iter(|| build(data, &accessors));
        });
    }

    group.finish();
}

fn bench_orientation(c: &mut Criterion) {
    let vertices = [
        Coordinate::new(0.5, 0.0),
        Coordinate::new(0.25, 0.433),
        Coordinate::new(-0.25, 0.433),
        Coordinate::new(-0.5, 0.0),
    ];
    let projection = WebMercator::new(10.0);

    c.bench_function("orientation_web_mercator", |b| {
        b.iter(|| orientation_from_vertices(&vertices, &projection, 0.8).unwrap());
    });
}

criterion_group!(benches, bench_build, bench_orientation);
criterion_main!(benches);
