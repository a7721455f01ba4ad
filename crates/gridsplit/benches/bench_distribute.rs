use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use gridsplit::{Config, PathSplitter, Point, Polyline};

fn grid_config(numx: i64, numy: i64) -> Config {
    Config {
        use_origin: false,
        origin: Point::ZERO,
        displacement: Point::new(100, 100),
        margin: 10,
        min: Point::new(0, 0),
        max: Point::new(100 * numx, 100 * numy),
        zmin: 0.0,
        wall_angle_deg: 90.0,
        apply_motion_planning: false,
    }
}

fn zigzag_path(numx: i64, numy: i64, points_per_cell: i64) -> Polyline {
    let mut points = Vec::new();
    let total_x = 100 * numx;
    let n = (numx * points_per_cell).max(2);
    for i in 0..=n {
        let x = total_x * i / n;
        let y = if i % 2 == 0 { 5 } else { 100 * numy - 5 };
        points.push(Point::new(x, y));
    }
    Polyline::new(points)
}

pub fn bench_distribute(c: &mut Criterion) {
    let mut group = c.benchmark_group("distribute");

    for grid_size in [(2, 1), (4, 4), (8, 8)] {
        let (numx, numy) = grid_size;
        let config = grid_config(numx, numy);
        let path = zigzag_path(numx, numy, 20);
        let closed = vec![false];

        group.bench_function(format!("grid_{numx}x{numy}"), |b| {
            b.iter_batched(
                || PathSplitter::new(config.clone()),
                |mut splitter| {
                    splitter
                        .process_paths(&[path.clone()], &closed, 0.0, 1.0)
                        .unwrap();
                },
                BatchSize::SmallInput,
            );
        });
    }
}

criterion_group!(benches, bench_distribute);
criterion_main!(benches);
