#[macro_use]
extern crate criterion;
extern crate mandelsweep;

use criterion::Criterion;
use mandelsweep::{step_all, PlaneMapper, PointGrid, ViewTransform, ESCAPE_THRESHOLD};

fn bench_step_all(c: &mut Criterion) {
    let mapper = PlaneMapper::new(128, 128, &ViewTransform::default()).unwrap();
    c.bench_function("step_all 128x128, 8 ticks", move |b| {
        b.iter_with_setup(
            || PointGrid::new(&mapper),
            |mut grid| {
                for _ in 0..8 {
                    step_all(grid.points_mut(), ESCAPE_THRESHOLD);
                }
                grid
            },
        )
    });
}

criterion_group!(benches, bench_step_all);
criterion_main!(benches);
