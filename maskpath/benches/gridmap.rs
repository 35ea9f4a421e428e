use criterion::{black_box, criterion_group, criterion_main, Criterion};
use maskpath::{astar, util::default_endpoints, Graph, Grid, Point, SearchConfig};

/// A serpentine maze: horizontal walls every fourth row, each with a single
/// gap alternating between the left and the right end.
fn serpentine(rows: usize, columns: usize) -> Grid {
    let mut grid = Grid::filled(rows, columns, 225).unwrap();

    for col in 0..columns {
        grid.set(Point::new(0, col), 0);
        grid.set(Point::new(rows - 1, col), 0);
    }
    for row in 0..rows {
        grid.set(Point::new(row, 0), 0);
        grid.set(Point::new(row, columns - 1), 0);
    }

    for (i, row) in (4..rows - 2).step_by(4).enumerate() {
        let gap = if i % 2 == 0 { columns - 3 } else { 2 };
        for col in 1..columns - 1 {
            if col.abs_diff(gap) > 1 {
                grid.set(Point::new(row, col), 0);
            }
        }
    }

    grid
}

fn bench_build(c: &mut Criterion, factor: usize) {
    let mut grid = serpentine(64, 64);
    grid.scale_up(factor).unwrap();

    c.bench_function(&format!("build_scaled_{}", factor), |b| {
        b.iter(|| Graph::build(black_box(&grid)))
    });
}

fn bench_map_scaled(c: &mut Criterion, factor: usize) {
    let mut grid = serpentine(64, 64);
    let (mut start, mut goal) = default_endpoints(&grid);

    grid.scale_up(factor).unwrap();
    start.row *= factor;
    start.col *= factor;
    goal.row *= factor;
    goal.col *= factor;

    let graph = Graph::build(&grid);
    let config = SearchConfig::default();

    c.bench_function(&format!("map_scaled_{}", factor), |b| {
        b.iter(|| {
            let res = astar(&graph, black_box(start), black_box(goal), &config);
            assert!(res.is_ok());
        })
    });
}

pub fn map_small(c: &mut Criterion) {
    bench_build(c, 1);
    bench_map_scaled(c, 1);
}

pub fn map_medium(c: &mut Criterion) {
    bench_build(c, 2);
    bench_map_scaled(c, 2);
}

pub fn map_large(c: &mut Criterion) {
    bench_build(c, 4);
    bench_map_scaled(c, 4);
}

criterion_group!(benches, map_small, map_medium, map_large);
criterion_main!(benches);
