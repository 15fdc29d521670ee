use criterion::{criterion_group, criterion_main};

use solve::{bench_cells, bench_solve};

criterion_group!(benches_solve, bench_solve, bench_cells);
criterion_main!(benches_solve);
