//! Criterion benchmarks for glyphgrid critical paths
//!
//! Benchmarks the core operations:
//! - Reader: record parsing from a text stream
//! - Transforms: rotation, replication and fixed-point interpolation
//! - Render: text output

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use glyphgrid::grid::{Capacity, Grid, Symbol};
use glyphgrid::reader::RecordReader;
use glyphgrid::render::{render_text, SymbolSet};
use glyphgrid::transforms::{interpolate, replicate, rotate90};
use std::io::Cursor;

// =============================================================================
// Test Data Generators
// =============================================================================

/// Checkerboard-ish grid with a diagonal stripe
fn make_grid(rows: usize, cols: usize) -> Grid {
    let cells = (0..rows * cols)
        .map(|i| {
            let (r, c) = (i / cols, i % cols);
            if (r + c) % 3 == 0 || r == c {
                Symbol::Marked
            } else {
                Symbol::Blank
            }
        })
        .collect();
    Grid::from_flat(rows, cols, cells, Capacity::default()).expect("bench grid fits")
}

/// Input text holding `count` records of `rows x cols`
fn make_input(count: usize, rows: usize, cols: usize) -> String {
    let mut out = String::new();
    for k in 0..count {
        out.push_str(&format!("{} {}\n", rows, cols));
        for r in 0..rows {
            let row: Vec<&str> =
                (0..cols).map(|c| if (r + c + k) % 2 == 0 { "1" } else { "0" }).collect();
            out.push_str(&row.join(" "));
            out.push('\n');
        }
    }
    out
}

// =============================================================================
// Reader Benchmarks
// =============================================================================

fn bench_reader(c: &mut Criterion) {
    let mut group = c.benchmark_group("reader");

    for (count, rows, cols) in [(10, 8, 8), (100, 8, 8), (10, 50, 50)].iter() {
        let content = make_input(*count, *rows, *cols);
        let name = format!("read_{}x{}x{}", count, rows, cols);

        group.throughput(Throughput::Bytes(content.len() as u64));
        group.bench_function(&name, |b| {
            b.iter(|| {
                let reader = RecordReader::new(Cursor::new(black_box(&content)), Capacity::default());
                reader.filter_map(Result::ok).count()
            })
        });
    }

    group.finish();
}

// =============================================================================
// Transform Benchmarks
// =============================================================================

fn bench_transforms(c: &mut Criterion) {
    let mut group = c.benchmark_group("transforms");

    for size in [8usize, 16, 25].iter() {
        let grid = make_grid(*size, *size);
        group.throughput(Throughput::Elements((size * size) as u64));

        group.bench_with_input(BenchmarkId::new("rotate90", size), &grid, |b, grid| {
            b.iter(|| rotate90(black_box(grid)))
        });
        group.bench_with_input(BenchmarkId::new("replicate_2x", size), &grid, |b, grid| {
            b.iter(|| replicate(black_box(grid), 2))
        });
        group.bench_with_input(BenchmarkId::new("interpolate_2x", size), &grid, |b, grid| {
            b.iter(|| interpolate(black_box(grid), size * 2, size * 2))
        });
    }

    // Non-integer ratios
    let grid = make_grid(17, 23);
    group.bench_function("interpolate_17x23_to_50x41", |b| {
        b.iter(|| interpolate(black_box(&grid), 50, 41))
    });

    group.finish();
}

// =============================================================================
// Render Benchmarks
// =============================================================================

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let symbols = SymbolSet::default();

    for size in [8usize, 50].iter() {
        let grid = make_grid(*size, *size);
        group.bench_with_input(BenchmarkId::new("render_text", size), &grid, |b, grid| {
            b.iter(|| render_text(black_box(grid), &symbols))
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(benches, bench_reader, bench_transforms, bench_render);

criterion_main!(benches);
