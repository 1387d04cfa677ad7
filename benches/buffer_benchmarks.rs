//! Benchmarks for buffer, history and search operations.
//!
//! Run with: cargo bench

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use vix_buffer::{History, Position, TextBuffer, next_word_boundary};
use vix_core::SearchEngine;

/// Generates lines of sample text for benchmarking.
fn generate_lines(lines: usize) -> Vec<String> {
    (0..lines)
        .map(|i| format!("Line {}: This is a sample line of text for benchmarking purposes.", i))
        .collect()
}

/// Benchmarks buffer creation.
fn bench_buffer_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer_creation");

    for size in [100, 1000, 10000, 100000].iter() {
        let lines = generate_lines(*size);

        group.bench_with_input(BenchmarkId::new("from_lines", size), &lines, |b, lines| {
            b.iter(|| {
                let buffer = TextBuffer::from(black_box(lines.clone()));
                black_box(buffer)
            })
        });
    }

    group.finish();
}

/// Benchmarks structural line edits at various positions.
fn bench_line_edits(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_edits");

    let base = generate_lines(10000);

    group.bench_function("insert_line_at_start", |b| {
        b.iter_with_setup(
            || TextBuffer::from(base.clone()),
            |mut buffer| {
                buffer.insert_line(0, black_box("inserted line")).unwrap();
                black_box(buffer)
            },
        )
    });

    group.bench_function("insert_line_at_middle", |b| {
        b.iter_with_setup(
            || TextBuffer::from(base.clone()),
            |mut buffer| {
                let mid = buffer.len_lines() / 2;
                buffer.insert_line(mid, black_box("inserted line")).unwrap();
                black_box(buffer)
            },
        )
    });

    group.bench_function("delete_line_at_middle", |b| {
        b.iter_with_setup(
            || TextBuffer::from(base.clone()),
            |mut buffer| {
                let mid = buffer.len_lines() / 2;
                black_box(buffer.delete_line(mid).unwrap());
                black_box(buffer)
            },
        )
    });

    group.bench_function("insert_char_end_of_line", |b| {
        b.iter_with_setup(
            || TextBuffer::from(base.clone()),
            |mut buffer| {
                let len = buffer.line_len(5000).unwrap();
                buffer
                    .insert_char(Position::new(5000, len), black_box('x'))
                    .unwrap();
                black_box(buffer)
            },
        )
    });

    group.finish();
}

/// Benchmarks undo/redo operations.
fn bench_undo_redo(c: &mut Criterion) {
    let mut group = c.benchmark_group("undo_redo");

    group.bench_function("record_and_undo_100", |b| {
        b.iter_with_setup(
            || (TextBuffer::from(generate_lines(100)), History::new(1000)),
            |(mut buffer, mut history)| {
                for line in 0..100 {
                    history.record_change(&buffer, line).unwrap();
                    buffer.set_line(line, "changed").unwrap();
                }
                while history.undo(&mut buffer).unwrap().is_some() {}
                black_box(buffer)
            },
        )
    });

    group.finish();
}

/// Benchmarks word motion across a line.
fn bench_word_motion(c: &mut Criterion) {
    let line = "fn main() { let value = compute(alpha, beta_gamma) + 42; }".repeat(8);

    c.bench_function("next_word_boundary_full_line", |b| {
        b.iter(|| {
            let mut column = 0;
            let mut steps = 0;
            while let vix_buffer::Boundary::Column(next) = next_word_boundary(black_box(&line), column) {
                column = next;
                steps += 1;
            }
            black_box(steps)
        })
    });
}

/// Benchmarks search operations.
fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    let mut lines = generate_lines(10000);
    lines[9000] = "the needle is here".to_string();
    let buffer = TextBuffer::from(lines);

    group.bench_function("search_forward_far_match", |b| {
        b.iter(|| {
            let mut search = SearchEngine::new();
            black_box(search.search_forward(&buffer, black_box("needle"), Position::ZERO))
        })
    });

    group.bench_function("search_forward_not_found", |b| {
        b.iter(|| {
            let mut search = SearchEngine::new();
            black_box(search.search_forward(&buffer, black_box("absent"), Position::ZERO))
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_buffer_creation,
    bench_line_edits,
    bench_undo_redo,
    bench_word_motion,
    bench_search,
);
criterion_main!(benches);
