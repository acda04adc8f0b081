use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sticky_todo::{Document, EditorSession, LineRange, LineStatuses, Position, Settings, StatusKey};

/// Generate a todo list with every third line tagged
fn generate_document(lines: usize) -> Document {
    let text = (0..lines)
        .map(|i| format!("task {} - follow up on item {}", i, i * 7))
        .collect::<Vec<_>>()
        .join("\n");

    let line_status: LineStatuses = (1..=lines)
        .step_by(3)
        .map(|line| (line, StatusKey::ALL[line % StatusKey::ALL.len()]))
        .collect();

    Document::new(text, line_status, Settings::default())
}

/// Benchmark collecting the sparse status map at save time
fn bench_collect_line_statuses(c: &mut Criterion) {
    let sizes = vec![100, 1_000, 10_000];

    let mut group = c.benchmark_group("collect_line_statuses");

    for &size in &sizes {
        let mut session = EditorSession::new();
        session.load_document(&generate_document(size));

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("lines", size), &session, |b, session| {
            b.iter(|| black_box(session.collect_line_statuses()))
        });
    }

    group.finish();
}

/// Benchmark loading a persisted document into a session
fn bench_load_document(c: &mut Criterion) {
    let sizes = vec![100, 1_000, 10_000];

    let mut group = c.benchmark_group("load_document");

    for &size in &sizes {
        let document = generate_document(size);

        group.throughput(Throughput::Bytes(document.text.len() as u64));
        group.bench_with_input(BenchmarkId::new("lines", size), &document, |b, document| {
            b.iter(|| {
                let mut session = EditorSession::new();
                session.load_document(black_box(document));
                black_box(session)
            })
        });
    }

    group.finish();
}

/// Benchmark typing a new line at the top of a tagged list
fn bench_insert_above_tags(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_above_tags");

    for &size in &[1_000, 10_000] {
        let mut base = EditorSession::new();
        base.load_document(&generate_document(size));

        group.bench_with_input(BenchmarkId::new("lines", size), &base, |b, base| {
            b.iter(|| {
                let mut session = base.clone();
                session.insert(Position::new(1, 0), "new task\n");
                session.set_line_status(LineRange::single(1), StatusKey::Blue);
                black_box(session.collect_line_statuses())
            })
        });
    }

    group.finish();
}

/// Benchmark serializing the state file
fn bench_serialize_state(c: &mut Criterion) {
    let document = generate_document(10_000);

    c.bench_function("serialize_state_10000", |b| {
        b.iter(|| black_box(document.to_json()))
    });
}

criterion_group!(
    benches,
    bench_collect_line_statuses,
    bench_load_document,
    bench_insert_above_tags,
    bench_serialize_state
);
criterion_main!(benches);
