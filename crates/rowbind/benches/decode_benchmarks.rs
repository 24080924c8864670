//! Decoding performance benchmarks.
//!
//! Measures end-to-end decoding from CSV text and from pre-split rows.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rowbind::{DecodeOptions, Decoder};

rowbind::record! {
    #[derive(Debug, Default)]
    pub struct Sample {
        pub id: String,
        pub value: f64,
        pub count: u32,
        pub enabled: bool,
        pub category: String,
        pub collected_at: chrono::DateTime<chrono::FixedOffset>,
    }
}

const HEADER: [&str; 6] = ["id", "value", "count", "enabled", "category", "collected_at"];

/// Generate synthetic rows matching `Sample`.
fn generate_rows(rows: usize) -> Vec<Vec<String>> {
    (0..rows)
        .map(|row| {
            vec![
                format!("ID_{:06}", row),
                format!("{:.2}", row as f64 * 1.5),
                (row % 1000).to_string(),
                if row % 2 == 0 { "true" } else { "false" }.to_string(),
                format!("Category_{}", row % 10),
                format!("2023-{:02}-{:02}T08:00:00Z", (row % 12) + 1, (row % 28) + 1),
            ]
        })
        .collect()
}

/// Render rows as CSV text with a header line.
fn generate_csv_data(rows: usize) -> String {
    let mut data = HEADER.join(",");
    data.push('\n');
    for row in generate_rows(rows) {
        data.push_str(&row.join(","));
        data.push('\n');
    }
    data
}

/// Benchmark decoding CSV text of various sizes.
fn bench_decode_str(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_str");
    let decoder = Decoder::<Sample>::with_options(&DecodeOptions::new()).unwrap();

    for rows in [100, 1_000, 10_000].iter() {
        let data = generate_csv_data(*rows);

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            b.iter(|| black_box(decoder.decode_str(data).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark decoding rows that are already split into cells.
fn bench_decode_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_batch");
    let decoder = Decoder::<Sample>::with_options(&DecodeOptions::new()).unwrap();

    for rows in [100, 1_000, 10_000].iter() {
        let data = generate_rows(*rows);

        group.throughput(Throughput::Elements(*rows as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            b.iter(|| black_box(decoder.decode_batch(HEADER, data).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark lenient decoding where every integer cell is malformed.
fn bench_decode_ignored_errors(c: &mut Criterion) {
    let options = DecodeOptions::new().with_ignore_field_type_errors(true);
    let decoder = Decoder::<Sample>::with_options(&options).unwrap();
    let mut data = generate_rows(1_000);
    for row in &mut data {
        row[2] = "n/a".to_string();
    }

    c.bench_function("decode_ignored_errors", |b| {
        b.iter(|| black_box(decoder.decode_batch(HEADER, &data).unwrap()))
    });
}

criterion_group!(
    benches,
    bench_decode_str,
    bench_decode_batch,
    bench_decode_ignored_errors,
);
criterion_main!(benches);
