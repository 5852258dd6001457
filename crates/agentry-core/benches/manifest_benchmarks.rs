//! Manifest scanner benchmarks
//!
//! Scanning runs on every file-based resolution, so it sits on the
//! startup path of `run` with file arguments.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use agentry_core::manifest::scan_source;

fn synthetic_manifest(impl_count: usize) -> String {
    let mut source = String::from("//! generated fixture\n\n");
    for i in 0..impl_count {
        source.push_str(&format!(
            "pub struct Component{i};\n\nimpl Environment for Component{i} {{\n}}\n\n"
        ));
    }
    source.push_str("impl Agent for Walker {}\n");
    source
}

fn bench_scan_source(c: &mut Criterion) {
    let mut group = c.benchmark_group("manifest_scan");

    for impl_count in [1usize, 16, 128] {
        let source = synthetic_manifest(impl_count);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(impl_count),
            &source,
            |b, source| {
                b.iter(|| scan_source(black_box(source)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_scan_source);
criterion_main!(benches);
