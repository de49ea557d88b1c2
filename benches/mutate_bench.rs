//! Benchmarks for the mutation engine.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mutant_forge::application::MutantOrchestrator;
use mutant_forge::domain::call_profile::CallProfiler;
use mutant_forge::domain::metrics;
use mutant_forge::domain::settings::MutationSettings;
use mutant_forge::infrastructure::{MemorySink, SynBackend};
use mutant_forge::ports::SyntaxBackend;

/// Synthetic program: `routines` small functions, each called from `main`.
fn synthetic_program(routines: usize) -> String {
    let mut source = String::new();
    for i in 0..routines {
        source.push_str(&format!(
            "fn work_{i}(a: i32, b: i32) -> i32 {{\n\
             \x20   let mut acc = a * {i};\n\
             \x20   if a > b && b != 0 {{\n\
             \x20       acc += b - 1;\n\
             \x20   }}\n\
             \x20   log(acc);\n\
             \x20   acc / 2\n\
             }}\n"
        ));
    }
    source.push_str("fn log(_v: i32) {}\nfn main() {\n");
    for i in 0..routines {
        for _ in 0..=(i % 3) {
            source.push_str(&format!("    work_{i}(1, 2);\n"));
        }
    }
    source.push_str("}\n");
    source
}

fn bench_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis");
    for routines in [10usize, 100, 500] {
        let tree = SynBackend.parse(&synthetic_program(routines)).unwrap();
        group.bench_with_input(BenchmarkId::new("measure", routines), &tree, |b, tree| {
            b.iter(|| metrics::measure(black_box(tree)))
        });
        group.bench_with_input(BenchmarkId::new("profile", routines), &tree, |b, tree| {
            b.iter(|| CallProfiler::profile(black_box(tree)))
        });
    }
    group.finish();
}

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation");
    group.sample_size(20);
    let backend = SynBackend;
    let tree = backend.parse(&synthetic_program(50)).unwrap();
    for count in [5usize, 25] {
        group.bench_with_input(BenchmarkId::new("mutants", count), &count, |b, &count| {
            b.iter(|| {
                let orchestrator =
                    MutantOrchestrator::new(&backend, MutationSettings::default()).unwrap();
                let mut sink = MemorySink::default();
                orchestrator.run(black_box(&tree), count, &mut sink).unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_analysis, bench_generation);
criterion_main!(benches);
