//! Benchmarks for pipeline execution.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;

use resultflow::core::{FutureResult, ResultExt};
use resultflow::errors::ErrorKind;
use resultflow::pipeline::{CompositionStyle, Pipeline};
use resultflow::testing::Scenario;

fn pipeline_benchmark(c: &mut Criterion) {
    let Ok(runtime) = tokio::runtime::Builder::new_current_thread().enable_all().build() else {
        return;
    };

    let mut group = c.benchmark_group("pipeline");
    for scenario in [Scenario::NonHttpsUrl, Scenario::JsonSuccess, Scenario::HtmlContent] {
        let pipeline = Pipeline::new(Arc::new(scenario.transport()));
        for style in CompositionStyle::ALL {
            group.bench_with_input(
                BenchmarkId::new(style.as_str(), format!("{scenario:?}")),
                &scenario,
                |b, scenario| {
                    b.iter(|| runtime.block_on(pipeline.run(black_box(scenario.url()), style)));
                },
            );
        }
    }
    group.finish();
}

fn combinator_benchmark(c: &mut Criterion) {
    let Ok(runtime) = tokio::runtime::Builder::new_current_thread().build() else {
        return;
    };

    c.bench_function("result_bind_chain", |b| {
        b.iter(|| {
            black_box(Ok::<u64, ErrorKind>(1))
                .bind(|x| Ok(x + 1))
                .bind(|x| Ok(x * 2))
                .map_error(ErrorKind::as_str)
        });
    });

    c.bench_function("future_result_bind_chain", |b| {
        b.iter(|| {
            runtime.block_on(
                FutureResult::<u64, ErrorKind>::ok(black_box(1))
                    .bind(|x| FutureResult::ok(x + 1))
                    .bind(|x| FutureResult::ok(x * 2)),
            )
        });
    });
}

criterion_group!(benches, pipeline_benchmark, combinator_benchmark);
criterion_main!(benches);
