#![allow(clippy::all)]
//! Benchmarks for the edge gate.
//!
//! Tests: asset classification, address encoding, query parsing, log
//! redaction, and full decisions against in-memory stores.

mod common;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::sync::Arc;

use common::generators;
use common::harness::{bench_runtime, bench_runtime_single, BenchSizes};
use edge_gate::config::GateConfig;
use edge_gate::modules::access_control::{
    encode_ipv4, AccessDecisionEngine, AssetClassifier, EdgeRequest, MemoryAllowList,
    MemorySecretStore, QueryParams, DEFAULT_SECRET_PARAMETER,
};
use edge_gate::modules::logging::Redactor;

fn engine_with_list(size: usize) -> AccessDecisionEngine {
    let config = GateConfig::default();
    let addresses = generators::ipv4_addresses(size);
    AccessDecisionEngine::new(
        &config.gate,
        &config.allow_list,
        &config.secret,
        Arc::new(MemoryAllowList::from_addresses(&addresses).unwrap()),
        Arc::new(MemorySecretStore::with_parameter(
            DEFAULT_SECRET_PARAMETER,
            "letmein",
        )),
    )
}

// ---------------------------------------------------------------------------
// Pure stages
// ---------------------------------------------------------------------------

fn bench_classifier(c: &mut Criterion) {
    let mut group = c.benchmark_group("access_control/classifier");
    let classifier = AssetClassifier::default();
    let paths = generators::request_paths();

    group.bench_function("classify_mixed_paths", |b| {
        b.iter(|| {
            for path in &paths {
                black_box(classifier.classify(path));
            }
        });
    });

    group.finish();
}

fn bench_encoder(c: &mut Criterion) {
    let mut group = c.benchmark_group("access_control/encoder");
    let addresses = generators::ipv4_addresses(BenchSizes::SMALL);

    group.bench_function("encode_valid", |b| {
        b.iter(|| {
            for address in &addresses {
                black_box(encode_ipv4(address).unwrap());
            }
        });
    });

    group.bench_function("encode_rejects_ipv6", |b| {
        b.iter(|| black_box(encode_ipv4("2001:db8::1").is_err()));
    });

    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("access_control/query");
    let queries = generators::query_strings();
    let redactor = Redactor::new(["ipr"]).unwrap();

    group.bench_function("lookup_override_param", |b| {
        b.iter(|| {
            for query in &queries {
                black_box(QueryParams::parse(query).lookup("ipr"));
            }
        });
    });

    group.bench_function("redact_query", |b| {
        b.iter(|| {
            for query in &queries {
                black_box(redactor.redact_query(query));
            }
        });
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Full decision path
// ---------------------------------------------------------------------------

fn bench_decide(c: &mut Criterion) {
    let mut group = c.benchmark_group("access_control/decide");
    let rt = bench_runtime_single();

    for size in [BenchSizes::SMALL, BenchSizes::MEDIUM, BenchSizes::LARGE] {
        let engine = engine_with_list(size);
        let listed = generators::ipv4_addresses(size)[size / 2].clone();

        group.bench_with_input(BenchmarkId::new("allow_listed", size), &size, |b, _| {
            let request = EdgeRequest::new(listed.as_str(), "/index.html", "");
            b.to_async(&rt).iter(|| engine.decide(black_box(&request)));
        });
    }

    let engine = engine_with_list(BenchSizes::MEDIUM);
    for (name, path, query) in [
        ("asset", "/styles/app.css", ""),
        ("override_accepted", "/", "ipr=letmein"),
        ("override_mismatch", "/", "ipr=wrong"),
        ("restricted_no_token", "/index.html", "utm_source=mail"),
    ] {
        let request = EdgeRequest::new("8.8.8.8", path, query);
        group.bench_function(name, |b| {
            b.to_async(&rt).iter(|| engine.decide(black_box(&request)));
        });
    }

    group.finish();
}

fn bench_concurrent_decisions(c: &mut Criterion) {
    let mut group = c.benchmark_group("access_control/concurrent");
    let rt = bench_runtime();
    let engine = Arc::new(engine_with_list(BenchSizes::MEDIUM));
    let addresses = generators::ipv4_addresses(BenchSizes::MEDIUM);

    for tasks in [16usize, 256] {
        group.bench_with_input(BenchmarkId::new("handle", tasks), &tasks, |b, &tasks| {
            b.to_async(&rt).iter(|| {
                let engine = Arc::clone(&engine);
                let addresses = addresses.clone();
                async move {
                    let handles: Vec<_> = (0..tasks)
                        .map(|i| {
                            let engine = Arc::clone(&engine);
                            let ip = if i % 2 == 0 {
                                addresses[i % addresses.len()].clone()
                            } else {
                                "8.8.8.8".to_string()
                            };
                            tokio::spawn(async move {
                                engine
                                    .handle(EdgeRequest::new(ip, "/", "ipr=letmein"))
                                    .await
                            })
                        })
                        .collect();
                    for handle in handles {
                        black_box(handle.await.unwrap());
                    }
                }
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_classifier,
    bench_encoder,
    bench_query,
    bench_decide,
    bench_concurrent_decisions,
);
criterion_main!(benches);
