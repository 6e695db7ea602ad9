//! 工具函数与历史记录性能基准测试

use criterion::{Criterion, criterion_group, criterion_main};
use geolookup::services::HistoryStore;
use geolookup::utils::is_valid_ip;
use std::hint::black_box;
use tempfile::TempDir;

// ============== is_valid_ip 基准测试 ==============

fn bench_is_valid_ip(c: &mut Criterion) {
    let mut group = c.benchmark_group("utils/is_valid_ip");

    group.bench_function("valid", |b| {
        b.iter(|| {
            assert!(is_valid_ip(black_box("192.168.100.200")));
        });
    });

    group.bench_function("domain", |b| {
        b.iter(|| {
            assert!(!is_valid_ip(black_box("www.example.com")));
        });
    });

    // 长输入，回溯最坏情况
    let long = "1.".repeat(512);
    group.bench_function("invalid_long", |b| {
        b.iter(|| {
            assert!(!is_valid_ip(black_box(&long)));
        });
    });

    group.finish();
}

// ============== HistoryStore 基准测试 ==============

fn bench_history(c: &mut Criterion) {
    let mut group = c.benchmark_group("history");
    let dir = TempDir::new().unwrap();
    let store = HistoryStore::new(dir.path().join("history.json"));

    for i in 0..5 {
        store.log_ip(&format!("10.0.0.{}", i)).unwrap();
    }

    group.bench_function("get_history", |b| {
        b.iter(|| black_box(store.get_history().unwrap()));
    });

    // 已存在的 IP 只读不写
    group.bench_function("log_ip_duplicate", |b| {
        b.iter(|| assert!(!store.log_ip(black_box("10.0.0.4")).unwrap()));
    });

    let mut n: u32 = 0;
    group.bench_function("log_ip_new", |b| {
        b.iter(|| {
            n = n.wrapping_add(1);
            store.log_ip(&format!("172.16.{}.{}", n / 256 % 256, n % 256)).unwrap()
        });
    });

    group.finish();
}

criterion_group!(benches, bench_is_valid_ip, bench_history);
criterion_main!(benches);
