use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use minirel::Database;

fn setup_populated_db(n: usize) -> Database {
    let mut db = Database::new();

    db.run("create_table users name:str age:int active:bool")
        .unwrap();

    for i in 0..n {
        db.run(&format!(
            "insert into users values ('user{}', {}, {})",
            i,
            i % 100,
            i % 2 == 0
        ))
        .unwrap();
    }
    db
}

fn bench_insert_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_pipeline");
    group.bench_function("insert_single_row", |b| {
        let mut db = Database::new();
        db.run("create_table tests n:int").unwrap();
        b.iter(|| {
            db.run(black_box("insert into tests values (42)")).unwrap();
        });
    });
    group.finish();
}

fn bench_select_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_where_scan");

    for size in [100, 1_000, 10_000] {
        let mut db = setup_populated_db(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                db.run(black_box("select from users where age = 42"))
                    .unwrap();
            });
        });
    }
    group.finish();
}

fn bench_update_by_predicate(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_where");
    group.bench_function("update_1_percent_of_10k", |b| {
        let mut db = setup_populated_db(10_000);
        b.iter(|| {
            db.run(black_box("update users set active = false where age = 42"))
                .unwrap();
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_insert_pipeline,
    bench_select_scaling,
    bench_update_by_predicate
);
criterion_main!(benches);
