use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use rigid_lie::{so3, DVec3, Reprojection, Rotation, Transformation, Vec6F64};

fn bench_so3(c: &mut Criterion) {
    let mut group = c.benchmark_group("so3");

    let mut rng = rand::rng();
    let phis: Vec<DVec3> = (0..1000)
        .map(|_| DVec3::new(rng.random(), rng.random(), rng.random()))
        .collect();
    let rots: Vec<Rotation> = phis.iter().map(|&phi| Rotation::exp(phi)).collect();

    group.bench_function(BenchmarkId::new("vec2rot", "closed_form"), |b| {
        b.iter(|| {
            for phi in phis.iter() {
                std::hint::black_box(so3::vec2rot(std::hint::black_box(*phi), 0));
            }
        })
    });

    group.bench_function(BenchmarkId::new("vec2rot", "series_10"), |b| {
        b.iter(|| {
            for phi in phis.iter() {
                std::hint::black_box(so3::vec2rot(std::hint::black_box(*phi), 10));
            }
        })
    });

    group.bench_function(BenchmarkId::new("rot2vec", ""), |b| {
        b.iter(|| {
            for rot in rots.iter() {
                std::hint::black_box(std::hint::black_box(*rot).vec());
            }
        })
    });

    group.bench_function(BenchmarkId::new("compose", ""), |b| {
        b.iter(|| {
            let mut acc = Rotation::IDENTITY;
            for rot in rots.iter() {
                acc.compose_in_place(std::hint::black_box(rot));
            }
            std::hint::black_box(acc)
        })
    });

    group.finish();
}

fn bench_se3(c: &mut Criterion) {
    let mut group = c.benchmark_group("se3");

    let mut rng = rand::rng();
    let xis: Vec<Vec6F64> = (0..1000)
        .map(|_| Vec6F64::from_fn(|_, _| rng.random()))
        .collect();
    let trans: Vec<Transformation> = xis.iter().map(Transformation::exp).collect();

    group.bench_function(BenchmarkId::new("vec2tran", ""), |b| {
        b.iter(|| {
            for xi in xis.iter() {
                std::hint::black_box(Transformation::exp(std::hint::black_box(xi)));
            }
        })
    });

    group.bench_function(BenchmarkId::new("tran2vec", ""), |b| {
        b.iter(|| {
            for t in trans.iter() {
                std::hint::black_box(std::hint::black_box(t).vec());
            }
        })
    });

    for (name, policy) in [
        ("conditional", Reprojection::default()),
        ("forced", Reprojection::Forced),
    ] {
        group.bench_function(BenchmarkId::new("compose", name), |b| {
            b.iter(|| {
                let mut acc = Transformation::IDENTITY;
                for t in trans.iter() {
                    acc.compose_in_place_with(std::hint::black_box(t), policy);
                }
                std::hint::black_box(acc)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_so3, bench_se3);
criterion_main!(benches);
