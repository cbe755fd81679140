use criterion::{criterion_group, criterion_main, Criterion};
use minphase::{factor_wilson_burg_1d, Filter, LagSet};
use ndarray::Array1;

fn helix_2d_lags() -> LagSet {
    LagSet::new_2d(
        vec![0, 1, -1, 0, 1, -1, 0, 1],
        vec![0, 0, 1, 1, 1, 2, 2, 2],
        vec![1.0, 0.25, 0.1, 0.3, 0.15, 0.05, 0.2, 0.1],
    )
    .unwrap()
}

fn criterion_bench(c: &mut Criterion) {
    let lags1d = LagSet::new_1d(vec![0, 1, 2, 3, 4], vec![1.0, -0.6, 0.2, -0.05, 0.01]).unwrap();
    let filter1d = Filter::new(lags1d);
    let x = Array1::from_shape_fn(2048, |i| ((i as f32) * 0.01).sin());

    c.bench_function("apply_1d 2048", |b| {
        let mut y = Array1::<f32>::zeros(2048);
        b.iter(|| filter1d.apply_1d(&x, &mut y));
    });

    c.bench_function("apply_inverse_1d 2048", |b| {
        let mut y = Array1::<f32>::zeros(2048);
        b.iter(|| filter1d.apply_inverse_1d(&x, &mut y));
    });

    let lags2d = helix_2d_lags();
    let filter2d = Filter::new(lags2d);
    let x2 = ndarray::Array2::from_shape_fn((64, 64), |(r, c)| ((r + c) as f32 * 0.01).sin());

    c.bench_function("apply_2d 64x64", |b| {
        let mut y = ndarray::Array2::<f32>::zeros((64, 64));
        b.iter(|| filter2d.apply_2d(&x2, &mut y));
    });

    let mut r = Array1::<f32>::zeros(21);
    for (i, v) in [0.01f32, 0.04, 0.1, 0.3, 0.6, 1.0, 0.6, 0.3, 0.1, 0.04, 0.01]
        .into_iter()
        .enumerate()
    {
        r[i + 5] = v;
    }

    c.bench_function("factor_wilson_burg_1d order 4", |b| {
        b.iter(|| {
            let lags = LagSet::new_1d_impulse(vec![0, 1, 2, 3, 4]).unwrap();
            let mut filter = Filter::new(lags);
            let _ = factor_wilson_burg_1d(&mut filter, &r, 50, 1e-5);
        });
    });
}

criterion_group!(benches, criterion_bench);
criterion_main!(benches);
