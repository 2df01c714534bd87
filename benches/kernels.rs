//! Kernel benchmarks, `criterion`-based per `GeEom-fixed_analytics`'s
//! bench harness convention (`harness = false`, one `criterion_group` per
//! related set of routines).

use bfp_dsp::bfp::{BfpComplex32, BfpReal32};
use bfp_dsp::fft;
use bfp_dsp::scalar::ComplexS32;
use bfp_dsp::vect::s32;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_vect_add(c: &mut Criterion) {
    let b = vec![12345i32; 1024];
    let cc = vec![-6789i32; 1024];
    let mut a = vec![0i32; 1024];
    c.bench_function("vect_s32_add_1024", |bencher| {
        bencher.iter(|| {
            s32::add(black_box(&mut a), black_box(&b), black_box(&cc), 0, 0);
        })
    });
}

fn bench_vect_dot(c: &mut Criterion) {
    let b = vec![12345i32; 1024];
    let cc = vec![-6789i32; 1024];
    c.bench_function("vect_s32_dot_1024", |bencher| {
        bencher.iter(|| black_box(s32::dot(black_box(&b), black_box(&cc))))
    });
}

fn bench_fft_forward_complex(c: &mut Criterion) {
    let mut data = vec![ComplexS32::new(1, 0); 1024];
    c.bench_function("fft_forward_complex_1024", |bencher| {
        bencher.iter_batched(
            || {
                let mut v = BfpComplex32::init(&mut data, 0, true);
                v.headroom();
                data.clone()
            },
            |mut buf| {
                let mut v = BfpComplex32::init(&mut buf, 0, true);
                fft::forward_complex(black_box(&mut v)).unwrap();
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_fft_forward_mono(c: &mut Criterion) {
    let signal = vec![100i32; 1024];
    c.bench_function("fft_forward_mono_1024", |bencher| {
        bencher.iter_batched(
            || signal.clone(),
            |mut data| {
                let x = BfpReal32::init(&mut data, -20, true);
                let mut spec = vec![ComplexS32::default(); 512];
                let mut spectrum = BfpComplex32::init(&mut spec, 0, false);
                fft::real::forward_mono(black_box(&x), black_box(&mut spectrum)).unwrap();
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    kernels,
    bench_vect_add,
    bench_vect_dot,
    bench_fft_forward_complex,
    bench_fft_forward_mono
);
criterion_main!(kernels);
