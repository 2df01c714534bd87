//! Build script: generates the radix-4 FFT twiddle tables as `const` Rust
//! source, one array for decimation-in-time and one for
//! decimation-in-frequency, sized for `MAX_FFT_LEN_LOG2` (selected by the
//! `max-fft-1024` / `max-fft-4096` Cargo features).

use std::env;
use std::f64::consts::PI;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Q2.30 fixed-point encoding of a value in `[-2.0, 2.0)`.
fn q2_30(x: f64) -> i32 {
    let scaled = x * (1i64 << 30) as f64;
    scaled.round().clamp(i32::MIN as f64, i32::MAX as f64) as i32
}

/// `e^{-2*pi*i*k/n}` (DIT convention: the original multiplies partial sums
/// by the *conjugate* rotation going forward, divides by it going inverse).
fn twiddle(k: usize, n: usize) -> (i32, i32) {
    let theta = -2.0 * PI * (k as f64) / (n as f64);
    (q2_30(theta.cos()), q2_30(theta.sin()))
}

/// Builds the DIT table: for each stage `b = 4, 8, 16, ..., n_max/2`
/// (smallest first, matching the DIT butterfly's stage order for any
/// transform length — it always starts at `b = 4`), `b` twiddle factors.
fn generate_dit_table(n_max: usize) -> Vec<(i32, i32)> {
    let mut table = Vec::with_capacity(n_max - 4);
    let mut b = 4usize;
    while b < n_max {
        for k in 0..b {
            table.push(twiddle(k, 4 * b));
        }
        b *= 2;
    }
    table
}

/// Builds the DIF table: same stage blocks as the DIT table, but in
/// descending `b` order (`n_max/2` down to `4`). DIF's butterfly starts
/// at `b = N/2` for a transform of length `N`, so a transform shorter
/// than `n_max` indexes into this table starting at offset
/// `n_max - N`, skipping the blocks for the stages it doesn't have.
fn generate_dif_table(n_max: usize) -> Vec<(i32, i32)> {
    let mut table = Vec::with_capacity(n_max - 4);
    let mut b = n_max / 2;
    while b >= 4 {
        for k in 0..b {
            table.push(twiddle(k, 4 * b));
        }
        b /= 2;
    }
    table
}

/// Builds the real-FFT recombination table used by `fft::util::mono_adjust`:
/// for each supported length `N` (16, 32, ..., `n_max`), a block of `N/4`
/// entries holding `e^{-2*pi*i*k/N}` for `k = 0..N/4`. Blocks are
/// concatenated in ascending `N` order, offset `N/4 - 4` into the table,
/// mirroring the DIT/DIF tables' block-per-stage-size layout. The original
/// C library packs these same angles into unused entries of its DIT table
/// via pointer arithmetic (a memory-reuse trick tied to that table's
/// on-device layout); a dedicated table is simpler and equally correct
/// since nothing here needs to share storage.
fn generate_mono_adjust_table(n_max: usize) -> Vec<(i32, i32)> {
    let mut table = Vec::new();
    let mut n = 16usize;
    while n <= n_max {
        for k in 0..(n / 4) {
            table.push(twiddle(k, n));
        }
        n *= 2;
    }
    table
}

fn write_table(out: &mut File, name: &str, table: &[(i32, i32)]) -> std::io::Result<()> {
    writeln!(
        out,
        "pub static {name}: [crate::scalar::ComplexS32; {}] = [",
        table.len()
    )?;
    for (re, im) in table {
        writeln!(out, "    crate::scalar::ComplexS32 {{ re: {re}, im: {im} }},")?;
    }
    writeln!(out, "];")?;
    Ok(())
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let n_max: usize = if env::var("CARGO_FEATURE_MAX_FFT_4096").is_ok() {
        4096
    } else {
        1024
    };

    println!("cargo:warning=Generating FFT twiddle tables for MAX_FFT_LEN={n_max}");

    let dit = generate_dit_table(n_max);
    let dif = generate_dif_table(n_max);
    let mono = generate_mono_adjust_table(n_max);

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR not set");
    let dest = Path::new(&out_dir).join("twiddle_tables.rs");
    let mut out = File::create(&dest).expect("failed to create twiddle_tables.rs");

    writeln!(out, "// generated by build.rs, do not edit").unwrap();
    writeln!(out, "pub const MAX_FFT_LEN: usize = {n_max};").unwrap();
    write_table(&mut out, "DIT_TWIDDLES", &dit).unwrap();
    write_table(&mut out, "DIF_TWIDDLES", &dif).unwrap();
    write_table(&mut out, "MONO_ADJUST_TWIDDLES", &mono).unwrap();

    println!(
        "cargo:warning=Wrote {} DIT, {} DIF and {} mono-adjust twiddle entries",
        dit.len(),
        dif.len(),
        mono.len()
    );
}
