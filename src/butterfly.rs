//! Butterfly kernels for the executor. Each kernel is monomorphised over
//! the transform direction; inverse passes conjugate the shared twiddles
//! inside the complex multiply instead of using a second table.

use crate::float::FftFloat;
use crate::plan::Step;
use crate::twiddle::compute_twiddle;
use num_complex::Complex;

/// Multiplies `a` by `b`, or by `conj(b)` when `CONJ` is set.
#[inline(always)]
fn mul<T: FftFloat, const CONJ: bool>(a: Complex<T>, b: Complex<T>) -> Complex<T> {
    if CONJ {
        a * b.conj()
    } else {
        a * b
    }
}

/// Computes `a + i·b`, or `a - i·b` when `flip` is set. The flag is a
/// compile-time constant at every call site.
#[inline(always)]
fn add_i<T: FftFloat>(a: Complex<T>, b: Complex<T>, flip: bool) -> Complex<T> {
    if flip {
        Complex::new(a.re + b.im, a.im - b.re)
    } else {
        Complex::new(a.re - b.im, a.im + b.re)
    }
}

/// Radix-2 pass. The first twiddle of each pair is always one and is
/// elided.
pub(crate) fn radix2<T: FftFloat, const INVERSE: bool>(
    data: &mut [Complex<T>],
    twiddles: &[Complex<T>],
    step: &Step,
) {
    let stride = step.inner_repeats;
    let mut base = 0;
    for _ in 0..step.outer_repeats {
        let mut tw = 1;
        for offset in base..base + stride {
            let a = data[offset];
            let b = mul::<T, INVERSE>(data[offset + stride], twiddles[tw]);
            data[offset] = a + b;
            data[offset + stride] = a - b;
            tw += 2;
        }
        base += 2 * stride;
    }
}

/// Radix-3 pass using the standard 3-point butterfly constant
/// `(-1/2, ∓√3/2)`; the imaginary sign follows the direction.
pub(crate) fn radix3<T: FftFloat, const INVERSE: bool>(
    data: &mut [Complex<T>],
    twiddles: &[Complex<T>],
    step: &Step,
) {
    let sqrt3_2 = T::from_f64(0.866_025_403_784_438_6).unwrap();
    let re3 = T::from_f64(-0.5).unwrap();
    let im3 = if INVERSE { sqrt3_2 } else { -sqrt3_2 };

    let stride = step.inner_repeats;
    let mut base = 0;
    for _ in 0..step.outer_repeats {
        let mut tw = 0;
        for offset in base..base + stride {
            let a = data[offset];
            let b = mul::<T, INVERSE>(data[offset + stride], twiddles[tw + 1]);
            let c = mul::<T, INVERSE>(data[offset + 2 * stride], twiddles[tw + 2]);

            let real_sum = a + (b + c) * re3;
            let imag_sum = (b - c) * im3;

            data[offset] = a + b + c;
            data[offset + stride] = add_i(real_sum, imag_sum, false);
            data[offset + 2 * stride] = add_i(real_sum, imag_sum, true);
            tw += 3;
        }
        base += 3 * stride;
    }
}

/// Radix-4 pass over sum/difference pairs and the ±i rotation. Inputs 1
/// and 2 swap twiddles to account for the factorisation's internal
/// reordering.
pub(crate) fn radix4<T: FftFloat, const INVERSE: bool>(
    data: &mut [Complex<T>],
    twiddles: &[Complex<T>],
    step: &Step,
) {
    let stride = step.inner_repeats;
    let mut base = 0;
    for _ in 0..step.outer_repeats {
        let mut tw = 0;
        for offset in base..base + stride {
            let a = data[offset];
            let c = mul::<T, INVERSE>(data[offset + stride], twiddles[tw + 2]);
            let b = mul::<T, INVERSE>(data[offset + 2 * stride], twiddles[tw + 1]);
            let d = mul::<T, INVERSE>(data[offset + 3 * stride], twiddles[tw + 3]);

            let sum_ac = a + c;
            let sum_bd = b + d;
            let diff_ac = a - c;
            let diff_bd = b - d;

            data[offset] = sum_ac + sum_bd;
            data[offset + stride] = add_i(diff_ac, diff_bd, !INVERSE);
            data[offset + 2 * stride] = sum_ac - sum_bd;
            data[offset + 3 * stride] = add_i(diff_ac, diff_bd, INVERSE);
            tw += 4;
        }
        base += 4 * stride;
    }
}

/// Generic radix-r pass: an explicit O(r²) DFT of `r` elements, used for
/// prime factors without a specialised kernel. `scratch` must hold at
/// least `r` values.
pub(crate) fn generic<T: FftFloat, const INVERSE: bool>(
    data: &mut [Complex<T>],
    twiddles: &[Complex<T>],
    step: &Step,
    scratch: &mut [Complex<T>],
) {
    let stride = step.inner_repeats;
    let factor = step.factor;
    let mut base = 0;
    for _ in 0..step.outer_repeats {
        let mut tw = 0;
        for repeat in 0..stride {
            let offset = base + repeat;
            for i in 0..factor {
                scratch[i] = mul::<T, INVERSE>(data[offset + i * stride], twiddles[tw + i]);
            }
            for f in 0..factor {
                let mut sum = scratch[0];
                for i in 1..factor {
                    let phase = compute_twiddle(f * i, factor);
                    sum += mul::<T, INVERSE>(scratch[i], phase);
                }
                data[offset + f * stride] = sum;
            }
            tw += factor;
        }
        base += factor * stride;
    }
}
