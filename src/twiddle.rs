use crate::float::FftFloat;
use num_complex::Complex;

/// Computes `exp(-2πi·index/size)`, evaluated in `f64` before narrowing
/// to the target precision.
pub(crate) fn compute_twiddle<T: FftFloat>(index: usize, size: usize) -> Complex<T> {
    let theta = (index * 2) as f64 * std::f64::consts::PI / size as f64;
    Complex::new(
        T::from_f64(theta.cos()).unwrap(),
        T::from_f64(-theta.sin()).unwrap(),
    )
}
