//! Planned mixed-radix fast Fourier transforms in pure Rust.
//!
//! A transform instance factors its size into small primes, plans a
//! sequence of radix-2/3/4 butterfly passes (with a generic fallback for
//! larger prime factors), and precomputes the twiddle and permutation
//! tables the passes share. Forward and inverse transforms run the same
//! plan: the inverse conjugates twiddles on the fly and leaves the `1/N`
//! normalisation to the caller.
//!
//! Any positive size works; [`size_minimum`] and [`size_maximum`] round
//! a requested length to a nearby size that the specialised kernels
//! cover entirely. Real-valued signals of even length go through
//! [`RealFft`], which runs a half-length complex transform and
//! reconstructs the non-redundant half spectrum.
//!
//! ```
//! use num_complex::Complex;
//! use planfft::Fft;
//!
//! let fft = Fft::<f64>::new(4)?;
//! let input = [Complex::new(1.0, 0.0); 4];
//! let mut output = [Complex::default(); 4];
//! fft.forward(&input, &mut output)?;
//! assert!((output[0].re - 4.0).abs() < 1e-12);
//! assert!(output[1].norm() < 1e-12);
//! # Ok::<(), planfft::FftError>(())
//! ```

mod butterfly;
mod error;
mod fft;
mod float;
mod plan;
mod real;
mod size;
mod twiddle;

pub use crate::error::FftError;
pub use crate::fft::Fft;
pub use crate::float::FftFloat;
pub use crate::real::{ModifiedRealFft, RealFft};
pub use crate::size::{size_maximum, size_minimum};
