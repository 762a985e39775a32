//! Real-to-complex transforms built on the half-length complex engine.
//!
//! A length-N real signal is viewed as N/2 interleaved complex samples;
//! one half-length complex transform plus a twiddle-and-mix step then
//! recovers the non-redundant half of the real spectrum.

use crate::error::FftError;
use crate::fft::Fft;
use crate::float::FftFloat;
use crate::size;
use core::cell::RefCell;
use num_complex::Complex;

/// A planned DFT over real-valued samples of even size N.
///
/// `forward` produces the N/2+1 non-redundant bins with DC in bin 0 and
/// Nyquist in bin N/2, both purely real; `inverse` is the unnormalised
/// dual, so a round trip scales by N. The `MODIFIED` variant pre-rotates
/// the time-domain samples so the spectrum sits on half-bin offsets; it
/// has no purely real bins and produces N/2 of them.
pub struct RealFft<T, const MODIFIED: bool = false> {
    inner: Fft<T>,
    time_buffer: RefCell<Vec<Complex<T>>>,
    freq_buffer: RefCell<Vec<Complex<T>>>,
    post_twiddles: Vec<Complex<T>>,
    rotations: Vec<Complex<T>>,
}

/// A real-input FFT whose spectrum is centred on half-bin offsets.
pub type ModifiedRealFft<T> = RealFft<T, true>;

impl<T: FftFloat, const MODIFIED: bool> core::fmt::Debug for RealFft<T, MODIFIED> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> Result<(), core::fmt::Error> {
        f.debug_struct("RealFft")
            .field("size", &(self.inner.size() * 2))
            .field("modified", &MODIFIED)
            .finish()
    }
}

/// `-i·exp(-2πi·k/N)` for the spectrum mix, shifted by half a bin for
/// the modified variant.
fn post_twiddles<T: FftFloat, const MODIFIED: bool>(size: usize) -> Vec<Complex<T>> {
    (0..size / 4 + 1)
        .map(|i| {
            let index = if MODIFIED { i as f64 + 0.5 } else { i as f64 };
            let phase = -2.0 * std::f64::consts::PI * index / size as f64;
            Complex::new(
                T::from_f64(phase.sin()).unwrap(),
                T::from_f64(-phase.cos()).unwrap(),
            )
        })
        .collect()
}

/// `exp(-2πi·k/N)` applied to the interleaved time-domain samples of the
/// modified variant.
fn rotations<T: FftFloat>(size: usize) -> Vec<Complex<T>> {
    (0..size / 2)
        .map(|i| {
            let phase = -2.0 * std::f64::consts::PI * i as f64 / size as f64;
            Complex::new(
                T::from_f64(phase.cos()).unwrap(),
                T::from_f64(phase.sin()).unwrap(),
            )
        })
        .collect()
}

impl<T: FftFloat, const MODIFIED: bool> RealFft<T, MODIFIED> {
    /// Creates a transform of exactly `size` points; `size` must be even
    /// and positive.
    pub fn new(size: usize) -> Result<Self, FftError> {
        if size == 0 || size % 2 != 0 {
            return Err(FftError::InvalidSize(size));
        }
        Ok(Self {
            inner: Fft::new(size / 2)?,
            time_buffer: RefCell::new(vec![Complex::default(); size / 2]),
            freq_buffer: RefCell::new(vec![Complex::default(); size / 2]),
            post_twiddles: post_twiddles::<T, MODIFIED>(size),
            rotations: if MODIFIED {
                rotations(size)
            } else {
                Vec::new()
            },
        })
    }

    /// Creates a transform of the smallest fast size at least `size`.
    pub fn new_minimum(size: usize) -> Result<Self, FftError> {
        Self::new(Self::size_minimum(size))
    }

    /// Creates a transform of the largest fast size at most `size`.
    pub fn new_maximum(size: usize) -> Result<Self, FftError> {
        Self::new(Self::size_maximum(size))
    }

    /// The smallest even size at least `size` whose half is fast.
    pub fn size_minimum(size: usize) -> usize {
        size::size_minimum((size + 1) / 2) * 2
    }

    /// The largest even size at most `size` whose half is fast.
    pub fn size_maximum(size: usize) -> usize {
        size::size_maximum(size / 2) * 2
    }

    /// The configured transform size.
    pub fn size(&self) -> usize {
        self.inner.size() * 2
    }

    /// Number of complex bins `forward` produces: N/2+1, or N/2 for the
    /// modified variant.
    pub fn spectrum_len(&self) -> usize {
        if MODIFIED {
            self.inner.size()
        } else {
            self.inner.size() + 1
        }
    }

    /// Replans for `size` and returns the size now in use. Odd and zero
    /// sizes are rejected and leave the current plan untouched.
    pub fn set_size(&mut self, size: usize) -> Result<usize, FftError> {
        if size == 0 || size % 2 != 0 {
            return Err(FftError::InvalidSize(size));
        }
        if size != self.size() {
            self.inner.set_size(size / 2)?;
            self.time_buffer = RefCell::new(vec![Complex::default(); size / 2]);
            self.freq_buffer = RefCell::new(vec![Complex::default(); size / 2]);
            self.post_twiddles = post_twiddles::<T, MODIFIED>(size);
            self.rotations = if MODIFIED {
                rotations(size)
            } else {
                Vec::new()
            };
        }
        Ok(self.size())
    }

    /// Resizes to the smallest fast size at least `size`; returns the
    /// size now in use.
    pub fn set_size_minimum(&mut self, size: usize) -> Result<usize, FftError> {
        self.set_size(Self::size_minimum(size))
    }

    /// Resizes to the largest fast size at most `size`; returns the size
    /// now in use.
    pub fn set_size_maximum(&mut self, size: usize) -> Result<usize, FftError> {
        self.set_size(Self::size_maximum(size))
    }

    /// Forward transform: `input` holds N real samples, `output` receives
    /// the non-redundant spectrum (see [`Self::spectrum_len`]).
    pub fn forward(&self, input: &[T], output: &mut [Complex<T>]) -> Result<(), FftError> {
        let h = self.inner.size();
        check(input.len(), 2 * h)?;
        check(output.len(), self.spectrum_len())?;

        let mut time = self.time_buffer.borrow_mut();
        let mut freq = self.freq_buffer.borrow_mut();
        for i in 0..h {
            let sample = Complex::new(input[2 * i], input[2 * i + 1]);
            time[i] = if MODIFIED {
                sample * self.rotations[i]
            } else {
                sample
            };
        }
        self.inner.forward(&time, &mut freq)?;

        let half = T::from_f64(0.5).unwrap();
        if !MODIFIED {
            let z0 = freq[0];
            output[0] = Complex::new(z0.re + z0.im, T::zero());
            output[h] = Complex::new(z0.re - z0.im, T::zero());
        }
        let start = if MODIFIED { 0 } else { 1 };
        for i in start..=h / 2 {
            let conj_i = if MODIFIED { h - 1 - i } else { h - i };
            let odd = (freq[i] + freq[conj_i].conj()) * half;
            let even_i = (freq[i] - freq[conj_i].conj()) * half;
            let even_rotated = even_i * self.post_twiddles[i];

            output[i] = odd + even_rotated;
            output[conj_i] = (odd - even_rotated).conj();
        }
        Ok(())
    }

    /// Unnormalised inverse transform: `input` holds the spectrum,
    /// `output` receives N real samples. A forward/inverse round trip
    /// scales by N.
    pub fn inverse(&self, input: &[Complex<T>], output: &mut [T]) -> Result<(), FftError> {
        let h = self.inner.size();
        check(input.len(), self.spectrum_len())?;
        check(output.len(), 2 * h)?;

        let mut freq = self.time_buffer.borrow_mut();
        let mut time = self.freq_buffer.borrow_mut();
        if !MODIFIED {
            let dc = input[0].re;
            let nyquist = input[h].re;
            freq[0] = Complex::new(dc + nyquist, dc - nyquist);
        }
        let start = if MODIFIED { 0 } else { 1 };
        for i in start..=h / 2 {
            let conj_i = if MODIFIED { h - 1 - i } else { h - i };
            let odd = input[i] + input[conj_i].conj();
            let even_rotated = input[i] - input[conj_i].conj();
            let even_i = even_rotated * self.post_twiddles[i].conj();

            freq[i] = odd + even_i;
            freq[conj_i] = (odd - even_i).conj();
        }
        self.inner.inverse(&freq, &mut time)?;

        for i in 0..h {
            let sample = if MODIFIED {
                time[i] * self.rotations[i].conj()
            } else {
                time[i]
            };
            output[2 * i] = sample.re;
            output[2 * i + 1] = sample.im;
        }
        Ok(())
    }
}

fn check(actual: usize, expected: usize) -> Result<(), FftError> {
    if actual != expected {
        return Err(FftError::BufferMismatch { expected, actual });
    }
    Ok(())
}
