//! The complex transform engine: a planned executor over the butterfly
//! kernels.

use crate::butterfly;
use crate::error::FftError;
use crate::float::FftFloat;
use crate::plan::{Plan, StepKind};
use crate::size::{size_maximum, size_minimum};
use core::cell::RefCell;
use num_complex::Complex;

/// A planned one-dimensional complex DFT of a fixed size.
///
/// An instance owns its factor list, plan, twiddle and permutation
/// tables, and a working buffer; transforms borrow the caller's input
/// and output only for the duration of a call. The forward transform
/// computes `X[k] = Σ x[n]·exp(-2πi·k·n/N)`; the inverse is the
/// conjugate sum and is not normalised.
///
/// An instance is not safe for concurrent calls. Callers that transform
/// in parallel allocate one instance per thread.
pub struct Fft<T> {
    size: usize,
    plan: Plan<T>,
    working: RefCell<Vec<Complex<T>>>,
}

impl<T> core::fmt::Debug for Fft<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> Result<(), core::fmt::Error> {
        f.debug_struct("Fft")
            .field("size", &self.size)
            .field("factors", &self.plan.factors)
            .field("steps", &self.plan.steps)
            .finish()
    }
}

impl<T: FftFloat> Fft<T> {
    /// Creates a transform of exactly `size` points.
    pub fn new(size: usize) -> Result<Self, FftError> {
        if size == 0 {
            return Err(FftError::InvalidSize(0));
        }
        Ok(Self {
            size,
            plan: Plan::new(size),
            working: RefCell::new(vec![Complex::default(); size]),
        })
    }

    /// Creates a transform of the smallest fast size at least `size`.
    pub fn new_minimum(size: usize) -> Result<Self, FftError> {
        Self::new(size_minimum(size))
    }

    /// Creates a transform of the largest fast size at most `size`.
    pub fn new_maximum(size: usize) -> Result<Self, FftError> {
        Self::new(size_maximum(size))
    }

    /// The configured transform size.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Replans for `size` and returns the size now in use. Resizing to
    /// the current size is a no-op; a zero size is rejected and leaves
    /// the current plan untouched.
    pub fn set_size(&mut self, size: usize) -> Result<usize, FftError> {
        if size == 0 {
            return Err(FftError::InvalidSize(0));
        }
        if size != self.size {
            self.size = size;
            self.plan = Plan::new(size);
            self.working = RefCell::new(vec![Complex::default(); size]);
        }
        Ok(self.size)
    }

    /// Resizes to the smallest fast size at least `size`; returns the
    /// size now in use.
    pub fn set_size_minimum(&mut self, size: usize) -> Result<usize, FftError> {
        self.set_size(size_minimum(size))
    }

    /// Resizes to the largest fast size at most `size`; returns the size
    /// now in use.
    pub fn set_size_maximum(&mut self, size: usize) -> Result<usize, FftError> {
        self.set_size(size_maximum(size))
    }

    /// Forward transform from `input` into `output`.
    pub fn forward(&self, input: &[Complex<T>], output: &mut [Complex<T>]) -> Result<(), FftError> {
        self.check(input.len())?;
        self.check(output.len())?;
        self.run::<false>(input, output);
        Ok(())
    }

    /// Unnormalised inverse transform from `input` into `output`;
    /// callers divide by the size when they need the scaled inverse.
    pub fn inverse(&self, input: &[Complex<T>], output: &mut [Complex<T>]) -> Result<(), FftError> {
        self.check(input.len())?;
        self.check(output.len())?;
        self.run::<true>(input, output);
        Ok(())
    }

    /// Forward transform with `data` as both input and output. The data
    /// is staged through the working buffer before the permutation
    /// writes back, so no pass observes partially reordered samples.
    pub fn forward_in_place(&self, data: &mut [Complex<T>]) -> Result<(), FftError> {
        self.check(data.len())?;
        self.run_in_place::<false>(data);
        Ok(())
    }

    /// Unnormalised inverse transform with `data` as both input and
    /// output.
    pub fn inverse_in_place(&self, data: &mut [Complex<T>]) -> Result<(), FftError> {
        self.check(data.len())?;
        self.run_in_place::<true>(data);
        Ok(())
    }

    fn check(&self, len: usize) -> Result<(), FftError> {
        if len != self.size {
            return Err(FftError::BufferMismatch {
                expected: self.size,
                actual: len,
            });
        }
        Ok(())
    }

    fn run<const INVERSE: bool>(&self, input: &[Complex<T>], output: &mut [Complex<T>]) {
        for pair in &self.plan.permutation {
            output[pair.from] = input[pair.to];
        }
        let mut working = self.working.borrow_mut();
        self.apply_steps::<INVERSE>(output, &mut working);
    }

    fn run_in_place<const INVERSE: bool>(&self, data: &mut [Complex<T>]) {
        let mut working = self.working.borrow_mut();
        working.copy_from_slice(data);
        for pair in &self.plan.permutation {
            data[pair.from] = working[pair.to];
        }
        self.apply_steps::<INVERSE>(data, &mut working);
    }

    /// Runs the planned passes in place on `data`. `scratch` is only
    /// touched by the generic kernel, which uses its first `radix`
    /// values.
    fn apply_steps<const INVERSE: bool>(
        &self,
        data: &mut [Complex<T>],
        scratch: &mut [Complex<T>],
    ) {
        for step in &self.plan.steps {
            let region = &mut data[step.start..];
            let twiddles = &self.plan.twiddles[step.twiddle_index..];
            match step.kind {
                StepKind::Radix2 => butterfly::radix2::<T, INVERSE>(region, twiddles, step),
                StepKind::Radix3 => butterfly::radix3::<T, INVERSE>(region, twiddles, step),
                StepKind::Radix4 => butterfly::radix4::<T, INVERSE>(region, twiddles, step),
                StepKind::Generic => {
                    butterfly::generic::<T, INVERSE>(region, twiddles, step, scratch)
                }
            }
        }
    }
}
