//! Transform planning: prime factorisation, pass descriptors, and the
//! shared twiddle and permutation tables.

use crate::float::FftFloat;
use crate::twiddle::compute_twiddle;
use num_complex::Complex;

/// Working-set budget per butterfly pass. Repeat-1 passes whose
/// sub-transform exceeds this many bytes of complex samples are split
/// into disjoint pieces during planning.
const CACHE_BUDGET_BYTES: usize = 65536;

/// Kernel selector for one butterfly pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum StepKind {
    Generic,
    Radix2,
    Radix3,
    Radix4,
}

/// One butterfly pass over a contiguous region of the data buffer.
#[derive(Copy, Clone)]
pub(crate) struct Step {
    pub kind: StepKind,
    pub factor: usize,
    pub start: usize,
    pub inner_repeats: usize,
    pub outer_repeats: usize,
    pub twiddle_index: usize,
}

impl core::fmt::Debug for Step {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> Result<(), core::fmt::Error> {
        write!(
            f,
            "(radix: {}, start: {}, inner: {}, outer: {})",
            self.factor, self.start, self.inner_repeats, self.outer_repeats
        )
    }
}

/// One entry of the reordering from natural input order to the order the
/// first butterfly pass consumes.
#[derive(Copy, Clone, Debug)]
pub(crate) struct PermutationPair {
    pub from: usize,
    pub to: usize,
}

/// Decomposes `size` into prime factors by trial division, smallest
/// factor first. Empty for `size == 1`.
pub(crate) fn factorize(mut size: usize) -> Vec<usize> {
    debug_assert!(size > 0);
    let mut factors = Vec::new();
    let mut f = 2;
    while size > 1 {
        if size % f == 0 {
            factors.push(f);
            size /= f;
        } else if f > size / f {
            f = size;
        } else {
            f += 1;
        }
    }
    factors
}

/// A fully constructed plan: ordered passes, the flat twiddle table they
/// index into, and the input permutation.
pub(crate) struct Plan<T> {
    pub factors: Vec<usize>,
    pub steps: Vec<Step>,
    pub twiddles: Vec<Complex<T>>,
    pub permutation: Vec<PermutationPair>,
}

impl<T: FftFloat> Plan<T> {
    pub fn new(size: usize) -> Self {
        let mut plan = Self {
            factors: factorize(size),
            steps: Vec::new(),
            twiddles: Vec::new(),
            permutation: Vec::new(),
        };
        plan.add_steps(0, 0, size, 1);
        plan.build_permutation(size);
        plan
    }

    /// Emits the pass for `factors[factor_index]` over `length` samples
    /// starting at `start`, then recurses on the sub-length. Steps are
    /// pushed on unwind, so execution runs the smallest sub-DFTs first.
    fn add_steps(&mut self, factor_index: usize, start: usize, length: usize, repeats: usize) {
        if factor_index >= self.factors.len() {
            return;
        }

        // Two consecutive 2s fuse into a single radix-4 pass.
        let mut factor_index = factor_index;
        let mut factor = self.factors[factor_index];
        if factor == 2 && self.factors.get(factor_index + 1) == Some(&2) {
            factor_index += 1;
            factor = 4;
        }

        let sub_length = length / factor;
        let kind = match factor {
            2 => StepKind::Radix2,
            3 => StepKind::Radix3,
            4 => StepKind::Radix4,
            _ => StepKind::Generic,
        };
        let mut step = Step {
            kind,
            factor,
            start,
            inner_repeats: sub_length,
            outer_repeats: repeats,
            twiddle_index: self.twiddles.len(),
        };

        // Structurally identical passes share a single twiddle block.
        if let Some(existing) = self
            .steps
            .iter()
            .find(|s| s.factor == factor && s.inner_repeats == sub_length)
        {
            step.twiddle_index = existing.twiddle_index;
        } else {
            for i in 0..sub_length {
                for f in 0..factor {
                    self.twiddles.push(compute_twiddle(i * f, length));
                }
            }
        }

        if repeats == 1 && core::mem::size_of::<Complex<T>>() * sub_length > CACHE_BUDGET_BYTES {
            // The sub-transform no longer fits the cache budget: recurse
            // over disjoint offsets instead of multiplying the repeats.
            for i in 0..factor {
                self.add_steps(factor_index + 1, start + i * sub_length, sub_length, 1);
            }
        } else {
            self.add_steps(factor_index + 1, start, sub_length, repeats * factor);
        }
        self.steps.push(step);
    }

    /// Builds the composite digit-reversal by consuming factors from both
    /// ends of the factor list. The side with the smaller accumulated
    /// product moves next, which keeps strides short on the source and
    /// destination sides alike.
    fn build_permutation(&mut self, size: usize) {
        self.permutation.push(PermutationPair { from: 0, to: 0 });
        let mut index_low = 0;
        let mut index_high = self.factors.len();
        let mut input_step_low = size;
        let mut output_step_low = 1;
        let mut input_step_high = 1;
        let mut output_step_high = size;
        while output_step_low * input_step_high < size {
            let (factor, input_step, output_step);
            if output_step_low <= input_step_high {
                factor = self.factors[index_low];
                index_low += 1;
                input_step_low /= factor;
                input_step = input_step_low;
                output_step = output_step_low;
                output_step_low *= factor;
            } else {
                index_high -= 1;
                factor = self.factors[index_high];
                input_step = input_step_high;
                input_step_high *= factor;
                output_step_high /= factor;
                output_step = output_step_high;
            }
            let expanded = self.permutation.len();
            for i in 1..factor {
                for j in 0..expanded {
                    let mut pair = self.permutation[j];
                    pair.from += i * input_step;
                    pair.to += i * output_step;
                    self.permutation.push(pair);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factorize_small_sizes() {
        assert_eq!(factorize(1), Vec::<usize>::new());
        assert_eq!(factorize(2), vec![2]);
        assert_eq!(factorize(12), vec![2, 2, 3]);
        assert_eq!(factorize(13), vec![13]);
        assert_eq!(factorize(360), vec![2, 2, 2, 3, 3, 5]);
        assert_eq!(factorize(770), vec![2, 5, 7, 11]);
    }

    #[test]
    fn permutation_is_a_bijection() {
        for size in 1..200 {
            let plan = Plan::<f64>::new(size);
            assert_eq!(plan.permutation.len(), size);
            let mut from_seen = vec![false; size];
            let mut to_seen = vec![false; size];
            for pair in &plan.permutation {
                assert!(!from_seen[pair.from], "size {}: duplicate from", size);
                assert!(!to_seen[pair.to], "size {}: duplicate to", size);
                from_seen[pair.from] = true;
                to_seen[pair.to] = true;
            }
            let origin = plan.permutation[0];
            assert_eq!((origin.from, origin.to), (0, 0));
        }
    }

    #[test]
    fn radices_multiply_back_to_the_size() {
        for size in 1..200 {
            let plan = Plan::<f64>::new(size);
            // Group passes by start offset zero to recover the radix
            // product; every disjoint split covers the same factors.
            let product: usize = plan
                .steps
                .iter()
                .filter(|step| step.start == 0)
                .map(|step| step.factor)
                .product();
            assert_eq!(product, size.max(1), "size {}", size);
        }
    }

    #[test]
    fn consecutive_twos_fuse_to_radix_4() {
        let plan = Plan::<f64>::new(16);
        assert!(plan.steps.iter().all(|s| s.kind == StepKind::Radix4));
        let plan = Plan::<f64>::new(8);
        assert_eq!(plan.steps.len(), 2);
        assert!(plan.steps.iter().any(|s| s.kind == StepKind::Radix4));
        assert!(plan.steps.iter().any(|s| s.kind == StepKind::Radix2));
    }

    #[test]
    fn identical_passes_share_twiddles() {
        // 32768 complex f64 samples exceed the cache budget, so the plan
        // splits into structurally identical sub-passes over disjoint
        // offsets; those must point at one twiddle block per shape.
        let plan = Plan::<f64>::new(32768);
        let mut offsets = std::collections::BTreeMap::new();
        for step in &plan.steps {
            let offset = offsets
                .entry((step.factor, step.inner_repeats))
                .or_insert(step.twiddle_index);
            assert_eq!(
                *offset, step.twiddle_index,
                "pass ({}, {})",
                step.factor, step.inner_repeats
            );
        }
        assert!(
            plan.steps.len() > offsets.len(),
            "expected at least one shared twiddle block"
        );
    }

    #[test]
    fn twiddle_blocks_stay_in_bounds() {
        for size in [6, 12, 60, 210, 1024] {
            let plan = Plan::<f64>::new(size);
            for step in &plan.steps {
                let block = step.factor * step.inner_repeats;
                assert!(step.twiddle_index + block <= plan.twiddles.len());
            }
        }
    }
}
