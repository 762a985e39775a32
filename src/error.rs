use thiserror::Error;

/// Errors reported when constructing or running a transform.
///
/// A failed call never leaves an instance partially resized: the previous
/// plan stays in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FftError {
    /// The requested transform size is unusable: zero, or odd for a
    /// real-input transform.
    #[error("invalid transform size: {0}")]
    InvalidSize(usize),
    /// An input or output buffer does not match the configured size.
    #[error("buffer length {actual} does not match expected length {expected}")]
    BufferMismatch {
        /// Length the transform was planned for.
        expected: usize,
        /// Length the caller supplied.
        actual: usize,
    },
}
