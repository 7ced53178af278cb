//! Standalone compute kernels used as benchmark workloads.
//!
//! Each kernel is a stateless transformation over caller-supplied buffers.
//! There is no shared state between calls, so every entry point is reentrant
//! given distinct buffers.
//!
//! # Kernels
//!
//! - [`walk`]: data-dependent walk over an array of 16-byte [`Record`]s,
//!   collecting sum/min/max of every byte visited
//! - [`symmetric_product_into`]: accumulates `M * M^T` for a row-major
//!   integer matrix into a caller-owned output buffer
//! - [`compress`]: decodes a QOI image and re-encodes it as PNG
//!
//! # Harness framing
//!
//! - [`WalkRequest`] / [`MatrixRequest`]: little-endian request layouts the
//!   benchmark harness sends to the kernels
//! - [`io_payload`], [`matrix_payload`]: request generators
//! - [`io_checksum`], [`matmul_checksum`]: expected results for generated
//!   requests
//!
//! # Example
//!
//! ```rust
//! use workload_kernels::{symmetric_product_into, walk, Record};
//!
//! let records = [Record::new([5, -3, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0])];
//! let stats = walk(3, records.len(), &records).unwrap();
//! assert_eq!((stats.sum, stats.min, stats.max), (6, -3, 5));
//!
//! let m = [1i64, 2, 3, 4];
//! let mut out = [0i64; 4];
//! symmetric_product_into(&m, 2, 2, &mut out).unwrap();
//! assert_eq!(out, [5, 11, 11, 25]);
//! ```
//!
//! # Parallelism
//!
//! With the `parallel` feature, `par_symmetric_product_into` splits the
//! output by rows across the rayon pool. Results are identical to the
//! sequential kernel.

mod checksum;
mod codec;
pub mod payload;
mod product;
mod record;
mod walk;

// ============================================================================
// Records
// ============================================================================
pub use record::{records_as_bytes, records_from_bytes, Record};

// ============================================================================
// Kernels
// ============================================================================
pub use walk::{walk, Cursor, WalkStats};

pub use product::{symmetric_product, symmetric_product_into};

#[cfg(feature = "parallel")]
pub use product::par_symmetric_product_into;

pub use codec::{compress, compressed_len};

// ============================================================================
// Harness framing
// ============================================================================
pub use payload::{io_payload, matrix_payload, MatrixRequest, WalkRequest};

pub use checksum::{io_checksum, matmul_checksum, matmul_response_len};

// ============================================================================
// Constants
// ============================================================================

/// Number of `i8` values in one [`Record`].
pub const RECORD_LEN: usize = 16;

/// Initial `min` of a walk. Lies above every `i8`, so it is replaced by the
/// first sample.
pub const MIN_SENTINEL: i64 = 256;

/// Initial `max` of a walk. Lies below every `i8`.
pub const MAX_SENTINEL: i64 = -256;

/// Record repeated by [`io_payload`].
pub const IO_VALUES: [i8; RECORD_LEN] = [
    -53, 32, 60, -29, 113, 109, -113, 89, -112, 0, -114, -120, 84, -50, 94, 98,
];

/// Size in bytes of an encoded [`WalkStats`] response.
pub const WALK_RESPONSE_LEN: usize = 3 * std::mem::size_of::<i64>();

/// Length reported in place of an image when decoding fails.
pub const CODEC_FAILURE_LEN: i64 = -1;

/// Minimum number of output rows before the parallel product splits work.
///
/// Smaller products run on the calling thread.
pub const MIN_PARALLEL_ROWS: usize = 32;

// ============================================================================
// Error types
// ============================================================================

/// Errors reported by the kernels and the request framing.
#[derive(Debug, thiserror::Error)]
pub enum KernelError {
    /// `max_index` was zero; the walk uses it as a modulus.
    #[error("max_index must be at least 1")]
    ZeroMaxIndex,

    /// A buffer length does not match the stated dimensions.
    #[error("{what} length mismatch: expected {expected}, got {got}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    /// Integer overflow while computing a buffer length from dimensions.
    #[error("dimension overflow while computing buffer length")]
    DimensionOverflow,

    /// Byte buffer cannot be split into whole records.
    #[error("record buffer of {len} bytes is not a multiple of 16")]
    RecordLength { len: usize },

    /// Walk request carries no records.
    #[error("walk request contains no records")]
    EmptyRecords,

    /// Buffer shorter (or longer) than its fixed layout requires.
    #[error("truncated buffer: expected {expected} bytes, got {got}")]
    Truncated { expected: usize, got: usize },

    /// Matrix body is not a whole number of `i64` values.
    #[error("matrix body of {len} bytes is not a multiple of 8")]
    Misaligned { len: usize },

    /// Matrix header names a row count that cannot describe the body.
    #[error("invalid row count {0}")]
    InvalidRows(i64),

    /// Input image could not be decoded.
    #[error("image decode failed: {0}")]
    Decode(String),

    /// Decoded pixels could not be re-encoded.
    #[error("image encode failed: {0}")]
    Encode(String),
}

/// Result type for kernel operations.
pub type Result<T> = std::result::Result<T, KernelError>;
