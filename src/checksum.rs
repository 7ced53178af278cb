//! Expected results for the generated harness requests.
//!
//! A load generator uses these to verify kernel responses without running
//! the kernels itself.

use crate::record::Record;
use crate::walk::WalkStats;
use crate::IO_VALUES;

/// Stats a walk over any [`io_payload`](crate::io_payload) must return.
///
/// Every record of the payload is [`IO_VALUES`], so each iteration folds
/// the same 16 values no matter where the cursor jumps.
pub fn io_checksum(iterations: u64) -> WalkStats {
    if iterations == 0 {
        return WalkStats::EMPTY;
    }
    let record = Record::new(IO_VALUES);
    let per_iteration = record.sum();
    WalkStats {
        sum: (iterations as i64).wrapping_mul(per_iteration),
        min: IO_VALUES.iter().copied().min().unwrap_or_default() as i64,
        max: IO_VALUES.iter().copied().max().unwrap_or_default() as i64,
    }
}

/// Last entry of `M * M^T` for the matrix built by
/// [`matrix_payload(size)`](crate::matrix_payload).
///
/// The last row of that matrix is `size*(size-1)+1 ..= size*size`, so the
/// entry is the sum of their squares. Returns 0 for `size == 0`.
pub fn matmul_checksum(size: usize) -> i64 {
    if size == 0 {
        return 0;
    }
    let first = (size * (size - 1) + 1) as i64;
    (first..first + size as i64).fold(0i64, |acc, v| acc.wrapping_add(v.wrapping_mul(v)))
}

/// Byte length of the matrix response for a `rows`-row request.
pub fn matmul_response_len(rows: usize) -> usize {
    (rows * rows + 1) * std::mem::size_of::<i64>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_checksum_values() {
        let stats = io_checksum(3);
        assert_eq!(stats.sum, 3 * 88);
        assert_eq!(stats.min, -120);
        assert_eq!(stats.max, 113);
    }

    #[test]
    fn test_io_checksum_zero_iterations() {
        assert_eq!(io_checksum(0), WalkStats::EMPTY);
    }

    #[test]
    fn test_matmul_checksum_small() {
        assert_eq!(matmul_checksum(0), 0);
        assert_eq!(matmul_checksum(1), 1);
        // Last row [3, 4]: 9 + 16.
        assert_eq!(matmul_checksum(2), 25);
        // Last row [7, 8, 9]: 49 + 64 + 81.
        assert_eq!(matmul_checksum(3), 194);
    }

    #[test]
    fn test_matmul_response_len() {
        assert_eq!(matmul_response_len(0), 8);
        assert_eq!(matmul_response_len(3), 80);
    }
}
