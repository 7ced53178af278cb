//! Symmetric matrix product `M * M^T` for row-major matrices.
//!
//! For an `rows x cols` input `M`, entry `(i, j)` of the `rows x rows` result
//! is the dot product of rows `i` and `j` of `M`:
//!
//! ```text
//! out[i * rows + j] += sum_k in[i * cols + k] * in[j * cols + k]
//! ```
//!
//! The kernel adds into `out` and never overwrites it. Arithmetic wraps on
//! overflow, so the order in which a dot product is summed does not change
//! the result.

use crate::{KernelError, Result};
use num_traits::{WrappingAdd, WrappingMul, Zero};

fn checked_len(a: usize, b: usize) -> Result<usize> {
    a.checked_mul(b).ok_or(KernelError::DimensionOverflow)
}

fn ensure_len(what: &'static str, expected: usize, got: usize) -> Result<()> {
    if expected != got {
        return Err(KernelError::ShapeMismatch {
            what,
            expected,
            got,
        });
    }
    Ok(())
}

fn validate<T>(in_mat: &[T], rows: usize, cols: usize, out_mat: &[T]) -> Result<()> {
    ensure_len("input matrix", checked_len(rows, cols)?, in_mat.len())?;
    ensure_len("output matrix", checked_len(rows, rows)?, out_mat.len())?;
    Ok(())
}

/// Accumulate row `i` of `M * M^T` into `out_row` (length `rows`).
#[inline]
fn product_row<T>(in_mat: &[T], i: usize, rows: usize, cols: usize, out_row: &mut [T])
where
    T: Copy + Zero + WrappingAdd + WrappingMul,
{
    let row_i = &in_mat[i * cols..(i + 1) * cols];
    for (j, out) in out_row.iter_mut().enumerate() {
        let row_j = &in_mat[j * cols..(j + 1) * cols];
        let mut acc = T::zero();
        for (a, b) in row_i.iter().zip(row_j) {
            acc = acc.wrapping_add(&a.wrapping_mul(b));
        }
        *out = out.wrapping_add(&acc);
    }
}

/// Accumulate `M * M^T` into `out_mat`.
///
/// `in_mat` is `rows x cols` and `out_mat` is `rows x rows`, both row-major.
/// Existing contents of `out_mat` are added to; zero it first for a fresh
/// result.
///
/// # Errors
/// - [`KernelError::ShapeMismatch`] if a buffer length does not match the
///   dimensions
/// - [`KernelError::DimensionOverflow`] if `rows * cols` or `rows * rows`
///   overflows `usize`
///
/// # Example
/// ```rust
/// use workload_kernels::symmetric_product_into;
///
/// let m = [1i64, 2, 3, 4];
/// let mut out = [0i64; 4];
/// symmetric_product_into(&m, 2, 2, &mut out).unwrap();
/// assert_eq!(out, [5, 11, 11, 25]);
/// ```
pub fn symmetric_product_into<T>(
    in_mat: &[T],
    rows: usize,
    cols: usize,
    out_mat: &mut [T],
) -> Result<()>
where
    T: Copy + Zero + WrappingAdd + WrappingMul,
{
    validate(in_mat, rows, cols, out_mat)?;
    log::trace!("symmetric_product_into: rows={rows}, cols={cols}");

    if rows == 0 {
        return Ok(());
    }
    for (i, out_row) in out_mat.chunks_exact_mut(rows).enumerate() {
        product_row(in_mat, i, rows, cols, out_row);
    }
    Ok(())
}

/// Compute `M * M^T` into a freshly zeroed `rows x rows` buffer.
pub fn symmetric_product<T>(in_mat: &[T], rows: usize, cols: usize) -> Result<Vec<T>>
where
    T: Copy + Zero + WrappingAdd + WrappingMul,
{
    let mut out = vec![T::zero(); checked_len(rows, rows)?];
    symmetric_product_into(in_mat, rows, cols, &mut out)?;
    Ok(out)
}

/// Parallel variant of [`symmetric_product_into`].
///
/// Output rows are distributed over the rayon pool; each row is written by
/// exactly one task. Products with fewer than [`MIN_PARALLEL_ROWS`] rows run
/// on the calling thread.
///
/// [`MIN_PARALLEL_ROWS`]: crate::MIN_PARALLEL_ROWS
#[cfg(feature = "parallel")]
pub fn par_symmetric_product_into<T>(
    in_mat: &[T],
    rows: usize,
    cols: usize,
    out_mat: &mut [T],
) -> Result<()>
where
    T: Copy + Zero + WrappingAdd + WrappingMul + Send + Sync,
{
    use rayon::prelude::*;

    if rows < crate::MIN_PARALLEL_ROWS {
        return symmetric_product_into(in_mat, rows, cols, out_mat);
    }
    validate(in_mat, rows, cols, out_mat)?;
    log::trace!(
        "par_symmetric_product_into: rows={rows}, cols={cols}, threads={}",
        rayon::current_num_threads()
    );

    out_mat
        .par_chunks_mut(rows)
        .enumerate()
        .for_each(|(i, out_row)| product_row(in_mat, i, rows, cols, out_row));
    Ok(())
}
