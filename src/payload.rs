//! Request and response layouts used by the benchmark harness.
//!
//! All integers are little-endian.
//!
//! | Message         | Layout                                   |
//! |-----------------|------------------------------------------|
//! | walk request    | `[iterations: u64][records: 16 * n bytes]` |
//! | walk response   | `[sum: i64][min: i64][max: i64]`          |
//! | matrix request  | `[rows: i64][rows * cols values: i64]`    |
//! | matrix response | `[rows: i64][rows * rows values: i64]`    |
//!
//! Request bodies are borrowed where the layout allows it: a decoded
//! [`WalkRequest`] points into the request buffer.

use crate::product::symmetric_product;
use crate::record::{records_as_bytes, records_from_bytes, Record};
use crate::walk::{walk, WalkStats};
use crate::{KernelError, Result, IO_VALUES, RECORD_LEN, WALK_RESPONSE_LEN};

const HEADER_LEN: usize = std::mem::size_of::<u64>();
const WORD_LEN: usize = std::mem::size_of::<i64>();

#[inline]
fn read_i64(chunk: &[u8]) -> i64 {
    i64::from_le(bytemuck::pod_read_unaligned(chunk))
}

fn split_header(bytes: &[u8]) -> Result<(&[u8], &[u8])> {
    if bytes.len() < HEADER_LEN {
        return Err(KernelError::Truncated {
            expected: HEADER_LEN,
            got: bytes.len(),
        });
    }
    Ok(bytes.split_at(HEADER_LEN))
}

fn read_words(body: &[u8]) -> Result<Vec<i64>> {
    if body.len() % WORD_LEN != 0 {
        return Err(KernelError::Misaligned { len: body.len() });
    }
    Ok(body.chunks_exact(WORD_LEN).map(read_i64).collect())
}

fn write_words(header: i64, values: &[i64]) -> Vec<u8> {
    let mut out = Vec::with_capacity((values.len() + 1) * WORD_LEN);
    out.extend_from_slice(&header.to_le_bytes());
    for value in values {
        out.extend_from_slice(&value.to_le_bytes());
    }
    out
}

// ============================================================================
// Walk
// ============================================================================

/// Decoded walk request. `records` borrows from the request buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkRequest<'a> {
    pub iterations: u64,
    pub records: &'a [Record],
}

impl<'a> WalkRequest<'a> {
    /// Parse `[iterations][records]`.
    ///
    /// # Errors
    /// - [`KernelError::Truncated`] if the buffer is shorter than the header
    /// - [`KernelError::RecordLength`] if the body is not whole records
    /// - [`KernelError::EmptyRecords`] if the body is empty
    pub fn decode(bytes: &'a [u8]) -> Result<Self> {
        let (header, body) = split_header(bytes)?;
        let iterations = u64::from_le(bytemuck::pod_read_unaligned(header));
        let records = records_from_bytes(body)?;
        if records.is_empty() {
            return Err(KernelError::EmptyRecords);
        }
        log::debug!(
            "walk request: iterations={iterations}, records={}",
            records.len()
        );
        Ok(WalkRequest {
            iterations,
            records,
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        let body = records_as_bytes(self.records);
        let mut out = Vec::with_capacity(HEADER_LEN + body.len());
        out.extend_from_slice(&self.iterations.to_le_bytes());
        out.extend_from_slice(body);
        out
    }

    /// Number of records, the walk's modulus.
    pub fn max_index(&self) -> usize {
        self.records.len()
    }

    pub fn run(&self) -> Result<WalkStats> {
        walk(self.iterations, self.max_index(), self.records)
    }
}

impl WalkStats {
    /// Encode as the 24-byte walk response.
    pub fn to_bytes(&self) -> [u8; WALK_RESPONSE_LEN] {
        let mut out = [0u8; WALK_RESPONSE_LEN];
        out[..8].copy_from_slice(&self.sum.to_le_bytes());
        out[8..16].copy_from_slice(&self.min.to_le_bytes());
        out[16..].copy_from_slice(&self.max.to_le_bytes());
        out
    }

    /// Decode a walk response. The buffer must be exactly 24 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != WALK_RESPONSE_LEN {
            return Err(KernelError::Truncated {
                expected: WALK_RESPONSE_LEN,
                got: bytes.len(),
            });
        }
        Ok(WalkStats {
            sum: read_i64(&bytes[..8]),
            min: read_i64(&bytes[8..16]),
            max: read_i64(&bytes[16..]),
        })
    }
}

/// Walk request of `iterations` steps over copies of [`IO_VALUES`].
///
/// `byte_count` is the requested total size including the 8-byte header.
/// The body is rounded up to whole records and always holds at least one.
pub fn io_payload(iterations: u64, byte_count: usize) -> Vec<u8> {
    let chunks = byte_count
        .saturating_sub(HEADER_LEN)
        .div_ceil(RECORD_LEN)
        .max(1);
    let record = Record::new(IO_VALUES);

    let mut out = Vec::with_capacity(HEADER_LEN + chunks * RECORD_LEN);
    out.extend_from_slice(&iterations.to_le_bytes());
    for _ in 0..chunks {
        out.extend_from_slice(bytemuck::bytes_of(&record));
    }
    out
}

// ============================================================================
// Matrix
// ============================================================================

/// Decoded matrix request: a row-major `rows x cols` matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixRequest {
    pub rows: usize,
    pub cols: usize,
    pub values: Vec<i64>,
}

impl MatrixRequest {
    /// Parse `[rows][values]`; `cols` is derived from the body length.
    ///
    /// # Errors
    /// - [`KernelError::Truncated`] if the buffer is shorter than the header
    /// - [`KernelError::Misaligned`] if the body is not whole `i64`s
    /// - [`KernelError::InvalidRows`] if `rows <= 0` or `rows` does not divide
    ///   the number of values
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let (header, body) = split_header(bytes)?;
        let raw_rows = read_i64(header);
        let values = read_words(body)?;

        let rows = usize::try_from(raw_rows)
            .ok()
            .filter(|&r| r > 0 && values.len() % r == 0)
            .ok_or(KernelError::InvalidRows(raw_rows))?;
        let cols = values.len() / rows;
        log::debug!("matrix request: rows={rows}, cols={cols}");

        Ok(MatrixRequest { rows, cols, values })
    }

    pub fn encode(&self) -> Vec<u8> {
        write_words(self.rows as i64, &self.values)
    }

    /// Compute `M * M^T` into a zeroed `rows x rows` buffer.
    pub fn product(&self) -> Result<Vec<i64>> {
        symmetric_product(&self.values, self.rows, self.cols)
    }

    /// Compute the product and encode the matrix response.
    pub fn run(&self) -> Result<Vec<u8>> {
        let product = self.product()?;
        Ok(write_words(self.rows as i64, &product))
    }
}

/// Decode a matrix response into `(rows, values)`.
///
/// # Errors
/// Fails if the header is missing, the body is not whole `i64`s, or the body
/// does not hold exactly `rows * rows` values.
pub fn decode_matrix_response(bytes: &[u8]) -> Result<(usize, Vec<i64>)> {
    let (header, body) = split_header(bytes)?;
    let raw_rows = read_i64(header);
    let rows = usize::try_from(raw_rows).map_err(|_| KernelError::InvalidRows(raw_rows))?;
    let values = read_words(body)?;
    let expected = rows
        .checked_mul(rows)
        .ok_or(KernelError::DimensionOverflow)?;
    if values.len() != expected {
        return Err(KernelError::ShapeMismatch {
            what: "matrix response",
            expected,
            got: values.len(),
        });
    }
    Ok((rows, values))
}

/// Matrix request for the `size x size` matrix holding `1..=size*size` in
/// row-major order.
pub fn matrix_payload(size: usize) -> Vec<u8> {
    let values: Vec<i64> = (1..=(size * size) as i64).collect();
    write_words(size as i64, &values)
}
