//! Data-dependent statistics walk over an array of [`Record`]s.
//!
//! Every step scans one full record, folding its 16 values into a running
//! sum/min/max, then jumps to another record chosen by one byte of the
//! record just scanned. Which byte is used rotates through `0..16`.
//!
//! # Algorithm
//!
//! ```text
//! struct_index = 0, value_index = 0
//! repeat iterations times:
//!     for v in records[struct_index]: fold v into (sum, min, max)
//!     struct_index = (struct_index + records[struct_index][value_index]) mod max_index
//!     value_index  = (value_index + 1) mod 16
//! ```
//!
//! The jump byte is signed; the modulus is Euclidean so the new index is
//! always in `[0, max_index)`.

use crate::record::Record;
use crate::{KernelError, Result, MAX_SENTINEL, MIN_SENTINEL, RECORD_LEN};

// ============================================================================
// Aggregates
// ============================================================================

/// Aggregates collected by [`walk`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WalkStats {
    /// Wrapping sum of every value read.
    pub sum: i64,
    pub min: i64,
    pub max: i64,
}

impl WalkStats {
    /// Result of a walk that took no samples.
    ///
    /// `min`/`max` lie outside the `i8` range, so callers can tell this
    /// apart from any real result.
    pub const EMPTY: WalkStats = WalkStats {
        sum: 0,
        min: MIN_SENTINEL,
        max: MAX_SENTINEL,
    };

    /// True if no value has been folded in.
    pub fn is_empty(&self) -> bool {
        self.min == MIN_SENTINEL && self.max == MAX_SENTINEL
    }

    #[inline]
    fn fold_record(&mut self, record: &Record) {
        for &value in record.values() {
            let value = value as i64;
            if value > self.max {
                self.max = value;
            }
            if value < self.min {
                self.min = value;
            }
            self.sum = self.sum.wrapping_add(value);
        }
    }
}

impl Default for WalkStats {
    fn default() -> Self {
        WalkStats::EMPTY
    }
}

// ============================================================================
// Cursor
// ============================================================================

/// Position of the walk: which record is read next, and which byte of it
/// picks the following jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    struct_index: usize,
    value_index: usize,
    max_index: usize,
}

impl Cursor {
    /// Cursor at record 0, jump byte 0.
    ///
    /// Returns [`KernelError::ZeroMaxIndex`] if `max_index == 0`.
    pub fn new(max_index: usize) -> Result<Self> {
        if max_index == 0 {
            return Err(KernelError::ZeroMaxIndex);
        }
        Ok(Cursor {
            struct_index: 0,
            value_index: 0,
            max_index,
        })
    }

    #[inline]
    pub fn struct_index(&self) -> usize {
        self.struct_index
    }

    #[inline]
    pub fn value_index(&self) -> usize {
        self.value_index
    }

    /// Jump according to `current`, the record at `struct_index`.
    ///
    /// The jump byte is taken at the `value_index` held before this call.
    #[inline]
    pub fn advance(&mut self, current: &Record) {
        let jump = current.get(self.value_index);
        self.struct_index = wrap_index(self.struct_index, jump, self.max_index);
        self.value_index = (self.value_index + 1) % RECORD_LEN;
    }
}

/// `(index + jump) mod len` with a non-negative result for negative `jump`.
///
/// Requires `index < len` and `len > 0`.
#[inline]
fn wrap_index(index: usize, jump: i8, len: usize) -> usize {
    if jump >= 0 {
        (index + jump as usize) % len
    } else {
        let back = jump.unsigned_abs() as usize % len;
        (index + (len - back)) % len
    }
}

// ============================================================================
// Walk
// ============================================================================

/// Walk `records` for `iterations` steps and return the aggregates.
///
/// `records` must hold exactly `max_index` entries. With `iterations == 0`
/// the result is [`WalkStats::EMPTY`].
///
/// # Errors
/// - [`KernelError::ZeroMaxIndex`] if `max_index == 0`
/// - [`KernelError::ShapeMismatch`] if `records.len() != max_index`
pub fn walk(iterations: u64, max_index: usize, records: &[Record]) -> Result<WalkStats> {
    let mut cursor = Cursor::new(max_index)?;
    if records.len() != max_index {
        return Err(KernelError::ShapeMismatch {
            what: "records",
            expected: max_index,
            got: records.len(),
        });
    }
    log::trace!("walk: iterations={iterations}, max_index={max_index}");

    let mut stats = WalkStats::EMPTY;
    for _ in 0..iterations {
        let current = &records[cursor.struct_index()];
        stats.fold_record(current);
        cursor.advance(current);
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(head: &[i8]) -> Record {
        let mut values = [0i8; RECORD_LEN];
        values[..head.len()].copy_from_slice(head);
        Record::new(values)
    }

    #[test]
    fn test_wrap_index_forward() {
        assert_eq!(wrap_index(0, 5, 1), 0);
        assert_eq!(wrap_index(2, 3, 4), 1);
        assert_eq!(wrap_index(0, 127, 1000), 127);
    }

    #[test]
    fn test_wrap_index_backward() {
        assert_eq!(wrap_index(0, -1, 4), 3);
        assert_eq!(wrap_index(1, -3, 4), 2);
        assert_eq!(wrap_index(3, -128, 5), 0);
        assert_eq!(wrap_index(0, -128, 1), 0);
        assert_eq!(wrap_index(0, -4, 4), 0);
    }

    #[test]
    fn test_cursor_rejects_zero() {
        assert!(matches!(Cursor::new(0), Err(KernelError::ZeroMaxIndex)));
    }

    #[test]
    fn test_cursor_uses_previous_value_index() {
        // Byte 0 of record 0 jumps +2, byte 1 of record 2 jumps -1.
        let records = [record(&[2]), record(&[]), record(&[0, -1])];
        let mut cursor = Cursor::new(3).unwrap();

        cursor.advance(&records[cursor.struct_index()]);
        assert_eq!((cursor.struct_index(), cursor.value_index()), (2, 1));

        cursor.advance(&records[cursor.struct_index()]);
        assert_eq!((cursor.struct_index(), cursor.value_index()), (1, 2));
    }

    #[test]
    fn test_value_index_wraps_after_sixteen_steps() {
        let records = [record(&[])];
        let mut cursor = Cursor::new(1).unwrap();
        for _ in 0..RECORD_LEN {
            cursor.advance(&records[0]);
        }
        assert_eq!(cursor.value_index(), 0);
    }

    #[test]
    fn test_zero_iterations_returns_sentinels() {
        let records = [record(&[1, 2, 3])];
        let stats = walk(0, 1, &records).unwrap();
        assert_eq!(stats, WalkStats::EMPTY);
        assert_eq!((stats.sum, stats.min, stats.max), (0, 256, -256));
        assert!(stats.is_empty());
    }

    #[test]
    fn test_single_record_walk() {
        let records = [record(&[5, -3])];
        let stats = walk(3, 1, &records).unwrap();
        assert_eq!(stats, WalkStats { sum: 6, min: -3, max: 5 });
        assert!(!stats.is_empty());
    }

    #[test]
    fn test_walk_follows_jumps() {
        // 0 -(byte 0 = +1)-> 1 -(byte 1 = +2)-> 0
        let records = [record(&[1, 0, 0]), record(&[10, 2, 0]), record(&[-100])];
        let stats = walk(3, 3, &records).unwrap();
        // Visits records 0, 1, 0; record 2 is never read.
        assert_eq!(stats.sum, 1 + 12 + 1);
        assert_eq!(stats.min, 0);
        assert_eq!(stats.max, 10);
    }

    #[test]
    fn test_walk_rejects_zero_max_index() {
        assert!(matches!(walk(1, 0, &[]), Err(KernelError::ZeroMaxIndex)));
    }

    #[test]
    fn test_walk_rejects_length_mismatch() {
        let records = [record(&[]), record(&[])];
        match walk(1, 3, &records) {
            Err(KernelError::ShapeMismatch { expected, got, .. }) => {
                assert_eq!((expected, got), (3, 2));
            }
            other => panic!("expected ShapeMismatch, got {other:?}"),
        }
    }
}
