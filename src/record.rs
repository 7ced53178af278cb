use bytemuck::{Pod, Zeroable};

use crate::{KernelError, Result, RECORD_LEN};

/// Fixed-size block of 16 signed bytes, the unit the walk reads.
///
/// `repr(transparent)` over `[i8; 16]`, so a byte buffer can be viewed as
/// `&[Record]` without copying (see [`records_from_bytes`]).
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Zeroable, Pod)]
pub struct Record(pub [i8; RECORD_LEN]);

impl Record {
    pub const fn new(values: [i8; RECORD_LEN]) -> Self {
        Record(values)
    }

    #[inline]
    pub fn values(&self) -> &[i8; RECORD_LEN] {
        &self.0
    }

    /// Value at `index`.
    ///
    /// # Panics
    /// Panics if `index >= RECORD_LEN`.
    #[inline]
    pub fn get(&self, index: usize) -> i8 {
        self.0[index]
    }

    /// Sum of all 16 values.
    pub fn sum(&self) -> i64 {
        self.0.iter().map(|&v| v as i64).sum()
    }
}

impl From<[i8; RECORD_LEN]> for Record {
    fn from(values: [i8; RECORD_LEN]) -> Self {
        Record(values)
    }
}

/// View a byte buffer as records without copying.
///
/// Bytes are reinterpreted as `i8`. The buffer length must be a multiple of
/// [`RECORD_LEN`]; an empty buffer yields an empty slice.
pub fn records_from_bytes(bytes: &[u8]) -> Result<&[Record]> {
    bytemuck::try_cast_slice(bytes).map_err(|_| KernelError::RecordLength { len: bytes.len() })
}

/// View records as their raw bytes.
pub fn records_as_bytes(records: &[Record]) -> &[u8] {
    bytemuck::cast_slice(records)
}
