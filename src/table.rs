use log::trace;
use num_bigint::BigInt;
use num_traits::FromPrimitive;

use crate::error::Error;

/// Number of buckets in the table consumed by the checkpointing firmware.
pub const ENTRY_COUNT: usize = 128;
/// Bucket `i` covers `(i + 1) * BYTES_PER_ENTRY` bytes saved or restored.
pub const BYTES_PER_ENTRY: u32 = 32;
/// ADC resolution of the supply monitor.
pub const LSB_PER_VOLT: u32 = 1024;
/// Applied to the truncated product, after truncation.
pub const SHIFT: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableParams {
    /// Volts dropped per byte saved or restored.
    pub dvdb: f64,
    pub entries: usize,
    pub bytes_per_entry: u32,
    pub lsb_per_volt: u32,
    pub shift: u32,
}

impl TableParams {
    pub fn new(dvdb: f64) -> Self {
        TableParams {
            dvdb,
            entries: ENTRY_COUNT,
            bytes_per_entry: BYTES_PER_ENTRY,
            lsb_per_volt: LSB_PER_VOLT,
            shift: SHIFT,
        }
    }
}

/// Voltage drop per bucket, in ADC LSBs scaled down by the shift.
///
/// Values are kept signed, exact and unclamped: a negative coefficient or one
/// large enough to leave the `uint16_t` range is emitted exactly as computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VdropTable {
    entries: Vec<BigInt>,
}

impl VdropTable {
    pub fn entries(&self) -> &[BigInt] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn min(&self) -> Option<&BigInt> {
        self.entries.iter().min()
    }

    pub fn max(&self) -> Option<&BigInt> {
        self.entries.iter().max()
    }
}

/// Computes `trunc(dvdb * bytes * lsb_per_volt) >> shift` for every bucket.
///
/// The product is evaluated in `f64` left to right and converted to an exact
/// integer, truncating toward zero. The shift floors, so negative products
/// round toward negative infinity.
pub fn compute(params: &TableParams) -> Result<VdropTable, Error> {
    if !params.dvdb.is_finite() {
        return Err(Error::NonFinite(params.dvdb));
    }
    if params.entries == 0 {
        return Err(Error::EmptyTable);
    }

    let lsb_per_volt = f64::from(params.lsb_per_volt);
    let mut entries = Vec::with_capacity(params.entries);

    for index in 0..params.entries {
        let bytes_to_save = (index as u64 + 1) * u64::from(params.bytes_per_entry);

        let value = params.dvdb * bytes_to_save as f64 * lsb_per_volt;
        // only None once the f64 product itself has overflowed to infinity
        let truncated = BigInt::from_f64(value).ok_or(Error::ProductOverflow { index })?;

        let vdrop = truncated >> params.shift;
        trace!("bucket {} ({} bytes): {} -> {}", index, bytes_to_save, value, vdrop);
        entries.push(vdrop);
    }

    Ok(VdropTable { entries })
}
