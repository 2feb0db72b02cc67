use core::fmt;

use embedded_storage::nor_flash::{NorFlashError, NorFlashErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum S25flError {
    UnsupportedCapacity { megabits: u16 },
    InvalidGeometry,
    /// Sector or block number past the end of the device.
    OutOfRange { index: u32, count: u32 },
    /// The chip stayed busy for the whole poll budget.
    Timeout,
    /// Write enable was sent but the latch did not show up in the status register.
    WriteEnableFailed,
    NotAligned,
    OutOfBounds,
    /// The driver accepted fewer bytes than requested.
    Incomplete { requested: usize, done: usize },
}

impl fmt::Display for S25flError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            S25flError::UnsupportedCapacity { megabits } => {
                write!(f, "unsupported capacity: {} Mb", megabits)
            }
            S25flError::InvalidGeometry => write!(f, "invalid geometry"),
            S25flError::OutOfRange { index, count } => {
                write!(f, "index {} out of range, device has {}", index, count)
            }
            S25flError::Timeout => write!(f, "timed out waiting for the chip"),
            S25flError::WriteEnableFailed => write!(f, "write enable latch not set"),
            S25flError::NotAligned => write!(f, "not aligned"),
            S25flError::OutOfBounds => write!(f, "out of bounds"),
            S25flError::Incomplete { requested, done } => {
                write!(f, "incomplete transfer: {} of {} bytes", done, requested)
            }
        }
    }
}

impl NorFlashError for S25flError {
    fn kind(&self) -> NorFlashErrorKind {
        match self {
            S25flError::NotAligned => NorFlashErrorKind::NotAligned,
            S25flError::OutOfBounds | S25flError::OutOfRange { .. } => {
                NorFlashErrorKind::OutOfBounds
            }
            _ => NorFlashErrorKind::Other,
        }
    }
}

impl From<NorFlashErrorKind> for S25flError {
    fn from(kind: NorFlashErrorKind) -> Self {
        match kind {
            NorFlashErrorKind::NotAligned => S25flError::NotAligned,
            _ => S25flError::OutOfBounds,
        }
    }
}
