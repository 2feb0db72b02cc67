//! Wire protocol constants for the S25FL command set.

// Erase/program instructions
pub const WRITE_ENABLE: u8 = 0x06;
pub const WRITE_DISABLE: u8 = 0x04;
pub const READ_STATUS_1: u8 = 0x05;
pub const PAGE_PROGRAM: u8 = 0x02;
pub const SECTOR_ERASE_4K: u8 = 0x20;
pub const BLOCK_ERASE_32K: u8 = 0x52;
pub const BLOCK_ERASE_64K: u8 = 0xD8;
pub const CHIP_ERASE: u8 = 0x60;
pub const POWER_DOWN: u8 = 0xB9;

// Read instructions
pub const READ_DATA: u8 = 0x03;

// ID instructions
pub const RELEASE_POWER_DOWN: u8 = 0xAB;
pub const JEDEC_ID: u8 = 0x9F;

/// Bytes clocked in by [`JEDEC_ID`], the last one is discarded.
pub const JEDEC_ID_LEN: usize = 4;

pub const MANUFACTURER_ID: u8 = 0x01;
pub const DEVICE_ID: u8 = 0x60;

/// Status polls allowed before an erase may start.
pub const READY_TIMEOUT: u32 = 2000;

/// Status polls allowed for a 4 KiB sector erase to finish.
///
/// The datasheet gives 400 ms worst case, so one poll is assumed to take
/// about a millisecond.
pub const SECTOR_ERASE_TIMEOUT: u32 = 500;

pub const BLOCK_ERASE_TIMEOUT: u32 = 2000;

pub const CHIP_ERASE_TIMEOUT: u32 = 250_000;

/// Time units slept after page program unless `fast_quit` is set.
pub const PAGE_PROGRAM_DELAY: u32 = 5;

/// Time units given to the write enable latch before page program.
pub const WRITE_ENABLE_DELAY: u32 = 1;

/// Time units slept after leaving deep power down.
pub const RELEASE_POWER_DOWN_DELAY: u32 = 1;
