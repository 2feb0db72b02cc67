use crate::driver::transport::Transport;

use super::{
    command,
    error::S25flError,
    geometry::{
        AddressWidth, BLOCK_32K_COUNT, BLOCK_32K_SIZE, BLOCK_64K_COUNT, BLOCK_64K_SIZE,
        SECTOR_COUNT, SECTOR_SIZE,
    },
    s25fl::S25fl,
};

/// Erasable regions of the chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EraseUnit {
    Sector4K,
    Block32K,
    Block64K,
    Chip,
}

impl EraseUnit {
    /// Bytes in one region, `None` for the whole chip.
    pub const fn size(self) -> Option<u32> {
        match self {
            EraseUnit::Sector4K => Some(SECTOR_SIZE),
            EraseUnit::Block32K => Some(BLOCK_32K_SIZE),
            EraseUnit::Block64K => Some(BLOCK_64K_SIZE),
            EraseUnit::Chip => None,
        }
    }

    pub const fn count(self) -> u32 {
        match self {
            EraseUnit::Sector4K => SECTOR_COUNT,
            EraseUnit::Block32K => BLOCK_32K_COUNT,
            EraseUnit::Block64K => BLOCK_64K_COUNT,
            EraseUnit::Chip => 1,
        }
    }

    pub const fn opcode(self) -> u8 {
        match self {
            EraseUnit::Sector4K => command::SECTOR_ERASE_4K,
            EraseUnit::Block32K => command::BLOCK_ERASE_32K,
            EraseUnit::Block64K => command::BLOCK_ERASE_64K,
            EraseUnit::Chip => command::CHIP_ERASE,
        }
    }

    /// Polls allowed after the erase command for the chip to go idle.
    pub const fn timeout(self) -> u32 {
        match self {
            EraseUnit::Sector4K => command::SECTOR_ERASE_TIMEOUT,
            EraseUnit::Block32K | EraseUnit::Block64K => command::BLOCK_ERASE_TIMEOUT,
            EraseUnit::Chip => command::CHIP_ERASE_TIMEOUT,
        }
    }
}

impl<T: Transport> S25fl<T> {
    /// Erases the 4 KiB sector `sector` (counted from zero).
    ///
    /// Fails if the chip is busy for [`command::READY_TIMEOUT`] polls before
    /// the erase, if the write enable latch does not set, or if the chip is
    /// still busy after [`command::SECTOR_ERASE_TIMEOUT`] polls. In the last
    /// case the erase may still complete inside the chip.
    pub fn erase_sector(&mut self, sector: u32) -> Result<(), S25flError> {
        self.erase(EraseUnit::Sector4K, sector)
    }

    pub fn erase_block_32k(&mut self, block: u32) -> Result<(), S25flError> {
        self.erase(EraseUnit::Block32K, block)
    }

    pub fn erase_block_64k(&mut self, block: u32) -> Result<(), S25flError> {
        self.erase(EraseUnit::Block64K, block)
    }

    pub fn erase_chip(&mut self) -> Result<(), S25flError> {
        self.erase(EraseUnit::Chip, 0)
    }

    /// Erases region `index` of the given unit.
    pub fn erase(&mut self, unit: EraseUnit, index: u32) -> Result<(), S25flError> {
        let count = unit.count();
        if index >= count {
            log_warn!("erase rejected, index {} of {}", index, count);
            return Err(S25flError::OutOfRange { index, count });
        }

        self.wait_for_ready(command::READY_TIMEOUT)?;

        self.set_write_enable(true);
        if !self.read_status().is_write_enabled() {
            log_warn!("write enable latch not set, erase aborted");
            return Err(S25flError::WriteEnableFailed);
        }

        self.transport_mut().chip_select(true);
        self.transport_mut().spi_write_byte(unit.opcode());
        if let Some(size) = unit.size() {
            let address = index * size;
            log_debug!("erasing {} bytes at {:#x}", size, address);
            // erase commands always take a 3 byte address
            self.send_address(address, AddressWidth::Bits24);
        } else {
            log_info!("erasing whole chip");
        }
        // the erase starts when chip select goes high
        self.transport_mut().chip_select(false);

        self.wait_for_ready(unit.timeout())
    }
}
