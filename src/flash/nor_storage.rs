//! `embedded-storage` traits on top of the driver.

use embedded_storage::nor_flash::{
    check_erase, check_read, check_write, ErrorType, NorFlash, ReadNorFlash,
};

use crate::driver::transport::Transport;

use super::{
    error::S25flError,
    geometry::{BLOCK_64K_SIZE, SECTOR_SIZE},
    s25fl::S25fl,
};

/// Adapter exposing an [`S25fl`] as an `embedded_storage` NOR flash.
///
/// Reads and writes are byte granular, erases work on 4 KiB sectors.
/// Writes go through [`S25fl::write`], so the last byte of the device can't
/// be programmed.
pub struct NorStorage<T: Transport> {
    flash: S25fl<T>,
}

impl<T: Transport> NorStorage<T> {
    pub fn new(flash: S25fl<T>) -> Self {
        Self { flash }
    }

    pub fn flash(&mut self) -> &mut S25fl<T> {
        &mut self.flash
    }

    pub fn into_inner(self) -> S25fl<T> {
        self.flash
    }
}

impl<T: Transport> ErrorType for NorStorage<T> {
    type Error = S25flError;
}

impl<T: Transport> ReadNorFlash for NorStorage<T> {
    const READ_SIZE: usize = 1;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        check_read(&*self, offset, bytes.len())?;
        let done = self.flash.read(offset, bytes);
        if done != bytes.len() {
            return Err(S25flError::Incomplete {
                requested: bytes.len(),
                done,
            });
        }
        Ok(())
    }

    fn capacity(&self) -> usize {
        self.flash.total_size() as usize
    }
}

impl<T: Transport> NorFlash for NorStorage<T> {
    const WRITE_SIZE: usize = 1;
    const ERASE_SIZE: usize = SECTOR_SIZE as usize;

    fn erase(&mut self, from: u32, to: u32) -> Result<(), Self::Error> {
        check_erase(&*self, from, to)?;

        let mut from = from;
        while from < to {
            // whole 64 KiB blocks where the range allows it
            if from % BLOCK_64K_SIZE == 0 && to - from >= BLOCK_64K_SIZE {
                self.flash.erase_block_64k(from / BLOCK_64K_SIZE)?;
                from += BLOCK_64K_SIZE;
            } else {
                self.flash.erase_sector(from / SECTOR_SIZE)?;
                from += SECTOR_SIZE;
            }
        }

        Ok(())
    }

    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        check_write(&*self, offset, bytes.len())?;
        if bytes.is_empty() {
            return Ok(());
        }

        let done = self.flash.write(offset, bytes);
        if done != bytes.len() {
            return Err(S25flError::Incomplete {
                requested: bytes.len(),
                done,
            });
        }
        Ok(())
    }
}
