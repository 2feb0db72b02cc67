#![cfg_attr(not(test), no_std)]

mod fmt;

pub use driver::hal_transport::HalTransport;
pub use driver::transport::Transport;
pub use flash::command;
pub use flash::erase::EraseUnit;
pub use flash::error::S25flError;
pub use flash::geometry::{
    AddressWidth, Capacity, Geometry, BLOCK_32K_COUNT, BLOCK_32K_SIZE, BLOCK_64K_COUNT,
    BLOCK_64K_SIZE, PAGE_SIZE, SECTOR_COUNT, SECTOR_SIZE,
};
pub use flash::nor_storage::NorStorage;
pub use flash::s25fl::S25fl;
pub use flash::shared_flash::SharedFlash;
pub use flash::status::{JedecId, Status};

mod driver;
mod flash;
#[cfg(test)]
mod tests;
