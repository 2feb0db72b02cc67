pub mod command;
pub(crate) mod erase;
pub(crate) mod error;
pub(crate) mod geometry;
pub(crate) mod nor_storage;
pub(crate) mod s25fl;
pub(crate) mod shared_flash;
pub(crate) mod status;
