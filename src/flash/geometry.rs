use super::error::S25flError;

pub const PAGE_SIZE: u32 = 256;
pub const SECTOR_SIZE: u32 = 4096;
/// Number of 4 KiB sectors, the same for every supported capacity.
pub const SECTOR_COUNT: u32 = 2048;
pub const BLOCK_32K_SIZE: u32 = 32 * 1024;
pub const BLOCK_32K_COUNT: u32 = 256;
pub const BLOCK_64K_SIZE: u32 = 64 * 1024;
pub const BLOCK_64K_COUNT: u32 = 128;

pub const MAX_ADDRESS_BYTES: usize = 3;

/// Supported chip densities, in megabits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Capacity {
    S64Mb,
    S128Mb,
    S256Mb,
}

impl Capacity {
    pub const fn page_count(self) -> u32 {
        match self {
            Capacity::S64Mb => 32768,
            Capacity::S128Mb => 65536,
            Capacity::S256Mb => 131072,
        }
    }

    pub const fn megabits(self) -> u16 {
        match self {
            Capacity::S64Mb => 64,
            Capacity::S128Mb => 128,
            Capacity::S256Mb => 256,
        }
    }
}

impl TryFrom<u16> for Capacity {
    type Error = S25flError;

    fn try_from(megabits: u16) -> Result<Self, Self::Error> {
        match megabits {
            64 => Ok(Capacity::S64Mb),
            128 => Ok(Capacity::S128Mb),
            256 => Ok(Capacity::S256Mb),
            _ => Err(S25flError::UnsupportedCapacity { megabits }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressWidth {
    Bits16,
    Bits24,
}

impl AddressWidth {
    pub const fn bits(self) -> u8 {
        match self {
            AddressWidth::Bits16 => 16,
            AddressWidth::Bits24 => 24,
        }
    }

    pub const fn bytes(self) -> usize {
        match self {
            AddressWidth::Bits16 => 2,
            AddressWidth::Bits24 => 3,
        }
    }

    /// Big endian address framing, upper byte first.
    ///
    /// Bits above the width are dropped.
    pub fn encode(self, address: u32, buffer: &mut [u8; MAX_ADDRESS_BYTES]) -> &[u8] {
        let bytes = address.to_be_bytes();
        let len = self.bytes();
        buffer[..len].copy_from_slice(&bytes[4 - len..]);
        &buffer[..len]
    }
}

/// Device geometry, fixed for the lifetime of a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Geometry {
    page_size: u32,
    address_width: AddressWidth,
    page_count: u32,
    total_size: u32,
}

impl Geometry {
    pub const fn for_capacity(capacity: Capacity) -> Self {
        let page_count = capacity.page_count();
        Self {
            page_size: PAGE_SIZE,
            address_width: AddressWidth::Bits24,
            page_count,
            total_size: page_count * PAGE_SIZE,
        }
    }

    /// Custom geometry, e.g. for small parts with 16 bit addressing.
    ///
    /// `page_size` must be a power of two no larger than 256 and the whole
    /// device must be addressable with `address_width`.
    pub fn new(
        page_size: u32,
        address_width: AddressWidth,
        page_count: u32,
    ) -> Result<Self, S25flError> {
        if !page_size.is_power_of_two() || page_size > PAGE_SIZE || page_count == 0 {
            return Err(S25flError::InvalidGeometry);
        }
        let total_size = page_size
            .checked_mul(page_count)
            .ok_or(S25flError::InvalidGeometry)?;
        if (total_size - 1) >> address_width.bits() != 0 {
            return Err(S25flError::InvalidGeometry);
        }

        Ok(Self {
            page_size,
            address_width,
            page_count,
            total_size,
        })
    }

    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    pub const fn address_width(&self) -> AddressWidth {
        self.address_width
    }

    pub const fn page_count(&self) -> u32 {
        self.page_count
    }

    /// `page_count * page_size`, the upper bound for every address check.
    pub const fn total_size(&self) -> u32 {
        self.total_size
    }

    /// Program commands are refused at or beyond this offset.
    pub const fn max_address(&self) -> u32 {
        self.total_size - 1
    }

    pub const fn page_offset(&self, address: u32) -> u32 {
        address % self.page_size
    }
}

impl From<Capacity> for Geometry {
    fn from(capacity: Capacity) -> Self {
        Geometry::for_capacity(capacity)
    }
}
