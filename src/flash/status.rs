/// Status register 1, masked to the bits the driver acts on.
///
/// Block protect and other bits are discarded when the register is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status(u8);

impl Status {
    /// Erase or program in progress.
    pub const BUSY: u8 = 0x01;
    /// Write enable latch.
    pub const WRITE_ENABLED: u8 = 0x02;

    pub const fn from_raw(raw: u8) -> Self {
        Self(raw & (Self::BUSY | Self::WRITE_ENABLED))
    }

    pub const fn bits(&self) -> u8 {
        self.0
    }

    pub const fn is_busy(&self) -> bool {
        self.0 & Self::BUSY != 0
    }

    pub const fn is_write_enabled(&self) -> bool {
        self.0 & Self::WRITE_ENABLED != 0
    }
}

/// Decoded answer to the JEDEC ID command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JedecId {
    pub manufacturer: u8,
    pub memory_type: u8,
    pub capacity: u8,
}

impl JedecId {
    /// `packed` is `manufacturer << 16 | memory_type << 8 | capacity`.
    pub const fn from_packed(packed: u32) -> Self {
        Self {
            manufacturer: (packed >> 16) as u8,
            memory_type: (packed >> 8) as u8,
            capacity: packed as u8,
        }
    }

    pub const fn packed(&self) -> u32 {
        (self.manufacturer as u32) << 16 | (self.memory_type as u32) << 8 | self.capacity as u32
    }

    pub const fn is_s25fl(&self) -> bool {
        self.manufacturer == super::command::MANUFACTURER_ID
            && self.memory_type == super::command::DEVICE_ID
    }
}
