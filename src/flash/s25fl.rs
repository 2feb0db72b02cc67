use crate::driver::transport::Transport;

use super::{
    command,
    error::S25flError,
    geometry::{AddressWidth, Capacity, Geometry, MAX_ADDRESS_BYTES},
    status::{JedecId, Status},
};

/// Driver for a single S25FL serial NOR flash.
///
/// Every operation runs to completion on the calling thread and frames its
/// own chip select transaction. No state is kept between calls besides the
/// geometry and the transport, so one owner must issue one operation at a
/// time. Wrap the driver in a [`SharedFlash`](crate::SharedFlash) if more
/// than one context needs it.
pub struct S25fl<T: Transport> {
    transport: T,
    geometry: Geometry,
}

impl<T: Transport> S25fl<T> {
    pub fn new(transport: T, capacity: Capacity) -> Self {
        log_info!("s25fl configured for {} Mb", capacity.megabits());
        Self {
            transport,
            geometry: Geometry::for_capacity(capacity),
        }
    }

    /// Like [`S25fl::new`] with a declared size in megabits.
    pub fn with_megabits(transport: T, megabits: u16) -> Result<Self, S25flError> {
        let capacity = Capacity::try_from(megabits).map_err(|e| {
            log_error!("unsupported flash capacity: {} Mb", megabits);
            e
        })?;
        Ok(Self::new(transport, capacity))
    }

    pub fn with_geometry(transport: T, geometry: Geometry) -> Self {
        log_info!(
            "s25fl configured with {} pages of {} bytes, {} bit addresses",
            geometry.page_count(),
            geometry.page_size(),
            geometry.address_width().bits(),
        );
        Self {
            transport,
            geometry,
        }
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn page_size(&self) -> u32 {
        self.geometry.page_size()
    }

    /// Address width in bits.
    pub fn address_size(&self) -> u8 {
        self.geometry.address_width().bits()
    }

    pub fn num_pages(&self) -> u32 {
        self.geometry.page_count()
    }

    pub fn total_size(&self) -> u32 {
        self.geometry.total_size()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    pub fn read_status(&mut self) -> Status {
        let mut raw = [0u8; 1];
        self.transport.chip_select(true);
        self.transport.spi_write_byte(command::READ_STATUS_1);
        self.read_bus(&mut raw);
        self.transport.chip_select(false);

        Status::from_raw(raw[0])
    }

    /// Manufacturer, memory type and capacity packed as
    /// `(byte0 << 16) | (byte1 << 8) | byte2`.
    pub fn read_device_id(&mut self) -> u32 {
        let mut raw = [0u8; command::JEDEC_ID_LEN];
        self.transport.chip_select(true);
        self.transport.spi_write_byte(command::JEDEC_ID);
        self.read_bus(&mut raw);
        self.transport.chip_select(false);

        (raw[0] as u32) << 16 | (raw[1] as u32) << 8 | raw[2] as u32
    }

    pub fn read_jedec_id(&mut self) -> JedecId {
        JedecId::from_packed(self.read_device_id())
    }

    /// Sends write enable or write disable. The latch is not verified.
    pub fn set_write_enable(&mut self, enable: bool) {
        let opcode = if enable {
            command::WRITE_ENABLE
        } else {
            command::WRITE_DISABLE
        };
        self.send_command(opcode);
    }

    pub fn read_register(&mut self, register: u8) -> u8 {
        self.transport.spi_read_register(register)
    }

    pub fn power_down(&mut self) {
        log_debug!("entering deep power down");
        self.send_command(command::POWER_DOWN);
    }

    pub fn release_power_down(&mut self) {
        log_debug!("releasing deep power down");
        self.send_command(command::RELEASE_POWER_DOWN);
        self.transport.delay(command::RELEASE_POWER_DOWN_DELAY);
    }

    /// Reads `buffer.len()` bytes starting at `address`.
    ///
    /// Returns 0 without touching the bus if `address` is past the end of the
    /// device. A read running off the end is truncated and the returned count
    /// is the number of bytes actually read.
    pub fn read(&mut self, address: u32, buffer: &mut [u8]) -> usize {
        let total_size = self.geometry.total_size();
        if address >= total_size {
            log_warn!("read rejected, address {:#x} out of range", address);
            return 0;
        }

        self.transport.chip_select(true);
        self.transport.spi_write_byte(command::READ_DATA);
        self.send_address(address, self.geometry.address_width());

        let available = (total_size - address) as usize;
        let length = if buffer.len() > available {
            log_debug!(
                "read at {:#x} truncated from {} to {} bytes",
                address,
                buffer.len(),
                available
            );
            available
        } else {
            buffer.len()
        };
        self.read_bus(&mut buffer[..length]);
        self.transport.chip_select(false);

        length
    }

    /// Programs `data` into a single page.
    ///
    /// Returns 0 without touching the bus if the address is at or past the
    /// last address, `data` is empty or longer than a page, or the write would
    /// run past the end of the page it starts in. The chip would wrap such a
    /// write to the start of the page instead.
    ///
    /// Without `fast_quit` a fixed program delay is slept afterwards; the
    /// status register is not polled, use [`S25fl::wait_for_ready`] when the
    /// next operation depends on the program having finished.
    pub fn write_page(&mut self, address: u32, data: &[u8], fast_quit: bool) -> usize {
        let page_size = self.geometry.page_size() as usize;
        if address >= self.geometry.max_address() {
            log_warn!("page write rejected, address {:#x} out of range", address);
            return 0;
        }
        if data.is_empty() || data.len() > page_size {
            log_warn!("page write rejected, length {}", data.len());
            return 0;
        }
        if self.geometry.page_offset(address) as usize + data.len() > page_size {
            log_warn!(
                "page write rejected, {} bytes at {:#x} cross a page boundary",
                data.len(),
                address
            );
            return 0;
        }

        self.send_command(command::WRITE_ENABLE);
        self.transport.delay(command::WRITE_ENABLE_DELAY);

        // a full page always starts on the page boundary
        let address = if data.len() == page_size {
            address & !(self.geometry.page_size() - 1)
        } else {
            address
        };

        log_trace!("page program {} bytes at {:#x}", data.len(), address);
        self.transport.chip_select(true);
        self.transport.spi_write_byte(command::PAGE_PROGRAM);
        self.send_address(address, self.geometry.address_width());
        self.transport.spi_write(data);
        // programming starts when chip select goes high
        self.transport.chip_select(false);

        if !fast_quit {
            self.transport.delay(command::PAGE_PROGRAM_DELAY);
        }

        data.len()
    }

    /// Writes `data` starting at `address`, split at page boundaries.
    ///
    /// Validation is left to [`S25fl::write_page`]. Stops at the first
    /// rejected chunk and returns the bytes written before it.
    pub fn write(&mut self, address: u32, data: &[u8]) -> usize {
        let page_size = self.geometry.page_size() as usize;
        if self.geometry.page_offset(address) as usize + data.len() <= page_size {
            return self.write_page(address, data, false);
        }

        let mut address = address;
        let mut remaining = data;
        let mut bytes_written = 0;
        while !remaining.is_empty() {
            let room = page_size - self.geometry.page_offset(address) as usize;
            let (chunk, rest) = remaining.split_at(room.min(remaining.len()));

            let written = self.write_page(address, chunk, false);
            if written == 0 {
                log_warn!(
                    "write stopped at {:#x} after {} of {} bytes",
                    address,
                    bytes_written,
                    data.len()
                );
                return bytes_written;
            }
            bytes_written += written;

            address += chunk.len() as u32;
            remaining = rest;
        }

        bytes_written
    }

    /// Polls the status register until the chip is not busy.
    ///
    /// Each poll that finds the chip busy sleeps one time unit, `polls` bounds
    /// the number of polls rather than elapsed time.
    pub fn wait_for_ready(&mut self, polls: u32) -> Result<(), S25flError> {
        let mut remaining = polls;
        while remaining > 0 {
            if !self.read_status().is_busy() {
                return Ok(());
            }
            self.transport.delay(1);
            remaining -= 1;
        }

        log_warn!("flash still busy after {} polls", polls);
        Err(S25flError::Timeout)
    }

    pub(super) fn send_command(&mut self, opcode: u8) {
        self.transport.chip_select(true);
        self.transport.spi_write_byte(opcode);
        self.transport.chip_select(false);
    }

    pub(super) fn send_address(&mut self, address: u32, width: AddressWidth) {
        let mut buffer = [0u8; MAX_ADDRESS_BYTES];
        let framed = width.encode(address, &mut buffer);
        self.transport.spi_write(framed);
    }

    fn read_bus(&mut self, buffer: &mut [u8]) {
        if !self.transport.spi_read(buffer) {
            log_warn!("transport reported a failed read of {} bytes", buffer.len());
        }
    }

    pub(super) fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}
