/// Low level bus access used by the [`S25fl`](crate::S25fl) driver.
///
/// The driver never touches the SPI peripheral directly, every byte goes
/// through one of these six operations. Implementations are assumed to be
/// correct; the driver does not verify chip select state or bus results
/// beyond logging a failed [`Transport::spi_read`].
pub trait Transport {
    /// Assert (`true`) or deassert (`false`) the chip select line.
    ///
    /// Deasserting after a program or erase command starts the physical
    /// operation inside the chip.
    fn chip_select(&mut self, enable: bool);

    /// Fill `buffer` with bytes clocked in from the bus.
    ///
    /// Returns `false` if the bus reported a failure.
    fn spi_read(&mut self, buffer: &mut [u8]) -> bool;

    fn spi_write(&mut self, buffer: &[u8]);

    /// Write a single command/control byte.
    fn spi_write_byte(&mut self, byte: u8);

    // Not used by the command sequences, see `S25fl::read_register`.
    fn spi_read_register(&mut self, register: u8) -> u8;

    /// Blocking sleep, in time units (milliseconds on real hardware).
    fn delay(&mut self, units: u32);
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn chip_select(&mut self, enable: bool) {
        (**self).chip_select(enable)
    }

    fn spi_read(&mut self, buffer: &mut [u8]) -> bool {
        (**self).spi_read(buffer)
    }

    fn spi_write(&mut self, buffer: &[u8]) {
        (**self).spi_write(buffer)
    }

    fn spi_write_byte(&mut self, byte: u8) {
        (**self).spi_write_byte(byte)
    }

    fn spi_read_register(&mut self, register: u8) -> u8 {
        (**self).spi_read_register(register)
    }

    fn delay(&mut self, units: u32) {
        (**self).delay(units)
    }
}
