use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiBus};

use super::transport::Transport;

/// [`Transport`] built from `embedded-hal` parts.
///
/// Chip select is active low. One delay unit is one millisecond.
pub struct HalTransport<SPI, CS, D>
where
    SPI: SpiBus,
    CS: OutputPin,
    D: DelayNs,
{
    spi: SPI,
    cs: CS,
    delay: D,
}

impl<SPI, CS, D> HalTransport<SPI, CS, D>
where
    SPI: SpiBus,
    CS: OutputPin,
    D: DelayNs,
{
    pub fn new(spi: SPI, cs: CS, delay: D) -> Self {
        Self { spi, cs, delay }
    }

    pub fn release(self) -> (SPI, CS, D) {
        (self.spi, self.cs, self.delay)
    }
}

impl<SPI, CS, D> Transport for HalTransport<SPI, CS, D>
where
    SPI: SpiBus,
    CS: OutputPin,
    D: DelayNs,
{
    fn chip_select(&mut self, enable: bool) {
        let result = if enable {
            self.cs.set_low()
        } else {
            // all queued bytes must be on the wire before the chip sees CS rise
            if self.spi.flush().is_err() {
                log_warn!("spi flush failed");
            }
            self.cs.set_high()
        };
        if result.is_err() {
            log_error!("failed to drive chip select, enable: {}", enable);
        }
    }

    fn spi_read(&mut self, buffer: &mut [u8]) -> bool {
        if self.spi.read(buffer).is_err() {
            log_warn!("spi read of {} bytes failed", buffer.len());
            return false;
        }
        true
    }

    fn spi_write(&mut self, buffer: &[u8]) {
        if self.spi.write(buffer).is_err() {
            log_warn!("spi write of {} bytes failed", buffer.len());
        }
    }

    fn spi_write_byte(&mut self, byte: u8) {
        self.spi_write(&[byte]);
    }

    fn spi_read_register(&mut self, register: u8) -> u8 {
        let mut value = [0u8; 1];
        self.chip_select(true);
        self.spi_write_byte(register);
        self.spi_read(&mut value);
        self.chip_select(false);
        value[0]
    }

    fn delay(&mut self, units: u32) {
        self.delay.delay_ms(units);
    }
}
