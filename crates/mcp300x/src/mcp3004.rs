use embedded_hal::spi::SpiDevice;

use crate::read_with_mode;

/// MCP3004 driver: the four-input part of the family, same wire format.
pub struct Mcp3004<SPI> {
    spi: SPI,
}

impl<SPI: SpiDevice> Mcp3004<SPI> {
    /// Creates a new driver from an SPI peripheral.
    /// Please ensure the SPI bus is in SPI mode 0, aka (0, 0).
    pub fn new(spi: SPI) -> Self {
        spi.into()
    }

    /// Read a channel and return the 10 bit value as a [`u16`] in
    /// single-ended mode.
    pub fn read(&mut self, ch: Channel) -> Result<u16, SPI::Error> {
        self.read_with_mode(ch, true)
    }

    /// Read a channel pair differentially and return the 10 bit value as a
    /// [`u16`].
    pub fn read_differential(&mut self, ch: Channel) -> Result<u16, SPI::Error> {
        self.read_with_mode(ch, false)
    }

    /// Read a channel and return the 10 bit value as a [`u16`].
    /// If `single_ended` is `true`, the conversion is completed in
    /// single-ended mode; if `false`, in differential mode.
    pub fn read_with_mode(&mut self, ch: Channel, single_ended: bool) -> Result<u16, SPI::Error> {
        read_with_mode(&mut self.spi, ch as u8, single_ended)
    }
}

impl<SPI: SpiDevice> From<SPI> for Mcp3004<SPI> {
    fn from(spi: SPI) -> Self {
        Self { spi }
    }
}

/// Channel list for MCP3004
#[allow(missing_docs)]
#[repr(u8)]
pub enum Channel {
    CH0 = 0,
    CH1 = 1,
    CH2 = 2,
    CH3 = 3,
}

impl Channel {
    /// Iterate over all channels.
    pub fn all() -> impl Iterator<Item = Self> {
        [Self::CH0, Self::CH1, Self::CH2, Self::CH3].into_iter()
    }
}
