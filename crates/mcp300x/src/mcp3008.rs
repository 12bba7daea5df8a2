use embedded_hal::spi::SpiDevice;

use crate::read_with_mode;

/// MCP3008 driver: eight multiplexed inputs, 10-bit resolution.
///
/// Owns its SPI device; concurrent readers must go through `&mut self`, so
/// transactions on the shared bus are serialized by ownership.
pub struct Mcp3008<SPI> {
    spi: SPI,
}

impl<SPI: SpiDevice> Mcp3008<SPI> {
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
    /// [`u16`]. The channel selects the IN+/IN- pairing per the datasheet.
    pub fn read_differential(&mut self, ch: Channel) -> Result<u16, SPI::Error> {
        self.read_with_mode(ch, false)
    }

    /// Read a channel and return the 10 bit value as a [`u16`].
    /// If `single_ended` is `true`, the conversion is completed in
    /// single-ended mode; if `false`, in differential mode.
    pub fn read_with_mode(&mut self, ch: Channel, single_ended: bool) -> Result<u16, SPI::Error> {
        read_with_mode(&mut self.spi, ch as u8, single_ended)
    }

    /// Single-ended read of a raw channel selector.
    ///
    /// The selector is masked to its low three bits, so values above 7
    /// alias onto the eight inputs rather than failing. [`Channel`] is the
    /// checked alternative.
    pub fn read_channel(&mut self, channel: u8) -> Result<u16, SPI::Error> {
        read_with_mode(&mut self.spi, channel, true)
    }
}

impl<SPI: SpiDevice> From<SPI> for Mcp3008<SPI> {
    fn from(spi: SPI) -> Self {
        Self { spi }
    }
}

/// Channel list for MCP3008
#[allow(missing_docs)]
#[repr(u8)]
pub enum Channel {
    CH0 = 0,
    CH1 = 1,
    CH2 = 2,
    CH3 = 3,
    CH4 = 4,
    CH5 = 5,
    CH6 = 6,
    CH7 = 7,
}

impl Channel {
    /// Iterate over all channels.
    pub fn all() -> impl Iterator<Item = Self> {
        [
            Self::CH0,
            Self::CH1,
            Self::CH2,
            Self::CH3,
            Self::CH4,
            Self::CH5,
            Self::CH6,
            Self::CH7,
        ]
        .into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::spi::{Error, ErrorKind, ErrorType, Operation};

    #[derive(Debug, PartialEq)]
    struct MockError;

    impl Error for MockError {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    /// Answers every single-ended conversion with `0x200 | selector`, with
    /// the undefined bits ahead of the null bit set to ones.
    struct MockAdc;

    impl ErrorType for MockAdc {
        type Error = MockError;
    }

    impl SpiDevice for MockAdc {
        fn transaction(
            &mut self,
            operations: &mut [Operation<'_, u8>],
        ) -> Result<(), Self::Error> {
            assert_eq!(operations.len(), 1);

            match &mut operations[0] {
                Operation::TransferInPlace(words) => {
                    assert_eq!(words.len(), 3, "one frame per transaction");
                    assert_eq!(words[0], 0b0000_0001, "missing start bit");
                    assert_eq!(words[1] & 0b1000_0000, 0b1000_0000, "not single-ended");
                    assert_eq!(words[2], 0b0000_0000, "padding byte not blank");

                    let selector = (words[1] >> 4) & 0b111;
                    let sample = 0x200 | u16::from(selector);

                    words[1] = 0b1111_1100 | (sample >> 8) as u8;
                    words[2] = (sample & 0xFF) as u8;
                }
                _ => panic!("not an expected operation"),
            }

            Ok(())
        }
    }

    #[test]
    fn reads_every_channel() {
        let mut adc = Mcp3008::new(MockAdc);

        for (index, channel) in Channel::all().enumerate() {
            assert_eq!(adc.read(channel), Ok(0x200 | index as u16));
        }
    }

    #[test]
    fn raw_selectors_alias_onto_the_eight_inputs() {
        let mut adc = Mcp3008::new(MockAdc);

        assert_eq!(adc.read_channel(2), Ok(0x202));
        assert_eq!(adc.read_channel(10), Ok(0x202));
        assert_eq!(adc.read_channel(0xFF), Ok(0x207));
    }

    struct BrokenBus;

    impl ErrorType for BrokenBus {
        type Error = MockError;
    }

    impl SpiDevice for BrokenBus {
        fn transaction(
            &mut self,
            _operations: &mut [Operation<'_, u8>],
        ) -> Result<(), Self::Error> {
            Err(MockError)
        }
    }

    #[test]
    fn bus_faults_reach_the_caller_unmodified() {
        let mut adc = Mcp3008::new(BrokenBus);

        assert_eq!(adc.read(Channel::CH0), Err(MockError));
        assert_eq!(adc.read_channel(5), Err(MockError));
    }
}
