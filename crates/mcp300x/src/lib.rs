//! Driver for the Microchip MCP3004/MCP3008 family of 10-bit ADCs via the
//! `embedded-hal` ecosystem.
//!
//! Every conversion is a single blocking full-duplex exchange of one 3-byte
//! frame: the command selects a multiplexer input, and the sample is clocked
//! back in the same exchange. The per-chip drivers live in [`mcp3008`] and
//! [`mcp3004`]; the raw frame builder and decoder are exposed for callers
//! that drive the bus themselves.

#![no_std]
#![forbid(unsafe_code)]

use core::fmt;

use embedded_hal::spi::SpiDevice;

#[cfg(feature = "mcp3004")]
pub mod mcp3004;

#[cfg(feature = "mcp3008")]
pub mod mcp3008;

/// Length in bytes of one command frame and of one response frame.
pub const FRAME_LEN: usize = 3;

/// Largest sample the 10-bit converter can produce.
pub const FULL_SCALE: u16 = 0b0000_0011_1111_1111;

/// Build the command frame selecting `channel`.
///
/// The selector is masked to its low three bits, matching the width of the
/// chip's multiplexer address. Selectors above 7 alias onto the eight
/// inputs instead of raising an error.
pub fn command_frame(channel: u8, single_ended: bool) -> [u8; FRAME_LEN] {
    let mode = if single_ended {
        0b1000_0000
    } else {
        0b0000_0000
    };

    let select = (channel & 0b111) << 4;

    [0b0000_0001, mode | select, 0b0000_0000]
}

/// Reassemble a 10-bit sample from a raw response frame.
///
/// The chip clocks the sample out across the final ten bit positions of the
/// exchange; everything ahead of the null bit is undefined and discarded.
/// A response shorter than [`FRAME_LEN`] is reported as [`Truncated`] rather
/// than read past its end; bytes after the frame are ignored.
pub fn decode_response(rx: &[u8]) -> Result<u16, Truncated> {
    match rx {
        [_, high, low, ..] => Ok(sample_bits(*high, *low)),
        _ => Err(Truncated { len: rx.len() }),
    }
}

fn sample_bits(high: u8, low: u8) -> u16 {
    u16::from_be_bytes([high, low]) & FULL_SCALE
}

/// One conversion on `spi`: send the frame for `channel`, decode the sample
/// clocked back in its place. Channel must be valid for the intended chip.
pub(crate) fn read_with_mode<SPI: SpiDevice>(
    spi: &mut SPI,
    channel: u8,
    single_ended: bool,
) -> Result<u16, SPI::Error> {
    let mut frame = command_frame(channel, single_ended);

    spi.transfer_in_place(&mut frame)?;

    // In-place exchange: the response occupies the full frame.
    Ok(sample_bits(frame[1], frame[2]))
}

/// Error returned when a response holds fewer bytes than one full frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Truncated {
    /// Number of bytes actually received.
    pub len: usize,
}

impl fmt::Display for Truncated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ADC response truncated: got {} of {} bytes",
            self.len, FRAME_LEN
        )
    }
}

impl core::error::Error for Truncated {}
