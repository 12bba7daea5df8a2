//! Polls an MCP3008 on the Raspberry Pi's SPI0 bus and logs each channel's
//! raw sample. Hardware access requires the `raspberry_pi` feature.

#[cfg(feature = "raspberry_pi")]
fn main() -> Result<(), anyhow::Error> {
    use std::cell::RefCell;
    use std::time::Duration;

    use embedded_hal_bus::spi::RefCellDevice;
    use mcp300x::mcp3008::{Channel, Mcp3008};
    use rppal::gpio::Gpio;
    use rppal::spi::{Bus, Mode, SlaveSelect, Spi};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Bus acquisition happens once; any failure here is fatal.
    let gpio = Gpio::new()?;

    let spi = Spi::new(Bus::Spi0, SlaveSelect::Ss0, 1_000_000, Mode::Mode0)?;

    let spi = RefCell::new(spi);

    let adc = RefCellDevice::new_no_delay(&spi, gpio.get(24)?.into_output())?;

    let mut adc = Mcp3008::new(adc);

    log::info!("SPI bus open, sampling all channels");

    loop {
        for (index, channel) in Channel::all().enumerate() {
            let sample = adc.read(channel)?;

            log::info!("channel {index}: {sample}");
        }

        std::thread::sleep(Duration::from_millis(500));
    }
}

#[cfg(not(feature = "raspberry_pi"))]
fn main() {
    eprintln!("muxprobe was built without the raspberry_pi feature; no SPI bus to open");
    std::process::exit(1);
}
