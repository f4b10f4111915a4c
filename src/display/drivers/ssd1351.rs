/*
 *  display/drivers/ssd1351.rs
 *
 *  HaMonS - status at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  SSD1351 128x128 RGB565 OLED over 4-wire SPI
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;
use linux_embedded_hal::gpio_cdev::{Chip, LineRequestFlags};
use linux_embedded_hal::spidev::{SpiModeFlags, SpidevOptions};
use linux_embedded_hal::{CdevPin, Delay, SpidevDevice};
use log::{debug, info};

use crate::display::error::DisplayError;
use crate::display::traits::{ColorDepth, DisplayCapabilities, DisplayDriver};

pub const SSD1351_WIDTH: u32 = 128;
pub const SSD1351_HEIGHT: u32 = 128;

// spidev rejects transfers beyond its default bufsiz
const SPI_CHUNK: usize = 4096;

mod cmd {
    pub const SET_COLUMN: u8 = 0x15;
    pub const SET_ROW: u8 = 0x75;
    pub const WRITE_RAM: u8 = 0x5C;
    pub const SET_REMAP: u8 = 0xA0;
    pub const START_LINE: u8 = 0xA1;
    pub const DISPLAY_OFFSET: u8 = 0xA2;
    pub const NORMAL: u8 = 0xA6;
    pub const INVERT: u8 = 0xA7;
    pub const FUNCTION_SELECT: u8 = 0xAB;
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const PRECHARGE: u8 = 0xB1;
    pub const CLOCK_DIV: u8 = 0xB3;
    pub const SET_VSL: u8 = 0xB4;
    pub const SET_GPIO: u8 = 0xB5;
    pub const VCOMH: u8 = 0xBE;
    pub const CONTRAST_ABC: u8 = 0xC1;
    pub const CONTRAST_MASTER: u8 = 0xC7;
    pub const MUX_RATIO: u8 = 0xCA;
    pub const COMMAND_LOCK: u8 = 0xFD;
}

/// SPI wiring for the panel
#[derive(Debug, Clone)]
pub struct SpiWiring {
    pub bus_path: String,
    pub speed_hz: u32,
    pub gpio_chip: String,
    pub dc_line: u32,
    pub rst_line: u32,
}

pub struct Ssd1351Driver {
    spi: SpidevDevice,
    dc: CdevPin,
    rst: CdevPin,
    capabilities: DisplayCapabilities,
}

fn gpio_err(e: impl std::fmt::Debug) -> DisplayError {
    DisplayError::GpioError(format!("{:?}", e))
}

fn spi_err(e: impl std::fmt::Debug) -> DisplayError {
    DisplayError::SpiError(format!("{:?}", e))
}

fn output_line(chip: &mut Chip, line: u32, label: &str) -> Result<CdevPin, DisplayError> {
    let handle = chip
        .get_line(line)
        .map_err(gpio_err)?
        .request(LineRequestFlags::OUTPUT, 0, label)
        .map_err(gpio_err)?;
    CdevPin::new(handle).map_err(gpio_err)
}

impl Ssd1351Driver {
    pub fn new_spi(wiring: &SpiWiring) -> Result<Self, DisplayError> {
        info!(
            "Opening SSD1351 on {} at {} Hz, DC line {} RST line {} ({})",
            wiring.bus_path, wiring.speed_hz, wiring.dc_line, wiring.rst_line, wiring.gpio_chip
        );

        let mut spi = SpidevDevice::open(&wiring.bus_path).map_err(spi_err)?;
        let options = SpidevOptions::new()
            .bits_per_word(8)
            .max_speed_hz(wiring.speed_hz)
            .mode(SpiModeFlags::SPI_MODE_0)
            .build();
        spi.0.configure(&options).map_err(spi_err)?;

        let mut chip = Chip::new(&wiring.gpio_chip).map_err(gpio_err)?;
        let dc = output_line(&mut chip, wiring.dc_line, "hamons-dc")?;
        let rst = output_line(&mut chip, wiring.rst_line, "hamons-rst")?;

        Ok(Self {
            spi,
            dc,
            rst,
            capabilities: DisplayCapabilities {
                width: SSD1351_WIDTH,
                height: SSD1351_HEIGHT,
                color_depth: ColorDepth::Rgb565,
                supports_brightness: true,
                supports_invert: true,
            },
        })
    }

    fn command(&mut self, op: u8, args: &[u8]) -> Result<(), DisplayError> {
        self.dc.set_low().map_err(gpio_err)?;
        self.spi.write(&[op]).map_err(spi_err)?;
        if !args.is_empty() {
            self.data(args)?;
        }
        Ok(())
    }

    fn data(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        self.dc.set_high().map_err(gpio_err)?;
        for chunk in bytes.chunks(SPI_CHUNK) {
            self.spi.write(chunk).map_err(spi_err)?;
        }
        Ok(())
    }

    fn reset(&mut self) -> Result<(), DisplayError> {
        let mut delay = Delay;
        self.rst.set_high().map_err(gpio_err)?;
        delay.delay_ms(1);
        self.rst.set_low().map_err(gpio_err)?;
        delay.delay_ms(10);
        self.rst.set_high().map_err(gpio_err)?;
        delay.delay_ms(10);
        Ok(())
    }
}

impl DisplayDriver for Ssd1351Driver {
    fn capabilities(&self) -> &DisplayCapabilities {
        &self.capabilities
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        self.reset()?;

        self.command(cmd::COMMAND_LOCK, &[0x12])?;
        self.command(cmd::COMMAND_LOCK, &[0xB1])?;
        self.command(cmd::DISPLAY_OFF, &[])?;
        self.command(cmd::CLOCK_DIV, &[0xF1])?;
        self.command(cmd::MUX_RATIO, &[0x7F])?;
        self.command(cmd::DISPLAY_OFFSET, &[0x00])?;
        self.command(cmd::START_LINE, &[0x00])?;
        // 65k color, COM split, column remap
        self.command(cmd::SET_REMAP, &[0x74])?;
        self.command(cmd::SET_GPIO, &[0x00])?;
        self.command(cmd::FUNCTION_SELECT, &[0x01])?;
        self.command(cmd::SET_VSL, &[0xA0, 0xB5, 0x55])?;
        self.command(cmd::CONTRAST_ABC, &[0xC8, 0x80, 0xC0])?;
        self.command(cmd::CONTRAST_MASTER, &[0x0F])?;
        self.command(cmd::PRECHARGE, &[0x32])?;
        self.command(cmd::VCOMH, &[0x05])?;
        self.command(cmd::NORMAL, &[])?;
        self.command(cmd::DISPLAY_ON, &[])?;

        debug!("SSD1351 init sequence sent");
        Ok(())
    }

    fn set_brightness(&mut self, value: u8) -> Result<(), DisplayError> {
        // master contrast is 4 bits
        self.command(cmd::CONTRAST_MASTER, &[value >> 4])
    }

    fn write_buffer(&mut self, buffer: &[u8]) -> Result<(), DisplayError> {
        let expected = ColorDepth::Rgb565.frame_bytes(SSD1351_WIDTH, SSD1351_HEIGHT);
        if buffer.len() != expected {
            return Err(DisplayError::BufferSizeMismatch { expected, actual: buffer.len() });
        }
        self.command(cmd::SET_COLUMN, &[0, (SSD1351_WIDTH - 1) as u8])?;
        self.command(cmd::SET_ROW, &[0, (SSD1351_HEIGHT - 1) as u8])?;
        self.command(cmd::WRITE_RAM, &[])?;
        self.data(buffer)
    }

    fn set_invert(&mut self, inverted: bool) -> Result<(), DisplayError> {
        self.command(if inverted { cmd::INVERT } else { cmd::NORMAL }, &[])
    }
}
