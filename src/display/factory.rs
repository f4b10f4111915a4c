/*
 *  display/factory.rs
 *
 *  HaMonS - status at a glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Builds the configured panel driver
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

use crate::config::{
    BusConfig, DisplayConfig, DriverKind, DEFAULT_GPIO_CHIP, DEFAULT_SPI_SPEED_HZ,
};
use crate::display::drivers::mock::MockDriver;
use crate::display::drivers::ssd1351::{Ssd1351Driver, SpiWiring, SSD1351_HEIGHT, SSD1351_WIDTH};
use crate::display::error::DisplayError;
use crate::display::traits::{ColorDepth, DisplayDriver};
use log::{debug, info};

/// Type alias for boxed display driver trait objects
pub type BoxedDriver = Box<dyn DisplayDriver>;

/// Factory for creating display drivers from configuration
pub struct DisplayDriverFactory;

impl DisplayDriverFactory {
    /// Create the driver named by `config.driver` (SSD1351 when unset).
    ///
    /// The SSD1351 falls back to the stock SPI wiring when no bus is
    /// configured. The mock panel takes its size from the config.
    pub fn create_from_config(config: &DisplayConfig) -> Result<BoxedDriver, DisplayError> {
        Self::validate_config(config)?;
        let kind = config.driver.unwrap_or(DriverKind::Ssd1351);

        match kind {
            DriverKind::Ssd1351 => {
                let wiring = Self::spi_wiring(config.bus.clone().unwrap_or_default());
                debug!("SSD1351 wiring {:?}", wiring);
                Ok(Box::new(Ssd1351Driver::new_spi(&wiring)?))
            }
            DriverKind::Mock => {
                let width = config.width.unwrap_or(SSD1351_WIDTH);
                let height = config.height.unwrap_or(SSD1351_HEIGHT);
                info!("Using mock panel {}x{}, nothing is sent to hardware", width, height);
                Ok(Box::new(MockDriver::new_with_size(width, height, ColorDepth::Rgb565)))
            }
        }
    }

    fn spi_wiring(bus: BusConfig) -> SpiWiring {
        match bus {
            BusConfig::Spi { bus, speed_hz, dc_pin, rst_pin, gpio_chip } => SpiWiring {
                bus_path: bus,
                speed_hz: speed_hz.unwrap_or(DEFAULT_SPI_SPEED_HZ),
                gpio_chip: gpio_chip.unwrap_or_else(|| DEFAULT_GPIO_CHIP.to_string()),
                dc_line: dc_pin,
                rst_line: rst_pin,
            },
        }
    }

    /// Check a configuration without touching hardware
    pub fn validate_config(config: &DisplayConfig) -> Result<(), DisplayError> {
        if let Some(rotation) = config.rotate_deg {
            if !matches!(rotation, 0 | 90 | 180 | 270) {
                return Err(DisplayError::InvalidRotation(rotation));
            }
        }

        if config.driver.unwrap_or(DriverKind::Ssd1351) == DriverKind::Ssd1351 {
            let width = config.width.unwrap_or(SSD1351_WIDTH);
            let height = config.height.unwrap_or(SSD1351_HEIGHT);
            if width != SSD1351_WIDTH || height != SSD1351_HEIGHT {
                return Err(DisplayError::InvalidConfiguration(format!(
                    "SSD1351 is {}x{}, got {}x{}",
                    SSD1351_WIDTH, SSD1351_HEIGHT, width, height
                )));
            }
        }

        Ok(())
    }
}
