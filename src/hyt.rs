//! HYT-family humidity/temperature sensor protocol.
//!
//! A measurement is a write of a single zero byte (measurement request),
//! a conversion wait, and a 4-byte read:
//!
//! ```text
//!  byte0            byte1      byte2      byte3
//! [ss hhhhhh]      [hhhhhhhh] [tttttttt] [tttttt ss]
//! ```
//!
//! `h` is the 14-bit humidity, `t` the 14-bit temperature and `s` are status
//! bits. Both values span the full range of their bits.

use crate::HytError;
use eh1::delay::DelayNs;
use std::io::{Read, Write};

/// Conversion time of the sensor after a measurement request.
pub const SETTLE_TIME_MS: u32 = 60;

const MEASUREMENT_REQUEST: [u8; 1] = [0x00];
const HUMIDITY_FULL_SCALE: f64 = 0x3FFF as f64;
const TEMPERATURE_FULL_SCALE: f64 = 0xFFFC as f64;

/// One humidity/temperature sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// Relative humidity in percent, `0.0..=100.0`.
    pub humidity: f32,
    /// Temperature in degrees Celsius, `-40.0..=125.0`.
    pub temperature: f32,
}

/// Measurement frame as a big-endian word, fields from the least significant bit.
#[bitfield_struct::bitfield(u32, order = Lsb)]
struct RawFrame {
    #[bits(2)]
    temperature_status: u8,
    #[bits(14)]
    temperature: u16,
    #[bits(14)]
    humidity: u16,
    #[bits(2)]
    humidity_status: u8,
}

impl RawFrame {
    /// `((byte0 & 0x3F) << 8) | byte1`
    fn raw_humidity(self) -> u16 {
        self.humidity()
    }
    /// `(byte2 << 8) | (byte3 & 0xFC)`, so the range is `0..=0xFFFC`.
    fn raw_temperature(self) -> u16 {
        self.temperature() << 2
    }
}

/// Converts a measurement frame into physical units, ignoring the status bits.
pub fn decode(data: [u8; 4]) -> Reading {
    let frame = RawFrame::from_bits(u32::from_be_bytes(data));
    log::trace!("{data:02x?} -> {frame:?}");
    let humidity = f64::from(frame.raw_humidity()) * (100.0 / HUMIDITY_FULL_SCALE);
    let temperature = f64::from(frame.raw_temperature()) * (165.0 / TEMPERATURE_FULL_SCALE) - 40.0;
    Reading {
        humidity: humidity as f32,
        temperature: temperature as f32,
    }
}

/// Requests one measurement and blocks until it has been read back.
///
/// `channel` must already be addressed to the sensor, e.g. an
/// [`I2cDevice`](crate::I2cDevice). The trigger and the read are separate bus
/// transfers, so nothing else may use the bus in between.
pub fn take_reading<C, D>(channel: &mut C, delay: &mut D) -> Result<Reading, HytError>
where
    C: Read + Write,
    D: DelayNs,
{
    channel
        .write_all(&MEASUREMENT_REQUEST)
        .map_err(HytError::IoWrite)?;

    delay.delay_ms(SETTLE_TIME_MS);

    let mut data = [0u8; 4];
    let len = channel.read(&mut data).map_err(HytError::IoRead)?;
    if len < data.len() {
        return Err(HytError::ShortRead(len));
    }
    Ok(decode(data))
}
