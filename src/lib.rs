//! Reader for HYT humidity/temperature sensors on Linux I2C buses.
//!
//! The crate finds an I2C adapter by the name the kernel gives it, binds the
//! sensor's slave address on the matching `/dev/i2c-*` node and decodes the
//! sensor's 4-byte measurement frame.
//!
//! # Quickstart
//!
//! ```no_run
//! use hyt_read::{SlaveAddress, ThreadDelay, resolve_by_name, take_reading};
//!
//! # fn main() -> Result<(), hyt_read::HytError> {
//! let bus = resolve_by_name("bcm2708_i2c.1")?;
//! let mut sensor = bus.bind_slave_address(SlaveAddress::DEFAULT)?;
//! let reading = take_reading(&mut sensor, &mut ThreadDelay)?;
//! println!("{} {}", reading.humidity, reading.temperature);
//! # Ok(())
//! # }
//! ```
//!
//! # Limitations
//!
//! * Linux only: bus discovery relies on sysfs and binding uses the `I2C_SLAVE` ioctl.
//! * One sensor per process. A trigger and its read are not atomic on the bus.

#![deny(unsafe_code)]

use std::path::PathBuf;

pub mod delay;
pub use delay::ThreadDelay;
pub mod hyt;
pub use hyt::{Reading, decode, take_reading};
pub mod i2c;
pub use i2c::{I2cBus, I2cDevice, SlaveAddress};
pub mod poll;
pub use poll::{Interval, poll};
mod registry;
pub use registry::{Registry, resolve_by_name};

#[cfg(test)]
mod mock;

#[derive(Debug, thiserror::Error)]
pub enum HytError {
    #[error("opening directory {}", path.display())]
    /// The adapter registry is missing, usually because `i2c-dev` is not loaded.
    DirectoryOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("reading directory {}", path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("reading {}", path.display())]
    /// An adapter's `name` descriptor could not be opened or read.
    DescriptorRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not find i2c bus {0}")]
    BusNotFound(String),

    #[error("opening {}", path.display())]
    DeviceOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("bad slave address '{0}'")]
    InvalidSlaveAddress(String),

    #[error("slave address {0} outside legal range")]
    SlaveAddressOutOfRange(i64),

    #[error("ioctl(I2C_SLAVE)")]
    SlaveBind(#[source] std::io::Error),

    #[error("writing to i2c")]
    IoWrite(#[source] std::io::Error),

    #[error("reading from i2c")]
    IoRead(#[source] std::io::Error),

    #[error("short read ({0} bytes)")]
    /// The sensor answered with fewer bytes than a full measurement frame.
    ShortRead(usize),
}
