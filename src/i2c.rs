use crate::HytError;
use std::{
    fmt,
    fs::{File, OpenOptions},
    io::{self, Read, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

/// 7-bit I2C slave address restricted to the non-reserved range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlaveAddress(u8);

impl SlaveAddress {
    pub const MIN: u8 = 0x03;
    pub const MAX: u8 = 0x77;
    /// Factory address of HYT sensors.
    pub const DEFAULT: SlaveAddress = SlaveAddress(0x28);

    pub fn new(address: u8) -> Result<Self, HytError> {
        Self::try_from(i64::from(address))
    }
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for SlaveAddress {
    type Error = HytError;
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match u8::try_from(value) {
            Ok(address) if (Self::MIN..=Self::MAX).contains(&address) => Ok(SlaveAddress(address)),
            _ => Err(HytError::SlaveAddressOutOfRange(value)),
        }
    }
}

/// Accepts the same spellings as C `strtol` with base 0: `0x28`, `050` and `40`
/// are all the same address. Trailing garbage is rejected.
impl FromStr for SlaveAddress {
    type Err = HytError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = parse_c_integer(s).ok_or_else(|| HytError::InvalidSlaveAddress(s.to_string()))?;
        Self::try_from(value)
    }
}

impl fmt::Display for SlaveAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}

fn parse_c_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let (radix, digits) = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        (16, hex)
    } else if digits.len() > 1 && digits.starts_with('0') {
        (8, &digits[1..])
    } else {
        (10, digits)
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    // Digits are validated above, so the only failure left is overflow,
    // which saturates like strtol.
    Some(match i64::from_str_radix(digits, radix) {
        Ok(magnitude) if negative => -magnitude,
        Ok(magnitude) => magnitude,
        Err(_) if negative => i64::MIN,
        Err(_) => i64::MAX,
    })
}

/// An open `/dev/i2c-*` node with no slave address bound yet.
#[derive(Debug)]
pub struct I2cBus {
    file: File,
    path: PathBuf,
}

impl I2cBus {
    /// Opens a device node read/write.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, HytError> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|source| HytError::DeviceOpen {
                path: path.to_path_buf(),
                source,
            })?;
        log::debug!("Opened {}", path.display());
        Ok(I2cBus {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directs all further reads and writes on this bus to `address`.
    ///
    /// Consumes the bus, so an address can only be bound once per handle.
    pub fn bind_slave_address(self, address: SlaveAddress) -> Result<I2cDevice, HytError> {
        ioctl::set_slave_address(&self.file, address).map_err(HytError::SlaveBind)?;
        log::info!("Bound {} to slave {address}", self.path.display());
        Ok(I2cDevice { bus: self, address })
    }
}

/// A bus bound to one slave address.
///
/// Plain reads and writes become I2C read and write transfers addressed to
/// that slave.
#[derive(Debug)]
pub struct I2cDevice {
    bus: I2cBus,
    address: SlaveAddress,
}

impl I2cDevice {
    pub fn address(&self) -> SlaveAddress {
        self.address
    }
    pub fn path(&self) -> &Path {
        self.bus.path()
    }
}

impl Read for I2cDevice {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.bus.file.read(buf)
    }
}

impl Write for I2cDevice {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bus.file.write(buf)
    }
    fn flush(&mut self) -> io::Result<()> {
        self.bus.file.flush()
    }
}

#[allow(unsafe_code)]
mod ioctl {
    use super::SlaveAddress;
    use std::{fs::File, io, os::fd::AsRawFd};

    // <linux/i2c-dev.h>
    const I2C_SLAVE: u16 = 0x0703;

    nix::ioctl_write_int_bad!(i2c_slave, I2C_SLAVE);

    pub(super) fn set_slave_address(file: &File, address: SlaveAddress) -> io::Result<()> {
        // SAFETY: the fd stays open for the borrow of `file`, and I2C_SLAVE
        // takes its argument by value.
        unsafe { i2c_slave(file.as_raw_fd(), address.get().into()) }?;
        Ok(())
    }
}
