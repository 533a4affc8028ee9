use clap::{ArgGroup, Parser};
use hyt_read::{I2cBus, Interval, Reading, SlaveAddress, ThreadDelay, poll, resolve_by_name};
use std::{io::Write, path::PathBuf};

/// Read humidity and temperature from a HYT sensor on an I2C bus.
///
/// Prints humidity (%) and temperature (°C) separated by a space, one line
/// per reading.
#[derive(Debug, Parser)]
#[command(version, about)]
#[command(group(ArgGroup::new("source").required(true).args(["bus", "device"])))]
struct Cli {
    /// Open the I2C bus named NAME (e.g. bcm2708_i2c.1)
    #[arg(short, long, value_name = "NAME")]
    bus: Option<String>,

    /// Open the I2C device file PATH (e.g. /dev/i2c-0)
    #[arg(short, long, value_name = "PATH")]
    device: Option<PathBuf>,

    /// Target I2C slave address
    #[arg(short, long, value_name = "ADDR", default_value_t = SlaveAddress::DEFAULT)]
    address: SlaveAddress,

    /// Read data every SECS seconds; 0 reads once
    #[arg(short, long, value_name = "SECS", default_value_t = 0)]
    interval: u64,

    /// Print only temperature
    #[arg(short = 'T', long)]
    temperature: bool,

    /// Print only humidity
    #[arg(short = 'H', long)]
    humidity: bool,
}

/// Which values go on each output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fields {
    humidity: bool,
    temperature: bool,
}

impl Fields {
    /// Asking for neither value prints both.
    fn new(humidity: bool, temperature: bool) -> Self {
        if humidity || temperature {
            Fields {
                humidity,
                temperature,
            }
        } else {
            Fields {
                humidity: true,
                temperature: true,
            }
        }
    }

    fn format(self, reading: &Reading) -> String {
        let mut values = Vec::with_capacity(2);
        if self.humidity {
            values.push(format!("{:.6}", reading.humidity));
        }
        if self.temperature {
            values.push(format!("{:.6}", reading.temperature));
        }
        values.join(" ")
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let bus = match (cli.bus.as_deref(), cli.device.as_deref()) {
        (Some(name), None) => resolve_by_name(name)?,
        (None, Some(path)) => I2cBus::open(path)?,
        _ => unreachable!("clap requires exactly one of --bus or --device"),
    };
    let mut sensor = bus.bind_slave_address(cli.address)?;

    let fields = Fields::new(cli.humidity, cli.temperature);
    let mut stdout = std::io::stdout().lock();
    poll(
        &mut sensor,
        &mut ThreadDelay,
        Interval::from_secs(cli.interval),
        |reading| -> anyhow::Result<()> {
            writeln!(stdout, "{}", fields.format(&reading))?;
            Ok(())
        },
    )
}
