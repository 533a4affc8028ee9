use crate::{HytError, Reading, take_reading};
use eh1::delay::DelayNs;
use std::io::{Read, Write};

/// Pause between poll cycles, in whole seconds. Zero means a single reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Interval(u64);

impl Interval {
    pub const ONCE: Interval = Interval(0);

    pub const fn from_secs(secs: u64) -> Self {
        Interval(secs)
    }
    pub const fn as_secs(self) -> u64 {
        self.0
    }
    pub const fn repeats(self) -> bool {
        self.0 > 0
    }
    fn pause<D: DelayNs>(self, delay: &mut D) {
        for _ in 0..self.0 {
            delay.delay_ms(1000);
        }
    }
}

/// Takes readings from `channel` and hands each one to `on_reading`.
///
/// With [`Interval::ONCE`] this returns after the first reading; otherwise it
/// runs until a reading or `on_reading` fails, and returns that error.
pub fn poll<C, D, F, E>(
    channel: &mut C,
    delay: &mut D,
    interval: Interval,
    mut on_reading: F,
) -> Result<(), E>
where
    C: Read + Write,
    D: DelayNs,
    F: FnMut(Reading) -> Result<(), E>,
    E: From<HytError>,
{
    loop {
        let reading = take_reading(channel, delay)?;
        on_reading(reading)?;
        if !interval.repeats() {
            return Ok(());
        }
        log::debug!("Next reading in {}s", interval.as_secs());
        interval.pause(delay);
    }
}
