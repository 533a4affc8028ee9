use eh1::delay::DelayNs;
use std::{thread, time::Duration};

/// [`DelayNs`] that parks the calling thread.
///
/// Used for the sensor's conversion time and for the pause between poll cycles.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadDelay;

impl DelayNs for ThreadDelay {
    /// Sleeps at least `ns`; the OS may round up to its timer granularity.
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(ns.into()));
    }
    /// One sleep instead of the trait's default chunking into `delay_ns` calls.
    fn delay_us(&mut self, us: u32) {
        thread::sleep(Duration::from_micros(us.into()));
    }
    /// Used for the 60 ms conversion wait and, one second at a time, for the
    /// poll pause.
    fn delay_ms(&mut self, ms: u32) {
        thread::sleep(Duration::from_millis(ms.into()));
    }
}

#[cfg(test)]
mod test {
    use super::ThreadDelay;
    use eh1::delay::DelayNs;
    use std::time::{Duration, Instant};

    #[test]
    fn delay_ms_blocks_at_least_requested_time() {
        let now = Instant::now();
        ThreadDelay.delay_ms(20);
        assert!(now.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn delay_us_is_a_single_sleep_of_the_full_length() {
        let now = Instant::now();
        ThreadDelay.delay_us(5_000);
        assert!(now.elapsed() >= Duration::from_micros(5_000));
    }
}
