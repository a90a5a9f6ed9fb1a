use std::{
    thread,
    time::{Duration, Instant},
};

/// Coarse millisecond time base, supplied by the firmware.
///
/// The counter is free running and wraps with its 32 bit register:
/// elapsed durations must be measured with [Ticker::elapsed_ms], never
/// by comparing absolute readings.
pub trait Ticker {
    /// Milliseconds elapsed since an arbitrary origin.
    fn ticks_ms(&mut self) -> u32;

    /// Blocks for `ms` milliseconds.
    fn wait_ms(&mut self, ms: u32);

    /// Milliseconds elapsed since the `start` reading, immune to
    /// counter wrap around.
    fn elapsed_ms(&mut self, start: u32) -> u32 {
        self.ticks_ms().wrapping_sub(start)
    }
}

/// [Ticker] over the OS clock, for host side applications.
pub struct SystemTicker {
    start: Instant,
}

impl SystemTicker {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemTicker {
    fn default() -> Self {
        Self::new()
    }
}

impl Ticker for SystemTicker {
    fn ticks_ms(&mut self) -> u32 {
        self.start.elapsed().as_millis() as u32
    }

    fn wait_ms(&mut self, ms: u32) {
        thread::sleep(Duration::from_millis(ms as u64));
    }
}
