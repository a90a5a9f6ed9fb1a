use log::{debug, warn};

mod transport;

pub use transport::Transport;

use crate::{
    almanac::AlmanacRecord,
    error::TimeError,
    ticker::Ticker,
    time::{GpsTime, UtcTime, WeekRollover},
};

/// Decoding front end over a modem [Transport].
///
/// One transport exchange at most per operation: link failures are
/// returned to the caller untouched, never retried here.
pub struct Device<T: Transport> {
    pub transport: T,
}

impl<T: Transport> Device<T> {
    /// Builds a [Device] over the supplied link.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Reads the modem time register, raw.
    pub fn gps_time(&mut self) -> Result<GpsTime, T::Error> {
        let gps_time = self.transport.gps_time()?;
        debug!("modem time: {} s (GPS)", gps_time.as_secs());
        Ok(gps_time)
    }

    /// Current UTC-equivalent time.
    ///
    /// [TimeError::Unavailable] while the modem has no time yet: time
    /// is acquired from a first scan or an applicative beacon, poll
    /// again once one completed.
    pub fn utc_time(&mut self) -> Result<UtcTime, TimeError<T::Error>> {
        let gps_time = self.gps_time().map_err(TimeError::Link)?;
        Ok(gps_time.to_utc()?)
    }

    /// Current GPS week number rollover.
    ///
    /// [TimeError::Unavailable] while the modem has no time yet.
    pub fn week_rollover(&mut self) -> Result<WeekRollover, TimeError<T::Error>> {
        let gps_time = self.gps_time().map_err(TimeError::Link)?;
        Ok(gps_time.week_rollover()?)
    }

    /// Reads back one almanac slot, raw.
    pub fn read_almanac(&mut self, slot: u8) -> Result<AlmanacRecord, T::Error> {
        let record = self.transport.read_almanac(slot)?;
        debug!("almanac slot {}: {:?}", slot, record.sv());
        Ok(record)
    }

    /// Almanac issue date of one satellite slot.
    ///
    /// `None` for slots that do not describe any satellite and while
    /// `rollover` is unresolved. Link failures propagate untouched.
    pub fn almanac_date(
        &mut self,
        slot: u8,
        rollover: WeekRollover,
    ) -> Result<Option<UtcTime>, T::Error> {
        let record = self.read_almanac(slot)?;
        Ok(record.date(rollover))
    }

    /// Polls the modem through the firmware supplied [Ticker] until
    /// time is acquired.
    ///
    /// The query is repeated every `period_ms` as long as the modem
    /// answers "no time yet", up to `timeout_ms`. A link failure
    /// aborts immediately: failed exchanges are never reissued.
    pub fn wait_for_utc_time<K: Ticker>(
        &mut self,
        ticker: &mut K,
        timeout_ms: u32,
        period_ms: u32,
    ) -> Result<UtcTime, TimeError<T::Error>> {
        let start = ticker.ticks_ms();

        loop {
            match self.utc_time() {
                Ok(utc) => {
                    debug!("modem time: {}", utc);
                    return Ok(utc);
                },
                Err(TimeError::Unavailable) => {},
                Err(e) => return Err(e),
            }

            if ticker.elapsed_ms(start) >= timeout_ms {
                warn!("modem time still unavailable after {} ms", timeout_ms);
                return Err(TimeError::Unavailable);
            }

            ticker.wait_ms(period_ms);
        }
    }
}
