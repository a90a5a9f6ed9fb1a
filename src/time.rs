use hifitime::prelude::Epoch;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::TimeUnavailable;

/// GPS epoch (1980-01-06T00:00:00 UTC) expressed in Unix seconds.
pub const GPS_EPOCH_UNIX_SECONDS: u32 = 315_964_800;

/// Leap seconds elapsed between the GPS epoch and UTC, as hardcoded
/// by the modem firmware (18 s since 2017-01-01).
pub const GPS_UTC_LEAP_SECONDS: u32 = 18;

pub const SECS_PER_HOUR: u32 = 3600;

pub const HOURS_PER_DAY: u32 = 24;

pub const DAYS_PER_WEEK: u32 = 7;

/// Number of weeks covered by the 10 bit GPS week counter.
pub const WEEKS_PER_ROLLOVER: u32 = 1024;

/// Duration of one complete GPS week number cycle, in seconds.
pub const SECS_PER_ROLLOVER: u32 =
    SECS_PER_HOUR * HOURS_PER_DAY * DAYS_PER_WEEK * WEEKS_PER_ROLLOVER;

/// Modem time: seconds elapsed since the GPS epoch, truncated to 32
/// bits. The modem reports 0 until time is acquired from a first scan
/// or an applicative beacon.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GpsTime(u32);

impl GpsTime {
    /// Builds a [GpsTime] from the raw register value.
    pub fn new(secs: u32) -> Self {
        Self(secs)
    }

    /// Seconds elapsed since the GPS epoch.
    pub fn as_secs(&self) -> u32 {
        self.0
    }

    /// True while the modem has not acquired time yet.
    pub fn is_unavailable(&self) -> bool {
        self.0 == 0
    }

    /// Resolves into a [UtcTime] by compensating the GPS to UTC
    /// offset, leap seconds included.
    pub fn to_utc(&self) -> Result<UtcTime, TimeUnavailable> {
        if self.is_unavailable() {
            return Err(TimeUnavailable);
        }

        // the counter wraps with its 32 bit register
        Ok(UtcTime(
            self.0
                .wrapping_add(GPS_EPOCH_UNIX_SECONDS - GPS_UTC_LEAP_SECONDS),
        ))
    }

    /// Number of complete [WEEKS_PER_ROLLOVER] week cycles elapsed
    /// since the GPS epoch.
    pub fn week_rollover(&self) -> Result<WeekRollover, TimeUnavailable> {
        if self.is_unavailable() {
            return Err(TimeUnavailable);
        }

        Ok(WeekRollover((self.0 / SECS_PER_ROLLOVER) as u8))
    }

    /// Expresses the modem time as an [Epoch] in the GPST timescale.
    pub fn to_epoch(&self) -> Result<Epoch, TimeUnavailable> {
        if self.is_unavailable() {
            return Err(TimeUnavailable);
        }

        Ok(Epoch::from_gpst_seconds(self.0 as f64))
    }
}

/// Absolute UTC-equivalent time, in seconds elapsed since
/// 1970-01-01T00:00:00 UTC.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UtcTime(u32);

impl UtcTime {
    pub fn new(secs: u32) -> Self {
        Self(secs)
    }

    /// Seconds elapsed since the Unix epoch.
    pub fn as_secs(&self) -> u32 {
        self.0
    }

    /// Expresses this timestamp as an [Epoch].
    pub fn to_epoch(&self) -> Epoch {
        Epoch::from_unix_seconds(self.0 as f64)
    }
}

impl std::fmt::Display for UtcTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_epoch())
    }
}

/// Number of complete 1024 week cycles elapsed since the GPS epoch.
///
/// 0 is ambiguous: the modem reports it during the very first cycle
/// and while time is still unknown. Consumers treat 0 as "unresolved"
/// and suppress almanac dating until the value becomes meaningful.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WeekRollover(u8);

impl WeekRollover {
    pub fn new(cycles: u8) -> Self {
        Self(cycles)
    }

    /// Number of complete cycles.
    pub fn cycles(&self) -> u8 {
        self.0
    }

    /// True while the rollover cannot be told apart from "time not
    /// resolved yet".
    pub fn is_unresolved(&self) -> bool {
        self.0 == 0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use hifitime::prelude::TimeScale;

    #[test]
    fn test_time_unavailable() {
        let gps_time = GpsTime::new(0);

        assert!(gps_time.is_unavailable());
        assert!(gps_time.to_utc().is_err());
        assert!(gps_time.to_epoch().is_err());
        assert!(gps_time.week_rollover().is_err());
    }

    #[test]
    fn test_utc_resolution() {
        // 2023-01-01T00:00:00 GPST
        let gps_time = GpsTime::new(1356566400);

        let utc = gps_time.to_utc().unwrap();
        assert_eq!(utc.as_secs(), 1672531182);

        // 18 s behind GPS time
        let (y, m, d, hh, mm, ss, _) = utc.to_epoch().to_gregorian_utc();
        assert_eq!((y, m, d, hh, mm, ss), (2022, 12, 31, 23, 59, 42));
    }

    #[test]
    fn test_utc_round_trip() {
        for secs in [1u32, 1000, 619315200, 1356566400, u32::MAX] {
            let gps_time = GpsTime::new(secs);
            let utc = gps_time.to_utc().unwrap();

            assert_eq!(
                utc.as_secs()
                    .wrapping_sub(GPS_EPOCH_UNIX_SECONDS - GPS_UTC_LEAP_SECONDS),
                secs
            );
        }
    }

    #[test]
    fn test_offset_agrees_with_timescale_conversion() {
        let gps_time = GpsTime::new(1356566400);

        let gpst = gps_time.to_epoch().unwrap();

        assert_eq!(
            gpst,
            Epoch::from_gregorian(2023, 1, 1, 0, 0, 0, 0, TimeScale::GPST)
        );

        // the fixed offset arithmetic lands on the same UTC datetime
        // as the complete timescale conversion
        let utc = gps_time.to_utc().unwrap();
        assert_eq!(gpst.to_gregorian_utc(), utc.to_epoch().to_gregorian_utc());
    }

    #[test]
    fn test_week_rollover() {
        assert_eq!(SECS_PER_ROLLOVER, 619_315_200);

        for cycles in 1..=6u8 {
            // first second of the cycle
            let gps_time = GpsTime::new(cycles as u32 * SECS_PER_ROLLOVER);
            assert_eq!(gps_time.week_rollover().unwrap().cycles(), cycles);

            // last second of the previous cycle
            let gps_time = GpsTime::new(cycles as u32 * SECS_PER_ROLLOVER - 1);
            assert_eq!(gps_time.week_rollover().unwrap().cycles(), cycles - 1);
        }

        // counter exhaustion
        let gps_time = GpsTime::new(u32::MAX);
        assert_eq!(gps_time.week_rollover().unwrap().cycles(), 6);
    }

    #[test]
    fn test_unresolved_rollover() {
        assert!(WeekRollover::new(0).is_unresolved());
        assert!(!WeekRollover::new(2).is_unresolved());

        // cycle 0 cannot be told apart from "time unknown"
        let gps_time = GpsTime::new(1000);
        assert!(gps_time.week_rollover().unwrap().is_unresolved());
    }
}
