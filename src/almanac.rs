use gnss::prelude::{Constellation, SV};

use crate::{
    error::InvalidRecordLength,
    time::{
        DAYS_PER_WEEK, GPS_EPOCH_UNIX_SECONDS, HOURS_PER_DAY, SECS_PER_HOUR, UtcTime,
        WEEKS_PER_ROLLOVER, WeekRollover,
    },
};

/// Size of the almanac entry of a single satellite, in bytes.
pub const ALMANAC_RECORD_SIZE: usize = 22;

/// Constellation id of GPS satellites.
pub const CONSTELLATION_ID_GPS: u8 = 0x01;

/// Constellation id of BeiDou satellites.
pub const CONSTELLATION_ID_BEIDOU: u8 = 0x02;

/// Constellation id stored in slots that do not describe any
/// satellite.
pub const CONSTELLATION_ID_UNDEFINED: u8 = 0x08;

/// Number of almanac slots assigned to GPS.
const GPS_SLOTS: u8 = 32;

/// First almanac slot assigned to BeiDou.
const BEIDOU_SLOT_OFFSET: u8 = 64;

/// Number of almanac slots assigned to BeiDou.
const BEIDOU_SLOTS: u8 = 63;

const SLOT_INDEX: usize = 0;
const DAY_OFFSET_LSB_INDEX: usize = 1;
const DAY_OFFSET_MSB_INDEX: usize = 2;
const CONSTELLATION_ID_INDEX: usize = 21;

/// Raw almanac entry of a single satellite, as read back from the
/// modem flash.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AlmanacRecord([u8; ALMANAC_RECORD_SIZE]);

impl AlmanacRecord {
    pub fn new(bytes: [u8; ALMANAC_RECORD_SIZE]) -> Self {
        Self(bytes)
    }

    /// Raw record content.
    pub fn as_bytes(&self) -> &[u8; ALMANAC_RECORD_SIZE] {
        &self.0
    }

    /// Almanac slot this entry was stored in.
    pub fn slot(&self) -> u8 {
        self.0[SLOT_INDEX]
    }

    /// Almanac issue date, in days elapsed since the last week number
    /// rollover.
    pub fn day_offset(&self) -> u16 {
        u16::from_le_bytes([self.0[DAY_OFFSET_LSB_INDEX], self.0[DAY_OFFSET_MSB_INDEX]])
    }

    /// Raw constellation id.
    pub fn constellation_id(&self) -> u8 {
        self.0[CONSTELLATION_ID_INDEX]
    }

    /// True when this slot does not describe any satellite.
    pub fn is_undefined(&self) -> bool {
        self.constellation_id() == CONSTELLATION_ID_UNDEFINED
    }

    /// Constellation this satellite belongs to.
    pub fn constellation(&self) -> Option<Constellation> {
        match self.constellation_id() {
            CONSTELLATION_ID_GPS => Some(Constellation::GPS),
            CONSTELLATION_ID_BEIDOU => Some(Constellation::BeiDou),
            _ => None,
        }
    }

    /// Satellite this entry describes, mapping the almanac slot
    /// assignment to PRN numbers.
    pub fn sv(&self) -> Option<SV> {
        let constellation = self.constellation()?;
        let slot = self.slot();

        match constellation {
            Constellation::GPS => {
                if slot >= GPS_SLOTS {
                    return None;
                }

                Some(SV::new(constellation, slot + 1))
            },
            Constellation::BeiDou => {
                if slot < BEIDOU_SLOT_OFFSET || slot >= BEIDOU_SLOT_OFFSET + BEIDOU_SLOTS {
                    return None;
                }

                Some(SV::new(constellation, slot - BEIDOU_SLOT_OFFSET + 1))
            },
            _ => None,
        }
    }

    /// Almanac issue date, at day granularity.
    ///
    /// `None` for undefined slots and while the week number rollover
    /// is unresolved: cycle 0 dates cannot be told apart from "time
    /// unknown" and are suppressed as well.
    pub fn date(&self, rollover: WeekRollover) -> Option<UtcTime> {
        if self.is_undefined() || rollover.is_unresolved() {
            return None;
        }

        let days = (rollover.cycles() as u32)
            .wrapping_mul(WEEKS_PER_ROLLOVER)
            .wrapping_mul(DAYS_PER_WEEK)
            .wrapping_add(self.day_offset() as u32);

        Some(UtcTime::new(GPS_EPOCH_UNIX_SECONDS.wrapping_add(
            days.wrapping_mul(HOURS_PER_DAY * SECS_PER_HOUR),
        )))
    }
}

impl TryFrom<&[u8]> for AlmanacRecord {
    type Error = InvalidRecordLength;

    /// Validates the buffer length, then captures the record.
    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        let bytes = slice
            .try_into()
            .map_err(|_| InvalidRecordLength { size: slice.len() })?;

        Ok(Self(bytes))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn new_record(slot: u8, day_offset: u16, constellation_id: u8) -> AlmanacRecord {
        let mut bytes = [0; ALMANAC_RECORD_SIZE];

        bytes[0] = slot;
        bytes[1..3].copy_from_slice(&day_offset.to_le_bytes());
        bytes[21] = constellation_id;

        AlmanacRecord::new(bytes)
    }

    #[test]
    fn test_day_offset_is_little_endian() {
        let mut bytes = [0; ALMANAC_RECORD_SIZE];

        bytes[1] = 0x34;
        bytes[2] = 0x12;

        assert_eq!(AlmanacRecord::new(bytes).day_offset(), 0x1234);
    }

    #[test]
    fn test_undefined_slot() {
        let record = new_record(40, 100, CONSTELLATION_ID_UNDEFINED);

        assert!(record.is_undefined());
        assert_eq!(record.constellation(), None);
        assert_eq!(record.sv(), None);
        assert_eq!(record.date(WeekRollover::new(2)), None);
    }

    #[test]
    fn test_unresolved_rollover() {
        let record = new_record(0, 100, CONSTELLATION_ID_GPS);

        assert_eq!(record.date(WeekRollover::new(0)), None);
        assert!(record.date(WeekRollover::new(1)).is_some());
    }

    #[test]
    fn test_first_cycle_date() {
        // cycle 1, day 0: exactly 1024 weeks past the GPS epoch
        let record = new_record(0, 0, CONSTELLATION_ID_GPS);

        let date = record.date(WeekRollover::new(1)).unwrap();
        assert_eq!(date.as_secs(), 935_280_000);
    }

    #[test]
    fn test_gps_date() {
        let record = new_record(7, 100, CONSTELLATION_ID_GPS);

        let date = record.date(WeekRollover::new(2)).unwrap();
        assert_eq!(date.as_secs(), 1_563_235_200);

        // 2019-07-16, day granularity
        let (y, m, d, hh, mm, ss, _) = date.to_epoch().to_gregorian_utc();
        assert_eq!((y, m, d, hh, mm, ss), (2019, 7, 16, 0, 0, 0));
    }

    #[test]
    fn test_sv_slot_assignment() {
        assert_eq!(
            new_record(0, 0, CONSTELLATION_ID_GPS).sv(),
            Some(SV::new(Constellation::GPS, 1)),
        );

        assert_eq!(
            new_record(7, 0, CONSTELLATION_ID_GPS).sv(),
            Some(SV::new(Constellation::GPS, 8)),
        );

        // beidou bank starts at slot 64
        assert_eq!(
            new_record(64, 0, CONSTELLATION_ID_BEIDOU).sv(),
            Some(SV::new(Constellation::BeiDou, 1)),
        );

        assert_eq!(
            new_record(126, 0, CONSTELLATION_ID_BEIDOU).sv(),
            Some(SV::new(Constellation::BeiDou, 63)),
        );

        // out of bank
        assert_eq!(new_record(32, 0, CONSTELLATION_ID_GPS).sv(), None);
        assert_eq!(new_record(3, 0, CONSTELLATION_ID_BEIDOU).sv(), None);
        assert_eq!(new_record(127, 0, CONSTELLATION_ID_BEIDOU).sv(), None);
    }

    #[test]
    fn test_saturated_record() {
        let mut bytes = [0xff; ALMANAC_RECORD_SIZE];
        bytes[21] = CONSTELLATION_ID_UNDEFINED;

        // suppression holds whatever the rest of the record reads
        assert_eq!(AlmanacRecord::new(bytes).date(WeekRollover::new(6)), None);

        let record = AlmanacRecord::new([0xff; ALMANAC_RECORD_SIZE]);
        assert_eq!(record.day_offset(), u16::MAX);
        assert_eq!(record.date(WeekRollover::new(0)), None);

        // saturated fields decode modulo 2^32
        let date = record.date(WeekRollover::new(u8::MAX)).unwrap();
        assert_eq!(date.as_secs(), 694_807_552);
    }

    #[test]
    fn test_record_length_validation() {
        let bytes = [0u8; ALMANAC_RECORD_SIZE];
        assert!(AlmanacRecord::try_from(&bytes[..]).is_ok());

        let short = [0u8; 21];
        assert_eq!(
            AlmanacRecord::try_from(&short[..]),
            Err(InvalidRecordLength { size: 21 }),
        );

        let long = [0u8; 23];
        assert_eq!(
            AlmanacRecord::try_from(&long[..]),
            Err(InvalidRecordLength { size: 23 }),
        );
    }
}
