use crate::{almanac::AlmanacRecord, time::GpsTime};

/// Physical link to the modem.
///
/// The decoders never talk to a bus themselves: firmware supplies the
/// command framing (UART or SPI) behind this trait, and everything
/// read back lands here already stripped of transport framing.
pub trait Transport {
    /// Bus or protocol level failure, carried to the caller untouched.
    type Error;

    /// Reads the modem time register.
    fn gps_time(&mut self) -> Result<GpsTime, Self::Error>;

    /// Reads back the almanac entry of a single satellite slot.
    fn read_almanac(&mut self, slot: u8) -> Result<AlmanacRecord, Self::Error>;
}
