use thiserror::Error;

use crate::almanac::ALMANAC_RECORD_SIZE;

/// Modem time is not acquired yet: the time register still reads as
/// the zero sentinel. Recoverable, poll again once a scan or an
/// applicative beacon completed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
#[error("modem time not acquired yet")]
pub struct TimeUnavailable;

/// Time resolution failure at the device level.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum TimeError<E> {
    /// Transport failure, carried untouched.
    #[error("transport error")]
    Link(E),

    /// Modem time not acquired yet.
    #[error("modem time not acquired yet")]
    Unavailable,
}

impl<E> From<TimeUnavailable> for TimeError<E> {
    fn from(_: TimeUnavailable) -> Self {
        Self::Unavailable
    }
}

/// Scan result classification failure.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum ScanResultError {
    /// Frame too short to carry the requested field.
    #[error("scan result too short ({size} bytes)")]
    TooShort { size: usize },

    /// Destination byte does not map to any known consumer.
    #[error("unknown destination code {0:#04x}")]
    UnknownDestination(u8),

    /// Event byte does not map to any known outcome.
    #[error("unknown scan outcome code {0:#04x}")]
    UnknownOutcome(u8),

    /// Frame is addressed to the solver: it carries a NAV message,
    /// not an outcome.
    #[error("result is addressed to the solver")]
    SolverDestined,

    /// Frame is addressed to the host: it carries no NAV message.
    #[error("result is addressed to the host")]
    HostDestined,
}

/// Buffer does not have the size of an almanac record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
#[error("invalid almanac record length: {size} bytes (expected {})", ALMANAC_RECORD_SIZE)]
pub struct InvalidRecordLength {
    pub size: usize,
}
