#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ScanResultError;

/// Position of the destination byte in a scan result frame.
const DESTINATION_INDEX: usize = 0;

/// Position of the event code in a host destined scan result frame.
const EVENT_INDEX: usize = 1;

/// Consumer a scan result is addressed to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Destination {
    /// Result is meant for the host MCU: a scan outcome.
    Host,

    /// Result is a NAV message, to forward to the remote solver.
    Solver,
}

impl Destination {
    /// Maps the destination byte of a scan result frame.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0x00 => Some(Self::Host),
            0x01 => Some(Self::Solver),
            _ => None,
        }
    }
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Host => write!(f, "host"),
            Self::Solver => write!(f, "solver"),
        }
    }
}

/// Outcome of a GNSS scan, reported once the modem raises its scan
/// done event.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ScanOutcome {
    /// Almanac update rejected: per satellite CRC mismatch.
    AlmanacUpdateCrcError,

    /// Almanac update failed: flash integrity error.
    AlmanacUpdateFlashIntegrityError,

    /// Almanac update format not supported by this firmware.
    AlmanacVersionNotSupported,

    /// Scan completed nominally.
    ProcessOk,

    /// IQ capture failed.
    IqCaptureFailed,

    /// Modem time is not known yet: scan aborted.
    NoTime,

    /// Capture completed but no satellite was caught.
    NoSatelliteDetected,

    /// Global almanac CRC check failed.
    GlobalAlmanacCrcError,

    /// Stored almanac too old to attempt a capture.
    AlmanacTooOld,
}

impl ScanOutcome {
    /// Maps the event code of a host destined scan result frame.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0x00 => Some(Self::AlmanacUpdateCrcError),
            0x01 => Some(Self::AlmanacUpdateFlashIntegrityError),
            0x02 => Some(Self::AlmanacVersionNotSupported),
            0x03 => Some(Self::ProcessOk),
            0x04 => Some(Self::IqCaptureFailed),
            0x05 => Some(Self::NoTime),
            0x06 => Some(Self::NoSatelliteDetected),
            0x07 => Some(Self::GlobalAlmanacCrcError),
            0x08 => Some(Self::AlmanacTooOld),
            _ => None,
        }
    }
}

impl std::fmt::Display for ScanOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlmanacUpdateCrcError => write!(f, "almanac update CRC error"),
            Self::AlmanacUpdateFlashIntegrityError => {
                write!(f, "almanac update flash integrity error")
            },
            Self::AlmanacVersionNotSupported => write!(f, "almanac version not supported"),
            Self::ProcessOk => write!(f, "process OK"),
            Self::IqCaptureFailed => write!(f, "IQ capture failed"),
            Self::NoTime => write!(f, "no time"),
            Self::NoSatelliteDetected => write!(f, "no satellite detected"),
            Self::GlobalAlmanacCrcError => write!(f, "global almanac CRC error"),
            Self::AlmanacTooOld => write!(f, "almanac too old"),
        }
    }
}

/// Scan result frame, as streamed out of the modem after a scan done
/// event.
///
/// Byte 0 addresses the frame to its consumer. Host destined frames
/// carry a [ScanOutcome] next; solver destined frames carry the NAV
/// message instead.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ScanResultRef<'a>(&'a [u8]);

impl<'a> ScanResultRef<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self(buffer)
    }

    /// Raw frame content.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.0
    }

    /// Consumer this frame is addressed to. Empty frames and unknown
    /// destination codes are malformations.
    pub fn destination(&self) -> Result<Destination, ScanResultError> {
        let code = self
            .0
            .get(DESTINATION_INDEX)
            .copied()
            .ok_or(ScanResultError::TooShort { size: self.0.len() })?;

        Destination::from_code(code).ok_or(ScanResultError::UnknownDestination(code))
    }

    /// Scan outcome, defined for host destined frames only: a solver
    /// destined frame yields [ScanResultError::SolverDestined].
    pub fn outcome(&self) -> Result<ScanOutcome, ScanResultError> {
        match self.destination()? {
            Destination::Host => {},
            Destination::Solver => return Err(ScanResultError::SolverDestined),
        }

        let code = self
            .0
            .get(EVENT_INDEX)
            .copied()
            .ok_or(ScanResultError::TooShort { size: self.0.len() })?;

        ScanOutcome::from_code(code).ok_or(ScanResultError::UnknownOutcome(code))
    }

    /// NAV message of a solver destined frame, to forward to the
    /// positioning solver untouched.
    pub fn solver_payload(&self) -> Result<&'a [u8], ScanResultError> {
        match self.destination()? {
            // classification above guarantees at least one byte
            Destination::Solver => Ok(&self.0[DESTINATION_INDEX + 1..]),
            Destination::Host => Err(ScanResultError::HostDestined),
        }
    }
}
