#![doc(
    html_logo_url = "https://raw.githubusercontent.com/nav-solutions/.github/master/logos/logo2.jpg"
)]
#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

/*
 * LORAEDGE-GNSS is part of the nav-solutions framework.
 * Authors: Guillaume W. Bres <guillaume.bressaix@gmail.com> et al,
 * (cf. https://github.com/nav-solutions/loraedge-gnss/graphs/contributors)
 * This framework is shipped under Mozilla Public V2 license.
 *
 * Documentation: https://github.com/nav-solutions/loraedge-gnss
 */

extern crate gnss_rs as gnss;

pub mod almanac;
pub mod device;
pub mod error;
pub mod scan;
pub mod ticker;
pub mod time;

pub mod prelude {
    pub use crate::{
        almanac::AlmanacRecord,
        device::{Device, Transport},
        error::{InvalidRecordLength, ScanResultError, TimeError, TimeUnavailable},
        scan::{Destination, ScanOutcome, ScanResultRef},
        ticker::{SystemTicker, Ticker},
        time::{GpsTime, UtcTime, WeekRollover},
    };

    // framework time types
    pub use hifitime::prelude::{Epoch, TimeScale};

    // GNSS types
    pub use gnss::prelude::{Constellation, SV};
}
