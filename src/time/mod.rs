//! Time representation and conversions
//!
//! [Instant] is a count of seconds elapsed since 1970/01/01 00:00:00, in the
//! timescale chosen by the caller. It does not carry the timescale itself:
//! converting between GPST, GST, BDT and UTC is an explicit operation.
use std::f64::consts::PI;
use std::ops::{Add, Sub};

use hifitime::Epoch;

mod format;
pub mod leap;
mod week;

pub use format::parse_instant_field;
pub use week::adjust_gps_week;

/// 2000/01/01 12:00:00, J2000 reference
pub(crate) const J2000: [f64; 6] = [2000.0, 1.0, 1.0, 12.0, 0.0, 0.0];

/// GPS week counter origin
pub(crate) const GPST0: [f64; 6] = [1980.0, 1.0, 6.0, 0.0, 0.0, 0.0];

/// Galileo week counter origin
pub(crate) const GST0: [f64; 6] = [1999.0, 8.0, 22.0, 0.0, 0.0, 0.0];

/// BeiDou week counter origin
pub(crate) const BDT0: [f64; 6] = [2006.0, 1.0, 1.0, 0.0, 0.0, 0.0];

/// GPST - BDT (s)
const GPST_BDT_OFFSET: f64 = 14.0;

/// First day of each month, in a non leap year
const DAY_OF_YEAR: [i64; 12] = [1, 32, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335];

/// Days per month over a 4 year cycle starting on a non leap year
const DAYS_PER_MONTH: [i64; 48] = [
    31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31,
    31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31,
];

/// Integral seconds elapsed since 1970/01/01 plus a fractional remainder
/// that always lies within [0, 1).
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Instant {
    seconds: i64,
    fraction: f64,
}

impl Instant {
    /// 1970/01/01 00:00:00, also returned for calendar dates
    /// that cannot be represented.
    pub const ZERO: Self = Self {
        seconds: 0,
        fraction: 0.0,
    };

    /// Builds a new [Instant], carrying any fraction overflow
    /// into the integral part.
    pub fn new(seconds: i64, fraction: f64) -> Self {
        let carry = fraction.floor();
        let mut s = Self {
            seconds: seconds + carry as i64,
            fraction: fraction - carry,
        };
        if s.fraction >= 1.0 {
            s.seconds += 1;
            s.fraction -= 1.0;
        }
        s
    }
    /// Integral seconds
    pub fn seconds(&self) -> i64 {
        self.seconds
    }
    /// Fractional second, within [0, 1)
    pub fn fraction(&self) -> f64 {
        self.fraction
    }
    /// True for the [Instant::ZERO] sentinel
    pub fn is_zero(&self) -> bool {
        self.seconds == 0 && self.fraction == 0.0
    }
    /// Converts calendar fields {year, month, day, hour, minute, second}
    /// to an [Instant]. Leap years follow the 4 year rule, which holds over 1901-2099.
    /// Years outside 1970-2099 and months outside 1-12 are not representable:
    /// [Instant::ZERO] is returned in that case.
    /// ```
    /// use rtkcore::prelude::Instant;
    /// let t = Instant::from_calendar([1980.0, 1.0, 6.0, 0.0, 0.0, 0.0]);
    /// assert_eq!(t.seconds(), 315964800);
    ///
    /// let t = Instant::from_calendar([1969.0, 12.0, 31.0, 0.0, 0.0, 0.0]);
    /// assert!(t.is_zero());
    /// ```
    pub fn from_calendar(ep: [f64; 6]) -> Self {
        let (year, month, day) = (ep[0] as i64, ep[1] as i64, ep[2] as i64);
        if !(1970..=2099).contains(&year) || !(1..=12).contains(&month) {
            return Self::ZERO;
        }
        let leap = if year % 4 == 0 && month >= 3 { 1 } else { 0 };
        let days = (year - 1970) * 365 + (year - 1969) / 4 + DAY_OF_YEAR[month as usize - 1] + day
            - 2
            + leap;
        let sec = ep[5].floor();
        Self {
            seconds: days * 86400 + (ep[3] as i64) * 3600 + (ep[4] as i64) * 60 + sec as i64,
            fraction: ep[5] - sec,
        }
    }
    /// Converts to calendar fields {year, month, day, hour, minute, second}.
    pub fn to_calendar(&self) -> [f64; 6] {
        let days = self.seconds / 86400;
        let sec = self.seconds - days * 86400;
        let mut day = days % 1461;
        let mut month = 0;
        while month < DAYS_PER_MONTH.len() && day >= DAYS_PER_MONTH[month] {
            day -= DAYS_PER_MONTH[month];
            month += 1;
        }
        [
            (1970 + days / 1461 * 4 + month as i64 / 12) as f64,
            (month % 12 + 1) as f64,
            (day + 1) as f64,
            (sec / 3600) as f64,
            (sec % 3600 / 60) as f64,
            (sec % 60) as f64 + self.fraction,
        ]
    }
    /// Returns self + `dt` seconds.
    pub fn add_seconds(&self, dt: f64) -> Self {
        Self::new(self.seconds, self.fraction + dt)
    }
    /// Returns (self - rhs) in seconds.
    pub fn diff(&self, rhs: &Self) -> f64 {
        (self.seconds - rhs.seconds) as f64 + self.fraction - rhs.fraction
    }
    /// Returns (self - rhs) in seconds, wrapped to the nearest half week:
    /// ephemeris age of data never crosses a week boundary.
    pub fn diff_week_wrapped(&self, rhs: &Self) -> f64 {
        let dt = self.diff(rhs);
        if dt > 302400.0 {
            dt - 604800.0
        } else if dt < -302400.0 {
            dt + 604800.0
        } else {
            dt
        }
    }
    /// Converts GPST to BDT.
    pub fn gpst_to_bdt(&self) -> Self {
        self.add_seconds(-GPST_BDT_OFFSET)
    }
    /// Converts BDT to GPST.
    pub fn bdt_to_gpst(&self) -> Self {
        self.add_seconds(GPST_BDT_OFFSET)
    }
    /// Splits into start of day and seconds of day.
    pub fn seconds_of_day(&self) -> (Self, f64) {
        let mut ep = self.to_calendar();
        let sec = ep[3] * 3600.0 + ep[4] * 60.0 + ep[5];
        ep[3] = 0.0;
        ep[4] = 0.0;
        ep[5] = 0.0;
        (Self::from_calendar(ep), sec)
    }
    /// Fractional day of year, starting at 1.0 on January 1st 00:00:00.
    pub fn day_of_year(&self) -> f64 {
        let mut ep = self.to_calendar();
        ep[1] = 1.0;
        ep[2] = 1.0;
        ep[3] = 0.0;
        ep[4] = 0.0;
        ep[5] = 0.0;
        self.diff(&Self::from_calendar(ep)) / 86400.0 + 1.0
    }
    /// Greenwich mean sidereal time (rad), from this UTC instant and UT1-UTC (s).
    pub fn gmst(&self, ut1_utc: f64) -> f64 {
        let tut = self.add_seconds(ut1_utc);
        let (tut0, ut) = tut.seconds_of_day();
        let t1 = tut0.diff(&Self::from_calendar(J2000)) / 86400.0 / 36525.0;
        let t2 = t1 * t1;
        let t3 = t2 * t1;
        let gmst0 = 24110.54841 + 8640184.812866 * t1 + 0.093104 * t2 - 6.2E-6 * t3;
        let gmst = gmst0 + 1.002737909350795 * ut;
        (gmst % 86400.0) * PI / 43200.0
    }
    /// Converts this GPST instant to [Epoch].
    pub fn to_gpst_epoch(&self) -> Epoch {
        let t0 = Self::from_calendar(GPST0);
        Epoch::from_gpst_seconds(self.diff(&t0))
    }
    /// Builds the GPST [Instant] of an [Epoch] expressed in any timescale.
    pub fn from_gpst_epoch(epoch: Epoch) -> Self {
        Self::from_calendar(GPST0).add_seconds(epoch.to_gpst_seconds())
    }
}

impl Add<f64> for Instant {
    type Output = Self;
    fn add(self, rhs: f64) -> Self {
        self.add_seconds(rhs)
    }
}

impl Sub<f64> for Instant {
    type Output = Self;
    fn sub(self, rhs: f64) -> Self {
        self.add_seconds(-rhs)
    }
}

impl Sub<Instant> for Instant {
    type Output = f64;
    fn sub(self, rhs: Instant) -> f64 {
        self.diff(&rhs)
    }
}
