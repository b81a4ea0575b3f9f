//! Week counter and time of week
use hifitime::TimeScale;

use crate::{
    error::Error,
    time::{Instant, BDT0, GPST0, GST0},
};

/// Seconds of week beyond this magnitude are considered corrupt
const MAX_SECONDS_OF_WEEK: f64 = 1.0E9;

/// GPS week counter reference used when the reference is older (2009/12/01)
const MIN_REFERENCE_WEEK: i32 = 1560;

fn week_origin(ts: TimeScale) -> Result<Instant, Error> {
    match ts {
        TimeScale::GPST | TimeScale::QZSST => Ok(Instant::from_calendar(GPST0)),
        TimeScale::GST => Ok(Instant::from_calendar(GST0)),
        TimeScale::BDT => Ok(Instant::from_calendar(BDT0)),
        ts => Err(Error::UnsupportedTimeScale(ts)),
    }
}

impl Instant {
    /// Builds an [Instant] from week counter and seconds of week, in given timescale.
    /// Only timescales that define a week counter are supported: GPST, QZSST, GST and BDT.
    /// Seconds of week beyond ±1E9 are replaced by zero.
    pub fn from_week_seconds(ts: TimeScale, week: i32, sec: f64) -> Result<Self, Error> {
        Ok(Self::from_origin(week_origin(ts)?, week, sec))
    }
    fn from_origin(t0: Self, week: i32, sec: f64) -> Self {
        let sec = if (-MAX_SECONDS_OF_WEEK..=MAX_SECONDS_OF_WEEK).contains(&sec) {
            sec
        } else {
            0.0
        };
        let whole = sec.trunc();
        Self::new(
            t0.seconds() + 604800 * week as i64 + whole as i64,
            sec - whole,
        )
    }
    fn to_origin(&self, t0: Self) -> (i32, f64) {
        let sec = self.seconds() - t0.seconds();
        let week = sec / 604800;
        (week as i32, (sec - week * 604800) as f64 + self.fraction())
    }
    /// Returns (week counter, seconds of week) in given timescale.
    pub fn to_week_seconds(&self, ts: TimeScale) -> Result<(i32, f64), Error> {
        Ok(self.to_origin(week_origin(ts)?))
    }
    /// Builds an [Instant] from GPS week and seconds of week.
    /// ```
    /// use rtkcore::prelude::Instant;
    /// let t = Instant::from_gpst_week(0, 0.0);
    /// assert_eq!(t, Instant::from_calendar([1980.0, 1.0, 6.0, 0.0, 0.0, 0.0]));
    /// ```
    pub fn from_gpst_week(week: i32, sec: f64) -> Self {
        Self::from_origin(Self::from_calendar(GPST0), week, sec)
    }
    /// Returns GPS week and seconds of week.
    pub fn to_gpst_week(&self) -> (i32, f64) {
        self.to_origin(Self::from_calendar(GPST0))
    }
}

/// Resolves the ambiguity of a 10 bit broadcast GPS `week`, using
/// `reference` (GPST), usually the current time, to select the 1024 week cycle.
/// References older than week 1560 are replaced by week 1560.
pub fn adjust_gps_week(week: i32, reference: Instant) -> i32 {
    let (w, _) = reference.to_gpst_week();
    let w = w.max(MIN_REFERENCE_WEEK);
    week + (w - week + 512) / 1024 * 1024
}
