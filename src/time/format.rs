//! "yyyy/mm/dd hh:mm:ss.sss" representation
use std::str::FromStr;

use crate::{error::Error, time::Instant};

/// Largest supported number of decimals
const MAX_DECIMALS: usize = 12;

impl Instant {
    /// Formats as "yyyy/mm/dd hh:mm:ss.sss" with `decimals` digits (up to 12).
    /// Seconds are rounded, and rounding up to a full second is carried
    /// into the integral part: "60" never gets printed.
    /// ```
    /// use rtkcore::prelude::Instant;
    /// let t = Instant::from_calendar([2020.0, 12.0, 31.0, 23.0, 59.0, 59.9996]);
    /// assert_eq!(t.to_string_precision(3), "2021/01/01 00:00:00.000");
    /// assert_eq!(t.to_string_precision(4), "2020/12/31 23:59:59.9996");
    /// ```
    pub fn to_string_precision(&self, decimals: usize) -> String {
        let n = decimals.min(MAX_DECIMALS);
        let mut t = *self;
        if 1.0 - t.fraction() < 0.5 / 10.0_f64.powi(n as i32) {
            t = Instant::new(t.seconds() + 1, 0.0);
        }
        let ep = t.to_calendar();
        let width = if n == 0 { 2 } else { n + 3 };
        format!(
            "{:04}/{:02}/{:02} {:02}:{:02}:{:0width$.n$}",
            ep[0] as i64, ep[1] as i64, ep[2] as i64, ep[3] as i64, ep[4] as i64, ep[5],
        )
    }
}

impl std::fmt::Display for Instant {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let decimals = f.precision().unwrap_or(3);
        write!(f, "{}", self.to_string_precision(decimals))
    }
}

fn parse_fields(content: &str) -> Result<Instant, Error> {
    let fields = content
        .split_ascii_whitespace()
        .take(6)
        .map(|item| item.parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| Error::TimeParsing(content.to_string()))?;
    if fields.len() < 6 {
        return Err(Error::TimeParsing(content.to_string()));
    }
    let mut ep = [0.0_f64; 6];
    ep.copy_from_slice(&fields);
    if ep[0] < 100.0 {
        ep[0] += if ep[0] < 80.0 { 2000.0 } else { 1900.0 };
    }
    Ok(Instant::from_calendar(ep))
}

/// Parses "yyyy mm dd hh mm ss" from `width` characters of `s`, starting at `offset`.
/// Two digit years are interpreted as 1980-2079.
/// ```
/// use rtkcore::time::parse_instant_field;
/// let t = parse_instant_field("> 21  3 14 12  0 30.5000000  0", 2, 26).unwrap();
/// assert_eq!(t.to_calendar(), [2021.0, 3.0, 14.0, 12.0, 0.0, 30.5]);
/// ```
pub fn parse_instant_field(s: &str, offset: usize, width: usize) -> Result<Instant, Error> {
    if offset > s.chars().count() {
        return Err(Error::TimeParsing(s.to_string()));
    }
    let content = s.chars().skip(offset).take(width).collect::<String>();
    parse_fields(&content)
}

impl FromStr for Instant {
    type Err = Error;
    /// Parses "yyyy/mm/dd hh:mm:ss.sss", or the whitespace
    /// separated "yyyy mm dd hh mm ss" description.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let content = s.trim().replace(|c: char| c == '/' || c == ':', " ");
        parse_fields(&content).map_err(|_| Error::TimeParsing(s.to_string()))
    }
}
