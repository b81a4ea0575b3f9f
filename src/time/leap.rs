//! Leap seconds table, used to convert between UTC and GPST
use std::{io::BufRead, path::Path, sync::Arc};

use log::debug;
use parking_lot::RwLock;
use regex::Regex;

use crate::{error::Error, io::open_lines, time::Instant};

/// Maximal number of records in a table
pub const MAX_LEAP_SECONDS: usize = 64;

const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

lazy_static! {
    /// Leap seconds known at build time
    static ref DEFAULT_LEAP_SECONDS: Vec<LeapSecond> = [
        (2017, 1, 1, -18),
        (2015, 7, 1, -17),
        (2012, 7, 1, -16),
        (2009, 1, 1, -15),
        (2006, 1, 1, -14),
        (1999, 1, 1, -13),
        (1997, 7, 1, -12),
        (1996, 1, 1, -11),
        (1994, 7, 1, -10),
        (1993, 7, 1, -9),
        (1992, 7, 1, -8),
        (1991, 1, 1, -7),
        (1990, 1, 1, -6),
        (1988, 1, 1, -5),
        (1985, 7, 1, -4),
        (1983, 7, 1, -3),
        (1982, 7, 1, -2),
        (1981, 7, 1, -1),
    ]
    .iter()
    .map(|(y, m, d, delta)| LeapSecond::new([*y, *m, *d, 0, 0, 0], *delta))
    .collect();

    /// USNO bulletin record (tai-utc.dat)
    static ref USNO_RECORD: Regex = Regex::new(
        r"^\s*(\d+)\s+([A-Z]+)\s+(\d+)\s*=JD\s*([0-9.]+)\s*TAI-UTC=\s*([+-]?[0-9.]+)"
    )
    .unwrap();
}

/// One leap second event
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LeapSecond {
    /// UTC calendar date and time from which this offset applies
    pub date: [i32; 6],
    /// UTC - GPST (s)
    pub utc_minus_gpst: i32,
}

impl LeapSecond {
    pub fn new(date: [i32; 6], utc_minus_gpst: i32) -> Self {
        Self {
            date,
            utc_minus_gpst,
        }
    }
    /// UTC [Instant] from which this offset applies
    pub fn instant(&self) -> Instant {
        Instant::from_calendar(self.date.map(|v| v as f64))
    }
}

/// Leap seconds table, sorted from the most recent record to the oldest.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LeapSeconds {
    records: Vec<LeapSecond>,
}

impl Default for LeapSeconds {
    /// Builds the table known at build time
    fn default() -> Self {
        Self {
            records: DEFAULT_LEAP_SECONDS.clone(),
        }
    }
}

impl LeapSeconds {
    /// Builds a table from records sorted by descending date
    pub fn new(records: Vec<LeapSecond>) -> Self {
        Self { records }
    }
    pub fn len(&self) -> usize {
        self.records.len()
    }
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
    /// Iterates records, most recent first
    pub fn iter(&self) -> std::slice::Iter<'_, LeapSecond> {
        self.records.iter()
    }
    /// Converts UTC to GPST. Instants older than the oldest record
    /// are returned unchanged.
    pub fn utc_to_gpst(&self, t: Instant) -> Instant {
        for leap in self.records.iter() {
            if t.diff(&leap.instant()) >= 0.0 {
                return t.add_seconds(-leap.utc_minus_gpst as f64);
            }
        }
        t
    }
    /// Converts GPST to UTC. Instants older than the oldest record
    /// are returned unchanged.
    pub fn gpst_to_utc(&self, t: Instant) -> Instant {
        for leap in self.records.iter() {
            let tu = t.add_seconds(leap.utc_minus_gpst as f64);
            if tu.diff(&leap.instant()) >= 0.0 {
                return tu;
            }
        }
        t
    }
    /// Parses a table from its text description, one record per line:
    /// `year month day hour minute second utc-gpst`, sorted by descending date.
    /// Anything following a '#' is ignored. A record with a null or negative
    /// year terminates the table: following lines are not read.
    pub fn parse_text<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut records = Vec::new();
        for line in reader.lines() {
            if records.len() >= MAX_LEAP_SECONDS {
                break;
            }
            let line = line?;
            let content = line.split('#').next().unwrap_or("");
            let fields = content
                .split_ascii_whitespace()
                .take(7)
                .map(|item| item.parse::<i32>())
                .collect::<Result<Vec<_>, _>>();
            match fields {
                Ok(fields) if fields.len() == 7 => {
                    if fields[0] <= 0 {
                        break;
                    }
                    records.push(LeapSecond::new(
                        [
                            fields[0], fields[1], fields[2], fields[3], fields[4], fields[5],
                        ],
                        fields[6],
                    ));
                },
                _ => continue,
            }
        }
        Ok(Self { records })
    }
    /// Parses a USNO bulletin (tai-utc.dat). Records prior to 1980 are dropped.
    pub fn parse_usno<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut records = Vec::new();
        for line in reader.lines() {
            if records.len() >= MAX_LEAP_SECONDS {
                break;
            }
            let line = line?;
            let Some(caps) = USNO_RECORD.captures(&line) else {
                continue;
            };
            let (Ok(year), Ok(day), Ok(tai_utc)) = (
                caps[1].parse::<i32>(),
                caps[3].parse::<i32>(),
                caps[5].parse::<f64>(),
            ) else {
                continue;
            };
            if year < 1980 {
                continue;
            }
            let Some(month) = MONTHS.iter().position(|m| *m == &caps[2]) else {
                continue;
            };
            records.push(LeapSecond::new(
                [year, month as i32 + 1, day, 0, 0, 0],
                (19.0 - tai_utc) as i32,
            ));
        }
        records.reverse();
        Ok(Self { records })
    }
    /// Parses a table from text content, in either supported format.
    pub fn parse(content: &str) -> Result<Self, Error> {
        let table = Self::parse_text(content.as_bytes())?;
        if !table.is_empty() {
            return Ok(table);
        }
        let table = Self::parse_usno(content.as_bytes())?;
        if !table.is_empty() {
            return Ok(table);
        }
        Err(Error::LeapSecondsParsing)
    }
    /// Loads a table from a local file, in either supported format.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let mut content = String::new();
        for line in open_lines(path)?.lines() {
            content.push_str(&line?);
            content.push('\n');
        }
        let table = Self::parse(&content)?;
        debug!("loaded {} leap seconds", table.len());
        Ok(table)
    }
    /// Replaces this table by the content of a local file.
    /// On failure, the current table is preserved.
    pub fn reload<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, Error> {
        *self = Self::from_file(path)?;
        Ok(self.len())
    }
}

/// [LeapSeconds] table shared between threads.
/// Readers never observe a partially replaced table.
#[derive(Debug, Clone, Default)]
pub struct SharedLeapSeconds(Arc<RwLock<LeapSeconds>>);

impl SharedLeapSeconds {
    pub fn new(table: LeapSeconds) -> Self {
        Self(Arc::new(RwLock::new(table)))
    }
    /// Copy of the current table
    pub fn snapshot(&self) -> LeapSeconds {
        self.0.read().clone()
    }
    /// Replaces the current table
    pub fn replace(&self, table: LeapSeconds) {
        *self.0.write() = table;
    }
    /// Replaces the current table by the content of a local file.
    /// The file is parsed before the table gets locked.
    pub fn reload<P: AsRef<Path>>(&self, path: P) -> Result<usize, Error> {
        let table = LeapSeconds::from_file(path)?;
        let len = table.len();
        self.replace(table);
        Ok(len)
    }
    /// See [LeapSeconds::utc_to_gpst]
    pub fn utc_to_gpst(&self, t: Instant) -> Instant {
        self.0.read().utc_to_gpst(t)
    }
    /// See [LeapSeconds::gpst_to_utc]
    pub fn gpst_to_utc(&self, t: Instant) -> Instant {
        self.0.read().gpst_to_utc(t)
    }
}
