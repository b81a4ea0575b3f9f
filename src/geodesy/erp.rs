//! Earth rotation parameters
use std::{io::BufRead, path::Path};

use log::{debug, warn};

use crate::{
    constants::Constants,
    error::Error,
    io::open_lines,
    time::{leap::LeapSeconds, Instant, J2000},
};

/// Modified julian date of J2000
const MJD_J2000: f64 = 51544.5;

/// Minimal number of numerical columns of a valid row
const MIN_COLUMNS: usize = 5;

/// Earth rotation parameters at a given instant
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ErpValues {
    /// Pole offset along X (rad)
    pub xp: f64,
    /// Pole offset along Y (rad)
    pub yp: f64,
    /// UT1-UTC (s)
    pub ut1_utc: f64,
    /// Length of day (s.day⁻¹)
    pub lod: f64,
}

/// One row of an ERP table
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ErpRecord {
    /// Modified julian date
    pub mjd: f64,
    /// Pole offset along X (rad)
    pub xp: f64,
    /// Pole offset along Y (rad)
    pub yp: f64,
    /// X offset rate (rad.day⁻¹)
    pub xpr: f64,
    /// Y offset rate (rad.day⁻¹)
    pub ypr: f64,
    /// UT1-UTC (s)
    pub ut1_utc: f64,
    /// Length of day (s.day⁻¹)
    pub lod: f64,
}

impl ErpRecord {
    /// Linear extrapolation `day` days away from this record.
    fn extrapolate(&self, day: f64) -> ErpValues {
        ErpValues {
            xp: self.xp + self.xpr * day,
            yp: self.yp + self.ypr * day,
            ut1_utc: self.ut1_utc - self.lod * day,
            lod: self.lod,
        }
    }
    /// Parses one whitespace separated row:
    /// mjd, xp, yp (1E-6"), ut1-utc, lod (1E-7 s), ..., xpr, ypr (1E-6"/day)
    /// in columns 13 and 14.
    fn parse(line: &str) -> Option<Self> {
        let v = line
            .split_ascii_whitespace()
            .take(14)
            .map_while(|item| item.parse::<f64>().ok())
            .collect::<Vec<_>>();
        if v.len() < MIN_COLUMNS {
            return None;
        }
        let column = |i: usize| v.get(i).copied().unwrap_or(0.0);
        Some(Self {
            mjd: v[0],
            xp: v[1] * 1.0E-6 * Constants::AS2R,
            yp: v[2] * 1.0E-6 * Constants::AS2R,
            ut1_utc: v[3] * 1.0E-7,
            lod: v[4] * 1.0E-7,
            xpr: column(12) * 1.0E-6 * Constants::AS2R,
            ypr: column(13) * 1.0E-6 * Constants::AS2R,
        })
    }
}

/// Earth rotation parameters, sorted by modified julian date
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ErpTable {
    records: Vec<ErpRecord>,
}

impl ErpTable {
    /// Builds a table from records in any order.
    pub fn new(mut records: Vec<ErpRecord>) -> Self {
        records.sort_by(|a, b| a.mjd.total_cmp(&b.mjd));
        Self { records }
    }
    pub fn len(&self) -> usize {
        self.records.len()
    }
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
    pub fn records(&self) -> &[ErpRecord] {
        &self.records
    }
    /// Parses an ERP (IGS format) stream. Rows that do not start
    /// with at least 5 numerical columns are ignored.
    pub fn parse<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut records = Vec::new();
        let mut skipped = 0;
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match ErpRecord::parse(&line) {
                Some(record) => records.push(record),
                None => skipped += 1,
            }
        }
        if records.is_empty() {
            return Err(Error::ErpParsing);
        }
        if skipped > 0 {
            warn!("erp: {} rows skipped", skipped);
        }
        Ok(Self::new(records))
    }
    /// Loads an ERP file. Gzip compressed files are supported
    /// when the `flate2` feature is enabled.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let table = Self::parse(open_lines(path)?)?;
        debug!("erp: {} records", table.len());
        Ok(table)
    }
    /// Interpolates parameters at given modified julian date.
    /// Dates outside the table are extrapolated from the closest record.
    pub fn interpolate(&self, mjd: f64) -> Result<ErpValues, Error> {
        let (first, last) = match (self.records.first(), self.records.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(Error::EmptyErpTable),
        };
        if mjd <= first.mjd {
            return Ok(first.extrapolate(mjd - first.mjd));
        }
        if mjd >= last.mjd {
            return Ok(last.extrapolate(mjd - last.mjd));
        }
        // bracketing pair: records[j].mjd <= mjd < records[j + 1].mjd
        let (mut j, mut k) = (0, self.records.len() - 1);
        while j < k - 1 {
            let i = (j + k) / 2;
            if mjd < self.records[i].mjd {
                k = i;
            } else {
                j = i;
            }
        }
        let (r0, r1) = (&self.records[j], &self.records[j + 1]);
        let a = if r0.mjd == r1.mjd {
            0.5
        } else {
            (mjd - r0.mjd) / (r1.mjd - r0.mjd)
        };
        Ok(ErpValues {
            xp: (1.0 - a) * r0.xp + a * r1.xp,
            yp: (1.0 - a) * r0.yp + a * r1.yp,
            ut1_utc: (1.0 - a) * r0.ut1_utc + a * r1.ut1_utc,
            lod: (1.0 - a) * r0.lod + a * r1.lod,
        })
    }
    /// Interpolates parameters at given GPST instant.
    pub fn values_at(&self, leap: &LeapSeconds, t_gpst: Instant) -> Result<ErpValues, Error> {
        self.interpolate(modified_julian_date(leap.gpst_to_utc(t_gpst)))
    }
}

/// Modified julian date of an UTC instant.
pub fn modified_julian_date(t_utc: Instant) -> f64 {
    MJD_J2000 + t_utc.diff(&Instant::from_calendar(J2000)) / 86400.0
}
