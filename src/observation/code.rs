//! Observation codes and tracking priorities
use std::str::FromStr;

use gnss::prelude::Constellation;
use log::{debug, trace};

use crate::{error::Error, observation::Carrier};

/// Observation code: frequency band digit and tracking attribute,
/// as found in RINEX observables ("1C", "2W", "5Q" ...)
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Code {
    L1C = 1,
    L1P,
    L1W,
    L1Y,
    L1M,
    L1N,
    L1S,
    L1L,
    L1E,
    L1A,
    L1B,
    L1X,
    L1Z,
    L2C,
    L2D,
    L2S,
    L2L,
    L2X,
    L2P,
    L2W,
    L2Y,
    L2M,
    L2N,
    L5I,
    L5Q,
    L5X,
    L7I,
    L7Q,
    L7X,
    L6A,
    L6B,
    L6C,
    L6X,
    L6Z,
    L6S,
    L6L,
    L8L,
    L8Q,
    L8X,
    L2I,
    L2Q,
    L6I,
    L6Q,
    L3I,
    L3Q,
    L3X,
    L1I,
    L1Q,
    L5A,
    L5B,
    L5C,
    L9A,
    L9B,
    L9C,
    L9X,
}

/// Number of known observation codes
pub const NUM_CODES: usize = 55;

/// Code, descriptor and frequency band, indexed by code number - 1
const CODES: [(Code, &str, Carrier); NUM_CODES] = [
    (Code::L1C, "1C", Carrier::L1),
    (Code::L1P, "1P", Carrier::L1),
    (Code::L1W, "1W", Carrier::L1),
    (Code::L1Y, "1Y", Carrier::L1),
    (Code::L1M, "1M", Carrier::L1),
    (Code::L1N, "1N", Carrier::L1),
    (Code::L1S, "1S", Carrier::L1),
    (Code::L1L, "1L", Carrier::L1),
    (Code::L1E, "1E", Carrier::L1),
    (Code::L1A, "1A", Carrier::L1),
    (Code::L1B, "1B", Carrier::L1),
    (Code::L1X, "1X", Carrier::L1),
    (Code::L1Z, "1Z", Carrier::L1),
    (Code::L2C, "2C", Carrier::L2),
    (Code::L2D, "2D", Carrier::L2),
    (Code::L2S, "2S", Carrier::L2),
    (Code::L2L, "2L", Carrier::L2),
    (Code::L2X, "2X", Carrier::L2),
    (Code::L2P, "2P", Carrier::L2),
    (Code::L2W, "2W", Carrier::L2),
    (Code::L2Y, "2Y", Carrier::L2),
    (Code::L2M, "2M", Carrier::L2),
    (Code::L2N, "2N", Carrier::L2),
    (Code::L5I, "5I", Carrier::L5),
    (Code::L5Q, "5Q", Carrier::L5),
    (Code::L5X, "5X", Carrier::L5),
    (Code::L7I, "7I", Carrier::L7),
    (Code::L7Q, "7Q", Carrier::L7),
    (Code::L7X, "7X", Carrier::L7),
    (Code::L6A, "6A", Carrier::L6),
    (Code::L6B, "6B", Carrier::L6),
    (Code::L6C, "6C", Carrier::L6),
    (Code::L6X, "6X", Carrier::L6),
    (Code::L6Z, "6Z", Carrier::L6),
    (Code::L6S, "6S", Carrier::L6),
    (Code::L6L, "6L", Carrier::L6),
    (Code::L8L, "8L", Carrier::L8),
    (Code::L8Q, "8Q", Carrier::L8),
    (Code::L8X, "8X", Carrier::L8),
    (Code::L2I, "2I", Carrier::L2),
    (Code::L2Q, "2Q", Carrier::L2),
    (Code::L6I, "6I", Carrier::L6),
    (Code::L6Q, "6Q", Carrier::L6),
    (Code::L3I, "3I", Carrier::L5),
    (Code::L3Q, "3Q", Carrier::L5),
    (Code::L3X, "3X", Carrier::L5),
    (Code::L1I, "1I", Carrier::L1),
    (Code::L1Q, "1Q", Carrier::L1),
    (Code::L5A, "5A", Carrier::L5),
    (Code::L5B, "5B", Carrier::L5),
    (Code::L5C, "5C", Carrier::L5),
    (Code::L9A, "9A", Carrier::S),
    (Code::L9B, "9B", Carrier::S),
    (Code::L9C, "9C", Carrier::S),
    (Code::L9X, "9X", Carrier::S),
];

impl Code {
    /// Code number, from 1 to [NUM_CODES]
    pub fn number(&self) -> u8 {
        *self as u8
    }
    /// Code identified by its number
    pub fn from_number(number: u8) -> Option<Self> {
        let n = number as usize;
        if n == 0 || n > NUM_CODES {
            return None;
        }
        Some(CODES[n - 1].0)
    }
    /// Two character descriptor, like "1C"
    pub fn as_str(&self) -> &'static str {
        CODES[*self as usize - 1].1
    }
    /// Frequency band of this code
    pub fn carrier(&self) -> Carrier {
        CODES[*self as usize - 1].2
    }
    /// Tracking attribute, like 'C' for "1C"
    pub fn attribute(&self) -> char {
        self.as_str().chars().nth(1).unwrap_or(' ')
    }
    /// Band digit, like '1' for "1C"
    fn band(&self) -> char {
        self.as_str().chars().next().unwrap_or(' ')
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Code {
    type Err = Error;
    /// Parses "1C" like descriptors. Three character RINEX
    /// observables ("C1C", "L2W" ...) are accepted as well.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let content = s.trim();
        let descriptor = match content.len() {
            3 => content.get(1..).unwrap_or(content),
            _ => content,
        };
        CODES
            .iter()
            .find(|(_, desc, _)| *desc == descriptor)
            .map(|(code, _, _)| *code)
            .ok_or_else(|| Error::UnknownObservationCode(s.to_string()))
    }
}

/// Longest priority description of one frequency band
pub const MAX_PRIORITY_LENGTH: usize = 16;

/// Highest priority, granted to codes selected in the options
pub const FORCED_PRIORITY: u8 = 15;

/// Systems described in the priority table, in table order
const PRIORITY_SYSTEMS: [char; 7] = ['G', 'R', 'E', 'J', 'S', 'C', 'I'];

/// Row of the priority table, and option prefix, of this constellation
fn priority_system(constellation: Constellation) -> Option<usize> {
    match constellation {
        Constellation::GPS => Some(0),
        Constellation::Glonass => Some(1),
        Constellation::Galileo => Some(2),
        Constellation::QZSS => Some(3),
        c if c.is_sbas() => Some(4),
        Constellation::BeiDou => Some(5),
        Constellation::IRNSS => Some(6),
        _ => None,
    }
}

/// Tracking attribute preference per constellation and frequency band.
/// When several codes of one band are observed, the one with the highest
/// priority is retained.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CodePriorities {
    /// Attributes, from preferred to least preferred,
    /// per system and band
    table: [[String; 7]; 7],
}

impl Default for CodePriorities {
    fn default() -> Self {
        let rows: [[&str; 7]; 7] = [
            ["CPYWMNSL", "PYWCMNDSLX", "IQX", "", "", "", ""],
            ["PC", "PC", "IQX", "", "", "", ""],
            ["CABXZ", "", "IQX", "ABCXZ", "IQX", "IQX", ""],
            ["CSLXZ", "SLX", "IQX", "SLX", "", "", ""],
            ["C", "", "IQX", "", "", "", ""],
            ["IQX", "IQX", "IQX", "IQX", "IQX", "", ""],
            ["", "", "ABCX", "", "", "", "ABCX"],
        ];
        Self {
            table: rows.map(|row| row.map(|pri| pri.to_string())),
        }
    }
}

impl CodePriorities {
    /// Preferred attributes of `constellation` on `carrier`
    pub fn priorities(&self, constellation: Constellation, carrier: Carrier) -> Option<&str> {
        let sys = priority_system(constellation)?;
        Some(&self.table[sys][carrier.index()])
    }
    /// Replaces attribute preference of every listed constellation on `carrier`.
    /// `priorities` lists tracking attributes, highest priority first.
    pub fn set(
        &mut self,
        constellations: &[Constellation],
        carrier: Carrier,
        priorities: &str,
    ) -> Result<(), Error> {
        trace!("code priorities: {:?} {} \"{}\"", constellations, carrier, priorities);
        if priorities.len() > MAX_PRIORITY_LENGTH {
            return Err(Error::CodePriorityLength(priorities.len()));
        }
        for constellation in constellations {
            if let Some(sys) = priority_system(*constellation) {
                self.table[sys][carrier.index()] = priorities.to_string();
            } else {
                debug!("no code priority for {:?}", constellation);
            }
        }
        Ok(())
    }
    /// Priority of `code` observed on `constellation`,
    /// from 14 (highest) to 1 (lowest), 0 when not listed.
    ///
    /// `options` may force one attribute per band, with "-GL1W" like
    /// items (system letter, 'L', band digit, attribute): the forced code
    /// gets [FORCED_PRIORITY], other codes of that band get 0.
    pub fn priority(&self, constellation: Constellation, code: Code, options: Option<&str>) -> u8 {
        let Some(sys) = priority_system(constellation) else {
            return 0;
        };
        if let Some(options) = options {
            let prefix = format!("{}L", PRIORITY_SYSTEMS[sys]);
            for (offset, _) in options.match_indices('-') {
                let Some(item) = options[offset + 1..].strip_prefix(prefix.as_str()) else {
                    continue;
                };
                let mut selection = item.chars().take_while(|c| !c.is_whitespace()).take(2);
                if selection.next() != Some(code.band()) {
                    continue;
                }
                return if selection.next() == Some(code.attribute()) {
                    FORCED_PRIORITY
                } else {
                    0
                };
            }
        }
        match self.table[sys][code.carrier().index()].find(code.attribute()) {
            Some(pos) => 14_u8.saturating_sub(pos as u8),
            None => 0,
        }
    }
    /// Selects the preferred code among `codes`, observed on `constellation`.
    /// Codes with null priority are never selected.
    pub fn preferred(
        &self,
        constellation: Constellation,
        codes: &[Code],
        options: Option<&str>,
    ) -> Option<Code> {
        codes
            .iter()
            .map(|code| (self.priority(constellation, *code, options), *code))
            .filter(|(pri, _)| *pri > 0)
            .fold(None, |best: Option<(u8, Code)>, (pri, code)| match best {
                Some((best_pri, _)) if best_pri >= pri => best,
                _ => Some((pri, code)),
            })
            .map(|(_, code)| code)
    }
}
