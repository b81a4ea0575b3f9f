use thiserror::Error;

use hifitime::TimeScale;

/// Errors that may rise in any numerical core operation.
/// Nothing in this crate aborts the process: every failure
/// is reported through this type.
#[derive(Error, Debug)]
pub enum Error {
    /// Matrix storage could not be allocated
    #[error("failed to allocate {0}x{1} matrix")]
    Allocation(usize, usize),
    /// Matrix shapes are not compatible with the requested operation
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(&'static str),
    /// Matrix is singular or could not be factorized
    #[error("singular matrix")]
    SingularMatrix,
    /// Least squares requires at least as many measurements as parameters
    #[error("not enough measurements: {measurements} < {parameters}")]
    InsufficientMeasurements {
        parameters: usize,
        measurements: usize,
    },
    /// Vector norm is null
    #[error("degenerate vector")]
    DegenerateVector,
    /// Satellite position lies within the reference ellipsoid
    #[error("satellite position below earth surface")]
    BelowEarthSurface,
    /// Failed to parse "yyyy mm dd hh mm ss" description
    #[error("invalid datetime description \"{0}\"")]
    TimeParsing(String),
    /// No week counter is defined for this timescale
    #[error("{0} timescale has no week counter")]
    UnsupportedTimeScale(TimeScale),
    /// Leap seconds file did not contain any recognized record
    #[error("no leap second record found")]
    LeapSecondsParsing,
    /// ERP file did not contain any record
    #[error("no earth rotation parameter found")]
    ErpParsing,
    /// ERP table is empty
    #[error("empty earth rotation parameter table")]
    EmptyErpTable,
    /// Navigation word parity check failed
    #[error("navigation word parity error")]
    NavWordParity,
    /// Checksum verification failed
    #[error("checksum mismatch: computed {computed:#x}, received {received:#x}")]
    ChecksumMismatch { computed: u32, received: u32 },
    /// Bit fields are limited to 32 bits
    #[error("invalid bit field length {0}")]
    InvalidBitLength(usize),
    /// Not enough bytes to proceed
    #[error("not enough bytes available")]
    NotEnoughBytes,
    /// Observation code is not known
    #[error("unknown observation code \"{0}\"")]
    UnknownObservationCode(String),
    /// Code priority descriptions are limited to 16 attributes
    #[error("code priority description too long ({0} attributes)")]
    CodePriorityLength(usize),
    #[error("i/o error")]
    Io(#[from] std::io::Error),
}
