//! Text file access, shared by the leap second and ERP loaders.
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

#[cfg(feature = "flate2")]
use flate2::read::GzDecoder;

use crate::error::Error;

/// Opens a local text file for line by line reading.
/// When the `flate2` feature is enabled, files terminated by
/// `.gz` are transparently decompressed.
pub(crate) fn open_lines<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead>, Error> {
    let path = path.as_ref();
    let fd = File::open(path)?;

    #[cfg(feature = "flate2")]
    if path.extension().map(|ext| ext == "gz").unwrap_or(false) {
        return Ok(Box::new(BufReader::new(GzDecoder::new(fd))));
    }

    Ok(Box::new(BufReader::new(fd)))
}
