//! Macros and helpers

/// Builds an [crate::time::Instant] from calendar fields.
/// Seconds may be fractional.
#[macro_export]
macro_rules! instant {
    ($y: expr, $m: expr, $d: expr, $hh: expr, $mm: expr, $ss: expr) => {
        $crate::time::Instant::from_calendar([
            $y as f64, $m as f64, $d as f64, $hh as f64, $mm as f64, $ss as f64,
        ])
    };
}

/// Builds a [crate::geodesy::GeodeticPosition] from latitude and longitude
/// in decimal degrees, and ellipsoidal height in meters.
#[macro_export]
macro_rules! geodetic {
    ($lat: expr, $lon: expr, $alt: expr) => {
        $crate::geodesy::GeodeticPosition::from_degrees($lat, $lon, $alt)
    };
}
