//! Solar geometry: site location and sun position.

/// Sun position computation from time and location.
pub mod position;

pub use position::{SolarPosition, ephemeris};

/// Geographic site location.
///
/// Latitude is positive north of the equator, longitude positive east of the
/// prime meridian. Altitude is metres above sea level and is used to derive
/// the default site pressure for refraction and airmass corrections.
#[derive(Debug, Clone, Copy)]
pub struct Location {
    /// Latitude in decimal degrees, positive north.
    pub latitude: f64,
    /// Longitude in decimal degrees, positive east.
    pub longitude: f64,
    /// Altitude above sea level in metres.
    pub altitude: f64,
}

impl Location {
    /// Creates a new location.
    ///
    /// # Panics
    ///
    /// Panics if latitude is outside [-90, 90] or longitude outside
    /// [-180, 180].
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        assert!(
            (-90.0..=90.0).contains(&latitude),
            "latitude must be in [-90, 90]"
        );
        assert!(
            (-180.0..=180.0).contains(&longitude),
            "longitude must be in [-180, 180]"
        );
        Self {
            latitude,
            longitude,
            altitude,
        }
    }

    /// Standard atmosphere pressure at the site altitude, in pascals.
    pub fn pressure(&self) -> f64 {
        crate::atmosphere::alt2pres(self.altitude)
    }
}
