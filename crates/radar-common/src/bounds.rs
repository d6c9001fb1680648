//! Geographic bounding box described by its four corners.

use serde::{Deserialize, Serialize};

use crate::error::BoundsError;

/// A latitude/longitude pair in degrees.
///
/// On the wire this is a two element array: `[lat, lon]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    fn validate(&self) -> Result<(), BoundsError> {
        if !self.lat.is_finite() || !self.lon.is_finite() {
            return Err(BoundsError::NonFinite {
                lat: self.lat,
                lon: self.lon,
            });
        }
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(BoundsError::LatitudeOutOfRange(self.lat));
        }
        if !(-180.0..=180.0).contains(&self.lon) {
            return Err(BoundsError::LongitudeOutOfRange(self.lon));
        }
        Ok(())
    }
}

impl From<[f64; 2]> for LatLon {
    fn from([lat, lon]: [f64; 2]) -> Self {
        Self { lat, lon }
    }
}

impl From<LatLon> for [f64; 2] {
    fn from(p: LatLon) -> Self {
        [p.lat, p.lon]
    }
}

/// An axis-aligned lat/lon box.
///
/// Corners are stored as given and checked once at construction:
/// `nw.lat == ne.lat`, `sw.lat == se.lat`, `nw.lon == sw.lon`,
/// `ne.lon == se.lon`, north strictly above south and west strictly
/// left of east. The value is immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Corners")]
pub struct GeoBounds {
    nw: LatLon,
    ne: LatLon,
    se: LatLon,
    sw: LatLon,
}

#[derive(Deserialize)]
struct Corners {
    nw: LatLon,
    ne: LatLon,
    se: LatLon,
    sw: LatLon,
}

impl TryFrom<Corners> for GeoBounds {
    type Error = BoundsError;

    fn try_from(c: Corners) -> Result<Self, Self::Error> {
        GeoBounds::new(c.nw, c.ne, c.se, c.sw)
    }
}

impl GeoBounds {
    /// Build a box from its four corners, rejecting anything that is not a
    /// non-degenerate axis-aligned rectangle.
    pub fn new(nw: LatLon, ne: LatLon, se: LatLon, sw: LatLon) -> Result<Self, BoundsError> {
        for corner in [&nw, &ne, &se, &sw] {
            corner.validate()?;
        }

        if nw.lat != ne.lat {
            return Err(BoundsError::NotAxisAligned(format!(
                "north edge latitudes differ ({} vs {})",
                nw.lat, ne.lat
            )));
        }
        if sw.lat != se.lat {
            return Err(BoundsError::NotAxisAligned(format!(
                "south edge latitudes differ ({} vs {})",
                sw.lat, se.lat
            )));
        }
        if nw.lon != sw.lon || ne.lon != se.lon {
            return Err(BoundsError::NotAxisAligned(
                "east/west edge longitudes differ".to_string(),
            ));
        }
        if nw.lat <= sw.lat {
            return Err(BoundsError::Degenerate(format!(
                "north latitude {} must exceed south latitude {}",
                nw.lat, sw.lat
            )));
        }
        if nw.lon >= ne.lon {
            return Err(BoundsError::Degenerate(format!(
                "west longitude {} must be less than east longitude {}",
                nw.lon, ne.lon
            )));
        }

        Ok(Self { nw, ne, se, sw })
    }

    /// Build a box from its edges.
    pub fn from_extent(north: f64, south: f64, west: f64, east: f64) -> Result<Self, BoundsError> {
        Self::new(
            LatLon::new(north, west),
            LatLon::new(north, east),
            LatLon::new(south, east),
            LatLon::new(south, west),
        )
    }

    /// The continental US box the MRMS CONUS products cover.
    pub fn conus() -> Self {
        Self {
            nw: LatLon::new(49.0, -125.0),
            ne: LatLon::new(49.0, -67.0),
            se: LatLon::new(25.0, -67.0),
            sw: LatLon::new(25.0, -125.0),
        }
    }

    pub fn nw(&self) -> LatLon {
        self.nw
    }

    pub fn ne(&self) -> LatLon {
        self.ne
    }

    pub fn se(&self) -> LatLon {
        self.se
    }

    pub fn sw(&self) -> LatLon {
        self.sw
    }

    pub fn north(&self) -> f64 {
        self.nw.lat
    }

    pub fn south(&self) -> f64 {
        self.sw.lat
    }

    pub fn west(&self) -> f64 {
        self.nw.lon
    }

    pub fn east(&self) -> f64 {
        self.ne.lon
    }

    /// Height of the box in degrees of latitude.
    pub fn lat_span(&self) -> f64 {
        self.north() - self.south()
    }

    /// Width of the box in degrees of longitude.
    pub fn lon_span(&self) -> f64 {
        self.east() - self.west()
    }

    /// Check if a point lies inside the box (edges included).
    pub fn contains(&self, p: LatLon) -> bool {
        p.lat >= self.south() && p.lat <= self.north() && p.lon >= self.west() && p.lon <= self.east()
    }

    /// Map a geographic point onto a `width` x `height` surface.
    ///
    /// Equirectangular: the north-west corner lands on (0, 0) and the
    /// south-east corner on (width, height). Points outside the box map
    /// outside the surface; no clamping is done.
    pub fn project(&self, p: LatLon, width: f64, height: f64) -> (f64, f64) {
        let x = (p.lon - self.west()) / self.lon_span() * width;
        let y = (self.north() - p.lat) / self.lat_span() * height;
        (x, y)
    }

    /// Inverse of [`GeoBounds::project`].
    pub fn unproject(&self, x: f64, y: f64, width: f64, height: f64) -> LatLon {
        LatLon::new(
            self.north() - y / height * self.lat_span(),
            self.west() + x / width * self.lon_span(),
        )
    }
}
