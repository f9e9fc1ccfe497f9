//! Platform, position, and edge types.

use serde::{Deserialize, Serialize};

/// A geographic position in WGS84 degrees.
///
/// Positions are optional metadata on platforms; the solver works purely on
/// edge weights, but ingestion layers typically attach coordinates and
/// presentation layers read them back.
///
/// # Examples
///
/// ```
/// use transit_tour::models::GeoPoint;
///
/// let a = GeoPoint::new(31.2304, 121.4737);
/// let b = GeoPoint::new(31.2397, 121.4998);
/// // People's Square to Nanjing East Road is roughly 2.7 km.
/// let d = a.haversine_to(&b);
/// assert!(d > 2_000.0 && d < 3_500.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    lat: f64,
    lon: f64,
}

impl GeoPoint {
    /// Creates a position from latitude and longitude in degrees.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Great-circle distance to another position, in meters.
    pub fn haversine_to(&self, other: &GeoPoint) -> f64 {
        const EARTH_RADIUS_M: f64 = 6_371_000.0;
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let dlat = (other.lat - self.lat).to_radians();
        let dlon = (other.lon - self.lon).to_radians();
        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_M * a.sqrt().asin()
    }
}

/// The kind of a directed edge between two platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeKind {
    /// In-vehicle travel along a line.
    Ride,
    /// A walking or interchange connection, typically between platforms of
    /// the same station.
    Transfer,
}

/// A platform (boarding point) in the transit network.
///
/// Every platform belongs to exactly one station; the stations partition the
/// platform set. Platforms are immutable once the graph is built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Platform {
    id: u64,
    station: u64,
    position: Option<GeoPoint>,
}

impl Platform {
    /// Creates a platform belonging to the given station.
    pub fn new(id: u64, station: u64) -> Self {
        Self {
            id,
            station,
            position: None,
        }
    }

    /// Attaches a geographic position.
    pub fn with_position(mut self, position: GeoPoint) -> Self {
        self.position = Some(position);
        self
    }

    /// Platform id.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Owning station id.
    pub fn station(&self) -> u64 {
        self.station
    }

    /// Geographic position, if known.
    pub fn position(&self) -> Option<&GeoPoint> {
        self.position.as_ref()
    }
}

/// Platform record consumed from the data-ingestion boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformRecord {
    /// Platform id, unique across the network.
    pub id: u64,
    /// Owning station id.
    pub station: u64,
    /// Optional geographic position.
    pub position: Option<GeoPoint>,
}

/// Edge record consumed from the data-ingestion boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// Source platform id.
    pub from: u64,
    /// Destination platform id.
    pub to: u64,
    /// Travel time in seconds. Must be non-negative and finite.
    pub weight: f64,
    /// Ride or transfer.
    pub kind: EdgeKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_new() {
        let p = Platform::new(7, 3);
        assert_eq!(p.id(), 7);
        assert_eq!(p.station(), 3);
        assert!(p.position().is_none());
    }

    #[test]
    fn test_platform_with_position() {
        let p = Platform::new(1, 1).with_position(GeoPoint::new(31.2, 121.5));
        let pos = p.position().expect("has position");
        assert_eq!(pos.lat(), 31.2);
        assert_eq!(pos.lon(), 121.5);
    }

    #[test]
    fn test_haversine_zero_distance() {
        let a = GeoPoint::new(31.0, 121.0);
        assert!(a.haversine_to(&a) < 1e-6);
    }

    #[test]
    fn test_haversine_symmetric() {
        let a = GeoPoint::new(31.2304, 121.4737);
        let b = GeoPoint::new(31.1443, 121.8083);
        assert!((a.haversine_to(&b) - b.haversine_to(&a)).abs() < 1e-6);
    }

    #[test]
    fn test_haversine_one_degree_latitude() {
        // One degree of latitude is about 111 km everywhere.
        let a = GeoPoint::new(30.0, 121.0);
        let b = GeoPoint::new(31.0, 121.0);
        let d = a.haversine_to(&b);
        assert!(d > 110_000.0 && d < 112_500.0);
    }

    #[test]
    fn test_edge_record_fields() {
        let e = EdgeRecord {
            from: 1,
            to: 2,
            weight: 90.0,
            kind: EdgeKind::Transfer,
        };
        assert_eq!(e.kind, EdgeKind::Transfer);
        assert!(e.weight > 0.0);
    }
}
