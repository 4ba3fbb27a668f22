//! Geographic collaborator: lat/lon coordinates, projections into the
//! planar kernel, haversine distance, and a geohash codec.

use crate::geom::Point;

/// Mean earth radius in meters.
const EARTH_RADIUS_M: f64 = 6371008.8;

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub const fn new(lat: f64, lon: f64) -> Self {
        LatLon { lat, lon }
    }

    /// Interprets a kernel point as (x, y) = (lon, lat).
    pub fn from_point(p: Point) -> Self {
        LatLon {
            lat: p.y,
            lon: p.x,
        }
    }

    pub fn lat_radians(&self) -> f64 {
        self.lat.to_radians()
    }

    pub fn lon_radians(&self) -> f64 {
        self.lon.to_radians()
    }

    pub fn to_point(&self) -> Point {
        Point::new(self.lon, self.lat)
    }

    /// Great-circle distance in meters via the haversine formula.
    pub fn distance_meters_to(&self, other: &LatLon) -> f64 {
        distance_meters(self.lat, self.lon, other.lat, other.lon)
    }

    pub fn to_geohash(&self, precision: usize) -> String {
        geohash::encode(self.lat, self.lon, precision)
    }
}

pub fn distance_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1 = lat1.to_radians();
    let lat2 = lat2.to_radians();
    let lon1 = lon1.to_radians();
    let lon2 = lon2.to_radians();

    let angle = haversine(lat2 - lat1) + lat1.cos() * lat2.cos() * haversine(lon2 - lon1);

    2.0 * EARTH_RADIUS_M * angle.sqrt().min(1.0).asin()
}

fn haversine(angle: f64) -> f64 {
    (1.0 - angle.cos()) / 2.0
}

/// Maps between geographic coordinates and kernel points.
pub trait Projection {
    fn to_point(&self, latlon: LatLon) -> Point;
    fn to_lat_lon(&self, point: Point) -> LatLon;
}

/// Normalized web mercator: both axes map into `[0, 1]`, y grows southward.
pub struct WebMercator;

impl Projection for WebMercator {
    fn to_point(&self, latlon: LatLon) -> Point {
        let x = (latlon.lon + 180.0) / 360.0;
        let lat_rad = latlon.lat_radians();
        let y = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / std::f64::consts::PI) / 2.0;

        Point::new(x, y)
    }

    fn to_lat_lon(&self, point: Point) -> LatLon {
        LatLon::new(
            (std::f64::consts::PI - 2.0 * std::f64::consts::PI * point.y)
                .sinh()
                .atan()
                .to_degrees(),
            point.x * 360.0 - 180.0,
        )
    }
}

/// Degrees in, degrees out: lon becomes x, lat becomes y.
pub struct Identity;

impl Projection for Identity {
    fn to_point(&self, latlon: LatLon) -> Point {
        latlon.to_point()
    }

    fn to_lat_lon(&self, point: Point) -> LatLon {
        LatLon::from_point(point)
    }
}

/// Geohash codec: base-32 bit-interleaved interval subdivision.
pub mod geohash {
    use super::LatLon;

    const BASE32: &[u8] = b"0123456789bcdefghjkmnpqrstuvwxyz";

    /// Neighbor alphabets per direction (N, E, S, W), indexed by even/odd
    /// character position.
    const NEIGHBORS: [[&str; 4]; 2] = [
        [
            "p0r21436x8zb9dcf5h7kjnmqesgutwvy",
            "bc01fg45238967deuvhjyznpkmstqrwx",
            "14365h7k9dcfesgujnmqp0r2twvyx8zb",
            "238967debc01fg45kmstqrwxuvhjyznp",
        ],
        [
            "bc01fg45238967deuvhjyznpkmstqrwx",
            "p0r21436x8zb9dcf5h7kjnmqesgutwvy",
            "238967debc01fg45kmstqrwxuvhjyznp",
            "14365h7k9dcfesgujnmqp0r2twvyx8zb",
        ],
    ];

    /// Characters whose cell touches the grid border per direction.
    const BORDERS: [[&str; 4]; 2] = [
        ["prxz", "bcfguvyz", "028b", "0145hjnp"],
        ["bcfguvyz", "prxz", "0145hjnp", "028b"],
    ];

    /// Approximate cell edge in meters, indexed by precision.
    const CELL_SIZES: [f64; 13] = [
        f64::MAX,
        5_000_000.0,
        1_250_000.0,
        156_000.0,
        39_100.0,
        4_890.0,
        1_220.0,
        153.0,
        38.2,
        4.77,
        1.19,
        0.149,
        0.00372,
    ];

    #[derive(Debug, Clone, Copy)]
    enum Direction {
        North = 0,
        East = 1,
        South = 2,
        West = 3,
    }

    /// Encodes to `precision` characters, clamped to 1..=12.
    pub fn encode(latitude: f64, longitude: f64, precision: usize) -> String {
        let precision = precision.clamp(1, 12);
        let mut hash = String::with_capacity(precision);

        let mut even = true;
        let mut bit = 0;
        let mut c: usize = 0;

        let (mut lat1, mut lat2) = (-90.0, 90.0);
        let (mut lon1, mut lon2) = (-180.0, 180.0);

        while hash.len() < precision {
            if even {
                let mid = (lon1 + lon2) / 2.0;
                if longitude > mid {
                    c |= 1 << (4 - bit);
                    lon1 = mid;
                } else {
                    lon2 = mid;
                }
            } else {
                let mid = (lat1 + lat2) / 2.0;
                if latitude > mid {
                    c |= 1 << (4 - bit);
                    lat1 = mid;
                } else {
                    lat2 = mid;
                }
            }

            even = !even;

            if bit >= 4 {
                hash.push(BASE32[c] as char);
                bit = 0;
                c = 0;
            } else {
                bit += 1;
            }
        }

        hash
    }

    /// Decodes to the cell's center. `None` for characters outside the
    /// alphabet.
    pub fn decode(hash: &str) -> Option<LatLon> {
        let mut even = true;
        let mut lat = (-90.0, 90.0);
        let mut lon = (-180.0, 180.0);

        for ch in hash.chars() {
            let cd = BASE32.iter().position(|&b| b as char == ch)?;

            for i in 0..5 {
                let mask = 1 << (4 - i);
                let interval = if even { &mut lon } else { &mut lat };

                if cd & mask != 0 {
                    interval.0 = (interval.0 + interval.1) / 2.0;
                } else {
                    interval.1 = (interval.0 + interval.1) / 2.0;
                }

                even = !even;
            }
        }

        Some(LatLon::new((lat.0 + lat.1) / 2.0, (lon.0 + lon.1) / 2.0))
    }

    fn adjacent(hash: &str, direction: Direction) -> Option<String> {
        let last = hash.chars().last()?;
        if !last.is_ascii() || !BASE32.contains(&(last as u8)) {
            return None;
        }

        let kind = hash.len() % 2;
        let mut parent = hash[..hash.len() - 1].to_string();

        if BORDERS[kind][direction as usize].contains(last) {
            parent = adjacent(&parent, direction)?;
        }

        let idx = NEIGHBORS[kind][direction as usize]
            .chars()
            .position(|c| c == last)?;

        parent.push(BASE32[idx] as char);
        Some(parent)
    }

    /// The 8 surrounding cells, clockwise from north.
    pub fn neighbors(hash: &str) -> Option<[String; 8]> {
        let north = adjacent(hash, Direction::North)?;
        let east = adjacent(hash, Direction::East)?;
        let south = adjacent(hash, Direction::South)?;
        let west = adjacent(hash, Direction::West)?;

        Some([
            north.clone(),
            adjacent(&north, Direction::East)?,
            east,
            adjacent(&south, Direction::East)?,
            south.clone(),
            adjacent(&south, Direction::West)?,
            west,
            adjacent(&north, Direction::West)?,
        ])
    }

    /// Approximate edge length in meters of a cell at `precision`.
    /// `None` outside 1..=12.
    pub fn cell_size(precision: usize) -> Option<f64> {
        (1..=12).contains(&precision).then(|| CELL_SIZES[precision])
    }

    /// Neighbors of the center hash truncated to the coarsest precision
    /// whose cells are at least `distance_meters` wide.
    pub fn perimeter_hashes(center_hash: &str, distance_meters: f64) -> Option<[String; 8]> {
        let mut precision = 12;

        for (i, size) in CELL_SIZES.iter().enumerate().skip(1) {
            if *size < distance_meters {
                precision = i - 1;
                break;
            }
        }

        let truncated: String = center_hash.chars().take(precision.max(1)).collect();
        neighbors(&truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_known_distance() {
        // Paris to London, roughly 344 km.
        let paris = LatLon::new(48.8566, 2.3522);
        let london = LatLon::new(51.5074, -0.1278);

        let d = paris.distance_meters_to(&london);
        assert!((d - 343_900.0).abs() < 2_000.0, "got {d}");

        assert_eq!(paris.distance_meters_to(&paris), 0.0);
    }

    #[test]
    fn web_mercator_round_trip() {
        let original = LatLon::new(52.3676, 4.9041);
        let p = WebMercator.to_point(original);

        assert!(p.x > 0.0 && p.x < 1.0);
        assert!(p.y > 0.0 && p.y < 1.0);

        let back = WebMercator.to_lat_lon(p);
        assert!((back.lat - original.lat).abs() < 1e-9);
        assert!((back.lon - original.lon).abs() < 1e-9);
    }

    #[test]
    fn web_mercator_equator_midpoint() {
        let p = WebMercator.to_point(LatLon::new(0.0, 0.0));
        assert!((p.x - 0.5).abs() < 1e-12);
        assert!((p.y - 0.5).abs() < 1e-12);
    }

    #[test]
    fn identity_projection_swaps_axes() {
        let p = Identity.to_point(LatLon::new(10.0, 20.0));
        assert_eq!(p, Point::new(20.0, 10.0));
        assert_eq!(Identity.to_lat_lon(p), LatLon::new(10.0, 20.0));
    }

    #[test]
    fn geohash_known_value() {
        // Well-known reference hash for this coordinate.
        assert_eq!(geohash::encode(57.64911, 10.40744, 11), "u4pruydqqvj");
        assert_eq!(geohash::encode(57.64911, 10.40744, 5), "u4pru");
    }

    #[test]
    fn geohash_decode_recovers_the_cell_center() {
        let decoded = geohash::decode("u4pruydqqvj").unwrap();

        assert!((decoded.lat - 57.64911).abs() < 1e-4);
        assert!((decoded.lon - 10.40744).abs() < 1e-4);

        assert!(geohash::decode("u4!").is_none());
    }

    #[test]
    fn geohash_encode_decode_stability() {
        let here = LatLon::new(-33.8688, 151.2093);
        let hash = here.to_geohash(12);

        let cell = geohash::decode(&hash).unwrap();
        // Re-encoding the cell center yields the same hash.
        assert_eq!(cell.to_geohash(12), hash);
    }

    #[test]
    fn geohash_neighbors_share_the_prefix_region() {
        let hash = "u4pru";
        let around = geohash::neighbors(hash).unwrap();

        assert_eq!(around.len(), 8);
        let center = geohash::decode(hash).unwrap();
        let cell = geohash::cell_size(hash.len()).unwrap();

        for n in &around {
            assert_eq!(n.len(), hash.len());
            assert_ne!(n, hash);

            let d = center.distance_meters_to(&geohash::decode(n).unwrap());
            assert!(d < 3.0 * cell, "{n} too far: {d}");
        }
    }

    #[test]
    fn geohash_cell_sizes_shrink() {
        assert_eq!(geohash::cell_size(0), None);
        assert_eq!(geohash::cell_size(13), None);

        for p in 2..=12 {
            assert!(geohash::cell_size(p).unwrap() < geohash::cell_size(p - 1).unwrap());
        }
    }

    #[test]
    fn geohash_neighbors_reject_invalid_characters() {
        // Outside the alphabet, including multi-byte characters.
        assert_eq!(geohash::neighbors("u4é"), None);
        assert_eq!(geohash::neighbors("u4a"), None);
        assert_eq!(geohash::neighbors(""), None);
    }

    #[test]
    fn perimeter_hashes_of_empty_input() {
        assert_eq!(geohash::perimeter_hashes("", 100.0), None);
    }

    #[test]
    fn perimeter_hashes_coarsen_with_distance() {
        let hash = geohash::encode(52.0, 5.0, 12);

        let close = geohash::perimeter_hashes(&hash, 100.0).unwrap();
        let far = geohash::perimeter_hashes(&hash, 500_000.0).unwrap();

        assert!(close[0].len() > far[0].len());
    }
}
