//! Great-circle helpers and encoded polylines.

use geo_types::LineString;

use crate::models::Coordinates;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Precision used by Google-style encoded polylines.
pub const POLYLINE_PRECISION: u32 = 5;

/// Great-circle distance in kilometres.
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Initial bearing from `a` to `b`, degrees clockwise from north in `0..360`.
pub fn initial_bearing_deg(a: Coordinates, b: Coordinates) -> f64 {
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let d_lon = (b.lon - a.lon).to_radians();
    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();
    y.atan2(x).to_degrees().rem_euclid(360.0)
}

/// Eight-point compass name for a bearing.
pub fn compass_direction(bearing_deg: f64) -> &'static str {
    const POINTS: [&str; 8] = [
        "north",
        "north-east",
        "east",
        "south-east",
        "south",
        "south-west",
        "west",
        "north-west",
    ];
    let sector = ((bearing_deg.rem_euclid(360.0) + 22.5) / 45.0) as usize % 8;
    POINTS[sector]
}

/// Encodes points as a polyline. Returns an empty string for fewer than two
/// points or if encoding fails.
pub fn encode_polyline(points: &[Coordinates]) -> String {
    if points.len() < 2 {
        return String::new();
    }
    // geo-types expects (x, y) = (lon, lat)
    let line: LineString<f64> = points.iter().map(|p| (p.lon, p.lat)).collect();
    polyline::encode_coordinates(line, POLYLINE_PRECISION).unwrap_or_default()
}
