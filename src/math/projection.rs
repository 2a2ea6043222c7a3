//! Geographic projections shared by mesh building and marker placement.
//!
//! Two targets are supported: the equirectangular plane, where a point sits at
//! `(lon, lat, 0)` in radians, and the unit sphere centred at the origin with
//! `+Y` through the north pole and `+Z` through (0°, 0°).

use std::f64::consts::{FRAC_PI_2, PI};

use super::{rescale, Point3};

/// Converts latitude/longitude in degrees to radians via the plane's rescale.
///
/// Latitude maps `[-90, 90]` onto `[-pi/2, pi/2]` and longitude maps
/// `[-180, 180]` onto `[-pi, pi]`.
#[must_use]
pub fn geo_to_radians(lat_deg: f64, lon_deg: f64) -> (f64, f64) {
    let lat = rescale(lat_deg, -90.0, 90.0, -FRAC_PI_2, FRAC_PI_2);
    let lon = rescale(lon_deg, -180.0, 180.0, -PI, PI);
    (lat, lon)
}

/// Projects latitude/longitude in radians onto the unit sphere.
///
/// The returned position doubles as the outward surface normal.
#[must_use]
pub fn to_sphere(lat: f64, lon: f64) -> Point3 {
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lon, cos_lon) = lon.sin_cos();
    Point3::new(cos_lat * sin_lon, sin_lat, cos_lat * cos_lon)
}

/// Projects latitude/longitude in degrees onto the flat map plane.
#[must_use]
pub fn to_flat_plane(lat_deg: f64, lon_deg: f64) -> Point3 {
    let (lat, lon) = geo_to_radians(lat_deg, lon_deg);
    Point3::new(lon, lat, 0.0)
}
