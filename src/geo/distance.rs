use crate::domain::Coordinate;

/// Mean earth radius used for all great-circle distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Returns the great-circle distance in kilometers between `a` and `b` using the haversine formula.
///
/// The result is exactly `0.0` for coincident points and never NaN for valid coordinates.
pub fn distance_km(a: &Coordinate, b: &Coordinate) -> f64 {
    let d_lat = (b.latitude() - a.latitude()).to_radians();
    let d_lng = (b.longitude() - a.longitude()).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + a.latitude().to_radians().cos() * b.latitude().to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    // Rounding can push h just past 1 for antipodal points
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}
