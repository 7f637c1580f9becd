use crate::point::Point;

/// Mean earth radius, in metres, used for every great-circle computation in
/// this crate. This is the spherical-earth constant (the `Sphere` entry a
/// mean-earth-radius table would carry alongside WGS84/GRS80/IUGG values).
pub const EARTH_RADIUS: f64 = 6_371_000.0;

/// Great-circle distance and initial course between two points on a sphere.
///
/// Both `p1` and `p2` are in **radians**. Returns `(distance_metres,
/// course_radians)`.
///
/// The parenthesization of the `y` term is part of the contract: do not
/// reorder it, callers depend on bit-identical floating point behavior.
pub fn distance_course(p1: Point, p2: Point) -> (f64, f64) {
    let dlon = p2.x - p1.x;

    let (slat1, clat1) = p1.y.sin_cos();
    let (slat2, clat2) = p2.y.sin_cos();
    let (sdlon, cdlon) = dlon.sin_cos();

    let y = ((clat2 * sdlon).powi(2) + (clat1 * slat2 - slat1 * clat2 * cdlon).powi(2)).sqrt();
    let x = slat1 * slat2 + clat1 * clat2 * cdlon;
    let central_angle = y.atan2(x);

    let course = sdlon.atan2(clat1 * p2.y.tan() - slat1 * cdlon);

    (central_angle * EARTH_RADIUS, course)
}

/// The position reached by traveling `distance` metres on course
/// `course_radians` starting from `p1` (radians), on a sphere.
///
/// Returns a `Point` in radians.
pub fn position_from_distance_course(p1: Point, distance: f64, course_radians: f64) -> Point {
    let (slat1, clat1) = p1.y.sin_cos();
    let central_angle = distance / EARTH_RADIUS;
    let (sca, cca) = central_angle.sin_cos();
    let (scourse, ccourse) = course_radians.sin_cos();

    let y = slat1 * cca + clat1 * sca * ccourse;
    let x = ((clat1 * cca - slat1 * sca * ccourse).powi(2) + (sca * scourse).powi(2)).sqrt();
    let lat2 = y.atan2(x);

    let y = sca * scourse;
    let x = clat1 * cca - slat1 * sca * ccourse;
    let dlon = y.atan2(x);
    let lon2 = p1.x + dlon;

    Point::new(lon2, lat2)
}
