use core::fmt;

/// A 2-D coordinate pair.
///
/// The unit (degrees or radians) is never stored; it is determined entirely
/// by convention at each call site. Every function in this crate that takes
/// or returns a `Point` documents which unit it expects.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Returns a copy of this point converted from degrees to radians.
    #[inline]
    pub fn to_radians(self) -> Self {
        Point::new(self.x.to_radians(), self.y.to_radians())
    }

    /// Returns a copy of this point converted from radians to degrees.
    #[inline]
    pub fn to_degrees(self) -> Self {
        Point::new(self.x.to_degrees(), self.y.to_degrees())
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from(xy: (f64, f64)) -> Self {
        Point::new(xy.0, xy.1)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.12},{:.12}", self.x, self.y)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn round_trips_through_radians_and_back() {
        let p = Point::new(12.5, -34.25);
        let back = p.to_radians().to_degrees();
        assert_relative_eq!(back.x, p.x, epsilon = 1.0e-12);
        assert_relative_eq!(back.y, p.y, epsilon = 1.0e-12);
    }

    #[test]
    fn new_assigns_x_and_y() {
        let p = Point::new(1.0, 2.0);
        assert_eq!(p.x, 1.0);
        assert_eq!(p.y, 2.0);
    }
}
