use crate::point::Point;

/// An axis-aligned bounding box, either empty or spanning a `min`/`max` pair
/// of [`Point`]s with `min.x <= max.x` and `min.y <= max.y`.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Bounds {
    extent: Option<(Point, Point)>,
}

impl Bounds {
    pub fn empty() -> Self {
        Bounds { extent: None }
    }

    pub fn from_points(p1: Point, p2: Point) -> Self {
        let mut bounds = Bounds::empty();
        bounds.add(p1);
        bounds.add(p2);
        bounds
    }

    pub fn is_empty(&self) -> bool {
        self.extent.is_none()
    }

    pub fn min(&self) -> Option<Point> {
        self.extent.map(|(min, _)| min)
    }

    pub fn max(&self) -> Option<Point> {
        self.extent.map(|(_, max)| max)
    }

    /// Expands the bounds to include `p`, initializing it if empty.
    pub fn add(&mut self, p: Point) {
        self.extent = Some(match self.extent {
            None => (p, p),
            Some((min, max)) => (
                Point::new(min.x.min(p.x), min.y.min(p.y)),
                Point::new(max.x.max(p.x), max.y.max(p.y)),
            ),
        });
    }

    /// Returns the (width, height) of the bounds as a `Point`. Panics if empty.
    pub fn size(&self) -> Point {
        let (min, max) = self.extent.expect("size() called on empty Bounds");
        Point::new(max.x - min.x, max.y - min.y)
    }

    /// Returns the center of the bounds. Panics if empty.
    pub fn center(&self) -> Point {
        let (min, _) = self.extent.expect("center() called on empty Bounds");
        let size = self.size();
        Point::new(min.x + size.x / 2.0, min.y + size.y / 2.0)
    }

    pub fn contains(&self, p: Point) -> bool {
        match self.extent {
            None => false,
            Some((min, max)) => p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_bounds_contains_nothing() {
        let b = Bounds::empty();
        assert!(b.is_empty());
        assert!(!b.contains(Point::new(0.0, 0.0)));
    }

    #[test]
    fn add_expands_to_include_point() {
        let mut b = Bounds::empty();
        b.add(Point::new(1.0, 1.0));
        b.add(Point::new(-1.0, 3.0));
        assert_eq!(b.min(), Some(Point::new(-1.0, 1.0)));
        assert_eq!(b.max(), Some(Point::new(1.0, 3.0)));
    }

    #[test]
    fn size_and_center() {
        let b = Bounds::from_points(Point::new(0.0, 0.0), Point::new(4.0, 2.0));
        assert_eq!(b.size(), Point::new(4.0, 2.0));
        assert_eq!(b.center(), Point::new(2.0, 1.0));
    }

    #[test]
    fn contains_is_inclusive_of_edges() {
        let b = Bounds::from_points(Point::new(0.0, 0.0), Point::new(1.0, 1.0));
        assert!(b.contains(Point::new(0.0, 0.0)));
        assert!(b.contains(Point::new(1.0, 1.0)));
        assert!(!b.contains(Point::new(1.0001, 0.5)));
    }
}
