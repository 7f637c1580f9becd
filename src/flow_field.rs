use crate::bounds::Bounds;
use crate::error::StreamlineError;
use crate::flow::{interpolate, Flow};
use crate::geodesic::distance_course;
use crate::geodesic::position_from_distance_course;
use crate::point::Point;

/// Boundary, spacing and sample-count metadata for a [`FlowField`], exactly
/// as it would arrive from a gridded-current container file. Longitudes and
/// latitudes are in **degrees**; [`FlowField::new`] converts them to
/// radians once.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct FlowFieldMetadata {
    pub grid_spacing_longitudinal: f64,
    pub grid_spacing_latitudinal: f64,
    pub north_bound_latitude: f64,
    pub south_bound_latitude: f64,
    pub east_bound_longitude: f64,
    pub west_bound_longitude: f64,
    pub num_points_longitudinal: usize,
    pub num_points_latitudinal: usize,
}

/// Immutable, grid-indexed sampler yielding bilinearly interpolated
/// [`Flow`] at any point within its bounds.
///
/// Samples are addressed `[row = y, col = x]`; a sample with `speed < 0` is
/// "no data". The stored grid is in radians throughout.
#[derive(Debug)]
pub struct FlowField {
    samples: Vec<(f64, f64)>,
    num_x: usize,
    num_y: usize,
    dx: f64,
    dy: f64,
    min: Point,
    bounds: Bounds,
}

impl FlowField {
    /// Builds a field from a row-major `[row = y, col = x]` sample array of
    /// `(speed, direction_degrees)` pairs and its metadata.
    pub fn new(
        samples: Vec<(f64, f64)>,
        metadata: &FlowFieldMetadata,
    ) -> Result<Self, StreamlineError> {
        if metadata.num_points_longitudinal == 0 || metadata.num_points_latitudinal == 0 {
            return Err(StreamlineError::InvalidField(
                "numPointsLongitudinal and numPointsLatitudinal must be positive".into(),
            ));
        }
        if metadata.grid_spacing_longitudinal <= 0.0 || metadata.grid_spacing_latitudinal <= 0.0 {
            return Err(StreamlineError::InvalidField(
                "grid spacing must be positive".into(),
            ));
        }
        if metadata.north_bound_latitude < metadata.south_bound_latitude
            || metadata.east_bound_longitude < metadata.west_bound_longitude
        {
            return Err(StreamlineError::InvalidField(
                "bounds are inverted: north < south or east < west".into(),
            ));
        }
        let expected_len = metadata.num_points_longitudinal * metadata.num_points_latitudinal;
        if samples.len() != expected_len {
            return Err(StreamlineError::InvalidField(format!(
                "sample array has {} entries, expected {expected_len} ({}x{})",
                samples.len(),
                metadata.num_points_longitudinal,
                metadata.num_points_latitudinal,
            )));
        }

        let dx = metadata.grid_spacing_longitudinal.to_radians();
        let dy = metadata.grid_spacing_latitudinal.to_radians();
        let min = Point::new(metadata.west_bound_longitude, metadata.south_bound_latitude)
            .to_radians();
        let max = Point::new(metadata.east_bound_longitude, metadata.north_bound_latitude)
            .to_radians();

        let mut bounds = Bounds::empty();
        bounds.add(min);
        bounds.add(max);

        Ok(FlowField {
            samples,
            num_x: metadata.num_points_longitudinal,
            num_y: metadata.num_points_latitudinal,
            dx,
            dy,
            min,
            bounds,
        })
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn dx(&self) -> f64 {
        self.dx
    }

    pub fn dy(&self) -> f64 {
        self.dy
    }

    pub fn min(&self) -> Point {
        self.min
    }

    /// True iff `p` (radians) lies within the field's bounds and a valid
    /// flow sample can be interpolated there.
    pub fn point_has_value(&self, p: Point) -> bool {
        self.get_flow(p).is_some()
    }

    fn flow_at_index(&self, x: i64, y: i64) -> Option<Flow> {
        if x < 0 || y < 0 || x as usize >= self.num_x || y as usize >= self.num_y {
            return None;
        }
        let (speed, direction_degrees) = self.samples[y as usize * self.num_x + x as usize];
        if speed < 0.0 {
            return None;
        }
        Some(Flow::new(speed, direction_degrees.to_radians()))
    }

    /// Bilinearly interpolated flow at `p` (radians), or `None` if `p` is
    /// out of bounds or falls in a cell with no valid surrounding samples.
    pub fn get_flow(&self, p: Point) -> Option<Flow> {
        if !self.bounds.contains(p) {
            return None;
        }
        let ix = (p.x - self.min.x) / self.dx;
        let iy = (p.y - self.min.y) / self.dy;

        let x1 = ix.floor() as i64;
        let x2 = ix.ceil() as i64;
        let y1 = iy.floor() as i64;
        let y2 = iy.ceil() as i64;

        let px = ix - x1 as f64;
        let py = iy - y1 as f64;

        let f11 = self.flow_at_index(x1, y1);
        let f12 = self.flow_at_index(x1, y2);
        let f21 = self.flow_at_index(x2, y1);
        let f22 = self.flow_at_index(x2, y2);

        interpolate(interpolate(f11, f12, py), interpolate(f21, f22, py), px)
    }

    /// The grid's coarsest real-world spacing, in metres: the geodesic
    /// distance between two adjacent cells at the field's highest absolute
    /// latitude.
    pub fn density(&self) -> f64 {
        let max_lat = self.min.y.abs().max(
            self.bounds
                .max()
                .expect("non-empty FlowField has a max corner")
                .y
                .abs(),
        );
        let (distance, _) = distance_course(
            Point::new(0.0, max_lat - self.dy),
            Point::new(self.dx, max_lat),
        );
        distance
    }

    /// Advances from `start` along the flow for up to `steps` sub-steps of
    /// `distance / steps` metres each, using a midpoint (Heun) rule.
    ///
    /// Stops early — returning fewer than `steps` points, possibly zero —
    /// the moment the current point or its midpoint lacks a flow sample, or
    /// either's magnitude is at or below `min_magnitude`.
    pub fn transport(
        &self,
        start: Point,
        distance: f64,
        steps: usize,
        min_magnitude: f64,
    ) -> Vec<Point> {
        let step_size = distance / steps as f64;
        let mut points = Vec::with_capacity(steps);
        let mut last = start;

        while points.len() < steps {
            let Some(last_flow) = self.get_flow(last) else {
                break;
            };
            if last_flow.magnitude <= min_magnitude {
                break;
            }
            let mid = position_from_distance_course(last, step_size / 2.0, last_flow.direction);
            let Some(mid_flow) = self.get_flow(mid) else {
                break;
            };
            if mid_flow.magnitude <= min_magnitude {
                break;
            }
            let next = position_from_distance_course(last, step_size, mid_flow.direction);
            points.push(next);
            last = next;
        }

        points
    }
}
