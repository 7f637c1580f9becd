use crate::flow_field::FlowField;
use crate::geodesic::distance_course;
use crate::occupancy_grid::OccupancyGrid;
use crate::point::Point;
use crate::streamline::Streamline;

/// Single-step and multi-step advance of a [`Streamline`] against a
/// [`FlowField`] and an [`OccupancyGrid`].
///
/// `d_sep`/`d_test` here are the driver's *base* (level-0) separation
/// thresholds; `step`/`extend` scale them by `level_factor` themselves,
/// matching the placement driver's per-level scheduling in §4.7.
pub struct Integrator<'a> {
    pub field: &'a FlowField,
    pub d_sep: f64,
    pub d_test: f64,
    pub i_steps: usize,
    pub min_mag: f64,
}

impl<'a> Integrator<'a> {
    /// Attempts to extend `sl` by one chunk of `i_steps * level_factor`
    /// points in `direction` (`+1` grows forward, `-1` backward).
    ///
    /// Returns `false` without mutating `sl` or `grid` if the chunk cannot
    /// be fully collected: the endpoint lacks a flow sample, a transport
    /// call truncates early, any candidate fails the occupancy-grid
    /// proximity test, or a sub-chunk self-approaches the streamline's own
    /// existing points — checked after every `i_steps`-sized sub-chunk, not
    /// just once at the end, so a self-approach early in the chunk aborts
    /// immediately instead of being masked by where the chunk ends up.
    pub fn step(
        &self,
        grid: &mut OccupancyGrid,
        sl: &mut Streamline,
        direction: i32,
        level: i32,
        level_factor: i64,
    ) -> bool {
        let p0 = if direction > 0 {
            sl.points().last().expect("streamline always has >=1 point").coord
        } else {
            sl.points()[0].coord
        };
        if !self.field.point_has_value(p0) {
            return false;
        }

        let target_len = level_factor as usize * self.i_steps;
        let mut chunk: Vec<Point> = Vec::with_capacity(target_len);
        let mut last = p0;

        while chunk.len() < target_len {
            let sub = self
                .field
                .transport(last, self.d_sep * direction as f64, self.i_steps, self.min_mag);
            if sub.len() != self.i_steps {
                return false;
            }
            let test_sep = self.d_test * level_factor as f64;
            for &candidate in &sub {
                if !grid.is_point_good(self.field, candidate, test_sep, sl.index(), level_factor) {
                    return false;
                }
                last = candidate;
            }
            chunk.extend_from_slice(&sub);

            if !self.is_stream_point_good(sl, last, &chunk, level_factor) {
                return false;
            }
        }

        for coord in chunk {
            let flow = self
                .field
                .get_flow(coord)
                .expect("chunk points were already validated by is_point_good");
            if let Some(index) = sl.index() {
                grid.add_point(coord, index);
            }
            sl.add_point(coord, flow, level, direction);
        }
        true
    }

    /// `extend` repeatedly steps forward, then repeatedly steps backward,
    /// until each direction is exhausted. Returns `true` iff at least one
    /// step succeeded in either direction.
    pub fn extend(
        &self,
        grid: &mut OccupancyGrid,
        sl: &mut Streamline,
        level: i32,
        level_factor: i64,
    ) -> bool {
        let mut extended = false;
        while self.step(grid, sl, 1, level, level_factor) {
            extended = true;
        }
        while self.step(grid, sl, -1, level, level_factor) {
            extended = true;
        }
        extended
    }

    /// Called after every sub-chunk with `p_last` that sub-chunk's own
    /// endpoint and `chunk` everything accumulated so far. Self-approaching
    /// if `p_last` passes close to the streamline's own already-accepted
    /// points (checked every `i_steps`-th point), or — once `chunk` reaches
    /// its full `level_factor * i_steps` length — to the coarser
    /// every-`i_steps * level_factor`-th subsampling. The chunk-so-far's own
    /// tail (its last `i_steps` points) is excluded from the fine-grained
    /// self-check since it necessarily sits near `p_last`.
    fn is_stream_point_good(
        &self,
        sl: &Streamline,
        p_last: Point,
        chunk: &[Point],
        level_factor: i64,
    ) -> bool {
        if chunk.len() == level_factor as usize * self.i_steps {
            let coarse_stride = self.i_steps * level_factor as usize;
            for existing in sl.points().iter().step_by(coarse_stride) {
                if distance_course(existing.coord, p_last).0 < self.d_test {
                    return false;
                }
            }
        }

        for existing in sl.points().iter().step_by(self.i_steps) {
            if distance_course(existing.coord, p_last).0 < self.d_test {
                return false;
            }
        }

        let tail_cutoff = chunk.len().saturating_sub(self.i_steps);
        let mut i = 0;
        while i < tail_cutoff {
            if distance_course(chunk[i], p_last).0 < self.d_test {
                return false;
            }
            i += self.i_steps;
        }

        true
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::flow::Flow;
    use crate::flow_field::FlowFieldMetadata;
    use std::f64::consts::FRAC_PI_2;

    fn eastward_field() -> FlowField {
        let metadata = FlowFieldMetadata {
            grid_spacing_longitudinal: 0.01,
            grid_spacing_latitudinal: 0.01,
            north_bound_latitude: 1.0,
            south_bound_latitude: 0.0,
            east_bound_longitude: 1.0,
            west_bound_longitude: 0.0,
            num_points_longitudinal: 101,
            num_points_latitudinal: 101,
        };
        FlowField::new(vec![(1.0, 90.0); 101 * 101], &metadata).unwrap()
    }

    #[test]
    fn step_extends_a_streamline_forward_in_an_open_field() {
        let field = eastward_field();
        let mut grid = OccupancyGrid::new(field.min(), Point::new(0.0005, 0.0005), 500.0);
        let seed = Point::new(0.5f64.to_radians(), 0.5f64.to_radians());
        let mut sl = Streamline::new(seed, Flow::new(1.0, FRAC_PI_2), 0);

        let integrator = Integrator {
            field: &field,
            d_sep: 300.0,
            d_test: 150.0,
            i_steps: 5,
            min_mag: 1.0e-4,
        };

        let grew = integrator.step(&mut grid, &mut sl, 1, 0, 1);
        assert!(grew);
        assert_eq!(sl.len(), 1 + 5);
        assert!(sl.points().last().unwrap().coord.x > seed.x);
    }

    #[test]
    fn step_fails_at_the_edge_of_the_field() {
        let field = eastward_field();
        let mut grid = OccupancyGrid::new(field.min(), Point::new(0.0005, 0.0005), 500.0);
        let seed = Point::new(0.999f64.to_radians(), 0.5f64.to_radians());
        let mut sl = Streamline::new(seed, Flow::new(1.0, FRAC_PI_2), 0);

        let integrator = Integrator {
            field: &field,
            d_sep: 3000.0,
            d_test: 1500.0,
            i_steps: 5,
            min_mag: 1.0e-4,
        };

        assert!(!integrator.step(&mut grid, &mut sl, 1, 0, 1));
        assert_eq!(sl.len(), 1);
    }

    #[test]
    fn extend_grows_in_both_directions() {
        let field = eastward_field();
        let mut grid = OccupancyGrid::new(field.min(), Point::new(0.0005, 0.0005), 500.0);
        let seed = Point::new(0.5f64.to_radians(), 0.5f64.to_radians());
        let mut sl = Streamline::new(seed, Flow::new(1.0, FRAC_PI_2), 0);

        let integrator = Integrator {
            field: &field,
            d_sep: 300.0,
            d_test: 150.0,
            i_steps: 5,
            min_mag: 1.0e-4,
        };

        assert!(integrator.extend(&mut grid, &mut sl, 0, 1));
        assert!(sl.len() > 1);
        assert!(sl.points()[0].coord.x < seed.x || sl.seed_index() == 0);
    }
}
