use std::f64::consts::{FRAC_PI_2, PI};

use crate::error::StreamlineError;
use crate::flow_field::FlowField;
use crate::geodesic::position_from_distance_course;
use crate::integrator::Integrator;
use crate::occupancy_grid::OccupancyGrid;
use crate::point::Point;
use crate::streamline::Streamline;

/// The overridable constants of the Jobard-Lefer adaptation this crate
/// implements. `Default` reproduces the values the algorithm was tuned
/// with.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct PlacementParams {
    /// `dSep = field.density() * separation_factor`.
    pub separation_factor: f64,
    /// `dTest = dSep * test_factor`.
    pub test_factor: f64,
    /// Sub-steps per integration chunk.
    pub i_steps: usize,
    /// Caps `dSep` relative to the field's extent when deriving `minLevel`.
    pub d_sep_max_factor: f64,
    /// A candidate or existing point is abandoned once its flow magnitude
    /// is at or below this value.
    pub min_mag: f64,
}

impl Default for PlacementParams {
    fn default() -> Self {
        PlacementParams {
            separation_factor: 1.5,
            test_factor: 0.5,
            i_steps: 5,
            d_sep_max_factor: 3.75,
            min_mag: 1.0e-4,
        }
    }
}

/// The result of a placement run: the base separation distance, the
/// sub-step count used throughout, and the accepted streamlines in
/// acceptance order (a streamline's position in this list equals its
/// `index()`).
pub struct PlacementOutput {
    pub d_sep: f64,
    pub i_steps: usize,
    pub streamlines: Vec<Streamline>,
}

/// Runs the full multi-resolution placement described in §4.7 and returns
/// the accepted streamlines.
///
/// Returns `Err` only for the two fatal conditions in §7
/// (`StreamlineError::NumericDegenerate`); a field with no usable data
/// yields `Ok` with an empty streamline list, not an error.
pub fn generate(
    field: &FlowField,
    params: &PlacementParams,
) -> Result<PlacementOutput, StreamlineError> {
    generate_cancellable(field, params, None)
}

/// As [`generate`], but checked once per level against `should_cancel`. If
/// it returns `true`, placement stops and the streamlines accepted so far
/// are returned. This is an additive convenience for embedders with a
/// cooperative-cancellation requirement; it is not part of the placement
/// invariants.
pub fn generate_cancellable(
    field: &FlowField,
    params: &PlacementParams,
    should_cancel: Option<&dyn Fn() -> bool>,
) -> Result<PlacementOutput, StreamlineError> {
    let bounds = field.bounds();
    let density = field.density();
    if density <= 0.0 {
        return Err(StreamlineError::NumericDegenerate(
            "field density (getDensity) is not positive".into(),
        ));
    }
    let d_sep = density * params.separation_factor;
    let d_test = d_sep * params.test_factor;
    log::debug!("dSep={d_sep} dTest={d_test}");

    let min = bounds.min().expect("FlowField bounds are never empty");
    let max = bounds.max().expect("FlowField bounds are never empty");
    let min_lat = if min.y < 0.0 && max.y > 0.0 {
        0.0
    } else {
        min.y.abs().min(max.y.abs())
    };

    let lat_origin = Point::new(0.0, min_lat);
    let east_of_origin = position_from_distance_course(lat_origin, d_sep, FRAC_PI_2);
    let north_of_origin = position_from_distance_course(lat_origin, d_sep, 0.0);
    let cell_spacing = Point::new(
        east_of_origin.x - lat_origin.x,
        north_of_origin.y - lat_origin.y,
    );
    log::debug!("minLat={min_lat} pointsGridCellSpacing=({}, {})", cell_spacing.x, cell_spacing.y);

    let size = bounds.size();
    let d_sep_max = (size.x / cell_spacing.x).min(size.y / cell_spacing.y) / params.d_sep_max_factor;
    if d_sep_max <= 0.0 {
        return Err(StreamlineError::NumericDegenerate(
            "dSepMax is not positive".into(),
        ));
    }
    let min_level = -(d_sep_max.log2().floor() as i32);
    log::debug!("minLevel={min_level}");

    let mut seed_cache = generate_seeds(field, &bounds, cell_spacing);

    let mut grid = OccupancyGrid::new(min, cell_spacing, d_sep);
    let mut streamlines: Vec<Streamline> = Vec::new();
    let integrator = Integrator {
        field,
        d_sep,
        d_test,
        i_steps: params.i_steps,
        min_mag: params.min_mag,
    };

    for level in min_level..=0 {
        if let Some(cancel) = should_cancel {
            if cancel() {
                break;
            }
        }
        let level_factor: i64 = 1i64 << (-level);
        let d_sep_effective = d_sep * level_factor as f64;
        log::trace!(
            "level={level} levelFactor={level_factor} streamlines={}",
            streamlines.len()
        );

        for sl in streamlines.iter_mut() {
            integrator.extend(&mut grid, sl, level, level_factor);
        }

        let mut sl_start = 0usize;
        let mut kept_seeds = Vec::with_capacity(seed_cache.len());
        for seed in seed_cache.iter().copied() {
            let mut sli = sl_start;
            while sli < streamlines.len() {
                let stride = params.i_steps * level_factor as usize;
                let origins: Vec<_> = streamlines[sli]
                    .points()
                    .iter()
                    .step_by(stride)
                    .copied()
                    .collect();
                for origin in origins {
                    let direction = origin.flow.direction;
                    for k in 0..2 {
                        let perp_course = direction + FRAC_PI_2 + (k as f64) * PI;
                        let candidate =
                            position_from_distance_course(origin.coord, d_sep_effective, perp_course);
                        if grid.is_point_good(field, candidate, d_sep_effective, None, level_factor) {
                            let flow = field
                                .get_flow(candidate)
                                .expect("candidate already validated by is_point_good");
                            let mut new_sl = Streamline::new(candidate, flow, level);
                            integrator.extend(&mut grid, &mut new_sl, level, level_factor);
                            if new_sl.len() > 2 {
                                accept_streamline(&mut streamlines, &mut grid, new_sl, params.i_steps);
                            }
                        }
                    }
                }
                sli += 1;
            }
            sl_start = streamlines.len();

            if grid.is_point_good(field, seed, d_sep_effective, None, level_factor) {
                let flow = field
                    .get_flow(seed)
                    .expect("seed already validated by is_point_good");
                let mut new_sl = Streamline::new(seed, flow, level);
                integrator.extend(&mut grid, &mut new_sl, level, level_factor);
                if new_sl.len() > 2 {
                    accept_streamline(&mut streamlines, &mut grid, new_sl, params.i_steps);
                } else {
                    kept_seeds.push(seed);
                }
            } else if grid.is_point_good(field, seed, d_sep, None, level_factor) {
                kept_seeds.push(seed);
            }
        }
        seed_cache = kept_seeds;
    }

    Ok(PlacementOutput {
        d_sep,
        i_steps: params.i_steps,
        streamlines,
    })
}

fn accept_streamline(
    streamlines: &mut Vec<Streamline>,
    grid: &mut OccupancyGrid,
    mut sl: Streamline,
    i_steps: usize,
) {
    let index = streamlines.len();
    sl.accept(index);
    for point in sl.points().iter().step_by(i_steps) {
        grid.add_point(point.coord, index);
    }
    streamlines.push(sl);
}

/// Pre-generates the candidate seed grid: points at `center ± (x*i, y*j)`
/// for every sign combination, stepping `x`/`y` out from half-`seedSpacing`
/// to half the field's size, filtered to those with a flow sample.
fn generate_seeds(field: &FlowField, bounds: &crate::bounds::Bounds, cell_spacing: Point) -> Vec<Point> {
    let size = bounds.size();
    let seed_spacing = Point::new(
        (2.0 * cell_spacing.x).max(size.x / 250.0),
        (2.0 * cell_spacing.y).max(size.y / 250.0),
    );
    let center = bounds.center();

    let mut seeds = Vec::new();
    let mut x = seed_spacing.x / 2.0;
    while x < size.x / 2.0 {
        let mut y = seed_spacing.y / 2.0;
        while y < size.y / 2.0 {
            for &i in &[-1.0, 1.0] {
                for &j in &[-1.0, 1.0] {
                    let seed = Point::new(center.x + x * i, center.y + y * j);
                    if field.point_has_value(seed) {
                        seeds.push(seed);
                    }
                }
            }
            y += seed_spacing.y;
        }
        x += seed_spacing.x;
    }
    seeds
}
