use std::collections::HashMap;

use crate::flow_field::FlowField;
use crate::geodesic::{distance_course, position_from_distance_course};
use crate::point::Point;

#[derive(Clone, Copy, Debug)]
struct GridEntry {
    point: Point,
    stream_index: usize,
}

/// Sparse spatial index of accepted streamline points, used to enforce the
/// minimum-separation invariant during placement.
///
/// Cells are `dSep`-sized at the field's equator-closest latitude; because a
/// fixed angular width covers a shrinking real-world distance toward the
/// poles, each row caches a `width_factor` — how many columns one `dSep`
/// spans at that row's latitude — used to widen the column search window.
pub struct OccupancyGrid {
    min: Point,
    cell_spacing: Point,
    d_sep: f64,
    rows: HashMap<i64, HashMap<i64, Vec<GridEntry>>>,
    width_factor: HashMap<i64, f64>,
}

impl OccupancyGrid {
    pub fn new(min: Point, cell_spacing: Point, d_sep: f64) -> Self {
        OccupancyGrid {
            min,
            cell_spacing,
            d_sep,
            rows: HashMap::new(),
            width_factor: HashMap::new(),
        }
    }

    fn cell_index(&self, p: Point) -> (i64, i64) {
        let row = ((p.y - self.min.y) / self.cell_spacing.y).floor() as i64;
        let col = ((p.x - self.min.x) / self.cell_spacing.x).floor() as i64;
        (row, col)
    }

    fn width_factor_for(&mut self, row: i64) -> f64 {
        *self.width_factor.entry(row).or_insert_with(|| {
            let row_origin = Point::new(0.0, row as f64 * self.cell_spacing.y + self.min.y);
            let east_edge = position_from_distance_course(
                row_origin,
                self.d_sep,
                std::f64::consts::FRAC_PI_2,
            );
            east_edge.x / self.cell_spacing.x
        })
    }

    /// Records `p` as belonging to streamline `stream_index`.
    pub fn add_point(&mut self, p: Point, stream_index: usize) {
        let (row, col) = self.cell_index(p);
        self.width_factor_for(row);
        self.rows
            .entry(row)
            .or_default()
            .entry(col)
            .or_default()
            .push(GridEntry {
                point: p,
                stream_index,
            });
    }

    /// True iff `p` has a flow sample and no occupied point belonging to a
    /// streamline other than `owner_index` lies within `sep` metres of it.
    ///
    /// `level_factor` widens the search window: rows `[row - level_factor,
    /// row + level_factor]` are scanned, and within each row, columns out to
    /// `ceil(level_factor * width_factor[row])`.
    pub fn is_point_good(
        &self,
        field: &FlowField,
        p: Point,
        sep: f64,
        owner_index: Option<usize>,
        level_factor: i64,
    ) -> bool {
        if !field.point_has_value(p) {
            return false;
        }
        let (row, col) = self.cell_index(p);

        for r in (row - level_factor)..=(row + level_factor) {
            let Some(row_map) = self.rows.get(&r) else {
                continue;
            };
            let Some(&factor) = self.width_factor.get(&r) else {
                continue;
            };
            let l_col = (level_factor as f64 * factor).ceil() as i64;
            for c in (col - l_col)..=(col + l_col) {
                let Some(entries) = row_map.get(&c) else {
                    continue;
                };
                for entry in entries {
                    if Some(entry.stream_index) == owner_index {
                        continue;
                    }
                    let (distance, _) = distance_course(entry.point, p);
                    if distance < sep {
                        return false;
                    }
                }
            }
        }
        true
    }
}
