/// A current vector: a non-negative magnitude paired with a direction in
/// radians (clockwise from north, consistent with the `direction` samples a
/// [`crate::flow_field::FlowField`] stores).
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Flow {
    pub magnitude: f64,
    pub direction: f64,
}

impl Flow {
    #[inline]
    pub fn new(magnitude: f64, direction: f64) -> Self {
        Flow {
            magnitude,
            direction,
        }
    }

    fn to_uv(self) -> (f64, f64) {
        (
            self.direction.sin() * self.magnitude,
            self.direction.cos() * self.magnitude,
        )
    }

    fn from_uv(u: f64, v: f64) -> Self {
        Flow::new(u.hypot(v), u.atan2(v))
    }
}

/// Linearly blends two optional flows with weight `p` on `v2` (and `1 - p`
/// on `v1`). The blend is done on the Cartesian (u, v) components so that
/// direction wraps correctly, then re-polarized back to (magnitude,
/// direction).
///
/// A `None` operand contributes zero weight on its side; `interpolate(None,
/// None, _)` is `None`.
pub fn interpolate(v1: Option<Flow>, v2: Option<Flow>, p: f64) -> Option<Flow> {
    match (v1, v2) {
        (None, None) => None,
        (Some(v1), None) => {
            let (u, v) = v1.to_uv();
            Some(Flow::from_uv(u * (1.0 - p), v * (1.0 - p)))
        }
        (None, Some(v2)) => {
            let (u, v) = v2.to_uv();
            Some(Flow::from_uv(u * p, v * p))
        }
        (Some(v1), Some(v2)) => {
            let (u1, v1c) = v1.to_uv();
            let (u2, v2c) = v2.to_uv();
            let u = u1 * (1.0 - p) + u2 * p;
            let v = v1c * (1.0 - p) + v2c * p;
            Some(Flow::from_uv(u, v))
        }
    }
}
