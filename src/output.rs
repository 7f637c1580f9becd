//! Optional GeoJSON shaping for a completed [`crate::driver::PlacementOutput`],
//! enabled with the `geojson` feature.

use crate::bounds::Bounds;
use crate::driver::PlacementOutput;

/// A `FeatureCollection` of `LineString` features, one per accepted
/// streamline, each coordinate carrying its own `magnitude`, `direction`
/// (radians) and `level` as point-indexed properties, plus a top-level
/// `bbox` covering every feature.
///
/// Earlier tooling in this space emitted a single `properties.magnitudes`
/// array per feature addressed by an index that could desync from the
/// coordinate array once a streamline's seed was reassigned. Carrying each
/// coordinate's attributes alongside it avoids that class of bug rather than
/// reproducing it.
#[cfg(feature = "geojson")]
pub fn to_geojson(output: &PlacementOutput) -> serde_json::Value {
    let mut extent = Bounds::empty();
    for sl in &output.streamlines {
        if let Some(min) = sl.bounds().min() {
            extent.add(min.to_degrees());
        }
        if let Some(max) = sl.bounds().max() {
            extent.add(max.to_degrees());
        }
    }
    let bbox = match (extent.min(), extent.max()) {
        (Some(min), Some(max)) => serde_json::json!([min.x, min.y, max.x, max.y]),
        _ => serde_json::Value::Null,
    };

    let features: Vec<serde_json::Value> = output
        .streamlines
        .iter()
        .map(|sl| {
            let coordinates: Vec<_> = sl
                .points()
                .iter()
                .map(|p| serde_json::json!([p.coord.to_degrees().x, p.coord.to_degrees().y]))
                .collect();
            let magnitudes: Vec<_> = sl.points().iter().map(|p| p.flow.magnitude).collect();
            let directions: Vec<_> = sl.points().iter().map(|p| p.flow.direction).collect();
            let points_levels: Vec<_> = sl.points().iter().map(|p| p.level).collect();

            serde_json::json!({
                "type": "Feature",
                "geometry": {
                    "type": "LineString",
                    "coordinates": coordinates,
                },
                "properties": {
                    "index": sl.index(),
                    "streamline_level": sl.level(),
                    "seed_index": sl.seed_index(),
                    "points_levels": points_levels,
                    "magnitudes": magnitudes,
                    "directions": directions,
                    "dSep": output.d_sep,
                    "iSteps": output.i_steps,
                },
            })
        })
        .collect();

    serde_json::json!({
        "type": "FeatureCollection",
        "bbox": bbox,
        "features": features,
    })
}
