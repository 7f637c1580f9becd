use std::f64::consts::FRAC_PI_2;

use geostream::driver::{generate, PlacementParams};
use geostream::flow_field::{FlowField, FlowFieldMetadata};
use geostream::geodesic::distance_course;
use geostream::point::Point;

fn grid(nx: usize, ny: usize, south: f64, west: f64, spacing: f64) -> FlowFieldMetadata {
    FlowFieldMetadata {
        grid_spacing_longitudinal: spacing,
        grid_spacing_latitudinal: spacing,
        north_bound_latitude: south + spacing * (ny as f64 - 1.0),
        south_bound_latitude: south,
        east_bound_longitude: west + spacing * (nx as f64 - 1.0),
        west_bound_longitude: west,
        num_points_longitudinal: nx,
        num_points_latitudinal: ny,
    }
}

#[test]
fn s1_empty_field_produces_no_streamlines() {
    let _ = pretty_env_logger::try_init();
    let metadata = grid(100, 100, 0.0, 0.0, 0.01);
    let field = FlowField::new(vec![(-1.0, 0.0); 100 * 100], &metadata).unwrap();

    let output = generate(&field, &PlacementParams::default()).unwrap();

    assert!(output.d_sep > 0.0);
    assert_eq!(output.i_steps, 5);
    assert!(output.streamlines.is_empty());
}

#[test]
fn s2_uniform_eastward_flow_is_monotone_and_well_separated() {
    let _ = pretty_env_logger::try_init();
    let metadata = grid(100, 100, 0.0, 0.0, 0.01);
    let field = FlowField::new(vec![(1.0, 90.0); 100 * 100], &metadata).unwrap();
    let params = PlacementParams::default();

    let output = generate(&field, &params).unwrap();
    assert!(!output.streamlines.is_empty());

    let d_test = output.d_sep * params.test_factor;

    for sl in &output.streamlines {
        for w in sl.points().windows(2) {
            assert!(w[1].coord.x >= w[0].coord.x);
        }
        for p in sl.points() {
            assert!((p.flow.direction - FRAC_PI_2).abs() < 1.0e-9);
        }
    }

    for (i, a) in output.streamlines.iter().enumerate() {
        for b in output.streamlines.iter().skip(i + 1) {
            let mut min_distance = f64::INFINITY;
            for pa in a.points() {
                for pb in b.points() {
                    let (distance, _) = distance_course(pa.coord, pb.coord);
                    min_distance = min_distance.min(distance);
                }
            }
            assert!(
                min_distance >= d_test * 0.95,
                "streamlines {i} and its neighbor came within {min_distance}m, dTest={d_test}"
            );
        }
    }
}

#[test]
fn s3_solid_body_rotation_produces_closed_rings() {
    let _ = pretty_env_logger::try_init();
    let nx = 81usize;
    let ny = 81usize;
    let metadata = grid(nx, ny, -2.0, -2.0, 0.05);
    let center = Point::new(0.0, 0.0).to_radians();

    let mut samples = Vec::with_capacity(nx * ny);
    for row in 0..ny {
        let lat = metadata.south_bound_latitude + row as f64 * metadata.grid_spacing_latitudinal;
        for col in 0..nx {
            let lon = metadata.west_bound_longitude + col as f64 * metadata.grid_spacing_longitudinal;
            let p = Point::new(lon, lat).to_radians();
            let (radius, course) = distance_course(center, p);
            if radius < 1.0 {
                samples.push((-1.0, 0.0));
            } else {
                let tangent_degrees = (course.to_degrees() + 90.0).rem_euclid(360.0);
                samples.push((radius, tangent_degrees));
            }
        }
    }
    let field = FlowField::new(samples, &metadata).unwrap();

    let mut params = PlacementParams::default();
    params.min_mag = 10.0;
    let output = generate(&field, &params).unwrap();

    assert!(!output.streamlines.is_empty());
    for sl in &output.streamlines {
        assert!(sl.len() > 4);
        let first = sl.points().first().unwrap().coord;
        let last = sl.points().last().unwrap().coord;
        let (end_to_end, _) = distance_course(first, last);

        let mut span = 0.0;
        for w in sl.points().windows(2) {
            span += distance_course(w[0].coord, w[1].coord).0;
        }
        assert!(
            end_to_end < span * 0.25,
            "streamline endpoints are {end_to_end}m apart over a {span}m path, expected a closed ring"
        );
    }
}

#[test]
fn s4_degenerate_magnitudes_produce_no_streamlines() {
    let _ = pretty_env_logger::try_init();
    let metadata = grid(100, 100, 0.0, 0.0, 0.01);
    let field = FlowField::new(vec![(1.0e-5, 90.0); 100 * 100], &metadata).unwrap();

    let output = generate(&field, &PlacementParams::default()).unwrap();
    assert!(output.streamlines.is_empty());
}

#[test]
fn s5_equator_straddling_bounds_split_minlat_at_zero() {
    let _ = pretty_env_logger::try_init();
    let metadata = grid(200, 200, -1.0, -1.0, 0.01);
    let field = FlowField::new(vec![(1.0, 90.0); 200 * 200], &metadata).unwrap();

    let output = generate(&field, &PlacementParams::default()).unwrap();
    assert!(!output.streamlines.is_empty());

    let first = &output.streamlines[0];
    let p = first.points()[0].coord;
    assert!(field.get_flow(p).is_some());

    let north_count = output
        .streamlines
        .iter()
        .filter(|sl| sl.seed().coord.y > 0.0)
        .count();
    let south_count = output
        .streamlines
        .iter()
        .filter(|sl| sl.seed().coord.y < 0.0)
        .count();
    assert!((north_count as i64 - south_count as i64).abs() <= (output.streamlines.len() as i64 / 10 + 1));
}

#[test]
fn s6_generation_is_deterministic_across_runs() {
    let _ = pretty_env_logger::try_init();
    let metadata = grid(100, 100, 0.0, 0.0, 0.01);
    let field = FlowField::new(vec![(1.0, 90.0); 100 * 100], &metadata).unwrap();
    let params = PlacementParams::default();

    let a = generate(&field, &params).unwrap();
    let b = generate(&field, &params).unwrap();

    assert_eq!(a.streamlines.len(), b.streamlines.len());
    for (sa, sb) in a.streamlines.iter().zip(b.streamlines.iter()) {
        assert_eq!(sa.len(), sb.len());
        for (pa, pb) in sa.points().iter().zip(sb.points().iter()) {
            assert!((pa.coord.x - pb.coord.x).abs() < 1.0e-12);
            assert!((pa.coord.y - pb.coord.y).abs() < 1.0e-12);
        }
    }
}
