//! Projection property tests.
//!
//! Checks the range array against a brute-force reference over randomized
//! clouds, plus the fixed scenarios the projector must reproduce exactly.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rekha_scan::config::{HeightBand, HeightBandUpdate, ScanConfig, ScanGeometry};
use rekha_scan::projection::project;
use rekha_scan::types::{BoundingBoxStats, Point3D, PointCloudFrame};
use std::f32::consts::PI;

fn random_cloud(rng: &mut StdRng, n: usize) -> Vec<Point3D> {
    (0..n)
        .map(|_| {
            // Mostly in front, some behind, a few NaN
            if rng.random_bool(0.05) {
                Point3D::new(f32::NAN, rng.random_range(0.0..0.3), 1.0)
            } else {
                Point3D::new(
                    rng.random_range(-3.0..3.0),
                    rng.random_range(0.0..0.3),
                    rng.random_range(-1.0..6.0),
                )
            }
        })
        .collect()
}

fn frame(points: Vec<Point3D>) -> PointCloudFrame {
    points.into_iter().collect()
}

/// Reference: minimum accepted range per bin, computed point by point
/// straight from the binning formula.
fn reference_ranges(points: &[Point3D], config: &ScanConfig) -> Vec<f32> {
    let g = &config.geometry;
    let (min_h, max_h) = (config.band.min_height, config.band.max_height);
    let (angle_min, angle_max) = (g.angle_min as f64, g.angle_max as f64);
    let count = ((g.angle_max - g.angle_min) / g.angle_increment).ceil() as usize;
    let sentinel = g.range_max + 1.0;
    let mut bins: Vec<Vec<f32>> = vec![Vec::new(); count];

    for p in points {
        if p.x.is_nan() || p.y.is_nan() || p.z.is_nan() {
            continue;
        }
        let y = p.y as f64;
        if y < min_h || y > max_h {
            continue;
        }
        let angle = (p.x as f64).atan2(p.z as f64);
        if angle < angle_min || angle > angle_max {
            continue;
        }
        let i = ((angle - angle_min) / g.angle_increment as f64) as usize;
        let range = (p.x as f64).hypot(p.z as f64) as f32;
        bins[i.min(count - 1)].push(range);
    }

    bins.into_iter()
        .map(|b| b.into_iter().fold(sentinel, f32::min))
        .collect()
}

#[test]
fn test_length_depends_only_on_geometry() {
    let mut rng = StdRng::seed_from_u64(7);
    let geometries = [
        ScanGeometry::default(),
        ScanGeometry {
            angle_min: -PI,
            angle_max: PI,
            angle_increment: PI / 180.0,
            ..Default::default()
        },
        ScanGeometry {
            angle_min: 0.0,
            angle_max: 1.0,
            angle_increment: 0.3,
            ..Default::default()
        },
    ];

    for geometry in geometries {
        let config = ScanConfig::new(geometry, HeightBand::default(), "scan").unwrap();
        let expected =
            ((geometry.angle_max - geometry.angle_min) / geometry.angle_increment).ceil() as usize;

        for n in [0, 1, 50, 500] {
            let result = project(&frame(random_cloud(&mut rng, n)), &config);
            assert_eq!(result.ranges.len(), expected);
        }
    }
}

#[test]
fn test_bins_match_reference() {
    let mut rng = StdRng::seed_from_u64(42);
    let config = ScanConfig::default()
        .apply_update(HeightBandUpdate::new(0.05, 0.25))
        .unwrap();

    for _ in 0..20 {
        let points = random_cloud(&mut rng, 400);
        let result = project(&frame(points.clone()), &config);
        assert_eq!(result.ranges, reference_ranges(&points, &config));
    }
}

#[test]
fn test_permutation_keeps_ranges() {
    let mut rng = StdRng::seed_from_u64(3);
    let config = ScanConfig::default()
        .apply_update(HeightBandUpdate::new(0.0, 0.3))
        .unwrap();
    let mut points = random_cloud(&mut rng, 1000);

    let baseline = project(&frame(points.clone()), &config);
    for _ in 0..5 {
        points.shuffle(&mut rng);
        let shuffled = project(&frame(points.clone()), &config);
        assert_eq!(shuffled.ranges, baseline.ranges);
        assert_eq!(shuffled.stats, baseline.stats);
    }
}

#[test]
fn test_rejected_points_change_nothing() {
    let mut rng = StdRng::seed_from_u64(11);
    let config = ScanConfig::default();
    let points = random_cloud(&mut rng, 300);
    let baseline = project(&frame(points.clone()), &config);

    let mut noisy = points.clone();
    noisy.extend([
        Point3D::new(f32::NAN, 0.12, 0.5),
        Point3D::new(0.0, f32::NAN, 0.5),
        Point3D::new(0.0, 0.12, f32::NAN),
        // Out of band, nearer than anything else in its bin
        Point3D::new(0.0, 0.5, 0.2),
        Point3D::new(0.0, -0.5, 0.2),
    ]);
    let result = project(&frame(noisy), &config);

    assert_eq!(result.ranges, baseline.ranges);
    assert_eq!(result.stats.accepted, baseline.stats.accepted);
}

#[test]
fn test_single_point_scenario() {
    let config = ScanConfig::default();
    assert_eq!(config.band, HeightBand::new(0.10, 0.15));
    assert_eq!(config.geometry.range_max, 10.0);

    let result = project(&frame(vec![Point3D::new(0.0, 0.12, 1.0)]), &config);
    let hit = config.geometry.bin_index(0.0).unwrap();

    assert_eq!(result.ranges[hit], 1.0);
    assert_eq!(
        result.ranges.iter().filter(|&&r| r == 11.0).count(),
        result.ranges.len() - 1
    );
}

#[test]
fn test_two_points_same_bin_scenario() {
    let config = ScanConfig::default();
    let bearing = 0.2_f64;
    let at = |range: f64| {
        Point3D::new(
            (range * bearing.sin()) as f32,
            0.12,
            (range * bearing.cos()) as f32,
        )
    };

    let result = project(&frame(vec![at(3.0), at(1.5)]), &config);
    let bin = config.geometry.bin_index(bearing).unwrap();

    assert!((result.ranges[bin] - 1.5).abs() < 1e-5);
}

#[test]
fn test_empty_cloud_scenario() {
    let config = ScanConfig::default();
    let result = project(&PointCloudFrame::default(), &config);

    assert!(result.ranges.iter().all(|&r| r == config.geometry.range_max + 1.0));
    assert_eq!(result.bounds, BoundingBoxStats::EMPTY);
}

#[test]
fn test_bearing_outside_interval_rejected() {
    let geometry = ScanGeometry {
        angle_min: 0.0,
        angle_max: 1.0,
        angle_increment: 0.25,
        ..Default::default()
    };
    let config = ScanConfig::new(geometry, HeightBand::new(0.0, 1.0), "scan").unwrap();

    let result = project(
        &frame(vec![
            Point3D::new(-0.001, 0.5, 2.0),
            Point3D::new(2.0, 0.5, 1.0),
        ]),
        &config,
    );
    assert_eq!(result.stats.rejected_angle, 2);
    assert!(result.ranges.iter().all(|&r| r == 11.0));
}

#[test]
fn test_point_at_angle_max_lands_in_last_bin() {
    // angle_max = 0 is hit exactly by any point on the +z axis
    let geometry = ScanGeometry {
        angle_min: -1.0,
        angle_max: 0.0,
        angle_increment: 0.25,
        ..Default::default()
    };
    let config = ScanConfig::new(geometry, HeightBand::new(0.0, 1.0), "scan").unwrap();
    assert_eq!(geometry.bin_count(), 4);

    let result = project(&frame(vec![Point3D::new(0.0, 0.5, 1.0)]), &config);

    assert_eq!(result.stats.accepted, 1);
    assert_eq!(result.ranges[3], 1.0);
    assert!(result.ranges[..3].iter().all(|&r| r == 11.0));
}

#[test]
fn test_point_at_angle_min_lands_in_first_bin() {
    let geometry = ScanGeometry {
        angle_min: 0.0,
        angle_max: 1.0,
        angle_increment: 0.25,
        ..Default::default()
    };
    let config = ScanConfig::new(geometry, HeightBand::new(0.0, 1.0), "scan").unwrap();

    let result = project(&frame(vec![Point3D::new(0.0, 0.5, 3.0)]), &config);

    assert_eq!(result.stats.accepted, 1);
    assert_eq!(result.ranges[0], 3.0);
}
