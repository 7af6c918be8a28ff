//! Integration tests for the zonal energy spectrum pipeline.
//!
//! Covers spectral concentration of pure waves, band symmetry, output
//! shapes, non-negativity, amplitude scaling, and the synthetic
//! 180×360×10 experiment.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;
use zonal_spectrum::{
    CoordinateAxis, EARTH_RADIUS, GriddedField, Latitude, SpectrumConfig, SpectrumError,
    WAVENUMBER_AXIS, ZonalSpectrumComputer, compute_zonal_energy_spectrum,
};

/// Longitudes `0, 360/L, ..., 360(L-1)/L` (no duplicated meridian).
fn periodic_lon(name: &str, n: usize) -> CoordinateAxis {
    CoordinateAxis::new(name, (0..n).map(|j| 360.0 * j as f64 / n as f64).collect())
}

/// Field [lat, lon] where every row is `amplitude * cos(k0 λ + phase)`.
fn wave_field(lats: &[f64], n_lon: usize, k0: usize, amplitude: f64, phase: f64) -> GriddedField {
    let lat = CoordinateAxis::new("lat", lats.to_vec());
    let lon = periodic_lon("lon", n_lon);
    let mut values = Vec::with_capacity(lats.len() * n_lon);
    for _ in lats {
        for j in 0..n_lon {
            let lambda = 2.0 * PI * j as f64 / n_lon as f64;
            values.push(amplitude * (k0 as f64 * lambda + phase).cos());
        }
    }
    GriddedField::from_shape_vec(vec![lat, lon], values).unwrap()
}

/// Field with independent uniform random values, axes `[lat, lon, time]`.
fn random_field(n_lat: usize, n_lon: usize, n_time: usize, seed: u64) -> GriddedField {
    let mut rng = StdRng::seed_from_u64(seed);
    let lat = CoordinateAxis::linspace("lat", -90.0, 90.0, n_lat);
    let lon = CoordinateAxis::linspace("lon", 0.0, 360.0, n_lon);
    let time = CoordinateAxis::arange("time", n_time);
    let values = (0..n_lat * n_lon * n_time).map(|_| rng.r#gen::<f64>()).collect();
    GriddedField::from_shape_vec(vec![lat, lon, time], values).unwrap()
}

#[test]
fn test_pure_wave_concentrates_at_its_wavenumber() {
    let amplitude = 3.0;
    let k0 = 6;
    let field = wave_field(&[45.0], 72, k0, amplitude, 0.4);
    let psd = compute_zonal_energy_spectrum(&field, "lat", "lon", 30.0, 60.0).unwrap();

    // Per unit length of the parallel, the wave carries A²/2 (its mean square)
    let c45 = Latitude::new(45.0).circumference(EARTH_RADIUS).meters();
    let p = psd.as_1d().unwrap();
    for (k, &v) in p.iter().enumerate() {
        let energy = v / c45;
        if k == k0 {
            assert!(
                (energy - amplitude * amplitude / 2.0).abs() < 1e-10,
                "S_{} expected {}, got {}",
                k,
                amplitude * amplitude / 2.0,
                energy
            );
        } else {
            assert!(energy < 1e-20, "S_{} should vanish, got {:e}", k, energy);
        }
    }
}

#[test]
fn test_total_energy_matches_mean_square() {
    let mut rng = StdRng::seed_from_u64(7);
    let n_lon = 64;
    let lat = CoordinateAxis::new("lat", vec![40.0]);
    let lon = periodic_lon("lon", n_lon);
    // Random row with its Nyquist component removed
    let mut row: Vec<f64> = (0..n_lon).map(|_| rng.r#gen::<f64>() - 0.5).collect();
    let nyquist: f64 = row
        .iter()
        .enumerate()
        .map(|(j, &x)| if j % 2 == 0 { x } else { -x })
        .sum::<f64>()
        / n_lon as f64;
    for (j, x) in row.iter_mut().enumerate() {
        *x -= if j % 2 == 0 { nyquist } else { -nyquist };
    }
    let mean_square = row.iter().map(|x| x * x).sum::<f64>() / n_lon as f64;

    let field = GriddedField::from_shape_vec(vec![lat, lon], row).unwrap();
    let psd = compute_zonal_energy_spectrum(&field, "lat", "lon", 30.0, 60.0).unwrap();
    let c40 = Latitude::new(40.0).circumference(EARTH_RADIUS).meters();
    let total: f64 = psd.data().iter().sum::<f64>() / c40;

    assert!(
        (total - mean_square).abs() < 1e-12,
        "total {} vs mean square {}",
        total,
        mean_square
    );
}

#[test]
fn test_row_order_invariance() {
    let south_to_north: Vec<f64> = (-89..=89).step_by(2).map(|l| l as f64).collect();
    let north_to_south: Vec<f64> = south_to_north.iter().rev().copied().collect();
    let n_lon = 48;

    let build = |lats: &[f64]| {
        let lat = CoordinateAxis::new("lat", lats.to_vec());
        let lon = periodic_lon("lon", n_lon);
        let mut values = Vec::new();
        for &phi in lats {
            for j in 0..n_lon {
                let lambda = 2.0 * PI * j as f64 / n_lon as f64;
                values.push(phi.to_radians().sin() * (3.0 * lambda).cos() + 0.1 * phi);
            }
        }
        GriddedField::from_shape_vec(vec![lat, lon], values).unwrap()
    };

    let a = compute_zonal_energy_spectrum(&build(&south_to_north), "lat", "lon", 30.0, 60.0)
        .unwrap();
    let b = compute_zonal_energy_spectrum(&build(&north_to_south), "lat", "lon", 30.0, 60.0)
        .unwrap();

    assert_eq!(a.n_latitudes(), b.n_latitudes());
    for (x, y) in a.data().iter().zip(b.data().iter()) {
        assert!((x - y).abs() <= 1e-12 * x.abs().max(1.0), "{} vs {}", x, y);
    }
}

#[test]
fn test_wavenumber_axis_length() {
    for n_lon in 2..=41 {
        let field = wave_field(&[-35.0, 50.0], n_lon, 1, 1.0, 0.0);
        let psd = compute_zonal_energy_spectrum(&field, "lat", "lon", 30.0, 60.0).unwrap();
        assert_eq!(psd.shape(), &[n_lon / 2], "L = {}", n_lon);
        assert_eq!(psd.n_wavenumbers(), n_lon / 2);
        assert_eq!(psd.wavenumbers().last().copied(), Some((n_lon / 2 - 1) as f64));
    }
}

#[test]
fn test_non_negative_for_arbitrary_input() {
    let mut rng = StdRng::seed_from_u64(11);
    let lat = CoordinateAxis::linspace("lat", -90.0, 90.0, 37);
    let lon = periodic_lon("lon", 33);
    let values = (0..37 * 33)
        .map(|_| rng.gen_range(-1.0e4..1.0e4))
        .collect();
    let field = GriddedField::from_shape_vec(vec![lat, lon], values).unwrap();

    let psd = compute_zonal_energy_spectrum(&field, "lat", "lon", 0.0, 90.0).unwrap();
    assert!(psd.data().iter().all(|&v| v >= 0.0 && v.is_finite()));
}

#[test]
fn test_doubling_amplitude_quadruples_power() {
    let base = random_field(30, 40, 3, 3);
    let doubled_values = base.data().mapv(|v| 2.0 * v);
    let doubled = GriddedField::new(doubled_values, base.axes().to_vec()).unwrap();

    let p1 = compute_zonal_energy_spectrum(&base, "lat", "lon", 30.0, 60.0).unwrap();
    let p2 = compute_zonal_energy_spectrum(&doubled, "lat", "lon", 30.0, 60.0).unwrap();

    for (a, b) in p1.data().iter().zip(p2.data().iter()) {
        assert!((b - 4.0 * a).abs() <= 1e-12 * b.abs().max(1e-300), "{} vs 4×{}", b, a);
    }
}

#[test]
fn test_empty_band_is_an_error() {
    let field = random_field(180, 36, 1, 5);
    let err = compute_zonal_energy_spectrum(&field, "lat", "lon", 89.0, 89.5).unwrap_err();
    assert_eq!(err, SpectrumError::EmptySelection { lo: 89.0, hi: 89.5 });
}

#[test]
fn test_missing_and_degenerate_axes() {
    let field = random_field(10, 8, 2, 9);
    assert_eq!(
        compute_zonal_energy_spectrum(&field, "latitude", "longitude", 30.0, 60.0).unwrap_err(),
        SpectrumError::MissingAxis("latitude".into())
    );
    assert_eq!(
        compute_zonal_energy_spectrum(&field, "lat", "longitude", 30.0, 60.0).unwrap_err(),
        SpectrumError::MissingAxis("longitude".into())
    );

    let single = field.select("lon", &[0]).unwrap();
    assert!(matches!(
        compute_zonal_energy_spectrum(&single, "lat", "lon", 30.0, 60.0),
        Err(SpectrumError::DegenerateAxis { len: 1, .. })
    ));
}

#[test]
fn test_synthetic_180_360_10() {
    let field = random_field(180, 360, 10, 42);
    let psd = compute_zonal_energy_spectrum(&field, "lat", "lon", 30.0, 60.0).unwrap();

    assert_eq!(psd.shape(), &[10, 180]);
    assert_eq!(psd.axis_names(), vec!["time", WAVENUMBER_AXIS]);
    assert!(psd.data().iter().all(|&v| v.is_finite() && v > 0.0));

    // Uniform[0, 1) noise has mean 0.5, so the k = 0 term dominates
    let snapshot = psd.select("time", 1).unwrap();
    let p = snapshot.as_1d().unwrap();
    assert!(p[0] > 10.0 * p[1], "mean term should dominate: {} vs {}", p[0], p[1]);

    let time_mean = psd.mean_over("time").unwrap();
    assert_eq!(time_mean.shape(), &[180]);
}

#[test]
fn test_both_naming_conventions_agree() {
    let field = random_field(46, 64, 2, 13);
    let renamed_axes: Vec<CoordinateAxis> = field
        .axes()
        .iter()
        .map(|a| {
            let name = match a.name.as_str() {
                "lat" => "latitude",
                "lon" => "longitude",
                other => other,
            };
            CoordinateAxis::new(name, a.values.clone())
        })
        .collect();
    let renamed = GriddedField::new(field.data().clone(), renamed_axes).unwrap();

    let short = ZonalSpectrumComputer::new(SpectrumConfig::default())
        .compute(&field)
        .unwrap();
    let long = ZonalSpectrumComputer::new(SpectrumConfig::era5())
        .compute(&renamed)
        .unwrap();
    let detected = ZonalSpectrumComputer::new(SpectrumConfig::detect_axes(&renamed).unwrap())
        .compute(&renamed)
        .unwrap();

    assert_eq!(short.data(), long.data());
    assert_eq!(long.data(), detected.data());
}

#[test]
fn test_isel_before_transform() {
    // [member, level, lat, lon] reduced to one member and level, like z500
    let member = CoordinateAxis::arange("ensemble_member", 2);
    let level = CoordinateAxis::new("pressure_level", vec![850.0, 500.0]);
    let lat = CoordinateAxis::new("latitude", vec![-45.0, 45.0]);
    let lon = periodic_lon("longitude", 16);
    let mut values = Vec::new();
    for m in 0..2 {
        for l in 0..2 {
            for _ in 0..2 {
                for j in 0..16 {
                    let lambda = 2.0 * PI * j as f64 / 16.0;
                    values.push((1 + m + 2 * l) as f64 * (2.0 * lambda).cos());
                }
            }
        }
    }
    let field = GriddedField::from_shape_vec(vec![member, level, lat, lon], values).unwrap();

    let z500 = field
        .isel("ensemble_member", 1)
        .unwrap()
        .isel("pressure_level", 1)
        .unwrap();
    assert_eq!(z500.axis_names(), vec!["latitude", "longitude"]);

    let psd = ZonalSpectrumComputer::new(SpectrumConfig::era5())
        .compute(&z500)
        .unwrap();
    // Amplitude 1 + 1 + 2 = 4 → A²/2 = 8 per unit length
    let c45 = Latitude::new(45.0).circumference(EARTH_RADIUS).meters();
    assert!((psd.as_1d().unwrap()[2] / c45 - 8.0).abs() < 1e-10);
}

#[test]
fn test_deterministic() {
    let field = random_field(20, 30, 4, 21);
    let computer = ZonalSpectrumComputer::default();
    let a = computer.compute(&field).unwrap();
    let b = computer.compute(&field).unwrap();
    assert_eq!(a.data(), b.data());
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_matches_serial() {
    let field = random_field(90, 120, 16, 17);
    let computer = ZonalSpectrumComputer::default();
    let serial = computer.compute(&field).unwrap();
    let parallel = computer.compute_parallel(&field).unwrap();
    assert_eq!(serial.shape(), parallel.shape());
    assert_eq!(serial.data(), parallel.data());
}
