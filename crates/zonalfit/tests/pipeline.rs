use approx::assert_abs_diff_eq;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use zonalfit::{
    balance_matrix, discretize, fit_integer_table, ClosureCriteria, ControlledRoundingOptions,
    IntegerTableOptions, LabelledArray, MatrixBalanceOptions, NdArray, ZoneMatrix, ZoneNumbering,
    ZoneVector,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_random_three_axis_table() {
    init_logger();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let shape = [4, 3, 5];
    let len: usize = shape.iter().product();
    let seed_values: Vec<f64> = (0..len).map(|_| 0.5 + rng.random::<f64>()).collect();
    let seed = NdArray::from_vec(&shape, seed_values).unwrap();

    let targets = vec![
        vec![40.0, 25.0, 20.0, 15.0],
        vec![30.0, 30.0, 40.0],
        vec![10.0, 20.0, 30.0, 25.0, 15.0],
    ];
    let mut options = IntegerTableOptions::default();
    options.balance.closure = ClosureCriteria::new(200, 1e-9);

    let table = fit_integer_table(seed, targets.clone(), &options).unwrap();

    for (axis, t) in targets.iter().enumerate() {
        let m = table.balanced.array.collapse_to_vector_f64(axis).unwrap();
        for (x, y) in m.iter().zip(t) {
            assert_abs_diff_eq!(*x, *y, epsilon = 1e-6);
        }
    }

    let rounded = &table.rounded;
    assert_eq!(rounded.round_ups, rounded.required_round_ups);
    assert_eq!(rounded.array.sum(), 100.0);
    for (r, b) in rounded.array.as_slice().iter().zip(table.balanced.array.as_slice()) {
        assert_eq!(r.fract(), 0.0);
        assert!((r - b).abs() < 1.0);
    }

    // a marginal sums len / extent cells, each moved by less than one unit
    let mut worst = 0.0f64;
    for (axis, t) in targets.iter().enumerate() {
        let cells_per_marginal = (len / shape[axis]) as f64;
        let m = rounded.array.collapse_to_vector_f64(axis).unwrap();
        for (x, y) in m.iter().zip(t) {
            let gap = (x - y).abs();
            assert!(gap < cells_per_marginal + 1e-6, "axis {axis}: {x} vs {y}");
            worst = worst.max(gap);
        }
    }
    assert_abs_diff_eq!(table.max_marginal_deviation().unwrap(), worst, epsilon = 1e-12);
}

#[test]
fn test_sparse_zone_matrix_round_trip() {
    init_logger();
    let zones = ZoneNumbering::from_unsorted(&[12, 3, 40]);
    let seed = ZoneMatrix::<f64>::from_rows(
        zones.clone(),
        zones.clone(),
        vec![
            vec![1.0, 2.0, 1.0],
            vec![2.0, 1.0, 3.0],
            vec![1.0, 1.0, 1.0],
        ],
    )
    .unwrap();
    let rows = ZoneVector::from_values(zones.clone(), vec![10.0, 20.0, 15.0]).unwrap();
    let cols = ZoneVector::from_values(zones.clone(), vec![15.0, 15.0, 15.0]).unwrap();
    let options = MatrixBalanceOptions {
        closure: ClosureCriteria::new(500, 1e-10),
        ..Default::default()
    };
    let balanced = balance_matrix(seed, rows, cols, &options).unwrap();
    assert_abs_diff_eq!(balanced.matrix.sum(), 45.0, epsilon = 1e-6);

    let array = NdArray::from_zone_matrix(&balanced.matrix).unwrap();
    let rounded = discretize(array, &ControlledRoundingOptions::default()).unwrap();
    let integer = rounded
        .array
        .to_zone_matrix(zones.clone(), zones.clone())
        .unwrap();

    assert_eq!(integer.sum(), 45.0);
    for &r in zones.externals() {
        for &c in zones.externals() {
            let x = balanced.matrix.get(r, c).unwrap();
            let y = integer.get(r, c).unwrap();
            assert!((x - y).abs() < 1.0, "({r}, {c}): {x} vs {y}");
        }
    }
}

#[test]
fn test_labelled_seed() {
    let mut seed = LabelledArray::<f64>::with_labels(vec![
        vec!["work".into(), "school".into()],
        vec!["auto".into(), "transit".into()],
    ])
    .unwrap();
    seed.set(&["work", "auto"], 3.0).unwrap();
    seed.set(&["work", "transit"], 1.0).unwrap();
    seed.set(&["school", "auto"], 1.0).unwrap();
    seed.set(&["school", "transit"], 1.0).unwrap();

    let table = fit_integer_table(
        seed.into_array(),
        vec![vec![7.0, 3.0], vec![6.0, 4.0]],
        &IntegerTableOptions::default(),
    )
    .unwrap();
    assert_eq!(table.rounded.array.sum(), 10.0);
}
