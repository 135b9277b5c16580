use approx::assert_relative_eq;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use zonalfit_ipf::{
    balance_array, balance_matrix, ArrayBalanceOptions, ArrayBalancer, ClosureCriteria, IpfError,
    MatrixBalanceOptions,
};
use zonalfit_matrix::{ZoneMatrix, ZoneVector};
use zonalfit_ndarray::NdArray;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn tight() -> ArrayBalanceOptions {
    ArrayBalanceOptions {
        closure: ClosureCriteria::new(1000, 1e-12),
        trace: false,
    }
}

#[test]
fn test_three_axis_uniform_targets() {
    init_logger();
    // ((i+1)*(j+1) + (i+1)) * (k+1) over a 3x5x2 seed
    let shape = [3, 5, 2];
    let mut seed = NdArray::<f64>::zeros(&shape).unwrap();
    for i in 0..3 {
        for j in 0..5 {
            for k in 0..2 {
                let v = (((i + 1) * (j + 1) + (i + 1)) * (k + 1)) as f64;
                seed.set(&[i, j, k], v).unwrap();
            }
        }
    }
    let total = 0.2 * seed.sum();
    let targets: Vec<Vec<f64>> = shape
        .iter()
        .map(|&n| vec![total / n as f64; n])
        .collect();

    let out = balance_array(seed, targets.clone(), &tight()).unwrap();
    for (axis, t) in targets.iter().enumerate() {
        let achieved = out.array.collapse_to_vector_f64(axis).unwrap();
        for (a, b) in achieved.iter().zip(t) {
            assert_relative_eq!(*a, *b, max_relative = 1e-9);
        }
    }
}

#[test]
fn test_target_totals_rescaled_to_first_axis() {
    init_logger();
    let seed = NdArray::<f64>::filled(&[2, 2], 1.0).unwrap();
    let out = balance_array(seed, vec![vec![3.0, 7.0], vec![1.0, 1.0]], &tight()).unwrap();
    assert_eq!(out.targets[1], vec![5.0, 5.0]);
    assert_relative_eq!(out.array.sum(), 10.0, max_relative = 1e-12);
    assert_relative_eq!(out.array.get(&[1, 0]).unwrap(), 3.5, max_relative = 1e-9);
}

#[test]
fn test_dimension_mismatch() {
    let seed = NdArray::<f32>::filled(&[2, 3], 1.0).unwrap();
    let err = ArrayBalancer::new()
        .balance(seed, vec![vec![1.0, 1.0], vec![1.0, 1.0]])
        .unwrap_err();
    assert!(matches!(err, IpfError::DimensionMismatch { .. }));
}

#[test]
fn test_iteration_cap_respected() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let data: Vec<f64> = (0..24).map(|_| rng.random::<f64>()).collect();
    let seed = NdArray::from_vec(&[2, 3, 4], data).unwrap();
    let out = ArrayBalancer::new()
        .with_max_iterations(2)
        .with_max_relative_error(0.0)
        .balance(seed, vec![vec![6.0, 6.0], vec![4.0; 3], vec![3.0; 4]])
        .unwrap();
    assert_eq!(out.iterations, 2);
}

#[test]
fn test_stops_when_factor_change_repeats() {
    init_logger();
    // Infeasible: the diagonal seed cannot match rows [1, 2] and columns [2, 1].
    let seed = NdArray::<f64>::from_vec(&[2, 2], vec![1.0, 0.0, 0.0, 1.0]).unwrap();
    let out = balance_array(seed, vec![vec![1.0, 2.0], vec![2.0, 1.0]], &tight()).unwrap();
    assert_eq!(out.iterations, 2);
    assert_eq!(out.max_factor_change, 1.0);
}

#[test]
fn test_f32_seed_keeps_precision_type() {
    let seed = NdArray::<f32>::filled(&[2, 2], 2.0).unwrap();
    let out = ArrayBalancer::new()
        .with_trace(true)
        .balance(seed, vec![vec![1.0, 3.0], vec![2.0, 2.0]])
        .unwrap();
    let array: NdArray<f32> = out.array;
    assert_relative_eq!(array.sum(), 4.0, max_relative = 1e-5);
}

#[test]
fn test_reaches_two_dimensional_fixed_point() {
    init_logger();
    let mut rng = ChaCha8Rng::seed_from_u64(1234);
    let (n, m) = (4, 5);
    let data: Vec<f64> = (0..n * m).map(|_| 0.5 + rng.random::<f64>()).collect();

    let row_targets: Vec<f64> = (0..n).map(|_| 5.0 + 10.0 * rng.random::<f64>()).collect();
    let total: f64 = row_targets.iter().sum();
    let weights: Vec<f64> = (0..m).map(|_| 1.0 + rng.random::<f64>()).collect();
    let weight_sum: f64 = weights.iter().sum();
    let col_targets: Vec<f64> = weights.iter().map(|w| total * w / weight_sum).collect();

    let array = NdArray::from_vec(&[n, m], data.clone()).unwrap();
    let nd = balance_array(
        array,
        vec![row_targets.clone(), col_targets.clone()],
        &tight(),
    )
    .unwrap();

    let matrix = ZoneMatrix::<f64>::from_flat(
        zonalfit_matrix::ZoneNumbering::sequential(n),
        zonalfit_matrix::ZoneNumbering::sequential(m),
        data,
    )
    .unwrap();
    let two_d = balance_matrix(
        matrix,
        ZoneVector::sequential(row_targets),
        ZoneVector::sequential(col_targets),
        &MatrixBalanceOptions {
            closure: ClosureCriteria::new(1000, 1e-12),
            ..Default::default()
        },
    )
    .unwrap();

    for (a, b) in nd.array.as_slice().iter().zip(two_d.matrix.as_slice()) {
        assert_relative_eq!(*a, *b, max_relative = 1e-7);
    }
}
