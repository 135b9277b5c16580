use approx::assert_relative_eq;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use zonalfit_matrix::{Axis, MatrixError, ZoneMatrix, ZoneNumbering};

fn random_matrix(rng: &mut ChaCha8Rng, rows: &ZoneNumbering, cols: &ZoneNumbering) -> ZoneMatrix<f64> {
    let data = (0..rows.len() * cols.len())
        .map(|_| rng.random::<f64>() * 100.0)
        .collect();
    ZoneMatrix::from_flat(rows.clone(), cols.clone(), data).unwrap()
}

#[test]
fn test_sparse_numbering_round_trip() {
    let zones = ZoneNumbering::new(vec![1, 2, 5, 7]).unwrap();
    let mut m: ZoneMatrix = ZoneMatrix::zeros(zones.clone(), zones.clone());

    for (i, &r) in zones.externals().iter().enumerate() {
        for (j, &c) in zones.externals().iter().enumerate() {
            m.set(r, c, (10 * i + j) as f32).unwrap();
        }
    }
    for (i, &r) in zones.externals().iter().enumerate() {
        for (j, &c) in zones.externals().iter().enumerate() {
            assert_eq!(m.get(r, c).unwrap(), (10 * i + j) as f32);
            assert_eq!(m[[i, j]], (10 * i + j) as f32);
        }
    }

    assert_eq!(m.row(5).unwrap(), vec![20.0, 21.0, 22.0, 23.0]);
    assert_eq!(m.column(7).unwrap(), vec![3.0, 13.0, 23.0, 33.0]);
}

#[test]
fn test_unmapped_lookup_is_invalid_index() {
    let zones = ZoneNumbering::new(vec![1, 2, 5, 7]).unwrap();
    let m: ZoneMatrix = ZoneMatrix::zeros(zones.clone(), zones);

    assert_eq!(
        m.get(3, 1),
        Err(MatrixError::InvalidIndex {
            axis: Axis::Row,
            external: 3
        })
    );
    assert_eq!(
        m.get(1, 8),
        Err(MatrixError::InvalidIndex {
            axis: Axis::Column,
            external: 8
        })
    );
    assert!(m.get(0, 1).is_err());
    assert!(m.row_sum(4).is_err());
}

#[test]
fn test_add_then_subtract_restores() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let rows = ZoneNumbering::new(vec![3, 9, 14, 20, 21]).unwrap();
    let cols = ZoneNumbering::new(vec![1, 4, 6]).unwrap();
    let a = random_matrix(&mut rng, &rows, &cols);
    let b = random_matrix(&mut rng, &rows, &cols);

    let back = a.add(&b).unwrap().subtract(&b).unwrap();
    for (x, y) in back.as_slice().iter().zip(a.as_slice()) {
        assert_relative_eq!(*x, *y, epsilon = 1e-10);
    }
    assert_eq!(back.row_numbering(), a.row_numbering());
}

#[test]
fn test_dimension_mismatch() {
    let a = ZoneMatrix::<f32>::sequential(2, 3);
    let b = ZoneMatrix::<f32>::sequential(2, 2);
    let c = ZoneMatrix::<f32>::sequential(3, 3);
    assert!(matches!(a.add(&b), Err(MatrixError::InvalidDimensions { .. })));
    assert!(matches!(a.subtract(&c), Err(MatrixError::InvalidDimensions { .. })));
}

#[test]
fn test_transpose_identities() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let rows = ZoneNumbering::new(vec![2, 4, 8]).unwrap();
    let cols = ZoneNumbering::new(vec![10, 11, 12, 13]).unwrap();
    let a = random_matrix(&mut rng, &rows, &cols);

    let t = a.transpose();
    assert_eq!(t.row_numbering(), &cols);
    assert_eq!(t.column_numbering(), &rows);
    assert_eq!(t.get(12, 4).unwrap(), a.get(4, 12).unwrap());

    let tt = t.transpose();
    assert_relative_eq!(tt.sum(), a.sum(), epsilon = 1e-9);
    assert_eq!(tt, a);

    let sq = ZoneMatrix::<f32>::sequential(3, 3);
    assert!(sq.transpose().is_square_numbering());
}

#[test]
fn test_sub_matrix_ignores_input_order() {
    let zones = ZoneNumbering::new(vec![1, 2, 5, 7]).unwrap();
    let mut m: ZoneMatrix<f64> = ZoneMatrix::zeros(zones.clone(), zones);
    m.set(7, 2, 4.0).unwrap();
    m.set(2, 7, 9.0).unwrap();

    let sub = m.sub_matrix_square(&[7, 2]).unwrap();
    assert_eq!(sub.row_numbering().externals(), &[2, 7]);
    assert_eq!(sub.get(7, 2).unwrap(), 4.0);
    assert_eq!(sub.get(2, 7).unwrap(), 9.0);
    assert!(sub.is_square_numbering());

    assert!(m.sub_matrix(&[1, 3], &[1]).is_err());
}

#[test]
fn test_f32_totals_accumulate_in_f64() {
    let n = 1000;
    let mut m = ZoneMatrix::<f32>::sequential(1, n);
    m.fill(0.1);
    let total = m.row_totals_f64()[0];
    assert_relative_eq!(total, 100.0, epsilon = 1e-4);
}
