use rand::{rngs::StdRng, Rng, SeedableRng};
use slab_matrix::{
    Matrix, MatrixError, PackedDescriptor, PackedMatrix, SymmetricMatrix, Triangle,
};

#[test]
fn test_packed_size_invariant() {
    for n in 0..20 {
        let full = n * (n + 1) / 2;
        assert_eq!(PackedDescriptor::new(n, Triangle::Upper).size(), full);
        assert_eq!(PackedDescriptor::new(n, Triangle::Lower).size(), full);
        assert_eq!(PackedDescriptor::new(n, Triangle::UnitUpper).size(), full - n);
        assert_eq!(PackedDescriptor::new(n, Triangle::UnitLower).size(), full - n);
    }
}

#[test]
fn test_symmetric_write_read_mirror() {
    let mut rng = StdRng::seed_from_u64(23);
    for tri in [Triangle::Upper, Triangle::Lower] {
        let n = 6;
        let mut s = SymmetricMatrix::<f64>::new(n, tri).unwrap();
        for _ in 0..200 {
            let i = rng.gen_range(0..n);
            let j = rng.gen_range(0..n);
            let x: f64 = rng.gen();
            s[[i, j]] = x;
            assert_eq!(s[[j, i]], x);
        }
        let d = s.to_dense();
        assert_eq!(d, d.t());
    }
}

#[test]
fn test_unit_upper_dense_view() {
    let p = PackedMatrix::from_vec(3, Triangle::UnitUpper, vec![2, 3, 4]).unwrap();
    assert_eq!(
        p.to_dense(),
        Matrix::from([[1, 2, 3], [0, 1, 4], [0, 0, 1]])
    );
}

#[test]
fn test_dense_pack_roundtrip() {
    let a = Matrix::from_fn([5, 5], |[i, j]| if j <= i { (i * 5 + j) as i32 } else { 0 });
    let p = PackedMatrix::from_dense(&a, Triangle::Lower).unwrap();
    assert_eq!(p.size(), 15);
    assert_eq!(p.to_dense(), a);
}

#[test]
fn test_packed_from_wrong_length() {
    let r = PackedMatrix::from_vec(4, Triangle::Lower, vec![0.0; 9]);
    assert!(matches!(
        r,
        Err(MatrixError::PackedSizeMismatch {
            expected: 10,
            found: 9
        })
    ));
}
