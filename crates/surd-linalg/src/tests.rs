//! Integration tests for surd-linalg.

#[cfg(test)]
mod integration_tests {
    use proptest::prelude::*;
    use surd_rings::{ExactRing, RationalNumber};

    use crate::matrix::{Line, Matrix};
    use crate::parallel::ParallelConfig;
    use crate::vector::Vector;

    fn m(rows: &[&[i64]]) -> Matrix {
        Matrix::from_operands(rows.iter().map(|r| r.iter().copied())).unwrap()
    }

    fn int(n: i64) -> RationalNumber {
        RationalNumber::from_i64(n).unwrap()
    }

    #[test]
    fn test_known_determinants() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        assert_eq!(Matrix::identity(3).unwrap().det().unwrap(), int(1));
        assert_eq!(
            m(&[&[-2, 2, -3], &[-1, 1, 3], &[2, 0, -1]]).det().unwrap(),
            int(18)
        );
        assert_eq!(
            m(&[&[1, 2, 4], &[-1, 3, 0], &[4, 1, 0]]).det().unwrap(),
            int(-52)
        );
    }

    #[test]
    fn test_expansion_along_any_line() {
        let a = m(&[
            &[3, -1, 0, 2],
            &[1, 4, -2, 0],
            &[0, 5, 1, -3],
            &[2, 0, 6, 1],
        ]);
        let det = a.det().unwrap();
        for k in 0..4 {
            assert_eq!(a.det_along(Line::Row(k)).unwrap(), det, "row {k}");
            assert_eq!(a.det_along(Line::Column(k)).unwrap(), det, "column {k}");
        }
        assert_eq!(a.det_parallel(&ParallelConfig { parallel_threshold: 2 }).unwrap(), det);
    }

    #[test]
    fn test_rref_solves_consistent_system() {
        let a = m(&[&[2, 1, -1], &[-3, -1, 2], &[-2, 1, 2]]);
        let b = Vector::from_operands([8_i64, -11, -3]).unwrap();

        let rhs = Matrix::from_rows(b.iter().map(|x| Vector::new(vec![x.clone()])).collect())
            .unwrap();
        let reduced = a.augment(&rhs).unwrap().rref().unwrap();
        assert_eq!(reduced.pivot_columns, vec![0, 1, 2]);
        for (row, &col) in reduced.pivot_columns.iter().enumerate() {
            assert!(reduced.matrix[(row, col)].is_one());
        }

        let x = a.solve(&b).unwrap().unwrap();
        assert_eq!(x, Vector::from_operands([2_i64, 3, -1]).unwrap());
        assert_eq!(a.mul_vector(&x).unwrap(), b);
    }

    #[test]
    fn test_fractional_solution_is_exact() {
        let a = m(&[&[3, 2], &[1, 4]]);
        let b = Vector::from_operands([1_i64, 1]).unwrap();
        let x = a.solve(&b).unwrap().unwrap();
        let fifth = RationalNumber::new(1, 5).unwrap();
        assert_eq!(x, Vector::new(vec![fifth.clone(), fifth]));
        assert_eq!(a.mul_vector(&x).unwrap(), b);
    }

    #[test]
    fn test_underdetermined_system() {
        // x + y + z = 6, y - z = 1: z is free and set to 0.
        let a = m(&[&[1, 1, 1], &[0, 1, -1]]);
        let b = Vector::from_operands([6_i64, 1]).unwrap();
        let x = a.solve(&b).unwrap().unwrap();
        assert_eq!(x, Vector::from_operands([5_i64, 1, 0]).unwrap());
        assert_eq!(a.rank().unwrap(), 2);
    }

    #[test]
    fn test_cross_product_is_orthogonal() {
        let a = Vector::from_operands([2_i64, -3, 5]).unwrap();
        let b = Vector::from_operands([-1_i64, 4, 7]).unwrap();
        let c = a.cross(&b).unwrap();
        assert!(c.dot_sum(&a).unwrap().is_zero());
        assert!(c.dot_sum(&b).unwrap().is_zero());
    }

    fn small_matrix(n: usize) -> impl Strategy<Value = Matrix> {
        proptest::collection::vec(proptest::collection::vec(-6i64..6i64, n), n)
            .prop_map(|rows| Matrix::from_operands(rows).unwrap())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn det_of_transpose(a in small_matrix(3)) {
            prop_assert_eq!(a.transpose().det().unwrap(), a.det().unwrap());
        }

        #[test]
        fn det_is_multiplicative(a in small_matrix(3), b in small_matrix(3)) {
            let product = a.mul_matrix(&b).unwrap().det().unwrap();
            let expected = a.det().unwrap().checked_mul(&b.det().unwrap()).unwrap();
            prop_assert_eq!(product, expected);
        }

        #[test]
        fn rank_matches_det(a in small_matrix(3)) {
            let full = a.rank().unwrap() == 3;
            prop_assert_eq!(full, !a.det().unwrap().is_zero());
        }

        #[test]
        fn inverse_round_trip(a in small_matrix(3)) {
            prop_assume!(!a.det().unwrap().is_zero());
            let inv = a.inverse().unwrap();
            prop_assert_eq!(a.mul_matrix(&inv).unwrap(), Matrix::identity(3).unwrap());
        }
    }
}
