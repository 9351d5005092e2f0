//! Property-based tests for the number tower.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use surd_integers::Integer;

    use crate::{ExactField, ExactRing, RadicalTerm, RationalNumber, RealValue};

    // Strategy for generating small rationals
    fn small_rational() -> impl Strategy<Value = RationalNumber> {
        (-200i64..200i64, 1i64..200i64).prop_map(|(n, d)| RationalNumber::new(n, d).unwrap())
    }

    fn nonzero_rational() -> impl Strategy<Value = RationalNumber> {
        small_rational().prop_filter("rational must be non-zero", |r| !r.is_zero())
    }

    // Strategy for generating radicals over small primes
    fn small_radical() -> impl Strategy<Value = RadicalTerm> {
        (
            small_rational(),
            prop::sample::select(vec![2u64, 3, 5, 7]),
            1i64..6i64,
            2i64..6i64,
        )
            .prop_map(|(c, p, n, d)| {
                let root = RadicalTerm::radical(p, &RationalNumber::new(n, d).unwrap()).unwrap();
                RadicalTerm::from_rational(c).checked_mul(&root).unwrap()
            })
    }

    fn small_real() -> impl Strategy<Value = RealValue> {
        proptest::collection::vec(small_radical(), 0..4).prop_map(|t| RealValue::new(t).unwrap())
    }

    proptest! {
        // Rational field axioms

        #[test]
        fn rational_add_commutative(a in small_rational(), b in small_rational()) {
            prop_assert_eq!(a.checked_add(&b).unwrap(), b.checked_add(&a).unwrap());
        }

        #[test]
        fn rational_add_associative(a in small_rational(), b in small_rational(), c in small_rational()) {
            let left = a.checked_add(&b).unwrap().checked_add(&c).unwrap();
            let right = a.checked_add(&b.checked_add(&c).unwrap()).unwrap();
            prop_assert_eq!(left, right);
        }

        #[test]
        fn rational_mul_commutative(a in small_rational(), b in small_rational()) {
            prop_assert_eq!(a.checked_mul(&b).unwrap(), b.checked_mul(&a).unwrap());
        }

        #[test]
        fn rational_mul_associative(a in small_rational(), b in small_rational(), c in small_rational()) {
            let left = a.checked_mul(&b).unwrap().checked_mul(&c).unwrap();
            let right = a.checked_mul(&b.checked_mul(&c).unwrap()).unwrap();
            prop_assert_eq!(left, right);
        }

        #[test]
        fn rational_distributive(a in small_rational(), b in small_rational(), c in small_rational()) {
            let left = a.checked_mul(&b.checked_add(&c).unwrap()).unwrap();
            let right = a.checked_mul(&b).unwrap().checked_add(&a.checked_mul(&c).unwrap()).unwrap();
            prop_assert_eq!(left, right);
        }

        #[test]
        fn rational_recip_inverse(a in nonzero_rational()) {
            prop_assert!(a.checked_mul(&a.recip().unwrap()).unwrap().is_one());
        }

        #[test]
        fn rational_reduced_by_gcd(n in -1000i64..1000i64, d in 1i64..1000i64) {
            let r = RationalNumber::new(n, d).unwrap();
            let (ni, di) = (Integer::new(n), Integer::new(d));
            let g = ni.gcd(&di);
            let reduced = RationalNumber::from_integers(&(&ni / &g), &(&di / &g)).unwrap();
            prop_assert_eq!(r.numer_prod(), (&ni / &g).abs());
            prop_assert_eq!(r, reduced);
        }

        #[test]
        fn rational_simplify_idempotent(a in small_rational()) {
            let mut again = a.clone();
            again.simplify();
            prop_assert_eq!(again, a);
        }

        #[test]
        fn rational_repr_round_trip(a in small_rational()) {
            prop_assert_eq!(a.repr().parse::<RationalNumber>().unwrap(), a);
        }

        #[test]
        fn rational_order_matches_float(a in small_rational(), b in small_rational()) {
            prop_assert_eq!(a < b, a.to_f64() < b.to_f64());
        }

        // Radicals

        #[test]
        fn radical_simplify_idempotent(t in small_radical()) {
            let mut again = t.clone();
            again.simplify().unwrap();
            prop_assert_eq!(again, t);
        }

        #[test]
        fn radical_exponents_in_unit_interval(t in small_radical()) {
            for e in t.degrees().values() {
                prop_assert!(!e.is_negative());
                prop_assert!(e.floor().unwrap() == Integer::new(0));
            }
        }

        #[test]
        fn radical_repr_round_trip(t in small_radical()) {
            prop_assert_eq!(t.repr().parse::<RadicalTerm>().unwrap(), t);
        }

        #[test]
        fn radical_mul_matches_float(a in small_radical(), b in small_radical()) {
            let exact = a.checked_mul(&b).unwrap().to_f64();
            let approx = a.to_f64() * b.to_f64();
            prop_assert!((exact - approx).abs() <= 1e-9 * approx.abs().max(1.0));
        }

        // Reals

        #[test]
        fn real_add_commutative(a in small_real(), b in small_real()) {
            prop_assert_eq!(a.checked_add(&b).unwrap(), b.checked_add(&a).unwrap());
        }

        #[test]
        fn real_mul_commutative(a in small_real(), b in small_real()) {
            prop_assert_eq!(a.checked_mul(&b).unwrap(), b.checked_mul(&a).unwrap());
        }

        #[test]
        fn real_terms_unlike(a in small_real(), b in small_real()) {
            let sum = a.checked_add(&b).unwrap();
            let terms = sum.terms();
            for (i, x) in terms.iter().enumerate() {
                prop_assert!(!x.is_zero());
                for y in &terms[i + 1..] {
                    prop_assert!(!x.cmp_degree(y));
                }
            }
        }

        #[test]
        fn real_sub_self_is_zero(a in small_real()) {
            prop_assert!(a.checked_sub(&a).unwrap().is_zero());
        }

        #[test]
        fn real_repr_round_trip(a in small_real()) {
            prop_assert_eq!(a.repr().parse::<RealValue>().unwrap(), a);
        }
    }

    #[test]
    fn decimal_matches_fraction() {
        assert_eq!(
            RationalNumber::from_f64(0.125).unwrap(),
            RationalNumber::new(1, 8).unwrap()
        );
    }
}
