//! Property-based tests for integers and factorization.

#[cfg(test)]
mod tests {
    use num_traits::Zero;
    use proptest::prelude::*;

    use crate::{factorize, factorize_u64, Integer, PrimeFactorizer, PrimeMultiset};

    // Strategy for generating small integers
    fn small_int() -> impl Strategy<Value = i64> {
        -1000i64..1000i64
    }

    // Strategy for generating non-zero integers
    fn non_zero_int() -> impl Strategy<Value = i64> {
        prop_oneof![(-1000i64..=-1i64), (1i64..=1000i64)]
    }

    proptest! {
        #[test]
        fn integer_add_commutative(a in small_int(), b in small_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            prop_assert_eq!(&a + &b, &b + &a);
        }

        #[test]
        fn integer_distributive(a in small_int(), b in small_int(), c in small_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            let c = Integer::new(c);
            prop_assert_eq!(&a * &(&b + &c), &(&a * &b) + &(&a * &c));
        }

        #[test]
        fn gcd_divides_both(a in non_zero_int(), b in non_zero_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            let g = a.gcd(&b);
            prop_assert!((&a % &g).is_zero());
            prop_assert!((&b % &g).is_zero());
        }

        // Factorization

        #[test]
        fn factorization_multiplies_back(n in 1u64..5_000_000u64) {
            let factors = factorize_u64(n).unwrap();
            prop_assert_eq!(factors.product().to_u64(), Some(n));
        }

        #[test]
        fn factors_are_prime(n in 2u64..200_000u64) {
            let f = PrimeFactorizer::global();
            for p in factorize_u64(n).unwrap().primes() {
                prop_assert!(f.is_prime(p).unwrap());
            }
        }

        #[test]
        fn factorization_of_product_is_union(a in 1u64..100_000u64, b in 1u64..100_000u64) {
            let fa = factorize_u64(a).unwrap();
            let fb = factorize_u64(b).unwrap();
            let fab = factorize(&(Integer::from(a) * Integer::from(b))).unwrap();
            prop_assert_eq!(fab, fa.union(&fb));
        }

        #[test]
        fn difference_then_union_restores(a in 1u64..10_000u64, b in 1u64..10_000u64) {
            let fa = factorize_u64(a).unwrap();
            let fb = factorize_u64(b).unwrap();
            let shared = fa.difference(&fa.difference(&fb));
            let rebuilt: PrimeMultiset = fa.difference(&fb).union(&shared);
            prop_assert_eq!(rebuilt, fa);
        }
    }
}
