//! Baby Jubjub points as pairs of BN254 scalar field elements.
//!
//! The curve's base field is the halo2 `Fr`, so coordinates are stored as `Fp`
//! and cross over to `ark_babyjubjub::Fq` through their canonical little-endian
//! bytes whenever curve arithmetic is needed.
use crate::utils::big_uint_to_fp_reduced;
use ark_babyjubjub::{EdwardsAffine, Fq, Fr as Scalar};
use ark_ec::AffineRepr;
use ark_ff::{BigInteger, PrimeField as ArkPrimeField};
use halo2_proofs::halo2curves::bn256::Fr as Fp;
use halo2_proofs::halo2curves::group::ff::PrimeField;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Order of the prime subgroup generated by [`Point::base8`].
pub fn subgroup_order() -> &'static BigUint {
    static ORDER: OnceLock<BigUint> = OnceLock::new();
    ORDER.get_or_init(|| BigUint::from_bytes_le(&Scalar::MODULUS.to_bytes_le()))
}

pub(crate) fn fq_from_fp(fp: &Fp) -> Fq {
    Fq::from_le_bytes_mod_order(fp.to_repr().as_ref())
}

/// Any arkworks field element whose modulus does not exceed `q`.
pub(crate) fn fp_from_ark<F: ArkPrimeField>(value: &F) -> Fp {
    big_uint_to_fp_reduced(&BigUint::from_bytes_le(&value.into_bigint().to_bytes_le()))
}

/// An affine point in twisted Edwards coordinates. Not necessarily on the curve:
/// points arriving from outside are checked with [`Point::is_on_curve`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    #[serde(with = "crate::utils::serde_fp")]
    pub x: Fp,
    #[serde(with = "crate::utils::serde_fp")]
    pub y: Fp,
}

impl Point {
    pub fn new(x: Fp, y: Fp) -> Self {
        Point { x, y }
    }

    /// The neutral element `(0, 1)`.
    pub fn identity() -> Self {
        Point::from_affine(&EdwardsAffine::zero())
    }

    /// Generator of the prime-order subgroup (eight times the curve generator).
    pub fn base8() -> Self {
        Point::from_affine(&EdwardsAffine::generator())
    }

    pub fn is_on_curve(&self) -> bool {
        self.to_affine().is_on_curve()
    }

    pub(crate) fn to_affine(&self) -> EdwardsAffine {
        EdwardsAffine::new_unchecked(fq_from_fp(&self.x), fq_from_fp(&self.y))
    }

    pub(crate) fn from_affine(point: &EdwardsAffine) -> Self {
        Point {
            x: fp_from_ark(&point.x),
            y: fp_from_ark(&point.y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ec::CurveGroup;
    use ark_ff::Zero;

    const BASE8_X: &str =
        "5299619240641551281634865583518297030282874472190772894086521144482721001553";
    const BASE8_Y: &str =
        "16950150798460657717958625567821834550301663161624707787222815936182638968203";

    #[test]
    fn test_base8_coordinates() {
        let base8 = Point::base8();
        assert_eq!(base8.x, Fp::from_str_vartime(BASE8_X).unwrap());
        assert_eq!(base8.y, Fp::from_str_vartime(BASE8_Y).unwrap());
        assert!(base8.is_on_curve());
        assert!(Point::identity().is_on_curve());
        assert_eq!(Point::identity(), Point::new(Fp::zero(), Fp::one()));
    }

    #[test]
    fn test_base8_has_prime_order() {
        let base8 = Point::base8().to_affine();
        assert!(base8.is_in_correct_subgroup_assuming_on_curve());
        assert!(base8.mul_bigint(subgroup_order().to_u64_digits()).is_zero());
        assert!(!base8
            .mul_bigint((subgroup_order() - 1u32).to_u64_digits())
            .is_zero());
    }

    #[test]
    fn test_coordinates_survive_conversion() {
        let point = (Point::base8().to_affine() * Scalar::from(12345u64)).into_affine();
        let converted = Point::from_affine(&point);
        assert!(converted.is_on_curve());
        assert_eq!(converted.to_affine(), point);

        assert_eq!(fp_from_ark(&fq_from_fp(&-Fp::one())), -Fp::one());
        assert!(!Point::new(Fp::one(), Fp::one()).is_on_curve());
    }
}
