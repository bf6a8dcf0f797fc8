//! EdDSA over Baby Jubjub with the nonce challenge compressed by the protocol hash.
//!
//! Curve arithmetic is `ark-babyjubjub`; scalars modulo the subgroup order are
//! its `Fr`.
mod babyjubjub;
mod tests;

pub use babyjubjub::{subgroup_order, Point};

use crate::hash::FieldHasher;
use crate::utils::fp_to_big_uint;
use ark_babyjubjub::Fr as Scalar;
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::PrimeField as _;
use babyjubjub::fp_from_ark;
use halo2_proofs::halo2curves::{bn256::Fr as Fp, group::ff::PrimeField};
use num_bigint::BigUint;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};

/// 32 bytes of secret seed. The signing scalar and nonce prefix are derived from it.
///
/// Both derivations use SHA-512, so a seed does not map to the same key pair as
/// in circomlib's `prv2pub`/`signMiMC` (which use Blake-512). Keys and
/// signatures do not interoperate with circomlib.
#[derive(Clone)]
pub struct PrivateKey([u8; 32]);

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PrivateKey(..)")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey(pub Point);

impl PublicKey {
    pub fn x(&self) -> Fp {
        self.0.x
    }

    pub fn y(&self) -> Fp {
        self.0.y
    }
}

/// `(S, R8)`; every component is a field element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    #[serde(with = "crate::utils::serde_fp")]
    pub s: Fp,
    pub r8: Point,
}

impl PrivateKey {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        PrivateKey(bytes)
    }

    pub fn random<R: RngCore>(rng: &mut R) -> Self {
        let mut bytes = [0u8; 32];
        rng.fill_bytes(&mut bytes);
        PrivateKey(bytes)
    }

    fn expand(&self) -> [u8; 64] {
        let mut expanded = [0u8; 64];
        expanded.copy_from_slice(&Sha512::digest(self.0));
        expanded
    }

    /// The pruned secret scalar: low three bits cleared, bit 255 cleared, bit 254 set.
    fn scalar(&self) -> BigUint {
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&self.expand()[..32]);
        bytes[0] &= 0xf8;
        bytes[31] &= 0x7f;
        bytes[31] |= 0x40;
        BigUint::from_bytes_le(&bytes)
    }

    pub fn public(&self) -> PublicKey {
        let scalar = Scalar::from_le_bytes_mod_order(&(self.scalar() >> 3).to_bytes_le());
        PublicKey(Point::from_affine(
            &(Point::base8().to_affine() * scalar).into_affine(),
        ))
    }

    /// Signs a single field element.
    pub fn sign<H: FieldHasher>(&self, hasher: &H, message: Fp) -> Signature {
        let expanded = self.expand();
        let public = self.public();

        let mut nonce_hasher = Sha512::new();
        nonce_hasher.update(&expanded[32..]);
        nonce_hasher.update(message.to_repr().as_ref());
        let r = Scalar::from_le_bytes_mod_order(&nonce_hasher.finalize());

        let r8 = Point::from_affine(&(Point::base8().to_affine() * r).into_affine());
        let hm = challenge(hasher, &r8, &public, message);

        let s = r
            + Scalar::from_le_bytes_mod_order(hm.to_repr().as_ref())
                * Scalar::from_le_bytes_mod_order(&self.scalar().to_bytes_le());

        Signature {
            s: fp_from_ark(&s),
            r8,
        }
    }
}

fn challenge<H: FieldHasher>(hasher: &H, r8: &Point, public: &PublicKey, message: Fp) -> Fp {
    hasher.multi_hash(&[r8.x, r8.y, public.x(), public.y(), message])
}

/// Checks `Base8 * S == R8 + A * (8 * hm)`. Points off the curve and
/// out-of-range `S` never verify.
pub fn verify<H: FieldHasher>(
    hasher: &H,
    public: &PublicKey,
    message: Fp,
    signature: &Signature,
) -> bool {
    if !public.0.is_on_curve() || !signature.r8.is_on_curve() {
        return false;
    }

    let s = fp_to_big_uint(&signature.s);
    if &s >= subgroup_order() {
        return false;
    }

    let hm = challenge(hasher, &signature.r8, public, message);

    // A is not assumed to be in the subgroup, so 8 * hm is not reduced
    let left = Point::base8().to_affine().mul_bigint(s.to_u64_digits());
    let right = public
        .0
        .to_affine()
        .mul_bigint((fp_to_big_uint(&hm) * 8u32).to_u64_digits())
        + signature.r8.to_affine();

    left == right
}
