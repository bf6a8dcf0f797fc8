use super::{Claim, ClaimType, ElementPair, IndexWord};
use crate::eddsa::PublicKey;
use crate::hash::FieldHasher;
use crate::utils::{fp_to_big_uint, modulus};
use halo2_proofs::halo2curves::bn256::Fr as Fp;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// Authorization (`revoked == false`) or revocation (`revoked == true`) of a signing key.
///
/// Only `y` enters the index; whether `x` lies in the upper half of the field is
/// kept as a single bit, which is what a compressed point encoding retains.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyClaim {
    pub public_key: PublicKey,
    pub revoked: bool,
}

impl KeyClaim {
    pub fn authorize(public_key: PublicKey) -> Self {
        KeyClaim {
            public_key,
            revoked: false,
        }
    }

    pub fn revoke(public_key: PublicKey) -> Self {
        KeyClaim {
            public_key,
            revoked: true,
        }
    }

    pub fn index_word(&self) -> IndexWord {
        IndexWord::new(
            ClaimType::Key,
            self.revoked as u32,
            BigUint::from(sign_bit(&self.public_key.x()) as u8),
        )
    }

    pub fn build<H: FieldHasher>(&self, hasher: &H) -> Claim {
        // a one-bit top word always packs
        let i2 = self
            .index_word()
            .pack()
            .unwrap_or_else(|_| unreachable!("key claim index word always fits"));

        Claim::new(
            hasher,
            ClaimType::Key,
            ElementPair::new(self.public_key.y(), i2),
            ElementPair::new(Fp::zero(), Fp::zero()),
        )
    }
}

/// `true` when `x > q / 2`.
pub fn sign_bit(x: &Fp) -> bool {
    fp_to_big_uint(x) > (modulus() >> 1)
}

pub fn build_key_claim<H: FieldHasher>(hasher: &H, public_key: &PublicKey, revoked: bool) -> Claim {
    KeyClaim {
        public_key: *public_key,
        revoked,
    }
    .build(hasher)
}
