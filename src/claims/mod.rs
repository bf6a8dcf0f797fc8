//! Claim codec: typed claim records and their deterministic `(hi, hv)` encoding.
//!
//! A claim is two pairs of field elements. The index pair hashes to `hi`, the
//! tree key; the value pair hashes to `hv`, the tree value. Two claims that
//! only differ in value share a key and are therefore mutually exclusive in a
//! tree, while claims of different type or owner never collide.
mod index;
mod key;
mod tests;
mod user_root;

pub use index::{IndexWord, SUB_WORD_OFFSET, TOP_WORD_BITS, TOP_WORD_OFFSET};
pub use key::{build_key_claim, sign_bit, KeyClaim};
pub use user_root::{build_user_root_claim, UserRootClaim};

use crate::hash::FieldHasher;
use crate::utils::serde_fp;
use halo2_proofs::halo2curves::bn256::Fr as Fp;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u64)]
pub enum ClaimType {
    /// Authorization or revocation of a signing key, stored in a user tree.
    Key = 1,
    /// Versioned pointer to a user tree root, stored in the relay tree.
    UserRoot = 2,
}

impl ClaimType {
    pub fn tag(&self) -> u64 {
        *self as u64
    }

    pub fn from_tag(tag: u64) -> Option<Self> {
        match tag {
            1 => Some(ClaimType::Key),
            2 => Some(ClaimType::UserRoot),
            _ => None,
        }
    }
}

/// Two field elements that are only ever consumed together, through their hash.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementPair {
    #[serde(with = "serde_fp")]
    first: Fp,
    #[serde(with = "serde_fp")]
    second: Fp,
}

impl ElementPair {
    pub fn new(first: Fp, second: Fp) -> Self {
        ElementPair { first, second }
    }

    pub fn first(&self) -> Fp {
        self.first
    }

    pub fn second(&self) -> Fp {
        self.second
    }

    pub fn hash<H: FieldHasher>(&self, hasher: &H) -> Fp {
        hasher.hash2(self.first, self.second)
    }
}

/// An encoded claim. `hi` and `hv` are derived from the pairs when the claim is
/// built and cannot be set independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Claim {
    claim_type: ClaimType,
    index: ElementPair,
    value: ElementPair,
    hi: Fp,
    hv: Fp,
}

impl Claim {
    pub(crate) fn new<H: FieldHasher>(
        hasher: &H,
        claim_type: ClaimType,
        index: ElementPair,
        value: ElementPair,
    ) -> Self {
        Claim {
            claim_type,
            index,
            value,
            hi: index.hash(hasher),
            hv: value.hash(hasher),
        }
    }

    pub fn claim_type(&self) -> ClaimType {
        self.claim_type
    }

    pub fn index(&self) -> &ElementPair {
        &self.index
    }

    pub fn value(&self) -> &ElementPair {
        &self.value
    }

    /// Tree key.
    pub fn hi(&self) -> Fp {
        self.hi
    }

    /// Tree value.
    pub fn hv(&self) -> Fp {
        self.hv
    }

    /// Decodes the second index element back into its sub-fields.
    pub fn index_word(&self) -> Result<IndexWord, crate::error::MalformedInput> {
        IndexWord::unpack(self.index.second())
    }
}
