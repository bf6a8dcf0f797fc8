use super::{Claim, ClaimType, ElementPair, IndexWord};
use crate::error::MalformedInput;
use crate::hash::FieldHasher;
use crate::utils::{fp_to_big_uint, serde_fp};
use halo2_proofs::halo2curves::bn256::Fr as Fp;
use serde::{Deserialize, Serialize};

/// Pointer from the relay tree to the root of one identity's user tree.
///
/// Each `(identity_id, era, version)` gets its own key in the relay tree, so
/// publishing a new version never overwrites an older pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRootClaim {
    #[serde(with = "serde_fp")]
    pub identity_id: Fp,
    #[serde(with = "serde_fp")]
    pub era: Fp,
    pub version: u32,
    #[serde(with = "serde_fp")]
    pub root: Fp,
}

impl UserRootClaim {
    pub fn new(identity_id: Fp, era: Fp, version: u32, root: Fp) -> Self {
        UserRootClaim {
            identity_id,
            era,
            version,
            root,
        }
    }

    pub fn index_word(&self) -> IndexWord {
        IndexWord::new(ClaimType::UserRoot, self.version, fp_to_big_uint(&self.era))
    }

    /// Fails only when `era` does not fit the top word of the index.
    pub fn build<H: FieldHasher>(&self, hasher: &H) -> Result<Claim, MalformedInput> {
        let i2 = self.index_word().pack()?;

        Ok(Claim::new(
            hasher,
            ClaimType::UserRoot,
            ElementPair::new(self.identity_id, i2),
            ElementPair::new(Fp::zero(), self.root),
        ))
    }
}

pub fn build_user_root_claim<H: FieldHasher>(
    hasher: &H,
    identity_id: Fp,
    era: Fp,
    version: u32,
    root: Fp,
) -> Result<Claim, MalformedInput> {
    UserRootClaim::new(identity_id, era, version, root).build(hasher)
}
