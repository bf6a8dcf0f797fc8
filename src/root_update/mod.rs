//! Root-update transactions: one signed key mutation of a user tree together
//! with the republication of its root in the relay tree.
//!
//! An identity's signing keys live in its user tree as key claims. Each change
//! to that tree is published by inserting a new, versioned user-root claim into
//! the relay tree. A [`RootUpdateTx`] carries everything needed to check such a
//! change without access to either tree: the roots, the signature and the
//! Merkle witnesses. The [`RootUpdateBuilder`] produces it, the
//! [`RootUpdateEvaluator`] decides on it and the [`RelayRegistry`] commits it.
mod builder;
mod evaluator;
mod identity;
mod relay;

pub use builder::RootUpdateBuilder;
pub use evaluator::RootUpdateEvaluator;
pub use identity::Identity;
pub use relay::RelayRegistry;

use crate::claims::{Claim, KeyClaim, UserRootClaim};
use crate::eddsa::{PublicKey, Signature};
use crate::error::Result;
use crate::hash::FieldHasher;
use crate::sparse_merkle_tree::{
    InsertionWitness, MembershipWitness, NonMembershipWitness, SparseMerkleTree,
};
use crate::utils::serde_fp;
use halo2_proofs::halo2curves::bn256::Fr as Fp;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// The one change a transaction makes to a user tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyMutation {
    Authorize(PublicKey),
    Revoke(PublicKey),
}

impl KeyMutation {
    pub fn key_claim(&self) -> KeyClaim {
        match self {
            KeyMutation::Authorize(public_key) => KeyClaim::authorize(*public_key),
            KeyMutation::Revoke(public_key) => KeyClaim::revoke(*public_key),
        }
    }

    pub fn claim<H: FieldHasher>(&self, hasher: &H) -> Claim {
        self.key_claim().build(hasher)
    }
}

/// A complete, self-contained root-update bundle.
///
/// `old_relay_root` and `new_relay_root` are the public inputs; everything
/// else is witness data. `old_version` is `None` for the bootstrap transaction
/// that publishes the first root of an identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootUpdateTx {
    #[serde(with = "serde_fp")]
    pub old_relay_root: Fp,
    #[serde(with = "serde_fp")]
    pub new_relay_root: Fp,

    #[serde(with = "serde_fp")]
    pub identity_id: Fp,
    #[serde(with = "serde_fp")]
    pub era: Fp,
    pub old_version: Option<u32>,
    pub new_version: u32,
    #[serde(with = "serde_fp")]
    pub old_user_root: Fp,
    #[serde(with = "serde_fp")]
    pub new_user_root: Fp,

    pub mutation: KeyMutation,
    pub user_insertion: InsertionWitness,

    pub signer: PublicKey,
    pub signature: Signature,
    pub signer_inclusion: MembershipWitness,
    pub signer_exclusion: NonMembershipWitness,

    pub old_pointer_inclusion: Option<MembershipWitness>,
    pub relay_insertion: InsertionWitness,
}

impl RootUpdateTx {
    pub fn is_bootstrap(&self) -> bool {
        self.old_version.is_none()
    }

    /// The user-root claim this transaction publishes.
    pub fn new_pointer(&self) -> UserRootClaim {
        UserRootClaim::new(
            self.identity_id,
            self.era,
            self.new_version,
            self.new_user_root,
        )
    }

    /// The user-root claim this transaction supersedes, if any.
    pub fn old_pointer(&self) -> Option<UserRootClaim> {
        self.old_version.map(|version| {
            UserRootClaim::new(self.identity_id, self.era, version, self.old_user_root)
        })
    }

    /// Root of the tree that must authorize the signer. At bootstrap there is no
    /// published tree yet, so the genesis tree itself has to.
    pub fn key_set_root(&self) -> Fp {
        if self.is_bootstrap() {
            self.new_user_root
        } else {
            self.old_user_root
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let serialized_data = serde_json::to_string(self)?;
        let mut file = File::create(path)?;
        file.write_all(serialized_data.as_bytes())?;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut data = String::new();
        file.read_to_string(&mut data)?;
        Ok(serde_json::from_str(&data)?)
    }
}

/// Message an identity key signs to publish `pointer`: `H(domain_tag, hi, hv)`.
pub fn signed_message<H: FieldHasher>(hasher: &H, domain_tag: u64, pointer: &Claim) -> Fp {
    hasher.hash3(Fp::from(domain_tag), pointer.hi(), pointer.hv())
}

/// Result of a successful validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Accepted {
    pub identity_id: Fp,
    pub new_relay_root: Fp,
    pub new_version: u32,
}

/// A built transaction together with the user tree it would commit the
/// identity to. Only adopt the tree once the relay accepted the transaction.
#[derive(Clone, Debug)]
pub struct PendingUpdate<H: FieldHasher> {
    pub tx: RootUpdateTx,
    pub user_tree: SparseMerkleTree<H>,
}
