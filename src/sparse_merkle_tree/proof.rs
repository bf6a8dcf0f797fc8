use super::node::{leaf_hash, middle_hash};
use super::smt::{FindResult, InsertResult, KEY_BITS};
use crate::error::MalformedInput;
use crate::hash::FieldHasher;
use crate::utils::{fp_bit, serde_fp};
use halo2_proofs::halo2curves::bn256::Fr as Fp;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Proves that `key -> value` is a leaf under a root.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipWitness {
    #[serde(with = "serde_fp::vec")]
    pub siblings: Vec<Fp>,
}

/// Proves that a key is absent. The path of the key ends either on an empty
/// slot (`is_old0`) or on a leaf holding a different key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonMembershipWitness {
    #[serde(with = "serde_fp::vec")]
    pub siblings: Vec<Fp>,
    pub is_old0: bool,
    #[serde(with = "serde_fp")]
    pub old_key: Fp,
    #[serde(with = "serde_fp")]
    pub old_value: Fp,
}

/// Proves that a new root is an old root with exactly one leaf added.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertionWitness {
    #[serde(with = "serde_fp::vec")]
    pub siblings: Vec<Fp>,
    pub is_old0: bool,
    #[serde(with = "serde_fp")]
    pub old_key: Fp,
    #[serde(with = "serde_fp")]
    pub old_value: Fp,
}

/// Pads a sibling list with zeros up to `depth`.
pub fn pad_siblings(siblings: &[Fp], depth: usize) -> Result<Vec<Fp>, MalformedInput> {
    if siblings.len() > depth {
        return Err(MalformedInput::ProofTooDeep {
            depth,
            needed: siblings.len(),
        });
    }

    Ok(siblings
        .iter()
        .copied()
        .pad_using(depth, |_| Fp::zero())
        .collect())
}

impl FindResult {
    pub fn membership_witness(&self, depth: usize) -> Result<MembershipWitness, MalformedInput> {
        Ok(MembershipWitness {
            siblings: pad_siblings(&self.siblings, depth)?,
        })
    }

    /// For a key that is present the witness carries the found leaf itself,
    /// which no verifier accepts.
    pub fn non_membership_witness(
        &self,
        depth: usize,
    ) -> Result<NonMembershipWitness, MalformedInput> {
        let (old_key, old_value) = match (self.found, self.is_old0) {
            (true, _) => (self.key, self.found_value),
            (false, true) => (Fp::zero(), Fp::zero()),
            (false, false) => (self.not_found_key, self.not_found_value),
        };

        Ok(NonMembershipWitness {
            siblings: pad_siblings(&self.siblings, depth)?,
            is_old0: !self.found && self.is_old0,
            old_key,
            old_value,
        })
    }
}

impl InsertResult {
    /// Also fails when the old and new leaf only diverge at or below `depth`.
    pub fn witness(&self, depth: usize) -> Result<InsertionWitness, MalformedInput> {
        let siblings = pad_siblings(&self.siblings, depth)?;

        if !self.is_old0 {
            let split = divergence(&self.key, &self.old_key, self.siblings.len(), KEY_BITS);
            if !matches!(split, Some(split) if split < depth) {
                return Err(MalformedInput::ProofTooDeep {
                    depth,
                    needed: split.map_or(KEY_BITS, |split| split + 1),
                });
            }
        }

        Ok(InsertionWitness {
            siblings,
            is_old0: self.is_old0,
            old_key: self.old_key,
            old_value: self.old_value,
        })
    }
}

/// Level the path ends at: just past the last non-zero sibling.
fn leaf_level(siblings: &[Fp]) -> usize {
    siblings
        .iter()
        .rposition(|sibling| *sibling != Fp::zero())
        .map_or(0, |position| position + 1)
}

/// First level in `from..to` where the two keys take different branches.
fn divergence(a: &Fp, b: &Fp, from: usize, to: usize) -> Option<usize> {
    (from..to.min(KEY_BITS)).find(|&level| fp_bit(a, level) != fp_bit(b, level))
}

/// Hashes a node at `siblings.len()` up to the root along the path of `key`.
fn climb<H: FieldHasher>(hasher: &H, node: Fp, key: &Fp, siblings: &[Fp]) -> Fp {
    siblings
        .iter()
        .enumerate()
        .rev()
        .fold(node, |node, (level, sibling)| {
            if fp_bit(key, level) {
                middle_hash(hasher, *sibling, node)
            } else {
                middle_hash(hasher, node, *sibling)
            }
        })
}

fn old_slot<H: FieldHasher>(hasher: &H, is_old0: bool, old_key: Fp, old_value: Fp) -> Fp {
    if is_old0 {
        Fp::zero()
    } else {
        leaf_hash(hasher, old_key, old_value)
    }
}

pub fn verify_membership<H: FieldHasher>(
    hasher: &H,
    root: Fp,
    key: Fp,
    value: Fp,
    witness: &MembershipWitness,
) -> bool {
    let level = leaf_level(&witness.siblings);
    let leaf = leaf_hash(hasher, key, value);
    climb(hasher, leaf, &key, &witness.siblings[..level]) == root
}

pub fn verify_non_membership<H: FieldHasher>(
    hasher: &H,
    root: Fp,
    key: Fp,
    witness: &NonMembershipWitness,
) -> bool {
    if !witness.is_old0 && witness.old_key == key {
        return false;
    }

    let level = leaf_level(&witness.siblings);
    let slot = old_slot(hasher, witness.is_old0, witness.old_key, witness.old_value);
    climb(hasher, slot, &key, &witness.siblings[..level]) == root
}

/// Checks that `new_root` is `old_root` with `key -> value` added, the key
/// having been absent before. `depth` bounds how far a collided slot may be split.
pub fn verify_insertion<H: FieldHasher>(
    hasher: &H,
    old_root: Fp,
    new_root: Fp,
    key: Fp,
    value: Fp,
    witness: &InsertionWitness,
    depth: usize,
) -> bool {
    if witness.siblings.len() > depth {
        return false;
    }

    let exclusion = NonMembershipWitness {
        siblings: witness.siblings.clone(),
        is_old0: witness.is_old0,
        old_key: witness.old_key,
        old_value: witness.old_value,
    };
    if !verify_non_membership(hasher, old_root, key, &exclusion) {
        return false;
    }

    let level = leaf_level(&witness.siblings);
    let new_leaf = leaf_hash(hasher, key, value);

    let subtree = if witness.is_old0 {
        new_leaf
    } else {
        let old_leaf = leaf_hash(hasher, witness.old_key, witness.old_value);
        let Some(split) = divergence(&key, &witness.old_key, level, depth) else {
            return false;
        };

        let fork = if fp_bit(&key, split) {
            middle_hash(hasher, old_leaf, new_leaf)
        } else {
            middle_hash(hasher, new_leaf, old_leaf)
        };

        (level..split).rev().fold(fork, |node, lvl| {
            if fp_bit(&key, lvl) {
                middle_hash(hasher, Fp::zero(), node)
            } else {
                middle_hash(hasher, node, Fp::zero())
            }
        })
    };

    climb(hasher, subtree, &key, &witness.siblings[..level]) == new_root
}
