use super::PendingUpdate;
use crate::error::{Constraint, MalformedInput, Result};
use crate::hash::FieldHasher;
use crate::sparse_merkle_tree::SparseMerkleTree;
use halo2_proofs::halo2curves::bn256::Fr as Fp;
use tracing::info;

/// Local state of one identity: its user tree and the last version it published.
#[derive(Clone, Debug)]
pub struct Identity<H: FieldHasher> {
    id: Fp,
    era: Fp,
    user_tree: SparseMerkleTree<H>,
    version: Option<u32>,
}

impl<H: FieldHasher> Identity<H> {
    pub fn new(id: Fp, era: Fp, hasher: H) -> Self {
        Identity::with_user_tree(id, era, SparseMerkleTree::new(hasher))
    }

    /// An identity whose user tree was populated out of band before its first
    /// root is published. The tree becomes the starting point of the bootstrap
    /// transaction.
    pub fn with_user_tree(id: Fp, era: Fp, user_tree: SparseMerkleTree<H>) -> Self {
        Identity {
            id,
            era,
            user_tree,
            version: None,
        }
    }

    pub fn id(&self) -> Fp {
        self.id
    }

    pub fn era(&self) -> Fp {
        self.era
    }

    pub fn user_root(&self) -> Fp {
        self.user_tree.root()
    }

    pub fn user_tree(&self) -> &SparseMerkleTree<H> {
        &self.user_tree
    }

    /// Last published version, `None` before bootstrap.
    pub fn version(&self) -> Option<u32> {
        self.version
    }

    pub fn next_version(&self) -> std::result::Result<u32, MalformedInput> {
        match self.version {
            None => Ok(0),
            Some(version) => version.checked_add(1).ok_or(MalformedInput::VersionOverflow),
        }
    }

    /// Adopts the user tree of an update the relay has accepted.
    pub fn apply(&mut self, pending: PendingUpdate<H>) -> Result<()> {
        let tx = &pending.tx;

        if tx.old_version != self.version {
            return Err(Constraint::PreviousVersionMismatch {
                expected: self.version,
                found: tx.old_version,
            }
            .into());
        }

        let expected = self.next_version()?;
        if tx.new_version != expected {
            return Err(Constraint::VersionMismatch {
                expected,
                found: tx.new_version,
            }
            .into());
        }

        if tx.identity_id != self.id
            || tx.era != self.era
            || tx.old_user_root != self.user_root()
            || tx.new_user_root != pending.user_tree.root()
        {
            return Err(Constraint::UserTreeTransition.into());
        }

        info!(version = tx.new_version, "identity advanced");
        self.version = Some(tx.new_version);
        self.user_tree = pending.user_tree;
        Ok(())
    }
}
