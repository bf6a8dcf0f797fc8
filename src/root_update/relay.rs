use super::{Accepted, RootUpdateEvaluator, RootUpdateTx};
use crate::error::{Constraint, Result};
use crate::hash::FieldHasher;
use crate::sparse_merkle_tree::SparseMerkleTree;
use halo2_proofs::halo2curves::bn256::Fr as Fp;
use parking_lot::Mutex;
use tracing::{info, warn};

/// Owner of the shared relay tree.
///
/// Submissions are serialized: validation, the root comparison and the
/// insertion happen under one lock, so two transactions built on the same root
/// can never both be committed. The loser gets `StaleRelayRoot` and has to be
/// rebuilt on a fresh snapshot.
#[derive(Debug)]
pub struct RelayRegistry<H: FieldHasher> {
    tree: Mutex<SparseMerkleTree<H>>,
}

impl<H: FieldHasher> RelayRegistry<H> {
    pub fn new(hasher: H) -> Self {
        RelayRegistry {
            tree: Mutex::new(SparseMerkleTree::new(hasher)),
        }
    }

    pub fn root(&self) -> Fp {
        self.tree.lock().root()
    }

    /// Copy of the current tree to build transactions against.
    pub fn snapshot(&self) -> SparseMerkleTree<H> {
        self.tree.lock().clone()
    }

    /// Validates `tx` and, if it still applies to the current root, commits
    /// its new user-root claim. On any failure the tree is left unchanged.
    pub fn submit(&self, evaluator: &RootUpdateEvaluator<H>, tx: &RootUpdateTx) -> Result<Accepted> {
        let mut tree = self.tree.lock();

        if tx.old_relay_root != tree.root() {
            warn!("transaction built on a superseded relay root");
            return Err(Constraint::StaleRelayRoot.into());
        }

        let accepted = evaluator.validate(tx)?;

        let pointer = tx.new_pointer().build(tree.hasher())?;
        let mut next = tree.clone();
        next.insert(pointer.hi(), pointer.hv())?;
        if next.root() != accepted.new_relay_root {
            return Err(Constraint::RelayTreeTransition.into());
        }

        *tree = next;
        info!(
            version = accepted.new_version,
            size = tree.len(),
            "relay root committed"
        );
        Ok(accepted)
    }
}
