use super::{signed_message, Accepted, RootUpdateTx};
use crate::claims::build_key_claim;
use crate::config::ProtocolConfig;
use crate::eddsa;
use crate::error::{Constraint, Error, MalformedInput, Result};
use crate::hash::FieldHasher;
use crate::sparse_merkle_tree::{verify_insertion, verify_membership, verify_non_membership};
use ark_std::{end_timer, start_timer};
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// Decides whether a root-update transaction is valid.
///
/// Validation recomputes every claim and every hash from the bundle and touches
/// no tree, so any number of transactions can be checked concurrently.
#[derive(Clone, Debug)]
pub struct RootUpdateEvaluator<H: FieldHasher> {
    hasher: H,
    config: ProtocolConfig,
}

impl<H: FieldHasher> RootUpdateEvaluator<H> {
    pub fn new(hasher: H, config: ProtocolConfig) -> Self {
        RootUpdateEvaluator { hasher, config }
    }

    pub fn config(&self) -> &ProtocolConfig {
        &self.config
    }

    /// Returns the first failed check, in this order: shape, version,
    /// signature, signer authorization, signer revocation, old pointer, user
    /// tree transition, relay tree transition.
    pub fn validate(&self, tx: &RootUpdateTx) -> Result<Accepted> {
        let timer = start_timer!(|| "validate root update");
        let result = self.check(tx);
        end_timer!(timer);

        match &result {
            Ok(accepted) => info!(
                version = accepted.new_version,
                "root update accepted"
            ),
            Err(err) => warn!(%err, "root update rejected"),
        }
        result
    }

    /// Validates independent transactions in parallel.
    pub fn validate_batch(&self, txs: &[RootUpdateTx]) -> Vec<Result<Accepted>> {
        txs.par_iter().map(|tx| self.validate(tx)).collect()
    }

    fn check(&self, tx: &RootUpdateTx) -> Result<Accepted> {
        let hasher = &self.hasher;
        let depth = self.config.proof_depth;

        self.check_shape(tx)?;
        debug!("shape ok");

        let expected = match tx.old_version {
            None => 0,
            Some(version) => version.checked_add(1).ok_or(MalformedInput::VersionOverflow)?,
        };
        if tx.new_version != expected {
            return Err(Constraint::VersionMismatch {
                expected,
                found: tx.new_version,
            }
            .into());
        }
        debug!(version = tx.new_version, "version ok");

        let new_pointer = tx.new_pointer().build(hasher)?;
        let message = signed_message(hasher, self.config.domain_tag, &new_pointer);
        if !eddsa::verify(hasher, &tx.signer, message, &tx.signature) {
            return Err(Error::InvalidSignature);
        }
        debug!("signature ok");

        let key_set_root = tx.key_set_root();
        let authorization = build_key_claim(hasher, &tx.signer, false);
        if !verify_membership(
            hasher,
            key_set_root,
            authorization.hi(),
            authorization.hv(),
            &tx.signer_inclusion,
        ) {
            return Err(Constraint::SigningKeyNotAuthorized.into());
        }

        let revocation = build_key_claim(hasher, &tx.signer, true);
        if !verify_non_membership(hasher, key_set_root, revocation.hi(), &tx.signer_exclusion) {
            return Err(Constraint::SigningKeyRevoked.into());
        }
        debug!("signer ok");

        if let (Some(old_pointer), Some(witness)) = (tx.old_pointer(), &tx.old_pointer_inclusion) {
            let old_pointer = old_pointer.build(hasher)?;
            if !verify_membership(
                hasher,
                tx.old_relay_root,
                old_pointer.hi(),
                old_pointer.hv(),
                witness,
            ) {
                return Err(Constraint::StaleRelayRoot.into());
            }
            debug!("old pointer ok");
        }

        let mutation = tx.mutation.claim(hasher);
        if !verify_insertion(
            hasher,
            tx.old_user_root,
            tx.new_user_root,
            mutation.hi(),
            mutation.hv(),
            &tx.user_insertion,
            depth,
        ) {
            return Err(Constraint::UserTreeTransition.into());
        }
        debug!("user tree transition ok");

        if !verify_insertion(
            hasher,
            tx.old_relay_root,
            tx.new_relay_root,
            new_pointer.hi(),
            new_pointer.hv(),
            &tx.relay_insertion,
            depth,
        ) {
            return Err(Constraint::RelayTreeTransition.into());
        }

        Ok(Accepted {
            identity_id: tx.identity_id,
            new_relay_root: tx.new_relay_root,
            new_version: tx.new_version,
        })
    }

    fn check_shape(&self, tx: &RootUpdateTx) -> Result<()> {
        let depth = self.config.proof_depth;

        let mut siblings = vec![
            tx.user_insertion.siblings.len(),
            tx.signer_inclusion.siblings.len(),
            tx.signer_exclusion.siblings.len(),
            tx.relay_insertion.siblings.len(),
        ];
        if let Some(witness) = &tx.old_pointer_inclusion {
            siblings.push(witness.siblings.len());
        }
        if let Some(found) = siblings.into_iter().find(|len| *len != depth) {
            return Err(MalformedInput::WrongProofDepth {
                expected: depth,
                found,
            }
            .into());
        }

        match (tx.is_bootstrap(), tx.old_pointer_inclusion.is_some()) {
            (true, true) => Err(MalformedInput::UnexpectedPointerProof.into()),
            (false, false) => Err(MalformedInput::MissingPointerProof.into()),
            _ => Ok(()),
        }
    }
}
