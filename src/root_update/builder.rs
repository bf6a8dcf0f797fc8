use super::{signed_message, Identity, KeyMutation, PendingUpdate, RootUpdateTx};
use crate::claims::{build_key_claim, build_user_root_claim};
use crate::config::ProtocolConfig;
use crate::eddsa::PrivateKey;
use crate::error::Result;
use crate::hash::FieldHasher;
use crate::sparse_merkle_tree::SparseMerkleTree;
use tracing::debug;

/// Produces root-update transactions for an identity.
///
/// Both trees are mutated speculatively on clones; nothing the caller holds is
/// changed. The builder does not judge the transaction: a revoked or unknown
/// signer still yields a bundle, which the evaluator then refuses.
#[derive(Clone, Debug)]
pub struct RootUpdateBuilder<H: FieldHasher> {
    hasher: H,
    config: ProtocolConfig,
}

impl<H: FieldHasher> RootUpdateBuilder<H> {
    pub fn new(hasher: H, config: ProtocolConfig) -> Self {
        RootUpdateBuilder { hasher, config }
    }

    pub fn config(&self) -> &ProtocolConfig {
        &self.config
    }

    /// Builds the transaction applying `mutation` to `identity`, signed with
    /// `signing_key` and published on top of `relay`.
    ///
    /// Fails if the mutation claim is already in the user tree, if the new
    /// pointer is already in the relay tree, or if a witness does not fit the
    /// configured proof depth.
    pub fn build(
        &self,
        identity: &Identity<H>,
        relay: &SparseMerkleTree<H>,
        mutation: KeyMutation,
        signing_key: &PrivateKey,
    ) -> Result<PendingUpdate<H>> {
        let hasher = &self.hasher;
        let depth = self.config.proof_depth;

        let old_version = identity.version();
        let new_version = identity.next_version()?;
        let old_user_root = identity.user_root();

        let mutation_claim = mutation.claim(hasher);
        let mut user_tree = identity.user_tree().clone();
        let user_insertion = user_tree
            .insert(mutation_claim.hi(), mutation_claim.hv())?
            .witness(depth)?;
        let new_user_root = user_tree.root();

        let key_set = match old_version {
            None => &user_tree,
            Some(_) => identity.user_tree(),
        };
        let signer = signing_key.public();
        let authorization = build_key_claim(hasher, &signer, false);
        let revocation = build_key_claim(hasher, &signer, true);
        let signer_inclusion = key_set
            .find(authorization.hi())
            .membership_witness(depth)?;
        let signer_exclusion = key_set
            .find(revocation.hi())
            .non_membership_witness(depth)?;

        let old_pointer_inclusion = match old_version {
            None => None,
            Some(version) => {
                let old_pointer = build_user_root_claim(
                    hasher,
                    identity.id(),
                    identity.era(),
                    version,
                    old_user_root,
                )?;
                Some(relay.find(old_pointer.hi()).membership_witness(depth)?)
            }
        };

        let new_pointer = build_user_root_claim(
            hasher,
            identity.id(),
            identity.era(),
            new_version,
            new_user_root,
        )?;
        let message = signed_message(hasher, self.config.domain_tag, &new_pointer);
        let signature = signing_key.sign(hasher, message);

        let mut relay_tree = relay.clone();
        let relay_insertion = relay_tree
            .insert(new_pointer.hi(), new_pointer.hv())?
            .witness(depth)?;

        debug!(
            new_version,
            bootstrap = old_version.is_none(),
            "built root update"
        );

        Ok(PendingUpdate {
            tx: RootUpdateTx {
                old_relay_root: relay.root(),
                new_relay_root: relay_tree.root(),
                identity_id: identity.id(),
                era: identity.era(),
                old_version,
                new_version,
                old_user_root,
                new_user_root,
                mutation,
                user_insertion,
                signer,
                signature,
                signer_inclusion,
                signer_exclusion,
                old_pointer_inclusion,
                relay_insertion,
            },
            user_tree,
        })
    }
}
