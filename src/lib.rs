//! This crate contains the primitives of an identity relay: claims that bind signing keys and
//! user-tree roots to field elements, the sparse Merkle trees holding them, and the
//! root-update transaction through which an identity republishes its user tree.
//! Circuits use the [Halo2 PSE Fork](https://github.com/privacy-scaling-explorations/halo2).

/// Zk circuit subcomponents aka chips.
pub mod chips;
/// Zk circuits with a full prover and verifier. A circuit can be viewed as an assembly of chips.
pub mod circuits;
/// Claim records and their `(hi, hv)` encoding.
pub mod claims;
pub mod config;
/// EdDSA signatures over Baby Jubjub.
pub mod eddsa;
pub mod error;
/// The field hash every claim, tree node and signed message goes through.
pub mod hash;
/// Building, validating and committing root-update transactions. No zk proof in here.
pub mod root_update;
/// Sparse Merkle tree with membership, non-membership and insertion proofs.
pub mod sparse_merkle_tree;
pub mod utils;

pub use config::ProtocolConfig;
pub use error::{Error, Result};
