mod node;
mod proof;
mod smt;

pub use node::{leaf_hash, middle_hash};
pub use proof::{
    pad_siblings, verify_insertion, verify_membership, verify_non_membership, InsertionWitness,
    MembershipWitness, NonMembershipWitness,
};
pub use smt::{FindResult, InsertResult, SparseMerkleTree, KEY_BITS};
