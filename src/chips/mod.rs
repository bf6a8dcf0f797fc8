pub mod claim_index;
pub mod mimc7;
