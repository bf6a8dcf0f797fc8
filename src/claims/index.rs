use super::ClaimType;
use crate::error::MalformedInput;
use crate::utils::{big_uint_to_fp, fp_to_big_uint};
use halo2_proofs::halo2curves::bn256::Fr as Fp;
use num_bigint::BigUint;

/// Bit offset of the sub word (revocation flag or version).
pub const SUB_WORD_OFFSET: u64 = 64;
/// Bit offset of the top word (sign bit or era).
pub const TOP_WORD_OFFSET: u64 = 96;
/// Width of the top word. `96 + 157 = 253` keeps every packed word below the
/// 254-bit modulus, so packing never wraps around.
pub const TOP_WORD_BITS: u64 = 157;

/// The sub-fields co-resident in the second index element of a claim:
///
/// | bits        | field        |
/// |-------------|--------------|
/// | `[0, 64)`   | claim type   |
/// | `[64, 96)`  | sub word     |
/// | `[96, 253)` | top word     |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexWord {
    pub claim_type: ClaimType,
    pub sub_word: u32,
    pub top_word: BigUint,
}

impl IndexWord {
    pub fn new(claim_type: ClaimType, sub_word: u32, top_word: BigUint) -> Self {
        IndexWord {
            claim_type,
            sub_word,
            top_word,
        }
    }

    /// `claim_type + (sub_word << 64) + (top_word << 96)`.
    pub fn pack(&self) -> Result<Fp, MalformedInput> {
        if self.top_word.bits() > TOP_WORD_BITS {
            return Err(MalformedInput::EraOutOfRange {
                bits: TOP_WORD_BITS,
            });
        }

        let word = BigUint::from(self.claim_type.tag())
            + (BigUint::from(self.sub_word) << SUB_WORD_OFFSET)
            + (&self.top_word << TOP_WORD_OFFSET);

        big_uint_to_fp(&word)
    }

    pub fn unpack(word: Fp) -> Result<Self, MalformedInput> {
        let word = fp_to_big_uint(&word);

        let low_mask = (BigUint::from(1u32) << SUB_WORD_OFFSET) - 1u32;
        let tag = u64::try_from(&word & &low_mask)
            .map_err(|_| MalformedInput::IndexWord("claim type does not fit 64 bits"))?;
        let claim_type =
            ClaimType::from_tag(tag).ok_or(MalformedInput::IndexWord("unknown claim type"))?;

        let sub_mask = (BigUint::from(1u32) << (TOP_WORD_OFFSET - SUB_WORD_OFFSET)) - 1u32;
        let sub_word = u32::try_from((&word >> SUB_WORD_OFFSET) & sub_mask)
            .map_err(|_| MalformedInput::IndexWord("sub word does not fit 32 bits"))?;

        let top_word = word >> TOP_WORD_OFFSET;
        if top_word.bits() > TOP_WORD_BITS {
            return Err(MalformedInput::IndexWord("top word too wide"));
        }

        Ok(IndexWord {
            claim_type,
            sub_word,
            top_word,
        })
    }
}
