use super::FieldHasher;
use crate::utils::big_uint_to_fp_reduced;
use ethers::utils::keccak256;
use halo2_proofs::arithmetic::Field;
use halo2_proofs::halo2curves::bn256::Fr as Fp;
use num_bigint::BigUint;
use std::sync::OnceLock;

pub const MIMC7_ROUNDS: usize = 91;
const SEED: &str = "mimc";

/// MiMC with exponent 7 over the BN254 scalar field.
///
/// Round constants come from a keccak256 chain seeded with `"mimc"`: the first
/// digest is discarded, every following digest reduced modulo `q` becomes the
/// next constant, and the constant of round 0 is zero.
///
/// Sequences are absorbed into a running state that starts at
/// `keccak256("mimc_iv") mod q`; each element keys one permutation of the state.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mimc7;

impl Mimc7 {
    pub fn new() -> Self {
        Mimc7
    }

    /// The 91 round constants.
    pub fn round_constants() -> &'static [Fp; MIMC7_ROUNDS] {
        static CONSTANTS: OnceLock<[Fp; MIMC7_ROUNDS]> = OnceLock::new();
        CONSTANTS.get_or_init(|| {
            let mut constants = [Fp::zero(); MIMC7_ROUNDS];
            let mut digest = keccak256(SEED.as_bytes());
            for constant in constants.iter_mut().skip(1) {
                digest = keccak256(digest);
                *constant = big_uint_to_fp_reduced(&BigUint::from_bytes_be(&digest));
            }
            constants
        })
    }

    /// Initial state of [`FieldHasher::multi_hash`].
    pub fn iv() -> Fp {
        static IV: OnceLock<Fp> = OnceLock::new();
        *IV.get_or_init(|| {
            let digest = keccak256(format!("{}_iv", SEED).as_bytes());
            big_uint_to_fp_reduced(&BigUint::from_bytes_be(&digest))
        })
    }

    /// Single MiMC7 permutation of `x` under key `k`, with the key added back at the end.
    pub fn hash(&self, x: Fp, k: Fp) -> Fp {
        let constants = Self::round_constants();
        let mut r = x;
        for c in constants.iter() {
            let t = r + k + c;
            r = t.pow_vartime([7u64]);
        }
        r + k
    }
}

impl FieldHasher for Mimc7 {
    fn multi_hash(&self, inputs: &[Fp]) -> Fp {
        inputs
            .iter()
            .fold(Self::iv(), |state, x| self.hash(state, *x))
    }
}
