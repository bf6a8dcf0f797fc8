//! The hash oracle every claim, tree node and signed message is compressed with.
mod mimc7;

pub use mimc7::{Mimc7, MIMC7_ROUNDS};

use halo2_proofs::halo2curves::bn256::Fr as Fp;

/// A collision-resistant, deterministic map from tuples of field elements to a field element.
///
/// Implementors only provide the n-ary form; the fixed arities used by the
/// protocol are derived from it.
pub trait FieldHasher: Clone + Send + Sync {
    fn multi_hash(&self, inputs: &[Fp]) -> Fp;

    /// Pair hash, used for claim index/value pairs and for inner tree nodes.
    fn hash2(&self, a: Fp, b: Fp) -> Fp {
        self.multi_hash(&[a, b])
    }

    /// Three-input hash, used for the domain-separated signed message.
    fn hash3(&self, a: Fp, b: Fp, c: Fp) -> Fp {
        self.multi_hash(&[a, b, c])
    }
}
