mod tests;
pub mod traits;
pub mod user_root_claim;
pub mod utils;

use halo2_proofs::halo2curves::bn256::Fr as Fp;

pub trait WithInstances {
    fn num_instances(&self) -> Vec<usize>;
    fn instances(&self) -> Vec<Vec<Fp>>;
}
