use criterion::{criterion_group, criterion_main, Criterion};
use halo2_proofs::halo2curves::bn256::Fr as Fp;
use relay_identity::eddsa::PrivateKey;
use relay_identity::hash::{FieldHasher, Mimc7};
use relay_identity::root_update::{Identity, KeyMutation, RootUpdateBuilder, RootUpdateEvaluator};
use relay_identity::sparse_merkle_tree::SparseMerkleTree;
use relay_identity::ProtocolConfig;

const MAX_POWER: u32 = 10;
const SAMPLE_SIZE: usize = 10;
// deep enough that 2^MAX_POWER random keys never collide past it
const PROOF_DEPTH: usize = 64;

fn relay_with(leaves: u64) -> SparseMerkleTree<Mimc7> {
    let mut relay = SparseMerkleTree::new(Mimc7::new());
    for i in 0..leaves {
        let key = relay.hasher().hash2(Fp::from(i), Fp::zero());
        relay.insert(key, Fp::from(i)).unwrap();
    }
    relay
}

fn root_update_benchmark(_c: &mut Criterion) {
    let mut criterion = Criterion::default().sample_size(SAMPLE_SIZE);

    let config = ProtocolConfig {
        proof_depth: PROOF_DEPTH,
        ..Default::default()
    };
    let builder = RootUpdateBuilder::new(Mimc7::new(), config);
    let evaluator = RootUpdateEvaluator::new(Mimc7::new(), config);
    let signing_key = PrivateKey::from_bytes([1; 32]);
    let identity = Identity::new(Fp::from(0x39u64), Fp::one(), Mimc7::new());

    for i in [4, 7, MAX_POWER] {
        let relay = relay_with(2u64.pow(i));

        let bench_name = format!("insert into sparse merkle tree of 2 power of {} leaves", i);
        criterion.bench_function(&bench_name, |b| {
            b.iter(|| {
                let mut tree = relay.clone();
                tree.insert(Fp::from(u64::MAX), Fp::one()).unwrap();
            })
        });

        let bench_name = format!("build bootstrap root update on relay of 2 power of {} leaves", i);
        criterion.bench_function(&bench_name, |b| {
            b.iter(|| {
                builder
                    .build(
                        &identity,
                        &relay,
                        KeyMutation::Authorize(signing_key.public()),
                        &signing_key,
                    )
                    .unwrap();
            })
        });

        let pending = builder
            .build(
                &identity,
                &relay,
                KeyMutation::Authorize(signing_key.public()),
                &signing_key,
            )
            .unwrap();
        let bench_name = format!("validate root update on relay of 2 power of {} leaves", i);
        criterion.bench_function(&bench_name, |b| {
            b.iter(|| {
                evaluator.validate(&pending.tx).unwrap();
            })
        });
    }
}

criterion_group!(benches, root_update_benchmark);
criterion_main!(benches);
