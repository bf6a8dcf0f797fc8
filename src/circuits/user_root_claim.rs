use crate::chips::claim_index::{ClaimIndexChip, ClaimIndexConfig};
use crate::chips::mimc7::{Mimc7Chip, Mimc7Config};
use crate::circuits::traits::CircuitBase;
use crate::circuits::WithInstances;
use crate::claims::{UserRootClaim, TOP_WORD_BITS};
use crate::config::DEFAULT_DOMAIN_TAG;
use crate::error::MalformedInput;
use crate::hash::Mimc7;
use crate::root_update::signed_message;
use halo2_proofs::circuit::{Layouter, SimpleFloorPlanner, Value};
use halo2_proofs::halo2curves::bn256::Fr as Fp;
use halo2_proofs::plonk::{Advice, Circuit, Column, ConstraintSystem, Error, Fixed, Instance};

/// Re-derives a user-root claim and the message signed to publish it.
///
/// The pointer `(identity_id, era, version, root)` is private. The public
/// instances are, in order, the claim's `hi`, its `hv` and the signed message
/// `H(domain_tag, hi, hv)`. `version` is bounded to 32 bits and `era` to the
/// width of the top index word.
#[derive(Clone, Debug)]
pub struct UserRootClaimCircuit {
    pub pointer: UserRootClaim,
    pub domain_tag: u64,
    hi: Fp,
    hv: Fp,
    message: Fp,
}

impl UserRootClaimCircuit {
    pub fn init_empty() -> Self {
        Self {
            pointer: UserRootClaim::new(Fp::zero(), Fp::zero(), 0, Fp::zero()),
            domain_tag: DEFAULT_DOMAIN_TAG,
            hi: Fp::zero(),
            hv: Fp::zero(),
            message: Fp::zero(),
        }
    }

    pub fn init(pointer: UserRootClaim, domain_tag: u64) -> Result<Self, MalformedInput> {
        let hasher = Mimc7::new();
        let claim = pointer.build(&hasher)?;
        let message = signed_message(&hasher, domain_tag, &claim);

        Ok(Self {
            pointer,
            domain_tag,
            hi: claim.hi(),
            hv: claim.hv(),
            message,
        })
    }
}

impl WithInstances for UserRootClaimCircuit {
    fn num_instances(&self) -> Vec<usize> {
        vec![3]
    }

    fn instances(&self) -> Vec<Vec<Fp>> {
        vec![vec![self.hi, self.hv, self.message]]
    }
}

impl CircuitBase for UserRootClaimCircuit {}

#[derive(Debug, Clone)]
pub struct UserRootClaimConfig {
    mimc7_config: Mimc7Config,
    claim_index_config: ClaimIndexConfig,
    advices: [Column<Advice>; 3],
    instance: Column<Instance>,
}

impl UserRootClaimConfig {
    pub fn configure(meta: &mut ConstraintSystem<Fp>) -> Self {
        let advices: [Column<Advice>; 3] = std::array::from_fn(|_| meta.advice_column());

        // fixed_columns[0] holds round constants, fixed_columns[1] the circuit constants
        let fixed_columns: [Column<Fixed>; 2] = std::array::from_fn(|_| meta.fixed_column());
        meta.enable_constant(fixed_columns[1]);

        let mimc7_config = Mimc7Chip::configure(meta, advices[0], advices[1], fixed_columns[0]);
        let claim_index_config = ClaimIndexChip::configure(meta, advices);

        let instance = meta.instance_column();
        meta.enable_equality(instance);

        Self {
            mimc7_config,
            claim_index_config,
            advices,
            instance,
        }
    }
}

impl Circuit<Fp> for UserRootClaimCircuit {
    type Config = UserRootClaimConfig;
    type FloorPlanner = SimpleFloorPlanner;

    fn without_witnesses(&self) -> Self {
        Self {
            domain_tag: self.domain_tag,
            ..Self::init_empty()
        }
    }

    fn configure(meta: &mut ConstraintSystem<Fp>) -> Self::Config {
        UserRootClaimConfig::configure(meta)
    }

    fn synthesize(
        &self,
        config: Self::Config,
        mut layouter: impl Layouter<Fp>,
    ) -> Result<(), Error> {
        let mimc7_chip = Mimc7Chip::construct(config.mimc7_config);
        let claim_index_chip = ClaimIndexChip::construct(config.claim_index_config);

        let identity_id = self.assign_value_to_witness(
            layouter.namespace(|| "assign identity id"),
            self.pointer.identity_id,
            "identity id",
            config.advices[0],
        )?;
        let root = self.assign_value_to_witness(
            layouter.namespace(|| "assign user root"),
            self.pointer.root,
            "user root",
            config.advices[1],
        )?;

        let version = claim_index_chip.assign_bounded(
            layouter.namespace(|| "assign version"),
            Value::known(Fp::from(self.pointer.version as u64)),
            32,
            "version",
        )?;
        let era = claim_index_chip.assign_bounded(
            layouter.namespace(|| "assign era"),
            Value::known(self.pointer.era),
            TOP_WORD_BITS as usize,
            "era",
        )?;
        let i2 = claim_index_chip.pack(layouter.namespace(|| "pack index"), &version, &era)?;

        let hi = mimc7_chip.multi_hash(layouter.namespace(|| "hash index"), &[identity_id, i2])?;

        let zero = self.assign_constant(
            layouter.namespace(|| "assign zero"),
            Fp::zero(),
            "zero",
            config.advices[0],
        )?;
        let hv = mimc7_chip.multi_hash(layouter.namespace(|| "hash value"), &[zero, root])?;

        let domain_tag = self.assign_constant(
            layouter.namespace(|| "assign domain tag"),
            Fp::from(self.domain_tag),
            "domain tag",
            config.advices[0],
        )?;
        let message = mimc7_chip.multi_hash(
            layouter.namespace(|| "hash signed message"),
            &[domain_tag, hi.clone(), hv.clone()],
        )?;

        self.expose_public(layouter.namespace(|| "public hi"), &hi, 0, config.instance)?;
        self.expose_public(layouter.namespace(|| "public hv"), &hv, 1, config.instance)?;
        self.expose_public(
            layouter.namespace(|| "public message"),
            &message,
            2,
            config.instance,
        )?;

        Ok(())
    }
}
