use crate::claims::{ClaimType, SUB_WORD_OFFSET, TOP_WORD_OFFSET};
use crate::utils::fp_bit;
use halo2_proofs::{
    arithmetic::Field,
    circuit::{AssignedCell, Layouter, Value},
    halo2curves::bn256::Fr as Fp,
    plonk::{Advice, Column, ConstraintSystem, Error, Expression, Selector},
    poly::Rotation,
};

#[derive(Debug, Clone)]
pub struct ClaimIndexConfig {
    pub advice: [Column<Advice>; 3],
    q_bit: Selector,
    q_index: Selector,
}

/// Packs the second index element of a user-root claim,
/// `i2 = 2 + version * 2^64 + era * 2^96`, and bounds its sub-fields so the
/// packing is injective.
#[derive(Debug, Clone)]
pub struct ClaimIndexChip {
    config: ClaimIndexConfig,
}

impl ClaimIndexChip {
    pub fn construct(config: ClaimIndexConfig) -> Self {
        Self { config }
    }

    pub fn configure(meta: &mut ConstraintSystem<Fp>, advice: [Column<Advice>; 3]) -> ClaimIndexConfig {
        let q_bit = meta.selector();
        let q_index = meta.selector();

        for col in &advice {
            meta.enable_equality(*col);
        }

        // Running sum, most significant bit first: acc' = 2 * acc + b, b boolean
        meta.create_gate("bit decomposition", |meta| {
            let q = meta.query_selector(q_bit);
            let bit = meta.query_advice(advice[0], Rotation::cur());
            let acc = meta.query_advice(advice[1], Rotation::cur());
            let acc_next = meta.query_advice(advice[1], Rotation::next());

            vec![
                q.clone() * bit.clone() * (Expression::Constant(Fp::one()) - bit.clone()),
                q * (acc_next - acc * Expression::Constant(Fp::from(2)) - bit),
            ]
        });

        meta.create_gate("user root index word", |meta| {
            let q = meta.query_selector(q_index);
            let version = meta.query_advice(advice[0], Rotation::cur());
            let era = meta.query_advice(advice[1], Rotation::cur());
            let i2 = meta.query_advice(advice[2], Rotation::cur());

            vec![
                q * (i2
                    - Expression::Constant(Fp::from(ClaimType::UserRoot.tag()))
                    - version * Expression::Constant(power_of_two(SUB_WORD_OFFSET))
                    - era * Expression::Constant(power_of_two(TOP_WORD_OFFSET))),
            ]
        });

        ClaimIndexConfig {
            advice,
            q_bit,
            q_index,
        }
    }

    /// Assigns `value` as the running sum of `bits` boolean cells, which
    /// constrains it to `[0, 2^bits)`. Wider values are truncated to their low
    /// bits and will not match anything computed from the original.
    pub fn assign_bounded(
        &self,
        mut layouter: impl Layouter<Fp>,
        value: Value<Fp>,
        bits: usize,
        name: &str,
    ) -> Result<AssignedCell<Fp, Fp>, Error> {
        layouter.assign_region(
            || format!("decompose {}", name),
            |mut region| {
                let mut acc = region.assign_advice_from_constant(
                    || "acc 0",
                    self.config.advice[1],
                    0,
                    Fp::zero(),
                )?;

                for i in 0..bits {
                    self.config.q_bit.enable(&mut region, i)?;
                    let bit = value.map(|v| Fp::from(fp_bit(&v, bits - 1 - i) as u64));
                    region.assign_advice(|| format!("bit {}", i), self.config.advice[0], i, || bit)?;

                    let next = acc.value().zip(bit).map(|(acc, bit)| acc.double() + bit);
                    acc = region.assign_advice(
                        || format!("acc {}", i + 1),
                        self.config.advice[1],
                        i + 1,
                        || next,
                    )?;
                }

                Ok(acc)
            },
        )
    }

    pub fn pack(
        &self,
        mut layouter: impl Layouter<Fp>,
        version: &AssignedCell<Fp, Fp>,
        era: &AssignedCell<Fp, Fp>,
    ) -> Result<AssignedCell<Fp, Fp>, Error> {
        layouter.assign_region(
            || "pack user root index word",
            |mut region| {
                self.config.q_index.enable(&mut region, 0)?;
                version.copy_advice(|| "version", &mut region, self.config.advice[0], 0)?;
                era.copy_advice(|| "era", &mut region, self.config.advice[1], 0)?;

                let i2 = version.value().zip(era.value()).map(|(v, e)| {
                    Fp::from(ClaimType::UserRoot.tag())
                        + *v * power_of_two(SUB_WORD_OFFSET)
                        + *e * power_of_two(TOP_WORD_OFFSET)
                });
                region.assign_advice(|| "i2", self.config.advice[2], 0, || i2)
            },
        )
    }
}

fn power_of_two(exponent: u64) -> Fp {
    Fp::from(2).pow_vartime([exponent])
}
