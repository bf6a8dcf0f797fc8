//! MiMC7 as a halo2 chip. Each permutation occupies one region of 93 rows:
//! rows `0..91` apply one round each, row `91` adds the key back and row `92`
//! holds the output.
use crate::hash::{Mimc7, MIMC7_ROUNDS};
use halo2_proofs::{
    arithmetic::Field,
    circuit::{AssignedCell, Layouter, Value},
    halo2curves::bn256::Fr as Fp,
    plonk::{Advice, Column, ConstraintSystem, Error, Fixed, Selector},
    poly::Rotation,
};

#[derive(Debug, Clone)]
pub struct Mimc7Config {
    pub state: Column<Advice>,
    pub key: Column<Advice>,
    pub round_constant: Column<Fixed>,
    q_round: Selector,
    q_out: Selector,
}

/// Chip computing [`Mimc7::hash`] and [`FieldHasher::multi_hash`](crate::hash::FieldHasher::multi_hash) in circuit.
#[derive(Debug, Clone)]
pub struct Mimc7Chip {
    config: Mimc7Config,
}

impl Mimc7Chip {
    pub fn construct(config: Mimc7Config) -> Self {
        Self { config }
    }

    /// `state` must have equality enabled, and a fixed column must be enabled
    /// for constants so the initial state can be loaded.
    pub fn configure(
        meta: &mut ConstraintSystem<Fp>,
        state: Column<Advice>,
        key: Column<Advice>,
        round_constant: Column<Fixed>,
    ) -> Mimc7Config {
        let q_round = meta.selector();
        let q_out = meta.selector();

        meta.enable_equality(state);
        meta.enable_equality(key);

        // state' = (state + key + c)^7, key' = key
        meta.create_gate("mimc7 round", |meta| {
            let q = meta.query_selector(q_round);
            let s = meta.query_advice(state, Rotation::cur());
            let k = meta.query_advice(key, Rotation::cur());
            let c = meta.query_fixed(round_constant, Rotation::cur());
            let s_next = meta.query_advice(state, Rotation::next());
            let k_next = meta.query_advice(key, Rotation::next());

            let t = s + k.clone() + c;
            let t2 = t.clone() * t.clone();
            let t4 = t2.clone() * t2.clone();
            let t7 = t4 * t2 * t;

            vec![q.clone() * (s_next - t7), q * (k_next - k)]
        });

        // out = state + key
        meta.create_gate("mimc7 output", |meta| {
            let q = meta.query_selector(q_out);
            let s = meta.query_advice(state, Rotation::cur());
            let k = meta.query_advice(key, Rotation::cur());
            let out = meta.query_advice(state, Rotation::next());

            vec![q * (out - s - k)]
        });

        Mimc7Config {
            state,
            key,
            round_constant,
            q_round,
            q_out,
        }
    }

    /// One permutation of `x` under key `k`.
    pub fn hash(
        &self,
        mut layouter: impl Layouter<Fp>,
        x: &AssignedCell<Fp, Fp>,
        k: &AssignedCell<Fp, Fp>,
    ) -> Result<AssignedCell<Fp, Fp>, Error> {
        layouter.assign_region(
            || "mimc7 permutation",
            |mut region| {
                let mut state = x.copy_advice(|| "x", &mut region, self.config.state, 0)?;
                let key = k.copy_advice(|| "k", &mut region, self.config.key, 0)?;

                for (round, c) in Mimc7::round_constants().iter().enumerate() {
                    self.config.q_round.enable(&mut region, round)?;
                    region.assign_fixed(
                        || format!("round constant {}", round),
                        self.config.round_constant,
                        round,
                        || Value::known(*c),
                    )?;

                    let next = state
                        .value()
                        .zip(key.value())
                        .map(|(s, k)| (*s + k + c).pow_vartime([7u64]));
                    state = region.assign_advice(
                        || format!("state {}", round + 1),
                        self.config.state,
                        round + 1,
                        || next,
                    )?;
                    region.assign_advice(
                        || format!("key {}", round + 1),
                        self.config.key,
                        round + 1,
                        || key.value().copied(),
                    )?;
                }

                self.config.q_out.enable(&mut region, MIMC7_ROUNDS)?;
                let out = state.value().zip(key.value()).map(|(s, k)| *s + k);
                region.assign_advice(
                    || "output",
                    self.config.state,
                    MIMC7_ROUNDS + 1,
                    || out,
                )
            },
        )
    }

    /// Absorbs `inputs` into a state starting at the IV, one permutation per input.
    pub fn multi_hash(
        &self,
        mut layouter: impl Layouter<Fp>,
        inputs: &[AssignedCell<Fp, Fp>],
    ) -> Result<AssignedCell<Fp, Fp>, Error> {
        let mut state = layouter.assign_region(
            || "mimc7 iv",
            |mut region| {
                region.assign_advice_from_constant(|| "iv", self.config.state, 0, Mimc7::iv())
            },
        )?;

        for (i, input) in inputs.iter().enumerate() {
            state = self.hash(layouter.namespace(|| format!("absorb {}", i)), &state, input)?;
        }

        Ok(state)
    }
}
