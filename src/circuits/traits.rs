use halo2_proofs::circuit::{AssignedCell, Layouter, Value};
use halo2_proofs::halo2curves::bn256::Fr as Fp;
use halo2_proofs::plonk::{Advice, Column, Error, Instance};

/// Trait containing common methods for all circuits
pub trait CircuitBase {
    /// Enforce copy constraint check between input cell and instance column at row passed as input
    fn expose_public(
        &self,
        mut layouter: impl Layouter<Fp>,
        cell: &AssignedCell<Fp, Fp>,
        row: usize,
        instance: Column<Instance>,
    ) -> Result<(), Error> {
        layouter.constrain_instance(cell.cell(), instance, row)
    }

    /// Assigns `value` to a fresh cell of `advice_col`. `object_to_assign` only labels the region.
    fn assign_value_to_witness(
        &self,
        mut layouter: impl Layouter<Fp>,
        value: Fp,
        object_to_assign: &'static str,
        advice_col: Column<Advice>,
    ) -> Result<AssignedCell<Fp, Fp>, Error> {
        layouter.assign_region(
            || format!("assign {}", object_to_assign),
            |mut region| region.assign_advice(|| "value", advice_col, 0, || Value::known(value)),
        )
    }

    /// Assigns a value fixed by the circuit itself, not by the prover.
    fn assign_constant(
        &self,
        mut layouter: impl Layouter<Fp>,
        value: Fp,
        object_to_assign: &'static str,
        advice_col: Column<Advice>,
    ) -> Result<AssignedCell<Fp, Fp>, Error> {
        layouter.assign_region(
            || format!("assign constant {}", object_to_assign),
            |mut region| region.assign_advice_from_constant(|| "constant", advice_col, 0, value),
        )
    }
}
