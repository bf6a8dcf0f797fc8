#[cfg(test)]
mod test {

    use crate::circuits::{
        user_root_claim::UserRootClaimCircuit,
        utils::{full_prover, full_verifier, generate_setup_artifacts},
        WithInstances,
    };
    use crate::claims::UserRootClaim;
    use crate::config::DEFAULT_DOMAIN_TAG;
    use crate::error::MalformedInput;
    use crate::utils::{big_uint_to_fp, fp_from_hex};
    use halo2_proofs::{
        dev::{MockProver, VerifyFailure},
        halo2curves::bn256::Fr as Fp,
    };
    use num_bigint::BigUint;

    const K: u32 = 10;

    fn pointer() -> UserRootClaim {
        UserRootClaim::new(
            fp_from_hex("0x393939393939393939393939393939393939393a").unwrap(),
            Fp::one(),
            1,
            fp_from_hex("0x0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0c")
                .unwrap(),
        )
    }

    #[test]
    fn test_valid_user_root_claim() {
        let circuit = UserRootClaimCircuit::init(pointer(), DEFAULT_DOMAIN_TAG).unwrap();

        let instances = circuit.instances();
        assert_eq!(instances[0].len(), circuit.num_instances()[0]);
        assert_eq!(
            instances[0][0],
            fp_from_hex("0xf92abb8209409736929512c2018467a497ed35f409bb90579c62b9a4e0b2aa8")
                .unwrap()
        );
        assert_eq!(
            instances[0][1],
            fp_from_hex("0xad7edbf562757b1ad2282c44e2c248f95e9e6b09ba0d32809aa724fbf148e0c")
                .unwrap()
        );

        let valid_prover = MockProver::run(K, &circuit, instances).unwrap();
        valid_prover.assert_satisfied();
    }

    #[test]
    fn test_wide_fields() {
        let mut wide = pointer();
        wide.version = u32::MAX;
        wide.era = big_uint_to_fp(&((BigUint::from(1u32) << 157) - 1u32)).unwrap();

        let circuit = UserRootClaimCircuit::init(wide, DEFAULT_DOMAIN_TAG).unwrap();
        let valid_prover = MockProver::run(K, &circuit, circuit.instances()).unwrap();
        valid_prover.assert_satisfied();

        // one bit more does not pack
        wide.era = big_uint_to_fp(&(BigUint::from(1u32) << 157)).unwrap();
        assert!(matches!(
            UserRootClaimCircuit::init(wide, DEFAULT_DOMAIN_TAG),
            Err(MalformedInput::EraOutOfRange { .. })
        ));
    }

    #[test]
    fn test_wrong_instances_are_rejected() {
        let circuit = UserRootClaimCircuit::init(pointer(), DEFAULT_DOMAIN_TAG).unwrap();

        // another version of the same pointer
        let mut next = pointer();
        next.version = 2;
        let other = UserRootClaimCircuit::init(next, DEFAULT_DOMAIN_TAG).unwrap();
        let mut instances = circuit.instances();
        instances[0][0] = other.instances()[0][0];

        let invalid_prover = MockProver::run(K, &circuit, instances).unwrap();
        let errors = invalid_prover.verify().unwrap_err();
        assert!(errors
            .iter()
            .all(|error| matches!(error, VerifyFailure::Permutation { .. })));

        // a message signed under another domain
        let mut instances = circuit.instances();
        instances[0][2] = UserRootClaimCircuit::init(pointer(), 1).unwrap().instances()[0][2];
        let invalid_prover = MockProver::run(K, &circuit, instances).unwrap();
        assert!(invalid_prover.verify().is_err());
    }

    #[test]
    fn test_era_outside_the_field_is_rejected() {
        let mut pointer = pointer();
        pointer.era = -Fp::one();
        assert!(UserRootClaimCircuit::init(pointer, DEFAULT_DOMAIN_TAG).is_err());
    }

    #[test]
    fn test_user_root_claim_with_full_prover() {
        let circuit = UserRootClaimCircuit::init_empty();

        // keys only depend on the shape of the circuit, not on its witness
        let (params, pk, vk) = generate_setup_artifacts(K, None, &circuit).unwrap();

        let circuit = UserRootClaimCircuit::init(pointer(), DEFAULT_DOMAIN_TAG).unwrap();
        let proof = full_prover(&params, &pk, circuit.clone(), circuit.instances()).unwrap();

        assert!(full_verifier(&params, &vk, proof.clone(), circuit.instances()));

        let mut wrong = circuit.instances();
        wrong[0][1] += Fp::one();
        assert!(!full_verifier(&params, &vk, proof, wrong));
    }
}
