#[cfg(test)]
mod test {

    use crate::eddsa::{subgroup_order, verify, Point, PrivateKey};
    use crate::hash::Mimc7;
    use crate::utils::fp_to_big_uint;
    use halo2_proofs::halo2curves::bn256::Fr as Fp;
    use rand::rngs::OsRng;

    fn key(last: u8) -> PrivateKey {
        let mut bytes = [0u8; 32];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = (i % 10) as u8;
        }
        bytes[31] = last;
        PrivateKey::from_bytes(bytes)
    }

    #[test]
    fn test_public_key_derivation() {
        let sk = key(1);
        let pk = sk.public();

        assert!(pk.0.is_on_curve());
        assert!(pk.0.to_affine().is_in_correct_subgroup_assuming_on_curve());
        assert_ne!(pk.0, Point::identity());
        // deterministic
        assert_eq!(pk, key(1).public());
        // different seeds give different keys
        assert_ne!(pk, key(2).public());
    }

    #[test]
    fn test_sign_and_verify() {
        let hasher = Mimc7::new();
        let sk = key(1);
        let pk = sk.public();
        let message = Fp::from(1234u64);

        let signature = sk.sign(&hasher, message);
        assert!(verify(&hasher, &pk, message, &signature));

        assert!(&fp_to_big_uint(&signature.s) < subgroup_order());
        assert!(signature.r8.is_on_curve());

        // signing is deterministic
        assert_eq!(signature, sk.sign(&hasher, message));
    }

    #[test]
    fn test_tampered_signatures_fail() {
        let hasher = Mimc7::new();
        let sk = key(1);
        let pk = sk.public();
        let message = Fp::from(1234u64);
        let signature = sk.sign(&hasher, message);

        // wrong message
        assert!(!verify(&hasher, &pk, message + Fp::one(), &signature));

        // wrong signer
        assert!(!verify(&hasher, &key(2).public(), message, &signature));

        // tampered S
        let mut bad_s = signature;
        bad_s.s += Fp::one();
        assert!(!verify(&hasher, &pk, message, &bad_s));

        // R8 off the curve
        let mut bad_r = signature;
        bad_r.r8.x += Fp::one();
        assert!(!verify(&hasher, &pk, message, &bad_r));

        // S not reduced modulo the subgroup order
        let mut unreduced = signature;
        unreduced.s = -Fp::one();
        assert!(!verify(&hasher, &pk, message, &unreduced));
    }

    #[test]
    fn test_random_keys() {
        let hasher = Mimc7::new();
        for i in 0..4u64 {
            let sk = PrivateKey::random(&mut OsRng);
            let message = Fp::from(i);
            let signature = sk.sign(&hasher, message);
            assert!(verify(&hasher, &sk.public(), message, &signature));
        }
    }
}
