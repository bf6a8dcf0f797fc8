#[cfg(test)]
mod test {

    use crate::claims::{
        build_key_claim, build_user_root_claim, sign_bit, ClaimType, IndexWord, KeyClaim,
        UserRootClaim, TOP_WORD_BITS,
    };
    use crate::eddsa::PrivateKey;
    use crate::error::MalformedInput;
    use crate::hash::{FieldHasher, Mimc7};
    use crate::utils::{big_uint_to_fp, fp_from_hex, modulus};
    use halo2_proofs::halo2curves::bn256::Fr as Fp;
    use num_bigint::BigUint;
    use rand::rngs::OsRng;

    #[test]
    fn test_user_root_claim_known_vector() {
        let hasher = Mimc7::new();
        let identity_id = fp_from_hex("0x393939393939393939393939393939393939393a").unwrap();
        let root =
            fp_from_hex("0x0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0c")
                .unwrap();

        let claim = build_user_root_claim(&hasher, identity_id, Fp::one(), 1, root).unwrap();

        assert_eq!(
            claim.hi(),
            fp_from_hex("0xf92abb8209409736929512c2018467a497ed35f409bb90579c62b9a4e0b2aa8")
                .unwrap()
        );
        assert_eq!(
            claim.hv(),
            fp_from_hex("0xad7edbf562757b1ad2282c44e2c248f95e9e6b09ba0d32809aa724fbf148e0c")
                .unwrap()
        );
    }

    #[test]
    fn test_user_root_claim_layout() {
        let hasher = Mimc7::new();
        let claim = build_user_root_claim(
            &hasher,
            Fp::from(1234u64),
            Fp::from(3u64),
            7,
            Fp::from(99u64),
        )
        .unwrap();

        let expected_i2 = BigUint::from(2u32)
            + (BigUint::from(7u32) << 64)
            + (BigUint::from(3u32) << 96);

        assert_eq!(claim.claim_type(), ClaimType::UserRoot);
        assert_eq!(claim.index().first(), Fp::from(1234u64));
        assert_eq!(claim.index().second(), big_uint_to_fp(&expected_i2).unwrap());
        assert_eq!(claim.value().first(), Fp::zero());
        assert_eq!(claim.value().second(), Fp::from(99u64));
        assert_eq!(claim.hi(), hasher.hash2(claim.index().first(), claim.index().second()));
        assert_eq!(claim.hv(), hasher.hash2(Fp::zero(), Fp::from(99u64)));

        let word = claim.index_word().unwrap();
        assert_eq!(word.claim_type, ClaimType::UserRoot);
        assert_eq!(word.sub_word, 7);
        assert_eq!(word.top_word, BigUint::from(3u32));
    }

    #[test]
    fn test_claims_are_deterministic() {
        let hasher = Mimc7::new();
        for _ in 0..4 {
            let pk = PrivateKey::random(&mut OsRng).public();
            assert_eq!(
                build_key_claim(&hasher, &pk, false),
                build_key_claim(&hasher, &pk, false)
            );
            assert_eq!(
                build_key_claim(&hasher, &pk, true),
                build_key_claim(&hasher, &pk, true)
            );

            let root = pk.x();
            assert_eq!(
                build_user_root_claim(&hasher, pk.y(), Fp::zero(), 3, root).unwrap(),
                build_user_root_claim(&hasher, pk.y(), Fp::zero(), 3, root).unwrap()
            );
        }
    }

    #[test]
    fn test_authorize_and_revoke_occupy_different_slots() {
        let hasher = Mimc7::new();
        for _ in 0..4 {
            let pk = PrivateKey::random(&mut OsRng).public();
            let authorize = KeyClaim::authorize(pk).build(&hasher);
            let revoke = KeyClaim::revoke(pk).build(&hasher);

            assert_ne!(authorize.hi(), revoke.hi());
            assert_eq!(authorize.hv(), revoke.hv());
            assert_eq!(authorize.index().first(), revoke.index().first());

            let two_pow_64 = big_uint_to_fp(&(BigUint::from(1u32) << 64)).unwrap();
            assert_eq!(revoke.index().second() - authorize.index().second(), two_pow_64);
        }
    }

    #[test]
    fn test_key_claim_layout() {
        let hasher = Mimc7::new();
        let pk = PrivateKey::from_bytes([7u8; 32]).public();
        let claim = build_key_claim(&hasher, &pk, true);

        let word = claim.index_word().unwrap();
        assert_eq!(word.claim_type, ClaimType::Key);
        assert_eq!(word.sub_word, 1);
        assert_eq!(word.top_word, BigUint::from(sign_bit(&pk.x()) as u8));
        assert_eq!(claim.index().first(), pk.y());
        assert_eq!(claim.hv(), hasher.hash2(Fp::zero(), Fp::zero()));
    }

    #[test]
    fn test_sign_bit() {
        let half = modulus() >> 1;
        assert!(!sign_bit(&Fp::zero()));
        assert!(!sign_bit(&big_uint_to_fp(&half).unwrap()));
        assert!(sign_bit(&big_uint_to_fp(&(&half + 1u32)).unwrap()));
        assert!(sign_bit(&-Fp::one()));
    }

    #[test]
    fn test_successive_versions_have_distinct_keys() {
        let hasher = Mimc7::new();
        let id = Fp::from(1234u64);
        let root = Fp::from(42u64);

        let keys = (0..8u32)
            .map(|version| build_user_root_claim(&hasher, id, Fp::zero(), version, root).unwrap().hi())
            .collect::<Vec<_>>();

        for i in 0..keys.len() {
            for j in i + 1..keys.len() {
                assert_ne!(keys[i], keys[j]);
            }
        }

        // same version in another era is another slot too
        assert_ne!(
            keys[0],
            build_user_root_claim(&hasher, id, Fp::one(), 0, root).unwrap().hi()
        );
    }

    #[test]
    fn test_index_word_round_trip() {
        let words = [
            IndexWord::new(ClaimType::Key, 0, BigUint::from(0u32)),
            IndexWord::new(ClaimType::Key, 1, BigUint::from(1u32)),
            IndexWord::new(ClaimType::UserRoot, u32::MAX, BigUint::from(5u32)),
            IndexWord::new(
                ClaimType::UserRoot,
                17,
                (BigUint::from(1u32) << TOP_WORD_BITS) - 1u32,
            ),
        ];

        for word in words {
            let packed = word.pack().unwrap();
            assert_eq!(IndexWord::unpack(packed).unwrap(), word);
        }
    }

    #[test]
    fn test_index_word_rejects_malformed() {
        let too_wide = IndexWord::new(ClaimType::UserRoot, 0, BigUint::from(1u32) << TOP_WORD_BITS);
        assert_eq!(
            too_wide.pack(),
            Err(MalformedInput::EraOutOfRange {
                bits: TOP_WORD_BITS
            })
        );

        // unknown claim type
        assert!(IndexWord::unpack(Fp::from(3u64)).is_err());
        assert!(IndexWord::unpack(Fp::zero()).is_err());
        // a word whose top bits exceed the top word width
        assert!(IndexWord::unpack(-Fp::one()).is_err());
    }

    #[test]
    fn test_user_root_claim_rejects_wide_era() {
        let hasher = Mimc7::new();
        let wide_era = big_uint_to_fp(&(BigUint::from(1u32) << TOP_WORD_BITS)).unwrap();

        assert!(matches!(
            UserRootClaim::new(Fp::one(), wide_era, 0, Fp::zero()).build(&hasher),
            Err(MalformedInput::EraOutOfRange { .. })
        ));
    }
}
