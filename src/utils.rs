use crate::error::MalformedInput;
use halo2_proofs::halo2curves::{bn256::Fr as Fp, group::ff::PrimeField};
use num_bigint::BigUint;
use std::sync::OnceLock;

// modulus from bn256 curve impl => https://github.com/privacy-scaling-explorations/halo2curves/blob/main/src/bn256/fr.rs#L38
pub const MODULUS_STR: &str = "30644e72e131a029b85045b68181585d2833e84879b9709143e1f593f0000001";

/// The scalar field modulus `q` as an integer.
pub fn modulus() -> &'static BigUint {
    static MODULUS: OnceLock<BigUint> = OnceLock::new();
    MODULUS.get_or_init(|| {
        BigUint::parse_bytes(MODULUS_STR.as_bytes(), 16).unwrap_or_else(|| unreachable!())
    })
}

/// Converts a field element to its canonical integer representation.
pub fn fp_to_big_uint(fp: &Fp) -> BigUint {
    BigUint::from_bytes_le(fp.to_repr().as_ref())
}

/// Converts an integer to a field element, refusing anything outside `[0, q)`.
pub fn big_uint_to_fp(value: &BigUint) -> Result<Fp, MalformedInput> {
    if value >= modulus() {
        return Err(MalformedInput::NotInField(format!("0x{}", value.to_str_radix(16))));
    }

    let mut bytes = value.to_bytes_le();
    bytes.resize(32, 0);

    let mut repr = <Fp as PrimeField>::Repr::default();
    repr.as_mut().copy_from_slice(&bytes);

    Option::from(Fp::from_repr(repr))
        .ok_or_else(|| MalformedInput::NotInField(format!("0x{}", value.to_str_radix(16))))
}

/// Converts an integer to a field element after reducing it modulo `q`.
pub fn big_uint_to_fp_reduced(value: &BigUint) -> Fp {
    let reduced = value % modulus();
    big_uint_to_fp(&reduced).unwrap_or_else(|_| unreachable!("reduced value is below the modulus"))
}

/// Parses a `0x`-prefixed (or bare) big-endian hex string. Odd lengths are accepted.
pub fn fp_from_hex(hex_str: &str) -> Result<Fp, MalformedInput> {
    let digits = hex_str.strip_prefix("0x").unwrap_or(hex_str);
    let padded = if digits.len() % 2 == 1 {
        format!("0{}", digits)
    } else {
        digits.to_string()
    };

    let bytes =
        hex::decode(&padded).map_err(|_| MalformedInput::NotInField(hex_str.to_string()))?;
    if bytes.len() > 32 {
        return Err(MalformedInput::NotInField(hex_str.to_string()));
    }

    big_uint_to_fp(&BigUint::from_bytes_be(&bytes))
}

/// Big-endian, zero padded, `0x`-prefixed hex.
pub fn fp_to_hex(fp: &Fp) -> String {
    let mut bytes = fp.to_repr().as_ref().to_vec();
    bytes.reverse();
    format!("0x{}", hex::encode(bytes))
}

/// Bit `index` of the canonical representation, least significant bit first.
pub fn fp_bit(fp: &Fp, index: usize) -> bool {
    let repr = fp.to_repr();
    let bytes = repr.as_ref();
    match bytes.get(index / 8) {
        Some(byte) => (byte >> (index % 8)) & 1 == 1,
        None => false,
    }
}

/// Serde adapters that encode field elements as hex strings.
pub mod serde_fp {
    use super::{fp_from_hex, fp_to_hex, Fp};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(fp: &Fp, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&fp_to_hex(fp))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Fp, D::Error> {
        let hex_str = String::deserialize(deserializer)?;
        fp_from_hex(&hex_str).map_err(de::Error::custom)
    }

    pub mod vec {
        use super::{fp_from_hex, fp_to_hex, Fp};
        use serde::{de, Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(values: &[Fp], serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(values.iter().map(fp_to_hex))
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Fp>, D::Error> {
            Vec::<String>::deserialize(deserializer)?
                .iter()
                .map(|hex_str| fp_from_hex(hex_str))
                .collect::<Result<Vec<_>, _>>()
                .map_err(de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_big_uint_conversion() {
        let fp = big_uint_to_fp(&BigUint::from(3u32)).unwrap();
        assert_eq!(fp, 3.into());

        let over_64 = BigUint::from(18446744073709551616_u128);
        let fp_2 = big_uint_to_fp(&over_64).unwrap();
        assert_eq!(fp_to_big_uint(&fp_2), over_64);

        let fp_3 = fp_2 - fp;
        assert_eq!(fp_3, 18446744073709551613.into());
    }

    #[test]
    fn test_modulus_is_rejected() {
        assert!(big_uint_to_fp(modulus()).is_err());
        assert_eq!(big_uint_to_fp_reduced(modulus()), Fp::zero());

        let q_minus_one = modulus() - 1u32;
        assert_eq!(big_uint_to_fp(&q_minus_one).unwrap(), -Fp::one());
    }

    #[test]
    fn test_hex_round_trip() {
        let fp = Fp::from(0x0b0b0c_u64);
        let hex_str = fp_to_hex(&fp);
        assert_eq!(hex_str.len(), 66);
        assert!(hex_str.ends_with("0b0b0c"));
        assert_eq!(fp_from_hex(&hex_str).unwrap(), fp);

        // odd number of digits
        assert_eq!(fp_from_hex("0xb0b0c").unwrap(), fp);

        assert!(fp_from_hex(&format!("0x{}", MODULUS_STR)).is_err());
        assert!(fp_from_hex("0xzz").is_err());
    }

    #[test]
    fn test_bits() {
        let fp = Fp::from(0b1010_u64);
        assert!(!fp_bit(&fp, 0));
        assert!(fp_bit(&fp, 1));
        assert!(!fp_bit(&fp, 2));
        assert!(fp_bit(&fp, 3));
        assert!(!fp_bit(&fp, 300));
    }
}
