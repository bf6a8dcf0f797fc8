use crate::error::{Error, Result};
use crate::sparse_merkle_tree::KEY_BITS;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub const DEFAULT_PROOF_DEPTH: usize = 10;
pub const DEFAULT_DOMAIN_TAG: u64 = 1234123412341234;

/// Parameters shared by whoever builds and whoever validates root updates.
/// Both sides must agree on them, otherwise every signature and proof is refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolConfig {
    /// Number of siblings in every Merkle proof of a transaction.
    pub proof_depth: usize,
    /// First input of the hash that is signed, separating root updates from any other signed message.
    pub domain_tag: u64,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        ProtocolConfig {
            proof_depth: DEFAULT_PROOF_DEPTH,
            domain_tag: DEFAULT_DOMAIN_TAG,
        }
    }
}

impl ProtocolConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let config: ProtocolConfig = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.proof_depth == 0 || self.proof_depth > KEY_BITS {
            return Err(Error::Config(format!(
                "proof_depth must be within 1..={}, got {}",
                KEY_BITS, self.proof_depth
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProtocolConfig::default();
        assert_eq!(config.proof_depth, 10);
        assert_eq!(config.domain_tag, 1234123412341234);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ProtocolConfig = serde_json::from_str(r#"{"proof_depth": 16}"#).unwrap();
        assert_eq!(config.proof_depth, 16);
        assert_eq!(config.domain_tag, DEFAULT_DOMAIN_TAG);
    }

    #[test]
    fn test_invalid_depth() {
        for proof_depth in [0, KEY_BITS + 1] {
            let config = ProtocolConfig {
                proof_depth,
                ..Default::default()
            };
            assert!(matches!(config.validate(), Err(Error::Config(_))));
        }
    }

    #[test]
    fn test_from_json_file() {
        let path = std::env::temp_dir().join("relay_identity_config_test.json");
        std::fs::write(&path, r#"{"proof_depth": 12, "domain_tag": 7}"#).unwrap();

        let config = ProtocolConfig::from_json_file(&path).unwrap();
        assert_eq!(
            config,
            ProtocolConfig {
                proof_depth: 12,
                domain_tag: 7
            }
        );

        std::fs::write(&path, r#"{"proof_depth": 0}"#).unwrap();
        assert!(ProtocolConfig::from_json_file(&path).is_err());
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(
            ProtocolConfig::from_json_file("/nonexistent/relay.json"),
            Err(Error::Io(_))
        ));
    }
}
