use thiserror::Error;

/// Result type used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Every way a claim, a proof bundle or a root-update transaction can be refused.
/// None of these are fatal to the process: a failure only means the transaction
/// is rejected and no tree was mutated.
#[derive(Debug, Error)]
pub enum Error {
    /// The input could not be interpreted at all; rejected before any hashing.
    #[error("malformed input: {0}")]
    Malformed(#[from] MalformedInput),

    /// The signature does not verify for the supplied signer and message.
    #[error("signature invalid")]
    InvalidSignature,

    /// A relation between the parts of the bundle does not hold.
    #[error("constraint violated: {0}")]
    Constraint(#[from] Constraint),

    #[error("tree error: {0}")]
    Tree(#[from] TreeError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("circuit error: {0}")]
    Circuit(#[from] halo2_proofs::plonk::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedInput {
    #[error("value is not a canonical field element: {0}")]
    NotInField(String),

    #[error("proof has {found} siblings, expected {expected}")]
    WrongProofDepth { expected: usize, found: usize },

    #[error("proof needs {needed} levels, only {depth} are available")]
    ProofTooDeep { depth: usize, needed: usize },

    #[error("era does not fit in {bits} bits")]
    EraOutOfRange { bits: u64 },

    #[error("claim index word is not well formed: {0}")]
    IndexWord(&'static str),

    #[error("version counter overflow")]
    VersionOverflow,

    #[error("bootstrap transaction must not carry a pointer inclusion proof")]
    UnexpectedPointerProof,

    #[error("transaction after bootstrap must carry a pointer inclusion proof")]
    MissingPointerProof,
}

/// Named relations checked by the evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Constraint {
    #[error("version mismatch: expected {expected}, got {found}")]
    VersionMismatch { expected: u32, found: u32 },

    #[error("previous version mismatch: expected {expected:?}, got {found:?}")]
    PreviousVersionMismatch {
        expected: Option<u32>,
        found: Option<u32>,
    },

    #[error("signing key not authorized")]
    SigningKeyNotAuthorized,

    #[error("signing key revoked")]
    SigningKeyRevoked,

    #[error("stale relay root")]
    StaleRelayRoot,

    #[error("user tree transition does not match the published roots")]
    UserTreeTransition,

    #[error("relay tree transition does not match the published roots")]
    RelayTreeTransition,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("key already exists")]
    KeyExists,

    #[error("keys collide on all {0} bits")]
    KeyBitsExhausted(usize),
}

impl Error {
    /// The violated relation, if this is a constraint failure.
    pub fn constraint(&self) -> Option<&Constraint> {
        match self {
            Error::Constraint(c) => Some(c),
            _ => None,
        }
    }
}
