use crate::hash::FieldHasher;
use halo2_proofs::halo2curves::bn256::Fr as Fp;
use std::sync::Arc;

/// Hash of a leaf: `H(key, value, 1)`. The trailing `1` keeps leaves and inner nodes apart.
pub fn leaf_hash<H: FieldHasher>(hasher: &H, key: Fp, value: Fp) -> Fp {
    hasher.hash3(key, value, Fp::one())
}

pub fn middle_hash<H: FieldHasher>(hasher: &H, left: Fp, right: Fp) -> Fp {
    hasher.hash2(left, right)
}

/// Nodes are immutable and shared between tree versions.
#[derive(Debug)]
pub(crate) enum Node {
    Empty,
    Leaf {
        key: Fp,
        value: Fp,
        hash: Fp,
    },
    Middle {
        left: Arc<Node>,
        right: Arc<Node>,
        hash: Fp,
    },
}

impl Node {
    pub fn hash(&self) -> Fp {
        match self {
            Node::Empty => Fp::zero(),
            Node::Leaf { hash, .. } | Node::Middle { hash, .. } => *hash,
        }
    }

    pub fn leaf<H: FieldHasher>(hasher: &H, key: Fp, value: Fp) -> Arc<Node> {
        Arc::new(Node::Leaf {
            key,
            value,
            hash: leaf_hash(hasher, key, value),
        })
    }

    pub fn middle<H: FieldHasher>(hasher: &H, left: Arc<Node>, right: Arc<Node>) -> Arc<Node> {
        let hash = middle_hash(hasher, left.hash(), right.hash());
        Arc::new(Node::Middle { left, right, hash })
    }
}
