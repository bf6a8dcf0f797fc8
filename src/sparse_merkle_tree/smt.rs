use super::node::Node;
use crate::error::TreeError;
use crate::hash::FieldHasher;
use crate::utils::fp_bit;
use halo2_proofs::halo2curves::bn256::Fr as Fp;
use std::sync::Arc;

/// Number of key bits the trie can branch on.
pub const KEY_BITS: usize = 254;

/// Sparse Merkle tree over field-element keys.
///
/// The path of a key is its bit decomposition, least significant bit first. A
/// subtree that holds a single leaf is stored as that leaf, so a path ends as
/// soon as it reaches a leaf or an empty slot. Cloning a tree is cheap: nodes
/// are shared, and an insertion only rebuilds the path it touches.
#[derive(Clone, Debug)]
pub struct SparseMerkleTree<H: FieldHasher> {
    hasher: H,
    root: Arc<Node>,
    len: usize,
}

/// Outcome of a lookup. `siblings` lists the sibling hashes from the root down
/// to the slot where the search ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FindResult {
    pub key: Fp,
    pub found: bool,
    pub siblings: Vec<Fp>,
    pub found_value: Fp,
    /// Key of the leaf occupying the slot when the key is absent; the searched
    /// key itself when the slot is empty.
    pub not_found_key: Fp,
    pub not_found_value: Fp,
    /// The search ended on an empty slot.
    pub is_old0: bool,
}

/// Outcome of an insertion, carrying what is needed to prove it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InsertResult {
    pub key: Fp,
    pub value: Fp,
    pub old_root: Fp,
    pub new_root: Fp,
    /// Siblings of the slot the new leaf took over, as seen in the old tree.
    pub siblings: Vec<Fp>,
    pub is_old0: bool,
    pub old_key: Fp,
    pub old_value: Fp,
}

impl<H: FieldHasher> SparseMerkleTree<H> {
    pub fn new(hasher: H) -> Self {
        SparseMerkleTree {
            hasher,
            root: Arc::new(Node::Empty),
            len: 0,
        }
    }

    pub fn root(&self) -> Fp {
        self.root.hash()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    pub fn get(&self, key: Fp) -> Option<Fp> {
        let result = self.find(key);
        result.found.then_some(result.found_value)
    }

    pub fn find(&self, key: Fp) -> FindResult {
        let mut siblings = vec![];
        let mut node = &self.root;
        let mut level = 0;

        loop {
            match node.as_ref() {
                Node::Empty => {
                    return FindResult {
                        key,
                        found: false,
                        siblings,
                        found_value: Fp::zero(),
                        not_found_key: key,
                        not_found_value: Fp::zero(),
                        is_old0: true,
                    };
                }
                Node::Leaf {
                    key: leaf_key,
                    value,
                    ..
                } => {
                    let found = *leaf_key == key;
                    return FindResult {
                        key,
                        found,
                        siblings,
                        found_value: if found { *value } else { Fp::zero() },
                        not_found_key: if found { Fp::zero() } else { *leaf_key },
                        not_found_value: if found { Fp::zero() } else { *value },
                        is_old0: false,
                    };
                }
                Node::Middle { left, right, .. } => {
                    if fp_bit(&key, level) {
                        siblings.push(left.hash());
                        node = right;
                    } else {
                        siblings.push(right.hash());
                        node = left;
                    }
                    level += 1;
                }
            }
        }
    }

    /// Adds a new leaf. Existing keys are never overwritten; on error the tree is left as it was.
    pub fn insert(&mut self, key: Fp, value: Fp) -> Result<InsertResult, TreeError> {
        let found = self.find(key);
        if found.found {
            return Err(TreeError::KeyExists);
        }

        let old_root = self.root();
        let root = insert_node(&self.hasher, &self.root, key, value, 0)?;

        self.root = root;
        self.len += 1;

        Ok(InsertResult {
            key,
            value,
            old_root,
            new_root: self.root(),
            siblings: found.siblings,
            is_old0: found.is_old0,
            old_key: if found.is_old0 { Fp::zero() } else { found.not_found_key },
            old_value: if found.is_old0 { Fp::zero() } else { found.not_found_value },
        })
    }
}

fn insert_node<H: FieldHasher>(
    hasher: &H,
    node: &Arc<Node>,
    key: Fp,
    value: Fp,
    level: usize,
) -> Result<Arc<Node>, TreeError> {
    match node.as_ref() {
        Node::Empty => Ok(Node::leaf(hasher, key, value)),
        Node::Leaf { key: old_key, .. } => split(
            hasher,
            node.clone(),
            *old_key,
            Node::leaf(hasher, key, value),
            key,
            level,
        ),
        Node::Middle { left, right, .. } => {
            if fp_bit(&key, level) {
                let right = insert_node(hasher, right, key, value, level + 1)?;
                Ok(Node::middle(hasher, left.clone(), right))
            } else {
                let left = insert_node(hasher, left, key, value, level + 1)?;
                Ok(Node::middle(hasher, left, right.clone()))
            }
        }
    }
}

/// Pushes two leaves down until their keys diverge.
fn split<H: FieldHasher>(
    hasher: &H,
    old_leaf: Arc<Node>,
    old_key: Fp,
    new_leaf: Arc<Node>,
    new_key: Fp,
    level: usize,
) -> Result<Arc<Node>, TreeError> {
    if level >= KEY_BITS {
        return Err(TreeError::KeyBitsExhausted(KEY_BITS));
    }

    let old_bit = fp_bit(&old_key, level);
    let new_bit = fp_bit(&new_key, level);

    if old_bit == new_bit {
        let child = split(hasher, old_leaf, old_key, new_leaf, new_key, level + 1)?;
        let empty = Arc::new(Node::Empty);
        if new_bit {
            Ok(Node::middle(hasher, empty, child))
        } else {
            Ok(Node::middle(hasher, child, empty))
        }
    } else if new_bit {
        Ok(Node::middle(hasher, old_leaf, new_leaf))
    } else {
        Ok(Node::middle(hasher, new_leaf, old_leaf))
    }
}
