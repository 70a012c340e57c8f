//! Decision tree structures for ensemble inference
//!
//! Trees are stored as flat node arrays with index links; node 0 is the
//! root. Structure is validated once at artifact load, so traversal can
//! assume well-formed links.

use serde::{Deserialize, Serialize};

/// A decision tree node (internal or leaf)
///
/// For internal nodes:
/// - `feature_idx >= 0`: index into the feature vector
/// - `left` and `right` point to child node indices
/// - `leaf` is `None`
///
/// For leaf nodes:
/// - `feature_idx == -1`
/// - `leaf` contains the prediction value
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Node {
    /// Node ID (for reference, not used in traversal)
    pub id: i32,

    /// Left child index (-1 for leaf nodes)
    pub left: i32,

    /// Right child index (-1 for leaf nodes)
    pub right: i32,

    /// Feature index to split on (-1 for leaf nodes)
    pub feature_idx: i32,

    /// Split threshold
    pub threshold: f64,

    /// Leaf value (Some for leaf nodes, None for internal nodes)
    pub leaf: Option<f64>,
}

impl Node {
    /// Create a new internal (split) node
    pub fn internal(id: i32, feature_idx: i32, threshold: f64, left: i32, right: i32) -> Self {
        Self {
            id,
            left,
            right,
            feature_idx,
            threshold,
            leaf: None,
        }
    }

    /// Create a new leaf node
    pub fn leaf(id: i32, value: f64) -> Self {
        Self {
            id,
            left: -1,
            right: -1,
            feature_idx: -1,
            threshold: 0.0,
            leaf: Some(value),
        }
    }

    /// Check if this node is a leaf
    pub fn is_leaf(&self) -> bool {
        self.feature_idx == -1 || self.leaf.is_some()
    }
}

/// A single decision tree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tree {
    /// Tree nodes (node 0 is the root)
    pub nodes: Vec<Node>,

    /// Tree weight for ensemble aggregation
    pub weight: f64,
}

impl Tree {
    /// Create a new tree with the given nodes and weight
    pub fn new(nodes: Vec<Node>, weight: f64) -> Self {
        Self { nodes, weight }
    }

    /// Evaluate this tree on a feature vector.
    ///
    /// Takes the left branch when `feature < threshold` (the XGBoost
    /// `yes` branch); the comparison direction is part of the frozen
    /// artifact contract.
    pub fn evaluate(&self, features: &[f64]) -> f64 {
        let mut idx = 0usize;

        loop {
            let node = &self.nodes[idx];

            if node.is_leaf() {
                return node.leaf.unwrap_or(0.0);
            }

            let value = features[node.feature_idx as usize];
            idx = if value < node.threshold {
                node.left as usize
            } else {
                node.right as usize
            };
        }
    }

    /// Validate tree structure against the model's feature width.
    pub fn validate(&self, num_features: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }
        if !self.weight.is_finite() {
            return Err(format!("tree weight {} is not finite", self.weight));
        }

        for (i, node) in self.nodes.iter().enumerate() {
            if node.is_leaf() {
                match node.leaf {
                    None => return Err(format!("leaf node {i} has no leaf value")),
                    Some(value) if !value.is_finite() => {
                        return Err(format!("leaf node {i} has non-finite value {value}"))
                    }
                    Some(_) => {}
                }
            } else {
                // Child links must point strictly forward so traversal
                // always terminates; a link back to the node itself or an
                // ancestor would loop forever in `evaluate`.
                if node.left as usize <= i || node.left as usize >= self.nodes.len() {
                    return Err(format!("node {i} has invalid left child: {}", node.left));
                }
                if node.right as usize <= i || node.right as usize >= self.nodes.len() {
                    return Err(format!("node {i} has invalid right child: {}", node.right));
                }
                if node.feature_idx < 0 || node.feature_idx as usize >= num_features {
                    return Err(format!(
                        "node {i} splits on feature {} outside width {num_features}",
                        node.feature_idx
                    ));
                }
                if !node.threshold.is_finite() {
                    return Err(format!("node {i} has non-finite threshold"));
                }
            }
        }

        Ok(())
    }
}
