//! Decision Tree
//!
//! Nodes are exported from a fitted sklearn estimator. A split sends the
//! sample left when `x[feature] <= threshold`.

use serde::{Deserialize, Serialize};

use crate::models::FEATURE_COUNT;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
    Leaf {
        /// Per-class weight (sample counts or probabilities)
        value: Vec<f64>,
    },
}

impl TreeNode {
    /// Walk the tree and return the value of the reached leaf
    pub fn leaf_value(&self, sample: &[f64; FEATURE_COUNT]) -> &[f64] {
        let mut node = self;
        loop {
            match node {
                TreeNode::Split { feature, threshold, left, right } => {
                    node = if sample[*feature] <= *threshold { left.as_ref() } else { right.as_ref() };
                }
                TreeNode::Leaf { value } => return value,
            }
        }
    }

    /// Check feature indices and leaf widths before the tree is used
    pub fn validate(&self, class_count: usize) -> Result<(), String> {
        match self {
            TreeNode::Split { feature, left, right, .. } => {
                if *feature >= FEATURE_COUNT {
                    return Err(format!(
                        "split on feature {} but only {} features exist",
                        feature, FEATURE_COUNT
                    ));
                }
                left.validate(class_count)?;
                right.validate(class_count)
            }
            TreeNode::Leaf { value } => {
                if value.len() != class_count {
                    return Err(format!(
                        "leaf has {} class weights, expected {}",
                        value.len(),
                        class_count
                    ));
                }
                Ok(())
            }
        }
    }
}

/// Index of the largest weight; ties go to the lowest index
pub fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate().skip(1) {
        if *v > values[best] {
            best = i;
        }
    }
    best
}

/// Scale weights so they sum to one. All-zero leaves stay zero.
pub fn normalize(values: &[f64]) -> Vec<f64> {
    let total: f64 = values.iter().sum();
    if total > 0.0 {
        values.iter().map(|v| v / total).collect()
    } else {
        vec![0.0; values.len()]
    }
}
