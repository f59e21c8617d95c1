//! Random-forest classifier exported in scikit-learn's tree-array layout.
//!
//! Each tree is a set of parallel arrays indexed by node id. A node is a
//! leaf when both children are -1; otherwise samples with
//! `x[feature] <= threshold` go left. `value[node]` holds the class
//! distribution at the node (counts or fractions, normalized on use).
//!
//! The forest predicts the class with the highest mean leaf probability
//! across trees. Ties go to the earlier class.

use super::Classifier;
use crate::error::PredictionError;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

const LEAF: i64 = -1;

#[derive(Debug, Clone, Deserialize)]
pub struct DecisionTree {
    children_left: Vec<i64>,
    children_right: Vec<i64>,
    feature: Vec<i64>,
    threshold: Vec<f64>,
    value: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RandomForest {
    n_features: usize,
    classes: Vec<i64>,
    trees: Vec<DecisionTree>,
}

impl DecisionTree {
    fn node_count(&self) -> usize {
        self.children_left.len()
    }

    fn validate(&self, n_features: usize, n_classes: usize) -> Result<()> {
        let n = self.node_count();
        if n == 0 {
            anyhow::bail!("tree has no nodes");
        }
        if self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
            || self.value.len() != n
        {
            anyhow::bail!("tree arrays have mismatched lengths");
        }

        for node in 0..n {
            let (left, right) = (self.children_left[node], self.children_right[node]);
            if left == LEAF && right == LEAF {
                let dist = &self.value[node];
                if dist.len() != n_classes {
                    anyhow::bail!(
                        "leaf {} has {} class weights, expected {}",
                        node,
                        dist.len(),
                        n_classes
                    );
                }
                if dist.iter().any(|w| !w.is_finite() || *w < 0.0) || dist.iter().sum::<f64>() <= 0.0 {
                    anyhow::bail!("leaf {} has an invalid class distribution", node);
                }
                continue;
            }
            // Children always sit after their parent, which also rules out cycles.
            for child in [left, right] {
                if child <= node as i64 || child >= n as i64 {
                    anyhow::bail!("node {} has out-of-range child {}", node, child);
                }
            }
            let feature = self.feature[node];
            if feature < 0 || feature as usize >= n_features {
                anyhow::bail!("node {} splits on unknown feature {}", node, feature);
            }
            if self.threshold[node].is_nan() {
                anyhow::bail!("node {} has a NaN threshold", node);
            }
        }
        Ok(())
    }

    /// Leaf class distribution for `x`. Only valid on a validated tree.
    fn leaf_distribution(&self, x: &[f64]) -> &[f64] {
        let mut node = 0usize;
        while self.children_left[node] != LEAF {
            let feature = self.feature[node] as usize;
            node = if x[feature] <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        &self.value[node]
    }
}

impl RandomForest {
    pub fn from_json(json: &str) -> Result<Self> {
        let forest: RandomForest =
            serde_json::from_str(json).context("failed to parse classifier JSON")?;
        forest.validate()?;
        Ok(forest)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read classifier: {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("in {}", path.display()))
    }

    fn validate(&self) -> Result<()> {
        if self.classes.is_empty() {
            anyhow::bail!("classifier has no classes");
        }
        if self.trees.is_empty() {
            anyhow::bail!("classifier has no trees");
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features, self.classes.len())
                .with_context(|| format!("tree {}", i))?;
        }
        Ok(())
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Mean class probabilities across all trees, in `classes` order.
    pub fn predict_proba(&self, x: &[f64]) -> Vec<f64> {
        let mut proba = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            let dist = tree.leaf_distribution(x);
            let total: f64 = dist.iter().sum();
            for (p, w) in proba.iter_mut().zip(dist) {
                *p += w / total;
            }
        }
        let n = self.trees.len() as f64;
        proba.iter_mut().for_each(|p| *p /= n);
        proba
    }
}

impl Classifier for RandomForest {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, features: &[f64]) -> Result<i64, PredictionError> {
        if features.len() != self.n_features {
            return Err(PredictionError::Classifier(format!(
                "expected {} features, got {}",
                self.n_features,
                features.len()
            )));
        }
        if let Some(i) = features.iter().position(|v| !v.is_finite()) {
            return Err(PredictionError::Classifier(format!(
                "feature {} is not finite ({})",
                i, features[i]
            )));
        }

        let proba = self.predict_proba(features);
        let mut best = 0;
        for (i, p) in proba.iter().enumerate() {
            if *p > proba[best] {
                best = i;
            }
        }
        Ok(self.classes[best])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single split on feature 1: <= 5.0 -> class 0, else class 1.
    const STUMP: &str = r#"{
        "n_features": 2,
        "classes": [0, 1],
        "trees": [{
            "children_left":  [1, -1, -1],
            "children_right": [2, -1, -1],
            "feature":        [1, -2, -2],
            "threshold":      [5.0, -2.0, -2.0],
            "value":          [[5, 5], [4, 1], [1, 4]]
        }]
    }"#;

    fn stump_tree(left: [f64; 2], right: [f64; 2]) -> DecisionTree {
        DecisionTree {
            children_left: vec![1, -1, -1],
            children_right: vec![2, -1, -1],
            feature: vec![0, -2, -2],
            threshold: vec![0.5, -2.0, -2.0],
            value: vec![vec![1.0, 1.0], left.to_vec(), right.to_vec()],
        }
    }

    #[test]
    fn test_stump_predicts_by_threshold() {
        let forest = RandomForest::from_json(STUMP).unwrap();
        assert_eq!(forest.predict(&[0.0, 5.0]).unwrap(), 0);
        assert_eq!(forest.predict(&[0.0, 5.01]).unwrap(), 1);
        let proba = forest.predict_proba(&[0.0, 1.0]);
        assert!((proba[0] - 0.8).abs() < 1e-12);
        assert!((proba[1] - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_forest_averages_normalized_trees() {
        // Tree A is confident in class 1 (counts), tree B mildly prefers class 0.
        let forest = RandomForest {
            n_features: 1,
            classes: vec![0, 1],
            trees: vec![
                stump_tree([0.0, 100.0], [0.0, 100.0]),
                stump_tree([0.6, 0.4], [0.6, 0.4]),
            ],
        };
        forest.validate().unwrap();
        let proba = forest.predict_proba(&[0.0]);
        assert!((proba[1] - 0.7).abs() < 1e-12);
        assert_eq!(forest.predict(&[0.0]).unwrap(), 1);
    }

    #[test]
    fn test_tie_goes_to_first_class() {
        let forest = RandomForest {
            n_features: 1,
            classes: vec![0, 1],
            trees: vec![stump_tree([1.0, 1.0], [1.0, 1.0])],
        };
        assert_eq!(forest.predict(&[3.0]).unwrap(), 0);
    }

    #[test]
    fn test_wrong_feature_count() {
        let forest = RandomForest::from_json(STUMP).unwrap();
        let err = forest.predict(&[1.0]).unwrap_err();
        assert!(matches!(err, PredictionError::Classifier(_)));
    }

    #[test]
    fn test_non_finite_feature_rejected() {
        let forest = RandomForest::from_json(STUMP).unwrap();
        assert!(forest.predict(&[0.0, f64::NAN]).is_err());
        assert!(forest.predict(&[f64::INFINITY, 0.0]).is_err());
    }

    #[test]
    fn test_rejects_backward_child() {
        let json = STUMP.replace(r#""children_left":  [1, -1, -1]"#, r#""children_left":  [0, -1, -1]"#);
        let err = RandomForest::from_json(&json).unwrap_err();
        assert!(format!("{:#}", err).contains("out-of-range child"));
    }

    #[test]
    fn test_rejects_unknown_feature() {
        let json = STUMP.replace(r#""feature":        [1, -2, -2]"#, r#""feature":        [7, -2, -2]"#);
        assert!(RandomForest::from_json(&json).is_err());
    }

    #[test]
    fn test_rejects_leaf_with_wrong_class_count() {
        let json = STUMP.replace("[4, 1]", "[4, 1, 0]");
        assert!(RandomForest::from_json(&json).is_err());
    }

    #[test]
    fn test_rejects_empty_forest() {
        let json = r#"{"n_features": 9, "classes": [0, 1], "trees": []}"#;
        assert!(RandomForest::from_json(json).is_err());
    }
}
