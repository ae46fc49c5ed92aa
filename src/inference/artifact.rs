//! Classifier Artifact - load and validate the exported model

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::tree::TreeNode;
use super::ModelLoadError;
use crate::models::FEATURE_LAYOUT;

/// Estimator exported from training
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Estimator {
    DecisionTree { tree: TreeNode },
    RandomForest { trees: Vec<TreeNode> },
}

impl Estimator {
    pub fn kind(&self) -> &'static str {
        match self {
            Estimator::DecisionTree { .. } => "decision_tree",
            Estimator::RandomForest { .. } => "random_forest",
        }
    }

    pub fn trees(&self) -> &[TreeNode] {
        match self {
            Estimator::DecisionTree { tree } => std::slice::from_ref(tree),
            Estimator::RandomForest { trees } => trees,
        }
    }
}

/// On-disk classifier document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub feature_names: Vec<String>,
    pub classes: Vec<String>,
    #[serde(flatten)]
    pub estimator: Estimator,
}

impl ModelArtifact {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ModelLoadError> {
        let artifact: ModelArtifact = serde_json::from_slice(bytes)?;
        artifact.validate()?;
        Ok(artifact)
    }

    fn validate(&self) -> Result<(), ModelLoadError> {
        if self.feature_names != FEATURE_LAYOUT {
            return Err(ModelLoadError::Invalid(format!(
                "feature names {:?} do not match layout {:?}",
                self.feature_names, FEATURE_LAYOUT
            )));
        }

        if self.classes.is_empty() {
            return Err(ModelLoadError::Invalid("artifact declares no classes".to_string()));
        }

        let trees = self.estimator.trees();
        if trees.is_empty() {
            return Err(ModelLoadError::Invalid("forest has no trees".to_string()));
        }

        for (i, tree) in trees.iter().enumerate() {
            tree.validate(self.classes.len())
                .map_err(|e| ModelLoadError::Invalid(format!("tree {}: {}", i, e)))?;
        }

        Ok(())
    }
}

/// Metadata about the loaded artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub path: String,
    pub kind: String,
    pub classes: Vec<String>,
    pub feature_names: Vec<String>,
    pub tree_count: usize,
    pub sha256: String,
    pub loaded_at: DateTime<Utc>,
}

/// Read, checksum and parse an artifact file
pub fn load_artifact(path: &Path) -> Result<(ModelArtifact, ModelInfo), ModelLoadError> {
    tracing::info!("Loading classifier artifact from: {}", path.display());

    let bytes = std::fs::read(path).map_err(|source| ModelLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let sha256 = format!("{:x}", Sha256::digest(&bytes));
    let artifact = ModelArtifact::from_slice(&bytes)?;

    let info = ModelInfo {
        path: path.display().to_string(),
        kind: artifact.estimator.kind().to_string(),
        classes: artifact.classes.clone(),
        feature_names: artifact.feature_names.clone(),
        tree_count: artifact.estimator.trees().len(),
        sha256,
        loaded_at: Utc::now(),
    };

    tracing::info!(
        "Classifier loaded: kind={} classes={} trees={} sha256={}",
        info.kind,
        info.classes.len(),
        info.tree_count,
        info.sha256
    );

    Ok((artifact, info))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const LAYOUT_JSON: &str =
        r#"["sepal length (cm)", "sepal width (cm)", "petal length (cm)", "petal width (cm)"]"#;

    fn write_artifact(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn forest_json(trees: &str) -> String {
        format!(
            r#"{{"kind": "random_forest", "feature_names": {}, "classes": ["a", "b"], "trees": {}}}"#,
            LAYOUT_JSON, trees
        )
    }

    #[test]
    fn test_load_decision_tree() {
        let json = format!(
            r#"{{"kind": "decision_tree", "feature_names": {}, "classes": ["a", "b"],
                "tree": {{"node": "leaf", "value": [1, 0]}}}}"#,
            LAYOUT_JSON
        );
        let file = write_artifact(&json);

        let (artifact, info) = load_artifact(file.path()).unwrap();
        assert_eq!(artifact.classes, vec!["a", "b"]);
        assert_eq!(info.kind, "decision_tree");
        assert_eq!(info.tree_count, 1);
        assert_eq!(info.sha256.len(), 64);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_artifact(&dir.path().join("clf_iris.json")).unwrap_err();
        assert!(matches!(err, ModelLoadError::Io { .. }));
    }

    #[test]
    fn test_garbage_is_format_error() {
        let file = write_artifact("not json at all");
        let err = load_artifact(file.path()).unwrap_err();
        assert!(matches!(err, ModelLoadError::Format(_)));
    }

    #[test]
    fn test_reordered_features_are_rejected() {
        let json = r#"{"kind": "decision_tree",
            "feature_names": ["sepal width (cm)", "sepal length (cm)", "petal length (cm)", "petal width (cm)"],
            "classes": ["a"], "tree": {"node": "leaf", "value": [1]}}"#;
        let err = ModelArtifact::from_slice(json.as_bytes()).unwrap_err();
        assert!(matches!(err, ModelLoadError::Invalid(_)));
    }

    #[test]
    fn test_empty_forest_is_rejected() {
        let err = ModelArtifact::from_slice(forest_json("[]").as_bytes()).unwrap_err();
        assert!(matches!(err, ModelLoadError::Invalid(_)));
    }

    #[test]
    fn test_leaf_width_must_match_classes() {
        let json = forest_json(r#"[{"node": "leaf", "value": [1, 0, 0]}]"#);
        let err = ModelArtifact::from_slice(json.as_bytes()).unwrap_err();
        assert!(matches!(err, ModelLoadError::Invalid(_)));
    }
}
