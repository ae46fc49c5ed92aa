//! Inference Engine
//!
//! Loads the classifier once at startup and turns raw feature parameters
//! into labels. The model is immutable after load and shared read-only.

pub mod artifact;
pub mod tree;

use std::path::Path;

use crate::models::{FeatureFrame, FeatureParams, PredictionResponse, FEATURE_COUNT};

pub use artifact::{Estimator, ModelArtifact, ModelInfo};
pub use tree::TreeNode;

// ============================================================================
// ERRORS
// ============================================================================

/// Per-request failures
#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error("ParseError: {field} contains non-numeric token {token:?}")]
    Parse { field: String, token: String },

    #[error("ShapeError: feature columns have unequal lengths {lengths:?}")]
    Shape { lengths: Vec<usize> },

    #[error("MalformedInputError: {0}")]
    MalformedInput(String),
}

/// Startup failures, fatal to the process
#[derive(Debug, thiserror::Error)]
pub enum ModelLoadError {
    #[error("ModelLoadError: cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("ModelLoadError: artifact is not valid JSON: {0}")]
    Format(#[from] serde_json::Error),

    #[error("ModelLoadError: {0}")]
    Invalid(String),
}

// ============================================================================
// CLASSIFIER
// ============================================================================

pub trait Classifier: Send + Sync {
    /// One label per row of `frame`, in row order
    fn predict(&self, frame: &FeatureFrame) -> Vec<String>;
}

/// Loaded iris classifier
#[derive(Debug, Clone)]
pub struct IrisModel {
    artifact: ModelArtifact,
    info: ModelInfo,
}

impl IrisModel {
    pub fn load(path: &Path) -> Result<Self, ModelLoadError> {
        let (artifact, info) = artifact::load_artifact(path)?;
        Ok(Self { artifact, info })
    }

    pub fn info(&self) -> &ModelInfo {
        &self.info
    }

    fn predict_row(&self, sample: &[f64; FEATURE_COUNT]) -> usize {
        match &self.artifact.estimator {
            Estimator::DecisionTree { tree: root } => tree::argmax(root.leaf_value(sample)),
            Estimator::RandomForest { trees } => {
                let mut proba = vec![0.0; self.artifact.classes.len()];
                for t in trees {
                    for (acc, p) in proba.iter_mut().zip(tree::normalize(t.leaf_value(sample))) {
                        *acc += p;
                    }
                }
                tree::argmax(&proba)
            }
        }
    }
}

impl Classifier for IrisModel {
    fn predict(&self, frame: &FeatureFrame) -> Vec<String> {
        frame
            .rows()
            .map(|row| self.artifact.classes[self.predict_row(&row)].clone())
            .collect()
    }
}

// ============================================================================
// PREDICTION
// ============================================================================

/// Parse the four lists, run the classifier and join the labels
pub fn predict<C: Classifier + ?Sized>(
    model: &C,
    params: FeatureParams,
) -> Result<PredictionResponse, PredictError> {
    let frame = params.into_frame()?;
    let labels = model.predict(&frame);

    tracing::debug!("Predicted {} rows: {:?}", frame.len(), labels);

    Ok(PredictionResponse::from_labels(&labels))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iris_model() -> IrisModel {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("weights/clf_iris.json");
        IrisModel::load(&path).unwrap()
    }

    fn params(sep_len: &str, sep_wid: &str, pet_len: &str, pet_wid: &str) -> FeatureParams {
        FeatureParams {
            sep_len: sep_len.to_string(),
            sep_wid: sep_wid.to_string(),
            pet_len: pet_len.to_string(),
            pet_wid: pet_wid.to_string(),
        }
    }

    fn forest() -> IrisModel {
        let json = r#"{
            "kind": "random_forest",
            "feature_names": ["sepal length (cm)", "sepal width (cm)", "petal length (cm)", "petal width (cm)"],
            "classes": ["setosa", "versicolor"],
            "trees": [
                {"node": "leaf", "value": [10, 30]},
                {"node": "leaf", "value": [4, 1]},
                {"node": "leaf", "value": [1, 1]}
            ]
        }"#;
        let artifact = ModelArtifact::from_slice(json.as_bytes()).unwrap();
        let info = ModelInfo {
            path: "<memory>".to_string(),
            kind: artifact.estimator.kind().to_string(),
            classes: artifact.classes.clone(),
            feature_names: artifact.feature_names.clone(),
            tree_count: artifact.estimator.trees().len(),
            sha256: String::new(),
            loaded_at: chrono::Utc::now(),
        };
        IrisModel { artifact, info }
    }

    #[test]
    fn test_canonical_rows_reproduce_their_class() {
        let model = iris_model();
        let response = predict(
            &model,
            params("5.1,7.0,6.3", "3.5,3.2,3.3", "1.4,4.7,6.0", "0.2,1.4,2.5"),
        )
        .unwrap();
        assert_eq!(response.y_pred, "0,1,2");
    }

    #[test]
    fn test_label_count_matches_row_count() {
        let model = iris_model();
        let response = predict(
            &model,
            params(
                "5.1,4.9,6.4,5.8,7.7",
                "3.5,3.0,3.2,2.7,3.0",
                "1.4,1.4,4.5,5.1,6.1",
                "0.2,0.2,1.5,1.9,2.3",
            ),
        )
        .unwrap();
        assert_eq!(response.y_pred.split(',').count(), 5);
    }

    #[test]
    fn test_forest_averages_normalized_votes() {
        // Summed raw counts favour versicolor (15 vs 32), averaged
        // probabilities favour setosa (1.55 vs 1.45).
        let model = forest();
        let response = predict(&model, params("1", "1", "1", "1")).unwrap();
        assert_eq!(response.y_pred, "setosa");
    }

    #[test]
    fn test_errors_propagate_from_parsing() {
        let model = iris_model();
        assert!(matches!(
            predict(&model, params("a", "1", "1", "1")),
            Err(PredictError::Parse { .. })
        ));
        assert!(matches!(
            predict(&model, params("1,2", "1", "1,2", "1,2")),
            Err(PredictError::Shape { .. })
        ));
    }

    #[test]
    fn test_info_reports_shipped_artifact() {
        let model = iris_model();
        assert_eq!(model.info().kind, "decision_tree");
        assert_eq!(model.info().classes, ["0", "1", "2"]);
    }
}
