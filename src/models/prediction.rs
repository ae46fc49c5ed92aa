//! Prediction response model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResponse {
    /// Labels joined with `,`, one per input row
    pub y_pred: String,
}

impl PredictionResponse {
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Self {
        let joined: Vec<&str> = labels.iter().map(AsRef::as_ref).collect();
        Self {
            y_pred: joined.join(","),
        }
    }
}
