//! Feature Layout and Parsing
//!
//! Column order is fixed: the classifier reads features by position,
//! so `FEATURE_LAYOUT[i]` is the i-th input of every sample.

use serde::{Deserialize, Serialize};

use crate::inference::PredictError;

// ============================================================================
// FEATURE LAYOUT
// ============================================================================

/// Column names in the exact order the classifier expects them
pub const FEATURE_LAYOUT: [&str; FEATURE_COUNT] = [
    "sepal length (cm)",
    "sepal width (cm)",
    "petal length (cm)",
    "petal width (cm)",
];

pub const FEATURE_COUNT: usize = 4;

// ============================================================================
// RAW PARAMETERS
// ============================================================================

/// The four comma-separated lists as they arrive over the wire.
///
/// Used for both the query string and the JSON mapping in the `input` form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureParams {
    #[serde(rename = "sepLen")]
    pub sep_len: String,
    #[serde(rename = "sepWid")]
    pub sep_wid: String,
    #[serde(rename = "petLen")]
    pub pet_len: String,
    #[serde(rename = "petWid")]
    pub pet_wid: String,
}

impl FeatureParams {
    /// Build from raw query pairs. The first occurrence of a repeated key wins.
    pub fn from_query_pairs(pairs: Vec<(String, String)>) -> Result<Self, PredictError> {
        let lookup = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
                .ok_or_else(|| PredictError::MalformedInput(format!("missing parameter `{}`", key)))
        };

        Ok(Self {
            sep_len: lookup("sepLen")?,
            sep_wid: lookup("sepWid")?,
            pet_len: lookup("petLen")?,
            pet_wid: lookup("petWid")?,
        })
    }

    /// Parse every list and assemble them into a frame
    pub fn into_frame(self) -> Result<FeatureFrame, PredictError> {
        let columns = [
            parse_float_list("sepLen", &self.sep_len)?,
            parse_float_list("sepWid", &self.sep_wid)?,
            parse_float_list("petLen", &self.pet_len)?,
            parse_float_list("petWid", &self.pet_wid)?,
        ];

        FeatureFrame::from_columns(columns)
    }
}

/// Split on `,` and parse each token as `f64`.
///
/// Whitespace around a token is ignored. An empty input is a single empty
/// token and fails like any other non-numeric token.
pub fn parse_float_list(field: &str, raw: &str) -> Result<Vec<f64>, PredictError> {
    raw.split(',')
        .map(|token| {
            token.trim().parse::<f64>().map_err(|_| PredictError::Parse {
                field: field.to_string(),
                token: token.to_string(),
            })
        })
        .collect()
}

// ============================================================================
// FEATURE FRAME
// ============================================================================

/// Columnar record of samples, one column per entry of `FEATURE_LAYOUT`
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureFrame {
    columns: [Vec<f64>; FEATURE_COUNT],
}

impl FeatureFrame {
    /// Build a frame from columns in layout order.
    ///
    /// Columns of unequal length cannot form rows and are rejected.
    pub fn from_columns(columns: [Vec<f64>; FEATURE_COUNT]) -> Result<Self, PredictError> {
        let rows = columns[0].len();
        if columns.iter().any(|c| c.len() != rows) {
            return Err(PredictError::Shape {
                lengths: columns.iter().map(Vec::len).collect(),
            });
        }

        Ok(Self { columns })
    }

    pub fn len(&self) -> usize {
        self.columns[0].len()
    }

    /// Samples in input order
    pub fn rows(&self) -> impl Iterator<Item = [f64; FEATURE_COUNT]> + '_ {
        (0..self.len()).map(move |i| std::array::from_fn(|f| self.columns[f][i]))
    }
}
