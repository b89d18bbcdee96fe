//! Datasets that can be saved into a workspace.
//!
//! Each kind knows its schema tag, the object id it is stored under and how
//! to build the payload the workspace service expects for that tag.

pub mod expression;
pub mod interaction;

pub use expression::{
    EXPRESSION_SAMPLE_TYPE, EXPRESSION_SERIES_TYPE, ExpressionSample, ExpressionSeries,
    save_expression_sample, save_expression_series,
};
pub use interaction::{Edge, INTERACTION_SET_TYPE, InteractionSet, save_interaction_set};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// A dataset ready to be stored.
///
/// Serialized with a `kind` tag, e.g.
/// `{"kind": "expression_series", "name": "...", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Dataset {
    ExpressionSample(ExpressionSample),
    ExpressionSeries(ExpressionSeries),
    InteractionSet(InteractionSet),
}

impl Dataset {
    /// Versioned type name the service stores the payload under.
    pub fn schema_tag(&self) -> &'static str {
        match self {
            Self::ExpressionSample(_) => EXPRESSION_SAMPLE_TYPE,
            Self::ExpressionSeries(_) => EXPRESSION_SERIES_TYPE,
            Self::InteractionSet(_) => INTERACTION_SET_TYPE,
        }
    }

    pub fn object_id(&self) -> &str {
        match self {
            Self::ExpressionSample(sample) => &sample.id,
            Self::ExpressionSeries(series) => &series.name,
            Self::InteractionSet(set) => &set.name,
        }
    }

    /// Builds a fresh payload for the save call.
    pub fn to_payload(&self) -> Result<Value> {
        match self {
            Self::ExpressionSample(sample) => sample.payload(),
            Self::ExpressionSeries(series) => series.payload(),
            Self::InteractionSet(set) => set.payload(),
        }
    }
}
