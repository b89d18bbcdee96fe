//! Gene expression datasets.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::Dataset;
use crate::error::{KbwsError, Result};
use crate::workspace::WorkspaceInstance;

pub const EXPRESSION_SAMPLE_TYPE: &str = "KBaseExpression.ExpressionSample-1.2";
pub const EXPRESSION_SERIES_TYPE: &str = "KBaseExpression.ExpressionSeries-1.0";

const SAMPLE_KIND: &str = "microarray";
const NUMERICAL_INTERPRETATION: &str = "undefined";
const UNKNOWN_SOURCE_DATE: &str = "unknown";

/// Expression levels measured under one condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionSample {
    pub id: String,
    /// Condition label, stored as the sample's `source_id`
    pub condition: String,
    /// Gene id to p-value
    pub gene_pvals: BTreeMap<String, f64>,
    pub genome_id: String,
}

#[derive(Serialize)]
struct ExpressionSampleRecord<'a> {
    id: &'a str,
    source_id: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    numerical_interpretation: &'static str,
    external_source_date: &'static str,
    expression_levels: &'a BTreeMap<String, f64>,
    genome_id: &'a str,
}

impl ExpressionSample {
    pub fn new(
        id: impl Into<String>,
        condition: impl Into<String>,
        gene_pvals: BTreeMap<String, f64>,
        genome_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            condition: condition.into(),
            gene_pvals,
            genome_id: genome_id.into(),
        }
    }

    /// Builds the stored sample.
    ///
    /// JSON has no NaN or infinity, so a non-finite p-value is an error
    /// rather than being written as `null`.
    pub(crate) fn payload(&self) -> Result<Value> {
        if let Some((gene, pval)) = self.gene_pvals.iter().find(|(_, v)| !v.is_finite()) {
            return Err(KbwsError::serialization(
                "JSON",
                format!(
                    "expression sample '{}' has non-finite p-value {} for gene '{}'",
                    self.id, pval, gene
                ),
            ));
        }

        let record = ExpressionSampleRecord {
            id: &self.id,
            source_id: &self.condition,
            kind: SAMPLE_KIND,
            numerical_interpretation: NUMERICAL_INTERPRETATION,
            external_source_date: UNKNOWN_SOURCE_DATE,
            expression_levels: &self.gene_pvals,
            genome_id: &self.genome_id,
        };
        Ok(serde_json::to_value(record)?)
    }
}

/// A named series of expression samples taken against one genome.
///
/// The stored schema can map several genomes to sample lists; a series built
/// here always carries exactly one genome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionSeries {
    pub name: String,
    pub source_file: String,
    pub genome_id: String,
    pub sample_ids: Vec<String>,
}

#[derive(Serialize)]
struct ExpressionSeriesRecord<'a> {
    id: &'a str,
    source_id: &'a str,
    external_source_date: &'static str,
    genome_expression_sample_ids_map: BTreeMap<&'a str, &'a [String]>,
}

impl ExpressionSeries {
    pub fn new(
        name: impl Into<String>,
        source_file: impl Into<String>,
        genome_id: impl Into<String>,
        sample_ids: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            source_file: source_file.into(),
            genome_id: genome_id.into(),
            sample_ids,
        }
    }

    pub(crate) fn payload(&self) -> Result<Value> {
        let record = ExpressionSeriesRecord {
            id: &self.name,
            source_id: &self.source_file,
            external_source_date: UNKNOWN_SOURCE_DATE,
            genome_expression_sample_ids_map: BTreeMap::from([(
                self.genome_id.as_str(),
                self.sample_ids.as_slice(),
            )]),
        };
        Ok(serde_json::to_value(record)?)
    }
}

/// Saves one expression sample; the condition becomes the sample's `source_id`.
pub async fn save_expression_sample(
    ws: &WorkspaceInstance,
    id: &str,
    condition: &str,
    gene_pvals: BTreeMap<String, f64>,
    genome_id: &str,
) -> Result<Value> {
    let sample = ExpressionSample::new(id, condition, gene_pvals, genome_id);
    ws.save_dataset(&Dataset::ExpressionSample(sample)).await
}

/// Saves an expression series under `name`.
///
/// `sample_ids` are ExpressionSample ids in KBase identifier format.
pub async fn save_expression_series(
    ws: &WorkspaceInstance,
    name: &str,
    source_file: &str,
    genome_id: &str,
    sample_ids: Vec<String>,
) -> Result<Value> {
    let series = ExpressionSeries::new(name, source_file, genome_id, sample_ids);
    ws.save_dataset(&Dataset::ExpressionSeries(series)).await
}
