//! Interaction networks (STRING networks, operons and the like).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::Dataset;
use crate::error::{KbwsError, Result};
use crate::workspace::WorkspaceInstance;

pub const INTERACTION_SET_TYPE: &str = "KBaseNetworks.InteractionSet-1.0";

/// Name under which each edge weight is stored.
pub const EDGE_SCORE_NAME: &str = "pval";

const SET_DESCRIPTION: &str = "my network";
const SET_TYPE: &str = "somenetwork";
const SOURCE_REFERENCE: &str = "N/A";
const SOURCE_DESCRIPTION: &str = "some description";

/// Weighted edge between two nodes, written as `[node1, node2, weight]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge(pub String, pub String, pub f64);

impl Edge {
    pub fn new(node1: impl Into<String>, node2: impl Into<String>, weight: f64) -> Self {
        Self(node1.into(), node2.into(), weight)
    }
}

/// A named set of interactions of one network type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionSet {
    pub name: String,
    /// Type recorded on every interaction
    pub network_type: String,
    pub edges: Vec<Edge>,
}

#[derive(Serialize)]
struct InteractionSetRecord<'a> {
    id: &'a str,
    name: &'a str,
    description: &'static str,
    #[serde(rename = "type")]
    kind: &'static str,
    source: DatasetSourceRecord,
    interactions: Vec<InteractionRecord<'a>>,
}

#[derive(Serialize)]
struct DatasetSourceRecord {
    id: String,
    name: String,
    reference: &'static str,
    description: &'static str,
    resource_url: String,
}

impl DatasetSourceRecord {
    fn new(id: String, description: &'static str, resource_url: String) -> Self {
        Self {
            name: id.clone(),
            id,
            reference: SOURCE_REFERENCE,
            description,
            resource_url,
        }
    }
}

#[derive(Serialize)]
struct InteractionRecord<'a> {
    id: String,
    #[serde(rename = "type")]
    kind: &'a str,
    entity1_id: &'a str,
    entity2_id: &'a str,
    scores: BTreeMap<&'static str, f64>,
}

impl InteractionSet {
    pub fn new(name: impl Into<String>, network_type: impl Into<String>, edges: Vec<Edge>) -> Self {
        Self {
            name: name.into(),
            network_type: network_type.into(),
            edges,
        }
    }

    /// Interactions are emitted in edge order; `edge-<i>` ids encode the position.
    pub(crate) fn payload(&self) -> Result<Value> {
        // A NaN or infinite weight would serialize as null.
        if let Some((i, Edge(node1, node2, weight))) = self
            .edges
            .iter()
            .enumerate()
            .find(|(_, edge)| !edge.2.is_finite())
        {
            return Err(KbwsError::serialization(
                "JSON",
                format!(
                    "interaction set '{}' has non-finite weight {} on edge-{} ({} - {})",
                    self.name, weight, i, node1, node2
                ),
            ));
        }

        let interactions = self
            .edges
            .iter()
            .enumerate()
            .map(|(i, Edge(node1, node2, weight))| InteractionRecord {
                id: format!("edge-{i}"),
                kind: &self.network_type,
                entity1_id: node1,
                entity2_id: node2,
                scores: BTreeMap::from([(EDGE_SCORE_NAME, *weight)]),
            })
            .collect();

        let record = InteractionSetRecord {
            id: &self.name,
            name: &self.name,
            description: SET_DESCRIPTION,
            kind: SET_TYPE,
            source: DatasetSourceRecord::new(
                format!("{}-source", self.name),
                SOURCE_DESCRIPTION,
                String::new(),
            ),
            interactions,
        };
        Ok(serde_json::to_value(record)?)
    }
}

/// Saves an interaction set under `name`.
pub async fn save_interaction_set(
    ws: &WorkspaceInstance,
    name: &str,
    network_type: &str,
    edges: Vec<Edge>,
) -> Result<Value> {
    let set = InteractionSet::new(name, network_type, edges);
    ws.save_dataset(&Dataset::InteractionSet(set)).await
}
