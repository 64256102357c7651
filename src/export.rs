use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::filter::{FilterCriteria, FilterSummary};
use crate::graph::GraphStore;
use crate::layout::RingLayout;

#[derive(Clone, Debug, Serialize)]
pub struct NodeSnapshot {
    pub id: String,
    pub kind: &'static str,
    pub label: String,
    pub hidden: bool,
    pub size: u32,
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub fixed: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct EdgeSnapshot {
    pub id: String,
    pub person: String,
    pub publication: String,
    pub hidden: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct SnapshotSummary {
    pub criteria: FilterCriteria,
    pub filter: FilterSummary,
    pub layout: RingLayout,
}

#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    pub nodes: Vec<NodeSnapshot>,
    pub edges: Vec<EdgeSnapshot>,
    pub summary: SnapshotSummary,
}

impl Snapshot {
    pub fn capture(
        graph: &GraphStore,
        criteria: &FilterCriteria,
        filter: FilterSummary,
        layout: RingLayout,
    ) -> Self {
        let nodes = graph
            .nodes()
            .iter()
            .map(|node| NodeSnapshot {
                id: node.id.clone(),
                kind: node.kind().label(),
                label: node.label.clone(),
                hidden: node.hidden,
                size: node.size,
                x: node.position.map(|point| point.x),
                y: node.position.map(|point| point.y),
                fixed: node.fixed,
            })
            .collect();

        let edges = graph
            .edges()
            .iter()
            .map(|edge| EdgeSnapshot {
                id: edge.id.clone(),
                person: edge.person.clone(),
                publication: edge.publication.clone(),
                hidden: edge.hidden,
            })
            .collect();

        Self {
            nodes,
            edges,
            summary: SnapshotSummary {
                criteria: criteria.clone(),
                filter,
                layout,
            },
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize snapshot")
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
    }
}
