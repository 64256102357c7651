mod collect;
mod parse;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::graph::GraphStore;

pub const PEOPLE_FILE: &str = "personnel.ndjson";
pub const PUBLICATIONS_FILE: &str = "publications.ndjson";

pub fn load_dataset(data_dir: &Path) -> Result<GraphStore> {
    let people = read_records::<parse::RawPerson>(&data_dir.join(PEOPLE_FILE))?;
    let publications = read_records::<parse::RawPublication>(&data_dir.join(PUBLICATIONS_FILE))?;

    let graph = collect::build_graph(people, publications)
        .with_context(|| format!("failed to build graph from {}", data_dir.display()))?;

    info!(
        data_dir = %data_dir.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "loaded dataset"
    );
    Ok(graph)
}

pub fn parse_dataset(people: &str, publications: &str) -> Result<GraphStore> {
    collect::build_graph(
        parse::parse_ndjson(people, PEOPLE_FILE)?,
        parse::parse_ndjson(publications, PUBLICATIONS_FILE)?,
    )
}

fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        warn!(path = %path.display(), "data file not found, treating as empty");
        return Ok(Vec::new());
    }

    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse::parse_ndjson(&raw, &path.display().to_string())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersonEntry {
    pub id: String,
    pub name: String,
    pub subteam: String,
}

pub fn people_directory(graph: &GraphStore) -> Vec<PersonEntry> {
    let mut entries = graph
        .people()
        .filter_map(|node| {
            let info = node.as_person()?;
            Some(PersonEntry {
                id: node.raw_id().to_owned(),
                name: node.label.clone(),
                subteam: info.subteam.clone(),
            })
        })
        .collect::<Vec<_>>();
    entries.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.id.cmp(&b.id))
    });
    entries
}
