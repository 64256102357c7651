use std::collections::{HashMap, HashSet};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use super::parse::{RawPerson, RawPublication};
use crate::graph::{GraphStore, Node, NodeKind, PersonInfo, PublicationInfo};
use crate::util::{person_node_id, publication_node_id};

#[derive(Default)]
struct AuthorIndex {
    by_id: HashMap<String, String>,
    by_name: HashMap<String, String>,
    names: HashMap<String, String>,
    pis: HashSet<String>,
}

impl AuthorIndex {
    fn register(&mut self, raw_id: &str, node_id: &str, name: &str, pi: bool) {
        self.by_id.insert(raw_id.to_owned(), node_id.to_owned());
        let key = name.trim().to_lowercase();
        if !key.is_empty() {
            self.by_name.entry(key).or_insert_with(|| node_id.to_owned());
        }
        self.names.insert(node_id.to_owned(), name.to_owned());
        if pi {
            self.pis.insert(node_id.to_owned());
        }
    }

    fn resolve(&self, author: &str) -> Option<&str> {
        self.by_id
            .get(author)
            .or_else(|| self.by_name.get(&author.trim().to_lowercase()))
            .map(String::as_str)
    }
}

pub(super) fn build_graph(
    people: Vec<RawPerson>,
    publications: Vec<RawPublication>,
) -> Result<GraphStore> {
    let mut graph = GraphStore::new();
    let mut authors = AuthorIndex::default();

    for person in people {
        if person.id.is_empty() {
            warn!(name = %person.name, "skipping person without an id");
            continue;
        }

        let node_id = person_node_id(&person.id);
        if graph.index_of(&node_id).is_some() {
            warn!(id = %person.id, "skipping duplicate person");
            continue;
        }

        let name = if person.name.is_empty() {
            person.id.clone()
        } else {
            person.name.clone()
        };
        authors.register(&person.id, &node_id, &name, person.pi);

        let info = PersonInfo {
            name: name.clone(),
            subteam: person.subteam,
            pi: person.pi,
        };
        graph
            .add_node(Node::person(&person.id, name, info))
            .with_context(|| format!("failed to add person {}", person.id))?;
    }

    let mut placeholders = 0usize;
    for publication in publications {
        if publication.id.is_empty() {
            warn!(title = %publication.title, "skipping publication without an id");
            continue;
        }

        let publication_id = publication_node_id(&publication.id);
        if graph.index_of(&publication_id).is_some() {
            warn!(id = %publication.id, "skipping duplicate publication");
            continue;
        }

        let mut author_ids = Vec::with_capacity(publication.authors.len());
        let mut seen = HashSet::new();
        for author in &publication.authors {
            let resolved = authors.resolve(author).map(str::to_owned);
            let node_id = match resolved {
                Some(node_id) => node_id,
                None => {
                    let node_id = person_node_id(author);
                    if graph.index_of(&node_id).is_none() {
                        let info = PersonInfo {
                            name: author.clone(),
                            ..PersonInfo::default()
                        };
                        graph.add_node(Node::person(author, author.clone(), info))?;
                        authors.register(author, &node_id, author, false);
                        placeholders += 1;
                    }
                    node_id
                }
            };

            if seen.insert(node_id.clone()) {
                author_ids.push(node_id);
            }
        }

        let info = PublicationInfo {
            title: publication.title.clone(),
            short_title: publication.short_title.clone(),
            team: publication.team.clone(),
            kind: publication.kind.clone(),
            year: publication.resolved_year(),
            doi: publication.doi(),
            authors: author_ids
                .iter()
                .map(|id| authors.names.get(id).cloned().unwrap_or_else(|| id.clone()))
                .collect(),
            venue: publication.venue.clone(),
            pi_authors: author_ids
                .iter()
                .filter(|id| authors.pis.contains(*id))
                .count(),
        };

        graph.add_node(Node::publication(
            &publication.id,
            publication.label(),
            info,
        ))?;

        for person_id in &author_ids {
            graph.add_authorship(person_id, &publication_id)?;
        }
    }

    let dropped = graph.retain_people_with_publications();
    let counts = graph
        .publication_counts()
        .into_iter()
        .map(|(id, count)| (id.to_owned(), count))
        .collect::<HashMap<_, _>>();
    for node in graph.nodes_mut() {
        if node.kind() == NodeKind::Person {
            let count = counts.get(&node.id).copied().unwrap_or(0);
            node.size = u32::try_from(count.max(1)).unwrap_or(u32::MAX);
        }
    }

    debug!(
        people = graph.people().count(),
        publications = graph.publication_count(),
        edges = graph.edge_count(),
        placeholders,
        dropped,
        "built authorship graph"
    );

    Ok(graph)
}
