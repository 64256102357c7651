use std::collections::{BTreeSet, HashMap, HashSet};
use std::ops::{Deref, DerefMut};

use anyhow::{Result, bail};

use crate::geometry::Point;
use crate::util::{normalize_tag, person_node_id, publication_node_id, raw_id};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Person,
    Publication,
}

impl NodeKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Publication => "publication",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PersonInfo {
    pub name: String,
    pub subteam: String,
    pub pi: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PublicationInfo {
    pub title: String,
    pub short_title: String,
    pub team: String,
    pub kind: String,
    pub year: String,
    pub doi: Option<String>,
    pub authors: Vec<String>,
    pub venue: String,
    pub pi_authors: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub enum NodeData {
    Person(PersonInfo),
    Publication(PublicationInfo),
}

#[derive(Clone, Debug)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub data: NodeData,
    pub hidden: bool,
    pub size: u32,
    pub position: Option<Point>,
    pub fixed: bool,
}

impl Node {
    pub fn person(raw: &str, label: impl Into<String>, info: PersonInfo) -> Self {
        Self::with_data(person_node_id(raw), label.into(), NodeData::Person(info))
    }

    pub fn publication(raw: &str, label: impl Into<String>, info: PublicationInfo) -> Self {
        Self::with_data(
            publication_node_id(raw),
            label.into(),
            NodeData::Publication(info),
        )
    }

    fn with_data(id: String, label: String, data: NodeData) -> Self {
        Self {
            id,
            label,
            data,
            hidden: false,
            size: 1,
            position: None,
            fixed: false,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self.data {
            NodeData::Person(_) => NodeKind::Person,
            NodeData::Publication(_) => NodeKind::Publication,
        }
    }

    pub fn raw_id(&self) -> &str {
        raw_id(&self.id)
    }

    pub fn as_person(&self) -> Option<&PersonInfo> {
        match &self.data {
            NodeData::Person(info) => Some(info),
            NodeData::Publication(_) => None,
        }
    }

    pub fn as_publication(&self) -> Option<&PublicationInfo> {
        match &self.data {
            NodeData::Person(_) => None,
            NodeData::Publication(info) => Some(info),
        }
    }

    pub fn is_visible(&self) -> bool {
        !self.hidden
    }

    pub(crate) fn place(&mut self, position: Point) {
        self.position = Some(position);
        self.fixed = true;
    }
}

#[derive(Clone, Debug)]
pub struct Edge {
    pub id: String,
    pub person: String,
    pub publication: String,
    pub hidden: bool,
}

/// Node order is insertion order and is what the ring layout uses to assign
/// angular slots, so it stays stable across filter passes.
#[derive(Clone, Debug)]
pub struct GraphStore {
    nodes: Vec<Node>,
    index_by_id: HashMap<String, usize>,
    edges: Vec<Edge>,
    edge_pairs: HashSet<(usize, usize)>,
    physics_enabled: bool,
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphStore {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            index_by_id: HashMap::new(),
            edges: Vec::new(),
            edge_pairs: HashSet::new(),
            physics_enabled: false,
        }
    }

    pub fn add_node(&mut self, node: Node) -> Result<usize> {
        if self.index_by_id.contains_key(&node.id) {
            bail!("duplicate node id {}", node.id);
        }

        let index = self.nodes.len();
        self.index_by_id.insert(node.id.clone(), index);
        self.nodes.push(node);
        Ok(index)
    }

    pub fn add_authorship(&mut self, person_id: &str, publication_id: &str) -> Result<bool> {
        let (Some(&person), Some(&publication)) = (
            self.index_by_id.get(person_id),
            self.index_by_id.get(publication_id),
        ) else {
            bail!("authorship {person_id} -> {publication_id} references an unknown node");
        };

        if self.nodes[person].kind() != NodeKind::Person
            || self.nodes[publication].kind() != NodeKind::Publication
        {
            bail!("authorship {person_id} -> {publication_id} must join a person and a publication");
        }

        if !self.edge_pairs.insert((person, publication)) {
            return Ok(false);
        }

        self.edges.push(Edge {
            id: format!("{person_id}->{publication_id}"),
            person: person_id.to_owned(),
            publication: publication_id.to_owned(),
            hidden: false,
        });
        Ok(true)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index_by_id.get(id).map(|&index| &self.nodes[index])
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        let index = self.index_of(id)?;
        self.nodes.get_mut(index)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub(crate) fn edges_mut(&mut self) -> &mut [Edge] {
        &mut self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn people(&self) -> impl Iterator<Item = &Node> {
        self.nodes
            .iter()
            .filter(|node| node.kind() == NodeKind::Person)
    }

    pub fn publications(&self) -> impl Iterator<Item = &Node> {
        self.nodes
            .iter()
            .filter(|node| node.kind() == NodeKind::Publication)
    }

    pub fn publication_count(&self) -> usize {
        self.publications().count()
    }

    pub fn visible_count(&self, kind: NodeKind) -> usize {
        self.nodes
            .iter()
            .filter(|node| node.kind() == kind && node.is_visible())
            .count()
    }

    pub fn visible_edge_count(&self) -> usize {
        self.edges.iter().filter(|edge| !edge.hidden).count()
    }

    pub fn edge_endpoints(&self, edge: &Edge) -> Option<(usize, usize)> {
        Some((
            *self.index_by_id.get(&edge.person)?,
            *self.index_by_id.get(&edge.publication)?,
        ))
    }

    pub fn visible_neighbors(&self, id: &str) -> Vec<&str> {
        self.edges
            .iter()
            .filter(|edge| !edge.hidden)
            .filter_map(|edge| {
                if edge.person == id {
                    Some(edge.publication.as_str())
                } else if edge.publication == id {
                    Some(edge.person.as_str())
                } else {
                    None
                }
            })
            .collect()
    }

    pub fn publication_counts(&self) -> HashMap<&str, usize> {
        let mut counts = HashMap::new();
        for edge in &self.edges {
            *counts.entry(edge.person.as_str()).or_insert(0) += 1;
        }
        counts
    }

    pub fn subteam_tags(&self) -> Vec<String> {
        let tags = self
            .nodes
            .iter()
            .map(|node| match &node.data {
                NodeData::Person(info) => normalize_tag(&info.subteam),
                NodeData::Publication(info) => normalize_tag(&info.team),
            })
            .filter(|tag| !tag.is_empty())
            .collect::<BTreeSet<_>>();
        tags.into_iter().collect()
    }

    pub fn visible_bounds(&self) -> Option<(Point, Point)> {
        let mut positions = self
            .nodes
            .iter()
            .filter(|node| node.is_visible())
            .filter_map(|node| node.position);
        let first = positions.next()?;

        Some(positions.fold((first, first), |(min, max), point| {
            (
                Point::new(min.x.min(point.x), min.y.min(point.y)),
                Point::new(max.x.max(point.x), max.y.max(point.y)),
            )
        }))
    }

    pub fn physics_enabled(&self) -> bool {
        self.physics_enabled
    }

    pub fn set_physics_enabled(&mut self, enabled: bool) {
        self.physics_enabled = enabled;
    }

    pub fn pause_physics(&mut self) -> PhysicsPause<'_> {
        let previous = self.physics_enabled;
        self.physics_enabled = false;
        PhysicsPause {
            graph: self,
            previous,
        }
    }

    pub fn retain_people_with_publications(&mut self) -> usize {
        let counts = self
            .publication_counts()
            .into_iter()
            .map(|(id, count)| (id.to_owned(), count))
            .collect::<HashMap<_, _>>();
        let before = self.nodes.len();
        self.nodes.retain(|node| {
            node.kind() == NodeKind::Publication || counts.get(&node.id).copied().unwrap_or(0) > 0
        });

        self.index_by_id = self
            .nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (node.id.clone(), index))
            .collect();
        self.edge_pairs = self
            .edges
            .iter()
            .filter_map(|edge| {
                Some((
                    *self.index_by_id.get(&edge.person)?,
                    *self.index_by_id.get(&edge.publication)?,
                ))
            })
            .collect();

        before - self.nodes.len()
    }
}

pub struct PhysicsPause<'a> {
    graph: &'a mut GraphStore,
    previous: bool,
}

impl Deref for PhysicsPause<'_> {
    type Target = GraphStore;

    fn deref(&self) -> &GraphStore {
        self.graph
    }
}

impl DerefMut for PhysicsPause<'_> {
    fn deref_mut(&mut self) -> &mut GraphStore {
        self.graph
    }
}

impl Drop for PhysicsPause<'_> {
    fn drop(&mut self) {
        self.graph.physics_enabled = self.previous;
    }
}
