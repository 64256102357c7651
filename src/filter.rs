use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::graph::{GraphStore, NodeData, NodeKind};
use crate::util::{normalize_tag, raw_id, selected_person_id};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub subteams: BTreeSet<String>,
    #[serde(default)]
    pub pi_only: bool,
    #[serde(default)]
    pub selected_people: Vec<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subteams<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.subteams = tags
            .into_iter()
            .map(|tag| normalize_tag(tag.as_ref()))
            .filter(|tag| !tag.is_empty())
            .collect();
        self
    }

    pub fn with_pi_only(mut self, pi_only: bool) -> Self {
        self.pi_only = pi_only;
        self
    }

    pub fn with_selected_people<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_people = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn has_subteam_restriction(&self) -> bool {
        self.subteams.iter().any(|tag| !tag.trim().is_empty())
    }

    pub fn is_unrestricted(&self) -> bool {
        !self.has_subteam_restriction() && self.selected_people.is_empty() && !self.pi_only
    }

    pub fn has_subteam(&self, tag: &str) -> bool {
        let tag = normalize_tag(tag);
        self.subteams.iter().any(|selected| normalize_tag(selected) == tag)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSummary {
    pub visible_people: usize,
    pub visible_publications: usize,
    pub visible_edges: usize,
    pub pruned_people: usize,
}

struct ResolvedCriteria<'a> {
    subteams: HashSet<String>,
    selected: HashSet<&'a str>,
    pi_only: bool,
}

impl<'a> ResolvedCriteria<'a> {
    fn new(criteria: &'a FilterCriteria) -> Self {
        Self {
            subteams: criteria
                .subteams
                .iter()
                .map(|tag| normalize_tag(tag))
                .filter(|tag| !tag.is_empty())
                .collect(),
            selected: criteria
                .selected_people
                .iter()
                .map(|id| selected_person_id(id.trim()))
                .filter(|id| !id.is_empty())
                .collect(),
            pi_only: criteria.pi_only,
        }
    }

    fn unrestricted(&self) -> bool {
        self.subteams.is_empty() && self.selected.is_empty() && !self.pi_only
    }

    fn subteam_matches(&self, tag: &str) -> bool {
        !self.subteams.is_empty() && self.subteams.contains(&normalize_tag(tag))
    }

    fn person_visible(&self, raw: &str, subteam: &str, pi: bool) -> bool {
        if !self.selected.is_empty() {
            self.selected.contains(raw)
        } else if self.pi_only {
            pi
        } else {
            self.subteams.is_empty() || self.subteam_matches(subteam)
        }
    }
}

/// Runs exactly two node passes: the criteria pass, then a pruning pass that
/// hides people left without any visible publication. Publications are not
/// re-checked after pruning.
pub fn apply(graph: &mut GraphStore, criteria: &FilterCriteria) -> FilterSummary {
    let resolved = ResolvedCriteria::new(criteria);
    let unrestricted = resolved.unrestricted();

    for node in graph.nodes_mut() {
        if let NodeData::Person(info) = &node.data {
            node.hidden = !resolved.person_visible(raw_id(&node.id), &info.subteam, info.pi);
        }
    }

    let mut reached = vec![false; graph.node_count()];
    for edge in graph.edges() {
        let Some((person, publication)) = graph.edge_endpoints(edge) else {
            continue;
        };
        if graph.nodes()[person].is_visible() {
            reached[publication] = true;
        }
    }

    for (index, node) in graph.nodes_mut().iter_mut().enumerate() {
        if let NodeData::Publication(info) = &node.data {
            let show = reached[index] || unrestricted || resolved.subteam_matches(&info.team);
            node.hidden = !show;
        }
    }

    derive_edge_visibility(graph);

    let counts = visible_publication_counts(graph);
    let mut pruned_people = 0usize;
    for (index, node) in graph.nodes_mut().iter_mut().enumerate() {
        if matches!(node.data, NodeData::Person(_)) && !node.hidden && counts[index] == 0 {
            node.hidden = true;
            pruned_people += 1;
        }
    }

    derive_edge_visibility(graph);
    recompute_sizes(graph);

    let summary = FilterSummary {
        visible_people: graph.visible_count(NodeKind::Person),
        visible_publications: graph.visible_count(NodeKind::Publication),
        visible_edges: graph.visible_edge_count(),
        pruned_people,
    };

    debug!(
        subteams = ?criteria.subteams,
        pi_only = criteria.pi_only,
        selected = criteria.selected_people.len(),
        people = summary.visible_people,
        publications = summary.visible_publications,
        edges = summary.visible_edges,
        pruned = summary.pruned_people,
        "applied visibility filter"
    );

    summary
}

fn derive_edge_visibility(graph: &mut GraphStore) {
    let hidden = graph
        .edges()
        .iter()
        .map(|edge| match graph.edge_endpoints(edge) {
            Some((person, publication)) => {
                graph.nodes()[person].hidden || graph.nodes()[publication].hidden
            }
            None => true,
        })
        .collect::<Vec<_>>();

    for (edge, hidden) in graph.edges_mut().iter_mut().zip(hidden) {
        edge.hidden = hidden;
    }
}

fn visible_publication_counts(graph: &GraphStore) -> Vec<usize> {
    let mut counts = vec![0usize; graph.node_count()];
    for edge in graph.edges().iter().filter(|edge| !edge.hidden) {
        if let Some((person, _)) = graph.edge_endpoints(edge) {
            counts[person] += 1;
        }
    }
    counts
}

pub fn recompute_sizes(graph: &mut GraphStore) {
    let counts = visible_publication_counts(graph);
    for (index, node) in graph.nodes_mut().iter_mut().enumerate() {
        if matches!(node.data, NodeData::Person(_)) && !node.hidden {
            node.size = u32::try_from(counts[index].max(1)).unwrap_or(u32::MAX);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Node, PersonInfo, PublicationInfo};

    fn person(graph: &mut GraphStore, raw: &str, subteam: &str, pi: bool) {
        let info = PersonInfo {
            name: format!("Person {raw}"),
            subteam: subteam.to_owned(),
            pi,
        };
        graph.add_node(Node::person(raw, info.name.clone(), info)).unwrap();
    }

    fn publication(graph: &mut GraphStore, raw: &str, team: &str) {
        let info = PublicationInfo {
            title: format!("Paper {raw}"),
            team: team.to_owned(),
            ..PublicationInfo::default()
        };
        graph
            .add_node(Node::publication(raw, info.title.clone(), info))
            .unwrap();
    }

    fn link(graph: &mut GraphStore, person: &str, publication: &str) {
        graph
            .add_authorship(&format!("person:{person}"), &format!("pub:{publication}"))
            .unwrap();
    }

    fn hidden(graph: &GraphStore, id: &str) -> bool {
        graph.node(id).unwrap().hidden
    }

    fn fixture() -> GraphStore {
        let mut graph = GraphStore::new();
        person(&mut graph, "1", "Discover", true);
        person(&mut graph, "2", "direct", false);
        person(&mut graph, "3", "develop", false);
        publication(&mut graph, "a", "discover");
        publication(&mut graph, "b", "direct");
        publication(&mut graph, "c", "develop");
        publication(&mut graph, "orphan", "Develop");
        link(&mut graph, "1", "a");
        link(&mut graph, "2", "a");
        link(&mut graph, "2", "b");
        link(&mut graph, "3", "c");
        graph
    }

    #[test]
    fn explicit_selection_overrides_other_rules() {
        let mut graph = fixture();
        let criteria = FilterCriteria::new()
            .with_subteams(["develop"])
            .with_pi_only(true)
            .with_selected_people(["2"]);
        apply(&mut graph, &criteria);

        assert!(!hidden(&graph, "person:2"));
        assert!(hidden(&graph, "person:1"));
        assert!(hidden(&graph, "person:3"));
        assert!(!hidden(&graph, "pub:a"));
        assert!(!hidden(&graph, "pub:b"));
        assert!(!hidden(&graph, "pub:c"), "team tag still reaches develop papers");
        assert!(!hidden(&graph, "pub:orphan"));
    }

    #[test]
    fn prefixed_selection_ids_match() {
        let mut graph = fixture();
        apply(
            &mut graph,
            &FilterCriteria::new().with_selected_people(["person:3"]),
        );
        assert!(!hidden(&graph, "person:3"));
        assert!(hidden(&graph, "person:2"));
    }

    #[test]
    fn publication_ids_do_not_select_people() {
        let mut graph = fixture();
        let summary = apply(
            &mut graph,
            &FilterCriteria::new().with_selected_people(["pub:3"]),
        );
        assert!(hidden(&graph, "person:3"));
        assert_eq!(summary.visible_people, 0);
    }

    #[test]
    fn pi_only_shows_principal_investigators() {
        let mut graph = fixture();
        apply(&mut graph, &FilterCriteria::new().with_pi_only(true));

        assert!(!hidden(&graph, "person:1"));
        assert!(hidden(&graph, "person:2"));
        assert!(!hidden(&graph, "pub:a"));
        assert!(hidden(&graph, "pub:b"));
        assert!(hidden(&graph, "pub:orphan"));
    }

    #[test]
    fn subteam_match_ignores_case() {
        let mut graph = fixture();
        apply(&mut graph, &FilterCriteria::new().with_subteams(["DISCOVER"]));

        assert!(!hidden(&graph, "person:1"));
        assert!(hidden(&graph, "person:2"));
        assert!(!hidden(&graph, "pub:a"));
    }

    #[test]
    fn team_tagged_publications_show_without_visible_author() {
        let mut graph = fixture();
        apply(&mut graph, &FilterCriteria::new().with_subteams(["develop"]));

        assert!(!hidden(&graph, "pub:orphan"));
        assert!(!hidden(&graph, "pub:c"));
        assert!(hidden(&graph, "pub:a"));
    }

    #[test]
    fn people_without_visible_publications_are_pruned() {
        let mut graph = fixture();
        person(&mut graph, "4", "direct", false);
        let summary = apply(&mut graph, &FilterCriteria::new().with_subteams(["direct"]));

        assert!(hidden(&graph, "person:4"));
        assert_eq!(summary.pruned_people, 1);
        assert_eq!(summary.visible_people, 1);
    }

    #[test]
    fn edges_follow_endpoint_visibility() {
        let mut graph = fixture();
        apply(&mut graph, &FilterCriteria::new().with_subteams(["discover"]));

        for edge in graph.edges() {
            let expected = hidden(&graph, &edge.person) || hidden(&graph, &edge.publication);
            assert_eq!(edge.hidden, expected, "edge {}", edge.id);
        }
        // person 2 is hidden but authored the visible paper a
        assert!(!hidden(&graph, "pub:a"));
        assert!(graph.edges().iter().any(|edge| edge.id == "person:2->pub:a" && edge.hidden));
    }

    #[test]
    fn sizes_count_visible_publications_and_keep_stale_values() {
        let mut graph = fixture();
        apply(&mut graph, &FilterCriteria::new());
        assert_eq!(graph.node("person:2").unwrap().size, 2);

        apply(&mut graph, &FilterCriteria::new().with_selected_people(["1"]));
        assert_eq!(graph.node("person:1").unwrap().size, 1);
        assert!(hidden(&graph, "person:2"));
        assert_eq!(graph.node("person:2").unwrap().size, 2);
    }

    #[test]
    fn unrestricted_view_shows_everything_with_authors() {
        let mut graph = fixture();
        let summary = apply(&mut graph, &FilterCriteria::new());

        assert_eq!(summary.visible_people, 3);
        assert_eq!(summary.visible_publications, 4);
        assert_eq!(summary.visible_edges, 4);
        assert_eq!(summary.pruned_people, 0);
    }

    #[test]
    fn empty_graph_is_a_no_op() {
        let mut graph = GraphStore::new();
        let summary = apply(&mut graph, &FilterCriteria::new().with_pi_only(true));
        assert_eq!(summary, FilterSummary::default());
    }

    #[test]
    fn criteria_helpers_normalize_tags() {
        let criteria = FilterCriteria::new().with_subteams([" Discover ", "", "direct"]);
        assert_eq!(criteria.subteams.len(), 2);
        assert!(criteria.has_subteam("DISCOVER"));
        assert!(criteria.has_subteam_restriction());
        assert!(!criteria.is_unrestricted());
        assert!(FilterCriteria::new().is_unrestricted());
    }
}
