//! Property tests for the filter and layout engines.
//!
//! 1. Adjacent vertices of a chord-sized ring are at least one chord apart.
//! 2. Edge visibility follows endpoint visibility.
//! 3. No visible person is left without a visible publication.
//! 4. Visible person size equals `max(1, visible publications)`.
//! 5. Filtering twice equals filtering once.
//! 6. Layout twice equals layout once, and hidden nodes never move.

use std::collections::HashMap;

use authorship_map::geometry::{radius_for_chord, slot_angle};
use authorship_map::{
    FilterCriteria, GraphStore, LayoutConfig, Node, NodeKind, PersonInfo, PublicationInfo, filter,
    initial_layout, relayout,
};
use proptest::prelude::*;

const TAGS: [&str; 4] = ["discover", "direct", "develop", ""];

// ── Helpers ─────────────────────────────────────────────────────────────

fn build_graph(
    people: &[(usize, bool)],
    publications: &[usize],
    links: &[(usize, usize)],
) -> GraphStore {
    let mut graph = GraphStore::new();
    for (index, &(tag, pi)) in people.iter().enumerate() {
        let info = PersonInfo {
            name: format!("Person {index}"),
            subteam: TAGS[tag].to_owned(),
            pi,
        };
        graph
            .add_node(Node::person(&index.to_string(), info.name.clone(), info))
            .unwrap();
    }
    for (index, &tag) in publications.iter().enumerate() {
        let info = PublicationInfo {
            title: format!("Paper {index}"),
            team: TAGS[tag].to_owned(),
            ..PublicationInfo::default()
        };
        graph
            .add_node(Node::publication(&index.to_string(), info.title.clone(), info))
            .unwrap();
    }
    for &(person, publication) in links {
        if person < people.len() && publication < publications.len() {
            graph
                .add_authorship(&format!("person:{person}"), &format!("pub:{publication}"))
                .unwrap();
        }
    }
    graph
}

fn graph_strategy() -> impl Strategy<Value = GraphStore> {
    (
        prop::collection::vec((0usize..TAGS.len(), any::<bool>()), 0..24),
        prop::collection::vec(0usize..TAGS.len(), 0..18),
        prop::collection::vec((0usize..24, 0usize..18), 0..60),
    )
        .prop_map(|(people, publications, links)| build_graph(&people, &publications, &links))
}

fn criteria_strategy() -> impl Strategy<Value = FilterCriteria> {
    (
        prop::collection::btree_set(0usize..3, 0..3),
        any::<bool>(),
        prop::collection::vec(0usize..24, 0..3),
    )
        .prop_map(|(tags, pi_only, people)| {
            FilterCriteria::new()
                .with_subteams(tags.into_iter().map(|tag| TAGS[tag]))
                .with_pi_only(pi_only)
                .with_selected_people(people.into_iter().map(|id| id.to_string()))
        })
}

fn visible_edges_per_person(graph: &GraphStore) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for edge in graph.edges().iter().filter(|edge| !edge.hidden) {
        *counts.entry(edge.person.clone()).or_insert(0) += 1;
    }
    counts
}

fn visibility(graph: &GraphStore) -> Vec<(bool, u32)> {
    graph
        .nodes()
        .iter()
        .map(|node| (node.hidden, node.size))
        .chain(graph.edges().iter().map(|edge| (edge.hidden, 0)))
        .collect()
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Chord spacing
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn ring_vertices_respect_chord(n in 2usize..600, chord in 1.0f64..120.0) {
        let radius = radius_for_chord(n, chord);
        let a = slot_angle(0, 0.0, n);
        let b = slot_angle(1, 0.0, n);
        let distance = (radius * (b.cos() - a.cos())).hypot(radius * (b.sin() - a.sin()));
        prop_assert!(
            distance >= chord * (1.0 - 1e-9),
            "n={} chord={} distance={}",
            n, chord, distance
        );
    }

    #[test]
    fn degenerate_rings_have_zero_radius(n in 0usize..2, chord in 0.0f64..120.0) {
        prop_assert_eq!(radius_for_chord(n, chord), 0.0);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2-4. Visibility laws after a filter pass
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn edge_visibility_follows_endpoints(
        mut graph in graph_strategy(),
        criteria in criteria_strategy(),
    ) {
        filter::apply(&mut graph, &criteria);
        for edge in graph.edges() {
            let person = graph.node(&edge.person).unwrap();
            let publication = graph.node(&edge.publication).unwrap();
            prop_assert_eq!(edge.hidden, person.hidden || publication.hidden, "edge {}", &edge.id);
        }
    }

    #[test]
    fn visible_people_keep_a_visible_publication(
        mut graph in graph_strategy(),
        criteria in criteria_strategy(),
    ) {
        filter::apply(&mut graph, &criteria);
        let counts = visible_edges_per_person(&graph);
        for person in graph.people().filter(|node| node.is_visible()) {
            prop_assert!(
                counts.get(&person.id).copied().unwrap_or(0) > 0,
                "{} is visible without publications",
                &person.id
            );
        }
    }

    #[test]
    fn visible_person_size_counts_visible_publications(
        mut graph in graph_strategy(),
        criteria in criteria_strategy(),
    ) {
        filter::apply(&mut graph, &criteria);
        let counts = visible_edges_per_person(&graph);
        for person in graph.people().filter(|node| node.is_visible()) {
            let expected = counts.get(&person.id).copied().unwrap_or(0).max(1) as u32;
            prop_assert_eq!(person.size, expected, "size of {}", &person.id);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5-6. Idempotence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn filter_is_idempotent(mut graph in graph_strategy(), criteria in criteria_strategy()) {
        let first = filter::apply(&mut graph, &criteria);
        let after_once = visibility(&graph);
        let second = filter::apply(&mut graph, &criteria);
        prop_assert_eq!(after_once, visibility(&graph));
        prop_assert_eq!(first.visible_people, second.visible_people);
        prop_assert_eq!(first.visible_edges, second.visible_edges);
    }

    #[test]
    fn layout_is_idempotent_and_leaves_hidden_nodes_alone(
        mut graph in graph_strategy(),
        criteria in criteria_strategy(),
    ) {
        let config = LayoutConfig::default();
        initial_layout(&mut graph, &config.initial);
        filter::apply(&mut graph, &criteria);

        let hidden_before = graph
            .nodes()
            .iter()
            .filter(|node| node.hidden)
            .map(|node| (node.id.clone(), node.position))
            .collect::<Vec<_>>();

        let first = relayout(&mut graph, &criteria, &config);
        let positions = graph.nodes().iter().map(|node| node.position).collect::<Vec<_>>();
        let second = relayout(&mut graph, &criteria, &config);

        prop_assert_eq!(first, second);
        prop_assert_eq!(
            positions,
            graph.nodes().iter().map(|node| node.position).collect::<Vec<_>>()
        );
        for (id, position) in hidden_before {
            prop_assert_eq!(graph.node(&id).unwrap().position, position, "hidden {} moved", id);
        }
        for node in graph.nodes().iter().filter(|node| node.kind() == NodeKind::Person && node.is_visible()) {
            prop_assert!(node.fixed);
        }
    }
}
