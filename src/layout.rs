use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::LayoutConfig;
use crate::filter::FilterCriteria;
use crate::geometry::{clamp, radius_for_chord, ring_point, slot_angle};
use crate::graph::{GraphStore, NodeKind};

pub const PERSON_DIAMETER: f64 = 24.0;
pub const PERSON_PADDING: f64 = 10.0;
pub const PERSON_CHORD: f64 = PERSON_DIAMETER + PERSON_PADDING;

const PUBLICATION_DENSITY: f64 = 12.0;
const INNER_RING_RATIO: f64 = 0.58;
const DUAL_RING_MIN_PEOPLE: usize = 28;
const SECOND_RING_RATIO: f64 = 0.75;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    pub spacing_factor: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    pub ring_scale: f64,
    pub inner_min: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            spacing_factor: 4.5,
            min_radius: 420.0,
            max_radius: 2000.0,
            ring_scale: 1.4,
            inner_min: 80.0,
        }
    }
}

impl LayoutOptions {
    pub fn dense() -> Self {
        Self {
            spacing_factor: 6.0,
            min_radius: 600.0,
            max_radius: 2200.0,
            ..Self::default()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpreadOptions {
    pub min_radius: f64,
    pub cap_floor: f64,
    pub cap_ratio: f64,
    pub ring_scale: f64,
}

impl Default for SpreadOptions {
    fn default() -> Self {
        Self {
            min_radius: 60.0,
            cap_floor: 120.0,
            cap_ratio: 0.5,
            ring_scale: 1.4,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialLayoutOptions {
    pub people_radius: f64,
    pub publication_radius: f64,
}

impl Default for InitialLayoutOptions {
    fn default() -> Self {
        Self {
            people_radius: 380.0,
            publication_radius: 700.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Ring {
    pub radius: f64,
    pub count: usize,
    pub offset: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum LayoutMode {
    Rings,
    Spread,
    Initial,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RingLayout {
    pub mode: LayoutMode,
    pub publication_radius: f64,
    pub placed_publications: usize,
    pub people_rings: Vec<Ring>,
}

impl RingLayout {
    pub fn placed_people(&self) -> usize {
        self.people_rings.iter().map(|ring| ring.count).sum()
    }
}

pub fn publication_ring_radius(count: usize, options: &LayoutOptions) -> f64 {
    let computed = options.spacing_factor * PUBLICATION_DENSITY * (count as f64).sqrt();
    clamp(computed, options.min_radius, options.max_radius)
}

pub fn plan_people_rings(people: usize, reference_radius: f64, options: &LayoutOptions) -> Vec<Ring> {
    if people == 0 {
        return Vec::new();
    }

    let inner_max = reference_radius * INNER_RING_RATIO;
    let inner_min = options.inner_min;
    let needed = radius_for_chord(people, PERSON_CHORD);
    let single = clamp((needed * options.ring_scale).round(), inner_min, inner_max);

    if people >= DUAL_RING_MIN_PEOPLE && single >= inner_max {
        let first_count = people.div_ceil(2);
        let first_radius = inner_max.min((inner_max * options.ring_scale).round());
        let second_radius =
            inner_min.max((inner_max * SECOND_RING_RATIO * options.ring_scale).round());

        return vec![
            Ring {
                radius: first_radius,
                count: first_count,
                offset: 0.0,
            },
            Ring {
                radius: second_radius,
                count: people - first_count,
                offset: 0.5,
            },
        ];
    }

    vec![Ring {
        radius: single,
        count: people,
        offset: 0.0,
    }]
}

fn visible_indices(graph: &GraphStore, kind: NodeKind) -> Vec<usize> {
    graph
        .nodes()
        .iter()
        .enumerate()
        .filter(|(_, node)| node.kind() == kind && node.is_visible())
        .map(|(index, _)| index)
        .collect()
}

fn sorted_by_label(graph: &GraphStore, kind: NodeKind) -> Vec<usize> {
    let mut indices = graph
        .nodes()
        .iter()
        .enumerate()
        .filter(|(_, node)| node.kind() == kind)
        .map(|(index, _)| index)
        .collect::<Vec<_>>();
    indices.sort_by_cached_key(|&index| graph.nodes()[index].label.to_lowercase());
    indices
}

fn place_on_rings(graph: &mut GraphStore, indices: &[usize], rings: &[Ring]) {
    let mut remaining = indices;
    for ring in rings {
        let take = ring.count.min(remaining.len());
        let (current, rest) = remaining.split_at(take);
        for (slot, &index) in current.iter().enumerate() {
            let point = ring_point(ring.radius, slot_angle(slot, ring.offset, ring.count));
            if let Some(node) = graph.nodes_mut().get_mut(index) {
                node.place(point);
            }
        }
        remaining = rest;
    }
}

pub fn layout_rings(graph: &mut GraphStore, options: &LayoutOptions) -> RingLayout {
    let mut graph = graph.pause_physics();

    let publications = visible_indices(&graph, NodeKind::Publication);
    let people = visible_indices(&graph, NodeKind::Person);

    // People still get a sensible ring when no publication is visible.
    let reference_radius = publication_ring_radius(publications.len(), options);
    let publication_radius = if publications.is_empty() {
        0.0
    } else {
        reference_radius
    };

    let publication_ring = [Ring {
        radius: publication_radius,
        count: publications.len(),
        offset: 0.0,
    }];
    place_on_rings(&mut graph, &publications, &publication_ring);

    let people_rings = plan_people_rings(people.len(), reference_radius, options);
    place_on_rings(&mut graph, &people, &people_rings);

    debug!(
        publications = publications.len(),
        people = people.len(),
        publication_radius,
        rings = people_rings.len(),
        "ring layout"
    );

    RingLayout {
        mode: LayoutMode::Rings,
        publication_radius,
        placed_publications: publications.len(),
        people_rings,
    }
}

pub fn layout_people_spread(
    graph: &mut GraphStore,
    reference: &LayoutOptions,
    spread: &SpreadOptions,
) -> RingLayout {
    let mut graph = graph.pause_physics();

    let people = visible_indices(&graph, NodeKind::Person);
    let reference_radius = publication_ring_radius(graph.publication_count(), reference);

    let people_rings = if people.is_empty() {
        Vec::new()
    } else {
        let cap = spread.cap_floor.max((reference_radius * spread.cap_ratio).round());
        let needed = radius_for_chord(people.len(), PERSON_CHORD);
        let radius = clamp((needed * spread.ring_scale).round(), spread.min_radius, cap);
        vec![Ring {
            radius,
            count: people.len(),
            offset: 0.0,
        }]
    };
    place_on_rings(&mut graph, &people, &people_rings);

    debug!(
        people = people.len(),
        reference_radius,
        "people spread layout"
    );

    RingLayout {
        mode: LayoutMode::Spread,
        publication_radius: reference_radius,
        placed_publications: 0,
        people_rings,
    }
}

pub fn relayout(graph: &mut GraphStore, criteria: &FilterCriteria, config: &LayoutConfig) -> RingLayout {
    if criteria.has_subteam_restriction() {
        let options = config.ring_options_for(criteria);
        layout_rings(graph, &options)
    } else {
        layout_people_spread(graph, &config.rings, &config.spread)
    }
}

pub fn initial_layout(graph: &mut GraphStore, options: &InitialLayoutOptions) -> RingLayout {
    let mut graph = graph.pause_physics();

    let people = sorted_by_label(&graph, NodeKind::Person);
    let publications = sorted_by_label(&graph, NodeKind::Publication);

    let people_rings = if people.is_empty() {
        Vec::new()
    } else {
        vec![Ring {
            radius: options.people_radius,
            count: people.len(),
            offset: 0.0,
        }]
    };
    place_on_rings(&mut graph, &people, &people_rings);

    let publication_ring = [Ring {
        radius: options.publication_radius,
        count: publications.len(),
        offset: 0.0,
    }];
    place_on_rings(&mut graph, &publications, &publication_ring);

    RingLayout {
        mode: LayoutMode::Initial,
        publication_radius: if publications.is_empty() {
            0.0
        } else {
            options.publication_radius
        },
        placed_publications: publications.len(),
        people_rings,
    }
}
