use std::collections::HashMap;

use authorship_map::util::normalize_tag;
use authorship_map::{NodeData, NodeKind};
use eframe::egui::Vec2;

use super::super::render_utils::{
    PUBLICATION_RADIUS, person_radius, point_to_world, publication_color, subteam_color,
};
use super::super::{RenderGraph, RenderNode, ViewModel};

impl ViewModel {
    fn visible_person_size_range(&self) -> (u32, u32) {
        self.graph
            .people()
            .filter(|node| node.is_visible())
            .fold(None, |range: Option<(u32, u32)>, node| {
                Some(match range {
                    Some((min, max)) => (min.min(node.size), max.max(node.size)),
                    None => (node.size, node.size),
                })
            })
            .unwrap_or((1, 1))
    }

    pub(in crate::app) fn rebuild_render_graph(&mut self) {
        let (min_size, max_size) = self.visible_person_size_range();

        let mut nodes = Vec::new();
        let mut index_by_id = HashMap::new();
        for node in self.graph.nodes().iter().filter(|node| node.is_visible()) {
            let world_pos = node.position.map(point_to_world).unwrap_or(Vec2::ZERO);
            let (radius, color, is_pi) = match &node.data {
                NodeData::Person(info) => {
                    let tag = normalize_tag(&info.subteam);
                    let tag_index = self.subteam_tags.iter().position(|known| *known == tag);
                    (
                        person_radius(node.size, min_size, max_size),
                        subteam_color(tag_index),
                        info.pi,
                    )
                }
                NodeData::Publication(info) => (
                    PUBLICATION_RADIUS,
                    publication_color(info.pi_authors),
                    false,
                ),
            };

            index_by_id.insert(node.id.clone(), nodes.len());
            nodes.push(RenderNode {
                id: node.id.clone(),
                label: node.label.clone(),
                kind: node.kind(),
                world_pos,
                radius,
                color,
                is_pi,
            });
        }

        let mut edges = Vec::new();
        let mut neighbors = vec![Vec::new(); nodes.len()];
        for edge in self.graph.edges().iter().filter(|edge| !edge.hidden) {
            let (Some(&person), Some(&publication)) = (
                index_by_id.get(&edge.person),
                index_by_id.get(&edge.publication),
            ) else {
                continue;
            };
            edges.push((person, publication));
            neighbors[person].push(publication);
            neighbors[publication].push(person);
        }

        // People draw above publications.
        let mut draw_order = (0..nodes.len()).collect::<Vec<_>>();
        draw_order.sort_by_key(|&index| nodes[index].kind == NodeKind::Person);

        self.render_graph = Some(RenderGraph {
            nodes,
            edges,
            neighbors,
            index_by_id,
            draw_order,
        });
        self.graph_dirty = false;
    }
}
