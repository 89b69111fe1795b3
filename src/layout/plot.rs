use std::collections::HashMap;

use super::visualizer::{LEVEL_STEP, Slot};
use super::{LinkLayout, PositionedNode};
use crate::graph::Graph;

impl Graph {
    /// Positions every node of `chapter` around `(origin_x, origin_y)`.
    ///
    /// Returns the positioned nodes in ascending numbering order together with
    /// the rightmost x used, so the caller can start the next chapter at
    /// `max_x + gap`. An unknown chapter yields no nodes and `origin_x`.
    pub fn plot(
        &self,
        chapter: &str,
        origin_x: f32,
        origin_y: f32,
        pad: f32,
    ) -> (Vec<PositionedNode>, f32) {
        self.plot_with_step(chapter, origin_x, origin_y, pad, LEVEL_STEP)
    }

    pub fn plot_with_step(
        &self,
        chapter: &str,
        origin_x: f32,
        origin_y: f32,
        pad: f32,
        step: f32,
    ) -> (Vec<PositionedNode>, f32) {
        let mut members = self.chapter_members(chapter).to_vec();
        members.sort_by(|a, b| {
            self.numbering_at(*a)
                .digits()
                .cmp(self.numbering_at(*b).digits())
        });

        let mut occupancy: HashMap<Slot, usize> = HashMap::new();
        let mut positioned = Vec::with_capacity(members.len());
        let mut max_x = origin_x;
        for idx in members {
            let node = &self.nodes()[idx];
            let slot = Slot::for_level(self.numbering_at(idx).level());
            let (dx, dy) = slot.displacement(step);
            let taken = occupancy.entry(slot).or_insert(0);
            let shift = pad * *taken as f32;
            *taken += 1;

            let (x, y) = match slot {
                Slot::Horizontal(_) => (origin_x + dx, origin_y + dy + shift),
                Slot::Origin | Slot::Vertical(_) => (origin_x + dx + shift, origin_y + dy),
            };
            max_x = max_x.max(x);
            positioned.push(PositionedNode {
                id: node.id().to_string(),
                x,
                y,
                properties: node.properties.clone(),
            });
        }

        tracing::debug!(chapter, nodes = positioned.len(), max_x, "plotted chapter");
        (positioned, max_x)
    }

    /// Parent/child connectors between nodes that were both plotted.
    pub(crate) fn chapter_links(&self, nodes: &[PositionedNode]) -> Vec<LinkLayout> {
        let mut links = Vec::new();
        for node in nodes {
            let Some(number) = node.properties.get(crate::ir::NUMBER_KEY) else {
                continue;
            };
            let Ok(Some(parent)) = self.get_parent_id_by_number(number) else {
                continue;
            };
            if nodes.iter().any(|other| other.id == parent) {
                links.push(LinkLayout {
                    from: parent.to_string(),
                    to: node.id.clone(),
                });
            }
        }
        links
    }
}
