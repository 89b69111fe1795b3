use std::collections::BTreeMap;

use serde::Serialize;

use crate::ir::Properties;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedNode {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub properties: Properties,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionDump {
    pub x: f32,
    pub y: f32,
    pub properties: Properties,
}

/// Node connector inside one chapter, parent id then child id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkLayout {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChapterLayout {
    pub chapter: String,
    pub origin_x: f32,
    pub origin_y: f32,
    pub nodes: Vec<PositionedNode>,
    pub links: Vec<LinkLayout>,
    pub max_x: f32,
}

impl ChapterLayout {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&PositionedNode> {
        self.nodes.iter().find(|node| node.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub chapters: Vec<ChapterLayout>,
    pub min_x: f32,
    pub min_y: f32,
    pub width: f32,
    pub height: f32,
}

impl Layout {
    pub fn chapter(&self, chapter: &str) -> Option<&ChapterLayout> {
        self.chapters.iter().find(|layout| layout.chapter == chapter)
    }

    pub fn node_count(&self) -> usize {
        self.chapters.iter().map(|chapter| chapter.nodes.len()).sum()
    }

    /// `chapter -> node id -> {x, y, properties}`, the payload a renderer consumes.
    pub fn to_payload(&self) -> BTreeMap<String, BTreeMap<String, PositionDump>> {
        self.chapters
            .iter()
            .map(|chapter| {
                let nodes = chapter
                    .nodes
                    .iter()
                    .map(|node| {
                        (
                            node.id.clone(),
                            PositionDump {
                                x: node.x,
                                y: node.y,
                                properties: node.properties.clone(),
                            },
                        )
                    })
                    .collect();
                (chapter.chapter.clone(), nodes)
            })
            .collect()
    }
}
