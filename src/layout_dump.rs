use crate::graph::{AdjacencyList, Graph};
use crate::layout::{Layout, PositionDump};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub chapter_order: Vec<String>,
    pub chapters: BTreeMap<String, BTreeMap<String, PositionDump>>,
    pub links: Vec<LinkDump>,
}

#[derive(Debug, Serialize)]
pub struct LinkDump {
    pub chapter: String,
    pub from: String,
    pub to: String,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout) -> Self {
        let links = layout
            .chapters
            .iter()
            .flat_map(|chapter| {
                chapter.links.iter().map(|link| LinkDump {
                    chapter: chapter.chapter.clone(),
                    from: link.from.clone(),
                    to: link.to.clone(),
                })
            })
            .collect();

        LayoutDump {
            width: layout.width,
            height: layout.height,
            chapter_order: layout
                .chapters
                .iter()
                .map(|chapter| chapter.chapter.clone())
                .collect(),
            chapters: layout.to_payload(),
            links,
        }
    }
}

pub fn write_layout_dump(path: Option<&Path>, layout: &Layout) -> anyhow::Result<()> {
    write_pretty(path, &LayoutDump::from_layout(layout))
}

/// Writes `number -> {horizontal, vertical}` for inspection.
pub fn write_adjacency(path: Option<&Path>, graph: &Graph) -> anyhow::Result<()> {
    let list: AdjacencyList = graph.create_adjacency_list();
    tracing::debug!(entries = list.len(), "exporting adjacency list");
    write_pretty(path, &list)
}

fn write_pretty<T: Serialize>(path: Option<&Path>, value: &T) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            let file = File::create(path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, value)?;
            writer.flush()?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            serde_json::to_writer_pretty(&mut writer, value)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}
