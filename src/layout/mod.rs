mod plot;
pub(crate) mod types;
mod visualizer;
pub use types::*;
pub use visualizer::{LEVEL_STEP, NodeVisualizer, Slot};

use crate::config::LayoutConfig;
use crate::graph::Graph;

/// Chapters to plot: the explicit subset when configured, otherwise every
/// chapter in first-seen order minus the excluded ones. Repeats in an
/// explicit subset are plotted once, at their first position.
pub fn selected_chapters(graph: &Graph, config: &LayoutConfig) -> Vec<String> {
    match &config.chapters {
        Some(chapters) => {
            let mut selected: Vec<String> = Vec::with_capacity(chapters.len());
            for chapter in chapters {
                if !selected.contains(chapter) {
                    selected.push(chapter.clone());
                }
            }
            selected
        }
        None => graph
            .get_chapter_numbers()
            .into_iter()
            .filter(|chapter| !config.excluded_chapters.iter().any(|ex| ex.as_str() == *chapter))
            .map(str::to_string)
            .collect(),
    }
}

/// Lays the selected chapters out left to right, each starting `gap` past the
/// rightmost node of the previous one. An empty chapter reports its origin as
/// `max_x`, so it still takes up one `gap`.
pub fn compute_layout(graph: &Graph, config: &LayoutConfig) -> Layout {
    let mut x = config.origin_x;
    let mut chapters = Vec::new();
    for chapter in selected_chapters(graph, config) {
        let (nodes, max_x) =
            graph.plot_with_step(&chapter, x, config.origin_y, config.pad, config.level_step);
        if nodes.is_empty() {
            tracing::warn!(chapter = %chapter, "chapter has no nodes");
        }
        let links = graph.chapter_links(&nodes);
        let origin_x = x;
        x = max_x + config.gap;
        chapters.push(ChapterLayout {
            chapter,
            origin_x,
            origin_y: config.origin_y,
            nodes,
            links,
            max_x,
        });
    }

    let (min_x, min_y, max_x, max_y) = bounds(&chapters, config);
    let layout = Layout {
        chapters,
        min_x,
        min_y,
        width: max_x - min_x,
        height: max_y - min_y,
    };
    tracing::info!(
        chapters = layout.chapters.len(),
        nodes = layout.node_count(),
        width = layout.width,
        "computed layout"
    );
    layout
}

fn bounds(chapters: &[ChapterLayout], config: &LayoutConfig) -> (f32, f32, f32, f32) {
    let mut min_x = config.origin_x;
    let mut min_y = config.origin_y;
    let mut max_x = config.origin_x;
    let mut max_y = config.origin_y;
    for node in chapters.iter().flat_map(|chapter| &chapter.nodes) {
        min_x = min_x.min(node.x);
        min_y = min_y.min(node.y);
        max_x = max_x.max(node.x);
        max_y = max_y.max(node.y);
    }
    (min_x, min_y, max_x, max_y)
}
