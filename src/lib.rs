#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod graph;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod numbering;
pub mod render;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, RenderConfig, load_config};
pub use dataset::{load_dataset, parse_dataset};
pub use error::{Error, Result};
pub use graph::{AdjacencyEntry, AdjacencyList, Graph};
pub use ir::{Node, NodeStore, Properties};
pub use layout::{ChapterLayout, Layout, NodeVisualizer, PositionedNode, compute_layout};
pub use render::render_svg;
pub use theme::{DrawStyle, Shape};
