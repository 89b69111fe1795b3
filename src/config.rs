use crate::layout::LEVEL_STEP;
use crate::theme::{DrawStyle, Shape};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub origin_x: f32,
    pub origin_y: f32,
    /// Horizontal space between the rightmost node of a chapter and the next chapter.
    pub gap: f32,
    /// Spread between nodes that land in the same displacement slot.
    pub pad: f32,
    pub level_step: f32,
    /// Explicit chapter subset. Takes precedence over `excluded_chapters`.
    pub chapters: Option<Vec<String>>,
    pub excluded_chapters: Vec<String>,
}

impl LayoutConfig {
    pub fn minimap() -> Self {
        Self {
            gap: 100.0,
            pad: 10.0,
            ..Self::default()
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            origin_x: 0.0,
            origin_y: 0.0,
            gap: 300.0,
            pad: 50.0,
            level_step: LEVEL_STEP,
            chapters: None,
            excluded_chapters: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            background: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub draw: DrawStyle,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Config {
    pub fn minimap() -> Self {
        let draw = DrawStyle::minimap();
        let render = RenderConfig {
            background: draw.background.clone(),
            ..Default::default()
        };
        Self {
            draw,
            layout: LayoutConfig::minimap(),
            render,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let draw = DrawStyle::normal();
        let render = RenderConfig {
            background: draw.background.clone(),
            ..Default::default()
        };
        Self {
            draw,
            layout: LayoutConfig::default(),
            render,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DrawStyleFile {
    x_offset: Option<f32>,
    y_offset: Option<f32>,
    shape: Option<Shape>,
    size: Option<f32>,
    fill: Option<String>,
    text_font_size: Option<f32>,
    text_fill: Option<String>,
    minimap: Option<bool>,
    font_family: Option<String>,
    line_color: Option<String>,
    background: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    origin_x: Option<f32>,
    origin_y: Option<f32>,
    gap: Option<f32>,
    pad: Option<f32>,
    level_step: Option<f32>,
    chapters: Option<Vec<String>>,
    excluded_chapters: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    width: Option<f32>,
    height: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    mode: Option<String>,
    draw: Option<DrawStyleFile>,
    layout: Option<LayoutConfigFile>,
    render: Option<RenderConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    let config = parse_config(&contents)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    let mut config = match parsed.mode.as_deref() {
        None | Some("normal") => Config::default(),
        Some("minimap") => Config::minimap(),
        Some(other) => return Err(anyhow::anyhow!("unknown config mode {other:?}")),
    };

    if let Some(draw) = parsed.draw {
        let style = &mut config.draw;
        if let Some(v) = draw.x_offset {
            style.x_offset = v;
        }
        if let Some(v) = draw.y_offset {
            style.y_offset = v;
        }
        if let Some(v) = draw.shape {
            style.shape = v;
        }
        if let Some(v) = draw.size {
            style.size = v;
        }
        if let Some(v) = draw.fill {
            style.fill = v;
        }
        if let Some(v) = draw.text_font_size {
            style.text_font_size = v;
        }
        if let Some(v) = draw.text_fill {
            style.text_fill = v;
        }
        if let Some(v) = draw.minimap {
            style.minimap = v;
        }
        if let Some(v) = draw.font_family {
            style.font_family = v;
        }
        if let Some(v) = draw.line_color {
            style.line_color = v;
        }
        if let Some(v) = draw.background {
            config.render.background = v.clone();
            style.background = v;
        }
    }

    if let Some(layout) = parsed.layout {
        let target = &mut config.layout;
        if let Some(v) = layout.origin_x {
            target.origin_x = v;
        }
        if let Some(v) = layout.origin_y {
            target.origin_y = v;
        }
        if let Some(v) = layout.gap {
            target.gap = v;
        }
        if let Some(v) = layout.pad {
            target.pad = v;
        }
        if let Some(v) = layout.level_step {
            target.level_step = v;
        }
        if let Some(v) = layout.chapters {
            target.chapters = Some(v);
        }
        if let Some(v) = layout.excluded_chapters {
            target.excluded_chapters = v;
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.width {
            config.render.width = v;
        }
        if let Some(v) = render.height {
            config.render.height = v;
        }
    }

    Ok(config)
}
