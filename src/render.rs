use crate::config::RenderConfig;
use crate::layout::{ChapterLayout, Layout, PositionedNode};
use crate::theme::{DrawStyle, Shape};
use anyhow::Result;
use std::collections::HashMap;
use std::path::Path;

const CANVAS_MARGIN: f32 = 40.0;
const LABEL_GAP: f32 = 4.0;

pub fn render_svg(layout: &Layout, style: &DrawStyle) -> String {
    let mut svg = String::new();
    let (shift_x, shift_y) = canvas_shift(style);
    let right = (layout.min_x + layout.width).max(0.0);
    let bottom = (layout.min_y + layout.height).max(0.0);
    let width = (right + style.x_offset * 2.0 + CANVAS_MARGIN).max(200.0);
    let height = (bottom + style.y_offset * 2.0 + CANVAS_MARGIN).max(200.0);

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        style.background
    ));

    for chapter in &layout.chapters {
        let place = |node: &PositionedNode| (node.x + shift_x, node.y + shift_y);
        svg.push_str(&format!(
            "<g class=\"chapter\" data-chapter=\"{}\">",
            escape_xml(&chapter.chapter)
        ));
        svg.push_str(&links_svg(chapter, style, &place));
        for node in &chapter.nodes {
            let (x, y) = place(node);
            svg.push_str(&glyph_svg(x, y, style));
            if !style.minimap {
                let label = node
                    .properties
                    .get(crate::ir::NUMBER_KEY)
                    .unwrap_or(&node.id);
                svg.push_str(&label_svg(x + style.size + LABEL_GAP, y, label, style));
            }
        }
        if style.minimap {
            if let Some(first) = chapter.nodes.first() {
                let (x, _) = place(first);
                let y = chapter.origin_y + shift_y - style.size - LABEL_GAP;
                svg.push_str(&label_svg(x, y, &chapter.chapter, style));
            }
        }
        svg.push_str("</g>");
    }

    svg.push_str("</svg>");
    svg
}

/// Layout coordinates are drawn as-is, displaced by the configured offsets.
/// Nodes plotted at negative coordinates fall outside the canvas.
fn canvas_shift(style: &DrawStyle) -> (f32, f32) {
    (style.x_offset, style.y_offset)
}

fn links_svg(
    chapter: &ChapterLayout,
    style: &DrawStyle,
    place: &dyn Fn(&PositionedNode) -> (f32, f32),
) -> String {
    let by_id: HashMap<&str, &PositionedNode> = chapter
        .nodes
        .iter()
        .map(|node| (node.id.as_str(), node))
        .collect();
    let stroke = if style.minimap { 0.6 } else { 1.2 };
    let mut out = String::new();
    for link in &chapter.links {
        let (Some(from), Some(to)) = (by_id.get(link.from.as_str()), by_id.get(link.to.as_str()))
        else {
            continue;
        };
        let (x1, y1) = place(*from);
        let (x2, y2) = place(*to);
        out.push_str(&format!(
            "<path d=\"M {x1:.2} {y1:.2} L {x1:.2} {y2:.2} L {x2:.2} {y2:.2}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{stroke}\"/>",
            style.line_color
        ));
    }
    out
}

fn glyph_svg(x: f32, y: f32, style: &DrawStyle) -> String {
    let r = style.size;
    match style.shape {
        Shape::Circle => format!(
            "<circle cx=\"{x:.2}\" cy=\"{y:.2}\" r=\"{r:.2}\" fill=\"{}\"/>",
            style.fill
        ),
        Shape::Square => format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\"/>",
            x - r,
            y - r,
            r * 2.0,
            r * 2.0,
            style.fill
        ),
        Shape::Diamond => format!(
            "<path d=\"M {x:.2} {:.2} L {:.2} {y:.2} L {x:.2} {:.2} L {:.2} {y:.2} z\" fill=\"{}\"/>",
            y - r,
            x + r,
            y + r,
            x - r,
            style.fill
        ),
    }
}

fn label_svg(x: f32, y: f32, text: &str, style: &DrawStyle) -> String {
    let baseline = y + style.text_font_size * 0.35;
    format!(
        "<text x=\"{x:.2}\" y=\"{baseline:.2}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
        escape_xml(&style.font_family),
        style.text_font_size,
        style.text_fill,
        escape_xml(text)
    )
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = "Inter".to_string();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .ok_or_else(|| anyhow::anyhow!("Invalid render size"))?;

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;
    pixmap.fill(parse_background(&render_cfg.background));

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(feature = "png")]
fn parse_background(color: &str) -> resvg::tiny_skia::Color {
    let hex = color.trim().trim_start_matches('#');
    if hex.len() == 6 {
        if let Ok(value) = u32::from_str_radix(hex, 16) {
            let r = ((value >> 16) & 0xFF) as u8;
            let g = ((value >> 8) & 0xFF) as u8;
            let b = (value & 0xFF) as u8;
            return resvg::tiny_skia::Color::from_rgba8(r, g, b, 255);
        }
    }
    resvg::tiny_skia::Color::WHITE
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(_svg: &str, _output: &Path, _render_cfg: &RenderConfig) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
