use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Circle,
    Square,
    Diamond,
}

/// Renderer styling: canvas offset, node glyph and label appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawStyle {
    pub x_offset: f32,
    pub y_offset: f32,
    pub shape: Shape,
    pub size: f32,
    pub fill: String,
    pub text_font_size: f32,
    pub text_fill: String,
    pub minimap: bool,
    pub font_family: String,
    pub line_color: String,
    pub background: String,
}

impl DrawStyle {
    pub fn normal() -> Self {
        Self {
            x_offset: 20.0,
            y_offset: 20.0,
            shape: Shape::Circle,
            size: 5.0,
            fill: "#CC5500".to_string(),
            text_font_size: 12.0,
            text_fill: "black".to_string(),
            minimap: false,
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            line_color: "#7A8AA6".to_string(),
            background: "#FFFFFF".to_string(),
        }
    }

    /// Reduced-fidelity overview: chapter labels only, larger type.
    pub fn minimap() -> Self {
        Self {
            text_font_size: 24.0,
            minimap: true,
            ..Self::normal()
        }
    }
}

impl Default for DrawStyle {
    fn default() -> Self {
        Self::normal()
    }
}
