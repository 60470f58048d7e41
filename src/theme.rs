use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub title_font_size: f32,
    pub axis_font_size: f32,
    pub component_font_size: f32,
    pub label_font_size: f32,
    pub min_component_font_size: f32,
    pub title_color: String,
    pub axis_text_color: String,
    pub component_text_color: String,
    pub label_color: String,
    pub line_color: String,
    pub background: String,
    pub plot_background: String,
}

impl Theme {
    /// Matches the look of a plotly figure with a white template.
    pub fn plotly() -> Self {
        Self {
            font_family: "\"Open Sans\", verdana, arial, sans-serif".to_string(),
            title_font_size: 17.0,
            axis_font_size: 12.0,
            component_font_size: 10.0,
            label_font_size: 9.0,
            min_component_font_size: 6.0,
            title_color: "#2A3F5F".to_string(),
            axis_text_color: "#2A3F5F".to_string(),
            component_text_color: "white".to_string(),
            label_color: "black".to_string(),
            line_color: "black".to_string(),
            background: "white".to_string(),
            plot_background: "white".to_string(),
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            title_font_size: 18.0,
            axis_font_size: 12.0,
            component_font_size: 11.0,
            label_font_size: 10.0,
            min_component_font_size: 7.0,
            title_color: "#1C2430".to_string(),
            axis_text_color: "#1C2430".to_string(),
            component_text_color: "#FFFFFF".to_string(),
            label_color: "#1C2430".to_string(),
            line_color: "#3D4A5E".to_string(),
            background: "#FFFFFF".to_string(),
            plot_background: "#F8FAFF".to_string(),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "plotly" | "default" | "white" => Some(Self::plotly()),
            "modern" => Some(Self::modern()),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::plotly()
    }
}
