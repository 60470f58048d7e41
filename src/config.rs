use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Geometry constants of the layer stack, in data units.
///
/// Components share `span` units starting at `span_offset`; each block fills
/// `block_fill_ratio` of its share and is centered in it. Background bands run
/// from `band_start` to `band_end`, and the plotted x axis covers
/// `x_min..x_max`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub span: f32,
    pub span_offset: f32,
    pub block_fill_ratio: f32,
    pub band_start: f32,
    pub band_end: f32,
    pub x_min: f32,
    pub x_max: f32,
    pub label_offset_x: f32,
    pub band_opacity: f32,
    pub block_opacity: f32,
    pub connector_width: f32,
    pub start_marker_size: f32,
    pub end_marker_size: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            span: 8.0,
            span_offset: 1.0,
            block_fill_ratio: 0.8,
            band_start: 0.0,
            band_end: 10.0,
            x_min: 0.0,
            x_max: 11.0,
            label_offset_x: 0.2,
            band_opacity: 0.3,
            block_opacity: 0.8,
            connector_width: 2.0,
            start_marker_size: 4.0,
            end_marker_size: 8.0,
        }
    }
}

/// Canvas size and margins, in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    /// Fraction of a row taken by its bars.
    pub bar_thickness: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            margin_left: 140.0,
            margin_right: 40.0,
            margin_top: 80.0,
            margin_bottom: 40.0,
            bar_thickness: 0.8,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutConfigFile>,
    render: Option<RenderConfigFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    title_font_size: Option<f32>,
    axis_font_size: Option<f32>,
    component_font_size: Option<f32>,
    label_font_size: Option<f32>,
    title_color: Option<String>,
    axis_text_color: Option<String>,
    component_text_color: Option<String>,
    label_color: Option<String>,
    line_color: Option<String>,
    background: Option<String>,
    plot_background: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    span: Option<f32>,
    span_offset: Option<f32>,
    block_fill_ratio: Option<f32>,
    band_start: Option<f32>,
    band_end: Option<f32>,
    x_min: Option<f32>,
    x_max: Option<f32>,
    label_offset_x: Option<f32>,
    band_opacity: Option<f32>,
    block_opacity: Option<f32>,
    connector_width: Option<f32>,
    start_marker_size: Option<f32>,
    end_marker_size: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    width: Option<f32>,
    height: Option<f32>,
    margin_left: Option<f32>,
    margin_right: Option<f32>,
    margin_top: Option<f32>,
    margin_bottom: Option<f32>,
    bar_thickness: Option<f32>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        config.theme = Theme::from_name(theme_name)
            .ok_or_else(|| anyhow::anyhow!("Unknown theme: {theme_name}"))?;
    }

    if let Some(vars) = parsed.theme_variables {
        let theme = &mut config.theme;
        if let Some(v) = vars.font_family {
            theme.font_family = v;
        }
        if let Some(v) = vars.title_font_size {
            theme.title_font_size = v;
        }
        if let Some(v) = vars.axis_font_size {
            theme.axis_font_size = v;
        }
        if let Some(v) = vars.component_font_size {
            theme.component_font_size = v;
        }
        if let Some(v) = vars.label_font_size {
            theme.label_font_size = v;
        }
        if let Some(v) = vars.title_color {
            theme.title_color = v;
        }
        if let Some(v) = vars.axis_text_color {
            theme.axis_text_color = v;
        }
        if let Some(v) = vars.component_text_color {
            theme.component_text_color = v;
        }
        if let Some(v) = vars.label_color {
            theme.label_color = v;
        }
        if let Some(v) = vars.line_color {
            theme.line_color = v;
        }
        if let Some(v) = vars.background {
            theme.background = v;
        }
        if let Some(v) = vars.plot_background {
            theme.plot_background = v;
        }
    }

    if let Some(layout) = parsed.layout {
        let target = &mut config.layout;
        if let Some(v) = layout.span {
            target.span = v;
        }
        if let Some(v) = layout.span_offset {
            target.span_offset = v;
        }
        if let Some(v) = layout.block_fill_ratio {
            target.block_fill_ratio = v;
        }
        if let Some(v) = layout.band_start {
            target.band_start = v;
        }
        if let Some(v) = layout.band_end {
            target.band_end = v;
        }
        if let Some(v) = layout.x_min {
            target.x_min = v;
        }
        if let Some(v) = layout.x_max {
            target.x_max = v;
        }
        if let Some(v) = layout.label_offset_x {
            target.label_offset_x = v;
        }
        if let Some(v) = layout.band_opacity {
            target.band_opacity = v;
        }
        if let Some(v) = layout.block_opacity {
            target.block_opacity = v;
        }
        if let Some(v) = layout.connector_width {
            target.connector_width = v;
        }
        if let Some(v) = layout.start_marker_size {
            target.start_marker_size = v;
        }
        if let Some(v) = layout.end_marker_size {
            target.end_marker_size = v;
        }
    }

    if let Some(render) = parsed.render {
        let target = &mut config.render;
        if let Some(v) = render.width {
            target.width = v;
        }
        if let Some(v) = render.height {
            target.height = v;
        }
        if let Some(v) = render.margin_left {
            target.margin_left = v;
        }
        if let Some(v) = render.margin_right {
            target.margin_right = v;
        }
        if let Some(v) = render.margin_top {
            target.margin_top = v;
        }
        if let Some(v) = render.margin_bottom {
            target.margin_bottom = v;
        }
        if let Some(v) = render.bar_thickness {
            target.bar_thickness = v;
        }
    }

    if config.layout.x_max <= config.layout.x_min {
        return Err(anyhow::anyhow!(
            "layout.xMax ({}) must be greater than layout.xMin ({})",
            config.layout.x_max,
            config.layout.x_min
        ));
    }

    Ok(config)
}
