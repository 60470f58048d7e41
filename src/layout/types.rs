use crate::ir::LayerSpec;
use serde::Serialize;

/// A layer placed in the stack. Row 0 is the bottom of the diagram; the
/// first declared layer gets the highest row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerSlot<'a> {
    pub layer: &'a LayerSpec,
    pub display_index: usize,
}

impl LayerSlot<'_> {
    /// The slot's row as a plotted y value.
    pub fn row(&self) -> f32 {
        self.display_index as f32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentBlock {
    pub component: String,
    pub layer: String,
    pub x_start: f32,
    pub width: f32,
}

impl ComponentBlock {
    pub fn x_end(&self) -> f32 {
        self.x_start + self.width
    }

    pub fn center_x(&self) -> f32 {
        self.x_start + self.width / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerShape {
    Circle,
    TriangleDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Marker {
    pub shape: MarkerShape,
    pub size: f32,
}

/// A vertical connector between two layer rows at a fixed column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectorGeometry {
    pub from: String,
    pub to: String,
    pub from_row: usize,
    pub to_row: usize,
    pub x: f32,
    pub points: [(f32, f32); 2],
    pub marker_start: Marker,
    pub marker_end: Marker,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelAnchor {
    pub text: String,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerBand {
    pub name: String,
    pub color: String,
    pub row: usize,
    pub blocks: Vec<ComponentBlock>,
}

/// Everything the renderer needs, in data units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Option<String>,
    pub rows: usize,
    pub x_range: (f32, f32),
    pub band_range: (f32, f32),
    pub band_opacity: f32,
    pub block_opacity: f32,
    pub connector_width: f32,
    /// Bands in declaration order, so the first entry is the top row.
    pub bands: Vec<LayerBand>,
    pub connectors: Vec<ConnectorGeometry>,
    pub labels: Vec<LabelAnchor>,
}

impl Layout {
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    pub fn band(&self, name: &str) -> Option<&LayerBand> {
        self.bands.iter().find(|band| band.name == name)
    }
}

/// Flat, ordered drawing instructions. Rows are plotted y values; x values
/// are data units within [`Layout::x_range`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum DrawPrimitive {
    Bar {
        row: usize,
        x_start: f32,
        x_end: f32,
        color: String,
        opacity: f32,
        text: Option<String>,
    },
    Polyline {
        points: Vec<(f32, f32)>,
        width: f32,
        marker_start: Marker,
        marker_end: Marker,
    },
    Text {
        x: f32,
        y: f32,
        text: String,
    },
}
