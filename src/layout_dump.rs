use crate::layout::{DrawPrimitive, Layout, MarkerShape};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub title: Option<String>,
    pub rows: usize,
    pub x_range: [f32; 2],
    pub layers: Vec<LayerDump>,
    pub connectors: Vec<ConnectorDump>,
    pub labels: Vec<LabelDump>,
    pub primitives: Vec<DrawPrimitive>,
}

#[derive(Debug, Serialize)]
pub struct LayerDump {
    pub name: String,
    pub row: usize,
    pub color: String,
    pub blocks: Vec<BlockDump>,
}

#[derive(Debug, Serialize)]
pub struct BlockDump {
    pub component: String,
    pub x_start: f32,
    pub width: f32,
}

#[derive(Debug, Serialize)]
pub struct ConnectorDump {
    pub from: String,
    pub to: String,
    pub label: String,
    pub x: f32,
    pub from_row: usize,
    pub to_row: usize,
    pub marker_start: String,
    pub marker_end: String,
}

#[derive(Debug, Serialize)]
pub struct LabelDump {
    pub text: String,
    pub x: f32,
    pub y: f32,
}

fn marker_name(shape: MarkerShape) -> &'static str {
    match shape {
        MarkerShape::Circle => "circle",
        MarkerShape::TriangleDown => "triangle-down",
    }
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout) -> Self {
        let layers = layout
            .bands
            .iter()
            .map(|band| LayerDump {
                name: band.name.clone(),
                row: band.row,
                color: band.color.clone(),
                blocks: band
                    .blocks
                    .iter()
                    .map(|block| BlockDump {
                        component: block.component.clone(),
                        x_start: block.x_start,
                        width: block.width,
                    })
                    .collect(),
            })
            .collect();

        let connectors = layout
            .connectors
            .iter()
            .map(|connector| ConnectorDump {
                from: connector.from.clone(),
                to: connector.to.clone(),
                label: connector.label.clone(),
                x: connector.x,
                from_row: connector.from_row,
                to_row: connector.to_row,
                marker_start: format!(
                    "{}:{}",
                    marker_name(connector.marker_start.shape),
                    connector.marker_start.size
                ),
                marker_end: format!(
                    "{}:{}",
                    marker_name(connector.marker_end.shape),
                    connector.marker_end.size
                ),
            })
            .collect();

        let labels = layout
            .labels
            .iter()
            .map(|label| LabelDump {
                text: label.text.clone(),
                x: label.x,
                y: label.y,
            })
            .collect();

        LayoutDump {
            title: layout.title.clone(),
            rows: layout.rows,
            x_range: [layout.x_range.0, layout.x_range.1],
            layers,
            connectors,
            labels,
            primitives: layout.primitives(),
        }
    }
}

pub fn layout_dump_json(layout: &Layout) -> anyhow::Result<String> {
    let dump = LayoutDump::from_layout(layout);
    Ok(serde_json::to_string_pretty(&dump)?)
}

pub fn write_layout_dump(path: &Path, layout: &Layout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::ir::Diagram;
    use crate::layout::compute_layout;

    #[test]
    fn dump_is_byte_identical_across_runs() {
        let diagram = Diagram::sample();
        let config = LayoutConfig::default();
        let first = layout_dump_json(&compute_layout(&diagram, &config).unwrap()).unwrap();
        let second = layout_dump_json(&compute_layout(&diagram, &config).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn dump_names_markers() {
        let layout = compute_layout(&Diagram::sample(), &LayoutConfig::default()).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&layout_dump_json(&layout).unwrap()).unwrap();
        assert_eq!(value["connectors"][0]["marker_start"], "circle:4");
        assert_eq!(value["connectors"][0]["marker_end"], "triangle-down:8");
        assert_eq!(value["layers"][0]["name"], "Client Apps");
        assert_eq!(value["layers"][0]["row"], 6);
        assert_eq!(value["primitives"][0]["kind"], "bar");
    }

    #[test]
    fn writes_dump_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        let layout = compute_layout(&Diagram::sample(), &LayoutConfig::default()).unwrap();
        write_layout_dump(&path, &layout).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"Redis Cluster\""));
    }
}
