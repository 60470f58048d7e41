mod error;
mod geometry;
mod primitives;
mod stack;
pub(crate) mod types;
pub use error::LayoutError;
pub use geometry::{resolve_components, resolve_connections, resolve_labels};
pub use stack::build_slots;
pub use types::*;

use crate::config::LayoutConfig;
use crate::ir::{ConnectionSpec, Diagram, LayerSpec};
use log::{debug, info};
use std::collections::BTreeMap;

/// Runs the full layout pass: slots, component blocks, connectors and labels.
///
/// The only failure is a repeated layer name. Connections to unknown layers
/// are dropped.
pub fn compute_layout(diagram: &Diagram, config: &LayoutConfig) -> Result<Layout, LayoutError> {
    let slots = build_slots(&diagram.layers)?;
    debug!(layers = slots.len(); "Layer slots assigned");

    let bands: Vec<LayerBand> = diagram
        .layers
        .iter()
        .map(|layer| LayerBand {
            name: layer.name.clone(),
            color: layer.color.clone(),
            row: slots[layer.name.as_str()].display_index,
            blocks: resolve_components(layer, config),
        })
        .collect();

    let connectors = resolve_connections(&diagram.connections, &slots, config);
    let labels = resolve_labels(&diagram.connections, &slots, config);
    info!(
        layers = bands.len(),
        connectors = connectors.len(),
        skipped = diagram.connections.len() - connectors.len();
        "Layout computed"
    );

    Ok(Layout {
        title: diagram.title.clone(),
        rows: bands.len(),
        x_range: (config.x_min, config.x_max),
        band_range: (config.band_start, config.band_end),
        band_opacity: config.band_opacity,
        block_opacity: config.block_opacity,
        connector_width: config.connector_width,
        bands,
        connectors,
        labels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_layer_diagram() -> Diagram {
        Diagram {
            title: None,
            layers: vec![
                LayerSpec::new("A", &["comp1", "comp2"], "#1FB8CD"),
                LayerSpec::new("B", &["comp1"], "#DB4545"),
            ],
            connections: vec![ConnectionSpec::new("A", "B", "HTTPS", 9.5)],
        }
    }

    #[test]
    fn layout_places_two_layers() {
        let layout = compute_layout(&two_layer_diagram(), &LayoutConfig::default()).unwrap();
        assert_eq!(layout.rows, 2);
        assert_eq!(layout.x_range, (0.0, 11.0));
        let a = layout.band("A").unwrap();
        let b = layout.band("B").unwrap();
        assert_eq!((a.row, b.row), (1, 0));
        assert_eq!(a.blocks.len(), 2);
        assert!((a.blocks[0].width - 3.2).abs() < 1e-4);
        assert!((b.blocks[0].width - 6.4).abs() < 1e-4);
        assert_eq!(layout.connectors.len(), 1);
        assert_eq!(layout.connectors[0].points, [(9.5, 1.0), (9.5, 0.0)]);
        assert_eq!(layout.labels[0].y, 0.0);
    }

    #[test]
    fn unknown_layer_connection_is_dropped() {
        let mut diagram = two_layer_diagram();
        diagram.connections = vec![ConnectionSpec::new("A", "C", "gRPC", 9.5)];
        let layout = compute_layout(&diagram, &LayoutConfig::default()).unwrap();
        assert!(layout.connectors.is_empty());
        assert!(layout.labels.is_empty());
        assert_eq!(layout.bands.len(), 2);
    }

    #[test]
    fn duplicate_layer_is_an_error() {
        let mut diagram = two_layer_diagram();
        diagram.layers.push(LayerSpec::new("A", &[], "#000000"));
        let err = compute_layout(&diagram, &LayoutConfig::default()).unwrap_err();
        assert_eq!(err.to_string(), "duplicate layer name: \"A\"");
    }

    #[test]
    fn empty_diagram_is_nothing_to_draw() {
        let layout = compute_layout(&Diagram::new(), &LayoutConfig::default()).unwrap();
        assert!(layout.is_empty());
        assert!(layout.primitives().is_empty());
    }

    #[test]
    fn layout_is_deterministic() {
        let diagram = Diagram::sample();
        let config = LayoutConfig::default();
        let first = compute_layout(&diagram, &config).unwrap();
        let second = compute_layout(&diagram, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn custom_span_is_honoured() {
        let config = LayoutConfig {
            span: 4.0,
            span_offset: 2.0,
            ..LayoutConfig::default()
        };
        let layout = compute_layout(&two_layer_diagram(), &config).unwrap();
        let a = layout.band("A").unwrap();
        assert!((a.blocks[0].x_start - 2.2).abs() < 1e-4);
        assert!((a.blocks[1].x_end() - 5.8).abs() < 1e-4);
    }
}
