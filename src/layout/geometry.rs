use super::*;

/// Splits the horizontal span evenly between a layer's components.
///
/// Each block fills `block_fill_ratio` of its share and is centered in it, so
/// neighbouring blocks never touch. A layer without components yields no
/// blocks.
pub fn resolve_components(layer: &LayerSpec, config: &LayoutConfig) -> Vec<ComponentBlock> {
    let count = layer.components.len().max(1) as f32;
    let share = config.span / count;
    let width = share * config.block_fill_ratio;
    let pad = (share - width) / 2.0;

    layer
        .components
        .iter()
        .enumerate()
        .map(|(idx, component)| ComponentBlock {
            component: component.clone(),
            layer: layer.name.clone(),
            x_start: config.span_offset + idx as f32 * share + pad,
            width,
        })
        .collect()
}

fn lookup<'s, 'a>(
    slots: &'s BTreeMap<&str, LayerSlot<'a>>,
    connection: &ConnectionSpec,
) -> Option<(&'s LayerSlot<'a>, &'s LayerSlot<'a>)> {
    let from = slots.get(connection.from.as_str());
    let to = slots.get(connection.to.as_str());
    match (from, to) {
        (Some(from), Some(to)) => Some((from, to)),
        _ => {
            debug!(
                from = connection.from.as_str(),
                to = connection.to.as_str(),
                label = connection.label.as_str(),
                from_found = from.is_some(),
                to_found = to.is_some();
                "Skipping connection with unknown endpoint"
            );
            None
        }
    }
}

/// Resolves connections to vertical connectors.
///
/// Connections naming a layer that is not in `slots` are skipped without
/// error.
pub fn resolve_connections(
    connections: &[ConnectionSpec],
    slots: &BTreeMap<&str, LayerSlot<'_>>,
    config: &LayoutConfig,
) -> Vec<ConnectorGeometry> {
    connections
        .iter()
        .filter_map(|connection| {
            let (from, to) = lookup(slots, connection)?;
            let x = connection.anchor_x;
            Some(ConnectorGeometry {
                from: connection.from.clone(),
                to: connection.to.clone(),
                from_row: from.display_index,
                to_row: to.display_index,
                x,
                points: [(x, from.row()), (x, to.row())],
                marker_start: Marker {
                    shape: MarkerShape::Circle,
                    size: config.start_marker_size,
                },
                marker_end: Marker {
                    shape: MarkerShape::TriangleDown,
                    size: config.end_marker_size,
                },
                label: connection.label.clone(),
            })
        })
        .collect()
}

/// Places each connection's label on its destination row, just right of the
/// connector unless the connection pins `label_x`.
pub fn resolve_labels(
    connections: &[ConnectionSpec],
    slots: &BTreeMap<&str, LayerSlot<'_>>,
    config: &LayoutConfig,
) -> Vec<LabelAnchor> {
    connections
        .iter()
        .filter_map(|connection| {
            let (_, to) = lookup(slots, connection)?;
            Some(LabelAnchor {
                text: connection.label.clone(),
                x: connection
                    .label_x
                    .unwrap_or(connection.anchor_x + config.label_offset_x),
                y: to.row(),
            })
        })
        .collect()
}
