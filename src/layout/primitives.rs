use super::*;

impl Layout {
    /// Flattens the layout into paint order: each band's background followed
    /// by its component bars, then connectors, then connection labels.
    pub fn primitives(&self) -> Vec<DrawPrimitive> {
        let block_count: usize = self.bands.iter().map(|band| band.blocks.len()).sum();
        let mut out =
            Vec::with_capacity(self.bands.len() + block_count + self.connectors.len() * 2);

        for band in &self.bands {
            out.push(DrawPrimitive::Bar {
                row: band.row,
                x_start: self.band_range.0,
                x_end: self.band_range.1,
                color: band.color.clone(),
                opacity: self.band_opacity,
                text: None,
            });
            for block in &band.blocks {
                out.push(DrawPrimitive::Bar {
                    row: band.row,
                    x_start: block.x_start,
                    x_end: block.x_end(),
                    color: band.color.clone(),
                    opacity: self.block_opacity,
                    text: Some(block.component.clone()),
                });
            }
        }

        for connector in &self.connectors {
            out.push(DrawPrimitive::Polyline {
                points: connector.points.to_vec(),
                width: self.connector_width,
                marker_start: connector.marker_start,
                marker_end: connector.marker_end,
            });
        }

        for label in &self.labels {
            out.push(DrawPrimitive::Text {
                x: label.x,
                y: label.y,
                text: label.text.clone(),
            });
        }

        out
    }
}
