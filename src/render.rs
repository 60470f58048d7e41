use crate::config::RenderConfig;
use crate::layout::{DrawPrimitive, Layout, Marker, MarkerShape};
use crate::theme::Theme;
use anyhow::Result;
use log::debug;
use std::fmt::Write as _;
use std::path::Path;

// Rough advance of an average glyph relative to the font size.
const AVG_CHAR_WIDTH: f32 = 0.56;
const BAR_TEXT_PAD: f32 = 4.0;
const TICK_GAP: f32 = 8.0;
// Shifts text drawn on a row center so it looks vertically centered.
const BASELINE_SHIFT: f32 = 0.35;

/// Maps data units and rows onto the pixel canvas.
struct Frame {
    left: f32,
    top: f32,
    plot_width: f32,
    row_height: f32,
    rows: usize,
    x_min: f32,
    x_span: f32,
}

impl Frame {
    fn new(layout: &Layout, config: &RenderConfig) -> Self {
        let plot_width = (config.width - config.margin_left - config.margin_right).max(1.0);
        let plot_height = (config.height - config.margin_top - config.margin_bottom).max(1.0);
        let rows = layout.rows.max(1);
        Self {
            left: config.margin_left,
            top: config.margin_top,
            plot_width,
            row_height: plot_height / rows as f32,
            rows,
            x_min: layout.x_range.0,
            x_span: (layout.x_range.1 - layout.x_range.0).max(f32::EPSILON),
        }
    }

    fn x(&self, x: f32) -> f32 {
        self.left + (x - self.x_min) / self.x_span * self.plot_width
    }

    /// Center of a row; the highest row is drawn at the top.
    fn y(&self, row: f32) -> f32 {
        self.top + (self.rows as f32 - 1.0 - row + 0.5) * self.row_height
    }
}

pub fn render_svg(layout: &Layout, theme: &Theme, config: &RenderConfig) -> String {
    let width = config.width;
    let height = config.height;
    let frame = Frame::new(layout, config);
    let mut svg = String::new();

    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    );
    let _ = write!(
        svg,
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    );
    let _ = write!(
        svg,
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\"/>",
        frame.left,
        frame.top,
        frame.plot_width,
        frame.row_height * frame.rows as f32,
        theme.plot_background
    );

    if let Some(title) = layout.title.as_deref() {
        let _ = write!(
            svg,
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            width / 2.0,
            config.margin_top / 2.0 + theme.title_font_size * BASELINE_SHIFT,
            escape_xml(&theme.font_family),
            theme.title_font_size,
            theme.title_color,
            escape_xml(title)
        );
    }

    for band in &layout.bands {
        let _ = write!(
            svg,
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"end\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            frame.left - TICK_GAP,
            frame.y(band.row as f32) + theme.axis_font_size * BASELINE_SHIFT,
            escape_xml(&theme.font_family),
            theme.axis_font_size,
            theme.axis_text_color,
            escape_xml(&band.name)
        );
    }

    let primitives = layout.primitives();
    debug!(primitives = primitives.len(); "Rendering SVG");
    for primitive in &primitives {
        draw_primitive(&mut svg, primitive, &frame, theme, config);
    }

    svg.push_str("</svg>");
    svg
}

fn draw_primitive(
    svg: &mut String,
    primitive: &DrawPrimitive,
    frame: &Frame,
    theme: &Theme,
    config: &RenderConfig,
) {
    match primitive {
        DrawPrimitive::Bar {
            row,
            x_start,
            x_end,
            color,
            opacity,
            text,
        } => {
            let bar_height = frame.row_height * config.bar_thickness;
            let center_y = frame.y(*row as f32);
            let x = frame.x(*x_start);
            let bar_width = frame.x(*x_end) - x;
            let _ = write!(
                svg,
                "<rect x=\"{x:.2}\" y=\"{:.2}\" width=\"{bar_width:.2}\" height=\"{bar_height:.2}\" fill=\"{}\" fill-opacity=\"{opacity}\"/>",
                center_y - bar_height / 2.0,
                escape_xml(color)
            );
            if let Some(text) = text {
                let (fitted, size) = fit_text(
                    text,
                    bar_width - BAR_TEXT_PAD * 2.0,
                    theme.component_font_size,
                    theme.min_component_font_size,
                );
                if !fitted.is_empty() {
                    let _ = write!(
                        svg,
                        "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{size:.2}\" fill=\"{}\">{}</text>",
                        x + bar_width / 2.0,
                        center_y + size * BASELINE_SHIFT,
                        escape_xml(&theme.font_family),
                        theme.component_text_color,
                        escape_xml(&fitted)
                    );
                }
            }
        }
        DrawPrimitive::Polyline {
            points,
            width,
            marker_start,
            marker_end,
        } => {
            let pixels: Vec<(f32, f32)> = points
                .iter()
                .map(|(x, row)| (frame.x(*x), frame.y(*row)))
                .collect();
            let _ = write!(
                svg,
                "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{width}\"/>",
                points_to_path(&pixels),
                theme.line_color
            );
            if let (Some(first), Some(last)) = (pixels.first(), pixels.last()) {
                draw_marker(svg, *marker_start, *first, theme);
                draw_marker(svg, *marker_end, *last, theme);
            }
        }
        DrawPrimitive::Text { x, y, text } => {
            let _ = write!(
                svg,
                "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
                frame.x(*x),
                frame.y(*y) + theme.label_font_size * BASELINE_SHIFT,
                escape_xml(&theme.font_family),
                theme.label_font_size,
                theme.label_color,
                escape_xml(text)
            );
        }
    }
}

/// Marker `size` is a diameter in pixels.
fn draw_marker(svg: &mut String, marker: Marker, (cx, cy): (f32, f32), theme: &Theme) {
    let half = marker.size / 2.0;
    match marker.shape {
        MarkerShape::Circle => {
            let _ = write!(
                svg,
                "<circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{half:.2}\" fill=\"{}\"/>",
                theme.line_color
            );
        }
        MarkerShape::TriangleDown => {
            let _ = write!(
                svg,
                "<path d=\"M {:.2} {:.2} L {:.2} {:.2} L {:.2} {:.2} Z\" fill=\"{}\"/>",
                cx - half,
                cy - half,
                cx + half,
                cy - half,
                cx,
                cy + half,
                theme.line_color
            );
        }
    }
}

fn points_to_path(points: &[(f32, f32)]) -> String {
    let mut d = String::new();
    for (idx, (x, y)) in points.iter().enumerate() {
        let cmd = if idx == 0 { "M" } else { " L" };
        let _ = write!(d, "{cmd} {x:.2} {y:.2}");
    }
    d
}

fn estimate_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * AVG_CHAR_WIDTH
}

/// Shrinks text to fit `max_width`, down to `min_size`, then truncates with
/// an ellipsis. Returns the text to draw and its font size.
fn fit_text(text: &str, max_width: f32, font_size: f32, min_size: f32) -> (String, f32) {
    let natural = estimate_width(text, font_size);
    if natural <= max_width {
        return (text.to_string(), font_size);
    }
    let scaled = font_size * max_width.max(0.0) / natural;
    if scaled >= min_size {
        return (text.to_string(), scaled);
    }
    let budget = (max_width / (min_size * AVG_CHAR_WIDTH)).floor() as usize;
    if budget < 2 {
        return (String::new(), min_size);
    }
    let mut truncated: String = text.chars().take(budget - 1).collect();
    truncated.push('…');
    (truncated, min_size)
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
pub fn write_output_png(
    svg: &str,
    output: &Path,
    render_cfg: &RenderConfig,
    theme: &Theme,
) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = theme
        .font_family
        .split(',')
        .next()
        .map(|family| family.trim().trim_matches('"').to_string())
        .unwrap_or_else(|| "Open Sans".to_string());
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .ok_or_else(|| anyhow::anyhow!("Invalid canvas size"))?;
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::ir::{ConnectionSpec, Diagram, LayerSpec};
    use crate::layout::compute_layout;

    fn render(diagram: &Diagram) -> String {
        let layout = compute_layout(diagram, &LayoutConfig::default()).unwrap();
        render_svg(&layout, &Theme::plotly(), &RenderConfig::default())
    }

    #[test]
    fn render_svg_sample() {
        let svg = render(&Diagram::sample());
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("Collab Doc Platform Architecture"));
        assert!(svg.contains("Redis Cluster"));
        assert!(svg.contains("NGINX/AWS ALB"));
        assert_eq!(svg.matches("<circle").count(), 6);
        assert!(svg.contains("fill-opacity=\"0.3\""));
        assert!(svg.contains("fill-opacity=\"0.8\""));
    }

    #[test]
    fn render_is_byte_identical() {
        let diagram = Diagram::sample();
        assert_eq!(render(&diagram), render(&diagram));
    }

    #[test]
    fn escapes_markup_in_names() {
        let mut diagram = Diagram::new();
        diagram
            .layers
            .push(LayerSpec::new("Edge <L7>", &["A&B"], "#1FB8CD"));
        let svg = render(&diagram);
        assert!(svg.contains("Edge &lt;L7&gt;"));
        assert!(svg.contains("A&amp;B"));
    }

    #[test]
    fn top_row_is_drawn_above_bottom_row() {
        let layout = compute_layout(
            &Diagram {
                title: None,
                layers: vec![
                    LayerSpec::new("A", &[], "#1FB8CD"),
                    LayerSpec::new("B", &[], "#DB4545"),
                ],
                connections: vec![ConnectionSpec::new("A", "B", "HTTPS", 9.5)],
            },
            &LayoutConfig::default(),
        )
        .unwrap();
        let frame = Frame::new(&layout, &RenderConfig::default());
        assert!(frame.y(1.0) < frame.y(0.0));
        assert_eq!(frame.x(0.0), RenderConfig::default().margin_left);
        let right = RenderConfig::default().width - RenderConfig::default().margin_right;
        assert!((frame.x(11.0) - right).abs() < 1e-3);
    }

    #[test]
    fn fit_text_shrinks_then_truncates() {
        assert_eq!(fit_text("AWS S3", 200.0, 10.0, 6.0), ("AWS S3".to_string(), 10.0));

        let (text, size) = fit_text("Socket.io Srv1", 60.0, 10.0, 6.0);
        assert_eq!(text, "Socket.io Srv1");
        assert!(size < 10.0 && size >= 6.0);

        let (text, size) = fit_text("A very long component name", 20.0, 10.0, 6.0);
        assert!(text.ends_with('…'));
        assert_eq!(size, 6.0);

        assert_eq!(fit_text("Anything", 2.0, 10.0, 6.0).0, "");
    }

    #[test]
    fn writes_svg_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diagram.svg");
        write_output_svg("<svg></svg>", Some(&path)).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<svg></svg>");
    }
}
