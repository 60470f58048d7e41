#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod render;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, RenderConfig, load_config};
pub use ir::{ConnectionSpec, Diagram, LayerSpec};
pub use layout::{DrawPrimitive, Layout, LayoutError, compute_layout};
pub use render::render_svg;
pub use theme::Theme;

/// Lays out and renders a diagram to an SVG string in one call.
pub fn render_to_svg(diagram: &Diagram, config: &Config) -> Result<String, LayoutError> {
    let layout = compute_layout(diagram, &config.layout)?;
    Ok(render_svg(&layout, &config.theme, &config.render))
}
