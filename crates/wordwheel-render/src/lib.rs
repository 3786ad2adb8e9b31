//! WordWheel Render Library
//!
//! Renderer abstraction for WordWheel scenes. The bundled implementation
//! writes SVG, which works headless and in a browser alike.

mod renderer;
mod svg;

pub use renderer::{RenderContext, RenderResult, Renderer, RendererError};
pub use svg::SvgRenderer;
