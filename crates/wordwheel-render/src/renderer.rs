//! Renderer trait abstraction.

use peniko::Color;
use thiserror::Error;
use wordwheel_core::render::Scene;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Empty scene")]
    EmptyScene,
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The scene to render.
    pub scene: &'a Scene,
    /// Output scale (1.0 = scene units).
    pub scale_factor: f64,
    /// Background color.
    pub background_color: Color,
    /// Letter and text color.
    pub text_color: Color,
    /// Fill for selected wheel letters.
    pub selection_color: Color,
    /// Stroke for the selection path.
    pub path_color: Color,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(scene: &'a Scene) -> Self {
        Self {
            scene,
            scale_factor: 1.0,
            background_color: Color::from_rgba8(250, 250, 250, 255),
            text_color: Color::from_rgba8(33, 33, 33, 255),
            selection_color: Color::from_rgba8(59, 130, 246, 255),
            path_color: Color::from_rgba8(59, 130, 246, 160),
        }
    }

    /// Set the output scale.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the selection color used for letters and path.
    pub fn with_selection_color(mut self, color: Color) -> Self {
        self.selection_color = color;
        self.path_color = color.with_alpha(0.6);
        self
    }
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Build the output for one frame.
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()>;

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}
