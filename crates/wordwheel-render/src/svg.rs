//! SVG renderer implementation.

use crate::renderer::{RenderContext, RenderResult, Renderer, RendererError};
use kurbo::{Point, Rect};
use peniko::Color;
use std::fmt::Write;
use wordwheel_core::config::ColorTag;
use wordwheel_core::render::Scene;
use wordwheel_core::wheel::to_bez_path;

/// Space kept around the scene bounds.
const MARGIN: f64 = 8.0;
/// Letter height relative to the box it sits in.
const FONT_RATIO: f64 = 0.55;

/// Renders scenes to an SVG document.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    output: String,
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// SVG produced by the last [`Renderer::build_scene`].
    pub fn svg(&self) -> &str {
        &self.output
    }

    /// Take the SVG, leaving the renderer empty.
    pub fn take_svg(&mut self) -> String {
        std::mem::take(&mut self.output)
    }

    fn write_scene(&mut self, ctx: &RenderContext) -> std::fmt::Result {
        let scene = ctx.scene;
        let bounds = scene.bounds().inflate(MARGIN, MARGIN);
        let out = &mut self.output;
        let text = hex(ctx.text_color);

        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="{} {} {} {}">"#,
            bounds.width() * ctx.scale_factor,
            bounds.height() * ctx.scale_factor,
            bounds.x0,
            bounds.y0,
            bounds.width(),
            bounds.height()
        )?;
        write_rect(out, bounds, &hex(ctx.background_color), None)?;

        // Board
        writeln!(out, r#"<g class="board">"#)?;
        for cell in &scene.cells {
            let fill = if cell.hovered {
                scene.highlight
            } else if cell.occupant.is_some() {
                scene.occupied
            } else {
                cell.fill
            };
            write_rect(out, cell.rect, &hex(fill), Some("#ffffff"))?;
            match cell.occupant {
                Some(letter) => write_label(out, cell.rect.center(), cell.rect.height(), letter, &text)?,
                None if !cell.bonus.tag().is_empty() => {
                    write_text(out, cell.rect.center(), cell.rect.height() * 0.35, cell.bonus.tag(), "#ffffff")?
                }
                None => {}
            }
        }
        writeln!(out, "</g>")?;

        // Wheel
        writeln!(out, r#"<g class="wheel">"#)?;
        writeln!(
            out,
            r#"<circle cx="{}" cy="{}" r="{}" fill="none" stroke="{}"/>"#,
            scene.wheel_center.x,
            scene.wheel_center.y,
            scene.wheel_radius,
            text
        )?;
        if scene.path.len() > 1 {
            writeln!(
                out,
                r#"<path class="path" d="{}" fill="none" stroke="{}" stroke-width="6" stroke-linecap="round" stroke-linejoin="round"/>"#,
                to_bez_path(&scene.path).to_svg(),
                hex(ctx.path_color)
            )?;
        }
        for slot in &scene.slots {
            let fill = if slot.selected {
                hex(ctx.selection_color)
            } else {
                "#ffffff".to_string()
            };
            write_rect(out, slot.rect(), &fill, Some(&text))?;
            write_label(out, slot.center, slot.size, slot.letter, &text)?;
        }
        write_text(out, scene.wheel_center, 16.0, &scene.current_word, &text)?;
        writeln!(out, "</g>")?;

        // Rack
        writeln!(out, r#"<g class="rack">"#)?;
        for tile in &scene.rack {
            match tile.letter {
                Some(letter) if !tile.lifted => {
                    write_rect(out, tile.rect, "#fff3c4", Some(&text))?;
                    write_label(out, tile.rect.center(), tile.rect.height(), letter, &text)?;
                }
                _ => write_rect(out, tile.rect, "none", Some("#bdbdbd"))?,
            }
        }
        writeln!(out, "</g>")?;

        if let Some(proxy) = &scene.drag {
            write_rect(out, proxy.rect, "#fff3c4", Some(&hex(ctx.selection_color)))?;
            write_label(out, proxy.rect.center(), proxy.rect.height(), proxy.letter, &text)?;
        }

        let list_anchor = Point::new(
            scene.wheel_center.x + scene.wheel_radius + 20.0,
            scene.wheel_center.y,
        );
        writeln!(
            out,
            r#"<text class="words" x="{}" y="{}" font-size="14" fill="{}">{}</text>"#,
            list_anchor.x,
            list_anchor.y,
            text,
            escape(&scene.word_list)
        )?;
        writeln!(out, "</svg>")
    }
}

impl Renderer for SvgRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        if is_empty(ctx.scene) {
            return Err(RendererError::EmptyScene);
        }
        self.output.clear();
        self.write_scene(ctx)
            .map_err(|e| RendererError::RenderFailed(e.to_string()))?;
        log::debug!("Rendered SVG scene ({} bytes)", self.output.len());
        Ok(())
    }
}

fn is_empty(scene: &Scene) -> bool {
    scene.slots.is_empty() && scene.cells.is_empty() && scene.rack.is_empty()
}

fn hex(color: Color) -> String {
    ColorTag::from(color).to_hex()
}

fn write_rect(out: &mut String, rect: Rect, fill: &str, stroke: Option<&str>) -> std::fmt::Result {
    write!(
        out,
        r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}""#,
        rect.x0,
        rect.y0,
        rect.width(),
        rect.height(),
        fill
    )?;
    if let Some(stroke) = stroke {
        write!(out, r#" stroke="{}""#, stroke)?;
    }
    writeln!(out, "/>")
}

fn write_label(out: &mut String, center: Point, size: f64, letter: char, fill: &str) -> std::fmt::Result {
    write_text(out, center, size * FONT_RATIO, &letter.to_string(), fill)
}

fn write_text(out: &mut String, center: Point, font_size: f64, text: &str, fill: &str) -> std::fmt::Result {
    writeln!(
        out,
        r#"<text x="{}" y="{}" font-size="{}" text-anchor="middle" dominant-baseline="central" fill="{}">{}</text>"#,
        center.x,
        center.y,
        font_size,
        fill,
        escape(text)
    )
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordwheel_core::{Game, GameConfig, PointerEvent, PointerId};

    fn game() -> Game {
        Game::new(GameConfig::default()).unwrap()
    }

    #[test]
    fn test_render_default_game() {
        let scene = game().scene();
        let mut renderer = SvgRenderer::new();
        renderer.build_scene(&RenderContext::new(&scene)).unwrap();

        let svg = renderer.svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches(r#"<g class="board">"#).count(), 1);
        assert!(svg.contains("(No words yet)"));
        assert!(!svg.contains(r#"class="path""#));
    }

    #[test]
    fn test_render_selection_path() {
        let mut game = game();
        let slots = game.wheel().slots().to_vec();
        for event in [
            PointerEvent::Down { pointer: PointerId::MOUSE, position: slots[0].center },
            PointerEvent::Move { pointer: PointerId::MOUSE, position: slots[1].center },
        ] {
            game.handle_pointer_event(event);
        }

        let scene = game.scene();
        let mut renderer = SvgRenderer::new();
        renderer.build_scene(&RenderContext::new(&scene)).unwrap();
        let svg = renderer.take_svg();
        assert!(svg.contains(r#"class="path""#));
        assert!(svg.contains(">AB</text>"));
        assert!(renderer.svg().is_empty());
    }

    #[test]
    fn test_empty_scene_rejected() {
        let mut scene = game().scene();
        scene.slots.clear();
        scene.cells.clear();
        scene.rack.clear();

        let mut renderer = SvgRenderer::new();
        let result = renderer.build_scene(&RenderContext::new(&scene));
        assert!(matches!(result, Err(RendererError::EmptyScene)));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
    }
}
