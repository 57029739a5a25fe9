//! Canvas 2D surface

use web_sys::CanvasRenderingContext2d;

use super::Surface;
use crate::assets::AssetKind;
use crate::consts::{HUD_FONT, WORLD_HEIGHT, WORLD_WIDTH};
use crate::platform::web::Sprites;
use crate::sim::Rect;

/// Draws onto a canvas whose backing store is the fixed world resolution
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    sprites: Sprites,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        ctx.set_font(HUD_FONT);
        Self {
            ctx,
            sprites: Sprites::default(),
        }
    }

    pub fn set_sprites(&mut self, sprites: Sprites) {
        self.sprites = sprites;
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self) {
        self.ctx
            .clear_rect(0.0, 0.0, WORLD_WIDTH as f64, WORLD_HEIGHT as f64);
    }

    fn fill_rect(&mut self, rect: &Rect, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(
            rect.x as f64,
            rect.y as f64,
            rect.width as f64,
            rect.height as f64,
        );
    }

    fn draw_sprite(&mut self, kind: AssetKind, rect: &Rect) -> bool {
        let Some(img) = self.sprites.drawable(kind) else {
            return false;
        };
        self.ctx
            .draw_image_with_html_image_element_and_dw_and_dh(
                img,
                rect.x as f64,
                rect.y as f64,
                rect.width as f64,
                rect.height as f64,
            )
            .is_ok()
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.set_font(HUD_FONT);
        let _ = self.ctx.fill_text(text, x as f64, y as f64);
    }
}
