//! Rendering module
//!
//! Frames are drawn through the `Surface` trait so the draw order and the
//! sprite fallback rules can be exercised without a browser. On the web the
//! surface is a canvas 2D context (`canvas::CanvasSurface`).

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use crate::assets::AssetKind;
use crate::consts::{HUD_HEARTS_POS, HUD_SCORE_POS, colors};
use crate::sim::{DodgeState, Rect, ShooterState, Stats};

/// A 800x600 drawing target in world units
pub trait Surface {
    /// Wipe the whole frame
    fn clear(&mut self);
    fn fill_rect(&mut self, rect: &Rect, color: &str);
    /// Draw a sprite stretched over `rect`. Returns false when the sprite
    /// failed to load or has not finished loading.
    fn draw_sprite(&mut self, kind: AssetKind, rect: &Rect) -> bool;
    fn fill_text(&mut self, text: &str, x: f32, y: f32, color: &str);
}

/// Surface that draws nothing (headless runs)
#[derive(Debug, Default)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn clear(&mut self) {}
    fn fill_rect(&mut self, _rect: &Rect, _color: &str) {}
    fn draw_sprite(&mut self, _kind: AssetKind, _rect: &Rect) -> bool {
        false
    }
    fn fill_text(&mut self, _text: &str, _x: f32, _y: f32, _color: &str) {}
}

/// Sprite if available, otherwise a flat rectangle in `fallback`
pub fn draw_sprite_or_fallback<S: Surface + ?Sized>(
    surface: &mut S,
    kind: AssetKind,
    rect: &Rect,
    fallback: &str,
) {
    if !surface.draw_sprite(kind, rect) {
        surface.fill_rect(rect, fallback);
    }
}

/// Score and hearts overlay
pub fn draw_hud<S: Surface + ?Sized>(surface: &mut S, stats: &Stats) {
    surface.fill_text(
        &format!("Score: {}", stats.score),
        HUD_SCORE_POS.0,
        HUD_SCORE_POS.1,
        colors::HUD_TEXT,
    );
    surface.fill_text(
        &format!("Hearts: {}", stats.hearts),
        HUD_HEARTS_POS.0,
        HUD_HEARTS_POS.1,
        colors::HUD_TEXT,
    );
}

/// Dodge frame: flat rectangles only
pub fn draw_dodge<S: Surface + ?Sized>(state: &DodgeState, surface: &mut S) {
    surface.fill_rect(&state.player.rect, colors::DODGE_PLAYER);
    for obstacle in &state.obstacles {
        surface.fill_rect(obstacle, colors::OBSTACLE);
    }
    for target in &state.targets {
        surface.fill_rect(target, colors::TARGET);
    }
    draw_hud(surface, &state.stats);
}

/// Shooter frame: sprites with flat-rectangle fallback
pub fn draw_shooter<S: Surface + ?Sized>(state: &ShooterState, surface: &mut S) {
    draw_sprite_or_fallback(surface, AssetKind::Player, &state.ship.player.rect, colors::SHIP);
    for enemy in &state.enemies {
        let (kind, color) = if enemy.is_damaged() {
            (AssetKind::EnemyDamaged, colors::ENEMY_DAMAGED)
        } else {
            (AssetKind::Enemy, colors::ENEMY)
        };
        draw_sprite_or_fallback(surface, kind, &enemy.rect, color);
    }
    for bullet in &state.bullets {
        draw_sprite_or_fallback(surface, AssetKind::Bullet, &bullet.rect, colors::BULLET);
    }
    draw_hud(surface, &state.stats);
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::sim::Enemy;
    use crate::tuning::{DodgeTuning, ShooterTuning};

    /// What a surface was asked to do
    #[derive(Debug, Clone, PartialEq)]
    pub enum DrawCall {
        Clear,
        Rect(Rect, String),
        Sprite(AssetKind, Rect),
        Text(String),
    }

    /// Records draw calls; sprites in `available` draw successfully
    #[derive(Debug, Default)]
    pub struct Recorder {
        pub calls: Vec<DrawCall>,
        pub available: Vec<AssetKind>,
    }

    impl Surface for Recorder {
        fn clear(&mut self) {
            self.calls.push(DrawCall::Clear);
        }

        fn fill_rect(&mut self, rect: &Rect, color: &str) {
            self.calls.push(DrawCall::Rect(*rect, color.to_string()));
        }

        fn draw_sprite(&mut self, kind: AssetKind, rect: &Rect) -> bool {
            if self.available.contains(&kind) {
                self.calls.push(DrawCall::Sprite(kind, *rect));
                true
            } else {
                false
            }
        }

        fn fill_text(&mut self, text: &str, _x: f32, _y: f32, _color: &str) {
            self.calls.push(DrawCall::Text(text.to_string()));
        }
    }

    #[test]
    fn test_dodge_draws_rects_and_hud() {
        let mut state = DodgeState::new(1, DodgeTuning::default());
        state.obstacles.push(Rect::new(0.0, 0.0, 30.0, 30.0));
        state.targets.push(Rect::new(50.0, 0.0, 30.0, 30.0));
        state.stats.score = 4;

        let mut rec = Recorder::default();
        draw_dodge(&state, &mut rec);
        assert_eq!(
            rec.calls,
            vec![
                DrawCall::Rect(state.player.rect, colors::DODGE_PLAYER.into()),
                DrawCall::Rect(state.obstacles[0], colors::OBSTACLE.into()),
                DrawCall::Rect(state.targets[0], colors::TARGET.into()),
                DrawCall::Text("Score: 4".into()),
                DrawCall::Text("Hearts: 3".into()),
            ]
        );
    }

    #[test]
    fn test_shooter_falls_back_when_sprites_missing() {
        let mut state = ShooterState::new(1, ShooterTuning::default());
        let enemy_rect = Rect::new(10.0, 10.0, 40.0, 40.0);
        state.enemies.push(Enemy::new(enemy_rect, 2));

        let mut rec = Recorder::default();
        draw_shooter(&state, &mut rec);
        assert_eq!(rec.calls[0], DrawCall::Rect(state.ship.player.rect, colors::SHIP.into()));
        assert_eq!(rec.calls[1], DrawCall::Rect(enemy_rect, colors::ENEMY.into()));
    }

    #[test]
    fn test_shooter_uses_sprites_and_damaged_variant() {
        let mut state = ShooterState::new(1, ShooterTuning::default());
        let mut hurt = Enemy::new(Rect::new(10.0, 10.0, 40.0, 40.0), 2);
        hurt.health = 1;
        state.enemies.push(hurt.clone());

        let mut rec = Recorder {
            available: AssetKind::ALL.to_vec(),
            ..Default::default()
        };
        draw_shooter(&state, &mut rec);
        assert_eq!(
            rec.calls[0],
            DrawCall::Sprite(AssetKind::Player, state.ship.player.rect)
        );
        assert_eq!(rec.calls[1], DrawCall::Sprite(AssetKind::EnemyDamaged, hurt.rect));
        assert_eq!(rec.calls.len(), 4);
    }

    #[test]
    fn test_damaged_enemy_fallback_color() {
        let mut state = ShooterState::new(1, ShooterTuning::default());
        let mut hurt = Enemy::new(Rect::new(10.0, 10.0, 40.0, 40.0), 2);
        hurt.health = 1;
        state.enemies.push(hurt.clone());

        // Only the healthy-enemy sprite is present
        let mut rec = Recorder {
            available: vec![AssetKind::Enemy],
            ..Default::default()
        };
        draw_shooter(&state, &mut rec);
        assert_eq!(rec.calls[1], DrawCall::Rect(hurt.rect, colors::ENEMY_DAMAGED.into()));
    }
}
