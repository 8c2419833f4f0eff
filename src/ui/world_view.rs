//! Draws a scene's world into a terminal buffer.

use crate::core::{Bounds, Point};
use crate::input::Projection;
use crate::scene::Scene;
use crate::world::logs::LogPart;
use crate::world::terrain::GROUND_TILE;
use crate::world::World;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

const SKY: Color = Color::Rgb(112, 197, 206);
const FLASH: Color = Color::Rgb(200, 40, 40);
const SUN: Color = Color::Rgb(255, 214, 90);
const CLOUD: Color = Color::White;
const HILL: Color = Color::Rgb(96, 170, 80);
const GRASS: Color = Color::Rgb(120, 200, 60);
const DIRT: [Color; 2] = [Color::Rgb(222, 184, 135), Color::Rgb(205, 163, 110)];
const LOG: Color = Color::Rgb(133, 87, 35);
const LOG_END: Color = Color::Rgb(160, 110, 50);
const PIG: Color = Color::Rgb(255, 160, 180);

/// Player glyph per wing frame.
const PIG_FRAMES: [&str; 3] = ["▶", "►", "▸"];

/// The whole play area: scenery, logs, pig and the interface on top.
pub struct WorldView<'a> {
    scene: &'a Scene,
    projection: Projection,
}

impl<'a> WorldView<'a> {
    pub fn new(scene: &'a Scene, projection: Projection) -> Self {
        Self { scene, projection }
    }

    /// Background colour of the scenery at a world point.
    fn scenery(world: &World, p: Point) -> Color {
        if p.y < world.ground.height() {
            // Top strip of the ground is grass
            if p.y > world.ground.height() - GROUND_TILE / 2.0 {
                return GRASS;
            }
            return DIRT[world.ground.tile_at(p.x) % DIRT.len()];
        }
        if p.y < world.hills.height_at(p.x) {
            return HILL;
        }
        let sun = world.sun.position;
        if (p.x - sun.x).hypot(p.y - sun.y) <= world.sun.radius {
            return SUN;
        }
        let in_cloud = world
            .clouds
            .positions()
            .any(|(c, r)| (p.x - c.x).abs() <= r && (p.y - c.y).abs() <= r * 0.35);
        if in_cloud {
            return CLOUD;
        }
        if world.flashing {
            FLASH
        } else {
            SKY
        }
    }

    /// Paint every cell of a world rectangle.
    fn fill(&self, buf: &mut Buffer, bounds: Bounds, symbol: &str, style: Style) {
        let Some(rect) = self.projection.to_rect(bounds) else {
            return;
        };
        let rect = rect.intersection(self.projection.area);
        for y in rect.top()..rect.bottom() {
            for x in rect.left()..rect.right() {
                buf.get_mut(x, y).set_symbol(symbol).set_style(style);
            }
        }
    }

    /// Write text centred on a world point.
    fn label(&self, buf: &mut Buffer, at: Point, text: &str, style: Style) {
        let Some((col, row)) = self.projection.to_cell(at) else {
            return;
        };
        let area = self.projection.area;
        let width = text.chars().count() as u16;
        let x = col.saturating_sub(width / 2).max(area.x);
        let max_width = (area.right() - x) as usize;
        buf.set_stringn(x, row, text, max_width, style);
    }

    fn render_scenery(&self, buf: &mut Buffer, shake: (f32, f32)) {
        let world = self.scene.world();
        let area = self.projection.area;
        for row in area.top()..area.bottom() {
            for col in area.left()..area.right() {
                let Some(p) = self.projection.to_world(col, row) else {
                    continue;
                };
                let p = Point::new(p.x - shake.0, p.y - shake.1);
                let color = Self::scenery(world, p);
                buf.get_mut(col, row)
                    .set_symbol(" ")
                    .set_style(Style::default().bg(color));
            }
        }
    }

    fn render_logs(&self, buf: &mut Buffer, shake: (f32, f32)) {
        let world = self.scene.world();
        let body = Style::default().bg(LOG).fg(LOG_END);
        for logs in &world.logs {
            for part in [LogPart::Bottom, LogPart::Top] {
                let bounds = logs.part_bounds(part).translated(shake.0, shake.1);
                if bounds.height <= 0.0 {
                    continue;
                }
                self.fill(buf, bounds, "║", body);
            }
        }
    }

    fn render_player(&self, buf: &mut Buffer, shake: (f32, f32)) {
        let world = self.scene.world();
        let player = &world.player;
        if !player.is_visible() {
            return;
        }
        let symbol = if player.rotation < -0.5 {
            "▼"
        } else if player.rotation > 0.25 {
            "▲"
        } else {
            PIG_FRAMES[player.wing_frame() % PIG_FRAMES.len()]
        };
        let style = Style::default().fg(PIG).add_modifier(Modifier::BOLD);
        let bounds = player.bounds().translated(shake.0, shake.1);
        self.fill(buf, bounds, symbol, style);
    }

    fn render_smoke(&self, buf: &mut Buffer, shake: (f32, f32)) {
        let Some(smoke) = self.scene.world().smoke.as_ref() else {
            return;
        };
        let r = smoke.radius();
        let center = Point::new(smoke.position.x + shake.0, smoke.position.y + shake.1);
        let symbol = if smoke.progress() < 0.5 { "▓" } else { "░" };
        let style = Style::default().fg(Color::Gray);
        self.fill(buf, Bounds::centered(center, r * 2.0, r * 2.0), symbol, style);
    }

    fn render_interface(&self, buf: &mut Buffer) {
        let scene = self.scene;
        let world = scene.world();

        if !world.score_hud.hidden {
            let style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
            self.label(buf, world.score_hud.position, &world.score_hud.text(), style);
        }

        if scene.tutorial().is_lit() {
            let style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
            let viewport = world.viewport;
            self.label(buf, viewport.at(0.5, 0.62), "Get Ready!", style);
            self.label(buf, viewport.at(0.5, 0.55), "Tap to fly", style);
        }

        let music = scene.music_button();
        let style = if music.is_muted() {
            Style::default().fg(Color::DarkGray).bg(Color::Black)
        } else {
            Style::default().fg(Color::Yellow).bg(Color::Black)
        };
        self.label(buf, music.bounds.center(), music.glyph(), style);

        if let Some(panel) = world.game_over.as_ref() {
            let viewport = world.viewport;
            let title = Style::default().fg(Color::Rgb(230, 100, 40)).add_modifier(Modifier::BOLD);
            let text = Style::default().fg(Color::White).bg(Color::Rgb(90, 60, 30));
            self.label(buf, viewport.at(0.5, 0.7), "GAME OVER", title);
            self.label(buf, viewport.at(0.5, 0.6), &format!(" Score {} ", panel.score), text);
            let best = if panel.is_new_best() {
                format!(" New best {} ", panel.best)
            } else {
                format!(" Best {} ", panel.best)
            };
            self.label(buf, viewport.at(0.5, 0.54), &best, text);
        }

        for button in [world.retry.as_ref(), world.leaders.as_ref()].into_iter().flatten() {
            let style = Style::default().bg(Color::Rgb(240, 200, 80)).fg(Color::Black);
            self.fill(buf, button.bounds, " ", style);
            self.label(
                buf,
                button.bounds.center(),
                button.label,
                style.add_modifier(Modifier::BOLD),
            );
        }
    }
}

impl Widget for WorldView<'_> {
    fn render(self, _area: Rect, buf: &mut Buffer) {
        let shake = self.scene.world().shake_offset();

        self.render_scenery(buf, shake);
        self.render_logs(buf, shake);
        self.render_player(buf, shake);
        self.render_smoke(buf, shake);
        self.render_interface(buf);

        // Fade in from black after a restart
        if self.scene.fade() < 1.0 {
            let area = self.projection.area;
            for y in area.top()..area.bottom() {
                for x in area.left()..area.right() {
                    buf.get_mut(x, y).set_style(Style::default().add_modifier(Modifier::DIM));
                }
            }
        }
    }
}
