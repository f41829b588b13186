use macroquad::prelude::*;

use crate::config::GameConfig;
use crate::effect::{Effect, Frame};
use crate::flow::Flow;
use crate::grid::{Grid, Viewport};
use crate::menu::SessionConfig;

const GRID_LINE: Color = Color::new(0.16, 0.16, 0.16, 1.0);
const FOOD: Color = RED;
const DIM: Color = LIGHTGRAY;
const HIGHLIGHT: Color = GREEN;

const FONT: f32 = 24.0;
const BIG_FONT: f32 = 44.0;

/// Draws whatever screen the flow is on. The board always shows the last
/// frame the game published, never the live session.
pub struct Renderer {
    frame: Frame,
}

impl Renderer {
    pub fn new() -> Self {
        Self { frame: Frame::default() }
    }

    pub fn apply(&mut self, effect: &Effect) {
        if let Effect::Frame(frame) = effect {
            self.frame = frame.clone();
        }
    }

    pub fn draw(&self, flow: &Flow, config: &GameConfig) {
        let grid = config.grid();
        let vp = grid.fit(screen_width(), screen_height());
        clear_background(BLACK);

        match flow {
            Flow::Menu(menu) => draw_menu(&vp, &grid, config, menu.selection()),
            Flow::Playing { config: picked, .. } => {
                self.draw_board(&vp, &grid, skin_color(config, *picked));
                text(&vp, &format!("Score: {}", self.frame.score), 10.0, 30.0, FONT, WHITE);
            }
            Flow::GameOver { score, high_score, config: picked } => {
                self.draw_board(&vp, &grid, skin_color(config, *picked));
                draw_rectangle(0.0, 0.0, screen_width(), screen_height(), Color::new(0.0, 0.0, 0.0, 0.7));
                let mid = grid.width as f32 * 0.5;
                centered(&vp, "GAME OVER", mid, 150.0, BIG_FONT, RED);
                centered(&vp, &format!("Score: {}", score), mid, 200.0, FONT, WHITE);
                centered(&vp, &format!("High Score: {}", high_score), mid, 230.0, FONT, WHITE);
                centered(&vp, "R - Restart", mid, 280.0, FONT, WHITE);
                centered(&vp, "M - Main Menu", mid, 310.0, FONT, WHITE);
                centered(&vp, "Q - Quit", mid, 340.0, FONT, WHITE);
            }
            Flow::Quit => {}
        }
    }

    fn draw_board(&self, vp: &Viewport, grid: &Grid, skin: Color) {
        let thickness = vp.scale.max(1.0);
        for col in 0..=grid.columns() {
            let x = (col * grid.cell_size) as f32;
            let (x1, y1) = vp.point(x, 0.0);
            let (x2, y2) = vp.point(x, grid.height as f32);
            draw_line(x1, y1, x2, y2, thickness, GRID_LINE);
        }
        for row in 0..=grid.rows() {
            let y = (row * grid.cell_size) as f32;
            let (x1, y1) = vp.point(0.0, y);
            let (x2, y2) = vp.point(grid.width as f32, y);
            draw_line(x1, y1, x2, y2, thickness, GRID_LINE);
        }

        for cell in &self.frame.body {
            fill(vp.rect(grid.cell_rect(*cell)), skin);
        }
        if let Some(food) = self.frame.food {
            fill(vp.rect(grid.cell_rect(food)), FOOD);
        }
    }
}

fn draw_menu(vp: &Viewport, grid: &Grid, config: &GameConfig, selection: SessionConfig) {
    let mid = grid.width as f32 * 0.5;
    centered(vp, "SNAKE GAME", mid, 60.0, BIG_FONT, WHITE);
    centered(vp, "Press P or ENTER to Play", mid, 100.0, FONT, WHITE);

    let left = grid.width as f32 * 0.13;
    let right = grid.width as f32 * 0.58;
    text(vp, "Background Music", left, 150.0, FONT, WHITE);
    for i in 0..config.music.len() {
        let label = format!("{}. Track {}", i + 1, i + 1);
        choice(vp, &label, i == selection.track, left + 20.0, 180.0 + i as f32 * 30.0);
    }

    text(vp, "Snake Skin", right, 150.0, FONT, WHITE);
    for (i, skin) in config.skins.iter().enumerate() {
        choice(vp, &skin.name, i == selection.skin, right + 20.0, 180.0 + i as f32 * 30.0);
    }

    let hints = "1-3 / T: music   S: skin   Q: quit";
    centered(vp, hints, mid, grid.height as f32 - 20.0, FONT * 0.75, DIM);
}

fn choice(vp: &Viewport, label: &str, selected: bool, x: f32, y: f32) {
    let (prefix, color) = if selected { ("-> ", HIGHLIGHT) } else { ("   ", DIM) };
    text(vp, &format!("{prefix}{label}"), x, y, FONT, color);
}

fn skin_color(config: &GameConfig, session: SessionConfig) -> Color {
    config
        .skins
        .get(session.skin)
        .map(|skin| Color::from_rgba(skin.color[0], skin.color[1], skin.color[2], 255))
        .unwrap_or(GREEN)
}

fn fill(r: Rect, color: Color) {
    draw_rectangle(r.x, r.y, r.w, r.h, color);
}

/// Text with its baseline at grid position (x, y).
fn text(vp: &Viewport, s: &str, x: f32, y: f32, size: f32, color: Color) {
    let (sx, sy) = vp.point(x, y);
    draw_text(s, sx, sy, size * vp.scale, color);
}

fn centered(vp: &Viewport, s: &str, mid_x: f32, y: f32, size: f32, color: Color) {
    let width = measure_text(s, None, (size * vp.scale) as u16, 1.0).width / vp.scale;
    text(vp, s, mid_x - width * 0.5, y, size, color);
}
