use macroquad::math::Rect;
use serde::{Deserialize, Serialize};

/// A grid cell, addressed by the pixel position of its top-left corner.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, direction: Direction, cell_size: i32) -> Self {
        let (dx, dy) = direction.delta(cell_size);
        Self { x: self.x + dx, y: self.y + dy }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit displacement scaled by the cell size.
    pub fn delta(self, cell_size: i32) -> (i32, i32) {
        match self {
            Direction::Up => (0, -cell_size),
            Direction::Down => (0, cell_size),
            Direction::Left => (-cell_size, 0),
            Direction::Right => (cell_size, 0),
        }
    }
}

/// Playfield geometry in pixels.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    pub cell_size: i32,
}

impl Grid {
    pub const fn new(width: i32, height: i32, cell_size: i32) -> Self {
        Self { width, height, cell_size }
    }

    pub fn is_out_of_bounds(&self, cell: Cell) -> bool {
        cell.x < 0 || cell.y < 0 || cell.x >= self.width || cell.y >= self.height
    }

    /// In bounds and aligned to the cell size.
    pub fn contains(&self, cell: Cell) -> bool {
        !self.is_out_of_bounds(cell) && cell.x % self.cell_size == 0 && cell.y % self.cell_size == 0
    }

    pub fn columns(&self) -> i32 {
        self.width / self.cell_size
    }

    pub fn rows(&self) -> i32 {
        self.height / self.cell_size
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let size = self.cell_size;
        (0..self.rows()).flat_map(move |row| {
            (0..self.columns()).map(move |col| Cell::new(col * size, row * size))
        })
    }

    pub fn cell_rect(&self, cell: Cell) -> Rect {
        Rect::new(
            cell.x as f32,
            cell.y as f32,
            self.cell_size as f32,
            self.cell_size as f32,
        )
    }

    /// Uniform scale and offsets that center the grid on a screen of the given size.
    pub fn fit(&self, screen_w: f32, screen_h: f32) -> Viewport {
        let scale = (screen_w / self.width as f32).min(screen_h / self.height as f32);
        let off_x = (screen_w - self.width as f32 * scale) * 0.5;
        let off_y = (screen_h - self.height as f32 * scale) * 0.5;
        Viewport { scale, off_x, off_y }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub scale: f32,
    pub off_x: f32,
    pub off_y: f32,
}

impl Viewport {
    pub fn point(&self, x: f32, y: f32) -> (f32, f32) {
        (self.off_x + x * self.scale, self.off_y + y * self.scale)
    }

    pub fn rect(&self, r: Rect) -> Rect {
        let (x, y) = self.point(r.x, r.y);
        Rect::new(x, y, r.w * self.scale, r.h * self.scale)
    }
}
