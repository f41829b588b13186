use std::collections::VecDeque;

use crate::grid::{Cell, Direction};

/// Outcome of [`Snake::advance`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Step {
    Moved,
    Grew,
}

#[derive(Debug, Clone)]
pub struct Snake {
    // head first
    body: VecDeque<Cell>,
    direction: Direction,
    next_direction: Direction,
}

impl Snake {
    pub fn new(head: Cell, direction: Direction) -> Self {
        Self::from_body([head], direction)
    }

    /// Builds a snake from its cells, head first. An empty iterator is not a snake.
    pub fn from_body(cells: impl IntoIterator<Item = Cell>, direction: Direction) -> Self {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        debug_assert!(!body.is_empty());
        Self { body, direction, next_direction: direction }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn segments(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    /// Requests a direction for the next move. The reverse of the last move
    /// or of the request already accepted for this move is refused; returns
    /// whether the request was accepted.
    pub fn steer(&mut self, requested: Direction) -> bool {
        if requested == self.direction.opposite() || requested == self.next_direction.opposite() {
            return false;
        }
        self.next_direction = requested;
        true
    }

    pub fn next_head(&self, cell_size: i32) -> Cell {
        self.head().step(self.next_direction, cell_size)
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Moves one cell. The tail stays in place when the new head lands on `food`.
    pub fn advance(&mut self, cell_size: i32, food: Option<Cell>) -> Step {
        let head = self.next_head(cell_size);
        self.direction = self.next_direction;
        self.body.push_front(head);

        if food == Some(head) {
            return Step::Grew;
        }
        self.body.pop_back();
        Step::Moved
    }
}
