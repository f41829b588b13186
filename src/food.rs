use rand::Rng;
use rand::seq::IteratorRandom;

use crate::grid::{Cell, Grid};
use crate::snake::Snake;

/// Picks a cell uniformly among those the snake does not occupy.
/// Returns `None` once the snake fills the grid.
pub fn spawn<R: Rng + ?Sized>(grid: &Grid, snake: &Snake, rng: &mut R) -> Option<Cell> {
    grid.cells().filter(|c| !snake.occupies(*c)).choose(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Direction;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn never_lands_on_the_snake() {
        let grid = Grid::new(60, 20, 20);
        let snake = Snake::from_body([Cell::new(0, 0), Cell::new(20, 0)], Direction::Left);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            assert_eq!(spawn(&grid, &snake, &mut rng), Some(Cell::new(40, 0)));
        }
    }

    #[test]
    fn reaches_every_free_cell() {
        let grid = Grid::new(600, 400, 20);
        let snake = Snake::new(Cell::new(100, 100), Direction::Right);
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = HashSet::new();
        for _ in 0..20_000 {
            let cell = spawn(&grid, &snake, &mut rng).unwrap();
            assert!(grid.contains(cell));
            seen.insert(cell);
        }
        assert_eq!(seen.len(), 30 * 20 - 1);
        assert!(!seen.contains(&Cell::new(100, 100)));
    }

    #[test]
    fn full_grid_has_no_room() {
        let grid = Grid::new(40, 20, 20);
        let snake = Snake::from_body([Cell::new(0, 0), Cell::new(20, 0)], Direction::Left);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(spawn(&grid, &snake, &mut rng), None);
    }
}
