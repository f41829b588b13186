use log::debug;
use rand::Rng;

use crate::effect::{Effect, Frame};
use crate::food;
use crate::grid::{Cell, Direction, Grid};
use crate::snake::{Snake, Step};

/// Tick rate as a function of score: `base + score * step`, capped at `max`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Pace {
    pub base: f32,
    pub max: f32,
    pub step: f32,
}

impl Pace {
    /// Ticks per second.
    pub fn rate(&self, score: u32) -> f32 {
        (self.base + score as f32 * self.step).clamp(self.base, self.max)
    }

    /// Seconds between ticks.
    pub fn interval(&self, score: u32) -> f32 {
        1.0 / self.rate(score)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EndCause {
    Wall,
    SelfCollision,
    /// The snake covers every cell, so no food can be placed.
    BoardFilled,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Ended { score: u32, cause: EndCause },
}

/// One play-through, from spawn to game over.
#[derive(Debug, Clone)]
pub struct Session {
    grid: Grid,
    snake: Snake,
    food: Option<Cell>,
    score: u32,
    state: SessionState,
}

impl Session {
    pub fn new<R: Rng + ?Sized>(grid: Grid, start: Cell, direction: Direction, rng: &mut R) -> Self {
        let snake = Snake::new(start, direction);
        let food = food::spawn(&grid, &snake, rng);
        Self { grid, snake, food, score: 0, state: SessionState::Running }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn frame(&self) -> Frame {
        Frame {
            body: self.snake.segments().collect(),
            food: self.food,
            score: self.score,
        }
    }

    pub fn tick_interval(&self, pace: &Pace) -> f32 {
        pace.interval(self.score)
    }

    /// Runs one tick. `steering` holds the direction requests buffered since
    /// the previous tick, oldest first. An ended session ignores ticks.
    pub fn tick<R, I>(&mut self, steering: I, rng: &mut R) -> Vec<Effect>
    where
        R: Rng + ?Sized,
        I: IntoIterator<Item = Direction>,
    {
        if self.state != SessionState::Running {
            return Vec::new();
        }

        for direction in steering {
            self.snake.steer(direction);
        }

        let head = self.snake.next_head(self.grid.cell_size);
        if self.grid.is_out_of_bounds(head) {
            return self.end(EndCause::Wall);
        }
        // Checked against the body before the tail moves, so chasing the
        // tail into the cell it is about to leave is still a collision.
        if self.snake.occupies(head) {
            return self.end(EndCause::SelfCollision);
        }

        let mut effects = Vec::new();
        if let Step::Grew = self.snake.advance(self.grid.cell_size, self.food) {
            self.score += 1;
            effects.push(Effect::FoodEaten);
            self.food = food::spawn(&self.grid, &self.snake, rng);
            debug!("food eaten, score {}, length {}, next food {:?}", self.score, self.snake.len(), self.food);
        }
        effects.push(Effect::Frame(self.frame()));

        if self.food.is_none() {
            effects.extend(self.end(EndCause::BoardFilled));
        }
        effects
    }

    fn end(&mut self, cause: EndCause) -> Vec<Effect> {
        debug!("session ended by {:?} at score {}", cause, self.score);
        self.state = SessionState::Ended { score: self.score, cause };
        vec![Effect::GameOver { score: self.score }]
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, snake: Snake, food: Option<Cell>) {
        self.snake = snake;
        self.food = food;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use Direction::*;

    const GRID: Grid = Grid::new(600, 400, 20);
    const FAR: Option<Cell> = Some(Cell::new(500, 300));

    fn session_at(rng: &mut StdRng, snake: Snake, food: Option<Cell>) -> Session {
        let mut session = Session::new(GRID, Cell::new(100, 100), Right, rng);
        session.place(snake, food);
        session
    }

    fn count(effects: &[Effect], wanted: fn(&Effect) -> bool) -> usize {
        effects.iter().filter(|e| wanted(e)).count()
    }

    #[test]
    fn pace_speeds_up_and_saturates() {
        let pace = Pace { base: 8.0, max: 20.0, step: 0.3 };
        assert_eq!(pace.rate(0), 8.0);
        assert!((pace.rate(10) - 11.0).abs() < 1e-5);
        assert_eq!(pace.rate(40), 20.0);
        assert_eq!(pace.rate(1000), 20.0);
        assert!((pace.interval(0) - 0.125).abs() < 1e-6);
    }

    #[test]
    fn new_session_food_is_off_the_snake() {
        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let session = Session::new(GRID, Cell::new(100, 100), Right, &mut rng);
            let food = session.food.unwrap();
            assert_ne!(food, Cell::new(100, 100));
            assert!(GRID.contains(food));
        }
    }

    #[test]
    fn three_ticks_without_input() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut session = session_at(&mut rng, Snake::new(Cell::new(100, 100), Right), FAR);

        for _ in 0..3 {
            let effects = session.tick([], &mut rng);
            assert_eq!(effects.len(), 1);
            assert!(matches!(effects[0], Effect::Frame(_)));
        }
        assert_eq!(session.snake.head(), Cell::new(160, 100));
        assert_eq!(session.snake.len(), 1);
        assert_eq!(session.state(), SessionState::Running);
    }

    #[test]
    fn eating_grows_scores_and_respawns() {
        let mut rng = StdRng::seed_from_u64(11);
        let food = Cell::new(120, 100);
        let mut session = session_at(&mut rng, Snake::new(Cell::new(100, 100), Right), Some(food));

        let effects = session.tick([], &mut rng);
        assert_eq!(count(&effects, |e| *e == Effect::FoodEaten), 1);
        assert_eq!(session.score, 1);
        assert_eq!(session.snake.segments().collect::<Vec<_>>(), vec![food, Cell::new(100, 100)]);

        let next = session.food.unwrap();
        assert!(!session.snake.occupies(next));

        // frame is emitted after the mutation and reflects it
        match effects.last() {
            Some(Effect::Frame(frame)) => {
                assert_eq!(frame.score, 1);
                assert_eq!(frame.body.len(), 2);
                assert_eq!(frame.food, Some(next));
            }
            other => panic!("expected a frame, got {other:?}"),
        }
    }

    #[test]
    fn length_changes_only_when_eating() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut session = Session::new(GRID, Cell::new(100, 100), Right, &mut rng);
        let turns = [Down, Right, Up, Right];

        for i in 0..200 {
            let before = session.snake.len();
            let food = session.food;
            let steer = if i % 7 == 0 { vec![turns[(i / 7) % turns.len()]] } else { vec![] };
            session.tick(steer, &mut rng);
            if session.state() != SessionState::Running {
                break;
            }
            let grew = Some(session.snake.head()) == food;
            assert_eq!(session.snake.len(), before + grew as usize);
        }
    }

    #[test]
    fn reversal_request_is_ignored() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut session = session_at(
            &mut rng,
            Snake::from_body([Cell::new(100, 100), Cell::new(80, 100)], Right),
            FAR,
        );
        session.tick([Left], &mut rng);
        assert_eq!(session.state(), SessionState::Running);
        assert_eq!(session.snake.head(), Cell::new(120, 100));
    }

    #[test]
    fn last_accepted_request_wins() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut session = session_at(&mut rng, Snake::new(Cell::new(100, 100), Right), FAR);
        session.tick([Up, Right, Down], &mut rng);
        // Right replaced Up, so Down no longer reverses anything.
        assert_eq!(session.snake.head(), Cell::new(100, 120));
    }

    #[test]
    fn up_then_down_in_one_tick_keeps_up() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut session = session_at(
            &mut rng,
            Snake::from_body([Cell::new(100, 100), Cell::new(80, 100)], Right),
            FAR,
        );
        let effects = session.tick([Up, Down], &mut rng);
        assert_eq!(session.state(), SessionState::Running);
        assert_eq!(session.snake.head(), Cell::new(100, 80));
        assert_eq!(effects.len(), 1);
    }

    #[test]
    fn hitting_the_right_wall_ends_with_prior_score() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut session = session_at(&mut rng, Snake::new(Cell::new(580, 100), Right), FAR);
        session.score = 4;

        let effects = session.tick([], &mut rng);
        assert_eq!(effects, vec![Effect::GameOver { score: 4 }]);
        assert_eq!(session.state(), SessionState::Ended { score: 4, cause: EndCause::Wall });
        assert_eq!(session.snake.head(), Cell::new(580, 100));

        // terminal: nothing more happens
        assert!(session.tick([Up], &mut rng).is_empty());
        assert_eq!(session.snake.head(), Cell::new(580, 100));
    }

    #[test]
    fn every_wall_ends_the_session() {
        let cases = [
            (Cell::new(0, 100), Left),
            (Cell::new(100, 0), Up),
            (Cell::new(100, 380), Down),
            (Cell::new(580, 380), Right),
        ];
        for (start, direction) in cases {
            let mut rng = StdRng::seed_from_u64(0);
            let mut session = session_at(&mut rng, Snake::new(start, direction), FAR);
            session.tick([], &mut rng);
            assert!(matches!(
                session.state(),
                SessionState::Ended { score: 0, cause: EndCause::Wall }
            ));
        }
    }

    #[test]
    fn running_into_the_body_ends_the_session() {
        let mut rng = StdRng::seed_from_u64(4);
        // head at (100,100) moving up, body curls around to the left of it
        let body = [
            Cell::new(100, 100),
            Cell::new(100, 120),
            Cell::new(80, 120),
            Cell::new(80, 100),
            Cell::new(80, 80),
            Cell::new(60, 80),
        ];
        let mut session = session_at(&mut rng, Snake::from_body(body, Up), FAR);
        let effects = session.tick([Left], &mut rng);
        assert_eq!(effects, vec![Effect::GameOver { score: 0 }]);
        assert_eq!(
            session.state(),
            SessionState::Ended { score: 0, cause: EndCause::SelfCollision }
        );
    }

    #[test]
    fn chasing_the_tail_is_a_collision() {
        let mut rng = StdRng::seed_from_u64(4);
        // a 2x2 loop: the next head is the current tail cell
        let body = [
            Cell::new(100, 100),
            Cell::new(100, 120),
            Cell::new(80, 120),
            Cell::new(80, 100),
        ];
        let mut session = session_at(&mut rng, Snake::from_body(body, Up), FAR);
        session.tick([Left], &mut rng);
        assert!(matches!(
            session.state(),
            SessionState::Ended { cause: EndCause::SelfCollision, .. }
        ));
    }

    #[test]
    fn filling_the_board_ends_the_session() {
        let grid = Grid::new(60, 20, 20);
        let mut rng = StdRng::seed_from_u64(1);
        let mut session = Session::new(grid, Cell::new(20, 0), Right, &mut rng);
        session.place(
            Snake::from_body([Cell::new(20, 0), Cell::new(0, 0)], Right),
            Some(Cell::new(40, 0)),
        );

        let effects = session.tick([], &mut rng);
        assert_eq!(session.score, 1);
        assert_eq!(session.food, None);
        assert_eq!(count(&effects, |e| matches!(e, Effect::GameOver { score: 1 })), 1);
        assert_eq!(
            session.state(),
            SessionState::Ended { score: 1, cause: EndCause::BoardFilled }
        );
    }
}
