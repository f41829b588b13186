use crate::grid::Cell;

/// Everything the game core tells the outside world. Audio and drawing
/// react to these; the core never calls them directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Board state after a tick has been applied.
    Frame(Frame),
    FoodEaten,
    GameOver { score: u32 },
    SelectMusic(usize),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub body: Vec<Cell>,
    pub food: Option<Cell>,
    pub score: u32,
}
