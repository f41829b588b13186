use log::info;
use rand::Rng;

use crate::config::GameConfig;
use crate::effect::Effect;
use crate::grid::Direction;
use crate::high_score::{self, HighScoreStore};
use crate::menu::{Menu, MenuAction, SessionConfig};
use crate::session::{Session, SessionState};

/// Process-wide state, built once at start-up and lent to every transition.
pub struct Context<R, S> {
    pub config: GameConfig,
    pub rng: R,
    pub store: S,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    Menu(MenuAction),
    Restart,
    ToMenu,
    Quit,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing,
    GameOver,
}

#[derive(Debug, Clone)]
pub enum Flow {
    Menu(Menu),
    Playing {
        session: Session,
        config: SessionConfig,
        /// Steering requested since the last tick, oldest first.
        pending: Vec<Direction>,
    },
    GameOver {
        score: u32,
        high_score: u32,
        config: SessionConfig,
    },
    Quit,
}

impl Flow {
    pub fn new(config: &GameConfig) -> Self {
        Flow::Menu(Menu::new(config.music.len(), config.skins.len()))
    }

    pub fn screen(&self) -> Option<Screen> {
        match self {
            Flow::Menu(_) => Some(Screen::Menu),
            Flow::Playing { .. } => Some(Screen::Playing),
            Flow::GameOver { .. } => Some(Screen::GameOver),
            Flow::Quit => None,
        }
    }

    /// Seconds until the next tick is due; only a running session ticks.
    pub fn tick_interval(&self, config: &GameConfig) -> Option<f32> {
        match self {
            Flow::Playing { session, .. } => Some(session.tick_interval(&config.pace())),
            _ => None,
        }
    }

    /// Applies a player command. Commands that mean nothing in the current
    /// state leave it untouched.
    pub fn handle<R, S>(self, ctx: &mut Context<R, S>, command: Command) -> (Flow, Vec<Effect>)
    where
        R: Rng,
        S: HighScoreStore,
    {
        match (self, command) {
            (_, Command::Quit) => {
                info!("quit requested");
                (Flow::Quit, Vec::new())
            }
            (Flow::Menu(mut menu), Command::Menu(action)) => match menu.apply(action) {
                Some(config) => start(ctx, config),
                None => (Flow::Menu(menu), Vec::new()),
            },
            (Flow::Playing { session, config, mut pending }, Command::Steer(direction)) => {
                pending.push(direction);
                (Flow::Playing { session, config, pending }, Vec::new())
            }
            (Flow::GameOver { config, .. }, Command::Restart) => start(ctx, config),
            (Flow::GameOver { config, .. }, Command::ToMenu) => {
                let menu = Menu::with_selection(ctx.config.music.len(), ctx.config.skins.len(), config);
                (Flow::Menu(menu), Vec::new())
            }
            (flow, _) => (flow, Vec::new()),
        }
    }

    /// Advances a running session by one tick. When the session ends the
    /// high score is settled before the game-over state is returned.
    pub fn tick<R, S>(self, ctx: &mut Context<R, S>) -> (Flow, Vec<Effect>)
    where
        R: Rng,
        S: HighScoreStore,
    {
        match self {
            Flow::Playing { mut session, config, mut pending } => {
                let effects = session.tick(pending.drain(..), &mut ctx.rng);
                match session.state() {
                    SessionState::Running => (Flow::Playing { session, config, pending }, effects),
                    SessionState::Ended { score, cause } => {
                        let high_score = high_score::record(&mut ctx.store, score);
                        info!("game over ({:?}): score {}, high score {}", cause, score, high_score);
                        (Flow::GameOver { score, high_score, config }, effects)
                    }
                }
            }
            flow => (flow, Vec::new()),
        }
    }
}

fn start<R, S>(ctx: &mut Context<R, S>, config: SessionConfig) -> (Flow, Vec<Effect>)
where
    R: Rng,
{
    let session = Session::new(
        ctx.config.grid(),
        ctx.config.start,
        ctx.config.start_direction,
        &mut ctx.rng,
    );
    info!("starting session with track {} and skin {}", config.track, config.skin);
    let effects = vec![Effect::SelectMusic(config.track), Effect::Frame(session.frame())];
    (Flow::Playing { session, config, pending: Vec::new() }, effects)
}
