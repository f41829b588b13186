use std::path::{Path, PathBuf};
use std::{env, fs, io};

use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::grid::{Cell, Direction, Grid};
use crate::session::Pace;

pub const CONFIG_ENV: &str = "SNAKE_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "snake.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skin {
    pub name: String,
    pub color: [u8; 3],
}

impl Skin {
    fn new(name: &str, color: [u8; 3]) -> Self {
        Self { name: name.to_owned(), color }
    }
}

/// Game tunables. Every field may be omitted from the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: i32,
    pub height: i32,
    pub cell_size: i32,
    /// Ticks per second at score 0.
    pub base_speed: f32,
    pub max_speed: f32,
    /// Extra ticks per second for each point scored.
    pub speed_step: f32,
    pub start: Cell,
    pub start_direction: Direction,
    pub high_score_path: PathBuf,
    pub music: Vec<PathBuf>,
    pub eat_sound: PathBuf,
    pub game_over_sound: PathBuf,
    pub volume: f32,
    pub skins: Vec<Skin>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 400,
            cell_size: 20,
            base_speed: 8.0,
            max_speed: 20.0,
            speed_step: 0.3,
            start: Cell::new(100, 100),
            start_direction: Direction::Right,
            high_score_path: PathBuf::from("highscore.txt"),
            music: vec![
                PathBuf::from("sounds/bg1.wav"),
                PathBuf::from("sounds/bg2.wav"),
                PathBuf::from("sounds/bg3.wav"),
            ],
            eat_sound: PathBuf::from("sounds/eat.wav"),
            game_over_sound: PathBuf::from("sounds/game_over.wav"),
            volume: 1.0,
            skins: vec![
                Skin::new("Classic Green", [0, 255, 0]),
                Skin::new("Blue Snake", [0, 150, 255]),
                Skin::new("Purple Snake", [180, 0, 255]),
            ],
        }
    }
}

/// `$SNAKE_CONFIG` if set, else `snake.json` in the working directory.
pub fn config_path() -> PathBuf {
    env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

impl GameConfig {
    /// Reads and validates a config file. A missing file yields the defaults.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => return Err(ConfigError::Io { path: path.to_owned(), source }),
        };
        let config: Self = serde_json::from_str(&text)
            .map_err(|source| ConfigError::Parse { path: path.to_owned(), source })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_or_default(path: &Path) -> Self {
        match Self::from_path(path) {
            Ok(config) => {
                info!("using config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("{}; falling back to defaults", e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if self.cell_size <= 0 {
            return invalid(format!("cell_size must be positive, got {}", self.cell_size));
        }
        if self.width <= 0 || self.height <= 0 {
            return invalid(format!("grid must be non-empty, got {}x{}", self.width, self.height));
        }
        if self.width % self.cell_size != 0 || self.height % self.cell_size != 0 {
            return invalid(format!(
                "{}x{} is not a multiple of cell_size {}",
                self.width, self.height, self.cell_size
            ));
        }
        let grid = self.grid();
        if grid.columns() * grid.rows() < 2 {
            return invalid("grid needs room for the snake and its food".to_owned());
        }
        if !grid.contains(self.start) {
            return invalid(format!("start {:?} is not a cell of the grid", self.start));
        }
        if !(self.base_speed > 0.0) {
            return invalid(format!("base_speed must be positive, got {}", self.base_speed));
        }
        if !(self.max_speed >= self.base_speed) {
            return invalid(format!(
                "max_speed {} is below base_speed {}",
                self.max_speed, self.base_speed
            ));
        }
        if !(self.speed_step >= 0.0) {
            return invalid(format!("speed_step must not be negative, got {}", self.speed_step));
        }
        if !(0.0..=1.0).contains(&self.volume) {
            return invalid(format!("volume must be within 0..=1, got {}", self.volume));
        }
        if self.music.is_empty() {
            return invalid("at least one music track is required".to_owned());
        }
        if self.skins.is_empty() {
            return invalid("at least one skin is required".to_owned());
        }
        Ok(())
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.width, self.height, self.cell_size)
    }

    pub fn pace(&self) -> Pace {
        Pace { base: self.base_speed, max: self.max_speed, step: self.speed_step }
    }
}
