use std::path::PathBuf;
use std::{fs, io};

use log::{debug, info, warn};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("high score file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("high score file {} does not hold a number: {text:?}", .path.display())]
    NotANumber { path: PathBuf, text: String },
}

/// Somewhere to keep the single best score between runs.
pub trait HighScoreStore {
    fn load(&self) -> Result<u32, StoreError>;
    fn save(&mut self, score: u32) -> Result<(), StoreError>;
}

/// Plain-text decimal integer in a file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HighScoreStore for FileStore {
    fn load(&self) -> Result<u32, StoreError> {
        let text = fs::read_to_string(&self.path)
            .map_err(|source| StoreError::Io { path: self.path.clone(), source })?;
        text.trim().parse::<u32>().map_err(|_| StoreError::NotANumber {
            path: self.path.clone(),
            text,
        })
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        fs::write(&self.path, score.to_string())
            .map_err(|source| StoreError::Io { path: self.path.clone(), source })
    }
}

/// Stored high score, or 0 when there is none or it cannot be read.
pub fn load_or_zero<S: HighScoreStore + ?Sized>(store: &S) -> u32 {
    match store.load() {
        Ok(score) => score,
        Err(StoreError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            debug!("no high score saved yet");
            0
        }
        Err(e) => {
            warn!("{}; treating high score as 0", e);
            0
        }
    }
}

/// Saves `score` if it beats the stored value and returns the high score to show.
/// A failed write leaves the previous value in place.
pub fn record<S: HighScoreStore + ?Sized>(store: &mut S, score: u32) -> u32 {
    let high = load_or_zero(store);
    if score <= high {
        return high;
    }
    match store.save(score) {
        Ok(()) => {
            info!("new high score {} (was {})", score, high);
            score
        }
        Err(e) => {
            warn!("could not save high score {}: {}", score, e);
            high
        }
    }
}

#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    pub(crate) value: Option<u32>,
    pub(crate) read_only: bool,
}

#[cfg(test)]
impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<u32, StoreError> {
        self.value.ok_or_else(|| StoreError::Io {
            path: PathBuf::from("<memory>"),
            source: io::Error::from(io::ErrorKind::NotFound),
        })
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        if self.read_only {
            return Err(StoreError::Io {
                path: PathBuf::from("<memory>"),
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            });
        }
        self.value = Some(score);
        Ok(())
    }
}
