use std::path::Path;

use log::{debug, warn};
use macroquad::audio::{PlaySoundParams, Sound, load_sound, play_sound, stop_sound};

use crate::config::GameConfig;
use crate::effect::Effect;

/// Plays music and cues in response to game effects. Any sound that failed
/// to load is skipped.
pub struct Audio {
    tracks: Vec<Option<Sound>>,
    eat: Option<Sound>,
    game_over: Option<Sound>,
    playing: Option<usize>,
    volume: f32,
}

async fn load(path: &Path) -> Option<Sound> {
    let Some(name) = path.to_str() else {
        warn!("sound path {} is not valid UTF-8", path.display());
        return None;
    };
    match load_sound(name).await {
        Ok(sound) => Some(sound),
        Err(e) => {
            warn!("failed to load sound {}: {:?}", name, e);
            None
        }
    }
}

impl Audio {
    pub async fn load(config: &GameConfig) -> Self {
        let mut tracks = Vec::with_capacity(config.music.len());
        for path in &config.music {
            tracks.push(load(path).await);
        }
        Self {
            tracks,
            eat: load(&config.eat_sound).await,
            game_over: load(&config.game_over_sound).await,
            playing: None,
            volume: config.volume,
        }
    }

    pub fn apply(&mut self, effect: &Effect) {
        match effect {
            Effect::SelectMusic(track) => {
                self.stop_music();
                if let Some(Some(sound)) = self.tracks.get(*track) {
                    debug!("playing track {}", track);
                    play_sound(sound, PlaySoundParams { looped: true, volume: 0.5 * self.volume });
                    self.playing = Some(*track);
                }
            }
            Effect::FoodEaten => self.cue(self.eat.as_ref(), 0.35),
            Effect::GameOver { .. } => {
                self.stop_music();
                self.cue(self.game_over.as_ref(), 0.6);
            }
            Effect::Frame(_) => {}
        }
    }

    fn cue(&self, sound: Option<&Sound>, volume: f32) {
        if let Some(sound) = sound {
            play_sound(sound, PlaySoundParams { looped: false, volume: volume * self.volume });
        }
    }

    fn stop_music(&mut self) {
        if let Some(Some(sound)) = self.playing.take().and_then(|i| self.tracks.get(i)) {
            stop_sound(sound);
        }
    }
}
