mod audio;
mod config;
mod effect;
mod flow;
mod food;
mod grid;
mod high_score;
mod input;
mod menu;
mod render;
mod session;
mod snake;

use log::info;
use macroquad::time::get_time;
use macroquad::window::{Conf, next_frame};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::audio::Audio;
use crate::config::{GameConfig, config_path};
use crate::effect::Effect;
use crate::flow::{Context, Flow};
use crate::high_score::FileStore;
use crate::input::Keyboard;
use crate::render::Renderer;

fn window_conf() -> Conf {
    // Logging is not up yet; a broken file is reported again from main.
    let config = GameConfig::from_path(&config_path()).unwrap_or_default();
    Conf {
        window_title: "Snake Game".to_owned(),
        window_width: config.width,
        window_height: config.height,
        high_dpi: true,
        ..Default::default()
    }
}

fn dispatch(effects: &[Effect], audio: &mut Audio, renderer: &mut Renderer) {
    for effect in effects {
        audio.apply(effect);
        renderer.apply(effect);
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    pretty_env_logger::init();

    let config = GameConfig::load_or_default(&config_path());
    let mut audio = Audio::load(&config).await;
    let mut renderer = Renderer::new();
    let mut flow = Flow::new(&config);
    let mut ctx = Context {
        store: FileStore::new(&config.high_score_path),
        rng: StdRng::from_entropy(),
        config,
    };
    let mut keyboard = Keyboard::new();
    let mut last_tick = get_time();

    'frames: loop {
        let Some(screen) = flow.screen() else { break };
        for command in keyboard.poll(screen) {
            let was_playing = matches!(flow, Flow::Playing { .. });
            let (next, effects) = flow.handle(&mut ctx, command);
            if !was_playing && matches!(next, Flow::Playing { .. }) {
                last_tick = get_time();
            }
            flow = next;
            dispatch(&effects, &mut audio, &mut renderer);
            if matches!(flow, Flow::Quit) {
                break 'frames;
            }
        }

        if let Some(interval) = flow.tick_interval(&ctx.config) {
            let now = get_time();
            if now - last_tick >= interval as f64 {
                last_tick = now;
                let (next, effects) = flow.tick(&mut ctx);
                flow = next;
                dispatch(&effects, &mut audio, &mut renderer);
            }
        }

        renderer.draw(&flow, &ctx.config);
        next_frame().await;
    }

    info!("bye");
}
