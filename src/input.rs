use macroquad::input::{KeyCode, utils};
use macroquad::miniquad::{EventHandler, KeyMods};

use crate::flow::{Command, Screen};
use crate::grid::Direction;
use crate::menu::MenuAction;

// Key presses in arrival order. Auto-repeat is dropped.
#[derive(Default)]
struct Pressed(Vec<KeyCode>);

impl EventHandler for Pressed {
    fn update(&mut self) {}

    fn draw(&mut self) {}

    fn key_down_event(&mut self, keycode: KeyCode, _keymods: KeyMods, repeat: bool) {
        if !repeat {
            self.0.push(keycode);
        }
    }
}

/// Reads key presses from the window's event stream.
pub struct Keyboard {
    subscriber: usize,
    pressed: Pressed,
}

impl Keyboard {
    pub fn new() -> Self {
        Self { subscriber: utils::register_input_subscriber(), pressed: Pressed::default() }
    }

    /// Commands for the keys pressed since the previous poll, in press order.
    pub fn poll(&mut self, screen: Screen) -> Vec<Command> {
        utils::repeat_all_miniquad_input(&mut self.pressed, self.subscriber);
        commands(screen, self.pressed.0.drain(..))
    }
}

/// What a key means on the given screen, if anything.
pub fn command_for(screen: Screen, key: KeyCode) -> Option<Command> {
    if matches!(key, KeyCode::Q | KeyCode::Escape) {
        return Some(Command::Quit);
    }
    match screen {
        Screen::Playing => match key {
            KeyCode::Up | KeyCode::W => Some(Command::Steer(Direction::Up)),
            KeyCode::Down | KeyCode::S => Some(Command::Steer(Direction::Down)),
            KeyCode::Left | KeyCode::A => Some(Command::Steer(Direction::Left)),
            KeyCode::Right | KeyCode::D => Some(Command::Steer(Direction::Right)),
            _ => None,
        },
        Screen::Menu => {
            let action = match key {
                KeyCode::P | KeyCode::Enter | KeyCode::KpEnter => MenuAction::Confirm,
                KeyCode::Key1 => MenuAction::SelectTrack(0),
                KeyCode::Key2 => MenuAction::SelectTrack(1),
                KeyCode::Key3 => MenuAction::SelectTrack(2),
                KeyCode::T => MenuAction::CycleTrack,
                KeyCode::S => MenuAction::CycleSkin,
                _ => return None,
            };
            Some(Command::Menu(action))
        }
        Screen::GameOver => match key {
            KeyCode::R => Some(Command::Restart),
            KeyCode::M => Some(Command::ToMenu),
            _ => None,
        },
    }
}

pub fn commands(screen: Screen, keys: impl IntoIterator<Item = KeyCode>) -> Vec<Command> {
    keys.into_iter().filter_map(|key| command_for(screen, key)).collect()
}
