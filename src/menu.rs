/// Track and skin picked before a session; kept across restarts.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub track: usize,
    pub skin: usize,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// Jump straight to a track. Out-of-range indices are ignored.
    SelectTrack(usize),
    CycleTrack,
    CycleSkin,
    Confirm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    selection: SessionConfig,
    tracks: usize,
    skins: usize,
}

impl Menu {
    pub fn new(tracks: usize, skins: usize) -> Self {
        Self::with_selection(tracks, skins, SessionConfig { track: 0, skin: 0 })
    }

    pub fn with_selection(tracks: usize, skins: usize, selection: SessionConfig) -> Self {
        let tracks = tracks.max(1);
        let skins = skins.max(1);
        let selection = SessionConfig {
            track: selection.track % tracks,
            skin: selection.skin % skins,
        };
        Self { selection, tracks, skins }
    }

    pub fn selection(&self) -> SessionConfig {
        self.selection
    }

    /// Applies an action; `Some` only on confirm.
    pub fn apply(&mut self, action: MenuAction) -> Option<SessionConfig> {
        match action {
            MenuAction::SelectTrack(track) if track < self.tracks => self.selection.track = track,
            MenuAction::SelectTrack(_) => {}
            MenuAction::CycleTrack => self.selection.track = (self.selection.track + 1) % self.tracks,
            MenuAction::CycleSkin => self.selection.skin = (self.selection.skin + 1) % self.skins,
            MenuAction::Confirm => return Some(self.selection),
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skin_cycles_and_wraps() {
        let mut menu = Menu::new(3, 3);
        for expected in [1, 2, 0, 1] {
            assert_eq!(menu.apply(MenuAction::CycleSkin), None);
            assert_eq!(menu.selection().skin, expected);
        }
        assert_eq!(menu.selection().track, 0);
    }

    #[test]
    fn track_selection_is_independent_of_skin() {
        let mut menu = Menu::new(3, 3);
        menu.apply(MenuAction::CycleSkin);
        menu.apply(MenuAction::SelectTrack(2));
        assert_eq!(menu.selection(), SessionConfig { track: 2, skin: 1 });

        menu.apply(MenuAction::CycleTrack);
        assert_eq!(menu.selection(), SessionConfig { track: 0, skin: 1 });
    }

    #[test]
    fn out_of_range_track_is_ignored() {
        let mut menu = Menu::new(3, 3);
        menu.apply(MenuAction::SelectTrack(1));
        menu.apply(MenuAction::SelectTrack(3));
        assert_eq!(menu.selection().track, 1);
    }

    #[test]
    fn confirm_captures_the_selection() {
        let mut menu = Menu::new(3, 3);
        menu.apply(MenuAction::SelectTrack(2));
        menu.apply(MenuAction::CycleSkin);
        menu.apply(MenuAction::CycleSkin);
        assert_eq!(menu.apply(MenuAction::Confirm), Some(SessionConfig { track: 2, skin: 2 }));
    }

    #[test]
    fn restored_selection_is_bounded() {
        let menu = Menu::with_selection(2, 3, SessionConfig { track: 5, skin: 4 });
        assert_eq!(menu.selection(), SessionConfig { track: 1, skin: 1 });
    }
}
