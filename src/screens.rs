/// Screen flow between rounds.  Each modal screen waits for exactly one of
/// the actions its buttons offer and is stepped once per frame, so the main
/// loop never blocks inside a screen.

use crate::config::GameMode;
use crate::entities::RoundStatus;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing,
    LevelComplete,
    GameOver,
    /// The final level was cleared.
    Victory,
}

/// A discrete UI command, from a button click or its keyboard shortcut.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiAction {
    Start(GameMode),
    Continue,
    Restart,
    BackToMenu,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Stay,
    Goto(Screen),
    Quit,
}

impl Screen {
    /// Which screen a round outcome leads to.  `Playing` keeps playing.
    pub fn after_round(status: RoundStatus, final_level: bool) -> Screen {
        match status {
            RoundStatus::Playing => Screen::Playing,
            RoundStatus::Lost(_) => Screen::GameOver,
            RoundStatus::WonLevel if final_level => Screen::Victory,
            RoundStatus::WonLevel => Screen::LevelComplete,
        }
    }

    /// The actions this screen offers as buttons, in display order.
    pub fn actions(self) -> &'static [UiAction] {
        match self {
            Screen::Menu => &[
                UiAction::Start(GameMode::Classic),
                UiAction::Start(GameMode::Typing),
                UiAction::Start(GameMode::Falling),
                UiAction::Quit,
            ],
            Screen::Playing => &[UiAction::Quit],
            Screen::LevelComplete => &[UiAction::Continue, UiAction::Quit],
            Screen::GameOver => &[UiAction::Restart, UiAction::BackToMenu, UiAction::Quit],
            Screen::Victory => &[UiAction::BackToMenu, UiAction::Quit],
        }
    }

    /// Apply `action`.  Actions the screen does not offer leave it in place.
    pub fn on_action(self, action: UiAction) -> Transition {
        if !self.actions().contains(&action) {
            return Transition::Stay;
        }
        match action {
            UiAction::Quit => Transition::Quit,
            UiAction::Start(_) | UiAction::Continue | UiAction::Restart => {
                Transition::Goto(Screen::Playing)
            }
            UiAction::BackToMenu => Transition::Goto(Screen::Menu),
        }
    }
}

impl UiAction {
    pub fn label(self) -> &'static str {
        match self {
            UiAction::Start(GameMode::Classic) => "Classic",
            UiAction::Start(GameMode::Typing) => "Typing",
            UiAction::Start(GameMode::Falling) => "One by One",
            UiAction::Continue => "Continue",
            UiAction::Restart => "Restart",
            UiAction::BackToMenu => "Menu",
            UiAction::Quit => "Quit",
        }
    }

    /// Keyboard shortcut, lowercase.
    pub fn shortcut(self) -> char {
        match self {
            UiAction::Start(GameMode::Classic) => '1',
            UiAction::Start(GameMode::Typing) => '2',
            UiAction::Start(GameMode::Falling) => '3',
            UiAction::Continue => 'c',
            UiAction::Restart => 'r',
            UiAction::BackToMenu => 'm',
            UiAction::Quit => 'q',
        }
    }

    /// Look up the action `key` triggers on `screen`, if any.  Letters are
    /// game input while playing, so `Playing` has no shortcuts.
    pub fn from_key(screen: Screen, key: char) -> Option<UiAction> {
        if screen == Screen::Playing {
            return None;
        }
        let key = key.to_ascii_lowercase();
        screen
            .actions()
            .iter()
            .copied()
            .find(|a| a.shortcut() == key)
    }
}

/// Where one typed key goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyRoute {
    /// Game input for `press_key`.
    Game,
    Action(UiAction),
    Drop,
}

/// Routes the keys of one input drain.  Once the round ends mid-drain the
/// gate closes, and the keys still queued behind the one that ended it are
/// dropped instead of firing the next screen's shortcuts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyGate {
    closed: bool,
}

impl KeyGate {
    pub fn route(&self, screen: Screen, key: char) -> KeyRoute {
        if self.closed {
            return KeyRoute::Drop;
        }
        if screen == Screen::Playing {
            return KeyRoute::Game;
        }
        UiAction::from_key(screen, key).map_or(KeyRoute::Drop, KeyRoute::Action)
    }

    /// Enter picks the first button of a modal screen.
    pub fn route_enter(&self, screen: Screen) -> KeyRoute {
        if self.closed || screen == Screen::Playing {
            return KeyRoute::Drop;
        }
        screen
            .actions()
            .first()
            .copied()
            .map_or(KeyRoute::Drop, KeyRoute::Action)
    }

    /// Note the screen after a game key was applied.
    pub fn after_game_key(&mut self, screen: Screen) {
        if screen != Screen::Playing {
            self.closed = true;
        }
    }
}
