//! Key bindings.
//!
//! Maps terminal-independent [`Key`]s to [`Event`]s for the current screen and
//! filter mode. Hosts translate their terminal library's key type into `Key`
//! and feed the result to [`handle_event`](super::handle_event).
//!
//! | Key                  | Grid                | Filter mode       | Detail        |
//! |----------------------|---------------------|-------------------|---------------|
//! | arrows / `hjkl`      | move                | (typed)           |               |
//! | space / PgDn, PgUp   | screen page         | (typed)           |               |
//! | `n` / `b`            | remote page         | (typed)           |               |
//! | `r`                  | refresh             | (typed)           |               |
//! | `/`                  | filter mode         | (typed)           |               |
//! | Enter                | open detail         | keep query        |               |
//! | `v`                  |                     | (typed)           | view value    |
//! | Esc                  | quit                | clear query       | back          |
//! | `q`                  | quit                | (typed)           | back          |
//! | Backspace            |                     | delete char       |               |
//! | Ctrl-C               | quit                | quit              | quit          |

use super::handler::Event;
use super::modes::Screen;
use super::AppState;

/// A key press, independent of the terminal library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Enter,
    Esc,
    Backspace,
    CtrlC,
}

/// Returns the event bound to `key` in the current state, if any.
///
/// # Examples
///
/// ```
/// use secretgrid::app::keys::{map_key, Key};
/// use secretgrid::app::{AppState, Event};
/// use secretgrid::Config;
///
/// let state = AppState::new(&Config::default());
/// assert_eq!(map_key(&state, Key::Char('j')), Some(Event::MoveDown));
/// assert_eq!(map_key(&state, Key::Char('/')), Some(Event::EnterFilterMode));
/// ```
#[must_use]
pub fn map_key(state: &AppState, key: Key) -> Option<Event> {
    if key == Key::CtrlC {
        return Some(Event::Quit);
    }

    match state.screen {
        Screen::Detail => match key {
            Key::Esc | Key::Char('q') => Some(Event::CloseDetail),
            Key::Char('v') => Some(Event::ViewValue),
            _ => None,
        },
        Screen::Grid if state.grid.is_filtering() => match key {
            Key::Esc => Some(Event::ClearFilter),
            Key::Enter => Some(Event::ExitFilterMode),
            Key::Backspace => Some(Event::FilterBackspace),
            Key::Char(c) if !c.is_control() => Some(Event::FilterChar(c)),
            _ => None,
        },
        Screen::Grid => match key {
            Key::Esc | Key::Char('q') => Some(Event::Quit),
            Key::Enter => Some(Event::OpenDetail),
            Key::Up | Key::Char('k') => Some(Event::MoveUp),
            Key::Down | Key::Char('j') => Some(Event::MoveDown),
            Key::Left | Key::Char('h') => Some(Event::MoveLeft),
            Key::Right | Key::Char('l') => Some(Event::MoveRight),
            Key::PageDown | Key::Char(' ') => Some(Event::NextScreenPage),
            Key::PageUp => Some(Event::PrevScreenPage),
            Key::Char('/') => Some(Event::EnterFilterMode),
            Key::Char('n') => Some(Event::NextRemotePage),
            Key::Char('b') => Some(Event::PrevRemotePage),
            Key::Char('r') => Some(Event::Refresh),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;

    #[test]
    fn filter_mode_captures_letters() {
        let mut state = AppState::new(&Config::default());
        state.grid.enter_filter_mode();
        assert_eq!(map_key(&state, Key::Char('q')), Some(Event::FilterChar('q')));
        assert_eq!(map_key(&state, Key::Char('n')), Some(Event::FilterChar('n')));
        assert_eq!(map_key(&state, Key::Esc), Some(Event::ClearFilter));
        assert_eq!(map_key(&state, Key::Enter), Some(Event::ExitFilterMode));
        assert_eq!(map_key(&state, Key::Up), None);
    }

    #[test]
    fn detail_screen_only_goes_back() {
        let mut state = AppState::new(&Config::default());
        state.screen = Screen::Detail;
        assert_eq!(map_key(&state, Key::Esc), Some(Event::CloseDetail));
        assert_eq!(map_key(&state, Key::Char('v')), Some(Event::ViewValue));
        assert_eq!(map_key(&state, Key::Char('j')), None);
        assert_eq!(map_key(&state, Key::CtrlC), Some(Event::Quit));
    }

    #[test]
    fn grid_bindings() {
        let state = AppState::new(&Config::default());
        assert_eq!(map_key(&state, Key::Char(' ')), Some(Event::NextScreenPage));
        assert_eq!(map_key(&state, Key::PageUp), Some(Event::PrevScreenPage));
        assert_eq!(map_key(&state, Key::Char('n')), Some(Event::NextRemotePage));
        assert_eq!(map_key(&state, Key::Char('b')), Some(Event::PrevRemotePage));
        assert_eq!(map_key(&state, Key::Char('r')), Some(Event::Refresh));
        assert_eq!(map_key(&state, Key::Esc), Some(Event::Quit));
        assert_eq!(map_key(&state, Key::Char('x')), None);
    }
}
