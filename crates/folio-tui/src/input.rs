use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::app::App;
use crate::widgets::NavBarWidget;

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    /// Wheel gesture with a signed vertical delta
    Wheel(f64),
    /// Touch gesture, vertical coordinate in touch units
    TouchStart(f64),
    TouchMove(f64),
    TouchEnd,
    /// Nav link to a section id
    GoTo(String),
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    let step = app.config.navigation.wheel_threshold;

    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Esc, _) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        // One full gesture per key press
        (KeyCode::Char('j'), KeyModifiers::NONE)
        | (KeyCode::Down, _)
        | (KeyCode::PageDown, _)
        | (KeyCode::Char(' '), KeyModifiers::NONE) => Action::Wheel(step),
        (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) | (KeyCode::PageUp, _) => {
            Action::Wheel(-step)
        }

        // Nav links
        (KeyCode::Char('g'), KeyModifiers::NONE) | (KeyCode::Home, _) => {
            Action::GoTo(String::new())
        }
        (KeyCode::Char('G'), _) | (KeyCode::End, _) => app
            .config
            .sections
            .last()
            .map(|s| Action::GoTo(s.id.clone()))
            .unwrap_or(Action::None),
        (KeyCode::Char(c @ '1'..='9'), KeyModifiers::NONE) => {
            let n = c as usize - '1' as usize;
            app.config
                .sections
                .get(n)
                .map(|s| Action::GoTo(s.id.clone()))
                .unwrap_or(Action::None)
        }

        _ => Action::None,
    }
}

/// Handle a mouse event: the wheel maps to wheel gestures, a left-button drag
/// maps to a touch gesture, and a click on the nav bar follows the link.
pub fn handle_mouse_event(mouse: MouseEvent, app: &App) -> Action {
    let units = app.config.input.touch_row_units;
    let y = mouse.row as f64 * units;

    match mouse.kind {
        MouseEventKind::ScrollDown => Action::Wheel(app.config.input.wheel_step),
        MouseEventKind::ScrollUp => Action::Wheel(-app.config.input.wheel_step),
        MouseEventKind::Down(MouseButton::Left) => {
            if mouse.row == app.areas.nav.y && app.areas.nav.height > 0 {
                return NavBarWidget::hit_test(app, mouse.column)
                    .map(Action::GoTo)
                    .unwrap_or(Action::None);
            }
            Action::TouchStart(y)
        }
        MouseEventKind::Drag(MouseButton::Left) => Action::TouchMove(y),
        MouseEventKind::Up(MouseButton::Left) => Action::TouchEnd,
        _ => Action::None,
    }
}
