use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Field, Screen};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    None,
    Quit,
    /// Re-run the availability check for every provider
    Refresh,
    /// Run `service.show_marker`(...) for the selected provider
    ShowMarker,
    /// Run `service.show_directions`(...) for the selected provider
    ShowDirections,
}

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App) -> Action {
    use KeyCode::{BackTab, Backspace, Char, Down, Enter, Esc, Left, Right, Tab, Up};

    let control = key.modifiers.contains(KeyModifiers::CONTROL);

    // Global quit shortcut
    if key.code == Char('c') && control {
        return Action::Quit;
    }

    let mut action = Action::None;

    match app.screen {
        Screen::ProviderSelect => match key.code {
            Char('q') if key.modifiers.is_empty() => {
                action = Action::Quit;
            }
            Up | Char('k') => {
                if app.provider_index > 0 {
                    app.provider_index -= 1;
                }
            }
            Down | Char('j') => {
                if app.provider_index + 1 < app.providers.len() {
                    app.provider_index += 1;
                }
            }
            Enter | Char(' ') => {
                app.select_current_provider();
            }
            Char('r') => {
                action = Action::Refresh;
            }
            _ => {}
        },

        Screen::RequestForm => match key.code {
            Char('d') if control => {
                action = Action::ShowDirections;
            }
            Char(character) => {
                if !control && !key.modifiers.contains(KeyModifiers::ALT)
                    && let Some(text) = app.focused_text_mut()
                {
                    text.push(character);
                }
            }
            Backspace => {
                if let Some(text) = app.focused_text_mut() {
                    text.pop();
                }
            }
            Tab | Down => {
                app.focus = app.focus.next();
            }
            BackTab | Up => {
                app.focus = app.focus.previous();
            }
            Left if app.focus == Field::Mode => {
                app.cycle_mode(false);
            }
            Right if app.focus == Field::Mode => {
                app.cycle_mode(true);
            }
            Enter => {
                action = Action::ShowMarker;
            }
            Esc => {
                app.screen = Screen::ProviderSelect;
                app.error_message = None;
            }
            _ => {}
        },
    }
    action
}
