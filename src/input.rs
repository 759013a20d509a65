use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;
use crate::models::Overlay;
use crate::pagination::FetchRequest;

/// Side effect the main loop has to perform after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    None,
    Fetch(FetchRequest),
    Copy(String),
    Quit,
}

impl From<Option<FetchRequest>> for Command {
    fn from(request: Option<FetchRequest>) -> Self {
        request.map_or(Command::None, Command::Fetch)
    }
}

pub fn handle_key(key: KeyEvent, app: &mut App) -> Command {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Command::Quit;
    }

    match app.overlay {
        Overlay::None => handle_table_key(key.code, app),
        Overlay::PageSizePrompt { .. } => handle_prompt_key(key.code, app),
        // Alerts block everything until acknowledged.
        Overlay::Alert { .. } => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                app.dismiss_overlay();
            }
            Command::None
        }
        Overlay::SelectionSummary => match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('s') => {
                app.dismiss_overlay();
                Command::None
            }
            KeyCode::Char('c') => Command::Copy(app.selected_ids_text()),
            KeyCode::Char('q') => Command::Quit,
            _ => Command::None,
        },
    }
}

fn handle_table_key(code: KeyCode, app: &mut App) -> Command {
    match code {
        KeyCode::Char('q') => return Command::Quit,
        KeyCode::Up | KeyCode::Char('k') => app.cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => app.cursor_down(),
        KeyCode::Home | KeyCode::Char('g') => app.cursor_home(),
        KeyCode::End | KeyCode::Char('G') => app.cursor_end(),
        KeyCode::Char(' ') => app.toggle_current_row(),
        KeyCode::Char('a') => app.toggle_select_all(),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::PageUp => return app.prev_page().into(),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::PageDown => return app.next_page().into(),
        KeyCode::Char('[') => return app.first_page().into(),
        KeyCode::Char(']') => return app.last_page().into(),
        KeyCode::Char('r') => app.open_page_size_prompt(),
        KeyCode::Char('s') => app.show_selection_summary(),
        KeyCode::Char('c') => return Command::Copy(app.selected_ids_text()),
        _ => {}
    }
    Command::None
}

fn handle_prompt_key(code: KeyCode, app: &mut App) -> Command {
    match code {
        KeyCode::Enter => return app.submit_page_size().into(),
        KeyCode::Esc => app.dismiss_overlay(),
        KeyCode::Backspace => app.prompt_pop(),
        KeyCode::Char(c) => app.prompt_push(c),
        _ => {}
    }
    Command::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::page_of;
    use crate::models::FetchEvent;
    use pretty_assertions::assert_eq;

    fn press(app: &mut App, code: KeyCode) -> Command {
        handle_key(KeyEvent::from(code), app)
    }

    fn loaded_app(page_size: usize, total: u64) -> App {
        let mut app = App::new(page_size, true);
        let request = app.initial_request();
        app.mark_requested(request);
        app.apply(FetchEvent::Loaded {
            request,
            page: page_of(0, page_size, total),
        });
        app
    }

    #[test]
    fn test_space_and_navigation_keys() {
        let mut app = loaded_app(4, 10);
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.visible_selection(), vec![1, 2]);

        assert_eq!(
            press(&mut app, KeyCode::Right),
            Command::Fetch(FetchRequest {
                page_index: 1,
                page_size: 4
            })
        );
        assert_eq!(press(&mut app, KeyCode::Char('[')), Command::Fetch(app.pagination.request()));
        assert_eq!(press(&mut app, KeyCode::Left), Command::None);
    }

    #[test]
    fn test_prompt_flow() {
        let mut app = loaded_app(12, 100);
        press(&mut app, KeyCode::Char('r'));
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('0'));
        press(&mut app, KeyCode::Backspace);
        // 'q' is text while the prompt is open.
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(
            app.overlay,
            Overlay::PageSizePrompt {
                input: "2q".into()
            }
        );

        press(&mut app, KeyCode::Backspace);
        assert_eq!(
            press(&mut app, KeyCode::Enter),
            Command::Fetch(FetchRequest {
                page_index: 0,
                page_size: 2
            })
        );
        assert_eq!(app.overlay, Overlay::None);
    }

    #[test]
    fn test_alert_blocks_other_keys() {
        let mut app = loaded_app(12, 100);
        press(&mut app, KeyCode::Char('r'));
        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.overlay, Overlay::Alert { .. }));

        assert_eq!(press(&mut app, KeyCode::Right), Command::None);
        assert_eq!(press(&mut app, KeyCode::Char('q')), Command::None);
        press(&mut app, KeyCode::Char(' '));
        assert!(app.selection.is_empty());
        assert_eq!(app.pagination.page_index(), 0);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.overlay, Overlay::None);
    }

    #[test]
    fn test_copy_and_quit() {
        let mut app = loaded_app(3, 3);
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(press(&mut app, KeyCode::Char('c')), Command::Copy("1,2,3".into()));

        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.overlay, Overlay::SelectionSummary);
        press(&mut app, KeyCode::Esc);
        assert_eq!(press(&mut app, KeyCode::Char('q')), Command::Quit);
        assert_eq!(
            handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), &mut app),
            Command::Quit
        );
    }
}
