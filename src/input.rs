//! Key bindings.
//!
//! Global: `Tab`/`Shift-Tab` switch pages, `Esc` or `Ctrl-C` quits. Pages
//! with a text field take every other printable key as input.

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Effect};
use crate::models::{Page, Trigger};

/// Apply one key press. Returns the effect it triggered, if any.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Option<Effect> {
    let ctrl_c = key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c');
    if ctrl_c || key.code == KeyCode::Esc {
        app.should_quit = true;
        return None;
    }

    match key.code {
        KeyCode::Tab => return app.transition(Trigger::Next),
        KeyCode::BackTab => return app.transition(Trigger::Previous),
        _ => {}
    }

    match app.page {
        Page::Upload => handle_text_input(app, key.code, App::upload_confirm),
        Page::Chat => handle_text_input(app, key.code, App::ask),
        Page::Answer => handle_answer_input(app, key.code),
        Page::Dashboard => {
            let rows = app.session.grade.as_ref().map_or(0, |g| g.outcomes.len());
            handle_scroll_input(app, key.code, rows);
            None
        }
        Page::History => {
            let rows = app.history().len();
            handle_scroll_input(app, key.code, rows);
            None
        }
    }
}

fn handle_text_input(
    app: &mut App,
    key: KeyCode,
    confirm: fn(&mut App) -> Option<Effect>,
) -> Option<Effect> {
    match key {
        KeyCode::Char(c) => {
            app.input_push(c);
            None
        }
        KeyCode::Backspace => {
            app.input_pop();
            None
        }
        KeyCode::Enter => confirm(app),
        _ => None,
    }
}

fn handle_answer_input(app: &mut App, key: KeyCode) -> Option<Effect> {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Left | KeyCode::Char('h') => app.previous_question(),
        KeyCode::Right | KeyCode::Char('l') => app.next_question(),
        KeyCode::Enter | KeyCode::Char(' ') => app.choose_option(),
        KeyCode::Char('s') | KeyCode::Char('S') => return app.submit(Local::now()),
        _ => {}
    }
    None
}

fn handle_scroll_input(app: &mut App, key: KeyCode, rows: usize) {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_down(rows),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_up(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(app: &mut App, code: KeyCode) -> Option<Effect> {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_tab_cycles_pages() {
        let mut app = App::new();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.page, Page::Answer);
        assert_eq!(press(&mut app, KeyCode::Tab), Some(Effect::LoadHistory));
        assert_eq!(app.page, Page::Dashboard);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.page, Page::Answer);
    }

    #[test]
    fn test_typing_goes_to_the_upload_field() {
        let mut app = App::new();
        for c in "cours.pdfx".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.upload_input(), "cours.pdf");
        assert!(!app.should_quit);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new();
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);

        let mut app = App::new();
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
        assert_eq!(app.upload_input(), "");
    }

    #[test]
    fn test_submit_key_without_quiz() {
        let mut app = App::new();
        press(&mut app, KeyCode::Tab);
        assert_eq!(press(&mut app, KeyCode::Char('s')), None);
        assert_eq!(app.page, Page::Answer);
    }
}
