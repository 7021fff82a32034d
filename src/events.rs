use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, Page};

/// Everything a key press can do, decoupled from how it is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Back,
    GotoTree,
    GotoAssistant,
    GotoResources,
    OpenEditor,
    InputChar(char),
    InputBackspace,
    Submit,
    MoveUp,
    MoveDown,
    MovePageUp,
    MovePageDown,
    ScrollUp(u16),
    ScrollDown(u16),
    Activate,
    CycleMode,
    ClearHistory,
    ApplyCode,
    EditorInsert(char),
    EditorNewline,
    EditorBackspace,
    EditorLeft,
    EditorRight,
    EditorUp,
    EditorDown,
    EditorSave,
    EditorRun,
    EditorDiscard,
}

const SCROLL_ARROW_AMOUNT: u16 = 1;
const SCROLL_PAGE_AMOUNT: u16 = 10;

/// Translate a terminal event into an action for the current page.
/// Pure — all mutation happens in `App::apply_action`.
pub fn handle_event(event: &Event, app: &App) -> Option<Action> {
    let key = match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => key,
        _ => return None,
    };

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // Global shortcuts, valid on every page
    if ctrl {
        match key.code {
            KeyCode::Char('q') => return Some(Action::Quit),
            KeyCode::Char('t') if app.has_repo() => return Some(Action::GotoTree),
            KeyCode::Char('a') if app.has_repo() => return Some(Action::GotoAssistant),
            KeyCode::Char('o') if app.has_repo() => return Some(Action::GotoResources),
            KeyCode::Char('e') if app.has_repo() => return Some(Action::OpenEditor),
            _ => {}
        }
    }
    if key.code == KeyCode::Esc {
        return Some(Action::Back);
    }

    match app.page {
        Page::RepoSearch => handle_list_input(key),
        Page::Tree => handle_tree(key),
        Page::File => handle_scrollable(key),
        Page::Assistant | Page::Resources => handle_query_page(key, ctrl),
        Page::Editor => handle_editor(key, ctrl),
    }
}

/// Username input + repository list selection.
fn handle_list_input(key: &KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Enter => Some(Action::Submit),
        KeyCode::Up => Some(Action::MoveUp),
        KeyCode::Down => Some(Action::MoveDown),
        KeyCode::Backspace => Some(Action::InputBackspace),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::InputChar(c)),
        _ => None,
    }
}

fn handle_tree(key: &KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Up => Some(Action::MoveUp),
        KeyCode::Down => Some(Action::MoveDown),
        KeyCode::PageUp => Some(Action::MovePageUp),
        KeyCode::PageDown => Some(Action::MovePageDown),
        KeyCode::Enter => Some(Action::Activate),
        _ => None,
    }
}

fn handle_scrollable(key: &KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Up => Some(Action::ScrollUp(SCROLL_ARROW_AMOUNT)),
        KeyCode::Down => Some(Action::ScrollDown(SCROLL_ARROW_AMOUNT)),
        KeyCode::PageUp => Some(Action::ScrollUp(SCROLL_PAGE_AMOUNT)),
        KeyCode::PageDown => Some(Action::ScrollDown(SCROLL_PAGE_AMOUNT)),
        _ => None,
    }
}

/// Assistant and resources pages: a query input over a scrollable history.
fn handle_query_page(key: &KeyEvent, ctrl: bool) -> Option<Action> {
    if ctrl {
        match key.code {
            KeyCode::Char('x') => return Some(Action::CycleMode),
            KeyCode::Char('l') => return Some(Action::ClearHistory),
            KeyCode::Char('y') => return Some(Action::ApplyCode),
            _ => {}
        }
    }
    match key.code {
        KeyCode::Enter => Some(Action::Submit),
        KeyCode::Backspace => Some(Action::InputBackspace),
        KeyCode::Up => Some(Action::ScrollUp(SCROLL_ARROW_AMOUNT)),
        KeyCode::Down => Some(Action::ScrollDown(SCROLL_ARROW_AMOUNT)),
        KeyCode::PageUp => Some(Action::ScrollUp(SCROLL_PAGE_AMOUNT)),
        KeyCode::PageDown => Some(Action::ScrollDown(SCROLL_PAGE_AMOUNT)),
        KeyCode::Char(c) if !ctrl => Some(Action::InputChar(c)),
        _ => None,
    }
}

fn handle_editor(key: &KeyEvent, ctrl: bool) -> Option<Action> {
    if ctrl {
        match key.code {
            KeyCode::Char('s') => return Some(Action::EditorSave),
            KeyCode::Char('r') => return Some(Action::EditorRun),
            KeyCode::Char('d') => return Some(Action::EditorDiscard),
            _ => return None,
        }
    }
    match key.code {
        KeyCode::Enter => Some(Action::EditorNewline),
        KeyCode::Backspace => Some(Action::EditorBackspace),
        KeyCode::Left => Some(Action::EditorLeft),
        KeyCode::Right => Some(Action::EditorRight),
        KeyCode::Up => Some(Action::EditorUp),
        KeyCode::Down => Some(Action::EditorDown),
        KeyCode::Tab => Some(Action::EditorInsert(' ')),
        KeyCode::Char(c) => Some(Action::EditorInsert(c)),
        _ => None,
    }
}
