use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Direction, FocusPane, InputMode};
use crate::tui::AppEvent;

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

pub async fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Resize(_, _) => {}
        AppEvent::Tick => {
            app.tick();
            app.poll_translation().await;
        }
    }
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global quit
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Editing => handle_editing_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    // Clearing history takes two presses of 'D'; any other key cancels
    if app.confirm_clear && key.code != KeyCode::Char('D') {
        app.confirm_clear = false;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        // Enter edit mode on the input box
        KeyCode::Char('i') | KeyCode::Enter if app.focus == FocusPane::Input => {
            app.input_mode = InputMode::Editing;
        }

        // Toggle translation direction
        KeyCode::Char('r') => {
            app.direction = app.direction.toggled();
            app.set_status(format!("Mode: {}", app.direction.label()));
        }

        // Switch focus between input and history
        KeyCode::Tab => {
            app.focus = match app.focus {
                FocusPane::Input => FocusPane::History,
                FocusPane::History => FocusPane::Input,
            };
        }

        // Search history
        KeyCode::Char('/') => {
            app.focus = FocusPane::History;
            app.searching = true;
            app.input_mode = InputMode::Editing;
        }

        // History navigation
        KeyCode::Char('j') | KeyCode::Down => {
            if app.focus == FocusPane::History {
                app.history_nav_down();
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            if app.focus == FocusPane::History {
                app.history_nav_up();
            }
        }

        // Copy actions
        KeyCode::Char('c') => {
            if !app.result.is_empty() {
                if copy_to_clipboard(&app.result) {
                    app.set_status("Result copied!");
                } else {
                    app.set_status("No clipboard tool found");
                }
            }
        }
        KeyCode::Char('C') => {
            if !app.emoji_codes.is_empty() {
                if copy_to_clipboard(&app.emoji_codes) {
                    app.set_status("Codes copied!");
                } else {
                    app.set_status("No clipboard tool found");
                }
            }
        }
        KeyCode::Char('y') => {
            if app.focus == FocusPane::History {
                if let Some(entry) = app.selected_entry() {
                    let text = entry.translation.clone();
                    if copy_to_clipboard(&text) {
                        app.set_status("Copied!");
                    } else {
                        app.set_status("No clipboard tool found");
                    }
                }
            }
        }

        // Clear history (press twice)
        KeyCode::Char('D') => {
            if app.confirm_clear {
                app.confirm_clear = false;
                match app.history_log.clear() {
                    Ok(()) => {
                        app.history.clear();
                        app.history_state.select(None);
                        app.set_status("History cleared");
                    }
                    Err(_) => app.set_status("Could not clear history"),
                }
            } else {
                app.confirm_clear = true;
                app.set_status("Press D again to clear history");
            }
        }

        _ => {}
    }
}

fn handle_editing_mode(app: &mut App, key: KeyEvent) {
    if app.searching {
        handle_search_editing(app, key);
    } else {
        handle_input_editing(app, key);
    }
}

fn handle_search_editing(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => {
            app.searching = false;
            app.input_mode = InputMode::Normal;
            app.history_state.select(None);
        }
        KeyCode::Backspace => {
            app.history_search.pop();
        }
        KeyCode::Char(c) => {
            app.history_search.push(c);
        }
        _ => {}
    }
}

fn handle_input_editing(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => submit(app),
        KeyCode::Backspace => {
            if app.input_cursor > 0 {
                app.input_cursor -= 1;
                let byte_pos = char_to_byte_index(&app.input, app.input_cursor);
                app.input.remove(byte_pos);
            }
        }
        KeyCode::Delete => {
            let char_count = app.input.chars().count();
            if app.input_cursor < char_count {
                let byte_pos = char_to_byte_index(&app.input, app.input_cursor);
                app.input.remove(byte_pos);
            }
        }
        KeyCode::Left => {
            app.input_cursor = app.input_cursor.saturating_sub(1);
        }
        KeyCode::Right => {
            let char_count = app.input.chars().count();
            app.input_cursor = (app.input_cursor + 1).min(char_count);
        }
        KeyCode::Home => {
            app.input_cursor = 0;
        }
        KeyCode::End => {
            app.input_cursor = app.input.chars().count();
        }
        KeyCode::Char(c) => {
            let byte_pos = char_to_byte_index(&app.input, app.input_cursor);
            app.input.insert(byte_pos, c);
            app.input_cursor += 1;
        }
        _ => {}
    }
}

/// Spawns the translation in the background; the event loop picks the
/// result up on tick.
fn submit(app: &mut App) {
    let text = app.input.trim().to_string();
    if text.is_empty() || app.translate_task.is_some() {
        return;
    }

    app.input.clear();
    app.input_cursor = 0;
    app.input_mode = InputMode::Normal;
    app.loading = true;
    app.animation_frame = 0;

    let translator = app.translator.clone();
    let direction = app.direction;
    app.translate_task = Some(tokio::spawn(async move {
        let result = match direction {
            Direction::Forward => translator.translate(&text).await,
            Direction::Reverse => translator.translate_reverse(&text).await,
        };
        (direction, text, result)
    }));
}

fn copy_to_clipboard(text: &str) -> bool {
    use std::io::Write;
    use std::process::{Command, Stdio};

    let tools: [(&str, &[&str]); 3] = [
        ("pbcopy", &[]),
        ("xclip", &["-selection", "clipboard"]),
        ("wl-copy", &[]),
    ];

    for (tool, args) in tools {
        if let Ok(mut child) = Command::new(tool).args(args).stdin(Stdio::piped()).spawn() {
            if let Some(mut stdin) = child.stdin.take() {
                if stdin.write_all(text.as_bytes()).is_ok() {
                    drop(stdin);
                    let _ = child.wait();
                    return true;
                }
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_to_byte_index() {
        let s = "😊a✨";
        assert_eq!(char_to_byte_index(s, 0), 0);
        assert_eq!(char_to_byte_index(s, 1), 4);
        assert_eq!(char_to_byte_index(s, 2), 5);
        assert_eq!(char_to_byte_index(s, 10), s.len());
    }
}
