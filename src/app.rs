use ratatui::widgets::ListState;
use tracing::warn;

use crate::history::{EntryKind, HistoryEntry, HistoryLog};
use crate::openai::OpenAIClient;
use crate::translator::Translator;
use crate::emoji;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    Input,
    History,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

impl Direction {
    pub fn toggled(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Direction::Forward => "Translate to Emoji",
            Direction::Reverse => "Interpret Emojis",
        }
    }

    pub fn entry_kind(&self) -> EntryKind {
        match self {
            Direction::Forward => EntryKind::TextToEmoji,
            Direction::Reverse => EntryKind::EmojiToText,
        }
    }
}

/// How many ticks a status toast stays on screen.
const STATUS_TICKS: u8 = 8;

pub struct App {
    // Core state
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub focus: FocusPane,
    pub direction: Direction,

    // Input state
    pub input: String,
    pub input_cursor: usize, // cursor position in chars

    // Result state
    pub result: String,
    pub emoji_codes: String,

    // History state
    pub history: Vec<HistoryEntry>,
    pub history_state: ListState,
    pub history_search: String,
    pub searching: bool,
    pub confirm_clear: bool,

    // Status toast ("Copied!" etc.)
    pub status: Option<String>,
    status_ticks: u8,

    // In-flight translation
    pub loading: bool,
    pub animation_frame: u8, // 0-2 for ellipsis animation
    pub translate_task: Option<tokio::task::JoinHandle<(Direction, String, String)>>,

    // Collaborators
    pub translator: Translator<OpenAIClient>,
    pub history_log: HistoryLog,
}

impl App {
    pub fn new(
        translator: Translator<OpenAIClient>,
        history_log: HistoryLog,
    ) -> anyhow::Result<Self> {
        let history = history_log.load().unwrap_or_default();

        Ok(Self {
            should_quit: false,
            input_mode: InputMode::Normal,
            focus: FocusPane::Input,
            direction: Direction::Forward,

            input: String::new(),
            input_cursor: 0,

            result: String::new(),
            emoji_codes: String::new(),

            history,
            history_state: ListState::default(),
            history_search: String::new(),
            searching: false,
            confirm_clear: false,

            status: None,
            status_ticks: 0,

            loading: false,
            animation_frame: 0,
            translate_task: None,

            translator,
            history_log,
        })
    }

    pub fn tick(&mut self) {
        if self.loading {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
        if self.status_ticks > 0 {
            self.status_ticks -= 1;
            if self.status_ticks == 0 {
                self.status = None;
            }
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
        self.status_ticks = STATUS_TICKS;
    }

    /// History entries matching the current search, newest first.
    pub fn filtered_history(&self) -> Vec<&HistoryEntry> {
        self.history
            .iter()
            .rev()
            .filter(|e| self.history_search.is_empty() || e.matches(&self.history_search))
            .collect()
    }

    pub fn selected_entry(&self) -> Option<&HistoryEntry> {
        let idx = self.history_state.selected()?;
        self.filtered_history().get(idx).copied()
    }

    pub fn history_nav_down(&mut self) {
        let len = self.filtered_history().len();
        if len == 0 {
            return;
        }
        let next = match self.history_state.selected() {
            Some(i) => (i + 1).min(len - 1),
            None => 0,
        };
        self.history_state.select(Some(next));
    }

    pub fn history_nav_up(&mut self) {
        if self.filtered_history().is_empty() {
            return;
        }
        let prev = match self.history_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.history_state.select(Some(prev));
    }

    /// Checks the in-flight translation and applies its result when done.
    pub async fn poll_translation(&mut self) {
        let finished = self
            .translate_task
            .as_ref()
            .map(|t| t.is_finished())
            .unwrap_or(false);
        if !finished {
            return;
        }

        let task = self.translate_task.take().unwrap();
        self.loading = false;

        match task.await {
            Ok((direction, input, result)) => self.apply_result(direction, &input, &result),
            Err(err) => {
                warn!(error = %err, "translation task failed to complete");
                self.set_status("Translation task failed");
            }
        }
    }

    fn apply_result(&mut self, direction: Direction, input: &str, result: &str) {
        let entry = HistoryEntry::record(direction.entry_kind(), input, result);

        self.result = result.to_string();
        self.emoji_codes = emoji::format_codes(&entry.emoji_codes);

        match self.history_log.append(entry) {
            Ok(entries) => self.history = entries,
            Err(err) => {
                warn!(error = %err, "failed to persist history entry");
                self.set_status("Could not save history");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn test_app() -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let log = HistoryLog::open(dir.path().join("history.json"));

        let config = Config {
            model: None,
            openai_api_key: Some("test-key".to_string()),
        };
        let translator = Translator::new(&config).unwrap();
        let app = App::new(translator, log).unwrap();
        (dir, app)
    }

    #[test]
    fn test_direction_toggle() {
        assert_eq!(Direction::Forward.toggled(), Direction::Reverse);
        assert_eq!(Direction::Reverse.toggled(), Direction::Forward);
    }

    #[test]
    fn test_filtered_history_newest_first() {
        let (_dir, mut app) = test_app();
        app.history = vec![
            HistoryEntry::record(EntryKind::TextToEmoji, "first", "1️⃣"),
            HistoryEntry::record(EntryKind::TextToEmoji, "second", "2️⃣"),
        ];

        let filtered = app.filtered_history();
        assert_eq!(filtered[0].input, "second");

        app.history_search = "first".to_string();
        let filtered = app.filtered_history();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].input, "first");
    }

    #[test]
    fn test_history_nav_clamps() {
        let (_dir, mut app) = test_app();
        app.history = vec![
            HistoryEntry::record(EntryKind::TextToEmoji, "a", "😀"),
            HistoryEntry::record(EntryKind::TextToEmoji, "b", "😀"),
        ];

        app.history_nav_down();
        assert_eq!(app.history_state.selected(), Some(0));
        app.history_nav_down();
        app.history_nav_down();
        assert_eq!(app.history_state.selected(), Some(1));
        app.history_nav_up();
        app.history_nav_up();
        assert_eq!(app.history_state.selected(), Some(0));
    }

    #[test]
    fn test_status_expires_after_ticks() {
        let (_dir, mut app) = test_app();
        app.set_status("Copied!");
        assert!(app.status.is_some());
        for _ in 0..STATUS_TICKS {
            app.tick();
        }
        assert!(app.status.is_none());
    }
}
