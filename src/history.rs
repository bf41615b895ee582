//! Append-only JSON history of completed translations.
//!
//! The log is a plain JSON array on disk, capped to the most recent
//! [`MAX_ENTRIES`] on append. The cap and persistence live here, outside the
//! translation adapter.

use anyhow::{anyhow, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::emoji;

/// Maximum number of entries retained on disk.
pub const MAX_ENTRIES: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    #[serde(rename = "text_to_emoji")]
    TextToEmoji,
    #[serde(rename = "emoji_to_text")]
    EmojiToText,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub input: String,
    pub translation: String,
    pub emoji_codes: Vec<String>,
    pub timestamp: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

impl HistoryEntry {
    /// Builds an entry for a completed translation. Emoji codes come from
    /// the emoji side of the pair: the output for forward translations, the
    /// input for reverse ones.
    pub fn record(kind: EntryKind, input: &str, translation: &str) -> Self {
        let emoji_codes = match kind {
            EntryKind::TextToEmoji => emoji::emoji_codes(translation),
            EntryKind::EmojiToText => emoji::emoji_codes(input),
        };

        Self {
            input: input.to_string(),
            translation: translation.to_string(),
            emoji_codes,
            timestamp: Utc::now().to_rfc3339(),
            kind,
        }
    }

    /// Case-insensitive substring match over input and translation.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.input.to_lowercase().contains(&query)
            || self.translation.to_lowercase().contains(&query)
    }
}

pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn open_default() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;
        Ok(Self::open(config_dir.join("emojimood").join("history.json")))
    }

    pub fn load(&self) -> Result<Vec<HistoryEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)?;
        let entries: Vec<HistoryEntry> = serde_json::from_str(&content)?;
        Ok(entries)
    }

    /// Appends one entry, dropping the oldest past [`MAX_ENTRIES`], and
    /// returns the retained list.
    pub fn append(&self, entry: HistoryEntry) -> Result<Vec<HistoryEntry>> {
        let mut entries = self.load().unwrap_or_default();
        entries.push(entry);

        if entries.len() > MAX_ENTRIES {
            let excess = entries.len() - MAX_ENTRIES;
            entries.drain(..excess);
        }

        self.write(&entries)?;
        Ok(entries)
    }

    pub fn clear(&self) -> Result<()> {
        self.write(&[])
    }

    fn write(&self, entries: &[HistoryEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_log() -> (tempfile::TempDir, HistoryLog) {
        let dir = tempfile::tempdir().unwrap();
        let log = HistoryLog::open(dir.path().join("history.json"));
        (dir, log)
    }

    #[test]
    fn test_append_and_load() {
        let (_dir, log) = temp_log();
        assert!(log.load().unwrap().is_empty());

        log.append(HistoryEntry::record(
            EntryKind::TextToEmoji,
            "I'm happy",
            "😊✨",
        ))
        .unwrap();

        let entries = log.load().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].input, "I'm happy");
        assert_eq!(entries[0].translation, "😊✨");
        assert_eq!(entries[0].emoji_codes, vec!["U+1F60A", "U+2728"]);
        assert_eq!(entries[0].kind, EntryKind::TextToEmoji);
    }

    #[test]
    fn test_reverse_entry_codes_come_from_input() {
        let entry = HistoryEntry::record(EntryKind::EmojiToText, "😊✨", "I'm feeling happy");
        assert_eq!(entry.emoji_codes, vec!["U+1F60A", "U+2728"]);
    }

    #[test]
    fn test_append_caps_entries() {
        let (_dir, log) = temp_log();
        for i in 0..MAX_ENTRIES + 5 {
            log.append(HistoryEntry::record(
                EntryKind::TextToEmoji,
                &format!("entry {i}"),
                "😊",
            ))
            .unwrap();
        }

        let entries = log.load().unwrap();
        assert_eq!(entries.len(), MAX_ENTRIES);
        // Oldest entries were dropped
        assert_eq!(entries[0].input, "entry 5");
    }

    #[test]
    fn test_clear() {
        let (_dir, log) = temp_log();
        log.append(HistoryEntry::record(EntryKind::TextToEmoji, "hi", "👋"))
            .unwrap();
        log.clear().unwrap();
        assert!(log.load().unwrap().is_empty());
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let entry = HistoryEntry::record(EntryKind::EmojiToText, "😊✨", "I'm Feeling Happy");
        assert!(entry.matches("feeling"));
        assert!(entry.matches("😊"));
        assert!(!entry.matches("sad"));
    }

    #[test]
    fn test_entry_wire_format() {
        let entry = HistoryEntry::record(EntryKind::EmojiToText, "😊", "happy");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "emoji_to_text");
        assert!(json["timestamp"].as_str().unwrap().contains('T'));
    }
}
