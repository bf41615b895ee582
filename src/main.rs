use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use colored::*;

mod app;
mod config;
mod emoji;
mod handler;
mod history;
mod openai;
mod prompts;
mod translator;
mod tui;
mod ui;

use app::App;
use config::Config;
use history::{EntryKind, HistoryEntry, HistoryLog};
use translator::Translator;

#[derive(Parser)]
#[command(name = "emojimood")]
#[command(about = "Translate moods to emoji (and back) with an OpenAI model")]
struct Cli {
    /// Model to use for translations
    #[arg(short, long)]
    model: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate text into a short emoji sequence
    Translate {
        /// Your mood or thought
        text: String,
    },
    /// Interpret an emoji sequence as descriptive text
    Reverse {
        /// Emojis to interpret
        emojis: String,
    },
    /// Show translation history
    History {
        /// Filter entries by substring
        #[arg(short, long)]
        search: Option<String>,
        /// Maximum number of entries to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
    /// Clear translation history
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let interactive = cli.command.is_none();
    let _log_guard = init_logging(interactive)?;

    let mut config = Config::load().unwrap_or_else(|_| Config::new());
    if let Some(model) = cli.model {
        config.model = Some(model);
    }

    match cli.command {
        Some(Commands::Translate { text }) => translate_once(&config, &text, false).await?,
        Some(Commands::Reverse { emojis }) => translate_once(&config, &emojis, true).await?,
        Some(Commands::History { search, limit }) => show_history(search.as_deref(), limit)?,
        Some(Commands::Clear) => {
            HistoryLog::open_default()?.clear()?;
            println!("{}", "🗑️  History cleared".green());
        }
        None => run_tui(config).await?,
    }

    Ok(())
}

async fn translate_once(config: &Config, input: &str, reverse: bool) -> Result<()> {
    let translator = Translator::new(config)?;

    let (kind, result) = if reverse {
        (
            EntryKind::EmojiToText,
            translator.translate_reverse(input).await,
        )
    } else {
        (EntryKind::TextToEmoji, translator.translate(input).await)
    };

    println!("{}", result.bold());

    let entry = HistoryEntry::record(kind, input, &result);
    if !entry.emoji_codes.is_empty() {
        println!(
            "{} {}",
            "Emoji Codes:".dimmed(),
            entry.emoji_codes.join(", ").dimmed()
        );
    }

    HistoryLog::open_default()?.append(entry)?;
    Ok(())
}

fn show_history(search: Option<&str>, limit: usize) -> Result<()> {
    let entries = HistoryLog::open_default()?.load()?;

    let filtered: Vec<_> = entries
        .iter()
        .rev()
        .filter(|e| search.map(|q| e.matches(q)).unwrap_or(true))
        .take(limit)
        .collect();

    if filtered.is_empty() {
        println!("{}", "No translation history yet.".yellow());
        return Ok(());
    }

    for entry in filtered {
        let (input_label, translation_label) = match entry.kind {
            EntryKind::TextToEmoji => ("Input", "Translation"),
            EntryKind::EmojiToText => ("Emojis", "Meaning"),
        };
        println!(
            "{} {}",
            format!("{input_label}:").bold().blue(),
            entry.input
        );
        println!(
            "{} {}",
            format!("{translation_label}:").bold().green(),
            entry.translation
        );
        if entry.kind == EntryKind::TextToEmoji && !entry.emoji_codes.is_empty() {
            println!(
                "{} {}",
                "Emoji Codes:".dimmed(),
                entry.emoji_codes.join(", ").dimmed()
            );
        }
        println!("{}", entry.timestamp.dimmed());
        println!();
    }

    Ok(())
}

async fn run_tui(config: Config) -> Result<()> {
    let translator = Translator::new(&config)?;
    let history_log = HistoryLog::open_default()?;
    let mut app = App::new(translator, history_log)?;

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = tui::EventHandler::new();

    while !app.should_quit {
        terminal.draw(|frame| ui::render(&mut app, frame))?;
        match events.next().await {
            Some(event) => handler::handle_event(&mut app, event).await?,
            None => break,
        }
    }

    tui::restore()?;
    Ok(())
}

/// One-shot commands log to stderr; the TUI logs to a file so warnings
/// don't corrupt the alternate screen.
fn init_logging(to_file: bool) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("emojimood=info"));

    if to_file {
        let dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?
            .join("emojimood");
        std::fs::create_dir_all(&dir)?;

        let (writer, guard) =
            tracing_appender::non_blocking(tracing_appender::rolling::never(dir, "emojimood.log"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(false)
            .init();
        Ok(Some(guard))
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        Ok(None)
    }
}
