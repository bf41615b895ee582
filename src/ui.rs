use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

use crate::app::{App, Direction, FocusPane, InputMode};
use crate::history::EntryKind;

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, body, footer
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(frame, header_area);

    // Body: input sidebar on the left, result + history on the right
    let [sidebar_area, main_area] =
        Layout::horizontal([Constraint::Length(36), Constraint::Min(0)]).areas(body_area);

    render_sidebar(app, frame, sidebar_area);

    let [result_area, history_area] =
        Layout::vertical([Constraint::Length(6), Constraint::Min(0)]).areas(main_area);

    render_result(app, frame, result_area);
    render_history(app, frame, history_area);

    render_footer(app, frame, footer_area);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            " ✨ Emoji Mood Translator ✨ ",
            Style::default().fg(Color::Yellow).bold(),
        ),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_sidebar(app: &App, frame: &mut Frame, area: Rect) {
    let [input_area, mode_area] =
        Layout::vertical([Constraint::Min(5), Constraint::Length(3)]).areas(area);

    let editing_input = app.input_mode == InputMode::Editing && !app.searching;
    let border_style = if editing_input {
        Style::default().fg(Color::Yellow)
    } else if app.focus == FocusPane::Input {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let input_title = match app.direction {
        Direction::Forward => " 💬 Your mood or thought ",
        Direction::Reverse => " 💬 Emojis to interpret ",
    };

    let input = Paragraph::new(app.input.as_str())
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(input_title),
        );
    frame.render_widget(input, input_area);

    if editing_input {
        // Cursor position within the wrapped input box
        let inner_width = input_area.width.saturating_sub(2).max(1);
        let cursor = app.input_cursor as u16;
        let cursor_x = input_area.x + 1 + cursor % inner_width;
        let cursor_y = input_area.y + 1 + cursor / inner_width;
        frame.set_cursor_position((cursor_x, cursor_y));
    }

    let mode = Paragraph::new(Line::from(vec![
        Span::styled("Mode: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            app.direction.label(),
            Style::default().fg(Color::Yellow).bold(),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" r to switch "),
    );
    frame.render_widget(mode, mode_area);
}

fn render_result(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Translation ");

    let mut lines = Vec::new();
    if app.loading {
        let dots = ".".repeat(app.animation_frame as usize + 1);
        lines.push(Line::from(Span::styled(
            format!("Translating{dots}"),
            Style::default().fg(Color::DarkGray).italic(),
        )));
    } else if app.result.is_empty() {
        lines.push(Line::from(Span::styled(
            "✨ Enter text to translate ✨",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            app.result.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        if !app.emoji_codes.is_empty() {
            lines.push(Line::default());
            lines.push(Line::from(vec![
                Span::styled("Emoji Codes: ", Style::default().fg(Color::DarkGray)),
                Span::styled(app.emoji_codes.clone(), Style::default().fg(Color::Gray)),
            ]));
        }
    }

    let result = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .block(block);
    frame.render_widget(result, area);
}

fn render_history(app: &mut App, frame: &mut Frame, area: Rect) {
    let [search_area, list_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);

    let search_style = if app.searching {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let search = Paragraph::new(Line::from(vec![
        Span::styled(" 🔍 ", search_style),
        Span::styled(app.history_search.clone(), search_style),
        Span::styled(
            if app.searching { "▏" } else { "" },
            Style::default().fg(Color::Yellow),
        ),
    ]));
    frame.render_widget(search, search_area);

    let border_style = if app.focus == FocusPane::History {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let entries = app.filtered_history();
    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| {
            let (input_label, translation_label) = match entry.kind {
                EntryKind::TextToEmoji => ("Input: ", "Translation: "),
                EntryKind::EmojiToText => ("Emojis: ", "Meaning: "),
            };
            let mut lines = vec![
                Line::from(vec![
                    Span::styled(input_label, Style::default().fg(Color::DarkGray)),
                    Span::raw(entry.input.clone()),
                ]),
                Line::from(vec![
                    Span::styled(translation_label, Style::default().fg(Color::DarkGray)),
                    Span::styled(entry.translation.clone(), Style::default().bold()),
                ]),
            ];
            if entry.kind == EntryKind::TextToEmoji && !entry.emoji_codes.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("Codes: {}", entry.emoji_codes.join(", ")),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            lines.push(Line::default());
            ListItem::new(Text::from(lines))
        })
        .collect();

    let title = if entries.is_empty() {
        " 🕘 History (empty) ".to_string()
    } else {
        format!(" 🕘 History ({}) ", entries.len())
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title),
        )
        .highlight_style(Style::default().bg(Color::DarkGray));

    frame.render_stateful_widget(list, list_area, &mut app.history_state);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    // A status toast replaces the key hints while it is live
    if let Some(status) = &app.status {
        let toast = Paragraph::new(Line::from(Span::styled(
            format!(" {status} "),
            Style::default().bg(Color::Yellow).fg(Color::Black),
        )));
        frame.render_widget(toast, area);
        return;
    }

    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let hints = if app.input_mode == InputMode::Editing {
        vec![
            Span::styled(" Enter ", key_style),
            Span::styled(" submit ", label_style),
            Span::styled(" Esc ", key_style),
            Span::styled(" done ", label_style),
        ]
    } else {
        vec![
            Span::styled(" i ", key_style),
            Span::styled(" edit ", label_style),
            Span::styled(" r ", key_style),
            Span::styled(" mode ", label_style),
            Span::styled(" Tab ", key_style),
            Span::styled(" focus ", label_style),
            Span::styled(" / ", key_style),
            Span::styled(" search ", label_style),
            Span::styled(" c/C ", key_style),
            Span::styled(" copy ", label_style),
            Span::styled(" D ", key_style),
            Span::styled(" clear ", label_style),
            Span::styled(" q ", key_style),
            Span::styled(" quit ", label_style),
        ]
    };

    let footer = Paragraph::new(Line::from(hints));
    frame.render_widget(footer, area);
}
