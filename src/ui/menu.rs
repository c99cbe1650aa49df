use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use super::key_span;
use super::sessions::format_session_item;
use crate::models::MenuState;
use crate::utils::truncate_string;
use crate::wordlist::deck_name;

fn draw_panel_header(area: Rect, title: &str, f: &mut Frame) {
    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Left)
        .block(Block::default());

    f.render_widget(header, area);
}

fn empty_item(text: &str) -> ListItem<'_> {
    ListItem::new(text).style(
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )
}

pub fn draw_menu(f: &mut Frame, menu: &MenuState) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(6),
            Constraint::Length(3),
        ])
        .split(area);

    let title = Paragraph::new(format!("Spelling Drill v{}", env!("CARGO_PKG_VERSION")))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let lists = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    let wordlist_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(lists[0]);
    let sessions_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(lists[1]);

    draw_panel_header(wordlist_chunks[0], "Word Lists", f);

    let wordlist_items: Vec<ListItem> = if menu.wordlists.is_empty() {
        vec![empty_item("No word lists found")]
    } else {
        menu.wordlists
            .iter()
            .enumerate()
            .map(|(i, path)| {
                let style = if i == menu.selected_file_index {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(truncate_string(&deck_name(path), 40)).style(style)
            })
            .collect()
    };

    let wordlist_list = List::new(wordlist_items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(wordlist_list, wordlist_chunks[1]);

    draw_panel_header(sessions_chunks[0], "Recent Sessions", f);

    let session_items: Vec<ListItem> = if menu.sessions.is_empty() {
        vec![empty_item("No past sessions")]
    } else {
        menu.sessions
            .iter()
            .map(|session| ListItem::new(truncate_string(&format_session_item(session), 46)))
            .collect()
    };

    let sessions_list = List::new(session_items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(sessions_list, sessions_chunks[1]);

    let on_off = |enabled: bool| if enabled { "On" } else { "Off" };
    let mut settings = vec![
        Line::from(format!("Pool size: {}", menu.pool_size)),
        Line::from(format!("Load mode: {}", menu.load_mode.label())),
        Line::from(format!(
            "Dictionary: {}  Speech: {}",
            on_off(menu.dictionary_enabled),
            on_off(menu.speech_enabled)
        )),
    ];
    if let Some(error) = &menu.error {
        settings.push(Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    }
    let settings = Paragraph::new(settings)
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::ALL).title("Settings"));
    f.render_widget(settings, chunks[2]);

    let help_text = vec![Line::from(vec![
        key_span("↑/↓"),
        Span::from(" Navigate  "),
        key_span("+/-"),
        Span::from(" Pool Size  "),
        key_span("m"),
        Span::from(" Mode  "),
        key_span("Enter"),
        Span::from(" Study  "),
        key_span("p"),
        Span::from(" Practice  "),
        key_span("q/Esc"),
        Span::from(" Quit"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[3]);
}
