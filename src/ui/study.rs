use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::key_span;
use super::layout::{calculate_frame_chunks, calculate_study_chunks};
use crate::config::{NO_EXAMPLE, NO_MEANING, STUDY_DURATION_SECS};
use crate::models::DrillSession;
use crate::utils::format_countdown;

fn title_paragraph(text: String) -> Paragraph<'static> {
    Paragraph::new(text)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
}

pub fn draw_study_ready(f: &mut Frame, session: &DrillSession) {
    let (header, body, footer) = calculate_frame_chunks(f.area(), 1);

    f.render_widget(title_paragraph(format!("Study - {}", session.deck_name)), header);

    let mut text = Text::default();
    text.push_line(Line::from(format!(
        "{} words selected for this session.",
        session.selector.pool_size()
    )));
    text.push_line(Line::from(""));
    text.push_line(Line::from(format!(
        "You have {} minutes to study them before the test unlocks.",
        STUDY_DURATION_SECS / 60
    )));
    let body_widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(body_widget, body);

    let help = Paragraph::new(Line::from(vec![
        key_span("Enter"),
        Span::from(" Start Studying  "),
        key_span("Esc"),
        Span::from(" Back to Menu"),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, footer);
}

pub fn draw_study(f: &mut Frame, session: &DrillSession) {
    let layout = calculate_study_chunks(f.area());

    f.render_widget(
        title_paragraph(format!(
            "Study - {} ({} words)",
            session.deck_name,
            session.selector.pool_size()
        )),
        layout.header_area,
    );

    let status = if session.can_start_test() {
        Line::from(Span::styled(
            "Study time is over. Press Enter to start the test.",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(format!(
            "Time remaining: {}",
            format_countdown(session.timer.remaining())
        ))
    };
    let status = Paragraph::new(status)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, layout.status_area);

    let mut words = Text::default();
    for word in session.selector.pool() {
        words.push_line(Line::from(Span::styled(
            word.as_str(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        let meaning = session
            .meaning_for(word)
            .unwrap_or_else(|| NO_MEANING.to_string());
        words.push_line(Line::from(format!("  Meaning: {}", meaning)));
        words.push_line(Line::from(format!(
            "  Example: {}",
            session.store.example(word).unwrap_or(NO_EXAMPLE)
        )));
        words.push_line(Line::from(""));
    }
    let words = Paragraph::new(words)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Words"));
    f.render_widget(words, layout.words_area);

    let mut help_spans = Vec::new();
    if session.can_start_test() {
        help_spans.extend([key_span("Enter"), Span::from(" Start Test  ")]);
    }
    help_spans.extend([key_span("Esc"), Span::from(" Back to Menu")]);
    let help = Paragraph::new(Line::from(help_spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}
