use crate::models::TestOutcome;
use crate::ui::layout::calculate_frame_chunks;
use crate::utils::accuracy_percent;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::key_span;

pub fn draw_summary(f: &mut Frame, outcome: &TestOutcome) {
    let (header, body, footer) = calculate_frame_chunks(f.area(), 1);

    let title = Paragraph::new(format!("Test Summary - {}", outcome.deck_name))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, header);

    let mut summary_text = Text::default();
    summary_text.push_line(Line::from(format!("Words in pool: {}", outcome.pool_size)));
    summary_text.push_line(Line::from(""));
    summary_text.push_line(Line::from(format!(
        "Score: {}/{}",
        outcome.correct_count, outcome.total_count
    )));
    let accuracy = match accuracy_percent(outcome.correct_count, outcome.total_count) {
        Some(percent) => format!("Accuracy: {:.1}%", percent),
        None => "No words attempted".to_string(),
    };
    summary_text.push_line(Line::from(Span::styled(
        accuracy,
        Style::default().add_modifier(Modifier::BOLD),
    )));

    let summary = Paragraph::new(summary_text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(summary, body);

    let help_text = vec![Line::from(vec![
        key_span("m"),
        Span::from(" Main Menu  "),
        key_span("Esc"),
        Span::from(" Quit  "),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, footer);
}
