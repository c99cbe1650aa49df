use crate::models::DrillSession;
use crate::ui::layout::calculate_test_chunks;
use crate::utils::display_width_before;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::key_span;

pub fn draw_test(f: &mut Frame, session: &DrillSession) {
    let layout = calculate_test_chunks(f.area());
    let progress = session.progress();

    let mut header_text = format!(
        "{} - Score {}/{}",
        session.deck_name, progress.correct_count, progress.total_count
    );
    if let Some(accuracy) = progress.accuracy() {
        header_text.push_str(&format!(" ({:.0}%)", accuracy));
    }
    header_text.push_str(&format!(
        " - Pass {}/{}",
        progress.drawn_count, progress.pool_size
    ));

    let header = Paragraph::new(header_text)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let prompt = Paragraph::new("Spell the word you hear")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Listen"));
    f.render_widget(prompt, layout.prompt_area);

    let typing = session.feedback.is_none();
    let input_text = if typing && session.input_buffer.is_empty() {
        Span::styled(
            "[Type the spelling here...]",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::from(session.input_buffer.as_str())
    };
    let input = Paragraph::new(Line::from(input_text))
        .block(Block::default().borders(Borders::ALL).title("Your Spelling"));
    f.render_widget(input, layout.input_area);

    if typing {
        let column = display_width_before(&session.input_buffer, session.cursor_position) as u16;
        let max_x = layout.input_area.x + layout.input_area.width.saturating_sub(2);
        let cursor_x = (layout.input_area.x + 1 + column).min(max_x);
        f.set_cursor_position((cursor_x, layout.input_area.y + 1));
    }

    let mut feedback_text = Text::default();
    if let Some(notice) = &session.notice {
        feedback_text.push_line(Line::from(Span::styled(
            notice.as_str(),
            Style::default().fg(Color::Yellow),
        )));
        feedback_text.push_line(Line::from(""));
    }
    if let Some(feedback) = &session.feedback {
        let headline_style = if feedback.correct {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        };
        let mut lines = feedback.lines().into_iter();
        if let Some(headline) = lines.next() {
            feedback_text.push_line(Line::from(Span::styled(headline, headline_style)));
        }
        for line in lines {
            feedback_text.push_line(Line::from(line));
        }
    }
    if let Some(error) = &session.last_error {
        feedback_text.push_line(Line::from(""));
        feedback_text.push_line(Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(Color::Red),
        )));
    }
    let feedback = Paragraph::new(feedback_text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Feedback"));
    f.render_widget(feedback, layout.feedback_area);

    let first_line = if typing {
        Line::from(vec![
            key_span("Enter"),
            Span::from(" Submit  "),
            key_span("Ctrl+R"),
            Span::from(" Repeat Word  "),
            key_span("Esc"),
            Span::from(" Stop Test"),
        ])
    } else {
        Line::from(vec![
            key_span("Enter"),
            Span::from(" Next Word  "),
            key_span("Ctrl+R"),
            Span::from(" Repeat Word  "),
            key_span("Esc"),
            Span::from(" Stop Test"),
        ])
    };
    let help_text = vec![
        first_line,
        Line::from(vec![key_span("Ctrl+C"), Span::from(" Exit App")]),
    ];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}

pub fn draw_quit_confirmation(f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(5)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new("Stop Test")
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let message = Paragraph::new("Stop the test and see your score?")
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(message, chunks[1]);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "y",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Yes (Show Score)  "),
        Span::styled(
            "n",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::from(" No (Keep Spelling)  "),
        key_span("Ctrl+C"),
        Span::from(" Exit App"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}
