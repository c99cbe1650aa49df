pub mod layout;
mod drill;
mod menu;
mod sessions;
mod study;
mod summary;

use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};

pub use layout::{calculate_frame_chunks, calculate_study_chunks, calculate_test_chunks};
pub use drill::{draw_quit_confirmation, draw_test};
pub use menu::draw_menu;
pub use sessions::{format_session_date, format_session_item};
pub use study::{draw_study, draw_study_ready};
pub use summary::draw_summary;

fn key_span(key: &str) -> Span<'_> {
    Span::styled(
        key,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
}
