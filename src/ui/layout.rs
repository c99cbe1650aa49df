use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct TestLayout {
    pub header_area: Rect,
    pub prompt_area: Rect,
    pub input_area: Rect,
    pub feedback_area: Rect,
    pub help_area: Rect,
}

pub struct StudyLayout {
    pub header_area: Rect,
    pub status_area: Rect,
    pub words_area: Rect,
    pub help_area: Rect,
}

pub fn calculate_test_chunks(area: Rect) -> TestLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(4),
        ])
        .split(area);

    TestLayout {
        header_area: chunks[0],
        prompt_area: chunks[1],
        input_area: chunks[2],
        feedback_area: chunks[3],
        help_area: chunks[4],
    }
}

pub fn calculate_study_chunks(area: Rect) -> StudyLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(area);

    StudyLayout {
        header_area: chunks[0],
        status_area: chunks[1],
        words_area: chunks[2],
        help_area: chunks[3],
    }
}

/// Header, body and footer with the given fixed heights.
pub fn calculate_frame_chunks(area: Rect, margin: u16) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(margin)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(area);
    (chunks[0], chunks[1], chunks[2])
}
