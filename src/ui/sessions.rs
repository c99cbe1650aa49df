use std::time::{Duration, UNIX_EPOCH};

use crate::db::session::SessionSummary;

const DATE_FORMAT_TODAY: &str = "Today %H:%M";
const DATE_FORMAT_YESTERDAY: &str = "Yesterday %H:%M";
const DATE_FORMAT_OTHER: &str = "%Y-%m-%d";

pub fn format_session_date(timestamp: u64) -> String {
    let session_time = UNIX_EPOCH + Duration::from_secs(timestamp);
    let datetime: chrono::DateTime<chrono::Local> = session_time.into();

    let today = chrono::Local::now();
    let session_date = datetime.date_naive();

    if session_date == today.date_naive() {
        datetime.format(DATE_FORMAT_TODAY).to_string()
    } else if session_date == today.date_naive() - chrono::Duration::days(1) {
        datetime.format(DATE_FORMAT_YESTERDAY).to_string()
    } else {
        datetime.format(DATE_FORMAT_OTHER).to_string()
    }
}

pub fn format_session_item(session: &SessionSummary) -> String {
    let date = format_session_date(session.started_at);
    let status = if session.completed_at.is_some() {
        format!("{}/{}", session.correct_count, session.total_count)
    } else {
        "unfinished".to_string()
    };
    format!("{} - {} ({})", date, session.deck_name, status)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(completed: bool) -> SessionSummary {
        SessionSummary {
            id: 1,
            deck_name: "level234".to_string(),
            started_at: chrono::Local::now().timestamp() as u64,
            completed_at: completed.then_some(0),
            pool_size: 10,
            correct_count: 8,
            total_count: 12,
        }
    }

    #[test]
    fn test_format_today() {
        let now = chrono::Local::now().timestamp() as u64;
        assert!(format_session_date(now).starts_with("Today "));
    }

    #[test]
    fn test_format_old_date() {
        assert_eq!(format_session_date(0).len(), "1970-01-01".len());
    }

    #[test]
    fn test_format_session_item() {
        assert!(format_session_item(&summary(true)).ends_with("level234 (8/12)"));
        assert!(format_session_item(&summary(false)).ends_with("level234 (unfinished)"));
    }
}
