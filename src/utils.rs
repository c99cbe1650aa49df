use unicode_width::UnicodeWidthStr;

pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Formats a countdown as `MM:SS`, rounding partial seconds up.
pub fn format_countdown(remaining: chrono::Duration) -> String {
    let millis = remaining.num_milliseconds().max(0);
    let total_seconds = (millis + 999) / 1000;
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

pub fn accuracy_percent(correct: usize, total: usize) -> Option<f64> {
    if total == 0 {
        None
    } else {
        Some(correct as f64 / total as f64 * 100.0)
    }
}

/// Byte offset of the `char_index`-th character, or the string length past the end.
pub fn byte_index(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// Terminal columns taken by the first `char_index` characters.
pub fn display_width_before(s: &str, char_index: usize) -> usize {
    s[..byte_index(s, char_index)].width()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string_no_truncation() {
        assert_eq!(truncate_string("Short string", 20), "Short string");
    }

    #[test]
    fn test_truncate_string_with_truncation() {
        let result = truncate_string("This is a very long string that should be truncated", 20);
        assert_eq!(result, "This is a very lo...");
        assert_eq!(result.chars().count(), 20);
    }

    #[test]
    fn test_truncate_string_multibyte() {
        assert_eq!(truncate_string("ñandú ñandú ñandú", 8), "ñandú...");
    }

    #[test]
    fn test_truncate_string_empty() {
        assert_eq!(truncate_string("", 20), "");
    }

    #[test]
    fn test_format_countdown() {
        assert_eq!(format_countdown(chrono::Duration::minutes(5)), "05:00");
        assert_eq!(format_countdown(chrono::Duration::seconds(61)), "01:01");
        assert_eq!(format_countdown(chrono::Duration::milliseconds(500)), "00:01");
        assert_eq!(format_countdown(chrono::Duration::zero()), "00:00");
        assert_eq!(format_countdown(chrono::Duration::seconds(-4)), "00:00");
    }

    #[test]
    fn test_accuracy_percent() {
        assert_eq!(accuracy_percent(0, 0), None);
        assert_eq!(accuracy_percent(3, 4), Some(75.0));
    }

    #[test]
    fn test_byte_index_and_width() {
        let s = "café au lait";
        assert_eq!(byte_index(s, 4), 5);
        assert_eq!(byte_index(s, 100), s.len());
        assert_eq!(display_width_before(s, 4), 4);
        assert_eq!(display_width_before("日本", 1), 2);
    }
}
