//! Reading progress math

/// Completion through a chapter: `verse / total * 100`
///
/// A zero-length chapter counts as 0% rather than dividing by zero.
pub fn completion_percentage(verse: u16, total_verses: u16) -> f64 {
    if total_verses == 0 {
        return 0.0;
    }
    (f64::from(verse) / f64::from(total_verses)) * 100.0
}

/// Scroll position as a percentage of the scrollable range, clamped to 0..=100
pub fn scroll_progress(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> f64 {
    let range = scroll_height - viewport_height;
    if range <= 0.0 || !range.is_finite() {
        return 100.0;
    }
    ((scroll_y / range) * 100.0).clamp(0.0, 100.0)
}

/// Verse under the reader at a given scroll percentage
///
/// Maps 0% to verse 1 and 100% to the last verse.
pub fn verse_at_progress(percent: f64, total_verses: u16) -> u16 {
    if total_verses == 0 {
        return 0;
    }
    let fraction = (percent / 100.0).clamp(0.0, 1.0);
    let verse = (fraction * f64::from(total_verses)).ceil() as u16;
    verse.clamp(1, total_verses)
}
