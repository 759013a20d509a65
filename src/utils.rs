use crate::pagination::Pagination;

/// Cell text for an optional string; `-` when missing or blank.
pub fn text_or_dash(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.replace('\n', " "),
        _ => "-".to_string(),
    }
}

pub fn year_or_dash(value: Option<i64>) -> String {
    value.map_or_else(|| "-".to_string(), |y| y.to_string())
}

/// `Page 3 of 10`
pub fn page_report(pagination: &Pagination) -> String {
    format!(
        "Page {} of {}",
        pagination.page_index() + 1,
        pagination.page_count()
    )
}

/// `13-24 of 125000`, or `0 of 0` before anything is shown.
pub fn range_report(pagination: &Pagination, shown: usize) -> String {
    match pagination.range(shown) {
        Some((first, last)) => format!("{}-{} of {}", first, last, pagination.total()),
        None => format!("0 of {}", pagination.total()),
    }
}

/// Truncates to `max` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(1);
    let mut out: String = text.chars().take(keep).collect();
    out.push('…');
    out
}
