use std::fmt::Display;

use registrar_core::types::EnrollmentRecord;

/// Title underlined with `=`, preceded by a blank line.
pub(crate) fn section_header(title: &str) -> String {
    format!("\n{}\n{}\n", title, "=".repeat(title.len()))
}

/// `(a, b, c)` for a key tuple.
pub(crate) fn key_display(key: &[String]) -> String {
    format!("({})", key.join(", "))
}

/// One indented line per item, capped at `limit` with a trailing count of
/// the rest.
pub(crate) fn limited_lines<T: Display>(items: &[T], limit: usize) -> String {
    let mut out = String::new();
    for item in items.iter().take(limit) {
        out.push_str(&format!("  {}\n", item));
    }
    if items.len() > limit {
        out.push_str(&format!("  ... and {} more\n", items.len() - limit));
    }
    out
}

pub(crate) fn record_line(r: &EnrollmentRecord) -> String {
    let or_dash = |v: Option<&str>| v.unwrap_or("-").to_string();
    format!(
        "{}  sec {} {} {}  grade {}",
        r.course_id,
        or_dash(r.section_id.as_deref()),
        or_dash(r.semester.as_deref()),
        r.year.map_or_else(|| "-".to_string(), |y| y.to_string()),
        or_dash(r.grade.as_deref()),
    )
}
