//! Small formatting helpers shared by the card renderers.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::debug;

/// Text shown when a record carries no update timestamp.
pub const DATE_UNKNOWN: &str = "Unknown";

/// Text shown when the update timestamp cannot be parsed.
pub const DATE_FALLBACK: &str = "Recently";

/// Dot color for languages missing from [`language_color`]'s table.
pub const DEFAULT_LANGUAGE_COLOR: &str = "#858585";

/// Format an ISO 8601 timestamp as `January 5, 2024`.
pub fn format_date(value: Option<&str>) -> String {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return DATE_UNKNOWN.to_string();
    };

    match parse_date(raw) {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => {
            debug!(value = raw, "unparsable date, using fallback");
            DATE_FALLBACK.to_string()
        }
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Swatch color for a language dot.
pub fn language_color(language: &str) -> &'static str {
    match language {
        "JavaScript" => "#f1e05a",
        "TypeScript" => "#2b7489",
        "Python" => "#3572A5",
        "Java" => "#b07219",
        "Go" => "#00ADD8",
        "Rust" => "#dea584",
        "Ruby" => "#701516",
        "PHP" => "#4F5D95",
        "C++" => "#f34b7d",
        "C" => "#555555",
        "C#" => "#178600",
        "Swift" => "#ffac45",
        "Kotlin" => "#A97BFF",
        "HTML" => "#e34c26",
        "CSS" => "#563d7c",
        "Shell" => "#89e051",
        "Vue" => "#41b883",
        "React" => "#61dafb",
        _ => DEFAULT_LANGUAGE_COLOR,
    }
}

/// Escape text for use in element content or a double-quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
