use serde::{Deserialize, Deserializer};

use crate::pagination::FIRST_PAGE;

// `?page=abc` or `?page=` falls back to the first page instead of rejecting the request
pub fn deserialize_page<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.as_deref().map_or(FIRST_PAGE, parse_page))
}

// integers outside i64 saturate, so a huge page stays past the end
fn parse_page(raw: &str) -> i64 {
    let raw = raw.trim();
    if let Ok(page) = raw.parse::<i64>() {
        return page;
    }
    let digits = raw.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        FIRST_PAGE
    } else if raw.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    }
}

pub fn first_page() -> i64 {
    FIRST_PAGE
}
